//! Tools available to the agent loop
//!
//! The set is closed: the model picks a tool by name and the name is resolved
//! to a `TradingTool` variant. All three tools return canned TradingView data.

use crate::models::{Action, StockQuote};
use crate::Result;
use serde_json::json;

pub mod selectors;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradingTool {
    ExtractPageData,
    AnalyzeStocks,
    GenerateActions,
}

impl TradingTool {
    pub const ALL: [TradingTool; 3] = [
        TradingTool::ExtractPageData,
        TradingTool::AnalyzeStocks,
        TradingTool::GenerateActions,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TradingTool::ExtractPageData => "ExtractPageData",
            TradingTool::AnalyzeStocks => "AnalyzeStocks",
            TradingTool::GenerateActions => "GenerateActions",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TradingTool::ExtractPageData => "Extract trading data from TradingView DOM elements",
            TradingTool::AnalyzeStocks => "Analyze stock performance and trends",
            TradingTool::GenerateActions => {
                "Generate DOM actions to execute on TradingView page"
            }
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name.trim())
    }

    /// Comma-separated tool names, as listed to the model
    pub fn names() -> String {
        Self::ALL
            .iter()
            .map(|tool| tool.name())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn invoke(&self, input: &str) -> Result<String> {
        match self {
            TradingTool::ExtractPageData => extract_page_data(input),
            TradingTool::AnalyzeStocks => Ok(analyze_stocks(input)),
            TradingTool::GenerateActions => generate_actions(input),
        }
    }
}

pub fn sample_quotes() -> Vec<StockQuote> {
    [
        ("AAPL", 185.50, "+2.5%"),
        ("GOOGL", 2850.75, "+1.8%"),
        ("TSLA", 250.30, "+3.2%"),
        ("MSFT", 415.20, "+1.1%"),
        ("AMZN", 3380.45, "+2.8%"),
    ]
    .into_iter()
    .map(|(symbol, price, change)| StockQuote {
        symbol: symbol.to_string(),
        price,
        change: change.to_string(),
    })
    .collect()
}

fn extract_page_data(selector_info: &str) -> Result<String> {
    let data = serde_json::to_string_pretty(&json!({ "stocks": sample_quotes() }))?;
    Ok(format!("Extracted data from: {}\nData: {}", selector_info, data))
}

const MARKET_COMMENTARY: &str = "Based on current market data:

Top Performing Stocks Today:
1. TSLA - +3.2% (Strong momentum in EV sector)
2. AMZN - +2.8% (Positive earnings outlook)
3. AAPL - +2.5% (Strong iPhone sales)
4. GOOGL - +1.8% (AI developments boost)
5. MSFT - +1.1% (Cloud growth continues)

Market sentiment is generally positive with tech stocks leading gains.";

fn analyze_stocks(stock_data: &str) -> String {
    format!("Analysis of stocks: {}\n\nResult: {}", stock_data, MARKET_COMMENTARY)
}

pub fn sample_actions() -> Vec<Action> {
    vec![
        Action::click(selectors::SEARCH_BOX, "Click search box"),
        Action::type_text(selectors::SEARCH_BOX, "TSLA", "Search for Tesla stock"),
    ]
}

fn generate_actions(intent: &str) -> Result<String> {
    let actions = serde_json::to_string_pretty(&sample_actions())?;
    Ok(format!("Generated actions for: {}\nActions: {}", intent, actions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActionType;

    #[test]
    fn test_lookup_by_name() {
        for tool in TradingTool::ALL {
            assert_eq!(TradingTool::from_name(tool.name()), Some(tool));
        }
        assert_eq!(
            TradingTool::from_name(" AnalyzeStocks "),
            Some(TradingTool::AnalyzeStocks)
        );
        assert_eq!(TradingTool::from_name("analyzestocks"), None);
        assert_eq!(TradingTool::from_name("PlaceOrder"), None);
    }

    #[test]
    fn test_names_listing() {
        assert_eq!(
            TradingTool::names(),
            "ExtractPageData, AnalyzeStocks, GenerateActions"
        );
    }

    #[test]
    fn test_extract_page_data() {
        let output = TradingTool::ExtractPageData.invoke("watchlist").unwrap();
        assert!(output.starts_with("Extracted data from: watchlist\nData: {"));
        for symbol in ["AAPL", "GOOGL", "TSLA", "MSFT", "AMZN"] {
            assert!(output.contains(symbol), "missing {}", symbol);
        }
        assert!(output.contains("\"+3.2%\""));
    }

    #[test]
    fn test_analyze_stocks_ranking() {
        let output = TradingTool::AnalyzeStocks.invoke("AAPL, TSLA").unwrap();
        assert!(output.starts_with("Analysis of stocks: AAPL, TSLA\n\nResult: "));

        let tsla = output.find("1. TSLA").unwrap();
        let msft = output.find("5. MSFT").unwrap();
        assert!(tsla < msft);
    }

    #[test]
    fn test_generate_actions() {
        let actions = sample_actions();
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0].action_type, ActionType::Click);
        assert_eq!(actions[1].action_type, ActionType::Type);
        assert_eq!(actions[1].text.as_deref(), Some("TSLA"));
        assert_eq!(actions[0].selector, selectors::SEARCH_BOX);

        let output = TradingTool::GenerateActions.invoke("search tesla").unwrap();
        assert!(output.starts_with("Generated actions for: search tesla\nActions: ["));
        assert!(output.contains("\"type\": \"click\""));
    }
}
