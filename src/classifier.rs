//! Command Classifier
//!
//! Classifies extension commands as either:
//! - Simple: handled by the tool-using agent loop (e.g., "show me watchlist")
//! - Complex: sent straight to the advanced model (e.g., "analyze TSLA strategy")

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandComplexity {
    Simple,
    Complex,
}

/// Static keyword list, matched case-insensitively
const COMPLEX_KEYWORDS: &[&str] = &[
    "analyze",
    "predict",
    "forecast",
    "strategy",
    "technical analysis",
    "fundamental",
];

/// Command classifier
pub struct CommandClassifier;

impl CommandClassifier {
    pub fn classify(command: &str) -> CommandComplexity {
        if Self::is_complex(command) {
            CommandComplexity::Complex
        } else {
            CommandComplexity::Simple
        }
    }

    pub fn is_complex(command: &str) -> bool {
        let lowered = command.to_lowercase();
        COMPLEX_KEYWORDS.iter().any(|kw| lowered.contains(kw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_commands() {
        let cases = vec![
            "show me watchlist",
            "search for TSLA",
            "open the 4h chart",
            "what are the top gainers today?",
        ];

        for c in cases {
            assert_eq!(CommandClassifier::classify(c), CommandComplexity::Simple, "{}", c);
        }
    }

    #[test]
    fn test_complex_commands() {
        let cases = vec![
            "analyze TSLA strategy",
            "Predict where AAPL goes next week",
            "give me a FORECAST for MSFT",
            "run a technical analysis on GOOGL",
            "fundamental view on AMZN",
        ];

        for c in cases {
            assert_eq!(CommandClassifier::classify(c), CommandComplexity::Complex, "{}", c);
        }
    }

    #[test]
    fn test_keyword_inside_word() {
        // Substring match, not word match
        assert!(CommandClassifier::is_complex("reanalyze my list"));
        assert!(CommandClassifier::is_complex("check my strategy's entries"));
        assert!(!CommandClassifier::is_complex("strategies for today"));
        assert!(!CommandClassifier::is_complex("strat"));
    }

    #[test]
    fn test_edge_cases() {
        assert!(!CommandClassifier::is_complex(""));
        assert!(!CommandClassifier::is_complex("   "));
        assert!(!CommandClassifier::is_complex("technical"));
    }
}
