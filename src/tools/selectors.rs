//! TradingView DOM selectors used by generated actions

pub const SEARCH_BOX: &str = r#"[data-name="symbol-search-input"]"#;
pub const CHART_TIMEFRAMES: &str = r#"[data-value="1h"], [data-value="4h"], [data-value="1D"]"#;
pub const WATCHLIST_ITEMS: &str = "[data-symbol]";
pub const ADD_TO_WATCHLIST: &str = r#"[data-name="add-symbol-to-watchlist"]"#;
pub const CHART_TOOLS: &str = r#"[data-name="drawing-toolbar"]"#;
pub const INDICATORS: &str = r#"[data-name="indicators-toolbar"]"#;

/// Named selectors, in the order they are listed to the model
pub const ALL: &[(&str, &str)] = &[
    ("search_box", SEARCH_BOX),
    ("chart_timeframes", CHART_TIMEFRAMES),
    ("watchlist_items", WATCHLIST_ITEMS),
    ("add_to_watchlist", ADD_TO_WATCHLIST),
    ("chart_tools", CHART_TOOLS),
    ("indicators", INDICATORS),
];
