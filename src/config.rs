use clap::Parser;
use tracing::Level;

/// Companies offered in the sidebar, as (display name, ticker symbol).
pub const COMPANIES: &[(&str, &str)] = &[
    ("apple", "AAPL"),
    ("facebook", "META"),
    ("google", "GOOGL"),
    ("microsoft", "MSFT"),
    ("netflix", "NFLX"),
    ("amazon", "AMZN"),
];

pub const DEFAULT_MAX_DAYS: u32 = 50;
/// Upper bound for `--max-days` (roughly twenty years of trading days).
pub const MAX_DAYS_LIMIT: u32 = 5000;

pub const CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
pub const USER_AGENT: &str = "Mozilla/5.0";
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Width of the selection panel on the left
pub const SIDEBAR_WIDTH: f32 = 320.0;

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Historical closing prices of the big US tech stocks")]
pub struct Config {
    /// Largest lookback window (trading days) the day selector allows.
    #[arg(long, default_value_t = DEFAULT_MAX_DAYS, value_parser = clap::value_parser!(u32).range(1..=MAX_DAYS_LIMIT as i64))]
    pub max_days: u32,

    /// Maximum log level (trace, debug, info, warn, error).
    #[arg(long, default_value_t = Level::INFO)]
    pub log_level: Level,
}

/// Display name for a catalog ticker, falling back to the ticker itself.
pub fn company_for(ticker: &str) -> &str {
    COMPANIES
        .iter()
        .find(|(_, symbol)| *symbol == ticker)
        .map(|(company, _)| *company)
        .unwrap_or(ticker)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_lookups() {
        assert_eq!(company_for("NFLX"), "netflix");
        assert_eq!(company_for("XYZ"), "XYZ");
    }

    #[test]
    fn config_defaults() {
        let config = Config::parse_from(["stock_trend"]);
        assert_eq!(config.max_days, DEFAULT_MAX_DAYS);
        assert_eq!(config.log_level, Level::INFO);
    }

    #[test]
    fn config_rejects_zero_max_days() {
        assert!(Config::try_parse_from(["stock_trend", "--max-days", "0"]).is_err());
        let config = Config::try_parse_from(["stock_trend", "--max-days", "120"]).unwrap();
        assert_eq!(config.max_days, 120);
    }

    #[test]
    fn config_rejects_max_days_above_limit() {
        let limit = MAX_DAYS_LIMIT.to_string();
        let config = Config::try_parse_from(["stock_trend", "--max-days", limit.as_str()]).unwrap();
        assert_eq!(config.max_days, MAX_DAYS_LIMIT);
        assert!(Config::try_parse_from(["stock_trend", "--max-days", "5001"]).is_err());
        assert!(Config::try_parse_from(["stock_trend", "--max-days", "100000000"]).is_err());
    }
}
