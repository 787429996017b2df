use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("yahoo finance api error: {0}")]
    Api(String),
    #[error("no price data returned for {0}")]
    NoData(String),
    #[error("no tickers requested")]
    EmptySelection,
    #[error("a lookback of {0} days is out of range")]
    LookbackOutOfRange(u32),
    #[error("column {0} is not in the price table")]
    MissingColumn(String),
}
