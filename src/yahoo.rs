use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::config::{CHART_URL, REQUEST_TIMEOUT_SECS, USER_AGENT};
use crate::data_source::PriceFeed;
use crate::error::DataError;

/// Daily closes from the Yahoo Finance chart endpoint.
pub struct YahooFeed {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl YahooFeed {
    pub fn new() -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            base_url: CHART_URL.to_string(),
        })
    }
}

impl PriceFeed for YahooFeed {
    fn daily_closes(&self, ticker: &str, days: u32) -> Result<Vec<(NaiveDate, f64)>, DataError> {
        let (period1, period2) = request_span(Utc::now(), days)?;
        let url = format!(
            "{}/{}?interval=1d&period1={}&period2={}",
            self.base_url, ticker, period1, period2
        );
        debug!("GET {url}");

        let body = self.client.get(&url).send()?.text()?;
        parse_chart(ticker, &body)
    }
}

/// Unix timestamps bounding a request wide enough to hold `days` trading days.
fn request_span(now: DateTime<Utc>, days: u32) -> Result<(i64, i64), DataError> {
    let calendar_days = i64::from(days) * 2 + 10;
    let start = chrono::Duration::try_days(calendar_days)
        .and_then(|span| now.checked_sub_signed(span))
        .ok_or(DataError::LookbackOutOfRange(days))?;
    Ok((start.timestamp(), now.timestamp()))
}

#[derive(Deserialize, Debug)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Deserialize, Debug)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartApiError>,
}

#[derive(Deserialize, Debug)]
struct ChartApiError {
    code: String,
    description: String,
}

#[derive(Deserialize, Debug)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Deserialize, Debug)]
struct Indicators {
    quote: Vec<Quote>,
}

#[derive(Deserialize, Debug)]
struct Quote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// Parse a chart response into ascending (date, close) pairs, skipping null closes.
pub fn parse_chart(ticker: &str, body: &str) -> Result<Vec<(NaiveDate, f64)>, DataError> {
    let envelope: ChartEnvelope = serde_json::from_str(body)?;

    if let Some(err) = envelope.chart.error {
        if err.code == "Not Found" {
            return Err(DataError::NoData(ticker.to_string()));
        }
        return Err(DataError::Api(format!("{}: {}", err.code, err.description)));
    }

    let Some(result) = envelope.chart.result.and_then(|r| r.into_iter().next()) else {
        return Err(DataError::NoData(ticker.to_string()));
    };
    let Some(quote) = result.indicators.quote.into_iter().next() else {
        return Err(DataError::NoData(ticker.to_string()));
    };

    let mut closes: Vec<(NaiveDate, f64)> = result
        .timestamp
        .iter()
        .zip(quote.close.iter())
        .filter_map(|(ts, close)| {
            let close = (*close)?;
            let date = DateTime::from_timestamp(*ts, 0)?.date_naive();
            Some((date, close))
        })
        .collect();

    closes.sort_by_key(|(date, _)| *date);
    closes.dedup_by_key(|(date, _)| *date);
    Ok(closes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_daily_closes_and_skips_nulls() {
        let body = r#"{
            "chart": {
                "result": [{
                    "meta": { "symbol": "AAPL" },
                    "timestamp": [1704205800, 1704292200, 1704378600],
                    "indicators": {
                        "quote": [{
                            "open": [187.15, 184.22, 182.15],
                            "close": [185.64, null, 181.91]
                        }]
                    }
                }],
                "error": null
            }
        }"#;
        let closes = parse_chart("AAPL", body).unwrap();
        assert_eq!(closes.len(), 2);
        assert_eq!(closes[0].0, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(closes[0].1, 185.64);
        assert_eq!(closes[1].0, NaiveDate::from_ymd_opt(2024, 1, 4).unwrap());
        assert_eq!(closes[1].1, 181.91);
    }

    #[test]
    fn unknown_symbol_is_no_data() {
        let body = r#"{
            "chart": {
                "result": null,
                "error": { "code": "Not Found", "description": "No data found, symbol may be delisted" }
            }
        }"#;
        let err = parse_chart("FB", body).unwrap_err();
        assert!(matches!(err, DataError::NoData(ref t) if t == "FB"));
    }

    #[test]
    fn other_api_errors_are_reported() {
        let body = r#"{
            "chart": {
                "result": null,
                "error": { "code": "Bad Request", "description": "Invalid input" }
            }
        }"#;
        let err = parse_chart("AAPL", body).unwrap_err();
        assert!(matches!(err, DataError::Api(_)));
    }

    #[test]
    fn empty_result_is_no_data() {
        let body = r#"{ "chart": { "result": [], "error": null } }"#;
        assert!(matches!(
            parse_chart("AAPL", body),
            Err(DataError::NoData(_))
        ));
    }

    #[test]
    fn malformed_body_is_parse_error() {
        assert!(matches!(
            parse_chart("AAPL", "<html>"),
            Err(DataError::Parse(_))
        ));
    }

    #[test]
    fn request_span_covers_twice_the_window() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let (start, end) = request_span(now, 50).unwrap();
        assert_eq!(end, 1_700_000_000);
        assert_eq!(end - start, 110 * 86_400);
    }

    #[test]
    fn request_span_past_the_calendar_is_an_error() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        assert!(request_span(now, crate::config::MAX_DAYS_LIMIT).is_ok());
        assert!(matches!(
            request_span(now, 100_000_000),
            Err(DataError::LookbackOutOfRange(100_000_000))
        ));
        assert!(request_span(now, u32::MAX).is_err());
    }
}
