use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::DataError;
use crate::frame::PriceTable;

/// Upstream provider of daily closing prices.
pub trait PriceFeed {
    /// Ascending (date, close) pairs covering at least `days` trading days.
    fn daily_closes(&self, ticker: &str, days: u32) -> Result<Vec<(NaiveDate, f64)>, DataError>;
}

/// Price table for the most recent `max_days` trading days, downloaded per
/// ticker on first use and kept for the rest of the session.
pub struct DataSource<F: PriceFeed> {
    feed: F,
    max_days: u32,
    cache: HashMap<String, Vec<(NaiveDate, f64)>>,
}

impl<F: PriceFeed> DataSource<F> {
    pub fn new(feed: F, max_days: u32) -> Self {
        Self {
            feed,
            max_days,
            cache: HashMap::new(),
        }
    }

    pub fn max_days(&self) -> u32 {
        self.max_days
    }

    pub fn is_cached(&self, ticker: &str) -> bool {
        self.cache.contains_key(ticker)
    }

    /// Table with one column per ticker, in request order.
    pub fn fetch(&mut self, tickers: &[String]) -> Result<PriceTable, DataError> {
        if tickers.is_empty() {
            return Err(DataError::EmptySelection);
        }

        for ticker in tickers {
            if self.is_cached(ticker) {
                debug!("{ticker}: cached");
                continue;
            }
            let closes = self.feed.daily_closes(ticker, self.max_days)?;
            if closes.is_empty() {
                return Err(DataError::NoData(ticker.clone()));
            }
            info!("{ticker}: {} daily closes downloaded", closes.len());
            self.cache.insert(ticker.clone(), closes);
        }

        let series: Vec<(&str, &[(NaiveDate, f64)])> = tickers
            .iter()
            .filter_map(|t| self.cache.get(t).map(|s| (t.as_str(), s.as_slice())))
            .collect();

        let table = PriceTable::join(&series);
        if table.is_empty() {
            return Err(DataError::NoData(tickers.join(", ")));
        }

        match std::num::NonZeroUsize::new(self.max_days as usize) {
            Some(window) => Ok(table.tail(window)),
            None => Ok(table),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Feed serving a fixed number of consecutive days per ticker.
    pub(crate) struct StubFeed {
        pub rows: usize,
        pub calls: RefCell<Vec<String>>,
    }

    impl StubFeed {
        pub(crate) fn new(rows: usize) -> Self {
            Self {
                rows,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl PriceFeed for StubFeed {
        fn daily_closes(
            &self,
            ticker: &str,
            _days: u32,
        ) -> Result<Vec<(NaiveDate, f64)>, DataError> {
            self.calls.borrow_mut().push(ticker.to_string());
            if ticker == "NONE" {
                return Ok(Vec::new());
            }
            let base = ticker.len() as f64 * 100.0;
            let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
            Ok((0..self.rows)
                .map(|i| {
                    (
                        start + chrono::Duration::days(i as i64),
                        base + i as f64 + 0.3,
                    )
                })
                .collect())
        }
    }

    fn owned(tickers: &[&str]) -> Vec<String> {
        tickers.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn fetch_returns_requested_columns() {
        let mut source = DataSource::new(StubFeed::new(10), 50);
        let table = source.fetch(&owned(&["MSFT", "AAPL"])).unwrap();
        assert_eq!(table.tickers().collect::<Vec<_>>(), vec!["MSFT", "AAPL"]);
        assert_eq!(table.row_count(), 10);
    }

    #[test]
    fn fetch_caps_rows_at_max_days() {
        let mut source = DataSource::new(StubFeed::new(80), 50);
        let table = source.fetch(&owned(&["AAPL"])).unwrap();
        assert_eq!(table.row_count(), 50);
        assert_eq!(
            table.dates().last(),
            Some(&NaiveDate::from_ymd_opt(2024, 3, 20).unwrap())
        );
    }

    #[test]
    fn fetch_downloads_each_ticker_once() {
        let mut source = DataSource::new(StubFeed::new(5), 50);
        source.fetch(&owned(&["AAPL", "NFLX"])).unwrap();
        source.fetch(&owned(&["NFLX", "GOOGL"])).unwrap();
        source.fetch(&owned(&["AAPL"])).unwrap();
        assert_eq!(
            *source.feed.calls.borrow(),
            vec!["AAPL".to_string(), "NFLX".to_string(), "GOOGL".to_string()]
        );
        assert!(source.is_cached("GOOGL"));
        assert!(!source.is_cached("AMZN"));
    }

    #[test]
    fn empty_series_is_no_data() {
        let mut source = DataSource::new(StubFeed::new(5), 50);
        let err = source.fetch(&owned(&["AAPL", "NONE"])).unwrap_err();
        assert!(matches!(err, DataError::NoData(ref t) if t == "NONE"));
        assert!(!source.is_cached("NONE"));
    }

    #[test]
    fn empty_request_is_rejected() {
        let mut source = DataSource::new(StubFeed::new(5), 50);
        assert!(matches!(
            source.fetch(&[]),
            Err(DataError::EmptySelection)
        ));
        assert_eq!(source.max_days(), 50);
    }
}
