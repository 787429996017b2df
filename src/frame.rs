use std::collections::HashMap;
use std::num::NonZeroUsize;

use chrono::NaiveDate;

use crate::error::DataError;

/// Date-indexed closing prices, one column per ticker (wide format).
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTable {
    dates: Vec<NaiveDate>,
    columns: Vec<Column>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub ticker: String,
    pub closes: Vec<f64>,
}

/// One (date, company) observation of the long format.
#[derive(Debug, Clone, PartialEq)]
pub struct LongRow {
    pub date: NaiveDate,
    pub company: String,
    pub price: f64,
}

impl PriceTable {
    /// Build a table from per-ticker series, keeping the dates every series has.
    pub fn join(series: &[(&str, &[(NaiveDate, f64)])]) -> Self {
        let Some(((_, first), rest)) = series.split_first() else {
            return Self {
                dates: Vec::new(),
                columns: Vec::new(),
            };
        };

        let lookups: Vec<HashMap<NaiveDate, f64>> = rest
            .iter()
            .map(|(_, points)| points.iter().copied().collect())
            .collect();

        let mut dates: Vec<NaiveDate> = first
            .iter()
            .map(|(date, _)| *date)
            .filter(|date| lookups.iter().all(|l| l.contains_key(date)))
            .collect();
        dates.sort();
        dates.dedup();

        let columns = series
            .iter()
            .map(|(ticker, points)| {
                let lookup: HashMap<NaiveDate, f64> = points.iter().copied().collect();
                Column {
                    ticker: ticker.to_string(),
                    closes: dates.iter().map(|d| lookup[d]).collect(),
                }
            })
            .collect();

        Self { dates, columns }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn tickers(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.ticker.as_str())
    }

    pub fn row_count(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Columns for `tickers`, in that order.
    pub fn select(&self, tickers: &[String]) -> Result<PriceTable, DataError> {
        let columns = tickers
            .iter()
            .map(|ticker| {
                self.columns
                    .iter()
                    .find(|c| &c.ticker == ticker)
                    .cloned()
                    .ok_or_else(|| DataError::MissingColumn(ticker.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PriceTable {
            dates: self.dates.clone(),
            columns,
        })
    }

    /// The most recent `n` rows; every row when the table is shorter.
    pub fn tail(&self, n: NonZeroUsize) -> PriceTable {
        let start = self.dates.len().saturating_sub(n.get());
        PriceTable {
            dates: self.dates[start..].to_vec(),
            columns: self
                .columns
                .iter()
                .map(|c| Column {
                    ticker: c.ticker.clone(),
                    closes: c.closes[start..].to_vec(),
                })
                .collect(),
        }
    }

    /// Selected companies over the last `days` observations.
    pub fn current_frame(
        &self,
        companies: &[String],
        days: NonZeroUsize,
    ) -> Result<PriceTable, DataError> {
        Ok(self.select(companies)?.tail(days))
    }

    /// Reshape to long format, one row per (date, company), company-major.
    pub fn melt(&self) -> Vec<LongRow> {
        self.columns
            .iter()
            .flat_map(|column| {
                self.dates
                    .iter()
                    .zip(column.closes.iter())
                    .map(|(date, price)| LongRow {
                        date: *date,
                        company: column.ticker.clone(),
                        price: *price,
                    })
            })
            .collect()
    }

    /// Cell text for each row: the date followed by every close at two decimals.
    pub fn formatted_rows(&self) -> Vec<Vec<String>> {
        self.dates
            .iter()
            .enumerate()
            .map(|(i, date)| {
                std::iter::once(date.format("%Y-%m-%d").to_string())
                    .chain(self.columns.iter().map(|c| format!("{:.2}", c.closes[i])))
                    .collect()
            })
            .collect()
    }
}
