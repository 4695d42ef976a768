use chrono::{Local, NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_MAX_GAP_DAYS: i64 = 180;
pub const DEFAULT_CHUNK_SIZE_DAYS: i64 = 31;
pub const WIRE_DATE_FORMAT: &str = "%m/%d/%Y";

#[derive(Debug, Error)]
pub enum ChunkError {
    #[error("invalid date range: {to} is before {from}")]
    InvalidRange { from: NaiveDate, to: NaiveDate },
    #[error("field '{field}' holds an unparseable date: '{value}'")]
    InvalidDate { field: String, value: String },
    #[error("field '{field}' must hold a date string")]
    NonStringDate { field: String },
    #[error("invalid chunking parameters: {0}")]
    InvalidParameters(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryConfig(Map<String, Value>);

impl QueryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(field, value)| (field.as_str(), value))
    }

    fn date(&self, field: &str) -> Result<Option<NaiveDate>, ChunkError> {
        match self.0.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(raw)) if raw.trim().is_empty() => Ok(None),
            Some(Value::String(raw)) => parse_query_date(raw)
                .map(Some)
                .ok_or_else(|| ChunkError::InvalidDate {
                    field: field.to_string(),
                    value: raw.clone(),
                }),
            Some(_) => Err(ChunkError::NonStringDate {
                field: field.to_string(),
            }),
        }
    }

    fn with_range(&self, pair: &DatePair, range: DateRange) -> Self {
        let mut config = self.clone();
        config.insert(pair.from_field.clone(), format_wire_date(range.start));
        config.insert(pair.to_field.clone(), format_wire_date(range.end));
        config
    }
}

impl From<Map<String, Value>> for QueryConfig {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for QueryConfig {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(field, value)| (field.into(), value.into()))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePair {
    pub from_field: String,
    pub to_field: String,
}

impl DatePair {
    pub fn new(from_field: impl Into<String>, to_field: impl Into<String>) -> Self {
        Self {
            from_field: from_field.into(),
            to_field: to_field.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeChunker {
    max_gap_days: i64,
    chunk_size_days: i64,
}

impl RangeChunker {
    pub fn new(max_gap_days: i64, chunk_size_days: i64) -> Result<Self, ChunkError> {
        if max_gap_days < 1 {
            return Err(ChunkError::InvalidParameters(format!(
                "max gap must be at least one day, got {max_gap_days}"
            )));
        }
        if chunk_size_days < 1 {
            return Err(ChunkError::InvalidParameters(format!(
                "chunk size must be at least one day, got {chunk_size_days}"
            )));
        }

        Ok(Self {
            max_gap_days,
            chunk_size_days,
        })
    }

    pub fn max_gap_days(&self) -> i64 {
        self.max_gap_days
    }

    pub fn chunk_size_days(&self) -> i64 {
        self.chunk_size_days
    }

    pub fn split(
        &self,
        config: &QueryConfig,
        pairs: &[DatePair],
    ) -> Result<Vec<QueryConfig>, ChunkError> {
        self.split_with_today(config, pairs, Local::now().date_naive())
    }

    // Only the first pair reaching max_gap_days is split; later pairs are not examined.
    pub fn split_with_today(
        &self,
        config: &QueryConfig,
        pairs: &[DatePair],
        today: NaiveDate,
    ) -> Result<Vec<QueryConfig>, ChunkError> {
        for pair in pairs {
            let Some(from) = config.date(&pair.from_field)? else {
                continue;
            };
            let to = config.date(&pair.to_field)?.unwrap_or(today);

            if to < from {
                return Err(ChunkError::InvalidRange { from, to });
            }

            if (to - from).num_days() >= self.max_gap_days {
                let ranges = chunk_range(from, to, self.chunk_size_days)?;
                debug!(
                    from_field = %pair.from_field,
                    to_field = %pair.to_field,
                    %from,
                    %to,
                    chunks = ranges.len(),
                    "splitting query date range"
                );
                return Ok(ranges
                    .into_iter()
                    .map(|range| config.with_range(pair, range))
                    .collect());
            }
        }

        Ok(vec![config.clone()])
    }
}

impl Default for RangeChunker {
    fn default() -> Self {
        Self {
            max_gap_days: DEFAULT_MAX_GAP_DAYS,
            chunk_size_days: DEFAULT_CHUNK_SIZE_DAYS,
        }
    }
}

pub fn chunk_range(
    from: NaiveDate,
    to: NaiveDate,
    chunk_size_days: i64,
) -> Result<Vec<DateRange>, ChunkError> {
    if to < from {
        return Err(ChunkError::InvalidRange { from, to });
    }
    let step = TimeDelta::try_days(chunk_size_days)
        .filter(|step| *step > TimeDelta::zero())
        .ok_or_else(|| {
            ChunkError::InvalidParameters(format!("unusable chunk size: {chunk_size_days}"))
        })?;
    let overflow = || ChunkError::InvalidParameters("date arithmetic overflowed".to_string());

    let mut ranges = Vec::new();
    let mut left = from;
    let mut right = left.checked_add_signed(step).ok_or_else(overflow)?;
    while right < to {
        ranges.push(DateRange {
            start: left,
            end: right,
        });
        left = right;
        right = left.checked_add_signed(step).ok_or_else(overflow)?;
    }
    ranges.push(DateRange {
        start: left,
        end: to,
    });

    Ok(ranges)
}

pub fn parse_query_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Some((_, year)) = raw.rsplit_once('/') {
        let format = if year.len() == 2 { "%m/%d/%y" } else { WIRE_DATE_FORMAT };
        return NaiveDate::parse_from_str(raw, format).ok();
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

pub fn format_wire_date(date: NaiveDate) -> String {
    date.format(WIRE_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests;
