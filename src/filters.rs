//! Filtering module for call records
//!
//! Date-range selection applied to the record stream before aggregation.
//! Matching compares the home view's local start date; both bounds are
//! inclusive.
//!
//! # Examples
//!
//! ```
//! use callgrid::filters::CallFilter;
//! use chrono::NaiveDate;
//!
//! // Keep January 2024 only
//! let filter = CallFilter::new()
//!     .with_since(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
//!     .with_until(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
//! ```

use crate::types::CallRecord;
use chrono::NaiveDate;

/// Filter configuration for call records
///
/// Both filters are optional and combine; an unset bound is open.
#[derive(Debug, Default, Clone)]
pub struct CallFilter {
    /// Start date filter (inclusive)
    pub since: Option<NaiveDate>,
    /// End date filter (inclusive)
    pub until: Option<NaiveDate>,
}

impl CallFilter {
    /// Create a new filter with no restrictions
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the start date filter
    pub fn with_since(mut self, date: NaiveDate) -> Self {
        self.since = Some(date);
        self
    }

    /// Set the end date filter
    pub fn with_until(mut self, date: NaiveDate) -> Self {
        self.until = Some(date);
        self
    }

    /// Check if a record passes the filter
    pub fn matches(&self, record: &CallRecord) -> bool {
        let record_date = record.home.start.date();

        if let Some(since) = self.since
            && record_date < since
        {
            return false;
        }

        if let Some(until) = self.until
            && record_date > until
        {
            return false;
        }

        true
    }

    /// Filter a stream of records, passing errors through untouched
    pub fn filter_stream<S>(
        self,
        stream: S,
    ) -> impl futures::Stream<Item = crate::error::Result<CallRecord>>
    where
        S: futures::Stream<Item = crate::error::Result<CallRecord>>,
    {
        use futures::StreamExt;

        stream.filter_map(move |result| {
            let filter = self.clone();
            async move {
                match result {
                    Ok(record) => {
                        if filter.matches(&record) {
                            Some(Ok(record))
                        } else {
                            None
                        }
                    }
                    Err(e) => Some(Err(e)),
                }
            }
        })
    }
}
