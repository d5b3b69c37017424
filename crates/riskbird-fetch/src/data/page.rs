use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One page of a paginated listing, as reported by the provider.
///
/// `total` is the server-side record count for the whole query. It has been
/// observed to disagree with the records actually served, so it is only one
/// of the signals used to stop paging (see [`Drain`](crate::Drain)).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// 1-based page number that was requested.
    pub number: u32,
    /// Page size that was requested.
    pub size: u32,
    /// Total number of records the provider claims exist.
    pub total: u64,
    /// Raw records in provider order.
    pub records: Vec<Value>,
}

impl Page {
    pub fn new(number: u32, size: u32, total: u64, records: Vec<Value>) -> Self {
        Self {
            number,
            size,
            total,
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Fewer records than requested: this is the last page regardless of `total`.
    pub fn is_short(&self) -> bool {
        self.records.len() < self.size as usize
    }

    /// Whether a further page is expected after this one.
    pub fn has_next(&self) -> bool {
        !self.is_short() && u64::from(self.number) * u64::from(self.size) < self.total
    }
}
