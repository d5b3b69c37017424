use serde_json::Value;

use crate::data::Page;

/// What to do after a page has been accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainStep {
    /// Request this page next.
    Next(u32),
    /// All records have been collected.
    Done,
    /// The first page came back without records.
    Empty,
}

/// Drain-to-completion state for one paginated query.
///
/// The caller fetches [`Drain::page`], hands the result to [`Drain::accept`],
/// and repeats while it answers [`DrainStep::Next`]. Paging stops as soon as
/// either the accumulated count reaches the reported total or a page comes
/// back shorter than its page size. The provider's total is unreliable, so
/// both conditions are checked: the short page ends a query whose total is
/// too high, and the count ends one whose last page happens to be full.
///
/// Whether [`DrainStep::Empty`] means "no data" or "nothing found" is up to
/// the caller.
///
/// # Examples
///
/// ```
/// use riskbird_fetch::{Drain, DrainStep, Page};
/// use serde_json::json;
///
/// let mut drain = Drain::new();
/// let first = Page::new(1, 2, 3, vec![json!(1), json!(2)]);
/// assert_eq!(drain.accept(first), DrainStep::Next(2));
///
/// let second = Page::new(2, 2, 3, vec![json!(3)]);
/// assert_eq!(drain.accept(second), DrainStep::Done);
/// assert_eq!(drain.into_records(), vec![json!(1), json!(2), json!(3)]);
/// ```
#[derive(Debug, Clone)]
pub struct Drain {
    page: u32,
    records: Vec<Value>,
}

impl Default for Drain {
    fn default() -> Self {
        Self::new()
    }
}

impl Drain {
    pub fn new() -> Self {
        Self {
            page: 1,
            records: Vec::new(),
        }
    }

    /// Page number to request next.
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn is_first_page(&self) -> bool {
        self.page == 1
    }

    pub fn records(&self) -> &[Value] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Value> {
        self.records
    }

    pub fn accept(&mut self, page: Page) -> DrainStep {
        if self.is_first_page() && page.is_empty() {
            return DrainStep::Empty;
        }

        let short = page.is_short();
        let total = page.total;
        self.records.extend(page.records);

        if self.records.len() as u64 >= total || short {
            DrainStep::Done
        } else {
            self.page += 1;
            DrainStep::Next(self.page)
        }
    }
}
