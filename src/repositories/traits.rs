use crate::error::LookupResult;

/// One row of a content query; `None` marks a NULL or non-text column.
pub type ContentRow = Vec<Option<String>>;

/// Forward-only cursor over the rows of a content query.
///
/// Dropping the cursor releases it. Implementations must not hold anything
/// that outlives the drop.
pub trait ContentCursor {
    /// Advance to the next row, `None` once exhausted.
    fn next_row(&mut self) -> LookupResult<Option<ContentRow>>;
}

/// Local structured data source keyed by a short string (e.g. an area code).
///
/// Provides abstraction over the store so providers can run against SQLite,
/// an in-memory table, or a test double.
pub trait ContentSource: Send + Sync {
    /// Open a cursor over the rows matching `key`.
    ///
    /// `Ok(None)` means the source has nothing to query (not installed, no table),
    /// which callers treat as "not found" rather than a failure.
    fn query(&self, key: &str) -> LookupResult<Option<Box<dyn ContentCursor + '_>>>;
}
