use reverse_lookup::error::{LookupError, LookupResult};
use reverse_lookup::repositories::{ContentCursor, ContentRow, ContentSource};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock content source for testing.
///
/// Counts queries, opened cursors, and released (dropped) cursors so tests can
/// check that every cursor is released exactly once.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockContentSource {
    rows: HashMap<String, Vec<ContentRow>>,
    no_cursor: bool,
    fail_query: bool,
    fail_read: bool,
    queries: Arc<AtomicUsize>,
    opened: Arc<AtomicUsize>,
    released: Arc<AtomicUsize>,
    last_key: Arc<std::sync::Mutex<Option<String>>>,
}

#[allow(dead_code)]
impl MockContentSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `(id, area_code, location)` row.
    pub fn with_row(mut self, area_code: &str, location: Option<&str>) -> Self {
        let entry = self.rows.entry(area_code.to_string()).or_default();
        let id = (entry.len() + 1).to_string();
        entry.push(vec![
            Some(id),
            Some(area_code.to_string()),
            location.map(str::to_string),
        ]);
        self
    }

    /// Answer every query with "no cursor".
    pub fn without_cursor(mut self) -> Self {
        self.no_cursor = true;
        self
    }

    /// Fail every query.
    pub fn failing_query(mut self) -> Self {
        self.fail_query = true;
        self
    }

    /// Hand out cursors that fail on the first read.
    pub fn failing_read(mut self) -> Self {
        self.fail_read = true;
        self
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    pub fn last_key(&self) -> Option<String> {
        self.last_key.lock().unwrap().clone()
    }
}

impl ContentSource for MockContentSource {
    fn query(&self, key: &str) -> LookupResult<Option<Box<dyn ContentCursor + '_>>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        *self.last_key.lock().unwrap() = Some(key.to_string());

        if self.fail_query {
            return Err(LookupError::Store("database is locked".to_string()));
        }
        if self.no_cursor {
            return Ok(None);
        }

        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Some(Box::new(MockCursor {
            rows: self.rows.get(key).cloned().unwrap_or_default().into_iter(),
            fail_read: self.fail_read,
            released: self.released.clone(),
        })))
    }
}

struct MockCursor {
    rows: std::vec::IntoIter<ContentRow>,
    fail_read: bool,
    released: Arc<AtomicUsize>,
}

impl ContentCursor for MockCursor {
    fn next_row(&mut self) -> LookupResult<Option<ContentRow>> {
        if self.fail_read {
            return Err(LookupError::Store("disk I/O error".to_string()));
        }
        Ok(self.rows.next())
    }
}

impl Drop for MockCursor {
    fn drop(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}
