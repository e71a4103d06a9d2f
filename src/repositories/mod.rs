//! Local content stores queried by the area-code provider.

mod sqlite_content_source;
mod traits;

pub use sqlite_content_source::{RowsCursor, SqliteContentSource};
pub use traits::{ContentCursor, ContentRow, ContentSource};
