use crate::config::{is_sql_identifier, Config};
use crate::error::{LookupError, LookupResult};
use crate::repositories::traits::{ContentCursor, ContentRow, ContentSource};
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;

/// Column every area-code table is filtered on.
const KEY_COLUMN: &str = "area_code";

/// Content source backed by a SQLite table with an `area_code` column.
///
/// The expected layout is `(id, area_code, location, ...)`; the provider decides
/// which column position to read. Statements are finalized inside [`query`], so
/// the returned cursor never pins the connection.
///
/// [`query`]: ContentSource::query
pub struct SqliteContentSource {
    conn: Mutex<Connection>,
    table: String,
}

impl SqliteContentSource {
    /// Open the database at `path` and read from `table`.
    pub fn open(path: impl AsRef<Path>, table: &str) -> LookupResult<Self> {
        let path = path.as_ref();
        tracing::debug!("Opening area-code database: {}", path.display());
        let conn = Connection::open(path)?;
        Self::from_connection(conn, table)
    }

    /// Open the database named by `AREA_CODE_DB_PATH`, if one is configured.
    ///
    /// Returns `Ok(None)` when no path is set so the caller can leave the
    /// area-code provider out of its provider list.
    pub fn from_config(config: &Config) -> LookupResult<Option<Self>> {
        match config.area_code_db_path.as_deref() {
            Some(path) => Self::open(path, &config.area_code_table).map(Some),
            None => {
                tracing::debug!("No area-code database configured");
                Ok(None)
            }
        }
    }

    /// Create an empty in-memory table, mainly for seeding and tests.
    pub fn in_memory(table: &str) -> LookupResult<Self> {
        let source = Self::from_connection(Connection::open_in_memory()?, table)?;
        source.create_table()?;
        Ok(source)
    }

    /// Wrap an existing connection.
    pub fn from_connection(conn: Connection, table: &str) -> LookupResult<Self> {
        if !is_sql_identifier(table) {
            return Err(LookupError::InvalidConfig(format!(
                "Not a plain table name: {}",
                table
            )));
        }

        Ok(Self {
            conn: Mutex::new(conn),
            table: table.to_string(),
        })
    }

    /// Create the area-code table if it does not exist yet.
    pub fn create_table(&self) -> LookupResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {table} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                {key} TEXT NOT NULL,
                location TEXT
            );
            CREATE INDEX IF NOT EXISTS idx_{table}_{key} ON {table} ({key});",
            table = self.table,
            key = KEY_COLUMN,
        ))?;
        Ok(())
    }

    /// Insert one area-code row.
    pub fn insert(&self, area_code: &str, location: &str) -> LookupResult<()> {
        let conn = self.lock()?;
        conn.execute(
            &format!(
                "INSERT INTO {} ({}, location) VALUES (?1, ?2)",
                self.table, KEY_COLUMN
            ),
            params![area_code, location],
        )?;
        Ok(())
    }

    fn lock(&self) -> LookupResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| LookupError::Store("Connection lock poisoned".to_string()))
    }

    fn table_exists(conn: &Connection, table: &str) -> LookupResult<bool> {
        let found: Option<String> = conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
                params![table],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }
}

impl ContentSource for SqliteContentSource {
    fn query(&self, key: &str) -> LookupResult<Option<Box<dyn ContentCursor + '_>>> {
        let conn = self.lock()?;

        if !Self::table_exists(&conn, &self.table)? {
            tracing::debug!(table = %self.table, "Area-code table not installed");
            return Ok(None);
        }

        let mut stmt = conn.prepare(&format!(
            "SELECT * FROM {} WHERE {} = ?1 ORDER BY rowid",
            self.table, KEY_COLUMN
        ))?;
        let column_count = stmt.column_count();

        let rows = stmt
            .query_map(params![key], |row| {
                (0..column_count)
                    .map(|i| row.get_ref(i).map(value_to_string))
                    .collect::<rusqlite::Result<ContentRow>>()
            })?
            .collect::<rusqlite::Result<Vec<ContentRow>>>()?;

        tracing::trace!(key = %key, rows = rows.len(), "Area-code query finished");
        Ok(Some(Box::new(RowsCursor::new(rows))))
    }
}

fn value_to_string(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Null | ValueRef::Blob(_) => None,
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Text(t) => Some(String::from_utf8_lossy(t).into_owned()),
    }
}

/// Cursor over rows that were already read from the store.
#[derive(Debug, Default)]
pub struct RowsCursor {
    rows: std::vec::IntoIter<ContentRow>,
}

impl RowsCursor {
    pub fn new(rows: Vec<ContentRow>) -> Self {
        Self {
            rows: rows.into_iter(),
        }
    }
}

impl ContentCursor for RowsCursor {
    fn next_row(&mut self) -> LookupResult<Option<ContentRow>> {
        Ok(self.rows.next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_returns_matching_rows() {
        let source = SqliteContentSource::in_memory("area_codes").unwrap();
        source.insert("138", "Beijing").unwrap();
        source.insert("139", "Shanghai").unwrap();

        let mut cursor = source.query("139").unwrap().unwrap();
        let row = cursor.next_row().unwrap().unwrap();
        assert_eq!(row[1].as_deref(), Some("139"));
        assert_eq!(row[2].as_deref(), Some("Shanghai"));
        assert!(cursor.next_row().unwrap().is_none());
    }

    #[test]
    fn test_query_no_rows() {
        let source = SqliteContentSource::in_memory("area_codes").unwrap();
        let mut cursor = source.query("999").unwrap().unwrap();
        assert!(cursor.next_row().unwrap().is_none());
    }

    #[test]
    fn test_missing_table_yields_no_cursor() {
        let conn = Connection::open_in_memory().unwrap();
        let source = SqliteContentSource::from_connection(conn, "area_codes").unwrap();
        assert!(source.query("138").unwrap().is_none());
    }

    #[test]
    fn test_from_config_without_path() {
        let config = Config::default();
        assert!(SqliteContentSource::from_config(&config).unwrap().is_none());
    }

    #[test]
    fn test_from_config_uses_path_and_table() {
        let path = std::env::temp_dir().join(format!("from-config-{}.db", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let config = Config {
            area_code_db_path: Some(path.to_string_lossy().into_owned()),
            area_code_table: "cn_codes".to_string(),
            ..Config::default()
        };

        let source = SqliteContentSource::from_config(&config).unwrap().unwrap();
        source.create_table().unwrap();
        source.insert("138", "Beijing").unwrap();

        let mut cursor = source.query("138").unwrap().unwrap();
        let row = cursor.next_row().unwrap().unwrap();
        assert_eq!(row[2].as_deref(), Some("Beijing"));

        drop(cursor);
        drop(source);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_rejects_bad_table_name() {
        let conn = Connection::open_in_memory().unwrap();
        let result = SqliteContentSource::from_connection(conn, "x; DROP TABLE y");
        assert!(matches!(result, Err(LookupError::InvalidConfig(_))));
    }

    #[test]
    fn test_null_column_is_none() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE codes (id INTEGER PRIMARY KEY, area_code TEXT, location TEXT);
             INSERT INTO codes (area_code, location) VALUES ('200', NULL);",
        )
        .unwrap();
        let source = SqliteContentSource::from_connection(conn, "codes").unwrap();

        let mut cursor = source.query("200").unwrap().unwrap();
        let row = cursor.next_row().unwrap().unwrap();
        assert_eq!(row[0].as_deref(), Some("1"));
        assert_eq!(row[2], None);
    }
}
