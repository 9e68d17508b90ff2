//! SQLite row source / SQLite 数据源
//!
//! - prefix: `LIKE 'value%' ESCAPE '\'` (case-insensitive for ASCII, like ILIKE)
//! - equality: `column = ?`
//! - every call bounded by `timeout`

use async_trait::async_trait;
use sqlx::{sqlite::SqlitePoolOptions, Pool, Sqlite};
use std::time::Duration;

use super::{ColumnFilter, PagedSource};
use crate::db::is_valid_table_name;
use crate::error::StoreError;
use crate::models::Record;

/// Vocabulary table backed by sqlx / 基于 sqlx 的词库表
#[derive(Clone)]
pub struct SqliteSource {
    db: Pool<Sqlite>,
    table: String,
    timeout: Duration,
}

impl SqliteSource {
    /// Use an existing pool / 使用现有连接池
    pub fn new(db: Pool<Sqlite>, table: &str, timeout: Duration) -> Result<Self, StoreError> {
        if !is_valid_table_name(table) {
            return Err(StoreError::Query(format!("invalid table name: {}", table)));
        }
        Ok(Self { db, table: table.to_string(), timeout })
    }

    /// Open a pool from a database URL / 通过URL创建连接池
    pub async fn connect(url: &str, max_connections: u32, table: &str, timeout: Duration) -> Result<Self, StoreError> {
        let db = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect(url)
            .await?;

        tracing::info!("Vocabulary database connected: {}", url);
        Self::new(db, table, timeout)
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.db
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    fn build_sql(&self, filter: &ColumnFilter, with_cursor: bool) -> String {
        let predicate = match filter {
            ColumnFilter::Prefix { column, .. } => format!("{} LIKE ? ESCAPE '\\'", column.as_str()),
            ColumnFilter::Equals { column, .. } => format!("{} = ?", column.as_str()),
        };
        let cursor = if with_cursor { " AND id > ?" } else { "" };
        format!(
            "SELECT id, word, level_1, level_2, level_3, level_4, difficulty_level FROM {} WHERE {}{} ORDER BY id ASC LIMIT ?",
            self.table, predicate, cursor
        )
    }
}

/// Escape LIKE wildcards so user text matches literally / 转义 LIKE 通配符
pub fn like_prefix_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 1);
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl PagedSource for SqliteSource {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn fetch_batch(
        &self,
        filter: &ColumnFilter,
        cursor: Option<i64>,
        batch_size: usize,
    ) -> Result<Vec<Record>, StoreError> {
        let sql = self.build_sql(filter, cursor.is_some());
        let bound = match filter {
            ColumnFilter::Prefix { value, .. } => like_prefix_pattern(value),
            ColumnFilter::Equals { value, .. } => value.clone(),
        };

        let mut query = sqlx::query_as::<_, Record>(&sql).bind(bound);
        if let Some(c) = cursor {
            query = query.bind(c);
        }
        let query = query.bind(batch_size as i64);

        tokio::time::timeout(self.timeout, query.fetch_all(&self.db))
            .await
            .map_err(|_| StoreError::Timeout(self.timeout))?
            .map_err(StoreError::from)
    }
}
