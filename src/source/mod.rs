//! Row sources for the search pipelines / 搜索数据源
//!
//! A source only offers primitive, composable predicates:
//! prefix match on `word`, equality on a named column, `id > cursor`,
//! ascending order by `id` and a row limit. Anything richer (word shape,
//! multi-column union) is done by the pipelines in `crate::search`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::models::Record;

pub mod memory;
pub mod sqlite;

pub use memory::MemorySource;
pub use sqlite::SqliteSource;

/// Filterable columns / 可过滤的列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Word,
    Level1,
    Level2,
    Level3,
    Level4,
}

impl Column {
    /// The four category columns, coarsest first / 四级分类列
    pub const LEVELS: [Column; 4] = [Column::Level1, Column::Level2, Column::Level3, Column::Level4];

    /// SQL column name / 列名
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Word => "word",
            Column::Level1 => "level_1",
            Column::Level2 => "level_2",
            Column::Level3 => "level_3",
            Column::Level4 => "level_4",
        }
    }

    /// Read this column from a record / 读取记录中的该列
    pub fn value_of<'a>(&self, record: &'a Record) -> &'a str {
        match self {
            Column::Word => &record.word,
            Column::Level1 => &record.level_1,
            Column::Level2 => &record.level_2,
            Column::Level3 => &record.level_3,
            Column::Level4 => &record.level_4,
        }
    }
}

/// Row filter understood by every source / 数据源过滤条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnFilter {
    /// ASCII case-insensitive prefix match (SQLite LIKE), `%`/`_` in the value are literal / 前缀匹配
    Prefix { column: Column, value: String },
    /// Exact match / 精确匹配
    Equals { column: Column, value: String },
}

impl ColumnFilter {
    pub fn prefix(column: Column, value: &str) -> Self {
        ColumnFilter::Prefix { column, value: value.to_string() }
    }

    pub fn equals(column: Column, value: &str) -> Self {
        ColumnFilter::Equals { column, value: value.to_string() }
    }

    pub fn column(&self) -> Column {
        match self {
            ColumnFilter::Prefix { column, .. } | ColumnFilter::Equals { column, .. } => *column,
        }
    }

    /// Evaluate the filter in memory / 在内存中判断是否匹配
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            ColumnFilter::Prefix { column, value } => column
                .value_of(record)
                .to_ascii_lowercase()
                .starts_with(&value.to_ascii_lowercase()),
            ColumnFilter::Equals { column, value } => column.value_of(record) == value,
        }
    }
}

/// Paged row source interface / 分页数据源接口
#[async_trait]
pub trait PagedSource: Send + Sync {
    /// Source name, for logs / 数据源名称
    fn name(&self) -> &str;

    /// Most rows one call can return (None means no ceiling) / 单次最多返回行数
    ///
    /// Callers never ask for more than this, so a short batch always means
    /// the filter is exhausted.
    fn max_batch_size(&self) -> Option<usize> {
        None
    }

    /// Fetch up to `batch_size` rows matching `filter` with `id > cursor`,
    /// ascending by `id` / 拉取一批 id 大于游标的记录
    async fn fetch_batch(
        &self,
        filter: &ColumnFilter,
        cursor: Option<i64>,
        batch_size: usize,
    ) -> Result<Vec<Record>, StoreError>;
}
