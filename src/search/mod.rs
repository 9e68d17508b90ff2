//! Search module - word shape search and category level search / 搜索模块
//!
//! Architecture principles / 架构原则：
//! - Sources only expose primitive predicates (prefix, equality, id cursor)
//! - Pipelines here add what the store cannot express: word shape filtering,
//!   multi-column union, cursor pagination with a reliable `hasMore`
//! - Call direction: API → Search → Source (unidirectional) / 调用方向

pub mod level;
pub mod pagination;
pub mod word;

pub use level::LevelSearch;
pub use pagination::{build_page, parse_cursor, parse_limit, require_term, MAX_LIMIT};
pub use word::{WordShape, WordShapeSearch};

/// Search tuning / 搜索参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Page size when the caller gives none / 默认分页大小
    pub default_limit: usize,
    /// Word scan batch = limit * batch_multiplier / 扫描批次倍数
    pub batch_multiplier: usize,
    pub min_batch_size: usize,
    pub max_batch_size: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            default_limit: 100,
            batch_multiplier: 5,
            min_batch_size: 200,
            max_batch_size: 1000,
        }
    }
}
