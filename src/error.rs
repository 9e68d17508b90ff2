//! Error types / 错误类型

use std::time::Duration;
use thiserror::Error;

/// Row store failure / 数据源错误
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store query failed: {0}")]
    Query(String),
    #[error("store query timed out after {0:?}")]
    Timeout(Duration),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Query(e.to_string())
    }
}

/// Search pipeline failure / 搜索流程错误
#[derive(Debug, Error)]
pub enum SearchError {
    /// Bad request parameters, message is shown to the caller / 参数错误
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("unexpected search failure: {0}")]
    Unexpected(String),
}

impl SearchError {
    pub fn validation(message: &str) -> Self {
        SearchError::Validation(message.to_string())
    }
}
