//! Request validation and page assembly / 参数校验与分页组装

use crate::error::SearchError;
use crate::models::{Page, Pagination, Record};

/// Largest page a caller may request / 最大分页大小
pub const MAX_LIMIT: usize = 1000;

pub const LIMIT_ERROR: &str = "limit must be a positive number between 1 and 1000";
pub const CURSOR_ERROR: &str = "cursor must be an integer";

/// Parse `limit`; missing or empty means `default`, out of range is rejected (never clamped)
pub fn parse_limit(raw: Option<&str>, default: usize) -> Result<usize, SearchError> {
    let raw = match raw {
        Some(s) if !s.is_empty() => s,
        _ => return Ok(default.clamp(1, MAX_LIMIT)),
    };

    match raw.parse::<i64>() {
        Ok(n) if n >= 1 && n <= MAX_LIMIT as i64 => Ok(n as usize),
        _ => Err(SearchError::validation(LIMIT_ERROR)),
    }
}

/// Parse the exclusive `id` lower bound / 解析游标（不含）
pub fn parse_cursor(raw: Option<&str>) -> Result<Option<i64>, SearchError> {
    match raw {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<i64>()
            .map(Some)
            .map_err(|_| SearchError::validation(CURSOR_ERROR)),
    }
}

/// Required non-empty text parameter / 必填参数
pub fn require_term<'a>(raw: Option<&'a str>, name: &str) -> Result<&'a str, SearchError> {
    match raw {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(SearchError::Validation(format!("{} parameter is required", name))),
    }
}

/// Turn up to `limit + 1` ascending candidates into a page / 组装分页结果
///
/// The extra candidate only signals `hasMore`; it is never emitted.
pub fn build_page(mut rows: Vec<Record>, limit: usize, cursor: Option<i64>) -> Result<Page, SearchError> {
    let has_more = rows.len() > limit;
    rows.truncate(limit);

    let mut previous = cursor;
    for record in &rows {
        if previous.is_some_and(|p| record.id <= p) {
            return Err(SearchError::Unexpected(format!(
                "page out of order: id {} after {:?}",
                record.id, previous
            )));
        }
        previous = Some(record.id);
    }

    let next_cursor = if has_more { rows.last().map(|r| r.id) } else { None };

    Ok(Page {
        data: rows,
        pagination: Pagination {
            limit,
            cursor,
            next_cursor,
            has_more,
        },
    })
}
