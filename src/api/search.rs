use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use std::sync::Arc;

use super::error_response;
use crate::models::Page;
use crate::search::{parse_cursor, parse_limit, require_term};
use crate::state::AppState;

/// Raw query pairs; repeated keys are allowed, the first value wins / 原始查询参数
pub type QueryPairs = Vec<(String, String)>;

/// First value of `key`, like URLSearchParams.get / 取第一个同名参数
pub fn first_param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// GET /search_by_word - 按词搜索（原词或原词+数字）
pub async fn search_by_word(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QueryPairs>,
) -> Result<Json<Page>, (StatusCode, Json<Value>)> {
    tracing::debug!("search_by_word: {:?}", params);

    let word = require_term(first_param(&params, "word"), "word").map_err(error_response)?;
    let limit = parse_limit(first_param(&params, "limit"), state.options.default_limit).map_err(error_response)?;
    let cursor = parse_cursor(first_param(&params, "cursor")).map_err(error_response)?;

    let page = state.words.search(word, limit, cursor).await.map_err(error_response)?;
    Ok(Json(page))
}

/// GET /search_by_level - 按分类搜索（level_1 ~ level_4 任一列）
pub async fn search_by_level(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QueryPairs>,
) -> Result<Json<Page>, (StatusCode, Json<Value>)> {
    tracing::debug!("search_by_level: {:?}", params);

    let level = require_term(first_param(&params, "level"), "level").map_err(error_response)?;
    let limit = parse_limit(first_param(&params, "limit"), state.options.default_limit).map_err(error_response)?;
    let cursor = parse_cursor(first_param(&params, "cursor")).map_err(error_response)?;

    let page = state.levels.search(level, limit, cursor).await.map_err(error_response)?;
    Ok(Json(page))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_param_wins() {
        let params: QueryPairs = vec![
            ("word".to_string(), "a".to_string()),
            ("limit".to_string(), "1".to_string()),
            ("word".to_string(), "b".to_string()),
        ];
        assert_eq!(first_param(&params, "word"), Some("a"));
        assert_eq!(first_param(&params, "limit"), Some("1"));
        assert_eq!(first_param(&params, "cursor"), None);
    }
}
