//! Category level search / 分类层级搜索
//!
//! A label can sit in any of `level_1..level_4`. Each column is queried on
//! its own (concurrently), then the results are merged by `id`.
//!
//! Every column collects up to `limit + 1` rows past the cursor. Any row in
//! the global first `limit + 1` of the union is within the first `limit + 1`
//! of its own column, so the merged page and `hasMore` are exact even when
//! the store caps how many rows one call may return.

use futures::future::try_join_all;
use std::collections::HashSet;
use std::sync::Arc;

use super::pagination::build_page;
use crate::error::SearchError;
use crate::models::{Page, Record};
use crate::source::{Column, ColumnFilter, PagedSource};

/// Four-column fan-out merge / 四列并发合并
pub struct LevelSearch {
    source: Arc<dyn PagedSource>,
}

impl LevelSearch {
    pub fn new(source: Arc<dyn PagedSource>) -> Self {
        Self { source }
    }

    pub async fn search(&self, level: &str, limit: usize, cursor: Option<i64>) -> Result<Page, SearchError> {
        let want = limit + 1;

        // fails fast: the first column error drops the other fetches
        let per_column = try_join_all(
            Column::LEVELS
                .iter()
                .map(|&column| self.fetch_column(column, level, cursor, want)),
        )
        .await?;

        let mut seen: HashSet<i64> = HashSet::new();
        let mut merged: Vec<Record> = Vec::new();
        for rows in per_column {
            for record in rows {
                if seen.insert(record.id) {
                    merged.push(record);
                }
            }
        }

        merged.sort_unstable_by_key(|r| r.id);
        if let Some(c) = cursor {
            merged.retain(|r| r.id > c);
        }
        let matched = merged.len();
        merged.truncate(want);

        tracing::debug!("level search '{}': {} merged rows (limit {})", level, matched, limit);

        build_page(merged, limit, cursor)
    }

    /// Up to `want` rows of one column, ascending, past `cursor` / 单列查询
    async fn fetch_column(
        &self,
        column: Column,
        level: &str,
        cursor: Option<i64>,
        want: usize,
    ) -> Result<Vec<Record>, SearchError> {
        let filter = ColumnFilter::equals(column, level);
        let mut rows: Vec<Record> = Vec::new();
        let mut scan_cursor = cursor;

        while rows.len() < want {
            let mut request = want - rows.len();
            if let Some(ceiling) = self.source.max_batch_size() {
                request = request.min(ceiling.max(1));
            }

            let batch = self.source.fetch_batch(&filter, scan_cursor, request).await?;
            let last_id = match batch.last() {
                Some(r) => r.id,
                None => break,
            };
            if scan_cursor.is_some_and(|c| last_id <= c) {
                return Err(SearchError::Unexpected(format!(
                    "{} source did not advance past cursor {:?} on {}",
                    self.source.name(),
                    scan_cursor,
                    column.as_str()
                )));
            }
            scan_cursor = Some(last_id);

            let exhausted = batch.len() < request;
            rows.extend(batch);
            if exhausted {
                break;
            }
        }

        Ok(rows)
    }
}
