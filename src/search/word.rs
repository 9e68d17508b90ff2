//! Word shape search / 词形搜索
//!
//! Matches the queried word itself or the word followed by digits
//! ("打" → "打", "打1", "打23", but not "打手"). The store can only do
//! prefix matching, so we scan prefix matches in batches and filter locally.

use regex::Regex;
use std::sync::Arc;

use super::pagination::build_page;
use super::SearchOptions;
use crate::error::SearchError;
use crate::models::{Page, Record};
use crate::source::{Column, ColumnFilter, PagedSource};

/// Shape predicate: exact word, or word + ASCII digits / 词形判断
pub struct WordShape {
    pattern: Regex,
}

impl WordShape {
    pub fn new(word: &str) -> Result<Self, SearchError> {
        let pattern = Regex::new(&format!("^{}[0-9]*$", regex::escape(word)))
            .map_err(|e| SearchError::Unexpected(format!("word pattern: {}", e)))?;
        Ok(Self { pattern })
    }

    pub fn matches(&self, candidate: &str) -> bool {
        self.pattern.is_match(candidate)
    }
}

/// Adaptive batch scan over prefix matches / 自适应批量扫描
pub struct WordShapeSearch {
    source: Arc<dyn PagedSource>,
    options: SearchOptions,
}

impl WordShapeSearch {
    pub fn new(source: Arc<dyn PagedSource>, options: SearchOptions) -> Self {
        Self { source, options }
    }

    /// clamp(limit * multiplier, min, max), never above the source ceiling
    pub fn batch_size(&self, limit: usize) -> usize {
        let size = limit
            .saturating_mul(self.options.batch_multiplier)
            .clamp(self.options.min_batch_size, self.options.max_batch_size);
        match self.source.max_batch_size() {
            Some(ceiling) => size.min(ceiling).max(1),
            None => size,
        }
    }

    pub async fn search(&self, word: &str, limit: usize, cursor: Option<i64>) -> Result<Page, SearchError> {
        let shape = WordShape::new(word)?;
        let filter = ColumnFilter::prefix(Column::Word, word);
        let batch_size = self.batch_size(limit);

        // one extra accepted row decides hasMore
        let target = limit + 1;
        let mut collected: Vec<Record> = Vec::with_capacity(target.min(batch_size));
        let mut scan_cursor = cursor;
        let mut scanned = 0usize;
        let mut batches = 0usize;

        while collected.len() < target {
            let batch = self.source.fetch_batch(&filter, scan_cursor, batch_size).await?;
            batches += 1;

            let last_id = match batch.last() {
                Some(r) => r.id,
                None => break,
            };
            if scan_cursor.is_some_and(|c| last_id <= c) {
                return Err(SearchError::Unexpected(format!(
                    "{} source did not advance past cursor {:?}",
                    self.source.name(),
                    scan_cursor
                )));
            }
            // rejected rows are never re-scanned
            scan_cursor = Some(last_id);
            scanned += batch.len();
            let exhausted = batch.len() < batch_size;

            for record in batch {
                if shape.matches(&record.word) {
                    collected.push(record);
                    if collected.len() >= target {
                        break;
                    }
                }
            }

            if exhausted {
                break;
            }
        }

        tracing::debug!(
            "word search '{}': {} batches (size {}), scanned {}, accepted {}",
            word, batches, batch_size, scanned, collected.len()
        );

        build_page(collected, limit, cursor)
    }
}
