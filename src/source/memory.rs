//! In-memory row source / 内存数据源

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{ColumnFilter, PagedSource};
use crate::error::StoreError;
use crate::models::Record;

/// Id-ordered rows kept in memory / 按 id 排序的内存记录
pub struct MemorySource {
    rows: Vec<Record>,
    /// Store-side row ceiling per call, like a hosted store's default limit / 单次返回上限
    max_rows: Option<usize>,
    /// Requested batch sizes, in call order / 每次请求的批次大小
    requests: Mutex<Vec<usize>>,
}

impl MemorySource {
    pub fn new(mut rows: Vec<Record>) -> Self {
        rows.sort_by_key(|r| r.id);
        rows.dedup_by_key(|r| r.id);
        Self {
            rows,
            max_rows: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = Some(max_rows.max(1));
        self
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Batch sizes requested so far / 已请求的批次大小
    pub fn requested_batches(&self) -> Vec<usize> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl PagedSource for MemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    fn max_batch_size(&self) -> Option<usize> {
        self.max_rows
    }

    async fn fetch_batch(
        &self,
        filter: &ColumnFilter,
        cursor: Option<i64>,
        batch_size: usize,
    ) -> Result<Vec<Record>, StoreError> {
        self.requests.lock().push(batch_size);

        let take = match self.max_rows {
            Some(max) => batch_size.min(max),
            None => batch_size,
        };
        // rows are sorted, so skip straight past the cursor
        let start = match cursor {
            Some(c) => self.rows.partition_point(|r| r.id <= c),
            None => 0,
        };

        Ok(self.rows[start..]
            .iter()
            .filter(|r| filter.matches(r))
            .take(take)
            .cloned()
            .collect())
    }
}
