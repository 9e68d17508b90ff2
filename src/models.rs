use serde::{Deserialize, Serialize};

/// One row of the vocabulary table / 词库记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Record {
    pub id: i64,
    pub word: String,
    pub level_1: String,
    pub level_2: String,
    pub level_3: String,
    pub level_4: String,
    /// 1-7, None means supplementary / 难度等级，空表示附加词
    pub difficulty_level: Option<i64>,
}

impl Record {
    pub fn new(id: i64, word: &str) -> Self {
        Self {
            id,
            word: word.to_string(),
            level_1: String::new(),
            level_2: String::new(),
            level_3: String::new(),
            level_4: String::new(),
            difficulty_level: None,
        }
    }

    pub fn levels(mut self, levels: [&str; 4]) -> Self {
        self.level_1 = levels[0].to_string();
        self.level_2 = levels[1].to_string();
        self.level_3 = levels[2].to_string();
        self.level_4 = levels[3].to_string();
        self
    }

    pub fn difficulty(mut self, level: i64) -> Self {
        self.difficulty_level = Some(level);
        self
    }
}

/// Pagination metadata / 分页信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub limit: usize,
    pub cursor: Option<i64>,
    pub next_cursor: Option<i64>,
    pub has_more: bool,
}

/// One page of search results / 一页搜索结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub data: Vec<Record>,
    pub pagination: Pagination,
}

impl Page {
    pub fn ids(&self) -> Vec<i64> {
        self.data.iter().map(|r| r.id).collect()
    }
}
