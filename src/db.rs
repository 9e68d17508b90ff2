use anyhow::{bail, Result};
use sqlx::SqlitePool;

/// Default vocabulary table / 默认词库表名
pub const DEFAULT_TABLE: &str = "vocabulary_difficulty_levels";

/// Table names are interpolated into SQL, so only plain identifiers pass / 表名只允许字母数字下划线
pub fn is_valid_table_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Run database migrations / 运行数据库迁移
///
/// Only creates the vocabulary table and its lookup indexes; rows are loaded
/// by external tooling.
pub async fn run_migrations(pool: &SqlitePool, table: &str) -> Result<()> {
    if !is_valid_table_name(table) {
        bail!("invalid table name: {}", table);
    }

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table} (
            id INTEGER PRIMARY KEY,
            word TEXT NOT NULL,
            level_1 TEXT NOT NULL DEFAULT '',
            level_2 TEXT NOT NULL DEFAULT '',
            level_3 TEXT NOT NULL DEFAULT '',
            level_4 TEXT NOT NULL DEFAULT '',
            difficulty_level INTEGER
        )
        "#
    ))
    .execute(pool)
    .await?;

    // word 用于前缀扫描，level_* 用于分类等值查询
    for column in ["word", "level_1", "level_2", "level_3", "level_4"] {
        sqlx::query(&format!(
            "CREATE INDEX IF NOT EXISTS idx_{table}_{column} ON {table}({column}, id)"
        ))
        .execute(pool)
        .await?;
    }

    tracing::info!("Vocabulary table ready: {}", table);
    Ok(())
}
