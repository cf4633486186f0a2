//! Repository Module
//!
//! Provides CRUD operations for SurrealDB tables, plus the keyset
//! pagination helper shared by every list endpoint.

pub mod cart;
pub mod dining_table;
pub mod employee;
pub mod menu_item;
pub mod notification;
pub mod order;
pub mod reservation;
pub mod user;

// Re-exports
pub use cart::CartRepository;
pub use dining_table::DiningTableRepository;
pub use employee::EmployeeRepository;
pub use menu_item::MenuItemRepository;
pub use notification::NotificationRepository;
pub use order::OrderRepository;
pub use reservation::ReservationRepository;
pub use user::UserRepository;

use serde::{Deserialize, Serialize};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: 全栈统一使用 "table:id" 格式，键为 snowflake i64
// =============================================================================
//
// 使用 surrealdb::RecordId 处理所有 ID：
//   - 解析: let id: RecordId = "reservation:123".parse()?;
//   - 创建: db.create((TABLE, shared::snowflake_id())).content(...)
//   - 获取纯ID: models::record_key(&id)
//
// snowflake 键随时间单调递增，因此按 id 的 keyset 分页等价于插入顺序。
//
// 关联字段 (customer, table, recipient...) 以 "table:id" 字符串存储，
// WHERE 比较时必须绑定 id.to_string() 而不是 RecordId 本身。

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

/// Parse a path id into a record pointer, accepting both the full
/// "table:123" form and the bare "123" key.
pub(crate) fn parse_thing(table: &str, id: &str) -> RepoResult<RecordId> {
    let full;
    let candidate = if id.contains(':') {
        id
    } else {
        full = format!("{table}:{id}");
        &full
    };
    candidate
        .parse()
        .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))
}

// ── Keyset pagination ───────────────────────────────────────────────

/// Hard cap on page size regardless of what the client asks for
pub const MAX_PAGE_SIZE: usize = 100;

/// Requested sort direction (always by id)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    fn keyword(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }

    fn cursor_op(&self) -> &'static str {
        match self {
            SortOrder::Asc => ">",
            SortOrder::Desc => "<",
        }
    }
}

/// Cursor pagination query parameters (`?cursor=&limit=&sort=`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CursorParams {
    /// Last-seen record key from the previous page
    pub cursor: Option<i64>,
    /// Page size (each endpoint has its own default)
    pub limit: Option<usize>,
    /// asc (default) or desc
    pub sort: Option<SortOrder>,
}

/// One page of records plus the resume point
///
/// `next_cursor` is the last record's key when the page is full and None
/// otherwise: a short page always means end-of-stream. Concurrent inserts
/// between pages may skip or duplicate an item; that is the standard
/// keyset trade-off, accepted here.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<i64>,
}

impl<T> Page<T> {
    /// Build a page from fetched rows, deriving `next_cursor` from the
    /// last row's key when the page is full.
    pub fn from_rows<F>(items: Vec<T>, limit: usize, key: F) -> Self
    where
        F: Fn(&T) -> Option<i64>,
    {
        let next_cursor = if items.len() == limit {
            items.last().and_then(&key)
        } else {
            None
        };
        Self { items, next_cursor }
    }
}

/// Build the SELECT for one keyset page.
///
/// Returns the SQL and the effective limit; callers bind `$cursor` (when
/// present in params), `$limit` and any binds their `extra_where` needs.
pub(crate) fn page_sql(
    table: &str,
    extra_where: Option<&str>,
    params: &CursorParams,
    default_limit: usize,
) -> (String, usize) {
    let limit = params.limit.unwrap_or(default_limit).clamp(1, MAX_PAGE_SIZE);
    let sort = params.sort.unwrap_or_default();

    let mut conds: Vec<String> = Vec::new();
    if let Some(w) = extra_where {
        conds.push(w.to_string());
    }
    if params.cursor.is_some() {
        conds.push(format!(
            "id {} type::thing('{}', $cursor)",
            sort.cursor_op(),
            table
        ));
    }

    let where_sql = if conds.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conds.join(" AND "))
    };

    // Backticks keep keyword-named tables (`order`) parseable
    let sql = format!(
        "SELECT * FROM `{table}`{where_sql} ORDER BY id {} LIMIT $limit",
        sort.keyword()
    );
    (sql, limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_page_yields_next_cursor() {
        let page = Page::from_rows(vec![1_i64, 2], 2, |v| Some(*v));
        assert_eq!(page.next_cursor, Some(2));
    }

    #[test]
    fn short_page_ends_stream() {
        let page = Page::from_rows(vec![5_i64], 2, |v| Some(*v));
        assert_eq!(page.next_cursor, None);

        let empty: Page<i64> = Page::from_rows(vec![], 2, |v| Some(*v));
        assert_eq!(empty.next_cursor, None);
    }

    #[test]
    fn page_sql_applies_cursor_direction() {
        let params = CursorParams {
            cursor: Some(42),
            limit: None,
            sort: Some(SortOrder::Desc),
        };
        let (sql, limit) = page_sql("menu_item", None, &params, 10);
        assert!(sql.contains("id < type::thing('menu_item', $cursor)"));
        assert!(sql.contains("ORDER BY id DESC"));
        assert_eq!(limit, 10);
    }

    #[test]
    fn page_sql_clamps_limit() {
        let params = CursorParams {
            cursor: None,
            limit: Some(10_000),
            sort: None,
        };
        let (sql, limit) = page_sql("user", Some("is_active = true"), &params, 10);
        assert_eq!(limit, MAX_PAGE_SIZE);
        assert!(sql.contains("WHERE is_active = true"));
        assert!(!sql.contains("$cursor"));
    }
}
