//! 分页游标遍历测试 - 覆盖整个 keyset 分页契约
//!
//! 插入 5 条记录，limit=2 正序遍历应得到 [1,2]/cursor, [3,4]/cursor,
//! [5]/None；倒序遍历顺序相反。

use saffron_server::db::DbService;
use saffron_server::db::models::DiningTableCreate;
use saffron_server::db::repository::{CursorParams, DiningTableRepository, SortOrder};

async fn seed(repo: &DiningTableRepository, count: u32) {
    for n in 1..=count {
        repo.create(DiningTableCreate {
            table_number: n,
            capacity: 2 + n,
        })
        .await
        .expect("seed table");
    }
}

fn params(cursor: Option<i64>, sort: SortOrder) -> CursorParams {
    CursorParams {
        cursor,
        limit: Some(2),
        sort: Some(sort),
    }
}

#[tokio::test]
async fn ascending_walk_visits_insertion_order() {
    let db = DbService::memory().await.expect("db");
    let repo = DiningTableRepository::new(db.db.clone());
    seed(&repo, 5).await;

    let first = repo
        .list_page(&params(None, SortOrder::Asc))
        .await
        .unwrap();
    assert_eq!(
        first.items.iter().map(|t| t.table_number).collect::<Vec<_>>(),
        vec![1, 2]
    );
    let cursor = first.next_cursor.expect("full page carries a cursor");

    let second = repo
        .list_page(&params(Some(cursor), SortOrder::Asc))
        .await
        .unwrap();
    assert_eq!(
        second.items.iter().map(|t| t.table_number).collect::<Vec<_>>(),
        vec![3, 4]
    );
    let cursor = second.next_cursor.expect("full page carries a cursor");

    let third = repo
        .list_page(&params(Some(cursor), SortOrder::Asc))
        .await
        .unwrap();
    assert_eq!(
        third.items.iter().map(|t| t.table_number).collect::<Vec<_>>(),
        vec![5]
    );
    // short page: end of stream
    assert_eq!(third.next_cursor, None);
}

#[tokio::test]
async fn descending_walk_visits_newest_first() {
    let db = DbService::memory().await.expect("db");
    let repo = DiningTableRepository::new(db.db.clone());
    seed(&repo, 5).await;

    let first = repo
        .list_page(&params(None, SortOrder::Desc))
        .await
        .unwrap();
    assert_eq!(
        first.items.iter().map(|t| t.table_number).collect::<Vec<_>>(),
        vec![5, 4]
    );

    let cursor = first.next_cursor.expect("full page carries a cursor");
    let second = repo
        .list_page(&params(Some(cursor), SortOrder::Desc))
        .await
        .unwrap();
    assert_eq!(
        second.items.iter().map(|t| t.table_number).collect::<Vec<_>>(),
        vec![3, 2]
    );
}

#[tokio::test]
async fn empty_table_yields_empty_page() {
    let db = DbService::memory().await.expect("db");
    let repo = DiningTableRepository::new(db.db.clone());

    let page = repo.list_page(&params(None, SortOrder::Asc)).await.unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.next_cursor, None);
}
