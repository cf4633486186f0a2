//! RocksDB 持久化测试 - 重开数据库后数据仍在

use saffron_server::db::DbService;
use saffron_server::db::models::DiningTableCreate;
use saffron_server::db::repository::DiningTableRepository;

#[tokio::test]
async fn data_survives_reopen() {
    let dir = tempfile::tempdir().expect("temp dir");
    let data_dir = dir.path().to_str().expect("utf-8 path");

    {
        let db = DbService::open(data_dir).await.expect("open db");
        let repo = DiningTableRepository::new(db.db.clone());
        repo.create(DiningTableCreate {
            table_number: 7,
            capacity: 4,
        })
        .await
        .expect("create table");
    }

    // 重开同一目录：索引定义幂等，数据完整
    let db = DbService::open(data_dir).await.expect("reopen db");
    let repo = DiningTableRepository::new(db.db.clone());
    let table = repo
        .find_by_number(7)
        .await
        .expect("query")
        .expect("table persisted");
    assert_eq!(table.capacity, 4);
}
