//! Allocator tests against the in-memory engine

use super::*;
use crate::db::DbService;
use crate::db::models::DiningTableCreate;
use crate::db::repository::ReservationRepository;

const HOUR: i64 = 3_600_000;

async fn setup(capacities: &[(u32, u32)]) -> (DbService, Allocator) {
    let db = DbService::memory().await.expect("in-memory db");
    let tables = DiningTableRepository::new(db.db.clone());
    for &(table_number, capacity) in capacities {
        tables
            .create(DiningTableCreate {
                table_number,
                capacity,
            })
            .await
            .expect("seed table");
    }
    let allocator = Allocator::new(db.db.clone());
    (db, allocator)
}

fn customer(n: i64) -> RecordId {
    format!("user:{n}").parse().expect("record id")
}

#[tokio::test]
async fn rejects_party_larger_than_every_table() {
    let (_db, allocator) = setup(&[(1, 2), (2, 4)]).await;
    let err = allocator
        .book_table(customer(1), 0, HOUR, 6)
        .await
        .unwrap_err();
    assert!(matches!(err, AllocationError::NoCapacity));
}

#[tokio::test]
async fn prefers_smallest_sufficient_table() {
    // 桌子 [2, 4, 4]：两人桌优先留给两人
    let (db, allocator) = setup(&[(1, 2), (2, 4), (3, 4)]).await;

    let first = allocator
        .book_table(customer(1), 0, HOUR, 2)
        .await
        .expect("first booking");
    let second = allocator
        .book_table(customer(2), 0, HOUR, 2)
        .await
        .expect("second booking");

    let tables = DiningTableRepository::new(db.db.clone());
    let t1 = tables.find_by_number(1).await.unwrap().unwrap();
    let t2 = tables.find_by_number(2).await.unwrap().unwrap();
    assert_eq!(Some(&first.table), t1.id.as_ref());
    // capacity-2 table is taken, so the next two-person party spills to
    // the smallest capacity-4 table (lowest table number first)
    assert_eq!(Some(&second.table), t2.id.as_ref());
}

#[tokio::test]
async fn party_of_three_skips_taken_large_table() {
    // 桌子 [2, 4, 4]：首张四人桌已被订，三人必须落到第二张四人桌，
    // 绝不会挤上两人桌
    let (db, allocator) = setup(&[(1, 2), (2, 4), (3, 4)]).await;

    let first = allocator
        .book_table(customer(1), 0, HOUR, 3)
        .await
        .expect("first booking");
    let second = allocator
        .book_table(customer(2), 0, HOUR, 3)
        .await
        .expect("second booking");

    let tables = DiningTableRepository::new(db.db.clone());
    let t2 = tables.find_by_number(2).await.unwrap().unwrap();
    let t3 = tables.find_by_number(3).await.unwrap().unwrap();
    assert_eq!(Some(&first.table), t2.id.as_ref());
    assert_eq!(Some(&second.table), t3.id.as_ref());
}

#[tokio::test]
async fn touching_windows_do_not_conflict() {
    let (_db, allocator) = setup(&[(1, 4)]).await;

    allocator
        .book_table(customer(1), 0, HOUR, 2)
        .await
        .expect("first window");
    // [HOUR, 2*HOUR) touches [0, HOUR) at the endpoint only
    allocator
        .book_table(customer(2), HOUR, 2 * HOUR, 2)
        .await
        .expect("adjacent window");
}

#[tokio::test]
async fn overlapping_window_exhausts_slots() {
    let (_db, allocator) = setup(&[(1, 4)]).await;

    allocator
        .book_table(customer(1), 0, 2 * HOUR, 2)
        .await
        .expect("first booking");
    let err = allocator
        .book_table(customer(2), HOUR, 3 * HOUR, 2)
        .await
        .unwrap_err();
    assert!(matches!(err, AllocationError::NoSlot));
}

#[tokio::test]
async fn cancelled_reservation_frees_the_table() {
    let (db, allocator) = setup(&[(1, 4)]).await;

    let booked = allocator
        .book_table(customer(1), 0, HOUR, 2)
        .await
        .expect("first booking");

    let repo = ReservationRepository::new(db.db.clone());
    let id = booked.id.as_ref().unwrap().to_string();
    repo.update_status(&id, crate::db::models::ReservationStatus::Cancelled)
        .await
        .expect("cancel");

    allocator
        .book_table(customer(2), 0, HOUR, 2)
        .await
        .expect("rebooking after cancellation");
}

#[tokio::test]
async fn cancelled_reservation_cannot_be_reconfirmed() {
    use crate::db::models::ReservationStatus;
    use crate::db::repository::RepoError;

    let (db, allocator) = setup(&[(1, 4)]).await;
    let repo = ReservationRepository::new(db.db.clone());

    let booked = allocator
        .book_table(customer(1), 0, HOUR, 2)
        .await
        .expect("first booking");
    let id = booked.id.as_ref().unwrap().to_string();
    repo.update_status(&id, ReservationStatus::Cancelled)
        .await
        .expect("cancel");

    // 时间窗已被别人重新订走
    allocator
        .book_table(customer(2), 0, HOUR, 2)
        .await
        .expect("rebooking after cancellation");

    // 直接把已取消的预订改回 confirmed 会绕过可用性检查，必须拒绝
    let err = repo
        .update_status(&id, ReservationStatus::Confirmed)
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    let tables = DiningTableRepository::new(db.db.clone());
    let table = tables.find_by_number(1).await.unwrap().unwrap();
    let blocking = repo
        .find_overlapping(table.id.as_ref().unwrap(), 0, HOUR)
        .await
        .unwrap();
    assert_eq!(blocking.len(), 1, "the window must stay singly booked");
}

#[tokio::test]
async fn rejects_inverted_window() {
    let (_db, allocator) = setup(&[(1, 4)]).await;
    let err = allocator
        .book_table(customer(1), HOUR, 0, 2)
        .await
        .unwrap_err();
    assert!(matches!(err, AllocationError::InvalidWindow(_)));
}

#[tokio::test]
async fn concurrent_bookings_one_table_exactly_one_wins() {
    let (db, allocator) = setup(&[(1, 4)]).await;

    let a = allocator.clone();
    let b = allocator.clone();
    let (ra, rb) = tokio::join!(
        a.book_table(customer(1), 0, HOUR, 2),
        b.book_table(customer(2), 0, HOUR, 2),
    );

    let wins = [&ra, &rb].iter().filter(|r| r.is_ok()).count();
    assert_eq!(wins, 1, "exactly one booking must win the race");

    // The loser sees either the race or an already-full slot
    let loser = if ra.is_ok() { rb } else { ra };
    assert!(matches!(
        loser,
        Err(AllocationError::ConcurrentConflict) | Err(AllocationError::NoSlot)
    ));

    // Invariant: the table carries a single blocking reservation
    let repo = ReservationRepository::new(db.db.clone());
    let tables = DiningTableRepository::new(db.db.clone());
    let table = tables.find_by_number(1).await.unwrap().unwrap();
    let blocking = repo
        .find_overlapping(table.id.as_ref().unwrap(), 0, HOUR)
        .await
        .unwrap();
    assert_eq!(blocking.len(), 1);
}

#[tokio::test]
async fn concurrent_bookings_fill_every_table_without_double_booking() {
    // 两张桌，五个并发请求：恰好两单成功，每桌一单
    let (db, allocator) = setup(&[(1, 4), (2, 4)]).await;

    let bookings = (1..=5).map(|n| {
        let allocator = allocator.clone();
        async move { allocator.book_table(customer(n), 0, HOUR, 2).await }
    });
    let results = futures::future::join_all(bookings).await;

    let wins = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(wins, 2, "one winner per table");

    let repo = ReservationRepository::new(db.db.clone());
    let tables = DiningTableRepository::new(db.db.clone());
    for number in [1, 2] {
        let table = tables.find_by_number(number).await.unwrap().unwrap();
        let blocking = repo
            .find_overlapping(table.id.as_ref().unwrap(), 0, HOUR)
            .await
            .unwrap();
        assert_eq!(blocking.len(), 1, "table {number} must hold one booking");
    }
}
