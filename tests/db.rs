use diesel::prelude::*;
use pushkind_vod::schema::{vod_class, vod_list};

mod common;

#[test]
fn test_creates_and_migrates_db_files() {
    let test_db = common::TestDb::new();
    let pool = test_db.pool();
    let mut conn = pool.get().expect("should get a pooled connection");

    let videos: i64 = vod_list::table.count().get_result(&mut conn).unwrap();
    let categories: i64 = vod_class::table.count().get_result(&mut conn).unwrap();

    assert_eq!(videos, 0);
    assert_eq!(categories, 0);
}
