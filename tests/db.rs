use diesel::prelude::*;

use keepintouch::schema::settings;

mod common;

#[test]
fn test_migrations_create_empty_tables() {
    let test_db = common::TestDb::new("test_migrations_create_empty_tables.db");
    let mut conn = test_db.pool().get().expect("connection");

    let count: i64 = settings::table.count().get_result(&mut conn).unwrap();
    assert_eq!(count, 0);
}
