use diesel::prelude::*;
use roster_search::schema::{members, teams};

mod common;

#[test]
fn test_creates_migrated_database() {
    let test_db = common::TestDb::new("test_creates_migrated_database.db");
    let mut conn = test_db.pool().get().unwrap();

    assert_eq!(test_db.pool().max_size(), 4);

    let teams: i64 = teams::table.count().get_result(&mut conn).unwrap();
    let members: i64 = members::table.count().get_result(&mut conn).unwrap();
    assert_eq!(teams, 0);
    assert_eq!(members, 0);
}

#[test]
fn test_foreign_keys_are_enforced() {
    let test_db = common::TestDb::new("test_foreign_keys_are_enforced.db");
    let mut conn = test_db.pool().get().unwrap();

    let result = diesel::insert_into(members::table)
        .values((members::age.eq(10), members::team_id.eq(Some(99))))
        .execute(&mut conn);
    assert!(result.is_err());
}
