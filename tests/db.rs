mod common;

#[test]
fn test_creates_and_migrates_db() {
    let test_db = common::TestDb::new();
    let pool = test_db.pool();
    let conn = pool.get();
    assert!(conn.is_ok());
}

#[test]
fn test_foreign_keys_are_enforced() {
    use diesel::prelude::*;
    use photo_album::schema::votes;

    let test_db = common::TestDb::new();
    let mut conn = test_db.pool().get().expect("should acquire DB connection");

    let result = diesel::insert_into(votes::table)
        .values((
            votes::user_id.eq(1),
            votes::winner_id.eq(1),
            votes::loser_id.eq(2),
        ))
        .execute(&mut conn);

    assert!(result.is_err());
}
