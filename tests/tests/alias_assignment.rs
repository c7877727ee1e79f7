use pretty_assertions::assert_eq;
use tests::*;

#[test]
fn join_aliases_count_up_from_the_base_alias() {
    let db = db();
    let mut query = db.query::<Publisher>().unwrap();
    query.fetch("books");

    assert_eq!(
        query.sql().unwrap(),
        r#"SELECT "p"."ID" AS "p.ID", "p"."NAME" AS "p.NAME", "p"."COUNTRY" AS "p.COUNTRY", "p"."VERSION" AS "p.VERSION", "p1"."ID" AS "p1.ID", "p1"."TITLE" AS "p1.TITLE", "p1"."PUBLISHER_ID" AS "p1.PUBLISHER_ID", "p1"."PRICE" AS "p1.PRICE", "p1"."VERSION" AS "p1.VERSION" FROM "PUBLISHER" AS "p" LEFT JOIN "BOOK" AS "p1" ON "p"."ID" = "p1"."PUBLISHER_ID""#
    );
}

#[test]
fn repeating_a_join_does_not_join_twice() {
    let db = db();
    let mut query = db.query::<Publisher>().unwrap();
    query.join("books");
    query.join("books");

    // Joined for filtering only, so no BOOK columns are selected either.
    assert_eq!(
        query.sql().unwrap(),
        r#"SELECT "p"."ID" AS "p.ID", "p"."NAME" AS "p.NAME", "p"."COUNTRY" AS "p.COUNTRY", "p"."VERSION" AS "p.VERSION" FROM "PUBLISHER" AS "p" JOIN "BOOK" AS "p1" ON "p"."ID" = "p1"."PUBLISHER_ID""#
    );
}

#[test]
fn inner_and_outer_joins_of_one_association_split() {
    let db = db();
    let mut query = db.query::<Publisher>().unwrap();
    query.join("books");
    query.fetch("books");

    let sql = query.sql().unwrap().to_string();
    assert!(sql.contains(r#" JOIN "BOOK" AS "p1" ON "p"."ID" = "p1"."PUBLISHER_ID""#));
    assert!(sql.contains(r#" LEFT JOIN "BOOK" AS "p2" ON "p"."ID" = "p2"."PUBLISHER_ID""#));
    // Only the fetched copy is projected.
    assert!(sql.contains(r#" AS "p2.ID""#));
    assert!(!sql.contains(r#" AS "p1.ID""#));
}

#[test]
fn preferred_alias_wins_over_minting() {
    let db = db();
    let mut query = db.query::<Publisher>().unwrap();
    query.fetch("books").alias("bk");
    query.fetch("books.authors");

    let sql = query.sql().unwrap().to_string();
    assert!(sql.contains(r#" LEFT JOIN "BOOK" AS "bk" ON "p"."ID" = "bk"."PUBLISHER_ID""#));
    assert!(sql.contains(r#" LEFT JOIN "BOOK_AUTHOR" AS "p1" ON "bk"."ID" = "p1"."BOOK_ID""#));
    assert!(sql.contains(r#" LEFT JOIN "AUTHOR" AS "p2" ON "p1"."AUTHOR_ID" = "p2"."ID""#));
}

#[test]
fn preferred_alias_applies_before_the_chain_that_uses_it() {
    // The deeper chain is requested first; the alias directive still lands.
    let db = db();
    let mut query = db.query::<Publisher>().unwrap();
    query.fetch("books.authors");
    query.fetch("books").alias("bk");

    let sql = query.sql().unwrap().to_string();
    assert!(sql.contains(r#" LEFT JOIN "BOOK" AS "bk" ON "p"."ID" = "bk"."PUBLISHER_ID""#));
    assert!(!sql.contains(r#""BOOK" AS "p1""#));
}

#[test]
fn unknown_association_paths_are_rejected() {
    let db = db();
    let mut query = db.query::<Publisher>().unwrap();
    query.fetch("bookz");

    let err = query.sql().unwrap_err();
    assert!(err.is_invalid_schema(), "{err}");
    assert!(err.to_string().contains("bookz"), "{err}");
}
