use pretty_assertions::assert_eq;
use tests::*;

use trellis::stmt::Expr;

#[test]
fn chains_share_their_deepest_common_prefix() {
    let db = db();
    let mut query = db.query::<Publisher>().unwrap();
    query.fetch("books");
    query.fetch("books.authors");

    let sql = query.sql().unwrap().to_string();

    // One physical join per distinct hop: book, junction, author.
    assert_eq!(sql.matches(" LEFT JOIN ").count(), 3);
    assert!(sql.contains(r#" LEFT JOIN "BOOK" AS "p1" ON "p"."ID" = "p1"."PUBLISHER_ID""#));
    assert!(sql.contains(r#" LEFT JOIN "BOOK_AUTHOR" AS "p2" ON "p1"."ID" = "p2"."BOOK_ID""#));
    assert!(sql.contains(
        r#" LEFT JOIN "AUTHOR" AS "p3" ON "p2"."AUTHOR_ID" = "p3"."ID" AND "p2"."ROLE" = ?"#
    ));
}

#[test]
fn shared_prefix_columns_are_selected_once() {
    let db = db();
    let mut query = db.query::<Publisher>().unwrap();
    query.fetch("books");
    query.fetch("books.authors");

    let sql = query.sql().unwrap().to_string();
    assert_eq!(sql.matches(r#""p1"."ID" AS "p1.ID""#).count(), 1);
}

#[test]
fn a_prefix_requested_after_the_deep_chain_adds_nothing() {
    let db = db();

    let mut deep_first = db.query::<Publisher>().unwrap();
    deep_first.fetch("books.authors");
    deep_first.fetch("books");

    let mut shallow_first = db.query::<Publisher>().unwrap();
    shallow_first.fetch("books");
    shallow_first.fetch("books.authors");

    assert_eq!(
        deep_first.sql().unwrap().matches(" LEFT JOIN ").count(),
        shallow_first.sql().unwrap().matches(" LEFT JOIN ").count(),
    );
}

#[test]
fn hop_filters_land_in_the_on_clause() {
    let db = db();
    let price = col(&db, "BOOK", "PRICE");

    let mut query = db.query::<Publisher>().unwrap();
    query
        .fetch("books")
        .filter(Expr::ge(Expr::column(price), 1000));

    let sql = query.sql().unwrap().to_string();
    assert!(sql.contains(
        r#" LEFT JOIN "BOOK" AS "p1" ON "p"."ID" = "p1"."PUBLISHER_ID" AND "p1"."PRICE" >= ?"#
    ));
    assert_eq!(query.params().get("p_R1"), Some(&Value::I64(1000)));

    let mut conn = FakeConnection::new();
    query.rows(&mut conn).unwrap();
    assert_eq!(conn.args(0), row![1000i64]);
}

#[test]
fn join_directives_can_project_extra_columns() {
    let db = db();
    let mut query = db.query::<Book>().unwrap();
    query.join("publisher").columns(&["NAME"]);

    assert_eq!(
        query.sql().unwrap(),
        r#"SELECT "b"."ID" AS "b.ID", "b"."TITLE" AS "b.TITLE", "b"."PUBLISHER_ID" AS "b.PUBLISHER_ID", "b"."PRICE" AS "b.PRICE", "b"."VERSION" AS "b.VERSION", "b1"."NAME" AS "b1.NAME" FROM "BOOK" AS "b" JOIN "PUBLISHER" AS "b1" ON "b"."PUBLISHER_ID" = "b1"."ID""#
    );
}
