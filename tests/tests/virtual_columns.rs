use pretty_assertions::assert_eq;
use tests::*;

use trellis::stmt::Expr;

#[test]
fn filtering_joins_the_backing_table_implicitly() {
    let db = db();
    let publisher_name = col(&db, "BOOK", "PUBLISHER_NAME");

    let mut query = db.query::<Book>().unwrap();
    query.filter(Expr::eq(Expr::column(publisher_name), "Tor"));

    assert_eq!(
        query.sql().unwrap(),
        r#"SELECT "b"."ID" AS "b.ID", "b"."TITLE" AS "b.TITLE", "b"."PUBLISHER_ID" AS "b.PUBLISHER_ID", "b"."PRICE" AS "b.PRICE", "b"."VERSION" AS "b.VERSION" FROM "BOOK" AS "b" LEFT JOIN "PUBLISHER" AS "b1" ON "b"."PUBLISHER_ID" = "b1"."ID" WHERE "b1"."NAME" = ?"#
    );
    assert_eq!(query.params().get("b_R1"), Some(&Value::String("Tor".into())));
}

#[test]
fn projecting_reads_through_the_join_under_the_base_label() {
    let db = db();
    let id = col(&db, "BOOK", "ID");
    let publisher_name = col(&db, "BOOK", "PUBLISHER_NAME");

    let mut query = db.query::<Book>().unwrap();
    query.column(id).column(publisher_name);

    assert_eq!(
        query.sql().unwrap(),
        r#"SELECT "b"."ID" AS "b.ID", "b1"."NAME" AS "b.PUBLISHER_NAME" FROM "BOOK" AS "b" LEFT JOIN "PUBLISHER" AS "b1" ON "b"."PUBLISHER_ID" = "b1"."ID""#
    );

    let mut conn = FakeConnection::new();
    conn.reply_rows(&["b.ID", "b.PUBLISHER_NAME"], vec![row![7i64, "Tor"]]);

    let books = query.list(&mut conn).unwrap();
    assert_eq!(books[0].id, 7);
    assert_eq!(books[0].publisher_name, "Tor");
}

#[test]
fn projection_and_filter_share_one_join() {
    let db = db();
    let publisher_name = col(&db, "BOOK", "PUBLISHER_NAME");

    let mut query = db.query::<Book>().unwrap();
    query
        .column(col(&db, "BOOK", "ID"))
        .column(publisher_name)
        .filter(Expr::eq(Expr::column(publisher_name), "Tor"));

    let sql = query.sql().unwrap();
    assert_eq!(sql.matches("LEFT JOIN").count(), 1);
    assert!(sql.ends_with(r#" WHERE "b1"."NAME" = ?"#));
}

#[test]
fn virtual_columns_are_invisible_to_inserts() {
    let db = db();
    let mut book = Book {
        id: 1,
        title: "Dune".into(),
        publisher_id: 3,
        price: 12.5,
        version: 0,
        publisher_name: "Tor".into(),
        marks: vec![],
        publisher: None,
        authors: vec![],
    };

    let mut conn = FakeConnection::new();
    db.insert::<Book>()
        .unwrap()
        .submit(&mut book, &mut conn)
        .unwrap();

    assert!(!conn.sql(0).contains("PUBLISHER_NAME"));
}

#[test]
fn updates_reject_virtual_references() {
    let db = db();
    let publisher_name = col(&db, "BOOK", "PUBLISHER_NAME");

    let err = db
        .update::<Book>()
        .unwrap()
        .filter(Expr::eq(Expr::column(publisher_name), "Tor"))
        .sql()
        .unwrap_err();

    assert!(err.is_validation(), "{err}");
    assert!(err.to_string().contains("PUBLISHER_NAME"), "{err}");
}

#[test]
fn deletes_reject_virtual_references() {
    let db = db();
    let publisher_name = col(&db, "BOOK", "PUBLISHER_NAME");

    let err = db
        .delete::<Book>()
        .unwrap()
        .filter(Expr::eq(Expr::column(publisher_name), "Tor"))
        .sql()
        .unwrap_err();

    assert!(err.is_validation(), "{err}");
}
