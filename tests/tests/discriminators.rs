use pretty_assertions::assert_eq;
use tests::*;

use trellis::stmt::Expr;

#[test]
fn every_select_carries_the_table_predicate() {
    let db = db();
    let mut query = db.query::<Ebook>().unwrap();

    assert_eq!(
        query.sql().unwrap(),
        r#"SELECT "e"."ID" AS "e.ID", "e"."TITLE" AS "e.TITLE", "e"."FORMAT" AS "e.FORMAT", "e"."KIND" AS "e.KIND" FROM "EBOOK" AS "e" WHERE "e"."KIND" = ?"#
    );

    let mut conn = FakeConnection::new();
    query.rows(&mut conn).unwrap();
    assert_eq!(conn.args(0), row!["EBOOK"]);
}

#[test]
fn user_filters_come_after_the_predicate() {
    let db = db();
    let id = col(&db, "EBOOK", "ID");

    let mut query = db.query::<Ebook>().unwrap();
    query.filter(Expr::eq(Expr::column(id), 5));

    assert!(query
        .sql()
        .unwrap()
        .ends_with(r#" WHERE "e"."KIND" = ? AND "e"."ID" = ?"#));

    let mut conn = FakeConnection::new();
    query.rows(&mut conn).unwrap();
    assert_eq!(conn.args(0), row!["EBOOK", 5i64]);
}

#[test]
fn inserts_stamp_the_discriminator_first() {
    let db = db();
    let mut ebook = Ebook {
        id: 5,
        title: "Dune".into(),
        format: "epub".into(),
    };

    let mut conn = FakeConnection::new();
    db.insert::<Ebook>()
        .unwrap()
        .submit(&mut ebook, &mut conn)
        .unwrap();

    assert_eq!(
        conn.sql(0),
        r#"INSERT INTO "EBOOK" ("KIND", "ID", "TITLE", "FORMAT") VALUES (?, ?, ?, ?)"#
    );
    assert_eq!(conn.args(0), row!["EBOOK", 5i64, "Dune", "epub"]);
}

#[test]
fn manual_updates_keep_the_predicate() {
    let db = db();
    let format = col(&db, "EBOOK", "FORMAT");

    let mut conn = FakeConnection::new();
    let affected = db
        .update::<Ebook>()
        .unwrap()
        .set(format, "pdf")
        .execute(&mut conn)
        .unwrap();

    assert_eq!(affected, 1);
    assert_eq!(
        conn.sql(0),
        r#"UPDATE "EBOOK" SET "FORMAT" = ? WHERE "KIND" = ?"#
    );
    assert_eq!(conn.args(0), row!["pdf", "EBOOK"]);
}

#[test]
fn manual_deletes_keep_the_predicate() {
    let db = db();
    let id = col(&db, "EBOOK", "ID");

    let mut conn = FakeConnection::new();
    db.delete::<Ebook>()
        .unwrap()
        .filter(Expr::eq(Expr::column(id), 5))
        .execute(&mut conn)
        .unwrap();

    assert_eq!(
        conn.sql(0),
        r#"DELETE FROM "EBOOK" WHERE "KIND" = ? AND "ID" = ?"#
    );
    assert_eq!(conn.args(0), row!["EBOOK", 5i64]);
}

#[test]
fn discriminated_rows_load_like_any_other() {
    let db = db();
    let mut query = db.query::<Ebook>().unwrap();

    let mut conn = FakeConnection::new();
    conn.reply_rows(
        &["e.ID", "e.TITLE", "e.FORMAT"],
        vec![row![5i64, "Dune", "epub"]],
    );

    let ebooks = query.list(&mut conn).unwrap();
    assert_eq!(
        ebooks,
        vec![Ebook {
            id: 5,
            title: "Dune".into(),
            format: "epub".into(),
        }]
    );
}
