use pretty_assertions::assert_eq;
use tests::*;

use trellis::stmt::Expr;

#[test]
fn hand_built_inserts_bind_literals_as_named_params() {
    let db = db();
    let id = col(&db, "BOOK", "ID");
    let title = col(&db, "BOOK", "TITLE");

    let mut conn = FakeConnection::new();
    db.insert::<Book>()
        .unwrap()
        .set(id, 7)
        .set(title, "Dune")
        .execute(&mut conn)
        .unwrap();

    assert_eq!(conn.sql(0), r#"INSERT INTO "BOOK" ("ID", "TITLE") VALUES (?, ?)"#);
    assert_eq!(conn.args(0), row![7i64, "Dune"]);
}

#[test]
fn hand_built_updates_render_bare_columns() {
    let db = db();
    let title = col(&db, "BOOK", "TITLE");
    let price = col(&db, "BOOK", "PRICE");

    let mut update = db.update::<Book>().unwrap();
    update
        .set(title, "Dune Messiah")
        .filter(Expr::lt(Expr::column(price), 999));

    assert_eq!(
        update.sql().unwrap(),
        r#"UPDATE "BOOK" SET "TITLE" = ? WHERE "PRICE" < ?"#
    );

    let mut conn = FakeConnection::new();
    conn.reply_affected(3);
    let affected = update.execute(&mut conn).unwrap();

    assert_eq!(affected, 3);
    assert_eq!(conn.args(0), row!["Dune Messiah", 999i64]);
}

#[test]
fn hand_built_deletes_filter_the_base_table() {
    let db = db();
    let id = col(&db, "AUTHOR", "ID");

    let mut conn = FakeConnection::new();
    conn.reply_affected(2);

    let affected = db
        .delete::<Author>()
        .unwrap()
        .filter(Expr::ge(Expr::column(id), 100))
        .execute(&mut conn)
        .unwrap();

    assert_eq!(affected, 2);
    assert_eq!(conn.sql(0), r#"DELETE FROM "AUTHOR" WHERE "ID" >= ?"#);
    assert_eq!(conn.args(0), row![100i64]);
}

#[test]
fn explicit_params_resolve_at_execution() {
    let db = db();
    let title = col(&db, "BOOK", "TITLE");
    let id = col(&db, "BOOK", "ID");

    let mut update = db.update::<Book>().unwrap();
    update
        .set(title, Expr::param("title"))
        .filter(Expr::eq(Expr::column(id), Expr::param("id")))
        .bind("title", "Children of Dune")
        .bind("id", 3);

    let mut conn = FakeConnection::new();
    update.execute(&mut conn).unwrap();

    assert_eq!(conn.sql(0), r#"UPDATE "BOOK" SET "TITLE" = ? WHERE "ID" = ?"#);
    assert_eq!(conn.args(0), row!["Children of Dune", 3i64]);
}

#[test]
fn unbound_params_fail_before_reaching_the_driver() {
    let db = db();
    let id = col(&db, "AUTHOR", "ID");

    let mut conn = FakeConnection::new();
    let err = db
        .delete::<Author>()
        .unwrap()
        .filter(Expr::eq(Expr::column(id), Expr::param("id")))
        .execute(&mut conn)
        .unwrap_err();

    assert!(err.is_unbound_param(), "{err}");
    assert!(conn.calls.is_empty());
}
