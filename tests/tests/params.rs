use pretty_assertions::assert_eq;
use tests::*;

use trellis::stmt::{Expr, ExprStmt, Params, Select, SelectItem};

#[test]
fn literal_names_are_stable_across_rebuilds() {
    let db = db();
    let name = col(&db, "PUBLISHER", "NAME");
    let country = col(&db, "PUBLISHER", "COUNTRY");

    let mut query = db.query::<Publisher>().unwrap();
    query.filter(Expr::eq(Expr::column(name), "Tor"));
    query.filter(Expr::eq(Expr::column(country), "US"));
    query.sql().unwrap();

    // Any directive change rebuilds the statement; the rewrite re-walks the
    // original directives, so the names come out the same.
    query.limit(1);
    query.sql().unwrap();

    assert_eq!(query.params().get("p_R1"), Some(&Value::String("Tor".into())));
    assert_eq!(query.params().get("p_R2"), Some(&Value::String("US".into())));
}

#[test]
fn explicit_params_bind_late() {
    let db = db();
    let name = col(&db, "PUBLISHER", "NAME");

    let mut query = db.query::<Publisher>().unwrap();
    query.filter(Expr::eq(Expr::column(name), Expr::param("name")));

    // The SQL renders without a value; execution requires one.
    assert!(query.sql().unwrap().ends_with(r#" WHERE "p"."NAME" = ?"#));

    let mut conn = FakeConnection::new();
    let err = query.rows(&mut conn).unwrap_err();
    assert!(err.is_unbound_param(), "{err}");
    assert!(conn.calls.is_empty());

    query.bind("name", "Tor");
    query.rows(&mut conn).unwrap();
    assert_eq!(conn.args(0), row!["Tor"]);
}

#[test]
fn subquery_params_fold_into_the_outer_statement() {
    let db = db();
    let registry = db.registry();
    let book = registry.table_by_name("BOOK").unwrap().id;
    let publisher_id = col(&db, "BOOK", "PUBLISHER_ID");
    let title = col(&db, "BOOK", "TITLE");
    let id = col(&db, "PUBLISHER", "ID");
    let name = col(&db, "PUBLISHER", "NAME");

    let mut sub = Select::new(book, "bb");
    sub.items
        .push(SelectItem::new(Expr::column_with_alias(publisher_id, "bb")));
    sub.and_filter(Expr::eq(
        Expr::column_with_alias(title, "bb"),
        Expr::param("title"),
    ));
    let mut sub_params = Params::new();
    sub_params.bind("title", "Inner");
    let sub = ExprStmt::with_params(sub, sub_params);

    let mut query = db.query::<Publisher>().unwrap();
    query
        .filter(Expr::eq(Expr::column(name), Expr::param("title")))
        .bind("title", "Outer")
        .filter(Expr::in_subquery(Expr::column(id), sub));

    // The inner binding collides with the outer `title` and is renamed; the
    // reference inside the subquery follows it.
    assert!(query.sql().unwrap().ends_with(
        r#" WHERE "p"."NAME" = ? AND "p"."ID" IN (SELECT "bb"."PUBLISHER_ID" FROM "BOOK" AS "bb" WHERE "bb"."TITLE" = ?)"#
    ));
    assert_eq!(query.params().get("title"), Some(&Value::String("Outer".into())));
    assert_eq!(
        query.params().get("title_2"),
        Some(&Value::String("Inner".into()))
    );

    let mut conn = FakeConnection::new();
    query.rows(&mut conn).unwrap();
    assert_eq!(conn.args(0), row!["Outer", "Inner"]);
}

#[test]
fn subquery_literals_are_not_rewritten() {
    let db = db();
    let registry = db.registry();
    let book = registry.table_by_name("BOOK").unwrap().id;
    let publisher_id = col(&db, "BOOK", "PUBLISHER_ID");
    let price = col(&db, "BOOK", "PRICE");
    let id = col(&db, "PUBLISHER", "ID");

    let mut sub = Select::new(book, "bb");
    sub.items
        .push(SelectItem::new(Expr::column_with_alias(publisher_id, "bb")));
    sub.and_filter(Expr::gt(Expr::column_with_alias(price, "bb"), 1000));

    let mut query = db.query::<Publisher>().unwrap();
    query.filter(Expr::in_subquery(Expr::column(id), ExprStmt::new(sub)));

    // The inner literal stays a literal; no `p_R` name is minted for it.
    query.sql().unwrap();
    assert!(query.params().is_empty());

    let mut conn = FakeConnection::new();
    query.rows(&mut conn).unwrap();
    assert_eq!(conn.args(0), row![1000i64]);
}
