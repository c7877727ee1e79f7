use pretty_assertions::assert_eq;
use tests::*;

use trellis::stmt::Expr;

#[test]
fn select_projects_every_physical_column() {
    let db = db();
    let mut query = db.query::<Publisher>().unwrap();

    assert_eq!(
        query.sql().unwrap(),
        r#"SELECT "p"."ID" AS "p.ID", "p"."NAME" AS "p.NAME", "p"."COUNTRY" AS "p.COUNTRY", "p"."VERSION" AS "p.VERSION" FROM "PUBLISHER" AS "p""#
    );
}

#[test]
fn filter_literals_become_named_params() {
    let db = db();
    let id = col(&db, "PUBLISHER", "ID");

    let mut query = db.query::<Publisher>().unwrap();
    query.filter(Expr::eq(Expr::column(id), 7));

    assert!(query.sql().unwrap().ends_with(r#" WHERE "p"."ID" = ?"#));
    assert_eq!(query.params().get("p_R1"), Some(&Value::I64(7)));

    let mut conn = FakeConnection::new();
    query.rows(&mut conn).unwrap();
    assert_eq!(conn.args(0), row![7i64]);
}

#[test]
fn rebinding_a_param_does_not_rebuild_the_statement() {
    let db = db();
    let id = col(&db, "PUBLISHER", "ID");

    let mut query = db.query::<Publisher>().unwrap();
    query.filter(Expr::eq(Expr::column(id), 7));
    let sql = query.sql().unwrap().to_string();

    query.bind("p_R1", 9);
    assert_eq!(query.sql().unwrap(), sql);

    let mut conn = FakeConnection::new();
    query.rows(&mut conn).unwrap();
    assert_eq!(conn.args(0), row![9i64]);
}

#[test]
fn ordering_and_pagination() {
    let db = db();
    let name = col(&db, "PUBLISHER", "NAME");
    let id = col(&db, "PUBLISHER", "ID");

    let mut query = db.query::<Publisher>().unwrap();
    query.order_by(name).order_by_desc(id).limit(10).offset(5);

    assert!(query
        .sql()
        .unwrap()
        .ends_with(r#" ORDER BY "p"."NAME", "p"."ID" DESC LIMIT 10 OFFSET 5"#));
}

#[test]
fn ordering_by_a_fetched_table_uses_its_join_alias() {
    let db = db();
    let title = col(&db, "BOOK", "TITLE");

    let mut query = db.query::<Publisher>().unwrap();
    query.fetch("books");
    query.order_by(title);

    assert!(query
        .sql()
        .unwrap()
        .ends_with(r#" ORDER BY "p1"."TITLE""#));
}

#[test]
fn ordering_by_an_unjoined_table_is_rejected() {
    let db = db();
    let title = col(&db, "BOOK", "TITLE");

    let mut query = db.query::<Publisher>().unwrap();
    query.order_by(title);

    let err = query.sql().unwrap_err();
    assert!(err.is_invalid_schema(), "{err}");
}

#[test]
fn projecting_another_tables_column_is_rejected() {
    let db = db();
    let title = col(&db, "BOOK", "TITLE");

    let mut query = db.query::<Publisher>().unwrap();
    query.column(title);

    let err = query.sql().unwrap_err();
    assert!(err.is_invalid_schema(), "{err}");
}

#[test]
fn count_drops_ordering_and_pagination() {
    let db = db();
    let id = col(&db, "PUBLISHER", "ID");

    let mut query = db.query::<Publisher>().unwrap();
    query
        .filter(Expr::gt(Expr::column(id), 10))
        .order_by(col(&db, "PUBLISHER", "NAME"))
        .limit(3);

    let mut conn = FakeConnection::new();
    conn.reply_rows(&["COUNT"], vec![row![42i64]]);

    assert_eq!(query.count(&mut conn).unwrap(), 42);
    assert_eq!(
        conn.sql(0),
        r#"SELECT COUNT(*) FROM "PUBLISHER" AS "p" WHERE "p"."ID" > ?"#
    );
    assert_eq!(conn.args(0), row![10i64]);
}

#[test]
fn exists_is_a_nonzero_count() {
    let db = db();
    let mut query = db.query::<Publisher>().unwrap();

    let mut conn = FakeConnection::new();
    conn.reply_rows(&["COUNT"], vec![row![0i64]]);
    assert!(!query.exists(&mut conn).unwrap());

    conn.reply_rows(&["COUNT"], vec![row![3i64]]);
    assert!(query.exists(&mut conn).unwrap());
}

#[test]
fn first_takes_the_first_row() {
    let db = db();
    let mut query = db.query::<Publisher>().unwrap();

    let mut conn = FakeConnection::new();
    conn.reply_rows(
        &["p.ID", "p.NAME", "p.COUNTRY", "p.VERSION"],
        vec![row![1i64, "Tor", Value::Null, 1i64], row![2i64, "Orbit", "UK", 1i64]],
    );

    let first = query.first(&mut conn).unwrap().unwrap();
    assert_eq!(first.id, 1);
    assert_eq!(first.name, "Tor");

    conn.reply_rows(&["p.ID", "p.NAME", "p.COUNTRY", "p.VERSION"], vec![]);
    assert_eq!(query.first(&mut conn).unwrap(), None);
}

#[test]
fn base_alias_renames_every_reference() {
    let db = db();
    let id = col(&db, "PUBLISHER", "ID");

    let mut query = db.query::<Publisher>().unwrap();
    query.base_alias("pub").filter(Expr::eq(Expr::column(id), 7));

    assert_eq!(
        query.sql().unwrap(),
        r#"SELECT "pub"."ID" AS "pub.ID", "pub"."NAME" AS "pub.NAME", "pub"."COUNTRY" AS "pub.COUNTRY", "pub"."VERSION" AS "pub.VERSION" FROM "PUBLISHER" AS "pub" WHERE "pub"."ID" = ?"#
    );
    assert_eq!(query.params().get("pub_R1"), Some(&Value::I64(7)));
}
