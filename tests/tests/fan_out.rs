use pretty_assertions::assert_eq;
use tests::*;

const LABELS: &[&str] = &[
    "p.ID",
    "p.NAME",
    "p.COUNTRY",
    "p.VERSION",
    "p1.ID",
    "p1.TITLE",
    "p1.PUBLISHER_ID",
    "p1.PRICE",
    "p1.VERSION",
];

fn dune(publisher: i64) -> Book {
    Book {
        id: 10,
        title: "Dune".into(),
        publisher_id: publisher,
        price: 12.5,
        version: 1,
        ..Default::default()
    }
}

fn foundation(publisher: i64) -> Book {
    Book {
        id: 11,
        title: "Foundation".into(),
        publisher_id: publisher,
        price: 9.99,
        version: 1,
        ..Default::default()
    }
}

#[test]
fn tree_mode_collapses_fanned_out_rows() {
    let db = db();
    let mut conn = FakeConnection::new();
    conn.reply_rows(
        LABELS,
        vec![
            row![1i64, "Tor", Value::Null, 1i64, 10i64, "Dune", 1i64, 1250i64, 1i64],
            row![1i64, "Tor", Value::Null, 1i64, 11i64, "Foundation", 1i64, 999i64, 1i64],
        ],
    );

    let mut query = db.query::<Publisher>().unwrap();
    query.fetch("books");
    let publishers = query.list_tree(&mut conn).unwrap();

    assert_eq!(
        publishers,
        vec![Publisher {
            id: 1,
            name: "Tor".into(),
            country: None,
            version: 1,
            books: vec![dune(1), foundation(1)],
        }]
    );
}

#[test]
fn row_mode_keeps_one_entity_per_row() {
    let db = db();
    let mut conn = FakeConnection::new();
    conn.reply_rows(
        LABELS,
        vec![
            row![1i64, "Tor", Value::Null, 1i64, 10i64, "Dune", 1i64, 1250i64, 1i64],
            row![1i64, "Tor", Value::Null, 1i64, 11i64, "Foundation", 1i64, 999i64, 1i64],
        ],
    );

    let mut query = db.query::<Publisher>().unwrap();
    query.fetch("books");
    let publishers = query.list(&mut conn).unwrap();

    // Without reuse, the duplicated root comes back once per row.
    assert_eq!(publishers.len(), 2);
    assert_eq!(publishers[0].books, vec![dune(1)]);
    assert_eq!(publishers[1].books, vec![foundation(1)]);
}

#[test]
fn roots_without_children_come_back_childless() {
    let db = db();
    let mut conn = FakeConnection::new();
    conn.reply_rows(
        LABELS,
        vec![
            row![1i64, "Tor", Value::Null, 1i64, 10i64, "Dune", 1i64, 1250i64, 1i64],
            row![1i64, "Tor", Value::Null, 1i64, 11i64, "Foundation", 1i64, 999i64, 1i64],
            row![
                2i64,
                "Orbit",
                Value::Null,
                1i64,
                Value::Null,
                Value::Null,
                Value::Null,
                Value::Null,
                Value::Null
            ],
        ],
    );

    let mut query = db.query::<Publisher>().unwrap();
    query.fetch("books");
    let publishers = query.list_tree(&mut conn).unwrap();

    assert_eq!(publishers.len(), 2);
    assert_eq!(publishers[0].books.len(), 2);
    assert_eq!(publishers[1].name, "Orbit");
    assert!(publishers[1].books.is_empty());
}

#[test]
fn reuse_mode_requires_key_columns_in_the_projection() {
    let db = db();
    let name = col(&db, "PUBLISHER", "NAME");

    let mut conn = FakeConnection::new();
    conn.reply_rows(&["p.NAME"], vec![row!["Tor"]]);

    let mut query = db.query::<Publisher>().unwrap();
    query.column(name).reuse(true);
    let err = query.list(&mut conn).unwrap_err();

    assert!(err.is_missing_key(), "{err}");
}

#[test]
fn row_mode_tolerates_keyless_projections() {
    let db = db();
    let name = col(&db, "PUBLISHER", "NAME");

    let mut conn = FakeConnection::new();
    conn.reply_rows(&["p.NAME"], vec![row!["Tor"], row!["Orbit"]]);

    let mut query = db.query::<Publisher>().unwrap();
    query.column(name);
    let publishers = query.list(&mut conn).unwrap();

    assert_eq!(publishers.len(), 2);
    assert_eq!(publishers[0].name, "Tor");
    assert_eq!(publishers[1].name, "Orbit");
}
