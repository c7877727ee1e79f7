use pretty_assertions::assert_eq;
use tests::*;

#[test]
fn two_fetch_levels_assemble_the_whole_tree() {
    let db = db();
    let labels = &[
        "p.ID",
        "p.NAME",
        "p.COUNTRY",
        "p.VERSION",
        "p1.ID",
        "p1.TITLE",
        "p1.PUBLISHER_ID",
        "p1.PRICE",
        "p1.VERSION",
        "p3.ID",
        "p3.NAME",
    ];

    let mut conn = FakeConnection::new();
    conn.reply_rows(
        labels,
        vec![
            row![1i64, "Tor", Value::Null, 1i64, 10i64, "Dune", 1i64, 1250i64, 1i64, 100i64, "Herbert"],
            row![1i64, "Tor", Value::Null, 1i64, 10i64, "Dune", 1i64, 1250i64, 1i64, 101i64, "Anderson"],
            row![1i64, "Tor", Value::Null, 1i64, 11i64, "Foundation", 1i64, 999i64, 1i64, 100i64, "Herbert"],
        ],
    );

    let mut query = db.query::<Publisher>().unwrap();
    query.fetch("books");
    query.fetch("books.authors");
    let publishers = query.list_tree(&mut conn).unwrap();

    let herbert = Author {
        id: 100,
        name: "Herbert".into(),
        retrieved: true,
    };
    let anderson = Author {
        id: 101,
        name: "Anderson".into(),
        retrieved: true,
    };

    assert_eq!(
        publishers,
        vec![Publisher {
            id: 1,
            name: "Tor".into(),
            country: None,
            version: 1,
            books: vec![
                Book {
                    id: 10,
                    title: "Dune".into(),
                    publisher_id: 1,
                    price: 12.5,
                    version: 1,
                    authors: vec![herbert.clone(), anderson],
                    ..Default::default()
                },
                Book {
                    id: 11,
                    title: "Foundation".into(),
                    publisher_id: 1,
                    price: 9.99,
                    version: 1,
                    authors: vec![herbert],
                    ..Default::default()
                },
            ],
        }]
    );
}

#[test]
fn single_valued_associations_land_in_an_option() {
    let db = db();
    let labels = &[
        "b.ID",
        "b.TITLE",
        "b.PUBLISHER_ID",
        "b.PRICE",
        "b.VERSION",
        "b1.ID",
        "b1.NAME",
        "b1.COUNTRY",
        "b1.VERSION",
    ];

    let mut conn = FakeConnection::new();
    conn.reply_rows(
        labels,
        vec![row![10i64, "Dune", 1i64, 1250i64, 1i64, 1i64, "Tor", Value::Null, 1i64]],
    );

    let mut query = db.query::<Book>().unwrap();
    query.fetch("publisher");
    let books = query.list(&mut conn).unwrap();

    assert_eq!(books.len(), 1);
    assert_eq!(
        books[0].publisher,
        Some(Box::new(Publisher {
            id: 1,
            name: "Tor".into(),
            country: None,
            version: 1,
            books: vec![],
        }))
    );
}

#[test]
fn retrieval_hooks_run_before_children_are_attached() {
    let db = db();
    let labels = &["a.ID", "a.NAME"];

    let mut conn = FakeConnection::new();
    conn.reply_rows(labels, vec![row![100i64, "Herbert"], row![101i64, "Anderson"]]);

    let authors = db.query::<Author>().unwrap().list(&mut conn).unwrap();

    // Every materialized author went through the post-retrieve hook.
    assert!(authors.iter().all(|author| author.retrieved));
}
