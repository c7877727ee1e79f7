//! Shared fixtures for the integration suite: a scripted in-memory
//! connection, a small publishing schema, and entity types mapped onto it.

use trellis::{
    driver::{Connection, Rows},
    schema::{Column, ColumnId, Registry, Table},
    AutoKeyStrategy, Db, Mapping, Result, Translator,
};

use std::collections::VecDeque;

pub use trellis_core::stmt::Value;

/// Build a row of [`Value`]s from anything convertible.
#[macro_export]
macro_rules! row {
    ( $( $value:expr ),* $(,)? ) => {
        vec![ $( $crate::Value::from($value) ),* ]
    };
}

/// One statement the code under test sent to the connection.
#[derive(Debug, Clone)]
pub struct Call {
    pub sql: String,
    pub args: Vec<Value>,
}

enum Reply {
    Rows(Rows),
    Affected(u64),
}

/// A [`Connection`] that records every statement and answers from a script.
///
/// Unscripted `exec` calls report one affected row; unscripted queries come
/// back empty.
#[derive(Default)]
pub struct FakeConnection {
    pub calls: Vec<Call>,
    replies: VecDeque<Reply>,
}

impl FakeConnection {
    pub fn new() -> FakeConnection {
        FakeConnection::default()
    }

    /// Queue a result set. `columns` are the labels the statement selects,
    /// `rows` one buffer per result row.
    pub fn reply_rows(&mut self, columns: &[&str], rows: Vec<Vec<Value>>) -> &mut Self {
        let columns = columns.iter().map(|column| column.to_string()).collect();
        self.replies.push_back(Reply::Rows(Rows::new(columns, rows)));
        self
    }

    pub fn reply_affected(&mut self, affected: u64) -> &mut Self {
        self.replies.push_back(Reply::Affected(affected));
        self
    }

    pub fn sql(&self, call: usize) -> &str {
        &self.calls[call].sql
    }

    pub fn args(&self, call: usize) -> &[Value] {
        &self.calls[call].args
    }

    pub fn last_sql(&self) -> &str {
        &self.calls.last().expect("no statement was executed").sql
    }
}

impl Connection for FakeConnection {
    fn exec(&mut self, sql: &str, params: &[Value]) -> Result<u64> {
        self.calls.push(Call {
            sql: sql.to_string(),
            args: params.to_vec(),
        });
        match self.replies.pop_front() {
            Some(Reply::Affected(affected)) => Ok(affected),
            Some(Reply::Rows(_)) => panic!("scripted rows where an exec was expected: {sql}"),
            None => Ok(1),
        }
    }

    fn query(&mut self, sql: &str, params: &[Value]) -> Result<Rows> {
        self.calls.push(Call {
            sql: sql.to_string(),
            args: params.to_vec(),
        });
        match self.replies.pop_front() {
            Some(Reply::Rows(rows)) => Ok(rows),
            Some(Reply::Affected(_)) => {
                panic!("scripted affected count where a query was expected: {sql}")
            }
            None => Ok(Rows::default()),
        }
    }
}

/// The fixture schema:
///
/// ```text
/// PUBLISHER --books--> BOOK --authors--> AUTHOR     (m2m via BOOK_AUTHOR)
///                       |
///                       +-- publisher (back to PUBLISHER)
///                       +-- PUBLISHER_NAME (virtual, reads PUBLISHER.NAME)
/// EBOOK                                             (KIND = 'EBOOK' discriminator)
/// ```
pub fn library() -> Registry {
    let mut builder = Registry::builder();

    let publisher = builder.table("PUBLISHER", "p", |t| {
        t.column("ID").key();
        t.column("NAME").mandatory();
        t.column("COUNTRY");
        t.column("VERSION").version();
    });

    let book = builder.table("BOOK", "b", |t| {
        t.column("ID").key();
        t.column("TITLE").mandatory();
        t.column("PUBLISHER_ID");
        t.column("PRICE");
        t.column("VERSION").version();
    });

    let author = builder.table("AUTHOR", "a", |t| {
        t.column("ID").key();
        t.column("NAME");
    });

    let contribution = builder.table("BOOK_AUTHOR", "ba", |t| {
        t.column("BOOK_ID");
        t.column("AUTHOR_ID");
        t.column("ROLE");
    });

    builder.table("EBOOK", "e", |t| {
        t.column("ID").key();
        t.column("TITLE");
        t.column("FORMAT");
        t.discriminator("KIND", "EBOOK");
    });

    builder
        .assoc("books", (publisher, &["ID"]), (book, &["PUBLISHER_ID"]))
        .unwrap();
    let to_publisher = builder
        .assoc("publisher", (book, &["PUBLISHER_ID"]), (publisher, &["ID"]))
        .unwrap();
    let to_book = builder
        .assoc("book", (contribution, &["BOOK_ID"]), (book, &["ID"]))
        .unwrap();
    let to_author = builder
        .assoc("author", (contribution, &["AUTHOR_ID"]), (author, &["ID"]))
        .unwrap();
    builder
        .assoc_discriminator(to_author, contribution, "ROLE", "author")
        .unwrap();
    builder.many_to_many("authors", to_book, to_author).unwrap();
    builder
        .virtual_column(book, "PUBLISHER_NAME", to_publisher, "NAME")
        .unwrap();

    builder.build().unwrap()
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Publisher {
    pub id: i64,
    pub name: String,
    pub country: Option<String>,
    pub version: i64,
    pub books: Vec<Book>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub publisher_id: i64,
    /// Stored in cents; the mapping converts both ways.
    pub price: f64,
    pub version: i64,
    pub publisher_name: String,
    /// Aliases of fields changed since the last submit.
    pub marks: Vec<String>,
    pub publisher: Option<Box<Publisher>>,
    pub authors: Vec<Author>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Author {
    pub id: i64,
    pub name: String,
    /// Set by the retrieve hook.
    pub retrieved: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ebook {
    pub id: i64,
    pub title: String,
    pub format: String,
}

/// The fixture database over [`library`], with ANSI SQL.
pub fn db() -> Db {
    db_with(trellis::Ansi)
}

pub fn db_with(translator: impl Translator + Send + Sync + 'static) -> Db {
    let registry = library();

    let publisher = registry.table_by_name("PUBLISHER").unwrap().id;
    let book = registry.table_by_name("BOOK").unwrap().id;
    let author = registry.table_by_name("AUTHOR").unwrap().id;
    let ebook = registry.table_by_name("EBOOK").unwrap().id;

    let mut publishers = Mapping::<Publisher>::new(publisher);
    publishers.field(
        "ID",
        |p| p.id.into(),
        |p, v| {
            p.id = v.to_i64()?;
            Ok(())
        },
    );
    publishers.field(
        "NAME",
        |p| p.name.clone().into(),
        |p, v| {
            p.name = v.to_string_value()?;
            Ok(())
        },
    );
    publishers
        .field(
            "COUNTRY",
            |p| p.country.clone().into(),
            |p, v| {
                p.country = match v {
                    Value::Null => None,
                    other => Some(other.to_string_value()?),
                };
                Ok(())
            },
        )
        .keep_zero();
    publishers.field(
        "VERSION",
        |p| p.version.into(),
        |p, v| {
            p.version = v.to_i64()?;
            Ok(())
        },
    );
    publishers.many("books", |p: &mut Publisher, b: Book| p.books.push(b));

    let mut books = Mapping::<Book>::new(book);
    books.field(
        "ID",
        |b| b.id.into(),
        |b, v| {
            b.id = v.to_i64()?;
            Ok(())
        },
    );
    books.field(
        "TITLE",
        |b| b.title.clone().into(),
        |b, v| {
            b.title = v.to_string_value()?;
            Ok(())
        },
    );
    books.field(
        "PUBLISHER_ID",
        |b| b.publisher_id.into(),
        |b, v| {
            b.publisher_id = v.to_i64()?;
            Ok(())
        },
    );
    books
        .field(
            "PRICE",
            |b| b.price.into(),
            |b, v| {
                b.price = v.to_f64()?;
                Ok(())
            },
        )
        .convert(
            |value| match value {
                Value::F64(price) => Value::I64((price * 100.0).round() as i64),
                other => other,
            },
            |value| match value {
                Value::I64(cents) => Value::F64(cents as f64 / 100.0),
                other => other,
            },
        );
    books.field(
        "VERSION",
        |b| b.version.into(),
        |b, v| {
            b.version = v.to_i64()?;
            Ok(())
        },
    );
    books.field(
        "PUBLISHER_NAME",
        |b| b.publisher_name.clone().into(),
        |b, v| {
            b.publisher_name = v.to_string_value()?;
            Ok(())
        },
    );
    books.markable(|b| b.marks.clone(), |b| b.marks.clear());
    books.one("publisher", |b: &mut Book, p: Publisher| {
        b.publisher = Some(Box::new(p))
    });
    books.many("authors", |b: &mut Book, a: Author| b.authors.push(a));

    let mut authors = Mapping::<Author>::new(author);
    authors.field(
        "ID",
        |a| a.id.into(),
        |a, v| {
            a.id = v.to_i64()?;
            Ok(())
        },
    );
    authors.field(
        "NAME",
        |a| a.name.clone().into(),
        |a, v| {
            a.name = v.to_string_value()?;
            Ok(())
        },
    );
    authors.post_retrieve(|a| {
        a.retrieved = true;
        Ok(())
    });

    let mut ebooks = Mapping::<Ebook>::new(ebook);
    ebooks.field(
        "ID",
        |e| e.id.into(),
        |e, v| {
            e.id = v.to_i64()?;
            Ok(())
        },
    );
    ebooks.field(
        "TITLE",
        |e| e.title.clone().into(),
        |e, v| {
            e.title = v.to_string_value()?;
            Ok(())
        },
    );
    ebooks.field(
        "FORMAT",
        |e| e.format.clone().into(),
        |e, v| {
            e.format = v.to_string_value()?;
            Ok(())
        },
    );

    let mut builder = Db::builder();
    builder.registry(registry);
    builder.translator(translator);
    builder.register(publishers);
    builder.register(books);
    builder.register(authors);
    builder.register(ebooks);
    builder.build().unwrap()
}

/// Column ID lookup by table and column name.
pub fn col(db: &Db, table: &str, column: &str) -> ColumnId {
    let table = db.registry().table_by_name(table).expect("unknown table");
    table.column_by_name(column).expect("unknown column").id
}

/// Sequence-style dialect: key values come from a generator query run
/// before the insert.
#[derive(Debug, Clone, Copy)]
pub struct SequenceDialect;

impl Translator for SequenceDialect {
    fn auto_key_strategy(&self) -> AutoKeyStrategy {
        AutoKeyStrategy::BeforeInsert
    }

    fn auto_number_query(&self, table: &Table, column: &Column) -> Option<String> {
        Some(format!("SELECT NEXT VALUE FOR {}_{}", table.name, column.name))
    }
}

/// RETURNING-clause dialect.
#[derive(Debug, Clone, Copy)]
pub struct ReturningDialect;

impl Translator for ReturningDialect {
    fn auto_key_strategy(&self) -> AutoKeyStrategy {
        AutoKeyStrategy::Returning
    }
}

/// Last-insert-id dialect: the generated key is fetched after the insert.
#[derive(Debug, Clone, Copy)]
pub struct LastIdDialect;

impl Translator for LastIdDialect {
    fn auto_key_strategy(&self) -> AutoKeyStrategy {
        AutoKeyStrategy::AfterInsert
    }

    fn auto_number_query(&self, _table: &Table, _column: &Column) -> Option<String> {
        Some("SELECT LAST_INSERT_ID()".to_string())
    }
}
