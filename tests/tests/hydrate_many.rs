use pretty_assertions::assert_eq;
use tests::prelude::*;

#[test]
fn one_book_per_row() {
    setup();

    let session = TestSession::new(Db::library());
    let books = session
        .hydrator()
        .hydrate_many::<Book>(&mut session.query("Book"))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    let ids: Vec<_> = books.iter().map(|book| book.get().unwrap().id).collect();
    assert_eq!(ids, [10, 11, 12, 13]);

    let notes = books[0].get().unwrap();
    let sketch = books[2].get().unwrap();
    assert_same!(notes.author.instance().unwrap(), sketch.author.instance().unwrap());
    assert!(books[3].get().unwrap().author.is_none());

    // Two distinct authors were referenced; neither was loaded.
    assert_eq!(session.cache().len(), 6);
    assert_eq!(session.refreshes(), 0);
    assert_eq!(session.log().len(), 1);
}

#[test]
fn rows_materialize_as_the_iterator_advances() {
    setup();

    let session = TestSession::new(Db::library());
    let mut authors = session
        .hydrator()
        .hydrate_many::<Author>(&mut session.query("Author"))
        .unwrap();

    assert_eq!(authors.remaining(), 2);
    assert!(session.cache().is_empty());

    let ada = authors.next().unwrap().unwrap();
    assert_eq!(ada.get().unwrap().first_name.as_deref(), Some("Ada"));
    assert_eq!(authors.remaining(), 1);
    assert_eq!(session.cache().len(), 1);

    let grace = authors.next().unwrap().unwrap();
    assert_eq!(grace.get().unwrap().middle_name.as_deref(), Some("Brewster"));
    assert!(authors.next().is_none());
}

#[test]
fn null_key_rows_are_skipped() {
    setup();

    let rows = Db::authors()
        .row([Value::Null, Value::Null, Value::Null, Value::Null])
        .row([Value::from(5), "Barbara".into(), Value::Null, "Liskov".into()]);

    let session = TestSession::new(Db::new());
    let authors: Vec<_> = session
        .hydrator()
        .hydrate_many::<Author>(&mut session.raw("left join", rows))
        .unwrap()
        .map(|author| author.unwrap().get().unwrap().id)
        .collect();

    assert_eq!(authors, [5]);
}

#[test]
fn bad_row_yields_error() {
    setup();

    let rows = ResultSet::new(["Id", "FirstName"])
        .row([Value::from(1), "Ada".into()]);

    let session = TestSession::new(Db::new());
    let mut authors = session
        .hydrator()
        .hydrate_many::<Author>(&mut session.raw("narrow", rows))
        .unwrap();

    let err = assert_err!(authors.next().unwrap());
    assert!(err.is_missing_column());
    assert!(authors.next().is_none());
}

#[test]
fn empty_result() {
    setup();

    let session = TestSession::new(Db::new());
    let mut books = session
        .hydrator()
        .hydrate_many::<Book>(&mut session.raw("empty", Db::books()))
        .unwrap();

    assert_eq!(books.size_hint(), (0, Some(0)));
    assert!(books.next().is_none());
}
