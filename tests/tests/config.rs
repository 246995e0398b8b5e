use pretty_assertions::assert_eq;
use tests::prelude::*;

#[test]
fn custom_alias_separator() {
    setup();

    let config = Config {
        alias_separator: "__".to_string(),
    };
    let session = TestSession::with_config(Db::new(), config);
    assert_eq!(session.hydrator().config().alias_separator, "__");

    let rows = ResultSet::new([
        "b__Id",
        "b__Title",
        "b__Description",
        "a__Id",
        "a__FirstName",
        "a__MiddleName",
        "a__LastName",
        // Matches the default separator only.
        "b_Title",
    ])
    .row([
        Value::from(1),
        "x".into(),
        Value::Null,
        Value::from(2),
        "y".into(),
        Value::Null,
        Value::Null,
        "wrong".into(),
    ]);

    let shape = ResultSetMapping::new()
        .add_query_return(RootReturn::aliased("b", "Book"))
        .add_query_return(JoinReturn::new("a", "b", "AuthorId"));

    let book = session
        .hydrator()
        .hydrate(&mut session.raw("join", rows), &shape)
        .unwrap()
        .unwrap()
        .downcast::<Book>()
        .unwrap();

    let book = book.get().unwrap();
    assert_eq!(book.title, "x");
    assert_eq!(
        book.author.get().unwrap().unwrap().first_name.as_deref(),
        Some("y")
    );
}

#[test]
fn builder_requires_metadata() {
    let err = Hydrator::builder().build().err().unwrap();
    assert!(err.is_invalid_argument());
}
