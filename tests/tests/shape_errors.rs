use tests::prelude::*;

use hydra::CollectionReturn;

fn hydrate_all(session: &TestSession, shape: &ResultSetMapping) -> hydra::Error {
    let rows = session.db_mut().table("Book").clone();
    assert_err!(session.hydrator().hydrate_all(&mut session.raw("shape", rows), shape))
}

#[test]
fn empty_shape_is_invalid() {
    setup();

    let session = TestSession::new(Db::library());
    let err = hydrate_all(&session, &ResultSetMapping::new());

    assert!(err.is_invalid_argument());
    assert!(session.log().is_empty());
}

#[test]
fn owner_alias_must_name_a_root() {
    setup();

    let session = TestSession::new(Db::library());
    let shape = ResultSetMapping::new()
        .add_query_return(RootReturn::new("Book"))
        .add_query_return(JoinReturn::new("A", "B", "AuthorId"));

    assert!(hydrate_all(&session, &shape).is_unsupported_shape());
}

#[test]
fn owner_property_must_be_a_relation() {
    setup();

    let session = TestSession::new(Db::library());
    let shape = ResultSetMapping::new()
        .add_query_return(RootReturn::new("Book"))
        .add_query_return(JoinReturn::new("A", "", "Title"));

    let err = hydrate_all(&session, &shape);
    assert!(err.is_unsupported_shape());
    assert!(err.to_string().contains("`Book` has no one-to-one relation on `Title`"));
}

#[test]
fn joins_of_joins_are_unsupported() {
    setup();

    let session = TestSession::new(Db::library());
    let shape = ResultSetMapping::new()
        .add_query_return(RootReturn::aliased("B", "Book"))
        .add_query_return(JoinReturn::new("A", "B", "AuthorId"))
        .add_query_return(JoinReturn::new("C", "A", "AuthorId"));

    assert!(hydrate_all(&session, &shape).is_unsupported_shape());
}

#[test]
fn same_relation_joined_twice() {
    setup();

    let session = TestSession::new(Db::library());
    let shape = ResultSetMapping::new()
        .add_query_return(RootReturn::aliased("B", "Book"))
        .add_query_return(JoinReturn::new("A", "B", "AuthorId"))
        .add_query_return(JoinReturn::new("C", "B", "AuthorId"));

    assert!(hydrate_all(&session, &shape).is_unsupported_shape());
}

#[test]
fn collections_are_unsupported() {
    setup();

    let session = TestSession::new(Db::library());
    let shape = ResultSetMapping::new()
        .add_query_return(RootReturn::aliased("A", "Author"))
        .add_query_return(CollectionReturn::new("B", "Author", "Books"));

    assert!(hydrate_all(&session, &shape).is_unsupported_shape());
}

#[test]
fn shape_errors_surface_even_without_rows() {
    setup();

    let session = TestSession::new(Db::new());
    let shape = ResultSetMapping::new()
        .add_query_return(RootReturn::new("Book"))
        .add_query_return(JoinReturn::new("A", "missing", "AuthorId"));

    let err = assert_err!(session
        .hydrator()
        .hydrate_all(&mut session.raw("empty", Db::books()), &shape));
    assert!(err.is_unsupported_shape());
}

#[test]
fn no_rows_yields_none_per_return() {
    setup();

    let session = TestSession::new(Db::new());
    let shape = ResultSetMapping::new()
        .add_query_return(RootReturn::aliased("B", "Book"))
        .add_query_return(JoinReturn::new("A", "B", "AuthorId"));

    let outputs = session
        .hydrator()
        .hydrate_all(&mut session.raw("empty", Db::books()), &shape)
        .unwrap();

    assert_eq!(outputs.len(), 2);
    assert!(outputs.iter().all(Option::is_none));
}
