use pretty_assertions::assert_eq;
use std::sync::Arc;
use tests::prelude::*;

#[derive(Debug, Default)]
struct Publisher {
    id: i64,
    name: String,
    owner: HasOne<Author>,
}

fn publisher_mapping() -> EntityMapping {
    let mut mapping = EntityMapping::new::<Publisher>(
        "Publisher",
        PrimaryKey::new("Id", |publisher: &mut Publisher| &mut publisher.id),
    )
    .unwrap();

    mapping
        .add_column(Column::new("Name", |publisher: &mut Publisher| {
            &mut publisher.name
        }))
        .unwrap();
    mapping
        .add_column(Column::read_only::<Publisher>("Revenue"))
        .unwrap();
    mapping
        .add_relation(OneToOne::read_only::<Publisher, Author>("OwnerId"))
        .unwrap();

    mapping
}

fn hydrator(catalog: Catalog) -> Hydrator {
    Hydrator::builder()
        .metadata(Arc::new(catalog))
        .build()
        .unwrap()
}

#[test]
fn duplicate_column_is_rejected() {
    let mut mapping = publisher_mapping();

    let err = assert_err!(mapping.add_column(Column::new("Name", |publisher: &mut Publisher| {
        &mut publisher.name
    })));

    assert!(err.is_duplicate_binding());
    assert_eq!(
        err.to_string(),
        "entity mapping `Publisher` already contains a column named `Name`"
    );

    // The mapping is unchanged and still usable.
    assert_eq!(mapping.columns().len(), 2);
    let catalog = Catalog::builder().insert(mapping).build().unwrap();
    assert_eq!(catalog.len(), 1);
}

#[test]
fn read_only_bindings_are_skipped() {
    setup();

    let hydrator = hydrator(Catalog::builder().insert(publisher_mapping()).build().unwrap());

    // Neither `Revenue` nor `OwnerId` is present.
    let mut rows = ResultSet::new(["Id", "Name"]).row([Value::from(3_i64), "Acme".into()]);
    let shape = ResultSetMapping::new().add_query_return(RootReturn::new("Publisher"));

    let publisher = hydrator
        .hydrate(&mut rows, &shape)
        .unwrap()
        .unwrap()
        .downcast::<Publisher>()
        .unwrap();

    let publisher = publisher.get().unwrap();
    assert_eq!(publisher.id, 3);
    assert_eq!(publisher.name, "Acme");
    assert!(publisher.owner.is_none());
}

#[test]
fn lookups_by_name_and_type_agree() {
    let catalog = tests::models::catalog().unwrap();

    let by_name = catalog.mapping("Book").unwrap();
    let by_type = catalog.mapping_for(&EntityType::of::<Book>()).unwrap();

    assert!(Arc::ptr_eq(&by_name, &by_type));
    assert_eq!(by_name.primary_key().column(), "Id");
    assert_eq!(
        by_name.relation("AuthorId").unwrap().reference(),
        EntityType::of::<Author>()
    );
    assert!(assert_err!(catalog.mapping("Publisher")).is_not_found());
}

#[test]
fn registering_twice_is_rejected() {
    let err = Catalog::builder()
        .register::<Author>()
        .insert(Author::mapping().unwrap())
        .build()
        .unwrap_err();

    assert!(err.is_invalid_argument());
}

#[test]
fn property_mappings_rename_columns() {
    setup();

    let session = TestSession::new(Db::new());
    let rows = ResultSet::new(["Id", "given_name", "FirstName", "MiddleName", "LastName"]).row([
        Value::from(1),
        "Ada".into(),
        "ignored".into(),
        Value::Null,
        "Lovelace".into(),
    ]);

    let shape = ResultSetMapping::new().add_query_return(
        RootReturn::new("Author").with_property_mappings(PropertyMappings::from([(
            "FirstName".to_string(),
            vec!["given_name".to_string()],
        )])),
    );

    let author = session
        .hydrator()
        .hydrate(&mut session.raw("renamed", rows), &shape)
        .unwrap()
        .unwrap()
        .downcast::<Author>()
        .unwrap();

    assert_eq!(author.get().unwrap().first_name.as_deref(), Some("Ada"));
}

#[test]
fn property_mapping_source_must_exist() {
    setup();

    let session = TestSession::new(Db::new());
    let shape = ResultSetMapping::new().add_query_return(
        RootReturn::new("Author").with_property_mappings(PropertyMappings::from([(
            "FirstName".to_string(),
            vec!["given_name".to_string()],
        )])),
    );

    let rows = Db::authors().row([Value::from(1), "Ada".into(), Value::Null, Value::Null]);
    let err = assert_err!(session
        .hydrator()
        .hydrate(&mut session.raw("renamed", rows), &shape));

    assert!(err.is_missing_column());
}

#[test]
fn missing_declared_column() {
    setup();

    let session = TestSession::new(Db::new());
    let rows = ResultSet::new(["Id", "Title", "AuthorId"]).row([
        Value::from(10),
        "Notes".into(),
        Value::Null,
    ]);

    let err = assert_err!(session
        .hydrator()
        .hydrate_one::<Book>(&mut session.raw("narrow", rows)));

    assert!(err.is_missing_column());
    assert_eq!(
        err.to_string(),
        "missing column `Description` for entity `Book`"
    );
}

#[test]
fn value_of_wrong_type() {
    setup();

    let session = TestSession::new(Db::new());
    let rows = Db::books().row([Value::from(10), Value::from(7), Value::Null, Value::Null]);

    let err = assert_err!(session
        .hydrator()
        .hydrate_one::<Book>(&mut session.raw("typed", rows)));

    assert!(err.is_type_conversion());
    assert_eq!(err.to_string(), "cannot convert I32 to String");
}
