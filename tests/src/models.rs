use hydra::{
    schema::{Catalog, Column, EntityMapping, OneToOne, PrimaryKey},
    HasOne, Model, Result,
};

#[derive(Debug, Default)]
pub struct Author {
    pub id: i32,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Default)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub author: HasOne<Author>,
}

impl Model for Author {
    fn mapping() -> Result<EntityMapping> {
        let mut mapping = EntityMapping::new::<Author>(
            "Author",
            PrimaryKey::new("Id", |author: &mut Author| &mut author.id),
        )?;

        mapping.add_column(Column::new("FirstName", |author: &mut Author| {
            &mut author.first_name
        }))?;
        mapping.add_column(Column::new("MiddleName", |author: &mut Author| {
            &mut author.middle_name
        }))?;
        mapping.add_column(Column::new("LastName", |author: &mut Author| {
            &mut author.last_name
        }))?;

        Ok(mapping)
    }
}

impl Model for Book {
    fn mapping() -> Result<EntityMapping> {
        let mut mapping = EntityMapping::new::<Book>(
            "Book",
            PrimaryKey::new("Id", |book: &mut Book| &mut book.id),
        )?;

        mapping.add_column(Column::new("Title", |book: &mut Book| &mut book.title))?;
        mapping.add_column(Column::new("Description", |book: &mut Book| {
            &mut book.description
        }))?;
        mapping.add_relation(OneToOne::new("AuthorId", |book: &mut Book| &mut book.author))?;

        Ok(mapping)
    }
}

/// A catalog holding [`Author`] and [`Book`].
pub fn catalog() -> Result<Catalog> {
    Catalog::builder()
        .register::<Author>()
        .register::<Book>()
        .build()
}
