//! SeaORM implementation of CatalogRepository

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityName,
    EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::domain::circulation::CopyStatus;
use crate::domain::{
    AvailableCopy, Book, BookCopies, CatalogRepository, Clock, Copy, DomainError, NewBookInput,
    UpdateBookInput,
};
use crate::models::{author, book, book_authors, category, copy, publisher};

/// Shelf used when a new book arrives without one
pub const DEFAULT_SHELF_LOCATION: &str = "General Shelf";

/// SeaORM-based implementation of CatalogRepository
pub struct SeaOrmCatalogRepository {
    db: DatabaseConnection,
    clock: Arc<dyn Clock>,
}

impl SeaOrmCatalogRepository {
    pub fn new(db: DatabaseConnection, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }
}

impl From<copy::Model> for Copy {
    fn from(model: copy::Model) -> Self {
        Self {
            id: model.id,
            book_id: model.book_id,
            status: model.status,
            shelf_location: model.shelf_location,
            purchase_date: model.purchase_date,
        }
    }
}

#[async_trait]
impl CatalogRepository for SeaOrmCatalogRepository {
    async fn list_books(&self) -> Result<Vec<Book>, DomainError> {
        let books = book::Entity::find()
            .order_by_asc(book::Column::Id)
            .all(&self.db)
            .await?;

        Ok(with_details(&self.db, books).await?)
    }

    async fn find_book(&self, id: i32) -> Result<Option<Book>, DomainError> {
        let Some(model) = book::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        Ok(with_details(&self.db, vec![model]).await?.pop())
    }

    async fn create_book(&self, input: NewBookInput) -> Result<Book, DomainError> {
        let today = self.clock.today();
        let txn = self.db.begin().await?;

        // Publisher -> Category -> Book -> Author -> Link -> Copy
        let publisher_id = lookup_id_for::<publisher::Entity, _>(&txn, &input.publisher).await?;
        let category_id = lookup_id_for::<category::Entity, _>(&txn, &input.category).await?;

        let new_book = book::ActiveModel {
            title: Set(input.title),
            isbn: Set(input.isbn),
            publication_date: Set(input.publication_date),
            category_id: Set(Some(category_id)),
            publisher_id: Set(Some(publisher_id)),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let author_id = lookup_id_for::<author::Entity, _>(&txn, &input.author).await?;
        book_authors::Entity::insert(book_authors::ActiveModel {
            book_id: Set(new_book.id),
            author_id: Set(author_id),
        })
        .exec_without_returning(&txn)
        .await?;

        let shelf = input
            .shelf_location
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SHELF_LOCATION.to_string());
        copy::ActiveModel {
            book_id: Set(new_book.id),
            status: Set(CopyStatus::Available.as_str().to_string()),
            shelf_location: Set(Some(shelf)),
            purchase_date: Set(today),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        tracing::info!("Catalogued book {} ({})", new_book.id, new_book.isbn);

        with_details(&self.db, vec![new_book])
            .await?
            .pop()
            .ok_or(DomainError::NotFound)
    }

    async fn update_book(&self, id: i32, input: UpdateBookInput) -> Result<Book, DomainError> {
        let existing = book::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active: book::ActiveModel = existing.into();
        active.title = Set(input.title);
        active.isbn = Set(input.isbn);
        active.publication_date = Set(input.publication_date);

        let result = active.update(&self.db).await?;

        with_details(&self.db, vec![result])
            .await?
            .pop()
            .ok_or(DomainError::NotFound)
    }

    async fn delete_book(&self, id: i32) -> Result<(), DomainError> {
        let result = book::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }

    async fn list_copies(&self, book_id: i32) -> Result<BookCopies, DomainError> {
        let book = book::Entity::find_by_id(book_id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let copies = copy::Entity::find()
            .filter(copy::Column::BookId.eq(book_id))
            .order_by_asc(copy::Column::Id)
            .all(&self.db)
            .await?;

        Ok(BookCopies {
            book_id,
            title: book.title,
            copies: copies.into_iter().map(Copy::from).collect(),
        })
    }

    async fn add_copy(
        &self,
        book_id: i32,
        shelf_location: Option<String>,
    ) -> Result<Copy, DomainError> {
        book::Entity::find_by_id(book_id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let result = copy::ActiveModel {
            book_id: Set(book_id),
            status: Set(CopyStatus::Available.as_str().to_string()),
            shelf_location: Set(shelf_location),
            purchase_date: Set(self.clock.today()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        Ok(Copy::from(result))
    }

    async fn delete_copy(&self, copy_id: i32) -> Result<i32, DomainError> {
        let existing = copy::Entity::find_by_id(copy_id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        // Loan history is guarded by the transactions foreign key only.
        copy::Entity::delete_by_id(copy_id).exec(&self.db).await?;

        Ok(existing.book_id)
    }

    async fn list_available_copies(&self) -> Result<Vec<AvailableCopy>, DomainError> {
        let copies = copy::Entity::find()
            .filter(copy::Column::Status.eq(CopyStatus::Available.as_str()))
            .order_by_asc(copy::Column::Id)
            .find_also_related(book::Entity)
            .all(&self.db)
            .await?;

        Ok(copies
            .into_iter()
            .map(|(copy, book)| AvailableCopy {
                copy_id: copy.id,
                title: book.map(|b| b.title).unwrap_or_else(|| "Unknown".to_string()),
                shelf_location: copy.shelf_location,
            })
            .collect())
    }
}

/// Attach publisher, category, author names and copy counts to book rows.
async fn with_details<C: ConnectionTrait>(
    conn: &C,
    books: Vec<book::Model>,
) -> Result<Vec<Book>, DbErr> {
    if books.is_empty() {
        return Ok(Vec::new());
    }

    let book_ids: Vec<i32> = books.iter().map(|b| b.id).collect();
    let publisher_ids: Vec<i32> = books.iter().filter_map(|b| b.publisher_id).collect();
    let category_ids: Vec<i32> = books.iter().filter_map(|b| b.category_id).collect();

    let publishers: HashMap<i32, String> = publisher::Entity::find()
        .filter(publisher::Column::Id.is_in(publisher_ids))
        .all(conn)
        .await?
        .into_iter()
        .map(|p| (p.id, p.name))
        .collect();

    let categories: HashMap<i32, String> = category::Entity::find()
        .filter(category::Column::Id.is_in(category_ids))
        .all(conn)
        .await?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();

    let links = book_authors::Entity::find()
        .filter(book_authors::Column::BookId.is_in(book_ids.clone()))
        .all(conn)
        .await?;
    let author_names: HashMap<i32, String> = author::Entity::find()
        .filter(author::Column::Id.is_in(links.iter().map(|l| l.author_id)))
        .all(conn)
        .await?
        .into_iter()
        .map(|a| (a.id, a.name))
        .collect();

    let mut authors_by_book: HashMap<i32, Vec<String>> = HashMap::new();
    for link in links {
        if let Some(name) = author_names.get(&link.author_id) {
            authors_by_book
                .entry(link.book_id)
                .or_default()
                .push(name.clone());
        }
    }

    let mut copies_by_book: HashMap<i32, u64> = HashMap::new();
    for copy in copy::Entity::find()
        .filter(copy::Column::BookId.is_in(book_ids))
        .all(conn)
        .await?
    {
        *copies_by_book.entry(copy.book_id).or_default() += 1;
    }

    Ok(books
        .into_iter()
        .map(|b| {
            let mut authors = authors_by_book.remove(&b.id).unwrap_or_default();
            authors.sort();
            Book {
                id: b.id,
                total_copies: copies_by_book.get(&b.id).copied().unwrap_or(0),
                publisher_name: b.publisher_id.and_then(|id| publishers.get(&id).cloned()),
                category_name: b.category_id.and_then(|id| categories.get(&id).cloned()),
                title: b.title,
                isbn: b.isbn,
                publication_date: b.publication_date,
                authors,
            }
        })
        .collect())
}

/// Lookup tables keyed by a unique `name`
trait NamedLookup: EntityTrait {
    type Row: ActiveModelTrait<Entity = Self> + Send;

    fn name_column() -> Self::Column;
    fn new_row(name: &str) -> Self::Row;
    fn row_id(model: &Self::Model) -> i32;
}

impl NamedLookup for publisher::Entity {
    type Row = publisher::ActiveModel;

    fn name_column() -> Self::Column {
        publisher::Column::Name
    }

    fn new_row(name: &str) -> Self::Row {
        publisher::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        }
    }

    fn row_id(model: &Self::Model) -> i32 {
        model.id
    }
}

impl NamedLookup for category::Entity {
    type Row = category::ActiveModel;

    fn name_column() -> Self::Column {
        category::Column::Name
    }

    fn new_row(name: &str) -> Self::Row {
        category::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        }
    }

    fn row_id(model: &Self::Model) -> i32 {
        model.id
    }
}

impl NamedLookup for author::Entity {
    type Row = author::ActiveModel;

    fn name_column() -> Self::Column {
        author::Column::Name
    }

    fn new_row(name: &str) -> Self::Row {
        author::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        }
    }

    fn row_id(model: &Self::Model) -> i32 {
        model.id
    }
}

/// Id of the row called `name`, inserting it when missing.
///
/// The insert is a no-op update on a name collision, so two writers adding the
/// same new name both end up reading the surviving row. The read back is a
/// locking read so it sees a row committed after this transaction's snapshot.
async fn lookup_id_for<E, C>(conn: &C, name: &str) -> Result<i32, DbErr>
where
    E: NamedLookup,
    E::Model: IntoActiveModel<E::Row>,
    C: ConnectionTrait,
{
    E::insert(E::new_row(name))
        .on_conflict(
            OnConflict::column(E::name_column())
                .update_column(E::name_column())
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    E::find()
        .filter(E::name_column().eq(name))
        .lock_shared()
        .one(conn)
        .await?
        .map(|row| E::row_id(&row))
        .ok_or_else(|| DbErr::RecordNotFound(format!("{} '{}'", E::default().table_name(), name)))
}
