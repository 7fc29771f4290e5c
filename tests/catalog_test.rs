use std::sync::Arc;

use chrono::NaiveDate;
use libradesk::config::Config;
use libradesk::db;
use libradesk::domain::{
    DomainError, IssueInput, MemberInput, NewBookInput, NewStaffInput, UpdateBookInput,
};
use libradesk::infrastructure::AppState;
use libradesk::infrastructure::clock::FixedClock;
use libradesk::models::{author, book, book_authors, copy, publisher};
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 2).unwrap()
}

async fn setup_state() -> AppState {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    AppState::with_clock(db, &Config::default(), Arc::new(FixedClock(today())))
}

fn new_book(title: &str, isbn: &str, author: &str, publisher: &str) -> NewBookInput {
    NewBookInput {
        title: title.to_string(),
        isbn: isbn.to_string(),
        publication_date: NaiveDate::from_ymd_opt(1965, 8, 1),
        category: "Science Fiction".to_string(),
        publisher: publisher.to_string(),
        author: author.to_string(),
        shelf_location: None,
    }
}

#[tokio::test]
async fn test_create_book_links_author_and_first_copy() {
    let state = setup_state().await;

    let book = state
        .catalog
        .create_book(new_book("Dune", "9780441172719", "Frank Herbert", "Ace"))
        .await
        .unwrap();

    assert_eq!(book.title, "Dune");
    assert_eq!(book.authors, vec!["Frank Herbert".to_string()]);
    assert_eq!(book.publisher_name.as_deref(), Some("Ace"));
    assert_eq!(book.category_name.as_deref(), Some("Science Fiction"));
    assert_eq!(book.total_copies, 1);

    let copies = state.catalog.list_copies(book.id).await.unwrap();
    assert_eq!(copies.title, "Dune");
    assert_eq!(copies.copies.len(), 1);
    assert_eq!(copies.copies[0].status, "Available");
    assert_eq!(copies.copies[0].shelf_location.as_deref(), Some("General Shelf"));
    assert_eq!(copies.copies[0].purchase_date, today());
}

#[tokio::test]
async fn test_lookup_rows_are_reused_by_name() {
    let state = setup_state().await;

    state
        .catalog
        .create_book(new_book("Dune", "9780441172719", "Frank Herbert", "Ace"))
        .await
        .unwrap();
    state
        .catalog
        .create_book(new_book("Dune Messiah", "9780441172696", "Frank Herbert", "Ace"))
        .await
        .unwrap();

    let db = state.db();
    assert_eq!(author::Entity::find().count(db).await.unwrap(), 1);
    assert_eq!(publisher::Entity::find().count(db).await.unwrap(), 1);
    assert_eq!(state.catalog.list_books().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_concurrent_books_share_new_lookup_rows() {
    let state = setup_state().await;

    // Different ISBNs, same publisher/category/author not yet in the store
    let (first, second) = tokio::join!(
        state
            .catalog
            .create_book(new_book("Dune", "9780441172719", "Frank Herbert", "Ace")),
        state
            .catalog
            .create_book(new_book("Dune Messiah", "9780441172696", "Frank Herbert", "Ace")),
    );
    let first = first.unwrap();
    let second = second.unwrap();

    assert_eq!(first.publisher_name.as_deref(), Some("Ace"));
    assert_eq!(second.publisher_name.as_deref(), Some("Ace"));
    assert_eq!(second.authors, vec!["Frank Herbert".to_string()]);

    let db = state.db();
    assert_eq!(publisher::Entity::find().count(db).await.unwrap(), 1);
    assert_eq!(author::Entity::find().count(db).await.unwrap(), 1);
    assert_eq!(book_authors::Entity::find().count(db).await.unwrap(), 2);
}

#[tokio::test]
async fn test_existing_lookup_row_keeps_its_id() {
    let state = setup_state().await;

    let ace = publisher::ActiveModel {
        name: Set("Ace".to_string()),
        ..Default::default()
    }
    .insert(state.db())
    .await
    .unwrap();

    state
        .catalog
        .create_book(new_book("Dune", "9780441172719", "Frank Herbert", "Ace"))
        .await
        .unwrap();

    let stored = book::Entity::find().one(state.db()).await.unwrap().unwrap();
    assert_eq!(stored.publisher_id, Some(ace.id));
    assert_eq!(publisher::Entity::find().count(state.db()).await.unwrap(), 1);
}

#[tokio::test]
async fn test_duplicate_isbn_leaves_catalog_untouched() {
    let state = setup_state().await;

    state
        .catalog
        .create_book(new_book("Dune", "9780441172719", "Frank Herbert", "Ace"))
        .await
        .unwrap();

    let result = state
        .catalog
        .create_book(new_book(
            "Dune (reprint)",
            "9780441172719",
            "Someone Else",
            "Other House",
        ))
        .await;
    assert!(matches!(
        result,
        Err(DomainError::UniqueConstraintViolation(_))
    ));

    let db = state.db();
    assert_eq!(book::Entity::find().count(db).await.unwrap(), 1);
    assert_eq!(book_authors::Entity::find().count(db).await.unwrap(), 1);
    assert_eq!(copy::Entity::find().count(db).await.unwrap(), 1);
    // The publisher and author upserted before the failure are rolled back too
    assert_eq!(publisher::Entity::find().count(db).await.unwrap(), 1);
    assert_eq!(author::Entity::find().count(db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_update_book() {
    let state = setup_state().await;

    let dune = state
        .catalog
        .create_book(new_book("Dune", "9780441172719", "Frank Herbert", "Ace"))
        .await
        .unwrap();
    state
        .catalog
        .create_book(new_book("Dune Messiah", "9780441172696", "Frank Herbert", "Ace"))
        .await
        .unwrap();

    let updated = state
        .catalog
        .update_book(
            dune.id,
            UpdateBookInput {
                title: "Dune (40th anniversary)".to_string(),
                isbn: "9780441013593".to_string(),
                publication_date: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "Dune (40th anniversary)");
    assert_eq!(updated.publication_date, None);
    assert_eq!(updated.authors, vec!["Frank Herbert".to_string()]);

    let clash = state
        .catalog
        .update_book(
            dune.id,
            UpdateBookInput {
                title: "Dune".to_string(),
                isbn: "9780441172696".to_string(),
                publication_date: None,
            },
        )
        .await;
    assert!(matches!(clash, Err(DomainError::UniqueConstraintViolation(_))));

    let missing = state
        .catalog
        .update_book(
            999,
            UpdateBookInput {
                title: "Ghost".to_string(),
                isbn: "0".to_string(),
                publication_date: None,
            },
        )
        .await;
    assert!(matches!(missing, Err(DomainError::NotFound)));
}

#[tokio::test]
async fn test_add_and_delete_copies() {
    let state = setup_state().await;

    let book = state
        .catalog
        .create_book(new_book("Dune", "9780441172719", "Frank Herbert", "Ace"))
        .await
        .unwrap();

    let extra = state
        .catalog
        .add_copy(book.id, Some("B2".to_string()))
        .await
        .unwrap();
    assert_eq!(extra.status, "Available");
    assert_eq!(state.catalog.list_copies(book.id).await.unwrap().copies.len(), 2);
    assert_eq!(state.catalog.list_available_copies().await.unwrap().len(), 2);

    let book_id = state.catalog.delete_copy(extra.id).await.unwrap();
    assert_eq!(book_id, book.id);
    assert_eq!(state.catalog.list_copies(book.id).await.unwrap().copies.len(), 1);

    assert!(matches!(
        state.catalog.add_copy(999, None).await,
        Err(DomainError::NotFound)
    ));
    assert!(matches!(
        state.catalog.delete_copy(extra.id).await,
        Err(DomainError::NotFound)
    ));
}

#[tokio::test]
async fn test_delete_book_cascades_to_copies_and_links() {
    let state = setup_state().await;

    let book = state
        .catalog
        .create_book(new_book("Dune", "9780441172719", "Frank Herbert", "Ace"))
        .await
        .unwrap();
    state.catalog.add_copy(book.id, None).await.unwrap();

    state.catalog.delete_book(book.id).await.unwrap();

    let db = state.db();
    assert_eq!(book::Entity::find().count(db).await.unwrap(), 0);
    assert_eq!(book_authors::Entity::find().count(db).await.unwrap(), 0);
    assert_eq!(copy::Entity::find().count(db).await.unwrap(), 0);
    // Lookup rows outlive the book
    assert_eq!(author::Entity::find().count(db).await.unwrap(), 1);

    assert!(matches!(
        state.catalog.delete_book(book.id).await,
        Err(DomainError::NotFound)
    ));
    assert!(state.catalog.find_book(book.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_copy_with_loan_history_cannot_be_deleted() {
    let state = setup_state().await;

    let book = state
        .catalog
        .create_book(new_book("Dune", "9780441172719", "Frank Herbert", "Ace"))
        .await
        .unwrap();
    let copy_id = state.catalog.list_copies(book.id).await.unwrap().copies[0].id;

    state
        .membership
        .create_staff(NewStaffInput {
            name: "Desk".to_string(),
            username: "desk".to_string(),
            password: "secret".to_string(),
            role: "librarian".to_string(),
        })
        .await
        .unwrap();
    let member = state
        .membership
        .create_member(MemberInput {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            phone: "555-0101".to_string(),
            address: None,
            membership_type: "Annual".to_string(),
        })
        .await
        .unwrap();
    let loan = state
        .circulation
        .issue(IssueInput {
            member_id: member.id,
            copy_id,
            staff_id: 1,
            due_date: NaiveDate::from_ymd_opt(2024, 5, 16).unwrap(),
        })
        .await
        .unwrap();
    state.circulation.return_copy(loan.id).await.unwrap();

    let result = state.catalog.delete_copy(copy_id).await;
    assert!(matches!(
        result,
        Err(DomainError::ReferentialConstraintViolation(_))
    ));

    // Deleting the book would cascade into the same copy
    let result = state.catalog.delete_book(book.id).await;
    assert!(matches!(
        result,
        Err(DomainError::ReferentialConstraintViolation(_))
    ));
    assert_eq!(state.catalog.list_copies(book.id).await.unwrap().copies.len(), 1);
}
