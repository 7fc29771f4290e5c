//! Demo data for a fresh install (`SEED_DEMO`)

use chrono::Days;

use crate::domain::{DomainError, IssueInput, MemberInput, NewBookInput, NewStaffInput};
use crate::infrastructure::AppState;

struct DemoBook {
    title: &'static str,
    isbn: &'static str,
    author: &'static str,
    publisher: &'static str,
    category: &'static str,
    shelf: &'static str,
}

const DEMO_BOOKS: &[DemoBook] = &[
    DemoBook {
        title: "The Rust Programming Language",
        isbn: "9781718503106",
        author: "Steve Klabnik",
        publisher: "No Starch Press",
        category: "Programming",
        shelf: "A1",
    },
    DemoBook {
        title: "Dune",
        isbn: "9780441172719",
        author: "Frank Herbert",
        publisher: "Ace",
        category: "Science Fiction",
        shelf: "C3",
    },
    DemoBook {
        title: "The Left Hand of Darkness",
        isbn: "9780441478125",
        author: "Ursula K. Le Guin",
        publisher: "Ace",
        category: "Science Fiction",
        shelf: "C3",
    },
];

/// Seed a desk account, a few books and members, and one open loan.
///
/// Only runs against an empty catalog so restarts with `SEED_DEMO` set are harmless.
pub async fn seed_demo_data(state: &AppState) -> Result<(), DomainError> {
    if !state.catalog.list_books().await?.is_empty() {
        tracing::info!("Catalog not empty, skipping demo data");
        return Ok(());
    }

    let admin = state
        .membership
        .create_staff(NewStaffInput {
            name: "Administrator".to_string(),
            username: "admin".to_string(),
            password: "admin".to_string(),
            role: "admin".to_string(),
        })
        .await?;

    let mut first_copy = None;
    for demo in DEMO_BOOKS {
        let book = state
            .catalog
            .create_book(NewBookInput {
                title: demo.title.to_string(),
                isbn: demo.isbn.to_string(),
                publication_date: None,
                category: demo.category.to_string(),
                publisher: demo.publisher.to_string(),
                author: demo.author.to_string(),
                shelf_location: Some(demo.shelf.to_string()),
            })
            .await?;

        let copies = state.catalog.list_copies(book.id).await?;
        if first_copy.is_none() {
            first_copy = copies.copies.first().map(|c| c.id);
        }
    }

    let alice = state
        .membership
        .create_member(MemberInput {
            name: "Alice Martin".to_string(),
            email: "alice@example.com".to_string(),
            phone: "555-0101".to_string(),
            address: Some("12 Library Lane".to_string()),
            membership_type: "Annual".to_string(),
        })
        .await?;
    state
        .membership
        .create_member(MemberInput {
            name: "Bob Chen".to_string(),
            email: "bob@example.com".to_string(),
            phone: "555-0102".to_string(),
            address: None,
            membership_type: "Monthly".to_string(),
        })
        .await?;

    if let Some(copy_id) = first_copy {
        let due_date = state
            .clock
            .today()
            .checked_add_days(Days::new(14))
            .ok_or_else(|| DomainError::Internal("due date out of range".to_string()))?;
        state
            .circulation
            .issue(IssueInput {
                member_id: alice.id,
                copy_id,
                staff_id: admin.id,
                due_date,
            })
            .await?;
    }

    Ok(())
}
