pub mod books;
pub mod copy;
pub mod dashboard;
pub mod error;
pub mod fine;
pub mod health;
pub mod loan;
pub mod member;
pub mod staff;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::infrastructure::AppState;

pub fn api_router_with_state(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Dashboard
        .route("/dashboard", get(dashboard::get_dashboard))
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        // Copies
        .route(
            "/books/:id/copies",
            get(copy::get_book_copies).post(copy::add_copy),
        )
        .route("/copies/:id", delete(copy::delete_copy))
        // Members
        .route(
            "/members",
            get(member::list_members).post(member::create_member),
        )
        .route(
            "/members/:id",
            get(member::get_member)
                .put(member::update_member)
                .delete(member::delete_member),
        )
        // Staff
        .route("/staff", get(staff::list_staff).post(staff::create_staff))
        .route("/staff/:id", delete(staff::delete_staff))
        // Circulation
        .route(
            "/transactions",
            get(loan::list_transactions).post(loan::issue_copy),
        )
        .route("/transactions/issue-options", get(loan::issue_options))
        .route("/transactions/:id/return", post(loan::return_copy))
        // Fines
        .route("/fines", get(fine::list_fines))
        .route("/fines/:id/pay", post(fine::pay_fine))
        .with_state(state)
}
