//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::DomainError;

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Book data for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub isbn: String,
    pub publication_date: Option<NaiveDate>,
    pub publisher_name: Option<String>,
    pub category_name: Option<String>,
    pub authors: Vec<String>,
    pub total_copies: u64,
}

/// Input for the create-book chain
#[derive(Debug, Clone, Deserialize)]
pub struct NewBookInput {
    pub title: String,
    pub isbn: String,
    pub publication_date: Option<NaiveDate>,
    pub category: String,
    pub publisher: String,
    pub author: String,
    pub shelf_location: Option<String>,
}

/// Input for editing a book
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBookInput {
    pub title: String,
    pub isbn: String,
    pub publication_date: Option<NaiveDate>,
}

/// Copy data for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Copy {
    pub id: i32,
    pub book_id: i32,
    pub status: String,
    pub shelf_location: Option<String>,
    pub purchase_date: NaiveDate,
}

/// All copies of one book
#[derive(Debug, Clone, Serialize)]
pub struct BookCopies {
    pub book_id: i32,
    pub title: String,
    pub copies: Vec<Copy>,
}

/// A copy that can be offered on the issue form
#[derive(Debug, Clone, Serialize)]
pub struct AvailableCopy {
    pub copy_id: i32,
    pub title: String,
    pub shelf_location: Option<String>,
}

/// Repository trait for books, copies and their lookup tables
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Find all books with publisher, category, authors and copy count
    async fn list_books(&self) -> Result<Vec<Book>, DomainError>;

    /// Find a single book by ID
    async fn find_book(&self, id: i32) -> Result<Option<Book>, DomainError>;

    /// Upsert publisher/category/author, insert the book and its first copy
    async fn create_book(&self, input: NewBookInput) -> Result<Book, DomainError>;

    /// Update title, ISBN and publication date
    async fn update_book(&self, id: i32, input: UpdateBookInput) -> Result<Book, DomainError>;

    /// Delete a book (cascades to links and copies)
    async fn delete_book(&self, id: i32) -> Result<(), DomainError>;

    /// Find copies for a specific book
    async fn list_copies(&self, book_id: i32) -> Result<BookCopies, DomainError>;

    /// Add an `Available` copy purchased today
    async fn add_copy(
        &self,
        book_id: i32,
        shelf_location: Option<String>,
    ) -> Result<Copy, DomainError>;

    /// Delete a copy, returning the ID of the book it belonged to
    async fn delete_copy(&self, copy_id: i32) -> Result<i32, DomainError>;

    /// Copies currently on the shelf
    async fn list_available_copies(&self) -> Result<Vec<AvailableCopy>, DomainError>;
}

// ---------------------------------------------------------------------------
// Membership
// ---------------------------------------------------------------------------

/// Member data for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    pub join_date: NaiveDate,
    pub membership_type: String,
    pub membership_expiry_date: Option<NaiveDate>,
}

/// Input for creating or editing a member
#[derive(Debug, Clone, Deserialize)]
pub struct MemberInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    pub membership_type: String,
}

/// Staff data for API responses (no credential)
#[derive(Debug, Clone, Serialize)]
pub struct Staff {
    pub id: i32,
    pub name: String,
    pub username: String,
    pub role: String,
}

/// Input for creating a staff account
#[derive(Debug, Clone, Deserialize)]
pub struct NewStaffInput {
    pub name: String,
    pub username: String,
    pub password: String,
    pub role: String,
}

/// Repository trait for members and staff
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    async fn list_members(&self) -> Result<Vec<Member>, DomainError>;

    async fn find_member(&self, id: i32) -> Result<Option<Member>, DomainError>;

    /// Create a member joining today; expiry follows the membership type
    async fn create_member(&self, input: MemberInput) -> Result<Member, DomainError>;

    /// Replace the editable fields; the expiry date is left as it was
    async fn update_member(&self, id: i32, input: MemberInput) -> Result<Member, DomainError>;

    async fn delete_member(&self, id: i32) -> Result<(), DomainError>;

    async fn list_staff(&self) -> Result<Vec<Staff>, DomainError>;

    /// Create a staff account, hashing the password
    async fn create_staff(&self, input: NewStaffInput) -> Result<Staff, DomainError>;

    async fn delete_staff(&self, id: i32) -> Result<(), DomainError>;
}

// ---------------------------------------------------------------------------
// Circulation
// ---------------------------------------------------------------------------

/// Input for issuing a copy
#[derive(Debug, Clone)]
pub struct IssueInput {
    pub member_id: i32,
    pub copy_id: i32,
    pub staff_id: i32,
    pub due_date: NaiveDate,
}

/// Transaction (loan) record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    pub id: i32,
    pub copy_id: i32,
    pub member_id: i32,
    pub staff_id: i32,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
}

impl Loan {
    pub fn is_open(&self) -> bool {
        self.return_date.is_none()
    }
}

/// Transaction enriched with member name and book title
#[derive(Debug, Clone, Serialize)]
pub struct LoanWithDetails {
    pub id: i32,
    pub copy_id: i32,
    pub member_name: String,
    pub book_title: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
}

/// Fine record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fine {
    pub id: i32,
    pub transaction_id: i32,
    pub amount: i64,
    pub fine_date: NaiveDate,
    pub status: String,
}

/// Fine enriched with member name and book title
#[derive(Debug, Clone, Serialize)]
pub struct FineWithDetails {
    pub id: i32,
    pub amount: i64,
    pub fine_date: NaiveDate,
    pub status: String,
    pub member_name: String,
    pub book_title: String,
}

/// Result of closing a loan
#[derive(Debug, Clone, Serialize)]
pub struct ReturnOutcome {
    pub loan: Loan,
    /// Fine created for a late return, if any
    pub fine: Option<Fine>,
    /// Set when the return was late but the fine could not be recorded
    pub fine_failed: bool,
}

/// Repository trait for the issue/return/fine lifecycle
#[async_trait]
pub trait CirculationRepository: Send + Sync {
    /// Newest first; `limit` caps the number of rows
    async fn list_transactions(&self, limit: Option<u64>)
    -> Result<Vec<LoanWithDetails>, DomainError>;

    /// Move an `Available` copy to `On Loan` and open a transaction
    async fn issue(&self, input: IssueInput) -> Result<Loan, DomainError>;

    /// Close an open transaction, charging a fine when late
    async fn return_copy(&self, transaction_id: i32) -> Result<ReturnOutcome, DomainError>;

    /// Newest first
    async fn list_fines(&self) -> Result<Vec<FineWithDetails>, DomainError>;

    /// Mark a fine paid (no check of its previous status)
    async fn pay_fine(&self, fine_id: i32) -> Result<Fine, DomainError>;
}
