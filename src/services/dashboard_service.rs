//! Dashboard Service - Counters shown on the landing page

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};
use serde::Serialize;

use crate::domain::circulation::FineStatus;
use crate::domain::{CirculationRepository, DomainError, LoanWithDetails};
use crate::models::book::Entity as Book;
use crate::models::fine::{self, Entity as Fine};
use crate::models::member::Entity as Member;
use crate::models::transaction::{self, Entity as Transaction};

/// Number of transactions listed on the dashboard
pub const RECENT_TRANSACTIONS: u64 = 5;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardCounts {
    pub books: u64,
    pub members: u64,
    pub active_loans: u64,
    pub pending_fines: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub counts: DashboardCounts,
    pub recent_transactions: Vec<LoanWithDetails>,
}

/// Count open loans (no return date yet)
pub async fn count_active_loans(db: &DatabaseConnection) -> Result<u64, DomainError> {
    let count = Transaction::find()
        .filter(transaction::Column::ReturnDate.is_null())
        .count(db)
        .await?;
    Ok(count)
}

/// Sum of all unpaid fine amounts
pub async fn total_unpaid_fines(db: &DatabaseConnection) -> Result<i64, DomainError> {
    let fines = Fine::find()
        .filter(fine::Column::Status.eq(FineStatus::Unpaid.as_str()))
        .all(db)
        .await?;

    Ok(fines.iter().map(|f| f.amount).sum())
}

pub async fn load_dashboard(
    db: &DatabaseConnection,
    circulation: &dyn CirculationRepository,
) -> Result<Dashboard, DomainError> {
    let counts = DashboardCounts {
        books: Book::find().count(db).await?,
        members: Member::find().count(db).await?,
        active_loans: count_active_loans(db).await?,
        pending_fines: total_unpaid_fines(db).await?,
    };

    let recent_transactions = circulation
        .list_transactions(Some(RECENT_TRANSACTIONS))
        .await?;

    Ok(Dashboard {
        counts,
        recent_transactions,
    })
}
