//! SeaORM implementation of CirculationRepository
//!
//! Issue and return each run in one store transaction. Issue claims the copy
//! with a compare-and-set on its status, so two concurrent issues of the same
//! copy cannot both succeed.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::domain::circulation::{CopyStatus, FineStatus, fine_amount};
use crate::domain::{
    CirculationRepository, Clock, DomainError, Fine, FineWithDetails, IssueInput, Loan,
    LoanWithDetails, ReturnOutcome,
};
use crate::models::{book, copy, fine, member, transaction};

/// SeaORM-based implementation of CirculationRepository
pub struct SeaOrmCirculationRepository {
    db: DatabaseConnection,
    clock: Arc<dyn Clock>,
    fine_rate_per_day: i64,
}

impl SeaOrmCirculationRepository {
    pub fn new(db: DatabaseConnection, clock: Arc<dyn Clock>, fine_rate_per_day: i64) -> Self {
        Self {
            db,
            clock,
            fine_rate_per_day,
        }
    }
}

impl From<transaction::Model> for Loan {
    fn from(model: transaction::Model) -> Self {
        Self {
            id: model.id,
            copy_id: model.copy_id,
            member_id: model.member_id,
            staff_id: model.staff_id,
            issue_date: model.issue_date,
            due_date: model.due_date,
            return_date: model.return_date,
        }
    }
}

impl From<fine::Model> for Fine {
    fn from(model: fine::Model) -> Self {
        Self {
            id: model.id,
            transaction_id: model.transaction_id,
            amount: model.amount,
            fine_date: model.fine_date,
            status: model.status,
        }
    }
}

#[async_trait]
impl CirculationRepository for SeaOrmCirculationRepository {
    async fn list_transactions(
        &self,
        limit: Option<u64>,
    ) -> Result<Vec<LoanWithDetails>, DomainError> {
        let mut query = transaction::Entity::find()
            .order_by_desc(transaction::Column::Id)
            .find_also_related(member::Entity);
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        let loans_with_members = query.all(&self.db).await?;

        let copy_ids: Vec<i32> = loans_with_members.iter().map(|(l, _)| l.copy_id).collect();
        let titles = titles_by_copy(&self.db, copy_ids).await?;

        Ok(loans_with_members
            .into_iter()
            .map(|(loan, member)| LoanWithDetails {
                id: loan.id,
                copy_id: loan.copy_id,
                member_name: member
                    .map(|m| m.name)
                    .unwrap_or_else(|| "Unknown".to_string()),
                book_title: titles
                    .get(&loan.copy_id)
                    .cloned()
                    .unwrap_or_else(|| "Unknown".to_string()),
                issue_date: loan.issue_date,
                due_date: loan.due_date,
                return_date: loan.return_date,
            })
            .collect())
    }

    async fn issue(&self, input: IssueInput) -> Result<Loan, DomainError> {
        let today = self.clock.today();
        let txn = self.db.begin().await?;

        // 1. Claim the copy: Available -> On Loan
        let claimed = copy::Entity::update_many()
            .col_expr(copy::Column::Status, Expr::value(CopyStatus::OnLoan.as_str()))
            .filter(copy::Column::Id.eq(input.copy_id))
            .filter(copy::Column::Status.eq(CopyStatus::Available.as_str()))
            .exec(&txn)
            .await?;

        if claimed.rows_affected == 0 {
            let exists = copy::Entity::find_by_id(input.copy_id)
                .one(&txn)
                .await?
                .is_some();
            if !exists {
                return Err(DomainError::NotFound);
            }
            tracing::warn!("Refused to issue copy {}: not available", input.copy_id);
            return Err(DomainError::CopyUnavailable(input.copy_id));
        }

        // 2. Open the transaction
        let loan = transaction::ActiveModel {
            copy_id: Set(input.copy_id),
            member_id: Set(input.member_id),
            staff_id: Set(input.staff_id),
            issue_date: Set(today),
            due_date: Set(input.due_date),
            return_date: Set(None),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        tracing::info!(
            "Issued copy {} to member {} (transaction {}, due {})",
            loan.copy_id,
            loan.member_id,
            loan.id,
            loan.due_date
        );

        Ok(Loan::from(loan))
    }

    async fn return_copy(&self, transaction_id: i32) -> Result<ReturnOutcome, DomainError> {
        let today = self.clock.today();
        let txn = self.db.begin().await?;

        // 1. Find the open transaction
        let loan = transaction::Entity::find_by_id(transaction_id)
            .one(&txn)
            .await?
            .ok_or(DomainError::NotFound)?;

        if loan.return_date.is_some() {
            return Err(DomainError::LoanAlreadyClosed(transaction_id));
        }

        // 2. Close it
        let due_date = loan.due_date;
        let copy_id = loan.copy_id;
        let mut loan_active: transaction::ActiveModel = loan.into();
        loan_active.return_date = Set(Some(today));
        let loan = loan_active.update(&txn).await?;

        // 3. Put the copy back on the shelf
        copy::Entity::update_many()
            .col_expr(
                copy::Column::Status,
                Expr::value(CopyStatus::Available.as_str()),
            )
            .filter(copy::Column::Id.eq(copy_id))
            .exec(&txn)
            .await?;

        // 4. Charge the fine. A failed insert only rolls back its savepoint;
        // the return itself still commits and the debt goes unrecorded.
        let mut fine = None;
        let mut fine_failed = false;
        if let Some(amount) = fine_amount(due_date, today, self.fine_rate_per_day) {
            match record_fine(&txn, transaction_id, amount, today).await {
                Ok(created) => fine = Some(Fine::from(created)),
                Err(e) => {
                    tracing::error!(
                        "Fine of {} for transaction {} was not recorded: {}",
                        amount,
                        transaction_id,
                        e
                    );
                    fine_failed = true;
                }
            }
        }

        txn.commit().await?;
        tracing::info!(
            "Returned copy {} (transaction {}, fine {:?})",
            copy_id,
            transaction_id,
            fine.as_ref().map(|f| f.amount)
        );

        Ok(ReturnOutcome {
            loan: Loan::from(loan),
            fine,
            fine_failed,
        })
    }

    async fn list_fines(&self) -> Result<Vec<FineWithDetails>, DomainError> {
        let fines_with_loans = fine::Entity::find()
            .order_by_desc(fine::Column::Id)
            .find_also_related(transaction::Entity)
            .all(&self.db)
            .await?;

        let loans: Vec<&transaction::Model> =
            fines_with_loans.iter().filter_map(|(_, l)| l.as_ref()).collect();
        let titles = titles_by_copy(&self.db, loans.iter().map(|l| l.copy_id).collect()).await?;
        let names = names_by_member(&self.db, loans.iter().map(|l| l.member_id).collect()).await?;

        Ok(fines_with_loans
            .into_iter()
            .map(|(fine, loan)| {
                let member_name = loan
                    .as_ref()
                    .and_then(|l| names.get(&l.member_id).cloned())
                    .unwrap_or_else(|| "Unknown".to_string());
                let book_title = loan
                    .as_ref()
                    .and_then(|l| titles.get(&l.copy_id).cloned())
                    .unwrap_or_else(|| "Unknown".to_string());

                FineWithDetails {
                    id: fine.id,
                    amount: fine.amount,
                    fine_date: fine.fine_date,
                    status: fine.status,
                    member_name,
                    book_title,
                }
            })
            .collect())
    }

    async fn pay_fine(&self, fine_id: i32) -> Result<Fine, DomainError> {
        fine::Entity::update_many()
            .col_expr(fine::Column::Status, Expr::value(FineStatus::Paid.as_str()))
            .filter(fine::Column::Id.eq(fine_id))
            .exec(&self.db)
            .await?;

        let fine = fine::Entity::find_by_id(fine_id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        tracing::info!("Fine {} marked paid ({})", fine.id, fine.amount);
        Ok(Fine::from(fine))
    }
}

async fn record_fine(
    txn: &DatabaseTransaction,
    transaction_id: i32,
    amount: i64,
    today: NaiveDate,
) -> Result<fine::Model, DbErr> {
    let savepoint = txn.begin().await?;

    let created = fine::ActiveModel {
        transaction_id: Set(transaction_id),
        amount: Set(amount),
        fine_date: Set(today),
        status: Set(FineStatus::Unpaid.as_str().to_string()),
        ..Default::default()
    }
    .insert(&savepoint)
    .await?;

    savepoint.commit().await?;
    Ok(created)
}

async fn titles_by_copy<C: ConnectionTrait>(
    conn: &C,
    copy_ids: Vec<i32>,
) -> Result<HashMap<i32, String>, DbErr> {
    let mut copy_book_map = HashMap::new();

    if !copy_ids.is_empty() {
        let copies_with_books = copy::Entity::find()
            .filter(copy::Column::Id.is_in(copy_ids))
            .find_also_related(book::Entity)
            .all(conn)
            .await?;

        for (copy, book) in copies_with_books {
            if let Some(book) = book {
                copy_book_map.insert(copy.id, book.title);
            }
        }
    }

    Ok(copy_book_map)
}

async fn names_by_member<C: ConnectionTrait>(
    conn: &C,
    member_ids: Vec<i32>,
) -> Result<HashMap<i32, String>, DbErr> {
    if member_ids.is_empty() {
        return Ok(HashMap::new());
    }

    Ok(member::Entity::find()
        .filter(member::Column::Id.is_in(member_ids))
        .all(conn)
        .await?
        .into_iter()
        .map(|m| (m.id, m.name))
        .collect())
}
