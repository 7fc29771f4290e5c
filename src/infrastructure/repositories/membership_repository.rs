//! SeaORM implementation of MembershipRepository

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::domain::membership::membership_expiry;
use crate::domain::{
    Clock, DomainError, Member, MemberInput, MembershipRepository, NewStaffInput, Staff,
};
use crate::infrastructure::auth::hash_password;
use crate::models::{member, staff};

/// SeaORM-based implementation of MembershipRepository
pub struct SeaOrmMembershipRepository {
    db: DatabaseConnection,
    clock: Arc<dyn Clock>,
}

impl SeaOrmMembershipRepository {
    pub fn new(db: DatabaseConnection, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }
}

impl From<member::Model> for Member {
    fn from(model: member::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            phone: model.phone,
            address: model.address,
            join_date: model.join_date,
            membership_type: model.membership_type,
            membership_expiry_date: model.membership_expiry_date,
        }
    }
}

impl From<staff::Model> for Staff {
    fn from(model: staff::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            username: model.username,
            role: model.role,
        }
    }
}

#[async_trait]
impl MembershipRepository for SeaOrmMembershipRepository {
    async fn list_members(&self) -> Result<Vec<Member>, DomainError> {
        let members = member::Entity::find()
            .order_by_asc(member::Column::Id)
            .all(&self.db)
            .await?;

        Ok(members.into_iter().map(Member::from).collect())
    }

    async fn find_member(&self, id: i32) -> Result<Option<Member>, DomainError> {
        let member = member::Entity::find_by_id(id).one(&self.db).await?;
        Ok(member.map(Member::from))
    }

    async fn create_member(&self, input: MemberInput) -> Result<Member, DomainError> {
        let today = self.clock.today();
        let expiry = membership_expiry(&input.membership_type, today);

        let new_member = member::ActiveModel {
            name: Set(input.name),
            email: Set(input.email),
            phone: Set(input.phone),
            address: Set(input.address),
            join_date: Set(today),
            membership_type: Set(input.membership_type),
            membership_expiry_date: Set(expiry),
            ..Default::default()
        };

        let result = new_member.insert(&self.db).await?;
        tracing::info!(
            "Registered member {} ({}), expires {:?}",
            result.id,
            result.membership_type,
            result.membership_expiry_date
        );

        Ok(Member::from(result))
    }

    async fn update_member(&self, id: i32, input: MemberInput) -> Result<Member, DomainError> {
        let existing = member::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active: member::ActiveModel = existing.into();
        active.name = Set(input.name);
        active.email = Set(input.email);
        active.phone = Set(input.phone);
        active.address = Set(input.address);
        active.membership_type = Set(input.membership_type);

        let result = active.update(&self.db).await?;
        Ok(Member::from(result))
    }

    async fn delete_member(&self, id: i32) -> Result<(), DomainError> {
        let result = member::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }

    async fn list_staff(&self) -> Result<Vec<Staff>, DomainError> {
        let staff = staff::Entity::find()
            .order_by_asc(staff::Column::Id)
            .all(&self.db)
            .await?;

        Ok(staff.into_iter().map(Staff::from).collect())
    }

    async fn create_staff(&self, input: NewStaffInput) -> Result<Staff, DomainError> {
        let password_hash = hash_password(&input.password).map_err(DomainError::Internal)?;

        let new_staff = staff::ActiveModel {
            name: Set(input.name),
            username: Set(input.username),
            password_hash: Set(password_hash),
            role: Set(input.role),
            ..Default::default()
        };

        let result = new_staff.insert(&self.db).await?;
        Ok(Staff::from(result))
    }

    async fn delete_staff(&self, id: i32) -> Result<(), DomainError> {
        let result = staff::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }
}
