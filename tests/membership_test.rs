use std::sync::Arc;

use argon2::password_hash::{PasswordHash, PasswordVerifier};
use argon2::Argon2;
use chrono::NaiveDate;
use libradesk::config::Config;
use libradesk::db;
use libradesk::domain::{DomainError, MemberInput, NewStaffInput};
use libradesk::infrastructure::AppState;
use libradesk::infrastructure::clock::FixedClock;
use libradesk::models::staff;
use sea_orm::EntityTrait;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn setup_state() -> AppState {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    AppState::with_clock(db, &Config::default(), Arc::new(FixedClock(date(2024, 1, 15))))
}

fn member(name: &str, email: &str, phone: &str, membership_type: &str) -> MemberInput {
    MemberInput {
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        address: Some("1 Main Street".to_string()),
        membership_type: membership_type.to_string(),
    }
}

#[tokio::test]
async fn test_expiry_follows_membership_type() {
    let state = setup_state().await;

    let monthly = state
        .membership
        .create_member(member("Alice", "alice@example.com", "555-0101", "Monthly"))
        .await
        .unwrap();
    assert_eq!(monthly.join_date, date(2024, 1, 15));
    assert_eq!(monthly.membership_expiry_date, Some(date(2024, 2, 15)));

    let annual = state
        .membership
        .create_member(member("Bob", "bob@example.com", "555-0102", "Annual"))
        .await
        .unwrap();
    assert_eq!(annual.membership_expiry_date, Some(date(2025, 1, 15)));

    let none = state
        .membership
        .create_member(member("Carol", "carol@example.com", "555-0103", ""))
        .await
        .unwrap();
    assert_eq!(none.membership_expiry_date, None);

    assert_eq!(state.membership.list_members().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_duplicate_email_or_phone_is_rejected() {
    let state = setup_state().await;

    state
        .membership
        .create_member(member("Alice", "alice@example.com", "555-0101", "Monthly"))
        .await
        .unwrap();

    let same_email = state
        .membership
        .create_member(member("Alice B", "alice@example.com", "555-0199", "Monthly"))
        .await;
    assert!(matches!(
        same_email,
        Err(DomainError::UniqueConstraintViolation(_))
    ));

    let same_phone = state
        .membership
        .create_member(member("Alice C", "other@example.com", "555-0101", "Monthly"))
        .await;
    assert!(matches!(
        same_phone,
        Err(DomainError::UniqueConstraintViolation(_))
    ));
}

#[tokio::test]
async fn test_update_member_keeps_expiry() {
    let state = setup_state().await;

    let created = state
        .membership
        .create_member(member("Alice", "alice@example.com", "555-0101", "Monthly"))
        .await
        .unwrap();

    let updated = state
        .membership
        .update_member(
            created.id,
            member("Alice Martin", "alice@example.com", "555-0101", "Annual"),
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Alice Martin");
    assert_eq!(updated.membership_type, "Annual");
    assert_eq!(updated.membership_expiry_date, Some(date(2024, 2, 15)));

    let missing = state
        .membership
        .update_member(999, member("Ghost", "ghost@example.com", "0", "Monthly"))
        .await;
    assert!(matches!(missing, Err(DomainError::NotFound)));
}

#[tokio::test]
async fn test_delete_member() {
    let state = setup_state().await;

    let created = state
        .membership
        .create_member(member("Alice", "alice@example.com", "555-0101", "Monthly"))
        .await
        .unwrap();

    state.membership.delete_member(created.id).await.unwrap();
    assert!(state.membership.find_member(created.id).await.unwrap().is_none());

    let again = state.membership.delete_member(created.id).await;
    assert!(matches!(again, Err(DomainError::NotFound)));
}

#[tokio::test]
async fn test_staff_passwords_are_hashed() {
    let state = setup_state().await;

    let created = state
        .membership
        .create_staff(NewStaffInput {
            name: "Desk".to_string(),
            username: "desk".to_string(),
            password: "secret".to_string(),
            role: "librarian".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(created.username, "desk");

    let row = staff::Entity::find_by_id(created.id)
        .one(state.db())
        .await
        .unwrap()
        .unwrap();
    assert_ne!(row.password_hash, "secret");
    let parsed = PasswordHash::new(&row.password_hash).unwrap();
    assert!(
        Argon2::default()
            .verify_password(b"secret", &parsed)
            .is_ok()
    );

    let duplicate = state
        .membership
        .create_staff(NewStaffInput {
            name: "Desk 2".to_string(),
            username: "desk".to_string(),
            password: "other".to_string(),
            role: "librarian".to_string(),
        })
        .await;
    assert!(matches!(
        duplicate,
        Err(DomainError::UniqueConstraintViolation(_))
    ));

    assert_eq!(state.membership.list_staff().await.unwrap().len(), 1);
    state.membership.delete_staff(created.id).await.unwrap();
    assert!(matches!(
        state.membership.delete_staff(created.id).await,
        Err(DomainError::NotFound)
    ));
}
