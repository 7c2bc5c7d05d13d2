//! Tests for the registration service.

use std::sync::Arc;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::{MockUserRepository, ScriptedReferralCodeSource};
use crate::outbound::memory::InMemoryUserRepository;
use mockall::predicate::eq;
use rstest::{fixture, rstest};

type MemoryService = RegistrationService<InMemoryUserRepository, ScriptedReferralCodeSource>;

fn request(name: Option<&str>, email: Option<&str>, code: Option<&str>) -> RegistrationRequest {
    RegistrationRequest {
        name: name.map(str::to_owned),
        email: email.map(str::to_owned),
        referral_code: code.map(str::to_owned),
    }
}

fn service_with_script(script: impl IntoIterator<Item = u16>) -> MemoryService {
    let repo = InMemoryUserRepository::seeded().expect("seed users");
    RegistrationService::new(
        Arc::new(repo),
        Arc::new(ScriptedReferralCodeSource::new(script)),
    )
}

#[fixture]
fn service() -> MemoryService {
    service_with_script([42])
}

fn mock_service(
    repo: MockUserRepository,
) -> RegistrationService<MockUserRepository, ScriptedReferralCodeSource> {
    RegistrationService::new(
        Arc::new(repo),
        Arc::new(ScriptedReferralCodeSource::new([7])),
    )
}

async fn points_of(service: &MemoryService, code: &str) -> u64 {
    service
        .find_by_referral_code(code)
        .await
        .expect("known user")
        .points()
}

#[rstest]
#[case(None, Some("ada@example.com"))]
#[case(Some("Ada"), None)]
#[case(Some(""), Some("ada@example.com"))]
#[case(Some("Ada"), Some(""))]
#[case(None, None)]
#[tokio::test]
async fn missing_fields_are_required(#[case] name: Option<&str>, #[case] email: Option<&str>) {
    let service = mock_service(MockUserRepository::new());
    let err = service
        .register(request(name, email, None))
        .await
        .expect_err("missing field");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), "Name and email are required");
}

#[rstest]
#[case("   ", "ada@example.com")]
#[case("Ada", "\t\n")]
#[case(" ", " ")]
#[tokio::test]
async fn blank_fields_cannot_be_empty(#[case] name: &str, #[case] email: &str) {
    let service = mock_service(MockUserRepository::new());
    let err = service
        .register(request(Some(name), Some(email), None))
        .await
        .expect_err("blank field");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), "Name and email cannot be empty");
}

#[rstest]
#[tokio::test]
async fn registers_without_referral(service: MemoryService) {
    let receipt = service
        .register(request(Some("  Ada Lovelace "), Some(" ada@example.com "), None))
        .await
        .expect("registration succeeds");

    let user = receipt.user;
    assert_eq!(user.id().get(), 4);
    assert_eq!(user.name().as_ref(), "Ada Lovelace");
    assert_eq!(user.email().as_ref(), "ada@example.com");
    assert_eq!(user.referral_code().as_ref(), "ADA42");
    assert_eq!(user.points(), 0);
    assert!(receipt.referred_by.is_none());

    let users = service.list_users().await.expect("list");
    assert_eq!(users.len(), 4);
    assert_eq!(users.last(), Some(&user));
}

#[rstest]
#[tokio::test]
async fn valid_referral_credits_both_users(service: MemoryService) {
    let receipt = service
        .register(request(Some("Dan"), Some("dan@example.com"), Some("ALICE123")))
        .await
        .expect("registration succeeds");

    assert_eq!(receipt.user.points(), REFERRED_USER_CREDIT);
    assert_eq!(receipt.referred_by.map(|id| id.get()), Some(1));
    assert_eq!(points_of(&service, "ALICE123").await, REFERRER_CREDIT);
    assert_eq!(points_of(&service, "BOB456").await, 0);
}

#[rstest]
#[tokio::test]
async fn referral_code_is_trimmed_before_lookup(service: MemoryService) {
    let receipt = service
        .register(request(Some("Dan"), Some("dan@example.com"), Some("  BOB456 ")))
        .await
        .expect("registration succeeds");
    assert_eq!(receipt.user.points(), REFERRED_USER_CREDIT);
    assert_eq!(points_of(&service, "BOB456").await, REFERRER_CREDIT);
}

#[rstest]
#[case("")]
#[case("   ")]
#[tokio::test]
async fn blank_referral_code_is_ignored(service: MemoryService, #[case] code: &str) {
    let receipt = service
        .register(request(Some("Dan"), Some("dan@example.com"), Some(code)))
        .await
        .expect("registration succeeds");
    assert_eq!(receipt.user.points(), 0);
    assert!(receipt.referred_by.is_none());
}

#[rstest]
#[case("NOPE999")]
#[case("alice123")]
#[tokio::test]
async fn unknown_referral_is_rejected_without_side_effects(
    service: MemoryService,
    #[case] code: &str,
) {
    let err = service
        .register(request(Some("Dan"), Some("dan@example.com"), Some(code)))
        .await
        .expect_err("unknown code");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), "Invalid referral code");
    assert_eq!(service.list_users().await.expect("list").len(), 3);
    assert_eq!(points_of(&service, "ALICE123").await, 0);

    let receipt = service
        .register(request(Some("Dan"), Some("dan@example.com"), None))
        .await
        .expect("retry without code succeeds");
    assert_eq!(receipt.user.id().get(), 4);
}

#[rstest]
#[case("alice@example.com")]
#[case("  alice@example.com  ")]
#[tokio::test]
async fn duplicate_email_conflicts(service: MemoryService, #[case] email: &str) {
    let err = service
        .register(request(Some("Alice Again"), Some(email), Some("BOB456")))
        .await
        .expect_err("duplicate email");
    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(err.message(), "Email already registered");
    assert_eq!(service.list_users().await.expect("list").len(), 3);
    assert_eq!(points_of(&service, "BOB456").await, 0);
}

#[rstest]
#[tokio::test]
async fn email_comparison_is_case_sensitive(service: MemoryService) {
    let receipt = service
        .register(request(Some("Alice"), Some("Alice@Example.com"), None))
        .await
        .expect("distinct email");
    assert_eq!(receipt.user.email().as_ref(), "Alice@Example.com");
}

#[rstest]
#[tokio::test]
async fn colliding_codes_are_redrawn() {
    let service = service_with_script([1, 1, 2]);
    let first = service
        .register(request(Some("Ada"), Some("ada@example.com"), None))
        .await
        .expect("first");
    let second = service
        .register(request(Some("Adam"), Some("adam@example.com"), None))
        .await
        .expect("second");
    assert_eq!(first.user.referral_code().as_ref(), "ADA1");
    assert_eq!(second.user.referral_code().as_ref(), "ADA2");
}

#[rstest]
#[tokio::test]
async fn exhausted_code_space_keeps_duplicate() {
    let service = service_with_script([5]);
    service
        .register(request(Some("Ada"), Some("ada@example.com"), None))
        .await
        .expect("first");
    let second = service
        .register(request(Some("Adam"), Some("adam@example.com"), None))
        .await
        .expect("registration never fails on exhaustion");
    assert_eq!(second.user.referral_code().as_ref(), "ADA5");

    let owner = service
        .find_by_referral_code("ADA5")
        .await
        .expect("first match");
    assert_eq!(owner.email().as_ref(), "ada@example.com");
}

#[rstest]
#[tokio::test]
async fn names_without_letters_get_numeric_codes() {
    let service = service_with_script([0]);
    let receipt = service
        .register(request(Some("1234"), Some("digits@example.com"), None))
        .await
        .expect("registration succeeds");
    assert_eq!(receipt.user.referral_code().as_ref(), "0");
}

#[rstest]
#[tokio::test]
async fn lookup_reports_missing_users(service: MemoryService) {
    let err = service
        .find_by_referral_code("ZZZ0")
        .await
        .expect_err("missing");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "User not found");
}

#[rstest]
#[tokio::test]
async fn repository_failures_become_internal_errors() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .times(1)
        .return_once(|_| Err(UserRepositoryError::connection("store offline")));
    let service = mock_service(repo);

    let err = service
        .register(request(Some("Ada"), Some("ada@example.com"), None))
        .await
        .expect_err("repository failure");
    assert_eq!(err.code(), ErrorCode::InternalError);
}

#[rstest]
#[tokio::test]
async fn unknown_referral_never_appends() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email().times(1).return_once(|_| Ok(None));
    repo.expect_find_by_referral_code()
        .with(eq("GHOST1"))
        .times(1)
        .return_once(|_| Ok(None));
    repo.expect_append().never();
    repo.expect_append_referred().never();
    let service = mock_service(repo);

    let err = service
        .register(request(Some("Ada"), Some("ada@example.com"), Some("GHOST1")))
        .await
        .expect_err("unknown code");
    assert_eq!(err.message(), "Invalid referral code");
}

fn referred_registration_repo(
    outcome: Result<Option<User>, UserRepositoryError>,
) -> MockUserRepository {
    let referrer =
        User::try_from_parts(1, "Alice Johnson", "alice@example.com", "ALICE123", 0).expect("user");
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email().times(1).return_once(|_| Ok(None));
    repo.expect_find_by_referral_code()
        .with(eq("ALICE123"))
        .times(1)
        .return_once(move |_| Ok(Some(referrer)));
    repo.expect_find_by_referral_code()
        .with(eq("ADA7"))
        .times(1)
        .return_once(|_| Ok(None));
    repo.expect_append_referred()
        .withf(|draft, referrer, amount| {
            draft.points == REFERRED_USER_CREDIT
                && *referrer == crate::domain::UserId::new(1)
                && *amount == REFERRER_CREDIT
        })
        .times(1)
        .return_once(move |_, _, _| outcome);
    repo.expect_append().never();
    repo
}

#[rstest]
#[case::referrer_vanished(Ok(None))]
#[case::store_failed(Err(UserRepositoryError::query("poisoned")))]
#[tokio::test]
async fn referral_write_failure_stores_nothing_separately(
    #[case] outcome: Result<Option<User>, UserRepositoryError>,
) {
    let service = mock_service(referred_registration_repo(outcome));

    let err = service
        .register(request(Some("Ada"), Some("ada@example.com"), Some("ALICE123")))
        .await
        .expect_err("referral write failed");
    assert_eq!(err.code(), ErrorCode::InternalError);
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_registrations_keep_emails_unique() {
    let service = Arc::new(service_with_script(0..=999));
    let attempts = (0..16).map(|_| {
        let service = Arc::clone(&service);
        tokio::spawn(async move {
            service
                .register(request(Some("Racer"), Some("race@example.com"), Some("ALICE123")))
                .await
        })
    });

    let mut successes = 0;
    for attempt in attempts.collect::<Vec<_>>() {
        if attempt.await.expect("task joins").is_ok() {
            successes += 1;
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(service.list_users().await.expect("list").len(), 4);
    assert_eq!(points_of(&service, "ALICE123").await, REFERRER_CREDIT);
}
