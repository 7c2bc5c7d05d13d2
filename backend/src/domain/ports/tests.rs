use super::*;
use crate::domain::{EmailAddress, NewUser, ReferralCode, User, UserId, UserName};
use actix_rt::System;
use mockall::predicate::eq;
use rstest::{fixture, rstest};
use std::sync::Arc;

#[fixture]
fn carol() -> User {
    User::try_from_parts(3, "Carol Davis", "carol@example.com", "CAROL789", 0).expect("carol")
}

#[rstest]
#[case(UserRepositoryError::connection("refused"), "user repository connection failed: refused")]
#[case(UserRepositoryError::query("poisoned"), "user repository query failed: poisoned")]
fn repository_errors_render_messages(#[case] err: UserRepositoryError, #[case] expected: &str) {
    assert_eq!(err.to_string(), expected);
}

#[rstest]
fn mock_repository_is_usable_as_trait_object(carol: User) {
    let mut repo = MockUserRepository::new();
    let expected = carol.clone();
    repo.expect_find_by_referral_code()
        .with(eq("CAROL789"))
        .times(1)
        .return_once(move |_| Ok(Some(expected)));
    let repo: Arc<dyn UserRepository> = Arc::new(repo);

    System::new().block_on(async move {
        let found = repo
            .find_by_referral_code("CAROL789")
            .await
            .expect("lookup succeeds");
        assert_eq!(found, Some(carol));
    });
}

#[rstest]
fn mock_append_assigns_identifier() {
    let mut repo = MockUserRepository::new();
    repo.expect_append()
        .times(1)
        .returning(|draft| Ok(draft.into_user(UserId::new(4))));

    let draft = NewUser {
        name: UserName::new("Dana").expect("name"),
        email: EmailAddress::new("dana@example.com").expect("email"),
        referral_code: ReferralCode::compose("DAN", 1),
        points: 0,
    };

    System::new().block_on(async move {
        let stored = repo.append(draft).await.expect("append succeeds");
        assert_eq!(stored.id(), UserId::new(4));
        assert_eq!(stored.referral_code().as_ref(), "DAN1");
    });
}

#[rstest]
fn mock_code_source_feeds_suffixes() {
    let mut source = MockReferralCodeSource::new();
    source.expect_next_number().times(2).return_const(17_u16);
    let source: &dyn ReferralCodeSource = &source;
    assert_eq!(source.next_number(), 17);
    assert_eq!(source.next_number(), 17);
}
