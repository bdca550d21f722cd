use chrono::Utc;
use uuid::Uuid;

use gators_api::middleware::error_handling::AppError;
use gators_core::errors::AcademyError;
use gators_db::models::DbProfile;

use crate::test_utils::TestContext;

fn db_profile(id: Uuid) -> DbProfile {
    DbProfile {
        id,
        full_name: "Coach Sara".to_string(),
        email: "sara@trainer.com".to_string(),
        phone: None,
        role: "trainer".to_string(),
        level: Some("Level4".to_string()),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

// Test wrapper replicating the profile-removal saga: profile row first,
// auth account second, profile restore as the compensating step when the
// account delete fails.
async fn test_delete_profile_wrapper(ctx: &mut TestContext, id: Uuid) -> Result<(), AppError> {
    let profile = ctx
        .profile_repo
        .get_profile_by_id(id)
        .await?
        .ok_or_else(|| AcademyError::NotFound(format!("Profile with ID {} not found", id)))?;

    ctx.profile_repo.delete_profile(id).await?;

    if let Err(auth_err) = ctx.auth_repo.delete_account(id).await {
        match ctx.profile_repo.restore_profile(profile).await {
            Ok(_) => return Err(AppError(AcademyError::Persistence(auth_err))),
            Err(restore_err) => {
                return Err(AppError(AcademyError::PartialFailure(format!(
                    "profile deleted but auth account removal failed ({auth_err}); \
                     profile restore also failed ({restore_err})"
                ))));
            }
        }
    }

    Ok(())
}

#[tokio::test]
async fn test_delete_profile_removes_both_records() {
    let mut ctx = TestContext::new();
    let id = Uuid::from_u128(5);

    ctx.profile_repo
        .expect_get_profile_by_id()
        .times(1)
        .returning(|id| Ok(Some(db_profile(id))));
    ctx.profile_repo
        .expect_delete_profile()
        .times(1)
        .returning(|_| Ok(true));
    ctx.auth_repo
        .expect_delete_account()
        .times(1)
        .returning(|_| Ok(true));

    test_delete_profile_wrapper(&mut ctx, id)
        .await
        .expect("both deletes succeed");
}

#[tokio::test]
async fn test_delete_profile_of_unknown_id_is_not_found() {
    let mut ctx = TestContext::new();

    ctx.profile_repo
        .expect_get_profile_by_id()
        .times(1)
        .returning(|_| Ok(None));

    let err = test_delete_profile_wrapper(&mut ctx, Uuid::from_u128(5))
        .await
        .expect_err("unknown profile");
    assert!(matches!(err.0, AcademyError::NotFound(_)));
}

#[tokio::test]
async fn test_failed_account_delete_restores_the_profile() {
    let mut ctx = TestContext::new();
    let id = Uuid::from_u128(5);

    ctx.profile_repo
        .expect_get_profile_by_id()
        .times(1)
        .returning(|id| Ok(Some(db_profile(id))));
    ctx.profile_repo
        .expect_delete_profile()
        .times(1)
        .returning(|_| Ok(true));
    ctx.auth_repo
        .expect_delete_account()
        .times(1)
        .returning(|_| Err(eyre::eyre!("auth store unavailable")));
    // The compensating restore must run exactly once
    ctx.profile_repo
        .expect_restore_profile()
        .times(1)
        .returning(|profile| Ok(profile));

    let err = test_delete_profile_wrapper(&mut ctx, id)
        .await
        .expect_err("saga fails overall");

    // The surfaced error is the auth failure, not a partial failure: the
    // compensation put the system back in its prior state
    assert!(matches!(err.0, AcademyError::Persistence(_)));
}

#[tokio::test]
async fn test_failed_compensation_surfaces_partial_failure() {
    let mut ctx = TestContext::new();
    let id = Uuid::from_u128(5);

    ctx.profile_repo
        .expect_get_profile_by_id()
        .times(1)
        .returning(|id| Ok(Some(db_profile(id))));
    ctx.profile_repo
        .expect_delete_profile()
        .times(1)
        .returning(|_| Ok(true));
    ctx.auth_repo
        .expect_delete_account()
        .times(1)
        .returning(|_| Err(eyre::eyre!("auth store unavailable")));
    ctx.profile_repo
        .expect_restore_profile()
        .times(1)
        .returning(|_| Err(eyre::eyre!("insert refused")));

    let err = test_delete_profile_wrapper(&mut ctx, id)
        .await
        .expect_err("saga fails overall");

    let AcademyError::PartialFailure(message) = err.0 else {
        panic!("expected partial failure, got {:?}", err.0);
    };
    assert!(message.contains("auth store unavailable"));
    assert!(message.contains("insert refused"));
}
