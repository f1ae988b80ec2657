//! Account registration and sign-in.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use validator::Validate;

use crate::application::services::SessionService;
use crate::domain::credentials::CredentialHasher;
use crate::domain::entities::{NewUser, SessionUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::password_policy::check_password_strength;

/// Well-formed Argon2id hash that matches no password. Unknown emails are
/// verified against it so sign-in costs the same whether or not the account
/// exists.
const DUMMY_PASSWORD_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Sign-up input after trimming, checked before the password policy runs.
#[derive(Debug, Validate)]
struct SignUpForm {
    #[validate(length(min = 1, max = 64))]
    display_name: String,
    #[validate(email)]
    email: String,
    #[validate(length(min = 1))]
    password: String,
}

#[derive(Debug, Validate)]
struct SignInForm {
    #[validate(length(min = 1))]
    email: String,
    #[validate(length(min = 1))]
    password: String,
}

/// Outcome of a successful sign-in.
#[derive(Debug, Clone)]
pub struct SignedIn {
    pub token: String,
    pub user: SessionUser,
}

pub struct AccountService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn CredentialHasher>,
    sessions: Arc<SessionService>,
}

impl AccountService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn CredentialHasher>,
        sessions: Arc<SessionService>,
    ) -> Self {
        Self {
            users,
            hasher,
            sessions,
        }
    }

    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] for an empty display name, a malformed email or an
    ///   empty password
    /// - [`AppError::WeakPassword`] if the password breaks the policy
    /// - [`AppError::DuplicateAccount`] if the email or display name is taken
    pub async fn sign_up(
        &self,
        display_name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AppError> {
        let form = SignUpForm {
            display_name: display_name.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        form.validate()?;
        check_password_strength(&form.password)?;

        if self.users.find_by_email(&form.email).await?.is_some() {
            return Err(Self::duplicate());
        }

        let password_hash = self.hash_password(form.password).await?;
        let new_user = NewUser {
            display_name: form.display_name,
            email: form.email,
            password_hash,
            created_at: Utc::now(),
        };

        let user = self.users.create(new_user).await.map_err(|e| match e {
            AppError::Conflict { .. } => Self::duplicate(),
            other => other,
        })?;

        tracing::info!(user_id = user.id, "Account created");
        Ok(user)
    }

    /// Checks credentials and opens a session.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if either field is empty
    /// - [`AppError::InvalidCredentials`] for an unknown email or a wrong password
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<SignedIn, AppError> {
        let form = SignInForm {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        form.validate()?;

        let Some(user) = self.users.find_by_email(&form.email).await? else {
            self.verify_password(form.password, DUMMY_PASSWORD_HASH.to_string())
                .await?;
            return Err(AppError::invalid_credentials());
        };

        if !self
            .verify_password(form.password, user.password_hash.clone())
            .await?
        {
            tracing::debug!(user_id = user.id, "Password mismatch");
            return Err(AppError::invalid_credentials());
        }

        let snapshot = SessionUser::from(&user);
        let token = self.sessions.issue(&snapshot).await?;

        tracing::info!(user_id = user.id, "Signed in");
        Ok(SignedIn {
            token,
            user: snapshot,
        })
    }

    /// Ends the session behind `token`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the session is already gone.
    pub async fn sign_out(&self, token: &str) -> Result<(), AppError> {
        let user = self.sessions.resolve(token).await?;
        self.sessions.revoke(token).await?;

        tracing::info!(user_id = user.id, "Signed out");
        Ok(())
    }

    async fn hash_password(&self, password: String) -> Result<String, AppError> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Password hashing task failed");
                AppError::internal("Failed to hash password", json!({}))
            })?
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool, AppError> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Password verification task failed");
                AppError::internal("Failed to verify password", json!({}))
            })
    }

    fn duplicate() -> AppError {
        AppError::duplicate_account(
            "An account with this email or display name already exists",
            json!({}),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::credentials::MockCredentialHasher;
    use crate::domain::repositories::{MockSessionCache, MockUserRepository};
    use std::time::Duration;

    const GOOD_PASSWORD: &str = "Secr3t!pw";

    fn stored_user() -> User {
        User {
            id: 11,
            display_name: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "hashed".to_string(),
            created_at: Utc::now(),
        }
    }

    fn service(
        users: MockUserRepository,
        hasher: MockCredentialHasher,
        cache: MockSessionCache,
    ) -> AccountService {
        let sessions = SessionService::new(
            Arc::new(cache),
            "secret".to_string(),
            Duration::from_secs(60),
        );
        AccountService::new(Arc::new(users), Arc::new(hasher), Arc::new(sessions))
    }

    #[tokio::test]
    async fn test_sign_up_success() {
        let mut users = MockUserRepository::new();
        let mut hasher = MockCredentialHasher::new();

        users.expect_find_by_email().times(1).returning(|_| Ok(None));
        hasher
            .expect_hash()
            .withf(|secret| secret == GOOD_PASSWORD)
            .times(1)
            .returning(|_| Ok("hashed".to_string()));
        users
            .expect_create()
            .withf(|u| {
                u.display_name == "alice"
                    && u.email == "alice@example.com"
                    && u.password_hash == "hashed"
            })
            .times(1)
            .returning(|_| Ok(stored_user()));

        let service = service(users, hasher, MockSessionCache::new());

        let user = service
            .sign_up(" alice ", "alice@example.com", GOOD_PASSWORD)
            .await
            .unwrap();

        assert_eq!(user.id, 11);
    }

    #[tokio::test]
    async fn test_sign_up_rejects_bad_email() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().never();

        let service = service(users, MockCredentialHasher::new(), MockSessionCache::new());

        let result = service.sign_up("alice", "not-an-email", GOOD_PASSWORD).await;

        match result {
            Err(AppError::Validation { details, .. }) => {
                assert!(details["fields"]["email"].is_array());
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_sign_up_rejects_blank_display_name() {
        let service = service(
            MockUserRepository::new(),
            MockCredentialHasher::new(),
            MockSessionCache::new(),
        );

        let result = service.sign_up("   ", "alice@example.com", GOOD_PASSWORD).await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_sign_up_rejects_weak_password() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().never();

        let service = service(users, MockCredentialHasher::new(), MockSessionCache::new());

        let result = service
            .sign_up("alice", "alice@example.com", "alllowercase1!")
            .await;

        assert!(matches!(result, Err(AppError::WeakPassword { .. })));
    }

    #[tokio::test]
    async fn test_sign_up_duplicate_email() {
        let mut users = MockUserRepository::new();
        let mut hasher = MockCredentialHasher::new();

        users
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(stored_user())));
        hasher.expect_hash().never();

        let service = service(users, hasher, MockSessionCache::new());

        let result = service
            .sign_up("alice2", "alice@example.com", GOOD_PASSWORD)
            .await;

        assert!(matches!(result, Err(AppError::DuplicateAccount { .. })));
    }

    #[tokio::test]
    async fn test_sign_up_conflict_on_insert() {
        let mut users = MockUserRepository::new();
        let mut hasher = MockCredentialHasher::new();

        users.expect_find_by_email().times(1).returning(|_| Ok(None));
        hasher
            .expect_hash()
            .times(1)
            .returning(|_| Ok("hashed".to_string()));
        users.expect_create().times(1).returning(|_| {
            Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "users_display_name_key" }),
            ))
        });

        let service = service(users, hasher, MockSessionCache::new());

        let result = service
            .sign_up("alice", "other@example.com", GOOD_PASSWORD)
            .await;

        assert!(matches!(result, Err(AppError::DuplicateAccount { .. })));
    }

    #[tokio::test]
    async fn test_sign_in_success_issues_session() {
        let mut users = MockUserRepository::new();
        let mut hasher = MockCredentialHasher::new();
        let mut cache = MockSessionCache::new();

        users
            .expect_find_by_email()
            .withf(|email| email == "alice@example.com")
            .times(1)
            .returning(|_| Ok(Some(stored_user())));
        hasher
            .expect_verify()
            .withf(|secret, hash| secret == GOOD_PASSWORD && hash == "hashed")
            .times(1)
            .returning(|_, _| true);
        cache
            .expect_put()
            .withf(|_, user, _| user.id == 11 && user.email == "alice@example.com")
            .times(1)
            .returning(|_, _, _| Ok(()));

        let service = service(users, hasher, cache);

        let signed_in = service
            .sign_in("alice@example.com", GOOD_PASSWORD)
            .await
            .unwrap();

        assert!(!signed_in.token.is_empty());
        assert_eq!(signed_in.user.display_name, "alice");
    }

    #[tokio::test]
    async fn test_sign_in_wrong_password() {
        let mut users = MockUserRepository::new();
        let mut hasher = MockCredentialHasher::new();
        let mut cache = MockSessionCache::new();

        users
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(stored_user())));
        hasher.expect_verify().times(1).returning(|_, _| false);
        cache.expect_put().never();

        let service = service(users, hasher, cache);

        let result = service.sign_in("alice@example.com", "Wrong!pw1").await;

        assert!(matches!(result, Err(AppError::InvalidCredentials { .. })));
    }

    #[tokio::test]
    async fn test_sign_in_unknown_email_matches_wrong_password() {
        let mut users = MockUserRepository::new();
        let mut hasher = MockCredentialHasher::new();

        users.expect_find_by_email().times(1).returning(|_| Ok(None));
        hasher
            .expect_verify()
            .withf(|password, hash| password == GOOD_PASSWORD && hash == DUMMY_PASSWORD_HASH)
            .times(1)
            .returning(|_, _| false);

        let service = service(users, hasher, MockSessionCache::new());

        let err = service
            .sign_in("ghost@example.com", GOOD_PASSWORD)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidCredentials { .. }));
        assert_eq!(err.to_string(), AppError::invalid_credentials().to_string());
    }

    #[test]
    fn test_dummy_hash_is_well_formed_and_matches_nothing() {
        use crate::infrastructure::credentials::Argon2Hasher;
        use argon2::password_hash::PasswordHash;

        assert!(PasswordHash::new(DUMMY_PASSWORD_HASH).is_ok());
        assert!(!Argon2Hasher::new().verify(GOOD_PASSWORD, DUMMY_PASSWORD_HASH));
    }

    #[tokio::test]
    async fn test_sign_in_empty_fields() {
        let service = service(
            MockUserRepository::new(),
            MockCredentialHasher::new(),
            MockSessionCache::new(),
        );

        let result = service.sign_in("", "").await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_sign_out_revokes_session() {
        let mut cache = MockSessionCache::new();

        cache.expect_get().times(1).returning(|_| {
            Ok(Some(SessionUser::from(&stored_user())))
        });
        cache.expect_delete().times(1).returning(|_| Ok(()));

        let service = service(MockUserRepository::new(), MockCredentialHasher::new(), cache);

        service.sign_out("token").await.unwrap();
    }

    #[tokio::test]
    async fn test_sign_out_unknown_session() {
        let mut cache = MockSessionCache::new();

        cache.expect_get().times(1).returning(|_| Ok(None));
        cache.expect_delete().never();

        let service = service(MockUserRepository::new(), MockCredentialHasher::new(), cache);

        let result = service.sign_out("token").await;

        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }
}
