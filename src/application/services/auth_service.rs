//! Password hashing and HTTP Basic authentication.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::entities::User;
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

/// Keyed password hasher.
///
/// Passwords are stored as `hex(HMAC-SHA256(secret, email ":" password))`.
#[derive(Clone)]
pub struct PasswordHasher {
    secret: String,
}

impl PasswordHasher {
    pub fn new(secret: String) -> Self {
        Self { secret }
    }

    fn mac(&self, email: &str, password: &str) -> HmacSha256 {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(email.as_bytes());
        mac.update(b":");
        mac.update(password.as_bytes());
        mac
    }

    /// Returns the 64-character lowercase hex hash of the credentials.
    pub fn hash(&self, email: &str, password: &str) -> String {
        hex::encode(self.mac(email, password).finalize().into_bytes())
    }

    /// Checks credentials against a stored hash in constant time.
    pub fn verify(&self, email: &str, password: &str, stored_hash: &str) -> bool {
        let Ok(expected) = hex::decode(stored_hash) else {
            return false;
        };
        self.mac(email, password).verify_slice(&expected).is_ok()
    }
}

/// Service for authenticating requests with email/password credentials.
pub struct AuthService<R: UserRepository> {
    repository: Arc<R>,
    hasher: PasswordHasher,
}

impl<R: UserRepository> AuthService<R> {
    /// Creates a new authentication service.
    ///
    /// `hasher` must use the same secret the stored hashes were created with.
    pub fn new(repository: Arc<R>, hasher: PasswordHasher) -> Self {
        Self { repository, hasher }
    }

    /// Resolves credentials to the matching user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the email is unknown or the
    /// password does not match. Both cases produce the same error.
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, AppError> {
        let user = self.repository.find_by_email(email).await?;

        match user {
            Some(user) if self.hasher.verify(email, password, &user.password_hash) => Ok(user),
            _ => {
                tracing::info!(email, "Rejected credentials");
                Err(AppError::unauthorized(
                    "Unauthorized",
                    json!({ "reason": "Invalid email or password" }),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUserRepository;
    use chrono::Utc;

    fn test_hasher() -> PasswordHasher {
        PasswordHasher::new("test-password-secret".to_string())
    }

    fn stored_user(email: &str, password: &str) -> User {
        User::new(
            1,
            email.to_string(),
            test_hasher().hash(email, password),
            Utc::now(),
        )
    }

    #[test]
    fn test_hash_consistency() {
        let hasher = test_hasher();

        let hash1 = hasher.hash("a@example.com", "123456");
        let hash2 = hasher.hash("a@example.com", "123456");

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_hash_binds_email() {
        let hasher = test_hasher();
        assert_ne!(
            hasher.hash("a@example.com", "123456"),
            hasher.hash("b@example.com", "123456")
        );
    }

    #[test]
    fn test_hash_secret_matters() {
        let a = PasswordHasher::new("secret-a".to_string());
        let b = PasswordHasher::new("secret-b".to_string());
        assert_ne!(a.hash("e@x.io", "pw1234"), b.hash("e@x.io", "pw1234"));
    }

    #[test]
    fn test_verify() {
        let hasher = test_hasher();
        let hash = hasher.hash("a@example.com", "123456");

        assert!(hasher.verify("a@example.com", "123456", &hash));
        assert!(!hasher.verify("a@example.com", "1234567", &hash));
        assert!(!hasher.verify("a@example.com", "123456", "not-hex"));
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let mut mock_repo = MockUserRepository::new();
        let user = stored_user("a@example.com", "123456");

        mock_repo
            .expect_find_by_email()
            .withf(|email| email == "a@example.com")
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = AuthService::new(Arc::new(mock_repo), test_hasher());

        let result = service.authenticate("a@example.com", "123456").await;

        assert!(result.is_ok());
        assert_eq!(result.unwrap().id, 1);
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let mut mock_repo = MockUserRepository::new();
        let user = stored_user("a@example.com", "123456");

        mock_repo
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = AuthService::new(Arc::new(mock_repo), test_hasher());

        let result = service.authenticate("a@example.com", "654321").await;

        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_email() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(mock_repo), test_hasher());

        let result = service.authenticate("nobody@example.com", "123456").await;

        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }
}
