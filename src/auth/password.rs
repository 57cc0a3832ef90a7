use bcrypt::DEFAULT_COST;

use super::AuthError;

/// Credential hashing as an injected capability, so the algorithm can be
/// swapped without touching route logic.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, AuthError>;
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// bcrypt-backed hasher used by the running service.
#[derive(Debug, Clone, Default)]
pub struct Bcrypt;

impl PasswordHasher for Bcrypt {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        bcrypt::hash(password, DEFAULT_COST).map_err(AuthError::Hashing)
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        bcrypt::verify(password, hash).map_err(AuthError::Hashing)
    }
}
