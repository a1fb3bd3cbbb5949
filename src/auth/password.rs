use crate::error::AppError;
use bcrypt::Version;

/// Output of hashing a password: the full hash plus the salt it was made with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordDigest {
    pub hash: String,
    pub salt: String,
}

/// Hash-and-compare capability used by the credential store.
pub trait PasswordHasher: Send + Sync {
    /// Hashes `password` with a fresh random salt.
    fn hash(&self, password: &str) -> Result<PasswordDigest, AppError>;

    /// Re-hashes `password` with the salt embedded in `hash` and compares.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError>;
}

/// bcrypt-backed [`PasswordHasher`].
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, password: &str) -> Result<PasswordDigest, AppError> {
        let parts = bcrypt::hash_with_result(password, self.cost)
            .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))?;

        Ok(PasswordDigest {
            hash: parts.format_for_version(Version::TwoB),
            salt: parts.get_salt(),
        })
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        bcrypt::verify(password, hash)
            .map_err(|e| AppError::InternalServerError(format!("Failed to verify password: {}", e)))
    }
}
