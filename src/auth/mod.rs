pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

pub use extractors::CurrentUser;
pub use middleware::AuthMiddleware;
pub use password::{BcryptHasher, PasswordDigest, PasswordHasher};
pub use token::{Claims, JwtIssuer, TokenIssuer, TokenPayload};

lazy_static! {
    // Regex for username validation: alphanumeric, underscores, hyphens
    static ref USERNAME_REGEX: regex::Regex = regex::Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap();
}

/// Payload of both `POST /auth/signup` and `POST /auth/signin`.
///
/// The rules are only enforced on sign-up. Sign-in compares whatever it is given,
/// so a malformed password is reported the same way as a wrong one.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AuthCredentials {
    /// Between 4 and 20 characters: letters, digits, underscores or hyphens.
    #[validate(
        length(min = 4, max = 20),
        regex(
            path = "USERNAME_REGEX",
            message = "Username must be alphanumeric, underscores, or hyphens"
        )
    )]
    pub username: String,
    /// Between 8 and 20 characters, see [`validate_password_strength`].
    #[validate(
        length(min = 8, max = 20),
        custom = "validate_password_strength"
    )]
    pub password: String,
}

/// Requires an uppercase letter, a lowercase letter and a digit or symbol.
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let has_upper = password.chars().any(|c| c.is_uppercase());
    let has_lower = password.chars().any(|c| c.is_lowercase());
    let has_digit_or_symbol = password.chars().any(|c| !c.is_alphabetic());

    if has_upper && has_lower && has_digit_or_symbol {
        Ok(())
    } else {
        let mut error = ValidationError::new("password_strength");
        error.message = Some("password too weak".into());
        Err(error)
    }
}

/// Response of a successful sign-in.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub access_token: String,
}
