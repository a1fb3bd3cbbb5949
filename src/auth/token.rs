use crate::error::AppError;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Identity carried inside an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    pub username: String,
}

/// Represents the claims encoded within a JWT (JSON Web Token).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(flatten)]
    pub payload: TokenPayload,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: usize,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

/// Sign-and-verify capability for access tokens.
pub trait TokenIssuer: Send + Sync {
    /// Produces a signed token embedding `payload` and an expiry.
    fn issue(&self, payload: &TokenPayload) -> Result<String, AppError>;

    /// Checks signature and expiry, returning the decoded claims.
    fn verify(&self, token: &str) -> Result<Claims, AppError>;
}

/// HS256 JWT issuer holding the process-wide signing secret.
#[derive(Clone)]
pub struct JwtIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expires_in: chrono::Duration,
}

impl JwtIssuer {
    /// `expires_in_secs` is the lifetime of every token issued.
    pub fn new(secret: &str, expires_in_secs: i64) -> Result<Self, AppError> {
        let expires_in = chrono::Duration::try_seconds(expires_in_secs).ok_or_else(|| {
            AppError::InternalServerError(format!(
                "Token lifetime of {} seconds is out of range",
                expires_in_secs
            ))
        })?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expires_in,
        })
    }
}

impl TokenIssuer for JwtIssuer {
    fn issue(&self, payload: &TokenPayload) -> Result<String, AppError> {
        let now = chrono::Utc::now();
        let expiration = now
            .checked_add_signed(self.expires_in)
            .ok_or_else(|| AppError::InternalServerError("Token expiry out of range".into()))?;

        let claims = Claims {
            payload: payload.clone(),
            iat: now.timestamp().max(0) as usize,
            exp: expiration.timestamp().max(0) as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
    }

    fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
    }
}
