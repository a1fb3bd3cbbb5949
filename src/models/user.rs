use sqlx::FromRow;

/// A registered account. Never serialized: the password hash must not reach clients.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    /// bcrypt hash, which embeds its own salt.
    pub password_hash: String,
    /// The salt portion of `password_hash`, stored alongside it.
    pub salt: String,
}

/// A user row about to be inserted.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub salt: String,
}
