//! Data models for the login service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User model (stored entity).
///
/// `email` and `created_at` are immutable after creation; `last_login_at`
/// and `token` are refreshed on every successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub last_login_at: DateTime<Utc>,
    pub is_active: bool,
    /// Most recently issued token. Overwritten on each login; previously
    /// issued tokens remain valid until they expire on their own.
    pub token: String,
    pub phones: Vec<Phone>,
}

/// Phone record owned by a user. Created together with the user and never
/// mutated independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phone {
    pub number: i64,
    #[serde(rename = "citycode")]
    pub city_code: i32,
    #[serde(rename = "countrycode")]
    pub country_code: String,
}

/// User response (without the password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub last_login_at: DateTime<Utc>,
    pub is_active: bool,
    pub token: String,
    pub phones: Vec<Phone>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
            last_login_at: user.last_login_at,
            is_active: user.is_active,
            token: user.token,
            phones: user.phones,
        }
    }
}

/// Registration request payload
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phones: Vec<PhoneRequest>,
}

/// Phone entry in a registration request
#[derive(Debug, Clone, Deserialize)]
pub struct PhoneRequest {
    pub number: i64,
    #[serde(rename = "citycode")]
    pub city_code: i32,
    #[serde(rename = "countrycode")]
    pub country_code: String,
}

impl From<PhoneRequest> for Phone {
    fn from(req: PhoneRequest) -> Self {
        Self {
            number: req.number,
            city_code: req.city_code,
            country_code: req.country_code,
        }
    }
}

/// JWT claims
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the account email
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}
