//! User store
//!
//! Abstracts persistence behind a trait so the service layer can be tested
//! against an in-memory implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::db::Database;
use crate::error::{Error, Result};
use crate::models::{Phone, User};

/// Keyed lookup and persistence of user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user by email, phones included.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Insert or update a user by id, returning the stored record.
    ///
    /// Inserting a second user with an existing email must fail with
    /// [`Error::UserAlreadyExists`]; the store, not the caller, is the
    /// authority on email uniqueness.
    async fn save(&self, user: &User) -> Result<User>;
}

/// SQLite implementation of [`UserStore`]
#[derive(Clone)]
pub struct SqliteUserStore {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    name: String,
    email: String,
    password_hash: String,
    token: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    last_login_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct PhoneRow {
    number: i64,
    city_code: i32,
    country_code: String,
}

impl From<PhoneRow> for Phone {
    fn from(row: PhoneRow) -> Self {
        Self {
            number: row.number,
            city_code: row.city_code,
            country_code: row.country_code,
        }
    }
}

impl SqliteUserStore {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.pool.clone(),
        }
    }

    async fn load_phones(&self, user_id: &str) -> Result<Vec<Phone>> {
        let rows: Vec<PhoneRow> =
            sqlx::query_as("SELECT number, city_code, country_code FROM phones WHERE user_id = ? ORDER BY id")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(Phone::from).collect())
    }

    fn assemble(row: UserRow, phones: Vec<Phone>) -> User {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            created_at: row.created_at,
            last_login_at: row.last_login_at,
            is_active: row.is_active,
            token: row.token,
            phones,
        }
    }
}

fn map_unique_violation(err: sqlx::Error) -> Error {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_unique_violation() {
            return Error::UserAlreadyExists;
        }
    }
    err.into()
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, name, email, password_hash, token, is_active, created_at, last_login_at \
             FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let phones = self.load_phones(&row.id).await?;
                Ok(Some(Self::assemble(row, phones)))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, user: &User) -> Result<User> {
        let mut tx = self.pool.begin().await?;

        // Email and created_at are immutable, so the conflict arm leaves
        // them alone. An email collision with a different row trips the
        // UNIQUE constraint and is reported as UserAlreadyExists.
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password_hash, token, is_active, created_at, last_login_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                token = excluded.token,
                is_active = excluded.is_active,
                last_login_at = excluded.last_login_at
            "#,
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.token)
        .bind(user.is_active)
        .bind(user.created_at)
        .bind(user.last_login_at)
        .execute(&mut *tx)
        .await
        .map_err(map_unique_violation)?;

        // Phones are owned by the user and written as a unit.
        sqlx::query("DELETE FROM phones WHERE user_id = ?")
            .bind(&user.id)
            .execute(&mut *tx)
            .await?;

        for phone in &user.phones {
            sqlx::query(
                "INSERT INTO phones (user_id, number, city_code, country_code) VALUES (?, ?, ?, ?)",
            )
            .bind(&user.id)
            .bind(phone.number)
            .bind(phone.city_code)
            .bind(&phone.country_code)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.find_by_email(&user.email)
            .await?
            .ok_or_else(|| Error::Database(sqlx::Error::RowNotFound))
    }
}
