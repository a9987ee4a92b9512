use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_user(row: &PgRow) -> Result<User, UserError> {
    let db_err = |e: sqlx::Error| UserError::DatabaseError(e.to_string());

    let email: Option<String> = row.try_get("email").map_err(db_err)?;

    Ok(User {
        username: Username::new(row.try_get::<String, _>("username").map_err(db_err)?)?,
        email: email.map(EmailAddress::new).transpose()?,
        full_name: row.try_get("full_name").map_err(db_err)?,
        disabled: row.try_get("disabled").map_err(db_err)?,
        superuser: row.try_get("superuser").map_err(db_err)?,
        hashed_password: row.try_get("hashed_password").map_err(db_err)?,
        created_at: row.try_get("created_at").map_err(db_err)?,
    })
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        sqlx::query(
            r#"
            INSERT INTO users (username, email, full_name, disabled, superuser, hashed_password, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.username.as_str())
        .bind(user.email.as_ref().map(|e| e.as_str()))
        .bind(user.full_name.as_deref())
        .bind(user.disabled)
        .bind(user.superuser)
        .bind(&user.hashed_password)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                // Unique index on username closes the check-then-insert race
                if db_err.is_unique_violation() {
                    return UserError::UsernameTaken(user.username.as_str().to_string());
                }
            }
            UserError::DatabaseError(e.to_string())
        })?;

        Ok(user)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        let row = sqlx::query(
            r#"
            SELECT username, email, full_name, disabled, superuser, hashed_password, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.as_ref().map(row_to_user).transpose()
    }
}
