//! User Repository

use super::{RepoError, RepoResult};
use shared::error::ErrorCode;
use shared::models::User;
use sqlx::SqlitePool;

const SELECT: &str = "SELECT id, username, is_staff, is_superuser, created_at FROM users";

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    is_staff: bool,
    is_superuser: bool,
    created_at: i64,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            is_staff: row.is_staff,
            is_superuser: row.is_superuser,
            created_at: row.created_at,
        }
    }
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<User>> {
    let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Into::into))
}

/// User plus stored password hash, for login
pub async fn find_credentials(
    pool: &SqlitePool,
    username: &str,
) -> RepoResult<Option<(User, String)>> {
    #[derive(sqlx::FromRow)]
    struct Row {
        #[sqlx(flatten)]
        user: UserRow,
        password_hash: String,
    }

    let row = sqlx::query_as::<_, Row>(
        "SELECT id, username, is_staff, is_superuser, created_at, password_hash FROM users WHERE username = ? LIMIT 1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(|r| (r.user.into(), r.password_hash)))
}

pub async fn create(
    pool: &SqlitePool,
    username: &str,
    password_hash: &str,
    is_staff: bool,
) -> RepoResult<User> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO users (username, password_hash, is_staff, is_superuser, created_at) VALUES (?, ?, ?, 0, ?) RETURNING id",
    )
    .bind(username)
    .bind(password_hash)
    .bind(is_staff)
    .bind(shared::util::now_millis())
    .fetch_one(pool)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => RepoError::Business(
            ErrorCode::UsernameExists,
            format!("Username '{username}' is already taken"),
        ),
        other => other,
    })?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create user".into()))
}

/// Create the superuser if missing, otherwise make sure it keeps its flags.
/// An existing password is left alone. Returns `true` when created.
pub async fn ensure_superuser(
    pool: &SqlitePool,
    username: &str,
    password_hash: &str,
) -> RepoResult<bool> {
    let inserted = sqlx::query(
        "INSERT INTO users (username, password_hash, is_staff, is_superuser, created_at) VALUES (?, ?, 1, 1, ?) \
         ON CONFLICT (username) DO UPDATE SET is_staff = 1, is_superuser = 1",
    )
    .bind(username)
    .bind(password_hash)
    .bind(shared::util::now_millis())
    .execute(pool)
    .await?;
    // rows_affected is 1 for both paths; compare against the generated id
    let created = inserted.last_insert_rowid()
        == sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE username = ?")
            .bind(username)
            .fetch_one(pool)
            .await?;
    Ok(created)
}

/// Grant or revoke kitchen access
pub async fn set_staff(pool: &SqlitePool, id: i64, is_staff: bool) -> RepoResult<User> {
    let rows = sqlx::query("UPDATE users SET is_staff = ? WHERE id = ?")
        .bind(is_staff)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("User {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("User {id} not found")))
}
