//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::entity::{role::Role, session::Session, user::User};
use crate::domain::repository::{RoleRepository, SessionRepository, UserRepository};
use crate::domain::value_object::{
    AuthProvider, BlockStatus, EmailIdentity, Password, Status,
};
use crate::error::{IdentityError, IdentityResult};
use kernel::id::{IdPair, RoleId, SessionId, UserId};

/// Joined projection shared by every user lookup.
///
/// Role columns are LEFT JOINed so a user without role links is still
/// found: the blocked/confirmed checks must be reachable before the role
/// check fails.
const QUERY_USER_SELECT: &str = r#"
    SELECT
        users.id AS id,
        users.guid_id AS guid_id,
        users.name AS name,
        users.created_at AS created_at,
        users.confirmed_status AS confirmed_status,
        users.confirmed_changed_at AS confirmed_changed_at,
        users.blocked_status AS blocked_status,
        users.blocked_changed_at AS blocked_changed_at,
        users.blocked_code AS blocked_code,
        users.blocked_reason AS blocked_reason,
        users_email.email AS email,
        users_email.password_hash AS password_hash,
        users_email.password_salt AS password_salt,
        users_email.confirmed_status AS email_confirmed_status,
        users_email.confirmed_changed_at AS email_confirmed_changed_at,
        roles.id AS role_id,
        roles.guid_id AS role_guid_id,
        roles.name AS role_name,
        roles.alias AS role_alias
    FROM identity.users AS users
    INNER JOIN identity.users_email AS users_email ON users.id = users_email.user_id
    LEFT JOIN identity.users_roles AS users_roles ON users.id = users_roles.user_id
    LEFT JOIN identity.roles AS roles ON roles.id = users_roles.role_id
"#;

/// PostgreSQL-backed identity repository
#[derive(Clone)]
pub struct PgIdentityRepository {
    pool: PgPool,
}

impl PgIdentityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgIdentityRepository {
    async fn create(&self, user: &User, role_aliases: &[&str]) -> IdentityResult<UserId> {
        let email = user
            .email
            .as_ref()
            .ok_or_else(|| IdentityError::Internal("User has no email identity".to_string()))?;

        let mut tx = self.pool.begin().await?;

        let user_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO identity.users (
                guid_id,
                name,
                created_at,
                confirmed_status,
                confirmed_changed_at,
                blocked_status,
                blocked_changed_at,
                blocked_code,
                blocked_reason
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(user.id.guid())
        .bind(&user.name)
        .bind(user.created_at)
        .bind(user.confirmed.value)
        .bind(user.confirmed.changed_at)
        .bind(user.blocked.value)
        .bind(user.blocked.changed_at)
        .bind(user.blocked.code)
        .bind(&user.blocked.reason)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO identity.users_email (
                user_id,
                email,
                password_hash,
                password_salt,
                confirmed_status,
                confirmed_changed_at,
                confirmation_code,
                confirmation_code_created_at,
                confirmation_code_expires_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(user_id)
        .bind(&email.value)
        .bind(user.password.as_ref().map(|p| p.hash()))
        .bind(user.password.as_ref().map(|p| p.salt()))
        .bind(email.confirmed_status)
        .bind(email.confirmed_changed_at)
        .bind(&email.confirmation_code)
        .bind(email.confirmation_code_created_at)
        .bind(email.confirmation_code_expires_at)
        .execute(&mut *tx)
        .await?;

        for alias in role_aliases {
            let role_id = sqlx::query_scalar::<_, i64>(
                "SELECT id FROM identity.roles WHERE alias = $1",
            )
            .bind(*alias)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(IdentityError::RoleNotFound)?;

            sqlx::query(
                "INSERT INTO identity.users_roles (user_id, role_id) VALUES ($1, $2)",
            )
            .bind(user_id)
            .bind(role_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(IdPair::from_parts(user_id, user.id.guid()))
    }

    async fn get_by_id(&self, id: i64) -> IdentityResult<Option<User>> {
        let sql = format!("{} WHERE users.id = $1", QUERY_USER_SELECT);

        let rows = sqlx::query_as::<_, UserRoleRow>(&sql)
            .bind(id)
            .fetch_all(&self.pool)
            .await?;

        fold_user(rows)
    }

    async fn get_by_guid(&self, guid: Uuid) -> IdentityResult<Option<User>> {
        let sql = format!("{} WHERE users.guid_id = $1", QUERY_USER_SELECT);

        let rows = sqlx::query_as::<_, UserRoleRow>(&sql)
            .bind(guid)
            .fetch_all(&self.pool)
            .await?;

        fold_user(rows)
    }

    async fn get_email_credentials_user_by_email(
        &self,
        email: &str,
    ) -> IdentityResult<Option<User>> {
        let sql = format!("{} WHERE users_email.email = $1", QUERY_USER_SELECT);

        let rows = sqlx::query_as::<_, UserRoleRow>(&sql)
            .bind(email)
            .fetch_all(&self.pool)
            .await?;

        fold_user(rows)
    }

    async fn update_roles(&self, email: &str, role_aliases: &[&str]) -> IdentityResult<u64> {
        let mut tx = self.pool.begin().await?;

        let user_id = sqlx::query_scalar::<_, i64>(
            "SELECT user_id FROM identity.users_email WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(IdentityError::EmailNotFound)?;

        sqlx::query("DELETE FROM identity.users_roles WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let mut linked = 0u64;
        for alias in role_aliases {
            let role_id = sqlx::query_scalar::<_, i64>(
                "SELECT id FROM identity.roles WHERE alias = $1",
            )
            .bind(*alias)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(IdentityError::RoleNotFound)?;

            sqlx::query(
                "INSERT INTO identity.users_roles (user_id, role_id) VALUES ($1, $2)",
            )
            .bind(user_id)
            .bind(role_id)
            .execute(&mut *tx)
            .await?;

            linked += 1;
        }

        tx.commit().await?;

        Ok(linked)
    }
}

// ============================================================================
// Role Repository Implementation
// ============================================================================

impl RoleRepository for PgIdentityRepository {
    async fn get_by_alias(&self, alias: &str) -> IdentityResult<Option<Role>> {
        let row = sqlx::query_as::<_, RoleRow>(
            "SELECT id, guid_id, name, alias FROM identity.roles WHERE alias = $1",
        )
        .bind(alias)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(RoleRow::into_role))
    }

    async fn create_if_missing(&self, name: &str, alias: &str) -> IdentityResult<RoleId> {
        sqlx::query(
            r#"
            INSERT INTO identity.roles (guid_id, name, alias)
            VALUES ($1, $2, $3)
            ON CONFLICT (alias) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(alias)
        .execute(&self.pool)
        .await?;

        let row = sqlx::query_as::<_, RoleRow>(
            "SELECT id, guid_id, name, alias FROM identity.roles WHERE alias = $1",
        )
        .bind(alias)
        .fetch_one(&self.pool)
        .await?;

        Ok(IdPair::from_parts(row.id, row.guid_id))
    }
}

// ============================================================================
// Session Repository Implementation
// ============================================================================

impl SessionRepository for PgIdentityRepository {
    type Tx = Transaction<'static, Postgres>;

    async fn begin(&self) -> IdentityResult<Self::Tx> {
        Ok(self.pool.begin().await?)
    }

    async fn commit(&self, tx: Self::Tx) -> IdentityResult<()> {
        Ok(tx.commit().await?)
    }

    async fn rollback(&self, tx: Self::Tx) -> IdentityResult<()> {
        Ok(tx.rollback().await?)
    }

    async fn create(&self, tx: &mut Self::Tx, session: &Session) -> IdentityResult<SessionId> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO identity.sessions (
                guid_id,
                user_id,
                provider,
                created_at,
                access_token,
                refresh_token,
                refresh_token_expires_at,
                fingerprint,
                ip
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(session.id.guid())
        .bind(session.user_id)
        .bind(session.provider.as_str())
        .bind(session.created_at)
        .bind(&session.access_token)
        .bind(&session.refresh_token)
        .bind(session.refresh_token_expires_at)
        .bind(&session.fingerprint)
        .bind(session.ip.map(|ip| ip.to_string()))
        .fetch_one(&mut **tx)
        .await?;

        Ok(IdPair::from_parts(id, session.id.guid()))
    }

    async fn get_by_refresh_token_fingerprint(
        &self,
        tx: &mut Self::Tx,
        refresh_token: &str,
        fingerprint: Option<&str>,
    ) -> IdentityResult<Option<Session>> {
        // FOR UPDATE holds the row until the transaction ends, so a token
        // presented by two concurrent refreshes is consumed at most once.
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT
                id,
                guid_id,
                user_id,
                provider,
                created_at,
                access_token,
                refresh_token,
                refresh_token_expires_at,
                fingerprint,
                ip
            FROM identity.sessions
            WHERE refresh_token = $1
              AND ($2::text IS NULL OR fingerprint = $2)
            FOR UPDATE
            "#,
        )
        .bind(refresh_token)
        .bind(fingerprint)
        .fetch_optional(&mut **tx)
        .await?;

        row.map(SessionRow::into_session).transpose()
    }

    async fn remove_by_id(&self, tx: &mut Self::Tx, id: i64) -> IdentityResult<u64> {
        let removed = sqlx::query("DELETE FROM identity.sessions WHERE id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(removed)
    }

    async fn cleanup_expired(&self) -> IdentityResult<u64> {
        let deleted =
            sqlx::query("DELETE FROM identity.sessions WHERE refresh_token_expires_at < $1")
                .bind(Utc::now())
                .execute(&self.pool)
                .await?
                .rows_affected();

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired sessions");

        Ok(deleted)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRoleRow {
    id: i64,
    guid_id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
    confirmed_status: bool,
    confirmed_changed_at: Option<DateTime<Utc>>,
    blocked_status: bool,
    blocked_changed_at: Option<DateTime<Utc>>,
    blocked_code: Option<i32>,
    blocked_reason: Option<String>,
    email: String,
    password_hash: Option<String>,
    password_salt: Option<String>,
    email_confirmed_status: bool,
    email_confirmed_changed_at: Option<DateTime<Utc>>,
    role_id: Option<i64>,
    role_guid_id: Option<Uuid>,
    role_name: Option<String>,
    role_alias: Option<String>,
}

/// Collapse one-row-per-role into a single aggregate
fn fold_user(rows: Vec<UserRoleRow>) -> IdentityResult<Option<User>> {
    let Some(first) = rows.first() else {
        return Ok(None);
    };

    let password = match (&first.password_hash, &first.password_salt) {
        (Some(hash), Some(salt)) => Some(Password::new(hash.clone(), salt.clone())),
        _ => None,
    };

    let email = EmailIdentity::with_confirmation(
        first.email.clone(),
        first.email_confirmed_status,
        first.email_confirmed_changed_at,
        None,
        None,
        None,
    );

    let mut user = User::with_email(
        IdPair::from_parts(first.id, first.guid_id),
        email,
        password,
        first.name.clone(),
        Status::new(
            first.confirmed_status,
            first.confirmed_changed_at.unwrap_or(first.created_at),
        ),
        BlockStatus::new(
            first.blocked_status,
            first.blocked_changed_at.unwrap_or(first.created_at),
            first.blocked_code,
            first.blocked_reason.clone(),
        ),
        first.created_at,
    );

    for row in &rows {
        if let (Some(role_id), Some(role_guid), Some(role_name), Some(role_alias)) =
            (row.role_id, row.role_guid_id, &row.role_name, &row.role_alias)
        {
            user.add_role(Role {
                id: IdPair::from_parts(role_id, role_guid),
                name: role_name.clone(),
                alias: role_alias.clone(),
            });
        }
    }

    Ok(Some(user))
}

#[derive(sqlx::FromRow)]
struct RoleRow {
    id: i64,
    guid_id: Uuid,
    name: String,
    alias: String,
}

impl RoleRow {
    fn into_role(self) -> Role {
        Role {
            id: IdPair::from_parts(self.id, self.guid_id),
            name: self.name,
            alias: self.alias,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    id: i64,
    guid_id: Uuid,
    user_id: i64,
    provider: String,
    created_at: DateTime<Utc>,
    access_token: String,
    refresh_token: String,
    refresh_token_expires_at: DateTime<Utc>,
    fingerprint: String,
    ip: Option<String>,
}

impl SessionRow {
    fn into_session(self) -> IdentityResult<Session> {
        let provider = AuthProvider::from_name(&self.provider).ok_or_else(|| {
            IdentityError::Internal(format!("Unknown auth provider: {}", self.provider))
        })?;

        let mut session = Session::new(
            self.access_token,
            self.refresh_token,
            self.user_id,
            provider,
            self.created_at,
            self.refresh_token_expires_at,
            self.fingerprint,
            self.ip.and_then(|ip| ip.parse().ok()),
        );
        session.id = IdPair::from_parts(self.id, self.guid_id);

        Ok(session)
    }
}
