use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Pool, Postgres, Row};
use uuid::Uuid;

use warden_core::{
    CredentialStore, CredentialStoreError, Email, PasswordDigest, PasswordResetToken,
    ResetTokenId, TotpSecret, User, UserId,
};

pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresCredentialStore { pool }
    }
}

#[async_trait::async_trait]
impl CredentialStore for PostgresCredentialStore {
    #[tracing::instrument(name = "Inserting user into PostgreSQL", skip_all)]
    async fn insert_user(&self, user: User) -> Result<(), CredentialStoreError> {
        let query = sqlx::query(
            r#"
                INSERT INTO users (id, email, password_hash, two_factor_secret, two_factor_activated)
                VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.email().as_ref().expose_secret())
        .bind(user.password_digest().as_ref().expose_secret())
        .bind(
            user.two_factor_secret()
                .map(|s| s.as_ref().expose_secret().clone()),
        )
        .bind(user.two_factor_activated());

        query.execute(&self.pool).await.map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.constraint().is_some() {
                    return CredentialStoreError::DuplicateEmail;
                }
            }
            unexpected(e)
        })?;

        Ok(())
    }

    #[tracing::instrument(name = "Fetching user by email from PostgreSQL", skip_all)]
    async fn find_user_by_email(&self, email: &Email) -> Result<User, CredentialStoreError> {
        let row = sqlx::query(
            r#"
                SELECT id, email, password_hash, two_factor_secret, two_factor_activated
                FROM users
                WHERE email = $1
            "#,
        )
        .bind(email.as_ref().expose_secret())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        let Some(row) = row else {
            return Err(CredentialStoreError::UserNotFound);
        };

        user_from_row(&row)
    }

    #[tracing::instrument(name = "Fetching user by id from PostgreSQL", skip_all)]
    async fn find_user_by_id(&self, id: UserId) -> Result<User, CredentialStoreError> {
        let row = sqlx::query(
            r#"
                SELECT id, email, password_hash, two_factor_secret, two_factor_activated
                FROM users
                WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        let Some(row) = row else {
            return Err(CredentialStoreError::UserNotFound);
        };

        user_from_row(&row)
    }

    #[tracing::instrument(name = "Updating password hash in PostgreSQL", skip_all)]
    async fn update_password_digest(
        &self,
        id: UserId,
        digest: PasswordDigest,
    ) -> Result<(), CredentialStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE users
                SET password_hash = $1
                WHERE id = $2
            "#,
        )
        .bind(digest.as_ref().expose_secret())
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(CredentialStoreError::UserNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Storing two-factor secret in PostgreSQL", skip_all)]
    async fn set_two_factor_secret(
        &self,
        id: UserId,
        secret: TotpSecret,
    ) -> Result<(), CredentialStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE users
                SET two_factor_secret = $1
                WHERE id = $2
            "#,
        )
        .bind(secret.as_ref().expose_secret())
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(CredentialStoreError::UserNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Toggling two-factor activation in PostgreSQL", skip_all)]
    async fn set_two_factor_activated(
        &self,
        id: UserId,
        activated: bool,
    ) -> Result<(), CredentialStoreError> {
        // The invariant lives in the schema too: activation requires an
        // enrolled secret, so the update predicates on its presence.
        let result = sqlx::query(
            r#"
                UPDATE users
                SET two_factor_activated = $1
                WHERE id = $2 AND (NOT $1 OR two_factor_secret IS NOT NULL)
            "#,
        )
        .bind(activated)
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(CredentialStoreError::UserNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Fetching reset token from PostgreSQL", skip_all)]
    async fn find_reset_token(
        &self,
        token: &str,
    ) -> Result<PasswordResetToken, CredentialStoreError> {
        let row = sqlx::query(
            r#"
                SELECT id, user_id, token, expires_at
                FROM password_reset_tokens
                WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        let Some(row) = row else {
            return Err(CredentialStoreError::TokenNotFound);
        };

        reset_token_from_row(&row)
    }

    #[tracing::instrument(name = "Upserting reset token in PostgreSQL", skip_all)]
    async fn upsert_reset_token(
        &self,
        token: PasswordResetToken,
    ) -> Result<(), CredentialStoreError> {
        sqlx::query(
            r#"
                INSERT INTO password_reset_tokens (id, user_id, token, expires_at)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (user_id)
                DO UPDATE SET token = EXCLUDED.token, expires_at = EXCLUDED.expires_at
            "#,
        )
        .bind(token.id().as_uuid())
        .bind(token.user_id().as_uuid())
        .bind(token.token())
        .bind(token.expires_at())
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(())
    }

    #[tracing::instrument(name = "Deleting reset token from PostgreSQL", skip_all)]
    async fn delete_reset_token(&self, id: ResetTokenId) -> Result<(), CredentialStoreError> {
        let result = sqlx::query(
            r#"
                DELETE FROM password_reset_tokens
                WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(CredentialStoreError::TokenNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Consuming reset token in PostgreSQL", skip_all)]
    async fn consume_reset_token(
        &self,
        token: &str,
        new_digest: PasswordDigest,
    ) -> Result<UserId, CredentialStoreError> {
        // Expiry re-check, password update and token deletion form one
        // transaction; the row lock serializes concurrent consumers so the
        // loser observes TokenNotFound instead of a double spend.
        let mut tx = self.pool.begin().await.map_err(unexpected)?;

        let row = sqlx::query(
            r#"
                SELECT id, user_id, expires_at
                FROM password_reset_tokens
                WHERE token = $1
                FOR UPDATE
            "#,
        )
        .bind(token)
        .fetch_optional(&mut *tx)
        .await
        .map_err(unexpected)?;

        let Some(row) = row else {
            return Err(CredentialStoreError::TokenNotFound);
        };

        let token_id: Uuid = row.try_get("id").map_err(unexpected)?;
        let user_id: Uuid = row.try_get("user_id").map_err(unexpected)?;
        let expires_at: DateTime<Utc> = row.try_get("expires_at").map_err(unexpected)?;

        if Utc::now() >= expires_at {
            return Err(CredentialStoreError::TokenExpired);
        }

        sqlx::query(
            r#"
                UPDATE users
                SET password_hash = $1
                WHERE id = $2
            "#,
        )
        .bind(new_digest.as_ref().expose_secret())
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(unexpected)?;

        sqlx::query(
            r#"
                DELETE FROM password_reset_tokens
                WHERE id = $1
            "#,
        )
        .bind(token_id)
        .execute(&mut *tx)
        .await
        .map_err(unexpected)?;

        tx.commit().await.map_err(unexpected)?;

        Ok(UserId::from(user_id))
    }
}

fn unexpected(e: impl ToString) -> CredentialStoreError {
    CredentialStoreError::UnexpectedError(e.to_string())
}

fn user_from_row(row: &PgRow) -> Result<User, CredentialStoreError> {
    let id: Uuid = row.try_get("id").map_err(unexpected)?;
    let email: String = row.try_get("email").map_err(unexpected)?;
    let password_hash: String = row.try_get("password_hash").map_err(unexpected)?;
    let two_factor_secret: Option<String> =
        row.try_get("two_factor_secret").map_err(unexpected)?;
    let two_factor_activated: bool = row.try_get("two_factor_activated").map_err(unexpected)?;

    let email = Email::parse(Secret::from(email)).map_err(unexpected)?;
    let two_factor_secret = two_factor_secret
        .map(|s| TotpSecret::parse(Secret::from(s)))
        .transpose()
        .map_err(unexpected)?;

    User::from_parts(
        UserId::from(id),
        email,
        PasswordDigest::from(Secret::from(password_hash)),
        two_factor_secret,
        two_factor_activated,
    )
    .map_err(unexpected)
}

fn reset_token_from_row(row: &PgRow) -> Result<PasswordResetToken, CredentialStoreError> {
    let id: Uuid = row.try_get("id").map_err(unexpected)?;
    let user_id: Uuid = row.try_get("user_id").map_err(unexpected)?;
    let token: String = row.try_get("token").map_err(unexpected)?;
    let expires_at: DateTime<Utc> = row.try_get("expires_at").map_err(unexpected)?;

    Ok(PasswordResetToken::from_parts(
        ResetTokenId::from(id),
        UserId::from(user_id),
        token,
        expires_at,
    ))
}
