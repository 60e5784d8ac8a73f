use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Todo record in the database. `user_id` is bound at creation and never
/// reassigned; every query below is scoped to it. Clients see `TodoResponse`,
/// not this row.
#[derive(Debug, Clone, FromRow)]
pub struct Todo {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub completed: bool,
    pub created_at: OffsetDateTime,
}

impl Todo {
    pub async fn list_by_owner(db: &PgPool, owner: Uuid) -> Result<Vec<Todo>, sqlx::Error> {
        sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, user_id, title, completed, created_at
            FROM todos
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(owner)
        .fetch_all(db)
        .await
    }

    pub async fn insert(db: &PgPool, owner: Uuid, title: &str) -> Result<Todo, sqlx::Error> {
        sqlx::query_as::<_, Todo>(
            r#"
            INSERT INTO todos (user_id, title)
            VALUES ($1, $2)
            RETURNING id, user_id, title, completed, created_at
            "#,
        )
        .bind(owner)
        .bind(title)
        .fetch_one(db)
        .await
    }

    /// Patch title and/or completed in one statement. Returns `None` when the
    /// id is unknown or owned by someone else; the two cases are not
    /// distinguished.
    pub async fn update(
        db: &PgPool,
        owner: Uuid,
        id: Uuid,
        title: Option<&str>,
        completed: Option<bool>,
    ) -> Result<Option<Todo>, sqlx::Error> {
        sqlx::query_as::<_, Todo>(
            r#"
            UPDATE todos
            SET title = COALESCE($3, title),
                completed = COALESCE($4, completed)
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, title, completed, created_at
            "#,
        )
        .bind(id)
        .bind(owner)
        .bind(title)
        .bind(completed)
        .fetch_optional(db)
        .await
    }

    /// Returns false when nothing was deleted (unknown or foreign id).
    pub async fn delete(db: &PgPool, owner: Uuid, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM todos
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(owner)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
