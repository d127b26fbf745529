//! Repository for the `screens` table.

use designsight_core::feedback::{append_comment, Comment, FeedbackItem};
use designsight_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::screen::{CreateScreen, Screen};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, image_url, feedback_items, gemini_suggestions, uploaded_at";

/// Result of [`ScreenRepo::append_comment`].
#[derive(Debug, Clone)]
pub enum CommentAppend {
    /// The comment was stored; carries the updated item.
    Appended(FeedbackItem),
    ScreenNotFound,
    /// The screen exists but neither array contains the item.
    ItemNotFound,
}

/// Provides persistence for screens and their embedded feedback.
pub struct ScreenRepo;

impl ScreenRepo {
    /// Insert a screen together with both feedback arrays.
    pub async fn create(pool: &PgPool, input: &CreateScreen) -> Result<Screen, sqlx::Error> {
        let query = format!(
            "INSERT INTO screens (project_id, image_url, feedback_items, gemini_suggestions)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Screen>(&query)
            .bind(input.project_id)
            .bind(&input.image_url)
            .bind(Json(&input.feedback_items))
            .bind(Json(&input.gemini_suggestions))
            .fetch_one(pool)
            .await
    }

    /// Find a screen by ID regardless of project.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Screen>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM screens WHERE id = $1");
        sqlx::query_as::<_, Screen>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a screen by ID, scoped to `project_id`.
    pub async fn find_for_project(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
    ) -> Result<Option<Screen>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM screens WHERE id = $1 AND project_id = $2");
        sqlx::query_as::<_, Screen>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's screens, most recently uploaded first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Screen>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM screens WHERE project_id = $1
             ORDER BY uploaded_at DESC, id DESC"
        );
        sqlx::query_as::<_, Screen>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Append `comment` to feedback item `item_id` of screen `screen_id`.
    ///
    /// The item is searched in `feedback_items` first, then in
    /// `gemini_suggestions`. The row is locked for the read-modify-write so
    /// concurrent appends to the same screen are serialized.
    pub async fn append_comment(
        pool: &PgPool,
        screen_id: DbId,
        item_id: Uuid,
        comment: Comment,
    ) -> Result<CommentAppend, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM screens WHERE id = $1 FOR UPDATE");
        let Some(screen) = sqlx::query_as::<_, Screen>(&query)
            .bind(screen_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(CommentAppend::ScreenNotFound);
        };

        let Json(mut feedback_items) = screen.feedback_items;
        let Json(mut gemini_suggestions) = screen.gemini_suggestions;
        let Some(updated) = append_comment(
            &mut [&mut feedback_items, &mut gemini_suggestions],
            item_id,
            comment,
        ) else {
            return Ok(CommentAppend::ItemNotFound);
        };

        sqlx::query(
            "UPDATE screens SET feedback_items = $2, gemini_suggestions = $3 WHERE id = $1",
        )
        .bind(screen_id)
        .bind(Json(&feedback_items))
        .bind(Json(&gemini_suggestions))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::debug!(screen_id, %item_id, "Comment appended");
        Ok(CommentAppend::Appended(updated))
    }
}
