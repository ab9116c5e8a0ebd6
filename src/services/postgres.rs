use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{GeneratedName, Post, PostSort, Review, TrendingPost};

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("Connection pool error: {0}")]
    PoolError(#[from] deadpool_postgres::PoolError),

    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// PostgreSQL client for the community write path.
///
/// The breed reference data lives in the hosted read-only store; this
/// database holds everything users produce: feed posts, breed reviews,
/// match feedback from the result page, and generated-name history.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL with URL: {}", url);

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }

    /// Insert an already-moderated post and return the stored row.
    pub async fn create_post(
        &self,
        user_id: Uuid,
        user_name: &str,
        content: &str,
        image_url: Option<&str>,
        category: Option<&str>,
    ) -> Result<Post, PostgresError> {
        let query = r#"
            INSERT INTO posts (user_id, user_name, content, image_url, category)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_name, content, image_url, likes_count, is_official, category, created_at
        "#;

        let row = sqlx::query(query)
            .bind(user_id)
            .bind(user_name)
            .bind(content)
            .bind(image_url)
            .bind(category)
            .fetch_one(&self.pool)
            .await?;

        let post = Self::post_from_row(&row);
        tracing::debug!("Created post {} by {}", post.id, post.user_name);
        Ok(post)
    }

    /// List feed posts, newest or oldest first, optionally by category.
    pub async fn list_posts(
        &self,
        sort: PostSort,
        category: Option<&str>,
    ) -> Result<Vec<Post>, PostgresError> {
        let order = match sort {
            PostSort::Latest => "DESC",
            PostSort::Oldest => "ASC",
        };

        let query = format!(
            r#"
            SELECT id, user_name, content, image_url, likes_count, is_official, category, created_at
            FROM posts
            WHERE ($1::text IS NULL OR category = $1)
            ORDER BY created_at {}
            "#,
            order
        );

        let rows = sqlx::query(&query)
            .bind(category)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(Self::post_from_row).collect())
    }

    /// Top posts by likes over the trailing seven days.
    pub async fn trending_posts(&self) -> Result<Vec<TrendingPost>, PostgresError> {
        let query = r#"
            SELECT id, content, likes_count
            FROM posts
            WHERE created_at >= NOW() - INTERVAL '7 days'
            ORDER BY likes_count DESC
            LIMIT 5
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        Ok(rows
            .iter()
            .map(|row| TrendingPost {
                id: row.get("id"),
                content: row.get("content"),
                likes_count: row.get("likes_count"),
            })
            .collect())
    }

    /// All reviews for a breed, newest first.
    pub async fn reviews_for_breed(&self, breed: &str) -> Result<Vec<Review>, PostgresError> {
        let query = r#"
            SELECT id, pet_breed, user_name, rating, content, context_tags, created_at
            FROM reviews
            WHERE pet_breed = $1
            ORDER BY created_at DESC
        "#;

        let rows = sqlx::query(query).bind(breed).fetch_all(&self.pool).await?;

        Ok(rows
            .iter()
            .map(|row| Review {
                id: row.get("id"),
                pet_breed: row.get("pet_breed"),
                user_name: row.get("user_name"),
                rating: row.get("rating"),
                content: row.get("content"),
                context_tags: row.get("context_tags"),
                created_at: row.get("created_at"),
            })
            .collect())
    }

    /// Record the result page's 1-5 rating for a recommendation.
    pub async fn record_feedback(
        &self,
        breed_id: &str,
        score: i16,
    ) -> Result<(), PostgresError> {
        if !(1..=5).contains(&score) {
            return Err(PostgresError::InvalidInput(format!(
                "feedback score {} out of range",
                score
            )));
        }

        let query = r#"
            INSERT INTO match_feedback (breed_id, score)
            VALUES ($1, $2)
        "#;

        sqlx::query(query)
            .bind(breed_id)
            .bind(score)
            .execute(&self.pool)
            .await?;

        tracing::debug!("Recorded feedback {} for breed {}", score, breed_id);
        Ok(())
    }

    /// Persist one generation batch to name history.
    pub async fn record_generated_names(
        &self,
        pet_type: &str,
        style: Option<&str>,
        names: &[GeneratedName],
    ) -> Result<(), PostgresError> {
        let query = r#"
            INSERT INTO generated_names (pet_type, style, name, meaning)
            SELECT $1, $2, name, meaning
            FROM UNNEST($3::text[], $4::text[]) AS batch(name, meaning)
        "#;

        let name_col: Vec<String> = names.iter().map(|n| n.name.clone()).collect();
        let meaning_col: Vec<String> = names.iter().map(|n| n.meaning.clone()).collect();

        sqlx::query(query)
            .bind(pet_type)
            .bind(style)
            .bind(&name_col)
            .bind(&meaning_col)
            .execute(&self.pool)
            .await?;

        tracing::debug!("Recorded {} generated names for {}", names.len(), pet_type);
        Ok(())
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }

    fn post_from_row(row: &sqlx::postgres::PgRow) -> Post {
        Post {
            id: row.get("id"),
            user_name: row.get("user_name"),
            content: row.get("content"),
            image_url: row.get("image_url"),
            likes_count: row.get("likes_count"),
            is_official: row.get("is_official"),
            category: row.get("category"),
            created_at: row.get("created_at"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_score_bounds() {
        assert!((1..=5).contains(&3i16));
        assert!(!(1..=5).contains(&0i16));
        assert!(!(1..=5).contains(&6i16));
    }

    #[test]
    fn test_post_sort_order_fragments() {
        // the two sort variants map to opposite ORDER BY directions
        let latest = match PostSort::Latest {
            PostSort::Latest => "DESC",
            PostSort::Oldest => "ASC",
        };
        assert_eq!(latest, "DESC");
    }
}
