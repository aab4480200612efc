use crate::errors::PageResult;
use crate::model::post::{Post, PostForm, PostWithAuthor};
use crate::model::tag::Tag;
use chrono::Utc;
use sqlx::{query, query_as, SqlitePool};

impl Post {
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> PageResult<Option<Post>> {
        let post = query_as::<_, Post>("SELECT * FROM posts WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(post)
    }

    pub async fn list_all(pool: &SqlitePool) -> PageResult<Vec<Post>> {
        let posts = query_as::<_, Post>("SELECT * FROM posts ORDER BY id")
            .fetch_all(pool)
            .await?;

        Ok(posts)
    }

    /// The user's posts, newest first.
    pub async fn for_user(pool: &SqlitePool, user_id: i64) -> PageResult<Vec<Post>> {
        let posts =
            query_as::<_, Post>("SELECT * FROM posts WHERE user_id = ? ORDER BY created_at DESC")
                .bind(user_id)
                .fetch_all(pool)
                .await?;

        Ok(posts)
    }

    /// The most recent posts with their authors, for the homepage.
    pub async fn recent_with_authors(
        pool: &SqlitePool,
        limit: i64,
    ) -> PageResult<Vec<PostWithAuthor>> {
        let posts = query_as::<_, PostWithAuthor>(
            r#"
            SELECT p.id, p.title, p.content, p.created_at, p.user_id,
                   u.first_name, u.last_name
            FROM posts p
            INNER JOIN users u ON p.user_id = u.id
            ORDER BY p.created_at DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(posts)
    }

    pub async fn create(pool: &SqlitePool, user_id: i64, form: &PostForm) -> PageResult<Post> {
        let now = Utc::now().timestamp_millis();

        let id = query("INSERT INTO posts (title, content, created_at, user_id) VALUES (?, ?, ?, ?)")
            .bind(&form.title)
            .bind(&form.content)
            .bind(now)
            .bind(user_id)
            .execute(pool)
            .await?
            .last_insert_rowid();

        Ok(Post {
            id,
            title: form.title.clone(),
            content: form.content.clone(),
            created_at: now,
            user_id,
        })
    }

    /// Rewrites title and content; `created_at` and the owner are immutable.
    pub async fn update(pool: &SqlitePool, id: i64, form: &PostForm) -> PageResult<()> {
        query("UPDATE posts SET title = ?, content = ? WHERE id = ?")
            .bind(&form.title)
            .bind(&form.content)
            .bind(id)
            .execute(pool)
            .await?;

        Ok(())
    }

    pub async fn delete(pool: &SqlitePool, id: i64) -> PageResult<()> {
        let mut tx = pool.begin().await?;

        query("DELETE FROM post_tag_assoc WHERE post_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Tags attached to a post, in name order.
    pub async fn tags(pool: &SqlitePool, post_id: i64) -> PageResult<Vec<Tag>> {
        let tags = query_as::<_, Tag>(
            r#"
            SELECT t.id, t.name
            FROM tags t
            INNER JOIN post_tag_assoc pt ON pt.tag_id = t.id
            WHERE pt.post_id = ?
            ORDER BY t.name
            "#,
        )
        .bind(post_id)
        .fetch_all(pool)
        .await?;

        Ok(tags)
    }
}
