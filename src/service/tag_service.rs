use crate::errors::PageResult;
use crate::model::post::Post;
use crate::model::tag::Tag;
use sqlx::{query, query_as, Sqlite, SqlitePool, Transaction};

impl Tag {
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> PageResult<Option<Tag>> {
        let tag = query_as::<_, Tag>("SELECT * FROM tags WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(tag)
    }

    pub async fn list_all(pool: &SqlitePool) -> PageResult<Vec<Tag>> {
        let tags = query_as::<_, Tag>("SELECT * FROM tags ORDER BY name")
            .fetch_all(pool)
            .await?;

        Ok(tags)
    }

    pub async fn create(pool: &SqlitePool, name: &str, post_ids: &[i64]) -> PageResult<Tag> {
        let mut tx = pool.begin().await?;

        let id = query("INSERT INTO tags (name) VALUES (?)")
            .bind(name)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

        Tag::replace_post_assoc(&mut tx, id, post_ids, true).await?;

        tx.commit().await?;

        Ok(Tag {
            id,
            name: name.to_string(),
        })
    }

    /// Rewrites the name and replaces the full post-association set.
    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        name: &str,
        post_ids: &[i64],
    ) -> PageResult<()> {
        let mut tx = pool.begin().await?;

        query("UPDATE tags SET name = ? WHERE id = ?")
            .bind(name)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        Tag::replace_post_assoc(&mut tx, id, post_ids, false).await?;

        tx.commit().await?;
        Ok(())
    }

    pub async fn delete(pool: &SqlitePool, id: i64) -> PageResult<()> {
        let mut tx = pool.begin().await?;

        query("DELETE FROM post_tag_assoc WHERE tag_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        query("DELETE FROM tags WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Posts carrying this tag, newest first.
    pub async fn posts(pool: &SqlitePool, tag_id: i64) -> PageResult<Vec<Post>> {
        let posts = query_as::<_, Post>(
            r#"
            SELECT p.*
            FROM posts p
            INNER JOIN post_tag_assoc pt ON pt.post_id = p.id
            WHERE pt.tag_id = ?
            ORDER BY p.created_at DESC
            "#,
        )
        .bind(tag_id)
        .fetch_all(pool)
        .await?;

        Ok(posts)
    }

    /// Ids of the posts currently associated with this tag.
    pub async fn post_ids(pool: &SqlitePool, tag_id: i64) -> PageResult<Vec<i64>> {
        let ids: Vec<(i64,)> =
            query_as("SELECT post_id FROM post_tag_assoc WHERE tag_id = ? ORDER BY post_id")
                .bind(tag_id)
                .fetch_all(pool)
                .await?;

        Ok(ids.into_iter().map(|(id,)| id).collect())
    }

    async fn replace_post_assoc(
        tx: &mut Transaction<'_, Sqlite>,
        tag_id: i64,
        post_ids: &[i64],
        is_new_tag: bool,
    ) -> PageResult<()> {
        // Remove old relationships if not a new tag
        if !is_new_tag {
            query("DELETE FROM post_tag_assoc WHERE tag_id = ?")
                .bind(tag_id)
                .execute(&mut **tx)
                .await?;
        }

        if post_ids.is_empty() {
            return Ok(());
        }

        // Unknown ids are dropped by the join against posts, matching the
        // original association-by-query behavior.
        let post_ids = serde_json::to_string(post_ids).unwrap();
        query(
            r#"
            INSERT OR IGNORE INTO post_tag_assoc (post_id, tag_id)
            SELECT id, ? FROM posts
            WHERE id IN (SELECT value FROM json_each(?))
            "#,
        )
        .bind(tag_id)
        .bind(post_ids)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}
