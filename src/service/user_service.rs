use crate::errors::PageResult;
use crate::model::user::{User, UserForm};
use sqlx::{query, query_as, SqlitePool};

impl User {
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> PageResult<Option<User>> {
        let user = query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }

    /// All users, ordered by last name then first name.
    pub async fn list_all(pool: &SqlitePool) -> PageResult<Vec<User>> {
        let users =
            query_as::<_, User>("SELECT * FROM users ORDER BY last_name, first_name")
                .fetch_all(pool)
                .await?;

        Ok(users)
    }

    pub async fn create(pool: &SqlitePool, form: &UserForm) -> PageResult<User> {
        let image_url = normalize_image_url(&form.image_url);

        let id = query("INSERT INTO users (first_name, last_name, image_url) VALUES (?, ?, ?)")
            .bind(&form.first_name)
            .bind(&form.last_name)
            .bind(&image_url)
            .execute(pool)
            .await?
            .last_insert_rowid();

        Ok(User {
            id,
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
            image_url,
        })
    }

    /// Full-field replacement, not a partial patch.
    pub async fn update(pool: &SqlitePool, id: i64, form: &UserForm) -> PageResult<()> {
        let image_url = normalize_image_url(&form.image_url);

        query("UPDATE users SET first_name = ?, last_name = ?, image_url = ? WHERE id = ?")
            .bind(&form.first_name)
            .bind(&form.last_name)
            .bind(&image_url)
            .bind(id)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Deletes a user together with their posts and those posts' tag
    /// associations, in one transaction.
    pub async fn delete(pool: &SqlitePool, id: i64) -> PageResult<()> {
        let mut tx = pool.begin().await?;

        query("DELETE FROM post_tag_assoc WHERE post_id IN (SELECT id FROM posts WHERE user_id = ?)")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        query("DELETE FROM posts WHERE user_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}

// An empty text input is submitted as "", which should not shadow the default avatar.
fn normalize_image_url(image_url: &Option<String>) -> Option<String> {
    image_url
        .as_deref()
        .filter(|url| !url.is_empty())
        .map(String::from)
}
