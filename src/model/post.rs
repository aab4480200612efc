use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Serialize, FromRow, Clone)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    // Epoch milliseconds, set once at creation and never updated.
    pub created_at: i64,
    pub user_id: i64,
}

/// A post joined with its author's name fields, for listings that show both.
#[derive(Debug, Serialize, FromRow)]
pub struct PostWithAuthor {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: i64,
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PostForm {
    #[validate(length(min = 1, message = "can not be empty"))]
    pub title: String,

    #[validate(length(min = 1, message = "can not be empty"))]
    pub content: String,
}
