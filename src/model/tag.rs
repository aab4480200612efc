use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Serialize, FromRow, Clone)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct TagForm {
    #[validate(length(min = 1, message = "can not be empty"))]
    pub name: String,

    // Repeated `posts` checkbox field; absent when no post is selected.
    #[serde(default)]
    pub posts: Vec<i64>,
}
