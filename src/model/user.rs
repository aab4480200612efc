use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Placeholder avatar shown for users that did not supply an image URL.
pub const DEFAULT_IMAGE_URL: &str =
    "https://www.freeiconspng.com/uploads/icon-user-blue-symbol-people-person-generic--public-domain--21.png";

// which Rust types correspond to which sqlite column types:
// https://docs.rs/sqlx/latest/sqlx/sqlite/types/index.html
#[derive(Debug, Serialize, FromRow, Clone)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub image_url: Option<String>,
}

impl User {
    /// Derived from the name fields, never stored.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn image_or_default(&self) -> &str {
        self.image_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_IMAGE_URL)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UserForm {
    #[validate(length(min = 1, message = "can not be empty"))]
    pub first_name: String,

    #[validate(length(min = 1, message = "can not be empty"))]
    pub last_name: String,

    // An empty submission is stored as NULL; the default avatar kicks in on display.
    pub image_url: Option<String>,
}
