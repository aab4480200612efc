use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::FormRejection;
use std::error::Error;
use std::fmt;
use tracing::error;
use validator::ValidationErrors;

pub type PageResult<T> = Result<T, PageError>;

/// Crate-wide error for the page handlers.
///
/// `NotFound` renders the 404 page, form and validation problems render the
/// 400 page, and everything else is logged and rendered as the 500 page.
#[derive(Debug)]
pub enum PageError {
    NotFound,
    BadRequest(String),

    FormRejection(FormRejection),
    ValidationError(ValidationErrors),

    Template(minijinja::Error),
    Sqlx(sqlx::Error),
    Anyhow(anyhow::Error),
}

impl PageError {
    fn code(&self) -> StatusCode {
        use PageError::*;

        match self {
            NotFound => StatusCode::NOT_FOUND,
            BadRequest(_) | FormRejection(_) | ValidationError(_) => StatusCode::BAD_REQUEST,
            Template(_) | Sqlx(_) | Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        use PageError::*;

        let page = match self {
            NotFound => PAGE_404,
            BadRequest(ref msg) => {
                error!("bad request: {}", msg);
                PAGE_400
            }
            FormRejection(ref rejection) => {
                error!("form rejected: {}", rejection);
                PAGE_400
            }
            ValidationError(ref errors) => {
                error!("validation failed: {}", errors.to_string().replace('\n', "; "));
                PAGE_400
            }
            Template(ref err) => {
                error!("template error: {:?}", err);
                PAGE_500
            }
            Sqlx(ref err) => {
                error!("sqlx error: {:?}", err);
                PAGE_500
            }
            Anyhow(ref err) => {
                error!("generic error: {:?}", err);
                PAGE_500
            }
        };

        (self.code(), Html(page)).into_response()
    }
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl Error for PageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        use PageError::*;
        match self {
            FormRejection(err) => Some(err),
            ValidationError(err) => Some(err),
            Template(err) => Some(err),
            Sqlx(err) => Some(err),
            Anyhow(err) => err.source(),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for PageError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => PageError::NotFound,
            _ => PageError::Sqlx(err),
        }
    }
}

impl From<minijinja::Error> for PageError {
    fn from(err: minijinja::Error) -> Self {
        PageError::Template(err)
    }
}

impl From<anyhow::Error> for PageError {
    fn from(err: anyhow::Error) -> Self {
        PageError::Anyhow(err)
    }
}

impl From<FormRejection> for PageError {
    fn from(rejection: FormRejection) -> Self {
        PageError::FormRejection(rejection)
    }
}

impl From<ValidationErrors> for PageError {
    fn from(err: ValidationErrors) -> Self {
        PageError::ValidationError(err)
    }
}

pub fn not_found() -> PageError {
    PageError::NotFound
}

pub static PAGE_404: &str = include_str!("../templates/404.html");
pub static PAGE_400: &str = include_str!("../templates/400.html");
pub static PAGE_500: &str = include_str!("../templates/500.html");
