use crate::errors::PageError;
use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use validator::Validate;

/// an extractor that internally uses `axum_extra::extract::Form` but has a custom rejection
///
/// The axum-extra variant is used instead of `axum::extract::Form` because it
/// decodes repeated fields (the `posts` checkboxes on the tag forms) into a `Vec`.
#[derive(FromRequest)]
#[from_request(via(axum_extra::extract::Form), rejection(PageError))]
pub struct Form<T>(pub T);

/// an extractor that internally uses `crate::util::extractor::Form` and adds validation
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedForm<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedForm<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Form<T>: FromRequest<S, Rejection = PageError>,
{
    type Rejection = PageError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedForm(value))
    }
}

/// an extractor that internally uses `axum::extract::Path` but has a custom rejection
///
/// A path segment that fails to deserialize (e.g. `/users/abc` where an integer
/// id is expected) is treated the same as an unmatched route and renders the
/// 404 page. Only programmer mistakes (unsupported types, missing params) are
/// surfaced as server errors.
pub struct Path<T>(pub T);

impl<S, T> FromRequestParts<S> for Path<T>
where
    // these trait bounds are copied from `impl FromRequest for axum::extract::path::Path`
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = PageError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        use axum::extract::path::ErrorKind::*;

        match axum::extract::Path::<T>::from_request_parts(parts, state).await {
            Ok(value) => Ok(Self(value.0)),
            Err(rejection) => Err(match rejection {
                PathRejection::FailedToDeserializePathParams(inner) => {
                    let kind = inner.into_kind();

                    match &kind {
                        // this error is caused by the programmer using an unsupported type
                        // (such as nested maps) so respond with `500` instead
                        UnsupportedType { .. } => {
                            PageError::Anyhow(anyhow::anyhow!(kind.to_string()))
                        }
                        _ => PageError::NotFound,
                    }
                }
                PathRejection::MissingPathParams(error) => {
                    PageError::Anyhow(anyhow::anyhow!(error.to_string()))
                }
                _ => PageError::Anyhow(anyhow::anyhow!(format!(
                    "Unhandled path rejection: {rejection}"
                ))),
            }),
        }
    }
}
