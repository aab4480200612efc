use crate::config::AppConfig;
use crate::errors::PageResult;
use crate::util::common::format_timestamp;
use crate::AppState;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::{Extension, Router};
#[cfg(not(debug_assertions))]
use include_dir::{include_dir, Dir};
use minijinja::Environment;

pub mod post_page;
pub mod tag_page;
pub mod user_page;

pub fn create_routes(config: &AppConfig) -> Router<AppState> {
    let mut env = Environment::new();
    load_templates(&mut env);
    env.add_filter("date", format_timestamp);
    env.add_global("app_name", config.app_name.clone());

    Router::new()
        .merge(user_page::create_routes())
        .merge(post_page::create_routes())
        .merge(tag_page::create_routes())
        .layer(Extension(env))
}

pub(crate) fn render(
    env: &Environment<'static>,
    name: &str,
    ctx: minijinja::Value,
) -> PageResult<Html<String>> {
    let template = env.get_template(name)?;
    Ok(Html(template.render(ctx)?))
}

/// A `302 Found` redirect.
///
/// axum's `Redirect` only offers 303/307/308; the post-submit contract here
/// is the classic 302-to-listing.
pub struct Found(String);

impl Found {
    pub fn to(location: impl Into<String>) -> Self {
        Found(location.into())
    }
}

impl IntoResponse for Found {
    fn into_response(self) -> Response {
        (StatusCode::FOUND, [(header::LOCATION, self.0)]).into_response()
    }
}

#[cfg(not(debug_assertions))]
static TEMPLATES_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/templates");

#[cfg(debug_assertions)]
fn load_templates(env: &mut Environment) {
    use minijinja::path_loader;
    // In development mode, use the file system to load templates in real-time
    env.set_loader(path_loader("templates"));
}

#[cfg(not(debug_assertions))]
fn load_templates(env: &mut Environment<'_>) {
    // In production mode, load templates from the embedded files using include_dir
    add_templates_from(env, &TEMPLATES_DIR);
}

#[cfg(not(debug_assertions))]
fn add_templates_from(env: &mut Environment<'_>, dir: &'static Dir) {
    for subdir in dir.dirs() {
        add_templates_from(env, subdir);
    }

    for file in dir.files() {
        // file.path() is the path relative to templates/, e.g., "users/index.html"
        if let Some(name) = file.path().to_str() {
            let content =
                std::str::from_utf8(file.contents()).expect("Template is not valid utf-8");
            env.add_template(name, content)
                .unwrap_or_else(|e| panic!("Failed to add template {}: {}", name, e));
        }
    }
}
