use crate::errors::{not_found, PageResult};
use crate::model::post::Post;
use crate::model::user::{User, UserForm};
use crate::route::{render, Found};
use crate::util::extractor::{Path, ValidatedForm};
use crate::util::flash::{flash, take_flash};
use crate::AppState;
use axum::extract::State;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Extension, Router};
use axum_extra::extract::SignedCookieJar;
use minijinja::{context, Environment};

type Page = PageResult<(SignedCookieJar, Html<String>)>;
type Redirect = PageResult<(SignedCookieJar, Found)>;

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(user_list))
        .route("/users/new", get(new_user_form).post(create_user))
        .route("/users/{id}", get(user_details))
        .route("/users/{id}/edit", get(edit_user_form).post(update_user))
        .route("/users/{id}/delete", post(delete_user))
}

/// Displays all users, ordered by last name then first name.
async fn user_list(
    State(state): State<AppState>,
    Extension(env): Extension<Environment<'static>>,
    jar: SignedCookieJar,
) -> Page {
    let users = User::list_all(&state.db).await?;

    let (jar, messages) = take_flash(jar);
    Ok((jar, render(&env, "users/index.html", context! { users, messages })?))
}

async fn new_user_form(
    Extension(env): Extension<Environment<'static>>,
    jar: SignedCookieJar,
) -> Page {
    let (jar, messages) = take_flash(jar);
    Ok((jar, render(&env, "users/new.html", context! { messages })?))
}

async fn create_user(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    ValidatedForm(form): ValidatedForm<UserForm>,
) -> Redirect {
    let user = User::create(&state.db, &form).await?;

    let jar = flash(jar, format!("User {} added.", user.first_name));
    Ok((jar, Found::to("/users")))
}

/// Displays info for a specific user with their posts, or 404 for an unknown id.
async fn user_details(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(env): Extension<Environment<'static>>,
    jar: SignedCookieJar,
) -> Page {
    let user = User::find_by_id(&state.db, id).await?.ok_or(not_found())?;
    let posts = Post::for_user(&state.db, id).await?;
    let full_name = user.full_name();
    let image_url = user.image_or_default().to_string();

    let (jar, messages) = take_flash(jar);
    let html = render(
        &env,
        "users/details.html",
        context! { user, full_name, image_url, posts, messages },
    )?;
    Ok((jar, html))
}

async fn edit_user_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(env): Extension<Environment<'static>>,
    jar: SignedCookieJar,
) -> Page {
    let user = User::find_by_id(&state.db, id).await?.ok_or(not_found())?;

    let (jar, messages) = take_flash(jar);
    Ok((jar, render(&env, "users/edit.html", context! { user, messages })?))
}

/// Overwrites all mutable fields of an existing user.
async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    jar: SignedCookieJar,
    ValidatedForm(form): ValidatedForm<UserForm>,
) -> Redirect {
    User::find_by_id(&state.db, id).await?.ok_or(not_found())?;
    User::update(&state.db, id, &form).await?;

    let jar = flash(jar, format!("User {} {} edited.", form.first_name, form.last_name));
    Ok((jar, Found::to("/users")))
}

async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    jar: SignedCookieJar,
) -> Redirect {
    let user = User::find_by_id(&state.db, id).await?.ok_or(not_found())?;
    User::delete(&state.db, id).await?;

    let jar = flash(jar, format!("User {} deleted.", user.full_name()));
    Ok((jar, Found::to("/users")))
}
