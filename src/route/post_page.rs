use crate::errors::{not_found, PageResult};
use crate::model::post::{Post, PostForm};
use crate::model::user::User;
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

const HOMEPAGE_POST_COUNT: i64 = 5;

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(homepage))
        .route(
            "/users/{user_id}/posts/new",
            get(new_post_form).post(create_post),
        )
        .route("/posts/{id}", get(post_details))
        .route("/posts/{id}/edit", get(edit_post_form).post(update_post))
        .route("/posts/{id}/delete", post(delete_post))
}

/// Displays the most recent posts, newest first.
async fn homepage(
    State(state): State<AppState>,
    Extension(env): Extension<Environment<'static>>,
    jar: SignedCookieJar,
) -> Page {
    let posts = Post::recent_with_authors(&state.db, HOMEPAGE_POST_COUNT).await?;

    let (jar, messages) = take_flash(jar);
    Ok((jar, render(&env, "posts/homepage.html", context! { posts, messages })?))
}

async fn new_post_form(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Extension(env): Extension<Environment<'static>>,
    jar: SignedCookieJar,
) -> Page {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or(not_found())?;
    let full_name = user.full_name();

    let (jar, messages) = take_flash(jar);
    let html = render(&env, "posts/new.html", context! { user, full_name, messages })?;
    Ok((jar, html))
}

async fn create_post(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    jar: SignedCookieJar,
    ValidatedForm(form): ValidatedForm<PostForm>,
) -> Redirect {
    User::find_by_id(&state.db, user_id)
        .await?
        .ok_or(not_found())?;
    let new_post = Post::create(&state.db, user_id, &form).await?;

    let jar = flash(jar, format!("Post '{}' added.", new_post.title));
    Ok((jar, Found::to(format!("/users/{user_id}"))))
}

/// Displays a post with its author and tags, or 404 for an unknown id.
async fn post_details(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(env): Extension<Environment<'static>>,
    jar: SignedCookieJar,
) -> Page {
    let post = Post::find_by_id(&state.db, id).await?.ok_or(not_found())?;
    let author = User::find_by_id(&state.db, post.user_id)
        .await?
        .ok_or(not_found())?;
    let tags = Post::tags(&state.db, id).await?;
    let author_name = author.full_name();

    let (jar, messages) = take_flash(jar);
    let html = render(
        &env,
        "posts/details.html",
        context! { post, author, author_name, tags, messages },
    )?;
    Ok((jar, html))
}

async fn edit_post_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(env): Extension<Environment<'static>>,
    jar: SignedCookieJar,
) -> Page {
    let post = Post::find_by_id(&state.db, id).await?.ok_or(not_found())?;

    let (jar, messages) = take_flash(jar);
    Ok((jar, render(&env, "posts/edit.html", context! { post, messages })?))
}

/// Overwrites title and content; the creation time and owner never change.
async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    jar: SignedCookieJar,
    ValidatedForm(form): ValidatedForm<PostForm>,
) -> Redirect {
    let post = Post::find_by_id(&state.db, id).await?.ok_or(not_found())?;
    Post::update(&state.db, id, &form).await?;

    let jar = flash(jar, format!("Post '{}' edited.", form.title));
    Ok((jar, Found::to(format!("/users/{}", post.user_id))))
}

async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    jar: SignedCookieJar,
) -> Redirect {
    let post = Post::find_by_id(&state.db, id).await?.ok_or(not_found())?;
    Post::delete(&state.db, id).await?;

    let jar = flash(jar, format!("Post '{}' deleted.", post.title));
    Ok((jar, Found::to(format!("/users/{}", post.user_id))))
}
