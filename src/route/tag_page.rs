use crate::errors::{not_found, PageResult};
use crate::model::post::Post;
use crate::model::tag::{Tag, TagForm};
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
        .route("/tags", get(tag_list))
        .route("/tags/new", get(new_tag_form).post(create_tag))
        .route("/tags/{id}", get(tag_details))
        .route("/tags/{id}/edit", get(edit_tag_form).post(update_tag))
        .route("/tags/{id}/delete", post(delete_tag))
}

async fn tag_list(
    State(state): State<AppState>,
    Extension(env): Extension<Environment<'static>>,
    jar: SignedCookieJar,
) -> Page {
    let tags = Tag::list_all(&state.db).await?;

    let (jar, messages) = take_flash(jar);
    Ok((jar, render(&env, "tags/index.html", context! { tags, messages })?))
}

/// Displays the creation form with every post selectable.
async fn new_tag_form(
    State(state): State<AppState>,
    Extension(env): Extension<Environment<'static>>,
    jar: SignedCookieJar,
) -> Page {
    let posts = Post::list_all(&state.db).await?;

    let (jar, messages) = take_flash(jar);
    Ok((jar, render(&env, "tags/new.html", context! { posts, messages })?))
}

async fn create_tag(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    ValidatedForm(form): ValidatedForm<TagForm>,
) -> Redirect {
    let new_tag = Tag::create(&state.db, &form.name, &form.posts).await?;

    let jar = flash(jar, format!("Tag '{}' added.", new_tag.name));
    Ok((jar, Found::to("/tags")))
}

/// Displays a tag with the posts carrying it, or 404 for an unknown id.
async fn tag_details(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(env): Extension<Environment<'static>>,
    jar: SignedCookieJar,
) -> Page {
    let tag = Tag::find_by_id(&state.db, id).await?.ok_or(not_found())?;
    let posts = Tag::posts(&state.db, id).await?;

    let (jar, messages) = take_flash(jar);
    Ok((jar, render(&env, "tags/details.html", context! { tag, posts, messages })?))
}

async fn edit_tag_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(env): Extension<Environment<'static>>,
    jar: SignedCookieJar,
) -> Page {
    let tag = Tag::find_by_id(&state.db, id).await?.ok_or(not_found())?;
    let posts = Post::list_all(&state.db).await?;
    let selected = Tag::post_ids(&state.db, id).await?;

    let (jar, messages) = take_flash(jar);
    let html = render(
        &env,
        "tags/edit.html",
        context! { tag, posts, selected, messages },
    )?;
    Ok((jar, html))
}

/// Overwrites the name and replaces the association set with the submission.
async fn update_tag(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    jar: SignedCookieJar,
    ValidatedForm(form): ValidatedForm<TagForm>,
) -> Redirect {
    Tag::find_by_id(&state.db, id).await?.ok_or(not_found())?;
    Tag::update(&state.db, id, &form.name, &form.posts).await?;

    let jar = flash(jar, format!("Tag '{}' edited.", form.name));
    Ok((jar, Found::to("/tags")))
}

async fn delete_tag(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    jar: SignedCookieJar,
) -> Redirect {
    let tag = Tag::find_by_id(&state.db, id).await?.ok_or(not_found())?;
    Tag::delete(&state.db, id).await?;

    let jar = flash(jar, format!("Tag '{}' deleted.", tag.name));
    Ok((jar, Found::to("/tags")))
}
