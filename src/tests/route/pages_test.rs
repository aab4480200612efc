#[cfg(test)]
mod tests {
    use crate::tests::test_state;
    use axum::body::Body;
    use axum::extract::FromRef;
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use axum::Router;
    use quill::model::post::{Post, PostForm};
    use quill::model::tag::Tag;
    use quill::model::user::{User, UserForm};
    use quill::{create_app, AppState};
    use tower::ServiceExt;

    async fn test_app() -> (Router, AppState) {
        let state = test_state().await;
        (create_app(state.clone()).await, state)
    }

    async fn get(app: &Router, uri: &str) -> Response {
        app.clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn post_form(app: &Router, uri: &str, body: &str) -> Response {
        app.clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn location(response: &Response) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .expect("redirect should carry a Location header")
            .to_str()
            .unwrap()
    }

    // The name=value pair of the flash cookie, without its attributes
    fn flash_cookie(response: &Response) -> String {
        response
            .headers()
            .get(header::SET_COOKIE)
            .expect("write should set a flash cookie")
            .to_str()
            .unwrap()
            .split(';')
            .next()
            .unwrap()
            .to_string()
    }

    // Whether the checkbox with the given value carries the checked attribute
    fn checkbox_is_checked(body: &str, value: i64) -> bool {
        let needle = format!("value=\"{}\"", value);
        let rest = &body[body.find(&needle).expect("checkbox should be rendered")..];
        rest[..rest.find('>').unwrap()].contains("checked")
    }

    async fn seed_user(state: &AppState, first: &str, last: &str) -> User {
        User::create(
            &state.db,
            &UserForm {
                first_name: first.to_string(),
                last_name: last.to_string(),
                image_url: None,
            },
        )
        .await
        .unwrap()
    }

    async fn seed_post(state: &AppState, user_id: i64, title: &str) -> Post {
        Post::create(
            &state.db,
            user_id,
            &PostForm {
                title: title.to_string(),
                content: "content".to_string(),
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_user_end_to_end() {
        let (app, _state) = test_app().await;

        let response = post_form(&app, "/users/new", "first_name=John&last_name=Doe&image_url=").await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/users");
        let cookie = flash_cookie(&response);

        // Following the redirect shows the new user and the one-shot message
        let listing = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/users")
                    .header(header::COOKIE, &cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(listing.status(), StatusCode::OK);
        let body = body_text(listing).await;
        assert!(body.contains("John Doe"));
        assert!(body.contains("User John added."));
    }

    #[tokio::test]
    async fn test_create_post_end_to_end() {
        let (app, state) = test_app().await;
        let user = seed_user(&state, "John", "Doe").await;

        let uri = format!("/users/{}/posts/new", user.id);
        let response = post_form(&app, &uri, "title=T&content=C").await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), format!("/users/{}", user.id));

        let posts = Post::for_user(&state.db, user.id).await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].user_id, user.id);

        let detail = get(&app, &format!("/posts/{}", posts[0].id)).await;
        assert_eq!(detail.status(), StatusCode::OK);
        assert!(body_text(detail).await.contains("T"));
    }

    #[tokio::test]
    async fn test_create_tag_end_to_end() {
        let (app, state) = test_app().await;
        let user = seed_user(&state, "John", "Doe").await;
        let _p1 = seed_post(&state, user.id, "first post").await;
        let p2 = seed_post(&state, user.id, "second post").await;

        let body = format!("name=New+Tag&posts={}", p2.id);
        let response = post_form(&app, "/tags/new", &body).await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/tags");

        let tags = Tag::list_all(&state.db).await.unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(Tag::post_ids(&state.db, tags[0].id).await.unwrap(), vec![p2.id]);

        let detail = get(&app, &format!("/tags/{}", tags[0].id)).await;
        assert_eq!(detail.status(), StatusCode::OK);
        let body = body_text(detail).await;
        assert!(body.contains("New Tag"));
        assert!(body.contains("second post"));
        assert!(!body.contains("first post"));
    }

    #[tokio::test]
    async fn test_deleted_entity_detail_is_404() {
        let (app, state) = test_app().await;
        let user = seed_user(&state, "John", "Doe").await;
        let post = seed_post(&state, user.id, "T").await;

        let response = post_form(&app, &format!("/posts/{}/delete", post.id), "").await;
        assert_eq!(response.status(), StatusCode::FOUND);

        let detail = get(&app, &format!("/posts/{}", post.id)).await;
        assert_eq!(detail.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_edit_pages_show_current_values() {
        let (app, state) = test_app().await;
        let user = seed_user(&state, "John", "Doe").await;
        let post = seed_post(&state, user.id, "My Title").await;

        let user_edit = get(&app, &format!("/users/{}/edit", user.id)).await;
        assert_eq!(user_edit.status(), StatusCode::OK);
        let body = body_text(user_edit).await;
        assert!(body.contains("value=\"John\""));
        assert!(body.contains("value=\"Doe\""));

        let post_edit = get(&app, &format!("/posts/{}/edit", post.id)).await;
        assert_eq!(post_edit.status(), StatusCode::OK);
        let body = body_text(post_edit).await;
        assert!(body.contains("value=\"My Title\""));
        assert!(body.contains("content"));
    }

    #[tokio::test]
    async fn test_tag_edit_page_shows_name_and_checked_posts() {
        let (app, state) = test_app().await;
        let user = seed_user(&state, "John", "Doe").await;
        let tagged = seed_post(&state, user.id, "tagged post").await;
        let other = seed_post(&state, user.id, "other post").await;
        let tag = Tag::create(&state.db, "rust", &[tagged.id]).await.unwrap();

        let edit = get(&app, &format!("/tags/{}/edit", tag.id)).await;
        assert_eq!(edit.status(), StatusCode::OK);
        let body = body_text(edit).await;
        assert!(body.contains("value=\"rust\""));
        assert!(checkbox_is_checked(&body, tagged.id));
        assert!(!checkbox_is_checked(&body, other.id));
    }

    #[tokio::test]
    async fn test_edit_twice_is_idempotent() {
        let (app, state) = test_app().await;
        let user = seed_user(&state, "John", "Doe").await;

        let uri = format!("/users/{}/edit", user.id);
        let form = "first_name=Jane&last_name=Smith&image_url=";

        let response = post_form(&app, &uri, form).await;
        assert_eq!(response.status(), StatusCode::FOUND);
        let after_first = User::find_by_id(&state.db, user.id).await.unwrap().unwrap();

        let response = post_form(&app, &uri, form).await;
        assert_eq!(response.status(), StatusCode::FOUND);
        let after_second = User::find_by_id(&state.db, user.id).await.unwrap().unwrap();

        assert_eq!(after_first.first_name, after_second.first_name);
        assert_eq!(after_first.last_name, after_second.last_name);
        assert_eq!(after_first.image_url, after_second.image_url);
    }

    #[tokio::test]
    async fn test_unknown_and_malformed_ids_are_404() {
        let (app, _state) = test_app().await;

        assert_eq!(get(&app, "/users/999").await.status(), StatusCode::NOT_FOUND);
        assert_eq!(get(&app, "/users/abc").await.status(), StatusCode::NOT_FOUND);
        assert_eq!(get(&app, "/posts/999").await.status(), StatusCode::NOT_FOUND);
        assert_eq!(get(&app, "/tags/999").await.status(), StatusCode::NOT_FOUND);
        assert_eq!(get(&app, "/nope").await.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_write_to_unknown_entity_is_404() {
        let (app, _state) = test_app().await;

        let response = post_form(&app, "/users/999/edit", "first_name=A&last_name=B&image_url=").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = post_form(&app, "/users/999/posts/new", "title=T&content=C").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_missing_required_field_is_400() {
        let (app, _state) = test_app().await;

        // No last_name at all
        let response = post_form(&app, "/users/new", "first_name=John&image_url=").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // Present but empty
        let response = post_form(&app, "/users/new", "first_name=John&last_name=&image_url=").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_posts_list_is_400() {
        let (app, _state) = test_app().await;

        let response = post_form(&app, "/tags/new", "name=rust&posts=abc").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_method_not_allowed() {
        let (app, _state) = test_app().await;

        let response = post_form(&app, "/users", "").await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_homepage_lists_recent_posts() {
        let (app, state) = test_app().await;

        let empty = get(&app, "/").await;
        assert_eq!(empty.status(), StatusCode::OK);

        let user = seed_user(&state, "John", "Doe").await;
        seed_post(&state, user.id, "fresh title").await;

        let homepage = get(&app, "/").await;
        assert_eq!(homepage.status(), StatusCode::OK);
        let body = body_text(homepage).await;
        assert!(body.contains("fresh title"));
        assert!(body.contains("John Doe"));
    }

    #[tokio::test]
    async fn test_signing_key_from_short_secret() {
        // The dev-default secret is under 64 bytes; key derivation must still succeed
        let (_app, state) = test_app().await;
        assert!(state.config.secret_key.len() < 64);
        let _key = axum_extra::extract::cookie::Key::from_ref(&state);
    }

    #[tokio::test]
    async fn test_page_title_uses_configured_app_name() {
        let (app, state) = test_app().await;

        let homepage = get(&app, "/").await;
        let body = body_text(homepage).await;
        assert!(body.contains(&format!("<title>{} — Recent Posts</title>", state.config.app_name)));
    }

    #[tokio::test]
    async fn test_delete_user_redirects_to_listing() {
        let (app, state) = test_app().await;
        let user = seed_user(&state, "John", "Doe").await;

        let response = post_form(&app, &format!("/users/{}/delete", user.id), "").await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/users");

        assert_eq!(
            get(&app, &format!("/users/{}", user.id)).await.status(),
            StatusCode::NOT_FOUND
        );
    }
}
