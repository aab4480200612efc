#[cfg(test)]
mod tests {
    use crate::tests::test_state;
    use quill::model::post::{Post, PostForm};
    use quill::model::user::{User, UserForm};

    fn user_form(first: &str, last: &str, image_url: Option<&str>) -> UserForm {
        UserForm {
            first_name: first.to_string(),
            last_name: last.to_string(),
            image_url: image_url.map(String::from),
        }
    }

    #[tokio::test]
    async fn test_create_and_full_name() {
        let state = test_state().await;

        let user = User::create(&state.db, &user_form("John", "Doe", None))
            .await
            .unwrap();
        assert!(user.id > 0);
        assert_eq!(user.full_name(), "John Doe");

        // The created user is visible to a subsequent listing
        let users = User::list_all(&state.db).await.unwrap();
        let found = users
            .iter()
            .find(|u| u.first_name == "John" && u.last_name == "Doe")
            .expect("created user should be listed");
        assert_eq!(found.full_name(), "John Doe");
    }

    #[tokio::test]
    async fn test_list_ordered_by_last_then_first_name() {
        let state = test_state().await;

        User::create(&state.db, &user_form("Zoe", "Adams", None)).await.unwrap();
        User::create(&state.db, &user_form("Amy", "Brown", None)).await.unwrap();
        User::create(&state.db, &user_form("Bob", "Adams", None)).await.unwrap();

        let users = User::list_all(&state.db).await.unwrap();
        let names: Vec<String> = users.iter().map(|u| u.full_name()).collect();
        assert_eq!(names, vec!["Bob Adams", "Zoe Adams", "Amy Brown"]);
    }

    #[tokio::test]
    async fn test_empty_image_url_stored_as_null() {
        let state = test_state().await;

        let user = User::create(&state.db, &user_form("John", "Doe", Some("")))
            .await
            .unwrap();

        let stored = User::find_by_id(&state.db, user.id).await.unwrap().unwrap();
        assert_eq!(stored.image_url, None);
        assert_eq!(stored.image_or_default(), quill::model::user::DEFAULT_IMAGE_URL);
    }

    #[tokio::test]
    async fn test_update_replaces_all_fields() {
        let state = test_state().await;

        let user = User::create(
            &state.db,
            &user_form("John", "Doe", Some("https://example.com/a.png")),
        )
        .await
        .unwrap();

        let edit = user_form("Jane", "Smith", None);
        User::update(&state.db, user.id, &edit).await.unwrap();
        // Applying the same edit twice leaves the record unchanged
        User::update(&state.db, user.id, &edit).await.unwrap();

        let stored = User::find_by_id(&state.db, user.id).await.unwrap().unwrap();
        assert_eq!(stored.first_name, "Jane");
        assert_eq!(stored.last_name, "Smith");
        assert_eq!(stored.image_url, None);
    }

    #[tokio::test]
    async fn test_find_unknown_id() {
        let state = test_state().await;
        assert!(User::find_by_id(&state.db, 999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_cascades_posts() {
        let state = test_state().await;

        let user = User::create(&state.db, &user_form("John", "Doe", None))
            .await
            .unwrap();
        let post = Post::create(
            &state.db,
            user.id,
            &PostForm {
                title: "T".to_string(),
                content: "C".to_string(),
            },
        )
        .await
        .unwrap();

        User::delete(&state.db, user.id).await.unwrap();

        assert!(User::find_by_id(&state.db, user.id).await.unwrap().is_none());
        assert!(Post::find_by_id(&state.db, post.id).await.unwrap().is_none());
    }
}
