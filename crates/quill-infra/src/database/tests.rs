#[cfg(test)]
mod tests {
    use crate::database::entity::{post, tag};
    use crate::database::postgres_repo::{PostgresPostRepository, PostgresTagRepository};
    use quill_core::domain::{Post, Tag};
    use quill_core::error::RepoError;
    use quill_core::ports::{BaseRepository, PostRepository, TagRepository};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn post_model(title: &str, days_ago: i64) -> post::Model {
        let now = chrono::Utc::now();
        post::Model {
            id: uuid::Uuid::new_v4(),
            title: title.to_owned(),
            author: "Ada".to_owned(),
            date: (now - chrono::Duration::days(days_ago)).into(),
            description: "Body".to_owned(),
            image: "/cover.png".to_owned(),
            tags: serde_json::json!(["rust", "web"]),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let model = post_model("Test Post", 0);
        let post_id = model.id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

        let post = result.unwrap();
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.id, post_id);
        assert_eq!(post.tags, vec!["rust".to_string(), "web".to_string()]);
        assert_eq!(post.image, "/cover.png");
    }

    #[tokio::test]
    async fn test_find_recent_maps_rows_in_order() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![
                post_model("Newest", 0),
                post_model("Older", 1),
                post_model("Oldest", 2),
            ]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let posts = repo.find_recent(3).await.unwrap();

        let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Newest", "Older", "Oldest"]);
    }

    #[tokio::test]
    async fn test_delete_missing_post_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let result = BaseRepository::<Post, uuid::Uuid>::delete(&repo, uuid::Uuid::new_v4()).await;

        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_find_tags_by_names() {
        let now = chrono::Utc::now();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![tag::Model {
                id: uuid::Uuid::new_v4(),
                name: "rust".to_owned(),
                created_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresTagRepository::new(db);
        let tags: Vec<Tag> = repo.find_by_names(&["rust".to_string()]).await.unwrap();

        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].name, "rust");
    }
}
