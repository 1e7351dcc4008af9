//! Cross-posting to a Facebook page feed through the Graph API.

use async_trait::async_trait;

use quill_core::domain::{Channel, Post};
use quill_core::error::NotifyError;
use quill_core::ports::Notifier;

use super::{ensure_success, post_link, transport_error};

#[derive(Debug, Clone)]
pub struct FacebookSettings {
    /// Versioned Graph API root, e.g. `https://graph.facebook.com/v19.0`.
    pub api_base: String,
    pub page_id: String,
    pub page_token: String,
}

pub struct FacebookPoster {
    client: reqwest::Client,
    settings: FacebookSettings,
    site_url: String,
}

impl FacebookPoster {
    pub fn new(client: reqwest::Client, settings: FacebookSettings, site_url: impl Into<String>) -> Self {
        Self {
            client,
            settings,
            site_url: site_url.into(),
        }
    }
}

#[async_trait]
impl Notifier for FacebookPoster {
    fn channel(&self) -> Channel {
        Channel::Facebook
    }

    async fn notify(&self, post: &Post) -> Result<(), NotifyError> {
        let url = format!(
            "{}/{}/feed",
            self.settings.api_base.trim_end_matches('/'),
            self.settings.page_id
        );
        let link = post_link(&self.site_url, post);
        let message = format!("{}\n\n{}", post.title, post.description);

        let response = self
            .client
            .post(url)
            .form(&[
                ("message", message.as_str()),
                ("link", link.as_str()),
                ("access_token", self.settings.page_token.as_str()),
            ])
            .send()
            .await
            .map_err(transport_error)?;

        ensure_success(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::domain::NewPost;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn poster(server: &MockServer) -> FacebookPoster {
        FacebookPoster::new(
            reqwest::Client::new(),
            FacebookSettings {
                api_base: format!("{}/v19.0", server.uri()),
                page_id: "1234".into(),
                page_token: "fb-token".into(),
            },
            "https://blog.example.com",
        )
    }

    #[tokio::test]
    async fn test_notify_posts_form_to_page_feed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v19.0/1234/feed"))
            .and(body_string_contains("access_token=fb-token"))
            .and(body_string_contains("message=Launch+day"))
            .and(body_string_contains("link=https%3A%2F%2Fblog.example.com%2Fblog%2F"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":"1234_1"}"#))
            .expect(1)
            .mount(&server)
            .await;

        let post = Post::new(NewPost {
            title: "Launch day".into(),
            ..Default::default()
        });
        poster(&server).notify(&post).await.unwrap();
    }

    #[tokio::test]
    async fn test_graph_error_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v19.0/1234/feed"))
            .respond_with(
                ResponseTemplate::new(400).set_body_string(r#"{"error":{"code":190}}"#),
            )
            .mount(&server)
            .await;

        let result = poster(&server).notify(&Post::new(NewPost::default())).await;

        match result {
            Err(NotifyError::Rejected { status, body }) => {
                assert_eq!(status, 400);
                assert!(body.contains("190"));
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }
}
