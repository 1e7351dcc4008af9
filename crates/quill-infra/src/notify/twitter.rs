//! Cross-posting to Twitter (X) through the v2 tweets endpoint.

use async_trait::async_trait;
use serde::Serialize;

use quill_core::domain::{Channel, Post};
use quill_core::error::NotifyError;
use quill_core::ports::Notifier;

use super::{ensure_success, post_link, transport_error};

const MAX_TWEET_CHARS: usize = 280;

#[derive(Debug, Clone)]
pub struct TwitterSettings {
    pub api_base: String,
    /// OAuth 2.0 user-context token with `tweet.write` scope.
    pub bearer_token: String,
}

pub struct TwitterPoster {
    client: reqwest::Client,
    settings: TwitterSettings,
    site_url: String,
}

#[derive(Serialize)]
struct TweetRequest<'a> {
    text: &'a str,
}

impl TwitterPoster {
    pub fn new(client: reqwest::Client, settings: TwitterSettings, site_url: impl Into<String>) -> Self {
        Self {
            client,
            settings,
            site_url: site_url.into(),
        }
    }
}

/// `<title> <link>`, shortening the title so the whole tweet fits.
pub(crate) fn tweet_text(title: &str, link: &str) -> String {
    let budget = MAX_TWEET_CHARS.saturating_sub(link.chars().count() + 1);
    let title = if title.chars().count() > budget {
        let kept: String = title.chars().take(budget.saturating_sub(1)).collect();
        format!("{}…", kept.trim_end())
    } else {
        title.to_string()
    };

    format!("{} {}", title, link)
}

#[async_trait]
impl Notifier for TwitterPoster {
    fn channel(&self) -> Channel {
        Channel::Twitter
    }

    async fn notify(&self, post: &Post) -> Result<(), NotifyError> {
        let text = tweet_text(&post.title, &post_link(&self.site_url, post));
        let url = format!("{}/2/tweets", self.settings.api_base.trim_end_matches('/'));

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.settings.bearer_token)
            .json(&TweetRequest { text: &text })
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
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn poster(server: &MockServer) -> TwitterPoster {
        TwitterPoster::new(
            reqwest::Client::new(),
            TwitterSettings {
                api_base: server.uri(),
                bearer_token: "tw-token".into(),
            },
            "https://blog.example.com",
        )
    }

    #[test]
    fn test_short_title_is_kept() {
        assert_eq!(
            tweet_text("Hello", "https://x.dev/blog/1"),
            "Hello https://x.dev/blog/1"
        );
    }

    #[test]
    fn test_long_title_is_truncated_to_fit() {
        let title = "a".repeat(400);
        let text = tweet_text(&title, "https://x.dev/blog/1");

        assert_eq!(text.chars().count(), MAX_TWEET_CHARS);
        assert!(text.ends_with("… https://x.dev/blog/1"));
    }

    #[tokio::test]
    async fn test_notify_posts_tweet_with_bearer_token() {
        let server = MockServer::start().await;
        let post = Post::new(NewPost {
            title: "Shipping".into(),
            ..Default::default()
        });
        let expected = format!("Shipping https://blog.example.com/blog/{}", post.id);

        Mock::given(method("POST"))
            .and(path("/2/tweets"))
            .and(header("Authorization", "Bearer tw-token"))
            .and(body_json(serde_json::json!({ "text": expected })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        poster(&server).notify(&post).await.unwrap();
    }

    #[tokio::test]
    async fn test_rejected_tweet_carries_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/2/tweets"))
            .respond_with(ResponseTemplate::new(403).set_body_string("duplicate content"))
            .mount(&server)
            .await;

        let result = poster(&server).notify(&Post::new(NewPost::default())).await;

        match result {
            Err(NotifyError::Rejected { status, body }) => {
                assert_eq!(status, 403);
                assert_eq!(body, "duplicate content");
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }
}
