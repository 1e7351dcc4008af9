//! Cross-posting to LinkedIn as an article share.

use async_trait::async_trait;
use serde_json::json;

use quill_core::domain::{Channel, Post};
use quill_core::error::NotifyError;
use quill_core::ports::Notifier;

use super::{ensure_success, post_link, transport_error};

#[derive(Debug, Clone)]
pub struct LinkedInSettings {
    pub api_base: String,
    pub access_token: String,
    /// `urn:li:person:<id>` or `urn:li:organization:<id>`.
    pub author_urn: String,
}

pub struct LinkedInPoster {
    client: reqwest::Client,
    settings: LinkedInSettings,
    site_url: String,
}

impl LinkedInPoster {
    pub fn new(client: reqwest::Client, settings: LinkedInSettings, site_url: impl Into<String>) -> Self {
        Self {
            client,
            settings,
            site_url: site_url.into(),
        }
    }

    fn share_body(&self, post: &Post) -> serde_json::Value {
        json!({
            "author": self.settings.author_urn,
            "lifecycleState": "PUBLISHED",
            "specificContent": {
                "com.linkedin.ugc.ShareContent": {
                    "shareCommentary": { "text": post.title },
                    "shareMediaCategory": "ARTICLE",
                    "media": [{
                        "status": "READY",
                        "originalUrl": post_link(&self.site_url, post),
                        "title": { "text": post.title },
                        "description": { "text": post.description },
                    }],
                }
            },
            "visibility": { "com.linkedin.ugc.MemberNetworkVisibility": "PUBLIC" },
        })
    }
}

#[async_trait]
impl Notifier for LinkedInPoster {
    fn channel(&self) -> Channel {
        Channel::LinkedIn
    }

    async fn notify(&self, post: &Post) -> Result<(), NotifyError> {
        let url = format!("{}/v2/ugcPosts", self.settings.api_base.trim_end_matches('/'));

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.settings.access_token)
            .header("X-Restli-Protocol-Version", "2.0.0")
            .json(&self.share_body(post))
            .send()
            .await
            .map_err(transport_error)?;

        ensure_success(response).await
    }
}
