use std::fmt;

use serde::{Deserialize, Serialize};

/// Outbound notification channel a post can be fanned out to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Newsletter,
    Twitter,
    LinkedIn,
    Facebook,
}

impl Channel {
    pub const ALL: [Channel; 4] = [
        Channel::Newsletter,
        Channel::Twitter,
        Channel::LinkedIn,
        Channel::Facebook,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Newsletter => "newsletter",
            Channel::Twitter => "twitter",
            Channel::LinkedIn => "linkedin",
            Channel::Facebook => "facebook",
        }
    }

    /// Message returned to the client once the channel accepted the post.
    pub fn success_message(self) -> &'static str {
        match self {
            Channel::Newsletter => "Newsletter emails sent successfully",
            Channel::Twitter => "Posted to Twitter successfully",
            Channel::LinkedIn => "Posted to LinkedIn successfully",
            Channel::Facebook => "Posted to Facebook successfully",
        }
    }

    /// Generic message returned to the client when the channel failed.
    pub fn failure_message(self) -> &'static str {
        match self {
            Channel::Newsletter => "Error sending newsletter emails",
            Channel::Twitter => "Error posting to Twitter",
            Channel::LinkedIn => "Error posting to LinkedIn",
            Channel::Facebook => "Error posting to Facebook",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
