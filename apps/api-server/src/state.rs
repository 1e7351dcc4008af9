//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::domain::Channel;
use quill_core::error::NotifyError;
use quill_core::ports::{
    CommentRepository, ImageStore, Notifier, PostRepository, SubscriberRepository, TagRepository,
};
use quill_core::{BlogService, Notifiers, SubscriberService};
use quill_infra::{
    FacebookPoster, InMemoryCommentRepository, InMemoryPostRepository,
    InMemorySubscriberRepository, InMemoryTagRepository, LinkedInPoster, LocalImageStore,
    NewsletterMailer, TwitterPoster, UnconfiguredNotifier,
};
use thiserror::Error;

#[cfg(feature = "postgres")]
use quill_infra::DatabaseConnections;
#[cfg(feature = "postgres")]
use quill_infra::database::{
    PostgresCommentRepository, PostgresPostRepository, PostgresSubscriberRepository,
    PostgresTagRepository,
};

use crate::config::AppConfig;

/// Failures that stop the server from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Failed to connect to database: {0}")]
    Database(String),

    #[error("Upload directory unavailable: {0}")]
    UploadDir(#[from] std::io::Error),

    #[error("Notifier setup failed: {0}")]
    Notifier(#[from] NotifyError),

    #[error("HTTP client setup failed: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// The four document-store collections.
#[derive(Clone)]
pub struct Repositories {
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub subscribers: Arc<dyn SubscriberRepository>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        Self {
            posts: Arc::new(InMemoryPostRepository::new()),
            comments: Arc::new(InMemoryCommentRepository::new()),
            tags: Arc::new(InMemoryTagRepository::new()),
            subscribers: Arc::new(InMemorySubscriberRepository::new()),
        }
    }

    #[cfg(feature = "postgres")]
    pub fn postgres(connections: &DatabaseConnections) -> Self {
        let db = &connections.main;
        Self {
            posts: Arc::new(PostgresPostRepository::new(db.clone())),
            comments: Arc::new(PostgresCommentRepository::new(db.clone())),
            tags: Arc::new(PostgresTagRepository::new(db.clone())),
            subscribers: Arc::new(PostgresSubscriberRepository::new(db.clone())),
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub blog: BlogService,
    pub subscribers: SubscriberService,
    pub images: Arc<dyn ImageStore>,
    #[cfg(feature = "postgres")]
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Assemble the state from already-built collaborators.
    pub fn new(repos: Repositories, notifiers: Notifiers, images: Arc<dyn ImageStore>) -> Self {
        Self {
            blog: BlogService::new(repos.posts, repos.comments, repos.tags, notifiers),
            subscribers: SubscriberService::new(repos.subscribers),
            images,
            #[cfg(feature = "postgres")]
            db: None,
        }
    }

    /// Attach the connection pool the repositories were built from.
    #[cfg(feature = "postgres")]
    pub fn with_database(self, db: Option<Arc<DatabaseConnections>>) -> Self {
        Self { db, ..self }
    }

    /// Build the state described by `config`.
    ///
    /// A configured database that cannot be reached is an error; without a
    /// database URL the in-memory store is used.
    pub async fn from_config(config: &AppConfig) -> Result<Self, StartupError> {
        #[cfg(feature = "postgres")]
        let (repos, db) = match &config.database {
            Some(db_config) => {
                let connections = DatabaseConnections::init(db_config)
                    .await
                    .map_err(|e| StartupError::Database(e.to_string()))?;
                let repos = Repositories::postgres(&connections);
                (repos, Some(Arc::new(connections)))
            }
            None => {
                tracing::warn!("DATABASE_URL not set. Running with the in-memory store.");
                (Repositories::in_memory(), None)
            }
        };

        #[cfg(not(feature = "postgres"))]
        let repos = {
            if config.database.is_some() {
                tracing::warn!("Built without postgres feature; ignoring database URL");
            }
            tracing::info!("Running with the in-memory store");
            Repositories::in_memory()
        };

        let notifiers = build_notifiers(config, repos.subscribers.clone())?;
        let images: Arc<dyn ImageStore> = Arc::new(LocalImageStore::new(&config.upload_dir)?);

        let state = Self::new(repos, notifiers, images);
        #[cfg(feature = "postgres")]
        let state = state.with_database(db);

        tracing::info!("Application state initialized");
        Ok(state)
    }

    /// Name of the backing store and whether it answered.
    pub async fn store_status(&self) -> (&'static str, bool) {
        #[cfg(feature = "postgres")]
        {
            if let Some(db) = &self.db {
                return ("postgres", db.ping().await);
            }
        }

        ("memory", true)
    }
}

/// One notifier per channel; channels without an SMTP host or credentials get
/// an [`UnconfiguredNotifier`].
pub fn build_notifiers(
    config: &AppConfig,
    subscribers: Arc<dyn SubscriberRepository>,
) -> Result<Notifiers, StartupError> {
    let client = reqwest::Client::builder()
        .user_agent(concat!("quill/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let site_url = config.site_url.as_str();

    let newsletter: Arc<dyn Notifier> = if config.smtp.host.trim().is_empty() {
        unconfigured(Channel::Newsletter)
    } else {
        Arc::new(NewsletterMailer::new(&config.smtp, subscribers, site_url)?)
    };

    let twitter: Arc<dyn Notifier> = match &config.twitter {
        Some(settings) => Arc::new(TwitterPoster::new(client.clone(), settings.clone(), site_url)),
        None => unconfigured(Channel::Twitter),
    };
    let linkedin: Arc<dyn Notifier> = match &config.linkedin {
        Some(settings) => Arc::new(LinkedInPoster::new(client.clone(), settings.clone(), site_url)),
        None => unconfigured(Channel::LinkedIn),
    };
    let facebook: Arc<dyn Notifier> = match &config.facebook {
        Some(settings) => Arc::new(FacebookPoster::new(client, settings.clone(), site_url)),
        None => unconfigured(Channel::Facebook),
    };

    Ok(Notifiers::new([newsletter, twitter, linkedin, facebook]))
}

fn unconfigured(channel: Channel) -> Arc<dyn Notifier> {
    tracing::warn!(channel = %channel, "No credentials configured; channel will reject requests");
    Arc::new(UnconfiguredNotifier::new(channel))
}
