//! Shared fixtures for the HTTP integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use actix_files::Files;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::test::TestRequest;
use actix_web::{App, web};
use async_trait::async_trait;
use uuid::Uuid;

use api_server::cors::cors_policy;
use api_server::handlers::configure_routes;
use api_server::config::{AppConfig, DEFAULT_CORS_ORIGINS};
use api_server::state::{AppState, Repositories, build_notifiers};
use quill_core::Notifiers;
use quill_core::domain::{Channel, Post};
use quill_core::error::NotifyError;
use quill_core::ports::Notifier;
use quill_infra::LocalImageStore;

/// Every successful notifier call, in order.
pub type CallLog = Arc<Mutex<Vec<(Channel, Uuid)>>>;

pub struct RecordingNotifier {
    channel: Channel,
    calls: CallLog,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn channel(&self) -> Channel {
        self.channel
    }

    async fn notify(&self, post: &Post) -> Result<(), NotifyError> {
        self.calls.lock().unwrap().push((self.channel, post.id));
        Ok(())
    }
}

pub struct FailingNotifier {
    channel: Channel,
}

#[async_trait]
impl Notifier for FailingNotifier {
    fn channel(&self) -> Channel {
        self.channel
    }

    async fn notify(&self, _post: &Post) -> Result<(), NotifyError> {
        Err(NotifyError::Rejected {
            status: 503,
            body: "upstream unavailable".to_string(),
        })
    }
}

/// In-memory app state plus handles the tests inspect directly.
pub struct Fixture {
    pub state: AppState,
    pub repos: Repositories,
    pub calls: CallLog,
    pub upload_dir: tempfile::TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_failing(&[])
    }

    /// Channels in `failing` reject every call; the rest record theirs.
    pub fn with_failing(failing: &[Channel]) -> Self {
        let calls: CallLog = Arc::default();
        let notifiers = Channel::ALL.iter().map(|&channel| -> Arc<dyn Notifier> {
            if failing.contains(&channel) {
                Arc::new(FailingNotifier { channel })
            } else {
                Arc::new(RecordingNotifier {
                    channel,
                    calls: calls.clone(),
                })
            }
        });

        let upload_dir = tempfile::tempdir().unwrap();
        let images = Arc::new(LocalImageStore::new(upload_dir.path()).unwrap());
        let repos = Repositories::in_memory();
        let state = AppState::new(repos.clone(), Notifiers::new(notifiers), images);

        Self {
            state,
            repos,
            calls,
            upload_dir,
        }
    }

    /// Notifiers wired the way `main` wires them for `config`.
    pub fn from_config(config: &AppConfig) -> Self {
        let upload_dir = tempfile::tempdir().unwrap();
        let images = Arc::new(LocalImageStore::new(upload_dir.path()).unwrap());
        let repos = Repositories::in_memory();
        let notifiers = build_notifiers(config, repos.subscribers.clone()).unwrap();
        let state = AppState::new(repos.clone(), notifiers, images);

        Self {
            state,
            repos,
            calls: CallLog::default(),
            upload_dir,
        }
    }

    pub fn calls(&self) -> Vec<(Channel, Uuid)> {
        self.calls.lock().unwrap().clone()
    }

    /// The same app `main` serves, minus request tracing.
    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl MessageBody + use<>>,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        let origins: Vec<String> = DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect();

        App::new()
            .wrap(cors_policy(&origins))
            .app_data(web::Data::new(self.state.clone()))
            .configure(configure_routes)
            .service(Files::new("/uploads", self.upload_dir.path()))
    }
}

/// Hand-built `multipart/form-data` body.
pub struct MultipartBody {
    boundary: &'static str,
    body: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self {
            boundary: "----quill-test-boundary",
            body: Vec::new(),
        }
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                self.boundary, name, value
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                self.boundary, name, file_name
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Attach the body and its content type to `req`.
    pub fn attach(mut self, req: TestRequest) -> TestRequest {
        self.body
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());

        req.insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", self.boundary),
        ))
        .set_payload(self.body)
    }
}
