//! Multipart form parsing for post create/update requests.

use actix_multipart::{Field, Multipart};
use futures::StreamExt;

use quill_core::DomainError;
use quill_core::domain::{NewPost, PostChanges, parse_post_date, parse_tags};
use quill_core::ports::ImageStore;

use crate::middleware::error::{AppError, AppResult};

/// Largest accepted image upload.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Cap for a single text field; `description` carries the whole article.
pub const MAX_TEXT_BYTES: usize = 1024 * 1024;
const IMAGE_FIELD: &str = "image";

/// An uploaded file held in memory until it is stored.
#[derive(Debug)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Write the file to the image store and return its reference path.
    pub async fn store(self, images: &dyn ImageStore) -> AppResult<String> {
        Ok(images.store(&self.file_name, &self.bytes).await?)
    }
}

/// Raw fields of a post form. Text fields stay as sent until converted.
#[derive(Debug, Default)]
pub struct PostForm {
    pub title: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub tags: Option<String>,
    pub image: Option<ImageUpload>,
}

impl PostForm {
    /// Read every part of the multipart body.
    ///
    /// At most one file is accepted and only under the `image` field. Unknown
    /// text fields are ignored.
    pub async fn from_multipart(mut payload: Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(item) = payload.next().await {
            let mut field = item?;
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field
                .content_disposition()
                .and_then(|cd| cd.get_filename())
                .map(String::from);

            match file_name {
                Some(file_name) => {
                    if name != IMAGE_FIELD {
                        return Err(AppError::BadRequest(format!(
                            "Unexpected file field \"{}\"",
                            name
                        )));
                    }
                    if form.image.is_some() {
                        return Err(AppError::BadRequest(
                            "Only one image may be uploaded".to_string(),
                        ));
                    }

                    let bytes = read_field(&mut field, MAX_IMAGE_BYTES).await.map_err(|e| {
                        match e {
                            AppError::PayloadTooLarge(_) => AppError::PayloadTooLarge(
                                "Image exceeds the 10 MiB upload limit".to_string(),
                            ),
                            other => other,
                        }
                    })?;

                    // Browsers send an empty part for an untouched file input.
                    if file_name.is_empty() && bytes.is_empty() {
                        continue;
                    }
                    form.image = Some(ImageUpload { file_name, bytes });
                }
                None => {
                    let bytes = read_field(&mut field, MAX_TEXT_BYTES).await?;
                    let value = String::from_utf8(bytes).map_err(|_| {
                        AppError::BadRequest(format!("Field \"{}\" is not valid UTF-8", name))
                    })?;
                    form.set_text(&name, value);
                }
            }
        }

        Ok(form)
    }

    fn set_text(&mut self, name: &str, value: String) {
        let slot = match name {
            "title" => &mut self.title,
            "author" => &mut self.author,
            "date" => &mut self.date,
            "description" => &mut self.description,
            "tags" => &mut self.tags,
            other => {
                tracing::debug!(field = %other, "Ignoring unknown form field");
                return;
            }
        };
        *slot = Some(value);
    }

    /// Fields for a new post; missing text fields become empty strings.
    pub fn into_new_post(self) -> Result<(NewPost, Option<ImageUpload>), DomainError> {
        let post = NewPost {
            date: parse_date(self.date.as_deref())?,
            tags: parse_tags(self.tags.as_deref()),
            title: self.title.unwrap_or_default(),
            author: self.author.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            image: None,
        };
        Ok((post, self.image))
    }

    /// Changes for an update; only fields present in the form are applied.
    pub fn into_changes(self) -> Result<(PostChanges, Option<ImageUpload>), DomainError> {
        let changes = PostChanges {
            date: parse_date(self.date.as_deref())?,
            tags: parse_tags(self.tags.as_deref()),
            title: self.title,
            author: self.author,
            description: self.description,
            image: None,
        };
        Ok((changes, self.image))
    }
}

/// A blank date counts as absent.
fn parse_date(raw: Option<&str>) -> Result<Option<chrono::DateTime<chrono::Utc>>, DomainError> {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() => parse_post_date(value).map(Some),
        _ => Ok(None),
    }
}

async fn read_field(field: &mut Field, limit: usize) -> AppResult<Vec<u8>> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk?;
        if bytes.len() + chunk.len() > limit {
            return Err(AppError::PayloadTooLarge(format!(
                "Field exceeds the {} byte limit",
                limit
            )));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}
