//! # kih-media
//!
//! Photo uploads for course and kos listings.
//!
//! Photos live in an S3-compatible bucket under
//! `{collection}/{listing id}/{tag}-{file name}`, where the tag is random so
//! re-uploading a file name never replaces an earlier photo. Listing documents only ever hold
//! the public URL returned by [`MediaStore::upload_photo`].

mod error;
mod key;

use std::path::Path;
use std::sync::Arc;

use kih_config::MediaConfig;
use kih_core::enums::Collection;
use object_store::aws::AmazonS3Builder;
use object_store::memory::InMemory;
use object_store::path::Path as ObjectPath;
use object_store::{Attribute, AttributeValue, Attributes, ObjectStore, PutOptions, PutPayload};

pub use error::MediaError;
pub use key::{content_type_for, object_key, sanitize_segment};

/// Largest photo accepted for upload.
pub const MAX_PHOTO_BYTES: usize = 10 * 1024 * 1024;

/// A stored photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedPhoto {
    pub key: String,
    pub url: String,
    pub content_type: &'static str,
    pub size: usize,
}

/// Photo storage over any [`ObjectStore`].
#[derive(Debug, Clone)]
pub struct MediaStore {
    store: Arc<dyn ObjectStore>,
    public_base_url: String,
}

impl MediaStore {
    /// Connect to the configured S3-compatible bucket.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::Store`] if the client cannot be built.
    pub fn from_config(config: &MediaConfig) -> Result<Self, MediaError> {
        let s3 = AmazonS3Builder::new()
            .with_endpoint(&config.endpoint)
            .with_region(&config.region)
            .with_bucket_name(&config.bucket_name)
            .with_access_key_id(&config.access_key_id)
            .with_secret_access_key(&config.secret_access_key)
            .with_allow_http(config.endpoint.starts_with("http://"))
            .build()?;
        tracing::debug!(bucket = %config.bucket_name, "media store connected");
        Ok(Self::new(Arc::new(s3), &config.public_base_url))
    }

    /// In-memory store, for tests and dry runs.
    #[must_use]
    pub fn in_memory(public_base_url: &str) -> Self {
        Self::new(Arc::new(InMemory::new()), public_base_url)
    }

    #[must_use]
    pub fn new(store: Arc<dyn ObjectStore>, public_base_url: &str) -> Self {
        Self {
            store,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url, key.trim_start_matches('/'))
    }

    /// Object key behind a public URL, if the URL belongs to this store.
    #[must_use]
    pub fn key_from_url<'a>(&self, url: &'a str) -> Option<&'a str> {
        url.strip_prefix(self.public_base_url.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|key| !key.is_empty())
    }

    /// Upload photo bytes for a listing and return where they landed.
    ///
    /// # Errors
    ///
    /// [`MediaError::InvalidUpload`] for empty or oversized payloads,
    /// [`MediaError::KeyTag`] without system randomness,
    /// [`MediaError::Store`] when the put fails.
    pub async fn upload_photo(
        &self,
        collection: Collection,
        listing_id: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadedPhoto, MediaError> {
        if bytes.is_empty() {
            return Err(MediaError::InvalidUpload("photo is empty".into()));
        }
        if bytes.len() > MAX_PHOTO_BYTES {
            return Err(MediaError::InvalidUpload(format!(
                "photo is {} bytes, limit is {MAX_PHOTO_BYTES}",
                bytes.len()
            )));
        }

        let tag = key::upload_tag()?;
        let key = object_key(collection, listing_id, &tag, file_name);
        let content_type = content_type_for(file_name);
        let size = bytes.len();

        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, AttributeValue::from(content_type));
        let options = PutOptions {
            attributes,
            ..PutOptions::default()
        };

        let path = ObjectPath::parse(&key)?;
        self.store
            .put_opts(&path, PutPayload::from(bytes), options)
            .await
            .inspect_err(|e| tracing::error!(%key, error = %e, "photo upload failed"))?;
        tracing::info!(%key, size, content_type, "photo uploaded");

        Ok(UploadedPhoto {
            url: self.public_url(&key),
            key,
            content_type,
            size,
        })
    }

    /// Read a local file and upload it. The size is checked before reading.
    ///
    /// # Errors
    ///
    /// [`MediaError::Io`] if the file cannot be read,
    /// [`MediaError::InvalidUpload`] if it is over [`MAX_PHOTO_BYTES`],
    /// otherwise as [`MediaStore::upload_photo`].
    pub async fn upload_file(
        &self,
        collection: Collection,
        listing_id: &str,
        file: &Path,
    ) -> Result<UploadedPhoto, MediaError> {
        let file_name = file
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                MediaError::InvalidUpload(format!("no file name in {}", file.display()))
            })?
            .to_string();
        let len = tokio::fs::metadata(file).await?.len();
        if !usize::try_from(len).is_ok_and(|len| len <= MAX_PHOTO_BYTES) {
            return Err(MediaError::InvalidUpload(format!(
                "{} is {len} bytes, limit is {MAX_PHOTO_BYTES}",
                file.display()
            )));
        }
        let bytes = tokio::fs::read(file).await?;
        self.upload_photo(collection, listing_id, &file_name, bytes)
            .await
    }

    /// Delete a photo by public URL or by key. Deleting a missing object
    /// succeeds.
    ///
    /// # Errors
    ///
    /// [`MediaError::ForeignUrl`] for URLs outside this store,
    /// [`MediaError::Store`] when the delete fails.
    pub async fn delete(&self, url_or_key: &str) -> Result<(), MediaError> {
        let key = if url_or_key.contains("://") {
            self.key_from_url(url_or_key)
                .ok_or_else(|| MediaError::ForeignUrl(url_or_key.to_string()))?
        } else {
            url_or_key.trim_start_matches('/')
        };
        let path = ObjectPath::parse(key)?;
        match self.store.delete(&path).await {
            Ok(()) | Err(object_store::Error::NotFound { .. }) => {
                tracing::info!(%key, "photo deleted");
                Ok(())
            }
            Err(e) => {
                tracing::error!(%key, error = %e, "photo delete failed");
                Err(e.into())
            }
        }
    }

    /// Whether an object exists under `key`.
    ///
    /// # Errors
    ///
    /// [`MediaError::Store`] for failures other than a missing object.
    pub async fn exists(&self, key: &str) -> Result<bool, MediaError> {
        let path = ObjectPath::parse(key)?;
        match self.store.head(&path).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
