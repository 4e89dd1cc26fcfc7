use std::path::Path;

use anyhow::{Context, bail};
use kih_core::enums::Collection;
use kih_db::{DocumentStore, PortalService};
use kih_media::MediaStore;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoResponse {
    pub id: String,
    pub url: String,
    pub content_type: &'static str,
    pub size: usize,
    /// The listing's photo list after the upload.
    pub photos: Vec<String>,
}

/// Handle `kih courses|kos photo add`.
pub async fn run(
    collection: Collection,
    id: &str,
    file: &Path,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    ctx.require_user()?;
    let media = ctx.require_media()?;
    let response = attach_photo(&ctx.service, media, collection, id, file).await?;
    output(&response, flags.format)
}

async fn listing_exists<S: DocumentStore>(
    service: &PortalService<S>,
    collection: Collection,
    id: &str,
) -> anyhow::Result<bool> {
    Ok(match collection {
        Collection::CourseInstitutions => service.get_course(id).await?.is_some(),
        Collection::KosHomestay => service.get_kos(id).await?.is_some(),
        other => bail!("{other} listings have no photo gallery"),
    })
}

/// Upload `file` and record its URL on the listing. If recording fails the
/// uploaded object is removed again.
pub async fn attach_photo<S: DocumentStore>(
    service: &PortalService<S>,
    media: &MediaStore,
    collection: Collection,
    id: &str,
    file: &Path,
) -> anyhow::Result<PhotoResponse> {
    if !listing_exists(service, collection, id).await? {
        bail!("{collection}/{id} not found");
    }

    let uploaded = media
        .upload_file(collection, id, file)
        .await
        .with_context(|| format!("failed to upload {}", file.display()))?;

    let attached = match collection {
        Collection::CourseInstitutions => service.add_course_photo(id, &uploaded.url).await,
        _ => service.add_kos_photo(id, &uploaded.url).await,
    };

    match attached {
        Ok(photos) => Ok(PhotoResponse {
            id: id.to_string(),
            url: uploaded.url,
            content_type: uploaded.content_type,
            size: uploaded.size,
            photos,
        }),
        Err(error) => {
            if let Err(cleanup) = media.delete(&uploaded.key).await {
                tracing::warn!(
                    key = %uploaded.key,
                    error = %cleanup,
                    "orphaned photo left in storage"
                );
            }
            Err(error).context("failed to record photo on listing")
        }
    }
}

#[cfg(test)]
mod tests {
    use kih_core::entities::CourseInstitution;
    use pretty_assertions::assert_eq;

    use super::*;

    const BASE: &str = "https://media.example.com";

    fn photo_file(dir: &tempfile::TempDir, name: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, b"\x89PNG fake").unwrap();
        path
    }

    #[tokio::test]
    async fn upload_is_recorded_on_course() {
        let service = PortalService::new_local(":memory:").await.unwrap();
        let media = MediaStore::in_memory(BASE);
        let id = service
            .create_course(&CourseInstitution {
                name: "Elfast".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        let dir = tempfile::tempdir().unwrap();

        let response = attach_photo(
            &service,
            &media,
            Collection::CourseInstitutions,
            &id,
            &photo_file(&dir, "depan.png"),
        )
        .await
        .unwrap();

        assert_eq!(response.content_type, "image/png");
        assert!(response.url.starts_with(BASE));
        assert_eq!(response.photos, vec![response.url.clone()]);
        let stored = service.get_course(&id).await.unwrap().unwrap();
        assert_eq!(stored.photos, response.photos);
    }

    #[tokio::test]
    async fn same_file_name_twice_adds_two_photos() {
        let service = PortalService::new_local(":memory:").await.unwrap();
        let media = MediaStore::in_memory(BASE);
        let id = service
            .create_course(&CourseInstitution {
                name: "Mr. Bob".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        let first_dir = tempfile::tempdir().unwrap();
        let second_dir = tempfile::tempdir().unwrap();

        let first = attach_photo(
            &service,
            &media,
            Collection::CourseInstitutions,
            &id,
            &photo_file(&first_dir, "kelas.jpg"),
        )
        .await
        .unwrap();
        let second = attach_photo(
            &service,
            &media,
            Collection::CourseInstitutions,
            &id,
            &photo_file(&second_dir, "kelas.jpg"),
        )
        .await
        .unwrap();

        assert_ne!(first.url, second.url);
        assert_eq!(second.photos, vec![first.url.clone(), second.url.clone()]);
        for url in &second.photos {
            let key = media.key_from_url(url).unwrap();
            assert!(media.exists(key).await.unwrap());
        }
    }

    #[tokio::test]
    async fn missing_listing_uploads_nothing() {
        let service = PortalService::new_local(":memory:").await.unwrap();
        let media = MediaStore::in_memory(BASE);
        let dir = tempfile::tempdir().unwrap();

        let err = attach_photo(
            &service,
            &media,
            Collection::KosHomestay,
            "nope",
            &photo_file(&dir, "kamar.jpg"),
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("not found"));
        assert!(!media.exists("kosHomestay/nope/kamar.jpg").await.unwrap());
    }

    #[tokio::test]
    async fn forum_posts_have_no_gallery() {
        let service = PortalService::new_local(":memory:").await.unwrap();
        let media = MediaStore::in_memory(BASE);
        let err = attach_photo(
            &service,
            &media,
            Collection::ForumPosts,
            "p1",
            Path::new("x.png"),
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("no photo gallery"));
    }
}
