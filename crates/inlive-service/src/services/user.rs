//! Profile management for the authenticated user.

use tracing::{info, warn};

use inlive_core::{AppError, AppResult};
use inlive_database::repositories::UserRepository;
use inlive_entity::user::{UpdateUser, User};
use inlive_file_client::upload::IMAGE_CONTENT_TYPES;
use inlive_file_client::{extract_filename, FileManagerClient, UploadFile};

use crate::context::RequestContext;

#[derive(Clone)]
pub struct UserService {
    users: UserRepository,
    files: FileManagerClient,
}

impl UserService {
    pub fn new(users: UserRepository, files: FileManagerClient) -> Self {
        Self { users, files }
    }

    /// Fetch the caller's profile.
    pub async fn current_user(&self, ctx: &RequestContext) -> AppResult<User> {
        self.users
            .find_by_keycloak_id(&ctx.keycloak_id)
            .await?
            .ok_or_else(|| AppError::not_found("User profile not found"))
    }

    /// Update the caller's profile fields.
    pub async fn update_profile(&self, ctx: &RequestContext, data: UpdateUser) -> AppResult<User> {
        let user = self.users.update(ctx.user_id, &data).await?;
        info!(user_id = user.id, "profile updated");
        Ok(user)
    }

    /// Replace the caller's profile photo.
    ///
    /// The previous photo is removed from storage on a best-effort basis;
    /// a stale remote file never fails the replacement.
    pub async fn update_photo(&self, ctx: &RequestContext, photo: UploadFile) -> AppResult<User> {
        photo.validate(IMAGE_CONTENT_TYPES, self.files.config().max_file_size_bytes)?;

        let user = self.current_user(ctx).await?;
        let directory = self.files.config().user_photos_dir.clone();

        if let Some(old_url) = &user.photo_url {
            let filename = extract_filename(old_url);
            if let Err(e) = self.files.delete_file(&directory, filename).await {
                warn!(user_id = user.id, error = %e, "failed to remove previous profile photo");
            }
        }

        let urls = self.files.upload_files(&directory, vec![photo], true).await?;
        let url = urls
            .into_iter()
            .next()
            .ok_or_else(|| AppError::external_service("File manager returned no URL for the uploaded photo"))?;

        let user = self.users.set_photo_url(user.id, Some(&url)).await?;
        info!(user_id = user.id, "profile photo updated");
        Ok(user)
    }

    /// Remove the caller's profile photo.
    pub async fn delete_photo(&self, ctx: &RequestContext) -> AppResult<()> {
        let user = self.current_user(ctx).await?;
        let url = user
            .photo_url
            .as_deref()
            .ok_or_else(|| AppError::validation("User has no profile photo"))?;

        let directory = &self.files.config().user_photos_dir;
        if let Err(e) = self.files.delete_file(directory, extract_filename(url)).await {
            warn!(user_id = user.id, error = %e, "failed to remove profile photo from storage");
        }

        self.users.set_photo_url(user.id, None).await?;
        info!(user_id = user.id, "profile photo removed");
        Ok(())
    }
}
