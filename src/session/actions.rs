//! Pre-authenticated action wrappers
//!
//! Thin endpoints over an authenticated [`SessionGeneric`]: each one
//! substitutes an id into the endpoint catalog and issues the request
//! through the session's plumbing, which already carries the cookie jar
//! and the CSRF header. No logic lives here beyond URL substitution.

use crate::{
    Error, Result,
    session::manager::SessionGeneric,
    session::pacing::Pacer,
    types::CommentForm,
};
use reqwest::StatusCode;
use tracing::debug;

impl<P: Pacer> SessionGeneric<P> {
    /// Like a media item by id
    pub async fn like(&mut self, media_id: &str) -> Result<StatusCode> {
        self.require_login()?;
        let url = self.settings().endpoints.like_url(media_id);
        debug!(media_id, "liking media");
        Ok(self.post_empty(&url).await?.status())
    }

    /// Remove a like from a media item by id
    pub async fn unlike(&mut self, media_id: &str) -> Result<StatusCode> {
        self.require_login()?;
        let url = self.settings().endpoints.unlike_url(media_id);
        debug!(media_id, "unliking media");
        Ok(self.post_empty(&url).await?.status())
    }

    /// Comment on a media item by id
    pub async fn comment(&mut self, media_id: &str, text: &str) -> Result<StatusCode> {
        self.require_login()?;
        let url = self.settings().endpoints.comment_url(media_id);
        let form = CommentForm { comment_text: text };
        debug!(media_id, "posting comment");
        Ok(self.post_form(&url, &form).await?.status())
    }

    /// Follow a user by id
    pub async fn follow(&mut self, user_id: &str) -> Result<StatusCode> {
        self.require_login()?;
        let url = self.settings().endpoints.follow_url(user_id);
        debug!(user_id, "following user");
        Ok(self.post_empty(&url).await?.status())
    }

    /// Unfollow a user by id
    pub async fn unfollow(&mut self, user_id: &str) -> Result<StatusCode> {
        self.require_login()?;
        let url = self.settings().endpoints.unfollow_url(user_id);
        debug!(user_id, "unfollowing user");
        Ok(self.post_empty(&url).await?.status())
    }

    /// Fetch the JSON blob for a media item by shortcode.
    ///
    /// The endpoint is public, so no authentication is required; the
    /// payload is returned verbatim.
    pub async fn media_info(&mut self, shortcode: &str) -> Result<serde_json::Value> {
        let url = self.settings().endpoints.media_info_url(shortcode);
        Ok(self.get(&url).await?.json().await?)
    }

    /// Fetch the JSON blob for a user profile by username.
    ///
    /// The endpoint is public, so no authentication is required; the
    /// payload is returned verbatim.
    pub async fn user_info(&mut self, username: &str) -> Result<serde_json::Value> {
        let url = self.settings().endpoints.user_info_url(username);
        Ok(self.get(&url).await?.json().await?)
    }

    fn require_login(&self) -> Result<()> {
        if self.logged() {
            Ok(())
        } else {
            Err(Error::NotLoggedIn)
        }
    }
}
