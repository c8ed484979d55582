//! Admin sessions.
//!
//! A [`Session`] is an explicit value owned by the caller. Logging in asks an
//! [`AuthBackend`] to check the credentials and, on success, stores the user
//! and an opaque token in the session. A signed-in session can also change
//! its user's password through the same backend.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use spmb_core::settings::AdminSettings;
use spmb_core::{SpmbError, SpmbResult};

use crate::models::{AdminRole, AdminUser};

/// A login attempt.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Pluggable credential check.
///
/// Returns `Ok(None)` when the credentials simply do not match and `Err`
/// only when the backend itself fails.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> SpmbResult<Option<AdminUser>>;

    /// Replaces the stored password of `username`.
    async fn set_password(&self, username: &str, new_password: &str) -> SpmbResult<()>;
}

/// Accepts exactly one configured username and password.
///
/// Clones share the password, so a change made through one clone is seen
/// by all of them.
#[derive(Debug, Clone)]
pub struct StaticCredentialBackend {
    password: Arc<RwLock<String>>,
    user: AdminUser,
}

impl StaticCredentialBackend {
    pub fn new(user: AdminUser, password: impl Into<String>) -> Self {
        Self {
            password: Arc::new(RwLock::new(password.into())),
            user,
        }
    }

    pub fn from_settings(admin: &AdminSettings) -> Self {
        Self::new(
            AdminUser {
                id: "1".to_string(),
                username: admin.username.clone(),
                email: admin.email.clone(),
                role: AdminRole::Superadmin,
                nama_lengkap: admin.nama_lengkap.clone(),
            },
            admin.password.clone(),
        )
    }
}

impl Default for StaticCredentialBackend {
    fn default() -> Self {
        Self::from_settings(&AdminSettings::default())
    }
}

#[async_trait]
impl AuthBackend for StaticCredentialBackend {
    async fn authenticate(&self, credentials: &Credentials) -> SpmbResult<Option<AdminUser>> {
        let matches = credentials.username == self.user.username
            && credentials.password == *self.password.read().await;
        Ok(matches.then(|| self.user.clone()))
    }

    async fn set_password(&self, username: &str, new_password: &str) -> SpmbResult<()> {
        if username != self.user.username {
            return Err(SpmbError::NotFound(format!("admin '{username}'")));
        }
        *self.password.write().await = new_password.to_string();
        Ok(())
    }
}

/// The signed-in state of one admin client.
#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Option<AdminUser>,
    token: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks the credentials and signs the user in.
    ///
    /// A failed attempt leaves an existing session untouched.
    ///
    /// # Errors
    ///
    /// Returns [`SpmbError::Validation`] if either input is empty,
    /// [`SpmbError::Unauthorized`] if the credentials do not match, or the
    /// backend's own error.
    pub async fn login(
        &mut self,
        backend: &dyn AuthBackend,
        username: &str,
        password: &str,
    ) -> SpmbResult<&AdminUser> {
        if username.is_empty() || password.is_empty() {
            return Err(SpmbError::validation(
                "Username dan password harus diisi",
                "required",
            ));
        }
        let credentials = Credentials::new(username, password);
        let Some(user) = backend.authenticate(&credentials).await? else {
            tracing::warn!(username, "rejected admin login");
            return Err(SpmbError::Unauthorized(
                "Username atau password salah".to_string(),
            ));
        };
        tracing::info!(username, "admin logged in");
        self.token = Some(format!("token-{}", Uuid::new_v4().simple()));
        Ok(self.user.insert(user))
    }

    /// Changes the signed-in user's password.
    ///
    /// # Errors
    ///
    /// Returns [`SpmbError::Unauthorized`] if nobody is signed in or the old
    /// password is wrong, [`SpmbError::Validation`] if an input is empty or
    /// the confirmation differs, or the backend's own error.
    pub async fn change_password(
        &self,
        backend: &dyn AuthBackend,
        old_password: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> SpmbResult<()> {
        let username = self.require_user()?.username.as_str();
        if old_password.is_empty() || new_password.is_empty() || confirm_password.is_empty() {
            return Err(SpmbError::validation("Semua field harus diisi", "required"));
        }
        if new_password != confirm_password {
            return Err(SpmbError::validation(
                "Password baru dan konfirmasi tidak cocok",
                "mismatch",
            ));
        }
        let credentials = Credentials::new(username, old_password);
        if backend.authenticate(&credentials).await?.is_none() {
            tracing::warn!(username, "rejected password change");
            return Err(SpmbError::Unauthorized("Password lama salah".to_string()));
        }
        backend.set_password(username, new_password).await?;
        tracing::info!(username, "admin password changed");
        Ok(())
    }

    /// Signs out, clearing the user and token.
    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::info!(username = %user.username, "admin logged out");
        }
        self.token = None;
    }

    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub const fn user(&self) -> Option<&AdminUser> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Returns the signed-in user or an error for guarded admin actions.
    ///
    /// # Errors
    ///
    /// Returns [`SpmbError::Unauthorized`] if nobody is signed in.
    pub fn require_user(&self) -> SpmbResult<&AdminUser> {
        self.user
            .as_ref()
            .filter(|_| self.is_authenticated())
            .ok_or_else(|| SpmbError::Unauthorized("Silakan login terlebih dahulu".to_string()))
    }
}
