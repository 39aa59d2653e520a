use crate::errors::{AuthError, CoreError};
use crate::models::user::{default_picture, Session, StoredUser, UserDirectory, UserProfile};
use crate::storage::encryption::{self, KdfParams};

/// Registration, login and session handling over a [`UserDirectory`].
///
/// The service keeps everything in memory. Callers persist the directory
/// (see [`directory_to_json`](Self::directory_to_json)) and, for
/// remember-me logins, the [`persistent_session`](Self::persistent_session).
pub struct AuthService {
    directory: UserDirectory,
    current: Option<Session>,
    kdf_params: KdfParams,
}

impl AuthService {
    pub fn new() -> Self {
        Self::with_directory(UserDirectory::default())
    }

    /// Wrap an existing directory. Users saved without a picture get the default avatar.
    pub fn with_directory(mut directory: UserDirectory) -> Self {
        for user in directory.users.iter_mut().filter(|u| u.picture.is_empty()) {
            user.picture = default_picture(&user.username);
        }
        Self {
            directory,
            current: None,
            kdf_params: KdfParams::interactive(),
        }
    }

    /// Load a directory previously produced by [`directory_to_json`](Self::directory_to_json).
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let directory: UserDirectory = serde_json::from_str(json)?;
        Ok(Self::with_directory(directory))
    }

    /// Override the KDF costs used for newly hashed passwords.
    pub fn with_kdf_params(mut self, params: KdfParams) -> Self {
        self.kdf_params = params;
        self
    }

    #[must_use]
    pub fn directory(&self) -> &UserDirectory {
        &self.directory
    }

    pub fn directory_to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.directory)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize user directory: {e}")))
    }

    /// Create an account and log straight into a transient session.
    pub fn register(&mut self, username: &str, password: &str) -> Result<Session, CoreError> {
        require_credentials(username, password)?;
        if self.directory.find(username).is_some() {
            return Err(AuthError::UsernameTaken(username.to_string()).into());
        }

        let password_hash = encryption::hash_password(password, &self.kdf_params)?;
        self.directory.users.push(StoredUser {
            username: username.to_string(),
            password_hash,
            picture: default_picture(username),
        });
        tracing::info!(username, "user registered");

        self.login(username, password, false)
    }

    /// Log in. Usernames match case-insensitively (full Unicode folding),
    /// passwords exactly.
    pub fn login(
        &mut self,
        username: &str,
        password: &str,
        remember_me: bool,
    ) -> Result<Session, CoreError> {
        require_credentials(username, password)?;
        let user = self
            .directory
            .find(username)
            .ok_or(AuthError::InvalidCredentials)?;

        let valid = encryption::verify_password(password, &user.password_hash)?;
        if !valid {
            tracing::info!(username, "login rejected");
            return Err(AuthError::InvalidCredentials.into());
        }

        let session = Session::new(user.profile(), remember_me);
        tracing::info!(username = %session.profile.name, remember_me, "user logged in");
        self.current = Some(session.clone());
        Ok(session)
    }

    pub fn logout(&mut self) {
        if let Some(session) = self.current.take() {
            tracing::info!(username = %session.profile.name, "user logged out");
        }
    }

    #[must_use]
    pub fn current_session(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn current_user(&self) -> Option<&UserProfile> {
        self.current.as_ref().map(|s| &s.profile)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// The current session if it was opened with remember-me.
    #[must_use]
    pub fn persistent_session(&self) -> Option<&Session> {
        self.current.as_ref().filter(|s| s.remember_me)
    }

    /// Resume a previously persisted session.
    ///
    /// Returns `false` (and stays logged out) if the user no longer exists.
    /// The profile is refreshed from the directory.
    pub fn restore_session(&mut self, mut session: Session) -> bool {
        match self.directory.find(&session.profile.name) {
            Some(user) => {
                session.profile = user.profile();
                self.current = Some(session);
                true
            }
            None => {
                tracing::warn!(username = %session.profile.name, "persisted session for unknown user dropped");
                false
            }
        }
    }

    /// Change the logged-in user's avatar in both the directory and the session.
    pub fn update_profile_picture(&mut self, url: &str) -> Result<(), CoreError> {
        let session = self.current.as_mut().ok_or(AuthError::NotAuthenticated)?;
        let user = self
            .directory
            .find_mut(&session.profile.name)
            .ok_or(AuthError::NotAuthenticated)?;

        user.picture = url.to_string();
        session.profile.picture = url.to_string();
        Ok(())
    }
}

impl Default for AuthService {
    fn default() -> Self {
        Self::new()
    }
}

fn require_credentials(username: &str, password: &str) -> Result<(), AuthError> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(AuthError::MissingCredentials);
    }
    Ok(())
}
