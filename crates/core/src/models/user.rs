use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public view of a registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub picture: String,
}

/// A registered user as kept in the directory.
///
/// The password itself is never stored, only an Argon2id hash of it in PHC
/// string form (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`), which carries
/// its own salt and cost parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredUser {
    pub username: String,
    pub password_hash: String,
    /// Older directories may lack a picture; filled in on load.
    #[serde(default)]
    pub picture: String,
}

impl StoredUser {
    #[must_use]
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            name: self.username.clone(),
            picture: self.picture.clone(),
        }
    }
}

/// Avatar assigned to users who never picked one.
#[must_use]
pub fn default_picture(username: &str) -> String {
    format!("https://i.pravatar.cc/150?u={username}")
}

/// Every registered user. Serialized as JSON by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDirectory {
    pub users: Vec<StoredUser>,
}

impl UserDirectory {
    /// Case-insensitive lookup by username. Folds full Unicode case, so
    /// "José" and "JOSÉ" are the same user.
    #[must_use]
    pub fn find(&self, username: &str) -> Option<&StoredUser> {
        let wanted = username.to_lowercase();
        self.users.iter().find(|u| u.username.to_lowercase() == wanted)
    }

    pub fn find_mut(&mut self, username: &str) -> Option<&mut StoredUser> {
        let wanted = username.to_lowercase();
        self.users
            .iter_mut()
            .find(|u| u.username.to_lowercase() == wanted)
    }
}

/// A logged-in session.
///
/// `remember_me` sessions are meant to survive restarts; the caller decides
/// where to keep them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: Uuid,
    pub profile: UserProfile,
    pub remember_me: bool,
    pub started_at: DateTime<Utc>,
}

impl Session {
    pub fn new(profile: UserProfile, remember_me: bool) -> Self {
        Self {
            token: Uuid::new_v4(),
            profile,
            remember_me,
            started_at: Utc::now(),
        }
    }
}
