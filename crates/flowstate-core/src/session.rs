//! Local mock session and feature gating.
//!
//! A session is either a guest or a "signed-in" user. Nothing is verified:
//! signing in only flips the `is_guest` flag in client-local storage. The
//! flag decides which dashboard panels are unlocked through [`Capabilities`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, SessionError, ValidationError};

/// Minimum password length accepted by the mock sign-up form.
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub user_id: Option<String>,
    pub email: Option<String>,
    pub is_guest: bool,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn guest(now: DateTime<Utc>) -> Self {
        Self {
            id: format!("guest-{}", now.timestamp_millis()),
            user_id: None,
            email: None,
            is_guest: true,
            created_at: now,
        }
    }

    pub fn user(user_id: impl Into<String>, email: impl Into<String>, now: DateTime<Utc>) -> Self {
        let user_id = user_id.into();
        Self {
            id: format!("user-{user_id}"),
            user_id: Some(user_id),
            email: Some(email.into()),
            is_guest: false,
            created_at: now,
        }
    }
}

/// Credentials collected by the sign-up form.
#[derive(Debug, Clone)]
pub struct SignUp {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignUp {
    /// Form-level checks only. There is no account to check against.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.email.trim().is_empty() {
            return Err(ValidationError::Empty("email".into()));
        }
        if self.password.is_empty() || self.confirm_password.is_empty() {
            return Err(ValidationError::Empty("password".into()));
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::InvalidValue {
                field: "confirm_password".into(),
                message: "passwords do not match".into(),
            });
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::InvalidValue {
                field: "password".into(),
                message: format!("must be at least {MIN_PASSWORD_LEN} characters"),
            });
        }
        Ok(())
    }
}

/// Which gated dashboard features a session may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub adaptive_recommendations: bool,
    pub burnout_details: bool,
    pub weekly_analytics: bool,
    pub focus_sessions: bool,
}

impl Capabilities {
    pub fn guest() -> Self {
        Self {
            adaptive_recommendations: false,
            burnout_details: false,
            weekly_analytics: false,
            focus_sessions: false,
        }
    }

    pub fn full() -> Self {
        Self {
            adaptive_recommendations: true,
            burnout_details: true,
            weekly_analytics: true,
            focus_sessions: true,
        }
    }

    pub fn for_session(session: &Session) -> Self {
        if session.is_guest {
            Self::guest()
        } else {
            Self::full()
        }
    }
}

/// Client-local key/value slot holding the serialized session.
pub trait SessionStorage {
    fn load(&self) -> Option<String>;
    fn store(&mut self, raw: &str) -> Result<()>;
    fn remove(&mut self) -> Result<()>;
}

/// Session slot kept in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStorage {
    raw: Option<String>,
}

impl MemorySessionStorage {
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
        }
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> Option<String> {
        self.raw.clone()
    }

    fn store(&mut self, raw: &str) -> Result<()> {
        self.raw = Some(raw.to_string());
        Ok(())
    }

    fn remove(&mut self) -> Result<()> {
        self.raw = None;
        Ok(())
    }
}

/// Session slot backed by a JSON file, `<data_dir>/session.json` by default.
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_location() -> Result<Self> {
        Ok(Self::new(crate::storage::data_dir()?.join("session.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> Option<String> {
        std::fs::read_to_string(&self.path).ok()
    }

    fn store(&mut self, raw: &str) -> Result<()> {
        std::fs::write(&self.path, raw).map_err(|e| SessionError::WriteFailed {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    fn remove(&mut self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::RemoveFailed {
                path: self.path.clone(),
                message: e.to_string(),
            }
            .into()),
        }
    }
}

/// Current session plus the storage it is mirrored to.
#[derive(Debug)]
pub struct SessionStore<S: SessionStorage> {
    storage: S,
    session: Session,
}

impl<S: SessionStorage> SessionStore<S> {
    /// Restore the stored session, or start and store a guest session when
    /// nothing usable is stored.
    pub fn load_or_create_guest(mut storage: S, now: DateTime<Utc>) -> Result<Self> {
        let restored = storage
            .load()
            .and_then(|raw| match serde_json::from_str::<Session>(&raw) {
                Ok(session) => Some(session),
                Err(e) => {
                    tracing::warn!("discarding unreadable session: {e}");
                    None
                }
            });

        let session = match restored {
            Some(session) => session,
            None => {
                let session = Session::guest(now);
                storage.store(&serde_json::to_string(&session)?)?;
                tracing::debug!(id = %session.id, "created guest session");
                session
            }
        };

        Ok(Self { storage, session })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_guest(&self) -> bool {
        self.session.is_guest
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities::for_session(&self.session)
    }

    /// Replace the session with a signed-in one for `user_id`.
    pub fn create_user_session(
        &mut self,
        user_id: &str,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<&Session> {
        let session = Session::user(user_id, email, now);
        self.storage.store(&serde_json::to_string(&session)?)?;
        tracing::debug!(id = %session.id, "created user session");
        self.session = session;
        Ok(&self.session)
    }

    /// Validate the form and sign in with a fresh user id.
    pub fn sign_up(&mut self, form: &SignUp, now: DateTime<Utc>) -> Result<&Session> {
        form.validate()?;
        let user_id = format!("user-{}", now.timestamp_millis());
        self.create_user_session(&user_id, form.email.trim(), now)
    }

    /// Drop the stored session and fall back to a new guest session.
    pub fn logout(&mut self, now: DateTime<Utc>) -> Result<&Session> {
        self.storage.remove()?;
        let session = Session::guest(now);
        self.storage.store(&serde_json::to_string(&session)?)?;
        self.session = session;
        Ok(&self.session)
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}
