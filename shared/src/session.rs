//! Persisted login session. One JSON document in a fixed slot under the app
//! data directory; survives restarts until an explicit logout clears it.

use std::fs;
use std::path::PathBuf;

use crate::error::StoreError;
use crate::types::SessionUser;

/// Fixed slot name holding the serialized [`SessionUser`].
const SESSION_FILE: &str = "userinfo.json";

pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store rooted at the platform-local data directory.
    pub fn open_default() -> Self {
        let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::open(base.join("bannerfield"))
    }

    /// Store rooted at an explicit directory.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(SESSION_FILE),
        }
    }

    pub fn save(&self, user: &SessionUser) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(user)?;
        fs::write(&self.path, json)?;
        tracing::info!(uid = %user.uid, "session saved");
        Ok(())
    }

    /// The stored user, if any. A missing, unreadable, or corrupt slot all
    /// count as "no session" so startup can fall through to the login route.
    pub fn load(&self) -> Option<SessionUser> {
        let raw = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!("stored session unreadable, ignoring: {}", e);
                None
            }
        }
    }

    /// Remove the slot. Clearing an already-empty store is not an error.
    pub fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!("session cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> SessionUser {
        SessionUser {
            uid: "u-42".to_string(),
            full_name: "Asha Verma".to_string(),
            phone: "9876543210".to_string(),
            profile_picture: None,
            aadhar_card: None,
            address: Some("14 MG Road".to_string()),
            city: Some("Pune".to_string()),
            state: Some("Maharashtra".to_string()),
            pincode: Some("411001".to_string()),
            status: "active".to_string(),
        }
    }

    #[test]
    fn round_trips_the_session_user() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path());

        assert!(store.load().is_none());
        store.save(&sample_user()).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.uid, "u-42");
        assert_eq!(loaded.phone, "9876543210");
        assert_eq!(loaded.city.as_deref(), Some("Pune"));
    }

    #[test]
    fn clear_removes_the_slot_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path());

        store.save(&sample_user()).unwrap();
        store.clear().unwrap();
        assert!(store.load().is_none());

        // clearing again is fine
        store.clear().unwrap();
    }

    #[test]
    fn corrupt_slot_reads_as_no_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path());

        fs::create_dir_all(dir.path()).unwrap();
        fs::write(dir.path().join(SESSION_FILE), "{not json").unwrap();
        assert!(store.load().is_none());
    }
}
