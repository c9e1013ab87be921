//! Profile storage behind a small request/response contract

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{HealthError, Result};
use super::types::UserProfile;

/// Keyed access to user profiles
pub trait ProfileStore {
    /// Fetch the profile for `uid`
    fn load(&self, uid: &str) -> Result<UserProfile>;

    /// Create or replace a profile
    fn save(&mut self, profile: &UserProfile) -> Result<()>;

    /// Whether a profile exists for `uid`
    fn contains(&self, uid: &str) -> bool {
        self.load(uid).is_ok()
    }
}

/// One pretty-printed JSON document per user in a directory
#[derive(Debug, Clone)]
pub struct JsonProfileStore {
    dir: PathBuf,
}

impl JsonProfileStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|e| {
                HealthError::ProfileStoreError(format!("Failed to create {}: {}", dir.display(), e))
            })?;
        }
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, uid: &str) -> Result<PathBuf> {
        let valid = !uid.is_empty()
            && uid
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(HealthError::ProfileStoreError(format!(
                "Invalid user id: {:?}",
                uid
            )));
        }
        Ok(self.dir.join(format!("profile_{}.json", uid)))
    }
}

impl ProfileStore for JsonProfileStore {
    fn load(&self, uid: &str) -> Result<UserProfile> {
        let path = self.path_for(uid)?;
        if !path.exists() {
            return Err(HealthError::ProfileNotFound {
                uid: uid.to_string(),
            });
        }

        let json = fs::read_to_string(&path)?;
        let profile = serde_json::from_str(&json)?;
        Ok(profile)
    }

    fn save(&mut self, profile: &UserProfile) -> Result<()> {
        let path = self.path_for(&profile.uid)?;
        let json = serde_json::to_string_pretty(profile)?;
        fs::write(&path, json)?;
        Ok(())
    }
}

/// In-process store, mostly for tests
#[derive(Debug, Clone, Default)]
pub struct MemoryProfileStore {
    profiles: HashMap<String, UserProfile>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl ProfileStore for MemoryProfileStore {
    fn load(&self, uid: &str) -> Result<UserProfile> {
        self.profiles
            .get(uid)
            .cloned()
            .ok_or_else(|| HealthError::ProfileNotFound {
                uid: uid.to_string(),
            })
    }

    fn save(&mut self, profile: &UserProfile) -> Result<()> {
        self.profiles.insert(profile.uid.clone(), profile.clone());
        Ok(())
    }

    fn contains(&self, uid: &str) -> bool {
        self.profiles.contains_key(uid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bmi::BmiValue;
    use crate::profile::Disease;
    use tempfile::TempDir;

    #[test]
    fn test_json_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonProfileStore::new(dir.path().join("profiles")).unwrap();

        let mut profile = UserProfile::new("user_1");
        profile.set_measurements(Some(82.0), Some(180.0));
        profile.diseases = vec![Disease::Hypertension];
        store.save(&profile).unwrap();

        let loaded = store.load("user_1").unwrap();
        assert_eq!(loaded.bmi, BmiValue::Known(25.3));
        assert_eq!(loaded.diseases, vec![Disease::Hypertension]);
        assert!(store.contains("user_1"));
    }

    #[test]
    fn test_json_store_missing_profile() {
        let dir = TempDir::new().unwrap();
        let store = JsonProfileStore::new(dir.path()).unwrap();
        assert!(matches!(
            store.load("nobody"),
            Err(HealthError::ProfileNotFound { .. })
        ));
    }

    #[test]
    fn test_json_store_rejects_path_like_ids() {
        let dir = TempDir::new().unwrap();
        let store = JsonProfileStore::new(dir.path()).unwrap();
        assert!(matches!(
            store.load("../etc/passwd"),
            Err(HealthError::ProfileStoreError(_))
        ));
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryProfileStore::new();
        assert!(store.is_empty());
        store.save(&UserProfile::new("a")).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.contains("a"));
        assert!(!store.contains("b"));
    }
}
