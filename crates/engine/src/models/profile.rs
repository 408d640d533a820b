//! User profile and the injected profile-store capability.
//!
//! The engine never touches storage directly: callers hand it a
//! `ProfileStore` implementation. `InMemoryProfileStore` is the in-tree
//! implementation tests and single-process deployments use.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::errors::EngineError;

/// A user's self-reported state. Skill strings are free-form and are never
/// validated against the skill roster at ingestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub key: String,
    pub skills: Vec<String>,
    pub interests: Option<String>,
    pub target_role_id: Option<String>,
}

impl UserProfile {
    /// Builds a profile, de-duplicating the skill list.
    pub fn new(key: impl Into<String>, skills: Vec<String>) -> Self {
        UserProfile {
            key: key.into(),
            skills: dedup_skills(&skills),
            interests: None,
            target_role_id: None,
        }
    }
}

/// De-duplicates a skill list case-insensitively, keeping the first spelling
/// and first-occurrence order.
pub fn dedup_skills(skills: &[String]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    let mut out = Vec::new();
    for skill in skills {
        let folded = skill.trim().to_lowercase();
        if folded.is_empty() || seen.contains(&folded) {
            continue;
        }
        seen.push(folded);
        out.push(skill.trim().to_string());
    }
    out
}

/// Storage capability for user profiles. Implementations live outside the
/// engine; the in-memory one below backs tests.
pub trait ProfileStore: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<UserProfile>, EngineError>;
    fn save(&self, profile: &UserProfile) -> Result<(), EngineError>;
}

/// `ProfileStore` backed by a process-local map.
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: Mutex<HashMap<String, UserProfile>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProfileStore for InMemoryProfileStore {
    fn load(&self, key: &str) -> Result<Option<UserProfile>, EngineError> {
        let profiles = self
            .profiles
            .lock()
            .map_err(|_| EngineError::Store("profile store lock poisoned".to_string()))?;
        Ok(profiles.get(key).cloned())
    }

    fn save(&self, profile: &UserProfile) -> Result<(), EngineError> {
        let mut profiles = self
            .profiles
            .lock()
            .map_err(|_| EngineError::Store("profile store lock poisoned".to_string()))?;
        profiles.insert(profile.key.clone(), profile.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_keeps_first_spelling_and_order() {
        let skills = vec![
            "Python".to_string(),
            "SQL".to_string(),
            "python".to_string(),
            " SQL ".to_string(),
            "AWS".to_string(),
        ];
        assert_eq!(dedup_skills(&skills), vec!["Python", "SQL", "AWS"]);
    }

    #[test]
    fn test_dedup_drops_blank_entries() {
        let skills = vec!["".to_string(), "  ".to_string(), "Rust".to_string()];
        assert_eq!(dedup_skills(&skills), vec!["Rust"]);
    }

    #[test]
    fn test_in_memory_store_round_trip() {
        let store = InMemoryProfileStore::new();
        let profile = UserProfile::new("alex", vec!["Python".to_string()]);
        store.save(&profile).unwrap();

        let loaded = store.load("alex").unwrap().expect("profile saved");
        assert_eq!(loaded.skills, vec!["Python"]);
        assert!(store.load("nobody").unwrap().is_none());
    }

    #[test]
    fn test_save_overwrites_existing_profile() {
        let store = InMemoryProfileStore::new();
        store
            .save(&UserProfile::new("alex", vec!["Python".to_string()]))
            .unwrap();
        store
            .save(&UserProfile::new("alex", vec!["Rust".to_string()]))
            .unwrap();

        let loaded = store.load("alex").unwrap().unwrap();
        assert_eq!(loaded.skills, vec!["Rust"]);
    }
}
