//! Validated access to the skill and role rosters.
//!
//! Catalogs load fully or not at all: structural problems (empty or
//! duplicate keys) fail the load with `EngineError::ReferenceData`. After a
//! successful load every lookup is infallible — unknown skill names resolve
//! to the documented default (a 4-week intermediate skill with no
//! prerequisites) so analysis never fails mid-flight on a free-form name.

use std::collections::HashMap;

use tracing::info;

use crate::errors::EngineError;
use crate::models::reference::{
    Difficulty, Role, RoleRecord, Skill, SkillRecord, DEFAULT_LEARNING_WEEKS,
};

/// Learning metadata for one skill name, defaults applied.
#[derive(Debug, Clone)]
pub struct LearningInfo {
    pub weeks: f64,
    pub difficulty: Difficulty,
    pub prerequisites: Vec<String>,
}

impl Default for LearningInfo {
    fn default() -> Self {
        LearningInfo {
            weeks: DEFAULT_LEARNING_WEEKS,
            difficulty: Difficulty::Intermediate,
            prerequisites: Vec::new(),
        }
    }
}

/// The skill roster, keyed case-insensitively by skill name.
#[derive(Debug)]
pub struct SkillCatalog {
    skills: Vec<Skill>,
    by_name: HashMap<String, usize>,
}

impl SkillCatalog {
    pub fn from_records(records: &[SkillRecord]) -> Result<Self, EngineError> {
        let mut skills = Vec::with_capacity(records.len());
        let mut by_name = HashMap::with_capacity(records.len());

        for record in records {
            let skill = Skill::from_record(record);
            if skill.name.is_empty() {
                return Err(EngineError::ReferenceData(
                    "skill row with empty skill_name".to_string(),
                ));
            }
            let key = skill.name.to_lowercase();
            if by_name.contains_key(&key) {
                return Err(EngineError::ReferenceData(format!(
                    "duplicate skill_name '{}'",
                    skill.name
                )));
            }
            by_name.insert(key, skills.len());
            skills.push(skill);
        }

        info!(skills = skills.len(), "skill catalog loaded");
        Ok(SkillCatalog { skills, by_name })
    }

    /// Case-insensitive lookup.
    pub fn get(&self, name: &str) -> Option<&Skill> {
        self.by_name
            .get(&name.trim().to_lowercase())
            .map(|&i| &self.skills[i])
    }

    /// Learning metadata for a skill name. Unknown names get the default
    /// entry rather than failing.
    pub fn learning_info(&self, name: &str) -> LearningInfo {
        match self.get(name) {
            Some(skill) => LearningInfo {
                weeks: skill.full_weeks(),
                difficulty: skill.difficulty,
                prerequisites: skill.prerequisites.clone(),
            },
            None => LearningInfo::default(),
        }
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

/// The role roster, keyed by role id.
#[derive(Debug)]
pub struct RoleCatalog {
    roles: Vec<Role>,
    by_id: HashMap<String, usize>,
}

impl RoleCatalog {
    pub fn from_records(records: &[RoleRecord]) -> Result<Self, EngineError> {
        let mut roles = Vec::with_capacity(records.len());
        let mut by_id = HashMap::with_capacity(records.len());

        for record in records {
            let role = Role::from_record(record);
            if role.id.is_empty() {
                return Err(EngineError::ReferenceData(
                    "role row with empty role_id".to_string(),
                ));
            }
            if by_id.contains_key(&role.id) {
                return Err(EngineError::ReferenceData(format!(
                    "duplicate role_id '{}'",
                    role.id
                )));
            }
            by_id.insert(role.id.clone(), roles.len());
            roles.push(role);
        }

        info!(roles = roles.len(), "role catalog loaded");
        Ok(RoleCatalog { roles, by_id })
    }

    pub fn get(&self, role_id: &str) -> Option<&Role> {
        self.by_id.get(role_id).map(|&i| &self.roles[i])
    }

    /// Position of a role in catalog order.
    pub fn index_of(&self, role_id: &str) -> Option<usize> {
        self.by_id.get(role_id).copied()
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill_record(name: &str) -> SkillRecord {
        SkillRecord {
            skill_name: name.to_string(),
            category: "Cloud".to_string(),
            difficulty: "advanced".to_string(),
            learning_time_weeks: "6".to_string(),
            prerequisites: "Networking".to_string(),
        }
    }

    fn role_record(id: &str) -> RoleRecord {
        RoleRecord {
            role_id: id.to_string(),
            role_name: "Cloud Engineer".to_string(),
            category: "Infrastructure".to_string(),
            description: "Runs cloud platforms".to_string(),
            required_skills: "AWS, Networking".to_string(),
            importance_weights: "0.9, 0.6".to_string(),
            avg_salary: "130000".to_string(),
            growth_rate: "High".to_string(),
        }
    }

    #[test]
    fn test_skill_lookup_is_case_insensitive() {
        let catalog = SkillCatalog::from_records(&[skill_record("AWS")]).unwrap();
        assert!(catalog.get("aws").is_some());
        assert!(catalog.get(" AWS ").is_some());
        assert!(catalog.get("azure").is_none());
    }

    #[test]
    fn test_duplicate_skill_name_fails_load() {
        let result = SkillCatalog::from_records(&[skill_record("AWS"), skill_record("aws")]);
        assert!(matches!(result, Err(EngineError::ReferenceData(_))));
    }

    #[test]
    fn test_empty_skill_name_fails_load() {
        let result = SkillCatalog::from_records(&[skill_record("  ")]);
        assert!(matches!(result, Err(EngineError::ReferenceData(_))));
    }

    #[test]
    fn test_unknown_skill_gets_default_learning_info() {
        let catalog = SkillCatalog::from_records(&[]).unwrap();
        let info = catalog.learning_info("Quantum Basketweaving");
        assert_eq!(info.weeks, 4.0);
        assert_eq!(info.difficulty, Difficulty::Intermediate);
        assert!(info.prerequisites.is_empty());
    }

    #[test]
    fn test_known_skill_learning_info() {
        let catalog = SkillCatalog::from_records(&[skill_record("AWS")]).unwrap();
        let info = catalog.learning_info("AWS");
        assert_eq!(info.weeks, 6.0);
        assert_eq!(info.difficulty, Difficulty::Advanced);
        assert_eq!(info.prerequisites, vec!["Networking"]);
    }

    #[test]
    fn test_duplicate_role_id_fails_load() {
        let result = RoleCatalog::from_records(&[role_record("ce"), role_record("ce")]);
        assert!(matches!(result, Err(EngineError::ReferenceData(_))));
    }

    #[test]
    fn test_role_lookup_and_index() {
        let catalog =
            RoleCatalog::from_records(&[role_record("ce"), role_record("sre")]).unwrap();
        assert_eq!(catalog.get("sre").unwrap().id, "sre");
        assert_eq!(catalog.index_of("sre"), Some(1));
        assert_eq!(catalog.index_of("cto"), None);
    }
}
