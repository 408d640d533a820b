//! Reference-data types: the skill and role rosters the engine is built over.
//!
//! Raw records arrive as all-string tabular rows (the shape a CSV or DB
//! collaborator hands over) and are parsed into typed rows once, at catalog
//! load. Per-field parsing is lenient — malformed numerics fall back to
//! documented defaults — while structural problems (empty or duplicate keys)
//! are rejected by the catalog.

use serde::{Deserialize, Serialize};

/// Effective learning duration for a skill with no usable reference entry,
/// or one marked `continuous`.
pub const DEFAULT_LEARNING_WEEKS: f64 = 4.0;

/// Importance weight for a required skill beyond the role's weight list.
pub const DEFAULT_IMPORTANCE: f64 = 0.5;

/// Skill difficulty tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// Lenient parse; anything unrecognized is treated as intermediate.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "beginner" => Difficulty::Beginner,
            "advanced" => Difficulty::Advanced,
            _ => Difficulty::Intermediate,
        }
    }

    /// Learning-order rank: foundations first.
    pub fn rank(self) -> u8 {
        match self {
            Difficulty::Beginner => 1,
            Difficulty::Intermediate => 2,
            Difficulty::Advanced => 3,
        }
    }
}

/// A raw skill row as handed over by the reference-data collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillRecord {
    pub skill_name: String,
    pub category: String,
    pub difficulty: String,
    /// Numeric weeks, `continuous`, or empty.
    pub learning_time_weeks: String,
    /// Comma-separated skill names, or empty.
    pub prerequisites: String,
}

/// A validated skill row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub category: String,
    pub difficulty: Difficulty,
    /// `None` means continuous/unspecified (4 weeks effective).
    pub learning_time_weeks: Option<f64>,
    pub prerequisites: Vec<String>,
}

impl Skill {
    pub fn from_record(record: &SkillRecord) -> Self {
        Skill {
            name: record.skill_name.trim().to_string(),
            category: record.category.trim().to_string(),
            difficulty: Difficulty::parse(&record.difficulty),
            learning_time_weeks: parse_learning_time(&record.learning_time_weeks),
            prerequisites: parse_name_list(&record.prerequisites),
        }
    }

    /// Weeks to learn this skill from scratch.
    pub fn full_weeks(&self) -> f64 {
        self.learning_time_weeks.unwrap_or(DEFAULT_LEARNING_WEEKS)
    }

    /// Weeks to deepen a partially known skill.
    pub fn half_weeks(&self) -> f64 {
        self.full_weeks() * 0.5
    }
}

/// A raw role row as handed over by the reference-data collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleRecord {
    pub role_id: String,
    pub role_name: String,
    pub category: String,
    pub description: String,
    /// Comma-separated skill names.
    pub required_skills: String,
    /// Comma-separated floats, positionally aligned to `required_skills`.
    pub importance_weights: String,
    pub avg_salary: String,
    pub growth_rate: String,
}

/// A validated role row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub required_skills: Vec<String>,
    pub importance_weights: Vec<f64>,
    pub avg_salary: Option<f64>,
    pub growth_rate: String,
}

impl Role {
    pub fn from_record(record: &RoleRecord) -> Self {
        Role {
            id: record.role_id.trim().to_string(),
            name: record.role_name.trim().to_string(),
            category: record.category.trim().to_string(),
            description: record.description.trim().to_string(),
            required_skills: parse_name_list(&record.required_skills),
            importance_weights: parse_weight_list(&record.importance_weights),
            avg_salary: record.avg_salary.trim().parse::<f64>().ok(),
            growth_rate: record.growth_rate.trim().to_string(),
        }
    }

    /// Importance weight of the `index`-th required skill.
    /// Skills beyond the weight list get the default weight.
    pub fn importance_of(&self, index: usize) -> f64 {
        self.importance_weights
            .get(index)
            .copied()
            .unwrap_or(DEFAULT_IMPORTANCE)
    }
}

/// Splits a comma-separated name list, trimming entries and dropping empties.
pub fn parse_name_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Splits a comma-separated weight list. Malformed entries default to 0.5
/// rather than failing the row.
pub fn parse_weight_list(raw: &str) -> Vec<f64> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f64>().unwrap_or(DEFAULT_IMPORTANCE))
        .collect()
}

fn parse_learning_time(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("continuous") {
        return None;
    }
    trimmed.parse::<f64>().ok()
}
