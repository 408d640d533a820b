//! Free-text skill extraction against the skill roster.
//!
//! Output order always follows the catalog (extraction) or the input
//! (canonicalization), so repeated runs over the same text are identical.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use crate::catalog::SkillCatalog;
use crate::matching::overlap::normalize_text;
use crate::models::reference::Skill;

/// Category bucket for skills the roster doesn't know.
const OTHER_CATEGORY: &str = "Other";

/// Extracts and canonicalizes skill names using the shared skill roster.
pub struct SkillExtractor {
    catalog: Arc<SkillCatalog>,
}

impl SkillExtractor {
    pub fn new(catalog: Arc<SkillCatalog>) -> Self {
        SkillExtractor { catalog }
    }

    /// Roster skills found in free text, catalog order.
    ///
    /// A skill counts as found when its normalized name is contained in the
    /// normalized text (or vice versa for very short texts), or when it
    /// occurs as a whole word, plural `s` and `ing` suffix variants
    /// included.
    pub fn extract_from_text(&self, text: &str) -> Vec<String> {
        let text_normalized = normalize_text(text);
        if text_normalized.is_empty() {
            return Vec::new();
        }

        self.catalog
            .skills()
            .iter()
            .filter(|skill| {
                let skill_normalized = normalize_text(&skill.name);
                if skill_normalized.is_empty() {
                    return false;
                }
                text_normalized.contains(&skill_normalized)
                    || skill_normalized.contains(&text_normalized)
                    || has_word_variant(&text_normalized, &skill_normalized)
            })
            .map(|skill| skill.name.clone())
            .collect()
    }

    /// Maps free-form entries to canonical roster names where possible.
    ///
    /// Exact normalized matches are resolved across the whole roster before
    /// substring containment is tried; unknown entries pass through as-is.
    /// The result is de-duplicated, input order preserved.
    pub fn canonicalize(&self, entries: &[String]) -> Vec<String> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut out = Vec::new();

        for entry in entries {
            let resolved = self
                .match_to_known(entry)
                .unwrap_or_else(|| entry.trim().to_string());
            if resolved.is_empty() {
                continue;
            }
            if seen.insert(resolved.to_lowercase()) {
                out.push(resolved);
            }
        }
        out
    }

    /// Groups skills by roster category; unknown skills land in `Other`.
    pub fn categorize(&self, skills: &[String]) -> BTreeMap<String, Vec<String>> {
        let mut categorized: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for skill in skills {
            let category = self
                .catalog
                .get(skill)
                .map(|s| s.category.clone())
                .unwrap_or_else(|| OTHER_CATEGORY.to_string());
            categorized.entry(category).or_default().push(skill.clone());
        }
        categorized
    }

    pub fn skill_info(&self, name: &str) -> Option<&Skill> {
        self.catalog.get(name)
    }

    fn match_to_known(&self, entry: &str) -> Option<String> {
        let entry_normalized = normalize_text(entry);
        if entry_normalized.is_empty() {
            return None;
        }

        // Exact match anywhere in the roster beats containment.
        for skill in self.catalog.skills() {
            if normalize_text(&skill.name) == entry_normalized {
                return Some(skill.name.clone());
            }
        }
        for skill in self.catalog.skills() {
            let skill_normalized = normalize_text(&skill.name);
            if !skill_normalized.is_empty()
                && (skill_normalized.contains(&entry_normalized)
                    || entry_normalized.contains(&skill_normalized))
            {
                return Some(skill.name.clone());
            }
        }
        None
    }
}

/// Whole-word occurrence of `word`, `word` + `s`, or `word` + `ing` in
/// `text`. Both sides must already be normalized.
fn has_word_variant(text: &str, word: &str) -> bool {
    has_word(text, word)
        || has_word(text, &format!("{word}s"))
        || has_word(text, &format!("{word}ing"))
}

fn has_word(text: &str, word: &str) -> bool {
    let bytes = text.as_bytes();
    let mut start = 0;
    while let Some(found) = text[start..].find(word) {
        let begin = start + found;
        let end = begin + word.len();
        let boundary_before =
            begin == 0 || !bytes[begin - 1].is_ascii_alphanumeric();
        let boundary_after = end == text.len() || !bytes[end].is_ascii_alphanumeric();
        if boundary_before && boundary_after {
            return true;
        }
        start = begin + 1;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::reference::SkillRecord;

    fn catalog() -> Arc<SkillCatalog> {
        let records: Vec<SkillRecord> = [
            ("Python", "Programming"),
            ("SQL", "Data"),
            ("Docker", "Infrastructure"),
            ("Machine Learning", "Data"),
            ("Communication", "Soft Skills"),
        ]
        .iter()
        .map(|(name, category)| SkillRecord {
            skill_name: name.to_string(),
            category: category.to_string(),
            difficulty: "intermediate".to_string(),
            learning_time_weeks: "4".to_string(),
            prerequisites: String::new(),
        })
        .collect();
        Arc::new(SkillCatalog::from_records(&records).unwrap())
    }

    #[test]
    fn test_extract_finds_skills_in_catalog_order() {
        let extractor = SkillExtractor::new(catalog());
        let found = extractor
            .extract_from_text("I know SQL and Python, plus some Docker basics");
        assert_eq!(found, vec!["Python", "SQL", "Docker"]);
    }

    #[test]
    fn test_extract_matches_multiword_skills() {
        let extractor = SkillExtractor::new(catalog());
        let found = extractor.extract_from_text("Built machine learning pipelines at work");
        assert_eq!(found, vec!["Machine Learning"]);
    }

    #[test]
    fn test_extract_matches_suffix_variants() {
        let extractor = SkillExtractor::new(catalog());
        let found = extractor.extract_from_text("Shipped dockers for every service");
        assert_eq!(found, vec!["Docker"]);
    }

    #[test]
    fn test_extract_unrelated_text_matches_nothing() {
        let extractor = SkillExtractor::new(catalog());
        let found = extractor.extract_from_text("Worked with elasticsearch clusters");
        assert!(found.is_empty());
    }

    #[test]
    fn test_extract_empty_text() {
        let extractor = SkillExtractor::new(catalog());
        assert!(extractor.extract_from_text("").is_empty());
        assert!(extractor.extract_from_text("   !!! ").is_empty());
    }

    #[test]
    fn test_extract_is_deterministic() {
        let extractor = SkillExtractor::new(catalog());
        let text = "python python sql docker communication";
        assert_eq!(
            extractor.extract_from_text(text),
            extractor.extract_from_text(text)
        );
    }

    #[test]
    fn test_canonicalize_resolves_exact_then_containment() {
        let extractor = SkillExtractor::new(catalog());
        let entries = vec![
            "python".to_string(),
            "machine learning".to_string(),
            "Haskell".to_string(),
        ];
        assert_eq!(
            extractor.canonicalize(&entries),
            vec!["Python", "Machine Learning", "Haskell"]
        );
    }

    #[test]
    fn test_canonicalize_dedups_after_resolution() {
        let extractor = SkillExtractor::new(catalog());
        let entries = vec!["python".to_string(), "Python ".to_string()];
        assert_eq!(extractor.canonicalize(&entries), vec!["Python"]);
    }

    #[test]
    fn test_categorize_buckets_unknowns_as_other() {
        let extractor = SkillExtractor::new(catalog());
        let grouped = extractor.categorize(&[
            "Python".to_string(),
            "SQL".to_string(),
            "Haskell".to_string(),
        ]);
        assert_eq!(grouped["Programming"], vec!["Python"]);
        assert_eq!(grouped["Data"], vec!["SQL"]);
        assert_eq!(grouped["Other"], vec!["Haskell"]);
    }

    #[test]
    fn test_skill_info_lookup() {
        let extractor = SkillExtractor::new(catalog());
        assert_eq!(extractor.skill_info("sql").unwrap().category, "Data");
        assert!(extractor.skill_info("Haskell").is_none());
    }
}
