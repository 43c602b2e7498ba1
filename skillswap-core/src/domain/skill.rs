//! Skill domain model

use serde::{Deserialize, Deserializer, Serialize};

/// Read an optional text column as a plain string; `null` becomes ""
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A skill a member offers or wants to learn
///
/// Identity is the server-assigned `id`. Skills are never edited in place;
/// changing one means removing it and adding a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// "beginner", "intermediate", "advanced" or "expert".
    /// Wanted skills come back from the API as `levelNeeded`.
    #[serde(default, alias = "levelNeeded", skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

impl Skill {
    pub fn new(id: impl Into<String>, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            category: None,
            level: None,
        }
    }

    /// Case-insensitive substring match on the skill name
    pub fn name_matches(&self, normalized_query: &str) -> bool {
        self.name.to_lowercase().contains(normalized_query)
    }
}

/// Which of a user's two skill lists an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillKind {
    Offered,
    Wanted,
}

impl SkillKind {
    /// Path segment used by the skills API
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillKind::Offered => "offered",
            SkillKind::Wanted => "wanted",
        }
    }
}

/// A skill as submitted by the user, before the server assigns an id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSkill {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

impl NewSkill {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            category: None,
            level: None,
        }
    }

    /// Validate skill input
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("skill name cannot be empty");
        }
        if self.name.chars().count() > 100 {
            return Err("skill name cannot exceed 100 characters");
        }
        if self.description.trim().is_empty() {
            return Err("skill description cannot be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_matches_is_case_insensitive() {
        let skill = Skill::new("s1", "Guitar", "Acoustic and electric");
        assert!(skill.name_matches("guit"));
        assert!(skill.name_matches(""));
        assert!(!skill.name_matches("yoga"));
    }

    #[test]
    fn test_wanted_skill_level_alias() {
        let json = r#"{"id":"s2","name":"Yoga","description":"Hatha","levelNeeded":"beginner"}"#;
        let skill: Skill = serde_json::from_str(json).unwrap();
        assert_eq!(skill.level.as_deref(), Some("beginner"));
        assert_eq!(skill.category, None);
    }

    #[test]
    fn test_new_skill_validation() {
        assert!(NewSkill::new("Cooking", "Italian").validate().is_ok());
        assert!(NewSkill::new("   ", "blank").validate().is_err());
        assert!(NewSkill::new("x".repeat(101), "long").validate().is_err());
        assert!(NewSkill::new("Cooking", "  ").validate().is_err());
    }

    #[test]
    fn test_null_description_reads_as_empty() {
        let json = r#"{"id":"s1","name":"Guitar","description":null,"category":null,"level":null}"#;
        let skill: Skill = serde_json::from_str(json).unwrap();
        assert_eq!(skill.description, "");
        assert_eq!(skill.level, None);
    }
}
