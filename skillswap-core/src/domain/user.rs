//! User domain model

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::availability::Availability;
use super::skill::{Skill, SkillKind};

fn default_public() -> bool {
    true
}

/// Accept RFC 3339 timestamps as well as naive ISO timestamps (read as UTC).
/// Anything unparseable becomes `None` rather than rejecting the whole user.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|naive| naive.and_utc())
            })
    }))
}

/// A member profile as known to this client
///
/// Skills and availability are embedded, not referenced. The password is
/// never part of the record; it only travels inside auth requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub profile_photo: Option<String>,
    #[serde(default)]
    pub skills_offered: Vec<Skill>,
    #[serde(default)]
    pub skills_wanted: Vec<Skill>,
    #[serde(default)]
    pub availability: Vec<Availability>,
    #[serde(default = "default_public")]
    pub is_public: bool,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(id: impl Into<String>, email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            name: name.into(),
            location: None,
            profile_photo: None,
            skills_offered: Vec::new(),
            skills_wanted: Vec::new(),
            availability: Vec::new(),
            is_public: true,
            created_at: None,
        }
    }

    pub fn skills(&self, kind: SkillKind) -> &[Skill] {
        match kind {
            SkillKind::Offered => &self.skills_offered,
            SkillKind::Wanted => &self.skills_wanted,
        }
    }

    /// Find a skill by id in either list
    pub fn find_skill(&self, skill_id: &str) -> Option<&Skill> {
        self.skills_offered
            .iter()
            .chain(self.skills_wanted.iter())
            .find(|s| s.id == skill_id)
    }

    /// True if any offered or wanted skill name contains the (lowercased) query
    pub fn has_skill_matching(&self, normalized_query: &str) -> bool {
        self.skills_offered.iter().any(|s| s.name_matches(normalized_query))
            || self.skills_wanted.iter().any(|s| s.name_matches(normalized_query))
    }

    /// Copy of this user with a skill appended to one list
    pub fn with_skill(&self, kind: SkillKind, skill: Skill) -> Self {
        let mut next = self.clone();
        match kind {
            SkillKind::Offered => next.skills_offered.push(skill),
            SkillKind::Wanted => next.skills_wanted.push(skill),
        }
        next
    }

    /// Copy of this user with a skill removed from one list
    pub fn without_skill(&self, kind: SkillKind, skill_id: &str) -> Self {
        let mut next = self.clone();
        match kind {
            SkillKind::Offered => next.skills_offered.retain(|s| s.id != skill_id),
            SkillKind::Wanted => next.skills_wanted.retain(|s| s.id != skill_id),
        }
        next
    }
}
