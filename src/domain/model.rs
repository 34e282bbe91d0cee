use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// One job role's career-planning content.
///
/// Every field is optional in the source document and inner values are read
/// leniently: absent or `null` fields become empty, numbers and booleans
/// become text, and values of an unusable shape are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    pub role_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub technical_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub soft_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub projects: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub tools: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub internships: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub company_types: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub prerequisite_subjects: Vec<String>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub interview_preparation: Option<InterviewPreparation>,
    #[serde(default, deserialize_with = "lenient_entries")]
    pub courses: Vec<Course>,
    #[serde(default, deserialize_with = "lenient_entries")]
    pub certifications: Vec<Certification>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewPreparation {
    #[serde(default, deserialize_with = "lenient_list")]
    pub topics: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    #[serde(default, deserialize_with = "lenient_text")]
    pub course_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub platform: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certification {
    #[serde(default, deserialize_with = "lenient_text")]
    pub certification_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub platform: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub link: Option<String>,
}

impl RoleRecord {
    /// The name shown in the selection list; `None` when missing or empty.
    pub fn display_name(&self) -> Option<&str> {
        self.role_name.as_deref().filter(|name| !name.is_empty())
    }

    pub fn interview_topics(&self) -> &[String] {
        self.interview_preparation
            .as_ref()
            .map(|prep| prep.topics.as_slice())
            .unwrap_or(&[])
    }
}

/// The full, read-only sequence of role records loaded from one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    source: PathBuf,
    roles: Vec<RoleRecord>,
}

impl Catalog {
    pub fn new(source: impl Into<PathBuf>, roles: Vec<RoleRecord>) -> Self {
        Self {
            source: source.into(),
            roles,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn roles(&self) -> &[RoleRecord] {
        &self.roles
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

/// Text of a scalar; `None` for `null`, lists and objects.
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?))
}

/// A list of texts; a lone scalar counts as a one-item list.
fn lenient_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().filter_map(scalar_text).collect(),
        other => scalar_text(other).into_iter().collect(),
    })
}

/// A list of objects; items that are not objects are skipped.
fn lenient_entries<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_object<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        item @ Value::Object(_) => serde_json::from_value(item).ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_and_null_fields_default_to_empty() {
        let record: RoleRecord = serde_json::from_value(json!({
            "role_name": "Data Scientist",
            "technical_skills": ["Python", "SQL"],
            "soft_skills": null,
            "salary_range": "unknown fields are ignored"
        }))
        .unwrap();

        assert_eq!(record.display_name(), Some("Data Scientist"));
        assert_eq!(record.technical_skills, vec!["Python", "SQL"]);
        assert!(record.soft_skills.is_empty());
        assert!(record.courses.is_empty());
        assert!(record.interview_topics().is_empty());
    }

    #[test]
    fn test_interview_topics_are_nested() {
        let record: RoleRecord = serde_json::from_value(json!({
            "role_name": "SRE",
            "interview_preparation": { "topics": ["Linux", "Networking"], "rounds": 3 }
        }))
        .unwrap();

        assert_eq!(record.interview_topics(), ["Linux", "Networking"]);
    }

    #[test]
    fn test_empty_role_name_has_no_display_name() {
        let record: RoleRecord = serde_json::from_value(json!({ "role_name": "" })).unwrap();
        assert_eq!(record.display_name(), None);
        assert_eq!(RoleRecord::default().display_name(), None);
    }

    #[test]
    fn test_course_fields_are_optional() {
        let course: Course = serde_json::from_value(json!({ "course_name": "ML101" })).unwrap();
        assert_eq!(course.course_name.as_deref(), Some("ML101"));
        assert_eq!(course.platform, None);
        assert_eq!(course.link, None);
    }

    #[test]
    fn test_scalars_in_lists_become_text() {
        let record: RoleRecord = serde_json::from_value(json!({
            "role_name": "Embedded Engineer",
            "technical_skills": ["C", 8051, true, null, ["nested"], {"k": "v"}],
            "tools": "Oscilloscope"
        }))
        .unwrap();

        assert_eq!(record.technical_skills, vec!["C", "8051", "true"]);
        assert_eq!(record.tools, vec!["Oscilloscope"]);
    }

    #[test]
    fn test_unusable_shapes_are_dropped() {
        let record: RoleRecord = serde_json::from_value(json!({
            "role_name": 42,
            "soft_skills": {"not": "a list"},
            "interview_preparation": ["Linux"],
            "courses": ["ML101", {"course_name": "Rust 101", "platform": 7, "link": null}],
            "certifications": "CKA"
        }))
        .unwrap();

        assert_eq!(record.display_name(), Some("42"));
        assert!(record.soft_skills.is_empty());
        assert!(record.interview_topics().is_empty());
        assert_eq!(
            record.courses,
            vec![Course {
                course_name: Some("Rust 101".to_string()),
                platform: Some("7".to_string()),
                link: None,
            }]
        );
        assert!(record.certifications.is_empty());
    }
}
