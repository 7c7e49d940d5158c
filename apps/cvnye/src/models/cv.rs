//! The structured CV record shared by extraction, analysis and rendering.
//!
//! Wire names are camelCase to match the declared response schema. Only
//! `fullName`, `email` and `summary` are mandatory; everything else defaults
//! so a sparse model reply still deserializes.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub description: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub graduation_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvRecord {
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub experiences: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub languages: Vec<String>,
}

impl CvRecord {
    /// Enforces the record invariants the model is not trusted to keep:
    /// ids are non-empty and unique within their sequence, blank optional
    /// links become `None`, and skills are deduplicated case-insensitively.
    pub fn normalize(&mut self) {
        unique_ids(self.experiences.iter_mut().map(|e| &mut e.id));
        unique_ids(self.education.iter_mut().map(|e| &mut e.id));
        unique_ids(self.projects.iter_mut().map(|p| &mut p.id));

        blank_to_none(&mut self.personal_info.linkedin);
        blank_to_none(&mut self.personal_info.website);
        for project in &mut self.projects {
            blank_to_none(&mut project.link);
        }

        let mut seen = HashSet::new();
        self.skills.retain(|skill| {
            let key = skill.trim().to_lowercase();
            !key.is_empty() && seen.insert(key)
        });
    }

    /// Consumes `self` and returns the normalized record.
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }
}

fn unique_ids<'a>(ids: impl Iterator<Item = &'a mut String>) {
    let mut seen = HashSet::new();
    for id in ids {
        if id.trim().is_empty() || !seen.insert(id.clone()) {
            *id = Uuid::new_v4().to_string();
            seen.insert(id.clone());
        }
    }
}

fn blank_to_none(value: &mut Option<String>) {
    if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
        *value = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_json() -> serde_json::Value {
        serde_json::json!({
            "personalInfo": {
                "fullName": "Ada Lovelace",
                "email": "ada@example.com",
                "summary": "Analytical engine programmer"
            }
        })
    }

    #[test]
    fn test_sparse_record_deserializes_with_defaults() {
        let record: CvRecord = serde_json::from_value(minimal_json()).unwrap();
        assert_eq!(record.personal_info.full_name, "Ada Lovelace");
        assert_eq!(record.personal_info.phone, "");
        assert!(record.personal_info.linkedin.is_none());
        assert!(record.experiences.is_empty());
        assert!(record.languages.is_empty());
    }

    #[test]
    fn test_record_without_summary_fails_deserialization() {
        let mut json = minimal_json();
        json["personalInfo"]
            .as_object_mut()
            .unwrap()
            .remove("summary");
        let result: Result<CvRecord, _> = serde_json::from_value(json);
        assert!(result.is_err(), "summary is a required field");
    }

    #[test]
    fn test_record_without_personal_info_fails_deserialization() {
        let json = serde_json::json!({ "skills": ["Rust"] });
        let result: Result<CvRecord, _> = serde_json::from_value(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_camel_case_fields_are_read() {
        let mut json = minimal_json();
        json["experiences"] = serde_json::json!([{
            "id": "exp-1",
            "company": "Acme",
            "position": "Backend Engineer",
            "startDate": "2019",
            "endDate": "2024",
            "description": ["Built payment APIs in Go"]
        }]);
        json["education"] = serde_json::json!([{ "school": "ETH", "graduationDate": "2018" }]);

        let record: CvRecord = serde_json::from_value(json).unwrap();
        assert_eq!(record.experiences[0].start_date, "2019");
        assert_eq!(record.experiences[0].description.len(), 1);
        assert_eq!(record.education[0].graduation_date, "2018");
    }

    #[test]
    fn test_normalize_replaces_missing_and_duplicate_ids() {
        let mut record: CvRecord = serde_json::from_value(minimal_json()).unwrap();
        record.experiences = vec![
            Experience { id: "a".into(), ..Default::default() },
            Experience { id: "a".into(), ..Default::default() },
            Experience { id: "".into(), ..Default::default() },
        ];
        record.normalize();

        let ids: HashSet<_> = record.experiences.iter().map(|e| e.id.clone()).collect();
        assert_eq!(ids.len(), 3);
        assert_eq!(record.experiences[0].id, "a", "first unique id is preserved");
        assert!(record.experiences.iter().all(|e| !e.id.is_empty()));
    }

    #[test]
    fn test_normalize_dedups_skills_keeping_order() {
        let mut record: CvRecord = serde_json::from_value(minimal_json()).unwrap();
        record.skills = vec!["Go".into(), "Python".into(), "go".into(), " ".into(), "Rust".into()];
        record.normalize();
        assert_eq!(record.skills, vec!["Go", "Python", "Rust"]);
    }

    #[test]
    fn test_normalize_drops_blank_links() {
        let mut record: CvRecord = serde_json::from_value(minimal_json()).unwrap();
        record.personal_info.website = Some("  ".into());
        record.projects = vec![Project {
            id: "p1".into(),
            name: "Ledger".into(),
            description: "Double-entry engine".into(),
            link: Some(String::new()),
        }];
        record.normalize();
        assert!(record.personal_info.website.is_none());
        assert!(record.projects[0].link.is_none());
    }

    #[test]
    fn test_optional_links_are_omitted_when_absent() {
        let record: CvRecord = serde_json::from_value(minimal_json()).unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert!(json["personalInfo"].get("linkedin").is_none());
    }
}
