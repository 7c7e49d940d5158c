use serde::{Deserialize, Serialize};

use crate::models::cv::CvRecord;

/// Market-trend notes from the search call. Consumed once by the analysis call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendSummary(String);

impl TrendSummary {
    /// Returns `None` for blank text; an empty summary is an upstream failure.
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            None
        } else {
            Some(Self(text))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Terminal artifact of one workflow run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvAnalysis {
    pub suggestions: Vec<String>,
    pub keywords: Vec<String>,
    #[serde(rename = "improvedCV")]
    pub improved_cv: CvRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_trend_summary_is_rejected() {
        assert!(TrendSummary::new(" \n ").is_none());
        assert_eq!(TrendSummary::new("Rust, Kafka").unwrap().as_str(), "Rust, Kafka");
    }

    #[test]
    fn test_analysis_reads_improved_cv_key() {
        let json = serde_json::json!({
            "suggestions": ["Quantify the Acme migration"],
            "keywords": ["Kubernetes"],
            "improvedCV": {
                "personalInfo": {
                    "fullName": "Sam Doe",
                    "email": "sam@example.com",
                    "summary": "Backend engineer"
                },
                "experiences": [],
                "education": [],
                "skills": []
            }
        });
        let analysis: CvAnalysis = serde_json::from_value(json).unwrap();
        assert_eq!(analysis.improved_cv.personal_info.full_name, "Sam Doe");
        assert_eq!(analysis.keywords, vec!["Kubernetes"]);
    }

    #[test]
    fn test_analysis_without_improved_cv_is_rejected() {
        let json = serde_json::json!({ "suggestions": [], "keywords": [] });
        let result: Result<CvAnalysis, _> = serde_json::from_value(json);
        assert!(result.is_err());
    }
}
