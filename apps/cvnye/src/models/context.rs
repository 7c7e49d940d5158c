use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// The kind of position the user is aiming for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    #[default]
    Job,
    Internship,
    Contract,
    Remote,
}

impl TargetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetKind::Job => "job",
            TargetKind::Internship => "internship",
            TargetKind::Contract => "contract",
            TargetKind::Remote => "remote",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How long the user wants the engagement to last.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Engagement {
    ShortTerm,
    #[default]
    LongTerm,
}

impl Engagement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Engagement::ShortTerm => "short-term",
            Engagement::LongTerm => "long-term",
        }
    }
}

impl fmt::Display for Engagement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Career context collected before the raw CV text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContext {
    pub domain: String,
    pub target: TargetKind,
    pub duration: Engagement,
    #[serde(default)]
    pub additional_info: String,
}

impl UserContext {
    pub fn new(domain: impl Into<String>, target: TargetKind, duration: Engagement) -> Self {
        Self {
            domain: domain.into(),
            target,
            duration,
            additional_info: String::new(),
        }
    }

    pub fn with_additional_info(mut self, info: impl Into<String>) -> Self {
        self.additional_info = info.into();
        self
    }

    /// Target and duration are closed enums, so only the domain can be invalid.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.domain.trim().is_empty() {
            return Err(AppError::Validation("domain cannot be empty".to_string()));
        }
        Ok(())
    }
}
