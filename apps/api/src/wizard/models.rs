//! Wizard data model: what the user enters and what each reflection round produces.

use serde::{Deserialize, Serialize};

/// Industry options offered on the profile form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Industry {
    #[default]
    Technology,
    Healthcare,
    Finance,
    Education,
    Marketing,
    Consulting,
    Other,
}

impl Industry {
    pub const ALL: [Industry; 7] = [
        Industry::Technology,
        Industry::Healthcare,
        Industry::Finance,
        Industry::Education,
        Industry::Marketing,
        Industry::Consulting,
        Industry::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Industry::Technology => "Technology",
            Industry::Healthcare => "Healthcare",
            Industry::Finance => "Finance",
            Industry::Education => "Education",
            Industry::Marketing => "Marketing",
            Industry::Consulting => "Consulting",
            Industry::Other => "Other",
        }
    }
}

/// Raw profile form input. Becomes a `Profile` once the presence checks pass.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub industry: Industry,
    #[serde(default)]
    pub expertise: String,
}

/// The user's professional profile, captured once in step 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub name: String,
    pub title: String,
    pub industry: Industry,
    pub expertise: String,
}

/// The post the user wants to comment on, captured once in step 2.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourcePost {
    pub content: String,
}

/// Structured result of parsing one reflection reply from the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedReflection {
    pub question: String,
    /// Kept verbatim, numbering included ("1. ...").
    pub examples: Vec<String>,
    /// Kept verbatim, bullets included ("- ...").
    pub tips: Vec<String>,
    /// True when the reply did not follow the QUESTION / EXAMPLES / CONSIDER layout.
    pub degraded: bool,
}

impl ParsedReflection {
    /// Fallback for unparseable replies: the raw text becomes the question.
    pub fn degraded(raw: &str) -> Self {
        Self {
            question: raw.trim().to_string(),
            examples: Vec::new(),
            tips: Vec::new(),
            degraded: true,
        }
    }
}

/// One generated reflection round (steps 3–5) plus the user's in-progress answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReflectionRound {
    pub index: usize,
    pub question: String,
    pub examples: Vec<String>,
    pub tips: Vec<String>,
    pub degraded: bool,
    /// Temporary editable response field. Discarded unless submitted.
    pub draft: String,
}

impl ReflectionRound {
    pub fn new(index: usize, parsed: ParsedReflection) -> Self {
        Self {
            index,
            question: parsed.question,
            examples: parsed.examples,
            tips: parsed.tips,
            degraded: parsed.degraded,
            draft: String::new(),
        }
    }
}
