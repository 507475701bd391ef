//! Comment tones offered at the review step.
//!
//! Each tone has a decorated label (what the picker shows), a bare name, and a
//! one-line description used as help text. Prompts use the lowercase name.

use serde::{Deserialize, Serialize};

use crate::wizard::parser::parse_tone;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    #[default]
    Professional,
    Collaborative,
    Expert,
    Supportive,
}

/// Picker entry exposed through the options endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ToneOption {
    pub label: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

impl Tone {
    pub const ALL: [Tone; 4] = [
        Tone::Professional,
        Tone::Collaborative,
        Tone::Expert,
        Tone::Supportive,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tone::Professional => "Professional",
            Tone::Collaborative => "Collaborative",
            Tone::Expert => "Expert",
            Tone::Supportive => "Supportive",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tone::Professional => "💼 Professional",
            Tone::Collaborative => "🤝 Collaborative",
            Tone::Expert => "🎓 Expert",
            Tone::Supportive => "💪 Supportive",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Tone::Professional => "Formal and business-focused",
            Tone::Collaborative => "Engaging and solution-oriented",
            Tone::Expert => "Authoritative and analytical",
            Tone::Supportive => "Encouraging and constructive",
        }
    }

    /// The adjective interpolated into the comment prompt.
    pub fn adjective(self) -> String {
        self.name().to_lowercase()
    }

    /// Resolves a picker selection, decorated ("🎓 Expert") or bare ("expert").
    pub fn from_selection(selection: &str) -> Option<Tone> {
        let name = parse_tone(selection);
        Tone::ALL
            .into_iter()
            .find(|tone| tone.name().eq_ignore_ascii_case(name))
    }

    pub fn option(self) -> ToneOption {
        ToneOption {
            label: self.label(),
            name: self.name(),
            description: self.description(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_label_resolves_to_its_tone() {
        for tone in Tone::ALL {
            assert_eq!(Tone::from_selection(tone.label()), Some(tone));
        }
    }

    #[test]
    fn test_bare_names_resolve_case_insensitively() {
        assert_eq!(Tone::from_selection("expert"), Some(Tone::Expert));
        assert_eq!(Tone::from_selection("SUPPORTIVE"), Some(Tone::Supportive));
    }

    #[test]
    fn test_unknown_selection_is_none() {
        assert_eq!(Tone::from_selection("🔥 Spicy"), None);
        assert_eq!(Tone::from_selection(""), None);
    }

    #[test]
    fn test_adjective_is_lowercase() {
        assert_eq!(Tone::Collaborative.adjective(), "collaborative");
    }

    #[test]
    fn test_default_is_first_picker_entry() {
        assert_eq!(Tone::default(), Tone::ALL[0]);
    }
}
