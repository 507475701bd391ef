//! Response Parser: turns the model's free-text reflection reply into a question,
//! three example answers and a list of tips.
//!
//! The reply is expected to be three blank-line-separated blocks labelled
//! `QUESTION:`, `EXAMPLES:` and `CONSIDER:`. Labels and block count are checked
//! before anything is extracted; callers fall back to `ParsedReflection::degraded`
//! when the layout is off.

use thiserror::Error;
use tracing::warn;

use crate::wizard::models::ParsedReflection;

pub const QUESTION_LABEL: &str = "QUESTION:";
pub const EXAMPLES_LABEL: &str = "EXAMPLES:";
pub const CONSIDER_LABEL: &str = "CONSIDER:";
pub const EXAMPLE_COUNT: usize = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected at least 3 blocks, found {0}")]
    BlockCount(usize),

    #[error("block {block} does not start with {label}")]
    MissingLabel { block: usize, label: &'static str },

    #[error("question block is empty")]
    EmptyQuestion,

    #[error("expected 3 examples, found {0}")]
    ExampleCount(usize),
}

/// Parses a well-formed reflection reply. Examples and tips keep their numbering.
pub fn parse_reflection(text: &str) -> Result<ParsedReflection, ParseError> {
    let normalized = text.replace("\r\n", "\n");
    let blocks: Vec<&str> = normalized
        .split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect();

    if blocks.len() < 3 {
        return Err(ParseError::BlockCount(blocks.len()));
    }

    let question = strip_label(blocks[0], 0, QUESTION_LABEL)?.trim().to_string();
    if question.is_empty() {
        return Err(ParseError::EmptyQuestion);
    }

    let examples = lines(strip_label(blocks[1], 1, EXAMPLES_LABEL)?);
    if examples.len() != EXAMPLE_COUNT {
        return Err(ParseError::ExampleCount(examples.len()));
    }

    let tips = lines(strip_label(blocks[2], 2, CONSIDER_LABEL)?);

    Ok(ParsedReflection {
        question,
        examples,
        tips,
        degraded: false,
    })
}

/// Like `parse_reflection`, but never fails: malformed replies become a degraded
/// result with the raw text as the question.
pub fn parse_reflection_or_degraded(text: &str) -> ParsedReflection {
    match parse_reflection(text) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("Reflection reply did not match the expected layout ({e}); using raw text");
            ParsedReflection::degraded(text)
        }
    }
}

/// Strips a leading decorative token from a tone selection.
/// `"💼 Professional"` → `"Professional"`; `"Expert"` is returned as is.
pub fn parse_tone(selection: &str) -> &str {
    let trimmed = selection.trim();
    let Some((first, rest)) = trimmed.split_once(char::is_whitespace) else {
        return if starts_alphanumeric(trimmed) { trimmed } else { "" };
    };
    if starts_alphanumeric(first) {
        trimmed
    } else {
        rest.trim()
    }
}

fn starts_alphanumeric(token: &str) -> bool {
    token.chars().next().is_some_and(char::is_alphanumeric)
}

fn strip_label<'a>(
    block: &'a str,
    index: usize,
    label: &'static str,
) -> Result<&'a str, ParseError> {
    block
        .strip_prefix(label)
        .ok_or(ParseError::MissingLabel {
            block: index,
            label,
        })
}

fn lines(block: &str) -> Vec<String> {
    block
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = "QUESTION: What part of this launch mirrors your own work?\n\n\
        EXAMPLES:\n1. a\n2. b\n3. c\n\n\
        CONSIDER:\n- x\n- y\n- z";

    #[test]
    fn test_well_formed_reply() {
        let parsed = parse_reflection(WELL_FORMED).unwrap();
        assert_eq!(
            parsed.question,
            "What part of this launch mirrors your own work?"
        );
        assert_eq!(parsed.examples, vec!["1. a", "2. b", "3. c"]);
        assert_eq!(parsed.tips, vec!["- x", "- y", "- z"]);
        assert!(!parsed.degraded);
    }

    #[test]
    fn test_crlf_and_extra_blank_lines_are_tolerated() {
        let text = "QUESTION: Why?\r\n\r\n\r\nEXAMPLES:\r\n1. a\r\n2. b\r\n3. c\r\n\r\nCONSIDER:\r\n- x\r\n";
        let parsed = parse_reflection(text).unwrap();
        assert_eq!(parsed.question, "Why?");
        assert_eq!(parsed.examples, vec!["1. a", "2. b", "3. c"]);
        assert_eq!(parsed.tips, vec!["- x"]);
    }

    #[test]
    fn test_question_on_its_own_line() {
        let text = "QUESTION:\nWhat stood out?\n\nEXAMPLES:\n1. a\n2. b\n3. c\n\nCONSIDER:\n- x";
        assert_eq!(parse_reflection(text).unwrap().question, "What stood out?");
    }

    #[test]
    fn test_trailing_blocks_are_ignored() {
        let text = format!("{WELL_FORMED}\n\nHope this helps!");
        let parsed = parse_reflection(&text).unwrap();
        assert_eq!(parsed.tips, vec!["- x", "- y", "- z"]);
    }

    #[test]
    fn test_too_few_blocks() {
        let text = "QUESTION: Why?\nEXAMPLES:\n1. a\n2. b\n3. c\nCONSIDER:\n- x";
        assert_eq!(parse_reflection(text), Err(ParseError::BlockCount(1)));
    }

    #[test]
    fn test_missing_label() {
        let text = "Here is my question: Why?\n\nEXAMPLES:\n1. a\n2. b\n3. c\n\nCONSIDER:\n- x";
        assert_eq!(
            parse_reflection(text),
            Err(ParseError::MissingLabel {
                block: 0,
                label: QUESTION_LABEL
            })
        );
    }

    #[test]
    fn test_wrong_example_count() {
        let text = "QUESTION: Why?\n\nEXAMPLES:\n1. a\n2. b\n\nCONSIDER:\n- x";
        assert_eq!(parse_reflection(text), Err(ParseError::ExampleCount(2)));
    }

    #[test]
    fn test_empty_question() {
        let text = "QUESTION:\n\nEXAMPLES:\n1. a\n2. b\n3. c\n\nCONSIDER:\n- x";
        assert_eq!(parse_reflection(text), Err(ParseError::EmptyQuestion));
    }

    #[test]
    fn test_malformed_reply_degrades_to_raw_text() {
        let parsed = parse_reflection_or_degraded("I'd rather just chat about this post.");
        assert!(parsed.degraded);
        assert_eq!(parsed.question, "I'd rather just chat about this post.");
        assert!(parsed.examples.is_empty());
        assert!(parsed.tips.is_empty());
    }

    #[test]
    fn test_well_formed_reply_is_not_degraded() {
        assert!(!parse_reflection_or_degraded(WELL_FORMED).degraded);
    }

    #[test]
    fn test_parse_tone_strips_emoji() {
        assert_eq!(parse_tone("💼 Professional"), "Professional");
        assert_eq!(parse_tone("🤝 Collaborative"), "Collaborative");
        assert_eq!(parse_tone("  🎓   Expert "), "Expert");
    }

    #[test]
    fn test_parse_tone_keeps_bare_names() {
        assert_eq!(parse_tone("Supportive"), "Supportive");
        assert_eq!(parse_tone("Very Supportive"), "Very Supportive");
    }

    #[test]
    fn test_parse_tone_lone_symbol_is_empty() {
        assert_eq!(parse_tone("💪"), "");
        assert_eq!(parse_tone("   "), "");
    }
}
