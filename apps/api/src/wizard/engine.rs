//! Wizard engine: the only place prompts, generation and parsing meet.
//!
//! Flow for a reflection round: build prompt → generate → parse (degraded on
//! malformed output) → attach to the session. The final comment follows the
//! same path with the comment prompt and no parsing.
//!
//! Guards run before any network call, so a session that has not collected its
//! profile and post never reaches the text generator.

use tracing::info;

use crate::errors::AppError;
use crate::llm_client::TextGenerator;
use crate::wizard::models::ReflectionRound;
use crate::wizard::parser::parse_reflection_or_degraded;
use crate::wizard::prompts::{build_comment_prompt, build_reflection_prompt};
use crate::wizard::session::{Step, WizardSession};
use crate::wizard::tone::Tone;

/// Returns the round for the current reflection step, generating it on first request.
pub async fn ensure_round(
    session: &mut WizardSession,
    generator: &dyn TextGenerator,
) -> Result<ReflectionRound, AppError> {
    let index = session.current_round_index()?;

    if let Some(round) = session.round() {
        return Ok(round.clone());
    }

    let (Some(profile), Some(post)) = (session.profile(), session.post()) else {
        return Err(AppError::Internal(anyhow::anyhow!(
            "session {} reached step {} without profile and post",
            session.id(),
            session.step()
        )));
    };

    let prompt = build_reflection_prompt(post, session.responses(), profile);
    info!("Generating reflection round {} for session {}", index, session.id());

    let raw = generator
        .generate(&prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Reflection round {index} failed: {e}")))?;

    let round = ReflectionRound::new(index, parse_reflection_or_degraded(&raw));
    session.attach_round(round.clone())?;
    Ok(round)
}

/// Composes the final comment in `tone`, replacing any earlier comment.
/// A failed generation leaves the previous tone and comment in place.
pub async fn compose_comment(
    session: &mut WizardSession,
    tone: Tone,
    generator: &dyn TextGenerator,
) -> Result<String, AppError> {
    session.expect_step(Step::Review)?;

    let Some(post) = session.post() else {
        return Err(AppError::Internal(anyhow::anyhow!(
            "session {} reached review without a post",
            session.id()
        )));
    };

    let prompt = build_comment_prompt(tone, session.responses(), post);
    info!(
        "Composing {} comment for session {}",
        tone.adjective(),
        session.id()
    );

    let comment = generator
        .generate(&prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Comment generation failed: {e}")))?;

    session.select_tone(tone)?;
    session.record_comment(comment.clone())?;
    Ok(comment)
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::llm_client::{LlmError, TextGenerator};

    pub const WELL_FORMED_ROUND: &str = "QUESTION: What resonates with you?\n\n\
        EXAMPLES:\n1. The pace.\n2. The team.\n3. The users.\n\n\
        CONSIDER:\n- Be specific\n- Share a result\n- Ask a question";

    /// Replays canned replies in order and records every prompt it was given.
    #[derive(Default)]
    pub struct ScriptedGenerator {
        replies: Mutex<VecDeque<Result<String, LlmError>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedGenerator {
        pub fn new(replies: Vec<Result<String, LlmError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn replying(texts: &[&str]) -> Self {
            Self::new(texts.iter().map(|t| Ok(t.to_string())).collect())
        }

        pub fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(LlmError::EmptyContent))
        }
    }
}
