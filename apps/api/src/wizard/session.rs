//! Wizard State Machine.
//!
//! `ProfileEntry(1) → PostEntry(2) → Reflect0(3) → Reflect1(4) → Reflect2(5) → Review(6)`.
//!
//! Every transition is guarded. A failed guard returns a `GuardError` and leaves
//! the session exactly as it was. The only way back is `start_over`, which clears
//! everything and returns to `ProfileEntry`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::wizard::models::{Profile, ProfileForm, ReflectionRound, SourcePost};
use crate::wizard::tone::Tone;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Step {
    ProfileEntry,
    PostEntry,
    Reflect0,
    Reflect1,
    Reflect2,
    Review,
}

impl Step {
    pub const ALL: [Step; 6] = [
        Step::ProfileEntry,
        Step::PostEntry,
        Step::Reflect0,
        Step::Reflect1,
        Step::Reflect2,
        Step::Review,
    ];

    /// 1-based step number.
    pub fn number(self) -> u8 {
        match self {
            Step::ProfileEntry => 1,
            Step::PostEntry => 2,
            Step::Reflect0 => 3,
            Step::Reflect1 => 4,
            Step::Reflect2 => 5,
            Step::Review => 6,
        }
    }

    pub fn next(self) -> Option<Step> {
        match self {
            Step::ProfileEntry => Some(Step::PostEntry),
            Step::PostEntry => Some(Step::Reflect0),
            Step::Reflect0 => Some(Step::Reflect1),
            Step::Reflect1 => Some(Step::Reflect2),
            Step::Reflect2 => Some(Step::Review),
            Step::Review => None,
        }
    }

    /// Index of the reflection round this step collects, if any.
    pub fn round_index(self) -> Option<usize> {
        match self {
            Step::Reflect0 => Some(0),
            Step::Reflect1 => Some(1),
            Step::Reflect2 => Some(2),
            _ => None,
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}({})", self, self.number())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GuardError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("this action belongs to step {expected}, but the session is at step {actual}")]
    WrongStep { expected: Step, actual: Step },

    #[error("this action is only available during a reflection round (session is at step {0})")]
    NotReflecting(Step),

    #[error("the question for this round has not been generated yet")]
    RoundNotReady,

    #[error("round {round} does not belong to step {step}")]
    RoundMismatch { round: usize, step: Step },

    #[error("a round has already been generated for step {0}")]
    RoundAlreadyAttached(Step),

    #[error("example {index} does not exist (this round has {available})")]
    ExampleOutOfRange { index: usize, available: usize },
}

impl GuardError {
    /// True when the user can fix this by changing their input, as opposed to
    /// calling an action that does not fit the current step.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            GuardError::MissingField(_) | GuardError::ExampleOutOfRange { .. }
        )
    }
}

/// One user's pass through the wizard.
#[derive(Debug, Clone)]
pub struct WizardSession {
    id: Uuid,
    created_at: DateTime<Utc>,
    step: Step,
    profile: Option<Profile>,
    post: Option<SourcePost>,
    responses: Vec<String>,
    round: Option<ReflectionRound>,
    selected_tone: Option<Tone>,
    comment: Option<String>,
}

impl WizardSession {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            created_at: Utc::now(),
            step: Step::ProfileEntry,
            profile: None,
            post: None,
            responses: Vec::new(),
            round: None,
            selected_tone: None,
            comment: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn post(&self) -> Option<&SourcePost> {
        self.post.as_ref()
    }

    pub fn responses(&self) -> &[String] {
        &self.responses
    }

    pub fn round(&self) -> Option<&ReflectionRound> {
        self.round.as_ref()
    }

    pub fn selected_tone(&self) -> Option<Tone> {
        self.selected_tone
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Step 1 → 2. Name, title and expertise must be non-blank.
    pub fn submit_profile(&mut self, form: ProfileForm) -> Result<Step, GuardError> {
        self.expect_step(Step::ProfileEntry)?;
        require("name", &form.name)?;
        require("title", &form.title)?;
        require("expertise", &form.expertise)?;

        self.profile = Some(Profile {
            name: form.name.trim().to_string(),
            title: form.title.trim().to_string(),
            industry: form.industry,
            expertise: form.expertise.trim().to_string(),
        });
        Ok(self.advance())
    }

    /// Step 2 → 3. The post must be non-blank.
    pub fn submit_post(&mut self, content: &str) -> Result<Step, GuardError> {
        self.expect_step(Step::PostEntry)?;
        require("post content", content)?;

        self.post = Some(SourcePost {
            content: content.trim().to_string(),
        });
        Ok(self.advance())
    }

    /// Stores the generated round for the current reflection step.
    pub fn attach_round(&mut self, round: ReflectionRound) -> Result<(), GuardError> {
        let index = self.current_round_index()?;
        if round.index != index {
            return Err(GuardError::RoundMismatch {
                round: round.index,
                step: self.step,
            });
        }
        if self.round.is_some() {
            return Err(GuardError::RoundAlreadyAttached(self.step));
        }
        self.round = Some(round);
        Ok(())
    }

    /// Replaces the round's temporary response text.
    pub fn update_draft(&mut self, text: &str) -> Result<&ReflectionRound, GuardError> {
        let round = self.current_round_mut()?;
        round.draft = text.to_string();
        Ok(&*round)
    }

    /// Copies example `index` (0-based) into the round's response text.
    pub fn use_example(&mut self, index: usize) -> Result<&ReflectionRound, GuardError> {
        let round = self.current_round_mut()?;
        let example = round
            .examples
            .get(index)
            .cloned()
            .ok_or(GuardError::ExampleOutOfRange {
                index,
                available: round.examples.len(),
            })?;
        round.draft = example;
        Ok(&*round)
    }

    /// Steps 3–5 → next. Commits `text`, or the draft when `text` is absent.
    pub fn submit_response(&mut self, text: Option<&str>) -> Result<Step, GuardError> {
        self.current_round_index()?;
        let round = self.round.as_ref().ok_or(GuardError::RoundNotReady)?;
        let response = text.unwrap_or(round.draft.as_str());
        require("response", response)?;

        self.responses.push(response.trim().to_string());
        self.round = None;
        Ok(self.advance())
    }

    /// Review only. Changing tone invalidates any previously composed comment.
    pub fn select_tone(&mut self, tone: Tone) -> Result<(), GuardError> {
        self.expect_step(Step::Review)?;
        if self.selected_tone != Some(tone) {
            self.comment = None;
        }
        self.selected_tone = Some(tone);
        Ok(())
    }

    /// Review only. Stores the comment composed in the selected tone.
    pub fn record_comment(&mut self, comment: String) -> Result<(), GuardError> {
        self.expect_step(Step::Review)?;
        self.comment = Some(comment);
        Ok(())
    }

    /// Unconditional reset to `ProfileEntry`. The session id is kept.
    pub fn start_over(&mut self) {
        *self = WizardSession::new(self.id);
    }

    pub fn current_round_index(&self) -> Result<usize, GuardError> {
        self.step
            .round_index()
            .ok_or(GuardError::NotReflecting(self.step))
    }

    fn current_round_mut(&mut self) -> Result<&mut ReflectionRound, GuardError> {
        self.current_round_index()?;
        self.round.as_mut().ok_or(GuardError::RoundNotReady)
    }

    /// Read-only guard: fails unless the session is at `expected`.
    pub fn expect_step(&self, expected: Step) -> Result<(), GuardError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(GuardError::WrongStep {
                expected,
                actual: self.step,
            })
        }
    }

    // Callers check their guards first; Review has no forward transition.
    fn advance(&mut self) -> Step {
        if let Some(next) = self.step.next() {
            self.step = next;
        }
        self.step
    }
}

fn require(field: &'static str, value: &str) -> Result<(), GuardError> {
    if value.trim().is_empty() {
        Err(GuardError::MissingField(field))
    } else {
        Ok(())
    }
}
