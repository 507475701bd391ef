//! What a front end needs to render the current screen.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::wizard::models::{Profile, ReflectionRound, SourcePost};
use crate::wizard::session::{Step, WizardSession};
use crate::wizard::tone::{Tone, ToneOption};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    Completed,
    Current,
    Pending,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgressEntry {
    pub label: &'static str,
    pub status: ProgressStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub step: u8,
    pub step_name: Step,
    pub header: &'static str,
    /// Empty on the first screen, which has no progress bar.
    pub progress: Vec<ProgressEntry>,
    pub continue_label: Option<&'static str>,
    pub profile: Option<Profile>,
    pub post: Option<SourcePost>,
    pub responses: Vec<String>,
    pub round: Option<ReflectionRound>,
    pub selected_tone: Option<ToneOption>,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SessionView {
    pub fn of(session: &WizardSession) -> Self {
        let step = session.step();
        Self {
            id: session.id(),
            step: step.number(),
            step_name: step,
            header: header(step),
            progress: progress(step),
            continue_label: continue_label(step),
            profile: session.profile().cloned(),
            post: session.post().cloned(),
            responses: session.responses().to_vec(),
            round: session.round().cloned(),
            selected_tone: session.selected_tone().map(Tone::option),
            comment: session.comment().map(str::to_string),
            created_at: session.created_at(),
        }
    }
}

pub fn header(step: Step) -> &'static str {
    match step {
        Step::ProfileEntry => "Your Professional Profile",
        Step::PostEntry => "What post would you like to comment on?",
        Step::Reflect0 => "What resonates with you?",
        Step::Reflect1 => "Connect to your experience",
        Step::Reflect2 => "Add unique value",
        Step::Review => "Review and Finalize",
    }
}

fn progress_label(step: Step) -> &'static str {
    match step {
        Step::ProfileEntry => "Profile",
        Step::PostEntry => "Post",
        Step::Reflect0 => "Reflection",
        Step::Reflect1 => "Experience",
        Step::Reflect2 => "Value",
        Step::Review => "Review",
    }
}

/// Progress bar entries, shown from step 2 on.
pub fn progress(current: Step) -> Vec<ProgressEntry> {
    if current == Step::ProfileEntry {
        return Vec::new();
    }
    Step::ALL
        .into_iter()
        .map(|step| ProgressEntry {
            label: progress_label(step),
            status: match step.cmp(&current) {
                std::cmp::Ordering::Less => ProgressStatus::Completed,
                std::cmp::Ordering::Equal => ProgressStatus::Current,
                std::cmp::Ordering::Greater => ProgressStatus::Pending,
            },
        })
        .collect()
}

/// The forward button's label. Review has no forward button.
pub fn continue_label(step: Step) -> Option<&'static str> {
    match step {
        Step::Reflect2 => Some("Create Draft"),
        Step::Review => None,
        _ => Some("Continue"),
    }
}
