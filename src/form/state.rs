// src/form/state.rs
use crate::models::GenerationResult;

/// Everything the documentation form holds. Starts empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    /// Text of the repository URL input, as entered.
    pub url: String,
    pub result: Option<GenerationResult>,
    pub error: Option<String>,
    /// True while a generation request is in flight.
    pub loading: bool,
}

/// Where the form is in `Idle -> Submitting -> (Succeeded | Failed) -> Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Idle => write!(f, "Idle"),
            Phase::Submitting => write!(f, "Submitting"),
            Phase::Succeeded => write!(f, "Succeeded"),
            Phase::Failed => write!(f, "Failed"),
        }
    }
}

impl FormState {
    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Submitting
        } else if self.result.is_some() {
            Phase::Succeeded
        } else if self.error.is_some() {
            Phase::Failed
        } else {
            Phase::Idle
        }
    }
}
