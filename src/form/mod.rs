// src/form/mod.rs
pub mod controller;
pub mod state;
pub mod validate;

pub use controller::{SubmissionController, SubmitOutcome};
pub use state::{FormState, Phase};
pub use validate::validate_repo_url;
