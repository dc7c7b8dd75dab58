// src/view.rs
use std::fmt;

use crate::form::{FormState, Phase};

pub const SUBMIT_LABEL: &str = "Generate Documentation";
pub const SUBMITTING_LABEL: &str = "Generating...";

/// Resolves a generated `doc_url` against the origin serving the docs.
///
/// `doc_url` is normally a path such as `/docs/<id>/index.html`; an absolute
/// `http(s)://` URL is passed through untouched.
pub fn doc_link(origin: &str, doc_url: &str) -> String {
    if doc_url.starts_with("http://") || doc_url.starts_with("https://") {
        return doc_url.to_string();
    }
    let origin = origin.trim_end_matches('/');
    if doc_url.starts_with('/') {
        format!("{}{}", origin, doc_url)
    } else {
        format!("{}/{}", origin, doc_url)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    Error(String),
    Success(String),
}

/// What the form shows for a given state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub phase: Phase,
    pub url: String,
    pub submit_label: &'static str,
    pub submit_enabled: bool,
    pub input_enabled: bool,
    pub show_reset: bool,
    pub alert: Option<Alert>,
    /// Link to the generated documentation, present with a result.
    pub doc_link: Option<String>,
}

impl FormView {
    pub fn from_state(state: &FormState, doc_origin: &str) -> Self {
        // An error and a result never coexist after a request, but a failed
        // validation leaves the previous result on screen alongside its message.
        let alert = match (&state.error, &state.result) {
            (Some(error), _) => Some(Alert::Error(error.clone())),
            (None, Some(result)) => Some(Alert::Success(result.message.clone())),
            (None, None) => None,
        };

        FormView {
            phase: state.phase(),
            url: state.url.clone(),
            submit_label: if state.loading {
                SUBMITTING_LABEL
            } else {
                SUBMIT_LABEL
            },
            submit_enabled: !state.loading,
            input_enabled: !state.loading,
            show_reset: state.result.is_some() || state.error.is_some(),
            alert,
            doc_link: state
                .result
                .as_ref()
                .map(|result| doc_link(doc_origin, &result.doc_url)),
        }
    }
}

impl fmt::Display for FormView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.submit_enabled {
            writeln!(f, "⏳ {}", self.submit_label)?;
        }
        match &self.alert {
            Some(Alert::Error(message)) => writeln!(f, "⚠️  {}", message)?,
            Some(Alert::Success(message)) => writeln!(f, "✅ {}", message)?,
            None => {}
        }
        if let Some(link) = &self.doc_link {
            writeln!(f, "📚 Documentation Generated Successfully!")?;
            writeln!(f, "   View Documentation: {}", link)?;
        }
        if self.alert.is_none() && self.submit_enabled {
            writeln!(f, "ℹ️  Enter a GitHub repository URL to generate documentation")?;
        }
        Ok(())
    }
}
