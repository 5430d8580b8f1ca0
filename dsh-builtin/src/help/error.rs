use crate::i18n::{gettext, substitute};
use dsh_types::ExitStatus;
use thiserror::Error;

/// Error types for the help command
#[derive(Debug, Error)]
pub enum HelpError {
    #[error("{0}")]
    Usage(String),

    #[error(
        "no help topics match `{pattern}'.  Try `help help' or `man -k {pattern}' or `info {pattern}'."
    )]
    NoMatch { pattern: String },

    #[error("{path}: cannot open: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: cannot read: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("write error: {0}")]
    Io(#[from] std::io::Error),
}

impl HelpError {
    /// Errors that only cost the help text of a single entry.
    pub fn is_entry_local(&self) -> bool {
        matches!(self, HelpError::Open { .. } | HelpError::Read { .. })
    }

    pub fn exit_status(&self) -> ExitStatus {
        match self {
            HelpError::Usage(_) => ExitStatus::USAGE,
            _ => ExitStatus::FAILURE,
        }
    }

    /// Untranslated message id, with `%s` where the details go.
    fn template(&self) -> &'static str {
        match self {
            HelpError::Usage(_) => "%s",
            HelpError::NoMatch { .. } => {
                "no help topics match `%s'.  Try `help help' or `man -k %s' or `info %s'."
            }
            HelpError::Open { .. } => "%s: cannot open: %s",
            HelpError::Read { .. } => "%s: cannot read: %s",
            HelpError::Io(_) => "write error: %s",
        }
    }

    /// Translated diagnostic text
    pub fn user_message(&self) -> String {
        let template = gettext(self.template());
        match self {
            HelpError::Usage(msg) => substitute(&template, &[msg.as_str()]),
            HelpError::NoMatch { pattern } => {
                let pattern = pattern.as_str();
                substitute(&template, &[pattern, pattern, pattern])
            }
            HelpError::Open { path, source } | HelpError::Read { path, source } => {
                let detail = source.to_string();
                substitute(&template, &[path.as_str(), detail.as_str()])
            }
            HelpError::Io(source) => {
                let detail = source.to_string();
                substitute(&template, &[detail.as_str()])
            }
        }
    }
}
