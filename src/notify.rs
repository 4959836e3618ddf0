//! User-facing success and failure notices
//!
//! Every mutating command ends in exactly one notice. Backend `detail`
//! strings are shown verbatim; rejections without one fall back to a
//! generic message.

use std::fmt;

use colored::Colorize;

use crate::client::models::Ack;
use crate::error::{ApiError, Error};

/// Shown when the backend refuses a request without explaining why
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    /// Notice for a backend acknowledgement, using `fallback` when the
    /// backend sent no detail
    pub fn from_ack(ack: &Ack, fallback: &str) -> Self {
        let message = ack
            .detail
            .clone()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string());

        if ack.success {
            Notice::Success(message)
        } else {
            Notice::Error(message)
        }
    }

    pub fn from_error(err: &Error) -> Self {
        match err {
            Error::Api(ApiError::Rejected(detail)) if detail.trim().is_empty() => {
                Notice::Error(GENERIC_FAILURE.to_string())
            }
            other => Notice::Error(other.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Notice::Success(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Notice::Success(m) | Notice::Error(m) => m,
        }
    }

    /// Print on stderr so stdout stays clean for `--format json`
    pub fn print(&self) {
        eprintln!("{}", self);
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Success(m) => write!(f, "{} {}", "✓".green(), m),
            Notice::Error(m) => write!(f, "{} {}", "✗".red(), m),
        }
    }
}
