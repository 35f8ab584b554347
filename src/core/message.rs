//! Value types passed into and out of the queue store.

use std::time::Duration;

use crate::error::{Error, Result};

/// An opaque, non-empty message payload.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Message(String);

impl Message {
    /// Create a message, rejecting empty content.
    pub fn new(content: impl Into<String>) -> Result<Self> {
        let content = content.into();
        if content.is_empty() {
            return Err(Error::Validation("message must not be empty".to_string()));
        }
        Ok(Self(content))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// How long a retrieve is willing to suspend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaitBudget {
    /// One non-blocking attempt.
    Immediate,
    /// Wait up to the given duration.
    Bounded(Duration),
}

impl WaitBudget {
    /// Budget from a whole number of seconds; zero means immediate.
    pub fn from_secs(secs: u64) -> Self {
        if secs == 0 {
            Self::Immediate
        } else {
            Self::Bounded(Duration::from_secs(secs))
        }
    }

    /// Parse the `timeout` request parameter.
    ///
    /// Absent or empty means immediate. Otherwise the value must be a
    /// non-negative decimal integer count of seconds.
    pub fn parse_param(raw: Option<&str>) -> Result<Self> {
        match raw {
            None | Some("") => Ok(Self::Immediate),
            Some(value) => value
                .parse::<u64>()
                .map(Self::from_secs)
                .map_err(|_| Error::Validation(format!("invalid timeout: {:?}", value))),
        }
    }
}

impl From<Duration> for WaitBudget {
    fn from(d: Duration) -> Self {
        if d.is_zero() {
            Self::Immediate
        } else {
            Self::Bounded(d)
        }
    }
}
