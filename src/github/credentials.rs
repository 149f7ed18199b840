//! Sources of the opaque credential string passed to the HTTP capability.
//!
//! Loading may block (reading the environment, a keychain, a file), so the
//! client always runs [`CredentialSource::load`] as a task on its
//! [`crate::TaskRunner`] rather than on the caller's async context.

use std::env::{self, VarError};
use std::fmt;

use thiserror::Error;

/// Failures raised while loading credentials.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialError {
    /// The named environment variable is not set.
    #[error("environment variable {name} is not set")]
    MissingVariable {
        /// Variable that was read.
        name: String,
    },

    /// The named environment variable does not hold valid Unicode.
    #[error("environment variable {name} is not valid unicode")]
    NotUnicode {
        /// Variable that was read.
        name: String,
    },
}

/// Synchronous, possibly blocking, credential lookup.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialSource: Send + Sync {
    /// Returns the credential string to hand to the HTTP capability.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError`] when the credentials cannot be read.
    fn load(&self) -> Result<String, CredentialError>;
}

/// Fixed credentials held in memory.
#[derive(Clone, PartialEq, Eq)]
pub struct StaticCredentials(String);

impl StaticCredentials {
    /// Wraps a credential string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Empty credentials; the HTTP capability decides what that means.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self(String::new())
    }
}

impl fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StaticCredentials(<redacted>)")
    }
}

impl CredentialSource for StaticCredentials {
    fn load(&self) -> Result<String, CredentialError> {
        Ok(self.0.clone())
    }
}

/// Credentials read from an environment variable at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvCredentials {
    name: String,
    required: bool,
}

impl EnvCredentials {
    /// Reads credentials from the variable `name`, failing when it is unset.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: true,
        }
    }

    /// Reads credentials from the variable `name`, loading anonymous
    /// credentials when it is unset.
    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: false,
        }
    }
}

impl CredentialSource for EnvCredentials {
    fn load(&self) -> Result<String, CredentialError> {
        match env::var(&self.name) {
            Ok(value) => Ok(value),
            Err(VarError::NotPresent) if !self.required => Ok(String::new()),
            Err(VarError::NotPresent) => Err(CredentialError::MissingVariable {
                name: self.name.clone(),
            }),
            Err(VarError::NotUnicode(_)) => Err(CredentialError::NotUnicode {
                name: self.name.clone(),
            }),
        }
    }
}
