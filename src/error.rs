//! Error types for YAML emission.
//!
//! Every failure in this crate is fatal to the call that produced it: the output
//! written so far must be discarded by the caller. Nothing is retried internally.
//!
//! ## Error Categories
//!
//! - **Format Errors**: Bad anchor names, empty tags, unsupported `%YAML` versions,
//!   malformed tag handles or prefixes
//! - **Protocol State Errors**: The serializer was used before `open` or after `close`
//! - **Protocol Violations**: The event stream does not match the grammar the emitter
//!   expects in its current state
//! - **I/O Errors**: The output sink refused a write or flush
//!
//! ## Examples
//!
//! ```rust
//! use serde_yaml_emit::{node_to_string, Error, Node};
//!
//! let node = Node::from("shared").with_anchor("not valid!");
//! let err = node_to_string(&node).unwrap_err();
//! assert!(matches!(err, Error::Format(_)));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while emitting YAML.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error while writing to the sink
    #[error("IO error: {0}")]
    Io(String),

    /// Malformed anchor, tag, tag directive, or version
    #[error("Format error: {0}")]
    Format(String),

    /// The serializer was opened, closed, or used out of order
    #[error("Serializer state error: {0}")]
    ProtocolState(String),

    /// The event stream does not match what the emitter expects next
    #[error("Protocol violation: expected {expected}, but got {found}")]
    ProtocolViolation { expected: String, found: String },

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a format error for a malformed anchor, tag, or directive.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_yaml_emit::Error;
    ///
    /// let err = Error::format("anchor must not be empty");
    /// assert!(err.to_string().contains("anchor"));
    /// ```
    pub fn format<T: fmt::Display>(msg: T) -> Self {
        Error::Format(msg.to_string())
    }

    /// Creates a protocol state error (serializer opened or closed out of order).
    pub fn protocol_state(msg: &str) -> Self {
        Error::ProtocolState(msg.to_string())
    }

    /// Creates a protocol violation naming the expected and received event kinds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_yaml_emit::Error;
    ///
    /// let err = Error::protocol_violation("DocumentStart", "MappingEnd");
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Protocol violation: expected DocumentStart, but got MappingEnd"
    /// );
    /// ```
    pub fn protocol_violation(expected: &str, found: &str) -> Self {
        Error::ProtocolViolation {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for sink write or flush failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::io(&err.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
