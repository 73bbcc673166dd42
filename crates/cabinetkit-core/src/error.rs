//! Error handling for CabinetKit
//!
//! Provides error types for every layer of the cabinet engine:
//! - Cabinet errors (parameter validation)
//! - Placement errors (collection and selection operations)
//! - Design errors (design document save/load)
//! - Room errors (room photo payloads and room settings)
//!
//! All error types use `thiserror`. None of them is fatal: each one is
//! returned to the call site, which decides how to surface it.

use thiserror::Error;

/// Cabinet parameter error type
///
/// Raised when a cabinet parameter is rejected at the model boundary.
/// A rejected parameter never reaches the data model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CabinetError {
    /// A dimension was zero, negative, or not a finite number
    #[error("Invalid {dimension}: {value} (must be a positive number of inches)")]
    InvalidDimension {
        /// Which dimension was rejected ("width", "height" or "depth").
        dimension: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Dimension text could not be parsed
    #[error("Cannot parse dimension '{input}': {reason}")]
    UnparsableDimension {
        /// The raw input text.
        input: String,
        /// Why parsing failed.
        reason: String,
    },

    /// More shelves than a cabinet can hold
    #[error("Shelf count {count} exceeds the maximum of {max}")]
    TooManyShelves { count: i64, max: u32 },
}

/// Placement error type
///
/// Represents illegal operations on the cabinet collection. These are
/// reported no-ops: the collection is left exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    /// An operation needed a current cabinet but none is selected
    #[error("No cabinet selected")]
    NoSelection,

    /// Clear was requested on an empty collection
    #[error("No cabinets to clear")]
    NothingToClear,

    /// The referenced cabinet is not part of the collection
    #[error("Cabinet {id} is not in the design")]
    UnknownCabinet {
        /// The id that was not found.
        id: u64,
    },

    /// A cabinet was inserted while placement mode is switched off
    #[error("Placement mode is disabled")]
    PlacementModeDisabled,
}

/// Design document error type
///
/// Raised while saving or loading a design document. A failed load never
/// leaves a partially populated collection behind.
#[derive(Error, Debug)]
pub enum DesignError {
    /// The document is not valid JSON or does not match the schema
    #[error("Malformed design document: {reason}")]
    Malformed {
        /// Parser message, including line and column when available.
        reason: String,
    },

    /// A cabinet entry is missing a required field
    #[error("Cabinet #{index} is missing required field '{field}'")]
    MissingField {
        /// Position of the cabinet entry in the document.
        index: usize,
        /// The missing field name.
        field: &'static str,
    },

    /// A cabinet entry carries a value the model rejects
    #[error("Cabinet #{index} is invalid: {source}")]
    InvalidCabinet {
        /// Position of the cabinet entry in the document.
        index: usize,
        /// The underlying parameter error.
        #[source]
        source: CabinetError,
    },

    /// The document declares a format version this build cannot read
    #[error("Unsupported design format version {version}")]
    UnsupportedVersion {
        /// The declared version.
        version: String,
    },

    /// The room section of the document is invalid
    #[error(transparent)]
    Room(#[from] RoomError),

    /// Standard I/O error while reading or writing a design file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for DesignError {
    fn from(err: serde_json::Error) -> Self {
        DesignError::Malformed {
            reason: err.to_string(),
        }
    }
}

/// Room context error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoomError {
    /// The room photo payload is not a usable encoded image
    #[error("Invalid room photo: {reason}")]
    InvalidPhoto {
        /// Why the payload was rejected.
        reason: String,
    },

    /// The ceiling height was zero, negative, or not finite
    #[error("Invalid ceiling height: {value} ft")]
    InvalidCeilingHeight {
        /// The rejected value in feet.
        value: f64,
    },
}

/// Main error type for CabinetKit
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Cabinet parameter error
    #[error(transparent)]
    Cabinet(#[from] CabinetError),

    /// Placement error
    #[error(transparent)]
    Placement(#[from] PlacementError),

    /// Design document error
    #[error(transparent)]
    Design(#[from] DesignError),

    /// Room context error
    #[error(transparent)]
    Room(#[from] RoomError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a rejected cabinet parameter
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Error::Cabinet(_))
    }

    /// Check if this is an illegal collection operation (reported no-op)
    pub fn is_illegal_operation(&self) -> bool {
        matches!(self, Error::Placement(_))
    }

    /// Check if this is a design document error
    pub fn is_design_error(&self) -> bool {
        matches!(self, Error::Design(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
