//! Error types for rocketstar.
//!
//! Every failure in the catalog pipeline is terminal for the operation that
//! raised it. Variants carry the resource name, mission id or astronaut key
//! involved so the diagnostic points at the offending data.

use thiserror::Error;

/// The main error type for rocketstar operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Resource Errors ===
    /// The named resource is absent from the resource store.
    #[error("resource '{name}' not found in {store}")]
    ResourceNotFound {
        /// Name of the missing resource.
        name: String,
        /// Description of the store that was searched.
        store: String,
    },

    /// The resource exists but its bytes could not be read.
    #[error("failed to read resource '{name}': {source}")]
    ResourceRead {
        /// Name of the unreadable resource.
        name: String,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Document Errors ===
    /// The resource bytes are not valid JSON.
    #[error("resource '{name}' is not valid JSON: {source}")]
    MalformedDocument {
        /// Name of the offending resource.
        name: String,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The document is valid JSON but does not match the expected shape.
    #[error("resource '{name}' does not match the expected schema: {source}")]
    Schema {
        /// Name of the offending resource.
        name: String,
        /// The underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// The roster document defines the same key twice.
    #[error("resource '{name}' defines astronaut '{key}' more than once")]
    DuplicateAstronaut {
        /// Name of the roster resource.
        name: String,
        /// The repeated roster key.
        key: String,
    },

    /// The mission document defines the same mission id twice.
    #[error("resource '{name}' defines mission {id} more than once")]
    DuplicateMission {
        /// Name of the mission resource.
        name: String,
        /// The repeated mission id.
        id: i64,
    },

    // === Reference Errors ===
    /// A mission's crew references an astronaut absent from the roster.
    #[error("mission {mission} references unknown crew member '{name}'")]
    UnknownCrewMember {
        /// Id of the mission being resolved.
        mission: i64,
        /// The crew name that did not resolve.
        name: String,
    },

    /// No mission with the requested id exists.
    #[error("no mission with id {0}")]
    UnknownMission(i64),

    /// No astronaut with the requested key exists.
    #[error("no astronaut with key '{0}'")]
    UnknownAstronaut(String),

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Serialization Errors ===
    /// JSON encoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for rocketstar operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a resource-not-found error.
    #[must_use]
    pub fn resource_not_found(name: impl Into<String>, store: impl Into<String>) -> Self {
        Self::ResourceNotFound {
            name: name.into(),
            store: store.into(),
        }
    }

    /// Create an unknown-crew-member error.
    #[must_use]
    pub fn unknown_crew_member(mission: i64, name: impl Into<String>) -> Self {
        Self::UnknownCrewMember {
            mission,
            name: name.into(),
        }
    }

    /// Classify a `serde_json` decode failure for the named resource.
    ///
    /// Syntax and truncation errors mean the bytes were never JSON; data
    /// errors mean the JSON had the wrong shape.
    #[must_use]
    pub fn decode(name: impl Into<String>, source: serde_json::Error) -> Self {
        let name = name.into();
        match source.classify() {
            serde_json::error::Category::Data => Self::Schema { name, source },
            _ => Self::MalformedDocument { name, source },
        }
    }

    /// Create a configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Check if this error comes from loading or decoding a resource.
    #[must_use]
    pub fn is_resource_error(&self) -> bool {
        matches!(
            self,
            Self::ResourceNotFound { .. }
                | Self::ResourceRead { .. }
                | Self::MalformedDocument { .. }
                | Self::Schema { .. }
                | Self::DuplicateAstronaut { .. }
                | Self::DuplicateMission { .. }
        )
    }

    /// Check if this error is a dangling crew reference.
    #[must_use]
    pub fn is_unknown_crew_member(&self) -> bool {
        matches!(self, Self::UnknownCrewMember { .. })
    }
}
