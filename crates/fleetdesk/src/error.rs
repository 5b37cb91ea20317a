//! Error types for fleetdesk.
//!
//! This module defines all error types used throughout the fleetdesk crate,
//! providing detailed context for debugging and user-friendly error messages.
//!
//! Field-level validation failures are *not* errors in this sense: they are
//! attached to the offending field in [`crate::form::FormState`] and reported
//! through [`crate::form::SubmitOutcome`].

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for fleetdesk operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

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

    // === Form Descriptor Errors ===
    /// A field descriptor names a key the target record does not have.
    #[error("field '{field}' is not an attribute of the target record")]
    UnknownField {
        /// The offending field name.
        field: String,
    },

    /// Two sections in the same form share an id.
    #[error("duplicate section id '{id}'")]
    DuplicateSection {
        /// The repeated section id.
        id: String,
    },

    /// Two field descriptors in the same form bind the same name.
    #[error("field '{field}' is declared more than once")]
    DuplicateField {
        /// The repeated field name.
        field: String,
    },

    /// A field pattern failed to compile.
    #[error("invalid pattern for field '{field}': {message}")]
    InvalidPattern {
        /// The field carrying the pattern.
        field: String,
        /// The regex compiler's message.
        message: String,
    },

    /// A field operation is not valid for the field's kind.
    #[error("field '{field}': {message}")]
    FieldKind {
        /// The field involved.
        field: String,
        /// Description of the mismatch.
        message: String,
    },

    /// Form values could not be converted into the target record.
    #[error("failed to build record from form values: {0}")]
    RecordConversion(String),

    // === Upload Errors ===
    /// An upload carried no bytes.
    #[error("refusing to upload empty file '{name}'")]
    UploadEmpty {
        /// The file name supplied by the caller.
        name: String,
    },

    /// An upload exceeded the configured size limit.
    #[error("file '{name}' is {size} bytes, limit is {limit}")]
    UploadTooLarge {
        /// The file name supplied by the caller.
        name: String,
        /// Size of the payload.
        size: usize,
        /// Configured limit.
        limit: usize,
    },

    // === Domain Errors ===
    /// A driver record does not exist.
    #[error("driver {id} not found")]
    DriverNotFound {
        /// The requested driver id.
        id: i64,
    },

    /// A command-line value could not be interpreted.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for fleetdesk operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an unknown field error.
    #[must_use]
    pub fn unknown_field(field: impl Into<String>) -> Self {
        Self::UnknownField {
            field: field.into(),
        }
    }

    /// Create a field kind mismatch error.
    #[must_use]
    pub fn field_kind(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FieldKind {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an invalid argument error.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Check if this error is a malformed form description.
    #[must_use]
    pub fn is_descriptor_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownField { .. }
                | Self::DuplicateSection { .. }
                | Self::DuplicateField { .. }
                | Self::InvalidPattern { .. }
                | Self::FieldKind { .. }
        )
    }

    /// Check if this error means a requested record does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::DriverNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::DriverNotFound { id: 7 };
        assert_eq!(err.to_string(), "driver 7 not found");

        let err = Error::unknown_field("shoe_size");
        assert_eq!(
            err.to_string(),
            "field 'shoe_size' is not an attribute of the target record"
        );
    }

    #[test]
    fn test_is_descriptor_error() {
        assert!(Error::unknown_field("x").is_descriptor_error());
        assert!(Error::DuplicateSection { id: "a".into() }.is_descriptor_error());
        assert!(Error::DuplicateField { field: "a".into() }.is_descriptor_error());
        assert!(Error::field_kind("a", "not a file field").is_descriptor_error());
        assert!(!Error::DriverNotFound { id: 1 }.is_descriptor_error());
    }

    #[test]
    fn test_is_not_found() {
        assert!(Error::DriverNotFound { id: 1 }.is_not_found());
        assert!(!Error::invalid_argument("bad").is_not_found());
    }

    #[test]
    fn test_upload_too_large_display() {
        let err = Error::UploadTooLarge {
            name: "cnic.png".to_string(),
            size: 20,
            limit: 10,
        };
        let msg = err.to_string();
        assert!(msg.contains("cnic.png"));
        assert!(msg.contains("20"));
        assert!(msg.contains("10"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_rusqlite_error() {
        let result = rusqlite::Connection::open_with_flags(
            "/nonexistent/path/db.sqlite",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        );
        if let Err(sqlite_err) = result {
            let err: Error = sqlite_err.into();
            assert!(matches!(err, Error::DatabaseQuery(_)));
        }
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_database_migration_error_display() {
        let err = Error::DatabaseMigration {
            message: "version mismatch".to_string(),
        };
        assert!(err.to_string().contains("version mismatch"));
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "page_size must be greater than 0".to_string(),
        };
        assert!(err.to_string().contains("page_size"));
    }

    #[test]
    fn test_invalid_pattern_display() {
        let err = Error::InvalidPattern {
            field: "cnic_no".to_string(),
            message: "unclosed group".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("cnic_no"));
        assert!(msg.contains("unclosed group"));
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }
}
