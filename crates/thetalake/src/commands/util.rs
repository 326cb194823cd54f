//! Shared helpers for command handlers.

use std::io::{self, Read};
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::CliError;

/// Read and parse a JSON record from `path`, or from stdin when it is `-`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let contents = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };

    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: path.display().to_string(),
        reason: format!("invalid JSON: {e}"),
    })
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use thetalake_core::Case;

    use super::*;

    #[test]
    fn reads_a_record_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"name": "test-case", "number": "CASE-TEST-001"}}"#).unwrap();

        let case: Case = read_json(file.path()).unwrap();
        assert_eq!(case.name, "test-case");
        assert_eq!(case.id, None);
    }

    #[test]
    fn malformed_json_is_a_validation_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();

        let err = read_json::<Case>(file.path()).unwrap_err();
        assert!(matches!(err, CliError::Validation { ref reason, .. } if reason.starts_with("invalid JSON")));
    }
}
