use crate::utils::error::{BillingError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(BillingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(BillingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// Fails when two of the named paths are the same, so the report can never
/// overwrite one of its inputs.
pub fn validate_distinct_paths(paths: &[(&str, &str)]) -> Result<()> {
    let mut seen = HashSet::new();
    for (field, path) in paths {
        if !seen.insert(*path) {
            return Err(BillingError::InvalidConfigValueError {
                field: field.to_string(),
                value: path.to_string(),
                reason: "Path is used more than once".to_string(),
            });
        }
    }
    Ok(())
}
