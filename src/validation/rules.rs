//! Common validation rules shared across report query payloads.

use validator::ValidationError;

/// Validates the employee name query parameter.
///
/// Requirements:
/// - Non-blank
/// - At most 100 characters
pub fn validate_employee_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("employee_name_required"));
    }
    if name.chars().count() > 100 {
        return Err(ValidationError::new("employee_name_too_long"));
    }
    Ok(())
}
