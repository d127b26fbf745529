//! Shared query parameter types for API handlers.

use designsight_core::error::CoreError;
use designsight_core::roles::ReviewerRole;
use serde::Deserialize;

/// Optional reviewer role filter (`?role=designer`).
///
/// Used by the screen detail and export endpoints. An absent or empty value
/// means "no filter".
#[derive(Debug, Default, Deserialize)]
pub struct RoleParams {
    pub role: Option<String>,
}

impl RoleParams {
    /// Parse the role, rejecting unknown names with a validation error.
    pub fn parse(&self) -> Result<Option<ReviewerRole>, CoreError> {
        match self.role.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(name) => ReviewerRole::from_name(name).map(Some),
        }
    }
}
