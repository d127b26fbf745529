//! Reviewer roles and the role-based feedback filter.
//!
//! Each role sees a fixed subset of feedback categories. The mapping is
//! static; it is also embedded in the suggestion prompt so the model knows
//! who each category is for.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::feedback::{FeedbackCategory, FeedbackItem};

/// A reviewer role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewerRole {
    Designer,
    Reviewer,
    ProductManager,
    Developer,
}

/// All valid role name strings.
const VALID_ROLE_STRINGS: &[&str] = &["designer", "reviewer", "product_manager", "developer"];

impl ReviewerRole {
    pub const ALL: [ReviewerRole; 4] = [
        Self::Designer,
        Self::Reviewer,
        Self::ProductManager,
        Self::Developer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Designer => "designer",
            Self::Reviewer => "reviewer",
            Self::ProductManager => "product_manager",
            Self::Developer => "developer",
        }
    }

    /// Parse a role from its snake_case name.
    pub fn from_name(s: &str) -> Result<Self, CoreError> {
        match s {
            "designer" => Ok(Self::Designer),
            "reviewer" => Ok(Self::Reviewer),
            "product_manager" => Ok(Self::ProductManager),
            "developer" => Ok(Self::Developer),
            _ => Err(CoreError::Validation(format!(
                "Invalid role '{s}'. Must be one of: {}",
                VALID_ROLE_STRINGS.join(", ")
            ))),
        }
    }

    /// Whether an item of `category` is relevant to this role.
    pub fn allows(&self, category: &FeedbackCategory) -> bool {
        use FeedbackCategory::*;
        match self {
            Self::Designer => matches!(category, Accessibility | VisualHierarchy),
            Self::Reviewer => matches!(category, Content | VisualHierarchy),
            Self::ProductManager => matches!(category, Content | UiUx),
            Self::Developer => matches!(category, UiUx),
        }
    }

    /// Categories this role is allowed to see, in canonical order.
    pub fn categories(&self) -> Vec<FeedbackCategory> {
        FeedbackCategory::KNOWN
            .into_iter()
            .filter(|c| self.allows(c))
            .collect()
    }
}

/// Return the items relevant to `role`, preserving order.
///
/// Items with an unrecognised category never match any role.
pub fn filter_for_role(role: ReviewerRole, items: &[FeedbackItem]) -> Vec<FeedbackItem> {
    items
        .iter()
        .filter(|item| role.allows(&item.category))
        .cloned()
        .collect()
}
