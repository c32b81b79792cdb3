use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

pub const ANONYMOUS: &str = "Anonymous";
pub const MAX_FULL_NAME_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub identity_id: Uuid,
    pub full_name: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub fn display_name(&self) -> Option<&str> {
        self.full_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// Name shown next to a rating. Missing profile or blank name is "Anonymous".
pub fn author_name(profile: Option<&Profile>) -> String {
    profile
        .and_then(Profile::display_name)
        .unwrap_or(ANONYMOUS)
        .to_string()
}

pub fn normalize_full_name(name: &str) -> Result<String, AppError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation("Full name cannot be empty".into()));
    }

    let len = trimmed.chars().count();
    if len > MAX_FULL_NAME_CHARS {
        return Err(AppError::Validation(format!(
            "Full name must be at most {MAX_FULL_NAME_CHARS} characters, got {len}"
        )));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: Option<&str>) -> Profile {
        Profile {
            identity_id: Uuid::new_v4(),
            full_name: name.map(String::from),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn author_name_falls_back_to_anonymous() {
        assert_eq!(author_name(None), ANONYMOUS);
        assert_eq!(author_name(Some(&profile(None))), ANONYMOUS);
        assert_eq!(author_name(Some(&profile(Some("   ")))), ANONYMOUS);
        assert_eq!(author_name(Some(&profile(Some("Maria S.")))), "Maria S.");
    }

    #[test]
    fn full_name_sanity_checks() {
        assert_eq!(normalize_full_name("  Ana L. ").unwrap(), "Ana L.");
        assert!(normalize_full_name("   ").is_err());
        assert!(normalize_full_name(&"x".repeat(MAX_FULL_NAME_CHARS)).is_ok());
        assert!(normalize_full_name(&"x".repeat(MAX_FULL_NAME_CHARS + 1)).is_err());
    }
}
