use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::ValidationError;

pub const MAX_EMAIL_LENGTH: usize = 254;

lazy_static! {
    // Dotted hostname whose last label is at least two characters
    static ref DOMAIN_REGEX: Regex = Regex::new(
        r"(?i)^(?:[\p{L}\p{N}](?:[\p{L}\p{N}-]{0,61}[\p{L}\p{N}])?\.)+[\p{L}\p{N}-]{1,62}[\p{L}\p{N}]$"
    )
    .expect("Regex for email domain is invalid");
    static ref LITERAL_REGEX: Regex = Regex::new(r"(?i)^\[[0-9a-f:.]+\]$")
        .expect("Regex for email address literal is invalid");
}

const DOMAIN_ALLOWLIST: [&str; 1] = ["localhost"];

fn is_valid_domain(domain: &str) -> bool {
    DOMAIN_ALLOWLIST.contains(&domain)
        || DOMAIN_REGEX.is_match(domain)
        || LITERAL_REGEX.is_match(domain)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    pub fn parse(s: String) -> Result<Self, ValidationError> {
        if s.trim().is_empty() {
            return Err(ValidationError::new(
                "This field may not be blank.".to_string(),
            ));
        }
        if s.chars().count() > MAX_EMAIL_LENGTH {
            return Err(ValidationError::new(format!(
                "Ensure this field has no more than {MAX_EMAIL_LENGTH} characters."
            )));
        }
        let domain = s.rsplit_once('@').map(|(_, domain)| domain);
        if !validator::validate_email(s.as_str())
            || !domain.is_some_and(is_valid_domain)
        {
            return Err(ValidationError::new(
                "Enter a valid email address.".to_string(),
            ));
        }

        Ok(Self(s))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
