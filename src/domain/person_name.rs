use super::ValidationError;
use serde::{Deserialize, Serialize};

pub const MAX_NAME_LENGTH: usize = 255;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonName(String);

impl PersonName {
    pub fn parse(name: String) -> Result<Self, ValidationError> {
        match name.chars().count() {
            _ if name.trim().is_empty() => Err(ValidationError::new(
                "This field may not be blank.".to_string(),
            )),
            x if x > MAX_NAME_LENGTH => Err(ValidationError::new(format!(
                "Ensure this field has no more than {MAX_NAME_LENGTH} characters."
            ))),
            _ => Ok(Self(name)),
        }
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PersonName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[test]
fn test_valid_person_names() {
    let valid_names = ["a".to_string(), "Ada".to_string(), "a".repeat(255)];
    for valid_name in valid_names.iter() {
        let parsed = PersonName::parse(valid_name.to_owned())
            .expect("Failed to parse valid name");

        assert_eq!(parsed.as_ref(), valid_name);
    }
}

#[test]
fn test_blank_person_names() {
    for blank_name in ["", "   "] {
        let result = PersonName::parse(blank_name.to_string());
        assert_eq!(
            result.unwrap_err().as_ref(),
            "This field may not be blank."
        );
    }
}

#[test]
fn test_long_person_names() {
    let long_name = "a".repeat(256);
    let result = PersonName::parse(long_name);
    assert_eq!(
        result.unwrap_err().as_ref(),
        "Ensure this field has no more than 255 characters."
    );
}
