use super::ValidationError;
use serde::{Deserialize, Serialize};

pub const MAX_PHONE_LENGTH: usize = 15;

/// Free-form phone number. Only the length is constrained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phone(String);

impl Phone {
    pub fn parse(phone: String) -> Result<Self, ValidationError> {
        if phone.trim().is_empty() {
            return Err(ValidationError::new(
                "This field may not be blank.".to_string(),
            ));
        }
        if phone.chars().count() > MAX_PHONE_LENGTH {
            return Err(ValidationError::new(format!(
                "Ensure this field has no more than {MAX_PHONE_LENGTH} characters."
            )));
        }
        Ok(Self(phone))
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
