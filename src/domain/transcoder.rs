//! Mapping between [`TeamMember`] records and their JSON representation.
//!
//! Outbound, a record is encoded field for field into a
//! [`TeamMemberRepresentation`]. Inbound write bodies arrive as arbitrary
//! JSON so that every field can be checked and reported on individually
//! instead of failing on the first type mismatch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::{
    Email, PersonName, Phone, Role, TeamMember, TeamMemberChanges,
    TeamMemberId, ValidationError, ValidationErrors,
};

pub const NON_FIELD_ERRORS: &str = "non_field_errors";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMemberRepresentation {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// How much of a record an update body has to carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Every required writable field must be present.
    Replace,
    /// Any subset of writable fields.
    Partial,
}

pub fn encode(team_member: &TeamMember) -> TeamMemberRepresentation {
    TeamMemberRepresentation {
        id: *team_member.id.as_ref(),
        first_name: team_member.first_name.as_ref().to_owned(),
        last_name: team_member.last_name.as_ref().to_owned(),
        email: team_member.email.as_ref().to_owned(),
        phone: team_member.phone.as_ref().to_owned(),
        role: team_member.role,
        created_at: team_member.created_at,
        updated_at: team_member.updated_at,
    }
}

pub fn decode(
    representation: TeamMemberRepresentation,
) -> Result<TeamMember, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let first_name = collect(
        &mut errors,
        "first_name",
        PersonName::parse(representation.first_name),
    );
    let last_name = collect(
        &mut errors,
        "last_name",
        PersonName::parse(representation.last_name),
    );
    let email =
        collect(&mut errors, "email", Email::parse(representation.email));
    let phone =
        collect(&mut errors, "phone", Phone::parse(representation.phone));

    if representation.updated_at < representation.created_at {
        errors.add(
            "updated_at",
            ValidationError::new(
                "Must not be earlier than created_at.".to_string(),
            ),
        );
    }

    match (first_name, last_name, email, phone) {
        (Some(first_name), Some(last_name), Some(email), Some(phone))
            if errors.is_empty() =>
        {
            Ok(TeamMember {
                id: TeamMemberId::new(representation.id),
                first_name,
                last_name,
                email,
                phone,
                role: representation.role,
                created_at: representation.created_at,
                updated_at: representation.updated_at,
            })
        }
        _ => Err(errors),
    }
}

/// Decodes a create body into a fresh record with a generated id.
pub fn decode_new(body: &Value) -> Result<TeamMember, ValidationErrors> {
    let changes = read_changes(body, true)?;
    match changes {
        TeamMemberChanges {
            first_name: Some(first_name),
            last_name: Some(last_name),
            email: Some(email),
            phone: Some(phone),
            role,
        } => Ok(TeamMember::new(first_name, last_name, email, phone, role)),
        // read_changes reports every missing required field
        _ => Err(ValidationErrors::new()),
    }
}

pub fn decode_changes(
    body: &Value,
    mode: WriteMode,
) -> Result<TeamMemberChanges, ValidationErrors> {
    read_changes(body, mode == WriteMode::Replace)
}

fn read_changes(
    body: &Value,
    required: bool,
) -> Result<TeamMemberChanges, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let Some(object) = body.as_object() else {
        errors.add(
            NON_FIELD_ERRORS,
            ValidationError::new(format!(
                "Invalid data. Expected a dictionary, but got {}.",
                json_type_name(body)
            )),
        );
        return Err(errors);
    };

    let changes = TeamMemberChanges {
        first_name: read_field(
            object,
            "first_name",
            required,
            &mut errors,
            PersonName::parse,
        ),
        last_name: read_field(
            object,
            "last_name",
            required,
            &mut errors,
            PersonName::parse,
        ),
        email: read_field(object, "email", required, &mut errors, Email::parse),
        phone: read_field(object, "phone", required, &mut errors, Phone::parse),
        role: read_choice(object, "role", &mut errors, |s| s.parse::<Role>()),
    };

    if errors.is_empty() {
        Ok(changes)
    } else {
        Err(errors)
    }
}

fn read_field<T>(
    object: &Map<String, Value>,
    name: &str,
    required: bool,
    errors: &mut ValidationErrors,
    parse: impl FnOnce(String) -> Result<T, ValidationError>,
) -> Option<T> {
    let text = match object.get(name) {
        None if required => {
            errors.add(name, error("This field is required."));
            return None;
        }
        None => return None,
        Some(Value::Null) => {
            errors.add(name, error("This field may not be null."));
            return None;
        }
        Some(Value::String(s)) => s.trim().to_owned(),
        Some(Value::Number(n)) => n.to_string(),
        Some(_) => {
            errors.add(name, error("Not a valid string."));
            return None;
        }
    };

    collect(errors, name, parse(text))
}

// Choices are matched exactly, without trimming. Never required since role
// has a default.
fn read_choice<T>(
    object: &Map<String, Value>,
    name: &str,
    errors: &mut ValidationErrors,
    parse: impl FnOnce(String) -> Result<T, ValidationError>,
) -> Option<T> {
    let text = match object.get(name) {
        None => return None,
        Some(Value::Null) => {
            errors.add(name, error("This field may not be null."));
            return None;
        }
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };

    collect(errors, name, parse(text))
}

fn collect<T>(
    errors: &mut ValidationErrors,
    name: &str,
    result: Result<T, ValidationError>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            errors.add(name, e);
            None
        }
    }
}

fn error(message: &str) -> ValidationError {
    ValidationError::new(message.to_string())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}
