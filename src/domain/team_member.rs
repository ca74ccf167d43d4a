use chrono::{DateTime, Duration, SubsecRound, Utc};
use std::fmt;

use super::{Email, PersonName, Phone, Role, TeamMemberId};

#[derive(Debug, Clone, PartialEq)]
pub struct TeamMember {
    pub id: TeamMemberId,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: Email,
    pub phone: Phone,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Writable fields of a team member. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamMemberChanges {
    pub first_name: Option<PersonName>,
    pub last_name: Option<PersonName>,
    pub email: Option<Email>,
    pub phone: Option<Phone>,
    pub role: Option<Role>,
}

impl TeamMember {
    pub fn new(
        first_name: PersonName,
        last_name: PersonName,
        email: Email,
        phone: Phone,
        role: Option<Role>,
    ) -> Self {
        let now = current_timestamp();
        Self {
            id: TeamMemberId::default(),
            first_name,
            last_name,
            email,
            phone,
            role: role.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, changes: TeamMemberChanges) {
        if let Some(first_name) = changes.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = changes.last_name {
            self.last_name = last_name;
        }
        if let Some(email) = changes.email {
            self.email = email;
        }
        if let Some(phone) = changes.phone {
            self.phone = phone;
        }
        if let Some(role) = changes.role {
            self.role = role;
        }
        self.touch();
    }

    // updated_at must strictly advance even when the clock has not
    fn touch(&mut self) {
        let now = current_timestamp();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::microseconds(1)
        };
    }
}

impl fmt::Display for TeamMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.first_name, self.last_name, self.email)
    }
}

/// Postgres stores timestamps with microsecond precision.
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
