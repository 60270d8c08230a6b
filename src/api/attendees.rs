//! Attendees registered at the site.

use std::fmt;
use serde::{Deserialize, Serialize};
use super::ident::{ObjectId, Record};


//------------ Attendee ------------------------------------------------------

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    pub id: ObjectId,

    #[serde(default, alias = "first_name")]
    pub first_name: String,

    #[serde(default, alias = "last_name")]
    pub last_name: String,

    /// A full name, for APIs that do not split names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

impl Attendee {
    pub fn full_name(&self) -> String {
        match self.name.as_ref() {
            Some(name) if !name.is_empty() => name.clone(),
            _ => {
                format!("{} {}", self.first_name, self.last_name)
                    .trim().to_string()
            }
        }
    }
}

impl Record for Attendee {
    fn id(&self) -> &ObjectId {
        &self.id
    }
}

impl fmt::Display for Attendee {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:<8} {:<24} {}", self.id, self.full_name(), self.email)
    }
}


//------------ NewAttendee ---------------------------------------------------

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAttendee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company: String,
}


//============ Tests =========================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_from_either_shape() {
        let list: Vec<Attendee> = serde_json::from_str(
            r#"[
                {"id": 1, "name": "Asistente 1", "email": "a1@email.com"},
                {"id": 2, "first_name": "Ana", "last_name": "Ruiz",
                 "email": "ana@email.com", "company": "ACME"},
                {"id": 3, "firstName": "Luis", "lastName": "Paz",
                 "email": "luis@email.com"}
            ]"#
        ).unwrap();
        assert_eq!(list[0].full_name(), "Asistente 1");
        assert_eq!(list[1].full_name(), "Ana Ruiz");
        assert_eq!(list[2].full_name(), "Luis Paz");
    }
}
