//! Record identifiers.

use std::fmt;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde::de::{self, Visitor};


//------------ ObjectId ------------------------------------------------------

/// The opaque identifier of a record held by the API.
///
/// The API hands out numeric ids for some collections and string ids for
/// others. Both are accepted and kept as their textual form, which is what
/// goes into request paths.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ObjectId(String);

impl ObjectId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ObjectId {
    fn from(s: &str) -> Self {
        ObjectId(s.to_string())
    }
}

impl From<String> for ObjectId {
    fn from(s: String) -> Self {
        ObjectId(s)
    }
}

impl From<u64> for ObjectId {
    fn from(n: u64) -> Self {
        ObjectId(n.to_string())
    }
}

impl std::str::FromStr for ObjectId {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            Err("empty id")
        }
        else {
            Ok(ObjectId(s.to_string()))
        }
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(
        &self, serializer: S
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        struct IdVisitor;

        impl Visitor<'_> for IdVisitor {
            type Value = ObjectId;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a string or integer id")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<ObjectId, E> {
                Ok(ObjectId(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<ObjectId, E> {
                Ok(ObjectId(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<ObjectId, E> {
                Ok(ObjectId(v.to_string()))
            }
        }

        d.deserialize_any(IdVisitor)
    }
}


//------------ Record --------------------------------------------------------

/// A record held by the API and identified by an [`ObjectId`].
pub trait Record {
    fn id(&self) -> &ObjectId;
}


//============ Tests =========================================================
