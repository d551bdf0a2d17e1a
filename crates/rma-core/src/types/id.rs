//! Newtype wrappers for store-assigned identifiers.
//!
//! The REST store assigns ids on creation and may hand them back as JSON
//! strings or numbers. Both forms deserialize into the same opaque string
//! so that a `TicketId` can never be passed where a `NotificationId` is
//! expected.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Accepts either a JSON string or a JSON number.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

/// Macro to define a newtype ID wrapper around an opaque string.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Wrap an existing identifier.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Return the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                RawId::deserialize(deserializer).map(|raw| Self(raw.into()))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

define_id!(
    /// Store-assigned identifier of a ticket.
    TicketId
);

define_id!(
    /// Store-assigned identifier of a notification.
    NotificationId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_id_deserializes_as_string() {
        let id: TicketId = serde_json::from_str("17").expect("numeric id");
        assert_eq!(id.as_str(), "17");
    }

    #[test]
    fn test_string_id_serializes_transparently() {
        let id: NotificationId = serde_json::from_str("\"notif-1700000000000\"").expect("string id");
        assert_eq!(id.to_string(), "notif-1700000000000");
        assert_eq!(
            serde_json::to_string(&id).expect("serialize"),
            "\"notif-1700000000000\""
        );
    }
}
