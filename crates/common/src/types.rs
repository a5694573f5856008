use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name of the request header that carries the caller's identity.
pub const USER_HEADER: &str = "X-User-Name";

macro_rules! uuid_newtype {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID.
            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

uuid_newtype! {
    /// Unique identifier for a reservation.
    ///
    /// Wraps a UUID to provide type safety and prevent mixing up
    /// reservation IDs with other UUID-based identifiers.
    ReservationUid
}

uuid_newtype! {
    /// Unique identifier for a hotel.
    HotelUid
}

uuid_newtype! {
    /// Unique identifier for a payment record.
    PaymentUid
}

/// The caller's identity, asserted via the `X-User-Name` request header.
///
/// This is the sole correlation key used to scope backend calls to a
/// user; no session or token validation happens at the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Creates a username from a header value.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the username as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the username is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Username {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Username {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reservation_uid_new_creates_unique_ids() {
        let id1 = ReservationUid::new();
        let id2 = ReservationUid::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn reservation_uid_from_uuid_preserves_value() {
        let uuid = Uuid::new_v4();
        let id = ReservationUid::from_uuid(uuid);
        assert_eq!(id.as_uuid(), uuid);
    }

    #[test]
    fn uid_serialization_roundtrip() {
        let id = PaymentUid::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: PaymentUid = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn uid_parses_from_string() {
        let id = HotelUid::new();
        let parsed: HotelUid = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn username_preserves_value() {
        let user = Username::from("Test Max");
        assert_eq!(user.as_str(), "Test Max");
        assert!(!user.is_empty());
        assert!(Username::from("").is_empty());
    }

    #[test]
    fn username_constructors_agree() {
        assert_eq!(Username::new("Test Max"), Username::from("Test Max"));
        assert_eq!(
            Username::new(String::from("Test Max")),
            Username::from("Test Max")
        );
    }
}
