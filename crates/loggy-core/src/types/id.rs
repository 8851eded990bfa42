//! Newtype wrappers for all domain entity identifiers.
//!
//! People and log entries use database-assigned serial integers; image
//! attachments use UUIDs so their URLs are unguessable. When the `sqlx`
//! feature is enabled each ID type also implements `sqlx::Type`,
//! `sqlx::Encode`, and `sqlx::Decode` for PostgreSQL.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Implements the PostgreSQL codec traits by delegating to the inner type.
macro_rules! impl_sqlx_delegate {
    ($name:ident, $inner:ty) => {
        #[cfg(feature = "sqlx")]
        impl sqlx::Type<sqlx::Postgres> for $name {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <$inner as sqlx::Type<sqlx::Postgres>>::type_info()
            }
        }

        #[cfg(feature = "sqlx")]
        impl<'q> sqlx::Encode<'q, sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut <sqlx::Postgres as sqlx::Database>::ArgumentBuffer<'q>,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <$inner as sqlx::Encode<'q, sqlx::Postgres>>::encode_by_ref(&self.0, buf)
            }
        }

        #[cfg(feature = "sqlx")]
        impl<'r> sqlx::Decode<'r, sqlx::Postgres> for $name {
            fn decode(
                value: <sqlx::Postgres as sqlx::Database>::ValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                <$inner as sqlx::Decode<'r, sqlx::Postgres>>::decode(value).map(Self)
            }
        }
    };
}

/// Macro to define a newtype ID wrapper around a serial `i32`.
macro_rules! define_serial_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i32);

        impl $name {
            /// Return the inner integer value.
            pub fn value(self) -> i32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<i32>().map(Self)
            }
        }

        impl From<i32> for $name {
            fn from(value: i32) -> Self {
                Self(value)
            }
        }

        impl_sqlx_delegate!($name, i32);
    };
}

define_serial_id!(
    /// Unique identifier for a person (account).
    PersonId
);

define_serial_id!(
    /// Unique identifier for a log entry.
    LogEntryId
);

/// Unique identifier for an image attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttachmentId(pub Uuid);

impl AttachmentId {
    /// Create a new random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Return the inner UUID value.
    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for AttachmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AttachmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AttachmentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl From<Uuid> for AttachmentId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl_sqlx_delegate!(AttachmentId, Uuid);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_id_uniqueness() {
        let a = AttachmentId::new();
        let b = AttachmentId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_attachment_id_display_roundtrip() {
        let id = AttachmentId::new();
        let s = id.to_string();
        let parsed: AttachmentId = s.parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_serial_id_parse() {
        let id: PersonId = "42".parse().unwrap();
        assert_eq!(id, PersonId(42));
        assert!("abc".parse::<LogEntryId>().is_err());
    }

    #[test]
    fn test_serial_id_serde_transparent() {
        let json = serde_json::to_string(&LogEntryId(7)).unwrap();
        assert_eq!(json, "7");
    }
}
