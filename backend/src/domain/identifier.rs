//! UUID-backed identifier newtypes shared by the aggregates.

use std::fmt;

/// Validation errors returned when parsing an identifier from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierValidationError {
    Empty,
    Invalid,
}

impl fmt::Display for IdentifierValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "identifier must not be empty"),
            Self::Invalid => write!(f, "identifier must be a valid UUID"),
        }
    }
}

impl std::error::Error for IdentifierValidationError {}

macro_rules! define_identifier {
    (
        $(#[$outer:meta])*
        pub struct $name:ident;
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(uuid::Uuid);

        impl $name {
            /// Validate and construct an identifier from borrowed input.
            pub fn new(
                id: impl AsRef<str>,
            ) -> Result<Self, $crate::domain::IdentifierValidationError> {
                let raw = id.as_ref();
                if raw.is_empty() {
                    return Err($crate::domain::IdentifierValidationError::Empty);
                }
                if raw.trim() != raw {
                    return Err($crate::domain::IdentifierValidationError::Invalid);
                }
                uuid::Uuid::parse_str(raw)
                    .map(Self)
                    .map_err(|_| $crate::domain::IdentifierValidationError::Invalid)
            }

            /// Generate a new random identifier.
            pub fn random() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Access the underlying UUID.
            pub fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::domain::IdentifierValidationError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0.to_string()
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::domain::IdentifierValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

pub(crate) use define_identifier;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    define_identifier! {
        pub struct SampleId;
    }

    #[rstest]
    #[case("", IdentifierValidationError::Empty)]
    #[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", IdentifierValidationError::Invalid)]
    #[case("not-a-uuid", IdentifierValidationError::Invalid)]
    fn rejects_malformed_input(#[case] raw: &str, #[case] expected: IdentifierValidationError) {
        assert_eq!(SampleId::new(raw), Err(expected));
    }

    #[rstest]
    fn round_trips_through_display() {
        let id = SampleId::random();
        let parsed: SampleId = id.to_string().parse().expect("display output parses");
        assert_eq!(parsed, id);
    }

    #[rstest]
    fn serialises_as_plain_string() {
        let id = SampleId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id");
        let value = serde_json::to_value(id).expect("id serialises");
        assert_eq!(value, "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    }
}
