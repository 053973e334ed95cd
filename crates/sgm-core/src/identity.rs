//! # Identity Newtypes
//!
//! Record identifiers. Fixture and imported records carry human-readable
//! ids (`case-001`, `ver-001-v3`), so these wrap strings rather than UUIDs.
//! Records created at runtime get a fresh UUID v4 rendered as a string.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Wrap an existing identifier.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a fresh random identifier.
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// The identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

string_id!(
    /// Identifier of a governance case (exception, dispute, ...).
    CaseId
);

string_id!(
    /// Identifier of one version of a governed document.
    VersionId
);

string_id!(
    /// Identifier of a compensation plan instance.
    PlanId
);

string_id!(
    /// Identifier of a section within a plan or document version.
    SectionId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(CaseId::generate(), CaseId::generate());
    }

    #[test]
    fn serde_is_transparent() {
        let id = VersionId::new("ver-001-v3");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"ver-001-v3\"");
        let back: VersionId = serde_json::from_str("\"ver-001-v3\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn display_is_raw_string() {
        assert_eq!(PlanId::from("plan-7").to_string(), "plan-7");
    }
}
