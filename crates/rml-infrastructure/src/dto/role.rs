//! Stored role document.

use rml_core::error::Result;
use rml_core::role::Role;
use semver::Version;
use serde::{Deserialize, Serialize};

use super::ensure_compatible;

pub const ROLE_SCHEMA_VERSION: Version = Version::new(1, 0, 0);

/// V1 of the role file schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRecordV1 {
    pub schema_version: Version,
    pub role: Role,
}

impl RoleRecordV1 {
    pub fn from_role(role: &Role) -> Self {
        Self {
            schema_version: ROLE_SCHEMA_VERSION,
            role: role.clone(),
        }
    }

    /// Unwraps the role after checking the schema version.
    pub fn into_role(self) -> Result<Role> {
        ensure_compatible("role", &self.schema_version, &ROLE_SCHEMA_VERSION)?;
        Ok(self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_carries_current_version() {
        let record = RoleRecordV1::from_role(&Role::new_empty());
        assert_eq!(record.schema_version, ROLE_SCHEMA_VERSION);
    }

    #[test]
    fn test_minor_bump_is_accepted_major_bump_rejected() {
        let role = Role::new_empty();

        let mut record = RoleRecordV1::from_role(&role);
        record.schema_version = Version::new(1, 3, 0);
        assert_eq!(record.into_role().unwrap().id, role.id);

        let mut record = RoleRecordV1::from_role(&role);
        record.schema_version = Version::new(2, 0, 0);
        let err = record.into_role().unwrap_err();
        assert!(err.to_string().contains("Unsupported role schema version 2.0.0"));
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(RoleRecordV1::from_role(&Role::new_empty())).unwrap();
        assert_eq!(json["schemaVersion"], "1.0.0");
        assert!(json["role"]["base"].is_object());
    }
}
