//! Package role types.

use std::fmt;

use serde::{Serialize, Serializer};

use super::value::{next_item, tuple_items, FromValue, ShapeError, Value};

/// Role a user holds on a package
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    Maintainer,
    Owner,
    /// Any role name the index adds later, kept verbatim
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Maintainer => "Maintainer",
            Role::Owner => "Owner",
            Role::Other(name) => name,
        }
    }
}

impl From<String> for Role {
    fn from(name: String) -> Self {
        match name.as_str() {
            "Maintainer" => Role::Maintainer,
            "Owner" => Role::Owner,
            _ => Role::Other(name),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl FromValue for Role {
    fn from_value(value: Value) -> Result<Self, ShapeError> {
        String::from_value(value).map(Role::from)
    }
}

/// A `(role, user)` pair from `package_roles`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageRole {
    pub role: Role,
    pub user: String,
}

impl FromValue for PackageRole {
    fn from_value(value: Value) -> Result<Self, ShapeError> {
        let mut items = tuple_items(value, 2, 2)?;
        Ok(Self {
            role: next_item(&mut items, "role")?,
            user: next_item(&mut items, "user")?,
        })
    }
}

/// A `(role, package)` pair from `user_packages`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserPackage {
    pub role: Role,
    pub package: String,
}

impl FromValue for UserPackage {
    fn from_value(value: Value) -> Result<Self, ShapeError> {
        let mut items = tuple_items(value, 2, 2)?;
        Ok(Self {
            role: next_item(&mut items, "role")?,
            package: next_item(&mut items, "package")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_and_unknown_roles() {
        assert_eq!(Role::from("Owner".to_string()), Role::Owner);
        assert_eq!(Role::from("Maintainer".to_string()), Role::Maintainer);
        assert_eq!(
            Role::from("Publisher".to_string()),
            Role::Other("Publisher".to_string())
        );
        assert_eq!(Role::Other("Publisher".to_string()).to_string(), "Publisher");
    }

    #[test]
    fn test_package_role_pair() {
        let role = PackageRole::from_value(Value::from(vec!["Owner", "larz60"])).unwrap();
        assert_eq!(role.role, Role::Owner);
        assert_eq!(role.user, "larz60");
    }

    #[test]
    fn test_user_package_rejects_short_tuple() {
        let err = UserPackage::from_value(Value::from(vec!["Owner"])).unwrap_err();
        assert_eq!(err.0, "expected 2-tuple, found 1 items");
    }
}
