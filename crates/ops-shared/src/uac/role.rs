use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::errors::{ConversionError, ValidationError};

use super::PermissionCode;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct RoleName(String);

impl RoleName {
    pub const MAX_LENGTH: usize = 50;
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct PermissionDescription(String);

impl PermissionDescription {
    pub const MAX_LENGTH: usize = 200;
}

impl TryFrom<String> for RoleName {
    type Error = ConversionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(ConversionError::Empty);
        }
        if value.len() > Self::MAX_LENGTH {
            return Err(ConversionError::MaxExceeded {
                max: Self::MAX_LENGTH,
                actual: value.len(),
            });
        }
        Ok(Self(value))
    }
}

impl TryFrom<String> for PermissionDescription {
    type Error = ConversionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(ConversionError::Empty);
        }
        if value.len() > Self::MAX_LENGTH {
            return Err(ConversionError::MaxExceeded {
                max: Self::MAX_LENGTH,
                actual: value.len(),
            });
        }
        Ok(Self(value))
    }
}

impl From<RoleName> for String {
    fn from(value: RoleName) -> Self {
        value.0
    }
}

impl From<PermissionDescription> for String {
    fn from(value: PermissionDescription) -> Self {
        value.0
    }
}

impl AsRef<str> for RoleName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for RoleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for PermissionDescription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RoleDraft {
    pub name: RoleName,
}

impl RoleDraft {
    pub fn try_new(name: String) -> Result<Self, ValidationError> {
        let name = name
            .try_into()
            .map_err(|e: ConversionError| ValidationError::new("name", e.to_string()))?;
        Ok(Self { name })
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PermissionDraft {
    pub name: PermissionCode,
    pub description: PermissionDescription,
}

impl PermissionDraft {
    pub fn try_new(name: String, description: String) -> Result<Self, ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::new(
                "name",
                ConversionError::Empty.to_string(),
            ));
        }
        let description = description
            .try_into()
            .map_err(|e: ConversionError| ValidationError::new("description", e.to_string()))?;
        Ok(Self {
            name: name.into(),
            description,
        })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::empty("", ConversionError::Empty)]
    #[case::too_long("a".repeat(51), ConversionError::MaxExceeded{max:50, actual:51})]
    fn illegal_role_name(#[case] name: String, #[case] expect: ConversionError) {
        let actual: Result<RoleName, ConversionError> = name.try_into();
        assert_eq!(actual.unwrap_err(), expect);
    }

    #[test]
    fn role_draft_reports_field() {
        let actual = RoleDraft::try_new(String::new()).unwrap_err();
        assert_eq!(actual.field, "name");
    }

    #[rstest]
    #[case::no_name("", "Allows exporting", "name")]
    #[case::no_description("REPORT_EXPORT", "", "description")]
    fn permission_draft_reports_field(
        #[case] name: &str,
        #[case] description: &str,
        #[case] field: &str,
    ) {
        let actual =
            PermissionDraft::try_new(name.to_string(), description.to_string()).unwrap_err();
        assert_eq!(actual.field, field);
    }

    #[test]
    fn permission_draft_wire_format() {
        // Arrange
        let draft =
            PermissionDraft::try_new("REPORT_EXPORT".into(), "Allows exporting".into()).unwrap();

        // Act
        let actual = serde_json::to_value(&draft).unwrap();

        // Assert
        assert_eq!(
            actual,
            serde_json::json!({"name": "REPORT_EXPORT", "description": "Allows exporting"})
        );
    }
}
