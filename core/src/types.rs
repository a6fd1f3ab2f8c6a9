//! Domain DTOs for the category API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! the integration tests catch schema drift between the two crates. Every
//! payload travels inside an `Envelope`.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The `{ "data": ... }` wrapper around every response payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Envelope<T> {
    pub data: T,
}

/// Identifier of a category. The API is free to use integers or strings
/// (UUIDs), so both are accepted and written back in the same shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum CategoryId {
    Number(u64),
    Text(String),
}

impl CategoryId {
    /// Whether the id can be used as a single URL path segment unescaped.
    /// Text ids are limited to RFC 3986 unreserved characters, which covers
    /// UUIDs.
    pub fn is_path_safe(&self) -> bool {
        match self {
            CategoryId::Number(_) => true,
            CategoryId::Text(s) => {
                !s.is_empty()
                    && s.bytes()
                        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~'))
                    && s != "."
                    && s != ".."
            }
        }
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryId::Number(n) => write!(f, "{n}"),
            CategoryId::Text(s) => f.write_str(s),
        }
    }
}

impl FromStr for CategoryId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<u64>() {
            Ok(n) => CategoryId::Number(n),
            Err(_) => CategoryId::Text(s.to_string()),
        })
    }
}

/// A single category returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub is_active: bool,
}

impl Category {
    pub fn status_label(&self) -> &'static str {
        CategoryStatus::from(self.is_active).label()
    }
}

/// The two states a category can be switched between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryStatus {
    Active,
    #[default]
    Deactive,
}

impl CategoryStatus {
    pub fn is_active(self) -> bool {
        matches!(self, CategoryStatus::Active)
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryStatus::Active => "Active",
            CategoryStatus::Deactive => "Deactive",
        }
    }
}

impl From<bool> for CategoryStatus {
    fn from(active: bool) -> Self {
        if active {
            CategoryStatus::Active
        } else {
            CategoryStatus::Deactive
        }
    }
}

impl FromStr for CategoryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(CategoryStatus::Active),
            "deactive" | "inactive" => Ok(CategoryStatus::Deactive),
            other => Err(format!("unknown status `{other}` (expected active or deactive)")),
        }
    }
}

/// Request payload for creating a category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateCategory {
    pub name: String,
    pub is_active: bool,
}

/// Request payload for updating a category. The id travels in the body,
/// not the path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateCategory {
    pub id: CategoryId,
    pub name: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Payload of a successful login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginData {
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// The signed-in user's profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_id_accepts_numbers_and_strings() {
        let numeric: Category =
            serde_json::from_str(r#"{"id":3,"name":"Food","is_active":true}"#).unwrap();
        assert_eq!(numeric.id, CategoryId::Number(3));

        let text: Category = serde_json::from_str(
            r#"{"id":"5f0c7a0e-1b2c-4d3e-8f90-a1b2c3d4e5f6","name":"Drinks","is_active":false}"#,
        )
        .unwrap();
        assert_eq!(
            text.id,
            CategoryId::Text("5f0c7a0e-1b2c-4d3e-8f90-a1b2c3d4e5f6".to_string())
        );
    }

    #[test]
    fn category_id_keeps_its_shape_when_serialized() {
        let body = serde_json::to_value(UpdateCategory {
            id: CategoryId::Number(7),
            name: "x".to_string(),
            is_active: true,
        })
        .unwrap();
        assert_eq!(body["id"], 7);
    }

    #[test]
    fn category_id_parses_from_cli_text() {
        assert_eq!("3".parse::<CategoryId>().unwrap(), CategoryId::Number(3));
        assert_eq!(
            "abc".parse::<CategoryId>().unwrap(),
            CategoryId::Text("abc".to_string())
        );
        assert_eq!(CategoryId::Number(3).to_string(), "3");
    }

    #[test]
    fn missing_is_active_defaults_to_deactive() {
        let category: Category = serde_json::from_str(r#"{"id":1,"name":"Bare"}"#).unwrap();
        assert!(!category.is_active);
        assert_eq!(category.status_label(), "Deactive");
    }

    #[test]
    fn status_parses_both_labels() {
        assert_eq!("active".parse::<CategoryStatus>(), Ok(CategoryStatus::Active));
        assert_eq!(" Deactive ".parse::<CategoryStatus>(), Ok(CategoryStatus::Deactive));
        assert!("paused".parse::<CategoryStatus>().is_err());
    }
}
