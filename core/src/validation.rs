//! Client-side form checks: required fields and email shape.
//!
//! Each form validates into the request payload it feeds, so a payload can
//! only be built from input that passed.

use thiserror::Error;

use crate::types::{CategoryStatus, CreateCategory, LoginRequest, RegisterRequest};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("Invalid email")]
    InvalidEmail,
}

/// Loose email check: one `@`, a non-empty local part, and a dotted domain
/// with no empty labels. No whitespace anywhere.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || !domain.contains('.') {
        return false;
    }
    domain.split('.').all(|label| !label.is_empty())
}

fn require(value: &str, field: &'static str, errors: &mut Vec<ValidationError>) {
    if value.trim().is_empty() {
        errors.push(ValidationError::Required { field });
    }
}

fn require_email(value: &str, errors: &mut Vec<ValidationError>) {
    if value.trim().is_empty() {
        errors.push(ValidationError::Required { field: "Email" });
    } else if !is_valid_email(value.trim()) {
        errors.push(ValidationError::InvalidEmail);
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl SignInForm {
    pub fn validate(&self) -> Result<LoginRequest, Vec<ValidationError>> {
        let mut errors = Vec::new();
        require_email(&self.email, &mut errors);
        require(&self.password, "Password", &mut errors);
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl SignUpForm {
    /// The registered name is "first last".
    pub fn validate(&self) -> Result<RegisterRequest, Vec<ValidationError>> {
        let mut errors = Vec::new();
        require(&self.first_name, "First name", &mut errors);
        require(&self.last_name, "Last name", &mut errors);
        require_email(&self.email, &mut errors);
        require(&self.password, "Password", &mut errors);
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(RegisterRequest {
            name: format!("{} {}", self.first_name.trim(), self.last_name.trim()),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct CategoryForm {
    pub name: String,
    pub status: CategoryStatus,
}

impl CategoryForm {
    pub fn validate(&self) -> Result<CreateCategory, Vec<ValidationError>> {
        let mut errors = Vec::new();
        require(&self.name, "Name", &mut errors);
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(CreateCategory {
            name: self.name.trim().to_string(),
            is_active: self.status.is_active(),
        })
    }
}
