//! Fixed-text confirmation and failure dialogs shown after a submission.

use std::fmt;

use category_core::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: &'static str,
    pub text: String,
}

impl Notice {
    fn success(title: &'static str, text: &str) -> Self {
        Self {
            kind: NoticeKind::Success,
            title,
            text: text.to_string(),
        }
    }

    fn error(title: &'static str, text: &str) -> Self {
        Self {
            kind: NoticeKind::Error,
            title,
            text: text.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }

    pub fn login_success() -> Self {
        Self::success(
            "Login Successful",
            "You have successfully logged in. You will be redirected to dashboard shortly...",
        )
    }

    pub fn login_failed() -> Self {
        Self::error(
            "Login Failed",
            "An error occurred while trying to log in. Please try again later.",
        )
    }

    pub fn registration_success() -> Self {
        Self::success(
            "Registration Successful",
            "You have successfully registered. You can now log in.",
        )
    }

    pub fn registration_failed() -> Self {
        Self::error(
            "Registration Failed",
            "An error occurred during registration. Please try again.",
        )
    }

    pub fn add_success() -> Self {
        Self::success("Add Successful", "You have successfully added a new category.")
    }

    pub fn add_failed() -> Self {
        Self::error(
            "Add Failed",
            "An error occurred during add category. Please try again.",
        )
    }

    pub fn update_success() -> Self {
        Self::success("Update Successful", "You have successfully updated the category.")
    }

    pub fn update_failed() -> Self {
        Self::error("Update Failed", "An error occurred during update. Please try again.")
    }

    pub fn delete_success() -> Self {
        Self::success("Delete Successful", "You have successfully deleted the category.")
    }

    pub fn delete_failed() -> Self {
        Self::error("Delete Failed", "An error occurred during delete. Please try again.")
    }

    pub fn not_signed_in() -> Self {
        Self::error("Not Signed In", "Please sign in to continue.")
    }

    pub fn logged_out() -> Self {
        Self::success("Logged Out", "Your session has ended.")
    }

    pub fn invalid_input(errors: &[ValidationError]) -> Self {
        let text = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        Self::error("Invalid Input", &text)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.kind {
            NoticeKind::Success => "ok",
            NoticeKind::Error => "error",
        };
        write!(f, "[{marker}] {}\n{}", self.title, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_marker_title_and_text() {
        assert_eq!(
            Notice::add_success().to_string(),
            "[ok] Add Successful\nYou have successfully added a new category."
        );
        assert!(Notice::delete_failed().to_string().starts_with("[error] Delete Failed"));
    }

    #[test]
    fn invalid_input_lists_each_error() {
        let notice = Notice::invalid_input(&[
            ValidationError::Required { field: "Email" },
            ValidationError::Required { field: "Password" },
        ]);
        assert!(notice.is_error());
        assert_eq!(notice.text, "Email is required\nPassword is required");
    }
}
