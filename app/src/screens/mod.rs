//! The three screens and the routes between them.
//!
//! Screens are plain functions/structs over an `HttpTransport` and a
//! `SessionContext`; the binary prints what they return.

pub mod main_menu;
pub mod sign_in;
pub mod sign_up;

#[cfg(test)]
mod scripted;

use std::fmt;

pub use main_menu::MainMenu;
pub use sign_in::SignInOutcome;
pub use sign_up::SignUpOutcome;

/// Where the user ends up after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    SignIn,
    SignUp,
    MainMenu,
}

impl Route {
    /// The command that opens this screen.
    pub fn command(self) -> &'static str {
        match self {
            Route::SignIn => "sign-in",
            Route::SignUp => "sign-up",
            Route::MainMenu => "menu",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Route::SignIn => "sign in",
            Route::SignUp => "sign up",
            Route::MainMenu => "main menu",
        };
        f.write_str(name)
    }
}
