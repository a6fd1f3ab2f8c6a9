//! Command-line host for the category API.
//!
//! # Overview
//! Executes the requests `category-core` builds with a blocking ureq agent,
//! keeps the session token in a file, and drives the sign-in, sign-up and
//! main-menu screens.

pub mod config;
pub mod notice;
pub mod screens;
pub mod session_file;
pub mod transport;

pub use config::Config;
pub use notice::{Notice, NoticeKind};
pub use screens::{MainMenu, Route};
pub use session_file::FileSessionStore;
pub use transport::UreqTransport;
