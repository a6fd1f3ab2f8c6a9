//! Runtime settings, from flags or the environment.

use std::path::PathBuf;

use clap::Args;

pub const DEFAULT_BASE_URL: &str = "https://mock-api.arikmpt.com";
pub const DEFAULT_SESSION_FILE: &str = ".category-session.json";

#[derive(Debug, Clone, Args)]
pub struct Config {
    /// Base URL of the category API.
    #[arg(long, env = "CATEGORY_API_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// File holding the signed-in session token.
    #[arg(long, env = "CATEGORY_SESSION_FILE", default_value = DEFAULT_SESSION_FILE)]
    pub session_file: PathBuf,
}
