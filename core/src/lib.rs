//! Synchronous API client core for the category service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). On top of that sit the
//! pieces every screen shares: the fetch lifecycle (`FetchList`), the
//! session context, and form validation.
//!
//! # Design
//! - `CategoryClient` is stateless; it holds only `base_url`.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - Authenticated calls take a `Session` argument instead of reading a
//!   global token.
//! - `FetchList` runs `Idle → Loading → Success | Failed` around a single
//!   request and only refetches when asked to.

pub mod client;
pub mod error;
pub mod fetch;
pub mod http;
pub mod session;
pub mod types;
pub mod validation;

pub use client::CategoryClient;
pub use error::{ApiError, SessionError, TransportError};
pub use fetch::{FetchList, FetchSnapshot, FetchState, FetchTicket, Resolution};
pub use http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
pub use session::{MemorySessionStore, Session, SessionContext, SessionStore, TOKEN_KEY};
pub use types::{
    Category, CategoryId, CategoryStatus, CreateCategory, Envelope, LoginData, LoginRequest,
    Profile, RegisterRequest, UpdateCategory,
};
pub use validation::{CategoryForm, SignInForm, SignUpForm, ValidationError};
