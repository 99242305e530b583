//! Leelame client core — headless client SDK for the Leelame auction
//! marketplace API.
//!
//! ARCHITECTURE
//! ============
//! UI shells (native or WASM) own rendering; this crate owns everything
//! behind it: the session store, the route-access engine, the API gateway,
//! field validation, and the user flows that tie them together.
//!
//! Layering is strict: `services` orchestrate `api` + `session`; `access`
//! decides whether a view may render; nothing below the shell performs
//! navigation. Redirects and denials are returned as data.
//!
//! TRADE-OFFS
//! ==========
//! The gateway is a deliberate pass-through: no retries, no backoff, no
//! response caching. Server error payloads reach the caller unmodified so
//! shells can surface the backend's own messages.

pub mod access;
pub mod api;
pub mod cancel;
pub mod config;
pub mod error;
pub mod logging;
pub mod services;
pub mod session;
pub mod storage;
pub mod validate;

pub use access::{AccessState, DenyReason, RouteDecision, RouteRule};
pub use api::{HttpApiClient, UserApi};
pub use cancel::{CancelSource, CancelToken};
pub use config::ClientConfig;
pub use error::{ClientError, ErrorCode};
pub use session::{Session, SessionStore};
