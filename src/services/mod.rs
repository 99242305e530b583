//! User flows orchestrating the API gateway and session store.
//!
//! ARCHITECTURE
//! ============
//! Flow modules own sequencing and session effects so UI shells stay
//! focused on rendering and navigation. Every flow validates locally
//! first, takes the gateway through the [`crate::api::UserApi`] seam, and
//! races against the caller's cancel token.

pub mod bid;
pub mod login;
pub mod password;
pub mod profile;
pub mod seller;
pub mod signup;
pub mod verification;
