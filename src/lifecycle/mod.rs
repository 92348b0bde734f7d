//! Form lifecycle subsystem.
//!
//! # Data Flow
//! ```text
//! open (session.rs):
//!     Settings → transformer + template → codec lease acquired
//!
//! init event (HostContext):
//!     debug gate → load path → model published → session initialized
//!
//! save / test-save:
//!     save path → destination element (or a scratch <config/>)
//!
//! close (explicit or drop):
//!     codec lease released exactly once
//! ```
//!
//! # Design Decisions
//! - No global state: everything a handler needs lives on the session
//! - Codec release is tied to the session's lifetime
//! - The debug gate only changes logging and test-save visibility

pub mod context;
pub mod lease;
pub mod session;

pub use context::{HostContext, InitOutcome};
pub use lease::CodecLease;
pub use session::{FormSession, SessionError};
