//! Account session subsystem.
//!
//! # Data Flow
//! ```text
//! open(address) → set_network(name) → update_nonce()
//!     → session.rs (build payload, derive id, sign, submit, advance nonce)
//!     → poller.rs (query by id until terminal status, deadline, cancel)
//! ```
//!
//! # Constraints
//! - One in-flight submission per session: mutating operations take
//!   `&mut self`, so concurrent submits on one session do not compile
//! - Nonce advances only after the gateway confirms a submission
//! - Private keys are caller-supplied per call and never stored

pub mod poller;
pub mod session;

pub use poller::{CancelToken, FinalityPoller};
pub use session::AccountSession;
