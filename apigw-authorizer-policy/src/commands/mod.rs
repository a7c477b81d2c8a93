//! Commands module - request-level operations built on the policy builder

mod authorize;

pub use authorize::{authorize, Grant, GrantTarget};
