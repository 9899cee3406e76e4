//! Typed page core for the administration front end.
//!
//! A page resolves the session once, asks the [`Navigator`] whether its route
//! is allowed, then drives a [`ListStore`] against a [`Backend`] (normally the
//! HTTP [`ApiClient`]).

pub mod backend;
pub mod navigator;
pub mod resource;
pub mod store;

pub use backend::{ApiClient, Backend};
pub use navigator::{Navigation, Navigator, SessionState};
pub use resource::Resource;
pub use store::{Confirm, FetchMode, FetchTicket, ListStore, MutationOutcome, Notice, PageState};
