//! Request handler module
//!
//! Dispatches on method and path to the index page or the POST body logger.

pub mod index;
pub mod post;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
