//! HTTP protocol layer module
//!
//! Response construction, decoupled from the dispatch logic.

pub mod response;

// Re-export commonly used builders
pub use response::{
    build_405_response, build_index_error_response, build_index_response,
    build_post_received_response,
};
