//! HTTP protocol layer module
//!
//! Protocol-level helpers shared by every handler: response builders,
//! MIME lookup, and conditional-request evaluation.

pub mod conditional;
pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_301_response, build_304_response, build_404_response, build_405_response,
    build_416_response, build_json_response,
};
