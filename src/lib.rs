//! Expertosy: guided product recommendations
//!
//! Facade over the workspace crates. The binary lives in `expertosy-cli`.

pub use expertosy_core::*;
pub use expertosy_history as history;
