//! Shared helpers used by every resource and data source

pub mod merge;
pub mod method;
pub mod value;

pub use merge::{merge_known_paths, merge_remote_into_plan};
pub use method::pick_method;
