//! File discovery and scanning

pub mod scanner;

pub use scanner::{collect, SUPPORTED_EXTENSIONS};
