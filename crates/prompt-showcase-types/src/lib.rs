// prompt-showcase-types: shared types, the completion service trait, and errors
#![allow(clippy::result_large_err)]

pub mod completion;
pub mod config;
pub mod error;
pub mod message;
pub mod service;

pub use completion::*;
pub use config::*;
pub use error::*;
pub use message::*;
pub use service::*;
