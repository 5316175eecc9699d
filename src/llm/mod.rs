pub mod client;
pub mod json;
pub mod prompts;

pub use client::*;
pub use json::*;
pub use prompts::*;
