//! Storybook generator - turns a short prompt into an illustrated children's story
//!
//! A chat-completion model writes the pages, an image model illustrates each
//! page concurrently, and the composed story is served as JSON to the
//! page-flipping viewer.

pub mod ai;
pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod prompts;
pub mod server;

pub use error::{Error, Result};
