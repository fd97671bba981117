//! ncgen - Nintendo Channel container generator
//!
//! This crate compiles catalog records into the binary files the Nintendo
//! Channel downloads: per-locale download lists, per-title info files and the
//! preview thumbnail pack.

// Enforce strict code quality and reliability
#![deny(
    // Safety
    unsafe_code,

    // Correctness
    missing_debug_implementations,

    // Future compatibility
    future_incompatible,

    // Rust 2018 idioms
    rust_2018_idioms,
)]
#![warn(
    unreachable_pub,

    // Error handling best practices
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::unimplemented,
    clippy::todo,

    // Performance
    clippy::inefficient_to_string,
    clippy::large_enum_variant,

    // Code clarity and maintainability
    clippy::cognitive_complexity,
    clippy::too_many_arguments,
    clippy::type_complexity,

    // Best practices
    clippy::clone_on_ref_ptr,
    clippy::wildcard_imports,
    clippy::enum_glob_use,
    clippy::if_not_else,
    clippy::needless_continue,
    clippy::explicit_iter_loop,
    clippy::explicit_into_iter_loop,
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod api;
pub mod channel;
pub mod config;
pub mod exceptions;
pub mod exit_codes;
pub mod logger;
pub mod utils;
pub mod version;

// Re-export main API functions
pub use api::{GenerateOptions, GenerateSummary, generate_lists, generate_lists_with, generate_thumbnails};
pub use config::GeneratorConfig;
pub use exceptions::{ChannelError, Result};
