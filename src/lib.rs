//! Distribtest - release distribution-test matrix generation
//!
//! This crate turns a declarative catalog of test targets (language SDK x
//! platform x architecture x packaging variant) into executable job
//! specifications consumed by an external execution engine. Nothing in this
//! crate runs a test; the output is pure data.

// Enforce strict code quality and reliability
#![deny(
    // Safety
    unsafe_code,

    // Correctness
    missing_debug_implementations,
    unreachable_pub,

    // Future compatibility
    future_incompatible,

    // Rust 2018 idioms
    rust_2018_idioms,
)]
#![warn(
    // Documentation
    missing_docs,

    // Error handling best practices
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::unimplemented,
    clippy::todo,

    // Code clarity and maintainability
    clippy::cognitive_complexity,
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
#![allow(
    missing_docs,  // path/timeout constants carry line comments instead
)]

pub mod defaults;
pub mod error;
pub mod exit_codes;
pub mod jobspec;
pub mod logger;
pub mod platform;
pub mod targets;
pub mod version;

// Re-export the catalog entry point and the types it is built from
pub use error::{Error, Result};
pub use jobspec::{DockerJob, JobSpec, WorkspaceJob};
pub use platform::{Arch, Platform};
pub use targets::{
    CSharpDistribTest, CppDistribTest, DistribTest, PackageType, Php8DistribTest,
    PythonDistribTest, RubyDistribTest, targets,
};
