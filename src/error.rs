//! Error types for catalog generation

use crate::platform::{Arch, Platform};
use std::fmt;

/// Fatal errors raised while translating a target into a jobspec.
///
/// Catalog generation must abort on the first of these rather than produce
/// a partial matrix; a partial matrix silently weakens release validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The target variant has no implementation for the requested platform
    UnsupportedPlatform {
        /// Name of the offending target
        target: String,
        /// The platform the variant does not support
        platform: Platform,
    },

    /// The architecture has no rubygems platform mapping
    UnsupportedArch {
        /// Name of the offending target
        target: String,
        /// The architecture without a gem mapping
        arch: Arch,
    },

    /// A containerized branch was reached without a docker suffix to
    /// select the base-image Dockerfile
    MissingDockerSuffix {
        /// Name of the offending target
        target: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnsupportedPlatform { target, platform } => {
                write!(f, "target {target}: platform {platform} is not supported")
            }
            Error::UnsupportedArch { target, arch } => {
                write!(f, "target {target}: no gem architecture mapping for {arch}")
            }
            Error::MissingDockerSuffix { target } => {
                write!(f, "target {target}: docker suffix required to select a Dockerfile")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, Error>;
