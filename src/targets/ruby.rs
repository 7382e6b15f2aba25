//! Ruby distribution test: installs the released gem (or builds it from
//! source) inside a container matching the target libc flavor.

use super::PackageType;
use crate::defaults::{DISTRIB_COPY_REL_PATH, DISTRIBTEST_DOCKERFILE_ROOT};
use crate::error::{Error, Result};
use crate::jobspec::{DockerJob, JobSpec};
use crate::platform::{Arch, Platform};

/// Configuration of one Ruby distribtest target.
///
/// Gems are libc-specific, so only the `linux-gnu` and `linux-musl`
/// platform flavors are supported.
#[derive(Debug, Clone)]
pub struct RubyDistribTest {
    platform: Platform,
    arch: Arch,
    docker_suffix: String,
    ruby_version: Option<String>,
    package_type: PackageType,
    protobuf_version: Option<String>,
    presubmit: bool,
}

impl RubyDistribTest {
    /// Create a Ruby target; tests the binary gem unless a source package
    /// type is selected.
    pub fn new(platform: Platform, arch: Arch, docker_suffix: impl Into<String>) -> Self {
        Self {
            platform,
            arch,
            docker_suffix: docker_suffix.into(),
            ruby_version: None,
            package_type: PackageType::Binary,
            protobuf_version: None,
            presubmit: false,
        }
    }

    /// Pin the interpreter version baked into the Dockerfile name
    /// (e.g. `ruby_3_2`).
    pub fn with_ruby_version(mut self, version: impl Into<String>) -> Self {
        self.ruby_version = Some(version.into());
        self
    }

    /// Build the gem from source instead of installing the binary gem.
    pub fn with_package_type(mut self, package_type: PackageType) -> Self {
        self.package_type = package_type;
        self
    }

    /// Override the protobuf dependency version inside the test.
    pub fn with_protobuf_version(mut self, version: impl Into<String>) -> Self {
        self.protobuf_version = Some(version.into());
        self
    }

    /// Include this target in the reduced presubmit matrix.
    pub fn with_presubmit(mut self) -> Self {
        self.presubmit = true;
        self
    }

    /// Unique target name; every knob is threaded in so new knobs keep
    /// catalog-wide uniqueness.
    pub fn name(&self) -> String {
        let mut name = format!(
            "ruby_{}_{}_{}_version_{}_package_type_{}",
            self.platform,
            self.arch,
            self.docker_suffix,
            self.ruby_version.as_deref().unwrap_or("unspecified"),
            self.package_type,
        );
        if let Some(version) = &self.protobuf_version {
            name.push_str("_protobuf_");
            name.push_str(version);
        }
        name
    }

    /// Filter labels; the libc flavors collapse to a single `linux` label.
    pub fn labels(&self) -> Vec<String> {
        let mut labels = vec![
            "distribtest".to_string(),
            "ruby".to_string(),
            self.platform.label().to_string(),
            self.arch.to_string(),
            self.docker_suffix.clone(),
        ];
        if self.presubmit {
            labels.push("presubmit".to_string());
        }
        labels
    }

    /// Hook for jobs that must run before the main test; none needed.
    pub fn pre_build_jobspecs(&self) -> Vec<JobSpec> {
        Vec::new()
    }

    /// Build the primary test jobspec.
    ///
    /// `inner_jobs` is accepted and discarded; gem installation has
    /// nothing to parallelize.
    pub fn build_jobspec(&self, _inner_jobs: Option<u32>) -> Result<JobSpec> {
        if !matches!(self.platform, Platform::LinuxGnu | Platform::LinuxMusl) {
            return Err(Error::UnsupportedPlatform {
                target: self.name(),
                platform: self.platform,
            });
        }

        let gem_arch = self.arch.gem_arch().ok_or_else(|| Error::UnsupportedArch {
            target: self.name(),
            arch: self.arch,
        })?;

        let mut dockerfile_dir = format!(
            "{DISTRIBTEST_DOCKERFILE_ROOT}/ruby_{}_{}",
            self.docker_suffix, self.arch
        );
        if let Some(version) = &self.ruby_version {
            dockerfile_dir.push('_');
            dockerfile_dir.push_str(version);
        }

        // four positional arguments; the protobuf override stays an empty
        // trailing argument when unset
        let shell_command = format!(
            "test/distrib/ruby/run_distrib_test.sh {gem_arch} {} {} {}",
            self.platform,
            self.package_type,
            self.protobuf_version.as_deref().unwrap_or(""),
        );

        Ok(DockerJob::new(self.name(), dockerfile_dir, shell_command)
            .with_copy_rel_path(DISTRIB_COPY_REL_PATH)
            .build())
    }
}
