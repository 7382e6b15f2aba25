//! Python distribution test: installs the released wheel or builds the
//! source distribution inside a container and runs a smoke test.

use super::PackageType;
use crate::defaults::{
    DISTRIB_COPY_REL_PATH, DISTRIBTEST_DOCKERFILE_ROOT, PYTHON_TIMEOUT_SECONDS,
};
use crate::error::{Error, Result};
use crate::jobspec::{DockerJob, JobSpec};
use crate::platform::{Arch, Platform};

/// Configuration of one Python distribtest target. Linux only.
#[derive(Debug, Clone)]
pub struct PythonDistribTest {
    platform: Platform,
    arch: Arch,
    docker_suffix: String,
    package_type: PackageType,
    presubmit: bool,
}

impl PythonDistribTest {
    /// Create a Python target; tests the binary wheel unless a source
    /// package type is selected.
    pub fn new(platform: Platform, arch: Arch, docker_suffix: impl Into<String>) -> Self {
        Self {
            platform,
            arch,
            docker_suffix: docker_suffix.into(),
            package_type: PackageType::Binary,
            presubmit: false,
        }
    }

    /// Exercise the source distribution instead of the wheel.
    pub fn with_package_type(mut self, package_type: PackageType) -> Self {
        self.package_type = package_type;
        self
    }

    /// Include this target in the reduced presubmit matrix.
    pub fn with_presubmit(mut self) -> Self {
        self.presubmit = true;
        self
    }

    /// Unique target name; source-mode targets carry a `python_dev_` prefix.
    pub fn name(&self) -> String {
        let prefix = match self.package_type {
            PackageType::Source => "python_dev",
            PackageType::Binary => "python",
        };
        format!(
            "{prefix}_{}_{}_{}",
            self.platform, self.arch, self.docker_suffix
        )
    }

    /// Filter labels.
    pub fn labels(&self) -> Vec<String> {
        let mut labels = vec![
            "distribtest".to_string(),
            "python".to_string(),
            self.platform.to_string(),
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
    /// `inner_jobs` is accepted and discarded; the install-and-smoke-test
    /// flow has nothing to parallelize.
    pub fn build_jobspec(&self, _inner_jobs: Option<u32>) -> Result<JobSpec> {
        if self.platform != Platform::Linux {
            return Err(Error::UnsupportedPlatform {
                target: self.name(),
                platform: self.platform,
            });
        }

        let (dockerfile_prefix, script) = match self.package_type {
            PackageType::Source => ("python_dev", "run_source_distrib_test.sh"),
            PackageType::Binary => ("python", "run_binary_distrib_test.sh"),
        };

        Ok(DockerJob::new(
            self.name(),
            format!(
                "{DISTRIBTEST_DOCKERFILE_ROOT}/{dockerfile_prefix}_{}_{}",
                self.docker_suffix, self.arch
            ),
            format!("test/distrib/python/{script}"),
        )
        .with_copy_rel_path(DISTRIB_COPY_REL_PATH)
        .with_timeout(PYTHON_TIMEOUT_SECONDS)
        .build())
    }
}

#[cfg(test)]
mod tests {
    use super::{PackageType, PythonDistribTest};
    use crate::error::Error;
    use crate::platform::{Arch, Platform};

    #[test]
    fn test_source_mode_jobspec() {
        let target = PythonDistribTest::new(Platform::Linux, Arch::X64, "bullseye")
            .with_package_type(PackageType::Source);
        assert_eq!(target.name(), "python_dev_linux_x64_bullseye");

        let spec = target.build_jobspec(None).unwrap();
        assert_eq!(spec.timeout_seconds, 45 * 60);
        assert_eq!(
            spec.environ.get("DOCKERFILE_DIR").map(String::as_str),
            Some("tools/dockerfile/distribtest/python_dev_bullseye_x64")
        );
        assert_eq!(
            spec.environ.get("DOCKER_RUN_SCRIPT_COMMAND").map(String::as_str),
            Some("test/distrib/python/run_source_distrib_test.sh")
        );
        assert_eq!(
            spec.environ.get("RELATIVE_COPY_PATH").map(String::as_str),
            Some("test/distrib")
        );
    }

    #[test]
    fn test_binary_mode_jobspec() {
        let target = PythonDistribTest::new(Platform::Linux, Arch::Aarch64, "alpine");
        assert_eq!(target.name(), "python_linux_aarch64_alpine");

        let spec = target.build_jobspec(None).unwrap();
        assert_eq!(
            spec.environ.get("DOCKERFILE_DIR").map(String::as_str),
            Some("tools/dockerfile/distribtest/python_alpine_aarch64")
        );
        assert_eq!(
            spec.environ.get("DOCKER_RUN_SCRIPT_COMMAND").map(String::as_str),
            Some("test/distrib/python/run_binary_distrib_test.sh")
        );
    }

    #[test]
    fn test_non_linux_is_unsupported() {
        for platform in [Platform::MacOs, Platform::Windows, Platform::LinuxGnu] {
            let err = PythonDistribTest::new(platform, Arch::X64, "bullseye")
                .build_jobspec(None)
                .unwrap_err();
            assert!(matches!(err, Error::UnsupportedPlatform { .. }));
        }
    }
}
