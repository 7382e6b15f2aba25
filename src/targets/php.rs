//! PHP8 distribution test: validates the released PECL/composer package
//! on linux (containerized) and macos (native workspace).

use crate::defaults::{
    DISTRIB_COPY_REL_PATH, DISTRIBTEST_DOCKERFILE_ROOT, ENV_EXTERNAL_GIT_ROOT,
    PHP_MACOS_TIMEOUT_SECONDS,
};
use crate::error::{Error, Result};
use crate::jobspec::{DockerJob, JobSpec, WorkspaceJob};
use crate::platform::{Arch, Platform};

/// Configuration of one PHP8 distribtest target.
#[derive(Debug, Clone)]
pub struct Php8DistribTest {
    platform: Platform,
    arch: Arch,
    docker_suffix: Option<String>,
    presubmit: bool,
}

impl Php8DistribTest {
    /// Create a PHP8 target.
    pub fn new(platform: Platform, arch: Arch) -> Self {
        Self {
            platform,
            arch,
            docker_suffix: None,
            presubmit: false,
        }
    }

    /// Select the base-image Dockerfile variant (linux targets).
    pub fn with_docker_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.docker_suffix = Some(suffix.into());
        self
    }

    /// Include this target in the reduced presubmit matrix.
    pub fn with_presubmit(mut self) -> Self {
        self.presubmit = true;
        self
    }

    /// Unique target name.
    pub fn name(&self) -> String {
        let mut name = format!("php8_{}_{}", self.platform, self.arch);
        if let Some(suffix) = &self.docker_suffix {
            name.push('_');
            name.push_str(suffix);
        }
        name
    }

    /// Filter labels; tagged both `php` and `php8` so either selects it.
    pub fn labels(&self) -> Vec<String> {
        let mut labels = vec![
            "distribtest".to_string(),
            "php".to_string(),
            "php8".to_string(),
            self.platform.to_string(),
            self.arch.to_string(),
        ];
        if self.presubmit {
            labels.push("presubmit".to_string());
        }
        if let Some(suffix) = &self.docker_suffix {
            labels.push(suffix.clone());
        }
        labels
    }

    /// Hook for jobs that must run before the main test; none needed.
    pub fn pre_build_jobspecs(&self) -> Vec<JobSpec> {
        Vec::new()
    }

    /// Build the primary test jobspec.
    ///
    /// `inner_jobs` is accepted and discarded; the package install has
    /// nothing to parallelize.
    pub fn build_jobspec(&self, _inner_jobs: Option<u32>) -> Result<JobSpec> {
        match self.platform {
            Platform::Linux => {
                let suffix = self.docker_suffix.as_deref().ok_or_else(|| {
                    Error::MissingDockerSuffix { target: self.name() }
                })?;
                Ok(DockerJob::new(
                    self.name(),
                    format!("{DISTRIBTEST_DOCKERFILE_ROOT}/php8_{suffix}_{}", self.arch),
                    "test/distrib/php/run_distrib_test.sh",
                )
                .with_copy_rel_path(DISTRIB_COPY_REL_PATH)
                .build())
            }
            Platform::MacOs => Ok(WorkspaceJob::new(
                self.name(),
                vec!["test/distrib/php/run_distrib_test_macos.sh".to_string()],
            )
            .with_env(ENV_EXTERNAL_GIT_ROOT, "../../../..")
            .with_workspace()
            .with_timeout(PHP_MACOS_TIMEOUT_SECONDS)
            .build()),
            platform => Err(Error::UnsupportedPlatform {
                target: self.name(),
                platform,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Php8DistribTest;
    use crate::error::Error;
    use crate::platform::{Arch, Platform};

    #[test]
    fn test_linux_docker_jobspec() {
        let target = Php8DistribTest::new(Platform::Linux, Arch::X64)
            .with_docker_suffix("debian12");
        assert_eq!(target.name(), "php8_linux_x64_debian12");

        let spec = target.build_jobspec(None).unwrap();
        assert_eq!(
            spec.environ.get("DOCKERFILE_DIR").map(String::as_str),
            Some("tools/dockerfile/distribtest/php8_debian12_x64")
        );
        assert_eq!(
            spec.environ.get("DOCKER_RUN_SCRIPT_COMMAND").map(String::as_str),
            Some("test/distrib/php/run_distrib_test.sh")
        );
        assert_eq!(
            spec.environ.get("RELATIVE_COPY_PATH").map(String::as_str),
            Some("test/distrib")
        );
    }

    #[test]
    fn test_macos_workspace_jobspec() {
        let spec = Php8DistribTest::new(Platform::MacOs, Arch::X64)
            .build_jobspec(None)
            .unwrap();
        assert_eq!(spec.timeout_seconds, 30 * 60);
        assert_eq!(
            spec.environ.get("EXTERNAL_GIT_ROOT").map(String::as_str),
            Some("../../../..")
        );
        assert_eq!(
            spec.environ.get("WORKSPACE_NAME").map(String::as_str),
            Some("workspace_php8_macos_x64")
        );
        assert!(
            spec.cmdline
                .contains(&"test/distrib/php/run_distrib_test_macos.sh".to_string())
        );
    }

    #[test]
    fn test_other_platforms_are_unsupported() {
        for platform in [Platform::Windows, Platform::LinuxGnu, Platform::LinuxMusl] {
            let err = Php8DistribTest::new(platform, Arch::X64)
                .build_jobspec(None)
                .unwrap_err();
            assert!(matches!(err, Error::UnsupportedPlatform { .. }));
        }
    }

    #[test]
    fn test_labels_carry_both_php_tags() {
        let labels = Php8DistribTest::new(Platform::Linux, Arch::X64)
            .with_docker_suffix("debian12")
            .labels();
        assert!(labels.contains(&"php".to_string()));
        assert!(labels.contains(&"php8".to_string()));
    }
}
