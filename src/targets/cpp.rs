//! C++ distribution test: validates `make install` / cmake packages by
//! building the named example testcase against the installed library.

use crate::defaults::{
    CPP_BUILD_TIMEOUT_SECONDS, DISTRIBTEST_DOCKERFILE_ROOT, ENV_CPP_COMPILER_JOBS,
};
use crate::error::{Error, Result};
use crate::jobspec::{DockerJob, JobSpec, WorkspaceJob};
use crate::platform::{Arch, Platform};
use std::collections::BTreeMap;

/// Configuration of one C++ distribtest target.
#[derive(Debug, Clone)]
pub struct CppDistribTest {
    platform: Platform,
    arch: Arch,
    testcase: String,
    docker_suffix: Option<String>,
    presubmit: bool,
}

impl CppDistribTest {
    /// Create a C++ target for the given testcase script.
    pub fn new(platform: Platform, arch: Arch, testcase: impl Into<String>) -> Self {
        Self {
            platform,
            arch,
            testcase: testcase.into(),
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
        let mut name = format!("cpp_{}_{}", self.platform, self.arch);
        if let Some(suffix) = &self.docker_suffix {
            name.push('_');
            name.push_str(suffix);
        }
        name.push('_');
        name.push_str(&self.testcase);
        name
    }

    /// Filter labels.
    pub fn labels(&self) -> Vec<String> {
        let mut labels = vec![
            "distribtest".to_string(),
            "cpp".to_string(),
            self.platform.to_string(),
            self.arch.to_string(),
            self.testcase.clone(),
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
    pub fn build_jobspec(&self, inner_jobs: Option<u32>) -> Result<JobSpec> {
        let mut environ = BTreeMap::new();
        if let Some(jobs) = inner_jobs {
            // parallelism of the C++ build inside the test
            environ.insert(ENV_CPP_COMPILER_JOBS.to_string(), jobs.to_string());
        }

        match self.platform {
            Platform::Linux => {
                let suffix = self.docker_suffix.as_deref().ok_or_else(|| {
                    Error::MissingDockerSuffix { target: self.name() }
                })?;
                Ok(DockerJob::new(
                    self.name(),
                    format!("{DISTRIBTEST_DOCKERFILE_ROOT}/cpp_{suffix}_{}", self.arch),
                    format!("test/distrib/cpp/run_distrib_test_{}.sh", self.testcase),
                )
                .with_environ(environ)
                .with_timeout(CPP_BUILD_TIMEOUT_SECONDS)
                .build())
            }
            Platform::Windows => {
                // the windows branch does not honor inner_jobs
                Ok(WorkspaceJob::new(
                    self.name(),
                    vec![format!(
                        "test\\distrib\\cpp\\run_distrib_test_{}.bat",
                        self.testcase
                    )],
                )
                .with_workspace()
                .with_timeout(CPP_BUILD_TIMEOUT_SECONDS)
                .build())
            }
            platform => Err(Error::UnsupportedPlatform {
                target: self.name(),
                platform,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CppDistribTest;
    use crate::error::Error;
    use crate::platform::{Arch, Platform};

    #[test]
    fn test_linux_docker_jobspec() {
        let target = CppDistribTest::new(Platform::Linux, Arch::X64, "cmake")
            .with_docker_suffix("debian11");
        assert_eq!(target.name(), "cpp_linux_x64_debian11_cmake");

        let spec = target.build_jobspec(None).unwrap();
        assert_eq!(spec.shortname, "distribtest.cpp_linux_x64_debian11_cmake");
        assert_eq!(spec.timeout_seconds, 2 * 60 * 60);
        assert_eq!(
            spec.environ.get("DOCKERFILE_DIR").map(String::as_str),
            Some("tools/dockerfile/distribtest/cpp_debian11_x64")
        );
        assert_eq!(
            spec.environ.get("DOCKER_RUN_SCRIPT_COMMAND").map(String::as_str),
            Some("test/distrib/cpp/run_distrib_test_cmake.sh")
        );
        // C++ builds against the whole tree, so the repo is fully cloned
        assert!(!spec.environ.contains_key("RELATIVE_COPY_PATH"));
    }

    #[test]
    fn test_linux_honors_inner_jobs() {
        let spec = CppDistribTest::new(Platform::Linux, Arch::X64, "cmake")
            .with_docker_suffix("debian11")
            .build_jobspec(Some(4))
            .unwrap();
        assert_eq!(
            spec.environ
                .get("GRPC_CPP_DISTRIBTEST_BUILD_COMPILER_JOBS")
                .map(String::as_str),
            Some("4")
        );
        assert!(
            spec.cmdline
                .contains(&"GRPC_CPP_DISTRIBTEST_BUILD_COMPILER_JOBS=4".to_string())
        );
    }

    #[test]
    fn test_windows_ignores_inner_jobs() {
        let target = CppDistribTest::new(Platform::Windows, Arch::X86, "cmake");
        let spec = target.build_jobspec(Some(4)).unwrap();
        assert_eq!(spec.shortname, "distribtest.cpp_windows_x86_cmake");
        assert!(
            spec.cmdline
                .contains(&"test\\distrib\\cpp\\run_distrib_test_cmake.bat".to_string())
        );
        assert_eq!(
            spec.environ.get("WORKSPACE_NAME").map(String::as_str),
            Some("workspace_cpp_windows_x86_cmake")
        );
        assert!(!spec.environ.contains_key("GRPC_CPP_DISTRIBTEST_BUILD_COMPILER_JOBS"));
        assert_eq!(spec.timeout_seconds, 2 * 60 * 60);
    }

    #[test]
    fn test_macos_is_unsupported() {
        let target = CppDistribTest::new(Platform::MacOs, Arch::X64, "cmake");
        let err = target.build_jobspec(None).unwrap_err();
        assert_eq!(
            err,
            Error::UnsupportedPlatform {
                target: "cpp_macos_x64_cmake".to_string(),
                platform: Platform::MacOs,
            }
        );
    }

    #[test]
    fn test_linux_without_suffix_is_rejected() {
        let target = CppDistribTest::new(Platform::Linux, Arch::X64, "cmake");
        assert!(matches!(
            target.build_jobspec(None),
            Err(Error::MissingDockerSuffix { .. })
        ));
    }

    #[test]
    fn test_labels() {
        let labels = CppDistribTest::new(Platform::Linux, Arch::X64, "cmake")
            .with_docker_suffix("debian11")
            .with_presubmit()
            .labels();
        assert_eq!(labels, vec!["distribtest", "cpp", "linux", "x64", "cmake", "presubmit", "debian11"]);
    }
}
