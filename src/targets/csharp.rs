//! C# distribution test: validates the released NuGet packages, either
//! through the modern `dotnet` CLI or the legacy toolchain.

use crate::defaults::{
    DISTRIB_COPY_REL_PATH, DISTRIBTEST_DOCKERFILE_ROOT, ENV_EXTERNAL_GIT_ROOT, ENV_SKIP_NET50,
    ENV_SKIP_NETCOREAPP21,
};
use crate::error::{Error, Result};
use crate::jobspec::{DockerJob, JobSpec, WorkspaceJob};
use crate::platform::{Arch, Platform};

/// Configuration of one C# distribtest target.
#[derive(Debug, Clone)]
pub struct CSharpDistribTest {
    platform: Platform,
    arch: Arch,
    docker_suffix: Option<String>,
    use_dotnet_cli: bool,
    presubmit: bool,
}

impl CSharpDistribTest {
    /// Create a C# target.
    pub fn new(platform: Platform, arch: Arch) -> Self {
        Self {
            platform,
            arch,
            docker_suffix: None,
            use_dotnet_cli: false,
            presubmit: false,
        }
    }

    /// Select the base-image Dockerfile variant (linux targets).
    pub fn with_docker_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.docker_suffix = Some(suffix.into());
        self
    }

    /// Exercise the package through the `dotnet` CLI.
    pub fn with_dotnet_cli(mut self) -> Self {
        self.use_dotnet_cli = true;
        self
    }

    /// Include this target in the reduced presubmit matrix.
    pub fn with_presubmit(mut self) -> Self {
        self.presubmit = true;
        self
    }

    fn script_suffix(&self) -> &'static str {
        if self.use_dotnet_cli { "_dotnetcli" } else { "" }
    }

    /// Unique target name.
    pub fn name(&self) -> String {
        let mut name = format!("csharp_{}_{}", self.platform, self.arch);
        if let Some(suffix) = &self.docker_suffix {
            name.push('_');
            name.push_str(suffix);
        }
        if self.use_dotnet_cli {
            name.push_str("_dotnetcli");
        }
        name
    }

    /// Filter labels.
    pub fn labels(&self) -> Vec<String> {
        let mut labels = vec![
            "distribtest".to_string(),
            "csharp".to_string(),
            self.platform.to_string(),
            self.arch.to_string(),
        ];
        if self.presubmit {
            labels.push("presubmit".to_string());
        }
        if let Some(suffix) = &self.docker_suffix {
            labels.push(suffix.clone());
        }
        if self.use_dotnet_cli {
            labels.push("dotnetcli".to_string());
        } else {
            labels.push("olddotnet".to_string());
        }
        labels
    }

    /// Hook for jobs that must run before the main test; none needed.
    pub fn pre_build_jobspecs(&self) -> Vec<JobSpec> {
        Vec::new()
    }

    /// Build the primary test jobspec.
    ///
    /// `inner_jobs` is accepted and discarded; there is little opportunity
    /// for parallelizing inside the distribtest.
    pub fn build_jobspec(&self, _inner_jobs: Option<u32>) -> Result<JobSpec> {
        match self.platform {
            Platform::Linux => {
                let suffix = self.docker_suffix.as_deref().ok_or_else(|| {
                    Error::MissingDockerSuffix { target: self.name() }
                })?;
                Ok(DockerJob::new(
                    self.name(),
                    format!("{DISTRIBTEST_DOCKERFILE_ROOT}/csharp_{suffix}_{}", self.arch),
                    format!(
                        "test/distrib/csharp/run_distrib_test{}.sh",
                        self.script_suffix()
                    ),
                )
                .with_copy_rel_path(DISTRIB_COPY_REL_PATH)
                .build())
            }
            Platform::MacOs => Ok(WorkspaceJob::new(
                self.name(),
                vec![format!(
                    "test/distrib/csharp/run_distrib_test{}.sh",
                    self.script_suffix()
                )],
            )
            .with_env(ENV_EXTERNAL_GIT_ROOT, "../../../..")
            // runtimes unavailable on the macos workers
            .with_env(ENV_SKIP_NETCOREAPP21, "1")
            .with_env(ENV_SKIP_NET50, "1")
            .with_workspace()
            .build()),
            // The windows run stays disabled upstream; the target remains
            // constructible so re-enabling is a catalog-only change.
            Platform::Windows => Ok(WorkspaceJob::new(
                self.name(),
                vec![
                    "bash".to_string(),
                    "tools/run_tests/artifacts/run_distribtest_csharp.sh".to_string(),
                ],
            )
            .with_workspace()
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
    use super::CSharpDistribTest;
    use crate::error::Error;
    use crate::platform::{Arch, Platform};

    #[test]
    fn test_linux_dotnetcli_jobspec() {
        let target = CSharpDistribTest::new(Platform::Linux, Arch::X64)
            .with_docker_suffix("alpine")
            .with_dotnet_cli();
        assert_eq!(target.name(), "csharp_linux_x64_alpine_dotnetcli");

        let spec = target.build_jobspec(None).unwrap();
        assert_eq!(
            spec.environ.get("DOCKER_RUN_SCRIPT_COMMAND").map(String::as_str),
            Some("test/distrib/csharp/run_distrib_test_dotnetcli.sh")
        );
        assert_eq!(
            spec.environ.get("DOCKERFILE_DIR").map(String::as_str),
            Some("tools/dockerfile/distribtest/csharp_alpine_x64")
        );
        assert_eq!(
            spec.environ.get("RELATIVE_COPY_PATH").map(String::as_str),
            Some("test/distrib")
        );
    }

    #[test]
    fn test_linux_legacy_script_has_no_suffix() {
        let spec = CSharpDistribTest::new(Platform::Linux, Arch::X64)
            .with_docker_suffix("debian11")
            .build_jobspec(None)
            .unwrap();
        assert_eq!(
            spec.environ.get("DOCKER_RUN_SCRIPT_COMMAND").map(String::as_str),
            Some("test/distrib/csharp/run_distrib_test.sh")
        );
    }

    #[test]
    fn test_macos_workspace_jobspec() {
        let spec = CSharpDistribTest::new(Platform::MacOs, Arch::X64)
            .with_dotnet_cli()
            .build_jobspec(None)
            .unwrap();
        assert_eq!(
            spec.environ.get("EXTERNAL_GIT_ROOT").map(String::as_str),
            Some("../../../..")
        );
        assert_eq!(spec.environ.get("SKIP_NETCOREAPP21_DISTRIBTEST").map(String::as_str), Some("1"));
        assert_eq!(spec.environ.get("SKIP_NET50_DISTRIBTEST").map(String::as_str), Some("1"));
        assert_eq!(
            spec.environ.get("WORKSPACE_NAME").map(String::as_str),
            Some("workspace_csharp_macos_x64_dotnetcli")
        );
        assert_eq!(spec.cmdline[0], "bash");
        assert_eq!(spec.cmdline[1], "tools/run_tests/artifacts/run_in_workspace.sh");
    }

    #[test]
    fn test_windows_workspace_jobspec() {
        let spec = CSharpDistribTest::new(Platform::Windows, Arch::X64)
            .build_jobspec(None)
            .unwrap();
        assert!(
            spec.cmdline
                .contains(&"tools/run_tests/artifacts/run_distribtest_csharp.sh".to_string())
        );
        assert!(spec.environ.contains_key("WORKSPACE_NAME"));
    }

    #[test]
    fn test_libc_flavored_linux_is_unsupported() {
        let err = CSharpDistribTest::new(Platform::LinuxMusl, Arch::X64)
            .build_jobspec(None)
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedPlatform { .. }));
    }

    #[test]
    fn test_labels_mark_the_toolchain() {
        let labels = CSharpDistribTest::new(Platform::Linux, Arch::X64)
            .with_docker_suffix("alpine")
            .with_dotnet_cli()
            .labels();
        assert!(labels.contains(&"dotnetcli".to_string()));

        let labels = CSharpDistribTest::new(Platform::Windows, Arch::X86).labels();
        assert!(labels.contains(&"olddotnet".to_string()));
    }
}
