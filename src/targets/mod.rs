//! Test target variants and the release test matrix
//!
//! One variant per package ecosystem. Each is a small configuration struct
//! built from static literals at catalog time, exposing the uniform
//! contract the external driver consumes: a unique name, filter labels,
//! optional pre-build steps, and the primary jobspec.

pub mod cpp;
pub mod csharp;
pub mod php;
pub mod python;
pub mod ruby;

pub use cpp::CppDistribTest;
pub use csharp::CSharpDistribTest;
pub use php::Php8DistribTest;
pub use python::PythonDistribTest;
pub use ruby::RubyDistribTest;

use crate::error::Result;
use crate::jobspec::JobSpec;
use crate::platform::{Arch, Platform};
use std::fmt;

/// Kind of release package a distribtest exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageType {
    /// Build the package from a source distribution
    Source,
    /// Install a prebuilt binary package
    Binary,
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageType::Source => f.write_str("source"),
            PackageType::Binary => f.write_str("binary"),
        }
    }
}

/// One entry of the release test matrix.
#[derive(Debug, Clone)]
pub enum DistribTest {
    /// C++ make/cmake install test
    Cpp(CppDistribTest),
    /// C# NuGet package test
    CSharp(CSharpDistribTest),
    /// Python wheel/sdist test
    Python(PythonDistribTest),
    /// Ruby gem test
    Ruby(RubyDistribTest),
    /// PHP8 package test
    Php8(Php8DistribTest),
}

impl DistribTest {
    /// Unique name of the target, derived from its identity attributes.
    pub fn name(&self) -> String {
        match self {
            DistribTest::Cpp(t) => t.name(),
            DistribTest::CSharp(t) => t.name(),
            DistribTest::Python(t) => t.name(),
            DistribTest::Ruby(t) => t.name(),
            DistribTest::Php8(t) => t.name(),
        }
    }

    /// Tags the external driver filters on (`presubmit` and friends).
    pub fn labels(&self) -> Vec<String> {
        match self {
            DistribTest::Cpp(t) => t.labels(),
            DistribTest::CSharp(t) => t.labels(),
            DistribTest::Python(t) => t.labels(),
            DistribTest::Ruby(t) => t.labels(),
            DistribTest::Php8(t) => t.labels(),
        }
    }

    /// Jobspecs that must run before the main test job.
    pub fn pre_build_jobspecs(&self) -> Vec<JobSpec> {
        match self {
            DistribTest::Cpp(t) => t.pre_build_jobspecs(),
            DistribTest::CSharp(t) => t.pre_build_jobspecs(),
            DistribTest::Python(t) => t.pre_build_jobspecs(),
            DistribTest::Ruby(t) => t.pre_build_jobspecs(),
            DistribTest::Php8(t) => t.pre_build_jobspecs(),
        }
    }

    /// Build the primary test jobspec.
    ///
    /// `inner_jobs` configures build parallelism inside the test; only the
    /// C++ linux branch honors it, the other variants accept and discard
    /// the value.
    pub fn build_jobspec(&self, inner_jobs: Option<u32>) -> Result<JobSpec> {
        match self {
            DistribTest::Cpp(t) => t.build_jobspec(inner_jobs),
            DistribTest::CSharp(t) => t.build_jobspec(inner_jobs),
            DistribTest::Python(t) => t.build_jobspec(inner_jobs),
            DistribTest::Ruby(t) => t.build_jobspec(inner_jobs),
            DistribTest::Php8(t) => t.build_jobspec(inner_jobs),
        }
    }
}

impl fmt::Display for DistribTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl From<CppDistribTest> for DistribTest {
    fn from(t: CppDistribTest) -> Self {
        DistribTest::Cpp(t)
    }
}

impl From<CSharpDistribTest> for DistribTest {
    fn from(t: CSharpDistribTest) -> Self {
        DistribTest::CSharp(t)
    }
}

impl From<PythonDistribTest> for DistribTest {
    fn from(t: PythonDistribTest) -> Self {
        DistribTest::Python(t)
    }
}

impl From<RubyDistribTest> for DistribTest {
    fn from(t: RubyDistribTest) -> Self {
        DistribTest::Ruby(t)
    }
}

impl From<Php8DistribTest> for DistribTest {
    fn from(t: Php8DistribTest) -> Self {
        DistribTest::Php8(t)
    }
}

/// Full ordered release test matrix.
///
/// Order only affects reporting; every target is independent. The list is
/// rebuilt from literals on every call, so repeated generation yields
/// field-wise identical jobspecs.
pub fn targets() -> Vec<DistribTest> {
    vec![
        // C++
        // Placeholder testcase so the standalone C++ presubmit run is
        // never an empty set of tasks.
        CppDistribTest::new(Platform::Linux, Arch::X64, "dummy")
            .with_docker_suffix("debian11")
            .with_presubmit()
            .into(),
        CppDistribTest::new(Platform::Linux, Arch::X64, "cmake")
            .with_docker_suffix("debian11")
            .into(),
        CppDistribTest::new(Platform::Linux, Arch::X64, "cmake_as_submodule")
            .with_docker_suffix("debian11")
            .into(),
        CppDistribTest::new(Platform::Linux, Arch::X64, "cmake_as_externalproject")
            .with_docker_suffix("debian11")
            .into(),
        CppDistribTest::new(Platform::Linux, Arch::X64, "cmake_fetchcontent")
            .with_docker_suffix("debian11")
            .into(),
        CppDistribTest::new(Platform::Linux, Arch::X64, "cmake_module_install")
            .with_docker_suffix("debian11")
            .into(),
        CppDistribTest::new(Platform::Linux, Arch::X64, "cmake_pkgconfig")
            .with_docker_suffix("debian11")
            .into(),
        CppDistribTest::new(Platform::Linux, Arch::X64, "cmake_aarch64_cross")
            .with_docker_suffix("debian11_aarch64_cross")
            .into(),
        CppDistribTest::new(Platform::Windows, Arch::X86, "cmake")
            .with_presubmit()
            .into(),
        CppDistribTest::new(Platform::Windows, Arch::X86, "cmake_as_externalproject")
            .with_presubmit()
            .into(),
        CppDistribTest::new(Platform::Windows, Arch::X86, "cmake_for_dll")
            .with_presubmit()
            .into(),
        // C#
        CSharpDistribTest::new(Platform::Linux, Arch::X64)
            .with_docker_suffix("debian11")
            .with_dotnet_cli()
            .with_presubmit()
            .into(),
        CSharpDistribTest::new(Platform::Linux, Arch::X64)
            .with_docker_suffix("ubuntu2204")
            .with_dotnet_cli()
            .into(),
        CSharpDistribTest::new(Platform::Linux, Arch::X64)
            .with_docker_suffix("alpine")
            .with_dotnet_cli()
            .with_presubmit()
            .into(),
        CSharpDistribTest::new(Platform::Linux, Arch::X64)
            .with_docker_suffix("dotnet31")
            .with_dotnet_cli()
            .with_presubmit()
            .into(),
        CSharpDistribTest::new(Platform::Linux, Arch::X64)
            .with_docker_suffix("dotnet5")
            .with_dotnet_cli()
            .with_presubmit()
            .into(),
        CSharpDistribTest::new(Platform::MacOs, Arch::X64)
            .with_dotnet_cli()
            .with_presubmit()
            .into(),
        CSharpDistribTest::new(Platform::Windows, Arch::X86)
            .with_presubmit()
            .into(),
        CSharpDistribTest::new(Platform::Windows, Arch::X64)
            .with_presubmit()
            .into(),
        // Python
        PythonDistribTest::new(Platform::Linux, Arch::X64, "bullseye")
            .with_presubmit()
            .into(),
        PythonDistribTest::new(Platform::Linux, Arch::X86, "bullseye")
            .with_presubmit()
            .into(),
        PythonDistribTest::new(Platform::Linux, Arch::X64, "fedora40").into(),
        PythonDistribTest::new(Platform::Linux, Arch::X64, "arch").into(),
        PythonDistribTest::new(Platform::Linux, Arch::X64, "alpine").into(),
        PythonDistribTest::new(Platform::Linux, Arch::X64, "ubuntu2404").into(),
        PythonDistribTest::new(Platform::Linux, Arch::Aarch64, "python39_buster")
            .with_presubmit()
            .into(),
        PythonDistribTest::new(Platform::Linux, Arch::Aarch64, "alpine")
            .with_presubmit()
            .into(),
        PythonDistribTest::new(Platform::Linux, Arch::X64, "alpine3.18")
            .with_package_type(PackageType::Source)
            .with_presubmit()
            .into(),
        PythonDistribTest::new(Platform::Linux, Arch::X64, "bullseye")
            .with_package_type(PackageType::Source)
            .with_presubmit()
            .into(),
        PythonDistribTest::new(Platform::Linux, Arch::X86, "bullseye")
            .with_package_type(PackageType::Source)
            .with_presubmit()
            .into(),
        PythonDistribTest::new(Platform::Linux, Arch::X64, "fedora40")
            .with_package_type(PackageType::Source)
            .into(),
        PythonDistribTest::new(Platform::Linux, Arch::X64, "arch")
            .with_package_type(PackageType::Source)
            .into(),
        PythonDistribTest::new(Platform::Linux, Arch::X64, "ubuntu2404")
            .with_package_type(PackageType::Source)
            .into(),
        // Ruby
        RubyDistribTest::new(Platform::LinuxGnu, Arch::X64, "debian11")
            .with_ruby_version("ruby_3_2")
            .with_package_type(PackageType::Source)
            .with_presubmit()
            .into(),
        RubyDistribTest::new(Platform::LinuxGnu, Arch::X64, "debian11")
            .with_ruby_version("ruby_3_1")
            .with_presubmit()
            .into(),
        RubyDistribTest::new(Platform::LinuxGnu, Arch::X64, "debian11")
            .with_ruby_version("ruby_3_2")
            .with_presubmit()
            .into(),
        RubyDistribTest::new(Platform::LinuxGnu, Arch::X64, "debian11")
            .with_ruby_version("ruby_3_3")
            .with_presubmit()
            .into(),
        RubyDistribTest::new(Platform::LinuxGnu, Arch::X64, "debian11")
            .with_ruby_version("ruby_3_3")
            .with_protobuf_version("3.25")
            .with_presubmit()
            .into(),
        RubyDistribTest::new(Platform::LinuxGnu, Arch::X64, "debian11")
            .with_ruby_version("ruby_3_4")
            .with_presubmit()
            .into(),
        RubyDistribTest::new(Platform::LinuxGnu, Arch::X64, "ubuntu2204")
            .with_presubmit()
            .into(),
        RubyDistribTest::new(Platform::LinuxGnu, Arch::X64, "ubuntu2404")
            .with_presubmit()
            .into(),
        RubyDistribTest::new(Platform::LinuxMusl, Arch::X64, "alpine")
            .with_ruby_version("ruby_3_1")
            .with_presubmit()
            .into(),
        RubyDistribTest::new(Platform::LinuxMusl, Arch::X64, "alpine")
            .with_ruby_version("ruby_3_2")
            .with_presubmit()
            .into(),
        RubyDistribTest::new(Platform::LinuxMusl, Arch::X64, "alpine")
            .with_ruby_version("ruby_3_3")
            .with_presubmit()
            .into(),
        RubyDistribTest::new(Platform::LinuxMusl, Arch::X64, "alpine")
            .with_ruby_version("ruby_3_4")
            .with_presubmit()
            .into(),
        // PHP8
        Php8DistribTest::new(Platform::Linux, Arch::X64)
            .with_docker_suffix("debian12")
            .with_presubmit()
            .into(),
        Php8DistribTest::new(Platform::MacOs, Arch::X64)
            .with_presubmit()
            .into(),
    ]
}

#[cfg(test)]
mod tests {
    use super::{DistribTest, targets};
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique() {
        let catalog = targets();
        let names: HashSet<String> = catalog.iter().map(DistribTest::name).collect();
        assert_eq!(names.len(), catalog.len());
    }

    #[test]
    fn test_every_target_builds() {
        for target in &targets() {
            let spec = target.build_jobspec(None);
            assert!(spec.is_ok(), "target {target} failed: {:?}", spec.err());
            assert!(target.build_jobspec(Some(8)).is_ok());
        }
    }

    #[test]
    fn test_catalog_is_idempotent() {
        let first = targets();
        let second = targets();
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.name(), b.name());
            assert_eq!(a.labels(), b.labels());
            assert_eq!(a.build_jobspec(None), b.build_jobspec(None));
            assert_eq!(a.build_jobspec(Some(4)), b.build_jobspec(Some(4)));
        }
    }

    #[test]
    fn test_shortname_follows_target_name() {
        for target in &targets() {
            let spec = target.build_jobspec(None).unwrap();
            assert_eq!(spec.shortname, format!("distribtest.{}", target.name()));
        }
    }

    #[test]
    fn test_labels_carry_the_common_tags() {
        for target in &targets() {
            let labels = target.labels();
            assert!(labels.contains(&"distribtest".to_string()), "{target}");
        }
    }

    #[test]
    fn test_presubmit_subset_is_nonempty() {
        let presubmit = targets()
            .iter()
            .filter(|t| t.labels().contains(&"presubmit".to_string()))
            .count();
        assert!(presubmit > 0);
    }

    #[test]
    fn test_no_pre_build_steps_today() {
        for target in &targets() {
            assert!(target.pre_build_jobspecs().is_empty());
        }
    }

    #[test]
    fn test_display_matches_name() {
        for target in &targets() {
            assert_eq!(target.to_string(), target.name());
        }
    }
}
