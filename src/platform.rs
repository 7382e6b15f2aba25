//! Platform and architecture identifiers for distribution tests

use std::fmt;

/// Operating system a distribution test runs on.
///
/// Ruby gems are platform-specific down to the libc flavor, so linux is
/// split into [`Platform::LinuxGnu`] and [`Platform::LinuxMusl`] for that
/// ecosystem; every other ecosystem uses the plain [`Platform::Linux`]
/// value. Each target variant supports its own subset of these values and
/// rejects the rest at jobspec-build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Linux, libc flavor irrelevant
    Linux,
    /// Linux with glibc (Ruby only)
    LinuxGnu,
    /// Linux with musl libc (Ruby only)
    LinuxMusl,
    /// macOS
    MacOs,
    /// Windows
    Windows,
}

impl Platform {
    /// Label used for matrix filtering; the libc flavors collapse to
    /// plain `linux` so a single label selects every linux target.
    pub fn label(&self) -> &'static str {
        match self {
            Platform::Linux | Platform::LinuxGnu | Platform::LinuxMusl => "linux",
            Platform::MacOs => "macos",
            Platform::Windows => "windows",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Linux => "linux",
            Platform::LinuxGnu => "linux-gnu",
            Platform::LinuxMusl => "linux-musl",
            Platform::MacOs => "macos",
            Platform::Windows => "windows",
        };
        f.write_str(name)
    }
}

/// CPU architecture of the environment the released package is tested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    /// 64-bit x86
    X64,
    /// 32-bit x86
    X86,
    /// 64-bit ARM
    Aarch64,
}

impl Arch {
    /// Rubygems platform string for this architecture.
    ///
    /// Returns `None` for architectures the ruby distribtest has no gem
    /// mapping for; callers must treat that as a fatal configuration error.
    pub fn gem_arch(&self) -> Option<&'static str> {
        match self {
            Arch::X64 => Some("x86_64"),
            Arch::X86 => Some("x86"),
            Arch::Aarch64 => None,
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Arch::X64 => "x64",
            Arch::X86 => "x86",
            Arch::Aarch64 => "aarch64",
        };
        f.write_str(name)
    }
}
