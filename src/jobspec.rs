//! Jobspec value and the docker/workspace jobspec builders
//!
//! A [`JobSpec`] is the contract consumed by the external execution engine:
//! command line, environment, timeout and retry policy. The builders here
//! only assemble data; nothing is executed and no path is validated.

use crate::defaults::{
    DEFAULT_DOCKER_TIMEOUT_SECONDS, DEFAULT_NATIVE_TIMEOUT_SECONDS, DOCKER_BUILD_AND_RUN_SCRIPT,
    DOCKER_RUN_SCRIPT, ENV_DOCKER_RUN_SCRIPT, ENV_DOCKER_RUN_SCRIPT_COMMAND, ENV_DOCKERFILE_DIR,
    ENV_RELATIVE_COPY_PATH, ENV_WORKSPACE_NAME, SHORTNAME_PREFIX, WORKSPACE_NAME_PREFIX,
    WORKSPACE_WRAPPER_SCRIPT,
};
use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;

/// Declarative description of one runnable unit of work.
///
/// Immutable once built. Safe to hand to any number of concurrent workers:
/// the builders own their environment maps, so no jobspec aliases state
/// shared with another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobSpec {
    /// Argv to execute, or a single shell string when `shell` is set
    pub cmdline: Vec<String>,
    /// Environment for the job process; keys unique, iteration ordered
    pub environ: BTreeMap<String, String>,
    /// Unique identifier within one catalog run, `distribtest.<target-name>`
    pub shortname: String,
    /// Hard wall-clock limit enforced by the execution engine
    pub timeout_seconds: u32,
    /// Re-run budget for flaky failures, interpreted by the engine
    pub flake_retries: u32,
    /// Re-run budget for timeouts, interpreted by the engine
    pub timeout_retries: u32,
    /// Interpret `cmdline` through a shell instead of exec'ing directly
    pub shell: bool,
}

/// Assembles a [`JobSpec`] for a task running under docker.
///
/// The actual docker invocation is wrapped in a fixed driver script; the
/// Dockerfile directory, the in-container run script and the shell command
/// reach the driver as environment variables, so the same builder serves
/// every ecosystem without bespoke argument parsing in the driver.
#[derive(Debug, Clone)]
pub struct DockerJob {
    name: String,
    dockerfile_dir: String,
    shell_command: String,
    environ: BTreeMap<String, String>,
    flake_retries: u32,
    timeout_retries: u32,
    copy_rel_path: Option<String>,
    timeout_seconds: u32,
}

impl DockerJob {
    /// Create a docker job builder with default timeout and no retries.
    pub fn new(
        name: impl Into<String>,
        dockerfile_dir: impl Into<String>,
        shell_command: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            dockerfile_dir: dockerfile_dir.into(),
            shell_command: shell_command.into(),
            environ: BTreeMap::new(),
            flake_retries: 0,
            timeout_retries: 0,
            copy_rel_path: None,
            timeout_seconds: DEFAULT_DOCKER_TIMEOUT_SECONDS,
        }
    }

    /// Replace the per-job environment. The builder owns the map; later
    /// mutation of whatever the caller built it from cannot leak in.
    pub fn with_environ(mut self, environ: BTreeMap<String, String>) -> Self {
        self.environ = environ;
        self
    }

    /// Add a single environment variable.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environ.insert(key.into(), value.into());
        self
    }

    /// Copy only this repository subtree into the container. Without a
    /// copy path the driver clones the entire repository.
    pub fn with_copy_rel_path(mut self, path: impl Into<String>) -> Self {
        self.copy_rel_path = Some(path.into());
        self
    }

    /// Set retry budgets passed through to the execution engine.
    pub fn with_retries(mut self, flake_retries: u32, timeout_retries: u32) -> Self {
        self.flake_retries = flake_retries;
        self.timeout_retries = timeout_retries;
        self
    }

    /// Override the default 30 minute timeout.
    pub fn with_timeout(mut self, timeout_seconds: u32) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Assemble the jobspec.
    pub fn build(self) -> JobSpec {
        let mut environ = self.environ;
        // the entire repo is cloned into the container if no copy path is set
        if let Some(path) = self.copy_rel_path {
            environ.insert(ENV_RELATIVE_COPY_PATH.to_string(), path);
        }

        // forward the per-job environment into the container
        let mut cmdline = vec![DOCKER_BUILD_AND_RUN_SCRIPT.to_string()];
        for (key, value) in &environ {
            cmdline.push("-e".to_string());
            cmdline.push(format!("{key}={value}"));
        }

        // the driver consumes these three from its own environment
        environ.insert(ENV_DOCKERFILE_DIR.to_string(), self.dockerfile_dir);
        environ.insert(ENV_DOCKER_RUN_SCRIPT.to_string(), DOCKER_RUN_SCRIPT.to_string());
        environ.insert(ENV_DOCKER_RUN_SCRIPT_COMMAND.to_string(), self.shell_command);

        let shortname = format!("{SHORTNAME_PREFIX}.{}", self.name);
        debug!("assembled docker jobspec: {shortname}");

        JobSpec {
            cmdline,
            environ,
            shortname,
            timeout_seconds: self.timeout_seconds,
            flake_retries: self.flake_retries,
            timeout_retries: self.timeout_retries,
            shell: false,
        }
    }
}

/// Assembles a [`JobSpec`] for a task running natively on the host,
/// optionally inside an isolated workspace checkout so concurrent runs do
/// not collide.
#[derive(Debug, Clone)]
pub struct WorkspaceJob {
    name: String,
    cmdline: Vec<String>,
    environ: BTreeMap<String, String>,
    shell: bool,
    flake_retries: u32,
    timeout_retries: u32,
    use_workspace: bool,
    timeout_seconds: u32,
}

impl WorkspaceJob {
    /// Create a native job builder with default timeout and no retries.
    pub fn new(name: impl Into<String>, cmdline: Vec<String>) -> Self {
        Self {
            name: name.into(),
            cmdline,
            environ: BTreeMap::new(),
            shell: false,
            flake_retries: 0,
            timeout_retries: 0,
            use_workspace: false,
            timeout_seconds: DEFAULT_NATIVE_TIMEOUT_SECONDS,
        }
    }

    /// Replace the per-job environment. The builder owns the map.
    pub fn with_environ(mut self, environ: BTreeMap<String, String>) -> Self {
        self.environ = environ;
        self
    }

    /// Add a single environment variable.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environ.insert(key.into(), value.into());
        self
    }

    /// Interpret the command line through a shell.
    pub fn with_shell(mut self) -> Self {
        self.shell = true;
        self
    }

    /// Set retry budgets passed through to the execution engine.
    pub fn with_retries(mut self, flake_retries: u32, timeout_retries: u32) -> Self {
        self.flake_retries = flake_retries;
        self.timeout_retries = timeout_retries;
        self
    }

    /// Run inside a private workspace checkout named after the job.
    pub fn with_workspace(mut self) -> Self {
        self.use_workspace = true;
        self
    }

    /// Override the default 10 minute timeout.
    pub fn with_timeout(mut self, timeout_seconds: u32) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Assemble the jobspec.
    pub fn build(self) -> JobSpec {
        let mut environ = self.environ;
        let mut cmdline = self.cmdline;

        if self.use_workspace {
            environ.insert(
                ENV_WORKSPACE_NAME.to_string(),
                format!("{WORKSPACE_NAME_PREFIX}{}", self.name),
            );
            let mut wrapped = vec!["bash".to_string(), WORKSPACE_WRAPPER_SCRIPT.to_string()];
            wrapped.append(&mut cmdline);
            cmdline = wrapped;
        }

        let shortname = format!("{SHORTNAME_PREFIX}.{}", self.name);
        debug!("assembled native jobspec: {shortname}");

        JobSpec {
            cmdline,
            environ,
            shortname,
            timeout_seconds: self.timeout_seconds,
            flake_retries: self.flake_retries,
            timeout_retries: self.timeout_retries,
            shell: self.shell,
        }
    }
}
