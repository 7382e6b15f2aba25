// src/defaults.rs
// Centralized path, naming and timing defaults for jobspec assembly.
// Every path here is symbolic: existence is an external precondition.

// =================================
// Timeouts
// =================================
pub const DEFAULT_NATIVE_TIMEOUT_SECONDS: u32 = 10 * 60;
pub const DEFAULT_DOCKER_TIMEOUT_SECONDS: u32 = 30 * 60;
pub const CPP_BUILD_TIMEOUT_SECONDS: u32 = 2 * 60 * 60; // make install + example builds
pub const PYTHON_TIMEOUT_SECONDS: u32 = 45 * 60;
pub const PHP_MACOS_TIMEOUT_SECONDS: u32 = 30 * 60;

// =================================
// Driver scripts
// =================================
pub const DOCKER_BUILD_AND_RUN_SCRIPT: &str = "tools/run_tests/dockerize/build_and_run_docker.sh";
pub const DOCKER_RUN_SCRIPT: &str = "tools/run_tests/dockerize/docker_run.sh";
pub const WORKSPACE_WRAPPER_SCRIPT: &str = "tools/run_tests/artifacts/run_in_workspace.sh";

// =================================
// Repository paths
// =================================
pub const DISTRIBTEST_DOCKERFILE_ROOT: &str = "tools/dockerfile/distribtest";
pub const DISTRIB_COPY_REL_PATH: &str = "test/distrib";

// =================================
// Environment variables emitted into generated jobs
// =================================
pub const ENV_RELATIVE_COPY_PATH: &str = "RELATIVE_COPY_PATH";
pub const ENV_WORKSPACE_NAME: &str = "WORKSPACE_NAME";
pub const ENV_DOCKERFILE_DIR: &str = "DOCKERFILE_DIR";
pub const ENV_DOCKER_RUN_SCRIPT: &str = "DOCKER_RUN_SCRIPT";
pub const ENV_DOCKER_RUN_SCRIPT_COMMAND: &str = "DOCKER_RUN_SCRIPT_COMMAND";
pub const ENV_CPP_COMPILER_JOBS: &str = "GRPC_CPP_DISTRIBTEST_BUILD_COMPILER_JOBS";
pub const ENV_EXTERNAL_GIT_ROOT: &str = "EXTERNAL_GIT_ROOT";
pub const ENV_SKIP_NETCOREAPP21: &str = "SKIP_NETCOREAPP21_DISTRIBTEST";
pub const ENV_SKIP_NET50: &str = "SKIP_NET50_DISTRIBTEST";

// =================================
// Naming
// =================================
pub const SHORTNAME_PREFIX: &str = "distribtest";
pub const WORKSPACE_NAME_PREFIX: &str = "workspace_";
