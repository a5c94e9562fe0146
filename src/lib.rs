//! bottle-pr - request Linux bottle builds for Homebrew formulae
//!
//! Library behind the `build-bottle-pr` and `test-bot-docker` binaries.
//! Every side effect goes through a narrow trait ([`repo::RepoOps`],
//! [`platform::HostingService`], [`brew::BrewOps`],
//! [`container::ContainerRuntime`]) so the skip decisions and the
//! submission flow can be exercised without the real tools.

pub mod auth;
pub mod brew;
pub mod ci_config;
pub mod config;
pub mod container;
pub mod eligibility;
pub mod error;
pub mod platform;
pub mod process;
pub mod remote;
pub mod repo;
pub mod style;
pub mod submit;
pub mod types;
