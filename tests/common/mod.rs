//! Shared test utilities

#![allow(dead_code, unused_imports)]

pub mod fixtures;
pub mod mock_brew;
pub mod mock_hosting;
pub mod mock_repo;
pub mod recording_progress;

pub use fixtures::*;
pub use mock_brew::MockBrew;
pub use mock_hosting::MockHosting;
pub use mock_repo::MockRepo;
pub use recording_progress::RecordingProgress;
