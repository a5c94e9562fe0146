//! Progress callback that records every event

#![allow(dead_code)]

use async_trait::async_trait;
use bottle_pr::eligibility::SkipReason;
use bottle_pr::error::Error;
use bottle_pr::submit::{Phase, ProgressCallback};
use bottle_pr::types::{Formula, PullRequest};
use std::sync::Mutex;

/// Records events as `kind: text` lines
#[derive(Default)]
pub struct RecordingProgress {
    events: Mutex<Vec<String>>,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    /// Events of one kind, without the prefix
    pub fn of_kind(&self, kind: &str) -> Vec<String> {
        let prefix = format!("{kind}: ");
        self.events()
            .iter()
            .filter_map(|e| e.strip_prefix(&prefix).map(ToString::to_string))
            .collect()
    }

    fn push(&self, kind: &str, text: impl std::fmt::Display) {
        self.events.lock().unwrap().push(format!("{kind}: {text}"));
    }
}

#[async_trait]
impl ProgressCallback for RecordingProgress {
    async fn on_phase(&self, phase: Phase) {
        self.push("phase", phase);
    }

    async fn on_skip(&self, formula: &Formula, reason: &SkipReason) {
        self.push("skip", format!("{formula}: Skipping because {reason}"));
    }

    async fn on_banner(&self, ordinal: usize, message: &str) {
        self.push("banner", format!("{ordinal}. {message}"));
    }

    async fn on_pr_created(&self, formula: &Formula, pr: &PullRequest) {
        self.push("pr", format!("{formula} #{}", pr.number));
    }

    async fn on_warning(&self, message: &str) {
        self.push("warning", message);
    }

    async fn on_error(&self, error: &Error) {
        self.push("error", error);
    }

    async fn on_message(&self, message: &str) {
        self.push("message", message);
    }

    async fn on_detail(&self, message: &str) {
        self.push("detail", message);
    }
}
