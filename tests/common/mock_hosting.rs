//! Mock hosting service for testing

#![allow(dead_code)]

use async_trait::async_trait;
use bottle_pr::error::{Error, Result};
use bottle_pr::platform::{HostingService, PrRequest};
use bottle_pr::types::PullRequest;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Call record for `find_open_prs`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCall {
    pub slug: String,
    pub query: String,
}

/// Mock hosting service
///
/// Features:
/// - Auto-incrementing PR numbers
/// - Call tracking for verification
/// - Canned search results
/// - Error injection for failure path testing
pub struct MockHosting {
    next_pr_number: AtomicU64,
    open_prs: Mutex<Vec<PullRequest>>,
    // Call tracking
    search_calls: Mutex<Vec<SearchCall>>,
    create_pr_calls: Mutex<Vec<PrRequest>>,
    // Error injection
    error_on_create_pr: Mutex<Option<String>>,
}

impl Default for MockHosting {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHosting {
    pub fn new() -> Self {
        Self {
            next_pr_number: AtomicU64::new(1),
            open_prs: Mutex::new(Vec::new()),
            search_calls: Mutex::new(Vec::new()),
            create_pr_calls: Mutex::new(Vec::new()),
            error_on_create_pr: Mutex::new(None),
        }
    }

    /// Pull requests returned by every search
    pub fn set_open_prs(&self, prs: Vec<PullRequest>) {
        *self.open_prs.lock().unwrap() = prs;
    }

    /// Make `create_pr` return an error
    pub fn fail_create_pr(&self, msg: &str) {
        *self.error_on_create_pr.lock().unwrap() = Some(msg.to_string());
    }

    /// All `find_open_prs` calls
    pub fn search_calls(&self) -> Vec<SearchCall> {
        self.search_calls.lock().unwrap().clone()
    }

    /// All `create_pr` calls
    pub fn create_pr_calls(&self) -> Vec<PrRequest> {
        self.create_pr_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl HostingService for MockHosting {
    async fn find_open_prs(&self, slug: &str, query: &str) -> Result<Vec<PullRequest>> {
        self.search_calls.lock().unwrap().push(SearchCall {
            slug: slug.to_string(),
            query: query.to_string(),
        });
        Ok(self.open_prs.lock().unwrap().clone())
    }

    async fn create_pr(&self, request: &PrRequest) -> Result<PullRequest> {
        self.create_pr_calls.lock().unwrap().push(request.clone());
        if let Some(msg) = self.error_on_create_pr.lock().unwrap().clone() {
            return Err(Error::Platform(format!("hub pull-request failed: {msg}")));
        }

        let number = self.next_pr_number.fetch_add(1, Ordering::SeqCst);
        Ok(PullRequest {
            number,
            html_url: format!("https://github.com/Linuxbrew/homebrew-core/pull/{number}"),
            title: request.message.clone(),
            state: "open".to_string(),
        })
    }
}
