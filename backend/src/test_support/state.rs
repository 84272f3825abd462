//! HTTP state wired over the in-memory store.

use std::sync::Arc;

use actix_web::web;

use crate::domain::{PasteService, SlugGenerator};
use crate::inbound::http::request_time::TimeOverridePolicy;
use crate::inbound::http::state::{HttpState, HttpStatePorts, PublicBaseUrl};
use crate::outbound::memory::InMemoryPasteRepository;

use super::MutableClock;

/// Base URL used by test harnesses.
pub const TEST_BASE_URL: &str = "http://paste.test";

/// Handles a test needs to drive and inspect the in-memory stack.
pub struct MemoryHarness {
    pub state: web::Data<HttpState>,
    pub repo: Arc<InMemoryPasteRepository>,
    pub clock: Arc<MutableClock>,
}

/// Build HTTP state over a fresh in-memory repository.
pub fn memory_harness(
    clock: Arc<MutableClock>,
    slugs: Arc<dyn SlugGenerator>,
    time_override: TimeOverridePolicy,
) -> MemoryHarness {
    let repo = Arc::new(InMemoryPasteRepository::new());
    let service = Arc::new(PasteService::new(repo.clone(), slugs, clock.clone()));
    let base_url = match PublicBaseUrl::parse(TEST_BASE_URL) {
        Ok(url) => url,
        Err(error) => panic!("test base url: {error}"),
    };
    let state = HttpState::new(
        HttpStatePorts {
            pastes: service.clone(),
            paste_views: service,
            storage: repo.clone(),
        },
        base_url,
        time_override,
    );
    MemoryHarness {
        state: web::Data::new(state),
        repo,
        clock,
    }
}
