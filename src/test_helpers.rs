//! Shared test doubles: scripted transport, recording navigator/notifier.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::Value;

use crate::net::api::Api;
use crate::net::guard::SessionGuard;
use crate::net::transport::{ApiRequest, ApiResponse, Transport, TransportError};
use crate::routes::Route;
use crate::shell::{Navigator, Notice, Notifier};
use crate::state::session::Session;
use crate::state::store::{MemoryStore, SessionStore, StorageKey};

/// Build an unsigned JWT carrying `claims`.
pub fn make_token(claims: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.c2lnbmF0dXJl")
}

// =========================================================================
// MockTransport
// =========================================================================

#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<ApiResponse, TransportError>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn respond(&self, status: u16, body: &Value) {
        self.respond_raw(status, &body.to_string());
    }

    pub fn respond_raw(&self, status: u16, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(ApiResponse::new(status, body)));
    }

    pub fn fail(&self, error: TransportError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> ApiRequest {
        self.requests.lock().unwrap().last().cloned().expect("no request sent")
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ApiResponse::new(500, "unscripted request")))
    }
}

// =========================================================================
// Recorders
// =========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    Navigate(Route),
    HardRedirect(Route),
}

#[derive(Default)]
pub struct RecordingNavigator {
    events: Mutex<Vec<NavEvent>>,
}

impl RecordingNavigator {
    pub fn events(&self) -> Vec<NavEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.events.lock().unwrap().push(NavEvent::Navigate(route));
    }

    fn hard_redirect(&self, route: Route) {
        self.events.lock().unwrap().push(NavEvent::HardRedirect(route));
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

// =========================================================================
// Harness
// =========================================================================

pub struct Harness {
    pub transport: Arc<MockTransport>,
    pub navigator: Arc<RecordingNavigator>,
    pub notifier: Arc<RecordingNotifier>,
    pub store: Arc<MemoryStore>,
    pub session: Session,
    pub api: Api,
}

impl Harness {
    pub fn new() -> Self {
        let transport = Arc::new(MockTransport::default());
        let navigator = Arc::new(RecordingNavigator::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let store = Arc::new(MemoryStore::new());
        let session = Session::new(Arc::clone(&store) as Arc<dyn SessionStore>);
        let guard = SessionGuard::new(
            Arc::clone(&transport) as Arc<dyn Transport>,
            session.clone(),
            Arc::clone(&navigator) as Arc<dyn Navigator>,
            Arc::clone(&notifier) as Arc<dyn Notifier>,
        );
        let api = Api::new(Arc::new(guard));
        Self { transport, navigator, notifier, store, session, api }
    }

    /// Harness with a signed-in user.
    pub fn logged_in(is_staff: bool) -> Self {
        let harness = Self::new();
        let access = make_token(&serde_json::json!({ "is_staff": is_staff, "username": "alice" }));
        harness.session.sign_in(&access, "refresh-1", is_staff).unwrap();
        harness
    }

    pub fn stored(&self, key: StorageKey) -> Option<String> {
        self.store.get(key)
    }

    pub fn stored_all(&self) -> Vec<Option<String>> {
        StorageKey::ALL.iter().map(|key| self.store.get(*key)).collect()
    }
}
