//! Recording doubles shared by the integration tests.
#![allow(dead_code)]

use notepad::actions::NoteActions;
use notepad::client::NotesApi;
use notepad::error::{ActionError, ReportError};
use notepad::model::{Note, NoteFields, NoteId, NotePatch};
use notepad::navigation::{Navigate, Route};
use notepad::signal::{Dispatch, Signal};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

pub fn note_json(id: i64, title: &str, content: &str) -> Value {
    json!({"id": id, "title": title, "content": content, "liked": false, "deleted": false})
}

pub fn note(id: i64, title: &str, content: &str) -> Note {
    serde_json::from_value(note_json(id, title, content)).unwrap()
}

// --- Recorder: dispatch + navigation + error sink ---

#[derive(Default)]
pub struct Recorder {
    signals: Mutex<Vec<(Instant, Signal)>>,
    routes: Mutex<Vec<(Instant, Route)>>,
    errors: Mutex<Vec<ActionError>>,
}

impl Recorder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn signals(&self) -> Vec<Signal> {
        self.signals.lock().unwrap().iter().map(|(_, s)| s.clone()).collect()
    }

    pub fn kinds(&self) -> Vec<&'static str> {
        self.signals.lock().unwrap().iter().map(|(_, s)| s.kind()).collect()
    }

    pub fn signal_time(&self, kind: &str) -> Option<Instant> {
        self.signals
            .lock()
            .unwrap()
            .iter()
            .find(|(_, s)| s.kind() == kind)
            .map(|(t, _)| *t)
    }

    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().iter().map(|(_, r)| r.clone()).collect()
    }

    pub fn route_time(&self, route: &Route) -> Option<Instant> {
        self.routes
            .lock()
            .unwrap()
            .iter()
            .find(|(_, r)| r == route)
            .map(|(t, _)| *t)
    }

    pub fn errors(&self) -> Vec<ActionError> {
        self.errors.lock().unwrap().clone()
    }
}

impl Dispatch for Recorder {
    fn dispatch(&self, signal: Signal) {
        self.signals.lock().unwrap().push((Instant::now(), signal));
    }
}

impl Navigate for Recorder {
    fn push(&self, route: Route) {
        self.routes.lock().unwrap().push((Instant::now(), route));
    }
}

impl ReportError for Recorder {
    fn report(&self, error: &ActionError) {
        self.errors.lock().unwrap().push(error.clone());
    }
}

// --- FakeApi: scripted notes backend ---

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

type Responder = Box<dyn Fn(&Call) -> Result<Value, ActionError> + Send + Sync>;

pub struct FakeApi {
    calls: Mutex<Vec<Call>>,
    responder: Responder,
    delay: Option<Duration>,
    hang: bool,
}

impl FakeApi {
    pub fn new(
        responder: impl Fn(&Call) -> Result<Value, ActionError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            responder: Box::new(responder),
            delay: None,
            hang: false,
        }
    }

    pub fn ok(value: Value) -> Self {
        Self::new(move |_| Ok(value.clone()))
    }

    pub fn failing(status: u16, reason: &str) -> Self {
        let reason = reason.to_string();
        Self::new(move |_| {
            Err(ActionError::Status {
                status,
                reason: reason.clone(),
            })
        })
    }

    /// Never answers.
    pub fn hanging() -> Self {
        let mut api = Self::ok(Value::Null);
        api.hang = true;
        api
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    async fn handle<T: DeserializeOwned>(&self, call: Call) -> Result<T, ActionError> {
        self.calls.lock().unwrap().push(call.clone());
        if self.hang {
            std::future::pending::<()>().await;
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let value = (self.responder)(&call)?;
        serde_json::from_value(value).map_err(|e| ActionError::Parse(e.to_string()))
    }
}

fn call(method: &'static str, path: String, body: Option<Value>) -> Call {
    Call { method, path, body }
}

impl NotesApi for FakeApi {
    async fn list_notes(&self) -> Result<Vec<Note>, ActionError> {
        self.handle(call("GET", "/notes/".into(), None)).await
    }

    async fn list_trash(&self) -> Result<Vec<Note>, ActionError> {
        self.handle(call("GET", "/notes/trash".into(), None)).await
    }

    async fn create_note(&self, fields: &NoteFields) -> Result<Note, ActionError> {
        let body = serde_json::to_value(fields).unwrap();
        self.handle(call("POST", "/notes/".into(), Some(body))).await
    }

    async fn patch_note(&self, id: &NoteId, patch: &NotePatch) -> Result<Note, ActionError> {
        let body = serde_json::to_value(patch).unwrap();
        self.handle(call("PATCH", format!("/notes/{}", id), Some(body)))
            .await
    }

    async fn delete_note(&self, id: &NoteId) -> Result<Value, ActionError> {
        self.handle(call("DELETE", format!("/notes/{}", id), None))
            .await
    }

    async fn clear_trash(&self) -> Result<Value, ActionError> {
        self.handle(call("DELETE", "/notes/trash".into(), None)).await
    }
}

/// Actions wired to a recorder for dispatch, navigation and error reporting.
pub fn wire(api: FakeApi) -> (NoteActions<FakeApi>, Arc<FakeApi>, Arc<Recorder>) {
    let api = Arc::new(api);
    let rec = Recorder::new();
    let actions = NoteActions::new(api.clone(), rec.clone(), rec.clone(), rec.clone());
    (actions, api, rec)
}
