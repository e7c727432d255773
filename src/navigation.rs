// File: ./src/navigation.rs
// Navigation targets and the history stack actions push onto.
use crate::model::NoteId;
use std::fmt;
use std::sync::Mutex;
use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Root,
    Created(NoteId),
    Deleted(NoteId),
    Edited(NoteId),
    Trash,
    Error,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Root => "/".to_string(),
            Route::Created(id) => format!("/notes/{}/created", id),
            Route::Deleted(id) => format!("/notes/{}/deleted", id),
            Route::Edited(id) => format!("/notes/{}/edited", id),
            Route::Trash => "/notes/trash/".to_string(),
            Route::Error => "/error/".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Navigation capability handed to every action.
pub trait Navigate: Send + Sync {
    fn push(&self, route: Route);
}

/// In-memory history stack. UIs follow the current route through [`History::subscribe`].
#[derive(Debug)]
pub struct History {
    entries: Mutex<Vec<Route>>,
    current: watch::Sender<Route>,
}

impl History {
    pub fn new(initial: Route) -> Self {
        let (current, _) = watch::channel(initial.clone());
        Self {
            entries: Mutex::new(vec![initial]),
            current,
        }
    }

    pub fn current(&self) -> Route {
        self.current.borrow().clone()
    }

    pub fn entries(&self) -> Vec<Route> {
        self.entries
            .lock()
            .map(|e| e.clone())
            .unwrap_or_default()
    }

    pub fn subscribe(&self) -> watch::Receiver<Route> {
        self.current.subscribe()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(Route::Root)
    }
}

impl Navigate for History {
    fn push(&self, route: Route) {
        log::debug!("navigate -> {}", route);
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(route.clone());
        }
        // send_replace keeps the value even when nobody is subscribed.
        self.current.send_replace(route);
    }
}
