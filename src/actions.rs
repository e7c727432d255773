// File: ./src/actions.rs
/*! Note actions.

Each action function performs its synchronous side effects (navigation-first
actions push their route) when it is *called*, and returns a future that does
the rest when polled: `LOADING_NOTES`, exactly one request through the
[`NotesApi`], then either the result signal or one error report.

Some actions schedule a follow-up on the tokio runtime that fires after
`follow_up_delay` no matter how the request went. Pending follow-ups can be
cancelled with [`NoteActions::cancel_follow_ups`].
*/

use crate::client::NotesApi;
use crate::error::{ActionError, ActionResult, ReportError};
use crate::model::{NoteFields, NoteId, NotePatch};
use crate::navigation::{Navigate, Route};
use crate::signal::{Dispatch, Signal};
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::AbortHandle;
use tokio::time::Instant;

pub const DEFAULT_FOLLOW_UP_DELAY: Duration = Duration::from_secs(10);

/// Deferred navigation (and optional state clearing) run by a follow-up timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowUp {
    pub route: Route,
    pub clear_deleted_note: bool,
}

impl FollowUp {
    pub fn navigate(route: Route) -> Self {
        Self {
            route,
            clear_deleted_note: false,
        }
    }

    pub fn navigate_and_clear(route: Route) -> Self {
        Self {
            route,
            clear_deleted_note: true,
        }
    }
}

pub struct NoteActions<A> {
    api: Arc<A>,
    dispatcher: Arc<dyn Dispatch>,
    navigator: Arc<dyn Navigate>,
    reporter: Arc<dyn ReportError>,
    follow_up_delay: Duration,
    pending: Arc<Mutex<Vec<Pending>>>,
}

struct Pending {
    handle: AbortHandle,
    deadline: Instant,
}

impl<A> Clone for NoteActions<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            dispatcher: Arc::clone(&self.dispatcher),
            navigator: Arc::clone(&self.navigator),
            reporter: Arc::clone(&self.reporter),
            follow_up_delay: self.follow_up_delay,
            pending: Arc::clone(&self.pending),
        }
    }
}

impl<A: NotesApi + 'static> NoteActions<A> {
    pub fn new(
        api: Arc<A>,
        dispatcher: Arc<dyn Dispatch>,
        navigator: Arc<dyn Navigate>,
        reporter: Arc<dyn ReportError>,
    ) -> Self {
        Self {
            api,
            dispatcher,
            navigator,
            reporter,
            follow_up_delay: DEFAULT_FOLLOW_UP_DELAY,
            pending: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_follow_up_delay(mut self, delay: Duration) -> Self {
        self.follow_up_delay = delay;
        self
    }

    pub fn follow_up_delay(&self) -> Duration {
        self.follow_up_delay
    }

    // --- FETCHING ---

    pub fn fetch_notes(&self) -> impl Future<Output = ActionResult> + Send + use<A> {
        let this = self.clone();
        async move {
            this.dispatch(Signal::LoadingNotes);
            let result = this.api.list_notes().await;
            this.settle(result, Signal::FetchNotes)
        }
    }

    pub fn fetch_trash(&self) -> impl Future<Output = ActionResult> + Send + use<A> {
        let this = self.clone();
        async move {
            this.dispatch(Signal::LoadingNotes);
            let result = this.api.list_trash().await;
            this.settle(result, Signal::FetchTrash)
        }
    }

    // --- MUTATIONS ---

    /// The created page needs the server-assigned id, so navigation waits for the response.
    pub fn create_note(
        &self,
        fields: NoteFields,
    ) -> impl Future<Output = ActionResult> + Send + use<A> {
        let this = self.clone();
        async move {
            this.dispatch(Signal::LoadingNotes);
            let note = match this.api.create_note(&fields).await {
                Ok(note) => note,
                Err(e) => return this.fail(e),
            };
            let id = note.id.clone();
            this.dispatch(Signal::CreateNote(note));
            this.navigator.push(Route::Created(id));
            this.schedule(FollowUp::navigate(Route::Root));
            Ok(())
        }
    }

    /// Soft delete. Navigates to the deleted page immediately.
    pub fn delete_note(&self, id: NoteId) -> impl Future<Output = ActionResult> + Send + use<A> {
        self.navigator.push(Route::Deleted(id.clone()));
        let this = self.clone();
        async move {
            this.dispatch(Signal::LoadingNotes);
            this.schedule(FollowUp::navigate(Route::Trash));
            let result = this.api.patch_note(&id, &NotePatch::deleted(true)).await;
            this.settle(result, Signal::DeleteNote)
        }
    }

    /// The edited page is only shown once the server has accepted the change; the
    /// return to `/` is scheduled up front either way.
    pub fn update_note(
        &self,
        fields: NoteFields,
        id: NoteId,
    ) -> impl Future<Output = ActionResult> + Send + use<A> {
        let this = self.clone();
        async move {
            this.dispatch(Signal::LoadingNotes);
            this.schedule(FollowUp::navigate(Route::Root));
            let result = this.api.patch_note(&id, &NotePatch::from(fields)).await;
            this.settle(result, Signal::UpdateNote)?;
            this.navigator.push(Route::Edited(id));
            Ok(())
        }
    }

    pub fn hard_delete_note(
        &self,
        id: NoteId,
    ) -> impl Future<Output = ActionResult> + Send + use<A> {
        self.permanent_delete(id, Signal::HardDeleteNote)
    }

    pub fn hard_wipe_note(
        &self,
        id: NoteId,
    ) -> impl Future<Output = ActionResult> + Send + use<A> {
        self.permanent_delete(id, Signal::HardWipeNote)
    }

    /// `CLEAR_TRASH` goes out before the request; the response is parsed and dropped.
    pub fn clear_trash(&self) -> impl Future<Output = ActionResult> + Send + use<A> {
        self.navigator.push(Route::Root);
        let this = self.clone();
        async move {
            this.dispatch(Signal::ClearTrash);
            match this.api.clear_trash().await {
                Ok(_) => Ok(()),
                Err(e) => this.fail(e),
            }
        }
    }

    pub fn restore_note(&self, id: NoteId) -> impl Future<Output = ActionResult> + Send + use<A> {
        self.navigator.push(Route::Root);
        let this = self.clone();
        async move {
            this.dispatch(Signal::LoadingNotes);
            let result = this.api.patch_note(&id, &NotePatch::deleted(false)).await;
            this.settle(result, Signal::RestoreNote)
        }
    }

    /// Flips the like flag: sends `liked: !is_liked`.
    pub fn like(
        &self,
        id: NoteId,
        is_liked: bool,
    ) -> impl Future<Output = ActionResult> + Send + use<A> {
        let this = self.clone();
        async move {
            let result = this.api.patch_note(&id, &NotePatch::liked(!is_liked)).await;
            this.settle(result, Signal::UpdateNote)
        }
    }

    // --- FOLLOW-UPS ---

    /// Aborts every follow-up that has not fired yet. Returns how many were cancelled.
    pub fn cancel_follow_ups(&self) -> usize {
        let Ok(mut pending) = self.pending.lock() else {
            return 0;
        };
        let mut cancelled = 0;
        for p in pending.drain(..) {
            if !p.handle.is_finished() {
                p.handle.abort();
                cancelled += 1;
            }
        }
        if cancelled > 0 {
            log::debug!("Cancelled {} pending follow-up(s)", cancelled);
        }
        cancelled
    }

    pub fn pending_follow_ups(&self) -> usize {
        self.pending
            .lock()
            .map(|p| p.iter().filter(|p| !p.handle.is_finished()).count())
            .unwrap_or(0)
    }

    /// When the earliest follow-up that has not fired yet is due.
    pub fn next_follow_up(&self) -> Option<Instant> {
        let pending = self.pending.lock().ok()?;
        pending
            .iter()
            .filter(|p| !p.handle.is_finished())
            .map(|p| p.deadline)
            .min()
    }

    // --- HELPERS ---

    fn permanent_delete(
        &self,
        id: NoteId,
        to_signal: fn(serde_json::Value) -> Signal,
    ) -> impl Future<Output = ActionResult> + Send + use<A> {
        self.navigator.push(Route::Deleted(id.clone()));
        let this = self.clone();
        async move {
            this.dispatch(Signal::LoadingNotes);
            this.schedule(FollowUp::navigate_and_clear(Route::Root));
            let result = this.api.delete_note(&id).await;
            this.settle(result, to_signal)
        }
    }

    fn dispatch(&self, signal: Signal) {
        self.dispatcher.dispatch(signal);
    }

    fn settle<T>(&self, result: Result<T, ActionError>, to_signal: fn(T) -> Signal) -> ActionResult {
        match result {
            Ok(payload) => {
                self.dispatch(to_signal(payload));
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    fn fail(&self, error: ActionError) -> ActionResult {
        self.reporter.report(&error);
        Err(error)
    }

    fn schedule(&self, follow_up: FollowUp) {
        let deadline = Instant::now() + self.follow_up_delay;
        let navigator = Arc::clone(&self.navigator);
        let dispatcher = Arc::clone(&self.dispatcher);

        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            navigator.push(follow_up.route);
            if follow_up.clear_deleted_note {
                dispatcher.dispatch(Signal::ClearDeletedNote);
            }
        });

        if let Ok(mut pending) = self.pending.lock() {
            pending.retain(|p| !p.handle.is_finished());
            pending.push(Pending {
                handle: handle.abort_handle(),
                deadline,
            });
        }
    }
}
