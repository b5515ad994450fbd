use std::cell::RefCell;
use std::rc::Rc;

use blockkit_builder_core::{DropOutcome, EditorAction, EditorState};

pub(crate) type AppSubscriber = Rc<dyn Fn()>;

/// Owner of the editor state. DOM callbacks dispatch actions here; views
/// subscribe and re-read [`AppCore::snapshot`] after each visible change.
pub(crate) struct AppCore {
    state: RefCell<EditorState>,
    snapshot: RefCell<Rc<EditorState>>,
    subscribers: Rc<RefCell<Vec<AppSubscriber>>>,
}

impl AppCore {
    pub(crate) fn new(id_salt: u64) -> Rc<Self> {
        let state = EditorState::new(id_salt);
        let snapshot = Rc::new(state.clone());
        Rc::new(Self {
            state: RefCell::new(state),
            snapshot: RefCell::new(snapshot),
            subscribers: Rc::new(RefCell::new(Vec::new())),
        })
    }

    pub(crate) fn subscribe(&self, subscriber: AppSubscriber) -> AppSubscription {
        self.subscribers.borrow_mut().push(subscriber.clone());
        AppSubscription {
            subscriber,
            subscribers: Rc::clone(&self.subscribers),
        }
    }

    fn notify(&self) {
        self.refresh_snapshot_from_state();
        self.notify_subscribers();
    }

    fn notify_subscribers(&self) {
        let subscribers = self.subscribers.borrow().clone();
        for subscriber in subscribers {
            (subscriber)();
        }
    }

    fn refresh_snapshot_from_state(&self) {
        let state = self.state.borrow();
        *self.snapshot.borrow_mut() = Rc::new(state.clone());
    }

    pub(crate) fn snapshot(&self) -> Rc<EditorState> {
        self.snapshot.borrow().clone()
    }

    pub(crate) fn dispatch(&self, action: EditorAction) {
        let mut state = self.state.borrow_mut();
        let changed = match action {
            EditorAction::Drop => {
                let had_candidate = state.drop_target().is_some();
                log_drop(state.drop_dragged()) || had_candidate
            }
            EditorAction::DropOnCanvas => {
                let had_candidate = state.drop_target().is_some();
                log_drop(state.drop_on_canvas()) || had_candidate
            }
            action => state.apply(action),
        };
        drop(state);
        if changed {
            self.notify();
        }
    }

    pub(crate) fn generate_json(&self) {
        let mut state = self.state.borrow_mut();
        let result = state.generate_json();
        drop(state);
        match result {
            Ok(true) => self.notify(),
            Ok(false) => {}
            Err(err) => {
                gloo::console::warn!("json export failed", err.to_string());
            }
        }
    }

    /// Last generated export text, if any.
    pub(crate) fn copy_text(&self) -> Option<String> {
        self.state.borrow().copy_text().map(str::to_string)
    }
}

/// Logs a completed drop; returns whether the list changed.
fn log_drop(outcome: DropOutcome) -> bool {
    match &outcome {
        DropOutcome::Inserted(id) => {
            gloo::console::log!("drop: inserted", id.to_string());
        }
        DropOutcome::Moved { from, to } => {
            gloo::console::log!("drop: moved", *from as u32, *to as u32);
        }
        DropOutcome::Unchanged | DropOutcome::Ignored => {}
    }
    outcome.mutated()
}

pub(crate) struct AppSubscription {
    subscriber: AppSubscriber,
    subscribers: Rc<RefCell<Vec<AppSubscriber>>>,
}

impl Drop for AppSubscription {
    fn drop(&mut self) {
        let mut subscribers = self.subscribers.borrow_mut();
        subscribers.retain(|item| !Rc::ptr_eq(item, &self.subscriber));
    }
}
