//! Presentation state holder for the grocery list.
//!
//! # Responsibility
//! - Expose the store's live list to observers unchanged.
//! - Turn add/toggle/delete intents into background store mutations.
//!
//! # Invariants
//! - Intents are fire-and-forget: callers never block and never see errors.
//! - Intents are applied in submission order by a single worker task.
//! - Store calls run on the blocking pool, never on the caller's thread.
//! - Blank add input is dropped before anything is queued.

use crate::model::item::{is_blank, NewTodoItem, TodoItem};
use crate::store::{LiveList, TodoStore};
use log::{debug, error, warn};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};

#[derive(Debug)]
enum Intent {
    Mutate(Mutation),
    Barrier(oneshot::Sender<()>),
}

/// Store write carried by an intent.
#[derive(Debug)]
enum Mutation {
    Insert(NewTodoItem),
    Update(TodoItem),
    Delete(TodoItem),
}

impl Mutation {
    fn label(&self) -> &'static str {
        match self {
            Self::Insert(_) => "insert",
            Self::Update(_) => "update",
            Self::Delete(_) => "delete",
        }
    }
}

/// State layer between a view and the [`TodoStore`].
///
/// Cloning yields another handle onto the same intent queue.
#[derive(Clone)]
pub struct TodoViewModel {
    store: Arc<TodoStore>,
    intents: mpsc::UnboundedSender<Intent>,
}

impl TodoViewModel {
    /// Creates the view model and spawns its intent worker on `runtime`.
    ///
    /// The worker stops once every handle has been dropped.
    pub fn new(store: Arc<TodoStore>, runtime: &Handle) -> Self {
        let (intents, queue) = mpsc::unbounded_channel();
        runtime.spawn(run_intent_worker(Arc::clone(&store), queue));
        Self { store, intents }
    }

    /// Live list mirrored from the store, newest first.
    pub fn todo_list(&self) -> LiveList {
        self.store.subscribe()
    }

    /// Queues creation of a not-done item stamped with the current time.
    ///
    /// Ignored when either field is blank after trimming.
    pub fn add_todo(&self, name: &str, quantity: &str) {
        if is_blank(name) || is_blank(quantity) {
            debug!("event=intent_rejected module=viewmodel intent=insert reason=blank_field");
            return;
        }
        self.submit(Intent::Mutate(Mutation::Insert(NewTodoItem::new(
            name.trim(),
            quantity.trim(),
        ))));
    }

    /// Queues a full-record update with the completion flag inverted.
    pub fn toggle_done(&self, item: &TodoItem) {
        self.submit(Intent::Mutate(Mutation::Update(item.toggled())));
    }

    pub fn delete_todo(&self, item: &TodoItem) {
        self.submit(Intent::Mutate(Mutation::Delete(item.clone())));
    }

    /// Resolves once every intent queued before this call has been applied.
    pub async fn settled(&self) {
        let (done, wait) = oneshot::channel();
        self.submit(Intent::Barrier(done));
        // The worker only goes away with the last handle, and we hold one.
        let _ = wait.await;
    }

    fn submit(&self, intent: Intent) {
        let label = match &intent {
            Intent::Mutate(mutation) => mutation.label(),
            Intent::Barrier(_) => "barrier",
        };
        if self.intents.send(intent).is_err() {
            warn!("event=intent_dropped module=viewmodel intent={label} reason=worker_stopped");
        }
    }
}

async fn run_intent_worker(store: Arc<TodoStore>, mut queue: mpsc::UnboundedReceiver<Intent>) {
    debug!("event=intent_worker module=viewmodel status=start");
    while let Some(intent) = queue.recv().await {
        let mutation = match intent {
            Intent::Mutate(mutation) => mutation,
            Intent::Barrier(done) => {
                let _ = done.send(());
                continue;
            }
        };

        let label = mutation.label();
        let store = Arc::clone(&store);
        if let Err(err) = tokio::task::spawn_blocking(move || apply_mutation(&store, mutation)).await
        {
            error!(
                "event=intent_apply module=viewmodel status=error intent={label} error_code=task_failed error={err}"
            );
        }
    }
    debug!("event=intent_worker module=viewmodel status=stopped");
}

fn apply_mutation(store: &TodoStore, mutation: Mutation) {
    let label = mutation.label();
    let outcome = match mutation {
        Mutation::Insert(item) => store.insert(&item).map(|_| ()),
        Mutation::Update(item) => store.update(&item).map(|_| ()),
        Mutation::Delete(item) => store.delete(&item).map(|_| ()),
    };
    if let Err(err) = outcome {
        error!(
            "event=intent_apply module=viewmodel status=error intent={label} error_code=store_failed error={err}"
        );
    }
}
