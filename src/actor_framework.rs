use std::fmt::{Debug, Display};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Trait that any record must implement to be owned by a [`ResourceActor`].
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Clone + Send + Sync + Display + Debug;
    type Patch: Send + Sync + Debug;

    /// Get the ID of the entity
    fn id(&self) -> &Self::Id;

    /// Build the replacement value for an update.
    ///
    /// Fields present in `patch` overwrite the current ones, everything else
    /// is carried over. The stored value is never mutated in place, so copies
    /// handed out earlier stay valid snapshots.
    fn merged(&self, patch: Self::Patch) -> Self;
}

/// Failures surfaced by the store itself.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    List {
        respond_to: Response<Vec<T>>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Create {
        item: T,
        respond_to: Response<T>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<T>,
    },
    Shutdown,
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// Sole owner of an insertion-ordered record collection.
///
/// Requests are served one at a time, after sleeping for `latency` to model
/// an out-of-process dependency.
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: Vec<T>,
    latency: Duration,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(buffer_size: usize, latency: Duration) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: Vec::new(),
            latency,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    #[instrument(name = "resource_actor", skip(self))]
    pub async fn run(mut self) {
        info!("ResourceActor starting");
        while let Some(msg) = self.receiver.recv().await {
            if !self.latency.is_zero() {
                tokio::time::sleep(self.latency).await;
            }
            match msg {
                ResourceRequest::List { respond_to } => {
                    debug!(count = self.store.len(), "Processing list request");
                    let _ = respond_to.send(Ok(self.store.clone()));
                }
                ResourceRequest::Get { id, respond_to } => {
                    debug!(id = %id, "Processing get request");
                    let item = self.position(&id).map(|index| self.store[index].clone());
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Create { item, respond_to } => {
                    debug!(id = %item.id(), "Processing create request");
                    self.store.push(item.clone());
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    debug!(id = %id, "Processing update request");
                    let result = match self.position(&id) {
                        Some(index) => {
                            let updated = self.store[index].merged(patch);
                            self.store[index] = updated.clone();
                            Ok(updated)
                        }
                        None => Err(FrameworkError::NotFound(id.to_string())),
                    };
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(id = %id, "Processing delete request");
                    let result = match self.position(&id) {
                        Some(index) => Ok(self.store.remove(index)),
                        None => Err(FrameworkError::NotFound(id.to_string())),
                    };
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Shutdown => {
                    info!("ResourceActor shutting down");
                    break;
                }
            }
        }
        info!("ResourceActor stopped");
    }

    fn position(&self, id: &T::Id) -> Option<usize> {
        self.store.iter().position(|item| item.id() == id)
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

/// Send a request carrying a fresh oneshot and await the reply.
macro_rules! request {
    ($sender:expr, $variant:ident { $($field:ident),* }) => {{
        let (respond_to, response) = oneshot::channel();
        $sender
            .send(ResourceRequest::$variant { $($field,)* respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }};
}

#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        request!(self.sender, List {})
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        request!(self.sender, Get { id })
    }

    pub async fn create(&self, item: T) -> Result<T, FrameworkError> {
        request!(self.sender, Create { item })
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError> {
        request!(self.sender, Update { id, patch })
    }

    pub async fn delete(&self, id: T::Id) -> Result<T, FrameworkError> {
        request!(self.sender, Delete { id })
    }

    pub async fn shutdown(&self) -> Result<(), FrameworkError> {
        self.sender
            .send(ResourceRequest::Shutdown)
            .await
            .map_err(|_| FrameworkError::ActorClosed)
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
