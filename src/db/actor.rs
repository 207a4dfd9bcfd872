use crate::db::models::{PersistentObject, SceneImage, Timestamp};
use crate::db::source::SceneSource;
use crate::error::ViewerError;
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use std::sync::Arc;
use tracing::info;

#[derive(Debug)]
pub enum StoreActorMessage {
    /// List every scene timestamp, ascending.
    ListTimestamps(RpcReplyPort<Result<Vec<Timestamp>, ViewerError>>),

    /// Fetch the images of the given scenes.
    GetSceneImages(
        Vec<Timestamp>,
        RpcReplyPort<Result<Vec<SceneImage>, ViewerError>>,
    ),

    /// List every persistent object.
    ListPersistentObjects(RpcReplyPort<Result<Vec<PersistentObject>, ViewerError>>),
}

#[derive(Clone)]
pub struct StoreHandle {
    actor: ActorRef<StoreActorMessage>,
}

impl StoreHandle {
    pub async fn timestamps(&self) -> Result<Vec<Timestamp>, ViewerError> {
        ractor::call!(self.actor, StoreActorMessage::ListTimestamps).map_err(|e| {
            ViewerError::RactorError(format!("StoreActor ListTimestamps RPC failed: {e}"))
        })?
    }

    pub async fn scene_images(
        &self,
        timestamps: Vec<Timestamp>,
    ) -> Result<Vec<SceneImage>, ViewerError> {
        ractor::call!(self.actor, StoreActorMessage::GetSceneImages, timestamps).map_err(|e| {
            ViewerError::RactorError(format!("StoreActor GetSceneImages RPC failed: {e}"))
        })?
    }

    pub async fn persistent_objects(&self) -> Result<Vec<PersistentObject>, ViewerError> {
        ractor::call!(self.actor, StoreActorMessage::ListPersistentObjects).map_err(|e| {
            ViewerError::RactorError(format!("StoreActor ListPersistentObjects RPC failed: {e}"))
        })?
    }

    /// Stops the actor; pending and later calls fail with `RactorError`.
    pub fn shutdown(&self) {
        self.actor.stop(Some("shutdown".to_string()));
    }
}

struct StoreActorState {
    source: Arc<dyn SceneSource>,
}

struct StoreActor;

#[ractor::async_trait]
impl Actor for StoreActor {
    type Msg = StoreActorMessage;
    type State = StoreActorState;
    type Arguments = Arc<dyn SceneSource>;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        source: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        info!("StoreActor initialized");
        Ok(StoreActorState { source })
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        // Each query runs on its own task; the mailbox never waits on the database.
        let source = Arc::clone(&state.source);
        match message {
            StoreActorMessage::ListTimestamps(reply) => {
                tokio::spawn(async move {
                    let _ = reply.send(source.timestamps().await);
                });
            }
            StoreActorMessage::GetSceneImages(timestamps, reply) => {
                tokio::spawn(async move {
                    let _ = reply.send(source.scene_images(&timestamps).await);
                });
            }
            StoreActorMessage::ListPersistentObjects(reply) => {
                tokio::spawn(async move {
                    let _ = reply.send(source.persistent_objects().await);
                });
            }
        }
        Ok(())
    }
}

/// Spawn the store actor around `source` and return a cloneable handle.
pub async fn spawn(source: Arc<dyn SceneSource>) -> Result<StoreHandle, ViewerError> {
    let (actor, _jh) = Actor::spawn(None, StoreActor, source)
        .await
        .map_err(|e| ViewerError::RactorError(format!("failed to spawn StoreActor: {e}")))?;

    Ok(StoreHandle { actor })
}
