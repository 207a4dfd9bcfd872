use crate::db::models::{PersistentObject, SceneImage, Timestamp};
use crate::error::ViewerError;
use async_trait::async_trait;

/// Read access to the scene database.
#[async_trait]
pub trait SceneSource: Send + Sync + 'static {
    /// All scene identifiers, ascending.
    async fn timestamps(&self) -> Result<Vec<Timestamp>, ViewerError>;

    /// Images of the given scenes, in the order requested. Scenes without a
    /// stored image are left out.
    async fn scene_images(&self, timestamps: &[Timestamp])
    -> Result<Vec<SceneImage>, ViewerError>;

    /// Every record of the persistent object store.
    async fn persistent_objects(&self) -> Result<Vec<PersistentObject>, ViewerError>;
}
