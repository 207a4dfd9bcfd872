use crate::db::models::{PersistentObject, SceneImage, Timestamp};
use crate::db::source::SceneSource;
use crate::error::ViewerError;
use async_trait::async_trait;

/// Scene source backed by in-process vectors.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    scenes: Vec<SceneImage>,
    objects: Vec<PersistentObject>,
}

impl MemorySource {
    pub fn new(scenes: Vec<SceneImage>, objects: Vec<PersistentObject>) -> Self {
        Self { scenes, objects }
    }
}

#[async_trait]
impl SceneSource for MemorySource {
    async fn timestamps(&self) -> Result<Vec<Timestamp>, ViewerError> {
        let mut timestamps: Vec<Timestamp> = self.scenes.iter().map(|s| s.timestamp).collect();
        timestamps.sort_unstable();
        timestamps.dedup();
        Ok(timestamps)
    }

    async fn scene_images(
        &self,
        timestamps: &[Timestamp],
    ) -> Result<Vec<SceneImage>, ViewerError> {
        Ok(timestamps
            .iter()
            .filter_map(|ts| self.scenes.iter().find(|s| s.timestamp == *ts).cloned())
            .collect())
    }

    async fn persistent_objects(&self) -> Result<Vec<PersistentObject>, ViewerError> {
        Ok(self.objects.clone())
    }
}
