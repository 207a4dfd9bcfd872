use crate::config::MongoConfig;
use crate::db::models::{EncodedImage, ObjectAttribute, PersistentObject, SceneImage, Timestamp};
use crate::db::source::SceneSource;
use crate::error::ViewerError;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Client, Collection,
    bson::{Bson, Document, doc},
};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Stored encodings seen for each normalised timestamp.
type StoredTimestamps = HashMap<Timestamp, Vec<Bson>>;

/// Field names the scene and object documents are read with.
#[derive(Debug, Clone)]
pub struct DocumentLayout {
    pub timestamp_field: String,
    pub image_field: String,
}

impl DocumentLayout {
    pub fn from_config(cfg: &MongoConfig) -> Self {
        Self {
            timestamp_field: cfg.timestamp_field.clone(),
            image_field: cfg.image_field.clone(),
        }
    }

    pub fn scene_image(&self, doc: &Document) -> Result<SceneImage, ViewerError> {
        let timestamp = doc
            .get(&self.timestamp_field)
            .and_then(timestamp_from_bson)
            .ok_or_else(|| {
                ViewerError::DocumentError(format!(
                    "scene document without usable `{}`",
                    self.timestamp_field
                ))
            })?;
        let image = doc
            .get(&self.image_field)
            .and_then(image_from_bson)
            .ok_or_else(|| {
                ViewerError::DocumentError(format!(
                    "scene {timestamp} has no usable `{}`",
                    self.image_field
                ))
            })?;
        Ok(SceneImage { timestamp, image })
    }

    pub fn persistent_object(&self, doc: &Document) -> PersistentObject {
        let mut object = PersistentObject {
            id: doc.get("_id").map(display_bson).unwrap_or_default(),
            timestamp: None,
            image: None,
            attributes: Vec::new(),
        };
        for (name, value) in doc {
            if name == "_id" {
                continue;
            }
            if *name == self.timestamp_field {
                object.timestamp = timestamp_from_bson(value);
            } else if *name == self.image_field {
                object.image = image_from_bson(value);
            } else {
                object.attributes.push(ObjectAttribute {
                    name: name.clone(),
                    value: display_bson(value),
                });
            }
        }
        object
    }

    fn scene_projection(&self) -> Document {
        let mut projection = Document::new();
        projection.insert(self.timestamp_field.clone(), 1);
        projection.insert(self.image_field.clone(), 1);
        projection
    }

    /// `$in` filter matching the scenes of `timestamps` in the encoding they
    /// were stored with; unseen timestamps are matched as int64.
    fn scene_filter(&self, timestamps: &[Timestamp], stored: &StoredTimestamps) -> Document {
        let values: Vec<Bson> = timestamps
            .iter()
            .flat_map(|ts| {
                stored
                    .get(ts)
                    .cloned()
                    .unwrap_or_else(|| vec![Bson::Int64(*ts)])
            })
            .collect();
        let mut filter = Document::new();
        filter.insert(self.timestamp_field.clone(), doc! { "$in": values });
        filter
    }
}

pub fn timestamp_from_bson(value: &Bson) -> Option<Timestamp> {
    match value {
        Bson::Int64(v) => Some(*v),
        Bson::Int32(v) => Some(i64::from(*v)),
        Bson::Double(v) if v.is_finite() => Some(*v as i64),
        Bson::DateTime(dt) => dt.timestamp_millis().checked_mul(1_000_000),
        Bson::Timestamp(ts) => i64::from(ts.time).checked_mul(1_000_000_000),
        Bson::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn image_from_bson(value: &Bson) -> Option<EncodedImage> {
    match value {
        Bson::Binary(bin) => Some(EncodedImage::from_bytes(&bin.bytes)),
        Bson::String(s) if !s.is_empty() => Some(EncodedImage::from_base64(s)),
        // images stored as `{ data: <binary>, ... }`
        Bson::Document(d) => d.get("data").and_then(image_from_bson),
        _ => None,
    }
}

fn display_bson(value: &Bson) -> String {
    match value {
        Bson::String(s) => s.clone(),
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::Binary(bin) => format!("<{} bytes>", bin.bytes.len()),
        Bson::Null => String::new(),
        other => other.clone().into_relaxed_extjson().to_string(),
    }
}

/// Scene source reading the MongoDB database written by the perception pipeline.
pub struct MongoSource {
    scenes: Collection<Document>,
    objects: Collection<Document>,
    layout: DocumentLayout,
    stored: RwLock<StoredTimestamps>,
}

impl MongoSource {
    /// Creates the client; the driver connects lazily on the first query.
    pub async fn connect(cfg: &MongoConfig) -> Result<Self, ViewerError> {
        let client = Client::with_uri_str(&cfg.uri).await?;
        let db = client.database(&cfg.database);
        info!(
            database = %cfg.database,
            scene_collection = %cfg.scene_collection,
            object_collection = %cfg.object_collection,
            "MongoDB client created"
        );
        Ok(Self {
            scenes: db.collection(&cfg.scene_collection),
            objects: db.collection(&cfg.object_collection),
            layout: DocumentLayout::from_config(cfg),
            stored: RwLock::new(HashMap::new()),
        })
    }
}

#[async_trait]
impl SceneSource for MongoSource {
    async fn timestamps(&self) -> Result<Vec<Timestamp>, ViewerError> {
        let values = self
            .scenes
            .distinct(&self.layout.timestamp_field, doc! {})
            .await?;
        let mut stored = StoredTimestamps::with_capacity(values.len());
        for value in values {
            match timestamp_from_bson(&value) {
                Some(ts) => stored.entry(ts).or_default().push(value),
                None => warn!(value = %value, "Skipping unusable scene timestamp"),
            }
        }
        let mut timestamps: Vec<Timestamp> = stored.keys().copied().collect();
        timestamps.sort_unstable();
        *self.stored.write().await = stored;
        debug!(count = timestamps.len(), "Loaded scene timestamps");
        Ok(timestamps)
    }

    async fn scene_images(
        &self,
        timestamps: &[Timestamp],
    ) -> Result<Vec<SceneImage>, ViewerError> {
        if timestamps.is_empty() {
            return Ok(Vec::new());
        }

        let filter = self
            .layout
            .scene_filter(timestamps, &*self.stored.read().await);
        let docs: Vec<Document> = self
            .scenes
            .find(filter)
            .projection(self.layout.scene_projection())
            .await?
            .try_collect()
            .await?;

        let mut by_timestamp = HashMap::with_capacity(docs.len());
        for doc in &docs {
            match self.layout.scene_image(doc) {
                Ok(scene) => {
                    by_timestamp.entry(scene.timestamp).or_insert(scene);
                }
                Err(e) => warn!(error = %e, "Skipping scene document"),
            }
        }

        Ok(timestamps
            .iter()
            .filter_map(|ts| by_timestamp.remove(ts))
            .collect())
    }

    async fn persistent_objects(&self) -> Result<Vec<PersistentObject>, ViewerError> {
        let docs: Vec<Document> = self.objects.find(doc! {}).await?.try_collect().await?;
        debug!(count = docs.len(), "Loaded persistent objects");
        Ok(docs
            .iter()
            .map(|doc| self.layout.persistent_object(doc))
            .collect())
    }
}
