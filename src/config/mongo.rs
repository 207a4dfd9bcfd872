use serde::{Deserialize, Serialize};

/// MongoDB connection and document layout of the scene database.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MongoConfig {
    /// TOML: `mongo.uri`. Default: `mongodb://localhost:27017`.
    #[serde(default = "default_uri")]
    pub uri: String,

    /// TOML: `mongo.database`. Default: `Scenes_annotated`.
    #[serde(default = "default_database")]
    pub database: String,

    /// Collection holding one document per captured scene.
    /// TOML: `mongo.scene_collection`. Default: `scene`.
    #[serde(default = "default_scene_collection")]
    pub scene_collection: String,

    /// TOML: `mongo.object_collection`. Default: `persistent_objects`.
    #[serde(default = "default_object_collection")]
    pub object_collection: String,

    /// Field carrying the scene timestamp in both collections.
    /// TOML: `mongo.timestamp_field`. Default: `timestamp`.
    #[serde(default = "default_timestamp_field")]
    pub timestamp_field: String,

    /// Field carrying encoded image bytes (binary or base64 string).
    /// TOML: `mongo.image_field`. Default: `rgb`.
    #[serde(default = "default_image_field")]
    pub image_field: String,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            database: default_database(),
            scene_collection: default_scene_collection(),
            object_collection: default_object_collection(),
            timestamp_field: default_timestamp_field(),
            image_field: default_image_field(),
        }
    }
}

fn default_uri() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_database() -> String {
    "Scenes_annotated".to_string()
}

fn default_scene_collection() -> String {
    "scene".to_string()
}

fn default_object_collection() -> String {
    "persistent_objects".to_string()
}

fn default_timestamp_field() -> String {
    "timestamp".to_string()
}

fn default_image_field() -> String {
    "rgb".to_string()
}
