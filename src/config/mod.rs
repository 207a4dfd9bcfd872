mod basic;
mod mongo;
mod pagination;

pub use basic::BasicConfig;
pub use mongo::MongoConfig;
pub use pagination::PaginationConfig;

use crate::error::ViewerError;
use figment::{
    Figment, Metadata, Profile, Provider,
    providers::{Env, Format, Serialized, Toml},
    value::{Dict, Map, Value},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Core server configuration (see `basic` table in config.toml).
    #[serde(default)]
    pub basic: BasicConfig,

    /// Scene database connection (see `mongo` table in config.toml).
    #[serde(default)]
    pub mongo: MongoConfig,

    /// Page link presentation (see `pagination` table in config.toml).
    #[serde(default)]
    pub pagination: PaginationConfig,
}

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "SCENEVIEW_";

impl Config {
    /// Builds a Figment that merges defaults, the TOML file (if present) and
    /// `SCENEVIEW_`-prefixed environment variables (`__` separates tables).
    pub fn figment(path: &Path) -> Figment {
        let figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let figment = if path.is_file() {
            figment.merge(LowercaseKeys(Toml::file(path)))
        } else {
            figment
        };
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Loads configuration from `path`; a missing file leaves the defaults in place.
    pub fn load(path: &Path) -> Result<Self, ViewerError> {
        let cfg: Self = Self::figment(path).extract()?;
        Ok(cfg)
    }
}

/// Lower-cases every key of the wrapped provider so file keys line up with
/// the env provider, which lower-cases its keys.
struct LowercaseKeys<P>(P);

impl<P: Provider> Provider for LowercaseKeys<P> {
    fn metadata(&self) -> Metadata {
        self.0.metadata()
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        Ok(self
            .0
            .data()?
            .into_iter()
            .map(|(profile, dict)| (profile, lowercase_dict(dict)))
            .collect())
    }

    fn profile(&self) -> Option<Profile> {
        self.0.profile()
    }
}

fn lowercase_dict(dict: Dict) -> Dict {
    dict.into_iter()
        .map(|(key, value)| {
            let value = match value {
                Value::Dict(tag, nested) => Value::Dict(tag, lowercase_dict(nested)),
                other => other,
            };
            (key.to_ascii_lowercase(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use sceneview_paginate::CssFramework;

    #[test]
    fn missing_file_yields_development_defaults() {
        Jail::expect_with(|_jail| {
            let cfg = Config::load(Path::new("absent.toml")).expect("defaults load");
            assert_eq!(cfg.basic.listen_port, 5000);
            assert!(cfg.basic.debug);
            assert_eq!(cfg.mongo.database, "Scenes_annotated");

            let settings = cfg.pagination.settings();
            assert_eq!(settings.css_framework, CssFramework::Bootstrap3);
            assert_eq!(settings.link_size, "sm");
            assert!(!settings.show_single_page);
            Ok(())
        });
    }

    #[test]
    fn toml_file_and_environment_are_merged() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "viewer.toml",
                r#"
                [basic]
                listen_port = 8080

                [pagination]
                CSS_FRAMEWORK = "bootstrap4"
                LINK_SIZE = "lg"
                per_page = 25
                "#,
            )?;
            jail.set_env("SCENEVIEW_MONGO__DATABASE", "Scenes_live");

            let cfg = Config::load(Path::new("viewer.toml")).expect("config load");
            assert_eq!(cfg.basic.listen_port, 8080);
            assert_eq!(cfg.mongo.database, "Scenes_live");
            assert_eq!(cfg.pagination.per_page, 25);

            let settings = cfg.pagination.settings();
            assert_eq!(settings.css_framework, CssFramework::Bootstrap4);
            assert_eq!(settings.link_size, "lg");
            assert!(!settings.show_single_page);
            Ok(())
        });
    }

    #[test]
    fn environment_overrides_upper_case_file_keys() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "viewer.toml",
                r#"
                [pagination]
                CSS_FRAMEWORK = "bootstrap3"
                SHOW_SINGLE_PAGE = false
                "#,
            )?;
            jail.set_env("SCENEVIEW_PAGINATION__CSS_FRAMEWORK", "bootstrap4");
            jail.set_env("SCENEVIEW_PAGINATION__SHOW_SINGLE_PAGE", "true");

            let cfg = Config::load(Path::new("viewer.toml")).expect("config load");
            let settings = cfg.pagination.settings();
            assert_eq!(settings.css_framework, CssFramework::Bootstrap4);
            assert!(settings.show_single_page);
            Ok(())
        });
    }

    #[test]
    fn unknown_css_framework_is_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "viewer.toml",
                r#"
                [pagination]
                css_framework = "tailwind"
                "#,
            )?;
            assert!(Config::load(Path::new("viewer.toml")).is_err());
            Ok(())
        });
    }
}
