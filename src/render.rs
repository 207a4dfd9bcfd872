use crate::config::BasicConfig;
use crate::error::ViewerError;
use minijinja::{Environment, context, path_loader};
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

pub const SCENES_TEMPLATE: &str = "scenes.html";
pub const OBJECTS_TEMPLATE: &str = "objects.html";
/// Debug failure page; always compiled in, even for directory-backed renderers.
pub const ERROR_TEMPLATE: &str = "error.html";

/// Page renderer over a minijinja environment.
///
/// Templates are either compiled into the binary or loaded from a directory.
/// With `reload`, a directory-backed renderer re-reads templates per call.
pub struct Renderer {
    env: Environment<'static>,
    reload_dir: Option<PathBuf>,
}

impl Renderer {
    pub fn embedded() -> Result<Self, ViewerError> {
        let mut env = Environment::new();
        env.add_template(SCENES_TEMPLATE, include_str!("../templates/scenes.html"))?;
        env.add_template(OBJECTS_TEMPLATE, include_str!("../templates/objects.html"))?;
        add_error_template(&mut env)?;
        Ok(Self {
            env,
            reload_dir: None,
        })
    }

    pub fn from_dir(dir: PathBuf, reload: bool) -> Result<Self, ViewerError> {
        Ok(Self {
            env: dir_environment(&dir)?,
            reload_dir: reload.then_some(dir),
        })
    }

    pub fn from_config(basic: &BasicConfig) -> Result<Self, ViewerError> {
        let Some(dir) = basic.template_dir.as_ref() else {
            return Self::embedded();
        };
        if !dir.is_dir() {
            return Err(ViewerError::IoError(io::Error::new(
                io::ErrorKind::NotFound,
                format!("template directory not found: {}", dir.display()),
            )));
        }
        info!(
            template_dir = %dir.display(),
            reload = basic.reload,
            "Loading templates from directory"
        );
        Self::from_dir(dir.clone(), basic.reload)
    }

    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String, ViewerError> {
        if let Some(dir) = self.reload_dir.as_ref() {
            let env = dir_environment(dir)?;
            return Ok(env.get_template(name)?.render(ctx)?);
        }
        Ok(self.env.get_template(name)?.render(ctx)?)
    }

    /// Failure page naming `detail`, HTML-escaped.
    pub fn render_error(&self, detail: &str) -> Result<String, ViewerError> {
        self.render(ERROR_TEMPLATE, context! { detail })
    }
}

fn add_error_template(env: &mut Environment<'static>) -> Result<(), ViewerError> {
    env.add_template(ERROR_TEMPLATE, include_str!("../templates/error.html"))?;
    Ok(())
}

fn dir_environment(dir: &Path) -> Result<Environment<'static>, ViewerError> {
    let mut env = Environment::new();
    env.set_loader(path_loader(dir));
    add_error_template(&mut env)?;
    Ok(env)
}
