//! Turns screen models into text.
//!
//! Screens are plain [`serde::Serialize`] values rendered through [upon]
//! templates. Templates may `{% include %}` each other (every screen includes
//! `header` and `notices`) and can draw simple charts with the functions in
//! [`addons`].

pub mod addons;
mod assets;
pub mod error;
mod templates;

use crate::error::{ErrorKind, Result};
use exn::{OptionExt, ResultExt};
use serde::Serialize;
pub use crate::templates::Templates;
use tracing::instrument;
use upon::Engine;

/// A compiled set of templates.
pub struct Renderer {
    engine: Engine<'static>,
}
impl Renderer {
    /// Compiles every template up front so syntax errors surface here rather
    /// than on the first render.
    pub fn new(templates: Templates) -> Result<Self> {
        let mut engine = Engine::new();
        addons::configure(&mut engine);
        for (name, source) in templates.into_sources() {
            let context = name.clone();
            engine.add_template(name, source).or_raise(|| ErrorKind::Compile(context))?;
        }
        Ok(Self { engine })
    }

    /// A renderer over the embedded templates only.
    pub fn builtin() -> Result<Self> {
        Self::new(Templates::builtins()?)
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.engine.get_template(name).is_some()
    }

    #[instrument(skip(self, context))]
    pub fn render(&self, name: &str, context: &impl Serialize) -> Result<String> {
        let template = self.engine.get_template(name).ok_or_raise(|| ErrorKind::TemplateNotFound(name.to_string()))?;
        template.render(context).to_string().or_raise(|| ErrorKind::Render(name.to_string()))
    }
}
