//! Template rendering
//!
//! A thin wrapper over Tera. The page templates are embedded into the
//! binary, loaded once at startup; `render` takes a template name and a
//! prepared context.

use rust_embed::RustEmbed;
use tera::{Context, Tera};

mod error;

pub use error::RenderError;

/// Embedded page templates
#[derive(RustEmbed)]
#[folder = "templates/"]
#[include = "*.html"]
struct Templates;

/// Template engine for rendering the wizard pages
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Load all embedded templates. Fails when a template does not parse,
    /// so broken markup is caught at startup instead of per request.
    pub fn new() -> Result<Self, RenderError> {
        let mut sources = Vec::new();
        for name in Templates::iter() {
            let file = Templates::get(&name)
                .ok_or_else(|| RenderError::InvalidTemplate(name.to_string()))?;
            let source = String::from_utf8(file.data.into_owned())
                .map_err(|e| RenderError::InvalidTemplate(format!("{name}: {e}")))?;
            sources.push((name.to_string(), source));
        }

        let mut tera = Tera::default();
        tera.add_raw_templates(sources)
            .map_err(|e| RenderError::Template(e.to_string()))?;
        Ok(Self { tera })
    }

    pub fn render(&self, template: &str, context: &Context) -> Result<String, RenderError> {
        self.tera
            .render(template, context)
            .map_err(|e| RenderError::Template(format!("{template}: {e:#}")))
    }
}
