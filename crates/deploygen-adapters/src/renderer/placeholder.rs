//! `{{NAME}}` substitution renderer.

use deploygen_core::{
    application::ports::TemplateRenderer,
    domain::{ConfigTemplate, RenderContext},
    error::DeployResult,
};
use tracing::{instrument, trace};

/// Renderer using literal placeholder substitution.
///
/// Each template only sees the values it declares, so a credential can
/// never leak into a file whose template did not ask for it.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderRenderer;

impl PlaceholderRenderer {
    /// Create a new placeholder renderer.
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for PlaceholderRenderer {
    #[instrument(skip_all, fields(template = template.name, format = %template.format))]
    fn render(&self, template: &ConfigTemplate, context: &RenderContext) -> DeployResult<String> {
        template.validate()?;
        let scoped = context.restricted_to(template)?;
        trace!(values = template.placeholders.len(), "Context narrowed");
        Ok(scoped.render(template)?)
    }
}
