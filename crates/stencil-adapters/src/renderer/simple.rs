//! Simple variable substitution renderer.
//!
//! Syntax:
//!
//! - `{{name}}` is replaced by the bound value; lists are joined with `", "`
//! - `{{#name}}...{{/name}}` repeats the enclosed text once per list element,
//!   with `{{.}}` standing for the current element. A non-empty scalar counts
//!   as a one-element list, an empty scalar or list as none.
//!
//! Placeholders naming an unbound key are left untouched.

use stencil_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::{ContextValue, RenderContext},
    error::{StencilError, StencilResult},
};
use tracing::{instrument, trace};

/// Simple renderer using basic variable substitution.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleRenderer;

impl SimpleRenderer {
    /// Create a new simple renderer.
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for SimpleRenderer {
    #[instrument(skip_all, fields(bytes = body.len()))]
    fn render(&self, body: &str, context: &RenderContext) -> StencilResult<String> {
        let mut out = String::with_capacity(body.len());
        render_into(&mut out, body, context, None)?;
        Ok(out)
    }
}

fn render_into(
    out: &mut String,
    body: &str,
    ctx: &RenderContext,
    item: Option<&str>,
) -> StencilResult<()> {
    let mut rest = body;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);

        let after_open = &rest[start + 2..];
        let Some(end) = after_open.find("}}") else {
            // No closing braces: the remainder is literal text.
            out.push_str(&rest[start..]);
            return Ok(());
        };
        let raw_tag = &rest[start..start + end + 4];
        let tag = after_open[..end].trim();
        rest = &after_open[end + 2..];

        if let Some(name) = tag.strip_prefix('#') {
            let name = name.trim();
            let close = format!("{{{{/{name}}}}}");
            let Some(close_at) = rest.find(&close) else {
                return Err(rendering_failed(format!("unclosed section '{name}'")));
            };
            let inner = &rest[..close_at];
            rest = &rest[close_at + close.len()..];

            match ctx.get(name) {
                Some(value) => {
                    let items = section_items(value);
                    trace!(section = name, items = items.len(), "Expanding section");
                    for element in items {
                        render_into(out, inner, ctx, Some(element))?;
                    }
                }
                None => {
                    out.push_str(raw_tag);
                    out.push_str(inner);
                    out.push_str(&close);
                }
            }
        } else if let Some(name) = tag.strip_prefix('/') {
            return Err(rendering_failed(format!(
                "closing tag '{}' has no open section",
                name.trim()
            )));
        } else if tag == "." {
            out.push_str(item.unwrap_or(raw_tag));
        } else {
            match ctx.get(tag) {
                Some(ContextValue::Scalar(s)) => out.push_str(s),
                Some(ContextValue::List(items)) => out.push_str(&items.join(", ")),
                None => out.push_str(raw_tag),
            }
        }
    }

    out.push_str(rest);
    Ok(())
}

fn section_items(value: &ContextValue) -> Vec<&str> {
    match value {
        ContextValue::Scalar(s) if s.is_empty() => Vec::new(),
        ContextValue::Scalar(s) => vec![s.as_str()],
        ContextValue::List(items) => items.iter().map(String::as_str).collect(),
    }
}

fn rendering_failed(reason: String) -> StencilError {
    ApplicationError::RenderingFailed { reason }.into()
}
