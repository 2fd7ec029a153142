//! Template rendering of a reconstructed ticket.
//!
//! The template is compiled once into a [`TranscriptRenderer`] that is
//! shared by every request. Output is written verbatim: the registry is
//! configured with `no_escape`, since transcripts are plain text or markup
//! that the template author controls.

use super::dates::{format_instant, DateStyle, FALLBACK_LOCALE};
use super::TranscriptTicket;
use chrono::{DateTime, Utc};
use handlebars::{
    no_escape, Context, Handlebars, Helper, HelperDef, JsonValue, RenderContext, RenderError,
    ScopedJson, TemplateError,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

const TEMPLATE_NAME: &str = "transcript";

#[derive(Debug, Error)]
pub enum TemplateLoadError {
    #[error("Failed to read template {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid transcript template: {0}")]
    Syntax(#[from] TemplateError),
}

/// Everything a template can refer to.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptContext<'a> {
    pub ticket: &'a TranscriptTicket,
    pub channel_name: &'a str,
    /// Pinned labels joined with `", "`.
    pub pinned: &'a str,
    pub guild_name: Option<&'a str>,
    /// Locale the date helpers format with.
    pub locale: &'a str,
}

/// Zero-argument helper that formats a date field of the current context.
///
/// Inside `{{#each ticket.archivedMessages}}` the field is read from the
/// message, inside `{{#with ticket}}` from the ticket. Missing or unparsable
/// values render as nothing.
struct DateHelper {
    field: &'static str,
    style: DateStyle,
}

impl HelperDef for DateHelper {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        _: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'rc>, RenderError> {
        let locale = ctx
            .data()
            .get("locale")
            .and_then(JsonValue::as_str)
            .unwrap_or(FALLBACK_LOCALE);

        let value = rc.evaluate(ctx, self.field)?;
        let formatted = value
            .as_json()
            .as_str()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|instant| format_instant(instant.with_timezone(&Utc), locale, self.style))
            .unwrap_or_default();

        Ok(ScopedJson::Derived(JsonValue::String(formatted)))
    }
}

pub struct TranscriptRenderer {
    registry: Handlebars<'static>,
}

impl TranscriptRenderer {
    /// Compiles a template from source.
    pub fn new(source: &str) -> Result<Self, TemplateLoadError> {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(no_escape);
        registry.register_helper(
            "createdAtFull",
            Box::new(DateHelper {
                field: "createdAt",
                style: DateStyle::Full,
            }),
        );
        registry.register_helper(
            "closedAtFull",
            Box::new(DateHelper {
                field: "closedAt",
                style: DateStyle::Full,
            }),
        );
        registry.register_helper(
            "createdAtTimestamp",
            Box::new(DateHelper {
                field: "createdAt",
                style: DateStyle::Short,
            }),
        );
        registry.register_template_string(TEMPLATE_NAME, source)?;

        Ok(Self { registry })
    }

    /// Reads and compiles a template file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TemplateLoadError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| TemplateLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::new(&source)
    }

    pub fn render(&self, context: &TranscriptContext<'_>) -> Result<String, RenderError> {
        self.registry.render(TEMPLATE_NAME, context)
    }
}

impl std::fmt::Debug for TranscriptRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranscriptRenderer").finish_non_exhaustive()
    }
}
