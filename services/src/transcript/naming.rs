//! Channel and file names from a category's name pattern.
//!
//! Patterns use brace tokens such as `ticket-{num}` or `{username}-{number}`.
//! Matching ignores case, whitespace inside the braces and repeated braces,
//! so `{{ UserName }}` works too. Anything that is not a known token is
//! copied as is.

use db::models::archived_user;
use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

/// What tokens can be resolved from.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameContext<'a> {
    pub username: Option<&'a str>,
    pub display_name: Option<&'a str>,
    pub number: i32,
}

impl<'a> NameContext<'a> {
    pub fn new(creator: Option<&'a archived_user::Model>, number: i32) -> Self {
        Self {
            username: creator.map(|u| u.username.as_str()),
            display_name: creator.and_then(|u| u.display_name.as_deref()),
            number,
        }
    }
}

type TokenResolver = fn(&NameContext<'_>) -> String;

fn username(ctx: &NameContext<'_>) -> String {
    ctx.username.unwrap_or_default().to_owned()
}

// Users without a display name are shown by their username.
fn display_name(ctx: &NameContext<'_>) -> String {
    ctx.display_name
        .or(ctx.username)
        .unwrap_or_default()
        .to_owned()
}

fn number(ctx: &NameContext<'_>) -> String {
    ctx.number.to_string()
}

/// Token patterns and their values, applied in order.
static TOKENS: Lazy<Vec<(Regex, TokenResolver)>> = Lazy::new(|| {
    let token = |pattern: &str| {
        Regex::new(&format!(r"(?i)\{{+\s*{pattern}\s*\}}+")).expect("token pattern is valid")
    };

    vec![
        (token("(?:user)?name"), username as TokenResolver),
        (token("(?:nick|display)(?:name)?"), display_name as TokenResolver),
        (token("num(?:ber)?"), number as TokenResolver),
    ]
});

pub fn resolve_channel_name(pattern: &str, ctx: &NameContext<'_>) -> String {
    TOKENS
        .iter()
        .fold(pattern.to_owned(), |name, (regex, resolve)| {
            regex.replace_all(&name, NoExpand(&resolve(ctx))).into_owned()
        })
}

/// Output extension: the last dot-separated segment of the template ID
/// (`transcript.md` → `md`).
pub fn file_extension(template_id: &str) -> &str {
    template_id.rsplit('.').next().unwrap_or(template_id)
}

pub fn file_name(channel_name: &str, template_id: &str) -> String {
    format!("{channel_name}.{}", file_extension(template_id))
}
