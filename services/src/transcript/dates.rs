//! Locale-aware date formatting for transcripts.
//!
//! All instants are shown in UTC. A guild locale that is not in the table
//! below falls back to its language, then to [`FALLBACK_LOCALE`].

use chrono::{DateTime, Locale, Utc};

pub const FALLBACK_LOCALE: &str = "en-GB";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// Weekday, day, month name and year, followed by the time.
    Full,
    /// Numeric date followed by the time.
    Short,
}

struct LocaleFormat {
    tag: &'static str,
    locale: Locale,
    full: &'static str,
    short: &'static str,
}

const fn entry(
    tag: &'static str,
    locale: Locale,
    full: &'static str,
    short: &'static str,
) -> LocaleFormat {
    LocaleFormat {
        tag,
        locale,
        full,
        short,
    }
}

static FORMATS: &[LocaleFormat] = &[
    entry("en-gb", Locale::en_GB, "%A %-d %B %Y at %H:%M:%S UTC", "%d/%m/%Y, %H:%M:%S UTC"),
    entry("en-us", Locale::en_US, "%A, %B %-d, %Y at %-I:%M:%S %p UTC", "%-m/%-d/%y, %-I:%M:%S %p UTC"),
    entry("de", Locale::de_DE, "%A, %-d. %B %Y um %H:%M:%S UTC", "%d.%m.%y, %H:%M:%S UTC"),
    entry("fr", Locale::fr_FR, "%A %-d %B %Y à %H:%M:%S UTC", "%d/%m/%Y %H:%M:%S UTC"),
    entry("es-es", Locale::es_ES, "%A, %-d de %B de %Y, %H:%M:%S (UTC)", "%-d/%-m/%y, %H:%M:%S (UTC)"),
    entry("it", Locale::it_IT, "%A %-d %B %Y alle ore %H:%M:%S UTC", "%d/%m/%y, %H:%M:%S UTC"),
    entry("nl", Locale::nl_NL, "%A %-d %B %Y om %H:%M:%S UTC", "%d-%m-%Y, %H:%M:%S UTC"),
    entry("pl", Locale::pl_PL, "%A, %-d %B %Y %H:%M:%S UTC", "%d.%m.%Y, %H:%M:%S UTC"),
    entry("pt-br", Locale::pt_BR, "%A, %-d de %B de %Y às %H:%M:%S UTC", "%d/%m/%Y, %H:%M:%S UTC"),
    entry("ru", Locale::ru_RU, "%A, %-d %B %Y г. в %H:%M:%S UTC", "%d.%m.%Y, %H:%M:%S UTC"),
    entry("ja", Locale::ja_JP, "%Y年%-m月%-d日%A %H:%M:%S UTC", "%Y/%m/%d %H:%M:%S UTC"),
    entry("zh-cn", Locale::zh_CN, "%Y年%-m月%-d日%A UTC %H:%M:%S", "%Y/%-m/%-d UTC %H:%M:%S"),
];

fn lookup(tag: &str) -> Option<&'static LocaleFormat> {
    FORMATS.iter().find(|f| f.tag == tag)
}

fn resolve(locale: &str) -> &'static LocaleFormat {
    let tag = locale.trim().replace('_', "-").to_ascii_lowercase();
    let language = tag.split('-').next().unwrap_or_default();

    lookup(&tag)
        .or_else(|| lookup(language))
        .or_else(|| FORMATS.iter().find(|f| f.tag.split('-').next() == Some(language)))
        .or_else(|| lookup(&FALLBACK_LOCALE.to_ascii_lowercase()))
        .unwrap_or(&FORMATS[0])
}

/// Formats `instant` in UTC for `locale` in the given style.
pub fn format_instant(instant: DateTime<Utc>, locale: &str, style: DateStyle) -> String {
    let format = resolve(locale);
    let pattern = match style {
        DateStyle::Full => format.full,
        DateStyle::Short => format.short,
    };
    instant.format_localized(pattern, format.locale).to_string()
}
