// src/common/messages.rs
//! Message catalogs for validation errors
//!
//! Catalogs use the `.properties` format. `errors.properties` is the base
//! catalog; `errors_<lang>.properties` files hold translations and fall back to
//! the base catalog for missing keys. An error is rendered by trying each of
//! its codes (most specific first) against the catalogs and substituting the
//! error arguments into `{0}`, `{1}`, ... placeholders.
//!
//! Values may use the usual `.properties` escapes (`\uXXXX`, `\n`, `\t`,
//! `\=`, `\:`, `\\`) and a trailing `\` continues an entry on the next line.

use axum::http::{header::ACCEPT_LANGUAGE, HeaderMap};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

use super::validation::{MessageArg, ValidationError};

const BASE_CATALOG_NAME: &str = "errors";
/// Language of the base catalog
const BASE_LOCALE: &str = "en";
const EMBEDDED_BASE: &str = include_str!("../../resources/messages/errors.properties");
const EMBEDDED_TRANSLATIONS: &[(&str, &str)] = &[(
    "ko",
    include_str!("../../resources/messages/errors_ko.properties"),
)];

#[derive(Debug, Error)]
pub enum MessageSourceError {
    #[error("Failed to read message catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid entry in message catalog {name} at line {line}: {content}")]
    Parse {
        name: String,
        line: usize,
        content: String,
    },
}

#[derive(Debug, Default, Clone)]
pub struct MessageCatalog {
    entries: HashMap<String, String>,
}

impl MessageCatalog {
    pub fn parse(name: &str, content: &str) -> Result<Self, MessageSourceError> {
        let mut entries = HashMap::new();
        let parse_error = |line: usize, content: &str| MessageSourceError::Parse {
            name: name.to_string(),
            line,
            content: content.to_string(),
        };

        let mut lines = content.lines().enumerate();
        while let Some((index, line)) = lines.next() {
            let mut logical = line.trim_start().to_string();
            if logical.is_empty() || logical.starts_with('#') || logical.starts_with('!') {
                continue;
            }

            while ends_with_continuation(&logical) {
                logical.pop();
                match lines.next() {
                    Some((_, next)) => logical.push_str(next.trim_start()),
                    None => break,
                }
            }

            let (key, value) =
                split_entry(&logical).ok_or_else(|| parse_error(index + 1, logical.trim()))?;
            let key = unescape(key.trim()).ok_or_else(|| parse_error(index + 1, logical.trim()))?;
            let value =
                unescape(value.trim()).ok_or_else(|| parse_error(index + 1, logical.trim()))?;

            entries.insert(key, value);
        }

        Ok(Self { entries })
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.entries.get(code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    fn extend(&mut self, other: MessageCatalog) {
        self.entries.extend(other.entries);
    }
}

#[derive(Debug, Clone)]
pub struct MessageSource {
    default_locale: String,
    base: MessageCatalog,
    translations: HashMap<String, MessageCatalog>,
}

impl MessageSource {
    /// Catalogs compiled into the binary
    pub fn embedded(default_locale: &str) -> Result<Self, MessageSourceError> {
        let base = MessageCatalog::parse(BASE_CATALOG_NAME, EMBEDDED_BASE)?;
        let mut translations = HashMap::new();
        for (locale, content) in EMBEDDED_TRANSLATIONS {
            let name = format!("{}_{}", BASE_CATALOG_NAME, locale);
            translations.insert(locale.to_string(), MessageCatalog::parse(&name, content)?);
        }

        Ok(Self {
            default_locale: default_locale.to_lowercase(),
            base,
            translations,
        })
    }

    /// Overlay `errors*.properties` files found in `dir` on top of the current catalogs
    pub fn with_overrides_from(mut self, dir: &Path) -> Result<Self, MessageSourceError> {
        let read_dir = fs::read_dir(dir).map_err(|source| MessageSourceError::Io {
            path: dir.display().to_string(),
            source,
        })?;

        for entry in read_dir {
            let entry = entry.map_err(|source| MessageSourceError::Io {
                path: dir.display().to_string(),
                source,
            })?;
            let path = entry.path();
            let Some(stem) = catalog_stem(&path) else {
                continue;
            };

            let content = fs::read_to_string(&path).map_err(|source| MessageSourceError::Io {
                path: path.display().to_string(),
                source,
            })?;
            let catalog = MessageCatalog::parse(&stem, &content)?;
            info!(catalog = %stem, entries = catalog.len(), "Loaded message catalog override");

            if stem == BASE_CATALOG_NAME {
                self.base.extend(catalog);
            } else if let Some(locale) = stem.strip_prefix("errors_") {
                self.translations
                    .entry(locale.to_lowercase())
                    .or_default()
                    .extend(catalog);
            }
        }

        Ok(self)
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    fn is_known_locale(&self, locale: &str) -> bool {
        locale == BASE_LOCALE || locale == self.default_locale || self.translations.contains_key(locale)
    }

    /// Picks the first `Accept-Language` tag with a catalog, else the default locale
    pub fn resolve_locale(&self, headers: &HeaderMap) -> String {
        let requested = headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("");

        requested
            .split(',')
            .filter_map(|tag| tag.split(';').next())
            .filter_map(|tag| tag.trim().split(['-', '_']).next())
            .map(str::to_lowercase)
            .find(|lang| self.is_known_locale(lang))
            .unwrap_or_else(|| self.default_locale.clone())
    }

    pub fn lookup(&self, code: &str, locale: &str) -> Option<&str> {
        self.translations
            .get(locale)
            .and_then(|catalog| catalog.get(code))
            .or_else(|| self.base.get(code))
    }

    /// Renders `error` for `locale`, falling back to its bare code
    pub fn message(&self, error: &ValidationError, locale: &str) -> String {
        for code in error.codes() {
            if let Some(template) = self.lookup(&code, locale) {
                return format_message(template, &error.args);
            }
        }

        debug!(code = %error.code, locale = %locale, "No message found for error codes");
        error.code.clone()
    }
}

/// An odd number of trailing backslashes continues the entry
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Splits at the first unescaped `=` or `:`
fn split_entry(line: &str) -> Option<(&str, &str)> {
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        match c {
            '\\' if !escaped => escaped = true,
            '=' | ':' if !escaped => return Some((&line[..i], &line[i + 1..])),
            _ => escaped = false,
        }
    }
    None
}

/// Resolves backslash escapes; `None` on a malformed `\u` sequence
fn unescape(raw: &str) -> Option<String> {
    let mut output = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            output.push(c);
            continue;
        }
        match chars.next() {
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                if hex.len() != 4 {
                    return None;
                }
                let code = u32::from_str_radix(&hex, 16).ok()?;
                output.push(char::from_u32(code)?);
            }
            Some('n') => output.push('\n'),
            Some('t') => output.push('\t'),
            Some('r') => output.push('\r'),
            Some('f') => output.push('\u{c}'),
            Some(other) => output.push(other),
            None => {}
        }
    }

    Some(output)
}

fn catalog_stem(path: &Path) -> Option<String> {
    if path.extension()?.to_str()? != "properties" {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    if stem == BASE_CATALOG_NAME || stem.starts_with("errors_") {
        Some(stem.to_string())
    } else {
        None
    }
}

/// Substitutes `{n}` placeholders; unknown indexes are left untouched
pub fn format_message(template: &str, args: &[MessageArg]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        output.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let substituted = after.find('}').and_then(|end| {
            let index: usize = after[..end].trim().parse().ok()?;
            let arg = args.get(index)?;
            Some((format_arg(arg), end))
        });

        match substituted {
            Some((text, end)) => {
                output.push_str(&text);
                rest = &after[end + 1..];
            }
            None => {
                output.push('{');
                rest = after;
            }
        }
    }

    output.push_str(rest);
    output
}

fn format_arg(arg: &MessageArg) -> String {
    match arg {
        MessageArg::Int(n) => group_thousands(*n),
        MessageArg::Text(s) => s.clone(),
    }
}

/// `1234567` -> `1,234,567`
fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        grouped.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
