//! Locale configuration and attribute-path normalization.
//!
//! The locale list is site-level configuration: hosts either call
//! [`configure_locales`] during startup or load it from the environment with
//! [`locales_from_env`]. Individual fields may override the list per
//! decoration call; see [`resolve_locales`].

use std::env;

use parking_lot::RwLock;

use crate::error::LocaleError;

/// Environment variable holding the comma-separated locale list.
pub const LOCALES_ENV_VAR: &str = "TRANSLATABLE_LOCALES";

/// Process-wide ordered locale list, set once during host startup.
static LOCALES: RwLock<Vec<String>> = RwLock::new(Vec::new());

/// Validate that a locale code follows BCP 47 primary subtag format.
///
/// Accepts: lowercase alpha 2-3 chars, optionally followed by hyphen-separated
/// alphanumeric subtags (e.g., "en", "fr", "pt-br", "zh-hans").
fn validate_locale_code(code: &str) -> Result<(), LocaleError> {
    if code.is_empty() || code.len() > 12 {
        return Err(LocaleError::InvalidCode(code.to_string()));
    }

    let mut parts = code.split('-');

    // Primary subtag: 2-3 lowercase letters
    match parts.next() {
        Some(primary)
            if (2..=3).contains(&primary.len())
                && primary.bytes().all(|b| b.is_ascii_lowercase()) => {}
        _ => return Err(LocaleError::InvalidCode(code.to_string())),
    }

    // Optional subtags: alphanumeric, 1-8 chars each
    for subtag in parts {
        if subtag.is_empty() || subtag.len() > 8 || !subtag.bytes().all(|b| b.is_ascii_alphanumeric())
        {
            return Err(LocaleError::InvalidCode(code.to_string()));
        }
    }

    Ok(())
}

/// Set the process-wide locale list.
///
/// Order is significant (it defines per-locale editor ordering). Codes are
/// validated and duplicates rejected.
pub fn configure_locales(codes: &[&str]) -> Result<(), LocaleError> {
    if codes.is_empty() {
        return Err(LocaleError::Empty);
    }

    let mut seen: Vec<String> = Vec::with_capacity(codes.len());
    for code in codes {
        validate_locale_code(code)?;
        if seen.iter().any(|c| c == code) {
            return Err(LocaleError::Duplicate((*code).to_string()));
        }
        seen.push((*code).to_string());
    }

    *LOCALES.write() = seen;
    Ok(())
}

/// Load the locale list from the `TRANSLATABLE_LOCALES` environment variable.
///
/// The value is comma-separated (e.g., `en,fr,de`); surrounding whitespace per
/// entry is ignored. Returns the parsed list without touching the global
/// configuration so hosts can inspect it first.
pub fn locales_from_env() -> Result<Vec<String>, LocaleError> {
    let raw = env::var(LOCALES_ENV_VAR).unwrap_or_default();
    let codes: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if codes.is_empty() {
        return Err(LocaleError::Empty);
    }
    for code in &codes {
        validate_locale_code(code)?;
    }
    Ok(codes)
}

/// Resolve the effective locale list for one decoration call.
///
/// A non-empty override wins over the configured list. The result is always
/// deduplicated, preserving first-occurrence order.
pub fn resolve_locales(override_locales: &[&str]) -> Vec<String> {
    let source: Vec<String> = if override_locales.is_empty() {
        LOCALES.read().clone()
    } else {
        override_locales.iter().map(|s| (*s).to_string()).collect()
    };

    let mut resolved: Vec<String> = Vec::with_capacity(source.len());
    for code in source {
        if !resolved.contains(&code) {
            resolved.push(code);
        }
    }
    resolved
}

/// Normalize an attribute path to the canonical dot separator.
///
/// Nested attributes may arrive with an arrow separator (`meta->description`);
/// lookups always use dot paths (`meta.description`).
pub fn normalize_attribute(attribute: &str) -> String {
    attribute.replace("->", ".")
}
