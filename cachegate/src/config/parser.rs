//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use url::Url;

use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [cache] section
    if let Some(section) = ini.section(Some("cache")) {
        if let Some(v) = section.get("name") {
            let v = v.trim();
            if v.is_empty() {
                return Err(invalid("cache", "name", v, "must not be empty"));
            }
            config.cache.name = v.to_string();
        }
    }

    // [origin] section
    if let Some(section) = ini.section(Some("origin")) {
        if let Some(v) = section.get("url") {
            config.origin.url = parse_origin(v.trim())?;
        }
    }

    // [seed] section
    if let Some(section) = ini.section(Some("seed")) {
        if let Some(v) = section.get("assets") {
            config.seed.assets = parse_asset_list(v);
        }
    }

    // [network] section
    if let Some(section) = ini.section(Some("network")) {
        if let Some(v) = section.get("timeout_secs") {
            config.network.timeout_secs = match v.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(invalid(
                        "network",
                        "timeout_secs",
                        v,
                        "must be a positive integer (seconds)",
                    ))
                }
            };
        }
    }

    Ok(config)
}

fn parse_origin(value: &str) -> Result<Url, ConfigFileError> {
    let url = Url::parse(value)
        .map_err(|e| invalid("origin", "url", value, &format!("not a valid URL: {}", e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("origin", "url", value, "must be an http or https URL"));
    }
    Ok(url)
}

/// Split a comma-separated path list, dropping blank entries.
fn parse_asset_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
