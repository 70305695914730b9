//! INI serialization logic for converting `ConfigFile` → INI string.

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    format!(
        r#"[cache]
; Cache generation name. Bump it when the seed assets change; on the next
; activation every generation with a different name is deleted.
name = {}

[origin]
; Origin the worker is scoped to. Requests to any other scheme, host or
; port bypass the cache entirely.
url = {}

[seed]
; Comma-separated, origin-relative paths stored at install.
; Install fails and nothing is stored if any of them cannot be fetched.
assets = {}

[network]
; Timeout in seconds for HTTP requests (default: 30)
timeout_secs = {}
"#,
        config.cache.name,
        config.origin.url,
        config.seed.assets.join(", "),
        config.network.timeout_secs,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_every_section() {
        let content = to_config_string(&ConfigFile::default());

        for section in ["[cache]", "[origin]", "[seed]", "[network]"] {
            assert!(content.contains(section), "missing {}", section);
        }
        assert!(content.contains("name = wisdom-weaver-v1.0.0"));
        assert!(content.contains("url = http://localhost:5000/"));
        assert!(content.contains("assets = /, /manifest.json, /static/icon-72.png"));
    }

    #[test]
    fn test_output_parses_back() {
        let content = to_config_string(&ConfigFile::default());
        let ini = ini::Ini::load_from_str(&content).unwrap();

        assert_eq!(
            super::super::parser::parse_ini(&ini).unwrap(),
            ConfigFile::default()
        );
    }
}
