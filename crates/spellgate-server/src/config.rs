//! Configuration for the spellgate service

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where non-POST requests are redirected.
pub const DEFAULT_REDIRECT_URL: &str = "https://github.com/roj1512/spell_checker";

/// Configuration for the spellgate service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Hunspell affix file
    #[serde(default = "default_affix_path")]
    pub affix_path: PathBuf,

    /// Hunspell dictionary file
    #[serde(default = "default_dictionary_path")]
    pub dictionary_path: PathBuf,

    /// Explicit libhunspell to load instead of searching well-known names
    #[serde(default)]
    pub hunspell_library: Option<PathBuf>,

    /// Access log file; `None` disables it
    #[serde(default = "default_access_log")]
    pub access_log: Option<PathBuf>,

    /// Redirect target for non-POST requests
    #[serde(default = "default_redirect_url")]
    pub redirect_url: String,

    /// Log filter used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Maximum request body size in bytes, checked before the payload is
    /// decoded. Bodies over the cap are rejected with 400 even if they hold
    /// a valid text padded with JSON whitespace. The default fits any valid
    /// text written with worst-case `\uXXXX` escaping.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_affix_path() -> PathBuf {
    PathBuf::from("./en_US.aff")
}

fn default_dictionary_path() -> PathBuf {
    PathBuf::from("./en_US.dic")
}

fn default_access_log() -> Option<PathBuf> {
    Some(PathBuf::from("access.log"))
}

fn default_redirect_url() -> String {
    DEFAULT_REDIRECT_URL.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_body_bytes() -> usize {
    64 * 1024 // 4096 chars, worst-case \uXXXX escaping, plus quotes
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            affix_path: default_affix_path(),
            dictionary_path: default_dictionary_path(),
            hunspell_library: None,
            access_log: default_access_log(),
            redirect_url: default_redirect_url(),
            log_level: default_log_level(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl ServerConfig {
    /// Build from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup, starting from defaults.
    ///
    /// - `PORT`: absent, unparsable or zero falls back to 3000
    /// - `HOST`
    /// - `SPELLGATE_AFFIX`, `SPELLGATE_DICT`, `SPELLGATE_HUNSPELL_LIB`
    /// - `SPELLGATE_ACCESS_LOG`: empty disables the access log
    /// - `SPELLGATE_REDIRECT_URL`, `SPELLGATE_LOG`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(port) = lookup("PORT").and_then(|p| p.trim().parse::<u16>().ok()) {
            if port != 0 {
                config.port = port;
            }
        }
        if let Some(host) = lookup("HOST").filter(|h| !h.is_empty()) {
            config.host = host;
        }
        if let Some(path) = lookup("SPELLGATE_AFFIX").filter(|p| !p.is_empty()) {
            config.affix_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("SPELLGATE_DICT").filter(|p| !p.is_empty()) {
            config.dictionary_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("SPELLGATE_HUNSPELL_LIB").filter(|p| !p.is_empty()) {
            config.hunspell_library = Some(PathBuf::from(path));
        }
        if let Some(path) = lookup("SPELLGATE_ACCESS_LOG") {
            config.access_log = (!path.is_empty()).then(|| PathBuf::from(path));
        }
        if let Some(url) = lookup("SPELLGATE_REDIRECT_URL").filter(|u| !u.is_empty()) {
            config.redirect_url = url;
        }
        if let Some(level) = lookup("SPELLGATE_LOG").filter(|l| !l.is_empty()) {
            config.log_level = level;
        }

        config
    }

    /// Builder pattern: set host
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Builder pattern: set port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Builder pattern: set affix and dictionary files
    pub fn with_dictionary(mut self, affix: impl Into<PathBuf>, dictionary: impl Into<PathBuf>) -> Self {
        self.affix_path = affix.into();
        self.dictionary_path = dictionary.into();
        self
    }

    /// Builder pattern: set or disable the access log
    pub fn with_access_log(mut self, path: Option<PathBuf>) -> Self {
        self.access_log = path;
        self
    }

    /// Builder pattern: set redirect target
    pub fn with_redirect_url(mut self, url: impl Into<String>) -> Self {
        self.redirect_url = url.into();
        self
    }

    /// Builder pattern: set body cap
    pub fn with_max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = limit;
        self
    }

    /// Get the HTTP bind address
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.affix_path, PathBuf::from("./en_US.aff"));
        assert_eq!(config.dictionary_path, PathBuf::from("./en_US.dic"));
        assert_eq!(config.access_log, Some(PathBuf::from("access.log")));
        assert_eq!(config.redirect_url, DEFAULT_REDIRECT_URL);
    }

    #[test]
    fn test_port_from_env() {
        assert_eq!(ServerConfig::from_lookup(lookup(&[("PORT", "8080")])).port, 8080);
    }

    #[test]
    fn test_invalid_port_falls_back() {
        for bad in ["", "abc", "70000", "-1", "0"] {
            let config = ServerConfig::from_lookup(lookup(&[("PORT", bad)]));
            assert_eq!(config.port, 3000, "PORT={bad:?}");
        }
    }

    #[test]
    fn test_missing_env_uses_defaults() {
        assert_eq!(ServerConfig::from_lookup(lookup(&[])), ServerConfig::default());
    }

    #[test]
    fn test_paths_from_env() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("SPELLGATE_AFFIX", "/dicts/en_GB.aff"),
            ("SPELLGATE_DICT", "/dicts/en_GB.dic"),
            ("SPELLGATE_HUNSPELL_LIB", "/opt/lib/libhunspell.so"),
        ]));
        assert_eq!(config.affix_path, PathBuf::from("/dicts/en_GB.aff"));
        assert_eq!(config.dictionary_path, PathBuf::from("/dicts/en_GB.dic"));
        assert_eq!(
            config.hunspell_library,
            Some(PathBuf::from("/opt/lib/libhunspell.so"))
        );
    }

    #[test]
    fn test_empty_access_log_disables() {
        let config = ServerConfig::from_lookup(lookup(&[("SPELLGATE_ACCESS_LOG", "")]));
        assert_eq!(config.access_log, None);
    }

    #[test]
    fn test_builder_pattern() {
        let config = ServerConfig::default()
            .with_host("127.0.0.1")
            .with_port(9000)
            .with_dictionary("a.aff", "a.dic")
            .with_access_log(None)
            .with_redirect_url("https://example.com/")
            .with_max_body_bytes(1024);

        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
        assert_eq!(config.affix_path, PathBuf::from("a.aff"));
        assert_eq!(config.access_log, None);
        assert_eq!(config.redirect_url, "https://example.com/");
        assert_eq!(config.max_body_bytes, 1024);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: ServerConfig = serde_json::from_str(r#"{"port": 4000}"#).unwrap();
        assert_eq!(config.port, 4000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.access_log, Some(PathBuf::from("access.log")));
    }
}
