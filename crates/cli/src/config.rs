use std::path::PathBuf;

/// Harness configuration loaded from environment variables.
///
/// | Env Var           | Default |
/// |-------------------|---------|
/// | `KPU_OUTPUT_DIR`  | `.`     |
/// | `KPU_PRETTY_JSON` | `true`  |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Directory native image outputs are written to.
    pub output_dir: PathBuf,
    /// Pretty-print JSON written to stdout.
    pub pretty: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            pretty: true,
        }
    }
}

impl CliConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    ///
    /// Unparseable booleans keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let output_dir = lookup("KPU_OUTPUT_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.output_dir);

        let pretty = lookup("KPU_PRETTY_JSON")
            .and_then(|v| parse_bool(&v))
            .unwrap_or(defaults.pretty);

        Self { output_dir, pretty }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(CliConfig::from_lookup(lookup_from(&[])), CliConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let config = CliConfig::from_lookup(lookup_from(&[
            ("KPU_OUTPUT_DIR", "/tmp/out"),
            ("KPU_PRETTY_JSON", "off"),
        ]));
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert!(!config.pretty);
    }

    #[test]
    fn invalid_bool_keeps_default() {
        let config = CliConfig::from_lookup(lookup_from(&[("KPU_PRETTY_JSON", "maybe")]));
        assert!(config.pretty);
    }
}
