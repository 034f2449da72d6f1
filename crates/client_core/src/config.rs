use std::{collections::HashMap, fs};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub api_base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5001".into(),
        }
    }
}

/// Loads settings with precedence default < `report.toml` < environment.
///
/// `REPORT_API_URL` is the only environment surface of the client.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("report.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("api_base_url") {
                settings.api_base_url = v.clone();
            }
        }
    }

    if let Ok(v) = std::env::var("REPORT_API_URL") {
        settings.api_base_url = v;
    }

    settings.api_base_url = normalize_base_url(&settings.api_base_url);
    settings
}

fn normalize_base_url(raw: &str) -> String {
    let raw = raw.trim();

    if raw.is_empty() {
        return Settings::default().api_base_url;
    }

    raw.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use std::{
        env, fs,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::*;

    #[test]
    fn default_points_at_local_backend() {
        assert_eq!(Settings::default().api_base_url, "http://localhost:5001");
    }

    #[test]
    fn strips_trailing_slash_from_base_url() {
        assert_eq!(
            normalize_base_url("http://reports.internal:5001/"),
            "http://reports.internal:5001"
        );
    }

    #[test]
    fn empty_base_url_falls_back_to_default() {
        assert_eq!(normalize_base_url("  "), "http://localhost:5001");
    }

    #[test]
    fn file_then_env_override_defaults() {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();

        let temp_root = env::temp_dir().join(format!("report_client_config_test_{suffix}"));
        fs::create_dir_all(&temp_root).expect("temp root");

        let original_dir = env::current_dir().expect("cwd");
        env::set_current_dir(&temp_root).expect("set cwd");
        env::remove_var("REPORT_API_URL");

        fs::write("report.toml", "api_base_url = \"http://from-file:5001\"\n")
            .expect("write config file");
        assert_eq!(load_settings().api_base_url, "http://from-file:5001");

        env::set_var("REPORT_API_URL", "http://from-env:5001/");
        assert_eq!(load_settings().api_base_url, "http://from-env:5001");

        env::remove_var("REPORT_API_URL");
        env::set_current_dir(original_dir).expect("restore cwd");
        fs::remove_dir_all(temp_root).expect("cleanup");
    }
}
