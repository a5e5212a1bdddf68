use std::{collections::HashMap, fs};

#[derive(Debug, Clone)]
pub struct Settings {
    pub server_bind: String,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_api_base: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8000".into(),
            gemini_api_key: None,
            gemini_model: "gemini-1.5-flash-latest".into(),
            gemini_api_base: "https://generativelanguage.googleapis.com".into(),
        }
    }
}

/// Defaults, overridden by an optional `server.toml`, overridden by the
/// environment.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("server.toml") {
        merge_file_config(&mut settings, &raw);
    }

    if let Ok(v) = std::env::var("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Ok(v) = std::env::var("GEMINI_API_KEY") {
        settings.gemini_api_key = Some(v);
    }
    if let Ok(v) = std::env::var("GEMINI_MODEL") {
        settings.gemini_model = v;
    }
    if let Ok(v) = std::env::var("GEMINI_API_BASE") {
        settings.gemini_api_base = v;
    }

    settings
}

fn merge_file_config(settings: &mut Settings, raw: &str) {
    if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) {
        if let Some(v) = file_cfg.get("bind_addr") {
            settings.server_bind = v.clone();
        }
        if let Some(v) = file_cfg.get("gemini_api_key") {
            settings.gemini_api_key = Some(v.clone());
        }
        if let Some(v) = file_cfg.get("gemini_model") {
            settings.gemini_model = v.clone();
        }
        if let Some(v) = file_cfg.get("gemini_api_base") {
            settings.gemini_api_base = v.clone();
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
