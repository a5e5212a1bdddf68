use super::{merge_file_config, Settings};

#[test]
fn defaults_point_at_local_bind_and_flash_model() {
    let settings = Settings::default();
    assert_eq!(settings.server_bind, "127.0.0.1:8000");
    assert!(settings.gemini_api_key.is_none());
    assert_eq!(settings.gemini_model, "gemini-1.5-flash-latest");
    assert_eq!(
        settings.gemini_api_base,
        "https://generativelanguage.googleapis.com"
    );
}

#[test]
fn file_config_overrides_defaults() {
    let mut settings = Settings::default();
    merge_file_config(
        &mut settings,
        "bind_addr = \"0.0.0.0:9000\"\ngemini_api_key = \"test-key\"\ngemini_model = \"gemini-pro\"\n",
    );
    assert_eq!(settings.server_bind, "0.0.0.0:9000");
    assert_eq!(settings.gemini_api_key.as_deref(), Some("test-key"));
    assert_eq!(settings.gemini_model, "gemini-pro");
}

#[test]
fn malformed_file_config_leaves_defaults_untouched() {
    let mut settings = Settings::default();
    merge_file_config(&mut settings, "not toml at all [");
    assert_eq!(settings.server_bind, "127.0.0.1:8000");
    assert!(settings.gemini_api_key.is_none());
}
