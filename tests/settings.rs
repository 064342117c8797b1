use sticky_board::settings::Settings;
use tempfile::tempdir;

#[test]
fn missing_file_yields_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let settings = Settings::load(path.to_str().unwrap()).unwrap();
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.server_url, "http://localhost:3456/");
    assert_eq!(settings.default_color, "#e8e4a0");
    assert!(!settings.offline);
}

#[test]
fn partial_file_keeps_other_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{ "offline": true, "request_timeout_secs": 3 }"#).unwrap();

    let settings = Settings::load(path.to_str().unwrap()).unwrap();
    assert!(settings.offline);
    assert_eq!(settings.request_timeout().as_secs(), 3);
    assert_eq!(settings.window_size, (1200, 800));
    assert!(settings.log_file.is_none());
}

#[test]
fn save_then_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let path = path.to_str().unwrap();

    let mut settings = Settings::default();
    settings.server_url = "http://notes.local:8080/".into();
    settings.default_color = "#a0c8e8".into();
    settings.save(path).unwrap();

    assert_eq!(Settings::load(path).unwrap(), settings);
}

#[test]
fn malformed_file_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(Settings::load(path.to_str().unwrap()).is_err());
}

#[test]
fn zero_timeout_is_raised_to_one_second() {
    let settings = Settings {
        request_timeout_secs: 0,
        ..Settings::default()
    };
    assert_eq!(settings.request_timeout().as_secs(), 1);
}
