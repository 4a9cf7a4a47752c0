use domain::{Configuration, DefaultOn};

#[test]
fn absent_flags_are_treated_as_on() {
    let config = Configuration::new(1, "http://10.0.0.5");

    assert!(config.enable.raw().is_none());
    assert!(config.is_enabled());
    assert!(config.is_active());
}

#[test]
fn explicit_flags_win_over_default() {
    let mut config = Configuration::new(1, "http://10.0.0.5");
    config.enable = DefaultOn::set(false);
    config.active = false.into();

    assert!(!config.is_enabled());
    assert!(!config.is_active());
    assert_eq!(config.active.raw(), Some(false));
}

#[test]
fn intervals_are_clamped_to_one_second() {
    let mut config = Configuration::new(1, "http://10.0.0.5");
    config.refresh_interval_secs = 0;
    config.request_timeout_secs = 0;

    assert_eq!(config.refresh_interval_secs(), 1);
    assert_eq!(config.request_timeout_secs(), 1);
}

#[test]
fn api_key_is_masked() {
    let mut config = Configuration::new(1, "http://10.0.0.5");
    config.api_key = "secret-1234".to_string();
    assert_eq!(config.masked_api_key(), "*******1234");

    config.api_key = "abc".to_string();
    assert_eq!(config.masked_api_key(), "***");
}
