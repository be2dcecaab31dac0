use super::*;

#[test]
fn env_parse_missing_returns_default() {
    let val: u64 = env_parse("__ATELIER_TEST_NONEXISTENT__", 42);
    assert_eq!(val, 42);
}

#[test]
fn env_parse_present_valid() {
    unsafe { std::env::set_var("__ATELIER_TEST_EP_VALID__", "99") };
    let val: u32 = env_parse("__ATELIER_TEST_EP_VALID__", 0);
    assert_eq!(val, 99);
    unsafe { std::env::remove_var("__ATELIER_TEST_EP_VALID__") };
}

#[test]
fn env_parse_present_invalid_returns_default() {
    unsafe { std::env::set_var("__ATELIER_TEST_EP_INVALID__", "soon") };
    let val: u64 = env_parse("__ATELIER_TEST_EP_INVALID__", 7);
    assert_eq!(val, 7);
    unsafe { std::env::remove_var("__ATELIER_TEST_EP_INVALID__") };
}

#[test]
fn default_config_values() {
    let config = SessionConfig::default();
    assert_eq!(config.capture_debounce, Duration::from_millis(500));
    assert_eq!((config.canvas_width, config.canvas_height), (800, 600));
    assert_eq!(config.rng_seed, None);
    assert_eq!(config.gallery_path, PathBuf::from("museum-gallery-storage.json"));
}
