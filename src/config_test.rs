use super::*;

#[test]
fn default_points_at_local_api() {
    assert_eq!(ClientConfig::default().api_base, "http://127.0.0.1:8000");
}

#[test]
fn blank_value_falls_back_to_default() {
    assert_eq!(ClientConfig::from_api_base(Some("   ")).api_base, DEFAULT_API_BASE);
}

#[test]
fn trailing_slashes_are_trimmed() {
    let config = ClientConfig::from_api_base(Some(" https://hanzi.example.com/api/ "));
    assert_eq!(config.api_base, "https://hanzi.example.com/api");
}

#[test]
fn routes_are_absolute() {
    assert!(LOGIN_ROUTE.starts_with('/'));
    assert!(DEFAULT_ROUTE.starts_with('/'));
    assert_ne!(LOGIN_ROUTE, DEFAULT_ROUTE);
}
