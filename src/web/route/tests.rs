use super::*;

#[test]
fn every_known_path_roundtrips() {
    let paths = [
        "/auth",
        "/",
        "/customers",
        "/devices",
        "/service-orders",
        "/inventory",
        "/financial",
        "/reports",
        "/settings",
    ];
    for path in paths {
        let route = AppRoute::from_path(path);
        assert_ne!(route, AppRoute::NotFound, "path {} should be known", path);
        assert_eq!(route.to_path(), path);
    }
}

#[test]
fn unknown_path_maps_to_not_found() {
    assert_eq!(AppRoute::from_path("/unknown"), AppRoute::NotFound);
    assert_eq!(AppRoute::from_path("/devices/42"), AppRoute::NotFound);
}

#[test]
fn only_auth_and_not_found_are_public() {
    assert!(!AppRoute::Auth.requires_auth());
    assert!(!AppRoute::NotFound.requires_auth());
    for route in AppRoute::NAVIGATION {
        assert!(route.requires_auth(), "{} should be protected", route);
    }
}

#[test]
fn authenticated_users_leave_the_auth_page() {
    assert!(AppRoute::Auth.should_redirect_when_authenticated());
    assert!(!AppRoute::Dashboard.should_redirect_when_authenticated());
}

#[test]
fn redirect_targets() {
    assert_eq!(AppRoute::auth_failure_redirect(), AppRoute::Auth);
    assert_eq!(AppRoute::auth_success_redirect(), AppRoute::Dashboard);
}
