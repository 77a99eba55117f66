use super::*;
use crate::session::Session;

fn authenticated() -> SessionPhase {
    SessionPhase::Authenticated(Session {
        access_token: "token-user@x.com".to_string(),
        user_id: "uid-user@x.com".to_string(),
        email: "user@x.com".to_string(),
    })
}

#[test]
fn anonymous_is_evicted_from_every_protected_route() {
    for route in AppRoute::NAVIGATION {
        assert_eq!(
            resolve_route(route, &SessionPhase::Anonymous),
            AppRoute::Auth,
            "{} should resolve to the login page",
            route
        );
    }
}

#[test]
fn authenticated_history_entry_on_auth_resolves_to_dashboard() {
    // 登录后按浏览器后退落在 /auth 也必须被改写
    assert_eq!(
        resolve_route(AppRoute::Auth, &authenticated()),
        AppRoute::Dashboard
    );
}

#[test]
fn unknown_phase_admits_protected_targets() {
    assert_eq!(
        resolve_route(AppRoute::Devices, &SessionPhase::Unknown),
        AppRoute::Devices
    );
}

#[test]
fn matching_phase_and_target_pass_through() {
    assert_eq!(
        resolve_route(AppRoute::Auth, &SessionPhase::Anonymous),
        AppRoute::Auth
    );
    assert_eq!(
        resolve_route(AppRoute::Customers, &authenticated()),
        AppRoute::Customers
    );
    assert_eq!(
        resolve_route(AppRoute::NotFound, &authenticated()),
        AppRoute::NotFound
    );
}
