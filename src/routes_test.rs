use super::*;
use crate::types::Preferences;

fn user() -> User {
    User {
        id: "user-1".to_owned(),
        name: "alice".to_owned(),
        email: "alice@example.com".to_owned(),
        preferences: Preferences::default(),
        profile_picture: None,
    }
}

#[test]
fn paths_round_trip() {
    for route in Route::ALL {
        assert_eq!(Route::from_path(route.path()), Some(route));
    }
}

#[test]
fn from_path_ignores_query_and_trailing_slash() {
    assert_eq!(Route::from_path("/login/"), Some(Route::Login));
    assert_eq!(Route::from_path("/subscription?plan=pro"), Some(Route::Subscription));
    assert_eq!(Route::from_path("/?code=abc"), Some(Route::Home));
    assert_eq!(Route::from_path(""), Some(Route::Home));
    assert_eq!(Route::from_path("/dashboard"), None);
}

#[test]
fn only_subscription_is_protected() {
    assert!(Route::Subscription.requires_auth());
    assert!(!Route::Home.requires_auth());
    assert!(!Route::Login.requires_auth());
    assert!(!Route::Register.requires_auth());
}

#[test]
fn guard_redirects_only_without_session() {
    let alice = user();
    assert_eq!(should_redirect_unauth(Route::Subscription, None), Some(Route::Login));
    assert_eq!(should_redirect_unauth(Route::Subscription, Some(&alice)), None);
    assert_eq!(should_redirect_unauth(Route::Home, None), None);
}

#[test]
fn upgrade_button_toggles() {
    assert_eq!(Route::Home.upgrade_target(), Route::Subscription);
    assert_eq!(Route::Login.upgrade_target(), Route::Subscription);
    assert_eq!(Route::Subscription.upgrade_target(), Route::Home);
}
