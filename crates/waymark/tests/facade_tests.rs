//! Integration tests for the registry + navigator facade: group lookup,
//! programmatic navigation, current-location resolution, and mounting.

mod common;

use std::collections::HashMap;
use std::sync::Arc;

use common::RecordingNavigator;
use waymark::{
    Error, GoTarget, MountOutcome, NavAction, Navigator, PageRoute, RedirectRoute, Registry,
    RouteTree,
};

fn registry() -> Registry {
    let mut registry = Registry::new();
    registry.create_routes(
        "app",
        RouteTree::new()
            .route("home", PageRoute::at("/").with_component("HomePage").with_exact(true))
            .route(
                "docs",
                PageRoute::at("/docs/$ver").with_component("DocsPage"),
            )
            .route(
                "secret",
                PageRoute::at("/secret")
                    .with_component("SecretPage")
                    .with_auth(true),
            )
            .route("legacy-docs", RedirectRoute::new("/old-docs", "/docs/$ver")),
    );
    registry
}

#[test]
fn test_unknown_group_fails_before_binding_a_navigator() {
    let registry = registry();
    let nav = RecordingNavigator::at("/");

    let err = registry
        .use_routes_with("missing", nav as Arc<dyn Navigator>)
        .unwrap_err();
    assert_eq!(err, Error::UnknownGroup("missing".to_string()));
}

#[test]
fn test_handle_formats_without_the_trait_objects() {
    let registry = registry();
    let nav = RecordingNavigator::at("/");
    let handle = registry
        .use_routes_with("app", nav as Arc<dyn Navigator>)
        .unwrap();

    // Debug-formattable so Result combinators like unwrap_err work on
    // fallible lookups returning a handle.
    let formatted = format!("{handle:?}");
    assert!(formatted.contains("RouteHandle"));
    assert!(formatted.contains("/login"));
}

#[test]
fn test_go_to_pushes_by_default() {
    let registry = registry();
    let nav = RecordingNavigator::at("/");
    let handle = registry
        .use_routes_with("app", nav.clone() as Arc<dyn Navigator>)
        .unwrap();

    handle.go_to("/secret");

    assert_eq!(nav.pushes(), vec!["/secret".to_string()]);
    assert!(nav.replaces().is_empty());
    assert_eq!(nav.current_path(), "/secret");
}

#[test]
fn test_go_to_with_view_target_and_replace() {
    let registry = registry();
    let nav = RecordingNavigator::at("/");
    let handle = registry
        .use_routes_with("app", nav.clone() as Arc<dyn Navigator>)
        .unwrap();

    handle.go_to_with(
        GoTarget::view(|views| {
            views["secret"]
                .append_path("keys")
                .unwrap_or_default()
        }),
        NavAction::Replace,
    );

    assert_eq!(nav.replaces(), vec!["/secret/keys".to_string()]);
    assert!(nav.pushes().is_empty());
}

#[test]
fn test_current_view_and_match_follow_the_navigator() {
    let registry = registry();
    let nav = RecordingNavigator::at("/docs/en");
    let handle = registry
        .use_routes_with("app", nav.clone() as Arc<dyn Navigator>)
        .unwrap();

    assert_eq!(handle.current_view().unwrap().key(), "docs");
    let matched = handle.current_match().unwrap();
    assert_eq!(matched.route.key, "docs");
    assert_eq!(matched.params.get("ver").map(String::as_str), Some("en"));

    handle.go_to("/secret");
    assert_eq!(handle.current_view().unwrap().key(), "secret");
}

#[tokio::test]
async fn test_mount_renders_unprotected_component() {
    let registry = registry();
    let nav = RecordingNavigator::at("/");
    let handle = registry
        .use_routes_with("app", nav.clone() as Arc<dyn Navigator>)
        .unwrap();

    let home = handle.current_match().unwrap();
    let outcome = handle.mount(&home.route).await;

    assert_eq!(outcome, MountOutcome::Render(Some("HomePage".to_string())));
    assert_eq!(nav.navigation_count(), 0);
}

#[tokio::test]
async fn test_mount_redirect_resolves_envs_and_replaces_once() {
    let mut registry = registry();
    registry.set_envs(HashMap::from([("ver".to_string(), "v2".to_string())]));

    let nav = RecordingNavigator::at("/old-docs");
    let handle = registry
        .use_routes_with("app", nav.clone() as Arc<dyn Navigator>)
        .unwrap();

    let legacy = handle.current_match().unwrap();
    assert_eq!(legacy.route.key, "legacy-docs");

    let outcome = handle.mount(&legacy.route).await;

    assert_eq!(outcome, MountOutcome::Redirect("/docs/v2".to_string()));
    assert_eq!(nav.replaces(), vec!["/docs/v2".to_string()]);
    assert!(nav.pushes().is_empty());
}

#[tokio::test]
async fn test_mount_denied_reports_the_issued_redirect() {
    let mut registry = registry();
    registry.set_authenticator(|| waymark::AuthOutcome::ready(false), "/login");

    let nav = RecordingNavigator::at("/secret");
    let handle = registry
        .use_routes_with("app", nav.clone() as Arc<dyn Navigator>)
        .unwrap();

    let secret = handle.current_match().unwrap();
    let outcome = handle.mount(&secret.route).await;

    assert_eq!(
        outcome,
        MountOutcome::Denied("/login?redirect=/secret".to_string())
    );
    assert_eq!(nav.replaces(), vec!["/login?redirect=/secret".to_string()]);
}

#[tokio::test]
async fn test_mount_protected_route_passes_with_truthy_authenticator() {
    let mut registry = registry();
    registry.set_authenticator(|| waymark::AuthOutcome::ready(true), "/login");

    let nav = RecordingNavigator::at("/secret");
    let handle = registry
        .use_routes_with("app", nav.clone() as Arc<dyn Navigator>)
        .unwrap();

    let secret = handle.current_match().unwrap();
    let outcome = handle.mount(&secret.route).await;

    assert_eq!(outcome, MountOutcome::Render(Some("SecretPage".to_string())));
    assert_eq!(nav.navigation_count(), 0);
}

#[tokio::test]
async fn test_mount_with_unmounted_gate_stays_pending() {
    let mut registry = registry();
    registry.set_authenticator(|| waymark::AuthOutcome::ready(true), "/login");

    let nav = RecordingNavigator::at("/secret");
    let handle = registry
        .use_routes_with("app", nav.clone() as Arc<dyn Navigator>)
        .unwrap();

    let secret = handle.current_match().unwrap();
    let gate = handle.gate_for(&secret.route);
    gate.unmount();

    let outcome = handle.mount_with(&gate, &secret.route).await;

    assert_eq!(outcome, MountOutcome::Pending);
    assert_eq!(nav.navigation_count(), 0);
}
