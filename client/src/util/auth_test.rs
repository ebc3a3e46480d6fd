use super::*;
use crate::net::types::Session;
use any_spawner::Executor;
use serde_json::Map;
use std::cell::RefCell;
use std::rc::Rc;

fn signed_in(id: &str) -> AuthState {
    AuthState::resolved(Some(Session {
        access_token: format!("token-{id}"),
        refresh_token: None,
        expires_at: None,
        user: User { id: id.to_owned(), email: None, user_metadata: Map::new() },
    }))
}

#[test]
fn should_redirect_unauth_when_not_loading_and_user_missing() {
    assert!(should_redirect_unauth(&AuthState::resolved(None)));
}

#[test]
fn should_not_redirect_while_loading() {
    assert!(!should_redirect_unauth(&AuthState::initial()));
}

#[test]
fn should_not_redirect_when_user_exists() {
    assert!(!should_redirect_unauth(&signed_in("u1")));
}

#[test]
fn guard_defaults_to_sign_in() {
    assert_eq!(AuthGuard::new(None).observe(&AuthState::resolved(None)), Some("/sign-in"));
    assert_eq!(AuthGuard::new(Some("/")).observe(&AuthState::resolved(None)), Some("/"));
}

#[test]
fn guard_never_redirects_while_loading() {
    let mut guard = AuthGuard::new(None);
    assert_eq!(guard.observe(&AuthState::initial()), None);
    assert_eq!(guard.observe(&AuthState::initial()), None);
}

#[test]
fn guard_redirects_once_when_loading_finishes_without_user() {
    let mut guard = AuthGuard::new(None);
    guard.observe(&AuthState::initial());

    assert_eq!(guard.observe(&AuthState::resolved(None)), Some("/sign-in"));
    assert_eq!(guard.observe(&AuthState::resolved(None)), None);
    assert_eq!(guard.observe(&AuthState::resolved(None)), None);
}

#[test]
fn guard_redirects_again_after_user_signs_out() {
    let mut guard = AuthGuard::new(Some("/login-here"));
    assert_eq!(guard.observe(&signed_in("u1")), None);
    assert_eq!(guard.observe(&AuthState::resolved(None)), Some("/login-here"));
    assert_eq!(guard.observe(&signed_in("u1")), None);
    assert_eq!(guard.observe(&AuthState::resolved(None)), Some("/login-here"));
}

#[test]
fn guard_ignores_token_refresh_for_same_user() {
    let mut guard = AuthGuard::new(None);
    assert_eq!(guard.observe(&signed_in("u1")), None);
    assert_eq!(guard.observe(&signed_in("u1")), None);
    assert_eq!(guard.observe(&signed_in("u2")), None);
}

// =============================================================================
// EFFECT GLUE
// =============================================================================

async fn settle() {
    for _ in 0..4 {
        Executor::tick().await;
    }
}

#[tokio::test]
async fn unauth_redirect_effect_navigates_once_after_loading_ends() {
    let _ = Executor::init_tokio();
    let owner = Owner::new();
    owner.set();

    tokio::task::LocalSet::new()
        .run_until(async {
            let auth = RwSignal::new(AuthState::initial());
            let visits = Rc::new(RefCell::new(Vec::<String>::new()));
            let seen = Rc::clone(&visits);
            install_unauth_redirect(auth, None, move |path, _| seen.borrow_mut().push(path.to_owned()));

            settle().await;
            assert!(visits.borrow().is_empty());

            auth.set(AuthState::initial());
            settle().await;
            assert!(visits.borrow().is_empty());

            auth.set(AuthState::resolved(None));
            settle().await;
            assert_eq!(*visits.borrow(), vec!["/sign-in".to_owned()]);

            auth.set(AuthState::resolved(None));
            settle().await;
            assert_eq!(visits.borrow().len(), 1);
        })
        .await;
}

#[tokio::test]
async fn unauth_redirect_effect_stays_put_for_signed_in_user() {
    let _ = Executor::init_tokio();
    let owner = Owner::new();
    owner.set();

    tokio::task::LocalSet::new()
        .run_until(async {
            let auth = RwSignal::new(AuthState::initial());
            let visits = Rc::new(RefCell::new(Vec::<String>::new()));
            let seen = Rc::clone(&visits);
            install_unauth_redirect(auth, Some("/sign-in?next=/subscription-success"), move |path, _| {
                seen.borrow_mut().push(path.to_owned());
            });

            auth.set(signed_in("u1"));
            settle().await;
            assert!(visits.borrow().is_empty());

            auth.set(AuthState::resolved(None));
            settle().await;
            assert_eq!(*visits.borrow(), vec!["/sign-in?next=/subscription-success".to_owned()]);
        })
        .await;
}
