use super::*;
use crate::flow::session::{SessionHandle, SessionSource};

#[derive(Default)]
struct RecordingNavigator {
    pushes: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    fn pushes(&self) -> Vec<String> {
        self.pushes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn push(&self, path: &str) {
        self.pushes.lock().unwrap().push(path.to_owned());
    }
}

fn john() -> SessionUser {
    SessionUser { name: Some("John Doe".into()), email: "john@example.com".into() }
}

// =============================================================
// ViewState::from_session
// =============================================================

#[test]
fn loading_status_yields_loading_view() {
    assert_eq!(ViewState::from_session(&SessionState::loading()), ViewState::Loading);
}

#[test]
fn authenticated_status_without_user_redirects() {
    let state = SessionState { status: SessionStatus::Authenticated, user: None };
    assert_eq!(ViewState::from_session(&state), ViewState::Redirecting);
}

#[test]
fn user_present_yields_authenticated_view() {
    let view = ViewState::from_session(&SessionState::authenticated(john()));
    assert_eq!(view, ViewState::Authenticated(john()));
}

// =============================================================
// DashboardGate::evaluate
// =============================================================

#[test]
fn no_session_pushes_sign_in() {
    let nav = RecordingNavigator::default();
    let gate = DashboardGate::new(&nav);
    let view = gate.evaluate(&SessionState::unauthenticated());
    assert_eq!(view, ViewState::Redirecting);
    assert_eq!(nav.pushes(), vec!["/auth/signin".to_owned()]);
}

#[test]
fn loading_takes_no_action() {
    let nav = RecordingNavigator::default();
    let gate = DashboardGate::new(&nav);
    gate.evaluate(&SessionState::loading());
    assert!(nav.pushes().is_empty());
}

#[test]
fn session_present_takes_no_action() {
    let nav = RecordingNavigator::default();
    let gate = DashboardGate::new(&nav);
    gate.evaluate(&SessionState::authenticated(john()));
    assert!(nav.pushes().is_empty());
}

#[test]
fn repeated_evaluation_is_idempotent() {
    let nav = RecordingNavigator::default();
    let gate = DashboardGate::new(&nav);
    let first = gate.evaluate(&SessionState::unauthenticated());
    let second = gate.evaluate(&SessionState::unauthenticated());
    assert_eq!(first, second);
    assert!(nav.pushes().iter().all(|p| p == "/auth/signin"));
}

#[test]
fn pending_redirect_captures_target_once() {
    let pending = PendingRedirect::default();
    DashboardGate::new(&pending).evaluate(&SessionState::unauthenticated());
    assert_eq!(pending.take().as_deref(), Some("/auth/signin"));
    assert_eq!(pending.take(), None);
}

// =============================================================
// DashboardGate::run
// =============================================================

#[tokio::test]
async fn run_renders_initial_snapshot_first() {
    let handle = SessionHandle::new();
    let nav = Arc::new(RecordingNavigator::default());
    let gate = DashboardGate::new(Arc::clone(&nav));
    let updates = handle.subscribe();
    drop(handle);

    let mut seen = Vec::new();
    gate.run(updates, |view| seen.push(view.clone())).await;

    assert_eq!(seen, vec![ViewState::Loading]);
    assert!(nav.pushes().is_empty());
}

#[tokio::test]
async fn sign_out_while_open_redirects_to_sign_in() {
    let handle = SessionHandle::new();
    let nav = RecordingNavigator::default();
    let gate = DashboardGate::new(&nav);
    let updates = handle.subscribe();

    let driver = async move {
        tokio::task::yield_now().await;
        handle.sign_in(john());
        tokio::task::yield_now().await;
        handle.sign_out();
        tokio::task::yield_now().await;
        drop(handle);
    };

    let mut seen = Vec::new();
    tokio::join!(gate.run(updates, |view| seen.push(view.clone())), driver);

    assert_eq!(seen.first(), Some(&ViewState::Loading));
    assert_eq!(seen.last(), Some(&ViewState::Redirecting));
    assert_eq!(nav.pushes().last().map(String::as_str), Some("/auth/signin"));
}

#[tokio::test]
async fn run_tracks_session_restored_after_loading() {
    let handle = SessionHandle::new();
    let nav = RecordingNavigator::default();
    let gate = DashboardGate::new(&nav);
    let updates = handle.subscribe();

    let driver = async move {
        tokio::task::yield_now().await;
        handle.sign_in(john());
        tokio::task::yield_now().await;
        drop(handle);
    };

    let mut seen = Vec::new();
    tokio::join!(gate.run(updates, |view| seen.push(view.clone())), driver);

    assert_eq!(seen.last(), Some(&ViewState::Authenticated(john())));
    assert!(nav.pushes().is_empty());
}
