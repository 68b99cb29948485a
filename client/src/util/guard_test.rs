use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use session::{DenyReason, ManualClock, MemoryStorage, SessionEvent};

const NOW_MS: i64 = 1_700_000_000_000;
/// `{"sub":"alice","exp":1700000005}`: live for five seconds after `NOW_MS`.
const LIVE_TOKEN: &str = "eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiJhbGljZSIsImV4cCI6MTcwMDAwMDAwNX0.sig";
/// `{"sub":"alice","exp":1699999990}`: lapsed ten seconds before `NOW_MS`.
const EXPIRED_TOKEN: &str = "eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiJhbGljZSIsImV4cCI6MTY5OTk5OTk5MH0.sig";

type TestGuard = SessionGuard<Rc<MemoryStorage>, Rc<ManualClock>>;

struct Harness {
    storage: Rc<MemoryStorage>,
    clock: Rc<ManualClock>,
    notices: Rc<RefCell<Vec<Option<&'static str>>>>,
}

impl Harness {
    fn new(token: Option<&str>) -> Self {
        let storage = Rc::new(MemoryStorage::new());
        if let Some(token) = token {
            storage.set("accessToken", token).expect("set");
        }
        Self {
            storage,
            clock: Rc::new(ManualClock::new(NOW_MS)),
            notices: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// A fresh guard sharing the store and clock, as each browser surface builds one.
    fn guard(&self) -> TestGuard {
        let mut guard = SessionGuard::new(Rc::clone(&self.storage), Rc::clone(&self.clock));
        let sink = Rc::clone(&self.notices);
        guard.subscribe(move |event| {
            if let SessionEvent::LoggedOut { .. } = event {
                sink.borrow_mut().push(event.notice());
            }
        });
        guard
    }

    fn denials(&self) -> usize {
        self.notices.borrow().len()
    }
}

// =============================================================
// admit (Protected, once per mount)
// =============================================================

#[test]
fn expired_session_is_redirected_once_and_no_watch_starts() {
    let h = Harness::new(Some(EXPIRED_TOKEN));
    let mut guard = h.guard();

    let admission = admit(&mut guard);

    assert_eq!(admission, Admission::Redirect("/auth".to_owned()));
    assert!(!admission.starts_watch());
    assert!(h.storage.is_empty());
    assert_eq!(
        *h.notices.borrow(),
        vec![Some(DenyReason::Expired.notice())]
    );
}

#[test]
fn live_session_renders_and_starts_watch() {
    let h = Harness::new(Some(LIVE_TOKEN));
    let admission = admit(&mut h.guard());
    assert_eq!(admission, Admission::Render);
    assert!(admission.starts_watch());
    assert_eq!(h.denials(), 0);
}

#[test]
fn empty_store_redirects_with_sign_in_notice() {
    let h = Harness::new(None);
    assert!(matches!(admit(&mut h.guard()), Admission::Redirect(_)));
    assert_eq!(*h.notices.borrow(), vec![Some(DenyReason::Missing.notice())]);
}

// =============================================================
// watch_tick (expiry watch loop)
// =============================================================

#[test]
fn watch_continues_while_session_is_live() {
    let h = Harness::new(Some(LIVE_TOKEN));
    let mut watch = h.guard();
    watch.arm();

    h.clock.advance(1_000);
    assert_eq!(watch_tick(&mut watch, true), WatchStep::Continue);
    h.clock.advance(3_000);
    assert_eq!(watch_tick(&mut watch, true), WatchStep::Continue);
    assert_eq!(h.denials(), 0);
}

#[test]
fn watch_redirects_exactly_once_when_session_lapses() {
    let h = Harness::new(Some(LIVE_TOKEN));
    assert_eq!(admit(&mut h.guard()), Admission::Render);
    let mut watch = h.guard();
    watch.arm();

    h.clock.advance(5_000);
    assert_eq!(watch_tick(&mut watch, true), WatchStep::Redirect("/auth".to_owned()));

    // Were the loop to run on, later ticks would stay silent.
    h.clock.advance(1_000);
    assert_eq!(watch_tick(&mut watch, true), WatchStep::Continue);
    assert_eq!(*h.notices.borrow(), vec![Some(DenyReason::Expired.notice())]);
    assert!(h.storage.is_empty());
}

#[test]
fn watch_stops_after_cleanup_without_touching_store() {
    let h = Harness::new(Some(LIVE_TOKEN));
    let mut watch = h.guard();
    watch.arm();

    h.clock.advance(10_000);
    assert_eq!(watch_tick(&mut watch, false), WatchStep::Stop);

    assert_eq!(h.denials(), 0);
    assert_eq!(h.storage.get("accessToken").expect("get").as_deref(), Some(LIVE_TOKEN));
}

// =============================================================
// browser adapters (native build)
// =============================================================

#[test]
fn redirect_replaces_history_entry() {
    assert!(redirect_options().replace);
}

#[test]
fn native_browser_guard_has_no_session() {
    let view = RwSignal::new(SessionView::default());
    let mut guard = browser_guard(view);
    assert!(!guard.is_active());
    assert_eq!(admit(&mut guard), Admission::Redirect("/auth".to_owned()));
    let notice = view.get_untracked().notice;
    assert_eq!(notice.as_deref(), Some(DenyReason::Missing.notice()));
}

#[test]
fn native_session_access_has_no_token() {
    let view = RwSignal::new(SessionView::default());
    let access = SessionAccess::new(view, |_: &str, _: NavigateOptions| {});
    assert_eq!(access.token(), Err(ApiError::Unauthorized));
}

#[test]
fn session_access_reject_publishes_notice_and_redirects_once() {
    let view = RwSignal::new(SessionView::default());
    let visited = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&visited);
    let access = SessionAccess::new(view, move |path: &str, options: NavigateOptions| {
        sink.borrow_mut().push((path.to_owned(), options.replace));
    });

    access.reject();

    assert_eq!(*visited.borrow(), vec![("/auth".to_owned(), true)]);
    assert_eq!(
        view.get_untracked().notice.as_deref(),
        Some(DenyReason::Rejected.notice())
    );
}
