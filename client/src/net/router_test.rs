use std::cell::RefCell;
use std::rc::Rc;

use serde_json::json;

use super::*;
use crate::state::inbox::InboxState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct FakeWindow(u32);

const THIS: FakeWindow = FakeWindow(1);
const PARENT: FakeWindow = FakeWindow(2);
const CHILD: FakeWindow = FakeWindow(3);
const STRANGER: FakeWindow = FakeWindow(4);

type Accept = Box<dyn Fn(Option<&FakeWindow>) -> bool>;
type Handler = Box<dyn Fn(Value)>;

#[derive(Clone, Default)]
struct FakeChannel {
    posted: Rc<RefCell<Vec<(FakeWindow, Outbound)>>>,
    listeners: Rc<RefCell<Vec<Option<(Accept, Handler)>>>>,
}

impl FakeChannel {
    fn deliver(&self, source: Option<FakeWindow>, payload: Value) {
        for (accept, handler) in self.listeners.borrow().iter().flatten() {
            if accept(source.as_ref()) {
                handler(payload.clone());
            }
        }
    }

    /// Play every posted message back as if the target window echoed it.
    fn echo_all(&self) {
        let posted = self.posted.borrow_mut().drain(..).collect::<Vec<_>>();
        for (target, payload) in posted {
            self.deliver(Some(target), payload.into_value());
        }
    }

    fn unsubscribe(&self, id: usize) {
        self.listeners.borrow_mut()[id] = None;
    }

    fn posted(&self) -> Vec<(FakeWindow, Outbound)> {
        self.posted.borrow().clone()
    }
}

impl MessageChannel for FakeChannel {
    type Window = FakeWindow;
    type Subscription = usize;

    fn post(&self, target: &FakeWindow, payload: &Outbound) {
        self.posted.borrow_mut().push((*target, payload.clone()));
    }

    fn on_receive<A, H>(&self, accept: A, handler: H) -> usize
    where
        A: Fn(Option<&FakeWindow>) -> bool + 'static,
        H: Fn(Value) + 'static,
    {
        let mut listeners = self.listeners.borrow_mut();
        listeners.push(Some((Box::new(accept), Box::new(handler))));
        listeners.len() - 1
    }
}

fn fixed_clock() -> String {
    "12:00:00.000".to_owned()
}

fn host_endpoints(child: Option<FakeWindow>) -> Endpoints<FakeWindow> {
    Endpoints { this: THIS, parent: Some(THIS), child }
}

fn nested_endpoints() -> Endpoints<FakeWindow> {
    Endpoints { this: THIS, parent: Some(PARENT), child: None }
}

fn router(mode: OperatingMode) -> (MessageRouter<FakeChannel>, FakeChannel) {
    let channel = FakeChannel::default();
    (MessageRouter::new(mode, channel.clone()).with_clock(fixed_clock), channel)
}

fn listen_into_inbox(
    router: &MessageRouter<FakeChannel>,
    endpoints: Endpoints<FakeWindow>,
) -> (Rc<RefCell<InboxState>>, usize) {
    let inbox = Rc::new(RefCell::new(InboxState::default()));
    let sink = Rc::clone(&inbox);
    let id = router.listen(
        move || Some(endpoints.clone()),
        move |timestamp, payload| {
            sink.borrow_mut().push(timestamp, payload);
        },
    );
    (inbox, id)
}

// =============================================================
// Target resolution
// =============================================================

#[test]
fn host_targets_child_only() {
    assert_eq!(send_target(OperatingMode::Host, &host_endpoints(Some(CHILD))), Some(CHILD));
    assert_eq!(send_target(OperatingMode::Host, &host_endpoints(None)), None);
    let nested_with_child = Endpoints { this: THIS, parent: Some(PARENT), child: Some(CHILD) };
    assert_eq!(send_target(OperatingMode::Host, &nested_with_child), Some(CHILD));
}

#[test]
fn embedded_targets_distinct_parent_only() {
    assert_eq!(send_target(OperatingMode::Embedded, &nested_endpoints()), Some(PARENT));
    assert_eq!(send_target(OperatingMode::Embedded, &host_endpoints(Some(CHILD))), None);
    let orphan = Endpoints { this: THIS, parent: None, child: None };
    assert_eq!(send_target(OperatingMode::Embedded, &orphan), None);
}

#[test]
fn embedded_never_addresses_child() {
    let both = Endpoints { this: THIS, parent: Some(PARENT), child: Some(CHILD) };
    assert_eq!(send_target(OperatingMode::Embedded, &both), Some(PARENT));
}

// =============================================================
// Source trust
// =============================================================

#[test]
fn host_trusts_current_child_only() {
    let endpoints = host_endpoints(Some(CHILD));
    assert!(is_trusted_source(OperatingMode::Host, &endpoints, Some(&CHILD)));
    assert!(!is_trusted_source(OperatingMode::Host, &endpoints, Some(&STRANGER)));
    assert!(!is_trusted_source(OperatingMode::Host, &endpoints, Some(&THIS)));
    assert!(!is_trusted_source(OperatingMode::Host, &endpoints, None));
    assert!(!is_trusted_source(OperatingMode::Host, &host_endpoints(None), Some(&CHILD)));
}

#[test]
fn embedded_trusts_parent_but_never_self() {
    let endpoints = nested_endpoints();
    assert!(is_trusted_source(OperatingMode::Embedded, &endpoints, Some(&PARENT)));
    assert!(!is_trusted_source(OperatingMode::Embedded, &endpoints, Some(&THIS)));
    assert!(!is_trusted_source(OperatingMode::Embedded, &endpoints, Some(&CHILD)));

    // Embedded mode requested on a top-level page: parent is the page itself.
    let top_level = host_endpoints(None);
    assert!(!is_trusted_source(OperatingMode::Embedded, &top_level, Some(&THIS)));
}

// =============================================================
// Outbound
// =============================================================

#[test]
fn host_send_delivers_open_project_object_exactly() {
    let (router, channel) = router(OperatingMode::Host);
    let outcome = router.send(
        &host_endpoints(Some(CHILD)),
        r#"{"action":"open_project","payload":{"projectId":"abc"}}"#,
    );
    assert_eq!(outcome, SendOutcome::Structured);
    assert_eq!(
        channel.posted(),
        vec![(CHILD, Outbound::Structured(json!({"action": "open_project", "payload": {"projectId": "abc"}})))]
    );
}

#[test]
fn relaxed_text_is_sent_as_structured_data() {
    let (router, channel) = router(OperatingMode::Host);
    let outcome = router.send(&host_endpoints(Some(CHILD)), "{action: 'ping', /* note */ n: 1,}");
    assert_eq!(outcome, SendOutcome::Structured);
    assert_eq!(channel.posted()[0].1, Outbound::Structured(json!({"action": "ping", "n": 1})));
}

#[test]
fn invalid_text_is_sent_as_plain_string() {
    let (router, channel) = router(OperatingMode::Host);
    for text in ["hello there", "{broken", "", "Infinity", "{a: 1} trailing"] {
        let outcome = router.send(&host_endpoints(Some(CHILD)), text);
        assert_eq!(outcome, SendOutcome::PlainText, "{text:?}");
        assert_eq!(channel.posted().last().unwrap().1, Outbound::Text(text.to_owned()));
    }
}

#[test]
fn send_without_target_is_silent_noop() {
    let (host, host_channel) = router(OperatingMode::Host);
    assert_eq!(host.send(&host_endpoints(None), "{a: 1}"), SendOutcome::NoTarget);
    assert!(host_channel.posted().is_empty());

    let (embedded, embedded_channel) = router(OperatingMode::Embedded);
    assert_eq!(embedded.send(&host_endpoints(Some(CHILD)), "{a: 1}"), SendOutcome::NoTarget);
    assert!(embedded_channel.posted().is_empty());
}

#[test]
fn embedded_send_goes_to_parent() {
    let (router, channel) = router(OperatingMode::Embedded);
    assert_eq!(router.send(&nested_endpoints(), "'hi'"), SendOutcome::Structured);
    assert_eq!(channel.posted(), vec![(PARENT, Outbound::Structured(json!("hi")))]);
}

// =============================================================
// Inbound
// =============================================================

#[test]
fn echo_round_trip_preserves_structured_values() {
    let (router, channel) = router(OperatingMode::Host);
    let endpoints = host_endpoints(Some(CHILD));
    let (inbox, _) = listen_into_inbox(&router, endpoints.clone());

    let literals = [
        ("{a: [1, 2, {b: 'c'},], d: null}", json!({"a": [1, 2, {"b": "c"}], "d": null})),
        ("[true, false, -0.5, 0x10]", json!([true, false, -0.5, 16])),
        ("'plain'", json!("plain")),
        ("42", json!(42)),
        ("{nested: {deeper: {deepest: []}}}", json!({"nested": {"deeper": {"deepest": []}}})),
    ];
    for (text, _) in &literals {
        router.send(&endpoints, text);
    }
    channel.echo_all();

    let inbox = inbox.borrow();
    let received: Vec<&Value> = inbox.messages().iter().map(|m| &m.payload).collect();
    let expected: Vec<&Value> = literals.iter().map(|(_, v)| v).collect();
    assert_eq!(received, expected);
}

#[test]
fn echo_round_trip_returns_unparseable_text_unchanged() {
    let (router, channel) = router(OperatingMode::Host);
    let endpoints = host_endpoints(Some(CHILD));
    let (inbox, _) = listen_into_inbox(&router, endpoints.clone());

    router.send(&endpoints, "not { json");
    channel.echo_all();

    assert_eq!(inbox.borrow().messages()[0].payload, json!("not { json"));
}

#[test]
fn host_logs_only_child_messages() {
    let (router, channel) = router(OperatingMode::Host);
    let (inbox, _) = listen_into_inbox(&router, host_endpoints(Some(CHILD)));

    channel.deliver(Some(STRANGER), json!("stranger"));
    channel.deliver(Some(THIS), json!("self"));
    channel.deliver(None, json!("sourceless"));
    channel.deliver(Some(CHILD), json!("child"));

    let inbox = inbox.borrow();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox.messages()[0].payload, json!("child"));
    assert_eq!(inbox.messages()[0].timestamp, "12:00:00.000");
}

#[test]
fn embedded_suppresses_self_echo() {
    let (router, channel) = router(OperatingMode::Embedded);
    let (inbox, _) = listen_into_inbox(&router, nested_endpoints());

    channel.deliver(Some(THIS), json!("self"));
    channel.deliver(Some(PARENT), json!({"from": "parent"}));

    let inbox = inbox.borrow();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox.messages()[0].payload, json!({"from": "parent"}));
}

#[test]
fn embedded_on_top_level_page_logs_nothing() {
    let (router, channel) = router(OperatingMode::Embedded);
    let (inbox, _) = listen_into_inbox(&router, host_endpoints(None));

    channel.deliver(Some(THIS), json!("self"));

    assert!(inbox.borrow().is_empty());
}

#[test]
fn trust_follows_child_window_changes() {
    let (router, channel) = router(OperatingMode::Host);
    let current_child = Rc::new(RefCell::new(Some(CHILD)));
    let inbox = Rc::new(RefCell::new(InboxState::default()));

    let child_for_listener = Rc::clone(&current_child);
    let sink = Rc::clone(&inbox);
    router.listen(
        move || Some(host_endpoints(*child_for_listener.borrow())),
        move |timestamp, payload| {
            sink.borrow_mut().push(timestamp, payload);
        },
    );

    channel.deliver(Some(CHILD), json!(1));
    *current_child.borrow_mut() = Some(STRANGER);
    channel.deliver(Some(CHILD), json!(2));
    channel.deliver(Some(STRANGER), json!(3));

    let payloads: Vec<Value> = inbox.borrow().messages().iter().map(|m| m.payload.clone()).collect();
    assert_eq!(payloads, [json!(1), json!(3)]);
}

#[test]
fn unresolvable_endpoints_drop_everything() {
    let (router, channel) = router(OperatingMode::Host);
    let inbox = Rc::new(RefCell::new(InboxState::default()));
    let sink = Rc::clone(&inbox);
    router.listen(|| None, move |timestamp, payload| {
        sink.borrow_mut().push(timestamp, payload);
    });

    channel.deliver(Some(CHILD), json!("x"));
    assert!(inbox.borrow().is_empty());
}

#[test]
fn removed_listener_stops_logging() {
    let (router, channel) = router(OperatingMode::Host);
    let (inbox, id) = listen_into_inbox(&router, host_endpoints(Some(CHILD)));

    channel.deliver(Some(CHILD), json!("before"));
    channel.unsubscribe(id);
    channel.deliver(Some(CHILD), json!("after"));

    assert_eq!(inbox.borrow().len(), 1);
}

// =============================================================
// Outcome text
// =============================================================

#[test]
fn outcome_descriptions_name_the_peer() {
    assert_eq!(SendOutcome::NoTarget.describe(OperatingMode::Host), "No iframe to send to");
    assert_eq!(SendOutcome::Structured.describe(OperatingMode::Embedded), "Sent object to parent");
    assert_eq!(SendOutcome::PlainText.describe(OperatingMode::Host), "Sent plain string to iframe");
}
