//! Browser-backed message transport and the page-facing messenger.
//!
//! SYSTEM CONTEXT
//! ==============
//! `BrowserChannel` implements `MessageChannel` over `window.postMessage`
//! and the window `message` event. `Messenger` binds a `MessageRouter` to the
//! page's iframe ref so components can send and listen without touching
//! web-sys. Off-browser (SSR, native tests) every path is a no-op.
//!
//! TRADE-OFFS
//! ==========
//! Inbound data is bridged into `serde_json::Value` through
//! `JSON.stringify`. Values with no JSON form (functions, cyclic graphs) are
//! logged as their debug text instead of being dropped.

use leptos::prelude::*;

use crate::net::router::SendOutcome;
use crate::state::inbox::InboxState;
use crate::state::session::OperatingMode;

#[cfg(feature = "hydrate")]
pub use imp::{BrowserChannel, BrowserWindow, current_endpoints};

#[cfg(feature = "hydrate")]
mod imp {
    use leptos::prelude::*;
    use serde_json::Value;
    use wasm_bindgen::{JsCast, JsValue};

    use crate::net::channel::{MessageChannel, Outbound};
    use crate::net::router::Endpoints;

    /// A browser window handle compared by JS identity.
    #[derive(Clone, Debug)]
    pub struct BrowserWindow(pub web_sys::Window);

    impl PartialEq for BrowserWindow {
        fn eq(&self, other: &Self) -> bool {
            let lhs: &JsValue = self.0.as_ref();
            let rhs: &JsValue = other.0.as_ref();
            lhs == rhs
        }
    }

    /// `MessageChannel` over the live browser window.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct BrowserChannel;

    impl MessageChannel for BrowserChannel {
        type Window = BrowserWindow;
        type Subscription = WindowListenerHandle;

        fn post(&self, target: &BrowserWindow, payload: &Outbound) {
            let message = match to_js(payload) {
                Ok(message) => message,
                Err(e) => {
                    leptos::logging::warn!("could not convert outbound message: {e:?}");
                    return;
                }
            };
            if let Err(e) = target.0.post_message(&message, "*") {
                leptos::logging::warn!("postMessage failed: {e:?}");
            }
        }

        fn on_receive<A, H>(&self, accept: A, handler: H) -> WindowListenerHandle
        where
            A: Fn(Option<&BrowserWindow>) -> bool + 'static,
            H: Fn(Value) + 'static,
        {
            window_event_listener(leptos::ev::message, move |ev: web_sys::MessageEvent| {
                let source = ev.source().map(|s| BrowserWindow(s.unchecked_into::<web_sys::Window>()));
                if !accept(source.as_ref()) {
                    return;
                }
                handler(from_js(&ev.data()));
            })
        }
    }

    fn to_js(payload: &Outbound) -> Result<JsValue, JsValue> {
        match payload {
            Outbound::Text(text) => Ok(JsValue::from_str(text)),
            Outbound::Structured(value) => {
                let encoded = serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
                js_sys::JSON::parse(&encoded)
            }
        }
    }

    fn from_js(data: &JsValue) -> Value {
        if let Some(text) = data.as_string() {
            return Value::String(text);
        }
        js_sys::JSON::stringify(data)
            .ok()
            .and_then(|encoded| encoded.as_string())
            .and_then(|encoded| serde_json::from_str(&encoded).ok())
            .unwrap_or_else(|| Value::String(format!("{data:?}")))
    }

    /// Snapshot of this window, its parent, and the iframe's content window.
    pub fn current_endpoints(frame: NodeRef<leptos::html::Iframe>) -> Option<Endpoints<BrowserWindow>> {
        let this = web_sys::window()?;
        let parent = this.parent().ok().flatten().map(BrowserWindow);
        let child = frame
            .get_untracked()
            .and_then(|el| el.content_window())
            .map(BrowserWindow);
        Some(Endpoints { this: BrowserWindow(this), parent, child })
    }
}

/// Page-scoped handle for sending to and listening to the peer window.
#[derive(Clone, Copy)]
pub struct Messenger {
    mode: OperatingMode,
    frame: NodeRef<leptos::html::Iframe>,
}

impl Messenger {
    #[must_use]
    pub fn new(mode: OperatingMode, frame: NodeRef<leptos::html::Iframe>) -> Self {
        Self { mode, frame }
    }

    #[must_use]
    pub fn mode(&self) -> OperatingMode {
        self.mode
    }

    /// Ref the frame pane attaches to its `<iframe>`.
    #[must_use]
    pub fn frame(&self) -> NodeRef<leptos::html::Iframe> {
        self.frame
    }

    /// Send draft text to the peer window.
    pub fn send(&self, raw: &str) -> SendOutcome {
        #[cfg(feature = "hydrate")]
        {
            let Some(endpoints) = current_endpoints(self.frame) else {
                return SendOutcome::NoTarget;
            };
            crate::net::router::MessageRouter::new(self.mode, BrowserChannel).send(&endpoints, raw)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = raw;
            SendOutcome::NoTarget
        }
    }

    /// Append trusted inbound messages to `inbox` until the owning reactive
    /// scope is disposed.
    pub fn listen(&self, inbox: RwSignal<InboxState>) {
        #[cfg(feature = "hydrate")]
        {
            let frame = self.frame;
            let handle = crate::net::router::MessageRouter::new(self.mode, BrowserChannel).listen(
                move || current_endpoints(frame),
                move |timestamp, payload| {
                    inbox.update(|log| {
                        log.push(timestamp, payload);
                    });
                },
            );
            on_cleanup(move || handle.remove());
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = inbox;
        }
    }
}
