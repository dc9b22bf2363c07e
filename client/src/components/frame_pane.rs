//! Left pane: the child frame in host mode, a notice in embedded mode.
//!
//! SYSTEM CONTEXT
//! ==============
//! The `<iframe>` is bound to the `Messenger` frame ref so sends and the
//! inbound trust check always see the frame's current content window. While
//! the divider is dragged a shield covers the frame so pointer events keep
//! reaching this document.

use leptos::prelude::*;

use crate::net::browser::Messenger;
use crate::state::prefs::Preferences;
use crate::state::ui::UiState;

/// Browser features delegated to the embedded app.
pub const FRAME_ALLOW: &str = "autoplay; fullscreen; microphone; camera; midi; encrypted-media; \
                               picture-in-picture; display-capture; clipboard-read; clipboard-write";

#[component]
pub fn FramePane() -> impl IntoView {
    let prefs = expect_context::<RwSignal<Preferences>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let messenger = expect_context::<Messenger>();
    let frame = messenger.frame();

    let body = if messenger.mode().is_embedded() {
        view! {
            <div class="frame-pane__notice">
                <p>"Embedded mode"</p>
                <p>"This page is running inside another app. Messages are posted to the parent window."</p>
            </div>
        }
        .into_any()
    } else {
        view! {
            <Show
                when=move || prefs.with(Preferences::has_loaded_url)
                fallback=|| view! { <p class="frame-pane__empty">"Enter a URL above and press Load."</p> }
            >
                <iframe
                    node_ref=frame
                    class="frame-pane__frame"
                    title="Embedded app"
                    src=move || prefs.with(|p| p.iframe_url.clone())
                    allow=FRAME_ALLOW
                ></iframe>
            </Show>
        }
        .into_any()
    };

    view! {
        <section class="frame-pane">
            {body}
            <Show when=move || ui.with(|u| u.dragging)>
                <div class="frame-pane__drag-shield"></div>
            </Show>
        </section>
    }
}
