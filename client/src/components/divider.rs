//! Draggable divider between the frame pane and the side panel.
//!
//! The handle captures the pointer on press so moves keep arriving while the
//! cursor is over the frame. Release, cancel, lost capture and window blur
//! all end the gesture.

use leptos::prelude::*;
#[cfg(feature = "hydrate")]
use wasm_bindgen::JsCast;

use crate::state::ui::UiState;

/// Vertical split handle. `container` is the split grid the ratio is
/// measured against.
#[component]
pub fn Divider(container: NodeRef<leptos::html::Div>) -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();

    let on_pointer_down = move |ev: leptos::ev::PointerEvent| {
        ev.prevent_default();
        ui.update(UiState::begin_drag);
        #[cfg(feature = "hydrate")]
        {
            if let Some(target) = ev
                .target()
                .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            {
                if let Err(e) = target.set_pointer_capture(ev.pointer_id()) {
                    leptos::logging::warn!("divider could not capture pointer: {e:?}");
                }
            }
        }
    };

    let on_pointer_move = move |ev: leptos::ev::PointerEvent| {
        if !ui.with_untracked(|u| u.dragging) {
            return;
        }
        #[cfg(feature = "hydrate")]
        {
            let Some(el) = container.get_untracked() else {
                return;
            };
            let rect = el.get_bounding_client_rect();
            let pointer_x = f64::from(ev.client_x());
            ui.update(|u| {
                u.drag_to(pointer_x, rect.left(), rect.width());
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (ev, container);
        }
    };

    let end_drag = move || {
        if ui.with_untracked(|u| u.dragging) {
            ui.update(UiState::end_drag);
        }
    };

    #[cfg(feature = "hydrate")]
    {
        let handle = window_event_listener(leptos::ev::blur, move |_| end_drag());
        on_cleanup(move || handle.remove());
    }

    view! {
        <div
            class="divider"
            class:divider--active=move || ui.with(|u| u.dragging)
            role="separator"
            aria-orientation="vertical"
            on:pointerdown=on_pointer_down
            on:pointermove=on_pointer_move
            on:pointerup=move |_| end_drag()
            on:pointercancel=move |_| end_drag()
            on:lostpointercapture=move |_| end_drag()
        >
            <div class="divider__grip"></div>
        </div>
    }
}
