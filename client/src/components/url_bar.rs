//! Address bar for the child frame (host mode only).

use leptos::prelude::*;

use crate::state::prefs::Preferences;

/// URL input plus a Load button. Enter submits.
///
/// The input is plain text so relative or scheme-less addresses reach
/// `load_url` and are resolved by the frame.
#[component]
pub fn UrlBar() -> impl IntoView {
    let prefs = expect_context::<RwSignal<Preferences>>();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        prefs.update(|p| {
            p.load_url();
        });
    };

    view! {
        <form class="url-bar" novalidate=true on:submit=on_submit>
            <input
                class="url-bar__input"
                type="text"
                placeholder="https://app.example.com/embed"
                spellcheck="false"
                prop:value=move || prefs.with(|p| p.url.clone())
                on:input=move |ev| prefs.update(|p| p.set_url(event_target_value(&ev)))
            />
            <button class="btn btn--primary url-bar__load" type="submit">
                "Load"
            </button>
        </form>
    }
}
