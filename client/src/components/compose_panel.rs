//! Draft editor, template picker and send button.

use leptos::prelude::*;

use crate::net::browser::Messenger;
use crate::state::prefs::Preferences;
use crate::state::ui::UiState;
use crate::util::templates::builtin_templates;

#[component]
pub fn ComposePanel() -> impl IntoView {
    let prefs = expect_context::<RwSignal<Preferences>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let messenger = expect_context::<Messenger>();
    let mode = messenger.mode();

    let on_send = move |_| {
        let draft = prefs.with_untracked(|p| p.iframe_message.clone());
        let outcome = messenger.send(&draft);
        ui.update(|u| u.last_send = Some(outcome));
    };

    let status = move || ui.with(|u| u.last_send.map(|outcome| outcome.describe(mode)).unwrap_or_default());

    view! {
        <section class="compose">
            <header class="compose__header">
                <span class="compose__badge" class:compose__badge--embedded=mode.is_embedded()>
                    {mode.badge()}
                </span>
            </header>
            <div class="compose__templates">
                {builtin_templates()
                    .into_iter()
                    .map(|template| {
                        let draft = template.draft_text();
                        view! {
                            <button
                                class="btn compose__template"
                                type="button"
                                on:click=move |_| prefs.update(|p| p.set_iframe_message(draft.clone()))
                            >
                                {template.label}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
            <textarea
                class="compose__draft"
                spellcheck="false"
                placeholder="{ action: 'open_project', payload: { projectId: '...' } }"
                prop:value=move || prefs.with(|p| p.iframe_message.clone())
                on:input=move |ev| prefs.update(|p| p.set_iframe_message(event_target_value(&ev)))
            ></textarea>
            <button class="btn btn--primary compose__send" type="button" on:click=on_send>
                {format!("Post message to {}", mode.peer_label())}
            </button>
            <p class="compose__status">{status}</p>
        </section>
    }
}
