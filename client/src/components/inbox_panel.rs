//! Log of messages received from the peer window.

use leptos::prelude::*;

use crate::state::inbox::InboxState;

#[component]
pub fn InboxPanel() -> impl IntoView {
    let inbox = expect_context::<RwSignal<InboxState>>();

    let entries = move || {
        inbox.with(|log| {
            log.messages()
                .iter()
                .map(|message| {
                    view! {
                        <li class="inbox__entry">
                            <div class="inbox__meta">
                                <span class="inbox__time">{message.timestamp.clone()}</span>
                                <span class="inbox__kind">{message.kind_label()}</span>
                            </div>
                            <pre class="inbox__payload">{message.display_payload()}</pre>
                        </li>
                    }
                })
                .collect_view()
        })
    };

    view! {
        <section class="inbox">
            <header class="inbox__header">
                <h2 class="inbox__title">"Received messages"</h2>
                <span class="inbox__count">{move || inbox.with(InboxState::len)}</span>
                <button
                    class="btn inbox__clear"
                    type="button"
                    disabled=move || inbox.with(InboxState::is_empty)
                    on:click=move |_| inbox.update(InboxState::clear)
                >
                    "Clear"
                </button>
            </header>
            <Show
                when=move || !inbox.with(InboxState::is_empty)
                fallback=|| view! { <p class="inbox__empty">"Nothing received yet."</p> }
            >
                <ol class="inbox__list">{entries}</ol>
            </Show>
        </section>
    }
}
