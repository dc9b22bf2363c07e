//! The single tester screen.
//!
//! ARCHITECTURE
//! ============
//! Startup parameters are read once from the location. Preferences render
//! first from defaults plus `embedUrl` so server and client markup agree,
//! then the stored record is merged in after hydration and every later
//! change is written back. The inbound listener lives as long as the page.

use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::components::compose_panel::ComposePanel;
use crate::components::divider::Divider;
use crate::components::frame_pane::FramePane;
use crate::components::inbox_panel::InboxPanel;
use crate::components::url_bar::UrlBar;
use crate::net::browser::Messenger;
use crate::state::inbox::InboxState;
use crate::state::prefs::{Preferences, PreferencesStore, restore};
use crate::state::ui::UiState;
use crate::util::persistence::LocalStorageStore;
use crate::util::startup::{StartupParams, parse_query};

#[component]
pub fn TesterPage() -> impl IntoView {
    let location = use_location();
    let startup = match parse_query(&location.search.get_untracked()) {
        Ok(params) => params,
        Err(e) => {
            leptos::logging::warn!("ignoring startup parameters: {e}");
            StartupParams::default()
        }
    };
    let mode = startup.mode;

    let mut initial = Preferences::default();
    initial.apply_startup(&startup);
    let prefs = RwSignal::new(initial);
    let ui = RwSignal::new(UiState::default());
    let inbox = RwSignal::new(InboxState::default());
    let messenger = Messenger::new(mode, NodeRef::new());

    provide_context(prefs);
    provide_context(ui);
    provide_context(inbox);
    provide_context(messenger);

    let store = LocalStorageStore;
    let restored = StoredValue::new(false);
    Effect::new(move || {
        prefs.track();
        if !restored.get_value() {
            restored.set_value(true);
            let mut loaded = restore(&store);
            loaded.apply_startup(&startup);
            prefs.set(loaded);
            return;
        }
        prefs.with_untracked(|p| store.save(p));
    });

    messenger.listen(inbox);

    let container = NodeRef::<leptos::html::Div>::new();

    view! {
        <main class="tester" class:tester--embedded=mode.is_embedded()>
            {(!mode.is_embedded()).then(|| view! { <UrlBar/> })}
            <div class="tester__split" node_ref=container style=move || ui.with(UiState::split_style)>
                <FramePane/>
                <Divider container=container/>
                <aside class="tester__side">
                    <ComposePanel/>
                    <InboxPanel/>
                </aside>
            </div>
        </main>
    }
}
