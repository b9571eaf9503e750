//! Signal Card Component
//!
//! "Update Signal" button and the timing returned by the backend.

use leptos::*;

use crate::state::DashboardRuntime;

#[component]
pub fn SignalCard() -> impl IntoView {
    let runtime = expect_context::<DashboardRuntime>();
    let view = runtime.view();

    let update_signal = move |_| {
        let runtime = runtime.clone();
        spawn_local(async move { runtime.configure_signal().await });
    };

    let green = move || view.timing.get().map(|t| t.green).unwrap_or_default();
    let red = move || view.timing.get().map(|t| t.red).unwrap_or_default();
    let note = move || view.timing.get().map(|t| t.note).unwrap_or_default();

    view! {
        <div class="card">
            <div class="card-body">
                <h5 class="card-title">"Signal Control"</h5>
                <button
                    id="update-signal"
                    class=move || view.signal_button.get().class()
                    on:click=update_signal
                >
                    {move || view.signal_button.get().text()}
                </button>

                <div
                    id="signal-info"
                    class="mt-3"
                    style:display=move || if view.timing.get().is_some() { "block" } else { "none" }
                >
                    <div>"🟢 Green: " <span id="green-time">{green}</span> "s"</div>
                    <div>"🔴 Red: " <span id="red-time">{red}</span> "s"</div>
                    <div id="signal-note" class="text-muted small">{note}</div>
                </div>
            </div>
        </div>
    }
}
