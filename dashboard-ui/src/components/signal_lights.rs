//! Signal Lights Component
//!
//! Three-light traffic signal. Exactly one light is lit once the first
//! snapshot arrives; before that all three are dark.

use leptos::*;

use traffic_dashboard::presenter::Light;

use crate::state::DashboardRuntime;

#[component]
pub fn SignalLights() -> impl IntoView {
    let view = expect_context::<DashboardRuntime>().view();

    view! {
        <div class="card signal-card">
            <div class="card-body text-center">
                <h5 class="card-title">"Traffic Signal"</h5>
                <div class="traffic-light">
                    {Light::ALL
                        .into_iter()
                        .map(|light| view! {
                            <div
                                id=light.id()
                                class=move || {
                                    view.signal
                                        .get()
                                        .map(|s| s.class_for(light))
                                        .unwrap_or("signal-light")
                                }
                            />
                        })
                        .collect_view()}
                </div>
                <div id="signal-status" class="mt-3 fw-bold">
                    {move || {
                        view.signal
                            .get()
                            .map(|s| s.status_text())
                            .unwrap_or("Waiting for data...")
                    }}
                </div>
            </div>
        </div>
    }
}
