//! Metrics Components
//!
//! Density readouts, the density bar and the traffic summary.

use leptos::*;

use crate::state::DashboardRuntime;

/// Density score, vehicle count, cluster level and density bar
#[component]
pub fn MetricsPanel() -> impl IntoView {
    let view = expect_context::<DashboardRuntime>().view();

    let density = move || {
        view.metrics.get().map(|m| m.density).unwrap_or_else(|| "0.00".to_string())
    };
    let vehicles = move || {
        view.metrics.get().map(|m| m.vehicle_count).unwrap_or_else(|| "0".to_string())
    };
    let level = move || view.metrics.get().map(|m| m.level).unwrap_or_else(|| "-".to_string());

    view! {
        <div class="card">
            <div class="card-body">
                <h5 class="card-title">"Traffic Metrics"</h5>
                <div class="row text-center">
                    <div class="col">
                        <div class="metric-label">"Density"</div>
                        <div id="density-score" class="metric-value">{density}</div>
                    </div>
                    <div class="col">
                        <div class="metric-label">"Vehicles"</div>
                        <div id="vehicle-count" class="metric-value">{vehicles}</div>
                    </div>
                    <div class="col">
                        <div class="metric-label">"Level"</div>
                        <div id="cluster-level" class="metric-value">{level}</div>
                    </div>
                </div>

                <div class="progress mt-3">
                    <div
                        id="density-bar"
                        role="progressbar"
                        class=move || {
                            view.density_bar
                                .get()
                                .map(|bar| bar.class())
                                .unwrap_or_else(|| "progress-bar".to_string())
                        }
                        style:width=move || {
                            view.density_bar
                                .get()
                                .map(|bar| bar.width())
                                .unwrap_or_else(|| "0%".to_string())
                        }
                    />
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn SummaryBox() -> impl IntoView {
    let view = expect_context::<DashboardRuntime>().view();

    view! {
        <div class="card">
            <div class="card-body">
                <h5 class="card-title">"Summary"</h5>
                <pre id="summary-box" class="summary-box">{move || view.summary.get()}</pre>
                <div class="text-muted small">
                    {move || {
                        view.last_update
                            .get()
                            .map(|t| format!("Last update: {}", t.format("%H:%M:%S")))
                            .unwrap_or_else(|| "Not updated yet".to_string())
                    }}
                </div>
            </div>
        </div>
    }
}
