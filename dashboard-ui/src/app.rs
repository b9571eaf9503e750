//! App Root Component
//!
//! Creates the dashboard runtime, starts polling and lays out the widgets.

use leptos::*;

use traffic_dashboard::DashboardSettings;

use crate::api::HttpBackend;
use crate::components::{
    GraphModal, MetricsPanel, NoticeBanner, SignalCard, SignalLights, SourceControls,
    StatusBadge, SummaryBox, VideoPanel,
};
use crate::state::{DashboardRuntime, SignalView, POLL_INTERVAL_MS};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    let runtime = DashboardRuntime::new(
        HttpBackend,
        SignalView::new(),
        DashboardSettings::default(),
        POLL_INTERVAL_MS,
    );
    provide_context(runtime.clone());

    runtime.start_monitoring();
    on_cleanup(move || runtime.stop_monitoring());

    view! {
        <div class="container-fluid py-3">
            <header class="d-flex align-items-center justify-content-between mb-3">
                <h1 class="h3 mb-0">"🚦 Traffic Flow Dashboard"</h1>
                <div class="d-flex align-items-center gap-3">
                    <GraphModal />
                    <StatusBadge />
                </div>
            </header>

            <NoticeBanner />

            <div class="row g-3">
                <div class="col-lg-8">
                    <VideoPanel />
                    <MetricsPanel />
                    <SummaryBox />
                </div>
                <div class="col-lg-4">
                    <SignalLights />
                    <SignalCard />
                    <SourceControls />
                </div>
            </div>
        </div>
    }
}
