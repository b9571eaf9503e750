//! Video preview with its "no video" placeholder.

use leptos::*;

use traffic_dashboard::presenter::frame_data_url;

use crate::state::DashboardRuntime;

fn display(visible: bool) -> &'static str {
    if visible {
        "block"
    } else {
        "none"
    }
}

#[component]
pub fn VideoPanel() -> impl IntoView {
    let view = expect_context::<DashboardRuntime>().view();

    view! {
        <div class="card video-card">
            <div class="card-body">
                <h5 class="card-title">"Live Feed"</h5>
                <div
                    id="no-video-msg"
                    class="no-video text-center text-muted"
                    style:display=move || display(!view.preview_visible.get())
                >
                    "📹 No video"
                </div>
                <img
                    id="video-preview"
                    class="img-fluid rounded"
                    alt="Traffic camera"
                    style:display=move || display(view.preview_visible.get())
                    src=move || view.frame.get().map(|f| frame_data_url(&f)).unwrap_or_default()
                />
            </div>
        </div>
    }
}
