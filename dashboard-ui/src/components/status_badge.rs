//! Header status badge.

use leptos::*;

use crate::state::DashboardRuntime;

#[component]
pub fn StatusBadge() -> impl IntoView {
    let view = expect_context::<DashboardRuntime>().view();

    view! {
        <span id="status-badge" class=move || view.badge.get().class()>
            {move || view.badge.get().text()}
        </span>
    }
}
