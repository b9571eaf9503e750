//! Notice Banner
//!
//! The `upload-status` banner shared by every action.

use leptos::*;

use crate::state::DashboardRuntime;

#[component]
pub fn NoticeBanner() -> impl IntoView {
    let view = expect_context::<DashboardRuntime>().view();

    view! {
        {move || match view.notice.get() {
            Some(notice) => {
                let class = notice.class();
                view! {
                    <div id="upload-status" class=class role="alert">
                        {notice.text}
                    </div>
                }
                .into_view()
            }
            None => view! { <div id="upload-status" style="display: none" /> }.into_view(),
        }}
    }
}
