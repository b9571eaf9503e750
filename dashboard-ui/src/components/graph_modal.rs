//! Graph Modal Component
//!
//! Traffic history graph. Every open and refresh fetches a fresh image.

use leptos::*;

use traffic_dashboard::presenter::{graph_data_url, GraphPanel};

use crate::state::DashboardRuntime;

/// "Show graph" button plus the modal it opens
#[component]
pub fn GraphModal() -> impl IntoView {
    let runtime = expect_context::<DashboardRuntime>();
    let view = runtime.view();

    let show_graph = {
        let runtime = runtime.clone();
        move |_| {
            let runtime = runtime.clone();
            spawn_local(async move { runtime.show_graph().await });
        }
    };

    let refresh_graph = move |_| {
        let runtime = runtime.clone();
        spawn_local(async move { runtime.refresh_graph().await });
    };

    let close = move |_| view.close_graph();

    view! {
        <button id="show-graph-btn" class="btn btn-info" on:click=show_graph>
            "📈 Traffic Graph"
        </button>

        <div
            id="graphModal"
            class="modal"
            tabindex="-1"
            style:display=move || if view.graph_open.get() { "block" } else { "none" }
        >
            <div class="modal-dialog modal-lg">
                <div class="modal-content">
                    <div class="modal-header">
                        <h5 class="modal-title">"Traffic Density History"</h5>
                        <button type="button" class="btn-close" aria-label="Close" on:click=close />
                    </div>
                    <div class="modal-body text-center">
                        {move || match view.graph.get() {
                            GraphPanel::Loading => view! {
                                <div id="graph-loading">
                                    <div class="spinner-border" role="status" />
                                    <p>"Generating graph..."</p>
                                </div>
                            }
                            .into_view(),
                            GraphPanel::Image(graph) => view! {
                                <img
                                    id="traffic-graph"
                                    class="img-fluid"
                                    alt="Traffic graph"
                                    src=graph_data_url(&graph)
                                />
                            }
                            .into_view(),
                            GraphPanel::Error(message) => view! {
                                <div id="graph-error" class="alert alert-danger">{message}</div>
                            }
                            .into_view(),
                        }}
                    </div>
                    <div class="modal-footer">
                        <button
                            id="refresh-graph-btn"
                            class="btn btn-primary"
                            on:click=refresh_graph
                        >
                            "🔄 Refresh"
                        </button>
                        <button type="button" class="btn btn-secondary" on:click=close>
                            "Close"
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
