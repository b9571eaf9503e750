//! Source Controls Component
//!
//! Current source label, video upload, webcam switch and video deletion.

use leptos::*;
use wasm_bindgen::JsCast;

use crate::state::DashboardRuntime;

#[component]
pub fn SourceControls() -> impl IntoView {
    let runtime = expect_context::<DashboardRuntime>();
    let view = runtime.view();

    let on_file_selected = {
        let runtime = runtime.clone();
        move |ev: web_sys::Event| {
            let Some(input) = ev
                .target()
                .and_then(|target| target.dyn_into::<web_sys::HtmlInputElement>().ok())
            else {
                return;
            };
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            // Clear so picking the same file again fires another change
            input.set_value("");

            let runtime = runtime.clone();
            spawn_local(async move { runtime.upload_video(file).await });
        }
    };

    let use_webcam = {
        let runtime = runtime.clone();
        move |_| {
            let runtime = runtime.clone();
            spawn_local(async move { runtime.switch_to_webcam().await });
        }
    };

    let delete_video = move |_| {
        let runtime = runtime.clone();
        spawn_local(async move { runtime.delete_video().await });
    };

    view! {
        <div class="card">
            <div class="card-body">
                <h5 class="card-title">"Video Source"</h5>
                <p>
                    "Current source: "
                    <strong id="current-source">{move || view.source_label.get()}</strong>
                </p>

                <label for="video-upload" class="form-label">"Upload video"</label>
                <input
                    id="video-upload"
                    type="file"
                    class="form-control mb-3"
                    accept=".mp4,.avi,.mov,.mkv,.flv,.wmv,.webm,.mp4v,video/*"
                    on:change=on_file_selected
                />

                <div class="d-flex gap-2">
                    <button id="use-webcam-btn" class="btn btn-outline-primary" on:click=use_webcam>
                        "📷 Use Webcam"
                    </button>
                    <button
                        id="delete-video-btn"
                        class="btn btn-outline-danger"
                        on:click=delete_video
                    >
                        "🗑 Delete Video"
                    </button>
                </div>
            </div>
        </div>
    }
}
