//! HTTP API Client
//!
//! Functions for communicating with the traffic analytics REST API. Every
//! call returns the shared [`ClientResult`] so the dashboard reducer handles
//! browser and native failures the same way.

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsValue;

use traffic_dashboard::model::{
    endpoints, ActionResponse, GraphResponse, SignalRequest, SignalTiming, SnapshotResponse,
    SourceStatus, SwitchSourceRequest,
};
use traffic_dashboard::{ClientError, ClientResult};

/// Same origin: the backend serves this page
pub const DEFAULT_API_BASE: &str = "";

const API_URL_KEY: &str = "traffic_dashboard_api_url";

/// API base URL from local storage (`traffic_dashboard_api_url`), or same origin
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    normalize_base(&url)
}

fn normalize_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn url(path: &str) -> String {
    format!("{}{}", get_api_base(), path)
}

fn network(e: gloo_net::Error) -> ClientError {
    ClientError::Network(e.to_string())
}

fn js_error(e: JsValue) -> ClientError {
    ClientError::Network(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}

/// Parse the body regardless of status; failures are reported in the JSON.
async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let ok = response.ok();
    let status = response.status();
    let body = response.text().await.map_err(network)?;

    match serde_json::from_str(&body) {
        Ok(value) => Ok(value),
        Err(_) if !ok => Err(ClientError::HttpStatus { status }),
        Err(e) => Err(e.into()),
    }
}

// ============ API Functions ============

pub async fn fetch_snapshot() -> ClientResult<SnapshotResponse> {
    let response = Request::get(&url(endpoints::SNAPSHOT))
        .send()
        .await
        .map_err(network)?;
    decode(response).await
}

pub async fn control_signal(request: &SignalRequest) -> ClientResult<SignalTiming> {
    let response = Request::post(&url(endpoints::CONTROL_SIGNAL))
        .json(request)
        .map_err(network)?
        .send()
        .await
        .map_err(network)?;
    decode(response).await
}

pub async fn generate_graph() -> ClientResult<GraphResponse> {
    let response = Request::get(&url(endpoints::GENERATE_GRAPH))
        .send()
        .await
        .map_err(network)?;
    decode(response).await
}

/// Send the file as multipart field `video`
pub async fn upload_video(file: &web_sys::File) -> ClientResult<ActionResponse> {
    let form = web_sys::FormData::new().map_err(js_error)?;
    form.append_with_blob_and_filename(endpoints::UPLOAD_FIELD, file, &file.name())
        .map_err(js_error)?;

    let response = Request::post(&url(endpoints::UPLOAD_VIDEO))
        .body(form)
        .map_err(network)?
        .send()
        .await
        .map_err(network)?;
    decode(response).await
}

pub async fn delete_video() -> ClientResult<ActionResponse> {
    let response = Request::post(&url(endpoints::DELETE_VIDEO))
        .json(&serde_json::json!({}))
        .map_err(network)?
        .send()
        .await
        .map_err(network)?;
    decode(response).await
}

pub async fn switch_to_webcam() -> ClientResult<ActionResponse> {
    let response = Request::post(&url(endpoints::SWITCH_SOURCE))
        .json(&SwitchSourceRequest::webcam())
        .map_err(network)?
        .send()
        .await
        .map_err(network)?;
    decode(response).await
}

pub async fn source_status() -> ClientResult<SourceStatus> {
    let response = Request::get(&url(endpoints::STATUS))
        .send()
        .await
        .map_err(network)?;
    decode(response).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base() {
        assert_eq!(normalize_base("http://camera:5000/"), "http://camera:5000");
        assert_eq!(normalize_base(" http://camera:5000 "), "http://camera:5000");
        assert_eq!(normalize_base(""), "");
    }
}
