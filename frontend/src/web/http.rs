//! HTTP 传输层
//!
//! 使用 `web_sys::fetch` 实现 `HttpTransport`，响应体一律按字节读取，
//! JSON 解析与二进制下载共用同一路径。

use vaxportal_shared::{HttpRequest, HttpResponse, HttpTransport, RequestBody, TransportError};
use vaxportal_shared::UploadFile;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Headers, Request, RequestCredentials, RequestInit, Response};

/// 基于 fetch 的传输层
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

#[async_trait::async_trait(?Send)]
impl HttpTransport for FetchTransport {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let headers = Headers::new().map_err(|e| {
            TransportError::RequestBuildFailed(format!("Headers could not be created: {:?}", e))
        })?;
        for (key, value) in &req.headers {
            headers.set(key, value).map_err(|e| {
                TransportError::RequestBuildFailed(format!("Header {} rejected: {:?}", key, e))
            })?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());
        if req.with_credentials {
            opts.set_credentials(RequestCredentials::Include);
        }

        match &req.body {
            RequestBody::Empty => {}
            RequestBody::Json(text) => opts.set_body(&JsValue::from_str(text)),
            // 不设置 Content-Type，由浏览器生成 multipart 边界
            RequestBody::Multipart { field, file } => opts.set_body(&multipart_form(field, file)?),
        }

        let request = Request::new_with_str_and_init(&req.url, &opts)
            .map_err(|e| TransportError::RequestBuildFailed(format!("{:?}", e)))?;

        let window = web_sys::window()
            .ok_or_else(|| TransportError::NetworkError("window is unavailable".to_string()))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| TransportError::NetworkError(js_message(&e)))?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| TransportError::ResponseReadFailed(format!("{:?}", e)))?;

        let content_type = response.headers().get("content-type").ok().flatten();
        let body = read_bytes(&response).await?;

        Ok(HttpResponse {
            status: response.status(),
            content_type,
            body,
        })
    }
}

/// 构建单文件 multipart 表单
fn multipart_form(field: &str, file: &UploadFile) -> Result<JsValue, TransportError> {
    let build_failed = |e: JsValue| TransportError::RequestBuildFailed(format!("{:?}", e));

    let form = FormData::new().map_err(build_failed)?;
    let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(file.bytes.as_slice()));
    let options = BlobPropertyBag::new();
    options.set_type(&file.content_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(build_failed)?;
    form.append_with_blob_and_filename(field, &blob, &file.file_name)
        .map_err(build_failed)?;
    Ok(form.into())
}

async fn read_bytes(response: &Response) -> Result<Vec<u8>, TransportError> {
    let promise = response
        .array_buffer()
        .map_err(|e| TransportError::ResponseReadFailed(format!("{:?}", e)))?;
    let buffer = JsFuture::from(promise)
        .await
        .map_err(|e| TransportError::ResponseReadFailed(format!("{:?}", e)))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

/// 取出 JS 异常中的消息，例如 "Failed to fetch"
fn js_message(value: &JsValue) -> String {
    value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .unwrap_or_else(|| format!("{:?}", value))
}
