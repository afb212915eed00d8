//! 文件上传与下载

use vaxportal_shared::{ApiError, ApiResult, ReportFile, UploadFile};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

const CSV_CONTENT_TYPE: &str = "text/csv";

fn file_error(context: &str, e: JsValue) -> ApiError {
    ApiError::network(format!("{}: {:?}", context, e))
}

/// 读取用户选择的文件
pub async fn read_upload(file: &web_sys::File) -> ApiResult<UploadFile> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| file_error("File could not be read", e))?;
    let content_type = match file.type_() {
        t if t.is_empty() => CSV_CONTENT_TYPE.to_string(),
        t => t,
    };
    Ok(UploadFile {
        file_name: file.name(),
        content_type,
        bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
    })
}

/// 触发浏览器"另存为"
///
/// 把字节包装为 Blob，通过临时 `<a download>` 点击下载，随后释放对象 URL。
pub fn save_download(file: &ReportFile) -> ApiResult<()> {
    let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(file.bytes.as_slice()));
    let options = BlobPropertyBag::new();
    options.set_type(&file.content_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|e| file_error("Download could not be prepared", e))?;
    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|e| file_error("Download could not be prepared", e))?;

    let result = click_download_link(&url, &file.file_name);
    let _ = Url::revoke_object_url(&url);
    result
}

fn click_download_link(url: &str, file_name: &str) -> ApiResult<()> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| ApiError::network("document is unavailable"))?;
    let body = document
        .body()
        .ok_or_else(|| ApiError::network("document body is unavailable"))?;

    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| file_error("Download link could not be created", e))?
        .dyn_into()
        .map_err(|e| file_error("Download link could not be created", e.into()))?;
    anchor.set_href(url);
    anchor.set_download(file_name);

    body.append_child(&anchor)
        .map_err(|e| file_error("Download link could not be attached", e))?;
    anchor.click();
    anchor.remove();
    Ok(())
}
