use crate::error::ApiResult;
use crate::gateway::{ApiClient, Navigator};
use crate::http::{HttpMethod, HttpRequest, HttpTransport};
use crate::model::{ReportFile, ReportFormat, ReportPage, ReportQuery};
use crate::protocol::{REPORT_DOWNLOAD_PATH, ReportPageRequest};
use crate::session::KeyValueStore;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// 接种报表服务
pub struct ReportService<'a, T, S, N> {
    pub(super) api: &'a ApiClient<T, S, N>,
}

impl<T, S, N> ReportService<'_, T, S, N>
where
    T: HttpTransport,
    S: KeyValueStore,
    N: Navigator,
{
    /// 分页查询；`query.page` 从 1 开始，发送时换算为从 0 开始
    pub async fn page(&self, query: &ReportQuery) -> ApiResult<ReportPage> {
        self.api.execute(&ReportPageRequest(query)).await
    }

    /// 下载报表文件
    ///
    /// 文件名由格式决定，内容类型沿用后端返回值。
    pub async fn download(
        &self,
        format: ReportFormat,
        vaccine_name: &str,
    ) -> ApiResult<ReportFile> {
        let mut query = vec![("format", format.as_query().to_string())];
        let vaccine_name = vaccine_name.trim();
        if !vaccine_name.is_empty() {
            query.push(("vaccineName", vaccine_name.to_string()));
        }
        let url = self.api.url(REPORT_DOWNLOAD_PATH, &query);
        let response = self
            .api
            .dispatch(HttpRequest::new(&url, HttpMethod::Get))
            .await?;

        Ok(ReportFile {
            file_name: format.file_name(),
            content_type: response
                .content_type
                .clone()
                .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string()),
            bytes: response.body,
        })
    }
}
