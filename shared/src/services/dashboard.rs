use crate::error::ApiResult;
use crate::gateway::{ApiClient, Navigator};
use crate::http::HttpTransport;
use crate::model::DashboardData;
use crate::protocol::DashboardRequest;
use crate::session::KeyValueStore;

/// 仪表盘服务，结果不缓存，每次进入页面都重新拉取
pub struct DashboardService<'a, T, S, N> {
    pub(super) api: &'a ApiClient<T, S, N>,
}

impl<T, S, N> DashboardService<'_, T, S, N>
where
    T: HttpTransport,
    S: KeyValueStore,
    N: Navigator,
{
    pub async fn fetch(&self) -> ApiResult<DashboardData> {
        self.api.execute(&DashboardRequest).await
    }
}
