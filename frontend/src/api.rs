use vaxportal_shared::ApiClient;

use crate::config::client_config;
use crate::web::{BrowserNavigator, FetchTransport, LocalStorage};

/// 浏览器环境下的网关客户端
pub type PortalApi = ApiClient<FetchTransport, LocalStorage, BrowserNavigator>;

/// 构建网关客户端
///
/// 各组成部分都是零大小类型，按需构建即可，不放进 Context。
pub fn portal_api() -> PortalApi {
    PortalApi::new(&client_config(), FetchTransport, LocalStorage, BrowserNavigator)
}
