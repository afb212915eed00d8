use crate::model::DEFAULT_REPORT_PAGE_SIZE;

// =========================================================
// 客户端配置 (Client Configuration)
// =========================================================

/// 这些是默认值，如果构建环境中没有定义对应变量，则使用这些值
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:9095/api";

pub const ENV_API_BASE_URL: &str = "VAXPORTAL_API_BASE_URL";
pub const ENV_REPORT_PAGE_SIZE: &str = "VAXPORTAL_REPORT_PAGE_SIZE";

/// 客户端配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// 后端 API 根地址（不带结尾的 `/`）
    pub api_base_url: String,
    /// 报表每页条数
    pub report_page_size: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            report_page_size: DEFAULT_REPORT_PAGE_SIZE,
        }
    }
}

impl ClientConfig {
    /// 通过键查找函数构建配置，读不到或无效就用默认值
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup(ENV_API_BASE_URL)
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let report_page_size = lookup(ENV_REPORT_PAGE_SIZE)
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_REPORT_PAGE_SIZE);

        Self {
            api_base_url,
            report_page_size,
        }
    }
}
