//! 构建期配置
//!
//! 静态 wasm 包没有进程环境变量，配置在编译时通过 `option_env!` 读入。

use vaxportal_shared::ClientConfig;
use vaxportal_shared::config::{ENV_API_BASE_URL, ENV_REPORT_PAGE_SIZE};

pub fn client_config() -> ClientConfig {
    ClientConfig::from_lookup(|key| {
        let value = match key {
            ENV_API_BASE_URL => option_env!("VAXPORTAL_API_BASE_URL"),
            ENV_REPORT_PAGE_SIZE => option_env!("VAXPORTAL_REPORT_PAGE_SIZE"),
            _ => None,
        };
        value.map(str::to_string)
    })
}
