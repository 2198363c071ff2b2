use shop_client::{ClientConfig, Session};

use crate::controller::MountOptions;

/// 目录页配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | SHOP_API_URL | http://localhost:5000/api | API 基础地址 |
/// | SHOP_API_TIMEOUT_SECS | 30 | 请求超时(秒) |
/// | SHOP_PRODUCT_LIMIT | 50 | 每次列表请求数量 |
/// | SHOP_API_TOKEN | - | 登录令牌 (可选) |
/// | CATALOG_CATEGORY | - | 深链接分类 (仅挂载时读取) |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | - | 日志目录 (存在时写入滚动日志) |
#[derive(Debug, Clone)]
pub struct Config {
    pub client: ClientConfig,
    pub auth_token: Option<String>,
    pub deep_link_category: Option<String>,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// Call `dotenv::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Self {
        Self {
            client: ClientConfig::from_env(),
            auth_token: non_empty_var("SHOP_API_TOKEN"),
            deep_link_category: non_empty_var("CATALOG_CATEGORY"),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: non_empty_var("LOG_DIR"),
        }
    }

    /// Session handed to the HTTP client
    pub fn session(&self) -> Session {
        match &self.auth_token {
            Some(token) => Session::with_token(token.clone()),
            None => Session::new(),
        }
    }

    pub fn mount_options(&self) -> MountOptions {
        MountOptions {
            deep_link_category: self.deep_link_category.clone(),
            product_limit: self.client.product_limit,
            ..MountOptions::default()
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
