//! Client configuration

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
/// Default request timeout (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Default page size requested from the listing endpoint
pub const DEFAULT_PRODUCT_LIMIT: u32 = 50;

/// Client configuration for connecting to the storefront API
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | SHOP_API_URL | http://localhost:5000/api | API 基础地址 |
/// | SHOP_API_TIMEOUT_SECS | 30 | 请求超时(秒) |
/// | SHOP_PRODUCT_LIMIT | 50 | 每次列表请求数量 |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:5000/api")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    pub user_agent: String,

    /// `limit` parameter for product listing requests
    pub product_limit: u32,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: concat!("shop-client/", env!("CARGO_PKG_VERSION")).to_string(),
            product_limit: DEFAULT_PRODUCT_LIMIT,
        }
    }

    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置或无法解析，使用默认值
    pub fn from_env() -> Self {
        let mut config =
            Self::new(std::env::var("SHOP_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into()));
        config.timeout_secs = std::env::var("SHOP_API_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        config.product_limit = std::env::var("SHOP_PRODUCT_LIMIT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PRODUCT_LIMIT);
        config
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_secs = seconds;
        self
    }

    /// Set the listing page size
    pub fn with_product_limit(mut self, limit: u32) -> Self {
        self.product_limit = limit;
        self
    }

    /// Set the User-Agent header
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
