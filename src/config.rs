/// 客户端运行时配置
#[derive(Clone, Debug)]
pub struct Settings {
    /// 翻译服务 API 基础地址
    pub api_base_url: String,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
    /// 进度轮询间隔（毫秒）
    pub poll_interval_ms: u64,
    /// 本地配置文件路径
    pub config_path: String,
    /// 译文下载目录
    pub download_folder: String,
    /// 默认源语言
    pub source_lang: String,
    /// 默认目标语言
    pub target_lang: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3002/api".to_string(),
            request_timeout_secs: 30,
            poll_interval_ms: 3000,
            config_path: "translation_config.json".to_string(),
            download_folder: "downloads".to_string(),
            source_lang: "en".to_string(),
            target_lang: "zh".to_string(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            api_base_url: std::env::var("API_BASE_URL").unwrap_or(default.api_base_url),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            poll_interval_ms: std::env::var("POLL_INTERVAL_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.poll_interval_ms),
            config_path: std::env::var("CONFIG_PATH").unwrap_or(default.config_path),
            download_folder: std::env::var("DOWNLOAD_FOLDER").unwrap_or(default.download_folder),
            source_lang: std::env::var("SOURCE_LANG").unwrap_or(default.source_lang),
            target_lang: std::env::var("TARGET_LANG").unwrap_or(default.target_lang),
        }
    }
}
