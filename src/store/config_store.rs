/// 翻译配置存储
///
/// 负责 TranslationConfig 的加载、合并更新与本地持久化
use crate::error::{AppError, AppResult, ConfigError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// 翻译配置
///
/// 与服务端 `/config` 接口共用同一字段集，本地与服务端各为独立的数据源
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationConfig {
    pub aliyun_access_key_id: String,
    pub aliyun_access_key_secret: String,
    pub aliyun_region: String,
    pub aliyun_endpoint: String,
    pub llm_api_key: String,
    pub llm_model: String,
    pub llm_endpoint: String,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            aliyun_access_key_id: String::new(),
            aliyun_access_key_secret: String::new(),
            aliyun_region: String::new(),
            aliyun_endpoint: "https://docmind-api.cn-hangzhou.aliyuncs.com".to_string(),
            llm_api_key: String::new(),
            llm_model: String::new(),
            llm_endpoint: "https://dashscope.aliyuncs.com/compatible-mode/v1".to_string(),
        }
    }
}

/// 配置的部分更新，缺失字段保持原值，未识别的字段在反序列化时被丢弃
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationConfigUpdate {
    #[serde(default)]
    pub aliyun_access_key_id: Option<String>,
    #[serde(default)]
    pub aliyun_access_key_secret: Option<String>,
    #[serde(default)]
    pub aliyun_region: Option<String>,
    #[serde(default)]
    pub aliyun_endpoint: Option<String>,
    #[serde(default)]
    pub llm_api_key: Option<String>,
    #[serde(default)]
    pub llm_model: Option<String>,
    #[serde(default)]
    pub llm_endpoint: Option<String>,
}

/// 配置存储：进程内唯一的在用配置实例及其持久化路径
pub struct ConfigStore {
    path: PathBuf,
    config: TranslationConfig,
}

impl ConfigStore {
    /// 创建配置存储，初始值为默认配置
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: TranslationConfig::default(),
        }
    }

    /// 从本地存储加载配置
    ///
    /// 识别的字段合并进在用配置，缺失字段保持默认值；
    /// 文件缺失或内容损坏时保留当前内存值，不向调用方抛错
    pub fn load(&mut self) {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("配置文件不存在，使用默认配置: {}", self.path.display());
                return;
            }
            Err(e) => {
                warn!("读取配置文件失败 ({}): {}", self.path.display(), e);
                return;
            }
        };

        match serde_json::from_str::<TranslationConfigUpdate>(&raw) {
            Ok(saved) => self.apply(saved),
            Err(e) => {
                let err = ConfigError::Corrupt {
                    path: self.path.display().to_string(),
                    source: Box::new(e),
                };
                warn!("加载配置失败: {}", err);
            }
        }
    }

    /// 合并部分更新并立即写入本地存储
    ///
    /// 每次调用都同步落盘，调用返回时配置已持久化
    pub fn update(&mut self, partial: TranslationConfigUpdate) -> AppResult<()> {
        self.apply(partial);
        self.persist()
    }

    /// 当前在用配置的只读视图
    pub fn get(&self) -> &TranslationConfig {
        &self.config
    }

    fn apply(&mut self, partial: TranslationConfigUpdate) {
        if let Some(v) = partial.aliyun_access_key_id {
            self.config.aliyun_access_key_id = v;
        }
        if let Some(v) = partial.aliyun_access_key_secret {
            self.config.aliyun_access_key_secret = v;
        }
        if let Some(v) = partial.aliyun_region {
            self.config.aliyun_region = v;
        }
        if let Some(v) = partial.aliyun_endpoint {
            self.config.aliyun_endpoint = v;
        }
        if let Some(v) = partial.llm_api_key {
            self.config.llm_api_key = v;
        }
        if let Some(v) = partial.llm_model {
            self.config.llm_model = v;
        }
        if let Some(v) = partial.llm_endpoint {
            self.config.llm_endpoint = v;
        }
    }

    fn persist(&self) -> AppResult<()> {
        let blob = serde_json::to_string_pretty(&self.config)
            .map_err(|e| AppError::file_write_failed(self.path.display().to_string(), e))?;
        fs::write(&self.path, blob)
            .map_err(|e| AppError::file_write_failed(self.path.display().to_string(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "pdf_translator_{}_{}.json",
            name,
            std::process::id()
        ))
    }

    #[test]
    fn test_defaults_keep_endpoints() {
        let config = TranslationConfig::default();
        assert!(config.aliyun_access_key_id.is_empty());
        assert!(config.llm_api_key.is_empty());
        assert_eq!(
            config.aliyun_endpoint,
            "https://docmind-api.cn-hangzhou.aliyuncs.com"
        );
        assert_eq!(
            config.llm_endpoint,
            "https://dashscope.aliyuncs.com/compatible-mode/v1"
        );
    }

    #[test]
    fn test_update_is_idempotent_and_persists() {
        let path = temp_path("idempotent");
        let mut store = ConfigStore::new(&path);

        let partial = TranslationConfigUpdate {
            aliyun_region: Some("cn-hangzhou".to_string()),
            ..Default::default()
        };
        store.update(partial.clone()).expect("写入配置失败");
        let once = store.get().clone();

        store.update(partial).expect("写入配置失败");
        assert_eq!(store.get(), &once);
        assert_eq!(store.get().aliyun_region, "cn-hangzhou");
        // 其余字段保持默认
        assert!(store.get().aliyun_access_key_id.is_empty());

        // 重新加载得到同样的值
        let mut reloaded = ConfigStore::new(&path);
        reloaded.load();
        assert_eq!(reloaded.get(), &once);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_corrupt_blob_keeps_current_values() {
        let path = temp_path("corrupt");
        fs::write(&path, "{ 这不是合法的JSON ").expect("写入测试文件失败");

        let mut store = ConfigStore::new(&path);
        store
            .update(TranslationConfigUpdate {
                llm_model: Some("qwen-max".to_string()),
                ..Default::default()
            })
            .expect("写入配置失败");
        // update 已覆盖文件，重新写回损坏内容再加载
        fs::write(&path, "not json at all").expect("写入测试文件失败");

        let before = store.get().clone();
        store.load();
        assert_eq!(store.get(), &before);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file_keeps_defaults() {
        let path = temp_path("missing");
        let _ = fs::remove_file(&path);

        let mut store = ConfigStore::new(&path);
        store.load();
        assert_eq!(store.get(), &TranslationConfig::default());
    }

    #[test]
    fn test_load_drops_unrecognized_keys() {
        let path = temp_path("unrecognized");
        fs::write(
            &path,
            r#"{ "aliyunRegion": "cn-beijing", "legacyField": "dropped" }"#,
        )
        .expect("写入测试文件失败");

        let mut store = ConfigStore::new(&path);
        store.load();
        assert_eq!(store.get().aliyun_region, "cn-beijing");
        // 缺失字段保持默认值
        assert_eq!(
            store.get().aliyun_endpoint,
            "https://docmind-api.cn-hangzhou.aliyuncs.com"
        );

        let _ = fs::remove_file(&path);
    }
}
