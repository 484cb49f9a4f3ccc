/// 翻译服务 API 客户端
///
/// 封装所有与翻译服务的 HTTP 调用，每个方法对应一个接口；
/// 传输失败/超时映射为服务不可达，非 2xx 响应映射为服务拒绝
use crate::config::Settings;
use crate::error::{AppError, AppResult};
use crate::models::{
    LanguageList, ParsedResult, ProgressSnapshot, TaskHandle, TranslationTask,
};
use crate::store::TranslationConfig;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::{json, Value};
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// 任务列表接口的响应
#[derive(Debug, Deserialize)]
struct TaskListResponse {
    tasks: Vec<TranslationTask>,
}

/// 进度查询能力
///
/// 轮询器只依赖这一个接口，测试时可用脚本化实现替换真实客户端
pub trait ProgressSource: Send + Sync {
    fn get_progress(
        &self,
        task_id: &str,
    ) -> impl Future<Output = AppResult<ProgressSnapshot>> + Send;
}

/// 翻译服务客户端
pub struct TranslateClient {
    http: reqwest::Client,
    base_url: String,
}

impl TranslateClient {
    /// 创建新的客户端，所有请求共用固定超时
    pub fn new(settings: &Settings) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .map_err(|e| AppError::remote_unavailable(settings.api_base_url.clone(), e))?;
        Ok(Self {
            http,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// 上传文件并创建翻译任务
    ///
    /// # 参数
    /// - `filename`: 原始文件名
    /// - `content`: 文件内容
    /// - `source_lang` / `target_lang`: 语言对
    ///
    /// # 返回
    /// 返回服务端分配的任务 ID 与初始状态
    pub async fn upload(
        &self,
        filename: &str,
        content: Vec<u8>,
        source_lang: &str,
        target_lang: &str,
    ) -> AppResult<TaskHandle> {
        let endpoint = "/upload";
        let form = Form::new()
            .part("file", Part::bytes(content).file_name(filename.to_string()))
            .text("source_lang", source_lang.to_string())
            .text("target_lang", target_lang.to_string());

        debug!("上传文件: {} ({} -> {})", filename, source_lang, target_lang);

        let result = self.http.post(self.url(endpoint)).multipart(form).send().await;
        self.parse_json(endpoint, result).await
    }

    /// 获取支持的语言列表
    pub async fn list_languages(&self) -> AppResult<LanguageList> {
        let endpoint = "/languages";
        let result = self.http.get(self.url(endpoint)).send().await;
        self.parse_json(endpoint, result).await
    }

    /// 将已解析的任务推进到翻译阶段
    pub async fn submit_translation(&self, task_id: &str) -> AppResult<()> {
        let endpoint = "/translate";
        let result = self
            .http
            .post(self.url(endpoint))
            .json(&json!({ "taskId": task_id }))
            .send()
            .await;
        self.check(endpoint, result).await?;
        Ok(())
    }

    /// 查询任务进度（单次快照）
    pub async fn get_progress(&self, task_id: &str) -> AppResult<ProgressSnapshot> {
        let endpoint = format!("/progress/{}", task_id);
        let result = self.http.get(self.url(&endpoint)).send().await;
        self.parse_json(&endpoint, result).await
    }

    /// 获取服务端任务列表（用于启动时同步本地注册表）
    pub async fn list_tasks(&self) -> AppResult<Vec<TranslationTask>> {
        let endpoint = "/translations";
        let result = self.http.get(self.url(endpoint)).send().await;
        let response: TaskListResponse = self.parse_json(endpoint, result).await?;
        Ok(response.tasks)
    }

    /// 获取任务的结构化解析结果
    pub async fn get_result(&self, task_id: &str) -> AppResult<ParsedResult> {
        let endpoint = format!("/task/{}/result", task_id);
        let result = self.http.get(self.url(&endpoint)).send().await;
        self.parse_json(&endpoint, result).await
    }

    /// 保存用户对解析结果单个分段的编辑
    pub async fn update_result(
        &self,
        task_id: &str,
        index: usize,
        content: &str,
    ) -> AppResult<()> {
        let endpoint = format!("/task/{}/result/update", task_id);
        let result = self
            .http
            .post(self.url(&endpoint))
            .json(&json!({ "index": index, "markdownContent": content }))
            .send()
            .await;
        self.check(&endpoint, result).await?;
        Ok(())
    }

    /// 下载原始文件
    pub async fn download_source(&self, task_id: &str) -> AppResult<Vec<u8>> {
        let endpoint = format!("/task/{}/source", task_id);
        let result = self.http.get(self.url(&endpoint)).send().await;
        self.read_bytes(&endpoint, result).await
    }

    /// 下载翻译结果
    pub async fn download_translation(&self, task_id: &str) -> AppResult<Vec<u8>> {
        let endpoint = format!("/download/{}", task_id);
        let result = self.http.get(self.url(&endpoint)).send().await;
        self.read_bytes(&endpoint, result).await
    }

    /// 获取服务端保存的配置
    pub async fn get_config(&self) -> AppResult<TranslationConfig> {
        let endpoint = "/config";
        let result = self.http.get(self.url(endpoint)).send().await;
        self.parse_json(endpoint, result).await
    }

    /// 保存配置到服务端，返回服务端回显的配置
    pub async fn save_config(&self, config: &TranslationConfig) -> AppResult<TranslationConfig> {
        let endpoint = "/config";
        let result = self.http.post(self.url(endpoint)).json(config).send().await;
        self.parse_json(endpoint, result).await
    }

    // ========== 内部辅助 ==========

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// 统一的响应检查：传输错误 -> 不可达，非 2xx -> 拒绝
    async fn check(
        &self,
        endpoint: &str,
        result: Result<reqwest::Response, reqwest::Error>,
    ) -> AppResult<reqwest::Response> {
        let response = result.map_err(|e| AppError::remote_unavailable(endpoint, e))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // 服务端错误响应为 {"detail": "..."}，取不到时退回原始文本
        let message = match response.text().await {
            Ok(body) => serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(String::from))
                .or_else(|| (!body.is_empty()).then_some(body)),
            Err(_) => None,
        };
        Err(AppError::remote_rejected(
            endpoint,
            Some(status.as_u16()),
            message,
        ))
    }

    async fn parse_json<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        result: Result<reqwest::Response, reqwest::Error>,
    ) -> AppResult<T> {
        let response = self.check(endpoint, result).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| AppError::remote_unavailable(endpoint, e))
    }

    async fn read_bytes(
        &self,
        endpoint: &str,
        result: Result<reqwest::Response, reqwest::Error>,
    ) -> AppResult<Vec<u8>> {
        let response = self.check(endpoint, result).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::remote_unavailable(endpoint, e))?;
        Ok(bytes.to_vec())
    }
}

impl ProgressSource for TranslateClient {
    fn get_progress(
        &self,
        task_id: &str,
    ) -> impl Future<Output = AppResult<ProgressSnapshot>> + Send {
        TranslateClient::get_progress(self, task_id)
    }
}
