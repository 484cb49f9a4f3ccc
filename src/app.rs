use crate::clients::TranslateClient;
use crate::config::Settings;
use crate::models::{TaskStatus, TranslationTask};
use crate::orchestrator::Poller;
use crate::store::{ConfigStore, TaskRegistry};
use crate::utils::format::format_file_size;
use anyhow::{Context, Result};
use futures::future::join_all;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// 应用主结构
///
/// 装配配置存储、API 客户端、任务注册表与轮询器，
/// 并把同一个注册表句柄传给所有消费方
pub struct App {
    settings: Settings,
    config_store: ConfigStore,
    client: Arc<TranslateClient>,
    registry: Arc<Mutex<TaskRegistry>>,
    poller: Poller<TranslateClient>,
}

impl App {
    /// 初始化应用
    ///
    /// 加载本地配置，并用服务端任务列表播种本地注册表；
    /// 服务暂不可用时记录警告并以空列表启动
    pub async fn initialize(settings: Settings) -> Result<Self> {
        let mut config_store = ConfigStore::new(&settings.config_path);
        config_store.load();

        let client = Arc::new(TranslateClient::new(&settings)?);
        let registry = Arc::new(Mutex::new(TaskRegistry::new()));

        match client.list_tasks().await {
            Ok(tasks) => {
                let mut guard = registry.lock().await;
                // 服务端按创建时间倒序返回，逆序插入后队首仍是最新任务
                for task in tasks.into_iter().rev() {
                    guard.add(task);
                }
                info!("✓ 从服务端同步了 {} 个历史任务", guard.len());
            }
            Err(e) => warn!("⚠️ 无法获取服务端任务列表，以空列表启动: {}", e),
        }

        let poller = Poller::new(
            Arc::clone(&client),
            Arc::clone(&registry),
            Duration::from_millis(settings.poll_interval_ms),
        );

        Ok(Self {
            settings,
            config_store,
            client,
            registry,
            poller,
        })
    }

    /// 运行应用主逻辑
    ///
    /// 上传所有文件，轮询各任务至终态，然后下载完成任务的译文
    pub async fn run(&self, files: &[PathBuf]) -> Result<()> {
        if files.is_empty() {
            warn!("⚠️ 没有指定待翻译的文件，程序结束");
            return Ok(());
        }

        log_startup(&self.settings, files.len());

        let mut submitted = Vec::new();
        let mut handles = Vec::new();
        for path in files {
            match self.submit_file(path).await {
                Ok(task_id) => {
                    handles.push(self.poller.spawn_cycle(task_id.clone()));
                    submitted.push(task_id);
                }
                Err(e) => error!("❌ 上传失败 ({}): {}", path.display(), e),
            }
        }

        // 等待所有轮询周期结束
        join_all(handles).await;

        let stats = self.collect_results(&submitted).await;
        print_final_stats(&stats, files.len());
        Ok(())
    }

    /// 当前在用配置的只读视图
    pub fn config_store(&self) -> &ConfigStore {
        &self.config_store
    }

    pub fn config_store_mut(&mut self) -> &mut ConfigStore {
        &mut self.config_store
    }

    /// 任务注册表句柄（供展示层订阅和查询）
    pub fn registry(&self) -> Arc<Mutex<TaskRegistry>> {
        Arc::clone(&self.registry)
    }

    /// 上传单个文件并登记任务
    async fn submit_file(&self, path: &Path) -> Result<String> {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("非法的文件名: {}", path.display()))?;
        let content =
            fs::read(path).with_context(|| format!("读取文件失败: {}", path.display()))?;

        info!(
            "📤 上传 {} ({})",
            filename,
            format_file_size(content.len() as u64)
        );

        let handle = self
            .client
            .upload(
                filename,
                content,
                &self.settings.source_lang,
                &self.settings.target_lang,
            )
            .await?;

        let task = TranslationTask::from_upload(&handle, filename);
        info!("✓ 任务创建成功: {} ({})", handle.task_id, task.status.label());
        self.registry.lock().await.add(task);

        Ok(handle.task_id)
    }

    /// 汇总本次提交的任务：完成的下载译文，失败的输出原因
    async fn collect_results(&self, submitted: &[String]) -> RunStats {
        let mut stats = RunStats::default();

        for task_id in submitted {
            let task = match self.registry.lock().await.get(task_id) {
                Some(task) => task.clone(),
                None => continue,
            };

            match task.status {
                TaskStatus::Completed => match self.download_to_disk(&task).await {
                    Ok(out) => {
                        info!("📥 译文已保存: {}", out.display());
                        stats.completed += 1;
                    }
                    Err(e) => {
                        error!("❌ 下载译文失败 ({}): {}", task.task_id, e);
                        stats.failed += 1;
                    }
                },
                TaskStatus::Failed => {
                    error!(
                        "❌ 任务 {} 失败: {}",
                        task.task_id,
                        task.message.as_deref().unwrap_or("未知原因")
                    );
                    stats.failed += 1;
                }
                // 轮询周期被服务端拒绝而提前结束的任务
                _ => stats.unresolved += 1,
            }
        }

        stats
    }

    async fn download_to_disk(&self, task: &TranslationTask) -> Result<PathBuf> {
        let bytes = self.client.download_translation(&task.task_id).await?;
        fs::create_dir_all(&self.settings.download_folder)
            .with_context(|| format!("创建下载目录失败: {}", self.settings.download_folder))?;
        let out = Path::new(&self.settings.download_folder).join(translated_filename(&task.filename));
        fs::write(&out, &bytes).with_context(|| format!("写入译文失败: {}", out.display()))?;
        Ok(out)
    }
}

/// 单次运行的处理统计
#[derive(Debug, Default)]
struct RunStats {
    completed: usize,
    failed: usize,
    unresolved: usize,
}

/// 由原文件名推导译文文件名，与服务端下载头保持一致
fn translated_filename(filename: &str) -> String {
    match filename.strip_suffix(".pdf") {
        Some(stem) => format!("{}_translated.pdf", stem),
        None => format!("{}_translated", filename),
    }
}

// ========== 日志辅助函数 ==========

fn log_startup(settings: &Settings, total_files: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - PDF 翻译客户端");
    info!("🌐 服务地址: {}", settings.api_base_url);
    info!("🔤 语言对: {} -> {}", settings.source_lang, settings.target_lang);
    info!("📄 待处理文件: {} 个", total_files);
    info!("{}", "=".repeat(60));
}

fn print_final_stats(stats: &RunStats, total: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 完成: {}/{}", stats.completed, total);
    info!("❌ 失败: {}", stats.failed);
    if stats.unresolved > 0 {
        info!("⏳ 未出结果: {}", stats.unresolved);
    }
    info!("{}", "=".repeat(60));
}
