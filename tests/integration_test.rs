use pdf_translator_client::logger;
use pdf_translator_client::models::TaskStatus;
use pdf_translator_client::{Settings, TranslateClient, TranslationConfig};
use std::time::Duration;

#[tokio::test]
#[ignore] // 默认忽略，需要本地运行翻译服务后手动执行：cargo test -- --ignored
async fn test_upload_and_poll_to_completion() {
    // 初始化日志
    logger::init();

    // 加载配置
    let settings = Settings::from_env();
    let client = TranslateClient::new(&settings).expect("创建客户端失败");

    // 注意：请根据实际情况修改文件路径
    let path = std::path::Path::new("testdata/sample.pdf");
    let content = std::fs::read(path).expect("读取测试文件失败");

    let handle = client
        .upload("sample.pdf", content, &settings.source_lang, &settings.target_lang)
        .await
        .expect("上传失败");
    assert!(!handle.task_id.is_empty(), "服务端应分配任务ID");

    // 轮询至终态
    loop {
        tokio::time::sleep(Duration::from_millis(settings.poll_interval_ms)).await;
        let snapshot = client
            .get_progress(&handle.task_id)
            .await
            .expect("进度查询失败");
        println!(
            "任务 {} 进度: {}% ({})",
            handle.task_id, snapshot.progress, snapshot.status
        );
        if snapshot.status.is_terminal() {
            assert_eq!(snapshot.status, TaskStatus::Completed, "任务应该成功完成");
            break;
        }
    }

    // 下载译文
    let bytes = client
        .download_translation(&handle.task_id)
        .await
        .expect("下载译文失败");
    assert!(!bytes.is_empty(), "译文不应为空");
}

#[tokio::test]
#[ignore]
async fn test_list_tasks() {
    logger::init();

    let settings = Settings::from_env();
    let client = TranslateClient::new(&settings).expect("创建客户端失败");

    let tasks = client.list_tasks().await.expect("获取任务列表失败");
    println!("服务端共有 {} 个任务", tasks.len());
}

#[tokio::test]
#[ignore]
async fn test_list_languages() {
    logger::init();

    let settings = Settings::from_env();
    let client = TranslateClient::new(&settings).expect("创建客户端失败");

    let languages = client.list_languages().await.expect("获取语言列表失败");
    assert!(!languages.languages.is_empty(), "应至少支持一种语言");
}

#[tokio::test]
#[ignore]
async fn test_edit_result_and_submit_translation() {
    logger::init();

    let settings = Settings::from_env();
    let client = TranslateClient::new(&settings).expect("创建客户端失败");

    // 注意：需要一个已完成解析的任务ID
    let task_id = std::env::var("TEST_TASK_ID").expect("请通过 TEST_TASK_ID 指定任务");

    let result = client.get_result(&task_id).await.expect("获取解析结果失败");
    assert!(!result.segments.is_empty(), "解析结果不应为空");

    let edited = format!("{}\n<!-- 已校对 -->", result.segments[0].markdown_content);
    client
        .update_result(&task_id, result.segments[0].index, &edited)
        .await
        .expect("保存分段编辑失败");

    client
        .submit_translation(&task_id)
        .await
        .expect("提交翻译失败");

    let source = client.download_source(&task_id).await.expect("下载原文失败");
    assert!(!source.is_empty(), "原文不应为空");
}

#[tokio::test]
#[ignore]
async fn test_server_config_roundtrip() {
    logger::init();

    let settings = Settings::from_env();
    let client = TranslateClient::new(&settings).expect("创建客户端失败");

    let mut config = client.get_config().await.expect("获取服务端配置失败");
    config.aliyun_region = "cn-hangzhou".to_string();

    let echoed = client.save_config(&config).await.expect("保存服务端配置失败");
    assert_eq!(echoed.aliyun_region, "cn-hangzhou");

    let reloaded: TranslationConfig = client.get_config().await.expect("获取服务端配置失败");
    assert_eq!(reloaded.aliyun_region, "cn-hangzhou");
}
