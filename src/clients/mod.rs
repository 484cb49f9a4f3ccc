//! 远程服务客户端层
//!
//! 与翻译服务的类型化请求/响应边界，每个远程能力对应一个方法

pub mod translate_client;

pub use translate_client::{ProgressSource, TranslateClient};
