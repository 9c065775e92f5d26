use anyhow::Result;
use async_trait::async_trait;

pub mod client;
pub mod embeddings;

pub use client::LLMClient;
pub use embeddings::{ApiEmbedder, Embedder};

/// 不透明的语言模型协作方，统一为文本到文本的推理接口。
/// 流水线阶段与问答引擎只依赖该trait，便于在测试中替换为桩实现。
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;
}
