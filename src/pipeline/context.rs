use std::sync::Arc;

use anyhow::Result;

use crate::config::Config;
use crate::fetcher::{ContentFetcher, HttpFetcher};
use crate::llm::{ApiEmbedder, LLMClient, LanguageModel};
use crate::retrieval::RetrievalIndex;
use crate::retrieval::store::{DiskVectorStore, VectorStore};

/// 流水线与问答引擎共享的运行上下文。
/// 三个不透明协作方（模型、抓取、向量索引）都以trait对象注入，
/// 测试中可整体替换为桩实现。
#[derive(Clone)]
pub struct PipelineContext {
    /// 语言模型协作方
    pub model: Arc<dyn LanguageModel>,
    /// 网页抓取协作方
    pub fetcher: Arc<dyn ContentFetcher>,
    /// 报告检索索引
    pub index: RetrievalIndex,
    /// 配置
    pub config: Config,
}

impl PipelineContext {
    /// 以生产协作方创建上下文
    pub fn new(config: Config) -> Result<Self> {
        let model = Arc::new(LLMClient::new(config.clone())?);
        let fetcher = Arc::new(HttpFetcher::new(&config.fetcher)?);
        let embedder = Arc::new(ApiEmbedder::new(&config.embedding)?);
        let store = Arc::new(DiskVectorStore::new(config.index_dir(), embedder));

        Ok(Self::with_collaborators(config, model, fetcher, store))
    }

    /// 以自定义协作方创建上下文
    pub fn with_collaborators(
        config: Config,
        model: Arc<dyn LanguageModel>,
        fetcher: Arc<dyn ContentFetcher>,
        store: Arc<dyn VectorStore>,
    ) -> Self {
        Self {
            model,
            fetcher,
            index: RetrievalIndex::new(store),
            config,
        }
    }

    /// 检查模型连接和功能是否正常
    pub async fn check_connection(&self) -> Result<()> {
        println!("🔄 正在检查模型连接...");
        match self
            .model
            .generate("System: You are a helpful assistant.", "Hello")
            .await
        {
            Ok(_) => {
                println!("✅ 模型连接正常");
                Ok(())
            }
            Err(e) => {
                eprintln!("❌ 模型连接失败: {}", e);
                Err(e)
            }
        }
    }
}
