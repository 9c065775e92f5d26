//! 文本向量化客户端
//!
//! 检索索引依赖的向量由外部向量化服务生成，这里只约定调用协议：
//! Ollama原生接口或OpenAI兼容接口。

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::{EmbeddingConfig, EmbeddingProvider};

/// 不透明的向量化协作方
#[async_trait]
pub trait Embedder: Send + Sync {
    /// 将一批文本转换为向量，返回顺序与输入一致
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// 基于HTTP接口的向量化客户端
pub struct ApiEmbedder {
    config: EmbeddingConfig,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

/// Ollama `/api/embed` 的响应体
#[derive(Deserialize)]
struct OllamaEmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

/// OpenAI兼容 `/embeddings` 的响应体
#[derive(Deserialize)]
struct OpenAIEmbedResponse {
    data: Vec<OpenAIEmbedding>,
}

#[derive(Deserialize)]
struct OpenAIEmbedding {
    embedding: Vec<f32>,
}

impl ApiEmbedder {
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to build embedding http client")?;

        Ok(Self {
            config: config.clone(),
            client,
        })
    }

    async fn embed_ollama(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let url = format!(
            "{}/api/embed",
            self.config.api_base_url.trim_end_matches('/')
        );
        let request = EmbedRequest {
            model: &self.config.model,
            input: texts,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .context("向量化服务请求失败")?
            .error_for_status()
            .context("向量化服务返回错误状态")?;

        let body: OllamaEmbedResponse = response.json().await.context("向量化响应解析失败")?;
        Ok(body.embeddings)
    }

    async fn embed_openai(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let url = format!(
            "{}/embeddings",
            self.config.api_base_url.trim_end_matches('/')
        );
        let request = EmbedRequest {
            model: &self.config.model,
            input: texts,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .context("向量化服务请求失败")?
            .error_for_status()
            .context("向量化服务返回错误状态")?;

        let body: OpenAIEmbedResponse = response.json().await.context("向量化响应解析失败")?;
        Ok(body.data.into_iter().map(|d| d.embedding).collect())
    }
}

#[async_trait]
impl Embedder for ApiEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let embeddings = match self.config.provider {
            EmbeddingProvider::Ollama => self.embed_ollama(texts).await?,
            EmbeddingProvider::OpenAICompatible => self.embed_openai(texts).await?,
        };

        if embeddings.len() != texts.len() {
            return Err(anyhow!(
                "向量化结果数量不匹配: 期望 {}，实际 {}",
                texts.len(),
                embeddings.len()
            ));
        }

        Ok(embeddings)
    }
}
