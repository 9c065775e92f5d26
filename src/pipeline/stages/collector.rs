//! Collector阶段：选取权威来源并抓取原始素材

use anyhow::Result;
use async_trait::async_trait;
use futures::{StreamExt, stream};
use serde_json::Value;

use crate::pipeline::context::PipelineContext;
use crate::pipeline::stage::PipelineStage;
use crate::pipeline::state::{PipelineState, StageKeys};
use crate::pipeline::types::{CollectedSources, Document};
use crate::utils::json::parse_json_response;

/// 模型给不出可用URL列表时的兜底来源
const FALLBACK_SOURCES: [&str; 2] = ["https://www.reuters.com", "https://www.mckinsey.com"];

const SYSTEM_PROMPT: &str = "You are a market intelligence collector.";

#[derive(Default, Clone)]
pub struct Collector;

impl Collector {
    /// 让模型为主题挑选权威URL，解析失败退回兜底来源
    async fn select_sources(&self, context: &PipelineContext, topic: &str) -> Vec<String> {
        let user_prompt = format!(
            r#"Given the topic: "{}"

Return STRICT JSON list of authoritative URLs.
Example:
[
  "https://rbi.org.in",
  "https://www.reuters.com"
]"#,
            topic
        );

        let response = match context.model.generate(SYSTEM_PROMPT, &user_prompt).await {
            Ok(response) => response,
            Err(e) => {
                eprintln!("⚠️ [Collector] 模型调用失败，使用兜底来源: {}", e);
                return fallback_sources();
            }
        };

        match parse_json_response::<Vec<String>>(&response) {
            Ok(urls) if !urls.is_empty() => urls,
            Ok(_) => {
                eprintln!("⚠️ [Collector] 模型返回空URL列表，使用兜底来源");
                fallback_sources()
            }
            Err(e) => {
                eprintln!("⚠️ [Collector] URL列表解析失败，使用兜底来源: {}", e);
                fallback_sources()
            }
        }
    }

    /// 并发抓取全部来源，失败的来源直接略过
    async fn fetch_documents(&self, context: &PipelineContext, sources: &[String]) -> Vec<Document> {
        let max_parallels = context.config.fetcher.max_parallels.max(1);

        let fetches = sources.iter().cloned().map(|url| {
            let fetcher = context.fetcher.clone();
            async move {
                let result = fetcher.fetch(&url).await;
                (url, result)
            }
        });

        let results: Vec<_> = stream::iter(fetches).buffered(max_parallels).collect().await;

        let mut documents = Vec::new();
        for (url, result) in results {
            match result {
                Ok(content) if !content.is_empty() => {
                    if context.config.verbose {
                        println!("   📄 {} ({} 字符)", url, content.len());
                    }
                    documents.push(Document { url, content });
                }
                Ok(_) => {}
                Err(e) => {
                    eprintln!("⚠️ [Collector] 抓取失败，跳过来源 {}: {}", url, e);
                }
            }
        }
        documents
    }
}

fn fallback_sources() -> Vec<String> {
    FALLBACK_SOURCES.iter().map(|s| s.to_string()).collect()
}

#[async_trait]
impl PipelineStage for Collector {
    fn name(&self) -> &'static str {
        "Collector"
    }

    fn output_key(&self) -> &'static str {
        StageKeys::COLLECTED
    }

    async fn execute(&self, context: &PipelineContext, state: &PipelineState) -> Result<Value> {
        let topic: String = state.require_as(StageKeys::TOPIC)?;
        println!("🔍 [Collector] 开始收集主题素材: {}", topic);

        let sources = self.select_sources(context, &topic).await;
        let documents = self.fetch_documents(context, &sources).await;

        println!("📥 [Collector] 已收集文档数: {}", documents.len());

        let collected = CollectedSources {
            topic,
            sources,
            documents,
        };
        Ok(serde_json::to_value(collected)?)
    }
}
