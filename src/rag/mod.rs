//! 检索增强问答引擎
//!
//! 针对单个报告的范围化检索 + 受限上下文作答。检索为空时直接
//! 返回无数据结果，不调用模型，避免空上下文上的臆造与浪费。

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::llm::LanguageModel;
use crate::retrieval::RetrievalIndex;

/// 上下文中找不到答案时模型被要求输出的固定句
pub const NOT_FOUND_SENTINEL: &str = "Not found in report";

/// 报告没有任何已入库分块时返回给调用方的答复
pub const NO_DATA_MESSAGE: &str = "No relevant data found for this report";

const SYSTEM_PROMPT: &str = "You are a market intelligence analyst.";

/// 一次问答的持久化产物，创建后不再修改
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatExchange {
    pub report_id: String,
    pub question: String,
    pub answer: String,
    pub chunks_used: Vec<String>,
}

/// 问答结果：要么报告无数据，要么带证据分块的回答
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// 该报告没有任何已入库分块
    NoData,
    Answered {
        answer: String,
        chunks_used: Vec<String>,
    },
}

/// 检索增强问答引擎
pub struct QueryEngine {
    index: RetrievalIndex,
    model: Arc<dyn LanguageModel>,
    top_k: usize,
}

impl QueryEngine {
    pub fn new(index: RetrievalIndex, model: Arc<dyn LanguageModel>, top_k: usize) -> Self {
        Self {
            index,
            model,
            top_k,
        }
    }

    /// 回答关于指定报告的问题
    pub async fn answer(&self, report_id: &str, question: &str) -> Result<QueryOutcome> {
        let chunks = self.index.query(report_id, question, self.top_k).await?;

        if chunks.is_empty() {
            return Ok(QueryOutcome::NoData);
        }

        // 按检索排名顺序拼接上下文，空行分隔
        let context = chunks.join("\n\n");
        let user_prompt = format!(
            r#"Answer the question ONLY using the context below.
If the answer is not present, say "{}".

CONTEXT:
{}

QUESTION:
{}"#,
            NOT_FOUND_SENTINEL, context, question
        );

        let answer = self.model.generate(SYSTEM_PROMPT, &user_prompt).await?;

        Ok(QueryOutcome::Answered {
            answer,
            chunks_used: chunks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Embedder;
    use crate::retrieval::store::DiskVectorStore;
    use anyhow::Result;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    /// 统计调用次数的模型桩
    struct CountingModel {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl LanguageModel for CountingModel {
        async fn generate(&self, _system_prompt: &str, _user_prompt: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok("stub answer".to_string())
        }
    }

    /// 确定性的向量化桩
    struct HashEmbedder;

    #[async_trait]
    impl Embedder for HashEmbedder {
        async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(texts
                .iter()
                .map(|text| {
                    let mut vector = vec![0.0f32; 8];
                    for (i, byte) in text.bytes().enumerate() {
                        vector[i % 8] += byte as f32 / 255.0;
                    }
                    vector
                })
                .collect())
        }
    }

    fn engine_over(dir: &TempDir, model: Arc<CountingModel>, top_k: usize) -> QueryEngine {
        let store = Arc::new(DiskVectorStore::new(
            dir.path().to_path_buf(),
            Arc::new(HashEmbedder),
        ));
        QueryEngine::new(RetrievalIndex::new(store), model, top_k)
    }

    #[tokio::test]
    async fn test_empty_retrieval_short_circuits_without_model_call() {
        let dir = TempDir::new().unwrap();
        let model = Arc::new(CountingModel {
            calls: AtomicUsize::new(0),
        });
        let engine = engine_over(&dir, model.clone(), 4);

        let outcome = engine.answer("unknown_report", "What?").await.unwrap();

        assert_eq!(outcome, QueryOutcome::NoData);
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_answer_returns_chunks_used() {
        let dir = TempDir::new().unwrap();
        let model = Arc::new(CountingModel {
            calls: AtomicUsize::new(0),
        });
        let engine = engine_over(&dir, model.clone(), 4);

        engine
            .index
            .upsert(
                "r1",
                &[
                    "regulation changes raise costs".to_string(),
                    "liquidity stress persists".to_string(),
                ],
            )
            .await
            .unwrap();

        let outcome = engine.answer("r1", "What about costs?").await.unwrap();

        match outcome {
            QueryOutcome::Answered {
                answer,
                chunks_used,
            } => {
                assert_eq!(answer, "stub answer");
                assert_eq!(chunks_used.len(), 2);
            }
            QueryOutcome::NoData => panic!("expected an answer"),
        }
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    }
}
