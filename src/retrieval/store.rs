//! 向量存储引擎
//!
//! 检索索引把嵌入与相似度计算委托给存储引擎。DiskVectorStore按
//! 报告编号落盘一个JSON记录文件，查询时只加载对应报告的记录，
//! 因此报告范围过滤是结构性的，排序前就已完成。

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;

use crate::llm::Embedder;

/// 待入库的分块记录
#[derive(Debug, Clone)]
pub struct ChunkRecord {
    pub id: String,
    pub report_id: String,
    pub sequence_index: usize,
    pub text: String,
}

/// 不透明的向量存储协作方
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// 写入一批分块记录，按id幂等（重复写入覆盖）
    async fn upsert(&self, records: Vec<ChunkRecord>) -> Result<()>;

    /// 在指定报告范围内按语义相似度检索，返回最多k条文本，
    /// 相似度高者在前；无任何记录时返回空序列而非错误
    async fn query(&self, report_id: &str, question: &str, k: usize) -> Result<Vec<String>>;
}

/// 落盘的分块记录（含向量）
#[derive(Debug, Serialize, Deserialize)]
struct StoredChunk {
    id: String,
    sequence_index: usize,
    text: String,
    embedding: Vec<f32>,
}

/// 基于本地JSON文件的向量存储
pub struct DiskVectorStore {
    root: PathBuf,
    embedder: Arc<dyn Embedder>,
}

impl DiskVectorStore {
    pub fn new(root: PathBuf, embedder: Arc<dyn Embedder>) -> Self {
        Self { root, embedder }
    }

    fn record_path(&self, report_id: &str) -> PathBuf {
        self.root.join(format!("{}.json", report_id))
    }

    async fn load_records(&self, report_id: &str) -> Result<Vec<StoredChunk>> {
        let path = self.record_path(report_id);
        if !path.exists() {
            return Ok(vec![]);
        }

        let content = fs::read_to_string(&path)
            .await
            .with_context(|| format!("读取索引文件失败: {:?}", path))?;
        let records = serde_json::from_str(&content)
            .with_context(|| format!("索引文件解析失败: {:?}", path))?;
        Ok(records)
    }

    async fn save_records(&self, report_id: &str, records: &[StoredChunk]) -> Result<()> {
        let path = self.record_path(report_id);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(records)?;
        fs::write(&path, content)
            .await
            .with_context(|| format!("写入索引文件失败: {:?}", path))?;
        Ok(())
    }
}

#[async_trait]
impl VectorStore for DiskVectorStore {
    async fn upsert(&self, records: Vec<ChunkRecord>) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        // 同一批记录按报告分组，通常只有一个报告
        let mut by_report: HashMap<String, Vec<ChunkRecord>> = HashMap::new();
        for record in records {
            by_report
                .entry(record.report_id.clone())
                .or_default()
                .push(record);
        }

        for (report_id, batch) in by_report {
            let texts: Vec<String> = batch.iter().map(|r| r.text.clone()).collect();
            let embeddings = self.embedder.embed(&texts).await?;

            let mut stored = self.load_records(&report_id).await?;
            for (record, embedding) in batch.into_iter().zip(embeddings) {
                // 按id幂等：旧记录被同id新记录替换
                stored.retain(|existing| existing.id != record.id);
                stored.push(StoredChunk {
                    id: record.id,
                    sequence_index: record.sequence_index,
                    text: record.text,
                    embedding,
                });
            }
            stored.sort_by_key(|record| record.sequence_index);

            self.save_records(&report_id, &stored).await?;
        }

        Ok(())
    }

    async fn query(&self, report_id: &str, question: &str, k: usize) -> Result<Vec<String>> {
        let records = self.load_records(report_id).await?;
        if records.is_empty() || k == 0 {
            return Ok(vec![]);
        }

        let question_batch = [question.to_string()];
        let question_embedding = self
            .embedder
            .embed(&question_batch)
            .await?
            .into_iter()
            .next()
            .unwrap_or_default();

        let mut scored: Vec<(f32, String)> = records
            .into_iter()
            .map(|record| {
                let score = cosine_similarity(&question_embedding, &record.embedding);
                (score, record.text)
            })
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        Ok(scored.into_iter().take(k).map(|(_, text)| text).collect())
    }
}

/// 余弦相似度，零向量或维度不一致时返回0
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.is_empty() || a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}
