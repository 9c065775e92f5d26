//! 报告检索索引
//!
//! 只追加的分块存储，按报告编号划定检索范围。分块id形如
//! `{report_id}_{sequence_index}`，同id重复写入覆盖旧记录。

use anyhow::Result;
use std::sync::Arc;

pub mod chunker;
pub mod store;

pub use chunker::{ChunkError, chunk_text};

use store::{ChunkRecord, VectorStore};

/// 检索索引：负责id分配与范围约定，向量细节交给存储引擎
#[derive(Clone)]
pub struct RetrievalIndex {
    store: Arc<dyn VectorStore>,
}

impl RetrievalIndex {
    pub fn new(store: Arc<dyn VectorStore>) -> Self {
        Self { store }
    }

    /// 把一份报告的分块写入索引，返回入库的分块数
    pub async fn upsert(&self, report_id: &str, chunks: &[String]) -> Result<usize> {
        let records: Vec<ChunkRecord> = chunks
            .iter()
            .enumerate()
            .map(|(sequence_index, text)| ChunkRecord {
                id: format!("{}_{}", report_id, sequence_index),
                report_id: report_id.to_string(),
                sequence_index,
                text: text.clone(),
            })
            .collect();

        let stored = records.len();
        self.store.upsert(records).await?;
        Ok(stored)
    }

    /// 在单个报告范围内检索最相关的k个分块。
    /// 范围过滤先于排序，未入库的报告返回空序列。
    pub async fn query(&self, report_id: &str, question: &str, k: usize) -> Result<Vec<String>> {
        self.store.query(report_id, question, k).await
    }
}
