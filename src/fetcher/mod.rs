//! 网页内容抓取
//!
//! Collector阶段依赖的外部抓取协作方。抓取失败只影响单个来源，
//! 由调用方决定是否忽略。

use anyhow::{Context, Result};
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::sync::LazyLock;

use crate::config::FetcherConfig;
use crate::utils::text::{collapse_whitespace, truncate_chars};

static CONTENT_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("p, h1, h2, h3, h4, li, td, figcaption").expect("static selector")
});

/// 不透明的网页抓取协作方
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// 抓取URL并返回清洗后的正文文本
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// 基于reqwest的抓取实现，HTML正文抽取后返回纯文本
pub struct HttpFetcher {
    client: reqwest::Client,
    max_content_chars: usize,
}

impl HttpFetcher {
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .user_agent(&config.user_agent)
            .build()
            .context("Failed to build fetcher http client")?;

        Ok(Self {
            client,
            max_content_chars: config.max_content_chars,
        })
    }
}

#[async_trait]
impl ContentFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("请求失败: {}", url))?
            .error_for_status()
            .with_context(|| format!("响应状态异常: {}", url))?;

        let html = response
            .text()
            .await
            .with_context(|| format!("读取响应体失败: {}", url))?;

        Ok(extract_text(&html, self.max_content_chars))
    }
}

/// 从HTML中抽取可读正文
fn extract_text(html: &str, max_chars: usize) -> String {
    let document = Html::parse_document(html);

    let mut content = String::new();
    for element in document.select(&CONTENT_SELECTOR) {
        for fragment in element.text() {
            let fragment = fragment.trim();
            if fragment.is_empty() {
                continue;
            }
            content.push_str(fragment);
            content.push(' ');
        }
    }

    let cleaned = collapse_whitespace(&content);
    truncate_chars(&cleaned, max_chars).to_string()
}
