use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

/// LLM Provider类型
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub enum LLMProvider {
    #[serde(rename = "openai")]
    OpenAI,
    #[serde(rename = "deepseek")]
    DeepSeek,
    #[serde(rename = "anthropic")]
    Anthropic,
    #[serde(rename = "ollama")]
    #[default]
    Ollama,
}

impl std::fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LLMProvider::OpenAI => write!(f, "openai"),
            LLMProvider::DeepSeek => write!(f, "deepseek"),
            LLMProvider::Anthropic => write!(f, "anthropic"),
            LLMProvider::Ollama => write!(f, "ollama"),
        }
    }
}

impl std::str::FromStr for LLMProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(LLMProvider::OpenAI),
            "deepseek" => Ok(LLMProvider::DeepSeek),
            "anthropic" => Ok(LLMProvider::Anthropic),
            "ollama" => Ok(LLMProvider::Ollama),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

/// 向量化服务的接口风格
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub enum EmbeddingProvider {
    /// Ollama原生接口（POST /api/embed）
    #[serde(rename = "ollama")]
    #[default]
    Ollama,
    /// OpenAI兼容接口（POST {base}/embeddings）
    #[serde(rename = "openai")]
    OpenAICompatible,
}

/// 应用程序配置
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    /// 报告与问答产物的输出路径
    pub output_path: PathBuf,

    /// 内部工作目录路径 (.mintel)，存放检索索引
    pub internal_path: PathBuf,

    /// LLM模型配置
    pub llm: LLMConfig,

    /// 向量化服务配置
    pub embedding: EmbeddingConfig,

    /// 检索索引配置
    pub index: IndexConfig,

    /// 网页抓取配置
    pub fetcher: FetcherConfig,

    /// 是否启用详细日志
    pub verbose: bool,
}

/// LLM模型配置
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LLMConfig {
    /// LLM Provider类型
    pub provider: LLMProvider,

    /// LLM API KEY
    pub api_key: String,

    /// LLM API基地址
    pub api_base_url: String,

    /// 推理模型
    pub model: String,

    /// 最大tokens
    pub max_tokens: u32,

    /// 温度
    pub temperature: f64,

    /// 重试次数
    pub retry_attempts: u32,

    /// 重试间隔（毫秒）
    pub retry_delay_ms: u64,

    /// 超时时间（秒）
    pub timeout_seconds: u64,
}

/// 向量化服务配置
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EmbeddingConfig {
    /// 接口风格
    pub provider: EmbeddingProvider,

    /// 向量化模型
    pub model: String,

    /// 向量化服务API基地址
    pub api_base_url: String,

    /// 向量化服务API KEY（Ollama本地服务可留空）
    pub api_key: String,

    /// 超时时间（秒）
    pub timeout_seconds: u64,
}

/// 检索索引配置
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct IndexConfig {
    /// 分块窗口大小（词数）
    pub chunk_size: usize,

    /// 相邻分块的重叠词数，必须小于chunk_size
    pub chunk_overlap: usize,

    /// 问答检索返回的分块数量
    pub top_k: usize,
}

/// 网页抓取配置
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FetcherConfig {
    /// 单次请求超时时间（秒）
    pub timeout_seconds: u64,

    /// 单篇文档保留的最大字符数
    pub max_content_chars: usize,

    /// 并发抓取数上限
    pub max_parallels: usize,

    /// User-Agent请求头
    pub user_agent: String,
}

impl Config {
    /// 从文件加载配置
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let mut file =
            File::open(path).context(format!("Failed to open config file: {:?}", path))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// 检索索引的存储目录
    pub fn index_dir(&self) -> PathBuf {
        self.internal_path.join("index")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("./mintel.outputs"),
            internal_path: PathBuf::from("./.mintel"),
            llm: LLMConfig::default(),
            embedding: EmbeddingConfig::default(),
            index: IndexConfig::default(),
            fetcher: FetcherConfig::default(),
            verbose: false,
        }
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: LLMProvider::default(),
            api_key: std::env::var("MINTEL_LLM_API_KEY").unwrap_or_default(),
            api_base_url: String::from("http://localhost:11434"),
            model: String::from("llama3"),
            max_tokens: 8192,
            temperature: 0.1,
            retry_attempts: 3,
            retry_delay_ms: 2000,
            timeout_seconds: 300,
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingProvider::default(),
            model: String::from("nomic-embed-text"),
            api_base_url: String::from("http://localhost:11434"),
            api_key: String::new(),
            timeout_seconds: 60,
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            chunk_size: 800,
            chunk_overlap: 100,
            top_k: 4,
        }
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 20,
            max_content_chars: 20_000,
            max_parallels: 3,
            user_agent: format!("market-intel-rs/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

// Include tests
#[cfg(test)]
mod tests;
