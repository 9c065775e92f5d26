use crate::config::{Config, LLMProvider};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Mintel (market-intel-rs) - 由Rust与AI驱动的市场情报研究引擎
#[derive(Parser, Debug)]
#[command(name = "Mintel (market-intel-rs)")]
#[command(
    about = "AI-driven market intelligence engine. It runs a multi-stage research pipeline over web sources, writes a structured market report, and answers follow-up questions about the report through retrieval-augmented generation."
)]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 输出路径
    #[arg(short, long)]
    pub output_path: Option<PathBuf>,

    /// LLM API基地址
    #[arg(long)]
    pub llm_api_base_url: Option<String>,

    /// LLM API KEY
    #[arg(long)]
    pub llm_api_key: Option<String>,

    /// 推理模型
    #[arg(long)]
    pub model: Option<String>,

    /// LLM Provider (openai, deepseek, anthropic, ollama)
    #[arg(long)]
    pub llm_provider: Option<String>,

    /// 是否启用详细日志
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 运行市场分析流水线，生成结构化报告并建立检索索引
    Analyze {
        /// 行业名称，例如 "Fintech"
        #[arg(long)]
        industry: String,

        /// 分析区间起始日期，例如 2024-01-01
        #[arg(long)]
        from_date: String,

        /// 分析区间截止日期，例如 2024-06-01
        #[arg(long)]
        to_date: String,

        /// 可选的关注点，例如 "digital lending"
        #[arg(long)]
        focus: Option<String>,
    },
    /// 针对已生成的报告进行检索增强问答
    Chat {
        /// 报告编号（analyze输出的report_id）
        #[arg(long)]
        report_id: String,

        /// 要提问的问题
        #[arg(long)]
        question: String,
    },
}

impl Args {
    /// 将CLI参数转换为配置
    pub fn to_config(&self) -> Result<Config> {
        let mut config = if let Some(config_path) = &self.config {
            // 显式指定了配置文件路径，从该路径加载
            Config::from_file(config_path)?
        } else {
            // 尝试从默认位置加载
            let default_config_path = std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join("mintel.toml");

            if default_config_path.exists() {
                Config::from_file(&default_config_path)?
            } else {
                Config::default()
            }
        };

        // 覆盖配置文件中的设置
        if let Some(output_path) = &self.output_path {
            config.output_path = output_path.clone();
        }

        if let Some(provider_str) = &self.llm_provider {
            if let Ok(provider) = provider_str.parse::<LLMProvider>() {
                config.llm.provider = provider;
            } else {
                eprintln!("⚠️ 警告: 未知的provider: {}，使用默认provider", provider_str);
            }
        }

        if let Some(base_url) = &self.llm_api_base_url {
            config.llm.api_base_url = base_url.clone();
        }

        if let Some(api_key) = &self.llm_api_key {
            config.llm.api_key = api_key.clone();
        }

        if let Some(model) = &self.model {
            config.llm.model = model.clone();
        }

        if self.verbose {
            config.verbose = true;
        }

        Ok(config)
    }
}
