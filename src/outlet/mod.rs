//! 产物落盘
//!
//! 报告与问答记录都以JSON文件形式保存在输出目录，文件一经写出
//! 不再修改。

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::config::Config;
use crate::rag::ChatExchange;
use crate::report::Report;

/// 保存报告文件，返回完整路径
pub fn save_report(
    config: &Config,
    industry: &str,
    report_id: &str,
    report: &Report,
) -> Result<PathBuf> {
    let output_dir = &config.output_path;
    fs::create_dir_all(output_dir)
        .with_context(|| format!("创建输出目录失败: {:?}", output_dir))?;

    let filename = format!(
        "{}_{}.json",
        industry.to_lowercase().replace(' ', "_"),
        report_id
    );
    let path = output_dir.join(filename);

    let content = serde_json::to_string_pretty(report)?;
    fs::write(&path, content).with_context(|| format!("写入报告文件失败: {:?}", path))?;

    println!("💾 已保存报告: {}", path.display());
    Ok(path)
}

/// 保存问答记录文件，返回完整路径
pub fn save_chat(config: &Config, exchange: &ChatExchange) -> Result<PathBuf> {
    let output_dir = &config.output_path;
    fs::create_dir_all(output_dir)
        .with_context(|| format!("创建输出目录失败: {:?}", output_dir))?;

    let filename = format!(
        "chat_{}_{}.json",
        exchange.report_id,
        chrono::Local::now().format("%H%M%S")
    );
    let path = output_dir.join(filename);

    let content = serde_json::to_string_pretty(exchange)?;
    fs::write(&path, content).with_context(|| format!("写入问答记录失败: {:?}", path))?;

    println!("💾 已保存问答记录: {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{DraftReport, Report};
    use tempfile::TempDir;

    fn test_config(dir: &TempDir) -> Config {
        Config {
            output_path: dir.path().join("outputs"),
            internal_path: dir.path().join(".mintel"),
            ..Default::default()
        }
    }

    #[test]
    fn test_save_report_writes_schema_complete_json() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        let report = Report::assemble(DraftReport::default());

        let path = save_report(&config, "Fintech Lending", "20240601_120000", &report).unwrap();

        assert!(path.exists());
        assert_eq!(
            path.file_name().unwrap().to_string_lossy(),
            "fintech_lending_20240601_120000.json"
        );

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert!(value.get("90_day_plan").is_some());
        assert!(value.get("impact_radar").is_some());
    }

    #[test]
    fn test_save_chat_round_trips() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        let exchange = ChatExchange {
            report_id: "20240601_120000".to_string(),
            question: "What are the risks?".to_string(),
            answer: "Higher operational costs.".to_string(),
            chunks_used: vec!["chunk one".to_string()],
        };

        let path = save_chat(&config, &exchange).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let loaded: ChatExchange = serde_json::from_str(&content).unwrap();
        assert_eq!(loaded.report_id, exchange.report_id);
        assert_eq!(loaded.chunks_used, exchange.chunks_used);
    }
}
