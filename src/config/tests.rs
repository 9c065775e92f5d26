#[cfg(test)]
mod tests {
    use crate::config::{
        Config, EmbeddingConfig, EmbeddingProvider, IndexConfig, LLMConfig, LLMProvider,
    };
    use std::path::PathBuf;
    use std::str::FromStr;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.output_path, PathBuf::from("./mintel.outputs"));
        assert_eq!(config.internal_path, PathBuf::from("./.mintel"));
        assert_eq!(config.index_dir(), PathBuf::from("./.mintel/index"));
        assert!(!config.verbose);
    }

    #[test]
    fn test_llm_config_default() {
        let config = LLMConfig::default();

        assert_eq!(config.provider, LLMProvider::Ollama);
        assert_eq!(config.api_base_url, "http://localhost:11434");
        assert_eq!(config.model, "llama3");
        assert_eq!(config.max_tokens, 8192);
        assert_eq!(config.temperature, 0.1);
        assert_eq!(config.retry_attempts, 3);
    }

    #[test]
    fn test_embedding_config_default() {
        let config = EmbeddingConfig::default();

        assert_eq!(config.provider, EmbeddingProvider::Ollama);
        assert_eq!(config.model, "nomic-embed-text");
        assert!(config.api_key.is_empty());
    }

    #[test]
    fn test_index_config_default() {
        let config = IndexConfig::default();

        assert_eq!(config.chunk_size, 800);
        assert_eq!(config.chunk_overlap, 100);
        assert_eq!(config.top_k, 4);
        assert!(config.chunk_overlap < config.chunk_size);
    }

    #[test]
    fn test_provider_from_str() {
        assert_eq!(
            LLMProvider::from_str("openai").unwrap(),
            LLMProvider::OpenAI
        );
        assert_eq!(
            LLMProvider::from_str("DeepSeek").unwrap(),
            LLMProvider::DeepSeek
        );
        assert_eq!(
            LLMProvider::from_str("anthropic").unwrap(),
            LLMProvider::Anthropic
        );
        assert_eq!(
            LLMProvider::from_str("ollama").unwrap(),
            LLMProvider::Ollama
        );
        assert!(LLMProvider::from_str("unknown").is_err());
    }

    #[test]
    fn test_provider_display_roundtrip() {
        for provider in [
            LLMProvider::OpenAI,
            LLMProvider::DeepSeek,
            LLMProvider::Anthropic,
            LLMProvider::Ollama,
        ] {
            let parsed = LLMProvider::from_str(&provider.to_string()).unwrap();
            assert_eq!(parsed, provider);
        }
    }

    #[test]
    fn test_config_from_toml() {
        let toml_content = r#"
output_path = "/tmp/reports"
internal_path = "/tmp/.mintel"
verbose = true

[llm]
provider = "openai"
api_key = "sk-test"
api_base_url = "https://api.example.com/v1"
model = "gpt-4o-mini"
max_tokens = 4096
temperature = 0.2
retry_attempts = 5
retry_delay_ms = 1000
timeout_seconds = 120

[embedding]
provider = "openai"
model = "text-embedding-3-small"
api_base_url = "https://api.example.com/v1"
api_key = "sk-test"
timeout_seconds = 30

[index]
chunk_size = 400
chunk_overlap = 50
top_k = 6

[fetcher]
timeout_seconds = 10
max_content_chars = 10000
max_parallels = 2
user_agent = "test-agent"
"#;

        let config: Config = toml::from_str(toml_content).unwrap();

        assert_eq!(config.output_path, PathBuf::from("/tmp/reports"));
        assert!(config.verbose);
        assert_eq!(config.llm.provider, LLMProvider::OpenAI);
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(
            config.embedding.provider,
            EmbeddingProvider::OpenAICompatible
        );
        assert_eq!(config.index.chunk_size, 400);
        assert_eq!(config.index.top_k, 6);
        assert_eq!(config.fetcher.max_parallels, 2);
    }

    #[test]
    fn test_config_from_missing_file() {
        let path = PathBuf::from("/nonexistent/mintel.toml");
        assert!(Config::from_file(&path).is_err());
    }
}
