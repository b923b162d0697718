use crate::config::{CacheConfig, Config, LLMConfig, LLMProvider};
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_config_default() {
    let config = Config::default();

    assert!(config.course_name.is_empty());
    assert_eq!(config.knowledge_path, PathBuf::from("./knowledge.json"));
    assert_eq!(config.output_path, PathBuf::from("./edu-agents.out"));
    assert!(config.student_profile_path.is_none());
    assert!(config.plan_path.is_none());
    assert_eq!(config.target_question_count, 10);
    assert!(!config.skip_generation);
    assert!(!config.verbose);
}

#[test]
fn test_llm_config_default() {
    let llm = LLMConfig::default();

    assert_eq!(llm.provider, LLMProvider::OpenAI);
    assert!(!llm.api_base_url.is_empty());
    assert!(!llm.model_efficient.is_empty());
    assert!(!llm.model_powerful.is_empty());
    assert_eq!(llm.retry_attempts, 3);
    assert_eq!(llm.timeout_seconds, 180);
    assert_eq!(llm.max_parallels, 3);
}

#[test]
fn test_cache_config_default() {
    let cache = CacheConfig::default();

    assert!(cache.enabled);
    assert_eq!(cache.cache_dir, PathBuf::from(".edu-agents/cache"));
    assert_eq!(cache.expire_hours, 720);
}

#[test]
fn test_llm_provider_from_str() {
    assert_eq!("openai".parse::<LLMProvider>().unwrap(), LLMProvider::OpenAI);
    assert_eq!("Moonshot".parse::<LLMProvider>().unwrap(), LLMProvider::Moonshot);
    assert_eq!("deepseek".parse::<LLMProvider>().unwrap(), LLMProvider::DeepSeek);
    assert_eq!("openrouter".parse::<LLMProvider>().unwrap(), LLMProvider::OpenRouter);
    assert_eq!("anthropic".parse::<LLMProvider>().unwrap(), LLMProvider::Anthropic);
    assert_eq!("ollama".parse::<LLMProvider>().unwrap(), LLMProvider::Ollama);

    assert!("gemini".parse::<LLMProvider>().is_err());
}

#[test]
fn test_llm_provider_display_round_trip() {
    for provider in [
        LLMProvider::OpenAI,
        LLMProvider::Moonshot,
        LLMProvider::DeepSeek,
        LLMProvider::OpenRouter,
        LLMProvider::Anthropic,
        LLMProvider::Ollama,
    ] {
        assert_eq!(provider.to_string().parse::<LLMProvider>().unwrap(), provider);
    }
}

#[test]
fn test_config_from_partial_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("edu-agents.toml");
    std::fs::write(
        &config_path,
        r#"
course_name = "高中物理"
knowledge_path = "physics.json"
target_question_count = 6

[llm]
provider = "deepseek"
max_parallels = 5
"#,
    )
    .unwrap();

    let config = Config::from_file(&config_path).unwrap();
    assert_eq!(config.course_name, "高中物理");
    assert_eq!(config.knowledge_path, PathBuf::from("physics.json"));
    assert_eq!(config.target_question_count, 6);
    assert_eq!(config.llm.provider, LLMProvider::DeepSeek);
    assert_eq!(config.llm.max_parallels, 5);
    // 未指定的字段使用默认值
    assert_eq!(config.llm.retry_attempts, 3);
    assert!(config.cache.enabled);
}

#[test]
fn test_config_from_missing_file() {
    let result = Config::from_file(&PathBuf::from("/nonexistent/edu-agents.toml"));
    assert!(result.is_err());
}

#[test]
fn test_config_from_invalid_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("broken.toml");
    std::fs::write(&config_path, "course_name = [").unwrap();

    assert!(Config::from_file(&config_path).is_err());
}

#[test]
fn test_course_name_inference() {
    let mut config = Config {
        knowledge_path: PathBuf::from("/data/初中化学.json"),
        ..Default::default()
    };
    assert_eq!(config.get_course_name(), "初中化学");

    config.course_name = "  化学  ".to_string();
    assert_eq!(config.get_course_name(), "化学");
}
