use crate::cli::Args;
use crate::config::LLMProvider;
use clap::Parser;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_args_default_values() {
    let args = Args::try_parse_from(["edu-agents"]).unwrap();

    assert!(args.knowledge.is_none());
    assert!(args.output_path.is_none());
    assert!(args.plan.is_none());
    assert!(!args.skip_generation);
    assert!(!args.verbose);
    assert!(!args.no_cache);
}

#[test]
fn test_args_short_options() {
    let args = Args::try_parse_from([
        "edu-agents",
        "-k",
        "/data/knowledge.json",
        "-o",
        "/data/out",
        "-n",
        "高中生物",
        "-v",
    ])
    .unwrap();

    assert_eq!(args.knowledge, Some(PathBuf::from("/data/knowledge.json")));
    assert_eq!(args.output_path, Some(PathBuf::from("/data/out")));
    assert_eq!(args.name, Some("高中生物".to_string()));
    assert!(args.verbose);
}

#[test]
fn test_args_llm_options() {
    let args = Args::try_parse_from([
        "edu-agents",
        "--llm-provider",
        "anthropic",
        "--llm-api-key",
        "test-key",
        "--model-efficient",
        "fast-model",
        "--max-parallels",
        "0",
        "--no-cache",
    ])
    .unwrap();

    let config = args.into_config().unwrap();
    assert_eq!(config.llm.provider, LLMProvider::Anthropic);
    assert_eq!(config.llm.api_key, "test-key");
    assert_eq!(config.llm.model_efficient, "fast-model");
    assert_eq!(config.llm.max_parallels, 1);
    assert!(!config.cache.enabled);
}

#[test]
fn test_unknown_provider_keeps_default() {
    let args =
        Args::try_parse_from(["edu-agents", "--llm-provider", "unknown"]).unwrap();
    let config = args.into_config().unwrap();
    assert_eq!(config.llm.provider, LLMProvider::OpenAI);
}

#[test]
fn test_into_config_overrides_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("custom.toml");
    std::fs::write(
        &config_path,
        "course_name = \"配置课程\"\ntarget_question_count = 4\n",
    )
    .unwrap();

    let args = Args::try_parse_from([
        "edu-agents",
        "-c",
        config_path.to_str().unwrap(),
        "--question-count",
        "8",
        "--plan",
        "plan.json",
        "--skip-generation",
    ])
    .unwrap();

    let config = args.into_config().unwrap();
    assert_eq!(config.course_name, "配置课程");
    assert_eq!(config.target_question_count, 8);
    assert_eq!(config.plan_path, Some(PathBuf::from("plan.json")));
    assert!(config.skip_generation);
}

#[test]
fn test_into_config_missing_file_is_error() {
    let args =
        Args::try_parse_from(["edu-agents", "-c", "/nonexistent/edu-agents.toml"]).unwrap();
    assert!(args.into_config().is_err());
}
