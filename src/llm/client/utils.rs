use crate::config::LLMConfig;

/// 超过该长度的提示词直接使用高质量模型
pub const EFFICIENT_PROMPT_LIMIT: usize = 32 * 1024;

/// 按提示词长度选择模型，返回(首选模型, 兜底模型)
pub fn evaluate_befitting_model(
    llm_config: &LLMConfig,
    system_prompt: &str,
    user_prompt: &str,
) -> (String, Option<String>) {
    if system_prompt.len() + user_prompt.len() <= EFFICIENT_PROMPT_LIMIT
        && llm_config.model_efficient != llm_config.model_powerful
    {
        return (
            llm_config.model_efficient.clone(),
            Some(llm_config.model_powerful.clone()),
        );
    }
    (llm_config.model_powerful.clone(), None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_prompt_prefers_efficient_model() {
        let config = LLMConfig::default();
        let (model, fallover) = evaluate_befitting_model(&config, "sys", "user");
        assert_eq!(model, config.model_efficient);
        assert_eq!(fallover, Some(config.model_powerful.clone()));
    }

    #[test]
    fn test_long_prompt_uses_powerful_model() {
        let config = LLMConfig::default();
        let long = "x".repeat(EFFICIENT_PROMPT_LIMIT + 1);
        let (model, fallover) = evaluate_befitting_model(&config, "", &long);
        assert_eq!(model, config.model_powerful);
        assert!(fallover.is_none());
    }

    #[test]
    fn test_same_models_have_no_fallover() {
        let config = LLMConfig {
            model_efficient: "m".to_string(),
            model_powerful: "m".to_string(),
            ..Default::default()
        };
        let (model, fallover) = evaluate_befitting_model(&config, "sys", "user");
        assert_eq!(model, "m");
        assert!(fallover.is_none());
    }
}
