use crate::config::{Config, LLMProvider};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

/// edu-agents - 由Rust与大模型驱动的试题生成引擎
#[derive(Parser, Debug)]
#[command(name = "edu-agents")]
#[command(
    about = "LLM-driven exam generation engine. It condenses a knowledge taxonomy, plans an exam blueprint, and generates one question per blueprint slot."
)]
#[command(version)]
pub struct Args {
    /// 知识体系文件路径
    #[arg(short, long)]
    pub knowledge: Option<PathBuf>,

    /// 输出路径
    #[arg(short, long)]
    pub output_path: Option<PathBuf>,

    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 课程名称
    #[arg(short, long)]
    pub name: Option<String>,

    /// 学生画像文件路径
    #[arg(long)]
    pub student_profile: Option<PathBuf>,

    /// 命题蓝图文件路径，指定后跳过蓝图规划
    #[arg(long)]
    pub plan: Option<PathBuf>,

    /// 期望的题目总数
    #[arg(long)]
    pub question_count: Option<u32>,

    /// 跳过题目生成，只输出摘要与命题任务
    #[arg(long)]
    pub skip_generation: bool,

    /// 是否启用详细日志
    #[arg(short, long)]
    pub verbose: bool,

    /// 高能效模型
    #[arg(long)]
    pub model_efficient: Option<String>,

    /// 高质量模型
    #[arg(long)]
    pub model_powerful: Option<String>,

    /// LLM API基地址
    #[arg(long)]
    pub llm_api_base_url: Option<String>,

    /// LLM API KEY
    #[arg(long)]
    pub llm_api_key: Option<String>,

    /// LLM Provider (openai, moonshot, deepseek, openrouter, anthropic, ollama)
    #[arg(long)]
    pub llm_provider: Option<String>,

    /// 温度参数
    #[arg(long)]
    pub temperature: Option<f64>,

    /// 题目生成的最大并发数
    #[arg(long)]
    pub max_parallels: Option<usize>,

    /// 是否禁用缓存
    #[arg(long)]
    pub no_cache: bool,
}

impl Args {
    /// 将CLI参数转换为配置
    pub fn into_config(self) -> Result<Config> {
        let mut config = if let Some(config_path) = &self.config {
            Config::from_file(config_path)
                .with_context(|| format!("无法读取配置文件 {:?}", config_path))?
        } else {
            let default_config_path = std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join("edu-agents.toml");

            if default_config_path.exists() {
                Config::from_file(&default_config_path)
                    .with_context(|| format!("无法读取默认配置文件 {:?}", default_config_path))?
            } else {
                Config::default()
            }
        };

        // 命令行参数优先级高于配置文件
        if let Some(knowledge) = self.knowledge {
            config.knowledge_path = knowledge;
        }
        if let Some(output_path) = self.output_path {
            config.output_path = output_path;
        }
        if let Some(name) = self.name {
            config.course_name = name;
        }
        if let Some(profile) = self.student_profile {
            config.student_profile_path = Some(profile);
        }
        if let Some(plan) = self.plan {
            config.plan_path = Some(plan);
        }
        if let Some(question_count) = self.question_count {
            config.target_question_count = question_count;
        }

        if let Some(provider_str) = self.llm_provider {
            match provider_str.parse::<LLMProvider>() {
                Ok(provider) => config.llm.provider = provider,
                Err(_) => tracing::warn!(
                    "⚠️ 未知的provider: {}，使用默认provider {}",
                    provider_str,
                    config.llm.provider
                ),
            }
        }
        if let Some(llm_api_base_url) = self.llm_api_base_url {
            config.llm.api_base_url = llm_api_base_url;
        }
        if let Some(llm_api_key) = self.llm_api_key {
            config.llm.api_key = llm_api_key;
        }
        if let Some(model_efficient) = self.model_efficient {
            config.llm.model_efficient = model_efficient;
        }
        if let Some(model_powerful) = self.model_powerful {
            config.llm.model_powerful = model_powerful;
        }
        if let Some(temperature) = self.temperature {
            config.llm.temperature = temperature;
        }
        if let Some(max_parallels) = self.max_parallels {
            config.llm.max_parallels = max_parallels.max(1);
        }

        if self.no_cache {
            config.cache.enabled = false;
        }
        if self.skip_generation {
            config.skip_generation = true;
        }
        if self.verbose {
            config.verbose = true;
        }

        Ok(config)
    }
}

// Include tests
#[cfg(test)]
mod tests;
