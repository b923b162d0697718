use crate::config::Config;
use crate::generator::context::GeneratorContext;
use crate::generator::{compose, outlet, planning, preprocess};

use anyhow::Result;
use std::time::{Duration, Instant};

/// 各阶段耗时记录，按阶段执行顺序保存
#[derive(Debug)]
pub struct TimingScope {
    start_time: Instant,
    phase_durations: Vec<(&'static str, Duration)>,
}

impl Default for TimingScope {
    fn default() -> Self {
        Self::new()
    }
}

impl TimingScope {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            phase_durations: Vec::new(),
        }
    }

    /// 记录一个已完成阶段的耗时
    pub fn record(&mut self, phase_name: &'static str, started: Instant) {
        self.phase_durations.push((phase_name, started.elapsed()));
    }

    pub fn phase_durations(&self) -> &[(&'static str, Duration)] {
        &self.phase_durations
    }

    pub fn timing_report(&self) -> String {
        let mut report = format!(
            "总执行时间: {:.2}秒",
            self.start_time.elapsed().as_secs_f64()
        );
        for (phase, duration) in &self.phase_durations {
            report.push_str(&format!("\n- {}: {:.3}秒", phase, duration.as_secs_f64()));
        }
        report
    }
}

/// 阶段名称
pub struct TimingKeys;

impl TimingKeys {
    pub const PREPROCESS: &'static str = "preprocess";
    pub const PLANNING: &'static str = "planning";
    pub const ROUTING: &'static str = "routing";
    pub const GENERATION: &'static str = "generation";
    pub const OUTPUT: &'static str = "output";
}

/// 启动命题工作流：预处理 => 蓝图规划 => 任务拆分 => 题目生成 => 输出
pub async fn launch(config: &Config) -> Result<TimingScope> {
    let context = GeneratorContext::new(config.clone())?;
    let mut timing = TimingScope::new();

    tracing::info!("🚀 开始为课程《{}》命题", config.get_course_name());

    let started = Instant::now();
    let preprocessed = preprocess::execute(&context).await?;
    timing.record(TimingKeys::PREPROCESS, started);

    let started = Instant::now();
    let blueprint = planning::execute(&context, &preprocessed).await?;
    timing.record(TimingKeys::PLANNING, started);

    let started = Instant::now();
    let tasks = compose::plan_tasks(&context, &preprocessed, &blueprint).await?;
    timing.record(TimingKeys::ROUTING, started);

    if config.skip_generation {
        tracing::info!("⏭️ 已跳过题目生成");
    } else {
        let started = Instant::now();
        compose::execute(&context, &tasks).await?;
        timing.record(TimingKeys::GENERATION, started);
    }

    let started = Instant::now();
    outlet::save(&context).await?;
    timing.record(TimingKeys::OUTPUT, started);

    if config.verbose {
        let memory = context.memory.read().await;
        for (scope, size) in memory.get_usage_stats() {
            tracing::debug!("🧠 记忆[{}] {} 字节: {:?}", scope, size, memory.list_keys(&scope));
        }
        let cache = context.cache_manager.read().await;
        tracing::debug!(
            "♻️ 缓存命中 {} 次，未命中 {} 次，写入 {} 次",
            cache.stats().hits(),
            cache.stats().misses(),
            cache.stats().writes()
        );
    }
    tracing::info!("⏱️ {}", timing.timing_report());

    Ok(timing)
}
