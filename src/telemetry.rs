//! 日志初始化（tracing/tracing-subscriber）
//!
//! - `EDU_AGENTS_LOG` 控制过滤规则，例如 "debug" 或 "info,edu_agents=debug"
//! - 未设置时默认 info，`--verbose` 时默认 debug

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "EDU_AGENTS_LOG";

pub fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "info,edu_agents=debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive));

    // 重复初始化（如测试中）时忽略错误
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .try_init();
}
