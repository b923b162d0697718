use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::generator::context::GeneratorContext;

/// 单次模型调用参数
pub struct AgentExecuteParams {
    pub prompt_sys: String,
    pub prompt_user: String,
    /// 缓存分类目录
    pub cache_scope: String,
    /// 日志标签
    pub log_tag: String,
}

impl AgentExecuteParams {
    /// 缓存键对应的完整提示词
    fn cache_key(&self) -> String {
        format!("{}\n\n{}", self.prompt_sys, self.prompt_user)
    }
}

/// 结构化提取，优先命中缓存，未命中时调用模型并写回缓存
pub async fn extract<T>(context: &GeneratorContext, params: AgentExecuteParams) -> Result<T>
where
    T: JsonSchema + for<'a> Deserialize<'a> + Serialize + Send + Sync + 'static,
{
    let cache_key = params.cache_key();

    {
        let cache = context.cache_manager.read().await;
        if let Some(cached) = cache.get::<T>(&params.cache_scope, &cache_key).await? {
            tracing::info!("   ♻️ 命中缓存 [{}]", params.log_tag);
            return Ok(cached);
        }
    }

    tracing::debug!("   🤖 调用模型 [{}]", params.log_tag);
    let result: T = context
        .llm_client
        .extract(&params.prompt_sys, &params.prompt_user)
        .await?;

    let cache = context.cache_manager.read().await;
    if let Err(e) = cache.set(&params.cache_scope, &cache_key, &result).await {
        tracing::warn!("⚠️ 缓存写入失败 [{}]: {}", params.log_tag, e);
    }

    Ok(result)
}
