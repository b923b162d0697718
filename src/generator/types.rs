use anyhow::Result;

use crate::generator::context::GeneratorContext;

/// 流水线中的一个阶段
#[allow(async_fn_in_trait)]
pub trait Generator<T> {
    async fn execute(&self, context: GeneratorContext) -> Result<T>;
}
