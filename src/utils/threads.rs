use anyhow::Result;
use futures::stream::{self, StreamExt, TryStreamExt};
use std::future::Future;

/// 以有限并发执行一组可失败任务，任一任务失败即停止调度其余任务并返回该错误
pub async fn try_parallel_with_limit<F, T>(futures: Vec<F>, max_concurrent: usize) -> Result<Vec<T>>
where
    F: Future<Output = Result<T>>,
{
    stream::iter(futures)
        .buffered(max_concurrent.max(1))
        .try_collect()
        .await
}
