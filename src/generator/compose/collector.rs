use crate::types::question::GeneratedQuestion;

/// 合并各任务的结果桶，保持分发顺序
pub fn collect<I>(buckets: I) -> Vec<GeneratedQuestion>
where
    I: IntoIterator<Item = Vec<GeneratedQuestion>>,
{
    buckets.into_iter().fold(Vec::new(), |mut all, bucket| {
        all.extend(bucket);
        all
    })
}
