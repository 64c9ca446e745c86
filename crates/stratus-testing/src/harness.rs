//! Harness entry point

use crate::mock::MockBackend;
use anyhow::{Context as _, Result};
use std::future::Future;
use std::sync::Arc;
use stratus_core::{Context, RunSettings};

/// Run a declaration function against a context backed by the given mock.
///
/// Declaration-time rejections propagate immediately as errors naming the
/// stack; on success the caller receives whatever the declaration returned
/// (typically the resource handles to inspect).
pub async fn run_with_mock<F, Fut, T>(
    settings: RunSettings,
    mock: Arc<MockBackend>,
    declare: F,
) -> Result<T>
where
    F: FnOnce(Context) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let stack = settings.stack.clone();
    let ctx = Context::new(settings, mock);
    declare(ctx)
        .await
        .with_context(|| format!("declaring stack '{stack}'"))
}
