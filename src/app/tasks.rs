//! Fire-and-forget work whose outcome nobody waits on.

use std::future::Future;
use tokio::task::JoinHandle;

/// Run `work` in the background. Failures are logged at debug level and
/// dropped; they never reach the UI.
pub fn spawn_background<F>(name: &'static str, work: F) -> JoinHandle<()>
where
    F: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    tokio::spawn(async move {
        match work.await {
            Ok(()) => tracing::debug!(task = name, "background task finished"),
            Err(e) => tracing::debug!(task = name, error = %format!("{e:#}"), "background task failed"),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[tokio::test]
    async fn test_failure_is_swallowed() {
        let handle = spawn_background("doomed", async { anyhow::bail!("server unreachable") });
        assert!(handle.await.is_ok());
    }

    #[tokio::test]
    async fn test_work_runs() {
        let ran = Arc::new(AtomicBool::new(false));
        let flag = ran.clone();
        spawn_background("flag", async move {
            flag.store(true, Ordering::SeqCst);
            Ok(())
        })
        .await
        .unwrap();
        assert!(ran.load(Ordering::SeqCst));
    }
}
