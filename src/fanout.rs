//! Bounded scatter/gather used at every fan-out level.
//!
//! Each call owns its own `JoinSet` and semaphore. The first failing task
//! aborts its siblings, and dropping the set (when the caller itself is
//! aborted) tears down everything it spawned.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::error::ScrapeError;

/// Run `task` once per item with at most `limit` tasks doing work at a time.
///
/// On success the result holds exactly one value per item, in completion
/// order. The first error (or panic) is returned and all unfinished tasks
/// are aborted.
pub async fn gather<T, R, F, Fut>(items: Vec<T>, limit: usize, task: F) -> Result<Vec<R>, ScrapeError>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> Fut,
    Fut: Future<Output = Result<R, ScrapeError>> + Send + 'static,
{
    let expected = items.len();
    let permits = Arc::new(Semaphore::new(limit.max(1)));
    let mut set = JoinSet::new();

    for item in items {
        let permits = Arc::clone(&permits);
        let work = task(item);
        set.spawn(async move {
            let _permit = permits
                .acquire_owned()
                .await
                .map_err(|e| ScrapeError::Task(format!("concurrency limiter closed: {e}")))?;
            work.await
        });
    }

    let mut results = Vec::with_capacity(expected);
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok(Ok(value)) => results.push(value),
            Ok(Err(e)) => {
                set.abort_all();
                return Err(e);
            }
            Err(e) => {
                set.abort_all();
                return Err(e.into());
            }
        }
    }

    debug_assert_eq!(results.len(), expected);
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn returns_one_result_per_item() {
        let items: Vec<u32> = (0..50).collect();
        let mut results = gather(items, 4, |n| async move { Ok(n * 2) }).await.unwrap();
        assert_eq!(results.len(), 50);
        results.sort_unstable();
        assert_eq!(results, (0..50).map(|n| n * 2).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn empty_input_yields_empty_output() {
        let results: Vec<u32> = gather(Vec::<u32>::new(), 4, |n| async move { Ok(n) })
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn never_exceeds_limit() {
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let results = gather((0..20).collect::<Vec<u32>>(), 3, |n| {
            let running = Arc::clone(&running);
            let peak = Arc::clone(&peak);
            async move {
                let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(5)).await;
                running.fetch_sub(1, Ordering::SeqCst);
                Ok(n)
            }
        })
        .await
        .unwrap();

        assert_eq!(results.len(), 20);
        assert!(peak.load(Ordering::SeqCst) <= 3);
    }

    #[tokio::test]
    async fn first_error_aborts_siblings() {
        let finished = Arc::new(AtomicUsize::new(0));

        let result = gather((0..10).collect::<Vec<u32>>(), 10, |n| {
            let finished = Arc::clone(&finished);
            async move {
                if n == 0 {
                    return Err(ScrapeError::Parse("bad markup".into()));
                }
                tokio::time::sleep(Duration::from_secs(30)).await;
                finished.fetch_add(1, Ordering::SeqCst);
                Ok(n)
            }
        })
        .await;

        assert!(matches!(result, Err(ScrapeError::Parse(_))));
        assert_eq!(finished.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn panicking_worker_surfaces_as_error() {
        let result = gather(vec![1u32, 2, 3], 2, |n| async move {
            if n == 2 {
                panic!("worker blew up");
            }
            Ok(n)
        })
        .await;

        match result {
            Err(ScrapeError::Task(msg)) => assert!(msg.contains("panicked")),
            other => panic!("expected task error, got {other:?}"),
        }
    }
}
