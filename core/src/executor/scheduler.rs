use std::future::Future;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use tokio::sync::Semaphore;

use crate::error::ExecutorError;
use crate::planner::ScheduledItem;

use super::types::ExecutionResult;

/// Execute schedule items concurrently, at most `max_workers` at a time.
///
/// # Arguments
///
/// * `items` - Schedule items, admitted in slice order
/// * `max_workers` - Maximum number of items in flight (values below 1 act as 1)
/// * `executor_fn` - Async function processing a single item
///
/// # Returns
///
/// One result per item, in completion order. Returns only after every
/// admitted item has finished.
pub async fn execute_parallel<'s, 'a, F, Fut>(
    items: &'s [ScheduledItem<'a>],
    max_workers: usize,
    executor_fn: F,
) -> Result<Vec<ExecutionResult>, ExecutorError>
where
    F: Fn(&'s ScheduledItem<'a>) -> Fut,
    Fut: Future<Output = ExecutionResult>,
{
    // tokio's semaphore is fair: waiters are served in the order they queued.
    let sem = Semaphore::new(max_workers.max(1));
    let mut futs: FuturesUnordered<_> = FuturesUnordered::new();

    for item in items {
        let sem = &sem;
        let executor = &executor_fn;

        futs.push(async move {
            let _permit = sem.acquire().await.map_err(|_| {
                ExecutorError::Coordination("semaphore closed unexpectedly".into())
            })?;

            Ok::<_, ExecutorError>(executor(item).await)
        });
    }

    let mut results = Vec::with_capacity(items.len());

    while let Some(res) = futs.next().await {
        results.push(res?);
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;
    use crate::task::Task;

    #[tokio::test]
    async fn never_exceeds_max_workers() {
        let tasks: Vec<Task> = (0..6)
            .map(|i| Task::new(format!("t{i}"), 10, 3, None).unwrap())
            .collect();
        let items: Vec<_> = tasks.iter().map(ScheduledItem::backlog).collect();

        let in_flight = AtomicUsize::new(0);
        let peak = AtomicUsize::new(0);

        let results = execute_parallel(&items, 2, |item| {
            let in_flight = &in_flight;
            let peak = &peak;
            async move {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(5)).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
                ExecutionResult::backlog(item.task.id.clone())
            }
        })
        .await
        .unwrap();

        assert_eq!(results.len(), 6);
        assert_eq!(peak.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn single_worker_keeps_schedule_order() {
        let tasks: Vec<Task> = ["a", "b", "c"]
            .iter()
            .map(|n| Task::new(*n, 10, 3, None).unwrap())
            .collect();
        let items: Vec<_> = tasks.iter().map(ScheduledItem::backlog).collect();

        let results = execute_parallel(&items, 1, |item| async move {
            tokio::task::yield_now().await;
            ExecutionResult::done(item.task.name.clone())
        })
        .await
        .unwrap();

        let order: Vec<_> = results.iter().map(|r| r.task_id.as_str()).collect();
        assert_eq!(order, ["a", "b", "c"]);
    }
}
