// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use async_trait::async_trait;
use tug_core::adapters::{QueueError, TaskQueue, TaskSignature};

/// Wrapper that adds tracing to any TaskQueue
#[derive(Clone)]
pub struct TracedQueue<Q> {
    inner: Q,
}

impl<Q> TracedQueue<Q> {
    pub fn new(inner: Q) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<Q: TaskQueue> TaskQueue for TracedQueue<Q> {
    async fn submit_group(&self, group: Vec<TaskSignature>) -> Result<(), QueueError> {
        // The entered guard must not live across the await, so each
        // synchronous section enters the span on its own.
        let span = tracing::info_span!("queue.submit", tasks = group.len());

        span.in_scope(|| {
            for signature in &group {
                tracing::debug!(
                    id = %signature.id,
                    handler = ?signature.handler,
                    kind = ?signature.event.kind(),
                    "queueing task"
                );
            }
        });

        let start = std::time::Instant::now();
        let result = self.inner.submit_group(group).await;
        let elapsed = start.elapsed();

        span.in_scope(|| match &result {
            Ok(()) => tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "group submitted"),
            Err(e) => tracing::error!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "submit failed"
            ),
        });

        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
