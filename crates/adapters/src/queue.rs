// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process task queue backed by an unbounded channel
//!
//! The dispatcher submits groups through [`MemoryQueue`]; worker code
//! drains them from the paired [`GroupReceiver`]. Suitable for
//! single-process deployments and tests; a broker-backed queue slots in
//! behind the same trait.

use async_trait::async_trait;
use tokio::sync::mpsc;
use tug_core::adapters::{QueueError, TaskQueue, TaskSignature};

/// Create a connected queue/receiver pair
pub fn group_channel() -> (MemoryQueue, GroupReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (MemoryQueue { tx }, GroupReceiver { rx })
}

/// Sending half; cheap to clone, shared by every dispatcher
#[derive(Clone)]
pub struct MemoryQueue {
    tx: mpsc::UnboundedSender<Vec<TaskSignature>>,
}

#[async_trait]
impl TaskQueue for MemoryQueue {
    async fn submit_group(&self, group: Vec<TaskSignature>) -> Result<(), QueueError> {
        // An unbounded send only fails when the receiver is gone.
        self.tx.send(group).map_err(|_| QueueError::Closed)
    }
}

/// Receiving half; owned by the worker loop
pub struct GroupReceiver {
    rx: mpsc::UnboundedReceiver<Vec<TaskSignature>>,
}

impl GroupReceiver {
    /// Next submitted group, or `None` once every sender is dropped
    pub async fn recv(&mut self) -> Option<Vec<TaskSignature>> {
        self.rx.recv().await
    }

    /// Non-blocking variant for drain loops and tests
    pub fn try_recv(&mut self) -> Option<Vec<TaskSignature>> {
        self.rx.try_recv().ok()
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
