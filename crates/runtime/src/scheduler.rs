// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Axon Contributors

//! Fire-and-forget scheduling of cognitive operations
//!
//! Submissions return immediately with a correlation id. Work runs on a
//! bounded worker pool; over-capacity submissions queue FIFO and never
//! block the submitter. Every submission produces exactly one terminal
//! event, `<kind>.complete` or `<kind>.error`, re-published through the
//! dispatcher with the submission's correlation id.

use crate::error::{OperationError, SubmitError};
use crate::executor::OperationExecutor;
use crate::operation::{OpKind, OpState, PendingOperation};
use axon_core::{CorrelationId, Dispatcher, Event, InstanceId, Payload};
use dashmap::DashMap;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, Semaphore};

struct Job {
    correlation_id: CorrelationId,
    kind: OpKind,
    origin: Option<InstanceId>,
    payload: Payload,
    timeout: Option<Duration>,
}

struct Inner {
    executor: Arc<dyn OperationExecutor>,
    dispatcher: Dispatcher,
    pending: DashMap<CorrelationId, PendingOperation>,
    in_flight: AtomicUsize,
    intake: Mutex<Option<mpsc::UnboundedSender<Job>>>,
    default_timeout: Option<Duration>,
}

/// Runs submitted operations off the caller's path.
///
/// Must be created inside a tokio runtime; the pump task and workers are
/// spawned on it. Clones share the same pool and pending table.
pub struct ExecutionScheduler {
    inner: Arc<Inner>,
}

impl ExecutionScheduler {
    pub fn new(
        executor: Arc<dyn OperationExecutor>,
        dispatcher: Dispatcher,
        workers: usize,
        default_timeout: Option<Duration>,
    ) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<Job>();
        let inner = Arc::new(Inner {
            executor,
            dispatcher,
            pending: DashMap::new(),
            in_flight: AtomicUsize::new(0),
            intake: Mutex::new(Some(tx)),
            default_timeout,
        });

        // Pump: admit queued jobs to the pool as slots free up. Exits when
        // the intake sender is dropped by close() and the queue drains, so
        // jobs accepted before close still run.
        let pool = Arc::new(Semaphore::new(workers.max(1)));
        let pump = Arc::clone(&inner);
        tokio::spawn(async move {
            while let Some(job) = rx.recv().await {
                let permit = match Arc::clone(&pool).acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => break,
                };
                let worker = Arc::clone(&pump);
                tokio::spawn(async move {
                    worker.run(job).await;
                    drop(permit);
                });
            }
        });

        Self { inner }
    }

    /// Submit an operation. Returns without blocking on backend work.
    ///
    /// The configured default timeout applies when `timeout` is None.
    pub fn submit(
        &self,
        kind: OpKind,
        origin: Option<InstanceId>,
        payload: Payload,
        timeout: Option<Duration>,
    ) -> Result<CorrelationId, SubmitError> {
        let intake = self.inner.intake.lock().unwrap_or_else(|e| e.into_inner());
        let Some(tx) = intake.as_ref() else {
            return Err(SubmitError::Closed);
        };

        let correlation_id = CorrelationId::new();
        let timeout = timeout.or(self.inner.default_timeout);
        self.inner.pending.insert(
            correlation_id.clone(),
            PendingOperation::new(correlation_id.clone(), kind, origin, timeout),
        );

        tracing::debug!(correlation_id = %correlation_id, kind = %kind, "operation submitted");

        let job = Job {
            correlation_id: correlation_id.clone(),
            kind,
            origin,
            payload,
            timeout,
        };
        if tx.send(job).is_err() {
            self.inner.pending.remove(&correlation_id);
            return Err(SubmitError::Closed);
        }
        Ok(correlation_id)
    }

    /// Stop accepting submissions. Queued and in-flight operations still
    /// run to their terminal events.
    pub fn close(&self) {
        let mut intake = self.inner.intake.lock().unwrap_or_else(|e| e.into_inner());
        *intake = None;
    }

    /// Operations submitted but not yet terminal
    pub fn pending_count(&self) -> usize {
        self.inner.pending.len()
    }

    /// Operations currently executing on the pool
    pub fn in_flight_count(&self) -> usize {
        self.inner.in_flight.load(Ordering::SeqCst)
    }

    /// State of a submitted operation, None once terminal
    pub fn operation_state(&self, id: &CorrelationId) -> Option<OpState> {
        self.inner.pending.get(id).map(|op| op.state)
    }
}

impl Clone for ExecutionScheduler {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Inner {
    /// Execute one operation and publish its terminal event.
    ///
    /// Every path through this function publishes exactly once: backend
    /// errors, panics, and timeouts all collapse into the `.error` event.
    async fn run(&self, job: Job) {
        self.set_state(&job.correlation_id, OpState::Running);
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        let started = Instant::now();

        let work = AssertUnwindSafe(self.executor.execute(job.kind, job.payload.clone()))
            .catch_unwind();
        let outcome = match job.timeout {
            // Timeout drops the backend future: best-effort cancellation
            Some(limit) => match tokio::time::timeout(limit, work).await {
                Ok(Ok(result)) => result,
                Ok(Err(_panic)) => Err(OperationError::Panicked),
                Err(_) => Err(OperationError::Timeout {
                    elapsed: started.elapsed(),
                }),
            },
            None => match work.await {
                Ok(result) => result,
                Err(_panic) => Err(OperationError::Panicked),
            },
        };
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let (state, event) = match outcome {
            Ok(result) => {
                let mut payload = job.payload;
                payload.merge(result);
                (OpState::Completed, Event::new(job.kind.complete_event(), payload))
            }
            Err(err) => {
                tracing::error!(
                    correlation_id = %job.correlation_id,
                    kind = %job.kind,
                    error = %err,
                    "operation failed"
                );
                let mut payload = job.payload;
                payload.set("error", err.to_string());
                payload.set("error_kind", err.error_kind());
                (OpState::Failed, Event::new(job.kind.error_event(), payload))
            }
        };

        self.set_state(&job.correlation_id, state);

        let mut event = event.with_correlation(job.correlation_id.clone());
        if let Some(origin) = job.origin {
            event = event.with_sender(origin);
        }

        // Published even if the origin instance is long gone; whoever still
        // matches the terminal event observes it. Kind-derived names are
        // never empty, so publish cannot reject here.
        if let Err(err) = self.dispatcher.publish(event) {
            tracing::error!(correlation_id = %job.correlation_id, error = %err, "terminal event rejected");
        }
        self.pending.remove(&job.correlation_id);
    }

    fn set_state(&self, id: &CorrelationId, state: OpState) {
        if let Some(mut op) = self.pending.get_mut(id) {
            op.state = state;
        }
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
