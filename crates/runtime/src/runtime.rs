// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Axon Contributors

//! The runtime facade generated code calls into
//!
//! For every `on pattern (evt) { body }` block, generated code calls
//! `register` at module load (global scope) or `register_owned` at object
//! construction; `emit` statements call `publish`; cognitive constructs
//! (think/generate/chat/learn/search/execute) call `submit`; teardown calls
//! `unregister`/`dispose_instance`. Terminal events published by the
//! scheduler take the same `publish` path as user `emit`s, so the two are
//! indistinguishable to subscribers.

use crate::config::RuntimeConfig;
use crate::error::SubmitError;
use crate::executor::OperationExecutor;
use crate::operation::OpKind;
use crate::scheduler::ExecutionScheduler;
use axon_core::{
    CorrelationId, DispatchReport, Dispatcher, Event, EventRegistry, Handler, HandlerError,
    InstanceHandle, InstanceRegistry, Payload, Scope, SubscriptionId, ValidationError,
};
use std::sync::Arc;
use std::time::Duration;

/// Owns the event registries, dispatcher, and execution scheduler.
///
/// Clones share state; must be created inside a tokio runtime.
pub struct Runtime {
    registry: EventRegistry,
    instances: InstanceRegistry,
    dispatcher: Dispatcher,
    scheduler: ExecutionScheduler,
}

impl Runtime {
    pub fn new(executor: Arc<dyn OperationExecutor>) -> Self {
        Self::with_config(executor, RuntimeConfig::default())
    }

    pub fn with_config(executor: Arc<dyn OperationExecutor>, config: RuntimeConfig) -> Self {
        let registry = EventRegistry::new();
        let instances = InstanceRegistry::new();
        let dispatcher = Dispatcher::new(registry.clone(), instances.clone());
        let scheduler = ExecutionScheduler::new(
            executor,
            dispatcher.clone(),
            config.workers,
            config.default_timeout,
        );
        Self {
            registry,
            instances,
            dispatcher,
            scheduler,
        }
    }

    /// Register a global handler; live until `unregister`
    pub fn register<F>(&self, pattern: &str, handler: F) -> Result<SubscriptionId, ValidationError>
    where
        F: Fn(&Event) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        self.registry
            .register(pattern, Scope::Global, Arc::new(handler) as Handler)
    }

    /// Register a handler owned by an instance; revoked on disposal.
    ///
    /// Ownership controls disposal lifecycle only: the handler matches
    /// events from every publisher, exactly like a global one.
    pub fn register_owned<F>(
        &self,
        handle: &InstanceHandle,
        pattern: &str,
        handler: F,
    ) -> Result<SubscriptionId, ValidationError>
    where
        F: Fn(&Event) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        let id = self.registry.register(
            pattern,
            Scope::InstanceOwned(handle.id()),
            Arc::new(handler) as Handler,
        )?;
        if !self.instances.bind_subscription(handle, id) {
            // Owner was disposed concurrently; don't leak the subscription
            self.registry.unregister(id);
        }
        Ok(id)
    }

    pub fn unregister(&self, id: SubscriptionId) -> bool {
        self.registry.unregister(id)
    }

    /// Publish an event by name; handlers run before this returns
    pub fn publish(
        &self,
        name: &str,
        payload: Payload,
    ) -> Result<DispatchReport, ValidationError> {
        self.dispatcher.publish(Event::new(name, payload))
    }

    /// Publish a pre-built event (correlation id, sender identity)
    pub fn publish_event(&self, event: Event) -> Result<DispatchReport, ValidationError> {
        self.dispatcher.publish(event)
    }

    /// Submit a cognitive operation; the result arrives later as a
    /// `<kind>.complete` or `<kind>.error` event with this correlation id
    pub fn submit(
        &self,
        kind: OpKind,
        origin: Option<&InstanceHandle>,
        payload: Payload,
        timeout: Option<Duration>,
    ) -> Result<CorrelationId, SubmitError> {
        self.scheduler
            .submit(kind, origin.map(InstanceHandle::id), payload, timeout)
    }

    pub fn create_instance(&self) -> InstanceHandle {
        self.instances.create_instance()
    }

    /// Dispose an instance, revoking all its subscriptions atomically.
    ///
    /// Returns the number of subscriptions revoked.
    pub fn dispose_instance(&self, handle: &InstanceHandle) -> usize {
        let revoked = self.instances.dispose(handle);
        let count = revoked.len();
        for id in revoked {
            self.registry.unregister(id);
        }
        count
    }

    pub fn scheduler(&self) -> &ExecutionScheduler {
        &self.scheduler
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}

impl Clone for Runtime {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            instances: self.instances.clone(),
            dispatcher: self.dispatcher.clone(),
            scheduler: self.scheduler.clone(),
        }
    }
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
