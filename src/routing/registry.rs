//! Named registry of host bridge endpoints.
//!
//! The host registers its live bridge under a well-known name when it comes
//! up and deregisters it on teardown. Surfaces that start independently of
//! the host (a notification tap after the host was killed, for instance)
//! resolve the bridge here instead of reaching for a hidden global. The
//! registry itself is passed around as an explicit dependency.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::BridgeFallback;
use crate::error::{RecBarError, RecBarResult};

use super::ControlEndpoint;

/// Name under which the host application registers its bridge
pub const MAIN_ENDPOINT: &str = "main";

#[derive(Default)]
pub struct EndpointRegistry {
    slots: Mutex<HashMap<String, Arc<dyn ControlEndpoint>>>,
}

impl EndpointRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace the endpoint under `name`.
    pub fn register(&self, name: &str, endpoint: Arc<dyn ControlEndpoint>) {
        let previous = self
            .slots
            .lock()
            .insert(name.to_string(), endpoint);
        if previous.is_some() {
            log::info!("[REGISTRY] Replaced endpoint '{}'", name);
        } else {
            log::info!("[REGISTRY] Registered endpoint '{}'", name);
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn ControlEndpoint>> {
        self.slots.lock().get(name).cloned()
    }

    /// Remove and return the endpoint under `name`.
    pub fn deregister(&self, name: &str) -> Option<Arc<dyn ControlEndpoint>> {
        let removed = self.slots.lock().remove(name);
        if removed.is_some() {
            log::info!("[REGISTRY] Deregistered endpoint '{}'", name);
        }
        removed
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slots.lock().contains_key(name)
    }

    /// Return the endpoint under `name`, constructing and registering it on
    /// first access.
    ///
    /// `factory` runs without the registry lock held. If another caller
    /// registers `name` meanwhile, theirs wins and the fresh endpoint is
    /// discarded.
    pub fn get_or_init<F>(&self, name: &str, factory: F) -> Arc<dyn ControlEndpoint>
    where
        F: FnOnce() -> Arc<dyn ControlEndpoint>,
    {
        if let Some(existing) = self.get(name) {
            return existing;
        }
        let endpoint = factory();

        let mut slots = self.slots.lock();
        if let Some(existing) = slots.get(name) {
            return Arc::clone(existing);
        }
        slots.insert(name.to_string(), Arc::clone(&endpoint));
        log::info!("[REGISTRY] Initialized endpoint '{}'", name);
        endpoint
    }

    /// Resolve the endpoint under `name` according to the fallback policy.
    ///
    /// A missing registration is an error under `Strict`. Under
    /// `BestEffort` a fresh endpoint is built by `factory`; it may not be
    /// the listener the host is actually watching.
    pub fn resolve<F>(
        &self,
        name: &str,
        policy: BridgeFallback,
        factory: F,
    ) -> RecBarResult<Arc<dyn ControlEndpoint>>
    where
        F: FnOnce() -> Arc<dyn ControlEndpoint>,
    {
        if let Some(existing) = self.get(name) {
            return Ok(existing);
        }
        match policy {
            BridgeFallback::Strict => {
                log::error!(
                    "[REGISTRY] No endpoint registered as '{}' and fallback is strict",
                    name
                );
                Err(RecBarError::EndpointUnavailable {
                    name: name.to_string(),
                })
            },
            BridgeFallback::BestEffort => {
                log::warn!(
                    "[REGISTRY] No endpoint registered as '{}'; constructing a fallback",
                    name
                );
                Ok(self.get_or_init(name, factory))
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{Action, FnEndpoint};

    fn named(name: &'static str) -> Arc<dyn ControlEndpoint> {
        Arc::new(FnEndpoint::new(name, |_: &Action| Ok(())))
    }

    #[test]
    fn test_register_get_deregister() {
        let registry = EndpointRegistry::new();
        assert!(registry.get(MAIN_ENDPOINT).is_none());

        registry.register(MAIN_ENDPOINT, named("host"));
        assert_eq!(registry.get(MAIN_ENDPOINT).unwrap().name(), "host");

        assert!(registry.deregister(MAIN_ENDPOINT).is_some());
        assert!(!registry.contains(MAIN_ENDPOINT));
        assert!(registry.deregister(MAIN_ENDPOINT).is_none());
    }

    #[test]
    fn test_get_or_init_constructs_once() {
        let registry = EndpointRegistry::new();
        let first = registry.get_or_init(MAIN_ENDPOINT, || named("lazy"));
        let second = registry.get_or_init(MAIN_ENDPOINT, || named("other"));

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.name(), "lazy");
    }

    #[test]
    fn test_get_or_init_factory_may_use_registry() {
        let registry = EndpointRegistry::new();
        registry.register("legacy", named("legacy"));

        let endpoint = registry.get_or_init(MAIN_ENDPOINT, || {
            registry.get("legacy").unwrap_or_else(|| named("fresh"))
        });
        assert_eq!(endpoint.name(), "legacy");
        assert!(registry.contains(MAIN_ENDPOINT));
    }

    #[test]
    fn test_resolve_prefers_registered() {
        let registry = EndpointRegistry::new();
        registry.register(MAIN_ENDPOINT, named("host"));

        let resolved = registry
            .resolve(MAIN_ENDPOINT, BridgeFallback::Strict, || named("fallback"))
            .unwrap();
        assert_eq!(resolved.name(), "host");
    }

    #[test]
    fn test_resolve_strict_fails_when_missing() {
        let registry = EndpointRegistry::new();
        let result = registry.resolve(MAIN_ENDPOINT, BridgeFallback::Strict, || named("fallback"));

        assert!(matches!(
            result,
            Err(RecBarError::EndpointUnavailable { ref name }) if name == MAIN_ENDPOINT
        ));
        assert!(!registry.contains(MAIN_ENDPOINT));
    }

    #[test]
    fn test_resolve_best_effort_constructs_and_registers() {
        let registry = EndpointRegistry::new();
        let resolved = registry
            .resolve(MAIN_ENDPOINT, BridgeFallback::BestEffort, || named("fallback"))
            .unwrap();

        assert_eq!(resolved.name(), "fallback");
        assert!(registry.contains(MAIN_ENDPOINT));
    }
}
