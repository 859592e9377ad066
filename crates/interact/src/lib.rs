//! Interaction dispatch over sorted ray hits.
//!
//! Struck entities expose an explicit capability (a UI control or a
//! generic pointer-click handler); the dispatcher walks hits nearest
//! first and activates the first capable target, UI controls taking
//! precedence over pointer handlers.

pub mod dispatch;
pub mod touch;

use std::collections::HashMap;

use handcast_scene::EntityId;

pub use dispatch::{ClickDispatcher, ClickOutcome, PointerButton, PointerEvent};
pub use touch::{TouchProbe, TouchResult};

/// Identifies an application-level control callback.
pub type ControlId = u32;

/// What an entity can do when struck by the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// A UI control invoked through its click callback.
    UiControl {
        /// Callback activated on click.
        control: ControlId,
    },
    /// A generic handler fed a synthesized pointer event.
    PointerHandler {
        /// Callback activated on click.
        handler: ControlId,
    },
}

/// Registry mapping entities to their interactive capability.
///
/// At most one capability per entity; registering again replaces the
/// previous one.
#[derive(Debug, Default)]
pub struct InteractionMap {
    capabilities: HashMap<EntityId, Capability>,
}

impl InteractionMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `capability` for `entity`.
    pub fn register(&mut self, entity: EntityId, capability: Capability) {
        self.capabilities.insert(entity, capability);
    }

    /// Remove the capability registered for `entity`, if any.
    pub fn unregister(&mut self, entity: EntityId) {
        self.capabilities.remove(&entity);
    }

    /// Capability registered for `entity`, if any.
    pub fn capability(&self, entity: EntityId) -> Option<Capability> {
        self.capabilities.get(&entity).copied()
    }
}

/// Application-level click callbacks keyed by control id.
///
/// Registering a control again replaces its callback, the way the board
/// rewires its cell listeners on every reset.
#[derive(Default)]
pub struct ControlRegistry {
    handlers: HashMap<ControlId, Box<dyn FnMut(Option<&PointerEvent>)>>,
}

impl ControlRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the callback for `control`.
    pub fn register(&mut self, control: ControlId, handler: Box<dyn FnMut(Option<&PointerEvent>)>) {
        self.handlers.insert(control, handler);
    }

    /// Invoke the callback behind a dispatch outcome.
    ///
    /// Returns false when no callback is registered for the control.
    pub fn invoke(&mut self, outcome: &ClickOutcome) -> bool {
        match self.handlers.get_mut(&outcome.control) {
            Some(handler) => {
                handler(outcome.event.as_ref());
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for ControlRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlRegistry")
            .field("controls", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registering_twice_replaces_capability() {
        let mut map = InteractionMap::new();
        let entity = EntityId(1);

        map.register(entity, Capability::UiControl { control: 1 });
        map.register(entity, Capability::PointerHandler { handler: 2 });

        assert_eq!(
            map.capability(entity),
            Some(Capability::PointerHandler { handler: 2 })
        );
    }

    #[test]
    fn control_registry_invokes_registered_handler() {
        use std::cell::Cell;
        use std::rc::Rc;

        let mut registry = ControlRegistry::new();
        let clicked = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&clicked);
        registry.register(7, Box::new(move |_| counter.set(counter.get() + 1)));

        let outcome = ClickOutcome {
            entity: EntityId(0),
            control: 7,
            event: None,
        };
        assert!(registry.invoke(&outcome));
        assert!(registry.invoke(&outcome));
        assert_eq!(clicked.get(), 2);

        let unknown = ClickOutcome {
            entity: EntityId(0),
            control: 99,
            event: None,
        };
        assert!(!registry.invoke(&unknown));
    }
}
