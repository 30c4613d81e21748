//! Listener registry and change fan-out
//!
//! The broker keeps an ordered, duplicate-free set of listeners and
//! translates a [`ChangeDelta`] into the applicable callbacks, in
//! registration order. A failing listener never blocks the others:
//! failures are collected and reported together after every listener
//! has been visited.

use thiserror::Error;
use tracing::trace;

use crate::delta::ChangeDelta;

/// Opaque handle identifying a registered listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// An error reported by a single listener callback.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ListenerError(pub String);

impl From<&str> for ListenerError {
    fn from(message: &str) -> Self {
        ListenerError(message.to_owned())
    }
}

impl From<String> for ListenerError {
    fn from(message: String) -> Self {
        ListenerError(message)
    }
}

/// One or more listeners failed during a dispatch that still visited
/// every listener.
#[derive(Debug, Error)]
#[error("{} listener(s) failed during dispatch", failures.len())]
pub struct DispatchError {
    pub failures: Vec<(ListenerId, ListenerError)>,
}

/// The five individual configuration axes, for the granular callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConfigurationChange {
    pub locale: bool,
    pub font_scale: bool,
    pub orientation: bool,
    pub ui_mode: bool,
    pub density: bool,
}

/// Callbacks a theme consumer can receive.
///
/// Every method defaults to a no-op so hosts implement only what they
/// care about.
pub trait DynamicListener {
    /// Coarse change signal: whether the context must be rebuilt and
    /// whether inflated UI must be recreated.
    fn on_dynamic_change(
        &mut self,
        context_rebuild: bool,
        recreate: bool,
    ) -> Result<(), ListenerError> {
        let _ = (context_rebuild, recreate);
        Ok(())
    }

    /// Granular configuration change carrying the individual axes.
    fn on_configuration_change(
        &mut self,
        change: ConfigurationChange,
    ) -> Result<(), ListenerError> {
        let _ = change;
        Ok(())
    }

    /// Theme or palette colors changed; recolor without recreating.
    fn on_colors_change(&mut self) -> Result<(), ListenerError> {
        Ok(())
    }

    /// Power-save mode toggled.
    fn on_power_save_change(&mut self, enabled: bool) -> Result<(), ListenerError> {
        let _ = enabled;
        Ok(())
    }

    /// Navigation bar theming toggled.
    fn on_navigation_bar_change(&mut self) -> Result<(), ListenerError> {
        Ok(())
    }
}

/// Ordered, duplicate-free listener registry.
#[derive(Default)]
pub struct ChangeBroker {
    listeners: Vec<(ListenerId, Box<dyn DynamicListener>)>,
}

impl ChangeBroker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener at the end of the dispatch order.
    ///
    /// Adding an id that is already registered is a no-op; the original
    /// listener and its position are kept. Returns whether the
    /// listener was added.
    pub fn add_listener(&mut self, id: ListenerId, listener: Box<dyn DynamicListener>) -> bool {
        if self.has_listener(id) {
            return false;
        }
        self.listeners.push((id, listener));
        true
    }

    /// Removes a listener; absent ids are ignored.
    pub fn remove_listener(&mut self, id: ListenerId) -> Option<Box<dyn DynamicListener>> {
        let index = self.listeners.iter().position(|(known, _)| *known == id)?;
        Some(self.listeners.remove(index).1)
    }

    pub fn has_listener(&self, id: ListenerId) -> bool {
        self.listeners.iter().any(|(known, _)| *known == id)
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Drops every listener.
    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    /// Fans the delta out to every listener, in registration order.
    ///
    /// An all-false delta emits nothing. Listener failures do not
    /// abort the dispatch; they are collected and returned together
    /// once every listener has been visited.
    pub fn notify(&mut self, delta: &ChangeDelta) -> Result<(), DispatchError> {
        if delta.is_empty() {
            return Ok(());
        }

        let context_rebuild = delta.context_rebuild();
        let recreate = delta.recreate();
        trace!(
            context_rebuild,
            recreate,
            colors = delta.colors,
            power_save = delta.power_save,
            navigation_bar = delta.navigation_bar,
            listeners = self.listeners.len(),
            "dispatching change"
        );

        let configuration = ConfigurationChange {
            locale: delta.locale,
            font_scale: delta.font_scale,
            orientation: delta.orientation,
            ui_mode: delta.ui_mode,
            density: delta.density,
        };

        let mut failures = Vec::new();
        for (id, listener) in &mut self.listeners {
            let mut record = |result: Result<(), ListenerError>| {
                if let Err(error) = result {
                    failures.push((*id, error));
                }
            };

            if context_rebuild {
                record(listener.on_dynamic_change(context_rebuild, recreate));
                record(listener.on_configuration_change(configuration));
            }
            if delta.colors {
                record(listener.on_colors_change());
            }
            if delta.power_save {
                record(listener.on_power_save_change(delta.power_save_enabled));
            }
            if delta.navigation_bar {
                record(listener.on_navigation_bar_change());
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(DispatchError { failures })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Appends `(id, callback)` tags to a shared log; fails on demand.
    struct Recorder {
        tag: &'static str,
        log: Rc<RefCell<Vec<String>>>,
        fail: bool,
    }

    impl DynamicListener for Recorder {
        fn on_dynamic_change(
            &mut self,
            context_rebuild: bool,
            recreate: bool,
        ) -> Result<(), ListenerError> {
            self.log
                .borrow_mut()
                .push(format!("{}:dynamic({context_rebuild},{recreate})", self.tag));
            if self.fail {
                return Err("dynamic failed".into());
            }
            Ok(())
        }

        fn on_colors_change(&mut self) -> Result<(), ListenerError> {
            self.log.borrow_mut().push(format!("{}:colors", self.tag));
            if self.fail {
                return Err("colors failed".into());
            }
            Ok(())
        }

        fn on_power_save_change(&mut self, enabled: bool) -> Result<(), ListenerError> {
            self.log
                .borrow_mut()
                .push(format!("{}:power({enabled})", self.tag));
            Ok(())
        }
    }

    fn recorder(
        tag: &'static str,
        log: &Rc<RefCell<Vec<String>>>,
        fail: bool,
    ) -> Box<dyn DynamicListener> {
        Box::new(Recorder {
            tag,
            log: Rc::clone(log),
            fail,
        })
    }

    #[test]
    fn dispatch_preserves_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut broker = ChangeBroker::new();
        broker.add_listener(ListenerId(2), recorder("b", &log, false));
        broker.add_listener(ListenerId(1), recorder("a", &log, false));

        broker.notify(&ChangeDelta::colors()).unwrap();
        assert_eq!(*log.borrow(), ["b:colors", "a:colors"]);
    }

    #[test]
    fn duplicate_add_is_ignored() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut broker = ChangeBroker::new();
        assert!(broker.add_listener(ListenerId(7), recorder("first", &log, false)));
        assert!(!broker.add_listener(ListenerId(7), recorder("second", &log, false)));
        assert_eq!(broker.len(), 1);

        broker.notify(&ChangeDelta::colors()).unwrap();
        assert_eq!(*log.borrow(), ["first:colors"]);
    }

    #[test]
    fn remove_absent_listener_is_silent() {
        let mut broker = ChangeBroker::new();
        assert!(broker.remove_listener(ListenerId(9)).is_none());
    }

    #[test]
    fn empty_delta_emits_nothing() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut broker = ChangeBroker::new();
        broker.add_listener(ListenerId(1), recorder("a", &log, false));

        broker.notify(&ChangeDelta::default()).unwrap();
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn failing_listener_does_not_block_the_rest() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut broker = ChangeBroker::new();
        broker.add_listener(ListenerId(1), recorder("a", &log, true));
        broker.add_listener(ListenerId(2), recorder("b", &log, false));

        let error = broker.notify(&ChangeDelta::colors()).unwrap_err();
        assert_eq!(*log.borrow(), ["a:colors", "b:colors"]);
        assert_eq!(error.failures.len(), 1);
        assert_eq!(error.failures[0].0, ListenerId(1));
    }

    #[test]
    fn delta_selects_callbacks() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut broker = ChangeBroker::new();
        broker.add_listener(ListenerId(1), recorder("a", &log, false));

        broker.notify(&ChangeDelta::power_save(true)).unwrap();
        assert_eq!(*log.borrow(), ["a:power(true)"]);

        log.borrow_mut().clear();
        let delta = ChangeDelta {
            locale: true,
            ..ChangeDelta::default()
        };
        broker.notify(&delta).unwrap();
        assert_eq!(*log.borrow(), ["a:dynamic(true,true)"]);
    }
}
