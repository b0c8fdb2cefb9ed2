use std::sync::Arc;
use parking_lot::Mutex;
use ahash::AHashMap;

/// System-wide event bus
pub struct EventBus {
    handlers: Arc<Mutex<AHashMap<std::any::TypeId, Vec<Box<dyn EventHandler>>>>>,
}

/// Event trait that all events must implement
pub trait Event: Send + Sync + 'static {
    fn as_any(&self) -> &dyn std::any::Any;
}

/// Handler trait for event handlers
pub trait EventHandler: Send + Sync {
    fn handle(&mut self, event: &dyn Event);
}

/// Movie import events
pub mod events {
    use super::Event;
    
    /// A movie was imported and its sources activated
    #[derive(Debug, Clone)]
    pub struct MovieImported {
        pub movie_id: String,
        pub source_ids: Vec<String>,
    }
    
    /// A movie import was aborted
    #[derive(Debug, Clone)]
    pub struct MovieImportFailed {
        pub movie_id: String,
        pub error: String,
    }
    
    macro_rules! impl_event {
        ($($t:ty),*) => {
            $(
                impl Event for $t {
                    fn as_any(&self) -> &dyn std::any::Any {
                        self
                    }
                }
            )*
        }
    }
    
    impl_event!(MovieImported, MovieImportFailed);
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(Mutex::new(AHashMap::new())),
        }
    }
    
    /// Subscribe to events of a specific type
    pub fn subscribe<E: Event>(&self, handler: Box<dyn EventHandler>) {
        let type_id = std::any::TypeId::of::<E>();
        let mut handlers = self.handlers.lock();
        handlers.entry(type_id).or_default().push(handler);
    }
    
    /// Subscribe a closure that receives the concrete event type
    pub fn on<E, F>(&self, mut f: F)
    where
        E: Event,
        F: FnMut(&E) + Send + Sync + 'static,
    {
        self.subscribe::<E>(handler_from_fn(move |event| {
            if let Some(event) = event.as_any().downcast_ref::<E>() {
                f(event);
            }
        }));
    }
    
    /// Publish an event to every handler subscribed to its type.
    ///
    /// Handlers run without the bus lock held, so they may publish or
    /// subscribe on the same bus. A nested publish of the same event type
    /// skips the handlers that are still dispatching the outer one.
    pub fn publish<E: Event>(&self, event: E) {
        let type_id = std::any::TypeId::of::<E>();
        let mut dispatching = match self.handlers.lock().get_mut(&type_id) {
            Some(event_handlers) => std::mem::take(event_handlers),
            None => return,
        };

        for handler in dispatching.iter_mut() {
            handler.handle(&event);
        }

        // Handlers subscribed during dispatch go after the existing ones
        let mut handlers = self.handlers.lock();
        let slot = handlers.entry(type_id).or_default();
        dispatching.append(slot);
        *slot = dispatching;
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper struct for creating event handlers from closures
pub struct ClosureEventHandler<F> {
    handler: F,
}

impl<F> EventHandler for ClosureEventHandler<F>
where
    F: FnMut(&dyn Event) + Send + Sync,
{
    fn handle(&mut self, event: &dyn Event) {
        (self.handler)(event);
    }
}

/// Create an event handler from a closure
pub fn handler_from_fn<F>(f: F) -> Box<dyn EventHandler>
where
    F: FnMut(&dyn Event) + Send + Sync + 'static,
{
    Box::new(ClosureEventHandler { handler: f })
}

#[cfg(test)]
mod tests {
    use super::events::{MovieImportFailed, MovieImported};
    use super::*;

    #[test]
    fn test_publish_reaches_matching_subscribers_only() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        bus.subscribe::<MovieImported>(handler_from_fn(move |event| {
            if let Some(imported) = event.as_any().downcast_ref::<MovieImported>() {
                sink.lock().push(imported.movie_id.clone());
            }
        }));

        bus.publish(MovieImported {
            movie_id: "abc".to_string(),
            source_ids: vec!["13".to_string()],
        });
        bus.publish(MovieImportFailed {
            movie_id: "def".to_string(),
            error: "boom".to_string(),
        });

        assert_eq!(*seen.lock(), vec!["abc".to_string()]);
    }

    #[test]
    fn test_typed_subscription() {
        let bus = EventBus::new();
        let errors = Arc::new(Mutex::new(Vec::new()));

        let sink = errors.clone();
        bus.on(move |failed: &MovieImportFailed| sink.lock().push(failed.error.clone()));

        bus.publish(MovieImportFailed {
            movie_id: "def".to_string(),
            error: "no such movie".to_string(),
        });

        assert_eq!(*errors.lock(), vec!["no such movie".to_string()]);
    }

    #[test]
    fn test_handlers_can_publish_and_subscribe_on_the_same_bus() {
        let bus = Arc::new(EventBus::new());
        let failures = Arc::new(Mutex::new(Vec::new()));
        let late_hits = Arc::new(Mutex::new(0));

        let sink = failures.clone();
        bus.on(move |failed: &MovieImportFailed| sink.lock().push(failed.movie_id.clone()));

        let inner = bus.clone();
        let hits = late_hits.clone();
        let mut subscribed = false;
        bus.on(move |imported: &MovieImported| {
            inner.publish(MovieImportFailed {
                movie_id: imported.movie_id.clone(),
                error: "follow-up".to_string(),
            });
            if !subscribed {
                subscribed = true;
                let hits = hits.clone();
                inner.on(move |_: &MovieImported| *hits.lock() += 1);
            }
        });

        for id in ["abc", "def"] {
            bus.publish(MovieImported {
                movie_id: id.to_string(),
                source_ids: Vec::new(),
            });
        }

        assert_eq!(*failures.lock(), vec!["abc".to_string(), "def".to_string()]);
        assert_eq!(*late_hits.lock(), 1);
    }
}
