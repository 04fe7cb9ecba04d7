//! Events: timestamped, actor-targeted stage mutations
//!
//! Events are the only way stage state evolves. The timeline owns every
//! submitted event and may re-apply it many times during rollback, so an
//! event's `apply` must be deterministic: same stage in, same mutation and
//! flag out. Clocks, random sources, and I/O inside `apply` break replay.

use crate::{ActorId, ActorState, Stage, Timestamp};

/// A timestamped mutation targeting one actor
///
/// `apply` returns whether the mutation was meaningful (preconditions held
/// and state changed). A failed apply must leave the stage unchanged. The
/// timeline keeps failed events around: an earlier insertion can make them
/// succeed on a later replay.
///
/// Events order by timestamp alone; events at equal timestamps replay in
/// the order they were submitted.
pub trait Event {
    /// When this event takes effect
    fn when(&self) -> Timestamp;

    /// The actor this event targets
    fn target(&self) -> ActorId;

    /// Apply the mutation to a stage
    fn apply(&mut self, stage: &mut Stage) -> bool;
}

/// An event bound to one concrete state type
///
/// Implementers get the lookup-and-probe boilerplate for free: the blanket
/// [`Event`] impl resolves the target, reports `false` for an absent actor
/// or a state of the wrong type without touching the stage, and otherwise
/// hands the exclusively borrowed state to
/// [`apply_state`](StateEvent::apply_state).
///
/// Events that need whole-stage access (spawning or removing actors, moving
/// state between actors) implement [`Event`] directly instead.
pub trait StateEvent {
    /// The concrete state type this event mutates
    type State: ActorState;

    /// When this event takes effect
    fn when(&self) -> Timestamp;

    /// The actor this event targets
    fn target(&self) -> ActorId;

    /// Mutate the target's state, known to be `Self::State`
    fn apply_state(&mut self, state: &mut Self::State) -> bool;
}

impl<E: StateEvent> Event for E {
    fn when(&self) -> Timestamp {
        StateEvent::when(self)
    }

    fn target(&self) -> ActorId {
        StateEvent::target(self)
    }

    fn apply(&mut self, stage: &mut Stage) -> bool {
        let target = StateEvent::target(self);
        match stage.get_as_mut::<E::State>(target) {
            Some(state) => self.apply_state(state),
            None => false,
        }
    }
}

/// Callback invoked with the wrapped event's target and success flag
pub type Callback = Box<dyn FnMut(ActorId, bool)>;

/// Wrapper reporting edge transitions in another event's success flag
///
/// Resimulation re-applies events freely, so observing every apply would
/// flood the embedder with no-change notifications. The wrapper invokes its
/// callback only on the first application and whenever the wrapped event's
/// flag flips since the last observation. Its own apply always reports
/// success, so the wrapper never counts as a failed event itself.
pub struct CallbackEvent {
    wrapped: Box<dyn Event>,
    callback: Callback,
    last: bool,
    fired: bool,
}

impl CallbackEvent {
    /// Wrap an event, reporting its flag transitions to `callback`
    pub fn new(wrapped: Box<dyn Event>, callback: impl FnMut(ActorId, bool) + 'static) -> Self {
        Self {
            wrapped,
            callback: Box::new(callback),
            last: false,
            fired: false,
        }
    }
}

impl Event for CallbackEvent {
    fn when(&self) -> Timestamp {
        self.wrapped.when()
    }

    fn target(&self) -> ActorId {
        self.wrapped.target()
    }

    fn apply(&mut self, stage: &mut Stage) -> bool {
        let value = self.wrapped.apply(stage);
        if !self.fired || value != self.last {
            (self.callback)(self.wrapped.target(), value);
        }
        self.fired = true;
        self.last = value;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::Any;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    struct Counter {
        value: i64,
    }

    impl ActorState for Counter {
        fn clone_state(&self) -> Box<dyn ActorState> {
            Box::new(self.clone())
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[derive(Debug, Clone)]
    struct Label {
        #[allow(dead_code)]
        text: String,
    }

    impl ActorState for Label {
        fn clone_state(&self) -> Box<dyn ActorState> {
            Box::new(self.clone())
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    struct Increment {
        when: Timestamp,
        target: ActorId,
    }

    impl StateEvent for Increment {
        type State = Counter;

        fn when(&self) -> Timestamp {
            self.when
        }

        fn target(&self) -> ActorId {
            self.target
        }

        fn apply_state(&mut self, state: &mut Counter) -> bool {
            state.value += 1;
            true
        }
    }

    fn increment(when: u64, target: u64) -> Increment {
        Increment {
            when: Timestamp::new(when),
            target: ActorId::new(target),
        }
    }

    #[test]
    fn test_state_event_delegates() {
        let mut stage = Stage::new();
        stage.insert(ActorId::new(1), Box::new(Counter { value: 4 }));

        let mut event = increment(10, 1);
        assert_eq!(Event::when(&event), Timestamp::new(10));
        assert_eq!(Event::target(&event), ActorId::new(1));
        assert!(event.apply(&mut stage));
        assert_eq!(stage.get_as::<Counter>(ActorId::new(1)).unwrap().value, 5);
    }

    #[test]
    fn test_state_event_missing_actor_fails() {
        let mut stage = Stage::new();

        let mut event = increment(10, 1);
        assert!(!event.apply(&mut stage));
        assert!(stage.is_empty());
    }

    #[test]
    fn test_state_event_wrong_type_fails() {
        let mut stage = Stage::new();
        stage.insert(
            ActorId::new(1),
            Box::new(Label {
                text: "hero".into(),
            }),
        );

        let mut event = increment(10, 1);
        assert!(!event.apply(&mut stage));
        assert!(stage.get_as::<Label>(ActorId::new(1)).is_some());
    }

    #[test]
    fn test_callback_fires_on_transitions_only() {
        let calls: Rc<RefCell<Vec<(ActorId, bool)>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let mut event = CallbackEvent::new(Box::new(increment(10, 1)), move |id, ok| {
            sink.borrow_mut().push((id, ok));
        });

        let mut stage = Stage::new();

        // First application always fires, even on failure
        assert!(event.apply(&mut stage));
        assert_eq!(calls.borrow().as_slice(), &[(ActorId::new(1), false)]);

        // Same outcome again stays silent
        assert!(event.apply(&mut stage));
        assert_eq!(calls.borrow().len(), 1);

        // Outcome flips once the actor exists
        stage.insert(ActorId::new(1), Box::new(Counter { value: 0 }));
        assert!(event.apply(&mut stage));
        assert_eq!(calls.borrow().last(), Some(&(ActorId::new(1), true)));
        assert_eq!(calls.borrow().len(), 2);
    }

    #[test]
    fn test_callback_delegates_when_and_target() {
        let event = CallbackEvent::new(Box::new(increment(10, 1)), |_, _| {});
        assert_eq!(event.when(), Timestamp::new(10));
        assert_eq!(event.target(), ActorId::new(1));
    }
}
