//! Per-instance behaviour state.
//!
//! A behaviour with a state factory gets one fresh [`StateCell`] per
//! component it is bound to. The cell is shared between that component's
//! event handlers and API functions, and never across components.

use crate::BehaviourError;
use parking_lot::Mutex;
use serde_json::Value;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Upcast helper so state can be downcast to its concrete type.
///
/// Implemented for every `'static` type; never implement it by hand.
pub trait AsAny: Any {
    /// Returns `self` as `&dyn Any`.
    fn as_any(&self) -> &dyn Any;
    /// Returns `self` as `&mut dyn Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Mutable state owned by one bound behaviour.
///
/// # Example
///
/// ```
/// use weft_behaviour::BehaviourState;
/// use serde_json::{json, Value};
///
/// struct SlideState {
///     expanded: bool,
/// }
///
/// impl BehaviourState for SlideState {
///     fn read_state(&self) -> Value {
///         json!({ "expanded": self.expanded })
///     }
/// }
/// ```
pub trait BehaviourState: AsAny + Send {
    /// JSON snapshot of the state, for debugging and inspection.
    fn read_state(&self) -> Value {
        Value::Null
    }
}

/// Shared handle to one behaviour instance's state.
///
/// Cloning the handle does not clone the state.
#[derive(Clone)]
pub struct StateCell {
    behaviour: Arc<str>,
    inner: Arc<Mutex<Box<dyn BehaviourState>>>,
}

impl StateCell {
    /// Wraps a freshly constructed state for `behaviour`.
    #[must_use]
    pub fn new(behaviour: &str, state: Box<dyn BehaviourState>) -> Self {
        Self {
            behaviour: Arc::from(behaviour),
            inner: Arc::new(Mutex::new(state)),
        }
    }

    /// Name of the behaviour this state belongs to.
    #[must_use]
    pub fn behaviour(&self) -> &str {
        &self.behaviour
    }

    /// Runs `f` with shared access to the state as `T`.
    ///
    /// # Errors
    ///
    /// Returns [`BehaviourError::StateType`] if the state is not a `T`.
    pub fn with<T: BehaviourState, R>(&self, f: impl FnOnce(&T) -> R) -> Result<R, BehaviourError> {
        let guard = self.inner.lock();
        let state: &dyn BehaviourState = &**guard;
        state
            .as_any()
            .downcast_ref::<T>()
            .map(f)
            .ok_or_else(|| self.type_error::<T>())
    }

    /// Runs `f` with exclusive access to the state as `T`.
    ///
    /// # Errors
    ///
    /// Returns [`BehaviourError::StateType`] if the state is not a `T`.
    pub fn with_mut<T: BehaviourState, R>(
        &self,
        f: impl FnOnce(&mut T) -> R,
    ) -> Result<R, BehaviourError> {
        let mut guard = self.inner.lock();
        let state: &mut dyn BehaviourState = &mut **guard;
        match state.as_any_mut().downcast_mut::<T>() {
            Some(typed) => Ok(f(typed)),
            None => Err(self.type_error::<T>()),
        }
    }

    /// JSON snapshot via [`BehaviourState::read_state`].
    #[must_use]
    pub fn read_state(&self) -> Value {
        self.inner.lock().read_state()
    }

    /// Returns `true` if both handles point at the same state.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn type_error<T>(&self) -> BehaviourError {
        BehaviourError::StateType {
            behaviour: self.behaviour.to_string(),
            expected: std::any::type_name::<T>(),
        }
    }
}

impl fmt::Debug for StateCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("StateCell");
        out.field("behaviour", &self.behaviour);
        // Held by the caller (e.g. logging from inside an API call).
        match self.inner.try_lock() {
            Some(state) => out.field("state", &state.read_state()),
            None => out.field("state", &format_args!("<locked>")),
        };
        out.finish()
    }
}
