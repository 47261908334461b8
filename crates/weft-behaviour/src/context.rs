//! Instance context handed to `active` factories and API functions.

use crate::{BehaviourError, BehaviourState, StateCell, ValidatedConfig};
use weft_types::ComponentId;

/// Everything a behaviour knows about the one instance it is serving.
#[derive(Debug, Clone, Copy)]
pub struct InstanceContext<'a> {
    /// Component the behaviour is bound to.
    pub component: &'a ComponentId,
    /// Behaviour name.
    pub behaviour: &'a str,
    /// This instance's validated configuration.
    pub config: &'a ValidatedConfig,
    state: Option<&'a StateCell>,
}

impl<'a> InstanceContext<'a> {
    /// Creates a context.
    #[must_use]
    pub fn new(
        component: &'a ComponentId,
        behaviour: &'a str,
        config: &'a ValidatedConfig,
        state: Option<&'a StateCell>,
    ) -> Self {
        Self {
            component,
            behaviour,
            config,
            state,
        }
    }

    /// This instance's state cell.
    ///
    /// # Errors
    ///
    /// Returns [`BehaviourError::NoState`] if the behaviour has no state factory.
    pub fn state(&self) -> Result<&'a StateCell, BehaviourError> {
        self.state
            .ok_or_else(|| BehaviourError::NoState(self.behaviour.to_string()))
    }

    /// Shared access to the state as `T`.
    ///
    /// # Errors
    ///
    /// Returns `NoState` or `StateType`.
    pub fn with_state<T: BehaviourState, R>(
        &self,
        f: impl FnOnce(&T) -> R,
    ) -> Result<R, BehaviourError> {
        self.state()?.with(f)
    }

    /// Exclusive access to the state as `T`.
    ///
    /// # Errors
    ///
    /// Returns `NoState` or `StateType`.
    pub fn with_state_mut<T: BehaviourState, R>(
        &self,
        f: impl FnOnce(&mut T) -> R,
    ) -> Result<R, BehaviourError> {
        self.state()?.with_mut(f)
    }
}
