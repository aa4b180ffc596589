//! All passengers of one run, indexed by `PassengerId`.

use bd_core::PassengerId;

use crate::{Passenger, PassengerError, PassengerResult, PassengerState};

#[derive(Clone, Debug, Default)]
pub struct PassengerStore {
    inner: Vec<Passenger>,
}

impl PassengerStore {
    /// Wrap `passengers`; element `i` must carry `PassengerId(i)`.
    pub fn new(passengers: Vec<Passenger>) -> Self {
        debug_assert!(passengers.iter().enumerate().all(|(i, p)| p.id.index() == i));
        Self { inner: passengers }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn get(&self, id: PassengerId) -> PassengerResult<&Passenger> {
        self.inner.get(id.index()).ok_or(PassengerError::NotFound(id))
    }

    pub fn get_mut(&mut self, id: PassengerId) -> PassengerResult<&mut Passenger> {
        self.inner.get_mut(id.index()).ok_or(PassengerError::NotFound(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Passenger> {
        self.inner.iter()
    }

    pub fn as_slice(&self) -> &[Passenger] {
        &self.inner
    }

    pub fn state(&self, id: PassengerId) -> PassengerResult<PassengerState> {
        self.get(id).map(|p| p.state)
    }

    pub fn seated_count(&self) -> usize {
        self.inner.iter().filter(|p| p.is_seated()).count()
    }

    pub fn all_seated(&self) -> bool {
        self.inner.iter().all(Passenger::is_seated)
    }
}
