//! Stale-response guard for reference-data fetches
//!
//! Every request takes a ticket from a [`FetchGeneration`]. Closing the form,
//! resetting it or starting a newer request bumps the generation, and a
//! response carrying an older ticket is dropped instead of applied.

use super::error::FormError;

/// Ticket of one in-flight request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

#[derive(Debug, Clone, Default)]
pub struct FetchGeneration {
    current: u64,
}

impl FetchGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request, superseding any earlier one
    pub fn begin(&mut self) -> FetchTicket {
        self.current += 1;
        FetchTicket(self.current)
    }

    /// Invalidate all outstanding tickets (form closed or reset)
    pub fn invalidate(&mut self) {
        self.current += 1;
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.current
    }

    /// `Ok` when the ticket is still current, otherwise the discard reason
    pub fn check(&self, what: &'static str, ticket: FetchTicket) -> Result<(), FormError> {
        if self.is_current(ticket) {
            Ok(())
        } else {
            Err(FormError::StaleFetchDiscarded {
                what,
                got: ticket.0,
                current: self.current,
            })
        }
    }
}

/// Reference data owned by an open form
#[derive(Debug, Clone, PartialEq)]
pub enum ReferenceData<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Default for ReferenceData<T> {
    fn default() -> Self {
        ReferenceData::Idle
    }
}

impl<T> ReferenceData<T> {
    /// Data usable for option lists; nothing while loading or after a failure
    pub fn ready(&self) -> Option<&T> {
        match self {
            ReferenceData::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            ReferenceData::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ReferenceData::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ReferenceData::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Apply a fetch result. A failed fetch leaves the form without data.
    pub fn resolve(result: Result<T, String>) -> Self {
        match result {
            Ok(data) => ReferenceData::Ready(data),
            Err(e) => ReferenceData::Failed(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_ticket_is_current() {
        let mut generation = FetchGeneration::new();
        let first = generation.begin();
        assert!(generation.is_current(first));

        let second = generation.begin();
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
    }

    #[test]
    fn test_invalidate_discards_outstanding() {
        let mut generation = FetchGeneration::new();
        let ticket = generation.begin();
        generation.invalidate();
        assert_eq!(
            generation.check("regions", ticket),
            Err(FormError::StaleFetchDiscarded {
                what: "regions",
                got: 1,
                current: 2,
            })
        );
    }

    #[test]
    fn test_reference_data_fails_closed() {
        let loading: ReferenceData<Vec<i32>> = ReferenceData::Loading;
        assert!(loading.ready().is_none());
        assert!(loading.is_loading());

        let failed = ReferenceData::<Vec<i32>>::resolve(Err("HTTP 500".into()));
        assert!(failed.ready().is_none());
        assert_eq!(failed.error(), Some("HTTP 500"));

        let ready = ReferenceData::resolve(Ok(vec![1, 2]));
        assert_eq!(ready.ready(), Some(&vec![1, 2]));
    }
}
