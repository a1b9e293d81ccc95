//! Generation counters for superseded requests.
//!
//! A component issues a ticket per fetch and commits a response only while
//! its ticket is the newest one, so a slow older response can never
//! overwrite the result of a newer request.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: u64,
}

impl RequestTracker {
    pub fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }

    /// Invalidate every outstanding ticket without issuing a new request.
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_newest_ticket_is_current() {
        let mut tracker = RequestTracker::default();
        let first = tracker.issue();
        let second = tracker.issue();

        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
        assert!(first < second);

        tracker.invalidate();
        assert!(!tracker.is_current(second));
    }
}
