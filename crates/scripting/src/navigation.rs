//! Navigation facility consumed by behaviours.

use std::cell::RefCell;
use std::rc::Rc;

/// Host mechanism that moves the session to another location.
///
/// A navigation request hands control of the session back to the host; the
/// caller gets no result.
pub trait Navigator {
    /// Request navigation to `target`. An empty target reloads the current
    /// location.
    fn navigate(&mut self, target: &str);
}

/// Navigator that records requests for the host to act on after the callback
/// returns.
///
/// Clones share the same request list, so the host keeps one clone and hands
/// another to the behaviour.
#[derive(Debug, Clone, Default)]
pub struct NavigationLatch {
    requests: Rc<RefCell<Vec<String>>>,
}

impl NavigationLatch {
    /// Latch with no requests.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any request is pending.
    pub fn is_requested(&self) -> bool {
        !self.requests.borrow().is_empty()
    }

    /// Number of pending requests.
    pub fn len(&self) -> usize {
        self.requests.borrow().len()
    }

    /// Returns true if no requests are pending.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the pending requests, oldest first.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    /// Take every pending request.
    pub fn take(&self) -> Vec<String> {
        self.requests.borrow_mut().drain(..).collect()
    }
}

impl Navigator for NavigationLatch {
    fn navigate(&mut self, target: &str) {
        tracing::info!(target_location = target, "navigation requested");
        self.requests.borrow_mut().push(target.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_requests() {
        let latch = NavigationLatch::new();
        let mut handed_out = latch.clone();
        assert!(!latch.is_requested());

        handed_out.navigate("");
        handed_out.navigate("next");

        assert_eq!(latch.requests(), vec![String::new(), "next".to_string()]);
        assert_eq!(latch.take().len(), 2);
        assert!(latch.is_empty());
        assert!(handed_out.is_empty());
    }
}
