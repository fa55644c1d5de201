/// A subscription that delivers its payload at most once.
///
/// Arming replaces any payload that has not fired yet.
#[derive(Debug)]
pub(super) struct OneShot<T> {
    armed: Option<T>,
}

impl<T> Default for OneShot<T> {
    fn default() -> Self {
        Self { armed: None }
    }
}

impl<T> OneShot<T> {
    pub(super) fn arm(&mut self, payload: T) {
        self.armed = Some(payload);
    }

    /// Take the payload; later calls return `None` until re-armed.
    pub(super) fn fire(&mut self) -> Option<T> {
        self.armed.take()
    }

    pub(super) fn disarm(&mut self) {
        self.armed = None;
    }

    pub(super) fn is_armed(&self) -> bool {
        self.armed.is_some()
    }
}
