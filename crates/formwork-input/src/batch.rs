use crate::status::HandleStatus;

/// Ordered queue of pending input events.
///
/// Events are offered to a handler in arrival order; consumed events are
/// dropped from the batch, everything else stays for the next consumer.
#[derive(Debug, Clone)]
pub struct EventBatch<E> {
    events: Vec<E>,
}

impl<E> EventBatch<E> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: E) {
        self.events.push(event);
    }

    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn dispatch<H>(&mut self, mut handler: H)
    where
        H: FnMut(&E) -> HandleStatus,
    {
        self.events.retain(|event| {
            let status = handler(event);
            !status.is_consumed()
        });
        tracing::trace!(remaining = self.events.len(), "event batch dispatched");
    }
}

impl<E> Default for EventBatch<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> FromIterator<E> for EventBatch<E> {
    fn from_iter<T: IntoIterator<Item = E>>(iter: T) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}

impl<E> Extend<E> for EventBatch<E> {
    fn extend<T: IntoIterator<Item = E>>(&mut self, iter: T) {
        self.events.extend(iter);
    }
}
