use crate::vector::Vec2;
use log::debug;
use std::fmt;
use std::rc::Rc;

/// Change callback: receives the vector after the change and a snapshot of
/// its state before it.
///
/// Callbacks run inline and may mutate the vector they observe, which
/// re-enters notification. Nothing guards against an observer that always
/// mutates; that recursion is the caller's to avoid.
pub type Observer = Rc<dyn Fn(&mut Vec2, &Vec2)>;

/// Handle returned by registration, used to unregister that one entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

impl Subscription {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Registered observers in registration order.
#[derive(Default)]
pub struct ObserverList {
    next_id: u64,
    entries: Vec<(Subscription, Observer)>,
}

impl ObserverList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: Observer) -> Subscription {
        let subscription = Subscription(self.next_id);
        self.next_id += 1;
        self.entries.push((subscription, observer));
        debug!("observer {} registered ({} total)", subscription.0, self.entries.len());
        subscription
    }

    /// Removes the entry registered under `subscription`. Unknown handles are
    /// ignored.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        // Entries are sorted by id, see `next_before`.
        match self.entries.binary_search_by_key(&subscription.0, |(s, _)| s.0) {
            Ok(idx) => {
                self.entries.remove(idx);
                debug!("observer {} removed ({} left)", subscription.0, self.entries.len());
                true
            }
            Err(_) => false,
        }
    }

    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            debug!("clearing {} observers", self.entries.len());
        }
        self.entries.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bound that starts a notification pass: every entry registered so far
    /// lies below it, anything registered during the pass does not.
    #[inline]
    pub fn pass_bound(&self) -> u64 {
        self.next_id
    }

    /// The most recently registered entry whose id is below `bound`.
    ///
    /// Walking with the returned id as the next bound visits entries in
    /// reverse-registration order and stays correct when entries are removed
    /// mid-walk. The observer is returned as a shared handle so the caller
    /// can invoke it without keeping the list borrowed.
    pub fn next_before(&self, bound: u64) -> Option<(Subscription, Observer)> {
        // Ids grow monotonically and removal keeps order, so entries stay sorted.
        let idx = self.entries.partition_point(|(s, _)| s.0 < bound);
        if idx == 0 {
            return None;
        }
        let (subscription, observer) = &self.entries[idx - 1];
        Some((*subscription, Rc::clone(observer)))
    }
}

impl fmt::Debug for ObserverList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverList")
            .field("len", &self.entries.len())
            .finish()
    }
}
