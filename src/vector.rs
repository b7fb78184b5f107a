//! The vector value type: coordinate state, the mutation path, the derived
//! value cache and observer registration.

use crate::cache::DerivedCache;
use crate::observer::{Observer, ObserverList, Subscription};
use crate::operand::Operand;
use log::trace;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use vec2_common::{round_to, Point, VectorPolicy, PRECISION_DIGITS};

/// Mutable 2D vector.
///
/// Coordinates are only written through [`Vec2::set`] and the operations
/// built on it, so the length cache and the observers always see every
/// change. Pure operations return a new vector carrying the same policy and
/// no observers.
#[derive(Debug, Serialize, Deserialize)]
#[serde(into = "Point", from = "Point")]
pub struct Vec2 {
    x: f64,
    y: f64,
    policy: VectorPolicy,
    cache: DerivedCache,
    observers: ObserverList,
}

#[cfg(test)]
thread_local! {
    static SNAPSHOTS_TAKEN: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

impl Vec2 {
    /// Creates a vector with the default policy.
    pub fn new(x: f64, y: f64) -> Self {
        Self::with_policy(x, y, VectorPolicy::default())
    }

    /// Creates a vector that uses `policy` for `set` and comparisons.
    ///
    /// `policy.epsilon` must be positive and finite (see
    /// [`VectorPolicy::validate`]); otherwise `equal` is never true.
    pub fn with_policy(x: f64, y: f64, policy: VectorPolicy) -> Self {
        debug_assert!(policy.validate().is_ok(), "invalid vector policy: {:?}", policy);
        let (x, y) = prepare(x, y, &policy);
        Vec2 {
            x,
            y,
            policy,
            cache: DerivedCache::new(),
            observers: ObserverList::new(),
        }
    }

    /// Creates a vector from an `[x, y]` pair.
    pub fn from_array(pair: [f64; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }

    /// Creates a vector from any operand shape.
    pub fn from_operand(xy: impl Into<Operand>) -> Self {
        let (x, y) = xy.into().xy();
        Self::new(x, y)
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn xy(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn policy(&self) -> VectorPolicy {
        self.policy
    }

    /// New vector with this vector's policy.
    #[inline]
    pub(crate) fn spawn(&self, x: f64, y: f64) -> Vec2 {
        Vec2::with_policy(x, y, self.policy)
    }

    // ---- mutation ----

    /// Assigns both coordinates and notifies observers.
    pub fn set(&mut self, xy: impl Into<Operand>) -> &mut Self {
        self.set_with(xy, true)
    }

    /// Assigns both coordinates without notifying observers.
    pub fn set_quiet(&mut self, xy: impl Into<Operand>) -> &mut Self {
        self.set_with(xy, false)
    }

    /// Assigns both coordinates; `notify` selects whether observers run.
    pub fn set_with(&mut self, xy: impl Into<Operand>, notify: bool) -> &mut Self {
        let (x, y) = xy.into().xy();
        self.assign(x, y, notify);
        self
    }

    /// `set((0, 0))`.
    pub fn zero(&mut self) -> &mut Self {
        self.assign(0.0, 0.0, true);
        self
    }

    /// Same as `set` with an `[x, y]` pair.
    pub fn set_from_array(&mut self, pair: [f64; 2]) -> &mut Self {
        self.assign(pair[0], pair[1], true);
        self
    }

    /// Single write path for the coordinates.
    pub(crate) fn assign(&mut self, x: f64, y: f64, notify: bool) {
        let (x, y) = prepare(x, y, &self.policy);

        if !self.policy.notify_unchanged
            && x.to_bits() == self.x.to_bits()
            && y.to_bits() == self.y.to_bits()
        {
            return;
        }

        // The snapshot is only worth taking if someone will receive it.
        let previous = if notify && !self.observers.is_empty() {
            Some(self.snapshot())
        } else {
            None
        };

        self.x = x;
        self.y = y;
        self.dirty();

        if let Some(previous) = previous {
            self.notify_from(&previous);
        }
    }

    // ---- cache ----

    /// Invalidates every cached derived value.
    #[inline]
    pub fn dirty(&self) {
        self.cache.clear();
    }

    /// `x² + y²`, memoized until the next mutation.
    pub fn length_squared(&self) -> f64 {
        self.cache.length_squared(|| self.x * self.x + self.y * self.y)
    }

    /// Euclidean length, memoized until the next mutation.
    pub fn length(&self) -> f64 {
        self.cache.length(|| self.length_squared().sqrt())
    }

    pub fn cached_length(&self) -> Option<f64> {
        self.cache.cached_length()
    }

    pub fn cached_length_squared(&self) -> Option<f64> {
        self.cache.cached_length_squared()
    }

    // ---- observers ----

    /// Registers `callback`; it runs after every notifying mutation.
    pub fn change<F>(&mut self, callback: F) -> Subscription
    where
        F: Fn(&mut Vec2, &Vec2) + 'static,
    {
        self.observers.subscribe(Rc::new(callback))
    }

    /// Registers an already shared observer.
    pub fn observe(&mut self, observer: Observer) -> Subscription {
        self.observers.subscribe(observer)
    }

    /// Removes one registration. Returns false if it was not registered.
    pub fn ignore(&mut self, subscription: Subscription) -> bool {
        self.observers.unsubscribe(subscription)
    }

    /// Removes every observer.
    pub fn ignore_all(&mut self) -> &mut Self {
        self.observers.clear();
        self
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Runs every observer now, newest first, with the current state as the
    /// "previous" snapshot.
    pub fn notify(&mut self) -> &mut Self {
        if !self.observers.is_empty() {
            let previous = self.snapshot();
            self.notify_from(&previous);
        }
        self
    }

    fn notify_from(&mut self, previous: &Vec2) {
        trace!("notifying {} observers of {} (was {})", self.observers.len(), self, previous);
        let mut bound = self.observers.pass_bound();
        while let Some((subscription, observer)) = self.observers.next_before(bound) {
            bound = subscription.id();
            observer(&mut *self, previous);
        }
    }

    fn snapshot(&self) -> Vec2 {
        #[cfg(test)]
        SNAPSHOTS_TAKEN.with(|n| n.set(n.get() + 1));
        self.clone()
    }

    // ---- interchange ----

    pub fn to_array(&self) -> [f64; 2] {
        [self.x, self.y]
    }

    pub fn to_point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Applies the policy's value cleaning to incoming coordinates.
#[inline]
fn prepare(x: f64, y: f64, policy: &VectorPolicy) -> (f64, f64) {
    if policy.clean_values {
        (round_to(x, PRECISION_DIGITS), round_to(y, PRECISION_DIGITS))
    } else {
        (x, y)
    }
}

impl Clone for Vec2 {
    /// Copies coordinates, policy and cache; observers stay with the original.
    fn clone(&self) -> Self {
        Vec2 {
            x: self.x,
            y: self.y,
            policy: self.policy,
            cache: self.cache.clone(),
            observers: ObserverList::new(),
        }
    }
}

impl Default for Vec2 {
    fn default() -> Self {
        Vec2::new(0.0, 0.0)
    }
}

/// Exact coordinate comparison. Use [`Vec2::equal`] for tolerance-based checks.
impl PartialEq for Vec2 {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<Point> for Vec2 {
    fn from(p: Point) -> Self {
        Vec2::new(p.x, p.y)
    }
}

impl From<Vec2> for Point {
    fn from(v: Vec2) -> Self {
        v.to_point()
    }
}

impl From<[f64; 2]> for Vec2 {
    fn from(pair: [f64; 2]) -> Self {
        Vec2::from_array(pair)
    }
}

impl From<(f64, f64)> for Vec2 {
    fn from((x, y): (f64, f64)) -> Self {
        Vec2::new(x, y)
    }
}
