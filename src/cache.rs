//! Single-slot, time-bounded memoization of the language aggregate.
//!
//! The cache holds at most one value together with the moment it was computed.
//! Once the entry is older than the TTL the next read recomputes it. Time comes
//! from a [`Clock`], so expiry can be driven by hand in tests.

use chrono::{DateTime, Duration, Utc};

/// Default freshness window, in seconds.
pub const DEFAULT_TTL_SECS: i64 = 3600;

pub fn default_ttl() -> Duration {
    Duration::seconds(DEFAULT_TTL_SECS)
}

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// The stored value and when it was computed.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<T> {
    pub value: T,
    pub computed_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct TtlCache<T, C = SystemClock> {
    ttl: Duration,
    clock: C,
    entry: Option<CacheEntry<T>>,
}

impl<T> TtlCache<T, SystemClock> {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, SystemClock)
    }
}

impl<T, C: Clock> TtlCache<T, C> {
    pub fn with_clock(ttl: Duration, clock: C) -> Self {
        Self {
            ttl,
            clock,
            entry: None,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn entry(&self) -> Option<&CacheEntry<T>> {
        self.entry.as_ref()
    }

    /// When the current entry stops being fresh.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.entry.as_ref().map(|e| e.computed_at + self.ttl)
    }

    /// True when an entry exists and its age does not exceed the TTL.
    pub fn is_fresh(&self) -> bool {
        match &self.entry {
            Some(e) => self.clock.now() - e.computed_at <= self.ttl,
            None => false,
        }
    }

    /// Drop the entry; the next read recomputes.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// Compute a new value regardless of freshness. The slot is replaced only
    /// on success; on error the previous entry stays.
    pub fn refresh<E, F>(&mut self, compute: F) -> Result<&T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let value = compute()?;
        let computed_at = self.clock.now();
        Ok(&self.entry.insert(CacheEntry { value, computed_at }).value)
    }

    /// Return the stored value, or compute and store a new one if the slot is
    /// empty or stale. A failed computation leaves the slot untouched.
    pub fn get_or_try_compute<E, F>(&mut self, compute: F) -> Result<&T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let stale = if self.is_fresh() {
            None
        } else {
            self.entry.take()
        };
        match self.entry {
            Some(ref e) => Ok(&e.value),
            None => match compute() {
                Ok(value) => {
                    let computed_at = self.clock.now();
                    Ok(&self.entry.insert(CacheEntry { value, computed_at }).value)
                }
                Err(e) => {
                    self.entry = stale;
                    Err(e)
                }
            },
        }
    }
}
