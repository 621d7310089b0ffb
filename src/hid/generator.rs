//! Monotonic timestamp-based ID generation.

use std::sync::{Mutex, PoisonError, TryLockError};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::HidConfig;
use crate::hid::encoding::{encode, insert_every, DEFAULT_SEPARATOR};

/// Upper bound on re-reads while waiting for the clock to tick.
const MAX_SPINS: u32 = 1_000;

/// Source of nanosecond timestamps.
pub trait Clock: Send + Sync {
    /// Nanoseconds since the Unix epoch.
    fn now_nanos(&self) -> u64;
}

/// Wall clock backed by [`SystemTime`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_nanos(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_nanos()).unwrap_or(u64::MAX))
            .unwrap_or(0)
    }
}

/// Generates human-readable identifiers that sort by issuance order.
///
/// Every call issues a raw value strictly greater than the previous one
/// from the same generator.
pub struct IdGenerator {
    last: Mutex<u64>,
    clock: Box<dyn Clock>,
}

impl std::fmt::Debug for IdGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut debug = f.debug_struct("IdGenerator");
        match self.last.try_lock() {
            Ok(last) => debug.field("last", &*last),
            Err(TryLockError::Poisoned(poisoned)) => debug.field("last", &*poisoned.into_inner()),
            Err(TryLockError::WouldBlock) => debug.field("last", &format_args!("<locked>")),
        };
        debug.finish_non_exhaustive()
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    /// Create a generator reading the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Create a generator reading the given clock.
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            last: Mutex::new(0),
            clock: Box::new(clock),
        }
    }

    /// Issue the next raw value.
    pub fn next_value(&self) -> u64 {
        // The counter is a plain integer; a panic elsewhere cannot leave it invalid.
        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);

        let mut now = self.clock.now_nanos();
        let mut spins = 0;
        while now == *last && spins < MAX_SPINS {
            std::hint::spin_loop();
            now = self.clock.now_nanos();
            spins += 1;
        }

        let issued = if now > *last { now } else { last.saturating_add(1) };
        *last = issued;
        issued
    }

    /// Generate an identifier.
    ///
    /// With `group_size <= 0` the encoded value is returned as is. Otherwise
    /// `separator` (or [`DEFAULT_SEPARATOR`]) is inserted after every
    /// `group_size` characters.
    pub fn generate(&self, include_uppercase: bool, group_size: i32, separator: Option<char>) -> String {
        let encoded = encode(self.next_value(), include_uppercase);

        match usize::try_from(group_size) {
            Ok(every) if every > 0 => {
                insert_every(&encoded, every, separator.unwrap_or(DEFAULT_SEPARATOR))
            }
            _ => encoded,
        }
    }

    /// Generate an identifier using configured defaults.
    pub fn generate_with(&self, config: &HidConfig) -> String {
        self.generate(config.include_uppercase, config.group_size, config.separator)
    }
}
