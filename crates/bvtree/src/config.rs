/// How many times a [`Driver`](crate::Driver) steps its tree per tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TickPolicy {
    /// Exactly one `update` per tick.
    #[default]
    Once,

    /// Keep calling `update` while it returns `Pending`, up to
    /// [`DriverConfig::max_updates_per_tick`] calls.
    UntilSettled,
}

/// Driver configuration and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DriverConfig {
    pub policy: TickPolicy,

    /// Upper bound on `update` calls in one tick under
    /// [`TickPolicy::UntilSettled`]. Values below 1 are treated as 1.
    pub max_updates_per_tick: u32,

    /// Reset the tree after it finishes so the next tick starts a fresh
    /// activation instead of repeating the finished one.
    pub reset_on_completion: bool,
}

impl DriverConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_UPDATES_PER_TICK: u32 = 1;

    /// Creates the default configuration: one update per tick, no reset.
    pub fn new() -> Self {
        Self {
            policy: TickPolicy::Once,
            max_updates_per_tick: Self::DEFAULT_MAX_UPDATES_PER_TICK,
            reset_on_completion: false,
        }
    }

    /// Steps up to `max_updates` times per tick while the tree is pending.
    pub fn until_settled(max_updates: u32) -> Self {
        Self {
            policy: TickPolicy::UntilSettled,
            max_updates_per_tick: max_updates,
            ..Self::new()
        }
    }

    /// Sets [`reset_on_completion`](Self::reset_on_completion).
    #[must_use]
    pub fn with_reset_on_completion(mut self, reset: bool) -> Self {
        self.reset_on_completion = reset;
        self
    }

    /// Number of `update` calls a single tick may make.
    pub fn updates_per_tick(&self) -> u32 {
        match self.policy {
            TickPolicy::Once => 1,
            TickPolicy::UntilSettled => self.max_updates_per_tick.max(1),
        }
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self::new()
    }
}
