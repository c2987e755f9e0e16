use std::time::Duration;

/// Identifies one countdown run. Tokens from cancelled runs are never current again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CountdownToken(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountdownEvent {
    /// A whole-second boundary was crossed.
    Tick { remaining_secs: u32 },
    /// The countdown expired; capture `slot` now.
    Fire { slot: usize, token: CountdownToken },
}

#[derive(Clone, Copy, Debug)]
struct Pending {
    slot: usize,
    token: CountdownToken,
    remaining: Duration,
    announced: u32,
}

/// Tick-driven auto-capture countdown.
///
/// The owner advances it with [`AutoCapture::tick`] from whatever clock it runs on; nothing
/// here spawns threads or timers.
#[derive(Clone, Debug, Default)]
pub struct AutoCapture {
    generation: u64,
    pending: Option<Pending>,
}

impl AutoCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting down `secs` for `slot`, replacing any countdown already running.
    pub fn start(&mut self, slot: usize, secs: u32) -> CountdownToken {
        self.generation += 1;
        let token = CountdownToken(self.generation);
        self.pending = Some(Pending {
            slot,
            token,
            remaining: Duration::from_secs(u64::from(secs)),
            announced: secs,
        });
        tracing::debug!(slot, secs, generation = self.generation, "countdown started");
        token
    }

    pub fn tick(&mut self, elapsed: Duration) -> Option<CountdownEvent> {
        let pending = self.pending.as_mut()?;
        pending.remaining = pending.remaining.saturating_sub(elapsed);

        if pending.remaining.is_zero() {
            let Pending { slot, token, .. } = *pending;
            self.pending = None;
            return Some(CountdownEvent::Fire { slot, token });
        }

        let remaining_secs = ceil_secs(pending.remaining);
        if remaining_secs < pending.announced {
            pending.announced = remaining_secs;
            return Some(CountdownEvent::Tick { remaining_secs });
        }
        None
    }

    /// Drop any pending countdown. No `Fire` can follow a cancel.
    pub fn cancel(&mut self) {
        if self.pending.take().is_some() {
            tracing::debug!(generation = self.generation, "countdown cancelled");
        }
        self.generation += 1;
    }

    pub fn is_current(&self, token: CountdownToken) -> bool {
        token.0 == self.generation
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.pending.map(|p| p.remaining)
    }

    pub fn target_slot(&self) -> Option<usize> {
        self.pending.map(|p| p.slot)
    }
}

fn ceil_secs(d: Duration) -> u32 {
    let secs = d.as_secs() + u64::from(d.subsec_nanos() > 0);
    u32::try_from(secs).unwrap_or(u32::MAX)
}

#[cfg(test)]
#[path = "../../tests/unit/capture/countdown.rs"]
mod tests;
