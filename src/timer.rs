use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerKind {
    /// One-shot: cards are hidden when it fires
    Memorize,
    /// Repeating: one recall second has passed
    Countdown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timer {
    kind: TimerKind,
    period: Duration,
    repeating: bool,
    elapsed: Duration,
}

impl Timer {
    pub fn once(kind: TimerKind, after: Duration) -> Self {
        Self {
            kind,
            period: after,
            repeating: false,
            elapsed: Duration::ZERO,
        }
    }

    pub fn every(kind: TimerKind, period: Duration) -> Self {
        Self {
            kind,
            period,
            repeating: true,
            elapsed: Duration::ZERO,
        }
    }

    pub fn kind(&self) -> TimerKind {
        self.kind
    }

    pub fn until_fire(&self) -> Duration {
        self.period.saturating_sub(self.elapsed)
    }
}

/// A timer that fired, along with the part of the time budget it did not use
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fired {
    pub kind: TimerKind,
    pub leftover: Duration,
}

/// Holds at most one armed timer.
///
/// Time only moves when the owner calls [`TimerSlot::advance`], so once a timer
/// is cancelled (or replaced, or the slot is dropped) nothing it scheduled can
/// run anymore.
#[derive(Debug, Default)]
pub struct TimerSlot {
    active: Option<Timer>,
}

impl TimerSlot {
    /// Arms `timer`, cancelling whatever was armed before
    pub fn arm(&mut self, timer: Timer) -> Option<Timer> {
        self.active.replace(timer)
    }

    /// Returns true if a timer was armed
    pub fn cancel(&mut self) -> bool {
        self.active.take().is_some()
    }

    pub fn is_armed(&self) -> bool {
        self.active.is_some()
    }

    pub fn kind(&self) -> Option<TimerKind> {
        self.active.map(|t| t.kind)
    }

    /// Spends up to `budget` on the armed timer. Returns `Some` when it fires;
    /// one-shot timers disarm themselves, repeating ones restart their period.
    pub fn advance(&mut self, budget: Duration) -> Option<Fired> {
        let timer = self.active.as_mut()?;
        let remaining = timer.until_fire();

        if budget < remaining {
            timer.elapsed += budget;
            return None;
        }

        let kind = timer.kind;
        if timer.repeating && !timer.period.is_zero() {
            timer.elapsed = Duration::ZERO;
        } else {
            self.active = None;
        }

        Some(Fired {
            kind,
            leftover: budget - remaining,
        })
    }
}
