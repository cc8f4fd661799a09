use rand::{seq::SliceRandom, Rng};
use std::time::{Duration, Instant};

/// How long each cell takes to fade in
pub(crate) const FADE_DURATION: Duration = Duration::from_millis(1000);

/// Delay between the starts of consecutive cells in a reload
pub(crate) const FADE_STAGGER: Duration = Duration::from_millis(50);

/// Schedules cells fading in from fully transparent to fully opaque.
///
/// A reload fades every cell in a random order, each one starting
/// `FADE_STAGGER` after the previous; a single-cell update fades only that
/// cell, starting immediately.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct FadeAnimator {
    enabled: bool,
    started: Option<Instant>,
    // Per-cell delay after `started`; `None` means the cell is not fading.
    delays: Vec<Option<Duration>>,
}

impl FadeAnimator {
    pub(crate) fn new(enabled: bool) -> Self {
        FadeAnimator {
            enabled,
            started: None,
            delays: Vec::new(),
        }
    }

    pub(crate) fn reload<R: Rng + ?Sized>(&mut self, cell_count: usize, now: Instant, rng: &mut R) {
        if !self.enabled {
            return;
        }
        let mut order = (0..cell_count).collect::<Vec<_>>();
        order.shuffle(rng);
        self.delays = vec![None; cell_count];
        for (position, index) in std::iter::zip(0u32.., order) {
            self.delays[index] = Some(FADE_STAGGER * position);
        }
        self.started = Some(now);
    }

    pub(crate) fn single(&mut self, index: usize, now: Instant) {
        if !self.enabled {
            return;
        }
        self.delays = vec![None; index + 1];
        self.delays[index] = Some(Duration::ZERO);
        self.started = Some(now);
    }

    /// Opacity of the cell at `index` at time `now`, from 0.0 (invisible) to
    /// 1.0 (fully drawn)
    pub(crate) fn opacity(&self, index: usize, now: Instant) -> f64 {
        let Some(started) = self.started else {
            return 1.0;
        };
        let Some(delay) = self.delays.get(index).copied().flatten() else {
            return 1.0;
        };
        let elapsed = now.saturating_duration_since(started);
        let Some(into_fade) = elapsed.checked_sub(delay) else {
            return 0.0;
        };
        let t = (into_fade.as_secs_f64() / FADE_DURATION.as_secs_f64()).clamp(0.0, 1.0);
        ease_in_out(t)
    }

    pub(crate) fn is_running(&self, now: Instant) -> bool {
        let Some(started) = self.started else {
            return false;
        };
        let last = self.delays.iter().flatten().max().copied();
        last.is_some_and(|d| now.saturating_duration_since(started) < d + FADE_DURATION)
    }

    /// Forgets a finished animation
    pub(crate) fn settle(&mut self, now: Instant) {
        if self.started.is_some() && !self.is_running(now) {
            self.started = None;
            self.delays.clear();
        }
    }
}

fn ease_in_out(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}
