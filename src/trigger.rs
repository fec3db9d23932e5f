//! Edge-triggered visibility detection for a sentinel row in a scrolling
//! viewport.
//!
//! A [`SentinelTrigger`] watches one band of content rows (the sentinel placed
//! after the last rendered item) and invokes its callback exactly once each
//! time that band scrolls into the visible root. The render pass reports the
//! sentinel and root geometry every frame via [`SentinelTrigger::observe`];
//! the trigger owns the intersection math, the edge detection, and an
//! enable/disable gate so the callback cannot fire while the owner is busy.
//!
//! The trigger performs no I/O and knows nothing about pages or providers;
//! its only side effect is invoking the supplied callback.

use tracing::trace;

/// A vertical band of rows in content coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowBand {
    pub top: usize,
    pub height: usize,
}

impl RowBand {
    pub const fn new(top: usize, height: usize) -> Self {
        Self { top, height }
    }

    fn bottom(&self) -> usize {
        self.top + self.height
    }

    /// Number of rows shared with `other`.
    fn overlap(&self, other: &RowBand) -> usize {
        let top = self.top.max(other.top);
        let bottom = self.bottom().min(other.bottom());
        bottom.saturating_sub(top)
    }

    /// Grows the band by `margin` rows on each side, clamped at row zero.
    fn expand(&self, margin: u16) -> RowBand {
        let margin = margin as usize;
        let top = self.top.saturating_sub(margin);
        RowBand {
            top,
            height: self.bottom() + margin - top,
        }
    }
}

/// Measurement options for the intersection test.
#[derive(Debug, Clone, Copy)]
pub struct ObserverOptions {
    /// Extra rows added above and below the root before testing, so the
    /// callback can fire shortly before the sentinel is strictly on screen.
    pub root_margin: u16,
    /// Fraction of the sentinel that must be visible to count as
    /// intersecting. Zero means any overlap counts.
    pub threshold: f64,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            root_margin: 0,
            threshold: 0.0,
        }
    }
}

/// One live observation. Holds only the last sampled intersection state; a
/// fresh observation starts with no history, so a sentinel that is already
/// visible when observation begins fires on the first sample.
#[derive(Debug, Default)]
struct Observation {
    intersecting: bool,
}

/// Watches a sentinel band and fires a callback once per transition into
/// view, while enabled.
pub struct SentinelTrigger {
    callback: Box<dyn FnMut() + Send>,
    enabled: bool,
    options: ObserverOptions,
    observation: Option<Observation>,
}

impl SentinelTrigger {
    /// Creates a trigger bound to `callback`, gated by `enabled`.
    pub fn attach(callback: Box<dyn FnMut() + Send>, enabled: bool) -> Self {
        Self::with_options(callback, enabled, ObserverOptions::default())
    }

    pub fn with_options(
        callback: Box<dyn FnMut() + Send>,
        enabled: bool,
        options: ObserverOptions,
    ) -> Self {
        Self {
            callback,
            enabled,
            options,
            observation: None,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// True while a live observation exists. Exposed so owners (and tests)
    /// can verify the release-on-deactivate contract.
    pub fn is_observing(&self) -> bool {
        self.observation.is_some()
    }

    /// Gates the trigger. Any change of the flag releases the current
    /// observation; enabling starts a fresh one on the next sample, which
    /// fires immediately if the sentinel is already in view.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            self.enabled = enabled;
            self.release(if enabled { "re-enabled" } else { "disabled" });
        }
    }

    /// Replaces the callback. The observation is re-established from scratch,
    /// exactly as if the trigger had been toggled off and on.
    pub fn set_callback(&mut self, callback: Box<dyn FnMut() + Send>) {
        self.callback = callback;
        self.release("callback replaced");
    }

    /// Explicit teardown of the observation.
    pub fn detach(&mut self) {
        self.release("detached");
    }

    /// Samples the sentinel against the root for this frame.
    ///
    /// `element` is the sentinel's current band, or `None` when nothing is
    /// attached yet (not an error; there is simply nothing to watch). Fires
    /// the callback on each non-intersecting-to-intersecting transition.
    pub fn observe(&mut self, element: Option<RowBand>, root: RowBand) {
        if !self.enabled {
            self.release("disabled");
            return;
        }
        let Some(element) = element else {
            self.release("no element");
            return;
        };

        let obs = self.observation.get_or_insert_default();
        let now = is_intersecting(&element, &root, &self.options);
        let fired = now && !obs.intersecting;
        obs.intersecting = now;
        if fired {
            trace!(?element, ?root, "sentinel entered view");
            (self.callback)();
        }
    }

    fn release(&mut self, reason: &str) {
        if self.observation.take().is_some() {
            trace!(reason, "released sentinel observation");
        }
    }
}

fn is_intersecting(element: &RowBand, root: &RowBand, options: &ObserverOptions) -> bool {
    let overlap = element.overlap(&root.expand(options.root_margin));
    if overlap == 0 {
        return false;
    }
    if options.threshold <= 0.0 {
        return true;
    }
    let ratio = overlap as f64 / element.height.max(1) as f64;
    ratio >= options.threshold
}

impl std::fmt::Debug for SentinelTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentinelTrigger")
            .field("enabled", &self.enabled)
            .field("observing", &self.observation.is_some())
            .finish()
    }
}
