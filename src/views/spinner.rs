use std::time::Instant;

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const FRAME_MS: u128 = 80;

/// Current spinner frame with label, keyed off the load start time so the
/// animation advances on every redraw tick.
pub fn spinner_frame(start: Option<Instant>) -> String {
    let Some(start) = start else {
        return String::new();
    };
    let idx = (start.elapsed().as_millis() / FRAME_MS) as usize % FRAMES.len();
    format!("{} loading", FRAMES[idx])
}
