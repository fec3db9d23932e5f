use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use tokio::time::{Interval, interval};

/// Terminal events surfaced to the main loop.
#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Tick,
    Resize,
}

/// Merges crossterm's async event stream with a steady tick used to redraw
/// spinners and re-sample the sentinel.
pub struct EventHandler {
    stream: EventStream,
    tick: Interval,
}

impl EventHandler {
    pub fn new(tick_ms: u64) -> Self {
        Self {
            stream: EventStream::new(),
            tick: interval(Duration::from_millis(tick_ms)),
        }
    }

    pub async fn next(&mut self) -> Result<Event> {
        loop {
            tokio::select! {
                _ = self.tick.tick() => return Ok(Event::Tick),
                maybe = self.stream.next() => match maybe {
                    Some(Ok(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                        return Ok(Event::Key(key));
                    }
                    Some(Ok(CrosstermEvent::Resize(_, _))) => return Ok(Event::Resize),
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => return Err(e.into()),
                    None => return Ok(Event::Tick),
                },
            }
        }
    }
}
