//! Facade over the embedded video player.
//!
//! The player itself runs in the browser. The server learns that it is live
//! when a request reports a playback position, and asks it to seek by
//! rendering the next page with a start offset.

use crate::timestamp::sanitize_offset;

/// Operations the embedded player supports once it is ready.
pub trait PlayerHandle {
    fn current_time(&self) -> f64;
    fn seek_to(&mut self, seconds: f64);
}

/// Player handle driven by positions the browser reports.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmbeddedPlayer {
    position: f64,
    pending_seek: Option<f64>,
}

impl EmbeddedPlayer {
    pub fn at(position: f64) -> Self {
        Self {
            position: sanitize_offset(position),
            pending_seek: None,
        }
    }

    pub fn report_position(&mut self, seconds: f64) {
        self.position = sanitize_offset(seconds);
    }

    /// Offset the next rendered page should start at, if a seek was requested.
    pub fn take_pending_seek(&mut self) -> Option<f64> {
        self.pending_seek.take()
    }
}

impl PlayerHandle for EmbeddedPlayer {
    fn current_time(&self) -> f64 {
        self.position
    }

    fn seek_to(&mut self, seconds: f64) {
        let target = sanitize_offset(seconds);
        self.position = target;
        self.pending_seek = Some(target);
    }
}

/// Holds the player handle from the `ready` signal on.
#[derive(Debug, Clone)]
pub struct PlayerAdapter<H: PlayerHandle> {
    handle: Option<H>,
}

impl<H: PlayerHandle> Default for PlayerAdapter<H> {
    fn default() -> Self {
        Self { handle: None }
    }
}

impl<H: PlayerHandle> PlayerAdapter<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal that the player finished initializing.
    pub fn ready(&mut self, handle: H) {
        self.handle = Some(handle);
    }

    pub fn is_ready(&self) -> bool {
        self.handle.is_some()
    }

    /// Current playback offset; `None` before `ready`.
    pub fn current_time(&self) -> Option<f64> {
        self.handle.as_ref().map(|h| h.current_time())
    }

    /// Seek the player. Before `ready` this does nothing and returns `false`.
    pub fn seek_to(&mut self, seconds: f64) -> bool {
        match self.handle.as_mut() {
            Some(handle) => {
                handle.seek_to(seconds);
                true
            }
            None => false,
        }
    }

    pub fn handle_mut(&mut self) -> Option<&mut H> {
        self.handle.as_mut()
    }

    /// Forget the player, e.g. when a different video is loaded.
    pub fn reset(&mut self) {
        self.handle = None;
    }
}
