//! Platform collaborator traits.
//!
//! The library owns scheduling and schedule exchange; audio output, haptic
//! feedback and code rendering stay with the embedding platform. Hosts
//! implement these traits and hand them to the scheduler and exchange paths.

use uuid::Uuid;

use crate::error::{PlaybackError, RenderError};

/// Token identifying one playback started through [`Playback::play`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaybackHandle(Uuid);

impl PlaybackHandle {
    /// Mint a fresh handle. Called by `Playback` implementations.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// The embedding platform's audio output.
/// Driven from the scheduler task, so implementations must be `Send`.
pub trait Playback: Send {
    /// Start playing the named sound resource. Returns a handle the
    /// scheduler uses to stop the sound when the alert ends.
    fn play(&mut self, resource: &str) -> Result<PlaybackHandle, PlaybackError>;

    /// Stop a playback previously returned by [`play`](Playback::play).
    /// Stopping a handle whose sound already finished is a no-op.
    fn stop(&mut self, handle: PlaybackHandle);
}

/// The embedding platform's haptic feedback.
pub trait Haptics: Send {
    /// Emit one short vibration pulse.
    fn vibrate(&mut self);
}

/// Renders an exchange payload into a scannable visual code.
pub trait CodeRenderer {
    /// Image type produced by this renderer.
    type Image;

    /// Render the payload into a code image roughly `size` pixels on a side.
    fn render(&self, payload: &[u8], size: u32) -> Result<Self::Image, RenderError>;
}
