use crate::error::{CoreError, EncodeError};
use crate::platform::CodeRenderer;
use crate::schedule::BreakTime;

use super::ExchangeCodec;

/// Render a schedule into a scannable code image.
///
/// Gates run before any pixels: fewer entries than the configured minimum
/// is rejected outright, and an over-capacity payload is rejected by the
/// codec. The renderer is only invoked once a valid payload exists, so a
/// failed share leaves whatever the host currently displays unchanged.
pub fn render_schedule_code<R: CodeRenderer>(
    codec: &ExchangeCodec,
    renderer: &R,
    times: &[BreakTime],
    size: u32,
) -> Result<R::Image, CoreError> {
    let min = codec.config().min_share_entries;
    if times.len() < min {
        return Err(EncodeError::TooFewEntries {
            count: times.len(),
            min,
        }
        .into());
    }
    let payload = codec.encode(times)?;
    Ok(renderer.render(&payload, size)?)
}
