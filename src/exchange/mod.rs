//! Schedule exchange between devices.
//!
//! A schedule travels as a JSON array of canonical `HH:MM` strings, rendered
//! into a scannable code on the sharing device and decoded back on the
//! scanning device. [`ExchangeCodec`] owns the wire format; the share path
//! gates on policy before rendering; [`ScanInbox`] handles deliveries from
//! the platform's capture layer.

mod capture;
mod codec;
mod share;

pub use capture::{ScanInbox, ScanReport};
pub use codec::ExchangeCodec;
pub use share::render_schedule_code;
