use displaydoc::Display;

/// A specialized result type for frame encoding operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur when assembling a transport frame.
#[derive(Clone, Copy, PartialEq, Eq, Display, Debug)]
pub enum Error {
    /// The strip must contain at least one led.
    EmptyStrip,
    /// The frame storage is too small: got {len} bytes, need {need}.
    BufferTooSmall {
        /// Provided storage length.
        len: usize,
        /// Required frame length.
        need: usize,
    },
    /// Led slots up to {end} are addressed, but the strip has only {slots}.
    StripOverflow {
        /// First slot index past the requested range.
        end: usize,
        /// Count of slots in the strip.
        slots: usize,
    },
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
