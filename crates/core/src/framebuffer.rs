//! Transport frame assembly.

use smart_leds::RGB8;

use crate::{
    errors::{Error, Result},
    protocol::Protocol,
    StripConfig,
};

/// Transport frame length in bytes for the given chain length.
pub const fn frame_len(protocol: Protocol, led_count: usize) -> usize {
    led_count * protocol.bytes_per_led()
}

/// Pre-rendered transport frame of a led chain.
///
/// The frame occupies the first [`frame_len`] bytes of the caller provided
/// storage and is never reallocated. After every [`Self::fill_and_pad`]
/// call each frame byte holds either an encoded color or the protocol's
/// off symbol, so no stale state from a previous frame survives.
#[derive(Debug)]
pub struct FrameBuffer<B> {
    buf: B,
    led_count: usize,
    intensity: f32,
    protocol: Protocol,
}

impl<B> FrameBuffer<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Creates a frame over the given storage.
    ///
    /// The storage may be any byte container of at least [`frame_len`]
    /// bytes: a fixed array, a static buffer or a heap vector.
    pub fn new(config: StripConfig, buf: B) -> Result<Self> {
        let led_count = usize::from(config.led_count);
        if led_count == 0 {
            return Err(Error::EmptyStrip);
        }

        let need = frame_len(config.protocol, led_count);
        let len = buf.as_ref().len();
        if len < need {
            return Err(Error::BufferTooSmall { len, need });
        }

        Ok(Self {
            buf,
            led_count,
            intensity: config.intensity,
            protocol: config.protocol,
        })
    }

    /// Count of led slots in the frame.
    pub const fn led_count(&self) -> usize {
        self.led_count
    }

    /// On-wire encoding of the frame.
    pub const fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// Current intensity scale factor.
    pub const fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Changes the intensity applied to subsequently encoded colors.
    ///
    /// Already encoded frame bytes are left as is until the next fill.
    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = intensity;
    }

    /// Encoded frame bytes, exactly [`frame_len`] of them.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf.as_ref()[..frame_len(self.protocol, self.led_count)]
    }

    /// Releases the frame storage.
    pub fn into_storage(self) -> B {
        self.buf
    }

    /// Encodes `colors` into the led slots starting at `start`.
    ///
    /// Returns the index of the first slot past the written range. Bytes
    /// outside that range are left untouched, as is the whole frame when
    /// the colors do not fit.
    pub fn fill(&mut self, colors: &[RGB8], start: usize) -> Result<usize> {
        let end = start + colors.len();
        if end > self.led_count {
            return Err(Error::StripOverflow {
                end,
                slots: self.led_count,
            });
        }

        let step = self.protocol.bytes_per_led();
        let mut offset = start * step;
        for color in colors {
            let scaled = scale_color(*color, self.intensity);
            self.protocol
                .encode_led(scaled, &mut self.buf.as_mut()[offset..offset + step]);
            offset += step;
        }

        // The cursor is derived from the byte offset actually reached.
        Ok(offset / step)
    }

    /// Encodes `colors` from the first slot on and switches every
    /// remaining slot off.
    pub fn fill_and_pad(&mut self, colors: &[RGB8]) -> Result<()> {
        let end = self.fill(colors, 0)?;

        let step = self.protocol.bytes_per_led();
        let total = frame_len(self.protocol, self.led_count);
        let off = self.protocol.off_byte();
        self.buf.as_mut()[end * step..total].fill(off);
        Ok(())
    }
}

/// Applies the intensity factor to a single channel.
///
/// The product is floored and saturated into the byte range: overdriven
/// channels clamp to 255, negative and NaN products collapse to 0.
fn scale_channel(value: u8, intensity: f32) -> u8 {
    (f32::from(value) * intensity) as u8
}

fn scale_color(color: RGB8, intensity: f32) -> RGB8 {
    RGB8::new(
        scale_channel(color.r, intensity),
        scale_channel(color.g, intensity),
        scale_channel(color.b, intensity),
    )
}
