//! On-wire encodings of the supported led protocols.
//!
//! Both protocols transmit one data line whose high/low timing encodes the
//! bits; the SPI bus reproduces that timing by replacing every protocol
//! bit with a fixed multi-bit pattern clocked out at the rate returned by
//! [`Protocol::baud_rate`].

use serde::{Deserialize, Serialize};
use smart_leds::RGB8;

use crate::Hertz;

/// SPI byte patterns for the four possible 2-bit groups of a WS2812
/// channel. Each byte spans two protocol bit periods at the 3.2 MHz bus
/// clock.
pub(crate) const WS2812_PATTERNS: [u8; 4] = [0x11, 0x13, 0x31, 0x33];

/// Five bit SPI symbol of a single PL9823 "one" bit.
pub(crate) const PL9823_ONE: u64 = 0b11110;
/// Five bit SPI symbol of a single PL9823 "zero" bit.
pub(crate) const PL9823_ZERO: u64 = 0b10000;

/// Idle line window transmitted after a PL9823 frame.
///
/// 150 zero bytes take about 50 us at the 2.857 MHz bus clock, which the
/// leds interpret as the end of frame latch.
const PL9823_RESET: [u8; 150] = [0; 150];

/// On-wire encoding variant of a led chain.
///
/// The variant is fixed for the lifetime of a [`crate::FrameBuffer`] or a
/// driver built on top of it.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum Protocol {
    /// WS2812 style: every pair of color bits becomes one SPI byte.
    Ws2812,
    /// PL9823 style: every color bit becomes a five bit SPI symbol.
    Pl9823,
}

impl Protocol {
    /// Count of SPI bytes encoding a single 8-bit color channel.
    pub const fn bytes_per_channel(self) -> usize {
        match self {
            Protocol::Ws2812 => 4,
            Protocol::Pl9823 => 5,
        }
    }

    /// Count of SPI bytes encoding a whole led slot.
    pub const fn bytes_per_led(self) -> usize {
        self.bytes_per_channel() * 3
    }

    /// Byte the unaddressed tail of a frame is padded with.
    pub const fn off_byte(self) -> u8 {
        match self {
            // The zero entry of the pattern table.
            Protocol::Ws2812 => WS2812_PATTERNS[0],
            // PL9823 receivers treat a low line as idle.
            Protocol::Pl9823 => 0x00,
        }
    }

    /// Recommended SPI clock rate for this encoding.
    ///
    /// Chosen so that one emitted pattern spans exactly one protocol bit
    /// period: four bus cycles at 3.2 MHz for WS2812 (1.25 us per bit),
    /// five bus cycles at 2.857 MHz for PL9823 (1.75 us per bit).
    pub const fn baud_rate(self) -> Hertz {
        match self {
            Protocol::Ws2812 => Hertz(3_200_000),
            Protocol::Pl9823 => Hertz(2_857_000),
        }
    }

    /// Latch sequence to transmit after the frame; empty if the protocol
    /// does not require one.
    pub const fn reset_sequence(self) -> &'static [u8] {
        match self {
            Protocol::Ws2812 => &[],
            Protocol::Pl9823 => &PL9823_RESET,
        }
    }

    /// Encodes a single channel value into `out`.
    ///
    /// # Panics
    ///
    /// If `out` length differs from [`Self::bytes_per_channel`].
    pub fn encode_channel(self, value: u8, out: &mut [u8]) {
        assert_eq!(out.len(), self.bytes_per_channel());
        match self {
            Protocol::Ws2812 => encode_ws2812(value, out),
            Protocol::Pl9823 => encode_pl9823(value, out),
        }
    }

    /// Encodes a whole color into `out` in the G, R, B wire order.
    ///
    /// # Panics
    ///
    /// If `out` length differs from [`Self::bytes_per_led`].
    pub fn encode_led(self, color: RGB8, out: &mut [u8]) {
        assert_eq!(out.len(), self.bytes_per_led());

        let step = self.bytes_per_channel();
        // The leds expect green first on the wire.
        let wire_order = [color.g, color.r, color.b];
        for (channel, chunk) in wire_order.into_iter().zip(out.chunks_exact_mut(step)) {
            self.encode_channel(channel, chunk);
        }
    }
}

fn encode_ws2812(mut value: u8, out: &mut [u8]) {
    for byte in out.iter_mut() {
        // Consume the value two most significant bits at a time.
        *byte = WS2812_PATTERNS[(value >> 6) as usize];
        value <<= 2;
    }
}

fn encode_pl9823(value: u8, out: &mut [u8]) {
    // Concatenate eight five bit symbols, most significant color bit
    // first, into a single 40 bit stream without alignment gaps.
    let mut stream: u64 = 0;
    for bit in (0..8).rev() {
        let symbol = if value & (1 << bit) != 0 {
            PL9823_ONE
        } else {
            PL9823_ZERO
        };
        stream = (stream << 5) | symbol;
    }
    out.copy_from_slice(&stream.to_be_bytes()[3..]);
}
