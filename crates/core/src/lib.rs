#![cfg_attr(not(any(feature = "std", test)), no_std)]

//! Frame encoding core for SPI driven addressable led tapes.
//!
//! WS2812 and PL9823 leds speak self clocked single wire protocols; an SPI
//! peripheral can emulate them by spending several bus clock cycles per
//! protocol bit. This crate turns RGB colors into the exact byte stream
//! such an emulation has to clock out: [`Protocol`] encodes single
//! channels, [`FrameBuffer`] assembles whole transport frames over caller
//! provided storage.

pub use errors::{Error, Result};
pub use framebuffer::{frame_len, FrameBuffer};
pub use protocol::Protocol;
pub use smart_leds::RGB8;

pub mod errors;
pub mod framebuffer;
pub mod protocol;
pub mod test_utils;

use serde::{Deserialize, Serialize};

/// A frequency newtype in Hertz.
#[derive(
    Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, PartialOrd, Ord, Hash, Default,
)]
pub struct Hertz(pub u32);

impl core::fmt::Display for Hertz {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} Hz", self.0)
    }
}

/// Static configuration of a led strip.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct StripConfig {
    /// Count of leds in the chain.
    pub led_count: u16,
    /// Light intensity scale factor, conventionally up to 1.0.
    ///
    /// The factor is not clamped; see [`FrameBuffer`] for the saturation
    /// semantics of overdriven channels.
    pub intensity: f32,
    /// On-wire encoding of the connected leds.
    pub protocol: Protocol,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            led_count: 1,
            intensity: 1.0,
            protocol: Protocol::Ws2812,
        }
    }
}

impl StripConfig {
    /// Returns a configuration for the given chain length, keeping the
    /// remaining parameters at their defaults.
    pub fn with_led_count(led_count: u16) -> Self {
        Self {
            led_count,
            ..Self::default()
        }
    }
}
