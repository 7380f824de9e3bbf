#![cfg_attr(not(any(feature = "std", test)), no_std)]

//! Blocking SPI transport driver for WS2812 and PL9823 led tapes.
//!
//! The driver owns a pre-rendered transport frame and an injected
//! [`SpiBus`] implementation. Showing colors is a fixed sequence: encode
//! into the frame storage, clock the frame out, clock the latch window
//! out where the protocol requires one, then drain the bus.

use displaydoc::Display;
use embedded_hal::spi::{Mode, SpiBus, MODE_1};
use pixeltape_core::{FrameBuffer, Protocol, StripConfig, RGB8};

/// The SPI mode the strip signal emulation expects: idle low clock, data
/// sampled on the trailing edge.
pub const MODE: Mode = MODE_1;

/// A specialized result type for strip driver operations.
pub type Result<T, E> = core::result::Result<T, Error<E>>;

/// Errors that can occur when driving a led strip.
#[derive(Clone, Copy, PartialEq, Eq, Display, Debug)]
pub enum Error<E> {
    /// Frame encoding failed.
    Frame(pixeltape_core::Error),
    /// SPI transport failure.
    Transport(E),
}

impl<E> From<pixeltape_core::Error> for Error<E> {
    fn from(inner: pixeltape_core::Error) -> Self {
        Self::Frame(inner)
    }
}

#[cfg(feature = "std")]
impl<E: core::fmt::Debug> std::error::Error for Error<E> {}

/// Driver of a single WS2812 or PL9823 led chain behind an SPI bus.
///
/// The chain length, protocol variant and frame storage are fixed at
/// construction; [`Self::show`] rewrites and retransmits the whole frame
/// synchronously on the calling thread. The driver takes `&mut self`
/// throughout, so concurrent access has to be serialized by the caller.
#[derive(Debug)]
pub struct StripDriver<S, B> {
    spi: S,
    frame: FrameBuffer<B>,
}

impl<S, B> StripDriver<S, B>
where
    S: SpiBus<u8>,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Creates a driver over the given bus and switches the whole chain
    /// off.
    ///
    /// The bus must already be configured with [`MODE`] and the
    /// [`Protocol::baud_rate`] of the chosen protocol.
    pub fn new(spi: S, config: StripConfig, buf: B) -> Result<Self, S::Error> {
        let frame = FrameBuffer::new(config, buf)?;
        let mut driver = Self { spi, frame };
        log::debug!(
            "created a strip driver: {} leds, {:?}",
            driver.frame.led_count(),
            driver.frame.protocol(),
        );

        // Leds keep their previous state until addressed, so start dark.
        driver.show(&[])?;
        Ok(driver)
    }

    /// Shows the given colors on the chain.
    ///
    /// Leds past `colors.len()` are switched off. Supplying more colors
    /// than the chain has leds is an error and leaves both the frame and
    /// the chain untouched.
    pub fn show(&mut self, colors: &[RGB8]) -> Result<(), S::Error> {
        self.frame.fill_and_pad(colors)?;
        self.transmit()
    }

    /// Switches the whole chain off.
    pub fn clear(&mut self) -> Result<(), S::Error> {
        self.show(&[])
    }

    /// Encodes `colors` into the frame starting at the `start` slot
    /// without transmitting anything.
    ///
    /// Returns the index of the first slot past the written range.
    /// Combine with [`Self::refresh`] to transmit the accumulated frame.
    pub fn fill(&mut self, colors: &[RGB8], start: usize) -> pixeltape_core::Result<usize> {
        self.frame.fill(colors, start)
    }

    /// Retransmits the current frame without re-encoding it.
    pub fn refresh(&mut self) -> Result<(), S::Error> {
        self.transmit()
    }

    /// Changes the intensity applied to subsequently encoded colors.
    pub fn set_intensity(&mut self, intensity: f32) {
        self.frame.set_intensity(intensity);
    }

    /// Count of leds in the chain.
    pub fn led_count(&self) -> usize {
        self.frame.led_count()
    }

    /// On-wire protocol of the chain.
    pub fn protocol(&self) -> Protocol {
        self.frame.protocol()
    }

    /// Releases the bus and the frame storage.
    pub fn release(self) -> (S, B) {
        (self.spi, self.frame.into_storage())
    }

    fn transmit(&mut self) -> Result<(), S::Error> {
        log::trace!("transmitting {} frame bytes", self.frame.as_bytes().len());
        self.spi
            .write(self.frame.as_bytes())
            .map_err(Error::Transport)?;

        let reset = self.frame.protocol().reset_sequence();
        if !reset.is_empty() {
            // Without the latch window the last led may not pick up the
            // new state.
            self.spi.write(reset).map_err(Error::Transport)?;
        }

        // Return only once the bytes are physically clocked out.
        self.spi.flush().map_err(Error::Transport)
    }
}
