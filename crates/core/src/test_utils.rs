//! Reference decoders reversing the on-wire encodings.
//!
//! Used by the crate tests to verify round-trip properties and handy for
//! host side inspection of captured SPI streams.

use smart_leds::RGB8;

use crate::protocol::{Protocol, PL9823_ONE, PL9823_ZERO, WS2812_PATTERNS};

/// Decodes a single channel value back from its on-wire bytes.
///
/// # Panics
///
/// If `bytes` is not a valid encoding of any channel value.
pub fn decode_channel(protocol: Protocol, bytes: &[u8]) -> u8 {
    assert_eq!(bytes.len(), protocol.bytes_per_channel());
    match protocol {
        Protocol::Ws2812 => decode_ws2812(bytes),
        Protocol::Pl9823 => decode_pl9823(bytes),
    }
}

/// Decodes a whole led slot back into a color, undoing the G, R, B wire
/// order.
///
/// # Panics
///
/// If `bytes` is not a valid encoding of any color.
pub fn decode_led(protocol: Protocol, bytes: &[u8]) -> RGB8 {
    assert_eq!(bytes.len(), protocol.bytes_per_led());

    let step = protocol.bytes_per_channel();
    let green = decode_channel(protocol, &bytes[..step]);
    let red = decode_channel(protocol, &bytes[step..2 * step]);
    let blue = decode_channel(protocol, &bytes[2 * step..]);
    RGB8::new(red, green, blue)
}

fn decode_ws2812(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0, |value, byte| {
        let group = WS2812_PATTERNS
            .iter()
            .position(|pattern| pattern == byte)
            .expect("not a WS2812 pattern byte");
        (value << 2) | group as u8
    })
}

fn decode_pl9823(bytes: &[u8]) -> u8 {
    let mut padded = [0_u8; 8];
    padded[3..].copy_from_slice(bytes);
    let mut stream = u64::from_be_bytes(padded);

    let mut value = 0_u8;
    for _ in 0..8 {
        let bit = match (stream >> 35) & 0b11111 {
            PL9823_ONE => 1,
            PL9823_ZERO => 0,
            other => panic!("not a PL9823 symbol: {other:#07b}"),
        };
        value = (value << 1) | bit;
        stream <<= 5;
    }
    value
}
