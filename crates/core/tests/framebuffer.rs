use pixeltape_core::{
    frame_len, test_utils::decode_led, Error, FrameBuffer, Protocol, StripConfig, RGB8,
};

fn config(led_count: u16, protocol: Protocol) -> StripConfig {
    StripConfig {
        led_count,
        protocol,
        ..StripConfig::default()
    }
}

#[test]
fn test_frame_len() {
    assert_eq!(frame_len(Protocol::Ws2812, 4), 48);
    assert_eq!(frame_len(Protocol::Pl9823, 4), 60);
}

#[test]
fn test_construction_errors() {
    let err = FrameBuffer::new(config(0, Protocol::Ws2812), [0_u8; 0]).unwrap_err();
    assert_eq!(err, Error::EmptyStrip);

    let err = FrameBuffer::new(config(2, Protocol::Ws2812), [0_u8; 12]).unwrap_err();
    assert_eq!(err, Error::BufferTooSmall { len: 12, need: 24 });
}

#[test]
fn test_pad_empty_ws2812_frame() {
    let config = StripConfig::with_led_count(4);
    let mut frame = FrameBuffer::new(config, [0xAA_u8; 48]).unwrap();
    assert_eq!(frame.led_count(), 4);
    assert_eq!(frame.protocol(), Protocol::Ws2812);
    assert_eq!(frame.intensity(), 1.0);

    frame.fill_and_pad(&[]).unwrap();

    assert_eq!(frame.as_bytes().len(), 48);
    assert!(frame.as_bytes().iter().all(|byte| *byte == 0x11));
}

#[test]
fn test_pad_empty_pl9823_frame() {
    let mut frame = FrameBuffer::new(config(4, Protocol::Pl9823), [0xAA_u8; 60]).unwrap();
    frame.fill_and_pad(&[]).unwrap();

    assert!(frame.as_bytes().iter().all(|byte| *byte == 0x00));
}

#[test]
fn test_partial_fill_touches_only_the_addressed_slots() {
    let mut frame = FrameBuffer::new(config(3, Protocol::Ws2812), [0xAA_u8; 36]).unwrap();

    let next = frame.fill(&[RGB8::new(255, 0, 0)], 1).unwrap();
    assert_eq!(next, 2);

    let bytes = frame.as_bytes();
    assert!(bytes[..12].iter().all(|byte| *byte == 0xAA));
    assert!(bytes[24..].iter().all(|byte| *byte == 0xAA));
    assert_eq!(
        decode_led(Protocol::Ws2812, &bytes[12..24]),
        RGB8::new(255, 0, 0)
    );
}

#[test]
fn test_overflow_leaves_the_frame_untouched() {
    let mut frame = FrameBuffer::new(config(2, Protocol::Ws2812), [0xAA_u8; 24]).unwrap();
    let colors = [RGB8::new(1, 2, 3); 3];

    let err = frame.fill(&colors, 0).unwrap_err();
    assert_eq!(err, Error::StripOverflow { end: 3, slots: 2 });
    assert!(frame.as_bytes().iter().all(|byte| *byte == 0xAA));

    // The same applies to an in-range count at an offset past the end.
    let err = frame.fill(&colors[..2], 1).unwrap_err();
    assert_eq!(err, Error::StripOverflow { end: 3, slots: 2 });
    assert!(frame.as_bytes().iter().all(|byte| *byte == 0xAA));

    let err = frame.fill_and_pad(&colors).unwrap_err();
    assert_eq!(err, Error::StripOverflow { end: 3, slots: 2 });
    assert!(frame.as_bytes().iter().all(|byte| *byte == 0xAA));
}

#[test]
fn test_intensity_scaling_floors_before_encoding() {
    let mut config = config(1, Protocol::Ws2812);
    config.intensity = 0.5;
    let mut frame = FrameBuffer::new(config, [0_u8; 12]).unwrap();

    frame.fill_and_pad(&[RGB8::new(200, 0, 201)]).unwrap();
    assert_eq!(
        decode_led(Protocol::Ws2812, frame.as_bytes()),
        RGB8::new(100, 0, 100)
    );
}

#[test]
fn test_out_of_range_intensity_is_saturated() {
    let mut frame = FrameBuffer::new(config(1, Protocol::Ws2812), [0_u8; 12]).unwrap();

    frame.set_intensity(2.0);
    frame.fill_and_pad(&[RGB8::new(200, 1, 0)]).unwrap();
    assert_eq!(
        decode_led(Protocol::Ws2812, frame.as_bytes()),
        RGB8::new(255, 2, 0)
    );

    frame.set_intensity(-1.0);
    frame.fill_and_pad(&[RGB8::new(200, 1, 0)]).unwrap();
    assert_eq!(
        decode_led(Protocol::Ws2812, frame.as_bytes()),
        RGB8::new(0, 0, 0)
    );
}

#[test]
fn test_cursor_is_derived_from_the_reached_offset() {
    let mut frame = FrameBuffer::new(config(5, Protocol::Pl9823), [0_u8; 75]).unwrap();

    assert_eq!(frame.fill(&[], 0).unwrap(), 0);
    assert_eq!(frame.fill(&[RGB8::new(1, 1, 1); 2], 0).unwrap(), 2);
    assert_eq!(frame.fill(&[RGB8::new(1, 1, 1); 2], 3).unwrap(), 5);
}

#[test]
fn test_oversized_storage_keeps_the_frame_exact() {
    let mut frame = FrameBuffer::new(config(1, Protocol::Ws2812), vec![0xAA_u8; 64]).unwrap();
    frame.fill_and_pad(&[]).unwrap();

    assert_eq!(frame.as_bytes().len(), 12);

    // Storage past the frame is not part of the transmission and stays
    // untouched.
    let storage = frame.into_storage();
    assert!(storage[12..].iter().all(|byte| *byte == 0xAA));
}
