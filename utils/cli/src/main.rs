use std::{fs, path::PathBuf};

use anyhow::{bail, Context};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use pixeltape_core::{frame_len, FrameBuffer, Protocol, StripConfig, RGB8};

/// Pixeltape frame encoding utility
///
/// A command line application that renders RGB colors into the raw SPI byte
/// stream expected by WS2812 and PL9823 led tapes.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = false)]
struct Cli {
    /// Actual command
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProtocolArg {
    Ws2812,
    Pl9823,
}

impl From<ProtocolArg> for Protocol {
    fn from(arg: ProtocolArg) -> Self {
        match arg {
            ProtocolArg::Ws2812 => Protocol::Ws2812,
            ProtocolArg::Pl9823 => Protocol::Pl9823,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Encode colors into a transport frame
    Encode {
        /// Count of leds in the chain
        #[arg(short, long, default_value = "8")]
        leds: u16,
        /// Led protocol variant
        #[arg(short, long, value_enum, default_value_t = ProtocolArg::Ws2812)]
        protocol: ProtocolArg,
        /// Intensity scale factor
        #[arg(short, long, default_value = "1.0")]
        intensity: f32,
        /// Write the raw frame into the file instead of dumping it
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Led colors in RRGGBB hex notation, one per led
        #[arg(value_name = "COLOR")]
        colors: Vec<String>,
    },
    /// Print the transport parameters of a protocol variant
    Info {
        /// Count of leds in the chain
        #[arg(short, long, default_value = "8")]
        leds: u16,
        /// Led protocol variant
        #[arg(short, long, value_enum, default_value_t = ProtocolArg::Ws2812)]
        protocol: ProtocolArg,
    },
    /// Generate shell completions
    Completions {
        /// The shell to generate the completions for
        #[arg(value_enum)]
        shell: clap_complete_command::Shell,
    },
}

fn parse_color(value: &str) -> anyhow::Result<RGB8> {
    let digits = value.trim_start_matches('#');
    if digits.len() != 6 {
        bail!("`{value}` is not a RRGGBB hex color");
    }
    let raw = u32::from_str_radix(digits, 16)
        .with_context(|| format!("`{value}` is not a RRGGBB hex color"))?;
    Ok(RGB8::new((raw >> 16) as u8, (raw >> 8) as u8, raw as u8))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Encode {
            leds,
            protocol,
            intensity,
            output,
            colors,
        } => {
            let protocol = Protocol::from(protocol);
            let colors = colors
                .iter()
                .map(|color| parse_color(color))
                .collect::<anyhow::Result<Vec<_>>>()?;

            let config = StripConfig {
                led_count: leds,
                intensity,
                protocol,
            };
            let storage = vec![0_u8; frame_len(protocol, usize::from(leds))];
            let mut frame = FrameBuffer::new(config, storage)?;
            frame.fill_and_pad(&colors)?;

            log::info!(
                "encoded {} colors into a {} byte {:?} frame",
                colors.len(),
                frame.as_bytes().len(),
                protocol
            );

            if let Some(path) = output {
                fs::write(&path, frame.as_bytes())
                    .with_context(|| format!("unable to write the frame into {}", path.display()))?;
            } else {
                for (slot, chunk) in frame
                    .as_bytes()
                    .chunks(protocol.bytes_per_led())
                    .enumerate()
                {
                    let hex = chunk
                        .iter()
                        .map(|byte| format!("{byte:02x}"))
                        .collect::<Vec<_>>()
                        .join(" ");
                    println!("{slot:3}: {hex}");
                }
            }
        }
        Command::Info { leds, protocol } => {
            let protocol = Protocol::from(protocol);
            println!("protocol:       {protocol:?}");
            println!("bytes per led:  {}", protocol.bytes_per_led());
            println!(
                "frame length:   {} bytes",
                frame_len(protocol, usize::from(leds))
            );
            println!("off byte:       {:#04x}", protocol.off_byte());
            println!("baud rate:      {}", protocol.baud_rate());
            println!("reset sequence: {} bytes", protocol.reset_sequence().len());
            println!("spi mode:       polarity 0, phase 1");
        }
        Command::Completions { shell } => {
            shell.generate(&mut Cli::command(), &mut std::io::stdout());
        }
    }

    Ok(())
}
