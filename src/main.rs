#![warn(clippy::all, clippy::pedantic)]

use std::{
    fs::{self, File},
    io::{self, BufRead, BufReader, Read, Write},
    path::PathBuf,
};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wust_frame::{DecodeConfig, Frame, FrameDecoder, FrameError, Opcode, Role, encode};

#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode one frame and write its raw bytes to stdout
    Encode {
        /// Payload text, read from --file or stdin when omitted
        text: Option<String>,

        /// Read the payload from a file
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Frame opcode
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(0..16))]
        opcode: u8,

        /// Leave the FIN bit clear
        #[arg(long)]
        continued: bool,

        /// Mask with a random key, as a client does
        #[arg(short, long)]
        mask: bool,

        /// Mask with this key (8 hex digits)
        #[arg(short, long, value_parser = parse_key, conflicts_with = "mask")]
        key: Option<[u8; 4]>,
    },
    /// Read frames from stdin or a file and print one line per frame
    Decode {
        /// Read frames from a file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Reject frames declaring a larger payload
        #[arg(long)]
        max_payload: Option<usize>,

        /// Reject length fields that are not minimally encoded
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> Result<(), FrameError> {
    // stdout carries frame bytes, keep logs on stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("wust_frame=info".parse().unwrap()),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();

    match Args::parse().command {
        Command::Encode {
            text,
            file,
            opcode,
            continued,
            mask,
            key,
        } => {
            let payload = match (text, file) {
                (Some(text), _) => text.into_bytes(),
                (None, Some(path)) => fs::read(path)?,
                (None, None) => {
                    let mut buf = Vec::new();
                    io::stdin().lock().read_to_end(&mut buf)?;
                    buf
                }
            };

            let role = if mask { Role::Client } else { Role::Server };
            let mut frame = Frame::outgoing(role, !continued, opcode, payload);
            if let Some(key) = key {
                frame = frame.with_mask(key);
            }

            encode(&frame, &mut io::stdout().lock())?;
            tracing::info!(
                len = frame.payload().len(),
                wire_len = frame.encoded_len(),
                masked = frame.masked(),
                "wrote frame"
            );
        }
        Command::Decode {
            file,
            max_payload,
            strict,
        } => {
            let input: Box<dyn BufRead> = match file {
                Some(path) => Box::new(BufReader::new(File::open(path)?)),
                None => Box::new(io::stdin().lock()),
            };
            let decoder = FrameDecoder::new(DecodeConfig {
                max_payload,
                strict_lengths: strict,
            });

            let count = decode_stream(&decoder, input, io::stdout().lock())?;
            tracing::info!(frames = count, "end of stream");
        }
    }

    Ok(())
}

// Writes one summary line per frame and returns how many were read. A clean EOF between frames
// ends the stream, anywhere else is truncation.
fn decode_stream(
    decoder: &FrameDecoder,
    mut input: impl BufRead,
    mut out: impl Write,
) -> Result<usize, FrameError> {
    let mut count = 0;
    while !input.fill_buf()?.is_empty() {
        let frame = decoder.decode(&mut input)?;
        writeln!(out, "{}", describe(&frame))?;
        count += 1;
    }
    out.flush()?;
    Ok(count)
}

fn parse_key(s: &str) -> Result<[u8; 4], String> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(format!("expected 8 hex digits, got {s:?}"));
    }
    u32::from_str_radix(s, 16)
        .map(u32::to_be_bytes)
        .map_err(|e| e.to_string())
}

fn describe(frame: &Frame) -> String {
    let payload = frame.payload();
    let kind = frame.kind().map_or_else(
        || format!("reserved({:#x})", frame.opcode()),
        |op| format!("{op:?}"),
    );
    let key = frame
        .mask_key()
        .map_or_else(|| "-".to_owned(), |k| format!("{:08x}", u32::from_be_bytes(k)));

    let preview = if frame.kind() == Some(Opcode::Text) {
        match std::str::from_utf8(payload) {
            Ok(s) => format!("{:?}", s.chars().take(32).collect::<String>()),
            Err(_) => "<invalid utf-8>".to_owned(),
        }
    } else {
        format!("{:02x?}", &payload[..payload.len().min(16)])
    };

    format!(
        "fin={} opcode={kind} key={key} len={} {preview}",
        u8::from(frame.final_fragment()),
        payload.len()
    )
}
