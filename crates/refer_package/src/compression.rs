//! Resource compression and decompression handling.
//!
//! Package resources are stored with one of three schemes: as-is, a standard zlib stream, or
//! the game's internal byte-oriented LZ77 variant. The internal scheme is decoded here with an
//! explicit per-byte state machine; no library implements it.

use std::io::Read;

use flate2::read::ZlibDecoder;
use tracing::instrument;

use crate::error::{Error, Result};

/// Compression code marking a deleted index record. Entries carrying it are skipped by the
/// index scan, never decompressed.
pub const DELETED_RECORD: u16 = 0xFFE0;

/// Identifies the storage scheme used to compress a resource inside a package file
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum CompressionKind {
    /// Stores the data as it is
    #[default]
    Uncompressed,

    /// Compresses the data with a standard zlib stream
    Zlib,

    /// Compresses the data with the game's internal LZ77 variant
    Internal,
}

impl CompressionKind {
    /// Map a compression code from an index record to a kind, if it is one this library can
    /// decompress. Unknown codes (including [`DELETED_RECORD`]) return `None` and their
    /// entries are skipped by the index scan.
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            0x0000 => Some(CompressionKind::Uncompressed),
            0x5A42 => Some(CompressionKind::Zlib),
            0xFFFF => Some(CompressionKind::Internal),
            _ => None,
        }
    }

    /// The on-disk compression code for this kind.
    pub fn code(self) -> u16 {
        match self {
            CompressionKind::Uncompressed => 0x0000,
            CompressionKind::Zlib => 0x5A42,
            CompressionKind::Internal => 0xFFFF,
        }
    }
}

/// Decompress one resource's stored bytes.
///
/// The output length must equal `expected_len`, the decompressed size declared by the entry's
/// index record; any mismatch is an error, never silently tolerated.
#[instrument(skip(data), err)]
pub fn decompress(data: &[u8], kind: CompressionKind, expected_len: usize) -> Result<Vec<u8>> {
    let output = match kind {
        CompressionKind::Uncompressed => data.to_vec(),
        CompressionKind::Zlib => {
            let mut output = Vec::with_capacity(expected_len);
            ZlibDecoder::new(data).read_to_end(&mut output)?;
            output
        }
        CompressionKind::Internal => decompress_internal(data)?,
    };

    if output.len() != expected_len {
        return Err(Error::SizeMismatch {
            expected: expected_len,
            actual: output.len(),
        });
    }

    Ok(output)
}

/// Control byte classes of the internal scheme, selected by the magnitude of the first
/// control byte.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum ControlKind {
    /// `0x00..=0x7F`, one extra byte: short copy with a small back-offset
    ShortCopy,

    /// `0x80..=0xBF`, two extra bytes: medium copy
    MediumCopy,

    /// `0xC0..=0xDF`, three extra bytes: long copy with a wide back-offset
    LongCopy,

    /// `0xE0..=0xFB`, no extra bytes: literal run only, length scaled by four
    LiteralRun,

    /// `0xFC..=0xFF`, no extra bytes: short literal tail, no copy phase
    LiteralTail,
}

impl ControlKind {
    fn classify(control: u8) -> Self {
        match control {
            0x00..=0x7F => ControlKind::ShortCopy,
            0x80..=0xBF => ControlKind::MediumCopy,
            0xC0..=0xDF => ControlKind::LongCopy,
            0xE0..=0xFB => ControlKind::LiteralRun,
            0xFC..=0xFF => ControlKind::LiteralTail,
        }
    }
}

/// Decoder states. Control bytes arrive one at a time; a command's literal bytes follow its
/// control bytes in the stream, and its copy phase runs when the byte after the last literal
/// arrives. Commands cut off by the end of the input are not executed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum State {
    /// Waiting for the first control byte of a command
    Control,

    /// Collecting the second control byte
    Extra1,

    /// Collecting the third control byte
    Extra2,

    /// Collecting the fourth control byte
    Extra3,

    /// All control bytes collected; decode the command without consuming the current byte
    Actions,

    /// Copying this many raw literal bytes from the input to the output
    Literal(usize),

    /// Literal phase done; run the copy phase, reset, and reprocess the current byte as the
    /// next command's control byte
    CopyPending,
}

struct InternalDecoder {
    output: Vec<u8>,
    declared_len: usize,
    state: State,
    kind: ControlKind,
    control: [u8; 4],
    copy_len: usize,
    copy_offset: Option<usize>,
}

impl InternalDecoder {
    fn new(declared_len: usize) -> Self {
        InternalDecoder {
            output: Vec::with_capacity(declared_len),
            declared_len,
            state: State::Control,
            kind: ControlKind::LiteralTail,
            control: [0; 4],
            copy_len: 0,
            copy_offset: None,
        }
    }

    /// Decode one command's `(literal_len, copy_len, copy_offset)` from the collected control
    /// bytes. The bit-field layouts are fixed per control kind.
    fn decode_actions(&self) -> (usize, usize, Option<usize>) {
        let [b0, b1, b2, b3] = self.control.map(usize::from);

        match self.kind {
            ControlKind::ShortCopy => (
                b0 & 0x03,
                ((b0 & 0x1C) >> 2) + 3,
                Some(((b0 & 0x60) << 3) + b1 + 1),
            ),
            ControlKind::MediumCopy => (
                (b1 >> 6) & 0x03,
                (b0 & 0x3F) + 4,
                Some(((b1 & 0x3F) << 8) + b2 + 1),
            ),
            ControlKind::LongCopy => (
                b0 & 0x03,
                ((b0 & 0x0C) << 6) + b3 + 5,
                Some(((b0 & 0x10) << 12) + (b1 << 8) + b2 + 1),
            ),
            ControlKind::LiteralRun => (((b0 & 0x1F) << 2) + 4, 0, None),
            ControlKind::LiteralTail => (b0 & 0x03, 0, None),
        }
    }

    fn write_literal(&mut self, byte: u8) -> Result<()> {
        if self.output.len() >= self.declared_len {
            return Err(Error::InvalidStream(
                "literal write past the declared decompressed size",
            ));
        }

        self.output.push(byte);
        Ok(())
    }

    /// Copy `copy_len` bytes from `copy_offset` back in the output, byte by byte moving
    /// forward. Source and destination ranges can overlap when the offset is smaller than the
    /// length, so this must not be a bulk copy.
    fn run_copy(&mut self) -> Result<()> {
        let Some(offset) = self.copy_offset else {
            return Ok(());
        };

        let mut read_position = self
            .output
            .len()
            .checked_sub(offset)
            .ok_or(Error::InvalidStream(
                "copy offset reaches before the start of the output",
            ))?;

        if self.output.len() + self.copy_len > self.declared_len {
            return Err(Error::InvalidStream(
                "copy phase runs past the declared decompressed size",
            ));
        }

        for _ in 0..self.copy_len {
            let byte = self.output[read_position];
            self.output.push(byte);
            read_position += 1;
        }

        Ok(())
    }

    /// Feed one input byte through the state machine. `Actions` and `CopyPending` do not
    /// consume the byte; the loop re-dispatches it after the transition.
    fn feed(&mut self, byte: u8) -> Result<()> {
        loop {
            match self.state {
                State::Control => {
                    self.control = [byte, 0, 0, 0];
                    self.kind = ControlKind::classify(byte);

                    self.state = match self.kind {
                        ControlKind::LiteralRun | ControlKind::LiteralTail => State::Actions,
                        _ => State::Extra1,
                    };

                    return Ok(());
                }
                State::Extra1 => {
                    self.control[1] = byte;

                    self.state = match self.kind {
                        ControlKind::ShortCopy => State::Actions,
                        _ => State::Extra2,
                    };

                    return Ok(());
                }
                State::Extra2 => {
                    self.control[2] = byte;

                    self.state = match self.kind {
                        ControlKind::MediumCopy => State::Actions,
                        _ => State::Extra3,
                    };

                    return Ok(());
                }
                State::Extra3 => {
                    self.control[3] = byte;
                    self.state = State::Actions;
                    return Ok(());
                }
                State::Actions => {
                    let (literal_len, copy_len, copy_offset) = self.decode_actions();
                    self.copy_len = copy_len;
                    self.copy_offset = copy_offset;

                    self.state = if literal_len != 0 {
                        State::Literal(literal_len)
                    } else {
                        State::CopyPending
                    };
                }
                State::Literal(remaining) => {
                    self.write_literal(byte)?;

                    self.state = if remaining == 1 {
                        State::CopyPending
                    } else {
                        State::Literal(remaining - 1)
                    };

                    return Ok(());
                }
                State::CopyPending => {
                    self.run_copy()?;
                    self.state = State::Control;
                }
            }
        }
    }

    fn finish(self) -> Result<Vec<u8>> {
        if self.output.len() != self.declared_len {
            return Err(Error::SizeMismatch {
                expected: self.declared_len,
                actual: self.output.len(),
            });
        }

        Ok(self.output)
    }
}

/// Decompress a resource stored with the internal LZ77 variant.
///
/// The stream starts with a flags byte; when its top bit is set the decompressed length is a
/// 4-byte big-endian field and the header is 6 bytes, otherwise the length is 3 bytes
/// big-endian and the header is 5 bytes. The body is a sequence of commands decoded by
/// [`InternalDecoder`]; exhausting the input ends the stream, there is no end marker.
#[instrument(skip(data), err)]
pub fn decompress_internal(data: &[u8]) -> Result<Vec<u8>> {
    if data.len() < 5 {
        return Err(Error::InvalidStream("compression header is truncated"));
    }

    let flags = data[0];

    let (declared_len, body) = if flags & 0x80 != 0 {
        if data.len() < 6 {
            return Err(Error::InvalidStream("compression header is truncated"));
        }

        let len = u32::from_be_bytes([data[2], data[3], data[4], data[5]]) as usize;
        (len, &data[6..])
    } else {
        let len = (usize::from(data[2]) << 16) | (usize::from(data[3]) << 8) | usize::from(data[4]);
        (len, &data[5..])
    };

    let mut decoder = InternalDecoder::new(declared_len);

    for &byte in body {
        decoder.feed(byte)?;
    }

    decoder.finish()
}
