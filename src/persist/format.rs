//! Binary header for saved session files.
//!
//! ```text
//! Header (16 bytes):
//!   Magic: "SPAN" (4 bytes)
//!   Version: u16
//!   Flags: u16 (compression)
//!   Payload size: u64 (bytes on disk after the header)
//!
//! Payload:
//!   Snapshot JSON, optionally LZ4 compressed
//! ```

use std::io::{self, Read, Write};

/// Magic bytes identifying a saved session.
pub const SESSION_MAGIC: &[u8; 4] = b"SPAN";

/// Current format version.
pub const SESSION_VERSION: u16 = 1;

/// Compression applied to the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum CompressionType {
    /// Plain JSON.
    #[default]
    None = 0,
    /// LZ4 fast compression.
    Lz4 = 1,
}

impl CompressionType {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(CompressionType::None),
            1 => Some(CompressionType::Lz4),
            _ => None,
        }
    }

    /// The compression that will actually be written with this build.
    pub fn effective(self) -> Self {
        if cfg!(feature = "lz4") {
            self
        } else {
            CompressionType::None
        }
    }
}

/// Session file header flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionFlags {
    /// Compression type (lower 4 bits).
    pub compression: CompressionType,
}

impl SessionFlags {
    pub fn to_u16(self) -> u16 {
        self.compression as u16
    }

    pub fn from_u16(v: u16) -> io::Result<Self> {
        let compression = CompressionType::from_u8((v & 0x0F) as u8).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Unknown compression type: {}", v & 0x0F),
            )
        })?;
        Ok(Self { compression })
    }
}

/// File header for saved sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionHeader {
    pub flags: SessionFlags,
    /// Payload length in bytes.
    pub payload_size: u64,
}

impl SessionHeader {
    /// Size of header in bytes.
    /// Magic(4) + Version(2) + Flags(2) + PayloadSize(8) = 16
    pub const SIZE: usize = 16;

    /// Write header to output.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(SESSION_MAGIC)?;
        w.write_all(&SESSION_VERSION.to_le_bytes())?;
        w.write_all(&self.flags.to_u16().to_le_bytes())?;
        w.write_all(&self.payload_size.to_le_bytes())?;
        Ok(())
    }

    /// Read header from input.
    pub fn read_from<R: Read>(r: &mut R) -> io::Result<Self> {
        let mut magic = [0u8; 4];
        r.read_exact(&mut magic)?;
        if &magic != SESSION_MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Invalid SPAN magic bytes",
            ));
        }

        let mut buf2 = [0u8; 2];
        let mut buf8 = [0u8; 8];

        r.read_exact(&mut buf2)?;
        let version = u16::from_le_bytes(buf2);
        if version != SESSION_VERSION {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Unsupported SPAN version: {}", version),
            ));
        }

        r.read_exact(&mut buf2)?;
        let flags = SessionFlags::from_u16(u16::from_le_bytes(buf2))?;

        r.read_exact(&mut buf8)?;
        let payload_size = u64::from_le_bytes(buf8);

        Ok(Self {
            flags,
            payload_size,
        })
    }
}

/// Compress data using LZ4.
#[cfg(feature = "lz4")]
pub fn compress_lz4(data: &[u8]) -> Vec<u8> {
    lz4_flex::compress_prepend_size(data)
}

/// Upper bound on how far an LZ4 block can expand.
#[cfg(feature = "lz4")]
const LZ4_MAX_RATIO: usize = 255;

/// Decompress LZ4 data.
///
/// The prepended size is checked against the block length before anything
/// is allocated.
#[cfg(feature = "lz4")]
pub fn decompress_lz4(data: &[u8]) -> io::Result<Vec<u8>> {
    let (size, block) = lz4_flex::block::uncompressed_size(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    if size > block.len().saturating_mul(LZ4_MAX_RATIO) + 16 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("LZ4 block of {} bytes claims {} bytes", block.len(), size),
        ));
    }
    lz4_flex::decompress(block, size).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Fallback when LZ4 is not available.
#[cfg(not(feature = "lz4"))]
pub fn compress_lz4(data: &[u8]) -> Vec<u8> {
    data.to_vec()
}

#[cfg(not(feature = "lz4"))]
pub fn decompress_lz4(_data: &[u8]) -> io::Result<Vec<u8>> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "Session is LZ4 compressed but the lz4 feature is disabled",
    ))
}
