//! Snapshot file framing
//!
//! Every snapshot starts with a fixed little-endian header:
//!
//! | field         | type |
//! |---------------|------|
//! | magic         | u32  |
//! | version       | u16  |
//! | payload crc   | u32  |
//! | payload length| u64  |
//!
//! followed by exactly `payload length` bytes of payload.

use crc32c::crc32c;
use rampart_core::{codes, Error, Result};

/// Magic number for snapshot files: "RMPT"
pub const SNAPSHOT_MAGIC: u32 = 0x524D_5054;

/// Current snapshot format version
pub const SNAPSHOT_VERSION: u16 = 1;

/// Encoded header size in bytes
pub const HEADER_LEN: usize = 4 + 2 + 4 + 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotHeader {
    pub magic: u32,
    pub version: u16,
    pub payload_crc: u32,
    pub payload_len: u64,
}

impl SnapshotHeader {
    pub fn for_payload(payload: &[u8]) -> Self {
        Self {
            magic: SNAPSHOT_MAGIC,
            version: SNAPSHOT_VERSION,
            payload_crc: crc32c(payload),
            payload_len: payload.len() as u64,
        }
    }

    pub fn to_bytes(self) -> [u8; HEADER_LEN] {
        let mut bytes = [0u8; HEADER_LEN];
        bytes[0..4].copy_from_slice(&self.magic.to_le_bytes());
        bytes[4..6].copy_from_slice(&self.version.to_le_bytes());
        bytes[6..10].copy_from_slice(&self.payload_crc.to_le_bytes());
        bytes[10..18].copy_from_slice(&self.payload_len.to_le_bytes());
        bytes
    }

    pub fn from_bytes(bytes: &[u8; HEADER_LEN]) -> Self {
        let mut magic = [0u8; 4];
        let mut version = [0u8; 2];
        let mut payload_crc = [0u8; 4];
        let mut payload_len = [0u8; 8];
        magic.copy_from_slice(&bytes[0..4]);
        version.copy_from_slice(&bytes[4..6]);
        payload_crc.copy_from_slice(&bytes[6..10]);
        payload_len.copy_from_slice(&bytes[10..18]);

        Self {
            magic: u32::from_le_bytes(magic),
            version: u16::from_le_bytes(version),
            payload_crc: u32::from_le_bytes(payload_crc),
            payload_len: u64::from_le_bytes(payload_len),
        }
    }
}

/// Prefix `payload` with its header
pub fn frame(payload: &[u8]) -> Vec<u8> {
    let header = SnapshotHeader::for_payload(payload);
    let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
    bytes.extend_from_slice(&header.to_bytes());
    bytes.extend_from_slice(payload);
    bytes
}

/// Validate the header and checksum, returning the payload
pub fn unframe(bytes: &[u8]) -> Result<&[u8]> {
    let Some((head, payload)) = bytes.split_first_chunk::<HEADER_LEN>() else {
        return Err(corrupt(format!(
            "snapshot is {} bytes, shorter than its {HEADER_LEN} byte header",
            bytes.len()
        )));
    };
    let header = SnapshotHeader::from_bytes(head);

    if header.magic != SNAPSHOT_MAGIC {
        return Err(corrupt(format!(
            "invalid magic number: expected {SNAPSHOT_MAGIC:08x}, got {:08x}",
            header.magic
        )));
    }
    if header.version != SNAPSHOT_VERSION {
        return Err(corrupt(format!(
            "unsupported snapshot version {}",
            header.version
        ))
        .with_context("version", header.version));
    }
    if header.payload_len != payload.len() as u64 {
        return Err(corrupt(format!(
            "payload length mismatch: header says {}, file has {}",
            header.payload_len,
            payload.len()
        )));
    }

    let actual_crc = crc32c(payload);
    if header.payload_crc != actual_crc {
        return Err(corrupt(format!(
            "payload crc mismatch: expected {:08x}, got {actual_crc:08x}",
            header.payload_crc
        )));
    }

    Ok(payload)
}

fn corrupt(message: String) -> Error {
    Error::cache(codes::CACHE_LOAD_FAILED, message)
}
