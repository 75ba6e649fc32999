//! Utility functions for big-endian field access and timestamp formatting

pub mod format;

pub use format::*;

/// Nanoseconds in one hour, the default VWAP window length.
pub const NANOS_PER_HOUR: u64 = 3_600 * 1_000_000_000;

/// Encodes a nanosecond timestamp as the 6-byte big-endian ITCH field.
/// The upper 16 bits are truncated; a day holds fewer than 2^47 nanoseconds.
#[inline]
pub fn timestamp_to_u48(timestamp: u64) -> [u8; 6] {
    let bytes = (timestamp & 0x0000_FFFF_FFFF_FFFF).to_be_bytes();
    let mut result = [0u8; 6];
    result.copy_from_slice(&bytes[2..8]);
    result
}

/// Decodes a 6-byte big-endian ITCH timestamp.
#[inline]
pub fn u48_to_timestamp(timestamp_u48: [u8; 6]) -> u64 {
    let mut bytes = [0u8; 8];
    bytes[2..8].copy_from_slice(&timestamp_u48);
    u64::from_be_bytes(bytes)
}

#[inline]
pub(crate) fn read_u16(bytes: &[u8], offset: usize) -> u16 {
    let mut buf = [0u8; 2];
    buf.copy_from_slice(&bytes[offset..offset + 2]);
    u16::from_be_bytes(buf)
}

#[inline]
pub(crate) fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[offset..offset + 4]);
    u32::from_be_bytes(buf)
}

#[inline]
pub(crate) fn read_u48(bytes: &[u8], offset: usize) -> u64 {
    let mut buf = [0u8; 6];
    buf.copy_from_slice(&bytes[offset..offset + 6]);
    u48_to_timestamp(buf)
}

#[inline]
pub(crate) fn read_u64(bytes: &[u8], offset: usize) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[offset..offset + 8]);
    u64::from_be_bytes(buf)
}

/// Frame a packed message body as a record: 2-byte big-endian length, then the body.
pub fn frame_record(body: &[u8]) -> Vec<u8> {
    let mut record = Vec::with_capacity(body.len() + 2);
    record.extend_from_slice(&(body.len() as u16).to_be_bytes());
    record.extend_from_slice(body);
    record
}
