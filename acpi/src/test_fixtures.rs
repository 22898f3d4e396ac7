//! Synthetic firmware images for unit tests.
//!
//! A [`FirmwareImage`] is a zero-filled byte image of physical memory from
//! the start of the BIOS ROM area up to [`IMAGE_END`], with helpers that
//! place a root pointer, an RSDT and tables with valid checksums.

use std::string::String;
use std::vec::Vec;

use bootmon_abi::addr::PhysAddr;
use bootmon_lib::console::Console;

use crate::fadt::{FADT_SIGNATURE, PM1A_CNT_BLK_OFFSET};
use crate::memory::SliceMemory;
use crate::power::PowerControl;
use crate::rsdp::{RSDP_SIGNATURE, RSDP_V1_LEN};
use crate::tables::{SDT_HEADER_LEN, checksum};

pub const IMAGE_BASE: u64 = 0x000E_0000;
pub const IMAGE_END: u64 = 0x0012_0000;

/// Where `with_tables` puts the root pointer (16-byte aligned, in the window).
pub const RSDP_ADDR: u64 = 0x000F_6A20;
/// First table; `with_tables` places tables 0x100 apart from here.
pub const TABLE_AREA: u64 = 0x0010_4000;
/// The RSDT sits above all tables so that nothing but zeros follows it.
pub const RSDT_ADDR: u64 = 0x0011_8000;

/// Header bytes whose own checksum byte makes the 36 bytes sum to zero.
#[allow(clippy::too_many_arguments)]
pub fn header_bytes(
    signature: &[u8; 4],
    length: u32,
    revision: u8,
    oem_id: [u8; 6],
    oem_table_id: [u8; 8],
    oem_revision: u32,
    creator_id: [u8; 4],
    creator_revision: u32,
) -> [u8; SDT_HEADER_LEN] {
    let mut raw = [0u8; SDT_HEADER_LEN];
    raw[0..4].copy_from_slice(signature);
    raw[4..8].copy_from_slice(&length.to_le_bytes());
    raw[8] = revision;
    raw[10..16].copy_from_slice(&oem_id);
    raw[16..24].copy_from_slice(&oem_table_id);
    raw[24..28].copy_from_slice(&oem_revision.to_le_bytes());
    raw[28..32].copy_from_slice(&creator_id);
    raw[32..36].copy_from_slice(&creator_revision.to_le_bytes());
    raw[9] = 0u8.wrapping_sub(checksum(&raw));
    raw
}

pub struct FirmwareImage {
    bytes: Vec<u8>,
}

impl FirmwareImage {
    pub fn new() -> Self {
        Self {
            bytes: std::vec![0u8; (IMAGE_END - IMAGE_BASE) as usize],
        }
    }

    /// Root pointer at [`RSDP_ADDR`], RSDT at [`RSDT_ADDR`], and one table per
    /// `(signature, length)` in that order starting at [`TABLE_AREA`].
    pub fn with_tables(tables: &[(&[u8; 4], u32)]) -> Self {
        let mut image = Self::new();
        image.put_rsdp(RSDP_ADDR, RSDT_ADDR);
        let mut children = Vec::new();
        for (i, &(signature, length)) in tables.iter().enumerate() {
            let at = TABLE_AREA + 0x100 * i as u64;
            if signature == FADT_SIGNATURE {
                image.put_fadt(at, 0x604);
            } else {
                image.put_table(at, signature, length);
            }
            children.push(at);
        }
        image.put_rsdt(RSDT_ADDR, &children);
        image
    }

    pub fn memory(&self) -> SliceMemory<'_> {
        SliceMemory::new(PhysAddr(IMAGE_BASE), &self.bytes)
    }

    fn offset(phys: u64) -> usize {
        assert!((IMAGE_BASE..IMAGE_END).contains(&phys), "{phys:#x} outside image");
        (phys - IMAGE_BASE) as usize
    }

    pub fn write(&mut self, phys: u64, data: &[u8]) {
        let at = Self::offset(phys);
        self.bytes[at..at + data.len()].copy_from_slice(data);
    }

    /// Change one byte so that whatever contains it no longer sums to zero.
    pub fn corrupt(&mut self, phys: u64) {
        let at = Self::offset(phys);
        self.bytes[at] = self.bytes[at].wrapping_add(1);
    }

    /// Overwrite a table's length field, leaving the checksum stale.
    pub fn set_length(&mut self, table: u64, length: u32) {
        self.write(table + 4, &length.to_le_bytes());
    }

    /// Fix up the checksum byte of the `len` bytes at `phys`.
    fn seal(&mut self, phys: u64, len: usize, checksum_at: u64) {
        let at = Self::offset(phys);
        let slot = Self::offset(checksum_at);
        self.bytes[slot] = 0;
        let sum = checksum(&self.bytes[at..at + len]);
        self.bytes[slot] = 0u8.wrapping_sub(sum);
    }

    pub fn put_rsdp(&mut self, at: u64, rsdt: u64) {
        let mut raw = [0u8; RSDP_V1_LEN];
        raw[0..8].copy_from_slice(RSDP_SIGNATURE);
        raw[9..15].copy_from_slice(b"BOCHS ");
        raw[16..20].copy_from_slice(&(rsdt as u32).to_le_bytes());
        self.write(at, &raw);
        self.seal(at, RSDP_V1_LEN, at + 8);
    }

    /// A table of `length` bytes: header plus a zero body.
    pub fn put_table(&mut self, at: u64, signature: &[u8; 4], length: u32) {
        let mut table_id = *b"BXPC    ";
        table_id[4..].copy_from_slice(signature);
        let raw = header_bytes(signature, length, 1, *b"BOCHS ", table_id, 1, *b"BXPC", 1);
        self.write(at, &raw);
        let body = (length as usize).saturating_sub(SDT_HEADER_LEN);
        self.write(at + SDT_HEADER_LEN as u64, &std::vec![0u8; body]);
        self.seal(at, (length as usize).max(SDT_HEADER_LEN), at + 9);
    }

    /// A revision-1 FADT (0x74 bytes) whose PM1a control block is `port`.
    pub fn put_fadt(&mut self, at: u64, port: u32) {
        self.put_table(at, FADT_SIGNATURE, 0x74);
        self.write(at + PM1A_CNT_BLK_OFFSET as u64, &port.to_le_bytes());
        self.seal(at, 0x74, at + 9);
    }

    pub fn put_rsdt(&mut self, at: u64, children: &[u64]) {
        let length = (SDT_HEADER_LEN + 4 * children.len()) as u32;
        self.put_table(at, b"RSDT", length);
        for (i, &child) in children.iter().enumerate() {
            self.write(at + (SDT_HEADER_LEN + 4 * i) as u64, &(child as u32).to_le_bytes());
        }
        self.seal(at, length as usize, at + 9);
    }
}

impl Default for FirmwareImage {
    fn default() -> Self {
        Self::new()
    }
}

/// Console that collects output as text, one `char` per byte.
#[derive(Default)]
pub struct StringConsole {
    pub text: String,
}

impl Console for StringConsole {
    fn print_char(&mut self, byte: u8) {
        self.text.push(char::from(byte));
    }
}

/// Power sink that records writes instead of performing them.
#[derive(Default)]
pub struct RecordingPower {
    pub writes: Vec<(u16, u16)>,
}

impl PowerControl for RecordingPower {
    fn write_pm1_control(&mut self, port: u16, value: u16) {
        self.writes.push((port, value));
    }
}
