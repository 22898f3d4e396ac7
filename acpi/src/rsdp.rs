//! Root System Description Pointer discovery.
//!
//! The RSDP lives in the BIOS read-only area on a 16-byte boundary and is
//! recognised by its `"RSD PTR "` signature. Only the ACPI 1.0 layout is
//! read: the 32-bit RSDT address is the sole way into the table tree.

use bootmon_abi::acpi::RSDP_ALIGN;
use bootmon_abi::addr::PhysAddr;
use bootmon_lib::{klog_debug, klog_info};

use crate::config::AcpiConfig;
use crate::memory::{PhysMemory, read_array};
use crate::tables::checksum;

pub const RSDP_SIGNATURE: &[u8; 8] = b"RSD PTR ";

/// Size of the ACPI 1.0 RSDP record.
pub const RSDP_V1_LEN: usize = 20;

const SIGNATURE_OFFSET: usize = 0;
const CHECKSUM_OFFSET: usize = 8;
const OEM_ID_OFFSET: usize = 9;
const REVISION_OFFSET: usize = 15;
const RSDT_ADDRESS_OFFSET: usize = 16;

/// A root pointer record, decoded from firmware memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rsdp {
    address: PhysAddr,
    signature: [u8; 8],
    checksum: u8,
    oem_id: [u8; 6],
    revision: u8,
    rsdt_address: PhysAddr,
}

impl Rsdp {
    /// Decode the 20-byte record found at `address`.
    pub fn from_bytes(address: PhysAddr, raw: &[u8; RSDP_V1_LEN]) -> Self {
        let mut signature = [0u8; 8];
        signature.copy_from_slice(&raw[SIGNATURE_OFFSET..SIGNATURE_OFFSET + 8]);
        let mut oem_id = [0u8; 6];
        oem_id.copy_from_slice(&raw[OEM_ID_OFFSET..OEM_ID_OFFSET + 6]);
        let mut rsdt = [0u8; 4];
        rsdt.copy_from_slice(&raw[RSDT_ADDRESS_OFFSET..RSDT_ADDRESS_OFFSET + 4]);

        Self {
            address,
            signature,
            checksum: raw[CHECKSUM_OFFSET],
            oem_id,
            revision: raw[REVISION_OFFSET],
            rsdt_address: PhysAddr::from_u32(u32::from_le_bytes(rsdt)),
        }
    }

    /// Read the record at `address`, whatever its signature says.
    pub fn read(mem: &(impl PhysMemory + ?Sized), address: PhysAddr) -> Option<Self> {
        let raw = read_array::<RSDP_V1_LEN>(mem, address)?;
        Some(Self::from_bytes(address, &raw))
    }

    #[inline]
    pub fn address(&self) -> PhysAddr {
        self.address
    }

    #[inline]
    pub fn signature(&self) -> &[u8; 8] {
        &self.signature
    }

    #[inline]
    pub fn checksum(&self) -> u8 {
        self.checksum
    }

    #[inline]
    pub fn oem_id(&self) -> &[u8; 6] {
        &self.oem_id
    }

    #[inline]
    pub fn revision(&self) -> u8 {
        self.revision
    }

    /// Physical address of the RSDT.
    #[inline]
    pub fn rsdt_address(&self) -> PhysAddr {
        self.rsdt_address
    }

    /// True when the 20-byte record sums to zero.
    pub fn checksum_valid(&self, mem: &(impl PhysMemory + ?Sized)) -> bool {
        mem.read(self.address, RSDP_V1_LEN)
            .is_some_and(|raw| checksum(raw) == 0)
    }
}

/// Candidate addresses for the root pointer: every 16-byte boundary in the
/// inclusive window.
pub fn scan_candidates(config: &AcpiConfig) -> impl Iterator<Item = PhysAddr> {
    let first = config.scan_start.checked_align_up(RSDP_ALIGN);
    let end = config.scan_end;
    core::iter::successors(first, |addr| addr.checked_offset(RSDP_ALIGN))
        .take_while(move |addr| *addr <= end)
}

/// Scan the configured window and return the first root pointer found.
pub fn scan_for_rsdp(mem: &(impl PhysMemory + ?Sized), config: &AcpiConfig) -> Option<Rsdp> {
    for candidate in scan_candidates(config) {
        let Some(signature) = read_array::<8>(mem, candidate) else {
            continue;
        };
        if &signature != RSDP_SIGNATURE {
            continue;
        }

        let Some(rsdp) = Rsdp::read(mem, candidate) else {
            klog_debug!("ACPI: RSDP signature at {:#x} but record unreadable", candidate);
            continue;
        };
        if config.verify_checksums && !rsdp.checksum_valid(mem) {
            klog_info!("ACPI: RSDP at {:#x} has a bad checksum, skipping", candidate);
            continue;
        }
        return Some(rsdp);
    }
    None
}
