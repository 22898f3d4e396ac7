//! Table header decoding, RSDT traversal and table lookup by signature.

use bootmon_abi::addr::PhysAddr;
use bootmon_lib::{klog_debug, klog_info, klog_warn};
use spin::Once;

use crate::config::AcpiConfig;
use crate::error::{AcpiError, AcpiResult};
use crate::memory::{PhysMemory, read_array, read_u32};
use crate::rsdp::{Rsdp, scan_for_rsdp};

/// Size of the header every description table starts with.
pub const SDT_HEADER_LEN: usize = 36;

/// Size of one child reference in the RSDT body.
pub const RSDT_ENTRY_LEN: usize = 4;

/// Wrapping byte sum; a well-formed table sums to zero.
pub fn checksum(data: &[u8]) -> u8 {
    data.iter().fold(0u8, |sum, &b| sum.wrapping_add(b))
}

/// The common 36-byte description table header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SdtHeader {
    address: PhysAddr,
    signature: [u8; 4],
    length: u32,
    revision: u8,
    checksum: u8,
    oem_id: [u8; 6],
    oem_table_id: [u8; 8],
    oem_revision: u32,
    creator_id: [u8; 4],
    creator_revision: u32,
}

fn field<const N: usize>(raw: &[u8; SDT_HEADER_LEN], offset: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&raw[offset..offset + N]);
    out
}

impl SdtHeader {
    pub fn from_bytes(address: PhysAddr, raw: &[u8; SDT_HEADER_LEN]) -> Self {
        Self {
            address,
            signature: field(raw, 0),
            length: u32::from_le_bytes(field(raw, 4)),
            revision: raw[8],
            checksum: raw[9],
            oem_id: field(raw, 10),
            oem_table_id: field(raw, 16),
            oem_revision: u32::from_le_bytes(field(raw, 24)),
            creator_id: field(raw, 28),
            creator_revision: u32::from_le_bytes(field(raw, 32)),
        }
    }

    pub fn read(mem: &(impl PhysMemory + ?Sized), address: PhysAddr) -> Option<Self> {
        let raw = read_array::<SDT_HEADER_LEN>(mem, address)?;
        Some(Self::from_bytes(address, &raw))
    }

    #[inline]
    pub fn address(&self) -> PhysAddr {
        self.address
    }

    #[inline]
    pub fn signature(&self) -> &[u8; 4] {
        &self.signature
    }

    /// Total table length in bytes, header included.
    #[inline]
    pub fn length(&self) -> u32 {
        self.length
    }

    #[inline]
    pub fn revision(&self) -> u8 {
        self.revision
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
    pub fn oem_table_id(&self) -> &[u8; 8] {
        &self.oem_table_id
    }

    #[inline]
    pub fn oem_revision(&self) -> u32 {
        self.oem_revision
    }

    #[inline]
    pub fn creator_id(&self) -> &[u8; 4] {
        &self.creator_id
    }

    #[inline]
    pub fn creator_revision(&self) -> u32 {
        self.creator_revision
    }

    /// True when the whole table (per its declared length) sums to zero.
    ///
    /// A table shorter than its header, or not fully readable, is invalid.
    pub fn checksum_valid(&self, mem: &(impl PhysMemory + ?Sized)) -> bool {
        if (self.length as usize) < SDT_HEADER_LEN {
            return false;
        }
        mem.read(self.address, self.length as usize)
            .is_some_and(|raw| checksum(raw) == 0)
    }
}

/// Number of child references in an RSDT of the given declared length.
pub fn child_count(address: PhysAddr, length: u32) -> AcpiResult<usize> {
    let length = length as usize;
    if length < SDT_HEADER_LEN {
        return Err(AcpiError::MalformedLength {
            address,
            length: length as u32,
        });
    }
    Ok((length - SDT_HEADER_LEN) / RSDT_ENTRY_LEN)
}

// =============================================================================
// Child table walk
// =============================================================================

/// Lazy walk over the headers referenced by an RSDT, in storage order.
///
/// A reference slot that cannot be read ends the walk; a child whose header
/// cannot be read is skipped.
pub struct ChildTables<'a, M: PhysMemory + ?Sized> {
    mem: &'a M,
    entries: PhysAddr,
    index: usize,
    count: usize,
}

impl<'a, M: PhysMemory + ?Sized> ChildTables<'a, M> {
    fn new(mem: &'a M, root: Option<SdtHeader>) -> Self {
        let count = match root {
            Some(root) => match child_count(root.address(), root.length()) {
                Ok(count) => count,
                Err(err) => {
                    klog_warn!("ACPI: {}, treating as empty", err);
                    0
                }
            },
            None => 0,
        };
        let entries = root
            .map(|root| root.address().offset(SDT_HEADER_LEN as u64))
            .unwrap_or(PhysAddr::NULL);
        Self {
            mem,
            entries,
            index: 0,
            count,
        }
    }

    /// References not yet visited (upper bound on remaining headers).
    pub fn remaining(&self) -> usize {
        self.count - self.index
    }
}

impl<M: PhysMemory + ?Sized> Iterator for ChildTables<'_, M> {
    type Item = SdtHeader;

    fn next(&mut self) -> Option<SdtHeader> {
        while self.index < self.count {
            let slot = self
                .entries
                .offset((self.index * RSDT_ENTRY_LEN) as u64);
            self.index += 1;

            let Some(target) = read_u32(self.mem, slot) else {
                klog_debug!("ACPI: RSDT slot {:#x} unreadable, ending walk", slot);
                self.index = self.count;
                return None;
            };
            let target = PhysAddr::from_u32(target);
            match SdtHeader::read(self.mem, target) {
                Some(header) => return Some(header),
                None => klog_debug!("ACPI: table header at {:#x} unreadable, skipping", target),
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining()))
    }
}

impl<M: PhysMemory + ?Sized> core::iter::FusedIterator for ChildTables<'_, M> {}

// =============================================================================
// AcpiTables
// =============================================================================

/// Handle to the firmware table hierarchy of one platform.
///
/// Owns the physical memory view and the memoized root pointer. The root
/// pointer is looked up on first use; once found it is never looked up
/// again and every caller sees the same record.
pub struct AcpiTables<M: PhysMemory> {
    memory: M,
    config: AcpiConfig,
    rsdp: Once<Rsdp>,
}

impl<M: PhysMemory> AcpiTables<M> {
    pub const fn new(memory: M, config: AcpiConfig) -> Self {
        Self {
            memory,
            config,
            rsdp: Once::new(),
        }
    }

    #[inline]
    pub fn memory(&self) -> &M {
        &self.memory
    }

    #[inline]
    pub fn config(&self) -> &AcpiConfig {
        &self.config
    }

    /// Find the root pointer, scanning the BIOS area on the first successful
    /// call only.
    ///
    /// A miss is not remembered: the next call scans again.
    pub fn locate_root_pointer(&self) -> Option<&Rsdp> {
        if let Some(rsdp) = self.rsdp.get() {
            return Some(rsdp);
        }

        match scan_for_rsdp(&self.memory, &self.config) {
            Some(found) => {
                let rsdp = self.rsdp.call_once(|| found);
                klog_info!(
                    "ACPI: RSDP at {:#x}, RSDT at {:#x}",
                    rsdp.address(),
                    rsdp.rsdt_address()
                );
                Some(rsdp)
            }
            None => {
                klog_warn!("ACPI: RSDP not found");
                None
            }
        }
    }

    /// Header of the RSDT the root pointer refers to.
    pub fn root_table(&self, rsdp: &Rsdp) -> Option<SdtHeader> {
        SdtHeader::read(&self.memory, rsdp.rsdt_address())
    }

    /// Walk the RSDT's child headers in storage order.
    ///
    /// Every call starts a fresh walk over the same memory.
    pub fn child_tables(&self, rsdp: &Rsdp) -> ChildTables<'_, M> {
        ChildTables::new(&self.memory, self.root_table(rsdp))
    }

    /// First child table whose signature is exactly `signature`.
    pub fn find_table(&self, rsdp: &Rsdp, signature: &[u8; 4]) -> Option<SdtHeader> {
        self.child_tables(rsdp)
            .filter(|header| header.signature() == signature)
            .find(|header| {
                if !self.config.verify_checksums || header.checksum_valid(&self.memory) {
                    return true;
                }
                klog_info!(
                    "ACPI: {} at {:#x} has a bad checksum, skipping",
                    bootmon_lib::string::bytes_as_str(header.signature()),
                    header.address()
                );
                false
            })
    }

    /// Resolve the root pointer and look a table up in one step.
    pub fn lookup(&self, signature: &[u8; 4]) -> AcpiResult<SdtHeader> {
        let rsdp = self.locate_root_pointer().ok_or(AcpiError::RsdpNotFound)?;
        self.find_table(rsdp, signature)
            .ok_or(AcpiError::TableNotFound {
                signature: *signature,
            })
    }
}
