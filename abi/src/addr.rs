//! Physical address type for firmware table access.
//!
//! Firmware structures are located and referenced by physical address. The
//! [`PhysAddr`] newtype keeps those values apart from plain integers (lengths,
//! port numbers, field values) that sit right next to them in every table.
//!
//! # Example
//!
//! ```ignore
//! use bootmon_abi::addr::PhysAddr;
//!
//! let rsdt = PhysAddr::from_u32(0x07FE_14A8);
//! let first_entry = rsdt.offset(36);
//! ```

use core::fmt;

/// A physical memory address.
///
/// Physical addresses cannot be dereferenced directly; they are resolved
/// through a physical memory view (identity map, direct map or a host-side
/// image of firmware memory).
///
/// On x86_64, physical addresses are up to 52 bits (4 PB addressable).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PhysAddr(pub u64);

impl PhysAddr {
    /// The null physical address.
    pub const NULL: Self = Self(0);

    /// Maximum valid physical address on x86_64 (52-bit physical address space).
    pub const MAX: Self = Self((1 << 52) - 1);

    /// Create a new physical address from a raw u64 value.
    ///
    /// # Panics
    ///
    /// Panics if the address exceeds the 52-bit physical address limit.
    #[inline]
    pub fn new(addr: u64) -> Self {
        assert!(addr <= Self::MAX.0, "PhysAddr out of range: 0x{:x}", addr);
        Self(addr)
    }

    /// Create a new physical address if it is in range.
    #[inline]
    pub const fn try_new(addr: u64) -> Option<Self> {
        if addr <= Self::MAX.0 {
            Some(Self(addr))
        } else {
            None
        }
    }

    /// Widen a 32-bit firmware pointer. Always in range.
    #[inline]
    pub const fn from_u32(addr: u32) -> Self {
        Self(addr as u64)
    }

    /// Returns the raw u64 value of this address.
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Returns true if this is the null address.
    #[inline]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Add an offset to this address (wrapping on overflow).
    #[inline]
    pub const fn offset(self, off: u64) -> Self {
        Self(self.0.wrapping_add(off))
    }

    /// Add an offset, returning None on overflow.
    #[inline]
    pub const fn checked_offset(self, off: u64) -> Option<Self> {
        match self.0.checked_add(off) {
            Some(addr) => Some(Self(addr)),
            None => None,
        }
    }

    /// Align address down to the given alignment.
    ///
    /// # Panics
    ///
    /// Debug-panics if `align` is not a power of two.
    #[inline]
    pub const fn align_down(self, align: u64) -> Self {
        debug_assert!(align.is_power_of_two(), "align must be power of two");
        Self(self.0 & !(align - 1))
    }

    /// Align address up to the given alignment, returning None on overflow.
    #[inline]
    pub const fn checked_align_up(self, align: u64) -> Option<Self> {
        debug_assert!(align.is_power_of_two(), "align must be power of two");
        match self.0.checked_add(align - 1) {
            Some(addr) => Some(Self(addr & !(align - 1))),
            None => None,
        }
    }

    /// Check if address is aligned to the given alignment.
    #[inline]
    pub const fn is_aligned(self, align: u64) -> bool {
        self.0 & (align - 1) == 0
    }

    /// Truncate to the low 32 bits, as stored in 32-bit firmware fields.
    #[inline]
    pub const fn as_u32_truncated(self) -> u32 {
        self.0 as u32
    }
}

impl fmt::UpperHex for PhysAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}

impl fmt::LowerHex for PhysAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phys_addr_alignment() {
        let addr = PhysAddr::from_u32(0x000E_0003);
        assert!(!addr.is_aligned(16));
        assert_eq!(addr.align_down(16), PhysAddr(0x000E_0000));
        assert_eq!(addr.checked_align_up(16), Some(PhysAddr(0x000E_0010)));
        assert_eq!(PhysAddr(u64::MAX).checked_align_up(16), None);
    }

    #[test]
    fn test_phys_addr_offsets() {
        let addr = PhysAddr::from_u32(0x1000);
        assert_eq!(addr.offset(0x24).as_u64(), 0x1024);
        assert_eq!(PhysAddr(u64::MAX).checked_offset(1), None);
        assert!(PhysAddr::NULL.is_null());
        assert_eq!(PhysAddr::try_new(1 << 52), None);
        assert_eq!(PhysAddr(0x1_0000_1234).as_u32_truncated(), 0x1234);
    }
}
