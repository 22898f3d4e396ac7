//! Physical memory views for firmware table access.
//!
//! Table parsing never dereferences a physical address directly. It asks a
//! [`PhysMemory`] for a bounds-checked byte slice and decodes fields out of
//! it. On hardware that view is a [`DirectMap`] (identity map in the
//! monitor, or a fixed-offset direct map); on a host it is a
//! [`SliceMemory`] over an image of firmware memory.

use bootmon_abi::addr::PhysAddr;

/// A readable view of physical memory.
pub trait PhysMemory {
    /// Borrow exactly `len` bytes starting at `phys`.
    ///
    /// Returns `None` if any part of the range is not backed by this view.
    fn read(&self, phys: PhysAddr, len: usize) -> Option<&[u8]>;
}

impl<T: PhysMemory + ?Sized> PhysMemory for &T {
    #[inline]
    fn read(&self, phys: PhysAddr, len: usize) -> Option<&[u8]> {
        (**self).read(phys, len)
    }
}

/// Read a fixed-size array.
#[inline]
pub fn read_array<const N: usize>(mem: &(impl PhysMemory + ?Sized), phys: PhysAddr) -> Option<[u8; N]> {
    mem.read(phys, N)?.try_into().ok()
}

#[inline]
pub fn read_u8(mem: &(impl PhysMemory + ?Sized), phys: PhysAddr) -> Option<u8> {
    read_array::<1>(mem, phys).map(|[b]| b)
}

/// Read a little-endian `u32`.
#[inline]
pub fn read_u32(mem: &(impl PhysMemory + ?Sized), phys: PhysAddr) -> Option<u32> {
    read_array::<4>(mem, phys).map(u32::from_le_bytes)
}

// =============================================================================
// DirectMap
// =============================================================================

/// Physical memory reachable at `phys + offset` in the current address space.
///
/// With offset 0 this is the identity map the monitor runs under.
#[derive(Clone, Copy, Debug)]
pub struct DirectMap {
    offset: u64,
}

impl DirectMap {
    /// Physical memory is identity mapped.
    ///
    /// # Safety
    ///
    /// Every physical address later passed to [`PhysMemory::read`] that the
    /// firmware tables reference must be mapped and readable at the same
    /// virtual address for as long as this value is used.
    pub const unsafe fn identity() -> Self {
        Self { offset: 0 }
    }

    /// Physical memory is mapped at `phys + offset` (higher-half direct map).
    ///
    /// # Safety
    ///
    /// Same requirements as [`DirectMap::identity`], for the offset mapping.
    pub const unsafe fn with_offset(offset: u64) -> Self {
        Self { offset }
    }

    #[inline]
    pub const fn offset(&self) -> u64 {
        self.offset
    }
}

impl PhysMemory for DirectMap {
    fn read(&self, phys: PhysAddr, len: usize) -> Option<&[u8]> {
        if phys.is_null() {
            return None;
        }
        let start = phys.as_u64().checked_add(self.offset)?;
        start.checked_add(len as u64)?;
        let start = usize::try_from(start).ok()?;
        // SAFETY: the constructor's contract guarantees the range is mapped
        // and readable; overflow of the range was rejected above.
        Some(unsafe { core::slice::from_raw_parts(start as *const u8, len) })
    }
}

// =============================================================================
// SliceMemory
// =============================================================================

/// A byte image of the physical range starting at `base`.
#[derive(Clone, Copy, Debug)]
pub struct SliceMemory<'a> {
    base: PhysAddr,
    bytes: &'a [u8],
}

impl<'a> SliceMemory<'a> {
    pub const fn new(base: PhysAddr, bytes: &'a [u8]) -> Self {
        Self { base, bytes }
    }

    #[inline]
    pub const fn base(&self) -> PhysAddr {
        self.base
    }

    /// One past the last backed address.
    #[inline]
    pub const fn end(&self) -> PhysAddr {
        self.base.offset(self.bytes.len() as u64)
    }
}

impl PhysMemory for SliceMemory<'_> {
    fn read(&self, phys: PhysAddr, len: usize) -> Option<&[u8]> {
        let start = usize::try_from(phys.as_u64().checked_sub(self.base.as_u64())?).ok()?;
        let end = start.checked_add(len)?;
        self.bytes.get(start..end)
    }
}
