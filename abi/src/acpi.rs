//! Fixed ACPI hardware definitions.
//!
//! Register bit layouts and legacy BIOS memory constants shared by the
//! firmware table reader and anything that drives ACPI fixed hardware.

use bitflags::bitflags;

use crate::addr::PhysAddr;

// =============================================================================
// Legacy BIOS area
// =============================================================================

/// First byte of the BIOS read-only area searched for the RSDP.
pub const BIOS_ROM_START: PhysAddr = PhysAddr::from_u32(0x000E_0000);

/// Last byte (inclusive) of the BIOS read-only area searched for the RSDP.
pub const BIOS_ROM_END: PhysAddr = PhysAddr::from_u32(0x000F_FFFF);

/// The RSDP is always placed on a 16-byte boundary.
pub const RSDP_ALIGN: u64 = 16;

// =============================================================================
// PM1 control register
// =============================================================================

bitflags! {
    /// Bits of the PM1a/PM1b control register (ACPI 1.0 §4.7.3.2.1).
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Pm1Control: u16 {
        /// SCI interrupt enable (ACPI mode active).
        const SCI_ENABLE = 1 << 0;
        /// Bus master reload.
        const BUS_MASTER_RELOAD = 1 << 1;
        /// Global release.
        const GLOBAL_RELEASE = 1 << 2;
        /// Sleep type field (bits 10-12).
        const SLEEP_TYPE_MASK = 0b111 << 10;
        /// Sleep enable. Written with a sleep type of 0 this requests soft-off
        /// on Bochs/QEMU style chipsets.
        const SLEEP_ENABLE = 1 << 13;
    }
}

impl Pm1Control {
    /// Value written to request a transition into the given sleep type.
    #[inline]
    pub const fn sleep(sleep_type: u8) -> Self {
        let typ = ((sleep_type as u16) << 10) & Self::SLEEP_TYPE_MASK.bits();
        Self::from_bits_retain(typ | Self::SLEEP_ENABLE.bits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soft_off_value() {
        assert_eq!(Pm1Control::SLEEP_ENABLE.bits(), 0x2000);
        assert_eq!(Pm1Control::sleep(0).bits(), 0x2000);
        assert_eq!(Pm1Control::sleep(5).bits(), 0x3400);
    }

    #[test]
    fn test_bios_window_is_aligned() {
        assert!(BIOS_ROM_START.is_aligned(RSDP_ALIGN));
        assert!(BIOS_ROM_START < BIOS_ROM_END);
    }
}
