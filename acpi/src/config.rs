//! Firmware table reader configuration.
//!
//! Defaults reproduce the classic stage-2 behavior: scan the BIOS ROM area
//! for the root pointer and accept tables without checking their checksums.
//! The boot command line can override both:
//!
//! - `acpi.checksums=<bool>`: skip root pointers and tables whose checksum
//!   does not sum to zero.
//! - `acpi.scan=<start>-<end>`: hexadecimal, inclusive scan window.

use bootmon_abi::acpi::{BIOS_ROM_END, BIOS_ROM_START};
use bootmon_abi::addr::PhysAddr;
use bootmon_lib::cmdline;

const DEFAULT_VERIFY_CHECKSUMS: bool = false;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AcpiConfig {
    /// First address of the root pointer scan (aligned up to 16 bytes).
    pub scan_start: PhysAddr,
    /// Last address (inclusive) a root pointer may start at.
    pub scan_end: PhysAddr,
    pub verify_checksums: bool,
}

impl AcpiConfig {
    pub const DEFAULT: Self = Self {
        scan_start: BIOS_ROM_START,
        scan_end: BIOS_ROM_END,
        verify_checksums: DEFAULT_VERIFY_CHECKSUMS,
    };

    pub fn from_cmdline(cmdline: Option<&str>) -> Self {
        let mut cfg = Self::DEFAULT;
        let Some(cmdline) = cmdline else {
            return cfg;
        };

        for value in cmdline::values(cmdline, "acpi.checksums") {
            if let Some(verify) = cmdline::parse_bool(value) {
                cfg.verify_checksums = verify;
            }
        }
        for value in cmdline::values(cmdline, "acpi.scan") {
            if let Some((start, end)) = parse_range(value) {
                cfg.scan_start = start;
                cfg.scan_end = end;
            }
        }
        cfg
    }
}

impl Default for AcpiConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn parse_range(value: &str) -> Option<(PhysAddr, PhysAddr)> {
    let (start, end) = value.split_once('-')?;
    let start = PhysAddr::try_new(cmdline::parse_hex_u64(start)?)?;
    let end = PhysAddr::try_new(cmdline::parse_hex_u64(end)?)?;
    (start <= end).then_some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_bios_rom() {
        let cfg = AcpiConfig::from_cmdline(None);
        assert_eq!(cfg, AcpiConfig::DEFAULT);
        assert_eq!(cfg.scan_start.as_u64(), 0x000E_0000);
        assert_eq!(cfg.scan_end.as_u64(), 0x000F_FFFF);
        assert!(!cfg.verify_checksums);
    }

    #[test]
    fn test_cmdline_overrides() {
        let cfg = AcpiConfig::from_cmdline(Some("klog=debug acpi.checksums=yes acpi.scan=0x9FC00-0x9FFFF"));
        assert!(cfg.verify_checksums);
        assert_eq!(cfg.scan_start.as_u64(), 0x9FC00);
        assert_eq!(cfg.scan_end.as_u64(), 0x9FFFF);
    }

    #[test]
    fn test_malformed_values_keep_defaults() {
        let cfg = AcpiConfig::from_cmdline(Some("acpi.checksums=perhaps acpi.scan=F0000 acpi.scan=0x20-0x10"));
        assert_eq!(cfg, AcpiConfig::DEFAULT);
    }
}
