//! Fixed ACPI Description Table (FADT, signature `"FACP"`).
//!
//! Only the PM1a control block is read: it is the I/O port that takes the
//! sleep-enable write for a software power-off. The field is read through a
//! single named offset instead of a struct overlay, since everything between
//! the header and the field differs between table revisions.

use bootmon_abi::addr::PhysAddr;

use crate::error::{AcpiError, AcpiResult};
use crate::memory::{PhysMemory, read_u32};
use crate::tables::{AcpiTables, SdtHeader};

pub const FADT_SIGNATURE: &[u8; 4] = b"FACP";

/// Byte offset of `PM1a_CNT_BLK` from the start of the table.
pub const PM1A_CNT_BLK_OFFSET: usize = 64;

/// Width in bytes of `PM1a_CNT_BLK`.
pub const PM1A_CNT_BLK_WIDTH: usize = 4;

/// Shortest FADT that still contains `PM1a_CNT_BLK`.
pub const FADT_MIN_LENGTH: u32 = (PM1A_CNT_BLK_OFFSET + PM1A_CNT_BLK_WIDTH) as u32;

/// Parsed handle to the FADT.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fadt {
    header: SdtHeader,
    pm1a_control_block: u32,
}

impl Fadt {
    /// Decode the fields we use from a located `"FACP"` table.
    pub fn from_header(mem: &(impl PhysMemory + ?Sized), header: SdtHeader) -> AcpiResult<Self> {
        if header.signature() != FADT_SIGNATURE {
            return Err(AcpiError::TableNotFound {
                signature: *FADT_SIGNATURE,
            });
        }
        let truncated = AcpiError::TruncatedTable {
            signature: *FADT_SIGNATURE,
            length: header.length(),
            required: FADT_MIN_LENGTH,
        };
        if header.length() < FADT_MIN_LENGTH {
            return Err(truncated);
        }

        let field = header.address().offset(PM1A_CNT_BLK_OFFSET as u64);
        let pm1a_control_block = read_u32(mem, field).ok_or(truncated)?;
        Ok(Self {
            header,
            pm1a_control_block,
        })
    }

    #[inline]
    pub fn header(&self) -> &SdtHeader {
        &self.header
    }

    #[inline]
    pub fn address(&self) -> PhysAddr {
        self.header.address()
    }

    /// I/O port of the PM1a control register, exactly as stored.
    #[inline]
    pub fn pm1a_control_block(&self) -> u32 {
        self.pm1a_control_block
    }
}

impl<M: PhysMemory> AcpiTables<M> {
    /// Locate and decode the FADT.
    pub fn fadt(&self) -> AcpiResult<Fadt> {
        let header = self.lookup(FADT_SIGNATURE)?;
        Fadt::from_header(self.memory(), header)
    }

    /// The port a soft-off request is written to, if the platform has one.
    pub fn shutdown_port(&self) -> Option<u32> {
        self.fadt().ok().map(|fadt| fadt.pm1a_control_block())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AcpiConfig;
    use crate::test_fixtures::{FirmwareImage, RSDP_ADDR, RSDT_ADDR, TABLE_AREA};

    #[test]
    fn test_shutdown_port_read_at_fixed_offset() {
        let mut image = FirmwareImage::new();
        image.put_rsdp(RSDP_ADDR, RSDT_ADDR);
        image.put_table(TABLE_AREA, b"APIC", 0x78);
        image.put_fadt(TABLE_AREA + 0x100, 0x604);
        image.put_rsdt(RSDT_ADDR, &[TABLE_AREA, TABLE_AREA + 0x100]);
        let tables = AcpiTables::new(image.memory(), AcpiConfig::DEFAULT);

        assert_eq!(tables.shutdown_port(), Some(0x604));
        let fadt = tables.fadt().unwrap();
        assert_eq!(fadt.address().as_u64(), TABLE_AREA + 0x100);
        assert_eq!(fadt.header().signature(), FADT_SIGNATURE);
    }

    #[test]
    fn test_shutdown_port_absent_without_fadt() {
        let image = FirmwareImage::with_tables(&[(b"APIC", 0x78), (b"HPET", 0x38)]);
        let tables = AcpiTables::new(image.memory(), AcpiConfig::DEFAULT);

        assert_eq!(tables.shutdown_port(), None);
        assert_eq!(
            tables.fadt(),
            Err(AcpiError::TableNotFound {
                signature: *FADT_SIGNATURE
            })
        );
    }

    #[test]
    fn test_shutdown_port_absent_without_rsdp() {
        let image = FirmwareImage::new();
        let tables = AcpiTables::new(image.memory(), AcpiConfig::DEFAULT);

        assert_eq!(tables.shutdown_port(), None);
        assert_eq!(tables.fadt(), Err(AcpiError::RsdpNotFound));
    }

    #[test]
    fn test_truncated_fadt_has_no_port() {
        let mut image = FirmwareImage::new();
        image.put_rsdp(RSDP_ADDR, RSDT_ADDR);
        image.put_fadt(TABLE_AREA, 0xB004);
        image.set_length(TABLE_AREA, FADT_MIN_LENGTH - 1);
        image.put_rsdt(RSDT_ADDR, &[TABLE_AREA]);
        let tables = AcpiTables::new(image.memory(), AcpiConfig::DEFAULT);

        assert_eq!(tables.shutdown_port(), None);
        assert!(matches!(
            tables.fadt(),
            Err(AcpiError::TruncatedTable { required: 68, .. })
        ));
    }

    #[test]
    fn test_from_header_rejects_other_signatures() {
        let image = FirmwareImage::with_tables(&[(b"APIC", 0x78)]);
        let tables = AcpiTables::new(image.memory(), AcpiConfig::DEFAULT);
        let apic = tables.lookup(b"APIC").unwrap();

        assert!(Fadt::from_header(tables.memory(), apic).is_err());
    }
}
