//! Error type for firmware table access.
//!
//! Lookups that can legitimately come up empty (root pointer, a named table)
//! return `Option` on the query API. `AcpiError` carries the reason where a
//! caller needs it: building a typed table view, or acting on one.

use core::fmt;

use bootmon_abi::addr::PhysAddr;
use bootmon_lib::string::bytes_as_str;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcpiError {
    /// No root pointer in the BIOS scan window.
    RsdpNotFound,
    /// The root table has no child with this signature.
    TableNotFound { signature: [u8; 4] },
    /// A table declares a length shorter than its own header.
    MalformedLength { address: PhysAddr, length: u32 },
    /// A table is too short to contain a field that is read from it.
    TruncatedTable {
        signature: [u8; 4],
        length: u32,
        required: u32,
    },
    /// The power-management table could not be resolved.
    ShutdownPortUnavailable,
    /// The PM1a control port is zero or does not fit an I/O port number.
    InvalidShutdownPort { port: u32 },
}

impl fmt::Display for AcpiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RsdpNotFound => write!(f, "RSDP not found"),
            Self::TableNotFound { signature } => {
                write!(f, "table {} not found", bytes_as_str(signature))
            }
            Self::MalformedLength { address, length } => {
                write!(
                    f,
                    "table at {:#x} has length {:#x}, shorter than its header",
                    address, length
                )
            }
            Self::TruncatedTable {
                signature,
                length,
                required,
            } => write!(
                f,
                "table {} is {:#x} bytes, need at least {:#x}",
                bytes_as_str(signature),
                length,
                required
            ),
            Self::ShutdownPortUnavailable => write!(f, "no shutdown port"),
            Self::InvalidShutdownPort { port } => {
                write!(f, "invalid shutdown port {:#x}", port)
            }
        }
    }
}

pub type AcpiResult<T> = Result<T, AcpiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::ToString;

    #[test]
    fn test_error_display() {
        let err = AcpiError::TableNotFound { signature: *b"FACP" };
        assert_eq!(err.to_string(), "table FACP not found");

        let err = AcpiError::MalformedLength {
            address: PhysAddr::from_u32(0x0010_0000),
            length: 0x10,
        };
        assert_eq!(
            err.to_string(),
            "table at 0x100000 has length 0x10, shorter than its header"
        );

        let err = AcpiError::InvalidShutdownPort { port: 0x1_0000 };
        assert_eq!(err.to_string(), "invalid shutdown port 0x10000");
    }
}
