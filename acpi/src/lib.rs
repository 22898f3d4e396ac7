//! Firmware table locator and reader for the bootmon monitor.
//!
//! Finds the ACPI root pointer in the BIOS area, walks the RSDT, pulls the
//! PM1a control port out of the FADT for soft-off, and prints table headers
//! for diagnostics. Zero-allocation; all physical memory access goes through
//! a [`memory::PhysMemory`] view.
//!
//! # Architecture
//!
//! - [`memory`]: physical memory views (direct map, host-side image).
//! - [`rsdp`]: root pointer record and BIOS area scan.
//! - [`tables`]: table headers, RSDT walk, lookup by signature, [`AcpiTables`].
//! - [`fadt`]: the PM1a control block of the `"FACP"` table.
//! - [`power`]: soft-off through an injectable [`power::PowerControl`].
//! - [`render`]: one-line diagnostic rendering of records.
//! - [`monitor`]: the `acpi`/`shutdown` monitor commands.
//!
//! # Usage
//!
//! ```ignore
//! use bootmon_acpi::{AcpiConfig, AcpiTables, memory::DirectMap};
//!
//! let tables = AcpiTables::new(unsafe { DirectMap::identity() }, AcpiConfig::DEFAULT);
//! if let Some(port) = tables.shutdown_port() {
//!     // PM1a control port
//! }
//! ```

#![no_std]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod error;
pub mod fadt;
pub mod memory;
pub mod monitor;
pub mod power;
pub mod render;
pub mod rsdp;
pub mod tables;

#[cfg(test)]
mod test_fixtures;

pub use config::AcpiConfig;
pub use error::{AcpiError, AcpiResult};
pub use fadt::Fadt;
pub use memory::{DirectMap, PhysMemory, SliceMemory};
pub use monitor::{
    ACPI_COMMANDS, MonitorCommand, acpi_init, acpi_show_headers, acpi_show_rsdp, acpi_show_tables,
    acpi_shutdown,
};
pub use power::{PortPowerControl, PowerControl};
pub use rsdp::Rsdp;
pub use tables::{AcpiTables, ChildTables, SdtHeader};
