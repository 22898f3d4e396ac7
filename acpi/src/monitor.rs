//! Monitor commands backed by the firmware tables.
//!
//! The command loop calls these as zero-argument routines by name. Each one
//! has an instance-level counterpart on [`AcpiTables`] that takes its console
//! (and power sink) explicitly; the zero-argument versions bind those to the
//! platform instance, the system console and real port I/O.

use bootmon_lib::console::{Console, SystemConsole};
use spin::Once;

use crate::config::AcpiConfig;
use crate::memory::{DirectMap, PhysMemory};
use crate::power::{PortPowerControl, PowerControl};
use crate::render::{RSDP_NOT_FOUND, render_all_tables, render_root_pointer};
use crate::tables::AcpiTables;

pub const POINTER_LEGEND: &str = "Addr     Sig      Ch Vendor Rv RSDTAddr\n";
pub const TABLE_LEGEND: &str =
    "Addr     Sig  Length   Rv Ch OEM    OEM Tbl  OEMRev   Crtr CrtrRev\n";
pub const SHUTDOWN_FAILED: &str = "Error: Shutdown failed.\n";

impl<M: PhysMemory> AcpiTables<M> {
    pub fn show_root_pointer<C: Console + ?Sized>(&self, out: &mut C) {
        match self.locate_root_pointer() {
            Some(rsdp) => {
                out.print(POINTER_LEGEND);
                render_root_pointer(out, rsdp);
            }
            None => out.print(RSDP_NOT_FOUND),
        }
    }

    pub fn show_all_tables<C: Console + ?Sized>(&self, out: &mut C) {
        let rsdp = self.locate_root_pointer();
        if rsdp.is_some() {
            out.print(TABLE_LEGEND);
        }
        render_all_tables(out, self, rsdp);
    }

    /// Root pointer, a blank line, then every table header.
    pub fn show_headers<C: Console + ?Sized>(&self, out: &mut C) {
        self.show_root_pointer(out);
        out.print_char(b'\n');
        self.show_all_tables(out);
    }

    /// Power off, or say why not.
    pub fn shutdown<C: Console + ?Sized>(&self, out: &mut C, power: &mut impl PowerControl) {
        if self.perform_shutdown(power).is_err() {
            out.print(SHUTDOWN_FAILED);
        }
    }
}

// =============================================================================
// Platform instance
// =============================================================================

pub type PlatformTables = AcpiTables<&'static (dyn PhysMemory + Sync)>;

// SAFETY: the monitor runs with physical memory identity mapped.
static IDENTITY_MAP: DirectMap = unsafe { DirectMap::identity() };

static PLATFORM: Once<PlatformTables> = Once::new();

/// Install the platform's memory view and configuration.
///
/// Only the first installation (explicit or the lazy identity-mapped
/// default) takes effect; returns false if one already happened.
pub fn acpi_init(memory: &'static (dyn PhysMemory + Sync), config: AcpiConfig) -> bool {
    let mut installed = false;
    PLATFORM.call_once(|| {
        installed = true;
        AcpiTables::new(memory, config)
    });
    installed
}

/// The platform instance, defaulting to the identity map.
pub fn platform() -> &'static PlatformTables {
    PLATFORM.call_once(|| {
        let memory: &'static (dyn PhysMemory + Sync) = &IDENTITY_MAP;
        AcpiTables::new(memory, AcpiConfig::DEFAULT)
    })
}

pub fn acpi_show_rsdp() {
    platform().show_root_pointer(&mut SystemConsole);
}

pub fn acpi_show_tables() {
    platform().show_all_tables(&mut SystemConsole);
}

pub fn acpi_show_headers() {
    platform().show_headers(&mut SystemConsole);
}

pub fn acpi_shutdown() {
    // SAFETY: the monitor runs at ring 0 with port access.
    let mut power = unsafe { PortPowerControl::new() };
    platform().shutdown(&mut SystemConsole, &mut power);
}

// =============================================================================
// Command registry
// =============================================================================

#[derive(Clone, Copy, Debug)]
pub struct MonitorCommand {
    pub name: &'static str,
    pub help: &'static str,
    pub routine: fn(),
}

pub static ACPI_COMMANDS: [MonitorCommand; 2] = [
    MonitorCommand {
        name: "acpi",
        help: "Show acpi headers",
        routine: acpi_show_headers,
    },
    MonitorCommand {
        name: "shutdown",
        help: "Turn the system off",
        routine: acpi_shutdown,
    },
];

pub fn find_command(name: &str) -> Option<&'static MonitorCommand> {
    ACPI_COMMANDS.iter().find(|cmd| cmd.name == name)
}
