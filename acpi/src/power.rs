//! ACPI soft-off.
//!
//! Power-off is a single 16-bit write of SLP_EN to the PM1a control port
//! named by the FADT. The write goes through [`PowerControl`] so it can be
//! observed off-hardware; [`PortPowerControl`] issues the real `outw`.

use bootmon_abi::acpi::Pm1Control;
use bootmon_lib::{klog_info, klog_warn, ports};

use crate::error::{AcpiError, AcpiResult};
use crate::memory::PhysMemory;
use crate::tables::AcpiTables;

/// Sink for PM1 control register writes.
pub trait PowerControl {
    fn write_pm1_control(&mut self, port: u16, value: u16);
}

impl<P: PowerControl + ?Sized> PowerControl for &mut P {
    fn write_pm1_control(&mut self, port: u16, value: u16) {
        (**self).write_pm1_control(port, value);
    }
}

/// Writes to the PM1 control port with `out` instructions.
#[derive(Debug)]
pub struct PortPowerControl {
    _private: (),
}

impl PortPowerControl {
    /// # Safety
    ///
    /// Must run at an I/O privilege level that allows port access. A write
    /// through this handle may power the machine off and never return.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl PowerControl for PortPowerControl {
    fn write_pm1_control(&mut self, port: u16, value: u16) {
        // SAFETY: the constructor's contract grants port access; the port
        // comes from the platform's FADT.
        unsafe { ports::outw(port, value) };
    }
}

/// Validate a FADT port value as a 16-bit I/O port.
pub fn shutdown_port_number(port: u32) -> AcpiResult<u16> {
    match u16::try_from(port) {
        Ok(0) | Err(_) => Err(AcpiError::InvalidShutdownPort { port }),
        Ok(port) => Ok(port),
    }
}

impl<M: PhysMemory> AcpiTables<M> {
    /// Request ACPI soft-off.
    ///
    /// On hardware a successful write does not return. An error means no
    /// write was issued.
    pub fn perform_shutdown(&self, power: &mut impl PowerControl) -> AcpiResult<()> {
        let Some(raw) = self.shutdown_port() else {
            klog_warn!("ACPI: shutdown requested but no PM1a control port found");
            return Err(AcpiError::ShutdownPortUnavailable);
        };
        let port = shutdown_port_number(raw).inspect_err(|err| klog_warn!("ACPI: {}", err))?;

        let value = Pm1Control::SLEEP_ENABLE;
        klog_info!("ACPI: writing {:#06x} to PM1a control port {:#x}", value.bits(), port);
        power.write_pm1_control(port, value.bits());
        Ok(())
    }
}
