//! bootmon hardware ABI types
//!
//! Value types and register layouts for the firmware-facing parts of the
//! monitor. Nothing here touches hardware; the crate only describes it.

#![no_std]
#![forbid(unsafe_code)]

pub mod acpi;
pub mod addr;

pub use acpi::Pm1Control;
pub use addr::PhysAddr;
