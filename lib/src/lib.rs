#![no_std]

#[cfg(test)]
extern crate std;

pub mod cmdline;
pub mod console;
pub mod klog;
pub mod numfmt;
pub mod ports;
pub mod string;

pub use console::{Console, SystemConsole, console_register_backend};
pub use klog::{
    KlogLevel, klog_get_level, klog_init, klog_register_backend, klog_set_level,
    klog_set_level_from_cmdline,
};
pub use numfmt::NumBuf;
