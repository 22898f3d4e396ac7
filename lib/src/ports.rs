//! I/O port numbers and raw port access.
//!
//! Every `in`/`out` instruction the monitor issues goes through the
//! functions in this module, which wrap [`x86_64::instructions::port::Port`].

use x86_64::instructions::port::Port;

pub const COM1: u16 = 0x3F8;

pub const UART_REG_THR: u16 = 0;
pub const UART_REG_LSR: u16 = 5;

pub const UART_LSR_TX_EMPTY: u8 = 0x20;

/// Read a byte from an I/O port.
///
/// # Safety
///
/// Port I/O. The caller must know that reading `port` has no side effects
/// it is not prepared for.
#[inline(always)]
pub unsafe fn inb(port: u16) -> u8 {
    let mut port = Port::<u8>::new(port);
    unsafe { port.read() }
}

/// Write a byte to an I/O port.
///
/// # Safety
///
/// Port I/O. The caller must ensure `port` refers to a device that expects
/// this write.
#[inline(always)]
pub unsafe fn outb(port: u16, value: u8) {
    let mut port = Port::<u8>::new(port);
    unsafe { port.write(value) }
}

/// Write a 16-bit word to an I/O port.
///
/// # Safety
///
/// Port I/O. Writing to a power-management control port can turn the
/// machine off; the caller must mean it.
#[inline(always)]
pub unsafe fn outw(port: u16, value: u16) {
    let mut port = Port::<u16>::new(port);
    unsafe { port.write(value) }
}

// ---------------------------------------------------------------------------
// Low-level serial I/O primitives
// ---------------------------------------------------------------------------

/// Write one byte to a UART, polling the Line Status Register until the
/// transmit holding register is empty.
///
/// # Safety
///
/// Port I/O.  Caller must ensure `base` refers to a valid, initialised
/// 8250/16550-compatible UART and that concurrent access is serialised.
#[inline(always)]
pub unsafe fn serial_putc(base: u16, byte: u8) {
    unsafe {
        while (inb(base + UART_REG_LSR) & UART_LSR_TX_EMPTY) == 0 {
            core::hint::spin_loop();
        }
        outb(base + UART_REG_THR, byte);
    }
}

/// Write a byte slice to a UART, converting lone `\n` into `\r\n`.
///
/// # Safety
///
/// Same requirements as [`serial_putc`].
#[inline]
pub unsafe fn serial_write_bytes(base: u16, bytes: &[u8]) {
    for &b in bytes {
        if b == b'\n' {
            unsafe { serial_putc(base, b'\r') };
        }
        unsafe { serial_putc(base, b) };
    }
}
