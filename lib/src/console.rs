//! Console output primitives used by diagnostic commands.
//!
//! The line-editing console itself lives outside this crate. Code that
//! prints tables or messages talks to it through the [`Console`] trait, which
//! mirrors the primitive set the console layer provides: print a string,
//! print a character, print a byte/word/dword as fixed-width hex.
//!
//! [`SystemConsole`] forwards to whatever backend the console layer
//! registered with [`console_register_backend`]. Output written before a
//! backend exists is dropped.

use core::sync::atomic::{AtomicPtr, Ordering};

use crate::numfmt::NumBuf;
use crate::string::nul_terminated_len;

pub trait Console {
    /// Emit one raw byte.
    fn print_char(&mut self, byte: u8);

    /// Emit raw bytes, one at a time.
    fn print_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.print_char(b);
        }
    }

    fn print(&mut self, text: &str) {
        self.print_bytes(text.as_bytes());
    }

    fn print_hex_byte(&mut self, value: u8) {
        let mut buf = NumBuf::<3>::new();
        let text = buf.format_hex_u8(value);
        self.print_bytes(&text[..nul_terminated_len(text)]);
    }

    fn print_hex_word(&mut self, value: u16) {
        let mut buf = NumBuf::<5>::new();
        let text = buf.format_hex_u16(value);
        self.print_bytes(&text[..nul_terminated_len(text)]);
    }

    fn print_hex_dword(&mut self, value: u32) {
        let mut buf = NumBuf::<9>::new();
        let text = buf.format_hex_u32(value);
        self.print_bytes(&text[..nul_terminated_len(text)]);
    }
}

impl<C: Console + ?Sized> Console for &mut C {
    fn print_char(&mut self, byte: u8) {
        (**self).print_char(byte);
    }

    fn print_bytes(&mut self, bytes: &[u8]) {
        (**self).print_bytes(bytes);
    }
}

// ---------------------------------------------------------------------------
// Backend dispatch
// ---------------------------------------------------------------------------

/// Signature of a console backend: write these bytes to the screen/serial.
pub type ConsoleBackend = fn(&[u8]);

/// Stored as a raw pointer; `null` means "no console yet".
static BACKEND: AtomicPtr<()> = AtomicPtr::new(core::ptr::null_mut());

/// Register the console layer's output routine.
pub fn console_register_backend(backend: ConsoleBackend) {
    BACKEND.store(backend as *mut (), Ordering::Release);
}

/// Returns true once a console backend has been registered.
pub fn console_is_available() -> bool {
    !BACKEND.load(Ordering::Acquire).is_null()
}

/// Console handle that writes through the registered backend.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemConsole;

impl SystemConsole {
    fn dispatch(bytes: &[u8]) {
        let ptr = BACKEND.load(Ordering::Acquire);
        if ptr.is_null() {
            return;
        }
        // SAFETY: `console_register_backend` only stores valid `ConsoleBackend`
        // fn pointers, which are the same size as `*mut ()`.
        let backend: ConsoleBackend = unsafe { core::mem::transmute(ptr) };
        backend(bytes);
    }
}

impl Console for SystemConsole {
    fn print_char(&mut self, byte: u8) {
        Self::dispatch(core::slice::from_ref(&byte));
    }

    fn print_bytes(&mut self, bytes: &[u8]) {
        Self::dispatch(bytes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    struct Capture(Vec<u8>);

    impl Console for Capture {
        fn print_char(&mut self, byte: u8) {
            self.0.push(byte);
        }
    }

    #[test]
    fn test_default_primitives() {
        let mut out = Capture(Vec::new());
        out.print("Sig ");
        out.print_hex_byte(0x1);
        out.print_char(b' ');
        out.print_hex_word(0xB004);
        out.print_char(b' ');
        out.print_hex_dword(0x000E_0010);
        assert_eq!(out.0, b"Sig 01 B004 000E0010");
    }

    fn emit_checksum<C: Console>(mut out: C) {
        out.print_hex_byte(0xAB);
    }

    #[test]
    fn test_forwarding_through_mut_ref() {
        let mut out = Capture(Vec::new());
        emit_checksum(&mut out);
        assert_eq!(out.0, b"AB");
    }
}
