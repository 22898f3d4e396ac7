//! Diagnostic rendering of root pointer and table headers.
//!
//! One line per record, fields separated by single spaces. Character fields
//! are emitted byte for byte, so a corrupted table shows up as whatever it
//! contains. Addresses and integers are fixed-width uppercase hex.

use bootmon_lib::console::Console;

use crate::memory::PhysMemory;
use crate::rsdp::Rsdp;
use crate::tables::{AcpiTables, SdtHeader};

pub const RSDP_NOT_FOUND: &str = "Error: RSDP not found\n";
pub const RSDT_UNREADABLE: &str = "Error: RSDT unreadable\n";

/// `addr sig checksum vendor revision rsdt`
pub fn render_root_pointer<C: Console + ?Sized>(out: &mut C, rsdp: &Rsdp) {
    out.print_hex_dword(rsdp.address().as_u32_truncated());
    out.print_char(b' ');
    out.print_bytes(rsdp.signature());
    out.print_char(b' ');
    out.print_hex_byte(rsdp.checksum());
    out.print_char(b' ');
    out.print_bytes(rsdp.oem_id());
    out.print_char(b' ');
    out.print_hex_byte(rsdp.revision());
    out.print_char(b' ');
    out.print_hex_dword(rsdp.rsdt_address().as_u32_truncated());
    out.print_char(b'\n');
}

/// `addr sig length rev checksum oem oem_table oem_rev creator creator_rev`
pub fn render_table_header<C: Console + ?Sized>(out: &mut C, header: &SdtHeader) {
    out.print_hex_dword(header.address().as_u32_truncated());
    out.print_char(b' ');
    out.print_bytes(header.signature());
    out.print_char(b' ');
    out.print_hex_dword(header.length());
    out.print_char(b' ');
    out.print_hex_byte(header.revision());
    out.print_char(b' ');
    out.print_hex_byte(header.checksum());
    out.print_char(b' ');
    out.print_bytes(header.oem_id());
    out.print_char(b' ');
    out.print_bytes(header.oem_table_id());
    out.print_char(b' ');
    out.print_hex_dword(header.oem_revision());
    out.print_char(b' ');
    out.print_bytes(header.creator_id());
    out.print_char(b' ');
    out.print_hex_dword(header.creator_revision());
    out.print_char(b'\n');
}

/// The RSDT header followed by every child header in walk order.
///
/// With no root pointer only the not-found line is printed and the table
/// tree is not read at all.
pub fn render_all_tables<C, M>(out: &mut C, tables: &AcpiTables<M>, rsdp: Option<&Rsdp>)
where
    C: Console + ?Sized,
    M: PhysMemory,
{
    let Some(rsdp) = rsdp else {
        out.print(RSDP_NOT_FOUND);
        return;
    };
    let Some(root) = tables.root_table(rsdp) else {
        out.print(RSDT_UNREADABLE);
        return;
    };

    render_table_header(out, &root);
    for child in tables.child_tables(rsdp) {
        render_table_header(out, &child);
    }
}
