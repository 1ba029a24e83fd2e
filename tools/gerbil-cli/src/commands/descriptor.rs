//! Print the HID report descriptor.

use std::io::Write;

use anyhow::Context;
use gerbil_hid_gadget::descriptor::{descriptor_hex, FUNCTION_ATTRS, REPORT_DESCRIPTOR};

pub fn run(raw: bool) -> anyhow::Result<()> {
    if raw {
        // Suitable for `gerbil descriptor --raw > functions/hid.usb0/report_desc`.
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(&REPORT_DESCRIPTOR)
            .and_then(|_| stdout.flush())
            .context("Failed to write descriptor")?;
        return Ok(());
    }

    println!("# protocol={}", FUNCTION_ATTRS.protocol);
    println!("# subclass={}", FUNCTION_ATTRS.subclass);
    println!("# report_length={}", FUNCTION_ATTRS.report_length);
    println!("{}", descriptor_hex());
    Ok(())
}
