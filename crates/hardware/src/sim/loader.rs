//! Raw image loading.
//!
//! Images are flat binaries copied byte for byte to a physical address. There
//! is no header and no relocation; the caller picks the load address and the
//! start program counter.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::common::{CoreError, PhysAddr};
use crate::soc::{Bus, FlatMemory};

/// Reads an image file into memory.
///
/// # Errors
///
/// [`CoreError::Io`] if the file cannot be read.
pub fn read_image(path: impl AsRef<Path>) -> Result<Vec<u8>, CoreError> {
    let path = path.as_ref();
    let image = fs::read(path)?;
    info!(target: "i860::load", path = %path.display(), len = image.len(), "read image");
    Ok(image)
}

/// Copies `image` into `ram` at physical address `addr`.
///
/// # Errors
///
/// [`CoreError::ImageTooLarge`] if the image does not fit in the region.
pub fn load_into(ram: &mut FlatMemory, addr: u32, image: &[u8]) -> Result<(), CoreError> {
    ram.load(addr, image)?;
    info!(target: "i860::load", addr = format_args!("{addr:#010x}"), len = image.len(), "loaded image");
    Ok(())
}

/// Reads the file at `path` and copies it into `ram` at `addr`. Returns the image length.
///
/// # Errors
///
/// As [`read_image`] and [`load_into`].
pub fn load_file(ram: &mut FlatMemory, addr: u32, path: impl AsRef<Path>) -> Result<usize, CoreError> {
    let image = read_image(path)?;
    load_into(ram, addr, &image)?;
    Ok(image.len())
}

/// Writes `image` through any bus starting at `addr`. The bus decides what
/// happens to bytes outside its decoded ranges.
pub fn write_through(bus: &mut dyn Bus, addr: u32, image: &[u8]) {
    bus.write_bytes(PhysAddr::new(addr), image);
}
