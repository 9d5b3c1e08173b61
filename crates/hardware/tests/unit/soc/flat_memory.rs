//! Flat RAM board.

use i860_core::common::{CoreError, PhysAddr};
use i860_core::soc::{BlankSource, Bus, FlatMemory};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case::fits_exactly(0x1000, 16, true)]
#[case::inside(0x1004, 8, true)]
#[case::past_end(0x1009, 8, false)]
#[case::below_base(0x0fff, 1, false)]
#[case::wraps(0xffff_ffff, 2, false)]
fn load_bounds(#[case] addr: u32, #[case] len: usize, #[case] ok: bool) {
    let mut ram = FlatMemory::new(0x1000, 16);
    let result = ram.load(addr, &vec![0xaa; len]);
    assert_eq!(result.is_ok(), ok);
    if let Err(err) = result {
        assert!(matches!(err, CoreError::ImageTooLarge { .. }));
    }
}

#[test]
fn geometry() {
    let ram = FlatMemory::new(0x4000, 64);
    assert_eq!((ram.base(), ram.len()), (0x4000, 64));
    assert!(!ram.is_empty());
    assert!(FlatMemory::new(0, 0).is_empty());
}

#[test]
fn unmapped_accesses() {
    let mut ram = FlatMemory::new(0x1000, 8);
    ram.write_u32_le(PhysAddr::new(0x2000), 0xffff_ffff);
    assert_eq!(ram.read_u32_le(PhysAddr::new(0x2000)), 0);
    // A straddling access keeps the in-range bytes only.
    ram.write_u32_le(PhysAddr::new(0x1006), 0x4433_2211);
    assert_eq!(&ram.as_slice()[6..], &[0x11, 0x22]);
    assert_eq!(ram.read_u32_le(PhysAddr::new(0x1006)), 0x0000_2211);
}

#[test]
fn blanking_levels_are_tracked_per_source() {
    let mut ram = FlatMemory::new(0, 4);
    assert!(!ram.is_blanked(BlankSource::Display));
    ram.blank_changed(BlankSource::Video, true);
    assert!(ram.is_blanked(BlankSource::Video));
    assert!(!ram.is_blanked(BlankSource::Display));
    ram.blank_changed(BlankSource::Video, false);
    assert!(!ram.is_blanked(BlankSource::Video));
}

#[test]
fn name_identifies_board() {
    assert_eq!(FlatMemory::new(0, 1).name(), "RAM");
}
