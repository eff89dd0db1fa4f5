use crate::coords::{Extent, Position};

/// Top-left position that centers `window` on `screen`.
///
/// Computed per axis as `(screen - window) / 2` in signed arithmetic, so a
/// window larger than the screen gets a negative offset.
pub fn centered_position(screen: Extent, window: Extent) -> Position {
    let axis = |s: u32, w: u32| ((i64::from(s) - i64::from(w)) / 2) as i32;
    Position::new(
        axis(screen.width, window.width),
        axis(screen.height, window.height),
    )
}
