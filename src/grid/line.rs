//! Line traversal and the slide/merge pass.
//!
//! A move decomposes into independent lines: rows for left/right, columns
//! for up/down. Each line is listed starting at the cell nearest the edge
//! the tiles move toward. One pass over that list compacts, merges and
//! re-compacts at once:
//!
//! - every occupied cell walks toward the edge, skipping empty cells
//! - the first occupied cell it meets is a merge target only if it holds
//!   the same value and is unlocked
//! - otherwise the tile stops in the last empty cell it passed
//!
//! A merge locks the destination, so `[2, 2, 2, 2]` moved left becomes
//! `[4, 4, _, _]` and `[2, 2, 2]` becomes `[4, 2, _]`.
//!
//! Every pass gets a `headroom`: how much score can still be gained before
//! the score counter overflows. A merge whose value would push the move's
//! total past it is refused and the tiles stay apart.

use smallvec::SmallVec;

use crate::core::{Cell, Direction, Value};

/// Flat cell indices of one line, nearest-to-edge first.
///
/// Inline capacity covers grids up to 8 wide/tall without allocating.
pub(crate) type Line = SmallVec<[usize; 8]>;

/// Totals from sliding one or more lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Slide {
    /// Any tile changed position or value.
    pub moved: bool,
    /// Sum of all merged tile values.
    pub gained: Value,
    /// Number of merges.
    pub merges: usize,
}

impl Slide {
    /// Record a merge worth `sum` if the running total stays within
    /// `headroom`. Returns `false` when the merge must be refused.
    fn try_gain(&mut self, sum: Value, headroom: Value) -> bool {
        match self.gained.checked_add(sum) {
            Some(total) if total <= headroom => {
                self.gained = total;
                self.merges += 1;
                true
            }
            _ => false,
        }
    }
}

/// Every line of a `width` x `height` grid for `direction`.
pub(crate) fn lines(direction: Direction, width: usize, height: usize) -> Vec<Line> {
    match direction {
        Direction::Left => (0..height)
            .map(|y| (0..width).map(|x| y * width + x).collect())
            .collect(),
        Direction::Right => (0..height)
            .map(|y| (0..width).rev().map(|x| y * width + x).collect())
            .collect(),
        Direction::Up => (0..width)
            .map(|x| (0..height).map(|y| y * width + x).collect())
            .collect(),
        Direction::Down => (0..width)
            .map(|x| (0..height).rev().map(|y| y * width + x).collect())
            .collect(),
    }
}

/// Slide every line of the grid. Locks are not cleared here.
pub(crate) fn slide_all(
    cells: &mut [Cell],
    direction: Direction,
    width: usize,
    height: usize,
    headroom: Value,
) -> Slide {
    let mut slide = Slide::default();
    for line in lines(direction, width, height) {
        slide_line(cells, &line, &mut slide, headroom);
    }
    slide
}

/// Slide a single line toward its first index, adding to `slide`.
pub(crate) fn slide_line(cells: &mut [Cell], line: &[usize], slide: &mut Slide, headroom: Value) {
    for i in 1..line.len() {
        let Some(value) = cells[line[i]].value() else {
            continue;
        };

        let mut target = i;
        let mut merged = None;
        for j in (0..i).rev() {
            let cell = &cells[line[j]];
            match cell.value() {
                None => target = j,
                Some(other) if other == value && !cell.is_locked() => {
                    if let Some(sum) = value.checked_add(other) {
                        if slide.try_gain(sum, headroom) {
                            target = j;
                            merged = Some(sum);
                        }
                    }
                    break;
                }
                Some(_) => break,
            }
        }

        if target == i {
            continue;
        }

        cells[line[i]].take();
        let dest = &mut cells[line[target]];
        match merged {
            Some(sum) => {
                dest.set(Some(sum));
                dest.lock();
            }
            None => dest.set(Some(value)),
        }
        slide.moved = true;
    }
}
