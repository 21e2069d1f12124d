//! Indexed-color framebuffer
//!
//! One byte per pixel, row-major. The backing storage is a caller-provided
//! `[[u8; W]; H]`, typically a `static`, so large panels do not need to
//! fit the frame on the stack. The framebuffer holds the only mutable
//! borrow of that storage for its whole lifetime.
//!
//! Writes outside the grid are dropped. Nothing here panics on bad
//! coordinates and nothing wraps around to the next row.

/// Backing storage for a `W` x `H` framebuffer
pub type FrameStorage<const W: usize, const H: usize> = [[u8; W]; H];

/// Framebuffer of RGB332 palette indices
pub struct Framebuffer<'a, const W: usize, const H: usize> {
    cells: &'a mut FrameStorage<W, H>,
}

impl<'a, const W: usize, const H: usize> Framebuffer<'a, W, H> {
    /// Frame width in pixels
    pub const WIDTH: usize = W;
    /// Frame height in pixels
    pub const HEIGHT: usize = H;

    /// Take over `storage` and clear it to index 0
    pub fn new(storage: &'a mut FrameStorage<W, H>) -> Self {
        let mut fb = Self { cells: storage };
        fb.clear(0);
        fb
    }

    /// Dimensions as (width, height)
    pub const fn dimensions(&self) -> (usize, usize) {
        (W, H)
    }

    /// Check whether (x, y) lies on the grid
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < W && (y as usize) < H
    }

    /// Store a palette index, ignoring out-of-bounds coordinates
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, index: u8) {
        if self.contains(x, y) {
            self.cells[y as usize][x as usize] = index;
        }
    }

    /// [`Framebuffer::set`] for coordinates computed in wide arithmetic
    #[inline]
    pub(crate) fn plot(&mut self, x: i64, y: i64, index: u8) {
        if let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) {
            if x < W && y < H {
                self.cells[y][x] = index;
            }
        }
    }

    /// Read a palette index
    ///
    /// Returns `None` outside the grid.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        if self.contains(x, y) {
            Some(self.cells[y as usize][x as usize])
        } else {
            None
        }
    }

    /// Set every cell to `index`
    pub fn clear(&mut self, index: u8) {
        for row in self.cells.iter_mut() {
            row.fill(index);
        }
    }

    /// Fill `len` cells of row `y` starting at `x`
    ///
    /// The caller has already clipped the span to the grid.
    #[inline]
    pub(crate) fn fill_span(&mut self, y: usize, x: usize, len: usize, index: u8) {
        self.cells[y][x..x + len].fill(index);
    }

    /// One row of indices
    pub fn row(&self, y: usize) -> Option<&[u8; W]> {
        self.cells.get(y)
    }

    /// All rows, top to bottom
    pub fn rows(&self) -> &[[u8; W]] {
        &self.cells[..]
    }

    /// All cells as one row-major slice
    pub fn as_bytes(&self) -> &[u8] {
        self.cells.as_flattened()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_clears_storage() {
        let mut storage = [[0xAAu8; 4]; 3];
        let fb = Framebuffer::new(&mut storage);
        assert!(fb.as_bytes().iter().all(|&c| c == 0));
        assert_eq!(fb.dimensions(), (4, 3));
    }

    #[test]
    fn test_set_get() {
        let mut storage = [[0u8; 4]; 3];
        let mut fb = Framebuffer::new(&mut storage);

        fb.set(3, 2, 0x42);
        assert_eq!(fb.get(3, 2), Some(0x42));
        assert_eq!(fb.as_bytes()[2 * 4 + 3], 0x42);
    }

    #[test]
    fn test_out_of_bounds_is_ignored() {
        let mut storage = [[0u8; 4]; 3];
        let mut fb = Framebuffer::new(&mut storage);

        fb.set(4, 0, 1);
        fb.set(0, 3, 1);
        fb.set(-1, 0, 1);
        fb.set(0, -1, 1);

        assert!(fb.as_bytes().iter().all(|&c| c == 0));
        assert_eq!(fb.get(4, 0), None);
        assert_eq!(fb.get(-1, -1), None);
    }

    #[test]
    fn test_no_wrap_to_next_row() {
        let mut storage = [[0u8; 4]; 3];
        let mut fb = Framebuffer::new(&mut storage);

        // x == W must not land on (0, y + 1)
        fb.set(4, 1, 9);
        assert_eq!(fb.get(0, 2), Some(0));
    }

    #[test]
    fn test_clear() {
        let mut storage = [[0u8; 4]; 3];
        let mut fb = Framebuffer::new(&mut storage);
        fb.clear(7);
        assert!(fb.rows().iter().all(|row| row.iter().all(|&c| c == 7)));
    }

    proptest! {
        #[test]
        fn prop_set_touches_at_most_one_cell(x in -20i32..20, y in -20i32..20, idx in any::<u8>()) {
            let mut storage = [[0u8; 8]; 6];
            let mut fb = Framebuffer::new(&mut storage);
            fb.set(x, y, idx);

            let changed = fb.as_bytes().iter().filter(|&&c| c != 0).count();
            if fb.contains(x, y) {
                prop_assert!(changed <= 1);
                prop_assert_eq!(fb.get(x, y), Some(idx));
            } else {
                prop_assert_eq!(changed, 0);
            }
        }
    }
}
