//! Binary pixel masks
//!
//! A [`Mask`] is a row-major, one-byte-per-pixel buffer where every byte is
//! either 0 or 255. Region rasterization, color matching and the
//! replacement step all exchange masks of the image's size.

const ON: u8 = 255;
const OFF: u8 = 0;

/// Binary mask the size of an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Mask {
    /// All-zero mask.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![OFF; width as usize * height as usize],
        }
    }

    /// Mask with every pixel set.
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![ON; width as usize * height as usize],
        }
    }

    /// Build a mask by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> bool) -> Self {
        let mut mask = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                if f(x, y) {
                    let idx = mask.index(x, y);
                    mask.data[idx] = ON;
                }
            }
        }
        mask
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Whether the pixel at (x, y) is set. Out-of-bounds reads are unset.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.data[self.index(x, y)] == ON
    }

    /// Set or clear the pixel at (x, y). Out-of-bounds writes are ignored.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, on: bool) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.data[idx] = if on { ON } else { OFF };
        }
    }

    /// Set a pixel given signed coordinates, ignoring anything off-image.
    #[inline]
    pub(crate) fn set_signed(&mut self, x: i64, y: i64) {
        if x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64 {
            self.set(x as u32, y as u32, true);
        }
    }

    /// `self |= other`
    pub fn union_with(&mut self, other: &Mask) {
        debug_assert_eq!(self.dimensions(), other.dimensions());
        for (a, b) in self.data.iter_mut().zip(&other.data) {
            *a |= *b;
        }
    }

    /// `self &= !other`
    pub fn subtract(&mut self, other: &Mask) {
        debug_assert_eq!(self.dimensions(), other.dimensions());
        for (a, b) in self.data.iter_mut().zip(&other.data) {
            *a &= !*b;
        }
    }

    /// `self &= other`
    pub fn intersect_with(&mut self, other: &Mask) {
        debug_assert_eq!(self.dimensions(), other.dimensions());
        for (a, b) in self.data.iter_mut().zip(&other.data) {
            *a &= *b;
        }
    }

    /// New mask holding the pixels set in both.
    pub fn intersection(&self, other: &Mask) -> Mask {
        let mut out = self.clone();
        out.intersect_with(other);
        out
    }

    /// Population count.
    pub fn count(&self) -> u64 {
        self.data.iter().filter(|&&v| v == ON).count() as u64
    }

    /// True when no pixel is set.
    pub fn is_empty(&self) -> bool {
        self.data.iter().all(|&v| v == OFF)
    }

    /// Coordinates of every set pixel, row by row.
    pub fn iter_set(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let width = self.width as usize;
        self.data
            .iter()
            .enumerate()
            .filter(|(_, v)| **v == ON)
            .map(move |(i, _)| ((i % width) as u32, (i / width) as u32))
    }
}
