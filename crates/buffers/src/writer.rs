//! Auto-growing binary buffer writer.

/// Default initial capacity of a fresh [`Writer`].
const DEFAULT_CAPACITY: usize = 64 * 1024;

/// A binary writer that appends big-endian data to an auto-growing buffer.
///
/// The writer keeps a cursor `x` into `uint8`. [`Writer::flush`] returns the
/// bytes written since the last flush or reset.
///
/// # Example
///
/// ```
/// use msgpack_buffers::Writer;
///
/// let mut writer = Writer::new();
/// writer.u8u16(0xcd, 0x4000);
/// assert_eq!(writer.flush(), vec![0xcd, 0x40, 0x00]);
/// ```
#[derive(Debug, Clone)]
pub struct Writer {
    /// The underlying buffer. Bytes past `x` are scratch space.
    pub uint8: Vec<u8>,
    /// Start of the not-yet-flushed region.
    pub x0: usize,
    /// Current cursor position.
    pub x: usize,
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer {
    /// Creates a writer with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a writer with room for `capacity` bytes before growing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            uint8: vec![0; capacity.max(16)],
            x0: 0,
            x: 0,
        }
    }

    /// Makes sure at least `capacity` more bytes fit after the cursor.
    #[inline]
    pub fn ensure_capacity(&mut self, capacity: usize) {
        let required = self.x + capacity;
        if required > self.uint8.len() {
            let grown = (self.uint8.len() * 2).max(required);
            self.uint8.resize(grown, 0);
        }
    }

    /// Discards everything written so far.
    pub fn reset(&mut self) {
        self.x0 = 0;
        self.x = 0;
    }

    /// Returns the bytes written since the last flush and advances the flush mark.
    pub fn flush(&mut self) -> Vec<u8> {
        let out = self.uint8[self.x0..self.x].to_vec();
        self.x0 = self.x;
        out
    }

    /// Number of bytes written since the last flush.
    pub fn len(&self) -> usize {
        self.x - self.x0
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    fn put(&mut self, bytes: &[u8]) {
        self.ensure_capacity(bytes.len());
        let x = self.x;
        self.uint8[x..x + bytes.len()].copy_from_slice(bytes);
        self.x = x + bytes.len();
    }

    #[inline]
    pub fn u8(&mut self, val: u8) {
        self.put(&[val]);
    }

    #[inline]
    pub fn i8(&mut self, val: i8) {
        self.put(&val.to_be_bytes());
    }

    #[inline]
    pub fn u16(&mut self, val: u16) {
        self.put(&val.to_be_bytes());
    }

    #[inline]
    pub fn i16(&mut self, val: i16) {
        self.put(&val.to_be_bytes());
    }

    #[inline]
    pub fn u32(&mut self, val: u32) {
        self.put(&val.to_be_bytes());
    }

    #[inline]
    pub fn i32(&mut self, val: i32) {
        self.put(&val.to_be_bytes());
    }

    #[inline]
    pub fn u64(&mut self, val: u64) {
        self.put(&val.to_be_bytes());
    }

    #[inline]
    pub fn i64(&mut self, val: i64) {
        self.put(&val.to_be_bytes());
    }

    #[inline]
    pub fn f32(&mut self, val: f32) {
        self.put(&val.to_be_bytes());
    }

    #[inline]
    pub fn f64(&mut self, val: f64) {
        self.put(&val.to_be_bytes());
    }

    /// Writes a tag byte followed by a `u8`.
    #[inline]
    pub fn u8u8(&mut self, tag: u8, val: u8) {
        self.put(&[tag, val]);
    }

    /// Writes a tag byte followed by a big-endian `u16`.
    #[inline]
    pub fn u8u16(&mut self, tag: u8, val: u16) {
        self.ensure_capacity(3);
        self.u8(tag);
        self.u16(val);
    }

    /// Writes a tag byte followed by a big-endian `u32`.
    #[inline]
    pub fn u8u32(&mut self, tag: u8, val: u32) {
        self.ensure_capacity(5);
        self.u8(tag);
        self.u32(val);
    }

    /// Writes a tag byte followed by a big-endian `u64`.
    #[inline]
    pub fn u8u64(&mut self, tag: u8, val: u64) {
        self.ensure_capacity(9);
        self.u8(tag);
        self.u64(val);
    }

    /// Writes a tag byte followed by a big-endian `f64`.
    #[inline]
    pub fn u8f64(&mut self, tag: u8, val: f64) {
        self.ensure_capacity(9);
        self.u8(tag);
        self.f64(val);
    }

    /// Writes a raw byte slice.
    pub fn buf(&mut self, bytes: &[u8]) {
        self.put(bytes);
    }

    /// Writes UTF-8 text without any length prefix.
    pub fn utf8(&mut self, text: &str) {
        self.put(text.as_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grows_past_initial_capacity() {
        let mut w = Writer::with_capacity(16);
        for i in 0..100u8 {
            w.u8(i);
        }
        let out = w.flush();
        assert_eq!(out.len(), 100);
        assert_eq!(out[99], 99);
    }

    #[test]
    fn flush_returns_only_new_bytes() {
        let mut w = Writer::new();
        w.u16(0x0102);
        assert_eq!(w.flush(), vec![1, 2]);
        w.u8(3);
        assert_eq!(w.flush(), vec![3]);
        assert!(w.is_empty());
    }

    #[test]
    fn reset_discards_unflushed() {
        let mut w = Writer::new();
        w.u32(0xdeadbeef);
        w.reset();
        w.u8u8(0xd0, 0x9c);
        assert_eq!(w.flush(), vec![0xd0, 0x9c]);
    }

    #[test]
    fn tagged_writes_are_big_endian() {
        let mut w = Writer::new();
        w.u8u32(0xd2, 0xffff246b);
        w.u8u64(0xcf, 100102831903);
        assert_eq!(
            w.flush(),
            vec![0xd2, 0xff, 0xff, 0x24, 0x6b, 0xcf, 0, 0, 0, 0x17, 0x4e, 0x97, 0xff, 0x1f]
        );
    }
}
