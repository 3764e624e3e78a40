/// Byte-addressable storage behind a disk image

use std::io::{self, Read, Seek, SeekFrom, Write};

/// Seek/read/write/size capability a disk image needs from its backing store
///
/// Implemented for every `Read + Write + Seek` type, so a `File`, a borrowed
/// `&mut File` or an in-memory `Cursor<Vec<u8>>` can all back an image. All
/// calls are blocking and move the stream cursor.
pub trait Storage: Read + Write + Seek {
    /// Total size of the store in bytes, leaving the cursor where it was
    fn size(&mut self) -> io::Result<u64> {
        let current = self.stream_position()?;
        let end = self.seek(SeekFrom::End(0))?;
        if end != current {
            self.seek(SeekFrom::Start(current))?;
        }
        Ok(end)
    }

    /// Fill `buf` from `offset`; a short read is an `UnexpectedEof` error
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> io::Result<()> {
        self.seek(SeekFrom::Start(offset))?;
        self.read_exact(buf)
    }

    /// Write all of `buf` at `offset` and flush
    fn write_at(&mut self, offset: u64, buf: &[u8]) -> io::Result<()> {
        self.seek(SeekFrom::Start(offset))?;
        self.write_all(buf)?;
        self.flush()
    }
}

impl<T: Read + Write + Seek + ?Sized> Storage for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_size_keeps_cursor() {
        let mut store = Cursor::new(vec![0u8; 300]);
        store.set_position(42);

        assert_eq!(store.size().unwrap(), 300);
        assert_eq!(store.position(), 42);
    }

    #[test]
    fn test_read_write_at() {
        let mut store = Cursor::new(vec![0u8; 64]);
        store.write_at(10, &[1, 2, 3]).unwrap();

        let mut buf = [0u8; 5];
        store.read_at(9, &mut buf).unwrap();
        assert_eq!(buf, [0, 1, 2, 3, 0]);
    }

    #[test]
    fn test_short_read_fails() {
        let mut store = Cursor::new(vec![0u8; 16]);
        let mut buf = [0u8; 8];

        let err = store.read_at(12, &mut buf).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    fn stamp<S: Storage>(mut store: S) -> io::Result<u64> {
        store.write_at(0, &[0xAA])?;
        store.size()
    }

    #[test]
    fn test_borrowed_handle() {
        let mut inner = Cursor::new(vec![0u8; 8]);

        assert_eq!(stamp(&mut inner).unwrap(), 8);
        assert_eq!(inner.get_ref()[0], 0xAA);
    }
}
