//! Read-only memory mapping of the viewed file
//!
//! `MappedFile` owns the mapping for the lifetime of a viewer. Every read and search
//! takes an explicit offset and borrows directly from the mapped pages, so nothing is
//! copied and there is no shared cursor to save or restore.

use crate::error::{HugeviewError, Result};
use crate::file_handler::validation::{validate_file_path, validate_file_size};
use memchr::{memchr, memrchr};
use memmap2::Mmap;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Immutable byte view of a file backed by a read-only mapping
///
/// Pages are faulted in by the OS on first access; a freshly opened 40GB file costs
/// nothing until a region of it is actually displayed or searched.
#[derive(Debug)]
pub struct MappedFile {
    /// Memory-mapped file handle
    mmap: Mmap,

    /// File size in bytes (cached from metadata)
    file_size: u64,

    /// Path the mapping was created from, when opened by path
    file_path: Option<PathBuf>,
}

impl MappedFile {
    /// Validate and map the file at `file_path`
    ///
    /// # Errors
    /// * The path does not exist, is not a regular file, or is empty
    /// * The file cannot be opened or mapped
    pub fn open(file_path: impl AsRef<Path>) -> Result<Self> {
        let file_path = file_path.as_ref();
        validate_file_path(file_path)?;

        let file = File::open(file_path).map_err(|e| {
            HugeviewError::file_error(format!("Failed to open file: {}", file_path.display()), e)
        })?;

        let mut mapped = Self::from_file(&file)?;
        mapped.file_path = Some(file_path.to_path_buf());
        Ok(mapped)
    }

    /// Map an already opened file handle
    ///
    /// The handle may be closed by the caller afterwards; the mapping stays valid.
    pub fn from_file(file: &File) -> Result<Self> {
        let file_size = file
            .metadata()
            .map_err(|e| HugeviewError::file_error("Failed to get file metadata", e))?
            .len();
        validate_file_size(file_size, Path::new("<file handle>"))?;

        // SAFETY: the mapping is read-only and the file is assumed immutable while viewed.
        let mmap = unsafe {
            Mmap::map(file)
                .map_err(|e| HugeviewError::file_error("Failed to memory map file", e))?
        };

        if mmap.len() as u64 != file_size {
            return Err(HugeviewError::memory_mapping(format!(
                "mapped {} bytes but file reports {}",
                mmap.len(),
                file_size
            )));
        }

        // Viewing jumps around the file, so readahead would mostly be wasted
        #[cfg(unix)]
        {
            if let Err(e) = mmap.advise(memmap2::Advice::Random) {
                log::warn!("Failed to set mmap advice: {}", e);
            }
        }

        log::debug!("mapped {} bytes", file_size);

        Ok(Self {
            mmap,
            file_size,
            file_path: None,
        })
    }

    /// Total size of the mapping in bytes
    pub fn size(&self) -> u64 {
        self.file_size
    }

    /// Path of the mapped file, if it was opened by path
    pub fn path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// The whole mapping as a byte slice
    pub fn as_bytes(&self) -> &[u8] {
        &self.mmap[..]
    }

    /// Read the single byte at `offset`
    ///
    /// # Errors
    /// * `OffsetOutOfBounds` when `offset >= size`
    pub fn byte_at(&self, offset: u64) -> Result<u8> {
        if offset >= self.file_size {
            return Err(HugeviewError::OffsetOutOfBounds {
                offset,
                size: self.file_size,
            });
        }
        Ok(self.mmap[offset as usize])
    }

    /// Borrow `length` bytes starting at `offset`, clamped to the end of the file
    ///
    /// Returns an empty slice when `offset` is at or past the end.
    pub fn read_range(&self, offset: u64, length: usize) -> &[u8] {
        if offset >= self.file_size {
            return &[];
        }
        let start = offset as usize;
        let end = start.saturating_add(length).min(self.mmap.len());
        &self.mmap[start..end]
    }

    /// Position of the first `needle` at or after `from`
    pub fn find_forward(&self, needle: u8, from: u64) -> Option<u64> {
        if from >= self.file_size {
            return None;
        }
        let start = from as usize;
        memchr(needle, &self.mmap[start..]).map(|pos| (start + pos) as u64)
    }

    /// Position of the last `needle` inside the window `[lo, hi)`
    ///
    /// Bounds are clamped to the file; an empty window finds nothing.
    pub fn find_backward(&self, needle: u8, lo: u64, hi: u64) -> Option<u64> {
        let hi = hi.min(self.file_size) as usize;
        let lo = lo as usize;
        if lo >= hi {
            return None;
        }
        memrchr(needle, &self.mmap[lo..hi]).map(|pos| (lo + pos) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Create a temporary test file with known content
    fn create_test_file(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content).expect("Failed to write test data");
        file.flush().expect("Failed to flush test data");
        file
    }

    #[test]
    fn test_open_reports_size_and_path() {
        let temp_file = create_test_file(b"line1\nline2\n");
        let mapped = MappedFile::open(temp_file.path()).unwrap();

        assert_eq!(mapped.size(), 12);
        assert_eq!(mapped.path(), Some(temp_file.path()));
        assert_eq!(mapped.as_bytes(), b"line1\nline2\n");
    }

    #[test]
    fn test_from_file_handle() {
        let temp_file = create_test_file(b"abc");
        let handle = File::open(temp_file.path()).unwrap();
        let mapped = MappedFile::from_file(&handle).unwrap();
        drop(handle);

        assert_eq!(mapped.size(), 3);
        assert_eq!(mapped.path(), None);
        assert_eq!(mapped.byte_at(2).unwrap(), b'c');
    }

    #[test]
    fn test_empty_file_is_rejected() {
        let temp_file = create_test_file(b"");
        assert!(MappedFile::open(temp_file.path()).is_err());

        let handle = File::open(temp_file.path()).unwrap();
        assert!(MappedFile::from_file(&handle).is_err());
    }

    #[test]
    fn test_byte_at_bounds() {
        let temp_file = create_test_file(b"ab\n");
        let mapped = MappedFile::open(temp_file.path()).unwrap();

        assert_eq!(mapped.byte_at(0).unwrap(), b'a');
        assert_eq!(mapped.byte_at(2).unwrap(), b'\n');
        assert!(matches!(
            mapped.byte_at(3),
            Err(HugeviewError::OffsetOutOfBounds { offset: 3, size: 3 })
        ));
    }

    #[test]
    fn test_read_range_clamps() {
        let temp_file = create_test_file(b"0123456789");
        let mapped = MappedFile::open(temp_file.path()).unwrap();

        assert_eq!(mapped.read_range(2, 3), b"234");
        assert_eq!(mapped.read_range(8, 100), b"89");
        assert!(mapped.read_range(10, 1).is_empty());
        assert!(mapped.read_range(4, 0).is_empty());
    }

    #[test]
    fn test_find_forward() {
        let temp_file = create_test_file(b"a\nbc\nd");
        let mapped = MappedFile::open(temp_file.path()).unwrap();

        assert_eq!(mapped.find_forward(b'\n', 0), Some(1));
        assert_eq!(mapped.find_forward(b'\n', 1), Some(1));
        assert_eq!(mapped.find_forward(b'\n', 2), Some(4));
        assert_eq!(mapped.find_forward(b'\n', 5), None);
        assert_eq!(mapped.find_forward(b'\n', 99), None);
    }

    #[test]
    fn test_find_backward_respects_window() {
        let temp_file = create_test_file(b"a\nbc\nd");
        let mapped = MappedFile::open(temp_file.path()).unwrap();

        assert_eq!(mapped.find_backward(b'\n', 0, 6), Some(4));
        assert_eq!(mapped.find_backward(b'\n', 0, 4), Some(1));
        assert_eq!(mapped.find_backward(b'\n', 2, 4), None);
        assert_eq!(mapped.find_backward(b'\n', 0, 1), None);
        assert_eq!(mapped.find_backward(b'\n', 3, 3), None);
        assert_eq!(mapped.find_backward(b'\n', 0, 100), Some(4));
    }
}
