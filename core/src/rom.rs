use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;

use crate::constants::MAX_PROGRAM_SIZE;
use crate::error::Chip8Error;

/// # ROM
/// The raw contents of a Chip-8 program: no header, just instructions and data that get
/// copied into memory at 0x200.
///
/// A `Rom` never holds more than `MAX_PROGRAM_SIZE` bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rom {
    bytes: Vec<u8>,
}

impl Rom {
    /// Wraps an in-memory program, rejecting it if it can't fit in memory.
    pub fn new(bytes: Vec<u8>) -> Result<Self, Chip8Error> {
        if bytes.len() > MAX_PROGRAM_SIZE {
            return Err(Chip8Error::ProgramTooLarge {
                size: bytes.len(),
                max: MAX_PROGRAM_SIZE,
            });
        }
        Ok(Rom { bytes })
    }

    /// Reads a ROM from a source.
    ///
    /// At most one byte past the limit is read, so oversized files are rejected without
    /// being read in full.
    ///
    /// # Arguments
    /// * `reader` a source that contains a ROM
    pub fn read_from(reader: &mut dyn Read) -> Result<Self, Chip8Error> {
        let mut bytes = Vec::with_capacity(MAX_PROGRAM_SIZE);
        reader
            .take(MAX_PROGRAM_SIZE as u64 + 1)
            .read_to_end(&mut bytes)?;
        Rom::new(bytes)
    }

    /// Reads a ROM from a file on disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Chip8Error> {
        let path = path.as_ref();
        let mut file = File::open(path)?;
        let rom = Rom::read_from(&mut file)?;
        debug!("read {} byte ROM from {}", rom.len(), path.display());
        Ok(rom)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl AsRef<[u8]> for Rom {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reads_whole_rom() {
        let mut reader = Cursor::new(vec![0x00, 0xE0, 0x12, 0x00]);
        let rom = Rom::read_from(&mut reader).unwrap();
        assert_eq!(rom.as_bytes(), &[0x00, 0xE0, 0x12, 0x00]);
    }

    #[test]
    fn test_accepts_largest_rom() {
        let mut reader = Cursor::new(vec![0xAA; MAX_PROGRAM_SIZE]);
        let rom = Rom::read_from(&mut reader).unwrap();
        assert_eq!(rom.len(), 3584);
    }

    #[test]
    fn test_rejects_oversized_rom() {
        let mut reader = Cursor::new(vec![0xAA; MAX_PROGRAM_SIZE + 100]);
        match Rom::read_from(&mut reader) {
            Err(Chip8Error::ProgramTooLarge { size, max }) => {
                // only one byte past the limit is ever read
                assert_eq!(size, MAX_PROGRAM_SIZE + 1);
                assert_eq!(max, MAX_PROGRAM_SIZE);
            }
            other => panic!("expected ProgramTooLarge, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = Rom::open("/definitely/not/a/real/rom.ch8");
        assert!(matches!(result, Err(Chip8Error::Io(_))));
    }
}
