use std::fs::File;
use std::ops::Deref;
use std::path::Path;
use memmap::Mmap;
use crate::error::{Error, Result};

/// Read-only view of the whole input file
#[derive(Debug)]
pub enum Input {
    /// zero-length files cannot be mapped
    Empty,
    Mapped(Mmap),
}

impl Input {
    pub fn open(path: &Path) -> Result<Self> {
        let open_err = |source| Error::Open { path: path.to_path_buf(), source };
        let file = File::open(path).map_err(open_err)?;
        let len = file.metadata().map_err(open_err)?.len();

        if len == 0 {
            return Ok(Input::Empty);
        }

        // the file is only ever read; concurrent truncation by another process
        // is not guarded against
        let mmap = unsafe { Mmap::map(&file) }
            .map_err(|source| Error::Map { path: path.to_path_buf(), source })?;
        Ok(Input::Mapped(mmap))
    }
}

impl Deref for Input {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Input::Empty => &[],
            Input::Mapped(mmap) => &mmap[..],
        }
    }
}
