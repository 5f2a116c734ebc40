/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fs::File;
use std::io::Read;
use std::ops::Deref;
use std::path::Path;

use log::info;
use memmap2::Mmap;

use crate::cmd_args::MmapOptions;
use crate::errors::FbshowErrors;

/// Files at least this large are mapped when mmap is set to auto
const AUTO_MMAP_THRESHOLD: u64 = 1 << 20;

/// Contents of an input file, either mapped or read into memory
pub enum FileBytes {
    Mapped(Mmap),
    Read(Vec<u8>)
}

impl Deref for FileBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            FileBytes::Mapped(mmap) => mmap,
            FileBytes::Read(bytes) => bytes
        }
    }
}

/// Read the whole of `path`, mapping it instead when `mmap` says so
pub fn read_input(path: &Path, mmap: MmapOptions) -> Result<FileBytes, FbshowErrors> {
    let name = path.display().to_string();
    let io_err = |e| FbshowErrors::FileIo(name.clone(), e);

    let mut fd = File::open(path).map_err(io_err)?;
    let size = fd.metadata().map_err(io_err)?.len();

    let use_mmap = match mmap {
        MmapOptions::Always => true,
        MmapOptions::No => false,
        // empty files cannot be mapped
        MmapOptions::Auto => size >= AUTO_MMAP_THRESHOLD
    };

    if use_mmap && size > 0 {
        info!("Reading file via memory maps");
        // SAFETY: the file is only read, a concurrent truncation by
        // another process is outside of our control
        let mapped = unsafe { Mmap::map(&fd) }.map_err(io_err)?;
        return Ok(FileBytes::Mapped(mapped));
    }
    info!("Reading file to memory");

    let mut buf = Vec::with_capacity(size as usize);
    fd.read_to_end(&mut buf).map_err(io_err)?;

    Ok(FileBytes::Read(buf))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use crate::cmd_args::MmapOptions;
    use crate::errors::FbshowErrors;
    use crate::file_io::{read_input, FileBytes};

    fn temp_file(name: &str, contents: &[u8]) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("fbshow-{}-{name}", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents).unwrap();
        path
    }

    #[test]
    fn every_mode_reads_the_same_bytes() {
        let path = temp_file("modes.bin", b"BM123456");

        for mode in [MmapOptions::No, MmapOptions::Auto, MmapOptions::Always] {
            let bytes = read_input(&path, mode).unwrap();
            assert_eq!(&*bytes, b"BM123456");
        }
        assert!(matches!(
            read_input(&path, MmapOptions::Auto).unwrap(),
            FileBytes::Read(_)
        ));
        assert!(matches!(
            read_input(&path, MmapOptions::Always).unwrap(),
            FileBytes::Mapped(_)
        ));
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn missing_file_names_the_path() {
        let path = std::env::temp_dir().join("fbshow-this-file-does-not-exist.bmp");

        match read_input(&path, MmapOptions::Auto) {
            Err(FbshowErrors::FileIo(name, _)) => assert!(name.ends_with("does-not-exist.bmp")),
            _ => panic!("expected a file error")
        }
    }
}
