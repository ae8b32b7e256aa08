// ==============================================================================
// source.rs - Raw Data Source Access
// ==============================================================================
// Description: Opens raw genotype files (plain, gzip, single-entry zip),
//              sniffs the vendor format and hands content to a parser
// Author: Matt Barham
// Created: 2026-10-13
// Modified: 2026-10-17
// Version: 1.1.0
// ==============================================================================

use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::models::SnpTable;
use crate::parsers::{ParseError, SourceFormat};

const GZIP_MAGIC: &[u8] = &[0x1f, 0x8b];
const ZIP_MAGIC: &[u8] = &[0x50, 0x4b, 0x03, 0x04];

/// Reasons a single source contributes nothing to a load
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("{0} does not exist")]
    MissingSource(PathBuf),

    #[error("{0} is not a recognized raw data format")]
    UnrecognizedFormat(PathBuf),

    #[error("Failed to parse {format} file {path}: {source}")]
    Parse {
        path: PathBuf,
        format: SourceFormat,
        #[source]
        source: ParseError,
    },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open zip archive {path}: {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Zip archive {0} has no entries")]
    EmptyArchive(PathBuf),
}

/// Container wrapping detected from the leading bytes of a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    Plain,
    Gzip,
    Zip,
}

/// Inspect magic numbers to decide how a file must be unwrapped
pub fn detect_compression(path: &Path) -> Result<Compression, SourceError> {
    let file = File::open(path).map_err(|e| io_error(path, e))?;
    let mut magic = Vec::with_capacity(ZIP_MAGIC.len());
    file.take(ZIP_MAGIC.len() as u64)
        .read_to_end(&mut magic)
        .map_err(|e| io_error(path, e))?;

    let compression = if magic.starts_with(ZIP_MAGIC) {
        Compression::Zip
    } else if magic.starts_with(GZIP_MAGIC) {
        Compression::Gzip
    } else {
        Compression::Plain
    };
    debug!("{} detected as {:?}", path.display(), compression);
    Ok(compression)
}

/// Open a file for line-oriented reading, decompressing transparently.
///
/// Zip archives must hold the raw data as their first entry.
pub fn open(path: &Path) -> Result<Box<dyn BufRead>, SourceError> {
    if !path.exists() {
        return Err(SourceError::MissingSource(path.to_path_buf()));
    }

    let compression = detect_compression(path)?;
    let file = File::open(path).map_err(|e| io_error(path, e))?;

    match compression {
        Compression::Plain => Ok(Box::new(BufReader::new(file))),
        Compression::Gzip => Ok(Box::new(BufReader::new(flate2::read::MultiGzDecoder::new(file)))),
        Compression::Zip => {
            let mut archive = zip::ZipArchive::new(file).map_err(|source| SourceError::Archive {
                path: path.to_path_buf(),
                source,
            })?;
            if archive.is_empty() {
                return Err(SourceError::EmptyArchive(path.to_path_buf()));
            }
            let mut entry = archive.by_index(0).map_err(|source| SourceError::Archive {
                path: path.to_path_buf(),
                source,
            })?;
            let mut contents = Vec::new();
            entry
                .read_to_end(&mut contents)
                .map_err(|e| io_error(path, e))?;
            Ok(Box::new(Cursor::new(contents)))
        }
    }
}

/// First line of the (decompressed) content, or an empty string for an empty file
pub fn peek_first_line(path: &Path) -> Result<String, SourceError> {
    let mut reader = open(path)?;
    let line = read_first_line(&mut reader, path)?;
    Ok(String::from_utf8_lossy(&line).into_owned())
}

/// Classify and parse one raw data file into a canonical table.
///
/// The content is decompressed once; the classified first line is replayed
/// in front of the remaining stream for the parser.
pub fn read_raw_data(path: &Path) -> Result<(SourceFormat, SnpTable), SourceError> {
    let mut reader = open(path)?;
    let first_line = read_first_line(&mut reader, path)?;

    let format = SourceFormat::classify(&String::from_utf8_lossy(&first_line))
        .ok_or_else(|| SourceError::UnrecognizedFormat(path.to_path_buf()))?;
    debug!("Reading {} as {}", path.display(), format);

    let table = format
        .parse(Cursor::new(first_line).chain(reader))
        .map_err(|source| SourceError::Parse {
            path: path.to_path_buf(),
            format,
            source,
        })?;

    debug!("Parsed {} SNPs from {}", table.len(), path.display());
    Ok((format, table))
}

fn read_first_line(reader: &mut dyn BufRead, path: &Path) -> Result<Vec<u8>, SourceError> {
    let mut line = Vec::new();
    reader
        .read_until(b'\n', &mut line)
        .map_err(|e| io_error(path, e))?;
    Ok(line)
}

fn io_error(path: &Path, source: std::io::Error) -> SourceError {
    SourceError::Io {
        path: path.to_path_buf(),
        source,
    }
}
