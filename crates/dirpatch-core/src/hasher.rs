use crate::error::Error;
use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Content hash selection. A `Copy` configuration value: every
/// `digest_file` call builds its own accumulator from it, so one selection
/// made at startup is safe to share across any number of concurrent hashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashAlgorithm {
    #[default]
    Md5,
    Sha1,
    Sha256,
    Blake3,
}

impl HashAlgorithm {
    pub const SUPPORTED: &'static [&'static str] = &["md5", "sha1", "sha256", "blake3"];

    pub fn from_name(name: &str) -> Result<HashAlgorithm, Error> {
        match name.to_ascii_lowercase().as_str() {
            "md5" => Ok(HashAlgorithm::Md5),
            "sha1" => Ok(HashAlgorithm::Sha1),
            "sha256" => Ok(HashAlgorithm::Sha256),
            "blake3" => Ok(HashAlgorithm::Blake3),
            _ => Err(Error::UnsupportedAlgorithm(name.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "md5",
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Blake3 => "blake3",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Hash one file's content, streaming it in 64KB chunks so memory stays
/// flat regardless of file size. Returns the lowercase hex digest.
pub fn digest_file(path: &Path, algorithm: HashAlgorithm) -> Result<String, Error> {
    let unreadable = |source: io::Error| Error::UnreadableFile {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(unreadable)?;

    let digest = match algorithm {
        HashAlgorithm::Md5 => digest_reader::<Md5>(&mut file),
        HashAlgorithm::Sha1 => digest_reader::<Sha1>(&mut file),
        HashAlgorithm::Sha256 => digest_reader::<Sha256>(&mut file),
        HashAlgorithm::Blake3 => digest_reader_blake3(&mut file),
    }
    .map_err(unreadable)?;

    Ok(digest)
}

fn digest_reader<D: Digest>(reader: &mut impl Read) -> io::Result<String>
where
    <D as sha2::digest::OutputSizeUser>::OutputSize: std::ops::Add,
    <<D as sha2::digest::OutputSizeUser>::OutputSize as std::ops::Add>::Output:
        sha2::digest::generic_array::ArrayLength<u8>,
{
    let mut hasher = D::new();
    let mut buffer = vec![0u8; READ_BUFFER_SIZE];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

fn digest_reader_blake3(reader: &mut impl Read) -> io::Result<String> {
    let mut hasher = blake3::Hasher::new();
    let mut buffer = vec![0u8; READ_BUFFER_SIZE];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hasher.finalize().to_hex().to_string())
}
