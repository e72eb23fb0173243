//! Saving and loading sessions on disk.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::{info, warn};

use super::codec::{Snapshot, decode_snapshot, encode_snapshot};
use super::format::{
    CompressionType, SessionFlags, SessionHeader, compress_lz4, decompress_lz4,
};

/// Errors from the session file store.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("Session I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("Session could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Write `snapshot` to `path`, replacing any existing file.
///
/// The session is written to a sibling `.tmp` file and renamed over `path`,
/// so a failed write leaves the previous session intact.
pub fn save_snapshot<P: AsRef<Path>>(
    path: P,
    snapshot: &Snapshot,
    compression: CompressionType,
) -> Result<(), PersistError> {
    let path = path.as_ref();
    let json = encode_snapshot(snapshot)?;
    let compression = compression.effective();
    let payload = match compression {
        CompressionType::None => json.into_bytes(),
        CompressionType::Lz4 => compress_lz4(json.as_bytes()),
    };

    let temp_path = path.with_extension("tmp");
    let written = write_session(&temp_path, compression, &payload)
        .and_then(|()| fs::rename(&temp_path, path));
    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(e.into());
    }

    info!(
        "Saved session to {} ({} states, {} bytes, {:?} compression)",
        path.display(),
        snapshot.past.len(),
        payload.len(),
        compression
    );
    Ok(())
}

fn write_session(path: &Path, compression: CompressionType, payload: &[u8]) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    SessionHeader {
        flags: SessionFlags { compression },
        payload_size: payload.len() as u64,
    }
    .write_to(&mut writer)?;
    writer.write_all(payload)?;
    writer.flush()?;
    writer.get_ref().sync_all()
}

/// Load a session from `path`.
///
/// A missing file, a file cut short, or an unreadable payload means
/// "no prior state" (`Ok(None)`). A file that is not a session at all is an
/// error.
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Option<Snapshot>, PersistError> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut reader = BufReader::new(file);
    let header = match SessionHeader::read_from(&mut reader) {
        Ok(header) => header,
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
            warn!("Session {} has a truncated header", path.display());
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    // The header size is untrusted; `take` bounds the read instead.
    let mut payload = Vec::new();
    reader
        .by_ref()
        .take(header.payload_size)
        .read_to_end(&mut payload)?;
    if payload.len() as u64 != header.payload_size {
        warn!(
            "Session {} is truncated ({} of {} bytes)",
            path.display(),
            payload.len(),
            header.payload_size
        );
        return Ok(None);
    }

    let raw = match header.flags.compression {
        CompressionType::None => payload,
        CompressionType::Lz4 => match decompress_lz4(&payload) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Session {} could not be decompressed: {}", path.display(), e);
                return Ok(None);
            }
        },
    };
    let Ok(json) = String::from_utf8(raw) else {
        warn!("Session {} payload is not UTF-8", path.display());
        return Ok(None);
    };
    Ok(decode_snapshot(&json))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{AnimationState, Frame};
    use crate::bitmap::Bitmap;
    use crate::history::History;
    use crate::persist::snapshot;
    use crate::schema::EditorState;
    use std::fs;
    use tempfile::tempdir;

    fn sample_snapshot() -> Snapshot {
        let frame = Frame::new(Bitmap::from_buffer(2, 2, vec![1, 2, 3, 4]).unwrap());
        let mut history = History::new(AnimationState::new(vec![frame.clone()], 100).unwrap());
        history.edit(AnimationState::new(vec![frame.clone(), frame], 120).unwrap());
        snapshot(&EditorState::default(), &history)
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.span");
        let snap = sample_snapshot();

        save_snapshot(&path, &snap, CompressionType::None).unwrap();
        let metadata = fs::metadata(&path).unwrap();
        assert!(metadata.len() > SessionHeader::SIZE as u64);

        assert_eq!(load_snapshot(&path).unwrap(), Some(snap));
    }

    #[test]
    fn test_save_load_requested_lz4() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("compressed.span");
        let snap = sample_snapshot();

        // Falls back to plain JSON when the feature is off.
        save_snapshot(&path, &snap, CompressionType::Lz4).unwrap();
        assert_eq!(load_snapshot(&path).unwrap(), Some(snap));
    }

    #[test]
    fn test_missing_file_is_no_prior_state() {
        let dir = tempdir().unwrap();
        assert_eq!(load_snapshot(dir.path().join("absent.span")).unwrap(), None);
    }

    #[test]
    fn test_corrupt_payload_is_no_prior_state() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("corrupt.span");
        let payload = b"{\"editor\":";
        let mut bytes = Vec::new();
        SessionHeader {
            flags: SessionFlags::default(),
            payload_size: payload.len() as u64,
        }
        .write_to(&mut bytes)
        .unwrap();
        bytes.extend_from_slice(payload);
        fs::write(&path, &bytes).unwrap();
        assert_eq!(load_snapshot(&path).unwrap(), None);

        // Truncated payload.
        fs::write(&path, &bytes[..bytes.len() - 2]).unwrap();
        assert_eq!(load_snapshot(&path).unwrap(), None);
    }

    fn header_bytes(compression: CompressionType, payload_size: u64) -> Vec<u8> {
        let mut bytes = Vec::new();
        SessionHeader {
            flags: SessionFlags { compression },
            payload_size,
        }
        .write_to(&mut bytes)
        .unwrap();
        bytes
    }

    #[test]
    fn test_oversized_payload_length_is_no_prior_state() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("oversized.span");
        let mut bytes = header_bytes(CompressionType::None, u64::MAX);
        bytes.extend_from_slice(b"{}");
        fs::write(&path, &bytes).unwrap();
        assert_eq!(load_snapshot(&path).unwrap(), None);
    }

    #[test]
    fn test_truncated_header_is_no_prior_state() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cut.span");
        let bytes = header_bytes(CompressionType::None, 2);
        fs::write(&path, &bytes[..9]).unwrap();
        assert_eq!(load_snapshot(&path).unwrap(), None);

        fs::write(&path, b"").unwrap();
        assert_eq!(load_snapshot(&path).unwrap(), None);
    }

    #[test]
    fn test_undecodable_lz4_payload_is_no_prior_state() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad_lz4.span");
        // Claims 16 bytes, then a literal run that ends mid-length.
        let payload = [16u8, 0, 0, 0, 0xF0, 0xFF];
        let mut bytes = header_bytes(CompressionType::Lz4, payload.len() as u64);
        bytes.extend_from_slice(&payload);
        fs::write(&path, &bytes).unwrap();
        assert_eq!(load_snapshot(&path).unwrap(), None);
    }

    #[test]
    fn test_save_replaces_previous_session() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.span");
        let first = sample_snapshot();
        save_snapshot(&path, &first, CompressionType::None).unwrap();

        let mut second = first.clone();
        second.past.truncate(1);
        save_snapshot(&path, &second, CompressionType::None).unwrap();

        assert_eq!(load_snapshot(&path).unwrap(), Some(second));
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_failed_save_keeps_previous_session() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.span");
        let snap = sample_snapshot();
        save_snapshot(&path, &snap, CompressionType::None).unwrap();

        // A directory in the way of the temp file makes the write fail.
        fs::create_dir(path.with_extension("tmp")).unwrap();
        assert!(save_snapshot(&path, &snap, CompressionType::None).is_err());
        assert_eq!(load_snapshot(&path).unwrap(), Some(snap));
    }

    #[test]
    fn test_foreign_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("foreign.span");
        fs::write(&path, b"PNG\x00 definitely not a session").unwrap();
        assert!(matches!(load_snapshot(&path), Err(PersistError::Io(_))));
    }
}
