//! Atomic CSV file writer with automatic cleanup on failure.
//!
//! Writes to a temporary file in the same directory as the destination,
//! then atomically replaces the destination on `finish()`. If dropped
//! before finishing, the temporary file is deleted and the destination is
//! left untouched.
//!
//! The result carries the same permissions a plain `fs::write` would give
//! it: the mode of the file being replaced, or `0o666` minus the umask for
//! a new file.

use std::fs;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use csv::{Terminator, Writer, WriterBuilder};
use tempfile::{Builder, NamedTempFile};

use crate::error::{Error, Result};

pub(crate) struct AtomicCsvWriter {
    writer: Writer<BufWriter<NamedTempFile>>,
    final_path: PathBuf,
}

impl AtomicCsvWriter {
    /// Creates a writer targeting `final_path`. The temporary file lives
    /// next to it so the final rename stays on one filesystem.
    pub(crate) fn new(final_path: impl AsRef<Path>) -> Result<Self> {
        let final_path = final_path.as_ref().to_path_buf();

        let parent_dir = match final_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };

        #[allow(unused_mut)]
        let mut builder = Builder::new();
        // tempfile defaults to 0o600; open(2) still applies the umask here
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(fs::Permissions::from_mode(0o666));
        }

        let temp_file = builder
            .tempfile_in(parent_dir)
            .map_err(|e| Error::write(&final_path, e))?;

        if let Ok(existing) = fs::metadata(&final_path) {
            temp_file
                .as_file()
                .set_permissions(existing.permissions())
                .map_err(|e| Error::write(&final_path, e))?;
        }

        let writer = WriterBuilder::new()
            .terminator(Terminator::Any(b'\n'))
            .from_writer(BufWriter::new(temp_file));

        Ok(Self { writer, final_path })
    }

    pub(crate) fn write_record<I, T>(&mut self, record: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        self.writer
            .write_record(record)
            .map_err(|e| Error::write(&self.final_path, e))
    }

    /// Flushes everything and moves the file into place, replacing whatever
    /// was there before.
    pub(crate) fn finish(self) -> Result<()> {
        let final_path = self.final_path;

        let buf_writer = self.writer.into_inner().map_err(|e| {
            Error::write(&final_path, io::Error::new(e.error().kind(), e.error().to_string()))
        })?;

        let temp_file = buf_writer
            .into_inner()
            .map_err(|e| Error::write(&final_path, e.into_error()))?;

        temp_file
            .persist(&final_path)
            .map_err(|e| Error::write(&final_path, e.error))?;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_finish_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, "stale contents that are longer than the new ones\n").unwrap();

        let mut writer = AtomicCsvWriter::new(&path).unwrap();
        writer.write_record(["a", "b"]).unwrap();
        writer.write_record(["1", "2"]).unwrap();
        writer.finish().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "a,b\n1,2\n");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_drop_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let mut writer = AtomicCsvWriter::new(&path).unwrap();
        writer.write_record(["a", "b"]).unwrap();
        drop(writer);

        assert!(!path.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_new_file_gets_default_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        // Whatever the umask is, a plain write shows what it yields.
        let reference = dir.path().join("reference.csv");
        fs::write(&reference, "a,b\n").unwrap();
        let expected = fs::metadata(&reference).unwrap().permissions().mode() & 0o777;

        let mut writer = AtomicCsvWriter::new(&path).unwrap();
        writer.write_record(["a", "b"]).unwrap();
        writer.finish().unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, expected);
    }

    #[cfg(unix)]
    #[test]
    fn test_replacing_keeps_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, "old\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();

        let mut writer = AtomicCsvWriter::new(&path).unwrap();
        writer.write_record(["a", "b"]).unwrap();
        writer.finish().unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
        assert_eq!(fs::read_to_string(&path).unwrap(), "a,b\n");
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("out.csv");

        match AtomicCsvWriter::new(&path) {
            Err(Error::Write { path: p, .. }) => assert_eq!(p, path),
            Err(e) => panic!("Expected write error, got {:?}", e),
            Ok(_) => panic!("Expected write error"),
        }
    }
}
