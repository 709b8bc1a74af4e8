//! Hosts file transactions: read, transform the lines, write back atomically.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::error::{Error, MarkerInconsistency, Result};
use crate::platform::HostsEditor;
use crate::region::{self, MarkerScan};

/// Line separator detected in a file; re-joining with it reproduces the
/// original bytes for untouched lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn detect(content: &str) -> Self {
        if content.contains("\r\n") {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Split file content into lines. A trailing separator yields a trailing
/// empty line, so `join(split(s)) == s`.
pub fn split_lines(content: &str) -> (Vec<String>, LineEnding) {
    let ending = LineEnding::detect(content);
    let lines = content.split(ending.as_str()).map(String::from).collect();
    (lines, ending)
}

pub fn join_lines(lines: &[String], ending: LineEnding) -> String {
    lines.join(ending.as_str())
}

/// Read `path`, pass its lines through `transform`, and write the result
/// back if it differs. Returns whether the file was rewritten.
pub fn apply_transform<F>(path: &Path, transform: F) -> Result<bool>
where
    F: FnOnce(Vec<String>) -> Vec<String>,
{
    let (content, encoding) = read_hosts(path)?;
    let (lines, ending) = split_lines(&content);
    let updated = join_lines(&transform(lines), ending);
    if updated == content {
        debug!(path = %path.display(), "hosts content unchanged, skipping write");
        return Ok(false);
    }
    write_atomic(path, &encoding.encode(&updated))?;
    Ok(true)
}

/// How the bytes of a hosts file map to text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    /// One char per byte (Latin-1). Used for files that are not valid UTF-8,
    /// so legacy bytes in comments survive a rewrite unchanged.
    Latin1,
}

impl TextEncoding {
    pub fn decode(raw: Vec<u8>) -> (String, Self) {
        match String::from_utf8(raw) {
            Ok(text) => (text, TextEncoding::Utf8),
            Err(e) => {
                let text = e.into_bytes().into_iter().map(char::from).collect();
                (text, TextEncoding::Latin1)
            }
        }
    }

    pub fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            TextEncoding::Utf8 => text.as_bytes().to_vec(),
            TextEncoding::Latin1 => {
                let mut out = Vec::with_capacity(text.len());
                for c in text.chars() {
                    match u8::try_from(c) {
                        Ok(b) => out.push(b),
                        // Configured host lines outside Latin-1 stay UTF-8.
                        Err(_) => out.extend_from_slice(c.encode_utf8(&mut [0; 4]).as_bytes()),
                    }
                }
                out
            }
        }
    }
}

/// Read a hosts file as text, whatever its encoding.
pub fn read_hosts(path: &Path) -> Result<(String, TextEncoding)> {
    let raw = fs::read(path).map_err(|e| Error::io("read", path, e))?;
    let (text, encoding) = TextEncoding::decode(raw);
    if encoding == TextEncoding::Latin1 {
        debug!(path = %path.display(), "hosts file is not UTF-8, editing it byte for byte");
    }
    Ok((text, encoding))
}

/// Replace `path` with `content` via a temp file in the same directory and a
/// rename, so readers see either the old or the new file.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    StagedWrite::stage(path, content)?.commit()
}

/// New content written and synced to a temp file next to the target, not yet
/// renamed over it. Dropping it without [`StagedWrite::commit`] deletes the
/// temp file and leaves the target untouched.
pub struct StagedWrite {
    target: PathBuf,
    temp: NamedTempFile,
    content: Vec<u8>,
}

impl StagedWrite {
    pub fn stage(path: &Path, content: &[u8]) -> Result<Self> {
        // /etc/hosts is a symlink on macOS; replace the file, not the link.
        let target = fs::canonicalize(path).map_err(|e| Error::io("resolve", path, e))?;
        let dir = target.parent().unwrap_or_else(|| Path::new("."));

        let mut temp = tempfile::Builder::new()
            .prefix(".homehosts.")
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(|e| Error::io("create temp file in", dir, e))?;
        let temp_path = temp.path().to_path_buf();

        let perms = fs::metadata(&target)
            .map_err(|e| Error::io("stat", &target, e))?
            .permissions();
        fs::set_permissions(&temp_path, perms)
            .map_err(|e| Error::io("set permissions on", &temp_path, e))?;

        temp.write_all(content)
            .map_err(|e| Error::io("write", &temp_path, e))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| Error::io("sync", &temp_path, e))?;

        Ok(Self {
            target,
            temp,
            content: content.to_vec(),
        })
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn temp_path(&self) -> &Path {
        self.temp.path()
    }

    /// Rename the temp file over the target.
    pub fn commit(self) -> Result<()> {
        let Self {
            target,
            temp,
            content,
        } = self;
        match temp.persist(&target) {
            Ok(_) => Ok(()),
            Err(e) if is_busy(&e.error) => {
                // Bind-mounted hosts files (containers) cannot be renamed over.
                warn!(path = %target.display(), "rename refused, writing hosts file in place");
                fs::write(&target, &content).map_err(|err| Error::io("write", &target, err))
            }
            Err(e) => Err(Error::io("replace", &target, e.error)),
        }
    }
}

#[cfg(unix)]
fn is_busy(err: &std::io::Error) -> bool {
    matches!(err.raw_os_error(), Some(libc::EBUSY) | Some(libc::EXDEV))
}

#[cfg(not(unix))]
fn is_busy(_err: &std::io::Error) -> bool {
    false
}

/// What the hosts file currently holds, without modifying it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionStatus {
    Present,
    Absent,
    Inconsistent(MarkerInconsistency),
}

/// HostsEditor over a file path. `default_hosts_editor` points it at the
/// system hosts file.
#[derive(Debug, Clone)]
pub struct FileHostsEditor {
    path: PathBuf,
}

impl FileHostsEditor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HostsEditor for FileHostsEditor {
    fn path(&self) -> &Path {
        &self.path
    }

    fn insert_region(&self, host_lines: &[String]) -> Result<bool> {
        let written = apply_transform(&self.path, |lines| {
            region::insert_managed_region(lines, host_lines)
        })?;
        if written {
            info!(path = %self.path.display(), lines = host_lines.len(), "hosts file modified");
        }
        Ok(written)
    }

    fn remove_region(&self) -> Result<bool> {
        let written = apply_transform(&self.path, region::remove_managed_region)?;
        if written {
            info!(path = %self.path.display(), "hosts file restored");
        }
        Ok(written)
    }

    fn inspect(&self) -> Result<RegionStatus> {
        let (content, _) = read_hosts(&self.path)?;
        let (lines, _) = split_lines(&content);
        Ok(match MarkerScan::new(&lines).pair() {
            Ok(Some(_)) => RegionStatus::Present,
            Ok(None) => RegionStatus::Absent,
            Err(issue) => RegionStatus::Inconsistent(issue),
        })
    }
}
