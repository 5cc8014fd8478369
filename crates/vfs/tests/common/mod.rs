//! Shared test doubles for the vfs integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::thread;

use sync::SchedOps;
use vfs::{DirEntry, FileMode, FsError, NodeDir, NodeFile, NodeType, VfsNode, VfsStat};

/// Yield to the host scheduler while waiting on the gate.
struct HostSched;

impl SchedOps for HostSched {
    fn yield_now(&self) {
        thread::yield_now();
    }
}

static HOST_SCHED: HostSched = HostSched;
static INIT: Once = Once::new();

pub fn init_sched() {
    INIT.call_once(|| unsafe {
        sync::register_sched_ops(&HOST_SCHED);
    });
}

/// In-memory provider that records every call it receives.
pub struct MockNode {
    files: BTreeMap<String, Vec<u8>>,
    dirs: BTreeMap<String, Vec<DirEntry>>,
    calls: Mutex<Vec<(&'static str, String)>>,
    closes: Arc<AtomicUsize>,
    close_error: Option<FsError>,
}

impl MockNode {
    pub fn new() -> Self {
        Self {
            files: BTreeMap::new(),
            dirs: BTreeMap::new(),
            calls: Mutex::new(Vec::new()),
            closes: Arc::new(AtomicUsize::new(0)),
            close_error: None,
        }
    }

    pub fn with_file(mut self, path: &str, contents: &[u8]) -> Self {
        self.files.insert(path.to_string(), contents.to_vec());
        self
    }

    pub fn with_dir(mut self, path: &str, entries: &[(&str, NodeType)]) -> Self {
        let entries = entries
            .iter()
            .map(|(name, node_type)| DirEntry {
                name: name.to_string(),
                node_type: *node_type,
                size: 0,
            })
            .collect();
        self.dirs.insert(path.to_string(), entries);
        self
    }

    pub fn failing_close(mut self, err: FsError) -> Self {
        self.close_error = Some(err);
        self
    }

    pub fn calls(&self) -> Vec<(&'static str, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    fn record(&self, op: &'static str, path: &str) {
        self.calls.lock().unwrap().push((op, path.to_string()));
    }
}

impl VfsNode for MockNode {
    fn fs_type(&self) -> &'static str {
        "mock"
    }

    fn stat(&self, path: &str) -> Result<VfsStat, FsError> {
        self.record("stat", path);
        if let Some(data) = self.files.get(path) {
            return Ok(VfsStat {
                mode: FileMode::S_IFREG | FileMode::S_IRUSR,
                size: data.len() as u64,
                mtime: 0,
            });
        }
        if self.dirs.contains_key(path) {
            return Ok(VfsStat {
                mode: FileMode::S_IFDIR | FileMode::S_IRUSR | FileMode::S_IXUSR,
                size: 0,
                mtime: 0,
            });
        }
        Err(FsError::NotFound)
    }

    fn open(&self, path: &str, write_mode: bool) -> Result<Box<dyn NodeFile>, FsError> {
        self.record(if write_mode { "open_w" } else { "open" }, path);
        if write_mode {
            return Err(FsError::ReadOnlyFs);
        }
        let data = self.files.get(path).ok_or(FsError::NotFound)?;
        Ok(Box::new(MockFile {
            data: data.clone(),
            pos: 0,
            closes: self.closes.clone(),
            close_error: self.close_error,
        }))
    }

    fn open_dir(&self, path: &str) -> Result<Box<dyn NodeDir>, FsError> {
        self.record("open_dir", path);
        let entries = self.dirs.get(path).ok_or(FsError::NotDirectory)?;
        Ok(Box::new(MockDir {
            entries: entries.clone(),
            next: 0,
            closes: self.closes.clone(),
        }))
    }
}

struct MockFile {
    data: Vec<u8>,
    pos: usize,
    closes: Arc<AtomicUsize>,
    close_error: Option<FsError>,
}

impl NodeFile for MockFile {
    fn read(&mut self, buf: &mut [u8], size: usize, nmemb: usize) -> Result<usize, FsError> {
        let remaining = self.data.len() - self.pos;
        let bytes = (size * nmemb).min(remaining);
        buf[..bytes].copy_from_slice(&self.data[self.pos..self.pos + bytes]);
        self.pos += bytes;
        Ok(bytes / size)
    }

    fn eof(&self) -> bool {
        self.pos >= self.data.len()
    }

    fn close(&mut self) -> Result<(), FsError> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        match self.close_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

struct MockDir {
    entries: Vec<DirEntry>,
    next: usize,
    closes: Arc<AtomicUsize>,
}

impl NodeDir for MockDir {
    fn read_dir(&mut self) -> Option<DirEntry> {
        let entry = self.entries.get(self.next)?.clone();
        self.next += 1;
        Some(entry)
    }

    fn close(&mut self) -> Result<(), FsError> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
