use std::ffi::OsString;
use std::path::PathBuf;

/// One directory's listing, as produced by the
/// [`DirWalker`](crate::walker::DirWalker).
///
/// Names are bare file names, not paths. A symlink pointing at a directory
/// is listed in `subdirs` whether or not links are being followed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    /// The directory that was listed, joined from its root.
    pub directory: PathBuf,

    /// Immediate subdirectories.
    pub subdirs: Vec<OsString>,

    /// Everything else: regular files, broken links, sockets, devices.
    pub files: Vec<OsString>,
}

impl WalkEntry {
    pub(crate) fn new(directory: PathBuf) -> Self {
        Self {
            directory,
            subdirs: Vec::new(),
            files:   Vec::new(),
        }
    }
}
