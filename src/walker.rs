//! Directory-at-a-time enumeration.
//!
//! [`DirWalker`] produces one [`WalkEntry`] per directory. Each listing is
//! read completely before it is returned, so no directory handle stays open
//! between calls and dropping the walker at any point releases everything.
//!
//! Top-down, a listing is returned before anything beneath it and the
//! caller chooses which subdirectories to enter by passing them back to
//! [`DirWalker::descend`]. Bottom-up, a listing is returned after all of its
//! subdirectories have been walked, and every subdirectory is entered.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::trace;
use walkdir::WalkDir;

use crate::entry::WalkEntry;
use crate::error::RambleError;

/// Enumeration settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkerOptions {
    pub topdown:      bool,
    pub follow_links: bool,
    /// Sort each listing by file name before anything is entered.
    pub sort:         bool,
}

impl Default for WalkerOptions {
    fn default() -> Self {
        Self {
            topdown:      true,
            follow_links: false,
            sort:         true,
        }
    }
}

/// A directory still to be listed. `ancestors` holds canonical paths of
/// the directories above it and is only kept when following links.
struct Pending {
    path:      PathBuf,
    ancestors: Vec<PathBuf>,
}

/// A listed directory whose subdirectories are being walked bottom-up.
struct Frame {
    entry:     WalkEntry,
    next:      usize,
    ancestors: Vec<PathBuf>,
}

pub struct DirWalker {
    opts:    WalkerOptions,
    pending: Vec<Pending>,
    frames:  Vec<Frame>,
    /// Ancestry of the listing most recently returned top-down.
    current: Option<Vec<PathBuf>>,
}

impl DirWalker {
    pub fn new(root: impl Into<PathBuf>, opts: WalkerOptions) -> Self {
        Self {
            opts,
            pending: vec![Pending {
                path:      root.into(),
                ancestors: Vec::new(),
            }],
            frames:  Vec::new(),
            current: None,
        }
    }

    /// The next directory listing.
    ///
    /// An `Err` loses only the directory it names; calling again continues
    /// with the rest of the tree.
    pub fn next_entry(&mut self) -> Option<Result<WalkEntry, RambleError>> {
        if self.opts.topdown {
            self.next_topdown()
        } else {
            self.next_bottomup()
        }
    }

    /// Queue the named subdirectories of `directory` for a top-down walk.
    ///
    /// They are entered in the order given, before any directory queued
    /// earlier. Symlinked directories are skipped unless following links.
    /// Has no effect bottom-up.
    pub fn descend(&mut self, directory: &Path, subdirs: &[OsString]) {
        if !self.opts.topdown {
            return;
        }
        let ancestors = self.current.take().unwrap_or_default();
        for name in subdirs.iter().rev() {
            let path = directory.join(name);
            if self.opts.follow_links || !path.is_symlink() {
                self.pending.push(Pending {
                    path,
                    ancestors: ancestors.clone(),
                });
            }
        }
    }

    fn next_topdown(&mut self) -> Option<Result<WalkEntry, RambleError>> {
        let Pending { path, ancestors } = self.pending.pop()?;
        self.current = None;

        let result = self
            .enter(&path, ancestors)
            .and_then(|ancestors| Ok((self.list(&path)?, ancestors)));

        Some(result.map(|(entry, ancestors)| {
            self.current = Some(ancestors);
            entry
        }))
    }

    fn next_bottomup(&mut self) -> Option<Result<WalkEntry, RambleError>> {
        loop {
            let Some(frame) = self.frames.last_mut() else {
                let Pending { path, ancestors } = self.pending.pop()?;
                match self.open_frame(path, ancestors) {
                    Ok(frame) => self.frames.push(frame),
                    Err(e) => return Some(Err(e)),
                }
                continue;
            };

            if frame.next < frame.entry.subdirs.len() {
                let path = frame.entry.directory.join(&frame.entry.subdirs[frame.next]);
                frame.next += 1;
                if !self.opts.follow_links && path.is_symlink() {
                    continue;
                }
                let ancestors = frame.ancestors.clone();
                match self.open_frame(path, ancestors) {
                    Ok(child) => self.frames.push(child),
                    Err(e) => return Some(Err(e)),
                }
                continue;
            }

            return self.frames.pop().map(|frame| Ok(frame.entry));
        }
    }

    fn open_frame(&self, path: PathBuf, ancestors: Vec<PathBuf>) -> Result<Frame, RambleError> {
        let ancestors = self.enter(&path, ancestors)?;
        Ok(Frame {
            entry: self.list(&path)?,
            next: 0,
            ancestors,
        })
    }

    /// Record `path` in its ancestry, refusing to enter a directory that is
    /// already one of its own ancestors.
    fn enter(&self, path: &Path, mut ancestors: Vec<PathBuf>) -> Result<Vec<PathBuf>, RambleError> {
        if !self.opts.follow_links {
            return Ok(ancestors);
        }
        let canonical = fs::canonicalize(path).map_err(|source| RambleError::Enumeration {
            path: path.to_path_buf(),
            source,
        })?;
        if ancestors.contains(&canonical) {
            return Err(RambleError::SymlinkLoop(path.to_path_buf()));
        }
        ancestors.push(canonical);
        Ok(ancestors)
    }

    fn list(&self, directory: &Path) -> Result<WalkEntry, RambleError> {
        let mut entry = WalkEntry::new(directory.to_path_buf());
        let mut walk = WalkDir::new(directory)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false);
        if self.opts.sort {
            walk = walk.sort_by_file_name();
        }

        for child in walk {
            let child = child.map_err(|e| {
                let path = e.path().unwrap_or(directory).to_path_buf();
                let source = if e.loop_ancestor().is_some() {
                    e.into()
                } else {
                    e.into_io_error()
                        .unwrap_or_else(|| io::ErrorKind::Other.into())
                };
                RambleError::Enumeration { path, source }
            })?;

            let is_dir = child.file_type().is_dir()
                || (child.path_is_symlink() && child.path().is_dir());
            let name = child.file_name().to_os_string();
            if is_dir {
                entry.subdirs.push(name);
            } else {
                entry.files.push(name);
            }
        }

        trace!(
            directory = %directory.display(),
            subdirs = entry.subdirs.len(),
            files = entry.files.len(),
            "listed directory"
        );
        Ok(entry)
    }
}
