use std::path::{Path, PathBuf};

use crate::foundation::error::{Diff2GifError, Diff2GifResult};

/// Per-run directory holding intermediate frame files.
///
/// The directory name is unique per run, so concurrent builds sharing a work dir never collide.
/// Everything is removed by [`FrameStore::clean`] or, failing that, on drop.
#[derive(Debug)]
pub struct FrameStore {
    dir: Option<tempfile::TempDir>,
    path: PathBuf,
    frames: Vec<PathBuf>,
}

impl FrameStore {
    /// Create a fresh run directory inside `work_dir`, or the system temp dir when `None`.
    pub fn create(work_dir: Option<&Path>) -> Diff2GifResult<Self> {
        let parent = match work_dir {
            Some(p) => {
                std::fs::create_dir_all(p).map_err(|e| {
                    Diff2GifError::resource(format!(
                        "failed to create work dir '{}': {e}",
                        p.display()
                    ))
                })?;
                p.to_path_buf()
            }
            None => std::env::temp_dir(),
        };
        let dir = tempfile::Builder::new()
            .prefix("diff2gif-")
            .tempdir_in(&parent)
            .map_err(|e| {
                Diff2GifError::resource(format!(
                    "failed to create frame dir in '{}': {e}",
                    parent.display()
                ))
            })?;
        let path = dir.path().to_path_buf();
        tracing::debug!(dir = %path.display(), "frame store created");
        Ok(Self {
            dir: Some(dir),
            path,
            frames: Vec::new(),
        })
    }

    /// Directory frames are written into.
    pub fn dir(&self) -> &Path {
        &self.path
    }

    /// Remember a frame file written into this store.
    pub fn record(&mut self, frame: PathBuf) {
        self.frames.push(frame);
    }

    /// Recorded frame files, in write order.
    pub fn frames(&self) -> &[PathBuf] {
        &self.frames
    }

    /// `true` once the run directory is gone.
    pub fn is_clean(&self) -> bool {
        self.dir.is_none()
    }

    /// Delete every frame file and the run directory.
    ///
    /// Best-effort and idempotent: failures are logged and ignored.
    pub fn clean(&mut self) {
        for frame in self.frames.drain(..) {
            if let Err(e) = std::fs::remove_file(&frame)
                && e.kind() != std::io::ErrorKind::NotFound
            {
                tracing::warn!(path = %frame.display(), error = %e, "failed to remove frame");
            }
        }
        if let Some(dir) = self.dir.take()
            && let Err(e) = dir.close()
        {
            tracing::warn!(dir = %self.path.display(), error = %e, "failed to remove frame dir");
        }
    }
}

impl Drop for FrameStore {
    fn drop(&mut self) {
        self.clean();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/store.rs"]
mod tests;
