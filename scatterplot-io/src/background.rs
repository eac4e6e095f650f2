//! One-shot background loading
//!
//! The load runs on its own thread and hands the finished [`PointTable`] over
//! exactly once. Nothing is shared while the load is in flight, so a frame loop
//! can poll without blocking and pass the table to the batcher afterwards.

use crate::delimited::{PointFileOptions, PointFileReader, PointTable};
use scatterplot_core::{Error, Result};
use std::path::PathBuf;
use tracing::debug;

/// Handle to a load running on a background thread
#[derive(Debug)]
pub struct PendingLoad {
    receiver: flume::Receiver<Result<PointTable>>,
    finished: bool,
}

/// Start reading `path` on a background thread
pub fn spawn_load(path: impl Into<PathBuf>, options: PointFileOptions) -> Result<PendingLoad> {
    let path = path.into();
    let (sender, receiver) = flume::bounded(1);

    std::thread::Builder::new()
        .name("point-loader".into())
        .spawn(move || {
            let result = PointFileReader::read(&path, &options);
            // The handle may have been dropped; the table is simply discarded then.
            if sender.send(result).is_err() {
                debug!(path = %path.display(), "load finished after its handle was dropped");
            }
        })?;

    Ok(PendingLoad {
        receiver,
        finished: false,
    })
}

impl PendingLoad {
    /// Take the result if the load has completed. Returns `None` while the load
    /// is running and after the result has been taken.
    pub fn poll(&mut self) -> Option<Result<PointTable>> {
        if self.finished {
            return None;
        }
        match self.receiver.try_recv() {
            Ok(result) => {
                self.finished = true;
                Some(result)
            }
            Err(flume::TryRecvError::Empty) => None,
            Err(flume::TryRecvError::Disconnected) => {
                self.finished = true;
                Some(Err(lost_loader()))
            }
        }
    }

    /// Block until the load completes
    pub fn wait(self) -> Result<PointTable> {
        if self.finished {
            return Err(Error::InvalidData("load result was already taken".into()));
        }
        self.receiver.recv().unwrap_or_else(|_| Err(lost_loader()))
    }
}

fn lost_loader() -> Error {
    Error::InvalidData("point loader thread exited without a result".into())
}
