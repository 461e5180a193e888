//! Generic async job handling for GUI operations
//!
//! The UI thread never awaits. Work runs on the shared tokio runtime and reports back
//! through a channel that the render loop polls once per frame.

use anyhow::{anyhow, Result};
use std::future::Future;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use tokio::runtime::Handle;
use tokio::task::AbortHandle;

/// Helper struct for async jobs - polls a background task
pub struct AsyncJob<T> {
    receiver: Option<Receiver<Result<T>>>,
    abort: Option<AbortHandle>,
}

impl<T: Send + 'static> AsyncJob<T> {
    /// Spawn `fut` on the given runtime and return a handle the UI can poll
    pub fn spawn<Fut>(runtime: &Handle, fut: Fut) -> Self
    where
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let task = runtime.spawn(async move {
            let _ = tx.send(fut.await);
        });
        Self {
            receiver: Some(rx),
            abort: Some(task.abort_handle()),
        }
    }
}

impl<T> AsyncJob<T> {
    /// Poll the job for completion
    /// Returns Some(result) if the job has completed, None if still running
    pub fn poll(&mut self) -> Option<Result<T>> {
        if let Some(rx) = &self.receiver {
            match rx.try_recv() {
                Ok(res) => {
                    self.finish();
                    return Some(res);
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    self.finish();
                    return Some(Err(anyhow!("Worker task disconnected")));
                }
            }
        }
        None
    }

    /// Check if the job is still running
    pub fn is_running(&self) -> bool {
        self.receiver.is_some()
    }

    /// Stop listening for the result but let the background task run to completion
    pub fn detach(mut self) {
        self.abort = None;
        self.receiver = None;
    }

    /// Stop the background task; its result is discarded
    pub fn cancel(&mut self) {
        if let Some(abort) = self.abort.take() {
            abort.abort();
        }
        self.receiver = None;
    }

    fn finish(&mut self) {
        self.receiver = None;
        self.abort = None;
    }
}

impl<T> Drop for AsyncJob<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}
