//! Ctrl+C handling for the interactive wizard

use expertosy_core::LivenessGuard;
use expertosy_core::error::{ExpertosyError, ExpertosyResult};
use futures::stream::StreamExt;
use signal_hook::consts::SIGINT;
use signal_hook_tokio::Signals;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::task::JoinHandle;

/// Routes SIGINT to the flow.
///
/// While a backend request is in flight the flow's guard is torn down and the
/// pending response is discarded. At any other time the process exits.
pub struct SignalHandler {
    guard: LivenessGuard,
    /// Set while a backend request is in flight
    busy: Arc<AtomicBool>,
    task_handle: Option<JoinHandle<()>>,
    signals_handle: Option<signal_hook_tokio::Handle>,
}

impl SignalHandler {
    pub fn new(guard: LivenessGuard) -> Self {
        Self {
            guard,
            busy: Arc::new(AtomicBool::new(false)),
            task_handle: None,
            signals_handle: None,
        }
    }

    /// Start listening for Ctrl+C
    pub fn start(&mut self) -> ExpertosyResult<()> {
        if self.task_handle.is_some() {
            return Ok(());
        }

        let mut signals = Signals::new([SIGINT]).map_err(|e| {
            ExpertosyError::other(format!("Failed to install signal handler: {}", e))
        })?;
        self.signals_handle = Some(signals.handle());

        let guard = self.guard.clone();
        let busy = self.busy.clone();
        let handle = tokio::spawn(async move {
            while let Some(signal) = signals.next().await {
                if signal != SIGINT {
                    continue;
                }
                if busy.load(Ordering::SeqCst) {
                    guard.teardown();
                    eprintln!("\nCancelling request... (Ctrl+C)");
                } else {
                    eprintln!("\nGoodbye!");
                    std::process::exit(0);
                }
            }
        });

        self.task_handle = Some(handle);
        Ok(())
    }

    /// Mark whether a backend request is in flight
    pub fn set_busy(&self, busy: bool) {
        self.busy.store(busy, Ordering::SeqCst);
    }

    /// Stop listening
    pub fn stop(&mut self) {
        if let Some(handle) = self.signals_handle.take() {
            handle.close();
        }
        if let Some(task) = self.task_handle.take() {
            task.abort();
        }
    }
}

impl Drop for SignalHandler {
    fn drop(&mut self) {
        self.stop();
    }
}
