//! Operator interruption.
//!
//! Both Ctrl-C (SIGINT) and SIGTERM (systemd, `docker stop`, plain `kill`)
//! end a run through the same path, so the process lock is always released.

use crate::Result;

/// Which signal asked the migration to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shutdown {
    Interrupt,
    Terminate,
}

impl Shutdown {
    /// Conventional `128 + signo` exit status.
    pub fn exit_code(self) -> u8 {
        match self {
            Shutdown::Interrupt => 130,
            Shutdown::Terminate => 143,
        }
    }
}

/// Signal handlers, registered on [`ShutdownSignal::install`].
pub struct ShutdownSignal {
    #[cfg(unix)]
    interrupt: tokio::signal::unix::Signal,
    #[cfg(unix)]
    terminate: tokio::signal::unix::Signal,
}

impl ShutdownSignal {
    /// Register the handlers now, so a signal arriving before the first
    /// [`recv`](Self::recv) is not lost. Must be called inside a runtime.
    #[cfg(unix)]
    pub fn install() -> Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
        })
    }

    #[cfg(not(unix))]
    pub fn install() -> Result<Self> {
        Ok(Self {})
    }

    /// Wait for the next interruption.
    #[cfg(unix)]
    pub async fn recv(&mut self) -> Shutdown {
        tokio::select! {
            _ = self.interrupt.recv() => {
                tracing::info!("received SIGINT; shutting down");
                Shutdown::Interrupt
            }
            _ = self.terminate.recv() => {
                tracing::info!("received SIGTERM; shutting down");
                Shutdown::Terminate
            }
        }
    }

    #[cfg(not(unix))]
    pub async fn recv(&mut self) -> Shutdown {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
        tracing::info!("received ctrl_c; shutting down");
        Shutdown::Interrupt
    }
}
