//! Single-task event dispatch.
//!
//! Every transport event is sent as a [`DispatchCommand`] over one unbounded
//! channel to a single task that owns the [`ConnectionHandler`]. Commands are
//! applied one at a time in arrival order, so the handler's registry is never
//! shared and replies to a session keep the order of its requests.

use std::ops::ControlFlow;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use super::manager::ConnectionHandler;
use super::messages::ClientFrame;
use crate::domain::{Session, SessionId};
use crate::error::ConsoleError;

/// Transport event or query addressed to the dispatcher.
#[derive(Debug)]
pub enum DispatchCommand {
    /// A socket was accepted; `outbound` receives frames for it.
    Connect {
        /// New session identifier.
        session_id: SessionId,
        /// Sending half of the socket's outbound queue.
        outbound: mpsc::UnboundedSender<String>,
    },
    /// A text frame arrived.
    Frame {
        /// Originating session.
        session_id: SessionId,
        /// Raw frame text.
        text: String,
    },
    /// The socket closed or failed.
    Disconnect {
        /// Closed session.
        session_id: SessionId,
    },
    /// Report the number of live sessions.
    SessionCount {
        /// Reply channel.
        reply: oneshot::Sender<usize>,
    },
    /// Stop dispatching and release the handler.
    Shutdown,
}

/// Cloneable sender side of the dispatcher.
#[derive(Debug, Clone)]
pub struct DispatchHandle {
    sender: mpsc::UnboundedSender<DispatchCommand>,
}

impl DispatchHandle {
    fn send(&self, command: DispatchCommand) -> Result<(), ConsoleError> {
        self.sender
            .send(command)
            .map_err(|_| ConsoleError::DispatcherClosed)
    }

    /// Announces a new session.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::DispatcherClosed`] if the dispatcher stopped.
    pub fn connect(
        &self,
        session_id: SessionId,
        outbound: mpsc::UnboundedSender<String>,
    ) -> Result<(), ConsoleError> {
        self.send(DispatchCommand::Connect {
            session_id,
            outbound,
        })
    }

    /// Forwards an inbound text frame.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::DispatcherClosed`] if the dispatcher stopped.
    pub fn frame(&self, session_id: SessionId, text: String) -> Result<(), ConsoleError> {
        self.send(DispatchCommand::Frame { session_id, text })
    }

    /// Announces that a session's transport closed.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::DispatcherClosed`] if the dispatcher stopped.
    pub fn disconnect(&self, session_id: SessionId) -> Result<(), ConsoleError> {
        self.send(DispatchCommand::Disconnect { session_id })
    }

    /// Asks the dispatcher how many sessions are live.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::DispatcherClosed`] if the dispatcher stopped
    /// before answering.
    pub async fn session_count(&self) -> Result<usize, ConsoleError> {
        let (reply, rx) = oneshot::channel();
        self.send(DispatchCommand::SessionCount { reply })?;
        rx.await.map_err(|_| ConsoleError::DispatcherClosed)
    }

    /// Asks the dispatcher to stop after the commands already queued.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::DispatcherClosed`] if the dispatcher already
    /// stopped.
    pub fn shutdown(&self) -> Result<(), ConsoleError> {
        self.send(DispatchCommand::Shutdown)
    }

    /// Returns `true` once the dispatcher task has stopped.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Receiving side of the dispatcher; owns the handler.
#[derive(Debug)]
pub struct Dispatcher<H> {
    handler: H,
    receiver: mpsc::UnboundedReceiver<DispatchCommand>,
}

impl<H: ConnectionHandler> Dispatcher<H> {
    /// Creates a dispatcher and the handle that feeds it.
    #[must_use]
    pub fn new(handler: H) -> (Self, DispatchHandle) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { handler, receiver }, DispatchHandle { sender })
    }

    /// Applies commands until [`DispatchCommand::Shutdown`] arrives or every
    /// handle is dropped, then returns the handler.
    pub async fn run(mut self) -> H {
        while let Some(command) = self.receiver.recv().await {
            if self.apply(command).is_break() {
                break;
            }
        }
        tracing::info!(
            sessions = self.handler.session_count(),
            "dispatcher stopped"
        );
        self.handler
    }

    fn apply(&mut self, command: DispatchCommand) -> ControlFlow<()> {
        match command {
            DispatchCommand::Connect {
                session_id,
                outbound,
            } => self.handler.on_connect(Session::new(session_id, outbound)),
            DispatchCommand::Frame { session_id, text } => match ClientFrame::parse(&text) {
                Ok(frame) => self
                    .handler
                    .on_message(session_id, &frame.event, frame.data),
                Err(err) => self.handler.on_malformed(session_id, err),
            },
            DispatchCommand::Disconnect { session_id } => self.handler.on_disconnect(session_id),
            DispatchCommand::SessionCount { reply } => {
                // Receiver may have given up waiting.
                let _ = reply.send(self.handler.session_count());
            }
            DispatchCommand::Shutdown => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }
}

/// Spawns a dispatcher task around `handler`.
///
/// The join handle yields the handler back once the dispatcher stops;
/// dropping it then releases every session.
pub fn spawn_dispatcher<H>(handler: H) -> (DispatchHandle, JoinHandle<H>)
where
    H: ConnectionHandler + Send + 'static,
{
    let (dispatcher, handle) = Dispatcher::new(handler);
    (handle, tokio::spawn(dispatcher.run()))
}
