use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::{ContactMessage, Mailer};
use crate::error::{BlogError, BlogResult};

/// Sending side of the contact-message queue.
#[derive(Debug, Clone)]
pub struct ContactQueue {
    tx: mpsc::Sender<ContactMessage>,
}

impl ContactQueue {
    /// Create a bounded queue, returning the sender and the receiver the
    /// worker drains.
    #[must_use]
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<ContactMessage>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }

    /// Queue a message without waiting.
    ///
    /// # Errors
    ///
    /// `NotificationUnavailable` if the queue is full or the worker is gone.
    pub fn enqueue(&self, message: ContactMessage) -> BlogResult<()> {
        match self.tx.try_send(message) {
            Ok(()) => {
                debug!("Contact message queued");
                Ok(())
            }
            Err(TrySendError::Full(_)) => {
                warn!("Contact queue full; dropping message");
                Err(BlogError::NotificationUnavailable)
            }
            Err(TrySendError::Closed(_)) => {
                error!("Contact worker has stopped; dropping message");
                Err(BlogError::NotificationUnavailable)
            }
        }
    }
}

/// Spawn the worker that delivers queued contact messages one at a time.
///
/// Delivery failures are logged and the message is dropped. The task ends
/// once every [`ContactQueue`] sender is gone.
pub fn spawn_worker(mut rx: mpsc::Receiver<ContactMessage>, mailer: Mailer) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(enabled = mailer.is_enabled(), "Contact mail worker started");
        while let Some(message) = rx.recv().await {
            if let Err(e) = mailer.send_contact(&message).await {
                error!(from_email = %message.email, "Contact email failed: {e:#}");
            }
        }
        info!("Contact mail worker stopped");
    })
}
