use crate::ports::outbound::ViewHost;
use tokio::sync::mpsc;

/// A signal from a view to whoever renders it
#[derive(Debug)]
pub enum HostSignal {
    /// The view has a new value; call `compute` again
    Invalidated,
    /// A load failed and nobody else will handle it
    Failed(anyhow::Error),
}

/// ChannelHost adapter forwarding view signals over an unbounded channel
///
/// The render loop owns the receiver and decides when to re-read the view,
/// which keeps re-entrancy out of the view's callbacks entirely.
#[derive(Clone)]
pub struct ChannelHost {
    sender: mpsc::UnboundedSender<HostSignal>,
}

impl ChannelHost {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<HostSignal>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    fn send(&self, signal: HostSignal) {
        if self.sender.send(signal).is_err() {
            tracing::trace!("channel_host.receiver_dropped");
        }
    }
}

impl ViewHost for ChannelHost {
    fn invalidate(&self) {
        self.send(HostSignal::Invalidated);
    }

    fn unhandled_failure(&self, error: anyhow::Error) {
        self.send(HostSignal::Failed(error));
    }
}
