//! Transfer sequencing seam between the protocol session and the USB stack.

#![deny(static_mut_refs)]

use crate::error::TransportError;
use crate::types::Command;

/// Blocking vendor control-transfer sink.
///
/// `send` must not return until the device has completed the transfer or the
/// bounded completion timeout has elapsed. The X52 Pro drops a request that
/// arrives while the previous one is still in flight, so implementations must
/// never pipeline. Implementations do not retry.
pub trait ControlTransport {
    fn send(&mut self, command: Command) -> Result<(), TransportError>;
}

impl<T: ControlTransport + ?Sized> ControlTransport for &mut T {
    fn send(&mut self, command: Command) -> Result<(), TransportError> {
        (**self).send(command)
    }
}

impl<T: ControlTransport + ?Sized> ControlTransport for Box<T> {
    fn send(&mut self, command: Command) -> Result<(), TransportError> {
        (**self).send(command)
    }
}

pub mod mock {
    use super::*;

    /// In-memory transport that records every command it accepts.
    #[derive(Debug, Default)]
    pub struct RecordingTransport {
        sent: Vec<Command>,
        attempts: usize,
        fail_on_attempt: Option<(usize, TransportError)>,
    }

    impl RecordingTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Fail the `attempt`-th send (0-based, counted across the transport's
        /// lifetime) with `error`. Commands after it are accepted again.
        pub fn failing_on(attempt: usize, error: TransportError) -> Self {
            Self {
                fail_on_attempt: Some((attempt, error)),
                ..Self::default()
            }
        }

        /// Commands that completed successfully, in order.
        pub fn sent(&self) -> &[Command] {
            &self.sent
        }

        /// Number of `send` calls, including failed ones.
        pub fn attempts(&self) -> usize {
            self.attempts
        }

        pub fn clear(&mut self) {
            self.sent.clear();
        }
    }

    impl ControlTransport for RecordingTransport {
        fn send(&mut self, command: Command) -> Result<(), TransportError> {
            let attempt = self.attempts;
            self.attempts = self.attempts.saturating_add(1);
            if let Some((fail_at, error)) = &self.fail_on_attempt
                && *fail_at == attempt
            {
                return Err(error.clone());
            }
            self.sent.push(command);
            Ok(())
        }
    }
}
