//! Outbound actuator commands.
//!
//! The dashboard forwards command tokens (`G:1`, `B:SPD:127`, `R:1`) to the
//! feeder verbatim. It never interprets them; the firmware acknowledges or
//! rejects each one on its own serial protocol.

pub mod pwm;

use std::fmt;
use std::io::Write;

use tokio::sync::mpsc;
use tracing::debug;

use crate::error::FeederError;

/// An opaque command accepted by the feeder firmware.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommandToken(String);

impl CommandToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Speed token understood by the firmware's auger driver.
    pub fn speed(duty: u8) -> Self {
        Self(format!("SPD:{}", duty))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(&self) -> Result<(), FeederError> {
        if self.0.trim().is_empty() {
            return Err(FeederError::Command("empty command".to_string()));
        }
        if self.0.contains(['\n', '\r']) {
            return Err(FeederError::Command(format!(
                "command {:?} spans more than one line",
                self.0
            )));
        }
        Ok(())
    }
}

impl fmt::Display for CommandToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CommandToken {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

/// Destination for actuator commands.
pub trait CommandSink: Send {
    /// Deliver one command token.
    fn send(&mut self, token: &CommandToken) -> Result<(), FeederError>;

    /// Set the actuator speed as a PWM duty byte.
    fn set_actuator_speed(&mut self, duty: u8) -> Result<(), FeederError> {
        self.send(&CommandToken::speed(duty))
    }
}

/// Writes one command per line, as the firmware's serial parser expects.
#[derive(Debug)]
pub struct WriterCommandSink<W> {
    writer: W,
}

impl<W: Write + Send> WriterCommandSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> CommandSink for WriterCommandSink<W> {
    fn send(&mut self, token: &CommandToken) -> Result<(), FeederError> {
        token.validate()?;
        writeln!(self.writer, "{}", token)?;
        self.writer.flush()?;
        debug!(command = %token, "command sent");
        Ok(())
    }
}

/// Forwards commands to an in-process consumer.
#[derive(Debug, Clone)]
pub struct ChannelCommandSink {
    sender: mpsc::UnboundedSender<CommandToken>,
}

impl ChannelCommandSink {
    pub fn create() -> (Self, mpsc::UnboundedReceiver<CommandToken>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl CommandSink for ChannelCommandSink {
    fn send(&mut self, token: &CommandToken) -> Result<(), FeederError> {
        token.validate()?;
        self.sender
            .send(token.clone())
            .map_err(|_| FeederError::Command("command receiver dropped".to_string()))
    }
}
