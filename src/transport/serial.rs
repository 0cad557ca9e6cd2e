//! Serial port transport
//!
//! UART link at the module's fixed line settings.

use std::io::{ErrorKind, Read, Write};
use std::time::Duration;

use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};

use super::Transport;
use crate::config::{Config, BAUD_RATE, DATA_BITS, STOP_BITS};
use crate::error::Result;

/// UART transport backed by the `serialport` crate
pub struct SerialTransport {
    port: Box<dyn SerialPort>,

    /// Wait for the first byte of a read
    first_byte_timeout: Duration,

    /// Wait between subsequent bytes of a read
    inter_byte_timeout: Duration,
}

impl SerialTransport {
    /// Open the configured port at 9600 baud, 8N1
    pub fn open(config: &Config) -> Result<Self> {
        let port = serialport::new(&config.port, BAUD_RATE)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(config.first_byte_timeout())
            .open()?;

        tracing::info!(
            "Opened {} at {} baud, {}N{}",
            config.port,
            BAUD_RATE,
            DATA_BITS,
            STOP_BITS
        );

        Ok(Self::from_port(port, config))
    }

    /// Wrap an already opened port
    pub fn from_port(port: Box<dyn SerialPort>, config: &Config) -> Self {
        Self {
            port,
            first_byte_timeout: config.first_byte_timeout(),
            inter_byte_timeout: config.inter_byte_timeout(),
        }
    }

    /// Port name, if the platform reports one
    pub fn name(&self) -> Option<String> {
        self.port.name()
    }
}

impl Transport for SerialTransport {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.port.write_all(bytes)?;
        Ok(())
    }

    fn read_into(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut filled = 0;

        while filled < buf.len() {
            let timeout = if filled == 0 {
                self.first_byte_timeout
            } else {
                self.inter_byte_timeout
            };
            self.port.set_timeout(timeout)?;

            match self.port.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::TimedOut => break,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Ok(filled)
    }

    fn bytes_available(&mut self) -> Result<usize> {
        Ok(self.port.bytes_to_read()? as usize)
    }

    fn wait_until_write_complete(&mut self) -> Result<()> {
        self.port.flush()?;
        Ok(())
    }
}
