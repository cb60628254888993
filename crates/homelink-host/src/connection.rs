/*!
 * Connection wrapper types for Homelink.
 *
 * Connections are opened, owned and driven by the host; the handle here
 * forwards requests and reads back connection details.
 */
use std::time::Duration;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::runtime::{HostConnection, Result, SharedHost};

/// The transport a connection uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transport {
    /// Connect over an IP network then send or receive messages
    TcpIp,
    /// Connect over an IP network using TLS security
    TlsIp,
    /// Send or receive UDP messages, useful for discovering hardware
    UdpIp,
    /// Send or receive ICMP messages, useful for pinging hardware
    IcmpIp,
    /// Connect to a serial port
    Serial,
}

impl Transport {
    /// The transport string the host understands
    pub fn as_str(&self) -> &'static str {
        match self {
            Transport::TcpIp => "TCP/IP",
            Transport::TlsIp => "TLS/IP",
            Transport::UdpIp => "UDP/IP",
            Transport::IcmpIp => "ICMP/IP",
            Transport::Serial => "Serial",
        }
    }
}

/// The framing protocol the host uses to break inbound data into messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WireProtocol {
    /// No framing; raw data is passed through
    None,
    /// Line-delimited messages
    Line,
    /// JSON messages
    Json,
    /// XML messages
    Xml,
    /// HTTP messages
    Http,
    /// HTTPS messages
    Https,
    /// MQTT messages
    Mqtt,
    /// MQTT over TLS
    Mqtts,
    /// ICMP messages
    Icmp,
}

impl WireProtocol {
    /// The protocol string the host understands
    pub fn as_str(&self) -> &'static str {
        match self {
            WireProtocol::None => "None",
            WireProtocol::Line => "Line",
            WireProtocol::Json => "JSON",
            WireProtocol::Xml => "XML",
            WireProtocol::Http => "HTTP",
            WireProtocol::Https => "HTTPS",
            WireProtocol::Mqtt => "MQTT",
            WireProtocol::Mqtts => "MQTTS",
            WireProtocol::Icmp => "ICMP",
        }
    }
}

/// Specification for opening a connection through the host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionSpec {
    /// Name of the connection; the host assigns unique names to inbound ones
    pub name: String,
    /// The transport to use
    pub transport: Transport,
    /// The framing protocol for inbound data
    pub protocol: WireProtocol,
    /// IP address or serial port to connect to
    pub address: String,
    /// Port number, for IP transports
    pub port: Option<String>,
    /// Baud rate, for serial transports; default 115200
    pub baud: u32,
}

impl ConnectionSpec {
    /// Create a connection spec
    pub fn new<S: Into<String>, A: Into<String>>(
        name: S,
        transport: Transport,
        protocol: WireProtocol,
        address: A,
    ) -> Self {
        Self {
            name: name.into(),
            transport,
            protocol,
            address: address.into(),
            port: None,
            baud: 115_200,
        }
    }

    /// Set the port number
    pub fn with_port<S: Into<String>>(mut self, port: S) -> Self {
        self.port = Some(port.into());
        self
    }

    /// Set the baud rate
    pub fn with_baud(mut self, baud: u32) -> Self {
        self.baud = baud;
        self
    }
}

/// A pass-through handle to a host-owned connection
#[derive(Debug)]
pub struct ConnectionHandle {
    inner: Box<dyn HostConnection>,
}

impl ConnectionHandle {
    /// Open a connection through the host
    pub fn open(host: &SharedHost, spec: &ConnectionSpec) -> Result<Self> {
        Ok(Self {
            inner: host.open_connection(spec)?,
        })
    }

    /// The name of the connection
    pub fn name(&self) -> String {
        self.inner.name()
    }

    /// The address associated with the connection
    pub fn address(&self) -> String {
        self.inner.address()
    }

    /// The port associated with the connection, for IP transports
    pub fn port(&self) -> Option<String> {
        self.inner.port()
    }

    /// The baud rate of the connection
    pub fn baud(&self) -> u32 {
        self.inner.baud()
    }

    /// The listening connection this one was accepted from, if any
    pub fn parent(&self) -> Option<String> {
        self.inner.parent()
    }

    /// True while a connect has been requested but has yet to complete or fail
    pub fn connecting(&self) -> bool {
        self.inner.connecting()
    }

    /// Request a connect to the configured endpoint
    pub fn connect(&self) -> Result<()> {
        self.inner.connect()
    }

    /// Start listening on the configured port
    ///
    /// The host creates a connection object for each client that connects.
    pub fn listen(&self) -> Result<()> {
        self.inner.listen()
    }

    /// Send a message to the external hardware
    ///
    /// The host sends delayed messages sometime after the delay period; other
    /// events are processed in the intervening time, so delayed sends may be
    /// processed out of order.
    pub fn send(&self, payload: Bytes, delay: Option<Duration>) -> Result<()> {
        self.inner.send(payload, delay)
    }

    /// Terminate the connection, including listening connections
    pub fn disconnect(&self) -> Result<()> {
        self.inner.disconnect()
    }
}
