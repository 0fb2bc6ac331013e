// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! MIDI input handling for receiving messages from a keyboard controller.
//!
//! Wraps midir with attach/detach semantics and last-writer-wins rebinding:
//! when a new input device appears, the previous binding is dropped and the
//! listener follows the most recently connected device.

use std::sync::mpsc::{self, Receiver, Sender};

use anyhow::{anyhow, Context, Result};
use midir::{Ignore, MidiInput, MidiInputConnection};
use tracing::{info, warn};

use super::MidiMessage;

const CLIENT_NAME: &str = "keydrill";

/// MIDI input listener.
///
/// Holds at most one device binding. Messages arrive on the midir callback
/// thread and are drained synchronously by the event loop via [`recv_all`].
/// A listener with no binding is valid: the trainer runs degraded (keyboard
/// visible, non-interactive) when no device is available.
///
/// [`recv_all`]: MidiListener::recv_all
pub struct MidiListener {
    connection: Option<MidiInputConnection<()>>,
    receiver: Option<Receiver<MidiMessage>>,
    port_name: Option<String>,
    known_ports: Vec<String>,
    device_filter: Option<String>,
}

impl MidiListener {
    /// Create a detached listener. `device_filter` restricts binding to
    /// ports whose name contains the given substring.
    pub fn new(device_filter: Option<String>) -> Self {
        Self {
            connection: None,
            receiver: None,
            port_name: None,
            known_ports: Vec::new(),
            device_filter,
        }
    }

    /// Attach to the first available (or first matching) input port.
    ///
    /// No ports is not an error: the listener stays detached and the
    /// trainer runs without input.
    pub fn attach_first(&mut self) -> Result<()> {
        let ports = scan_port_names()?;
        self.known_ports = ports.clone();

        let pick = match &self.device_filter {
            Some(filter) => ports.iter().find(|name| name.contains(filter.as_str())),
            None => ports.first(),
        };

        match pick {
            Some(name) => {
                let name = name.clone();
                self.attach(&name)
            }
            None => {
                warn!("no MIDI input device available; keyboard is non-interactive");
                Ok(())
            }
        }
    }

    /// Attach to a named input port, detaching any previous binding first.
    pub fn attach(&mut self, port_name: &str) -> Result<()> {
        self.detach();

        let mut midi_in = MidiInput::new(CLIENT_NAME)
            .context("failed to create MIDI input client")?;
        midi_in.ignore(Ignore::Sysex);

        let ports = midi_in.ports();
        let port = ports
            .iter()
            .find(|p| midi_in.port_name(p).map_or(false, |n| n == port_name))
            .cloned()
            .ok_or_else(|| anyhow!("MIDI input port '{}' not found", port_name))?;

        let (tx, rx): (Sender<MidiMessage>, Receiver<MidiMessage>) = mpsc::channel();

        let connection = midi_in
            .connect(
                &port,
                "keydrill-input",
                move |_timestamp, bytes, _| {
                    if let Some(msg) = MidiMessage::parse(bytes) {
                        let _ = tx.send(msg);
                    }
                },
                (),
            )
            .map_err(|e| anyhow!("failed to connect to MIDI port '{}': {}", port_name, e))?;

        info!(port = %port_name, "attached MIDI input");

        self.connection = Some(connection);
        self.receiver = Some(rx);
        self.port_name = Some(port_name.to_string());
        Ok(())
    }

    /// Drop the current binding, if any.
    pub fn detach(&mut self) {
        if let Some(connection) = self.connection.take() {
            connection.close();
            info!(port = ?self.port_name, "detached MIDI input");
        }
        self.receiver = None;
        self.port_name = None;
    }

    /// Whether a device is currently bound
    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Name of the bound port, if any
    pub fn port_name(&self) -> Option<&str> {
        self.port_name.as_deref()
    }

    /// Try to receive the next MIDI message (non-blocking)
    pub fn try_recv(&self) -> Option<MidiMessage> {
        self.receiver.as_ref()?.try_recv().ok()
    }

    /// Receive all pending MIDI messages
    pub fn recv_all(&self) -> Vec<MidiMessage> {
        let mut messages = Vec::new();
        while let Some(msg) = self.try_recv() {
            messages.push(msg);
        }
        messages
    }

    /// Re-check the port list and rebind to a newly connected device.
    ///
    /// A port that was not present at the last scan wins the binding
    /// (last-writer-wins); the previous binding is detached first. When the
    /// bound port disappears the listener drops to the detached state.
    pub fn rescan(&mut self) -> Result<()> {
        let ports = scan_port_names()?;

        let newest = ports
            .iter()
            .filter(|name| !self.known_ports.contains(name))
            .filter(|name| {
                self.device_filter
                    .as_ref()
                    .map_or(true, |f| name.contains(f.as_str()))
            })
            .last()
            .cloned();

        if let Some(name) = newest {
            if let Err(e) = self.attach(&name) {
                warn!(port = %name, "failed to rebind MIDI input: {e:#}");
            }
        } else if let Some(current) = self.port_name.clone() {
            if !ports.contains(&current) {
                warn!(port = %current, "MIDI input device disappeared");
                self.detach();
            }
        }

        self.known_ports = ports;
        Ok(())
    }
}

fn scan_port_names() -> Result<Vec<String>> {
    let midi_in = MidiInput::new(CLIENT_NAME)
        .context("failed to create MIDI input client")?;
    Ok(midi_in
        .ports()
        .iter()
        .filter_map(|p| midi_in.port_name(p).ok())
        .collect())
}

/// List all available MIDI input ports
pub fn list_sources() -> Result<Vec<(usize, String)>> {
    Ok(scan_port_names()?.into_iter().enumerate().collect())
}

/// Print all available MIDI input ports to stdout
pub fn print_sources() {
    match list_sources() {
        Ok(sources) if sources.is_empty() => println!("No MIDI input devices found."),
        Ok(sources) => {
            println!("Available MIDI inputs:");
            for (i, name) in sources {
                println!("  {}: {}", i, name);
            }
        }
        Err(e) => println!("MIDI unavailable: {e:#}"),
    }
}
