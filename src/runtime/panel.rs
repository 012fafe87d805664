use std::sync::mpsc;
use std::time::Duration;

use anyhow::Context;

use crate::config::Settings;
use crate::link::{DisplayCommand, HostLink, open_serial, spawn_display_listener};
use crate::panel::{KeyScanner, Panel, TerminalCanvas, TerminalKeypad};

/// Run the terminal panel against the player on `device` (or the configured
/// link device) until the user quits.
pub fn run_panel(settings: &Settings, device: Option<String>) -> anyhow::Result<()> {
    let mut link_settings = settings.link.clone();
    if let Some(device) = device {
        link_settings.device = device;
    }

    let port = open_serial(&link_settings)
        .with_context(|| format!("failed to open panel link {}", link_settings.device))?;
    let reader = port.try_clone().context("failed to clone panel link")?;

    let (tx, rx) = mpsc::channel::<DisplayCommand>();
    spawn_display_listener(reader, tx);

    let mut keypad = TerminalKeypad::new();
    let scanner = KeyScanner::new(
        keypad.bindings(),
        Duration::from_millis(settings.panel.debounce_ms),
    );
    let tick = Duration::from_millis(settings.panel.tick_ms);

    let canvas = TerminalCanvas::enter()?;
    let mut panel = Panel::new(canvas, scanner, HostLink::new(port), rx);
    tracing::info!(device = %link_settings.device, "panel started");

    let run_result: anyhow::Result<()> = (|| {
        panel.show_startup(&settings.panel)?;
        while keypad.poll(tick)? {
            panel.tick()?;
        }
        Ok(())
    })();

    panel.canvas_mut().leave()?;
    tracing::info!("panel stopped");

    run_result
}
