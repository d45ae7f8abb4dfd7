//! Dashboard rendering: a pure snapshot-to-text transform.
//!
//! Takes one [`Snapshot`] and a color flag, returns the full dashboard
//! string. No IO happens here, which keeps every layout decision
//! testable without a terminal or a server.

use std::fmt::Write;

use owo_colors::{OwoColorize, Style};

use syndash_core::Snapshot;

use crate::format::{format_bytes, format_uptime, short_id};

fn paint(text: &str, style: Style, color: bool) -> String {
    if color {
        text.style(style).to_string()
    } else {
        text.to_owned()
    }
}

fn header(name: &str, color: bool) -> String {
    paint(name, Style::new().cyan().bold(), color)
}

/// Render the full dashboard for one snapshot.
pub fn render_dashboard(snapshot: &Snapshot, color: bool) -> String {
    let mut out = String::new();
    render_folders(&mut out, snapshot, color);
    render_this_device(&mut out, snapshot, color);
    render_remote_devices(&mut out, snapshot, color);
    out
}

// ── Folders ──────────────────────────────────────────────────────────

fn render_folders(out: &mut String, snapshot: &Snapshot, color: bool) {
    let _ = writeln!(out, "{}", header("Folders", color));

    if snapshot.folders.is_empty() {
        let _ = writeln!(out, "  (none)");
        let _ = writeln!(out);
        return;
    }

    for folder in &snapshot.folders {
        let label = paint(folder.display_label(), Style::new().bold(), color);
        let path = folder.path.as_deref().unwrap_or("");
        let _ = writeln!(
            out,
            "  {label}  {}",
            paint(path, Style::new().dimmed(), color)
        );

        for member in &folder.devices {
            if member.device_id == snapshot.local_id() {
                continue;
            }
            let name = display_name(snapshot, &member.device_id);
            let name = paint(&name, Style::new().yellow(), color);
            let state = folder_member_state(snapshot, &member.device_id, &folder.id, color);
            let _ = writeln!(out, "    {name}: {state}");
        }
    }
    let _ = writeln!(out);
}

fn folder_member_state(snapshot: &Snapshot, device_id: &str, folder_id: &str, color: bool) -> String {
    match snapshot.completion(device_id, Some(folder_id)) {
        Some(c) if c.is_complete() => paint("Up to Date", Style::new().green(), color),
        Some(c) => format!(
            "{} {} items, ~{}",
            paint("Out of Sync:", Style::new().red(), color),
            c.need_items,
            format_bytes(c.need_bytes)
        ),
        // Completion query failed or never ran; show nothing rather
        // than a fabricated zero.
        None => String::new(),
    }
}

// ── This Device ──────────────────────────────────────────────────────

fn render_this_device(out: &mut String, snapshot: &Snapshot, color: bool) {
    let _ = writeln!(out, "{}", header("This Device", color));

    if let Some(conns) = &snapshot.connections {
        let _ = writeln!(
            out,
            "  Download: {}   Upload: {}",
            format_bytes(conns.total.in_bytes_total),
            format_bytes(conns.total.out_bytes_total)
        );
    }

    let status = &snapshot.status;
    let listeners_ok = status
        .connection_service_status
        .values()
        .filter(|s| s.is_healthy())
        .count();
    let discovery_ok = status
        .discovery_status
        .values()
        .filter(|s| s.is_healthy())
        .count();
    let _ = writeln!(
        out,
        "  Listeners: {listeners_ok}/{}   Discovery: {discovery_ok}/{}",
        status.connection_service_status.len(),
        status.discovery_status.len()
    );
    let _ = writeln!(out, "  Uptime: {}", format_uptime(status.uptime));
    let _ = writeln!(out, "  ID: {}", short_id(&status.my_id));

    if let Some(version) = status.version.as_deref() {
        let os = status.os.as_deref().unwrap_or("?");
        let arch = status.arch.as_deref().unwrap_or("?");
        let _ = writeln!(out, "  Version: {version}, {os} ({arch})");
    }
    let _ = writeln!(out);
}

// ── Remote Devices ───────────────────────────────────────────────────

fn render_remote_devices(out: &mut String, snapshot: &Snapshot, color: bool) {
    let _ = writeln!(out, "{}", header("Remote Devices", color));

    let mut any = false;
    for device in snapshot.remote_devices() {
        any = true;
        let name = display_name(snapshot, &device.device_id);
        let name = paint(&name, Style::new().yellow().bold(), color);
        let _ = writeln!(
            out,
            "  {name} ({}...)",
            short_id(&device.device_id)
        );

        let conn = snapshot.connection(&device.device_id);
        let status = match conn {
            Some(c) if c.paused => paint("Paused", Style::new().yellow(), color),
            Some(c) if c.connected => paint("Connected", Style::new().green(), color),
            Some(_) => paint("Disconnected", Style::new().red(), color),
            None => paint("Unknown", Style::new().dimmed(), color),
        };
        let _ = writeln!(out, "    Status: {status}");

        if conn.is_some_and(|c| c.connected && !c.paused) {
            let sync = overall_sync_state(snapshot, &device.device_id, color);
            if !sync.is_empty() {
                let _ = writeln!(out, "    Sync: {sync}");
            }
        }
    }

    if !any {
        let _ = writeln!(out, "  (none)");
    }
}

fn overall_sync_state(snapshot: &Snapshot, device_id: &str, color: bool) -> String {
    match snapshot.completion(device_id, None) {
        Some(c) if c.is_complete() => paint("Up to Date", Style::new().green(), color),
        Some(c) => format!(
            "Syncing {:.0}%, {} remaining",
            c.completion,
            format_bytes(c.need_bytes)
        ),
        None => String::new(),
    }
}

/// Name to show for a device: configured name, or the truncated ID.
fn display_name(snapshot: &Snapshot, device_id: &str) -> String {
    match snapshot.device_name(device_id) {
        Some(name) => name.to_owned(),
        None => format!("{}...", short_id(device_id)),
    }
}
