//! Discovery of the GUI address and API key from the local machine.
//!
//! These are collaborators of the aggregation core, not part of it: the
//! core receives one ready `(base_url, api_key)` pair before any query
//! runs. Flags override every step.

use std::path::{Path, PathBuf};
use std::process::Command;

use secrecy::SecretString;
use tracing::debug;

use crate::error::CliError;

/// Default Syncthing GUI port.
pub const GUI_PORT: u16 = 8384;

// ── config.xml lookup ────────────────────────────────────────────────

/// First existing config.xml among the standard Syncthing locations.
pub fn find_config_path() -> Option<PathBuf> {
    let home = std::env::var_os("HOME").map(PathBuf::from)?;

    let candidates = [
        home.join(".local/state/syncthing/config.xml"),
        home.join(".config/syncthing/config.xml"),
        PathBuf::from("/var/lib/syncthing/.config/syncthing/config.xml"),
        home.join("Library/Application Support/Syncthing/config.xml"),
    ];

    candidates.into_iter().find(|p| p.exists())
}

/// Extract the `<gui><apikey>` value from config.xml.
pub fn api_key_from_config(path: &Path) -> Result<SecretString, CliError> {
    use quick_xml::Reader;
    use quick_xml::events::Event;

    let content = std::fs::read_to_string(path).map_err(|source| CliError::ConfigUnreadable {
        path: path.display().to_string(),
        source,
    })?;

    let mut reader = Reader::from_str(&content);
    reader.config_mut().trim_text(true);

    let mut in_gui = false;
    let mut in_apikey = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"gui" => in_gui = true,
                b"apikey" if in_gui => in_apikey = true,
                _ => {}
            },
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"gui" => in_gui = false,
                b"apikey" => in_apikey = false,
                _ => {}
            },
            Ok(Event::Text(ref e)) if in_apikey => {
                let key = e.unescape().unwrap_or_default().trim().to_owned();
                if !key.is_empty() {
                    return Ok(SecretString::from(key));
                }
            }
            Ok(Event::Eof) | Err(_) => break,
            Ok(_) => {}
        }
        buf.clear();
    }

    Err(CliError::NoApiKey {
        path: path.display().to_string(),
    })
}

// ── Listening-socket probe ───────────────────────────────────────────

/// GUI base URL: probed listen address on the default port, with
/// 127.0.0.1 as the fallback. Wildcard binds map to loopback.
pub fn discover_base_url(port: u16) -> String {
    let addr = match probe_listen_address(port) {
        Some(addr) if addr != "0.0.0.0" => addr,
        _ => "127.0.0.1".to_owned(),
    };
    format!("http://{addr}:{port}")
}

/// Address something is listening on for `port`, via `lsof` (macOS) or
/// `ss` (Linux). `None` when the probe fails or nothing listens.
fn probe_listen_address(port: u16) -> Option<String> {
    if cfg!(target_os = "macos") {
        probe_with_lsof(port)
    } else {
        probe_with_ss(port)
    }
}

fn probe_with_lsof(port: u16) -> Option<String> {
    let output = Command::new("lsof")
        .args(["-i", &format!(":{port}"), "-sTCP:LISTEN", "-n", "-P"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    for line in stdout.lines().skip(1) {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 9 {
            continue;
        }
        // The NAME column holds `addr:port`; scan from the right.
        for part in parts.iter().rev() {
            if part.contains(':') && !part.starts_with('(') {
                let addr = part.split(':').next()?;
                debug!(addr, "lsof found GUI listener");
                return Some(normalize_wildcard(addr));
            }
        }
    }
    None
}

fn probe_with_ss(port: u16) -> Option<String> {
    let output = Command::new("ss")
        .args(["-tlnH", "sport", "=", &format!(":{port}")])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    for line in stdout.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 4 {
            continue;
        }
        if let Some(idx) = parts[3].rfind(':') {
            let addr = &parts[3][..idx];
            debug!(addr, "ss found GUI listener");
            return Some(normalize_wildcard(addr));
        }
    }
    None
}

fn normalize_wildcard(addr: &str) -> String {
    if addr == "*" || addr == "0.0.0.0" || addr == "::" || addr == "[::]" {
        "0.0.0.0".to_owned()
    } else {
        addr.to_owned()
    }
}
