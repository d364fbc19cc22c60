//! Bluetooth RFCOMM serial transport.
//!
//! The printer is expected to be bound to an `rfcomm` device by the host
//! (`rfcomm bind` or an equivalent supervisor step). This module locates
//! the device node for the configured MAC, puts the tty into raw mode and
//! streams the payload in small chunks so the printer's modest receive
//! buffer keeps up.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;
use std::thread;
use std::time::Duration;

use log::{debug, info};

use crate::error::PaginitaError;

use super::Transport;

/// Bytes per write. PeriPage printers drop data beyond roughly this much
/// per transfer window.
const CHUNK_SIZE: usize = 256;

/// Pause between chunks.
const CHUNK_DELAY: Duration = Duration::from_millis(10);

/// Validate a printer MAC address: six colon-separated hex octets, and not
/// the `XX:XX:XX:XX:XX:XX` placeholder that ships in default configs.
pub fn is_valid_mac(mac: &str) -> bool {
    if mac.eq_ignore_ascii_case("XX:XX:XX:XX:XX:XX") {
        return false;
    }
    let octets: Vec<&str> = mac.split(':').collect();
    octets.len() == 6
        && octets
            .iter()
            .all(|o| o.len() == 2 && o.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Find the `/dev/rfcommN` node bound to the given MAC.
///
/// Reads `/proc/net/rfcomm` first; if the kernel table is absent or does
/// not list the MAC, falls back to parsing `rfcomm -a` output.
fn find_device_for_mac(mac: &str) -> Option<PathBuf> {
    if let Ok(table) = std::fs::read_to_string("/proc/net/rfcomm") {
        for line in table.lines() {
            // "id  dest_addr  channel  state" columns
            let mut fields = line.split_whitespace();
            if let (Some(id), Some(dest)) = (fields.next(), fields.next()) {
                if dest.eq_ignore_ascii_case(mac) {
                    return Some(PathBuf::from(format!("/dev/rfcomm{}", id)));
                }
            }
        }
    }

    let output = Command::new("rfcomm").arg("-a").output().ok()?;
    let listing = String::from_utf8_lossy(&output.stdout);
    for line in listing.lines() {
        // "rfcomm0: AA:BB:CC:DD:EE:FF channel 1 ..."
        if let Some((name, rest)) = line.split_once(':') {
            let dest = rest.split_whitespace().next().unwrap_or("");
            if name.starts_with("rfcomm") && dest.eq_ignore_ascii_case(mac) {
                return Some(PathBuf::from(format!("/dev/{}", name.trim())));
            }
        }
    }
    None
}

/// Put a tty file descriptor into raw mode so the line discipline does not
/// mangle binary raster data.
#[cfg(unix)]
fn configure_tty_raw(file: &std::fs::File) -> std::io::Result<()> {
    use std::os::unix::io::AsRawFd;

    let fd = file.as_raw_fd();
    // SAFETY: fd is a valid open descriptor for the lifetime of `file`.
    unsafe {
        let mut termios: libc::termios = std::mem::zeroed();
        if libc::tcgetattr(fd, &mut termios) != 0 {
            return Err(std::io::Error::last_os_error());
        }
        libc::cfmakeraw(&mut termios);
        if libc::tcsetattr(fd, libc::TCSANOW, &termios) != 0 {
            return Err(std::io::Error::last_os_error());
        }
    }
    Ok(())
}

/// Sends encoded jobs over a bound RFCOMM serial device.
pub struct RfcommTransport {
    mac: String,
    chunk_size: usize,
    chunk_delay: Duration,
}

impl RfcommTransport {
    pub fn new(mac: &str) -> Self {
        Self {
            mac: mac.to_string(),
            chunk_size: CHUNK_SIZE,
            chunk_delay: CHUNK_DELAY,
        }
    }

    pub fn mac(&self) -> &str {
        &self.mac
    }
}

impl Transport for RfcommTransport {
    fn send(&self, payload: &[u8]) -> Result<(), PaginitaError> {
        let device = find_device_for_mac(&self.mac).ok_or_else(|| {
            PaginitaError::Transport(format!("no such device bound for {}", self.mac))
        })?;
        debug!("sending {} bytes to {}", payload.len(), device.display());

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&device)
            .map_err(|e| {
                PaginitaError::Transport(format!("open {} failed: {}", device.display(), e))
            })?;

        #[cfg(unix)]
        configure_tty_raw(&file).map_err(|e| {
            PaginitaError::Transport(format!("raw mode on {} failed: {}", device.display(), e))
        })?;

        for chunk in payload.chunks(self.chunk_size) {
            file.write_all(chunk)
                .map_err(|e| PaginitaError::Transport(format!("write failed: {}", e)))?;
            thread::sleep(self.chunk_delay);
        }
        file.flush()
            .map_err(|e| PaginitaError::Transport(format!("flush failed: {}", e)))?;

        info!("sent {} bytes to printer {}", payload.len(), self.mac);
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_macs() {
        assert!(is_valid_mac("AA:BB:CC:DD:EE:FF"));
        assert!(is_valid_mac("aa:bb:cc:dd:ee:ff"));
        assert!(is_valid_mac("00:11:22:33:44:55"));
    }

    #[test]
    fn rejects_malformed_macs() {
        assert!(!is_valid_mac(""));
        assert!(!is_valid_mac("AA:BB:CC:DD:EE"));
        assert!(!is_valid_mac("AA:BB:CC:DD:EE:FF:00"));
        assert!(!is_valid_mac("AA-BB-CC-DD-EE-FF"));
        assert!(!is_valid_mac("AA:BB:CC:DD:EE:GG"));
        assert!(!is_valid_mac("AAA:BB:CC:DD:EE:F"));
    }

    #[test]
    fn rejects_the_config_placeholder() {
        assert!(!is_valid_mac("XX:XX:XX:XX:XX:XX"));
        assert!(!is_valid_mac("xx:xx:xx:xx:xx:xx"));
    }

    #[test]
    fn missing_device_is_a_transport_error() {
        let transport = RfcommTransport::new("00:00:00:00:00:01");
        let err = transport.send(&[0u8; 4]).unwrap_err();
        assert!(err.to_string().contains("00:00:00:00:00:01"));
    }
}
