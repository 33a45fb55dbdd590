//! Hand the finished chart to the platform image viewer and wait for it.

use crate::Result;

use std::ffi::OsStr;
use std::path::Path;
use std::process::Command;
use tracing::{debug, warn};

/// Open `path` in the system viewer and wait for the launcher to exit.
///
/// On macOS (`open -W`) and Windows (`start /WAIT`) that is when the viewer
/// closes. On Linux `xdg-open` returns as soon as it has handed the file to
/// the desktop's viewer, so the call does not block for the viewer's lifetime.
///
/// Does nothing when no display is reachable. A viewer that fails to start is
/// logged and otherwise ignored.
pub fn show_image(path: &Path) -> Result<()> {
    let display = std::env::var_os("DISPLAY");
    let wayland = std::env::var_os("WAYLAND_DISPLAY");
    if !display_available(display.as_deref(), wayland.as_deref()) {
        debug!("no display available; not opening {}", path.display());
        return Ok(());
    }

    let mut cmd = viewer_command(path);
    debug!("opening {} with {:?}", path.display(), cmd);
    match cmd.status() {
        Ok(status) if status.success() => {}
        Ok(status) => warn!("image viewer exited with {}", status),
        Err(err) => warn!("could not launch image viewer: {}", err),
    }
    Ok(())
}

/// X11 or Wayland must be reachable on Linux and the BSDs; macOS and Windows always have a desktop.
pub fn display_available(display: Option<&OsStr>, wayland: Option<&OsStr>) -> bool {
    if cfg!(any(target_os = "macos", target_os = "windows")) {
        return true;
    }
    let set = |v: Option<&OsStr>| v.is_some_and(|s| !s.is_empty());
    set(display) || set(wayland)
}

fn viewer_command(path: &Path) -> Command {
    #[cfg(target_os = "macos")]
    {
        let mut cmd = Command::new("open");
        cmd.arg("-W").arg(path);
        cmd
    }
    #[cfg(target_os = "windows")]
    {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", "", "/WAIT"]).arg(path);
        cmd
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(path);
        cmd
    }
}

#[cfg(all(test, not(any(target_os = "macos", target_os = "windows"))))]
mod tests {
    use super::*;

    #[test]
    fn needs_x11_or_wayland() {
        assert!(!display_available(None, None));
        assert!(!display_available(Some(OsStr::new("")), None));
        assert!(display_available(Some(OsStr::new(":0")), None));
        assert!(display_available(None, Some(OsStr::new("wayland-0"))));
    }

    #[test]
    fn uses_xdg_open() {
        let cmd = viewer_command(Path::new("speedup.png"));
        assert_eq!(cmd.get_program(), "xdg-open");
        assert_eq!(
            cmd.get_args().collect::<Vec<_>>(),
            vec![OsStr::new("speedup.png")]
        );
    }
}
