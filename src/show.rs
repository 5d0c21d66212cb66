use crate::{PlotErr, Result};
use std::path::Path;
use std::process::Command;

/// Open `path` in the default image viewer and wait until the viewer returns.
pub fn show(path: &Path) -> Result<()> {
    let mut cmd = viewer_command(path);
    info!("opening {:?} with {:?}", path, cmd);
    let status = cmd
        .status()
        .map_err(|e| PlotErr::ViewerErr(format!("cannot launch viewer: {}", e)))?;
    if status.success() {
        Ok(())
    } else {
        Err(PlotErr::ViewerErr(format!("viewer exited with {}", status)))
    }
}

#[cfg(target_os = "macos")]
fn viewer_command(path: &Path) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg("-W").arg(path);
    cmd
}

#[cfg(target_os = "windows")]
fn viewer_command(path: &Path) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(&["/C", "start", "/WAIT", ""]).arg(path);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn viewer_command(path: &Path) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(path);
    cmd
}
