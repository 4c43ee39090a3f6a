//! Where the rendering surface goes.

use std::path::{Path, PathBuf};

use tracing::warn;

const PNG_SCHEME: &str = "png:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountTarget {
    /// A native 200x200 window.
    Window,
    /// Offscreen rendering captured to a PNG file.
    Png(PathBuf),
}

impl MountTarget {
    /// Resolve a `[window].mount` value. Anything unusable falls back to
    /// the window with a warning.
    pub fn resolve(mount: &str) -> Self {
        match Self::parse(mount) {
            Ok(target) => target,
            Err(reason) => {
                warn!(mount, "mount target unavailable ({reason}), using a window");
                MountTarget::Window
            }
        }
    }

    fn parse(mount: &str) -> Result<Self, String> {
        let mount = mount.trim();
        if mount.is_empty() || mount == "window" {
            return Ok(MountTarget::Window);
        }
        let Some(path) = mount.strip_prefix(PNG_SCHEME) else {
            return Err(format!("unknown mount `{mount}`"));
        };
        let path = path.trim();
        if path.is_empty() {
            return Err("empty png path".into());
        }
        let path = PathBuf::from(path);
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
                Err(format!("directory {} does not exist", parent.display()))
            }
            _ => Ok(MountTarget::Png(path)),
        }
    }

    pub fn png_path(&self) -> Option<&Path> {
        match self {
            MountTarget::Png(path) => Some(path),
            MountTarget::Window => None,
        }
    }
}
