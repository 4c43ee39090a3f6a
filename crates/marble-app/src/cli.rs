use std::path::PathBuf;

use clap::Parser;

/// Marble: a raymarched volumetric marble sphere.
#[derive(Parser, Debug)]
#[command(name = "marble", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level or filter directive (debug, info, marble_renderer=trace, ...).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Render offscreen and write a PNG to this path instead of opening a window.
    #[arg(long, value_name = "PATH")]
    pub headless: Option<PathBuf>,

    /// Frames to render before capturing in offscreen mode.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub frames: u32,
}

pub fn parse() -> Args {
    Args::parse()
}

/// Turn a `--log-level` value into an `EnvFilter` directive. A bare level
/// applies to all marble crates.
pub fn log_directive(value: &str) -> String {
    if value.contains('=') {
        value.to_string()
    } else {
        format!("marble={value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["marble"]).unwrap();
        assert!(args.config.is_none());
        assert!(args.headless.is_none());
        assert_eq!(args.frames, 1);
    }

    #[test]
    fn headless_with_frames() {
        let args =
            Args::try_parse_from(["marble", "--headless", "out.png", "--frames", "30"]).unwrap();
        assert_eq!(args.headless, Some(PathBuf::from("out.png")));
        assert_eq!(args.frames, 30);
    }

    #[test]
    fn zero_frames_rejected() {
        assert!(Args::try_parse_from(["marble", "--frames", "0"]).is_err());
    }

    #[test]
    fn bare_level_targets_marble() {
        assert_eq!(log_directive("debug"), "marble=debug");
        assert_eq!(log_directive("marble_renderer=trace"), "marble_renderer=trace");
    }
}
