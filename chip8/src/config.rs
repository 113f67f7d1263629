use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Parser;
use serde::Deserialize;

/// Read from the working directory when `--config` isn't given
const DEFAULT_CONFIG_FILE: &str = "config.json";

#[derive(Parser, Debug)]
#[command(name = "chip8")]
#[command(about = "Runs a Chip-8 ROM in a window", long_about = None)]
pub struct Args {
    /// ROM to run; overrides FILE_PATH from the config file
    pub rom: Option<PathBuf>,

    /// JSON config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Instructions executed per second
    #[arg(long)]
    pub clock_hz: Option<u32>,

    /// Timer decrements per second
    #[arg(long)]
    pub timer_hz: Option<u32>,

    /// Window pixels per Chip-8 pixel
    #[arg(long)]
    pub scale: Option<u32>,

    /// Draw in the terminal instead of a window (no keyboard or sound)
    #[arg(long)]
    pub console: bool,

    #[arg(long)]
    pub mute: bool,

    /// Log the keyboard bindings at start-up
    #[arg(long)]
    pub show_keymapping: bool,

    /// Seed for the random number instruction
    #[arg(long)]
    pub seed: Option<u64>,
}

/// The config file; every key is optional
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct FileConfig {
    pub show_keymapping: bool,
    pub file_path: Option<PathBuf>,
    pub clock_speed_hz: u32,
    pub timer_hz: u32,
    pub scale: u32,
    pub console: bool,
    pub mute: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        FileConfig {
            show_keymapping: false,
            file_path: None,
            clock_speed_hz: 500,
            timer_hz: 60,
            scale: 10,
            console: false,
            mute: false,
        }
    }
}

impl FileConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}

/// Everything the run loop needs, after the CLI has overridden the file
#[derive(Debug, Clone)]
pub struct Settings {
    pub rom: PathBuf,
    pub show_keymapping: bool,
    pub clock_speed_hz: u32,
    pub scale: u32,
    pub console: bool,
    pub mute: bool,
    pub core: emu8_core::Config,
}

impl Settings {
    pub fn resolve(args: Args) -> anyhow::Result<Self> {
        let file = match &args.config {
            Some(path) => FileConfig::load(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                FileConfig::load(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => FileConfig::default(),
        };
        Self::merge(args, file)
    }

    fn merge(args: Args, file: FileConfig) -> anyhow::Result<Self> {
        let rom = match args.rom.or(file.file_path) {
            Some(rom) => rom,
            None => bail!("no ROM given; pass one or set FILE_PATH in the config file"),
        };

        let mut core = emu8_core::Config::default()
            .with_timer_hz(args.timer_hz.unwrap_or(file.timer_hz));
        if let Some(seed) = args.seed {
            core = core.with_seed(seed);
        }

        Ok(Settings {
            rom,
            show_keymapping: args.show_keymapping || file.show_keymapping,
            clock_speed_hz: args.clock_hz.unwrap_or(file.clock_speed_hz).max(1),
            scale: args.scale.unwrap_or(file.scale).max(1),
            console: args.console || file.console,
            mute: args.mute || file.mute,
            core,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn args(argv: &[&str]) -> Args {
        Args::parse_from(std::iter::once("chip8").chain(argv.iter().copied()))
    }

    #[test]
    fn test_file_config_keys() {
        let file: FileConfig =
            serde_json::from_str(r#"{ "SHOW_KEYMAPPING": true, "FILE_PATH": "roms/PONG2.ch8" }"#)
                .unwrap();
        assert!(file.show_keymapping);
        assert_eq!(file.file_path, Some(PathBuf::from("roms/PONG2.ch8")));
        assert_eq!(file.clock_speed_hz, 500);
    }

    #[test]
    fn test_empty_file_config_is_default() {
        let file: FileConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(file, FileConfig::default());
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = FileConfig {
            file_path: Some(PathBuf::from("a.ch8")),
            scale: 4,
            ..FileConfig::default()
        };
        let settings =
            Settings::merge(args(&["b.ch8", "--scale", "8", "--timer-hz", "100"]), file).unwrap();
        assert_eq!(settings.rom, PathBuf::from("b.ch8"));
        assert_eq!(settings.scale, 8);
        assert_eq!(settings.clock_speed_hz, 500);
        assert_eq!(settings.core.timer_interval, Duration::from_millis(10));
    }

    #[test]
    fn test_rom_from_file() {
        let file = FileConfig {
            file_path: Some(PathBuf::from("a.ch8")),
            ..FileConfig::default()
        };
        let settings = Settings::merge(args(&["--seed", "7"]), file).unwrap();
        assert_eq!(settings.rom, PathBuf::from("a.ch8"));
        assert_eq!(settings.core.seed, Some(7));
    }

    #[test]
    fn test_no_rom_is_an_error() {
        assert!(Settings::merge(args(&[]), FileConfig::default()).is_err());
    }
}
