use std::path::PathBuf;

use clap::Parser;
use vm8_core::constants::{CLOCK_SPEED, MAX_SAVED_STATES, TIMER_FREQUENCY};
use vm8_core::MachineConfig;

/// Run a program image on the vm8 interpreter.
///
/// Keys 1234/QWER/ASDF/ZXCV are the hex keypad. Hold Space to run unthrottled and
/// Escape to rewind.
#[derive(Debug, Parser)]
#[command(version)]
pub struct Args {
    /// Program image to load at 0x200
    pub rom: PathBuf,

    /// Size of each display pixel in window pixels
    #[arg(short, long, default_value_t = 10)]
    pub scale: u32,

    /// Instructions executed per second
    #[arg(long, default_value_t = CLOCK_SPEED)]
    pub clock: u32,

    /// Timer decrements per second
    #[arg(long, default_value_t = TIMER_FREQUENCY)]
    pub timer_hz: u32,

    /// The tone plays while the sound timer is above this value
    #[arg(long, default_value_t = 2)]
    pub sound_threshold: u8,

    /// Number of past steps kept for rewinding
    #[arg(long, default_value_t = MAX_SAVED_STATES)]
    pub history: usize,

    /// Seed for the random number instruction
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log every executed instruction
    #[arg(short, long)]
    pub debug: bool,
}

impl Args {
    pub fn machine_config(&self) -> MachineConfig {
        MachineConfig {
            history: self.history,
            seed: self.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["vm8", "pong.ch8"]).unwrap();
        assert_eq!(args.rom, PathBuf::from("pong.ch8"));
        assert_eq!(args.scale, 10);
        assert_eq!(args.clock, CLOCK_SPEED);
        assert_eq!(args.timer_hz, 60);
        assert!(!args.debug);
        assert_eq!(args.machine_config().seed, None);
    }

    #[test]
    fn test_overrides() {
        let args =
            Args::try_parse_from(["vm8", "-s", "4", "--seed", "7", "--debug", "pong.ch8"]).unwrap();
        assert_eq!(args.scale, 4);
        assert_eq!(args.machine_config().seed, Some(7));
        assert!(args.debug);
    }
}
