//! [`Args`] definitions.

use clap::Parser;

/// Server of the hotel booking system.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// Loads demo hotels, room types and cancellation policies on start.
    #[arg(long)]
    pub seed: bool,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

#[cfg(test)]
mod spec {
    use clap::Parser as _;

    use super::Args;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["hotel-booking"]).unwrap();

        assert_eq!(args.config, "config.toml");
        assert!(!args.seed);
    }

    #[test]
    fn parses_flags() {
        let args = Args::try_parse_from([
            "hotel-booking",
            "--config",
            "dev.toml",
            "--seed",
        ])
        .unwrap();

        assert_eq!(args.config, "dev.toml");
        assert!(args.seed);
    }
}
