//! CLI argument definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};

use bingwall_core::topology::TopologyStrategy;

#[derive(Debug, Parser)]
#[command(name = "bingwall")]
#[command(about = "Set the Bing image of the day as XFCE wallpaper", long_about = None)]
pub struct Cli {
    /// Same as `apply` with defaults (kept for existing cron lines).
    #[arg(long = "set-wallpaper", hide = true)]
    pub set_wallpaper: bool,

    #[command(subcommand)]
    pub cmd: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Download the image of the day and set it on every monitor.
    #[command(visible_alias = "set-wallpaper")]
    Apply {
        #[command(flatten)]
        image: ImageArgs,

        #[arg(long, value_enum, default_value_t = Strategy::Auto)]
        strategy: Strategy,
    },

    /// Download the image of the day and print its cached path.
    Fetch {
        #[command(flatten)]
        image: ImageArgs,
    },

    /// Print the detected resolution and monitor handles.
    Monitors {
        #[arg(long, value_enum, default_value_t = Strategy::Auto)]
        strategy: Strategy,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct ImageArgs {
    /// Days back from today (0 = today).
    #[arg(long, short = 'd', default_value_t = 0)]
    pub day: u32,

    /// Archive market, e.g. en-US or de-DE.
    #[arg(long, short = 'm')]
    pub market: Option<String>,

    /// Do not ask for a UHD variant matching the display.
    #[arg(long)]
    pub no_uhd: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Cross-reference connected outputs, fall back to stored monitors.
    Auto,
    /// Only monitors already present in the desktop configuration.
    Direct,
    /// One entry per connected output.
    Cross,
}

impl From<Strategy> for TopologyStrategy {
    fn from(s: Strategy) -> Self {
        match s {
            Strategy::Auto => Self::Auto,
            Strategy::Direct => Self::Direct,
            Strategy::Cross => Self::CrossReferenced,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_with_flags() {
        let cli = Cli::try_parse_from([
            "bingwall", "apply", "--day", "2", "-m", "fr-FR", "--no-uhd", "--strategy", "cross",
        ])
        .unwrap();
        match cli.cmd {
            Some(Command::Apply { image, strategy }) => {
                assert_eq!(image.day, 2);
                assert_eq!(image.market.as_deref(), Some("fr-FR"));
                assert!(image.no_uhd);
                assert_eq!(strategy, Strategy::Cross);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn legacy_spellings() {
        let cli = Cli::try_parse_from(["bingwall", "--set-wallpaper"]).unwrap();
        assert!(cli.set_wallpaper);
        assert!(cli.cmd.is_none());

        let cli = Cli::try_parse_from(["bingwall", "set-wallpaper"]).unwrap();
        assert!(matches!(cli.cmd, Some(Command::Apply { .. })));
    }

    #[test]
    fn strategy_maps_to_topology() {
        assert_eq!(
            TopologyStrategy::from(Strategy::Cross),
            TopologyStrategy::CrossReferenced
        );
    }
}
