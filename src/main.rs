mod args;
mod logging;
mod output;

use anyhow::Context;

use bingwall_core::settings::Settings;
use bingwall_core::{resolution, topology};
use bingwall_infra::http::UreqTransport;
use bingwall_infra::pipeline::{Pipeline, RunOptions};
use bingwall_infra::xfce::XfceSession;

fn main() {
    logging::init(output::debug_enabled());

    if let Err(err) = real_main() {
        output::print_error(&err);
        std::process::exit(1);
    }
}

fn real_main() -> anyhow::Result<()> {
    use clap::Parser as _;

    let cli = args::Cli::parse();
    let mut settings = bingwall_infra::config::from_env().context("load settings")?;
    tracing::debug!(
        origin = %settings.origin,
        cache_dir = %settings.cache_dir.display(),
        market = %settings.market,
        "settings loaded"
    );

    let cmd = match (cli.cmd, cli.set_wallpaper) {
        (Some(cmd), _) => cmd,
        (None, true) => args::Command::Apply {
            image: args::ImageArgs::default(),
            strategy: args::Strategy::Auto,
        },
        (None, false) => {
            return Err(anyhow::anyhow!(
                "no command given (try `bingwall apply` or `bingwall --help`)"
            ));
        }
    };

    let session = XfceSession::new(&settings);

    match cmd {
        args::Command::Apply { image, strategy } => {
            apply_image_args(&mut settings, &image);
            let transport = UreqTransport::default();
            let report = Pipeline::new(&settings, &session, &transport)
                .run(RunOptions {
                    day_offset: image.day,
                    strategy: strategy.into(),
                })
                .context("wallpaper run aborted")?;
            output::print_report(&report);
            Ok(())
        }
        args::Command::Fetch { image } => {
            apply_image_args(&mut settings, &image);
            let transport = UreqTransport::default();
            let (_, _, cached) = Pipeline::new(&settings, &session, &transport)
                .fetch(image.day)
                .context("fetch aborted")?;
            println!("{}", cached.local_path.display());
            Ok(())
        }
        args::Command::Monitors { strategy } => {
            let r = resolution::probe(&session, settings.fallback_resolution);
            let t = topology::resolve(&session, strategy.into());
            println!("resolution {r}");
            for m in &t.monitors {
                println!("{m}");
            }
            if t.degraded {
                eprintln!("warning: no monitors detected, using {}", t.monitors[0]);
            }
            Ok(())
        }
    }
}

fn apply_image_args(settings: &mut Settings, image: &args::ImageArgs) {
    if let Some(market) = &image.market {
        settings.market = market.clone();
    }
    if image.no_uhd {
        settings.uhd = false;
    }
}
