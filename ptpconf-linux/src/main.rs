use std::path::{Path, PathBuf};

use clap::Parser;
use ptpconf_linux::{
    config::Config,
    generate::{generate, GeneratedProfile},
    setup_logger,
    update::ConfUpdate,
};
use tracing::level_filters::LevelFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Configuration file to use
    #[clap(
        long = "config",
        short = 'c',
        default_value = "/etc/ptpconf/ptpconf.toml"
    )]
    config_file: PathBuf,

    /// Set desired logging level, overriding the configuration file
    #[clap(short, long)]
    loglevel: Option<LevelFilter>,
}

async fn write_profile(
    output_dir: &Path,
    index: usize,
    generated: &GeneratedProfile,
) -> std::io::Result<()> {
    let ptp4l_path = output_dir.join(format!("ptp4l.{index}.config"));
    tokio::fs::write(&ptp4l_path, &generated.ptp4l.text).await?;
    log::info!("wrote {} ({})", ptp4l_path.display(), generated.clock_role);

    if let Some(ts2phc) = &generated.ts2phc {
        let path = output_dir.join(format!("ts2phc.{index}.config"));
        tokio::fs::write(&path, &ts2phc.text).await?;
        log::info!("wrote {}", path.display());
    }

    if let Some(synce4l) = &generated.synce4l {
        let path = output_dir.join(format!("synce4l.{index}.config"));
        tokio::fs::write(&path, &synce4l.text).await?;
        log::info!(
            "wrote {} with {} synce devices",
            path.display(),
            synce4l.relations.len()
        );
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match Config::from_file(&args.config_file).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Could not load config file {}: {e}",
                args.config_file.display()
            );
            std::process::exit(1);
        }
    };

    let loglevel = match args.loglevel {
        Some(level) => level,
        None => config.loglevel.parse().unwrap_or_else(|_| {
            eprintln!("Unknown log level {:?}, using info", config.loglevel);
            LevelFilter::INFO
        }),
    };

    setup_logger(loglevel).expect("Could not setup logging");

    if !config.check() {
        log::error!("Invalid configuration, exiting");
        std::process::exit(1);
    }

    let (mut update, mut receiver) =
        match ConfUpdate::from_file(&config.default_ptp4l_config).await {
            Ok(update) => update,
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        };

    let profiles_json = match tokio::fs::read(&config.profiles).await {
        Ok(json) => json,
        Err(e) => {
            log::error!("failed to read {}: {e}", config.profiles.display());
            std::process::exit(1);
        }
    };

    if let Err(e) = update.update_config(&profiles_json).await {
        log::error!("{e}");
        std::process::exit(1);
    }

    // every update sent so far is buffered, nothing new arrives after this
    while let Ok(profiles) = receiver.try_recv() {
        for (index, profile) in profiles.iter().enumerate() {
            let generated = match generate(profile, update.default_ptp4l_config()) {
                Ok(generated) => generated,
                Err(e) => {
                    log::error!("not applying profile {}: {e}", profile.name());
                    continue;
                }
            };

            if let Err(e) = write_profile(&config.output_dir, index, &generated).await {
                log::error!("could not write configuration of {}: {e}", generated.name);
            }
        }
    }
}
