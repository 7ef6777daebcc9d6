use clap::{Parser, Subcommand};
use std::fs::File;
use std::path::PathBuf;
use track_profile::{
    config::read_config_json,
    io::{read_profile_file, write_profile_file},
    ModelOptions, ProfileCatalog, ProfileConfig, Result, SlopeModel,
};

fn init_logging() {
    if let Ok(path) = std::env::var("TRACK_PROFILE_LOG") {
        match File::create(&path) {
            Ok(file) => {
                env_logger::Builder::from_default_env()
                    .target(env_logger::Target::Pipe(Box::new(file)))
                    .init();
            }
            Err(e) => {
                eprintln!("Failed to create log file {}: {}", path, e);
                env_logger::Builder::from_default_env().init();
            }
        }
    } else {
        env_logger::Builder::from_default_env().init();
    }
}

/// Query railway track grade profiles from the command line.
#[derive(Parser)]
#[command(name = "track_profile_cli", version)]
struct Cli {
    /// Directory holding the catalogue profiles
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// JSON configuration supplying defaults for the model options
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Traverse the track in the opposite direction
    #[arg(long, global = true)]
    reverse: bool,
    /// Elevation sampling step
    #[arg(long, global = true)]
    dx: Option<f64>,
    /// Do not wrap distances around the track length
    #[arg(long, global = true)]
    no_cyclic: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the catalogue profile names.
    List,
    /// Summarise a profile.
    Info { source: String },
    /// Print the grade (per-mille) at a distance.
    Slope {
        source: String,
        #[arg(allow_negative_numbers = true)]
        distance: f64,
        /// Ignore vertical curves between segments
        #[arg(long)]
        raw: bool,
    },
    /// Print the elevation at a distance.
    Elevation {
        source: String,
        #[arg(allow_negative_numbers = true)]
        distance: f64,
    },
    /// Print distance,grade,elevation rows along the whole track.
    Sample {
        source: String,
        #[arg(long, default_value_t = 100.0, allow_negative_numbers = true)]
        step: f64,
    },
    /// List the signals of a profile.
    Signals { source: String },
    /// List the stations of a profile.
    Stations { source: String },
    /// Write the profile, reversed if requested, in the track file format.
    Export { source: String, output: PathBuf },
}

impl Cli {
    fn profile_config(&self, source: &str) -> Result<ProfileConfig> {
        let mut config = match &self.config {
            Some(path) => read_config_json(path)?,
            None => ProfileConfig::new(source),
        };
        config.source = source.to_string();
        if let Some(dir) = &self.data_dir {
            config.data_dir = Some(dir.clone());
        }
        if self.reverse {
            config.options.reverse = true;
        }
        if let Some(dx) = self.dx {
            config.options.sample_step = dx;
        }
        if self.no_cyclic {
            config.options.cyclic = false;
        }
        Ok(config)
    }

    fn catalog(&self) -> Result<ProfileCatalog> {
        let config = self.profile_config("")?;
        Ok(ProfileCatalog::standard(config.data_dir()))
    }

    fn load(&self, source: &str) -> Result<SlopeModel> {
        let config = self.profile_config(source)?;
        log::debug!("model options: {:?}", config.options);
        SlopeModel::load(&config)
    }
}

fn print_not_loaded(source: &str) {
    println!("No profile loaded for {}", source);
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::List => {
            let catalog = cli.catalog()?;
            for name in catalog.available() {
                let path = catalog.resolve(name);
                let status = if path.exists() { "" } else { " (missing)" };
                println!("{}\t{}{}", name, path.display(), status);
            }
        }
        Commands::Info { source } => {
            let model = cli.load(source)?;
            if !model.is_loaded() {
                print_not_loaded(source);
                return Ok(());
            }
            let (low, high) = model
                .elevation_table()
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| {
                    (lo.min(s.height), hi.max(s.height))
                });
            println!("{}", model);
            println!("Length: {}", model.total_length());
            println!("Segments: {}", model.segments().len());
            println!("Signals: {}", model.signals().map_or(0, |s| s.len()));
            println!("Stations: {}", model.stations().map_or(0, |s| s.len()));
            println!(
                "Four-digit blocking: {}",
                if model.four_digit_blocking() { "yes" } else { "no" }
            );
            println!("Elevation range: {:.3} .. {:.3}", low, high);
        }
        Commands::Slope {
            source,
            distance,
            raw,
        } => {
            let model = cli.load(source)?;
            let grade = model.get_slope(*distance, !raw);
            println!("Slope at {:.3}: {:.3}", distance, grade);
        }
        Commands::Elevation { source, distance } => {
            let model = cli.load(source)?;
            println!(
                "Elevation at {:.3}: {:.3}",
                distance,
                model.get_elevation(*distance)
            );
        }
        Commands::Sample { source, step } => {
            let model = cli.load(source)?;
            let step = *step;
            ModelOptions {
                sample_step: step,
                ..*model.options()
            }
            .validate_for_length(model.total_length())?;
            if !model.is_loaded() {
                print_not_loaded(source);
                return Ok(());
            }
            let total = model.total_length() as f64;
            let mut k = 0u64;
            loop {
                let x = (k as f64 * step).min(total);
                println!(
                    "{:.3},{:.3},{:.3}",
                    x,
                    model.get_slope(x, true),
                    model.get_elevation(x)
                );
                if x >= total {
                    break;
                }
                k += 1;
            }
        }
        Commands::Signals { source } => match cli.load(source)?.signals() {
            Some(signals) => {
                for signal in signals {
                    println!("{},{}", signal.coord, signal.name);
                }
            }
            None => print_not_loaded(source),
        },
        Commands::Stations { source } => match cli.load(source)?.stations() {
            Some(stations) => {
                for station in stations {
                    println!("{},{},{}", station.coord, station.length, station.name);
                }
            }
            None => print_not_loaded(source),
        },
        Commands::Export { source, output } => {
            let config = cli.profile_config(source)?;
            let path = ProfileCatalog::standard(config.data_dir()).resolve(source);
            match read_profile_file(&path)? {
                Some(profile) => {
                    let profile = if config.options.reverse {
                        profile.reversed()
                    } else {
                        profile
                    };
                    write_profile_file(output, &profile)?;
                    println!(
                        "Exported {} segments to {}",
                        profile.segments.len(),
                        output.display()
                    );
                }
                None => print_not_loaded(source),
            }
        }
    }
    Ok(())
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
