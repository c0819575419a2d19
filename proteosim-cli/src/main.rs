//! Simulate the steps of a bottom-up proteomics experiment from the command line
use std::{path::PathBuf, process::ExitCode};

use clap::{Args, Parser, Subcommand};
use indexmap::IndexMap;
use itertools::Itertools;
use proteosim::{
    chromatography::AdditiveRetentionModel, parse_json::ParseJson, prelude::*,
    sequence::coverage_collection,
};

/// The command line interface arguments
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// A JSON file with the simulation settings, any flag given on the command line overrules the value from this file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Show more log messages, can be given multiple times (`-v` info, `-vv` debug, `-vvv` trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Digest all proteins from a FASTA file and list the peptides per protein
    Digest(DigestArgs),
    /// Digest all proteins from a FASTA file and give the sequence coverage per protein
    Coverage(DigestArgs),
    /// Digest all proteins from a FASTA file and give the mass and mass-to-charge ratio per peptide
    Mass {
        #[command(flatten)]
        digest: DigestArgs,
        /// The charge state
        #[arg(short = 'z', long)]
        charge: Option<isize>,
    },
    /// List all b and y ions of a peptide with their mass-to-charge ratio
    Fragment {
        /// The peptide to fragment
        peptide: String,
        /// The charge state of the fragments
        #[arg(short = 'z', long)]
        charge: Option<isize>,
    },
    /// Digest all proteins and list the peptides that elute in the given retention time window
    Window {
        #[command(flatten)]
        digest: DigestArgs,
        /// A JSON file with an additive retention model, defaults to the Guo pH 7.0 coefficients
        #[arg(short, long)]
        model: Option<PathBuf>,
        /// The start of the window (minutes)
        #[arg(long, requires = "upper")]
        lower: Option<f64>,
        /// The end of the window (minutes)
        #[arg(long, requires = "lower")]
        upper: Option<f64>,
    },
    /// Digest all proteins and bin the predicted retention times of the peptides
    Histogram {
        #[command(flatten)]
        digest: DigestArgs,
        /// A JSON file with an additive retention model, defaults to the Guo pH 7.0 coefficients
        #[arg(short, long)]
        model: Option<PathBuf>,
        /// The number of bins
        #[arg(short, long)]
        resolution: Option<usize>,
    },
    /// Digest all proteins and simulate the MS1 spectrum of all peptides
    Spectrum {
        #[command(flatten)]
        digest: DigestArgs,
        /// The charge state
        #[arg(short = 'z', long)]
        charge: Option<isize>,
        /// Use the number of peptides per mass-to-charge ratio as intensity instead of a random intensity
        #[arg(long)]
        counts: bool,
    },
}

#[derive(Debug, Args)]
struct DigestArgs {
    /// The FASTA file with the proteins
    fasta: PathBuf,
    /// The enzyme (LysC, LysN, ArgC, or Trypsin)
    #[arg(short, long)]
    enzyme: Option<Enzyme>,
    /// The minimal peptide length
    #[arg(long)]
    min_length: Option<usize>,
    /// The maximal peptide length
    #[arg(long)]
    max_length: Option<usize>,
    /// The maximal number of missed cleavages
    #[arg(long)]
    missed_cleavages: Option<usize>,
}

impl DigestArgs {
    /// Overrule the settings from the configuration file with the flags given on the command line
    fn apply(&self, config: &mut SimulationConfig) {
        if let Some(enzyme) = self.enzyme {
            config.enzyme = enzyme;
        }
        if let Some(min_length) = self.min_length {
            config.digest.min_length = min_length;
        }
        if let Some(max_length) = self.max_length {
            config.digest.max_length = Some(max_length);
        }
        if let Some(missed_cleavages) = self.missed_cleavages {
            config.digest.missed_cleavages = missed_cleavages;
        }
    }

    /// Read the FASTA file and digest all proteins
    fn digest(
        &self,
        config: &SimulationConfig,
    ) -> Result<(IndexMap<String, String>, IndexMap<String, Vec<String>>), Error> {
        let proteins = read_fasta(&self.fasta)?;
        log::info!(
            "digesting {} proteins with {}",
            proteins.len(),
            config.enzyme
        );
        let peptides = digest_collection(&proteins, config.enzyme.rule(), config.digest);
        Ok((proteins, peptides))
    }
}

fn main() -> ExitCode {
    let args = Cli::parse();
    env_logger::Builder::new()
        .filter_level(match args.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        })
        .parse_default_env()
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Cli) -> Result<(), Error> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::from_json_file(path)?,
        None => SimulationConfig::default(),
    };

    match args.command {
        Command::Digest(digest) => {
            digest.apply(&mut config);
            config.validate()?;
            let (_, peptides) = digest.digest(&config)?;
            for (protein, peptides) in &peptides {
                for peptide in peptides {
                    println!("{protein}\t{peptide}");
                }
            }
        }
        Command::Coverage(digest) => {
            digest.apply(&mut config);
            config.validate()?;
            let (proteins, peptides) = digest.digest(&config)?;
            for (protein, coverage) in coverage_collection(&proteins, &peptides) {
                println!("{protein}\t{coverage:.2}");
            }
        }
        Command::Mass { digest, charge } => {
            digest.apply(&mut config);
            if let Some(charge) = charge {
                config.mz.charge = charge;
            }
            config.validate()?;
            let (_, peptides) = digest.digest(&config)?;
            let all = peptides.values().flatten().collect_vec();
            let masses = molecular_mass_collection(&all, config.residue_masses())?;
            let mz = mass_to_charge_collection(&masses, config.mz)?;
            for ((peptide, mass), mz) in masses.iter().zip(mz.values()) {
                println!("{peptide}\t{mass:.4}\t{mz:.4}");
            }
        }
        Command::Fragment { peptide, charge } => {
            if let Some(charge) = charge {
                config.mz.charge = charge;
            }
            config.validate()?;
            for ion in fragment_ions(&peptide) {
                let mz = ion.mz(config.residue_masses(), config.mz)?;
                println!("{}{}\t{}\t{mz:.4}", ion.series, ion.ordinal, ion.sequence);
            }
        }
        Command::Window {
            digest,
            model,
            lower,
            upper,
        } => {
            digest.apply(&mut config);
            if let (Some(lower), Some(upper)) = (lower, upper) {
                config.retention_window = Some((lower, upper));
            }
            config.validate()?;
            let model = model
                .map(AdditiveRetentionModel::from_json_file)
                .transpose()?;
            let (_, peptides) = digest.digest(&config)?;
            let all = peptides.values().flatten().collect_vec();
            let model = model
                .as_ref()
                .unwrap_or(AdditiveRetentionModel::guo_ph7());
            let times = predict_retention_times(&all, model)?;
            let (lower, upper) = config
                .retention_window
                .unwrap_or((f64::NEG_INFINITY, f64::INFINITY));
            for peptide in select_retention_window(&times, lower, upper)? {
                println!("{peptide}\t{:.2}", times[&peptide]);
            }
        }
        Command::Histogram {
            digest,
            model,
            resolution,
        } => {
            digest.apply(&mut config);
            if let Some(resolution) = resolution {
                config.histogram_resolution = resolution;
            }
            config.validate()?;
            let model = model
                .map(AdditiveRetentionModel::from_json_file)
                .transpose()?;
            let (_, peptides) = digest.digest(&config)?;
            let all = peptides.values().flatten().collect_vec();
            let model = model
                .as_ref()
                .unwrap_or(AdditiveRetentionModel::guo_ph7());
            let times = predict_retention_times(&all, model)?;
            let times = times.values().copied().collect_vec();
            for bin in retention_time_histogram(&times, config.histogram_resolution)? {
                println!("{:.2}\t{:.2}\t{}", bin.start, bin.end, bin.count);
            }
        }
        Command::Spectrum {
            digest,
            charge,
            counts,
        } => {
            digest.apply(&mut config);
            if let Some(charge) = charge {
                config.mz.charge = charge;
            }
            if counts {
                config.intensities = IntensityMode::Counts;
            }
            config.validate()?;
            let (_, peptides) = digest.digest(&config)?;
            let all = peptides.values().flatten().collect_vec();
            let masses = molecular_mass_collection(&all, config.residue_masses())?;
            let mz = mass_to_charge_collection(&masses, config.mz)?;
            let mz = mz.values().copied().collect_vec();
            for peak in simulate_spectrum(&mz, config.intensities) {
                println!("{:.4}\t{}", peak.mz, peak.intensity);
            }
        }
    }
    Ok(())
}
