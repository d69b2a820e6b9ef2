use std::fs;
use std::path::{Path, PathBuf};

use ampbench_core::{BenchConfig, BenchMode, CanonicalRecord, RawTable, Summarizable};
use ampbench_eval::{
    pairwise_discrimination, save_summary, AlignKey, BenchmarkRunner, ConfusionMatrix, GridMode, GridSearch,
};
use ampbench_io::{fasta_to_csv, read_table, table_from_json_rows, write_canonical, write_rows, TrainingSet};
use ampbench_normalize::{
    attach_inputs_per_chunk, normalize_chunks, CanonicalNormalizer, NormalizeOptions, Normalizer, Provider,
};
use ampbench_seq::{chunk_records, fasta_payload, read_fasta};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

type CliResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "ampbench")]
#[command(about = "Normalize antimicrobial-peptide classifier output and benchmark it", long_about = None)]
struct Cli {
    /// JSON configuration file (absent fields keep their defaults)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum AlignArg {
    Position,
    Sequence,
    Id,
}

impl From<AlignArg> for AlignKey {
    fn from(a: AlignArg) -> Self {
        match a {
            AlignArg::Position => AlignKey::Position,
            AlignArg::Sequence => AlignKey::Sequence,
            AlignArg::Id => AlignKey::Id,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a provider's raw output table into the canonical schema
    Normalize {
        /// Provider tag (e.g. ampscanner_v2, campr3_rf, dbaasp, hemopi)
        #[arg(short, long)]
        provider: Provider,
        /// Raw tables (.csv, .tsv or row-array .json); several files are chunks in submission order
        #[arg(required = true)]
        input: Vec<PathBuf>,
        /// Output file (.csv or .tsv)
        #[arg(short, long)]
        output: PathBuf,
        /// Strain the predictions were requested for
        #[arg(long)]
        strain: Option<String>,
        /// Submitted FASTA, split across the input tables in order and joined
        /// positionally to tables without id/sequence columns
        #[arg(long, value_name = "FASTA")]
        inputs: Option<PathBuf>,
        /// Do not flag sequences outside the configured length window
        #[arg(long, action = ArgAction::SetTrue)]
        no_length_window: bool,
    },
    /// Benchmark every model of a mode against every dataset
    Benchmark {
        /// Directory of ground-truth CSV files
        #[arg(long)]
        datasets: PathBuf,
        /// Directory with one sub-directory of canonical predictions per model
        #[arg(long)]
        predictions: PathBuf,
        #[arg(long, default_value = "amp")]
        mode: BenchMode,
        #[arg(long, value_enum, default_value = "position")]
        align: AlignArg,
        /// Skip writing the summary CSV into the predictions directory
        #[arg(long, action = ArgAction::SetTrue)]
        no_save: bool,
    },
    /// Count correctly separated (active, inactive) pairs in a canonical table
    Pairwise {
        input: PathBuf,
    },
    /// Confusion matrix from predictions on a positive set and a negative set
    SplitConfusion {
        #[arg(long)]
        positives: PathBuf,
        #[arg(long)]
        negatives: PathBuf,
    },
    /// Search ensemble weights over the three candidate-selection models
    GridSearch {
        /// Training table with `<model>_score` columns and a `class` column
        training: PathBuf,
        #[arg(long, default_value = "unit_sum")]
        mode: GridMode,
        /// Grid resolution (defaults to the configured value)
        #[arg(long)]
        by: Option<f64>,
        /// Candidates counted by the objective (defaults to the configured value)
        #[arg(long)]
        top_k: Option<usize>,
        /// Write all evaluated weight triples here
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Number of best triples to print
        #[arg(long, default_value_t = 10)]
        show: usize,
    },
    /// Label FASTA files as ground-truth CSVs (active when the name contains "high")
    FastaToCsv {
        #[arg(required = true)]
        input: Vec<PathBuf>,
    },
    /// Split a FASTA file into request-sized chunks
    Chunk {
        input: PathBuf,
        #[arg(short, long)]
        output_dir: PathBuf,
        /// Sequences per chunk (defaults to the configured DBAASP chunk size)
        #[arg(long)]
        size: Option<usize>,
    },
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn load_raw(path: &Path) -> CliResult<RawTable> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .map_or(false, |e| e.eq_ignore_ascii_case("json"));
    if is_json {
        Ok(table_from_json_rows(&fs::read_to_string(path)?)?)
    } else {
        Ok(read_table(path)?)
    }
}

fn load_canonical(path: &Path) -> CliResult<Vec<CanonicalRecord>> {
    Ok(CanonicalNormalizer.normalize(read_table(path)?)?)
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => BenchConfig::from_json_file(path)?,
        None => BenchConfig::default(),
    };

    match cli.command {
        Commands::Normalize {
            provider,
            input,
            output,
            strain,
            inputs,
            no_length_window,
        } => {
            let mut opts = NormalizeOptions::from_config(&config);
            if let Some(strain) = strain {
                opts = opts.with_strain(strain);
            }
            if no_length_window {
                opts = opts.without_length_window();
            }
            let submitted = inputs.as_deref().map(read_fasta).transpose()?;
            let tables = input.iter().map(|p| load_raw(p)).collect::<CliResult<Vec<_>>>()?;
            let tables = match &submitted {
                Some(records) => attach_inputs_per_chunk(tables, records)?,
                None => tables,
            };
            let records = normalize_chunks(provider, tables, &opts)?;
            write_canonical(&output, &records)?;
            tracing::info!(provider = %provider, rows = records.len(), path = %output.display(), "normalized");
        }
        Commands::Benchmark {
            datasets,
            predictions,
            mode,
            align,
            no_save,
        } => {
            let rows = BenchmarkRunner::new(&config, mode)
                .with_align_key(align.into())
                .run(&datasets, &predictions)?;
            println!("model\tdataset\ttpr\ttnr\tfpr\tfnr\tf1_score\taccuracy");
            for r in &rows {
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                    r.model, r.dataset, r.tpr, r.tnr, r.fpr, r.fnr, r.f1_score, r.accuracy
                );
            }
            if !no_save {
                save_summary(&rows, &predictions, chrono::Local::now().naive_local())?;
            }
        }
        Commands::Pairwise { input } => {
            let result = pairwise_discrimination(&load_canonical(&input)?);
            println!(
                "{} of {} pairs distinguished ({:.4})",
                result.distinguished,
                result.total,
                result.fraction()
            );
        }
        Commands::SplitConfusion { positives, negatives } => {
            let classes = |records: Vec<CanonicalRecord>| -> Vec<_> {
                records.iter().map(|r| r.prediction.map(|p| p.class)).collect()
            };
            let cm = ConfusionMatrix::from_split(
                &classes(load_canonical(&positives)?),
                &classes(load_canonical(&negatives)?),
            );
            println!("{}", cm.summary());
            println!("{}", cm.metrics().summary());
        }
        Commands::GridSearch {
            training,
            mode,
            by,
            top_k,
            output,
            show,
        } => {
            let training = TrainingSet::read(&training, config.candidate_models()?)?;
            let mut search = GridSearch::from_config(&config).with_mode(mode);
            if let Some(by) = by {
                search.by = by;
            }
            if let Some(k) = top_k {
                search.top_k = k;
            }
            let points = search.run(&training)?;
            println!("{}\t{}\t{}\tmetric", training.models[0], training.models[1], training.models[2]);
            for p in points.iter().take(show) {
                println!("{:.4}\t{:.4}\t{:.4}\t{:.4}", p.w1, p.w2, p.w3, p.metric);
            }
            if let Some(path) = output {
                write_rows(&path, &points)?;
            }
        }
        Commands::FastaToCsv { input } => {
            for path in &input {
                let out = fasta_to_csv(path)?;
                println!("{}", out.display());
            }
        }
        Commands::Chunk { input, output_dir, size } => {
            let records = read_fasta(&input)?;
            let size = size.unwrap_or(config.dbaasp_chunk_size);
            fs::create_dir_all(&output_dir)?;
            let stem = input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "chunk".into());
            let chunks = chunk_records(&records, size)?;
            for (i, chunk) in chunks.iter().enumerate() {
                let path = output_dir.join(format!("{stem}_{i:03}.fasta"));
                fs::write(&path, fasta_payload(chunk))?;
            }
            tracing::info!(sequences = records.len(), chunks = chunks.len(), size, "wrote chunks");
        }
    }
    Ok(())
}
