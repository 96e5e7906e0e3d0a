use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use sflizer::analysis::{analyze_pos, kwic, lemma_forms, process_report};
use sflizer::config::{self, Settings};
use sflizer::export::{self, Concordance, Tabular, WordForms};
use sflizer::nlp::{NlpPipeline, Pos};
use sflizer::resources::{self, DownloadStatus};
use sflizer::{chart, load_document, LoadedDocument};

#[derive(Parser)]
#[command(name = "sflizer", version, about = "POS frequency, KWIC and SFL process analysis of a PDF")]
struct Cli {
    /// Config file (default: <config dir>/sflizer/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Tokenizer model file (en_tokenizer.bin)
    #[arg(long, global = true)]
    model: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show document size after extraction and tagging
    Info { file: PathBuf },
    /// Lemma frequency table for one part of speech
    Freq {
        file: PathBuf,
        #[command(flatten)]
        filter: FilterArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Surface forms of the given lemmas (default: three most frequent)
    Forms {
        file: PathBuf,
        #[arg(long = "lemma")]
        lemmas: Vec<String>,
        #[command(flatten)]
        filter: FilterArgs,
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Keyword-in-context concordance for one lemma
    Kwic {
        file: PathBuf,
        #[arg(long)]
        lemma: String,
        #[arg(long)]
        pos: Option<Pos>,
        /// Tokens of context on each side
        #[arg(long)]
        window: Option<usize>,
        #[arg(long)]
        max_rows: Option<usize>,
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Verb frequencies with SFL process classification
    Sfl {
        file: PathBuf,
        #[arg(long)]
        top_n: Option<usize>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Download the tokenizer model
    FetchModel,
}

#[derive(Args)]
struct FilterArgs {
    #[arg(long)]
    pos: Option<Pos>,
    #[arg(long)]
    top_n: Option<usize>,
    #[arg(long)]
    min_len: Option<usize>,
    /// Count stop words too
    #[arg(long)]
    keep_stopwords: bool,
}

#[derive(Args)]
struct OutputArgs {
    /// Write the full table (.csv, .json or .txt)
    #[arg(long)]
    export: Option<PathBuf>,
    /// Write a PNG bar chart
    #[arg(long)]
    chart: Option<PathBuf>,
}

impl FilterArgs {
    fn apply(&self, settings: &mut Settings) {
        if let Some(pos) = self.pos {
            settings.pos = pos;
        }
        if let Some(top_n) = self.top_n {
            settings.top_n = top_n;
        }
        if let Some(min_len) = self.min_len {
            settings.min_len = min_len;
        }
        if self.keep_stopwords {
            settings.remove_stopwords = false;
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("sflizer=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let mut settings = config::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(model) = &cli.model {
        settings.model_path = Some(model.clone());
    }

    match cli.command {
        Commands::FetchModel => fetch_model(),
        Commands::Info { file } => {
            let doc = open(&file, &settings)?;
            let summary = doc.summary();
            println!(
                "{}: {} chars, {} words, {} pages/chapters, {} tokens",
                summary.name, summary.char_count, summary.word_count, summary.unit_count, summary.token_count
            );
            Ok(())
        }
        Commands::Freq { file, filter, output } => {
            filter.apply(&mut settings);
            settings.validate()?;
            let doc = open(&file, &settings)?;

            let table = analyze_pos(&doc.tokens, settings.pos, settings.frequency_options());
            println!("{} analysis", settings.pos.label());
            println!("{}", export::render_table(&table.top(settings.top_n)));

            write_export(&table, output.export.as_deref())?;
            if let Some(path) = &output.chart {
                let bars: Vec<_> = table
                    .top(settings.top_n)
                    .rows
                    .into_iter()
                    .map(|r| (r.lemma, r.frequency))
                    .collect();
                let title = format!("Top {} {} lemmas", bars.len(), settings.pos.label());
                chart::render_bar_chart(path, &title, settings.pos.label(), "Frequency", &bars)?;
                info!("Chart written to {:?}", path);
            }
            Ok(())
        }
        Commands::Forms { file, lemmas, filter, export: export_path } => {
            filter.apply(&mut settings);
            settings.validate()?;
            let doc = open(&file, &settings)?;

            let lemmas = if lemmas.is_empty() {
                analyze_pos(&doc.tokens, settings.pos, settings.frequency_options())
                    .top(3)
                    .lemmas()
            } else {
                lemmas
            };
            let rows = lemma_forms(&doc.tokens, &lemmas, settings.pos);
            println!("{}", export::render_table(&WordForms(&rows)));
            write_export(&WordForms(&rows), export_path.as_deref())
        }
        Commands::Kwic { file, lemma, pos, window, max_rows, export: export_path } => {
            if let Some(pos) = pos {
                settings.pos = pos;
            }
            if let Some(window) = window {
                settings.kwic_window = window;
            }
            if let Some(max_rows) = max_rows {
                settings.max_rows = max_rows;
            }
            settings.validate()?;
            let doc = open(&file, &settings)?;

            let rows = kwic(&doc.tokens, &lemma, settings.pos, settings.kwic_options());
            println!("{}", export::render_table(&Concordance(&rows)));
            write_export(&Concordance(&rows), export_path.as_deref())
        }
        Commands::Sfl { file, top_n, output } => {
            if let Some(top_n) = top_n {
                settings.top_n = top_n;
            }
            settings.validate()?;
            let doc = open(&file, &settings)?;

            let report = process_report(&doc.tokens, &settings.process_table());
            println!("Verb frequency & SFL classification");
            println!("{}", export::render_table(&report.top(settings.top_n)));

            let distribution = report.distribution();
            println!();
            println!("Distribution of SFL processes");
            for (process, count) in &distribution {
                println!("{:>12}  {}", process.name(), count);
            }

            write_export(&report, output.export.as_deref())?;
            if let Some(path) = &output.chart {
                let bars: Vec<_> = distribution.into_iter().map(|(p, c)| (p.to_string(), c)).collect();
                chart::render_bar_chart(path, "Distribution of SFL Processes", "SFL Process", "Count", &bars)?;
                info!("Chart written to {:?}", path);
            }
            Ok(())
        }
    }
}

fn open(file: &Path, settings: &Settings) -> Result<LoadedDocument> {
    let pipeline = match &settings.model_path {
        Some(path) => NlpPipeline::load(path)?,
        None => NlpPipeline::load_or_fetch()?,
    };
    let doc = load_document(file, &pipeline).with_context(|| format!("analyzing {:?}", file))?;
    info!("Loaded {} ({} chars)", doc.name, doc.text.char_count());
    Ok(doc)
}

fn write_export<T: Tabular>(table: &T, path: Option<&Path>) -> Result<()> {
    if let Some(path) = path {
        let format = export::export_to_path(table, path).with_context(|| format!("exporting to {:?}", path))?;
        info!("Exported {:?} as {:?}", path, format);
    }
    Ok(())
}

fn fetch_model() -> Result<()> {
    let path = resources::ensure_tokenizer_model(|status| match status {
        DownloadStatus::AlreadyExists => info!("Tokenizer model already present"),
        DownloadStatus::Downloading { file, progress, total } if total > 0 => {
            info!("{}: {}/{} bytes", file, progress, total)
        }
        DownloadStatus::Downloading { file, progress, .. } => info!("{}: {} bytes", file, progress),
        DownloadStatus::Unpacking { file } => info!("Unpacking {}", file),
        DownloadStatus::Completed => info!("Download complete"),
    })?;
    println!("{}", path.display());
    Ok(())
}
