use clap::{Parser, Subcommand};
use pixcrawl::acquire::AcquireSettings;
use pixcrawl::download::{HttpDownloader, build_http_client};
use pixcrawl::imaging::{RngSource, RustPipeline};
use pixcrawl::run::{RunOptions, RunOutcome, run};
use pixcrawl::search::PexelsClient;
use pixcrawl::translate::{GoogleTranslator, Translator};
use pixcrawl::{config, output};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("PIXCRAWL_ON_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("PIXCRAWL_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "pixcrawl")]
#[command(about = "Fetch, remix, and zip stock photos for a keyword")]
#[command(long_about = "\
Fetch, remix, and zip stock photos for a keyword

The keyword is translated (Korean to English by default), searched on
Pexels page by page, and each hit is downloaded and edited:

  downscale   longer side capped at 1500px
  crop        100px off a random edge
  border      20px frame in a random rainbow color
  rotate      4-10 degrees either way, corners filled with the border color
  recompress  JPEG, lowering quality until the file fits the size budget

The first 35 images that survive are zipped as
<keyword>_processed_images.zip with entries <keyword>_1.jpg, <keyword>_2.jpg, ...

The Pexels API key is read from the PEXELS_API_KEY environment variable.
Run 'pixcrawl gen-config' to print a documented pixcrawl.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Config file (optional; stock defaults apply when missing)
    #[arg(long, default_value = config::DEFAULT_CONFIG_FILE, global = true)]
    config: PathBuf,

    /// Debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search, transform, and archive images for a keyword
    Run {
        /// Keyword to search for, in the configured source language
        keyword: String,
        /// Directory the archive is written to
        #[arg(long, default_value = ".")]
        output: PathBuf,
        /// Seed for the crop/border/rotation draws
        #[arg(long)]
        seed: Option<u64>,
        /// Search with the keyword as typed
        #[arg(long)]
        no_translate: bool,
        /// Override the number of images to collect
        #[arg(long)]
        quota: Option<usize>,
    },
    /// Translate a keyword and print the search query
    Translate {
        text: String,
    },
    /// Print a stock pixcrawl.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Run {
            keyword,
            output: output_dir,
            seed,
            no_translate,
            quota,
        } => {
            let mut cfg = config::load_config(&cli.config)?;
            if let Some(quota) = quota {
                cfg.search.quota = quota;
                cfg.validate()?;
            }
            let api_key = config::api_key_from_env()?;

            let http = build_http_client(cfg.search.timeout())?;
            let translator = GoogleTranslator::new(http.clone(), &cfg.translate.endpoint);
            let search = PexelsClient::new(http.clone(), &cfg.search.endpoint, api_key);
            let downloader = HttpDownloader::new(http);
            let rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            let mut pipeline =
                RustPipeline::new(RngSource::new(rng), cfg.compression.budget_bytes());

            let options = RunOptions {
                keyword: keyword.clone(),
                languages: (!no_translate).then(|| {
                    (
                        cfg.translate.source_lang.clone(),
                        cfg.translate.target_lang.clone(),
                    )
                }),
                acquire: AcquireSettings {
                    quota: cfg.search.quota,
                    per_page: cfg.search.per_page,
                    page_delay: cfg.search.page_delay(),
                },
            };
            debug!(?options, "starting run");

            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_acquire_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let result = run(
                &translator,
                &search,
                &downloader,
                &mut pipeline,
                &options,
                Some(&tx),
            );
            drop(tx);
            printer.join().map_err(|_| "progress printer panicked")?;

            match result? {
                RunOutcome::Archive { archive, .. } => {
                    let path = archive.save_to(&output_dir)?;
                    println!("{}", output::format_archive_saved(&archive, &path));
                }
                RunOutcome::NothingToDownload { query, .. } => {
                    warn!(%query, "no images collected");
                    println!("{}", output::format_nothing_to_download(&query));
                }
            }
        }
        Command::Translate { text } => {
            let cfg = config::load_config(&cli.config)?;
            let http = build_http_client(cfg.search.timeout())?;
            let translator = GoogleTranslator::new(http, &cfg.translate.endpoint);
            let translated = translator.translate(
                text.trim(),
                &cfg.translate.source_lang,
                &cfg.translate.target_lang,
            )?;
            println!("{}", output::format_query(&text, &translated));
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Log to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "pixcrawl=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
