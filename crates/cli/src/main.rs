use std::env;
use std::io::{self, Write};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::{Context, bail};
use clap::{CommandFactory, Parser};
use owo_colors::OwoColorize;
use scrape_core::{
    Document, ExtractConfig, Extraction, FetchConfig, LoadOptions, OutputMode, assemble, compile, extract, fetch_file,
    fetch_stdin, fetch_url, is_url,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod echo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const STEPS: usize = 4;

/// Extract HTML elements using an XPath query or CSS3 selector
#[derive(Parser, Debug)]
#[command(name = "scrape")]
#[command(version = VERSION)]
#[command(about = "Extract HTML elements using an XPath query or CSS3 selector", long_about = None)]
#[command(after_help = "Example: curl 'https://en.wikipedia.org/wiki/List_of_sovereign_states' -s \\\n  \
                        | scrape -be 'table.wikitable > tbody > tr > td > b > a'")]
struct Args {
    /// HTML file or http(s) URL; reads standard input when omitted
    #[arg(value_name = "HTML")]
    html: Option<String>,

    /// Print the value of this attribute for each matched element
    #[arg(short = 'a', long, value_name = "NAME")]
    argument: Option<String>,

    /// Wrap output in HTML and BODY tags
    #[arg(short, long)]
    body: bool,

    /// XPath query or CSS3 selector (repeatable)
    #[arg(short, long, value_name = "EXPRESSION")]
    expression: Vec<String>,

    /// Exit with 0 if the first expression matches, 1 otherwise; print nothing
    #[arg(short = 'x', long = "check-existence", alias = "check_existence")]
    check_existence: bool,

    /// Parse input as XML, without HTML error recovery
    #[arg(short, long)]
    rawinput: bool,

    /// Output the visible text of matches instead of markup
    #[arg(short, long)]
    text: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn output_mode(&self) -> OutputMode {
        if self.text {
            return OutputMode::Text;
        }
        match self.argument.as_deref() {
            Some(name) if !name.is_empty() => OutputMode::Attribute(name.to_string()),
            _ => OutputMode::Markup,
        }
    }
}

/// `-eb` would make `b` the expression instead of setting the body flag.
fn is_misordered_short_flags<S: AsRef<str>>(args: &[S]) -> bool {
    args.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(" ").contains("-eb")
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "warn,scrape_core=debug,scrape=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn timed<T>(timings: &mut Vec<(&'static str, Duration)>, label: &'static str, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let value = f();
    timings.push((label, start.elapsed()));
    value
}

async fn read_source(source: Option<&str>, verbose: bool) -> anyhow::Result<Vec<u8>> {
    match source {
        Some(url) if is_url(url) => {
            if verbose {
                echo::print_step(2, STEPS, &format!("Fetching {}", url.bright_white().underline()));
            }
            fetch_url(url, &FetchConfig::default())
                .await
                .with_context(|| format!("Failed to fetch {}", url))
        }
        Some(path) => {
            if verbose {
                echo::print_step(2, STEPS, &format!("Reading file {}", path.bright_white()));
            }
            fetch_file(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            if verbose {
                echo::print_step(2, STEPS, "Reading from stdin");
            }
            fetch_stdin().context("Failed to read from stdin")
        }
    }
}

async fn run(args: Args) -> anyhow::Result<ExitCode> {
    let start = Instant::now();
    let mut timings = Vec::new();

    if args.verbose {
        echo::print_banner();
    }

    if args.expression.is_empty() && !args.text {
        eprintln!("{}", Args::command().render_help());
        bail!("No XPath query or CSS3 selector given; use -e/--expression or -t/--text");
    }

    if args.verbose {
        echo::print_step(1, STEPS, "Compiling expressions");
    }
    let queries = timed(&mut timings, "Compile", || compile(args.expression.as_slice())).context("Invalid expression")?;
    if args.verbose {
        for query in &queries {
            echo::print_detail(&format!("{:?}", query.kind()), query.xpath());
        }
    }

    let source = args.html.as_deref().filter(|source| !source.is_empty());
    let fetch_start = Instant::now();
    let bytes = read_source(source, args.verbose).await?;
    timings.push(("Read", fetch_start.elapsed()));
    debug!(bytes = bytes.len(), "read input");
    if args.verbose {
        echo::print_detail("Size", &echo::format_size(bytes.len()));
    }

    if args.verbose {
        echo::print_step(3, STEPS, if args.rawinput { "Parsing raw XML" } else { "Parsing HTML document" });
    }
    let options = LoadOptions { raw: args.rawinput };
    let doc = timed(&mut timings, "Parse", || Document::load(&bytes, &options)).context("Failed to parse input")?;
    if args.verbose
        && let Some(title) = doc.title()
    {
        echo::print_detail("Title", &title);
    }

    if args.verbose {
        echo::print_step(4, STEPS, "Evaluating expressions");
    }
    let config = ExtractConfig { mode: args.output_mode(), check_existence: args.check_existence };
    let extraction =
        timed(&mut timings, "Extract", || extract(&doc, &queries, &config)).context("Failed to evaluate expression")?;

    let code = match extraction {
        Extraction::Exists(found) => {
            if args.verbose {
                if found {
                    echo::print_success("Match found");
                } else {
                    echo::print_warning("No match found");
                }
            }
            if found { ExitCode::SUCCESS } else { ExitCode::FAILURE }
        }
        Extraction::Results(results) => {
            if args.verbose {
                echo::print_detail("Results", &results.len().to_string());
            }
            let output = assemble(&results, args.body, args.text);
            io::stdout()
                .lock()
                .write_all(output.as_bytes())
                .context("Failed to write output")?;
            ExitCode::SUCCESS
        }
    };

    if args.verbose {
        eprintln!();
        echo::print_timing_summary(start.elapsed(), &timings);
    }

    Ok(code)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let raw_args: Vec<String> = env::args().skip(1).collect();
    if is_misordered_short_flags(&raw_args) {
        echo::print_error("Flag combination -eb is not supported, use -be instead");
        return ExitCode::FAILURE;
    }

    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args).await {
        Ok(code) => code,
        Err(err) => {
            echo::print_error(&format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
