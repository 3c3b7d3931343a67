use cardsmith_template::{
    check_design, preview, CardDesign, CardError, CardResult, Deck, Face, PreviewConfig,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "card-preview")]
#[command(about = "Render and check flashcard designs", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one face of one deck record to a standalone HTML page on stdout
    Render {
        /// Card design JSON (frontHtml, backHtml, cardCss, designName)
        #[arg(long)]
        design: PathBuf,

        /// Deck JSON: an object of key -> record
        #[arg(long)]
        deck: PathBuf,

        /// Record position in the deck, wrapped to the deck size
        #[arg(long, default_value_t = 0)]
        index: usize,

        #[arg(long, value_enum, default_value_t = Side::Front)]
        side: Side,

        /// Preview settings (YAML)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Report template problems in one or more design files
    Check {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Side {
    Front,
    Back,
}

impl From<Side> for Face {
    fn from(side: Side) -> Self {
        match side {
            Side::Front => Face::Front,
            Side::Back => Face::Back,
        }
    }
}

fn main() {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => EnvFilter::new("warn"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Render {
            design,
            deck,
            index,
            side,
            config,
        } => match render(&design, &deck, index, side.into(), config.as_deref()) {
            Ok(html) => {
                print!("{}", html);
                0
            }
            Err(e) => {
                eprintln!("✗ render failed:");
                print_error(&e);
                1
            }
        },
        Commands::Check { files } => check(&files),
    };

    process::exit(exit_code);
}

fn render(
    design: &Path,
    deck: &Path,
    index: usize,
    face: Face,
    config: Option<&Path>,
) -> CardResult<String> {
    let design = CardDesign::from_json(&fs::read_to_string(design)?)?;
    let deck = Deck::from_json(&fs::read_to_string(deck)?)?;
    let config = match config {
        Some(path) => PreviewConfig::from_yaml(&fs::read_to_string(path)?)?,
        None => PreviewConfig::default(),
    };

    let record = if deck.is_empty() {
        tracing::debug!("deck has no records, rendering the defaults");
        deck.defaults().ok_or(CardError::EmptyDeck)?
    } else {
        let index = index % deck.len();
        tracing::debug!(index, key = ?deck.key(index), "rendering record");
        deck.require(index)?
    };

    Ok(preview::document(&design, record, face, &config))
}

fn check(files: &[PathBuf]) -> i32 {
    let mut exit_code = 0;

    for path in files {
        let file = path.display();
        let design = match fs::read_to_string(path)
            .map_err(CardError::from)
            .and_then(|json| CardDesign::from_json(&json))
        {
            Ok(design) => design,
            Err(e) => {
                eprintln!("✗ {} could not be loaded:", file);
                print_error(&e);
                exit_code = 1;
                continue;
            }
        };

        let issues = check_design(&design);
        if issues.is_empty() {
            println!("✓ {} is clean", file);
            continue;
        }

        eprintln!("✗ {} has issues:", file);
        for (face, issue) in issues {
            let side = if face.is_front() { "front" } else { "back" };
            eprintln!("  [{}] {}", side, issue);
        }
        exit_code = 1;
    }

    exit_code
}

fn print_error(error: &CardError) {
    match error {
        CardError::Io(e) => {
            eprintln!("  Failed to read file:");
            eprintln!("    {}", e);
        }
        CardError::Json(e) => {
            eprintln!("  JSON error at line {}, column {}:", e.line(), e.column());
            eprintln!("    {}", e);
        }
        CardError::Yaml(e) => {
            eprintln!("  YAML error:");
            eprintln!("    {}", e);
        }
        CardError::InvalidRecord { key, reason } => {
            eprintln!("  Invalid record '{}':", key);
            eprintln!("    {}", reason);
        }
        e => {
            eprintln!("  {}", e);
        }
    }
}
