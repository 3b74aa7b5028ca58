//! pretty-render CLI
//!
//! Usage:
//!   pretty-render [OPTIONS] [FILE]
//!
//! Options:
//!   -s, --stylesheet <FILE>  Stylesheet file for color palette (TOML format)
//!   --standalone             Wrap the output in a complete HTML page
//!   -g, --grammar            Show script grammar reference
//!   -e, --examples           Show an annotated example script
//!   -h, --help               Print help

use std::fs;
use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pretty_render::{run_script, Error, OutputSink, SharedBuffer, Stylesheet};

const TOUR: &str = include_str!("../demos/tour.pr");

#[derive(Parser)]
#[command(name = "pretty-render")]
#[command(about = "Render values, annotations and plots as HTML")]
struct Cli {
    /// Input script (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Stylesheet file for color palette (TOML format)
    #[arg(short, long)]
    stylesheet: Option<PathBuf>,

    /// Emit a complete HTML page instead of a fragment stream
    #[arg(long)]
    standalone: bool,

    /// Show script grammar reference
    #[arg(short, long)]
    grammar: bool,

    /// Show an annotated example script
    #[arg(short, long)]
    examples: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    // Handle documentation flags first
    if cli.grammar {
        print_grammar();
        return;
    }

    if cli.examples {
        print!("{}", TOUR);
        return;
    }

    // If no input file and stdin is a terminal (interactive), show intro help
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    // Read input
    let (source, filename) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let result = load_stylesheet(cli.stylesheet.as_deref()).and_then(|stylesheet| {
        if cli.standalone {
            let buffer = SharedBuffer::default();
            let sink = OutputSink::new(buffer.clone());
            run_script(&source, &sink)?;
            sink.finish()?;
            let page = stylesheet.page(&buffer.contents());
            io::stdout().write_all(page.as_bytes())?;
            Ok(())
        } else {
            let sink = OutputSink::stdout();
            run_script(&source, &sink)?;
            sink.finish()
        }
    });

    if let Err(e) = result {
        eprintln!("{}", e.format(&source, &filename).trim_end());
        std::process::exit(1);
    }
}

/// Load the palette named on the command line, or the built-in one
fn load_stylesheet(path: Option<&Path>) -> Result<Stylesheet, Error> {
    match path {
        Some(path) => Ok(Stylesheet::from_file(path)?),
        None => Ok(Stylesheet::default()),
    }
}

fn print_intro() {
    println!(
        r#"pretty-render - Render values, annotations and plots as HTML

USAGE:
    pretty-render [OPTIONS] [FILE]
    echo '<script>' | pretty-render

OPTIONS:
    -g, --grammar      Show script grammar reference
    -e, --examples     Show an annotated example script
    -s, --stylesheet   Custom color palette (TOML file)
    --standalone       Emit a complete HTML page
    -h, --help         Print help

QUICK START:
    echo 'print [[1, 2], [3, 4]]' | pretty-render

This prints a 2x2 table. Run --grammar for syntax reference or --examples
for a tour of every statement."#
    );
}

fn print_grammar() {
    println!(
        r#"PRETTY-RENDER SCRIPT GRAMMAR
============================

STATEMENTS
  print <expr>                   Render a value
  let <name> = <expr>            Render as a one-row "name = value" table
  section <inline>...            <h3> heading
  subsection <inline>...         <h4> heading
  subsubsection <inline>...      <h5> heading
  paragraph <inline>...          <p> paragraph
  box {{ <statement>... }}         Group output in <div class="box">
  plot <series>, ... [options]   Draw series as an SVG figure

EXPRESSIONS
  42  -7                         Integers
  3.5  6.02e23                   Floats
  "text"  'c'                    Strings and characters
  true  false                    Booleans
  0x41                           Bytes
  none  some(<expr>)             Optionals
  [a, b, ...]                    Lists
  (a, b, ...)                    Tuples; (a) is just a

INLINE CONTENT
  "text"  emph "x"  code "x"  samp "x"  link "href" "caption"

PLOTS
  A series is a list of (x, y) pairs. Options:
    x_min, x_max, y_min, y_max   Explicit axis bounds
    x_tick_base, y_tick_base     Tick spacing base, 2 to 36 (default 5)

LAYOUT RULES
  Lists of rows with equal width render as tables, others as nested lists.
  Tuples whose members are rows of equal width render as tables.

COMMENTS
  // line comment
  /* block comment */"#
    );
}
