//! svg2svelte CLI
//!
//! Usage:
//!   svg2svelte [OPTIONS] [FILE]
//!
//! Options:
//!   -o, --output <FILE>  Output file (defaults to FILE with a .svelte extension)
//!       --stdout         Write the component to stdout instead of a file
//!   -c, --config <FILE>  Template configuration file (TOML format)
//!   -l, --lint           Report questionable fills
//!   -d, --debug          Log parsing and color extraction details
//!   -h, --help           Print help

use std::fs;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use thiserror::Error;
use tracing::Level;

use svg2svelte::{convert_with_lint, ConfigError, ConvertConfig, ConvertError, TemplateConfig};

#[derive(Parser)]
#[command(name = "svg2svelte")]
#[command(about = "Convert an SVG icon into a Svelte component with color variables")]
struct Cli {
    /// Input SVG file (prompts when omitted; reads stdin when piped)
    input: Option<PathBuf>,

    /// Output file (defaults to the input path with a .svelte extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the component to stdout
    #[arg(long, conflicts_with = "output")]
    stdout: bool,

    /// Template configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Report questionable fills on stderr
    #[arg(short, long)]
    lint: bool,

    /// Debug mode: log the parsed document and extracted colors
    #[arg(short, long)]
    debug: bool,
}

/// Where the generated component goes
#[derive(Debug, PartialEq, Eq)]
enum Sink {
    Stdout,
    File(PathBuf),
}

/// Failures that end the process with exit code 1
#[derive(Debug, Error)]
enum CliError {
    #[error("Error loading config '{}': {source}", .path.display())]
    Config { path: PathBuf, source: ConfigError },

    #[error("Error reading filename: {0}")]
    Prompt(io::Error),

    #[error("Error reading file '{}': {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Error reading from stdin: {0}")]
    Stdin(io::Error),

    /// Rendered ariadne report
    #[error("{report}")]
    Parse { report: String },

    #[error("Error writing file '{}': {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("Error writing output: {0}")]
    Output(io::Error),
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::WARN })
        .without_time()
        .with_target(false)
        .init();

    let interactive = io::stdin().is_terminal();
    let mut stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr();

    if let Err(e) = run(&cli, interactive, &mut stdin, &mut stdout, &mut stderr) {
        match e {
            CliError::Parse { report } => eprint!("{}", report),
            other => eprintln!("{}", other),
        }
        std::process::exit(1);
    }
}

/// Run one conversion
///
/// `interactive` decides whether a missing input argument prompts for a
/// filename or reads SVG source from `stdin`. The component goes to `out`;
/// lint warnings and status lines go to `err`.
fn run(
    cli: &Cli,
    interactive: bool,
    stdin: &mut impl BufRead,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<(), CliError> {
    let template = match &cli.config {
        Some(path) => TemplateConfig::from_file(path).map_err(|source| CliError::Config {
            path: path.clone(),
            source,
        })?,
        None => TemplateConfig::default(),
    };

    // Resolve input: argument, interactive prompt, or stdin pipe
    let input = match &cli.input {
        Some(path) => Some(path.clone()),
        None if interactive => Some(read_filename(stdin, out).map_err(CliError::Prompt)?),
        None => None,
    };

    let (source, name) = match &input {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(|source| CliError::Read {
                path: path.clone(),
                source,
            })?;
            (content, path.display().to_string())
        }
        None => {
            let mut buffer = String::new();
            stdin.read_to_string(&mut buffer).map_err(CliError::Stdin)?;
            (buffer, "<stdin>".to_string())
        }
    };

    let sink = choose_sink(cli.output.as_deref(), input.as_deref(), cli.stdout);

    let config = ConvertConfig::new()
        .with_template(template)
        .with_lint(cli.lint);
    let (svelte, warnings) = match convert_with_lint(&source, config) {
        Ok(result) => result,
        Err(ConvertError::Parse(e)) => {
            return Err(CliError::Parse {
                report: e.format(&source, &name),
            })
        }
    };

    for w in &warnings {
        writeln!(err, "warning[{}]: {}", w.category, w.message).map_err(CliError::Output)?;
    }

    match sink {
        Sink::Stdout => {
            out.write_all(svelte.as_bytes()).map_err(CliError::Output)?;
            out.flush().map_err(CliError::Output)?;
        }
        Sink::File(path) => {
            fs::write(&path, &svelte).map_err(|source| CliError::Write {
                path: path.clone(),
                source,
            })?;
            writeln!(err, "Wrote {}", path.display()).map_err(CliError::Output)?;
        }
    }
    Ok(())
}

/// Pick the output sink
///
/// `--stdout` wins, then `-o`, then the input path with a `.svelte`
/// extension. Source read from a pipe goes to stdout.
fn choose_sink(output: Option<&Path>, input: Option<&Path>, stdout: bool) -> Sink {
    match (output, input) {
        _ if stdout => Sink::Stdout,
        (Some(path), _) => Sink::File(path.to_path_buf()),
        (None, Some(path)) => Sink::File(svelte_path(path)),
        (None, None) => Sink::Stdout,
    }
}

/// Ask for the SVG filename
fn read_filename(input: &mut impl BufRead, prompt: &mut impl Write) -> io::Result<PathBuf> {
    write!(prompt, "Enter the name of the .svg file: ")?;
    prompt.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let name = line.trim();
    if name.is_empty() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "no filename given"));
    }
    Ok(PathBuf::from(name))
}

/// `icons/heart.svg` becomes `icons/heart.svelte`
fn svelte_path(input: &Path) -> PathBuf {
    input.with_extension("svelte")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const ICON: &str = r##"<svg viewBox="0 0 2 2"><path d="M0 0h2" fill="#f00"/></svg>"##;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["svg2svelte"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("svg2svelte-{}-{}", std::process::id(), name))
    }

    /// Run with the given stdin text, returning (result, stdout, stderr)
    fn run_with(cli: &Cli, interactive: bool, stdin: &str) -> (Result<(), CliError>, String, String) {
        let mut input = Cursor::new(stdin.as_bytes().to_vec());
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = run(cli, interactive, &mut input, &mut out, &mut err);
        (
            result,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_svelte_path_replaces_extension() {
        assert_eq!(
            svelte_path(Path::new("icons/heart.svg")),
            PathBuf::from("icons/heart.svelte")
        );
        assert_eq!(svelte_path(Path::new("logo")), PathBuf::from("logo.svelte"));
    }

    #[test]
    fn test_choose_sink() {
        let svg = Path::new("a/icon.svg");
        let out = Path::new("out.svelte");

        assert_eq!(choose_sink(None, Some(svg), false), Sink::File(PathBuf::from("a/icon.svelte")));
        assert_eq!(choose_sink(Some(out), Some(svg), false), Sink::File(out.to_path_buf()));
        assert_eq!(choose_sink(None, Some(svg), true), Sink::Stdout);
        assert_eq!(choose_sink(None, None, false), Sink::Stdout);
    }

    #[test]
    fn test_stdout_conflicts_with_output() {
        let result = Cli::try_parse_from(["svg2svelte", "--stdout", "-o", "x.svelte", "x.svg"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_piped_stdin_goes_to_stdout() {
        let (result, out, err) = run_with(&cli(&[]), false, ICON);
        assert!(result.is_ok());
        assert!(out.contains(r##"export let color0 = "#f00";"##));
        assert!(out.ends_with("</svg>\n"));
        assert!(err.is_empty());
    }

    #[test]
    fn test_lint_warnings_on_stderr() {
        let (result, out, err) = run_with(&cli(&["--lint"]), false, r#"<svg><rect width="1"/></svg>"#);
        assert!(result.is_ok());
        assert!(out.contains(r#"export let color0 = "";"#));
        assert!(err.starts_with("warning[empty-fill]: "));
        assert!(err.contains("<rect #1 in group #1>"));
    }

    #[test]
    fn test_prompt_reads_filename() {
        let svg = temp_path("prompt.svg");
        fs::write(&svg, ICON).unwrap();

        let (result, out, _) = run_with(&cli(&["--stdout"]), true, &format!("{}\n", svg.display()));
        fs::remove_file(&svg).unwrap();

        assert!(result.is_ok());
        assert!(out.starts_with("Enter the name of the .svg file: <script>\n"));
    }

    #[test]
    fn test_prompt_empty_filename() {
        let (result, _, _) = run_with(&cli(&[]), true, "\n");
        let e = result.unwrap_err();
        assert!(matches!(e, CliError::Prompt(_)));
        assert_eq!(e.to_string(), "Error reading filename: no filename given");
    }

    #[test]
    fn test_missing_input_file() {
        let missing = temp_path("missing.svg");
        let (result, _, _) = run_with(&cli(&[missing.to_str().unwrap()]), false, "");
        let e = result.unwrap_err();
        assert!(matches!(e, CliError::Read { .. }));
        assert!(e.to_string().starts_with("Error reading file '"));
    }

    #[test]
    fn test_missing_config_file() {
        let missing = temp_path("missing.toml");
        let (result, _, _) = run_with(&cli(&["-c", missing.to_str().unwrap()]), false, ICON);
        assert!(matches!(result, Err(CliError::Config { .. })));
    }

    #[test]
    fn test_parse_error_report_names_stdin() {
        let (result, out, _) = run_with(&cli(&[]), false, "<svg><g></svg>");
        match result {
            Err(CliError::Parse { report }) => {
                assert!(report.contains("malformed SVG"));
                assert!(report.contains("<stdin>"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
        assert!(out.is_empty());
    }

    #[test]
    fn test_writes_svelte_next_to_input() {
        let svg = temp_path("write.svg");
        fs::write(&svg, ICON).unwrap();

        let (result, out, err) = run_with(&cli(&[svg.to_str().unwrap()]), false, "");
        let written = svelte_path(&svg);
        let component = fs::read_to_string(&written).unwrap();
        fs::remove_file(&svg).unwrap();
        fs::remove_file(&written).unwrap();

        assert!(result.is_ok());
        assert!(out.is_empty());
        assert_eq!(err, format!("Wrote {}\n", written.display()));
        assert!(component.contains(r#"fill="{color0}""#));
    }
}
