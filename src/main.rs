mod app;
mod report;
mod scanner;
mod tree;
mod ui;

use std::io::{self, IsTerminal, Write};
use std::panic;
use std::path::PathBuf;
use std::sync::mpsc;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use app::App;
use report::format::format_metrics;
use report::{export_json, render_tree, ExportOptions};
use scanner::{ScanOptions, ScanProgress, Scanner, DEFAULT_CHARS_PER_TOKEN};
use tree::DirNode;
use ui::{handle_key, ColorScheme};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Interactive browser
    Ncdu,
    /// Static text tree
    Tree,
}

#[derive(Parser, Debug)]
#[command(name = "loc-tree")]
#[command(version)]
#[command(about = "Count lines and estimate LLM tokens per directory", long_about = None)]
struct Args {
    /// Directory to analyze (default: current directory)
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Output mode
    #[arg(long, value_enum, default_value_t = Mode::Ncdu)]
    mode: Mode,

    /// Output the tree as JSON instead of text or TUI
    #[arg(long)]
    json: bool,

    /// Show only the N files with the most tokens (with --json)
    #[arg(short = 'n', long, requires = "json")]
    top: Option<usize>,

    /// Bytes per estimated token
    #[arg(long, default_value_t = DEFAULT_CHARS_PER_TOKEN)]
    chars_per_token: f64,

    /// Count blank and whitespace-only lines
    #[arg(long)]
    include_blank_lines: bool,

    /// Comma-separated extensions to count, e.g. ".py,.rs"
    #[arg(long)]
    extensions: Option<String>,

    /// Directory name or root-relative path to skip (can be repeated)
    #[arg(long = "exclude-dir", action = clap::ArgAction::Append)]
    exclude_dir: Vec<String>,

    /// Regex matched against relative paths and names to skip (can be repeated)
    #[arg(long = "exclude-path-regex", action = clap::ArgAction::Append)]
    exclude_path_regex: Vec<String>,

    /// Include dot-prefixed files and directories
    #[arg(long)]
    include_hidden: bool,

    /// Drop directories with nothing counted and nothing listed
    #[arg(long)]
    prune_empty: bool,

    /// Don't cross filesystem boundaries
    #[arg(long)]
    no_cross_mount: bool,

    /// Print every skipped entry
    #[arg(short, long)]
    verbose: bool,

    /// Color scheme: default, dark, light
    #[arg(long, default_value = "default", value_parser = ["default", "dark", "light"])]
    color_scheme: String,

    /// Disable colors
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let root_path = args.root.canonicalize().unwrap_or(args.root.clone());

    let mut scan_options = ScanOptions::new(root_path)
        .with_include_blank_lines(args.include_blank_lines)
        .with_chars_per_token(args.chars_per_token)
        .with_exclude_dirs(args.exclude_dir.clone())
        .with_exclude_path_regex(args.exclude_path_regex.clone())
        .with_include_hidden(args.include_hidden)
        .with_prune_empty(args.prune_empty)
        .with_cross_mount(!args.no_cross_mount);
    if let Some(ref extensions) = args.extensions {
        scan_options = scan_options.with_extensions(extensions);
    }

    let tree = scan(scan_options, args.verbose)?;

    if args.json {
        return run_json_mode(&tree, args.top);
    }

    let interactive = io::stdin().is_terminal() && io::stdout().is_terminal();
    match args.mode {
        Mode::Ncdu if interactive => {
            let color_scheme = if args.no_color {
                ColorScheme::monochrome()
            } else {
                ColorScheme::by_name(&args.color_scheme).unwrap_or_default()
            };
            run_tui_mode(&tree, &color_scheme)
        }
        _ => run_tree_mode(&tree),
    }
}

/// Run the scan to completion and report skipped entries on stderr.
fn scan(options: ScanOptions, verbose: bool) -> Result<DirNode> {
    let (tx, rx) = mpsc::channel();
    let scanner = Scanner::new(options, tx);

    let result = scanner.scan();
    drop(scanner);

    let mut skipped = 0u64;
    for event in rx.try_iter() {
        match event {
            ScanProgress::Started { root } if verbose => {
                eprintln!("scanning {}", root.display());
            }
            ScanProgress::Error { path, error } => {
                skipped += 1;
                if verbose {
                    eprintln!("warning: {}: {}", path.display(), error);
                }
            }
            ScanProgress::Completed { total_files, total } if verbose => {
                eprintln!("scanned {} files: {}", total_files, format_metrics(&total));
            }
            _ => {}
        }
    }
    if skipped > 0 && !verbose {
        eprintln!("{} entries skipped (use --verbose for details)", skipped);
    }

    Ok(result?)
}

fn run_tree_mode(tree: &DirNode) -> Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", render_tree(tree))?;
    Ok(())
}

fn run_json_mode(tree: &DirNode, top_n: Option<usize>) -> Result<()> {
    let export_options = ExportOptions { top_n };
    let mut stdout = io::stdout().lock();
    export_json(tree, &export_options, &mut stdout)?;
    writeln!(stdout)?; // Final newline

    Ok(())
}

fn run_tui_mode(tree: &DirNode, color_scheme: &ColorScheme) -> Result<()> {
    // Set up panic handler to restore terminal on crash
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut app = App::new(tree);
    let result = run_app(&mut terminal, &mut app, color_scheme);

    // Restore terminal even when the loop failed
    let cleanup_result = cleanup_terminal(&mut terminal);
    result.and(cleanup_result)
}

/// Clean up terminal state.
fn cleanup_terminal<B: ratatui::backend::Backend + Write>(terminal: &mut Terminal<B>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    color_scheme: &ColorScheme,
) -> Result<()> {
    loop {
        terminal.draw(|frame| {
            ui::render_ui(frame, app, color_scheme);
        })?;

        // Nothing changes between key presses, so block until the next event
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                app.handle_command(handle_key(key));
            }
            // Resize and anything else just redraws
            _ => {}
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
