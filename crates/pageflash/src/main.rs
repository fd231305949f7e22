//! pageflash - page interaction runtime
//!
//! Command-line driver: runs the built-in demo page on a virtual clock and
//! prints what the flash message container looks like over time.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};

use pageflash::demo::{self, DemoNodes};
use pageflash::dom::Rect;
use pageflash::timeline::Timeline;
use pageflash::widgets::css;
use pageflash::{Kind, Page};
use pageflash_core::{Config, NumberLocale, format_number, logging};

/// pageflash - flash notifications and page effects on a virtual clock
#[derive(Parser, Debug)]
#[command(name = "pageflash", version, about, long_about = None)]
struct Args {
    /// Path to the configuration file (uses XDG lookup if not specified)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print example configuration and exit
    #[arg(long)]
    print_example_config: bool,

    /// Validate configuration and exit (returns non-zero on errors)
    #[arg(long)]
    check_config: bool,

    /// Print the page stylesheet and exit
    #[arg(long)]
    print_css: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show a notification on the demo page and follow it until it is gone
    Show {
        /// Message text
        message: String,
        /// Notification kind (info, success, warning, error); unknown kinds fall back to info
        #[arg(short, long, default_value = "info")]
        kind: String,
        /// Emit one JSON object per frame
        #[arg(long)]
        json: bool,
    },
    /// Show a notification, then click its close button
    DismissDemo {
        /// Milliseconds to wait before clicking close
        #[arg(long, default_value = "1000")]
        after: u64,
        /// Emit one JSON object per frame
        #[arg(long)]
        json: bool,
    },
    /// Walk through every page helper on the demo page
    Tour {
        /// Seed for the confetti RNG
        #[arg(long)]
        seed: Option<u64>,
        /// Emit one JSON object per frame
        #[arg(long)]
        json: bool,
    },
    /// Format a number with a locale's separators
    FormatNumber {
        /// Value to format
        #[arg(allow_negative_numbers = true)]
        value: f64,
        /// Locale tag (id-ID, en-US, de-DE, fr-FR); defaults to the configured one
        #[arg(short, long)]
        locale: Option<String>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    logging::init(args.verbose);

    // --print-example-config and --print-css don't need a config
    if args.print_example_config {
        print!("{}", pageflash_core::config::DEFAULT_CONFIG_TOML);
        return ExitCode::SUCCESS;
    }
    if args.print_css {
        print!("{}", css::stylesheet());
        return ExitCode::SUCCESS;
    }

    // Load configuration using XDG lookup chain
    // If --config is specified, it must exist and be valid (no fallback)
    let load_result = match Config::find_and_load(args.config.as_deref()) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(ref source) = load_result.source {
        info!("Loaded configuration from {:?}", source);
    } else if load_result.used_defaults {
        debug!("Using default configuration (no config file found)");
    }

    let config = load_result.config;

    // Validate configuration (strict - fail on invalid values)
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }
    for warning in config.warnings() {
        warn!("{}", warning);
    }

    debug!("Configuration validated successfully");

    if args.check_config {
        if let Some(ref source) = load_result.source {
            println!("Configuration valid: {}", source.display());
        } else {
            println!("Configuration valid (using defaults)");
        }
        return ExitCode::SUCCESS;
    }

    let Some(command) = args.command else {
        println!("{}", config.summary());
        println!("Run `pageflash --help` for commands.");
        return ExitCode::SUCCESS;
    };

    match handle_command(command, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn handle_command(command: Command, config: Config) -> Result<()> {
    match command {
        Command::Show {
            message,
            kind,
            json,
        } => {
            let (mut page, _) = load_demo(config, None)?;
            let mut timeline = Timeline::new();
            let kind = Kind::from_name(&kind);
            page.show_notification(&message, kind);
            timeline.record(&page, format!("show {kind} \"{message}\""), None);
            timeline.run_to_quiescence(&mut page);
            print_timeline(&timeline, json)
        }
        Command::DismissDemo { after, json } => {
            let (mut page, _) = load_demo(config, None)?;
            let mut timeline = Timeline::new();
            let id = page.show_notification("Klik ✕ untuk menutup", Kind::Info);
            timeline.record(&page, format!("show info toast {id}"), None);

            let click_at = page.now() + Duration::from_millis(after);
            timeline.run_until(&mut page, click_at);

            let close = page.notifications().node(id).and_then(|node| {
                page.document()
                    .query_selector_all_from(node, ".flash-close")
                    .first()
                    .copied()
            });
            match close {
                Some(close) => {
                    page.click(close);
                    let phase = page.notification_phase(id);
                    timeline.record(&page, "click close", Some(format!("phase: {phase:?}")));
                }
                None => timeline.record(&page, "click close", Some("toast already gone".into())),
            }

            timeline.run_to_quiescence(&mut page);
            print_timeline(&timeline, json)
        }
        Command::Tour { seed, json } => {
            let (mut page, nodes) = load_demo(config, seed)?;
            let timeline = run_tour(&mut page, &nodes);
            print_timeline(&timeline, json)
        }
        Command::FormatNumber { value, locale } => {
            let locale = match locale {
                Some(tag) => tag
                    .parse::<NumberLocale>()
                    .with_context(|| format!("invalid --locale '{tag}'"))?,
                None => config.locale.number_locale()?,
            };
            println!("{}", format_number(value, locale));
            Ok(())
        }
    }
}

fn load_demo(config: Config, seed: Option<u64>) -> Result<(Page, DemoNodes)> {
    let (document, nodes) = demo::demo_document();
    let mut page = match seed {
        Some(seed) => Page::with_seed(document, config, seed),
        None => Page::new(document, config),
    }
    .context("failed to set up the demo page")?;
    page.load();
    Ok((page, nodes))
}

/// Scripted walk through the demo page.
fn run_tour(page: &mut Page, nodes: &DemoNodes) -> Timeline {
    let mut timeline = Timeline::new();
    timeline.record(page, "load", Some(format!("{} tasks queued", page.pending_tasks())));

    page.click(nodes.menu_button);
    let glyph = page.document().text_content(nodes.menu_button);
    timeline.record(page, "click .mobile-menu-btn", Some(format!("menu open, button shows {glyph}")));

    let outcome = page.drop_files(nodes.file_wrapper, vec!["wisata_2024.csv".to_string()]);
    let particles = page.document().query_selector_all_from(nodes.file_wrapper, ".confetti").len();
    let label = page.document().text_content(nodes.file_label);
    timeline.record(
        page,
        "drop wisata_2024.csv",
        Some(format!(
            "label '{label}', {particles} confetti, default prevented: {}",
            outcome.default_prevented
        )),
    );

    let step = page.now() + Duration::from_millis(50);
    timeline.run_until(page, step);

    page.submit(nodes.form);
    let errors = page.document().query_selector_all(".field-error").len();
    timeline.record(page, "submit (empty fields)", Some(format!("{errors} field errors")));

    let doc = page.document_mut();
    doc.set_value(nodes.destination, "Bali");
    doc.set_value(nodes.year, "2024");
    page.submit(nodes.form);
    let errors = page.document().query_selector_all(".field-error").len();
    timeline.record(page, "submit (filled)", Some(format!("{errors} field errors")));

    let revealed = page.scroll(Rect::new(600.0, 800.0));
    timeline.record(page, "scroll to 600px", Some(format!("{} elements revealed", revealed.len())));

    let total = page.format_number(1_234_567.0);
    timeline.record(page, "format visitors", Some(total));

    timeline.run_to_quiescence(page);
    let hero = page.document().text_content(nodes.hero_title);
    timeline.record(page, "idle", Some(format!("hero reads '{hero}'")));
    timeline
}

fn print_timeline(timeline: &Timeline, json: bool) -> Result<()> {
    if json {
        print!("{}", timeline.to_json_lines().context("failed to encode timeline")?);
    } else {
        print!("{}", timeline.render_text());
    }
    Ok(())
}
