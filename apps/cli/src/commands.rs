//! CLI command definitions, routing, tracing setup, and text rendering.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indexmap::IndexMap;
use tracing::info;

use partnerboard_core::{DocumentRef, FileDocument, build_mapping, list_profile_files};
use partnerboard_profile::{classify, extract_diagram_source, extract_items, parse_document, to_records};
use partnerboard_shared::{
    AppConfig, ContentKind, Document, MappingIndex, Record, SECTION_CONTACTS, SECTION_DOMAINS,
    SECTION_EVALUATION, SECTION_FUTURE, SECTION_PARTNERS, SECTION_PRODUCTS, SECTION_PURPOSE,
    SECTION_RECENT_RESULTS, SECTION_RELATION_LEVEL, SECTION_URL, UNKNOWN_NAME, init_config,
    load_config, load_master_list, load_relation_master,
};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// PartnerBoard — partner profiles as typed, queryable data.
#[derive(Parser)]
#[command(
    name = "partnerboard",
    version,
    about = "Parse markdown partner profiles and map partners to business domains.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Data directory holding the profile files (overrides the config file).
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Output format for `show` and `map`.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// List the profile files in the data directory.
    List,

    /// Show the detail view of one partner profile.
    Show {
        /// Profile file: a path, or a file name inside the data directory.
        file: String,

        /// Output format: text (default) or json.
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show the domain mapping across all profiles.
    Map {
        /// Output format: text (default) or json.
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "partnerboard=info",
        1 => "partnerboard=debug",
        _ => "partnerboard=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::List => cmd_list(cli.data_dir.as_deref()),
        Command::Show { file, format } => cmd_show(cli.data_dir.as_deref(), &file, &format),
        Command::Map { format } => cmd_map(cli.data_dir.as_deref(), &format),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

/// Resolve the data directory: CLI flag, else config file, else default.
fn resolve_data_dir(override_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir.to_path_buf());
    }
    let config = load_config()?;
    Ok(PathBuf::from(config.defaults.data_dir))
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_list(data_dir: Option<&Path>) -> Result<()> {
    let dir = resolve_data_dir(data_dir)?;
    let files = list_profile_files(&dir)?;

    if files.is_empty() {
        println!("no profile files in {}", dir.display());
        return Ok(());
    }

    for file in &files {
        println!("{}", file.id());
    }
    Ok(())
}

fn cmd_show(data_dir: Option<&Path>, file: &str, format: &OutputFormat) -> Result<()> {
    let path = resolve_profile_path(data_dir, file)?;
    let source = FileDocument::new(&path);

    // Single-document reads fail loudly, naming the path.
    let text = source.read()?;
    let doc = parse_document(source.id(), &text);

    let dir = resolve_data_dir(data_dir)?;
    let master_list = load_master_list(&dir)?;
    let relation_master = load_relation_master(&dir)?;

    info!(source_id = %doc.source_id, sections = doc.sections.len(), "profile loaded");

    match format {
        OutputFormat::Text => render_detail(&doc, &master_list, &relation_master),
        OutputFormat::Json => {
            let kinds: IndexMap<&String, ContentKind> = doc
                .sections
                .iter()
                .map(|(title, body)| (title, classify(body)))
                .collect();
            let payload = serde_json::json!({
                "document": doc,
                "section_kinds": kinds,
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
    }
    Ok(())
}

fn cmd_map(data_dir: Option<&Path>, format: &OutputFormat) -> Result<()> {
    let dir = resolve_data_dir(data_dir)?;
    let files = list_profile_files(&dir)?;
    let master_list = load_master_list(&dir)?;

    info!(files = files.len(), domains = master_list.len(), "building domain mapping");

    let index = build_mapping(&files, &master_list);

    match format {
        OutputFormat::Text => render_mapping(&index),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&index)?);
        }
    }
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

/// A bare file name is looked up inside the data directory; anything with a
/// path separator is used as-is.
fn resolve_profile_path(data_dir: Option<&Path>, file: &str) -> Result<PathBuf> {
    let direct = PathBuf::from(file);
    if direct.exists() || direct.components().count() > 1 {
        return Ok(direct);
    }

    let dir = resolve_data_dir(data_dir)?;
    let joined = dir.join(file);
    if joined.exists() {
        Ok(joined)
    } else {
        Err(eyre!(
            "profile '{file}' not found (looked at '{}' and '{}')",
            direct.display(),
            joined.display()
        ))
    }
}

// ---------------------------------------------------------------------------
// Text rendering — detail view
// ---------------------------------------------------------------------------

/// Sections rendered by value in the detail view, in display order.
/// `連係領域` and `今後の関係性` get the master-grid treatment instead.
const DETAIL_SECTIONS: [&str; 7] = [
    SECTION_PURPOSE,
    SECTION_PARTNERS,
    SECTION_URL,
    SECTION_CONTACTS,
    SECTION_PRODUCTS,
    SECTION_RECENT_RESULTS,
    SECTION_EVALUATION,
];

fn render_detail(doc: &Document, master_list: &[String], relation_master: &[String]) {
    let name = doc.partner_name.as_deref().unwrap_or(UNKNOWN_NAME);
    let level = doc.section(SECTION_RELATION_LEVEL).trim();
    let level = if level.is_empty() { "-" } else { level };

    println!("パートナー名: {name}");
    println!("リレーションレベル: {level}");

    println!("\n## {SECTION_DOMAINS}");
    render_master_grid(master_list, &extract_items(doc.section(SECTION_DOMAINS)));

    for title in DETAIL_SECTIONS {
        println!("\n## {title}");
        render_value(doc.section(title));
    }

    println!("\n## {SECTION_FUTURE}");
    render_master_grid(relation_master, &extract_items(doc.section(SECTION_FUTURE)));
}

/// Print each master entry with a match marker; items outside the master list
/// go to an "その他" line.
fn render_master_grid(master_list: &[String], items: &[String]) {
    for entry in master_list {
        let marker = if items.contains(entry) { "[*]" } else { "[ ]" };
        println!("  {marker} {entry}");
    }

    let extras: Vec<&str> = items
        .iter()
        .filter(|item| !master_list.contains(item))
        .map(String::as_str)
        .collect();
    if !extras.is_empty() {
        println!("  その他: {}", extras.join("、"));
    }
}

/// Render a section body according to its content kind.
fn render_value(body: &str) {
    match classify(body) {
        ContentKind::DiagramSource => {
            println!("```mermaid");
            println!("{}", extract_diagram_source(body));
            println!("```");
        }
        ContentKind::Table => match to_records(body) {
            Some(records) if !records.is_empty() => render_table(&records),
            // Classified as a table but no extractable header/separator pair
            // (or no data rows): fall back to the free-text path.
            _ => render_free_text(body),
        },
        ContentKind::BulletList => {
            println!("  {}", extract_items(body).join("、"));
        }
        ContentKind::FreeText => render_free_text(body),
    }
}

fn render_free_text(body: &str) {
    if body.trim().is_empty() {
        println!("  -");
        return;
    }
    for line in body.lines() {
        println!("  {line}");
    }
}

/// Print records as an aligned text table, columns taken from the first
/// record's field order.
fn render_table(records: &[Record]) {
    let columns: Vec<&str> = records[0]
        .fields
        .iter()
        .map(|(name, _)| name.as_str())
        .collect();

    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for record in records {
        for (i, (_, value)) in record.fields.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(value.chars().count());
            }
        }
    }

    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(c, w)| format!("{c:<width$}", width = *w))
        .collect();
    println!("  | {} |", header.join(" | "));

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    println!("  | {} |", rule.join(" | "));

    for record in records {
        let cells: Vec<String> = record
            .fields
            .iter()
            .zip(&widths)
            .map(|((_, value), w)| format!("{value:<width$}", width = *w))
            .collect();
        println!("  | {} |", cells.join(" | "));
    }
}

// ---------------------------------------------------------------------------
// Text rendering — mapping view
// ---------------------------------------------------------------------------

fn render_mapping(index: &MappingIndex) {
    println!("ドメイン別マッピング");

    for (domain, entries) in &index.domains {
        println!("\n■ {domain}");
        if entries.is_empty() {
            println!("  (なし)");
            continue;
        }
        for entry in entries {
            println!("  - {} [{}]", entry.label, entry.source_id);
        }
    }

    if !index.uncategorized.is_empty() {
        println!("\n■ その他（マスターにない領域）");
        for entry in &index.uncategorized {
            println!("  - {} [{}]", entry.label, entry.source_id);
        }
    }
}
