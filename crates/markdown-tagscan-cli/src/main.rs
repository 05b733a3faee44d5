use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::style::Stylize;
use markdown_tagscan_config::Config;
use markdown_tagscan_engine::{
    Buffer, CharUnit, ScanOptions, StyleFlags, TagKind, TagRecord, scan,
};
use serde::Serialize;
use std::{
    io::{Read, Write, stdout},
    path::{Path, PathBuf},
};

/// Scan Markdown for headers, emphasis and paragraphs
#[derive(Parser, Debug)]
#[command(name = "markdown-tagscan", version)]
struct Args {
    /// Markdown files to scan. Defaults to the configured inputs, then stdin
    files: Vec<PathBuf>,

    /// Config file to use instead of ~/.config/markdown-tagscan/config.toml
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Report character positions in UTF-16 code units
    #[arg(long)]
    utf16: bool,

    /// Deepest emphasis nesting to split
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    format: Format,

    /// Write a default config file to the config path and exit
    #[arg(long)]
    init_config: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// One aligned row per tag
    Table,
    /// Nine integers per tag, the native wire layout
    Flat,
    /// JSON array of scanned documents
    Json,
    /// Terminal-styled text
    Preview,
}

#[derive(Debug, PartialEq)]
enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    fn name(&self) -> String {
        match self {
            Input::Stdin => "<stdin>".to_string(),
            Input::File(path) => path.display().to_string(),
        }
    }

    fn read(&self) -> Result<Vec<u8>> {
        match self {
            Input::Stdin => {
                let mut bytes = Vec::new();
                std::io::stdin()
                    .read_to_end(&mut bytes)
                    .context("Failed to read stdin")?;
                Ok(bytes)
            }
            Input::File(path) => std::fs::read(path)
                .with_context(|| format!("Failed to read {}", path.display())),
        }
    }
}

#[derive(Serialize)]
struct JsonTag<'a> {
    #[serde(flatten)]
    tag: &'a TagRecord,
    text: String,
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    file: String,
    tags: Vec<JsonTag<'a>>,
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config_path = path.map_or_else(Config::config_path, Path::to_path_buf);
    log::info!("Config path: {}", config_path.display());
    let config = Config::load_from_path(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    Ok(config.unwrap_or_default())
}

fn init_config(path: Option<&Path>) -> Result<PathBuf> {
    let config_path = path.map_or_else(Config::config_path, Path::to_path_buf);
    if config_path.exists() {
        anyhow::bail!("Config already exists at {}", config_path.display());
    }
    Config::default()
        .save_to_path(&config_path)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;
    Ok(config_path)
}

fn scan_options(args: &Args, config: &Config) -> ScanOptions {
    let mut options = config.scan;
    if args.utf16 {
        options.char_unit = CharUnit::Utf16;
    }
    if let Some(depth) = args.max_depth {
        options.max_nesting_depth = depth;
    }
    options
}

fn resolve_inputs(args: &Args, config: &Config) -> Result<Vec<Input>> {
    if !args.files.is_empty() {
        return Ok(args.files.iter().cloned().map(Input::File).collect());
    }
    let paths = config
        .resolve_inputs()
        .context("Failed to resolve configured inputs")?;
    if paths.is_empty() {
        return Ok(vec![Input::Stdin]);
    }
    Ok(paths.into_iter().map(Input::File).collect())
}

fn flags_label(flags: StyleFlags) -> String {
    let names: Vec<_> = flags.iter_names().map(|(name, _)| name).collect();
    if names.is_empty() {
        "-".to_string()
    } else {
        names.join("|")
    }
}

fn render_table(buffer: &Buffer<'_>, tags: &[TagRecord]) -> String {
    let mut out = String::new();
    for tag in tags {
        out.push_str(&format!(
            "{:<10} {:<28} {:>5}..{:<5} text {:>5}..{:<5} size {} {:?}\n",
            format!("{:?}", tag.kind),
            flags_label(tag.flags),
            tag.start_position.char_index(),
            tag.end_position.char_index(),
            tag.start_text.char_index(),
            tag.end_text.char_index(),
            tag.size_for_type,
            tag.text(buffer),
        ));
    }
    out
}

fn render_flat(tags: &[TagRecord]) -> String {
    let mut out = String::new();
    for tag in tags {
        let fields = [
            usize::from(tag.kind.code()),
            tag.flags.bits() as usize,
            tag.start_position.char_index(),
            tag.end_position.char_index(),
            tag.start_text.char_index(),
            tag.end_text.char_index(),
            tag.start_position.byte_offset(),
            tag.start_text.byte_offset(),
            usize::from(tag.size_for_type),
        ];
        let line: Vec<_> = fields.iter().map(ToString::to_string).collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}

fn render_preview(buffer: &Buffer<'_>, tags: &[TagRecord]) -> String {
    let mut out = String::new();
    for tag in tags {
        let text = tag.text(buffer).into_owned();
        match tag.kind {
            TagKind::Paragraph => out.push_str("\n\n"),
            TagKind::Header => {
                out.push_str(&format!("{}\n", text.bold().underlined()));
            }
            TagKind::Normal | TagKind::TextStyle => {
                let mut styled = text.stylize();
                if tag.flags.contains(StyleFlags::BOLD) {
                    styled = styled.bold();
                }
                if tag.flags.contains(StyleFlags::ITALICS) {
                    styled = styled.italic();
                }
                if tag.flags.contains(StyleFlags::STRIKETHROUGH) {
                    styled = styled.crossed_out();
                }
                out.push_str(&styled.to_string());
            }
        }
    }
    out.push('\n');
    out
}

fn run(args: &Args) -> Result<()> {
    if args.init_config {
        let config_path = init_config(args.config.as_deref())?;
        log::info!("Wrote default config to {}", config_path.display());
        println!("{}", config_path.display());
        return Ok(());
    }

    let config = load_config(args.config.as_deref())?;
    let options = scan_options(args, &config);
    let inputs = resolve_inputs(args, &config)?;
    log::info!("Scanning {} input(s) with {:?}", inputs.len(), options);

    let mut documents = Vec::new();
    for input in &inputs {
        documents.push((input.name(), input.read()?));
    }

    let mut scanned = Vec::new();
    for (name, bytes) in &documents {
        let buffer = Buffer::from_bytes(bytes, options.char_unit);
        let tags = scan(&buffer, &options).with_context(|| format!("Failed to scan {name}"))?;
        scanned.push((name, buffer, tags));
    }

    let mut out = stdout().lock();
    let mut json = Vec::new();

    for (name, buffer, tags) in &scanned {
        match args.format {
            Format::Json => json.push(JsonDocument {
                file: name.to_string(),
                tags: tags
                    .iter()
                    .map(|tag| JsonTag {
                        tag,
                        text: tag.text(buffer).into_owned(),
                    })
                    .collect(),
            }),
            format => {
                if scanned.len() > 1 {
                    writeln!(out, "==> {name} <==")?;
                }
                let rendered = match format {
                    Format::Flat => render_flat(tags),
                    Format::Preview => render_preview(buffer, tags),
                    _ => render_table(buffer, tags),
                };
                out.write_all(rendered.as_bytes())?;
            }
        }
    }

    if args.format == Format::Json {
        let text = serde_json::to_string_pretty(&json).context("Failed to encode JSON")?;
        writeln!(out, "{text}")?;
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    run(&args)
}
