//! sitegen - generate, preview and package websites from prompts
//!
//! Commands:
//! - Generation against the remote service (or an offline stand-in)
//! - Preview documents and sandboxed embeds for any website document
//! - Download packaging as loose files or a verified archive
//! - Project management against the remote store

use clap::{ArgGroup, Args, Parser, Subcommand};
use serde_json::json;
use sg_bundle::{ArchiveReader, ArtifactWriter};
use sg_cli::config::{load_config, ConfigOptions, ResolvedConfig};
use sg_cli::input::{load_bundle, load_project};
use sg_cli::logging::{init_logging, LogConfig, LogFormat, LogLevel};
use sg_cli::{CliError, ExitCode, Result};
use sg_client::{GenerationService, HttpApi, ProjectStore, StaticGenerator};
use sg_common::{
    ColorScheme, DesignStyle, GenerateRequest, OutputFormat, Project, ProjectId, SCHEMA_VERSION,
};
use sg_compose::{
    BundlePackager, BundleStats, CodeKind, EscapeMode, PreviewComposer, PreviewSurface, Viewport,
};
use std::path::{Path, PathBuf};
use tracing::info;

/// sitegen - turn prompts into complete, previewable websites
#[derive(Parser)]
#[command(name = "sitegen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Config file (default: $XDG_CONFIG_HOME/sitegen/config.json)
    #[arg(long, global = true, env = "SITEGEN_CONFIG")]
    config: Option<PathBuf>,

    /// Base URL of the generation and project API
    #[arg(long, global = true, env = "SITEGEN_API_URL")]
    api_url: Option<String>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "summary")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a website from a prompt
    Generate(GenerateArgs),

    /// Compose the preview document of a website
    Preview(PreviewArgs),

    /// Package a website as index.html, styles.css and script.js
    Package(PackageArgs),

    /// Show code size statistics
    Stats(StatsArgs),

    /// Verify a packaged archive
    Verify(VerifyArgs),

    /// List available color schemes
    Schemes(CatalogArgs),

    /// List available design styles
    Styles(CatalogArgs),

    /// Manage saved projects
    Projects(ProjectsArgs),

    /// Configuration management
    Config(ConfigArgs),
}

// ============================================================================
// Command argument structs
// ============================================================================

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Description of the website
    prompt: String,

    /// Design style id
    #[arg(long, default_value = "modern")]
    style: String,

    /// Color scheme id
    #[arg(long, default_value = "default")]
    color_scheme: String,

    /// Write the generated website JSON to this file
    #[arg(long, short = 'o')]
    out: Option<PathBuf>,

    /// Save the result as a project with this name
    #[arg(long, conflicts_with = "offline")]
    save: Option<String>,

    /// Use the built-in page instead of the remote service
    #[arg(long)]
    offline: bool,
}

#[derive(Args, Debug)]
struct PreviewArgs {
    /// Website document (bundle, generated website or project JSON; `-` for stdin)
    input: PathBuf,

    /// Write the output here instead of stdout
    #[arg(long, short = 'o')]
    out: Option<PathBuf>,

    /// Escape the title and guard style/script content
    #[arg(long)]
    escape_untrusted: bool,

    /// Viewport preset for the embed (desktop, tablet, mobile)
    #[arg(long, default_value = "desktop")]
    viewport: Viewport,

    /// Emit a sandboxed <iframe> embed instead of the document
    #[arg(long, conflicts_with = "data_url")]
    iframe: bool,

    /// Emit a data: URL instead of the document
    #[arg(long)]
    data_url: bool,
}

#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("target")
        .required(true)
        .multiple(true)
        .args(["out_dir", "archive"])
))]
struct PackageArgs {
    /// Website document (`-` for stdin)
    input: PathBuf,

    /// Save the three files into this directory
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Save a ZIP archive with checksummed manifest
    #[arg(long)]
    archive: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct StatsArgs {
    /// Website document (`-` for stdin)
    input: PathBuf,
}

#[derive(Args, Debug)]
struct VerifyArgs {
    /// Archive written by `package --archive`
    archive: PathBuf,
}

#[derive(Args, Debug)]
struct CatalogArgs {
    /// Use the built-in catalogue instead of the remote service
    #[arg(long)]
    offline: bool,
}

#[derive(Args, Debug)]
struct ProjectsArgs {
    #[command(subcommand)]
    command: ProjectCommands,
}

#[derive(Subcommand, Debug)]
enum ProjectCommands {
    /// List saved projects, newest first
    List,

    /// Show one project
    Show {
        /// Project id
        id: String,

        /// Print the composed preview document instead
        #[arg(long)]
        preview: bool,
    },

    /// Save a website document as a new project
    Save {
        /// Website document (`-` for stdin)
        input: PathBuf,

        /// Project name
        #[arg(long)]
        name: String,
    },

    /// Replace an existing project's content
    Update {
        /// Project id
        id: String,

        /// Website document (`-` for stdin)
        input: PathBuf,

        /// Project name
        #[arg(long)]
        name: String,
    },

    /// Delete a project
    Delete {
        /// Project id
        id: String,
    },
}

#[derive(Args, Debug)]
struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show the resolved configuration
    Show,
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.global.quiet {
        Some(LogLevel::Error)
    } else {
        match cli.global.verbose {
            0 => None,
            1 => Some(LogLevel::Debug),
            _ => Some(LogLevel::Trace),
        }
    };
    // Machine-readable stdout gets machine-readable stderr
    let log_format = cli.global.format.is_machine().then_some(LogFormat::Jsonl);
    init_logging(&LogConfig::from_env(log_level, log_format));

    let global = &cli.global;
    let result = match &cli.command {
        Commands::Generate(args) => run_generate(global, args),
        Commands::Preview(args) => run_preview(global, args),
        Commands::Package(args) => run_package(global, args),
        Commands::Stats(args) => run_stats(global, args),
        Commands::Verify(args) => run_verify(global, args),
        Commands::Schemes(args) => run_schemes(global, args),
        Commands::Styles(args) => run_styles(global, args),
        Commands::Projects(args) => run_projects(global, args),
        Commands::Config(args) => match args.command {
            ConfigCommands::Show => run_config_show(global),
        },
    };

    let exit_code = match result {
        Ok(()) => ExitCode::Clean,
        Err(err) => output_error(global, &err),
    };

    std::process::exit(exit_code.as_i32());
}

// ============================================================================
// Shared helpers
// ============================================================================

fn resolve_config(global: &GlobalOpts) -> Result<ResolvedConfig> {
    let options = ConfigOptions {
        config_path: global.config.clone(),
        api_url: global.api_url.clone(),
        config_home: None,
    };
    Ok(load_config(&options)?)
}

fn remote_api(resolved: &ResolvedConfig) -> HttpApi {
    HttpApi::new(&resolved.config.api_url, resolved.config.timeout())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|source| CliError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), bytes = content.len(), "File written");
    Ok(())
}

fn parse_project_id(id: &str) -> Result<ProjectId> {
    Ok(ProjectId::parse(id)?)
}

fn output_error(global: &GlobalOpts, error: &CliError) -> ExitCode {
    let exit_code = error.exit_code();

    match global.format {
        OutputFormat::Json => {
            let response = json!({
                "schema_version": SCHEMA_VERSION,
                "status": "error",
                "error": {
                    "code": exit_code.as_i32(),
                    "name": exit_code.code_name(),
                    "message": error.to_string(),
                }
            });
            eprintln!("{:#}", response);
        }
        OutputFormat::Summary | OutputFormat::Md => {
            eprintln!("error: {}", error);
        }
    }

    exit_code
}

// ============================================================================
// Command implementations
// ============================================================================

fn run_generate(global: &GlobalOpts, args: &GenerateArgs) -> Result<()> {
    let resolved = resolve_config(global)?;
    let request = GenerateRequest::new(&args.prompt)
        .with_style(&args.style)
        .with_color_scheme(&args.color_scheme);

    let website = if args.offline {
        StaticGenerator::new().generate(&request)?
    } else {
        remote_api(&resolved).generate(&request)?
    };

    if let Some(out) = &args.out {
        write_file(out, &serde_json::to_string_pretty(&website)?)?;
    }

    let saved_id = match &args.save {
        Some(name) => {
            let project = Project::from_website(name, &website)?;
            Some(remote_api(&resolved).save(&project)?)
        }
        None => None,
    };

    let stats = BundleStats::of(website.bundle());
    match global.format {
        OutputFormat::Json => print_json(&json!({
            "schema_version": SCHEMA_VERSION,
            "website": website,
            "saved_id": saved_id,
        }))?,
        OutputFormat::Summary => {
            let saved = saved_id
                .map(|id| format!(", saved as {}", id))
                .unwrap_or_default();
            println!(
                "generated \"{}\" ({} bytes, {} components){}",
                website.title(),
                stats.total_bytes(),
                website.components.len(),
                saved
            );
        }
        OutputFormat::Md => {
            println!("# {}", website.title());
            println!();
            println!("{}", website.meta_description);
            println!();
            println!("- Style: {}", website.style);
            println!("- Color scheme: {}", website.color_scheme);
            for kind in CodeKind::ALL {
                println!("- {}: {}", kind, stats.get(kind).size_label());
            }
            if let Some(id) = saved_id {
                println!("- Saved as: `{}`", id);
            }
        }
    }

    Ok(())
}

fn run_preview(global: &GlobalOpts, args: &PreviewArgs) -> Result<()> {
    let resolved = resolve_config(global)?;
    let bundle = load_bundle(&args.input)?;

    let mut composer_config = resolved.config.composer.clone();
    if args.escape_untrusted {
        composer_config.escape_mode = EscapeMode::Untrusted;
    }

    let mut surface = PreviewSurface::new(PreviewComposer::new(composer_config));
    surface.set_viewport(args.viewport);
    let render_key = surface.load(&bundle).render_key;

    let output = if args.iframe {
        surface.embed()
    } else if args.data_url {
        surface.current().map(|frame| frame.to_data_url())
    } else {
        surface.current().map(|frame| frame.html.clone())
    }
    .unwrap_or_default();

    match &args.out {
        None => println!("{}", output),
        Some(path) => {
            write_file(path, &output)?;
            match global.format {
                OutputFormat::Json => print_json(&json!({
                    "schema_version": SCHEMA_VERSION,
                    "path": path.display().to_string(),
                    "bytes": output.len(),
                    "render_key": render_key,
                    "viewport": args.viewport,
                }))?,
                _ => println!("wrote preview to {} ({} bytes)", path.display(), output.len()),
            }
        }
    }

    Ok(())
}

fn run_package(global: &GlobalOpts, args: &PackageArgs) -> Result<()> {
    let resolved = resolve_config(global)?;
    let bundle = load_bundle(&args.input)?;

    let package = BundlePackager::new(resolved.config.composer.clone()).package(&bundle);
    let writer = ArtifactWriter::from_package(&bundle.title, &package)
        .with_generator_version(env!("CARGO_PKG_VERSION"));

    let mut written = Vec::new();
    if let Some(dir) = &args.out_dir {
        for path in writer.write_dir(dir)? {
            written.push(path.display().to_string());
        }
    }
    if let Some(archive) = &args.archive {
        writer.write_archive(archive)?;
        written.push(archive.display().to_string());
    }

    match global.format {
        OutputFormat::Json => print_json(&json!({
            "schema_version": SCHEMA_VERSION,
            "title": bundle.title,
            "files": package.files.iter().map(|a| json!({
                "filename": a.filename,
                "bytes": a.bytes(),
                "mime_type": a.mime_type,
            })).collect::<Vec<_>>(),
            "written": written,
        }))?,
        OutputFormat::Summary => {
            println!(
                "packaged {} files ({} bytes): {}",
                package.files.len(),
                package.total_bytes(),
                package.filenames().join(", ")
            );
        }
        OutputFormat::Md => {
            println!("| File | Type | Size |");
            println!("|------|------|------|");
            for artifact in &package.files {
                println!(
                    "| {} | {} | {} |",
                    artifact.filename,
                    artifact.mime_type,
                    artifact.bytes()
                );
            }
            println!();
            for path in &written {
                println!("- wrote `{}`", path);
            }
        }
    }

    Ok(())
}

fn run_stats(global: &GlobalOpts, args: &StatsArgs) -> Result<()> {
    let bundle = load_bundle(&args.input)?;
    let stats = BundleStats::of(&bundle);

    match global.format {
        OutputFormat::Json => {
            let mut report = serde_json::Map::new();
            for kind in CodeKind::ALL {
                let code = stats.get(kind);
                report.insert(
                    kind.language().to_string(),
                    json!({
                        "bytes": code.bytes,
                        "lines": code.lines,
                        "size": code.size_label(),
                    }),
                );
            }
            print_json(&json!({
                "schema_version": SCHEMA_VERSION,
                "title": bundle.title,
                "total_bytes": stats.total_bytes(),
                "code": report,
            }))?
        }
        OutputFormat::Summary => {
            let parts: Vec<String> = CodeKind::ALL
                .iter()
                .map(|&kind| {
                    let code = stats.get(kind);
                    format!("{} {} ({} lines)", kind, code.size_label(), code.lines)
                })
                .collect();
            println!("{}", parts.join(" | "));
        }
        OutputFormat::Md => {
            println!("| Code | Size | Lines |");
            println!("|------|------|-------|");
            for kind in CodeKind::ALL {
                let code = stats.get(kind);
                println!("| {} | {} | {} |", kind, code.size_label(), code.lines);
            }
        }
    }

    Ok(())
}

fn run_verify(global: &GlobalOpts, args: &VerifyArgs) -> Result<()> {
    let mut reader = ArchiveReader::open(&args.archive)?;
    let failures = reader.verify_all();
    let manifest = reader.manifest();

    match global.format {
        OutputFormat::Json => print_json(&json!({
            "schema_version": SCHEMA_VERSION,
            "title": manifest.title,
            "bundle_version": manifest.bundle_version,
            "created_at": manifest.created_at,
            "files": manifest.files,
            "failures": failures,
        }))?,
        OutputFormat::Summary => {
            if failures.is_empty() {
                println!(
                    "verified {} files ({} bytes) in \"{}\"",
                    manifest.file_count(),
                    manifest.total_bytes(),
                    manifest.title
                );
            }
        }
        OutputFormat::Md => {
            println!("# {}", manifest.title);
            println!();
            for file in &manifest.files {
                let mark = if failures.contains(&file.path) { "FAIL" } else { "ok" };
                println!("- `{}` ({} bytes): {}", file.path, file.bytes, mark);
            }
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(CliError::VerificationFailed(failures))
    }
}

fn run_schemes(global: &GlobalOpts, args: &CatalogArgs) -> Result<()> {
    let schemes: Vec<ColorScheme> = if args.offline {
        StaticGenerator::new().color_schemes()?
    } else {
        remote_api(&resolve_config(global)?).color_schemes()?
    };

    match global.format {
        OutputFormat::Json => print_json(&json!({ "color_schemes": schemes }))?,
        OutputFormat::Summary => {
            for scheme in &schemes {
                println!("{:<10} {}", scheme.id, scheme.name);
            }
        }
        OutputFormat::Md => {
            for scheme in &schemes {
                println!("- `{}`: {}", scheme.id, scheme.name);
            }
        }
    }
    Ok(())
}

fn run_styles(global: &GlobalOpts, args: &CatalogArgs) -> Result<()> {
    let styles: Vec<DesignStyle> = if args.offline {
        StaticGenerator::new().styles()?
    } else {
        remote_api(&resolve_config(global)?).styles()?
    };

    match global.format {
        OutputFormat::Json => print_json(&json!({ "styles": styles }))?,
        OutputFormat::Summary => {
            for style in &styles {
                println!("{:<10} {}: {}", style.id, style.name, style.description);
            }
        }
        OutputFormat::Md => {
            for style in &styles {
                println!("- **{}** (`{}`): {}", style.name, style.id, style.description);
            }
        }
    }
    Ok(())
}

fn run_projects(global: &GlobalOpts, args: &ProjectsArgs) -> Result<()> {
    let resolved = resolve_config(global)?;
    let store = remote_api(&resolved);

    match &args.command {
        ProjectCommands::List => {
            let projects = store.list()?;
            match global.format {
                OutputFormat::Json => print_json(&json!({ "projects": projects }))?,
                _ => {
                    for project in &projects {
                        let id = project.id.as_ref().map(ProjectId::as_str).unwrap_or("-");
                        let created = project
                            .created_at
                            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                            .unwrap_or_default();
                        println!("{}  {:<16}  {}  {}", id, created, project.name, project.bundle.title);
                    }
                }
            }
        }
        ProjectCommands::Show { id, preview } => {
            let project = store.get(&parse_project_id(id)?)?;
            if *preview {
                let composer = PreviewComposer::new(resolved.config.composer.clone());
                println!("{}", composer.compose(project.bundle()));
            } else {
                match global.format {
                    OutputFormat::Json => print_json(&project)?,
                    _ => {
                        let stats = BundleStats::of(project.bundle());
                        println!("{} ({})", project.name, project.bundle.title);
                        println!("prompt: {}", project.prompt);
                        println!("style: {}  color scheme: {}", project.style, project.color_scheme);
                        println!("code: {} bytes", stats.total_bytes());
                    }
                }
            }
        }
        ProjectCommands::Save { input, name } => {
            let project = load_project(input, name)?;
            let id = store.save(&project)?;
            match global.format {
                OutputFormat::Json => print_json(&json!({ "id": id, "name": project.name }))?,
                _ => println!("saved project {} as {}", project.name, id),
            }
        }
        ProjectCommands::Update { id, input, name } => {
            let id = parse_project_id(id)?;
            let project = load_project(input, name)?;
            store.update(&id, &project)?;
            match global.format {
                OutputFormat::Json => print_json(&json!({ "id": id, "updated": true }))?,
                _ => println!("updated project {}", id),
            }
        }
        ProjectCommands::Delete { id } => {
            let id = parse_project_id(id)?;
            store.delete(&id)?;
            match global.format {
                OutputFormat::Json => print_json(&json!({ "id": id, "deleted": true }))?,
                _ => println!("deleted project {}", id),
            }
        }
    }

    Ok(())
}

fn run_config_show(global: &GlobalOpts) -> Result<()> {
    let resolved = resolve_config(global)?;
    let source = resolved
        .source
        .as_ref()
        .map(|p| p.display().to_string());

    match global.format {
        OutputFormat::Json => print_json(&json!({
            "schema_version": SCHEMA_VERSION,
            "source": source,
            "api_url_overridden": resolved.api_url_overridden,
            "config": resolved.config,
        }))?,
        OutputFormat::Summary => {
            println!(
                "config: source={} api_url={} timeout={}s escape={}",
                source.as_deref().unwrap_or("built-in defaults"),
                resolved.config.api_url,
                resolved.config.timeout_secs,
                resolved.config.composer.escape_mode
            );
        }
        OutputFormat::Md => {
            println!("# sitegen config");
            println!();
            match &source {
                Some(path) => println!("Source: {}", path),
                None => println!("Source: **built-in defaults** (no config.json found)"),
            }
            println!("API URL: {}", resolved.config.api_url);
            println!("Timeout: {}s", resolved.config.timeout_secs);
            println!("Escape mode: {}", resolved.config.composer.escape_mode);
            println!("Language: {}", resolved.config.composer.lang);
            println!("Download title: {}", resolved.config.composer.download_title);
        }
    }
    Ok(())
}
