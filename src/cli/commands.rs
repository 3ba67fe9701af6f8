use crate::config::{load_config, resolve_config_path, GeneratorConfig};
use crate::generator::{
    error_groups, generate, plan_handlers, policy_rows, FileSystemSink, MemorySink,
    TemplateRegistry,
};
use crate::logging::{init_logging, LogConfig};
use crate::spec::{load_graph, RouteGraph};
use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Command-line interface for routegen
///
/// Generates Go handlers, authorization interfaces, the denial error catalog
/// and the access policy table from a route graph.
#[derive(Parser)]
#[command(name = "routegen")]
#[command(about = "Route graph code generator", long_about = None)]
#[command(version)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command that resolves a configuration.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Path to the route graph (YAML or JSON)
    #[arg(short, long)]
    pub spec: PathBuf,

    /// Path to routegen.toml
    /// If not provided, will auto-detect alongside the route graph
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// File naming format, e.g. gozero, go_zero, goZero
    #[arg(long)]
    pub style: Option<String>,

    /// Module path prefixed to generated imports
    #[arg(long)]
    pub root_package: Option<String>,

    /// Skip authorization interfaces, the error catalog and the policy table
    #[arg(long, default_value_t = false)]
    pub no_auth: bool,

    /// Directory whose templates override the built-in ones
    #[arg(long, env = "ROUTEGEN_HOME")]
    pub home: Option<PathBuf>,
}

/// Available CLI commands for routegen
#[derive(Subcommand)]
pub enum Commands {
    /// Generate handlers and authorization artifacts from a route graph
    Generate {
        #[command(flatten)]
        config: ConfigArgs,

        /// Output root for generated files
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Perform a dry run: list what would be written without touching disk
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Print derived handlers, subjects, error codes and policy rows
    Inspect {
        #[command(flatten)]
        config: ConfigArgs,
    },
}

impl ConfigArgs {
    /// Merge the configuration file (explicit or auto-detected) with flag overrides.
    ///
    /// A relative `template_dir` from the file is resolved against the file's
    /// directory.
    pub fn resolve(&self) -> anyhow::Result<GeneratorConfig> {
        let config_path = resolve_config_path(self.config.as_deref(), &self.spec);
        let mut cfg = match &config_path {
            Some(path) => match load_config(path)? {
                Some(mut cfg) => {
                    tracing::debug!(path = %path.display(), "loaded configuration");
                    if let (Some(dir), Some(base)) = (&cfg.template_dir, path.parent()) {
                        if dir.is_relative() {
                            cfg.template_dir = Some(base.join(dir));
                        }
                    }
                    cfg
                }
                None => bail!("Config file not found: {}", path.display()),
            },
            None => GeneratorConfig::default(),
        };

        if let Some(style) = &self.style {
            cfg.naming_format = style.clone();
        }
        if let Some(root) = &self.root_package {
            cfg.root_package = root.clone();
        }
        if self.no_auth {
            cfg.auth = false;
        }
        if let Some(home) = &self.home {
            cfg.template_dir = Some(home.clone());
        }

        cfg.validate().context("Invalid generator configuration")?;
        Ok(cfg)
    }

    fn load(&self) -> anyhow::Result<(RouteGraph, GeneratorConfig)> {
        let graph = load_graph(&self.spec)?;
        let cfg = self.resolve()?;
        Ok((graph, cfg))
    }
}

/// Parse arguments, initialize logging and run the selected command.
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&LogConfig::from_env())?;
    run(&cli)
}

/// Run an already parsed command.
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Generate {
            config,
            output,
            dry_run,
        } => {
            let (graph, cfg) = config.load()?;
            let registry = TemplateRegistry::load(cfg.template_dir.as_deref())
                .context("Failed to load templates")?;
            if *dry_run {
                let mut sink = MemorySink::new();
                let report = generate(&graph, &cfg, &registry, &mut sink)
                    .context("Generation failed")?;
                for path in &report.paths {
                    println!("would write {}", output.join(path).display());
                }
                println!("🔍 Dry run: {} files, nothing written", report.total());
            } else {
                let mut sink = FileSystemSink::new(output);
                let report = generate(&graph, &cfg, &registry, &mut sink)
                    .with_context(|| format!("Generation into {} failed", output.display()))?;
                println!(
                    "✅ Generated {} handlers, {} auth interfaces in {}",
                    report.handlers,
                    report.auth_interfaces,
                    output.display()
                );
            }
            Ok(())
        }
        Commands::Inspect { config } => {
            let (graph, cfg) = config.load()?;
            inspect(&graph, &cfg, &config.spec)
        }
    }
}

fn inspect(graph: &RouteGraph, cfg: &GeneratorConfig, spec: &Path) -> anyhow::Result<()> {
    let naming = cfg.naming()?;
    println!(
        "📄 {} ({} groups, {} routes)",
        spec.display(),
        graph.groups.len(),
        graph.route_count()
    );

    println!("\nHandlers:");
    for plan in plan_handlers(graph, cfg, &naming)? {
        println!("  {:<24} {}", plan.data.handler_name, plan.path().display());
    }

    if !cfg.auth {
        println!("\nAuthorization generation disabled");
        return Ok(());
    }

    println!("\nError codes:");
    for group in error_groups(graph, cfg)? {
        println!("  {} ({}::*)", group.subject, group.policy_key);
        for entry in &group.entries {
            println!("    {} {}", entry.code, entry.name);
        }
    }

    println!("\nPolicy:");
    for row in policy_rows(graph, cfg)? {
        println!("  {row}");
    }
    Ok(())
}
