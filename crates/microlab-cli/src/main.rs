//! Microlab CLI - Component generation for Microlab dashboards

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use microlab_core::templates::artifacts_for;
use microlab_core::tui::GenerateArgs;
use microlab_core::{ComponentType, TemplateSource};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "microlab")]
#[command(about = "Generate Microlab dashboard components and API routes in a Next.js project")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a component (the default when no subcommand is given)
    Create(CliCreateArgs),
    /// List component types and the templates they use
    List(ListArgs),
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    /// Component type: state, deviation, stats, toggle, chart or dashtable
    #[arg(short = 't', long = "type")]
    pub component_type: Option<String>,

    /// Component config file (JSON or YAML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Root of the Next.js project to generate into
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Local directory to use for templates instead of the built-in ones
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Update package.json without running the package manager
    #[arg(long = "skip-install")]
    pub skip_install: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliCreateArgs> for GenerateArgs {
    fn from(args: CliCreateArgs) -> Self {
        GenerateArgs {
            component_type: args.component_type,
            config: args.config,
            directory: args.directory,
            template_dir: args.template_dir,
            skip_install: args.skip_install,
            yes: args.yes,
        }
    }
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Check templates in this directory instead of the built-in ones
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,
}

async fn list(args: ListArgs) -> Result<()> {
    let source = TemplateSource::resolve(args.template_dir);

    println!("{}", format!("Component types ({})", source.describe()).cyan().bold());
    println!();

    for component_type in ComponentType::ALL {
        println!("  {} {}", component_type.id().bold(), component_type.description().dimmed());
        for (kind, template) in artifacts_for(component_type) {
            let status = match source.read(template).await {
                Ok(_) => "ok".green(),
                Err(_) => "missing".red(),
            };
            println!("    {} {:<10} {} ({})", "->".blue(), kind.key(), template, status);
        }
    }

    Ok(())
}

async fn create(args: GenerateArgs) -> Result<()> {
    let result = microlab_core::run(args).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}

#[tokio::main]
async fn main() {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();

    let result = match args.command {
        Some(Command::Create(create_args)) => create(create_args.into()).await,
        Some(Command::List(list_args)) => list(list_args).await,
        // No subcommand provided, default to create behavior (interactive mode)
        None => create(GenerateArgs::default()).await,
    };

    if let Err(e) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), e);
        let mut causes = e.chain().skip(1).peekable();
        if causes.peek().is_some() {
            eprintln!("{}", "Caused by:".dimmed());
            for cause in causes {
                eprintln!("  {}", cause);
            }
        }
        std::process::exit(1);
    }
}
