use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use typings_registry::config::RegistryConfig;
use typings_registry::logging;
use typings_registry::packages::{
    AllPackages, DependencyVersion, FileDataSource, PackageId, PackageMetadata, RegistryError,
    TypingsData,
};

#[derive(Parser)]
#[command(name = "typings-registry")]
#[command(version, about = "Query the typings package catalog")]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding definitions.json
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Directory holding notNeededPackages.json
    #[arg(long = "definitely-typed", global = true)]
    definitely_typed_dir: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List typings packages, including older versions
    List {
        /// Only the latest version of each package
        #[arg(long)]
        latest: bool,
    },
    /// List every package, not-needed stubs last
    All,
    /// Show the typings entry matching a name and version
    Show {
        name: String,
        #[arg(long, default_value = "*")]
        version: DependencyVersion,
    },
    /// Resolve a name and version to a tracked version
    Resolve {
        name: String,
        version: DependencyVersion,
    },
    /// List the dependencies of a package that have typings
    Deps {
        name: String,
        #[arg(long, default_value = "*")]
        version: DependencyVersion,
    },
    /// Show a not-needed stub package
    NotNeeded { name: String },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => RegistryConfig::from_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => RegistryConfig::default(),
    };
    if let Some(dir) = cli.data_dir.clone() {
        config.data_dir = Some(dir);
    }
    if let Some(dir) = cli.definitely_typed_dir.clone() {
        config.definitely_typed_dir = dir;
    }

    let level = if cli.verbose { "debug" } else { config.log_level.as_str() };
    logging::init(level, config.log_format);

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli.command, config))
}

async fn run(command: Command, config: RegistryConfig) -> anyhow::Result<()> {
    let source = FileDataSource::from_config(&config);

    let registry = AllPackages::read(&source, config.settings())
        .await
        .context("loading package catalog")?;

    match command {
        Command::List { latest } => {
            let typings = if latest {
                registry.all_latest_typings()?
            } else {
                registry.all_typings()?
            };
            for data in typings {
                println!("{}", data.desc());
            }
        }
        Command::All => {
            for pkg in registry.all_packages()? {
                let marker = if pkg.is_not_needed() { " (not needed)" } else { "" };
                println!("{}{}", pkg.desc(), marker);
            }
        }
        Command::Show { name, version } => {
            let data = registry.get_typings_data(&PackageId::new(name, version))?;
            print_typings(&registry, data);
        }
        Command::Resolve { name, version } => {
            println!("{}", registry.try_resolve(&PackageId::new(name, version))?);
        }
        Command::Deps { name, version } => {
            let data = registry.get_typings_data(&PackageId::new(name, version))?;
            for dep in registry.all_dependency_typings(data) {
                println!("{}", dep?.desc());
            }
        }
        Command::NotNeeded { name } => {
            let pkg = registry
                .get_not_needed_package(&name)
                .ok_or(RegistryError::NotNeededNotFound(name))?;
            println!("{} ({})", pkg.full_npm_name(registry.settings()), pkg.library_name());
            println!("  as of:  {}", pkg.version());
            println!("  source: {}", pkg.source_repo_url());
            println!("  {}", pkg.deprecated_message());
        }
    }

    Ok(())
}

fn print_typings(registry: &AllPackages, data: &TypingsData) {
    let settings = registry.settings();
    println!("{} ({})", data.full_npm_name(settings), data.library_name());
    println!("  version:    {}.{}", data.major(), data.minor());
    println!("  latest:     {}", data.is_latest());
    println!("  license:    {}", data.license());
    println!("  typescript: {}", data.min_typescript_version());
    println!("  directory:  {}", data.sub_directory_path());
    println!("  output:     {}", data.output_directory(settings).display());
    for dep in data.dependencies() {
        println!("  depends on: {}", dep);
    }
    for dep in data.test_dependencies() {
        println!("  tests with: {}", dep);
    }
}
