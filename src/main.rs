//! ossify CLI binary entry point.
//! Parses arguments, wires settings and conventions together, and maps
//! outcomes to exit codes.

use clap::{CommandFactory, Parser};
use ossify::cli::{requested_convention, Cli, Commands, ConventionCmd, LicenseCmd};
use ossify::config::{Config, ConfigStore};
use ossify::error::{OssifyError, Result};
use ossify::models::{CheckResult, Convention, License};
use ossify::{conventions, licenses, output};
use rayon::prelude::*;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;
use tracing::warn;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config_dir = cli.config_dir.as_deref();
    let code = match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(0)
        }
        Commands::Check {
            name,
            convention,
            file,
            directory,
            all,
            output,
        } => run_check(
            config_dir,
            requested_convention(convention, name),
            file,
            &directory,
            all,
            output.as_deref().unwrap_or("human"),
        ),
        Commands::Convention { cmd } => run_convention(config_dir, cmd),
        Commands::License {
            cmd,
            id_arg,
            id,
            keyword,
            search,
            details,
        } => run_license(config_dir, cmd, id.or(id_arg), keyword, search, details),
    };
    match code {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("{} {}", output::error_prefix(), e);
            process::exit(2);
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("ossify=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ossify=warn"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn load_settings(config_dir: Option<&str>) -> Result<Config> {
    ConfigStore::discover(config_dir)?.load()
}

/// Every known convention. Unreadable settings degrade to the built-in set.
fn known_conventions(config_dir: Option<&str>) -> Vec<Convention> {
    match load_settings(config_dir).and_then(|cfg| conventions::load(&cfg)) {
        Ok(all) => all,
        Err(e) => {
            warn!(error = %e, "using built-in conventions only");
            conventions::builtins()
        }
    }
}

fn absolute_dir(directory: &str) -> Result<PathBuf> {
    let path = Path::new(directory);
    let abs = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| OssifyError::io("failed to resolve the current directory", e))?
            .join(path)
    };
    if !abs.is_dir() {
        return Err(OssifyError::config(format!(
            "{} is not a directory",
            abs.display()
        )));
    }
    Ok(abs)
}

fn run_check(
    config_dir: Option<&str>,
    name: Option<String>,
    file: Option<String>,
    directory: &str,
    all: bool,
    output: &str,
) -> Result<i32> {
    if output != "human" && output != "json" {
        return Err(OssifyError::config(format!(
            "unknown output mode '{}', expected human|json",
            output
        )));
    }
    let selectors = [name.is_some(), file.is_some(), all]
        .iter()
        .filter(|s| **s)
        .count();
    if selectors > 1 {
        return Err(OssifyError::config(
            "--file, --convention (or convention name argument), and --all are mutually exclusive",
        ));
    }
    let dir = absolute_dir(directory)?;

    let selected: Vec<Convention> = if let Some(file) = file {
        vec![conventions::load_from_file(Path::new(&file))?]
    } else if all {
        known_conventions(config_dir)
    } else if let Some(name) = name {
        let known = known_conventions(config_dir);
        match conventions::find_by_name(&known, &name) {
            Some(c) => vec![c.clone()],
            None => {
                output::print_not_found(&name, &known);
                return Ok(1);
            }
        }
    } else {
        println!("no convention specified\n");
        let mut cmd = Cli::command();
        if let Some(check) = cmd.find_subcommand_mut("check") {
            let _ = check.print_help();
        }
        return Ok(1);
    };

    let results: Vec<CheckResult> = selected.par_iter().map(|c| c.evaluate(&dir)).collect();
    output::print_checks(&results, output);
    Ok(if results.iter().any(|r| r.has_failures()) {
        1
    } else {
        0
    })
}

fn run_convention(config_dir: Option<&str>, cmd: ConventionCmd) -> Result<i32> {
    match cmd {
        ConventionCmd::List => {
            output::print_conventions(&known_conventions(config_dir));
            Ok(0)
        }
        ConventionCmd::Add { file, id } => {
            let data = match file {
                Some(f) => std::fs::read_to_string(&f)
                    .map_err(|e| OssifyError::io(format!("failed to read {}", f), e))?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .map_err(|e| OssifyError::io("failed to read stdin", e))?;
                    buf
                }
            };
            let convention: Convention = serde_json::from_str(&data)?;
            let cfg = load_settings(config_dir)?;
            if cfg.convention_path.is_empty() {
                return Err(OssifyError::config("invalid convention path"));
            }
            let target =
                conventions::add(Path::new(&cfg.convention_path), &convention, id.as_deref())?;
            println!("Added convention '{}' at {}", convention.name, target.display());
            Ok(0)
        }
    }
}

fn run_license(
    config_dir: Option<&str>,
    cmd: Option<LicenseCmd>,
    id: Option<String>,
    keywords: Vec<String>,
    search: Option<String>,
    details: bool,
) -> Result<i32> {
    let catalog = licenses::load()?;
    match cmd {
        Some(LicenseCmd::List) => {
            output::print_license_summaries(catalog.iter());
            return Ok(0);
        }
        Some(LicenseCmd::Add { template, id }) => {
            let cfg = load_settings(config_dir)?;
            if cfg.license_path.is_empty() {
                return Err(OssifyError::config("invalid license path"));
            }
            let target = licenses::add(Path::new(&cfg.license_path), &id, Path::new(&template))?;
            println!("Added license '{}' at {}", id, target.display());
            return Ok(0);
        }
        None => {}
    }

    if let Some(id) = id {
        let Some(license) = catalog.find_by_id(&id) else {
            eprintln!("{} license '{}' not found", output::error_prefix(), id);
            return Ok(1);
        };
        if details {
            output::print_license_details(license);
        } else {
            let cfg = load_settings(config_dir)?;
            println!("{}", licenses::license_text(license, Path::new(&cfg.license_path))?);
        }
        return Ok(0);
    }

    if let Some(term) = search {
        let found = catalog.search(&term);
        if found.is_empty() {
            eprintln!("{} no licenses match '{}'", output::note_prefix(), term);
            return Ok(1);
        }
        output::print_license_summaries(found);
        return Ok(0);
    }

    let keywords = if keywords.is_empty() {
        vec!["popular".to_string()]
    } else {
        keywords
    };
    let mut matched: Vec<&License> = Vec::new();
    for k in &keywords {
        for l in catalog.find_by_keyword(k) {
            if !matched.iter().any(|m| m.id == l.id) {
                matched.push(l);
            }
        }
    }
    if matched.is_empty() {
        eprintln!(
            "{} no licenses carry keyword(s) {}",
            output::note_prefix(),
            keywords.join(", ")
        );
        return Ok(1);
    }
    output::print_license_summaries(matched);
    Ok(0)
}
