//! pload - prompt loader CLI
//!
//! Loads a prompt from a local file or the hub and prints it.

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use tracing::info;

use promptloader::cli::{Cli, Command, OutputFormat};
use promptloader::config::LoaderConfig;
use promptloader::loading::Loader;
use promptloader::prompts::Prompt;

fn setup_logging(verbose: bool) {
    // stdout carries the prompt, so logs go to stderr
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let config = LoaderConfig::load(cli.config.as_ref()).context("Failed to load configuration")?;

    match cli.command {
        Command::Load {
            identifier,
            format,
            hub_url,
            max_depth,
        } => {
            let config = LoaderConfig {
                hub_url: hub_url.unwrap_or(config.hub_url),
                max_depth: max_depth.unwrap_or(config.max_depth),
                ..config
            };
            cmd_load(config, &identifier, format)
        }
        Command::Config => cmd_config(&config),
    }
}

/// Load a prompt and print it
fn cmd_load(config: LoaderConfig, identifier: &str, format: OutputFormat) -> Result<()> {
    config.validate().context("Invalid loader configuration")?;
    let loader = Loader::new(config);

    let prompt = loader
        .load_prompt(identifier)
        .with_context(|| format!("Failed to load prompt {}", identifier))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&prompt)?),
        OutputFormat::Text => print_prompt(&prompt, 0),
    }
    Ok(())
}

/// Print the effective configuration as YAML
fn cmd_config(config: &LoaderConfig) -> Result<()> {
    print!("{}", serde_yaml::to_string(config)?);
    Ok(())
}

fn print_prompt(prompt: &Prompt, indent: usize) {
    let pad = " ".repeat(indent);
    println!("{}{} {}", pad, "Type:".bold(), prompt.prompt_type());
    println!(
        "{}{} {}",
        pad,
        "Input variables:".bold(),
        prompt.input_variables().join(", ")
    );
    if let Some(parser) = prompt.output_parser() {
        println!("{}{} {}", pad, "Output parser:".bold(), parser.parser_type());
    }

    match prompt {
        Prompt::Simple(p) => {
            println!("{}{}", pad, "Template:".bold());
            print_block(&p.template, indent + 2);
        }
        Prompt::FewShot(p) => {
            if !p.prefix.is_empty() {
                println!("{}{}", pad, "Prefix:".bold());
                print_block(&p.prefix, indent + 2);
            }
            println!("{}{} {}", pad, "Examples:".bold(), p.examples.len());
            println!("{}{}", pad, "Example prompt:".bold());
            print_prompt(&p.example_prompt, indent + 2);
            println!("{}{}", pad, "Suffix:".bold());
            print_block(&p.suffix, indent + 2);
        }
    }
}

fn print_block(text: &str, indent: usize) {
    let pad = " ".repeat(indent);
    for line in text.lines() {
        println!("{}{}", pad, line.dimmed());
    }
}
