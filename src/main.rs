use anyhow::{Context, Result};
use jenkinsfile_convert::cli::commands::{CheckCommand, ConvertCommand};
use jenkinsfile_convert::cli::output::*;
use jenkinsfile_convert::cli::{load_config, Cli, Command};
use jenkinsfile_convert::codegen::response::ATTENTION;
use jenkinsfile_convert::codegen::{render_with, ConversionResponse, ErrorResponse};
use jenkinsfile_convert::core::RenderConfig;
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    let config = load_config(cli.config.as_deref())?;

    match &cli.command {
        Command::Convert(cmd) => convert(cmd, config)?,
        Command::Check(cmd) => check(cmd)?,
    }

    Ok(())
}

fn convert(cmd: &ConvertCommand, mut config: RenderConfig) -> Result<()> {
    if let Some(job_groups) = cmd.job_groups {
        config.job_groups = job_groups;
    }

    let model = match cmd.source.load() {
        Ok(model) => model,
        Err(e) => {
            if cmd.json {
                println!("{}", serde_json::to_string_pretty(&ErrorResponse::new(&e))?);
            } else {
                eprintln!("{} Conversion failed:", CROSS);
                eprintln!("  {}", style(&e).red());
            }
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let rendered = render_with(&model, &config).context("Failed to render workflow")?;
    for diagnostic in &rendered.diagnostics {
        eprintln!("{}", format_diagnostic(diagnostic));
    }

    if let Some(output) = &cmd.output {
        std::fs::write(output, &rendered.yaml)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        eprintln!("{} Wrote {}", CHECK, style(output.display()).bold());
    }

    if cmd.json {
        let response = ConversionResponse::from_rendered(&rendered);
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else if cmd.output.is_none() {
        print!("{}", rendered.yaml);
    }

    if rendered.has_issues() {
        eprintln!("{} {}", WARN, style(ATTENTION).yellow());
        if cmd.strict {
            std::process::exit(2);
        }
    } else {
        eprintln!("{} Converted {}", CHECK, style("without issues").green());
    }

    Ok(())
}

fn check(cmd: &CheckCommand) -> Result<()> {
    match cmd.source.load() {
        Ok(model) => {
            if cmd.json {
                println!("{}", serde_json::to_string_pretty(&model)?);
            } else {
                println!("{} Jenkinsfile parsed successfully!", CHECK);
                for line in format_pipeline_summary(&model) {
                    println!("{}", line);
                }
            }
            Ok(())
        }
        Err(e) => {
            if cmd.json {
                println!("{}", serde_json::to_string_pretty(&ErrorResponse::new(&e))?);
            } else {
                println!("{} Parsing failed:", CROSS);
                println!("  {}", style(&e).red());
            }
            std::process::exit(1);
        }
    }
}
