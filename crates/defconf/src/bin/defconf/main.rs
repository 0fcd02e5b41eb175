mod cli;

use anyhow::Context;
use defconf::parser::Resolution;
use defconf::Document;
use std::io::Write;

fn main() {
    use clap::Parser;
    let cli = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_env("DEFCONF_LOG"))
        .with_writer(std::io::stderr)
        .init();

    let command_result = match cli.command {
        cli::Command::Convert(convert_cli) => convert(convert_cli),
        cli::Command::Dev(dev_cli) => dev(dev_cli),
    };

    if let Err(e) = command_result {
        for error in e.chain() {
            eprintln!("Error: {error}")
        }
        std::process::exit(1);
    }
}

pub fn convert(cli: cli::ConvertCommand) -> anyhow::Result<()> {
    let source = load(&cli.input)?;

    let resolution = if cli.deferred {
        Resolution::Deferred
    } else {
        Resolution::Eager
    };
    let document = defconf::Parser::with_resolution(resolution).parse(&source)?;
    if document.is_empty() {
        tracing::warn!("no declarations found");
    }

    output(&cli.output, &document)?;

    if let Some(path) = &cli.output.output_file {
        eprintln!("Configuration written to {}", path.display());
    }
    Ok(())
}

fn load(input: &cli::InputArgs) -> anyhow::Result<String> {
    let Some(path) = &input.file else {
        return Ok(std::io::read_to_string(std::io::stdin())?);
    };

    tracing::info!(path=%path.display(), "loading file");
    std::fs::read_to_string(path).with_context(|| format!("Unable to read {}", path.display()))
}

fn output(output: &cli::OutputArgs, document: &Document) -> anyhow::Result<()> {
    let mut writer: Box<dyn Write> = match &output.output_file {
        Some(path) => Box::new(std::io::BufWriter::new(std::fs::File::create(path)?)),
        None => Box::new(std::io::stdout().lock()),
    };

    match output.format {
        cli::OutputFormat::Yaml => serde_yaml::to_writer(&mut writer, document)?,
        cli::OutputFormat::Json => {
            let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
            let mut ser = serde_json::Serializer::with_formatter(&mut writer, formatter);
            serde::Serialize::serialize(document, &mut ser)?;
            writeln!(writer)?;
        }
    };

    writer.flush()?;
    Ok(())
}

/// (defconf-)developer utilities
///
/// A quick way to expose internal structures for debugging purposes
pub fn dev(cli: cli::DevCommand) -> anyhow::Result<()> {
    use cli::DevSubCommand::*;

    let source = load(&cli.input)?;

    match cli.command {
        Blocks => {
            let cleaned = defconf::comments::strip_comments(&source)?;
            for block in defconf::blocks::tokenize_blocks(&cleaned) {
                println!("{:#?}", defconf::blocks::Declaration::from_block(block?)?);
            }
        }
        Constants => {
            let (_, constants) =
                defconf::Parser::with_resolution(Resolution::Deferred).parse_declarations(&source)?;
            println!("{constants:#?}");
        }
    }

    Ok(())
}
