use std::env;

use anyhow::{Result, bail};
use tracing_subscriber::EnvFilter;

use pullstream::ui::cli::drivers::InquireDriver;
use pullstream::ui::cli::{execute, prompt_pipeline};
use pullstream::ui::types::choices::PipelineParameters;

const USAGE: &str = "usage: pullstream [CONFIG.json | --schema]\n\n\
    With no argument an interactive wizard asks for the pipeline settings.";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let params = match args.as_slice() {
        [] => prompt_pipeline(&InquireDriver)?,
        [flag] if flag == "--schema" => {
            println!("{}", serde_json::to_string_pretty(&PipelineParameters::schema())?);
            return Ok(());
        }
        [flag] if flag == "-h" || flag == "--help" => {
            println!("{USAGE}");
            return Ok(());
        }
        [path] => PipelineParameters::from_json_file(path)?,
        _ => bail!("{USAGE}"),
    };

    let summary = execute(&params, None)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
