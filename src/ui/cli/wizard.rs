use anyhow::{Context, Result};
use std::path::PathBuf;
use strum::{EnumMessage, IntoEnumIterator};

use crate::ui::cli::drivers::PromptDriver;
use crate::ui::types::choices::{PipelineParameters, PromptedChoice};
use crate::utils::paths::validate_path_str;

const DIM_ITALIC: &str = "\x1b[2m\x1b[3m";
const RESET: &str = "\x1b[0m";
const MENU_HELP: &str = "↑/↓ to navigate, ↵ to select";

fn kind_label<K>(k: K) -> String
where
    K: Copy + Into<&'static str> + EnumMessage,
{
    let label = k.get_message().unwrap_or_else(|| k.into());
    match k.get_detailed_message() {
        Some(desc) if !desc.is_empty() => format!("{label}  {DIM_ITALIC}{desc}{RESET}"),
        _ => label.to_string(),
    }
}

pub fn prompt_choice<C: PromptedChoice, D: PromptDriver>(driver: &D) -> Result<C> {
    let kinds: Vec<C::Kind> = C::Kind::iter().collect();
    let labels: Vec<String> = kinds.iter().map(|k| kind_label(*k)).collect();

    let picked = driver.ask_select(C::menu_title(), MENU_HELP, &labels)?;
    let kind = kinds
        .get(picked)
        .copied()
        .with_context(|| format!("no option {picked} in a menu of {}", kinds.len()))?;

    let mut params = C::default_params(kind);
    params.extend(C::ask_params(driver, kind)?);
    C::from_parts(kind, params)
}

fn prompt_path_until_ok<D: PromptDriver>(
    driver: &D,
    title: &str,
    help: &str,
    must_exist: bool,
) -> Result<PathBuf> {
    loop {
        let answer = driver.ask_string(title, help, "")?;
        match validate_path_str(&answer, must_exist, true) {
            Ok(()) => return Ok(PathBuf::from(answer.trim())),
            Err(msg) => {
                eprintln!("✗ {}", msg);
            }
        }
    }
}

/// Walks the user through every [`PipelineParameters`] field.
pub fn prompt_pipeline<D: PromptDriver>(driver: &D) -> Result<PipelineParameters> {
    let mut sources = vec![prompt_path_until_ok(
        driver,
        "Source file",
        "Existing text file to read line by line",
        true,
    )?];
    while driver.ask_bool("Add another source?", "Sources are read back to back", false)? {
        sources.push(prompt_path_until_ok(
            driver,
            "Source file",
            "Existing text file to read line by line",
            true,
        )?);
    }

    let destination = prompt_path_until_ok(
        driver,
        "Destination file",
        "Created if missing, truncated otherwise",
        false,
    )?;

    let transform = prompt_choice(driver)?;

    let max_records = if driver.ask_bool("Limit the number of lines?", "", false)? {
        Some(driver.ask_u64("Max lines", "Stop after this many lines", 1000, Some(1))?)
    } else {
        None
    };

    let atomic = driver.ask_bool(
        "Atomic write?",
        "Write to a temporary file and rename it on success",
        false,
    )?;

    let params = PipelineParameters {
        sources,
        destination,
        transform,
        max_records,
        atomic,
    };
    params.validate()?;
    Ok(params)
}
