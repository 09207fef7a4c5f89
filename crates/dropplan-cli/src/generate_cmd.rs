use std::io::{Read, Write};

use anyhow::Context;

use dropplan_core::text::render;
use dropplan_core::{PlanGenerator, PlanText, parse_plan_text};

use crate::config::DropplanConfig;

/// Read a plan description from `path`, or from stdin when `path` is `-`.
pub fn read_description(path: &str) -> anyhow::Result<PlanText> {
    let content = if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read plan description from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read plan description: {path}"))?
    };

    parse_plan_text(&content).with_context(|| format!("invalid plan description: {path}"))
}

/// Generate the next drops for every session in `path` and write them out.
pub fn run_generate(path: &str, config: &DropplanConfig, output: Option<&str>) -> anyhow::Result<()> {
    let description = read_description(path)?;
    tracing::debug!(
        path,
        sessions = description.sessions.len(),
        drops = config.drops,
        "parsed plan description"
    );

    let generator = PlanGenerator::new(config.generator);
    let plan = generator
        .generate(config.drops, &description.sessions)
        .context("plan generation failed")?;

    let rendered = render(&plan, config.format).context("failed to render plan")?;

    let mut writer: Box<dyn Write> = if let Some(path) = output {
        Box::new(
            std::fs::File::create(path)
                .with_context(|| format!("cannot create output file: {path}"))?,
        )
    } else {
        Box::new(std::io::stdout().lock())
    };
    writer.write_all(rendered.as_bytes())?;
    writer.flush()?;

    eprintln!(
        "Generated {} drops for {} sessions",
        plan.rows.len(),
        plan.sessions.len()
    );
    if let Some(path) = output {
        eprintln!("Plan written to {path}");
    }

    Ok(())
}
