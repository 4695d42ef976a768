use std::fs;

use anyhow::{Context, Result, bail};
use chrono::Local;
use pacer_docket::chunk::parse_query_date;
use pacer_docket::{DatePair, QueryConfig, RangeChunker};
use tracing::info;

use crate::cli::SplitQueryArgs;
use crate::util::write_json_output;

pub fn run(args: SplitQueryArgs) -> Result<()> {
    let raw = fs::read(&args.config)
        .with_context(|| format!("failed to read {}", args.config.display()))?;
    let config: QueryConfig = serde_json::from_slice(&raw)
        .with_context(|| format!("failed to parse query config {}", args.config.display()))?;

    let pairs = args
        .date_pairs
        .iter()
        .map(|raw| parse_date_pair(raw))
        .collect::<Result<Vec<_>>>()?;

    let today = match args.today.as_deref() {
        Some(raw) => {
            parse_query_date(raw).with_context(|| format!("invalid --today date: {raw}"))?
        }
        None => Local::now().date_naive(),
    };

    let chunker = RangeChunker::new(args.max_gap_days, args.chunk_size_days)?;
    let configs = chunker
        .split_with_today(&config, &pairs, today)
        .with_context(|| format!("failed to split {}", args.config.display()))?;

    write_json_output(args.output.as_deref(), &configs)?;

    info!(
        source = %args.config.display(),
        pairs = pairs.len(),
        max_gap_days = chunker.max_gap_days(),
        chunk_size_days = chunker.chunk_size_days(),
        %today,
        configs = configs.len(),
        "query config split"
    );

    Ok(())
}

pub fn parse_date_pair(raw: &str) -> Result<DatePair> {
    let Some((from_field, to_field)) = raw.split_once(':') else {
        bail!("date pair must look like FROM_FIELD:TO_FIELD, got '{raw}'");
    };
    let (from_field, to_field) = (from_field.trim(), to_field.trim());
    if from_field.is_empty() || to_field.is_empty() {
        bail!("date pair has an empty field name: '{raw}'");
    }
    Ok(DatePair::new(from_field, to_field))
}
