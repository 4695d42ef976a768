use std::fs;

use anyhow::{Context, Result, bail};
use pacer_docket::pacer::{has_no_docket, member_list_span};
use pacer_docket::{DocketEntry, DocketExtractor, DocketTable, ExtractOptions, WantedSelection};
use regex::Regex;
use tracing::{info, warn};

use crate::cli::ExtractArgs;
use crate::model::{ExtractCounts, ExtractRunManifest};
use crate::util::{now_utc_string, read_source, write_json_output, write_json_pretty};

pub fn run(args: ExtractArgs) -> Result<()> {
    let (page, source_sha256) = read_source(&args.html)?;
    let wanted = load_wanted(&args)?;
    let text_filter = args
        .text_filter
        .as_deref()
        .map(Regex::new)
        .transpose()
        .context("failed to compile --text-filter regex")?;
    let codec = args.schema.codec()?;

    info!(
        source = %args.html.display(),
        wanted_lines = wanted.len(),
        include_attachments = args.include_attachments,
        "starting docket extraction"
    );

    let no_docket = has_no_docket(&page);
    let mut table_rows = 0;
    let mut extracted = Vec::new();

    if no_docket {
        warn!(source = %args.html.display(), "page reports no docket entries");
    } else {
        let html = match member_list_span(&page) {
            Some((start, end)) => {
                info!(start, end, "ignoring member cases block");
                format!("{}{}", &page[..start], &page[end..])
            }
            None => page,
        };
        let table = DocketTable::from_html(&html, args.table_selector.as_deref())
            .with_context(|| format!("failed to load docket table from {}", args.html.display()))?;
        table_rows = table.rows.len();

        let is_wanted_text = |text: &str| text_filter.as_ref().is_none_or(|re| re.is_match(text));
        let options = ExtractOptions {
            include_attachments: args.include_attachments,
            filter_fn: text_filter
                .is_some()
                .then_some(&is_wanted_text as &dyn Fn(&str) -> bool),
            wanted: wanted.clone(),
        };

        let extractor = DocketExtractor::new(codec.clone());
        let entries = extractor.extract(&table, &options);
        let before = entries.len();
        extracted = entries
            .into_iter()
            .filter(|entry| options.admits_text(&entry.docket_text))
            .collect();
        if extracted.len() < before {
            info!(
                dropped = before - extracted.len(),
                "entries rejected by text filter"
            );
        }
    }

    write_json_output(args.output.as_deref(), &extracted)?;

    let counts = count_entries(table_rows, &extracted);
    info!(
        rows = counts.table_rows,
        entries = counts.entries_returned,
        attachments = counts.attachments,
        "docket extraction completed"
    );

    if let Some(manifest_path) = args.manifest.as_deref() {
        let manifest = ExtractRunManifest {
            manifest_version: 1,
            generated_at: now_utc_string(),
            source_path: args.html.display().to_string(),
            source_sha256,
            no_docket,
            include_attachments: args.include_attachments,
            wanted_lines: wanted.lines().map(ToOwned::to_owned).collect(),
            text_filter: args.text_filter.clone(),
            godls_call_name: codec.schema().call_name().to_string(),
            godls_arity: codec.schema().arity(),
            counts,
        };
        write_json_pretty(manifest_path, &manifest)?;
        info!(path = %manifest_path.display(), "wrote extract run manifest");
    }

    Ok(())
}

fn load_wanted(args: &ExtractArgs) -> Result<WantedSelection> {
    let mut wanted = match args.wanted_json.as_deref() {
        Some(path) => {
            let raw =
                fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_slice(&raw)
                .with_context(|| format!("failed to parse wanted selection {}", path.display()))?
        }
        None => WantedSelection::new(),
    };

    for raw in &args.wants {
        let (line_no, sub_ids) = parse_want(raw)?;
        for sub_id in sub_ids {
            wanted.insert(line_no.clone(), sub_id);
        }
    }

    Ok(wanted)
}

pub fn parse_want(raw: &str) -> Result<(String, Vec<String>)> {
    let Some((line_no, sub_ids)) = raw.split_once(':') else {
        bail!("wanted entry must look like LINE:ID[,ID...], got '{raw}'");
    };
    let line_no = line_no.trim();
    if line_no.is_empty() {
        bail!("wanted entry has no line number: '{raw}'");
    }

    let sub_ids: Vec<String> = sub_ids
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(ToOwned::to_owned)
        .collect();
    if sub_ids.is_empty() {
        bail!("wanted entry for line {line_no} lists no documents");
    }

    Ok((line_no.to_string(), sub_ids))
}

fn count_entries(table_rows: usize, entries: &[DocketEntry]) -> ExtractCounts {
    let line_documents = entries.iter().filter(|e| e.is_line_document()).count();
    let attachments = entries.iter().map(|e| e.attachments.len()).sum();
    let decoded_links = entries
        .iter()
        .flat_map(|e| e.line_doc.iter().chain(e.attachments.iter()))
        .filter(|link| link.go_dls.is_some())
        .count();

    ExtractCounts {
        table_rows,
        entries_returned: entries.len(),
        line_documents,
        attachments,
        decoded_links,
    }
}
