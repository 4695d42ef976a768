use std::collections::BTreeMap;
use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::cli::{GodlsAction, GodlsArgs};
use crate::util::{parse_key_value, write_json_output};

pub fn run(args: GodlsArgs) -> Result<()> {
    let codec = args.schema.codec()?;

    match args.action {
        GodlsAction::Decode { raw } => {
            let Some(decoded) = codec.decode(&raw) else {
                bail!(
                    "no {}() call with {} arguments found in input",
                    codec.schema().call_name(),
                    codec.schema().arity()
                );
            };
            info!(action_doc_id = decoded.action_doc_id(), "decoded call");
            write_json_output(None, &decoded)
        }
        GodlsAction::Encode { args, overrides } => {
            let base = collect_pairs(&args, "--arg")?;
            let overrides = collect_pairs(&overrides, "--override")?;
            let encoded = codec.encode(&base, &overrides)?;

            let mut output = io::stdout().lock();
            writeln!(output, "{encoded}").context("failed to write encoded call")?;
            Ok(())
        }
    }
}

fn collect_pairs(raw: &[String], flag: &str) -> Result<BTreeMap<String, String>> {
    let mut pairs = BTreeMap::new();
    for entry in raw {
        let Some((key, value)) = parse_key_value(entry) else {
            bail!("{flag} expects KEY=VALUE, got '{entry}'");
        };
        pairs.insert(key, value);
    }
    Ok(pairs)
}
