use anyhow::{Result, bail};
use pacer_docket::pacer::{PAGES, pacer_url};

use crate::cli::UrlArgs;

pub fn run(args: UrlArgs) -> Result<()> {
    let court = args.court.trim().to_lowercase();
    let Some(url) = pacer_url(&court, &args.page) else {
        bail!(
            "unknown page '{}', expected one of: {}",
            args.page,
            PAGES.join(", ")
        );
    };
    println!("{url}");
    Ok(())
}
