use anyhow::{Result, bail};
use chrono::{Timelike, Utc};
use pacer_docket::pacer::{central_time, within_running_hours};
use tracing::info;

use crate::cli::HoursArgs;

pub fn run(args: HoursArgs) -> Result<()> {
    if args.start > 24 || args.end > 24 {
        bail!("running hours must be within 0..=24, got {}..{}", args.start, args.end);
    }

    let now = central_time(Utc::now());
    if !within_running_hours(now.hour(), args.start, args.end) {
        bail!(
            "outside running hours ({}:00 to {}:00 US/Central), central time is {}",
            args.start,
            args.end,
            now.format("%H:%M")
        );
    }

    info!(central_time = %now.format("%H:%M"), "within running hours");
    Ok(())
}
