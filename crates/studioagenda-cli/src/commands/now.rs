//! Organization clock command.

use chrono::{DateTime, Utc};

use studioagenda_core::{DateTimeFormatOptions, TimezoneNormalizer};

use crate::config::AppConfig;
use crate::error::CliResult;

/// Print the organization's current civil date and time.
pub fn run(instant: Option<DateTime<Utc>>, config: &AppConfig) -> CliResult<()> {
    let normalizer = TimezoneNormalizer::from_settings(&config.organization);
    let instant = instant.unwrap_or_else(Utc::now);
    println!(
        "{}",
        render(&normalizer, instant, config.organization.date_time_options())
    );
    Ok(())
}

/// Renders `<date> <time> (<zone>)`.
pub fn render(
    normalizer: &TimezoneNormalizer,
    instant: DateTime<Utc>,
    options: DateTimeFormatOptions,
) -> String {
    format!(
        "{} ({})",
        normalizer.format_civil_date_time(instant, options),
        normalizer.timezone_name()
    )
}
