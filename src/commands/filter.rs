//! Domain filter command

use crate::cli::FilterArgs;
use crate::config::Settings;
use crate::dns::backend_from_settings;
use crate::filter::{DomainFilter, MatchCriteria};
use crate::output::{print_filter_summary, print_json};
use tracing::debug;

/// Run the domain filter from `args.input` into `args.output`
pub async fn run_filter(args: &FilterArgs, settings: &Settings) -> anyhow::Result<()> {
    let mut filter_settings = settings.filter.clone();
    args.apply(&mut filter_settings);
    filter_settings.validate()?;

    let criteria = MatchCriteria::from(&filter_settings);
    debug!(
        "Criteria: A prefix {:?}, nameservers [{}], backend {:?}, parallel {}",
        criteria.a_record_prefix(),
        criteria
            .patterns()
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", "),
        filter_settings.backend,
        filter_settings.parallel
    );

    let lookup = backend_from_settings(&filter_settings)?;
    let filter = DomainFilter::new(lookup, criteria).with_parallel(filter_settings.parallel);

    let run = filter.run_files(&args.input, &args.output).await?;

    if args.json {
        print_json(&run.reports)?;
    } else {
        print_filter_summary(&run.summary, &args.output);
    }

    Ok(())
}
