use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use recode_core::{RecodeOptions, parse, recode_columns};

use crate::cli::{ApplyArgs, CheckArgs};
use crate::io::{read_csv, write_csv, write_label_maps};
use crate::listing::{describe_rules, rules_to_json};
use crate::types::ApplyResult;

pub fn run_apply(args: &ApplyArgs) -> Result<ApplyResult> {
    let span = info_span!("apply", input = %args.input.display());
    let _guard = span.enter();
    let start = Instant::now();

    let options = RecodeOptions::new()
        .with_suffix(args.suffix.as_str())
        .with_append(!args.replace)
        .with_write_labels(args.labels)
        .with_missing_display(args.missing_display.as_str());

    let df = read_csv(&args.input)?;
    info!(rows = df.height(), columns = df.width(), "loaded input");

    let columns: Vec<&str> = args.columns.iter().map(String::as_str).collect();
    let mut recoded = recode_columns(&df, &columns, &args.spec, &options)
        .with_context(|| format!("recode {}", args.input.display()))?;

    for column in &recoded.columns {
        if column.summary.unmatched > 0 {
            warn!(
                column = %column.summary.column,
                unmatched = column.summary.unmatched,
                "values matched no rule and were set to missing"
            );
        }
    }

    write_csv(&mut recoded.data, args.output.as_deref())?;
    if let Some(path) = &args.labels_json {
        write_label_maps(&recoded.columns, path)?;
    }
    info!(
        columns = recoded.columns.len(),
        duration_ms = start.elapsed().as_millis(),
        "recode complete"
    );

    Ok(ApplyResult {
        input: args.input.clone(),
        output: args.output.clone(),
        labels_json: args.labels_json.clone(),
        rows: recoded.data.height(),
        columns: recoded
            .columns
            .into_iter()
            .map(|column| column.summary)
            .collect(),
    })
}

pub fn run_check(args: &CheckArgs) -> Result<()> {
    let spec = parse(&args.spec).context("parse recode specification")?;
    if args.json {
        let rendered = serde_json::to_string_pretty(&rules_to_json(&spec))?;
        println!("{rendered}");
    } else {
        println!("{}", describe_rules(&spec));
    }
    Ok(())
}
