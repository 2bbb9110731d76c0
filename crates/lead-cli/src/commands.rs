use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, info_span};

use lead_cli::pipeline::process_workbook_file;
use lead_cli::server::{ServeConfig, megabytes, serve};
use lead_output::output_filename_today;

use crate::cli::{ProcessArgs, ServeArgs};
use crate::summary::rules_table;
use crate::types::ProcessResult;

pub fn run_rules() -> Result<()> {
    println!("{}", rules_table());
    Ok(())
}

pub fn run_process(args: &ProcessArgs) -> Result<ProcessResult> {
    let input = &args.input;
    let span = info_span!("process", input = %input.display());
    let _guard = span.enter();

    let processed = process_workbook_file(input)
        .with_context(|| format!("process {}", input.display()))?;

    let output = if args.dry_run {
        info!("dry run, skipping write");
        None
    } else {
        let path = output_path(args);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create {}", parent.display()))?;
        }
        std::fs::write(&path, &processed.bytes)
            .with_context(|| format!("write {}", path.display()))?;
        info!(output = %path.display(), "workbook written");
        Some(path)
    };
    Ok(ProcessResult {
        input: input.clone(),
        output,
        report: processed.report,
    })
}

pub fn run_serve(args: &ServeArgs) -> Result<()> {
    let config = ServeConfig {
        bind: args.bind,
        upload_dir: args.upload_dir.clone(),
        max_upload_bytes: megabytes(args.max_upload_mb),
    };
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("start async runtime")?;
    runtime
        .block_on(serve(&config))
        .with_context(|| format!("serve on {}", args.bind))
}

/// Destination for `process`: `--output`, else `lead SW <today>.xlsx` in
/// `--output-dir` or the input's directory.
fn output_path(args: &ProcessArgs) -> PathBuf {
    if let Some(path) = &args.output {
        return path.clone();
    }
    let dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| input_dir(&args.input));
    dir.join(output_filename_today())
}

fn input_dir(input: &Path) -> PathBuf {
    match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
