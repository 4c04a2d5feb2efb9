use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use ago_core::documents::Document;
use ago_core::{BatchReport, DocumentId, Engine};
use anyhow::Context;

pub fn list_documents(engine: &Engine, out: &mut impl Write) -> anyhow::Result<ExitCode> {
    for document in engine.documents().iter() {
        writeln!(out, "{}: {}", document.id, document.name)?;
    }
    Ok(ExitCode::SUCCESS)
}

fn report_batch(action: &str, report: &BatchReport<Document>) -> ExitCode {
    for (item, e) in &report.failed {
        tracing::error!("failed to {action} {item}: {e}");
    }
    if report.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

pub fn add_documents(
    engine: &mut Engine,
    paths: &[PathBuf],
    out: &mut impl Write,
) -> anyhow::Result<ExitCode> {
    let report = engine
        .add_documents(paths)
        .context("failed to save documents")?;
    for document in &report.succeeded {
        writeln!(out, "added {}: {}", document.id, document.name)?;
    }
    Ok(report_batch("add doc", &report))
}

pub fn remove_documents(
    engine: &mut Engine,
    ids: &[String],
    out: &mut impl Write,
) -> anyhow::Result<ExitCode> {
    let mut parsed: Vec<DocumentId> = Vec::with_capacity(ids.len());
    let mut bad_arguments = false;
    for arg in ids {
        match arg.parse() {
            Ok(id) => parsed.push(id),
            Err(_) => {
                tracing::error!("argument must be a doc id, got {arg:?}");
                bad_arguments = true;
            }
        }
    }

    let report = engine
        .remove_documents(&parsed)
        .context("failed to save document list")?;
    for document in &report.succeeded {
        writeln!(out, "removed {}: {}", document.id, document.name)?;
    }

    let code = report_batch("remove doc", &report);
    Ok(if bad_arguments { ExitCode::FAILURE } else { code })
}
