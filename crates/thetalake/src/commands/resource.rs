//! Resource subcommand: one lifecycle operation per invocation.
//!
//! Records travel as JSON files. The stored record printed by `create`,
//! `update`, `read` and `import` is what the caller keeps for the next call.

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use thetalake_core::{Applied, Connector, Resource};

use crate::cli::{GlobalOpts, OutputFormat, ResourceAction, ResourceArgs, ResourceKind};
use crate::commands::util;
use crate::error::CliError;
use crate::output;

pub async fn handle(
    connector: &Connector,
    args: ResourceArgs,
    global: &GlobalOpts,
    format: OutputFormat,
) -> Result<(), CliError> {
    let action = args.action;
    match args.kind {
        ResourceKind::Case => run(&connector.cases(), action, global, format).await,
        ResourceKind::CaseRecord => run(&connector.case_records(), action, global, format).await,
        ResourceKind::User => run(&connector.users(), action, global, format).await,
        ResourceKind::DirectoryGroup => {
            run(&connector.directory_groups(), action, global, format).await
        }
        ResourceKind::RetentionPolicy => {
            run(&connector.retention_policies(), action, global, format).await
        }
        ResourceKind::LegalHold => run(&connector.legal_holds(), action, global, format).await,
        ResourceKind::Tag => run(&connector.tags(), action, global, format).await,
        ResourceKind::Export => run(&connector.exports(), action, global, format).await,
        ResourceKind::Record => run(&connector.records(), action, global, format).await,
        ResourceKind::IntegrationState => {
            run(&connector.integration_states(), action, global, format).await
        }
    }
}

async fn run<R>(
    resource: &R,
    action: ResourceAction,
    global: &GlobalOpts,
    format: OutputFormat,
) -> Result<(), CliError>
where
    R: Resource,
    R::Model: Serialize + DeserializeOwned,
{
    debug!(kind = resource.kind(), ?action, "running lifecycle operation");

    match action {
        ResourceAction::Create { file } => {
            let planned: R::Model = util::read_json(&file)?;
            let applied = resource.create(&planned).await?;
            emit_applied(&applied, global, format)
        }
        ResourceAction::Read { file } => {
            let prior: R::Model = util::read_json(&file)?;
            let current = resource.read(&prior).await?;
            emit(&current, global, format)
        }
        ResourceAction::Update { file, prior } => {
            let planned: R::Model = util::read_json(&file)?;
            let stored: R::Model = read_prior(&prior)?;
            let applied = resource.update(&planned, &stored).await?;
            emit_applied(&applied, global, format)
        }
        ResourceAction::Delete { file } => {
            let state: R::Model = util::read_json(&file)?;
            resource.delete(&state).await?;
            if !global.quiet {
                eprintln!("Deleted {}", resource.kind());
            }
            Ok(())
        }
        ResourceAction::Import { id } => {
            let seeded = resource.import(&id).await?;
            let current = resource.read(&seeded).await?;
            emit(&current, global, format)
        }
    }
}

fn read_prior<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    if path == Path::new("-") {
        return Err(CliError::Validation {
            field: "prior".into(),
            reason: "the stored record must come from a file, not stdin".into(),
        });
    }
    util::read_json(path)
}

fn emit<M: Serialize>(model: &M, global: &GlobalOpts, format: OutputFormat) -> Result<(), CliError> {
    let rendered = output::render(format, model)?;
    output::print_output(&rendered, global.quiet);
    Ok(())
}

fn emit_applied<M: Serialize>(
    applied: &Applied<M>,
    global: &GlobalOpts,
    format: OutputFormat,
) -> Result<(), CliError> {
    output::print_warnings(&applied.warnings, global.color);
    emit(&applied.model, global, format)
}
