//! Data subcommand: read-only lookups.

use clap::ValueEnum;

use thetalake_core::Connector;

use crate::cli::{DataArgs, DataSource, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    connector: &Connector,
    args: DataArgs,
    global: &GlobalOpts,
    format: OutputFormat,
) -> Result<(), CliError> {
    let data = connector.data();
    let source = args.source;
    let id = || {
        args.id.as_deref().ok_or_else(|| CliError::Validation {
            field: "id".into(),
            reason: format!("data source '{}' needs an id", source_name(source)),
        })
    };

    let rendered = match source {
        DataSource::AuditLogs => output::render(format, &data.audit_logs().await?)?,
        DataSource::Events => output::render(format, &data.events().await?)?,
        DataSource::AnalysisPolicies => output::render(format, &data.analysis_policies().await?)?,
        DataSource::PolicyHits => output::render(format, &data.policy_hits().await?)?,
        DataSource::SystemStatus => output::render(format, &data.system_status().await?)?,
        DataSource::Analysis => output::render(format, &data.analysis(id()?).await?)?,
        DataSource::Case => output::render(format, &data.case(id()?).await?)?,
        DataSource::User => output::render(format, &data.user(id()?).await?)?,
        DataSource::DirectoryGroup => output::render(format, &data.directory_group(id()?).await?)?,
        DataSource::RetentionPolicy => {
            output::render(format, &data.retention_policy(id()?).await?)?
        }
        DataSource::LegalHold => output::render(format, &data.legal_hold(id()?).await?)?,
        DataSource::Tag => output::render(format, &data.tag(id()?).await?)?,
        DataSource::Export => output::render(format, &data.export(id()?).await?)?,
        DataSource::Record => output::render(format, &data.record(id()?).await?)?,
        DataSource::IntegrationState => {
            output::render(format, &data.integration_state(id()?).await?)?
        }
    };

    output::print_output(&rendered, global.quiet);
    Ok(())
}

fn source_name(source: DataSource) -> String {
    source
        .to_possible_value()
        .map_or_else(|| format!("{source:?}"), |v| v.get_name().to_owned())
}
