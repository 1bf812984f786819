//! OpenAPI documentation definition.

use pgtune_core::input::{BackupMethod, Os, StorageKind, TuningInput, Workload};
use pgtune_core::settings::{SettingValue, SettingsTable, TuningResult, WarningList};
use pgtune_core::validate::{FieldIssue, ValidationError};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::handle_health,
        crate::handlers::handle_tune,
    ),
    components(schemas(
        TuningResult,
        SettingsTable,
        SettingValue,
        WarningList,
        ValidationError,
        FieldIssue,
        TuningInput,
        Os,
        StorageKind,
        Workload,
        BackupMethod,
    )),
    info(
        title = "pgtune API",
        version = "1.0",
        description = "PostgreSQL configuration advisor: recommended settings from hardware and workload"
    )
)]
pub(crate) struct ApiDoc;
