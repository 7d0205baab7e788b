//! Built-in catalog shipped with the editor

use crate::fields::{FieldSchemas, FieldSpec};
use crate::routing::WorkflowRoutes;

/// Workflow used when no route matches
pub const DEFAULT_WORKFLOW_ID: &str = "7456751735379034153";

/// Workflow execution endpoint
pub const DEFAULT_WORKFLOW_URL: &str = "https://api.coze.cn/v1/workflow/run";

/// File upload endpoint
pub const DEFAULT_UPLOAD_URL: &str = "https://api.coze.cn/v1/files/upload";

/// Error code the service returns while under maintenance
pub const MAINTENANCE_ERROR_CODE: i64 = 720_702_069;

pub(crate) fn workflow_routes() -> WorkflowRoutes {
    WorkflowRoutes::new(DEFAULT_WORKFLOW_ID)
        .with_scenario("marketing-header", DEFAULT_WORKFLOW_ID)
        .with_scenario("poster", DEFAULT_WORKFLOW_ID)
        .with_scenario("banner", DEFAULT_WORKFLOW_ID)
        .with_scenario("activity-floor", DEFAULT_WORKFLOW_ID)
        .with_scenario("ppt-cover", DEFAULT_WORKFLOW_ID)
        .with_scenario("battle-report", DEFAULT_WORKFLOW_ID)
        .with_template("marketing-1", DEFAULT_WORKFLOW_ID)
        .with_template("marketing-2", DEFAULT_WORKFLOW_ID)
        .with_template("marketing-3", DEFAULT_WORKFLOW_ID)
        .with_template("banner-2", "7505972589878525964")
        .with_template("poster-promotion-1", "7506032012164972584")
        .with_template("marketing-4", "7458978395117453353")
}

pub(crate) fn field_schemas() -> FieldSchemas {
    let product = |id: &str, label: &str| FieldSpec::file(id, label, "Upload a transparent product image");

    FieldSchemas::new(vec![
        FieldSpec::text("prompt", "Description", "Describe the campaign"),
        product("toop1", "Product 1"),
        product("toop2", "Product 2"),
        product("toop3", "Product 3"),
        product("toop4", "Product 4"),
        FieldSpec::file("logo1", "Logo", "Upload a logo"),
    ])
    .with_template(
        "marketing-2",
        vec![
            FieldSpec::text("prompt", "Prompt", "Promotion copy, e.g. May Day sale, 50% off"),
            FieldSpec::file("toop1", "Background", "Upload a background image"),
            FieldSpec::file("logo1", "Logo", "Upload the brand logo"),
        ],
    )
    .with_template(
        "marketing-1",
        vec![
            FieldSpec::text("prompt", "Prompt", "Seasonal theme, e.g. cool summer"),
            FieldSpec::file("toop1", "Main image", "Upload the theme image"),
            FieldSpec::file("toop2", "Secondary image", "Upload a supporting image"),
        ],
    )
    .with_template(
        "marketing-3",
        vec![
            FieldSpec::text("prompt", "Prompt", "Festival name and greeting"),
            FieldSpec::file("toop1", "Festival image", "Upload a festival image"),
            FieldSpec::file("toop2", "Product image", "Upload a product image"),
        ],
    )
    .with_template(
        "poster-promotion-1",
        vec![
            FieldSpec::text("input", "Description", "Describe the theme"),
            FieldSpec::file("logo", "QR code", "Upload a QR code image"),
        ],
    )
    .with_template(
        "marketing-4",
        vec![
            FieldSpec::file("tup", "Main image", "Upload the main image"),
            FieldSpec::text("prompt", "Copy", "Enter the copy"),
            FieldSpec::file("logo", "Logo", "Upload the logo image"),
        ],
    )
    .with_template(
        "banner-2",
        vec![
            FieldSpec::text("input", "Description", "Describe the campaign"),
            product("a", "Product 1"),
            product("b", "Product 2"),
            product("c", "Product 3"),
        ],
    )
    .with_scenario_default("marketing-header", "marketing-2")
    .with_scenario_default("poster", "poster-promotion-1")
}
