//! Jersey designer route handlers.
//!
//! The designer page, the live cut-sheet preview, design saves, and the
//! PNG/PDF export downloads. Preview and export share one rendering path
//! so the downloaded file always matches what the customer saw.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Json,
    extract::{Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use otomono_core::{
    COLOR_TEMPLATES, ColorTemplate, JerseyDesign, Pattern, Rgb, ViewSide,
};
use otomono_orders::AnalyticsEvent;
use otomono_render::{render_sheet, sheet_pdf, sheet_png};

use crate::error::{AppError, Result};
use crate::filters;
use crate::state::AppState;

/// Design parameters as they arrive in a query string or form.
///
/// Every field is optional; anything missing falls back to the stock
/// design so a bare `/preview.png` still renders.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignParams {
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub text_color: Option<String>,
    pub pattern: Option<String>,
    pub player_name: Option<String>,
    pub player_number: Option<String>,
    pub team_name: Option<String>,
    pub view: Option<String>,
}

impl DesignParams {
    /// Resolve the raw parameters into a validated design.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Design`] for malformed colors or an unknown
    /// pattern, and [`AppError::BadRequest`] for a bad view side.
    pub fn into_design(self) -> Result<JerseyDesign> {
        let mut design = JerseyDesign::default();
        if let Some(color) = self.primary_color.as_deref() {
            design.primary_color = Rgb::parse(color)?;
        }
        if let Some(color) = self.secondary_color.as_deref() {
            design.secondary_color = Rgb::parse(color)?;
        }
        if let Some(color) = self.text_color.as_deref() {
            design.text_color = Rgb::parse(color)?;
        }
        if let Some(pattern) = self.pattern.as_deref() {
            design.pattern = pattern.parse::<Pattern>()?;
        }
        if let Some(view) = self.view.as_deref() {
            design.view = view.parse::<ViewSide>().map_err(AppError::BadRequest)?;
        }
        if let Some(name) = self.player_name.as_deref() {
            design.set_player_name(name);
        }
        if let Some(number) = self.player_number.as_deref() {
            design.set_player_number(number);
        }
        if let Some(team) = self.team_name.as_deref() {
            design.set_team_name(team);
        }
        Ok(design)
    }
}

/// Jersey designer page template.
#[derive(Template, WebTemplate)]
#[template(path = "designer.html")]
pub struct DesignerTemplate {
    /// The design currently reflected in the form controls.
    pub design: JerseyDesign,
    /// All pattern recipes for the palette.
    pub patterns: Vec<PatternView>,
    /// Stock color templates.
    pub templates: Vec<ColorTemplate>,
    /// Formatted unit price, e.g. `$25.00`.
    pub unit_price: String,
}

/// Pattern display data for the palette.
pub struct PatternView {
    pub id: &'static str,
    pub name: &'static str,
    pub selected: bool,
}

/// Display the jersey designer.
#[instrument(skip(state))]
pub async fn designer_page(
    State(state): State<AppState>,
    Query(params): Query<DesignParams>,
) -> Result<DesignerTemplate> {
    let design = params.into_design()?;
    let patterns = Pattern::ALL
        .into_iter()
        .map(|p| PatternView {
            id: p.id(),
            name: p.display_name(),
            selected: p == design.pattern,
        })
        .collect();

    Ok(DesignerTemplate {
        patterns,
        templates: COLOR_TEMPLATES.to_vec(),
        unit_price: state.config().unit_price.to_string(),
        design,
    })
}

/// Render the live preview for the current design parameters.
///
/// GET /preview.png
#[instrument]
pub async fn preview_png(Query(params): Query<DesignParams>) -> Result<impl IntoResponse> {
    let design = params.into_design()?;
    let png = sheet_png(&render_sheet(&design))?;
    Ok(([(header::CONTENT_TYPE, "image/png")], png))
}

/// Download the design as a PNG file.
///
/// GET /export/png
#[instrument(skip(state))]
pub async fn export_png(
    State(state): State<AppState>,
    Query(params): Query<DesignParams>,
) -> Result<impl IntoResponse> {
    let design = params.into_design()?;
    let png = sheet_png(&render_sheet(&design))?;
    state.analytics().track(
        AnalyticsEvent::new("design_exported")
            .with_properties(serde_json::json!({ "format": "png", "pattern": design.pattern })),
    );
    Ok((
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (
                header::CONTENT_DISPOSITION,
                attachment_header(&design, "png"),
            ),
        ],
        png,
    ))
}

/// Download the design as a single-page PDF.
///
/// GET /export/pdf
#[instrument(skip(state))]
pub async fn export_pdf(
    State(state): State<AppState>,
    Query(params): Query<DesignParams>,
) -> Result<impl IntoResponse> {
    let design = params.into_design()?;
    let pdf = sheet_pdf(&render_sheet(&design), "Otomono Jersey Design")?;
    state.analytics().track(
        AnalyticsEvent::new("design_exported")
            .with_properties(serde_json::json!({ "format": "pdf", "pattern": design.pattern })),
    );
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                attachment_header(&design, "pdf"),
            ),
        ],
        pdf,
    ))
}

fn attachment_header(design: &JerseyDesign, extension: &str) -> String {
    format!(
        "attachment; filename=\"jersey-{}-{}.{extension}\"",
        design.pattern, design.view
    )
}

/// Response for a design save.
#[derive(Debug, Serialize)]
pub struct SaveDesignResponse {
    pub success: bool,
    pub design_id: String,
}

/// Save a design to the document store.
///
/// POST /designs
#[instrument(skip(state, design))]
pub async fn save_design(
    State(state): State<AppState>,
    Json(design): Json<JerseyDesign>,
) -> Result<impl IntoResponse> {
    let design_id = uuid::Uuid::new_v4().to_string();
    let document = serde_json::json!({
        "designId": design_id,
        "savedAt": chrono::Utc::now(),
        "design": design,
    });
    state
        .designs()
        .put_document(&design_id, &document)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    state.analytics().track(
        AnalyticsEvent::new("design_saved")
            .with_properties(serde_json::json!({ "pattern": design.pattern })),
    );
    tracing::info!(design_id = %design_id, pattern = %design.pattern, "design saved");

    Ok((
        StatusCode::CREATED,
        Json(SaveDesignResponse {
            success: true,
            design_id,
        }),
    ))
}
