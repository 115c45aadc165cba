//! Render a jersey sheet to a PNG or PDF file from the command line.
//!
//! # Usage
//!
//! ```bash
//! otomono-cli export --pattern chevron --primary "#1e40af" --out chevron.png
//! otomono-cli export --pattern wave --view back --out wave.pdf
//! ```
//!
//! The output format follows the file extension.

use std::path::Path;

use otomono_core::{JerseyDesign, Pattern, Rgb, ViewSide};
use otomono_render::{render_sheet, sheet_pdf, sheet_png};

use super::CliError;

/// Arguments for the export command, already parsed by clap.
#[derive(Debug)]
pub struct ExportArgs {
    pub pattern: String,
    pub primary: String,
    pub secondary: String,
    pub view: String,
    pub player_name: Option<String>,
    pub player_number: Option<String>,
    pub team_name: Option<String>,
}

impl ExportArgs {
    /// Build a design from the arguments, applying the same lettering
    /// normalization as the designer form.
    fn into_design(self) -> Result<JerseyDesign, CliError> {
        let mut design = JerseyDesign {
            pattern: self.pattern.parse::<Pattern>()?,
            primary_color: Rgb::parse(&self.primary)?,
            secondary_color: Rgb::parse(&self.secondary)?,
            view: self.view.parse::<ViewSide>().map_err(CliError::InvalidArg)?,
            ..JerseyDesign::default()
        };
        if let Some(name) = &self.player_name {
            design.set_player_name(name);
        }
        if let Some(number) = &self.player_number {
            design.set_player_number(number);
        }
        if let Some(team) = &self.team_name {
            design.set_team_name(team);
        }
        Ok(design)
    }
}

/// Render a sheet and write it to `out`, encoding by extension.
pub fn run(args: ExportArgs, out: &Path) -> Result<(), CliError> {
    let design = args.into_design()?;
    let sheet = render_sheet(&design);

    let extension = out
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let bytes = match extension.as_deref() {
        Some("png") => sheet_png(&sheet)?,
        Some("pdf") => sheet_pdf(&sheet, "Otomono Jersey")?,
        _ => {
            return Err(CliError::InvalidArg(format!(
                "output file must end in .png or .pdf, got {}",
                out.display()
            )));
        }
    };

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(out, &bytes)?;
    tracing::info!(
        path = %out.display(),
        bytes = bytes.len(),
        pattern = %design.pattern,
        view = %design.view,
        "sheet exported"
    );
    Ok(())
}
