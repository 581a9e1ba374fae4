use anyhow::{Result, bail};
use std::path::Path;

/// Batch script run inside the OSGeo4W shell.
pub const INSTALL_SCRIPT_TEMPLATE: &str = include_str!("../../templates/pip-install.bat");

/// Package list handed to pip when no other file is configured.
pub const BUNDLED_REQUIREMENTS: &str = include_str!("../../templates/requirements.txt");

const FILE_PATH_PLACEHOLDER: &str = "{{ file_path }}";

/// Substitute the requirements path into `template`.
///
/// Lines are terminated with CRLF since the result is run by `cmd.exe`.
pub fn render(template: &str, file_path: &Path) -> Result<String> {
    if !template.contains(FILE_PATH_PLACEHOLDER) {
        bail!("Template has no {} placeholder", FILE_PATH_PLACEHOLDER);
    }

    let rendered = template.replace(FILE_PATH_PLACEHOLDER, &file_path.display().to_string());
    Ok(rendered.lines().map(|line| format!("{}\r\n", line)).collect())
}

/// Render the bundled install script for the given requirements file.
pub fn render_install_script(requirements: &Path) -> Result<String> {
    render(INSTALL_SCRIPT_TEMPLATE, requirements)
}
