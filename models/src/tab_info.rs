//! One open project tab.

use serde::{Deserialize, Serialize};

const PROJECT_EXTENSIONS: [&str; 2] = [".rpp", ".RPP"];

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TabInfo {
    /// Project length in seconds.
    pub length_seconds: f32,
    /// File name without the project extension.
    pub name: String,
    pub index: u32,
}

impl TabInfo {
    /// Build a tab from the raw file name the DAW reports.
    pub fn from_file_name(length_seconds: f32, file_name: &str, index: u32) -> Self {
        Self {
            length_seconds,
            name: strip_project_extension(file_name).to_string(),
            index,
        }
    }
}

/// Strip a trailing `.rpp` / `.RPP`.
///
/// A bare extension (`".rpp"`) is left alone so a tab never ends up nameless.
pub fn strip_project_extension(file_name: &str) -> &str {
    PROJECT_EXTENSIONS
        .iter()
        .find_map(|ext| file_name.strip_suffix(ext))
        .filter(|stem| !stem.is_empty())
        .unwrap_or(file_name)
}
