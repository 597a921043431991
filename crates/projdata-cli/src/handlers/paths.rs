//! Path lookup handlers.
//!
//! These never touch the filesystem. Each prints exactly one path (or the
//! whole layout for `paths`) so the output can be used in shell scripts.

use std::path::Path;

use anyhow::Result;

use projdata_core::{AppData, DataLayout, derive_identifier};

use crate::error::CliError;

/// Derive the identifier for `project`.
pub fn identifier(project: &Path) -> Result<String, CliError> {
    Ok(derive_identifier(project)?.into_string())
}

/// Render `{data dir}/{segments}`.
pub fn data_path(app: &AppData, segments: &[String]) -> Result<String, CliError> {
    Ok(app.data_path(segments)?.display().to_string())
}

/// Render `{projects dir}/{segments}`.
pub fn projects_path(app: &AppData, segments: &[String]) -> Result<String, CliError> {
    Ok(app.projects_path(segments)?.display().to_string())
}

pub fn bundled_file_path(app: &AppData, project: &Path, file: &str) -> Result<String, CliError> {
    Ok(app.bundled_file_path(project, file)?.display().to_string())
}

pub fn partitions_path(app: &AppData) -> Result<String, CliError> {
    Ok(app.partitions_path()?.display().to_string())
}

/// Render every resolved path, either as `key = value` lines or as JSON.
pub fn layout(app: &AppData, project: Option<&Path>, json: bool) -> Result<String, CliError> {
    let layout = DataLayout::resolve(app, project)?;
    if json {
        Ok(serde_json::to_string_pretty(&layout)?)
    } else {
        Ok(layout.to_string())
    }
}

/// Print a rendered value.
///
/// Shared by every lookup command so the output format stays uniform.
pub fn execute(rendered: Result<String, CliError>) -> Result<()> {
    println!("{}", rendered?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use projdata_core::AppDataConfig;
    use projdata_core::testing::StaticEnv;

    use super::*;

    fn manager(data: &Path) -> AppData {
        let config = AppDataConfig::new()
            .with_product_name("cli-test")
            .with_data_dir(data)
            .with_working_dir(data)
            .with_env_source(Arc::new(StaticEnv::new()));
        AppData::new(config).unwrap()
    }

    #[test]
    fn test_identifier_rejects_relative_path() {
        let err = identifier(Path::new("relative/dir")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_identifier_prefix_is_last_component() {
        let project = std::env::temp_dir().join("my-project");
        let id = identifier(&project).unwrap();
        assert!(id.starts_with("my-project-"));
    }

    #[test]
    fn test_data_path_is_under_development_channel() {
        let data = std::env::temp_dir().join("projdata-cli-paths");
        let app = manager(&data);
        let rendered = data_path(&app, &["cache".to_string()]).unwrap();
        let expected: PathBuf = [
            data.as_path(),
            Path::new("cli-test"),
            Path::new("app"),
            Path::new("development"),
            Path::new("cache"),
        ]
        .iter()
        .collect();
        assert_eq!(rendered, expected.display().to_string());
    }

    #[test]
    fn test_layout_json_includes_project() {
        let data = std::env::temp_dir().join("projdata-cli-layout");
        let app = manager(&data);
        let project = std::env::temp_dir().join("layout-project");
        let rendered = layout(&app, Some(&project), true).unwrap();
        let json: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(json["project"]["project_root"], project.display().to_string());
        assert_eq!(json["channel"], "development");
    }

    #[test]
    fn test_layout_text_is_key_value() {
        let data = std::env::temp_dir().join("projdata-cli-layout-text");
        let app = manager(&data);
        let rendered = layout(&app, None, false).unwrap();
        assert!(rendered.lines().all(|line| line.contains(" = ")));
    }
}
