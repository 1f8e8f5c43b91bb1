//! Report rendering for the resolved observation catalog.

use crate::resolve::ObsCatalog;
use anyhow::Result;

/// Output format for the resolve report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Yaml,
    Json,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(ReportFormat::Text),
            "yaml" | "yml" => Some(ReportFormat::Yaml),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

/// Render the catalog in the requested format.
pub fn render(catalog: &ObsCatalog, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(render_text(catalog)),
        ReportFormat::Yaml => Ok(serde_yaml::to_string(catalog)?),
        ReportFormat::Json => Ok(serde_json::to_string_pretty(catalog)?),
    }
}

/// Format the catalog as a human-readable listing, one variable per line.
fn render_text(catalog: &ObsCatalog) -> String {
    let mut out = String::new();

    out.push_str(&format!("# Resolved observations ({})\n", catalog.len()));
    for (var, obs) in catalog {
        out.push_str(&format!(
            "{}: {} (dataset {}, obs variable {})\n",
            var,
            obs.obs_file.display(),
            obs.obs_name,
            obs.obs_var
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::ResolvedObs;
    use std::path::PathBuf;

    fn sample_catalog() -> ObsCatalog {
        let mut catalog = ObsCatalog::new();
        catalog.insert(
            "TS".to_string(),
            ResolvedObs {
                obs_file: PathBuf::from("/obs/TS.nc"),
                obs_name: "TS.nc".to_string(),
                obs_var: "TS".to_string(),
            },
        );
        catalog
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!(ReportFormat::from_str("text"), Some(ReportFormat::Text));
        assert_eq!(ReportFormat::from_str("YAML"), Some(ReportFormat::Yaml));
        assert_eq!(ReportFormat::from_str("yml"), Some(ReportFormat::Yaml));
        assert_eq!(ReportFormat::from_str("json"), Some(ReportFormat::Json));
        assert_eq!(ReportFormat::from_str("toml"), None);
    }

    #[test]
    fn test_render_text() {
        let text = render(&sample_catalog(), ReportFormat::Text).unwrap();
        assert!(text.starts_with("# Resolved observations (1)"));
        assert!(text.contains("TS: /obs/TS.nc"));
        assert!(text.contains("dataset TS.nc"));
    }

    #[test]
    fn test_render_text_empty() {
        let text = render(&ObsCatalog::new(), ReportFormat::Text).unwrap();
        assert_eq!(text, "# Resolved observations (0)\n");
    }

    #[test]
    fn test_render_json_preserves_fields() {
        let json = render(&sample_catalog(), ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["TS"]["obs_file"], "/obs/TS.nc");
        assert_eq!(value["TS"]["obs_name"], "TS.nc");
        assert_eq!(value["TS"]["obs_var"], "TS");
    }

    #[test]
    fn test_render_yaml_parses_back() {
        let yaml = render(&sample_catalog(), ReportFormat::Yaml).unwrap();
        let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(value["TS"]["obs_var"], "TS");
    }
}
