use crate::{
    metrics::{self, derive_metrics, DerivedMetrics},
    models::{ProfileKind, ProfileRecord, ResolvedProfile},
    Error, Result,
};
use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Markdown,
    Text,
}

impl ExportFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(ExportFormat::Json),
            "md" | "markdown" => Some(ExportFormat::Markdown),
            "txt" | "text" => Some(ExportFormat::Text),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Markdown => "md",
            ExportFormat::Text => "txt",
        }
    }
}

/// Everything worth keeping about one evaluated profile
#[derive(Debug, Clone)]
pub struct ProfileReport {
    pub record: ProfileRecord,
    pub kind: ProfileKind,
    pub metrics: DerivedMetrics,
    pub generated_at: DateTime<Utc>,
}

impl ProfileReport {
    pub fn new(profile: &ResolvedProfile) -> Self {
        Self::at(profile, Utc::now())
    }

    pub fn at(profile: &ResolvedProfile, generated_at: DateTime<Utc>) -> Self {
        Self {
            record: profile.record.clone(),
            kind: profile.kind,
            metrics: derive_metrics(&profile.record),
            generated_at,
        }
    }

    fn visible_followers(&self) -> Option<u64> {
        self.kind.shows_followers().then(|| self.record.followers())
    }
}

// Organizations are serialized without a follower count
impl Serialize for ProfileReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut record = self.record.clone();
        if !self.kind.shows_followers() {
            record.followers = None;
        }

        let mut state = serializer.serialize_struct("ProfileReport", 4)?;
        state.serialize_field("record", &record)?;
        state.serialize_field("kind", &self.kind)?;
        state.serialize_field("metrics", &self.metrics)?;
        state.serialize_field("generated_at", &self.generated_at)?;
        state.end()
    }
}

/// Exporter for evaluated profiles
pub struct Exporter;

impl Exporter {
    /// Export a report to a file, picking the format from the extension
    pub fn export_to_file<P: AsRef<Path>>(report: &ProfileReport, path: P, separator: char) -> Result<()> {
        let path = path.as_ref();

        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(ExportFormat::from_extension)
            .ok_or_else(|| {
                Error::ExportError(
                    "Could not determine export format from extension. Use .json, .md, or .txt"
                        .to_string(),
                )
            })?;

        Self::export_to_file_with_format(report, path, format, separator)
    }

    /// Export a report to a file with explicit format
    pub fn export_to_file_with_format<P: AsRef<Path>>(
        report: &ProfileReport,
        path: P,
        format: ExportFormat,
        separator: char,
    ) -> Result<()> {
        let content = match format {
            ExportFormat::Json => Self::to_json(report)?,
            ExportFormat::Markdown => Self::to_markdown(report, separator),
            ExportFormat::Text => Self::to_text(report, separator),
        };

        let mut file = File::create(path)
            .map_err(|e| Error::ExportError(format!("Failed to create file: {}", e)))?;

        file.write_all(content.as_bytes())
            .map_err(|e| Error::ExportError(format!("Failed to write file: {}", e)))?;

        Ok(())
    }

    pub fn to_json(report: &ProfileReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    pub fn to_markdown(report: &ProfileReport, separator: char) -> String {
        let record = &report.record;
        let mut output = String::new();

        match &record.html_url {
            Some(url) => output.push_str(&format!("# [{}]({})\n\n", record.login, url)),
            None => output.push_str(&format!("# {}\n\n", record.login)),
        }

        output.push_str(&format!("![avatar]({})\n\n", record.avatar_url));
        output.push_str(&format!("**Kind:** {}  \n", report.kind));
        output.push_str(&format!("**Name:** {}\n\n", record.display_name()));

        output.push_str("| Metric | Value |\n");
        output.push_str("|--------|-------|\n");
        output.push_str(&format!("| Public repos | {} |\n", record.repos()));
        if let Some(followers) = report.visible_followers() {
            output.push_str(&format!("| Followers | {} |\n", followers));
        }
        output.push_str(&format!("| Public gists | {} |\n", record.gists()));
        output.push_str(&format!(
            "| Score | {} |\n",
            metrics::format_score(report.metrics.score)
        ));
        output.push_str(&format!(
            "| Valuation | {} |\n\n",
            metrics::format_valuation(report.metrics.valuation, separator)
        ));

        output.push_str(&format!(
            "*Generated {}*\n",
            report.generated_at.format("%Y-%m-%d %H:%M UTC")
        ));

        output
    }

    pub fn to_text(report: &ProfileReport, separator: char) -> String {
        let record = &report.record;
        let mut lines = vec![
            format!("{} ({})", record.login, report.kind),
            format!("Name:      {}", record.display_name()),
            format!("Avatar:    {}", record.avatar_url),
            format!("Repos:     {}", record.repos()),
        ];

        if let Some(followers) = report.visible_followers() {
            lines.push(format!("Followers: {}", followers));
        }

        lines.push(format!("Gists:     {}", record.gists()));
        lines.push(format!(
            "Score:     {}",
            metrics::format_score(report.metrics.score)
        ));
        lines.push(format!(
            "Valuation: {}",
            metrics::format_valuation(report.metrics.valuation, separator)
        ));

        let mut output = lines.join("\n");
        output.push('\n');
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn report(kind: ProfileKind) -> ProfileReport {
        let profile = ResolvedProfile {
            record: ProfileRecord {
                login: "octocat".to_string(),
                name: Some("The Octocat".to_string()),
                avatar_url: "https://avatars.githubusercontent.com/u/583231".to_string(),
                html_url: Some("https://github.com/octocat".to_string()),
                public_repos: Some(10),
                followers: Some(5),
                public_gists: Some(2),
            },
            kind,
        };
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        ProfileReport::at(&profile, at)
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ExportFormat::from_extension("JSON"), Some(ExportFormat::Json));
        assert_eq!(ExportFormat::from_extension("markdown"), Some(ExportFormat::Markdown));
        assert_eq!(ExportFormat::from_extension("txt"), Some(ExportFormat::Text));
        assert_eq!(ExportFormat::from_extension("png"), None);
    }

    #[test]
    fn test_json_contains_metrics() {
        let json = Exporter::to_json(&report(ProfileKind::User)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["record"]["login"], "octocat");
        assert_eq!(value["kind"], "User");
        assert_eq!(value["metrics"]["score"], 35.0);
        assert_eq!(value["metrics"]["valuation"], 10600);
    }

    #[test]
    fn test_markdown_hides_followers_for_orgs() {
        let user = Exporter::to_markdown(&report(ProfileKind::User), ',');
        let org = Exporter::to_markdown(&report(ProfileKind::Organization), ',');

        assert!(user.contains("| Followers | 5 |"));
        assert!(!org.contains("Followers"));
        assert!(org.contains("| Valuation | $10,600 |"));
        assert!(org.contains("Generated 2024-01-15 12:00 UTC"));
    }

    #[test]
    fn test_json_hides_followers_for_orgs() {
        let mut org = report(ProfileKind::Organization);
        org.record.followers = Some(30000);

        let json = Exporter::to_json(&org).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(!json.contains("30000"));
        assert!(value["record"]["followers"].is_null());
        assert_eq!(value["kind"], "Organization");
        assert_eq!(value["record"]["public_repos"], 10);
        // The report keeps the raw count for the metrics
        assert_eq!(org.record.followers, Some(30000));

        let user = Exporter::to_json(&report(ProfileKind::User)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&user).unwrap();
        assert_eq!(value["record"]["followers"], 5);
    }

    #[test]
    fn test_text_report() {
        let text = Exporter::to_text(&report(ProfileKind::User), ',');
        assert!(text.starts_with("octocat (User)\n"));
        assert!(text.contains("Score:     35.0"));
        assert!(text.contains("Valuation: $10,600"));
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let result = Exporter::export_to_file(
            &report(ProfileKind::User),
            dir.path().join("profile.png"),
            ',',
        );
        assert!(matches!(result, Err(Error::ExportError(_))));
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.md");

        Exporter::export_to_file(&report(ProfileKind::User), &path, ',').unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# [octocat](https://github.com/octocat)"));
    }
}
