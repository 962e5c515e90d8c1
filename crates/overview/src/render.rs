use std::fmt::Write as _;

use serde::Serialize;

/// Serialized snapshot of a project's text files, ready to paste into a
/// model prompt
#[derive(Debug, Clone, Serialize)]
pub struct ProjectOverview {
    pub root: String,
    pub files: Vec<OverviewFile>,
}

/// One file in the overview, path relative to the root
#[derive(Debug, Clone, Serialize)]
pub struct OverviewFile {
    pub path: String,
    pub content: String,
}

/// Output format for the overview document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverviewFormat {
    #[default]
    Yaml,
    Xml,
}

impl OverviewFormat {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Xml => "xml",
        }
    }

    /// Extension for generated overview files; the scanner recognizes
    /// these and keeps them out of later overviews
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Yaml => "alk.yaml",
            Self::Xml => "alk.xml",
        }
    }

    /// Default output file name for this format
    #[must_use]
    pub fn default_file_name(self) -> String {
        format!("project_overview.{}", self.extension())
    }
}

impl ProjectOverview {
    /// Render the overview in the requested format
    pub fn render(&self, format: OverviewFormat) -> anyhow::Result<String> {
        match format {
            OverviewFormat::Yaml => Ok(serde_yaml::to_string(self)?),
            OverviewFormat::Xml => Ok(self.to_xml()),
        }
    }

    fn to_xml(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "<overview root=\"{}\">", escape_xml(&self.root));
        for file in &self.files {
            let _ = writeln!(out, "  <file path=\"{}\">", escape_xml(&file.path));
            let _ = writeln!(out, "{}", escape_xml(&file.content));
            let _ = writeln!(out, "  </file>");
        }
        out.push_str("</overview>\n");
        out
    }
}

fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> ProjectOverview {
        ProjectOverview {
            root: "demo".to_string(),
            files: vec![OverviewFile {
                path: "src/a.rs".to_string(),
                content: "fn a() -> bool { 1 < 2 }".to_string(),
            }],
        }
    }

    #[test]
    fn yaml_round_trips_through_serde() {
        let rendered = sample().render(OverviewFormat::Yaml).unwrap();
        let value: serde_yaml::Value = serde_yaml::from_str(&rendered).unwrap();
        assert_eq!(value["files"][0]["path"], "src/a.rs");
    }

    #[test]
    fn xml_escapes_content() {
        let rendered = sample().render(OverviewFormat::Xml).unwrap();
        assert!(rendered.contains("fn a() -&gt; bool { 1 &lt; 2 }"));
        assert!(rendered.contains("<file path=\"src/a.rs\">"));
    }

    #[test]
    fn default_file_names_follow_the_format() {
        assert_eq!(
            OverviewFormat::Yaml.default_file_name(),
            "project_overview.alk.yaml"
        );
        assert_eq!(
            OverviewFormat::Xml.default_file_name(),
            "project_overview.alk.xml"
        );
    }
}
