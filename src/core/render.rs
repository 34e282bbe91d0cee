use crate::domain::model::RoleRecord;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Shown in place of any empty or absent field.
pub const NOT_AVAILABLE: &str = "N/A";

const RULE_WIDTH: usize = 60;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Markdown,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub format: OutputFormat,
    /// Emit OSC 8 terminal hyperlinks in text output.
    pub hyperlinks: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            hyperlinks: false,
        }
    }
}

/// Either the items of a field or the "not available" placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "items", rename_all = "snake_case")]
pub enum Content<T> {
    Available(Vec<T>),
    NotAvailable,
}

impl<T> Content<T> {
    fn from_items(items: Vec<T>) -> Self {
        if items.is_empty() {
            Content::NotAvailable
        } else {
            Content::Available(items)
        }
    }

    pub fn items(&self) -> &[T] {
        match self {
            Content::Available(items) => items,
            Content::NotAvailable => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListPanel {
    pub title: &'static str,
    #[serde(skip)]
    pub icon: &'static str,
    pub content: Content<String>,
}

impl ListPanel {
    fn new(icon: &'static str, title: &'static str, items: &[String]) -> Self {
        Self {
            title,
            icon,
            content: Content::from_items(items.to_vec()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkRow {
    pub name: String,
    pub platform: String,
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkTable {
    pub title: &'static str,
    #[serde(skip)]
    pub icon: &'static str,
    pub name_header: &'static str,
    pub link_label: &'static str,
    pub rows: Content<LinkRow>,
}

/// Everything shown for one matched role, grouped the way it is laid out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoadmapView {
    pub role_name: String,
    pub left: Vec<ListPanel>,
    pub right: Vec<ListPanel>,
    pub tables: Vec<LinkTable>,
}

impl RoadmapView {
    pub fn panel(&self, title: &str) -> Option<&ListPanel> {
        self.left
            .iter()
            .chain(self.right.iter())
            .find(|panel| panel.title == title)
    }

    pub fn table(&self, title: &str) -> Option<&LinkTable> {
        self.tables.iter().find(|table| table.title == title)
    }
}

/// Extracts every displayed field of `record`; absent fields become placeholders.
pub fn render_view(record: &RoleRecord) -> RoadmapView {
    let left = vec![
        ListPanel::new("🛠️", "Technical Skills", &record.technical_skills),
        ListPanel::new("🤝", "Soft Skills", &record.soft_skills),
        ListPanel::new("💡", "Project Ideas", &record.projects),
        ListPanel::new("🔧", "Tools", &record.tools),
    ];
    let right = vec![
        ListPanel::new("🧪", "Internships", &record.internships),
        ListPanel::new("🏢", "Company Types", &record.company_types),
        ListPanel::new("📚", "Prerequisite Subjects", &record.prerequisite_subjects),
        ListPanel::new("🧠", "Interview Preparation Topics", record.interview_topics()),
    ];

    let courses = record
        .courses
        .iter()
        .map(|course| {
            link_row(
                course.course_name.as_deref(),
                course.platform.as_deref(),
                course.link.as_deref(),
            )
        })
        .collect();
    let certifications = record
        .certifications
        .iter()
        .map(|cert| {
            link_row(
                cert.certification_name.as_deref(),
                cert.platform.as_deref(),
                cert.link.as_deref(),
            )
        })
        .collect();

    let tables = vec![
        LinkTable {
            title: "Top Courses",
            icon: "🎓",
            name_header: "Course",
            link_label: "Go to Course",
            rows: Content::from_items(courses),
        },
        LinkTable {
            title: "Certifications",
            icon: "📜",
            name_header: "Certification",
            link_label: "Go to Certification",
            rows: Content::from_items(certifications),
        },
    ];

    RoadmapView {
        role_name: record.role_name.clone().unwrap_or_default(),
        left,
        right,
        tables,
    }
}

fn link_row(name: Option<&str>, platform: Option<&str>, link: Option<&str>) -> LinkRow {
    LinkRow {
        name: name.unwrap_or(NOT_AVAILABLE).to_string(),
        platform: platform.unwrap_or(NOT_AVAILABLE).to_string(),
        link: link
            .map(str::trim)
            .filter(|link| !link.is_empty())
            .map(str::to_string),
    }
}

/// Renders `record` in the requested output format.
pub fn render(record: &RoleRecord, options: RenderOptions) -> Result<String> {
    format_view(&render_view(record), options)
}

pub fn format_view(view: &RoadmapView, options: RenderOptions) -> Result<String> {
    match options.format {
        OutputFormat::Text => Ok(to_text(view, options.hyperlinks)),
        OutputFormat::Markdown => Ok(to_markdown(view)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(view)?),
    }
}

fn to_text(view: &RoadmapView, hyperlinks: bool) -> String {
    let mut out = String::new();
    let heading = format!("Career Roadmap for: {}", view.role_name);
    let _ = writeln!(out, "{}", heading);
    let _ = writeln!(out, "{}\n", "=".repeat(heading.chars().count()));

    for panel in &view.left {
        write_text_panel(&mut out, panel);
    }
    let _ = writeln!(out, "{}\n", "·".repeat(RULE_WIDTH));
    for panel in &view.right {
        write_text_panel(&mut out, panel);
    }
    let _ = writeln!(out, "{}\n", "-".repeat(RULE_WIDTH));

    for table in &view.tables {
        write_text_table(&mut out, table, hyperlinks);
    }

    out
}

fn write_text_panel(out: &mut String, panel: &ListPanel) {
    let _ = writeln!(out, "{}", panel.title);
    match &panel.content {
        Content::Available(items) => {
            for item in items {
                let _ = writeln!(out, "  - {}", item);
            }
        }
        Content::NotAvailable => {
            let _ = writeln!(out, "  {}", NOT_AVAILABLE);
        }
    }
    out.push('\n');
}

/// A table cell: what the terminal shows, and what is written to produce it.
struct Cell {
    visible: String,
    raw: String,
}

impl Cell {
    fn plain(text: &str) -> Self {
        Self {
            visible: text.to_string(),
            raw: text.to_string(),
        }
    }

    fn link(label: &str, url: Option<&str>, hyperlinks: bool) -> Self {
        match url {
            None => Cell::plain(""),
            Some(url) if hyperlinks => Self {
                visible: label.to_string(),
                raw: format!("\x1b]8;;{}\x1b\\{}\x1b]8;;\x1b\\", url, label),
            },
            Some(url) => Cell::plain(&format!("{} ({})", label, url)),
        }
    }
}

fn write_text_table(out: &mut String, table: &LinkTable, hyperlinks: bool) {
    let _ = writeln!(out, "{}", table.title);

    let rows = match &table.rows {
        Content::Available(rows) => rows,
        Content::NotAvailable => {
            let _ = writeln!(out, "  {}\n", NOT_AVAILABLE);
            return;
        }
    };

    let mut grid = vec![[
        Cell::plain(table.name_header),
        Cell::plain("Platform"),
        Cell::plain("Link"),
    ]];
    grid.extend(rows.iter().map(|row| {
        [
            Cell::plain(&row.name),
            Cell::plain(&row.platform),
            Cell::link(table.link_label, row.link.as_deref(), hyperlinks),
        ]
    }));

    let mut widths = [0usize; 3];
    for line in &grid {
        for (width, cell) in widths.iter_mut().zip(line.iter()) {
            *width = (*width).max(cell.visible.chars().count());
        }
    }

    for (index, line) in grid.iter().enumerate() {
        let cells: Vec<String> = line
            .iter()
            .zip(widths.iter())
            .map(|(cell, width)| {
                let padding = width - cell.visible.chars().count();
                format!("{}{}", cell.raw, " ".repeat(padding))
            })
            .collect();
        let _ = writeln!(out, "  {}", cells.join(" | ").trim_end());

        if index == 0 {
            let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
            let _ = writeln!(out, "  {}", rule.join("-+-"));
        }
    }
    out.push('\n');
}

fn to_markdown(view: &RoadmapView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "## Career Roadmap for: {}\n", escape_markdown(&view.role_name));

    for panel in view.left.iter().chain(view.right.iter()) {
        let _ = writeln!(out, "### {} {}", panel.icon, panel.title);
        match &panel.content {
            Content::Available(items) => {
                for item in items {
                    let _ = writeln!(out, "- {}", escape_markdown(item));
                }
            }
            Content::NotAvailable => {
                let _ = writeln!(out, "_{}_", NOT_AVAILABLE);
            }
        }
        out.push('\n');
    }

    out.push_str("---\n\n");

    for table in &view.tables {
        let _ = writeln!(out, "### {} {}", table.icon, table.title);
        match &table.rows {
            Content::Available(rows) => {
                let _ = writeln!(out, "| {} | Platform | Link |", table.name_header);
                out.push_str("| --- | --- | --- |\n");
                for row in rows {
                    let link = row
                        .link
                        .as_deref()
                        .map(|url| format!("[{}]({})", table.link_label, encode_url(url)))
                        .unwrap_or_default();
                    let _ = writeln!(
                        out,
                        "| {} | {} | {} |",
                        escape_markdown(&row.name),
                        escape_markdown(&row.platform),
                        link
                    );
                }
            }
            Content::NotAvailable => {
                let _ = writeln!(out, "_{}_", NOT_AVAILABLE);
            }
        }
        out.push('\n');
    }

    out
}

/// Backslash-escapes inline Markdown syntax, plus a leading list or heading marker.
fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (index, ch) in text.chars().enumerate() {
        let leading_marker = index == 0 && matches!(ch, '-' | '+');
        if leading_marker || matches!(ch, '\\' | '`' | '*' | '_' | '[' | ']' | '#' | '|' | '<' | '>') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Percent-encodes the characters that would end a Markdown link target or a table cell.
fn encode_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for ch in url.chars() {
        match ch {
            ' ' => out.push_str("%20"),
            '(' => out.push_str("%28"),
            ')' => out.push_str("%29"),
            '<' => out.push_str("%3C"),
            '>' => out.push_str("%3E"),
            '|' => out.push_str("%7C"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Certification, Course, InterviewPreparation};

    fn data_scientist() -> RoleRecord {
        RoleRecord {
            role_name: Some("Data Scientist".to_string()),
            technical_skills: vec!["Python".to_string(), "SQL".to_string()],
            ..Default::default()
        }
    }

    fn plain_text() -> RenderOptions {
        RenderOptions {
            format: OutputFormat::Text,
            hyperlinks: false,
        }
    }

    #[test]
    fn test_technical_skills_panel_lists_each_skill() {
        let view = render_view(&data_scientist());
        let panel = view.panel("Technical Skills").unwrap();

        assert_eq!(panel.content.items(), ["Python", "SQL"]);

        let text = render(&data_scientist(), plain_text()).unwrap();
        assert!(text.contains("Technical Skills\n  - Python\n  - SQL\n\n"));
    }

    #[test]
    fn test_missing_fields_render_placeholders() {
        let view = render_view(&RoleRecord::default());

        for panel in view.left.iter().chain(view.right.iter()) {
            assert_eq!(panel.content, Content::NotAvailable, "{}", panel.title);
        }
        for table in &view.tables {
            assert_eq!(table.rows, Content::NotAvailable, "{}", table.title);
        }

        for format in [OutputFormat::Text, OutputFormat::Markdown, OutputFormat::Json] {
            let options = RenderOptions {
                format,
                hyperlinks: true,
            };
            assert!(render(&RoleRecord::default(), options).is_ok());
        }
    }

    #[test]
    fn test_every_field_is_surfaced_once() {
        let view = render_view(&data_scientist());
        let mut titles: Vec<&str> = view
            .left
            .iter()
            .chain(view.right.iter())
            .map(|panel| panel.title)
            .chain(view.tables.iter().map(|table| table.title))
            .collect();
        titles.sort();
        titles.dedup();
        assert_eq!(titles.len(), 10);
    }

    #[test]
    fn test_interview_topics_come_from_nested_object() {
        let record = RoleRecord {
            interview_preparation: Some(InterviewPreparation {
                topics: vec!["System Design".to_string()],
            }),
            ..data_scientist()
        };
        let view = render_view(&record);
        assert_eq!(
            view.panel("Interview Preparation Topics").unwrap().content.items(),
            ["System Design"]
        );
    }

    #[test]
    fn test_course_row_with_link_and_no_certifications() {
        let record = RoleRecord {
            courses: vec![Course {
                course_name: Some("ML101".to_string()),
                platform: Some("X".to_string()),
                link: Some("http://x".to_string()),
            }],
            ..data_scientist()
        };

        let view = render_view(&record);
        assert_eq!(
            view.table("Top Courses").unwrap().rows.items(),
            [LinkRow {
                name: "ML101".to_string(),
                platform: "X".to_string(),
                link: Some("http://x".to_string()),
            }]
        );
        assert_eq!(view.table("Certifications").unwrap().rows, Content::NotAvailable);

        let markdown = render(
            &record,
            RenderOptions {
                format: OutputFormat::Markdown,
                hyperlinks: true,
            },
        )
        .unwrap();
        assert!(markdown.contains("| ML101 | X | [Go to Course](http://x) |"));
        assert!(markdown.contains("### 📜 Certifications\n_N/A_"));
    }

    #[test]
    fn test_text_table_links() {
        let record = RoleRecord {
            certifications: vec![
                Certification {
                    certification_name: Some("CKA".to_string()),
                    platform: None,
                    link: Some("https://cncf.io/cka".to_string()),
                },
                Certification {
                    certification_name: None,
                    platform: Some("AWS".to_string()),
                    link: None,
                },
            ],
            ..data_scientist()
        };

        let plain = render(&record, plain_text()).unwrap();
        assert!(plain.contains("CKA           | N/A      | Go to Certification (https://cncf.io/cka)"));
        assert!(plain.contains("  N/A           | AWS      |\n"));

        let linked = render(
            &record,
            RenderOptions {
                format: OutputFormat::Text,
                hyperlinks: true,
            },
        )
        .unwrap();
        assert!(linked.contains("\x1b]8;;https://cncf.io/cka\x1b\\Go to Certification\x1b]8;;\x1b\\"));
    }

    #[test]
    fn test_blank_link_is_treated_as_absent() {
        let row = link_row(Some("Intro"), Some("Coursera"), Some("  "));
        assert_eq!(row.link, None);
    }

    #[test]
    fn test_markdown_escapes_pipes() {
        let record = RoleRecord {
            courses: vec![Course {
                course_name: Some("A | B".to_string()),
                platform: None,
                link: None,
            }],
            ..Default::default()
        };
        let markdown = to_markdown(&render_view(&record));
        assert!(markdown.contains("| A \\| B | N/A |  |"));
    }

    #[test]
    fn test_markdown_escapes_list_items_and_links() {
        let record = RoleRecord {
            role_name: Some("C# *Dev*".to_string()),
            technical_skills: vec![
                "**bold** [x](http://evil)".to_string(),
                "-not a sublist".to_string(),
                "snake_case <br>".to_string(),
            ],
            courses: vec![Course {
                course_name: Some("Rust".to_string()),
                platform: None,
                link: Some("https://x.org/a b(c)|d".to_string()),
            }],
            ..Default::default()
        };
        let markdown = to_markdown(&render_view(&record));

        assert!(markdown.contains("## Career Roadmap for: C\\# \\*Dev\\*\n"));
        assert!(markdown.contains("- \\*\\*bold\\*\\* \\[x\\](http://evil)\n"));
        assert!(markdown.contains("- \\-not a sublist\n"));
        assert!(markdown.contains("- snake\\_case \\<br\\>\n"));
        assert!(markdown.contains("| Rust | N/A | [Go to Course](https://x.org/a%20b%28c%29%7Cd) |"));
    }

    #[test]
    fn test_json_output() {
        let json = render(
            &data_scientist(),
            RenderOptions {
                format: OutputFormat::Json,
                hyperlinks: false,
            },
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["role_name"], "Data Scientist");
        assert_eq!(value["left"][0]["title"], "Technical Skills");
        assert_eq!(value["left"][0]["content"]["status"], "available");
        assert_eq!(value["left"][0]["content"]["items"][1], "SQL");
        assert_eq!(value["left"][1]["content"]["status"], "not_available");
    }
}
