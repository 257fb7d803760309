// Workbook template descriptor
use serde::Serialize;

/// Static description of the expected workbook layout. The front end uses
/// this to render or generate a blank template.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateDescriptor {
    pub name: String,
    pub version: String,
    pub sheets: Vec<String>,
    pub structure: TemplateStructure,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplateStructure {
    pub headers: HeaderFields,
    pub status: SheetColumns,
    pub highlights: SheetColumns,
    pub lowlights: SheetColumns,
    pub milestones: SheetColumns,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeaderFields {
    pub title: String,
    pub subtitle: String,
    pub period: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SheetColumns {
    pub columns: Vec<String>,
}

impl SheetColumns {
    fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl TemplateDescriptor {
    pub fn standard() -> Self {
        Self {
            name: "Portfolio Status Template".to_string(),
            version: "1.0.0".to_string(),
            sheets: [
                "Headers",
                "Status",
                "Highlights",
                "Lowlights",
                "Milestones",
                "Metrics",
                "Lookups",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            structure: TemplateStructure {
                headers: HeaderFields {
                    title: "Portfolio Title".to_string(),
                    subtitle: "Portfolio Subtitle".to_string(),
                    period: "Reporting Period".to_string(),
                },
                status: SheetColumns::new(&["Project", "Status", "Progress", "Health", "Owner"]),
                highlights: SheetColumns::new(&["Project", "Description", "Impact"]),
                lowlights: SheetColumns::new(&["Project", "Issue", "Action", "Owner", "Due Date"]),
                milestones: SheetColumns::new(&["Project", "Milestone", "Due Date", "Status"]),
            },
        }
    }
}
