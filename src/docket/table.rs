use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("invalid table selector '{selector}': {reason}")]
    Selector { selector: String, reason: String },
    #[error("no docket table found in page")]
    NotFound,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Anchor {
    pub text: String,
    pub href: Option<String>,
    pub onclick: Option<String>,
}

impl Anchor {
    pub fn label(&self) -> &str {
        self.text.trim()
    }

    pub fn doc_id(&self) -> Option<&str> {
        self.href.as_deref().and_then(|href| href.rsplit('/').next())
    }

    pub fn is_numeric(&self) -> bool {
        let label = self.label();
        !label.is_empty() && label.chars().all(|ch| ch.is_ascii_digit())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableCell {
    pub text: String,
    pub anchors: Vec<Anchor>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

impl TableRow {
    pub fn cell(&self, column: usize) -> Option<&TableCell> {
        self.cells.get(column)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocketTable {
    pub rows: Vec<TableRow>,
}

impl DocketTable {
    pub fn new(rows: Vec<TableRow>) -> Self {
        Self { rows }
    }

    pub fn from_html(html: &str, selector: Option<&str>) -> Result<Self, TableError> {
        let document = Html::parse_document(html);

        let table = match selector {
            Some(selector) => {
                let parsed = parse_selector(selector)?;
                document.select(&parsed).next()
            }
            None => {
                let tables = parse_selector("table")?;
                let rows = parse_selector("tr")?;
                document.select(&tables).find(|table| {
                    table
                        .select(&rows)
                        .next()
                        .map(|row| element_text(row).to_lowercase().contains("docket text"))
                        .unwrap_or(false)
                })
            }
        };

        let table = table.ok_or(TableError::NotFound)?;
        Self::from_element(table)
    }

    pub fn from_element(table: ElementRef<'_>) -> Result<Self, TableError> {
        let row_selector = parse_selector("tr")?;
        let cell_selector = parse_selector("td")?;
        let anchor_selector = parse_selector("a")?;

        let rows = table
            .select(&row_selector)
            .map(|row| TableRow {
                cells: row
                    .select(&cell_selector)
                    .map(|cell| TableCell {
                        text: element_text(cell),
                        anchors: cell
                            .select(&anchor_selector)
                            .map(|anchor| Anchor {
                                text: anchor.text().collect(),
                                href: anchor.value().attr("href").map(ToOwned::to_owned),
                                onclick: anchor.value().attr("onclick").map(ToOwned::to_owned),
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect();

        Ok(Self { rows })
    }
}

fn parse_selector(selector: &str) -> Result<Selector, TableError> {
    Selector::parse(selector).map_err(|err| TableError::Selector {
        selector: selector.to_string(),
        reason: err.to_string(),
    })
}

fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
