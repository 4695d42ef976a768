use std::collections::HashSet;

use serde::{Serialize, Serializer};
use tracing::{debug, trace};

use super::selection::WantedSelection;
use super::table::{Anchor, DocketTable, TableCell};
use crate::godls::{GoDlsArgs, GoDlsCodec};

pub const LINE_COLUMN: usize = 1;
pub const DOCKET_TEXT_COLUMN: usize = 2;
pub const TEXT_PREVIEW_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkDescriptor {
    pub index: String,
    pub href: Option<String>,
    #[serde(serialize_with = "serialize_go_dls")]
    pub go_dls: Option<GoDlsArgs>,
}

fn serialize_go_dls<S: Serializer>(
    go_dls: &Option<GoDlsArgs>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match go_dls {
        Some(args) => args.serialize(serializer),
        None => serializer.collect_map(std::iter::empty::<(&str, &str)>()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocketEntry {
    pub line_no: String,
    pub line_doc: Option<LinkDescriptor>,
    pub attachments: Vec<LinkDescriptor>,
    pub docket_text: String,
}

impl DocketEntry {
    pub fn is_line_document(&self) -> bool {
        self.line_doc.is_some()
    }
}

#[derive(Default)]
pub struct ExtractOptions<'a> {
    pub include_attachments: bool,
    /// Predicate over the leading docket text. `DocketExtractor::extract`
    /// never calls it; callers apply it through `admits_text` once they hold
    /// the captured text.
    pub filter_fn: Option<&'a dyn Fn(&str) -> bool>,
    pub wanted: WantedSelection,
}

impl ExtractOptions<'_> {
    pub fn admits_text(&self, docket_text: &str) -> bool {
        self.filter_fn.is_none_or(|filter| filter(docket_text))
    }
}

#[derive(Debug, Clone, Default)]
pub struct DocketExtractor {
    codec: GoDlsCodec,
}

impl DocketExtractor {
    pub fn new(codec: GoDlsCodec) -> Self {
        Self { codec }
    }

    pub fn codec(&self) -> &GoDlsCodec {
        &self.codec
    }

    pub fn extract(&self, table: &DocketTable, options: &ExtractOptions<'_>) -> Vec<DocketEntry> {
        let line_doc_ids: HashSet<&str> = table
            .rows
            .iter()
            .filter_map(|row| row.cell(LINE_COLUMN))
            .flat_map(|cell| cell.anchors.iter())
            .filter_map(Anchor::doc_id)
            .collect();

        let wanted = &options.wanted;
        let mut entries = Vec::new();

        for (position, row) in table.rows.iter().enumerate().skip(1) {
            let Some(line_anchor) = row
                .cell(LINE_COLUMN)
                .and_then(|cell| cell.anchors.first())
            else {
                trace!(row = position, "row has no line anchor");
                continue;
            };
            let line_no = line_anchor.label();

            let want_line = wanted.wants_line(line_no);
            let want_attachments = wanted.wants_attachments(line_no, options.include_attachments);

            if !(want_line || want_attachments) {
                debug!(row = position, line_no, "nothing requested from row");
                continue;
            }

            let text_cell = row.cell(DOCKET_TEXT_COLUMN);

            let attachments = match text_cell {
                Some(cell) if want_attachments => {
                    self.attachments(cell, line_no, &line_doc_ids, wanted)
                }
                _ => Vec::new(),
            };

            entries.push(DocketEntry {
                line_no: line_no.to_string(),
                line_doc: want_line.then(|| self.describe(line_anchor)),
                attachments,
                docket_text: text_cell
                    .map(|cell| text_preview(&cell.text))
                    .unwrap_or_default(),
            });
        }

        debug!(
            rows = table.rows.len(),
            entries = entries.len(),
            "docket table extracted"
        );
        entries
    }

    pub fn describe(&self, anchor: &Anchor) -> LinkDescriptor {
        let go_dls = self.codec.decode_onclick(anchor.onclick.as_deref());
        if go_dls.is_none() && anchor.onclick.as_deref().is_some_and(|s| !s.trim().is_empty()) {
            trace!(label = anchor.label(), "onclick handler is not a goDLS call");
        }

        LinkDescriptor {
            index: anchor.label().to_string(),
            href: anchor.href.clone(),
            go_dls,
        }
    }

    fn attachments(
        &self,
        cell: &TableCell,
        line_no: &str,
        line_doc_ids: &HashSet<&str>,
        wanted: &WantedSelection,
    ) -> Vec<LinkDescriptor> {
        cell.anchors
            .iter()
            .filter(|anchor| anchor.is_numeric())
            .filter(|anchor| {
                anchor
                    .doc_id()
                    .is_none_or(|doc_id| !line_doc_ids.contains(doc_id))
            })
            .filter(|anchor| wanted.admits_attachment(line_no, anchor.label()))
            .map(|anchor| self.describe(anchor))
            .collect()
    }
}

fn text_preview(text: &str) -> String {
    text.chars().take(TEXT_PREVIEW_CHARS).collect()
}
