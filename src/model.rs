use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ExtractCounts {
    pub table_rows: usize,
    pub entries_returned: usize,
    pub line_documents: usize,
    pub attachments: usize,
    pub decoded_links: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractRunManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub source_path: String,
    pub source_sha256: String,
    pub no_docket: bool,
    pub include_attachments: bool,
    pub wanted_lines: Vec<String>,
    pub text_filter: Option<String>,
    pub godls_call_name: String,
    pub godls_arity: usize,
    pub counts: ExtractCounts,
}
