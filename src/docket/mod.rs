mod extract;
mod selection;
mod table;


pub use extract::{
    DOCKET_TEXT_COLUMN, DocketEntry, DocketExtractor, ExtractOptions, LINE_COLUMN, LinkDescriptor,
    TEXT_PREVIEW_CHARS,
};
pub use selection::{LINE_DOCUMENT, WantedSelection};
pub use table::{Anchor, DocketTable, TableCell, TableError, TableRow};
