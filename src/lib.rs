pub mod chunk;
pub mod docket;
pub mod godls;
pub mod pacer;

pub use chunk::{ChunkError, DatePair, DateRange, QueryConfig, RangeChunker};
pub use docket::{
    DocketEntry, DocketExtractor, DocketTable, ExtractOptions, LinkDescriptor, TableError,
    WantedSelection,
};
pub use godls::{CodecError, GoDlsArgs, GoDlsCodec, GoDlsSchema};
