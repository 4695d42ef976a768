pub mod extract;
pub mod godls;
pub mod hours;
pub mod split_query;
pub mod url;

use anyhow::Result;
use pacer_docket::{GoDlsCodec, GoDlsSchema};

use crate::cli::SchemaArgs;

impl SchemaArgs {
    pub fn codec(&self) -> Result<GoDlsCodec> {
        let schema = if self.godls_args.is_empty() {
            GoDlsSchema::new(
                self.godls_name.as_str(),
                GoDlsSchema::default().arg_names().iter().cloned(),
            )?
        } else {
            GoDlsSchema::new(
                self.godls_name.as_str(),
                self.godls_args.iter().map(|name| name.trim().to_string()),
            )?
        };
        Ok(GoDlsCodec::new(schema)?)
    }
}

#[cfg(test)]
mod tests;
