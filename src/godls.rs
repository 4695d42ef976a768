use std::collections::{BTreeMap, HashSet};

use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

pub const DEFAULT_CALL_NAME: &str = "goDLS";
pub const DEFAULT_ARG_NAMES: [&str; 8] = [
    "action",
    "hash",
    "de_seq_num",
    "got_receipt",
    "pacer_case_num",
    "case_num",
    "is_qualified_initiative",
    "de_seq_num2",
];
pub const DOC_ID_ARG: &str = "action";

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("goDLS schema must declare at least one argument")]
    EmptySchema,
    #[error("goDLS schema declares argument '{0}' more than once")]
    DuplicateArgument(String),
    #[error("goDLS schema is missing the '{0}' argument")]
    MissingDocIdArgument(&'static str),
    #[error("goDLS call name must not be empty")]
    EmptyCallName,
    #[error("cannot encode goDLS call: no value for argument '{0}'")]
    MissingArgument(String),
    #[error("failed to compile goDLS pattern")]
    Pattern(#[from] regex::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoDlsSchema {
    call_name: String,
    arg_names: Vec<String>,
}

impl GoDlsSchema {
    pub fn new<I, S>(call_name: impl Into<String>, arg_names: I) -> Result<Self, CodecError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let call_name = call_name.into();
        if call_name.trim().is_empty() {
            return Err(CodecError::EmptyCallName);
        }

        let arg_names: Vec<String> = arg_names.into_iter().map(Into::into).collect();
        if arg_names.is_empty() {
            return Err(CodecError::EmptySchema);
        }

        let mut seen = HashSet::with_capacity(arg_names.len());
        for name in &arg_names {
            if !seen.insert(name.as_str()) {
                return Err(CodecError::DuplicateArgument(name.clone()));
            }
        }
        if !seen.contains(DOC_ID_ARG) {
            return Err(CodecError::MissingDocIdArgument(DOC_ID_ARG));
        }

        Ok(Self {
            call_name,
            arg_names,
        })
    }

    pub fn call_name(&self) -> &str {
        &self.call_name
    }

    pub fn arg_names(&self) -> &[String] {
        &self.arg_names
    }

    pub fn arity(&self) -> usize {
        self.arg_names.len()
    }
}

impl Default for GoDlsSchema {
    fn default() -> Self {
        Self {
            call_name: DEFAULT_CALL_NAME.to_string(),
            arg_names: DEFAULT_ARG_NAMES.iter().map(|name| name.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoDlsArgs {
    fields: Vec<(String, String)>,
    action_doc_id: String,
}

impl GoDlsArgs {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn action_doc_id(&self) -> &str {
        &self.action_doc_id
    }

    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map: BTreeMap<String, String> = self.fields.iter().cloned().collect();
        map.insert("action_doc_id".to_string(), self.action_doc_id.clone());
        map
    }
}

impl Serialize for GoDlsArgs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.serialize_entry("action_doc_id", &self.action_doc_id)?;
        map.end()
    }
}

#[derive(Debug, Clone)]
pub struct GoDlsCodec {
    schema: GoDlsSchema,
    pattern: Regex,
}

impl GoDlsCodec {
    pub fn new(schema: GoDlsSchema) -> Result<Self, CodecError> {
        let args = vec![r"'(.*?)'"; schema.arity()].join(r",\s?");
        let pattern = Regex::new(&format!(
            r"{}\({}\)",
            regex::escape(schema.call_name()),
            args
        ))?;

        Ok(Self { schema, pattern })
    }

    pub fn schema(&self) -> &GoDlsSchema {
        &self.schema
    }

    pub fn decode(&self, raw: &str) -> Option<GoDlsArgs> {
        let captures = self.pattern.captures(raw)?;

        let mut fields = Vec::with_capacity(self.schema.arity());
        for (position, name) in self.schema.arg_names().iter().enumerate() {
            let value = captures.get(position + 1)?.as_str();
            fields.push((name.clone(), value.to_string()));
        }

        let action_doc_id = fields
            .iter()
            .find(|(name, _)| name == DOC_ID_ARG)
            .and_then(|(_, action)| action.rsplit('/').next())
            .unwrap_or_default()
            .to_string();

        Some(GoDlsArgs {
            fields,
            action_doc_id,
        })
    }

    pub fn decode_onclick(&self, onclick: Option<&str>) -> Option<GoDlsArgs> {
        let statement = onclick?.split(';').next()?;
        self.decode(statement)
    }

    // Overrides win on key collision. Values are not escaped; a single quote
    // inside a value will not decode back.
    pub fn encode(
        &self,
        base: &BTreeMap<String, String>,
        overrides: &BTreeMap<String, String>,
    ) -> Result<String, CodecError> {
        let mut merged = base.clone();
        merged.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));

        let mut rendered = Vec::with_capacity(self.schema.arity());
        for name in self.schema.arg_names() {
            let value = merged
                .get(name)
                .ok_or_else(|| CodecError::MissingArgument(name.clone()))?;
            rendered.push(format!("'{value}'"));
        }

        Ok(format!("{}({})", self.schema.call_name(), rendered.join(",")))
    }
}

impl Default for GoDlsCodec {
    fn default() -> Self {
        Self::new(GoDlsSchema::default()).expect("default goDLS schema compiles")
    }
}
