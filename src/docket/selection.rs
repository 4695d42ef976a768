use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

pub const LINE_DOCUMENT: &str = "0";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WantedSelection(BTreeMap<String, BTreeSet<String>>);

impl WantedSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn insert(&mut self, line_no: impl Into<String>, sub_id: impl Into<String>) {
        self.0.entry(line_no.into()).or_default().insert(sub_id.into());
    }

    pub fn get(&self, line_no: &str) -> Option<&BTreeSet<String>> {
        self.0.get(line_no)
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn wants_line(&self, line_no: &str) -> bool {
        self.is_empty()
            || self
                .get(line_no)
                .is_some_and(|ids| ids.contains(LINE_DOCUMENT))
    }

    pub fn wants_attachments(&self, line_no: &str, include_attachments: bool) -> bool {
        (self.is_empty() && include_attachments)
            || self
                .get(line_no)
                .is_some_and(|ids| ids.iter().any(|id| id != LINE_DOCUMENT))
    }

    pub fn admits_attachment(&self, line_no: &str, label: &str) -> bool {
        self.is_empty() || self.get(line_no).is_some_and(|ids| ids.contains(label))
    }
}

impl<L, I, S> FromIterator<(L, I)> for WantedSelection
where
    L: Into<String>,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (L, I)>>(iter: T) -> Self {
        let mut selection = Self::new();
        for (line_no, ids) in iter {
            let line_no = line_no.into();
            let entry = selection.0.entry(line_no).or_default();
            entry.extend(ids.into_iter().map(Into::into));
        }
        selection
    }
}
