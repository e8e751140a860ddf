//! Hand-authored format documents layered over generated formats

use crate::model::ConfigModelCollection;
use crate::{CUSTOM_FORMATS_FOLDER, CUSTOM_FORMAT_EXTENSION};
use pscmdlet_generator_common::{GeneratorError, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::PoisonError;
use walkdir::WalkDir;

/// A parsed custom format document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomFormatDocument {
    pub path: PathBuf,
    /// Types selected by the document's views
    pub type_names: Vec<String>,
    /// Raw `<View>` elements, copied verbatim into the merged output
    pub views: Vec<String>,
}

impl CustomFormatDocument {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(path, &content)
    }

    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        let mut reader = Reader::from_str(content);
        let mut type_names = Vec::new();
        let mut views = Vec::new();
        let mut in_type_name = false;
        let mut view_start: Option<usize> = None;

        loop {
            let position = reader.buffer_position() as usize;
            match reader.read_event() {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"TypeName" => in_type_name = true,
                    b"View" if view_start.is_none() => view_start = Some(position),
                    _ => {}
                },
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"TypeName" => in_type_name = false,
                    b"View" => {
                        if let Some(start) = view_start.take() {
                            let end = reader.buffer_position() as usize;
                            views.push(content[start..end].to_string());
                        }
                    }
                    _ => {}
                },
                Ok(Event::Text(text)) if in_type_name => {
                    let name = text.unescape().map_err(|e| GeneratorError::CustomFormat {
                        path: path.to_path_buf(),
                        message: e.to_string(),
                    })?;
                    let name = name.trim();
                    if !name.is_empty() && !type_names.iter().any(|t| t == name) {
                        type_names.push(name.to_string());
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(GeneratorError::CustomFormat {
                        path: path.to_path_buf(),
                        message: format!("error at position {}: {}", reader.error_position(), e),
                    })
                }
                _ => {}
            }
        }

        if view_start.is_some() {
            return Err(GeneratorError::CustomFormat {
                path: path.to_path_buf(),
                message: "unterminated View element".to_string(),
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
            type_names,
            views,
        })
    }
}

/// Loaded documents together with the exclusions in force after loading
#[derive(Debug)]
pub(crate) struct CustomFormatCache {
    pub(crate) documents: Vec<CustomFormatDocument>,
    pub(crate) excluded_types: HashSet<String>,
}

impl ConfigModelCollection {
    /// Scan `root/CustomFormats[/filter]` for custom format documents.
    ///
    /// The first call populates a cache that every later call returns as-is,
    /// whatever `root` and `filter` it is given. Concurrent first calls scan
    /// the folder once.
    pub fn load_custom_format_documents(
        &self,
        root: &Path,
        filter: Option<&str>,
    ) -> Result<&[CustomFormatDocument]> {
        if let Some(cache) = self.custom_formats.get() {
            return Ok(&cache.documents);
        }

        let _gate = self
            .custom_formats_gate
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(cache) = self.custom_formats.get() {
            return Ok(&cache.documents);
        }

        let mut folder = root.join(CUSTOM_FORMATS_FOLDER);
        if let Some(filter) = filter.filter(|f| !f.is_empty()) {
            folder.push(filter);
        }

        let documents = scan_folder(&folder)?;
        self.log(&format!(
            "Loaded {} custom format documents from {}",
            documents.len(),
            folder.display()
        ));

        let mut excluded_types = self.type_exclusion_set().clone();
        for document in &documents {
            excluded_types.extend(document.type_names.iter().cloned());
        }

        let cache = self.custom_formats.get_or_init(|| CustomFormatCache {
            documents,
            excluded_types,
        });
        Ok(&cache.documents)
    }

    /// Documents loaded so far, if loading has happened
    pub fn custom_format_documents(&self) -> Option<&[CustomFormatDocument]> {
        self.custom_formats.get().map(|c| c.documents.as_slice())
    }

    /// Explicit exclusions, unioned with every custom format type once the
    /// custom format documents have been loaded
    pub fn effective_type_exclusions(&self) -> &HashSet<String> {
        match self.custom_formats.get() {
            Some(cache) => &cache.excluded_types,
            None => self.type_exclusion_set(),
        }
    }

    pub fn is_type_excluded(&self, type_name: &str) -> bool {
        self.effective_type_exclusions().contains(type_name)
    }
}

fn scan_folder(folder: &Path) -> Result<Vec<CustomFormatDocument>> {
    if !folder.is_dir() {
        return Ok(Vec::new());
    }

    let mut documents = Vec::new();
    for entry in WalkDir::new(folder).sort_by_file_name() {
        let entry = entry.map_err(|e| GeneratorError::Io(e.into()))?;
        let path = entry.path();
        let matches_extension = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(CUSTOM_FORMAT_EXTENSION));
        if entry.file_type().is_file() && matches_extension {
            documents.push(CustomFormatDocument::load(path)?);
        }
    }

    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUCKET_FORMAT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Configuration>
  <ViewDefinitions>
    <View>
      <Name>Amazon.S3.Model.S3Bucket</Name>
      <ViewSelectedBy>
        <TypeName>Amazon.S3.Model.S3Bucket</TypeName>
      </ViewSelectedBy>
      <TableControl>
        <TableHeaders><TableColumnHeader><Label>Name</Label></TableColumnHeader></TableHeaders>
      </TableControl>
    </View>
    <View>
      <Name>Amazon.S3.Model.Owner</Name>
      <ViewSelectedBy>
        <TypeName>Amazon.S3.Model.Owner</TypeName>
        <TypeName>Amazon.S3.Model.S3Bucket</TypeName>
      </ViewSelectedBy>
    </View>
  </ViewDefinitions>
</Configuration>
"#;

    #[test]
    fn test_parse_collects_types_and_views() {
        let doc = CustomFormatDocument::parse(Path::new("s3.format.ps1xml"), BUCKET_FORMAT)
            .unwrap();

        assert_eq!(
            doc.type_names,
            vec!["Amazon.S3.Model.S3Bucket", "Amazon.S3.Model.Owner"]
        );
        assert_eq!(doc.views.len(), 2);
        assert!(doc.views[0].starts_with("<View>"));
        assert!(doc.views[0].ends_with("</View>"));
        assert!(doc.views[1].contains("<Name>Amazon.S3.Model.Owner</Name>"));
    }

    #[test]
    fn test_parse_rejects_malformed_document() {
        let result = CustomFormatDocument::parse(
            Path::new("broken.ps1xml"),
            "<Configuration><View></Configuration>",
        );
        assert!(matches!(result, Err(GeneratorError::CustomFormat { .. })));
    }

    #[test]
    fn test_missing_folder_yields_no_documents() {
        let dir = tempfile::tempdir().unwrap();
        let collection = ConfigModelCollection::default();

        let docs = collection
            .load_custom_format_documents(dir.path(), None)
            .unwrap();
        assert!(docs.is_empty());
    }
}
