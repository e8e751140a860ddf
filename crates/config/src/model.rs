//! Configuration manifest model and loading

use crate::column::ColumnConfig;
use crate::custom_formats::CustomFormatCache;
use crate::CONFIGS_FILE_NAME;
use pscmdlet_generator_common::{GeneratorError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::{Mutex, OnceLock};

/// One group of display rules applying to a set of types
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConfigModel {
    #[serde(default, deserialize_with = "xml_list::types")]
    pub applicable_types: Vec<String>,
    #[serde(default, deserialize_with = "xml_list::columns")]
    pub columns: Vec<ColumnConfig>,
    /// Type whose properties become the columns, instead of `columns`
    #[serde(default)]
    pub properties_type: Option<String>,
    #[serde(default, deserialize_with = "xml_list::properties")]
    pub skip_properties: Vec<String>,
}

impl ConfigModel {
    pub fn reflect_over_type(&self) -> bool {
        self.properties_type
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty())
    }

    pub fn applies_to(&self, type_name: &str) -> bool {
        self.applicable_types.iter().any(|t| t == type_name)
    }

    pub fn skips(&self, property: &str) -> bool {
        self.skip_properties.iter().any(|p| p == property)
    }
}

/// Root of the display-format configuration manifest.
///
/// The three set accessors and the custom format cache are computed on first
/// access and never rebuilt; later edits to the source lists are not observed.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConfigModelCollection {
    #[serde(default, deserialize_with = "xml_list::namespaces")]
    pub namespaces_to_exclude: Vec<String>,
    #[serde(default, deserialize_with = "xml_list::types")]
    pub types_to_include: Vec<String>,
    #[serde(default, deserialize_with = "xml_list::types")]
    pub types_to_exclude: Vec<String>,
    #[serde(default, deserialize_with = "xml_list::configs")]
    pub configs: Vec<ConfigModel>,

    #[serde(skip)]
    pub(crate) verbose: bool,
    #[serde(skip)]
    namespace_exclusions: OnceLock<HashSet<String>>,
    #[serde(skip)]
    type_inclusions: OnceLock<HashSet<String>>,
    #[serde(skip)]
    type_exclusions: OnceLock<HashSet<String>>,
    #[serde(skip)]
    pub(crate) custom_formats: OnceLock<CustomFormatCache>,
    /// Held while a cold custom format cache is being filled
    #[serde(skip)]
    pub(crate) custom_formats_gate: Mutex<()>,
}

impl ConfigModelCollection {
    pub fn new(
        namespaces_to_exclude: Vec<String>,
        types_to_include: Vec<String>,
        types_to_exclude: Vec<String>,
        configs: Vec<ConfigModel>,
    ) -> Self {
        Self {
            namespaces_to_exclude,
            types_to_include,
            types_to_exclude,
            configs,
            ..Self::default()
        }
    }

    /// Parse a manifest document
    pub fn from_xml(content: &str) -> std::result::Result<Self, quick_xml::DeError> {
        quick_xml::de::from_str(content)
    }

    /// Enable diagnostic output
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn namespace_exclusion_set(&self) -> &HashSet<String> {
        self.namespace_exclusions
            .get_or_init(|| self.namespaces_to_exclude.iter().cloned().collect())
    }

    pub fn type_inclusion_set(&self) -> &HashSet<String> {
        self.type_inclusions
            .get_or_init(|| self.types_to_include.iter().cloned().collect())
    }

    /// Explicitly configured exclusions. Types declared by custom format
    /// documents are tracked alongside, see [`Self::effective_type_exclusions`].
    pub fn type_exclusion_set(&self) -> &HashSet<String> {
        self.type_exclusions
            .get_or_init(|| self.types_to_exclude.iter().cloned().collect())
    }

    pub(crate) fn log(&self, message: &str) {
        if self.verbose {
            eprintln!("→ {message}");
        }
    }
}

/// Load the configuration manifest from `folder`
pub fn load_all_configs(folder: &Path, verbose: bool) -> Result<ConfigModelCollection> {
    let joined = folder.join(CONFIGS_FILE_NAME);
    let path = std::path::absolute(&joined).unwrap_or(joined);

    if verbose {
        eprintln!("→ Loading configuration manifest {}", path.display());
    }

    let content = fs::read_to_string(&path).map_err(|e| GeneratorError::ConfigLoad {
        path: path.clone(),
        source: Box::new(e),
    })?;

    let collection = ConfigModelCollection::from_xml(&content).map_err(|e| {
        GeneratorError::ConfigLoad {
            path: path.clone(),
            source: Box::new(e),
        }
    })?;

    Ok(collection.verbose(verbose))
}

/// Unwrapping of `<List><Item>..</Item></List>` manifest elements
mod xml_list {
    use crate::column::ColumnConfig;
    use crate::model::ConfigModel;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    struct Namespaces {
        #[serde(rename = "Namespace", default)]
        items: Vec<String>,
    }

    #[derive(Deserialize)]
    struct Types {
        #[serde(rename = "Type", default)]
        items: Vec<String>,
    }

    #[derive(Deserialize)]
    struct Properties {
        #[serde(rename = "Property", default)]
        items: Vec<String>,
    }

    #[derive(Deserialize)]
    struct Columns {
        #[serde(rename = "ColumnConfig", default)]
        items: Vec<ColumnConfig>,
    }

    #[derive(Deserialize)]
    struct Configs {
        #[serde(rename = "ConfigModel", default)]
        items: Vec<ConfigModel>,
    }

    pub fn namespaces<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        Ok(Namespaces::deserialize(d)?.items)
    }

    pub fn types<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        Ok(Types::deserialize(d)?.items)
    }

    pub fn properties<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        Ok(Properties::deserialize(d)?.items)
    }

    pub fn columns<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<ColumnConfig>, D::Error> {
        Ok(Columns::deserialize(d)?.items)
    }

    pub fn configs<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<ConfigModel>, D::Error> {
        Ok(Configs::deserialize(d)?.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::HeaderAlignment;

    const MANIFEST: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<ConfigModelCollection>
  <NamespacesToExclude>
    <Namespace>Amazon.Runtime</Namespace>
    <Namespace>Amazon.Runtime</Namespace>
    <Namespace>Amazon.Util</Namespace>
  </NamespacesToExclude>
  <TypesToInclude>
    <Type>Amazon.S3.Model.S3Object</Type>
  </TypesToInclude>
  <TypesToExclude>
    <Type>Amazon.S3.Model.GetObjectResponse</Type>
  </TypesToExclude>
  <Configs>
    <ConfigModel>
      <ApplicableTypes>
        <Type>Amazon.S3.Model.S3Bucket</Type>
      </ApplicableTypes>
      <Columns>
        <ColumnConfig>
          <PropertyName>BucketName</PropertyName>
          <HeaderWidth>40</HeaderWidth>
          <HeaderAlignment>Left</HeaderAlignment>
        </ColumnConfig>
        <ColumnConfig>
          <PropertyName>CreationDate</PropertyName>
          <HeaderOrder>1</HeaderOrder>
        </ColumnConfig>
      </Columns>
    </ConfigModel>
    <ConfigModel>
      <ApplicableTypes>
        <Type>Amazon.S3.Model.S3Object</Type>
      </ApplicableTypes>
      <PropertiesType>Amazon.S3.Model.S3Object</PropertiesType>
      <SkipProperties>
        <Property>ChecksumAlgorithm</Property>
      </SkipProperties>
    </ConfigModel>
  </Configs>
</ConfigModelCollection>
"#;

    #[test]
    fn test_parse_manifest() {
        let collection = ConfigModelCollection::from_xml(MANIFEST).unwrap();

        assert_eq!(collection.namespaces_to_exclude.len(), 3);
        assert_eq!(collection.types_to_include, vec!["Amazon.S3.Model.S3Object"]);
        assert_eq!(collection.configs.len(), 2);

        let buckets = &collection.configs[0];
        assert!(!buckets.reflect_over_type());
        assert_eq!(buckets.columns.len(), 2);
        assert_eq!(buckets.columns[0].header_width, 40);
        assert_eq!(buckets.columns[0].header_alignment, HeaderAlignment::Left);
        assert_eq!(buckets.columns[1].header_order, 1);

        let objects = &collection.configs[1];
        assert!(objects.reflect_over_type());
        assert!(objects.skips("ChecksumAlgorithm"));
        assert!(objects.applies_to("Amazon.S3.Model.S3Object"));
    }

    #[test]
    fn test_sets_deduplicate() {
        let collection = ConfigModelCollection::from_xml(MANIFEST).unwrap();
        let namespaces = collection.namespace_exclusion_set();
        assert_eq!(namespaces.len(), 2);
        assert!(namespaces.contains("Amazon.Runtime"));
        assert!(namespaces.contains("Amazon.Util"));
    }

    #[test]
    fn test_sets_are_memoized() {
        let mut collection = ConfigModelCollection::new(
            vec!["Amazon.Runtime".to_string()],
            vec!["Amazon.S3.Model.S3Object".to_string()],
            vec!["Amazon.S3.Model.Owner".to_string()],
            vec![],
        );

        let first_namespaces = collection.namespace_exclusion_set().clone();
        let first_inclusions = collection.type_inclusion_set().clone();
        let first_exclusions = collection.type_exclusion_set().clone();

        collection.namespaces_to_exclude.push("Amazon.Util".to_string());
        collection.types_to_include.clear();
        collection.types_to_exclude.push("Amazon.S3.Model.Grant".to_string());

        assert_eq!(collection.namespace_exclusion_set(), &first_namespaces);
        assert_eq!(collection.type_inclusion_set(), &first_inclusions);
        assert_eq!(collection.type_exclusion_set(), &first_exclusions);
        assert!(std::ptr::eq(
            collection.type_exclusion_set(),
            collection.type_exclusion_set()
        ));
    }

    #[test]
    fn test_reflect_over_type_requires_non_blank() {
        let model = ConfigModel {
            properties_type: Some("  ".to_string()),
            ..ConfigModel::default()
        };
        assert!(!model.reflect_over_type());
    }

    #[test]
    fn test_load_all_configs_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_all_configs(dir.path(), false).unwrap_err();

        match err {
            GeneratorError::ConfigLoad { path, .. } => {
                assert!(path.ends_with(CONFIGS_FILE_NAME));
                assert!(path.is_absolute());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_load_all_configs_malformed() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIGS_FILE_NAME),
            "<ConfigModelCollection><Configs>",
        )
        .unwrap();

        let err = load_all_configs(dir.path(), true).unwrap_err();
        assert!(matches!(err, GeneratorError::ConfigLoad { .. }));
        assert!(err.to_string().contains(CONFIGS_FILE_NAME));
    }

    #[test]
    fn test_load_all_configs_reads_manifest() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIGS_FILE_NAME), MANIFEST).unwrap();

        let collection = load_all_configs(dir.path(), false).unwrap();
        assert_eq!(collection.configs.len(), 2);
    }
}
