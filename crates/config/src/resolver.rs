//! Type eligibility and column resolution for generated table views

use crate::column::ColumnConfig;
use crate::model::{ConfigModel, ConfigModelCollection};
use crate::INTERNAL_NAMESPACE_MARKER;
use pscmdlet_generator_common::ServiceModel;

/// Source of type property names for config blocks that reflect over a type
pub trait TypeCatalog {
    fn properties_of(&self, type_name: &str) -> Option<&[String]>;
}

impl TypeCatalog for ServiceModel {
    fn properties_of(&self, type_name: &str) -> Option<&[String]> {
        self.find_type(type_name).map(|t| t.properties.as_slice())
    }
}

/// Namespace portion of a fully-qualified type name
pub fn namespace_of(type_name: &str) -> &str {
    type_name.rsplit_once('.').map(|(ns, _)| ns).unwrap_or("")
}

impl ConfigModelCollection {
    pub fn is_namespace_excluded(&self, namespace: &str) -> bool {
        namespace
            .split('.')
            .any(|segment| segment == INTERNAL_NAMESPACE_MARKER)
            || self.namespace_exclusion_set().contains(namespace)
    }

    /// Whether a type may receive a generated display format
    pub fn is_type_eligible(&self, type_name: &str) -> bool {
        if self.is_type_excluded(type_name) {
            return false;
        }
        if self.type_inclusion_set().contains(type_name) {
            return true;
        }
        !self.is_namespace_excluded(namespace_of(type_name))
    }

    pub fn configs_for_type<'a>(
        &'a self,
        type_name: &'a str,
    ) -> impl Iterator<Item = &'a ConfigModel> + 'a {
        self.configs.iter().filter(move |c| c.applies_to(type_name))
    }

    /// Columns for `type_name`, combining every config block that applies.
    ///
    /// Blocks contribute in manifest order; a column already contributed by an
    /// earlier block is merged with the later one. Columns with an explicit
    /// header order come first, ascending; the rest keep contribution order.
    pub fn columns_for_type(
        &self,
        type_name: &str,
        catalog: &dyn TypeCatalog,
    ) -> Vec<ColumnConfig> {
        let mut columns: Vec<ColumnConfig> = Vec::new();

        for config in self.configs_for_type(type_name) {
            for column in contributed_columns(config, catalog) {
                let existing = column
                    .key()
                    .and_then(|key| columns.iter_mut().find(|c| c.key() == Some(key)));
                match existing {
                    Some(existing) => existing.merge(&column),
                    None => columns.push(column),
                }
            }
        }

        columns.sort_by_key(|c| (c.header_order == 0, c.header_order));
        columns
    }
}

fn contributed_columns(config: &ConfigModel, catalog: &dyn TypeCatalog) -> Vec<ColumnConfig> {
    if !config.reflect_over_type() {
        return config.columns.clone();
    }

    let properties_type = config.properties_type.as_deref().unwrap_or_default();
    catalog
        .properties_of(properties_type.trim())
        .unwrap_or_default()
        .iter()
        .filter(|p| !config.skips(p))
        .map(|p| ColumnConfig::for_property(p))
        .collect()
}
