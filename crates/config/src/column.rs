//! Display column configuration and override merging

use serde::{Deserialize, Serialize};

/// Horizontal alignment of a table column header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum HeaderAlignment {
    #[default]
    None,
    Left,
    Right,
}

impl HeaderAlignment {
    pub fn is_set(self) -> bool {
        self != HeaderAlignment::None
    }
}

/// One display column of a generated table view
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ColumnConfig {
    #[serde(default)]
    pub header_label: Option<String>,
    #[serde(default)]
    pub header_width: u32,
    #[serde(default)]
    pub header_alignment: HeaderAlignment,
    #[serde(default)]
    pub header_order: i32,
    /// Masks the column value in rendered output
    #[serde(default)]
    pub sensitive: bool,
    /// PowerShell expression computing the column value
    #[serde(default)]
    pub script_block: Option<String>,
    /// Source property of the formatted object
    #[serde(default)]
    pub property_name: Option<String>,
}

impl ColumnConfig {
    /// Column bound to a single object property
    pub fn for_property(name: &str) -> Self {
        Self {
            property_name: Some(name.to_string()),
            ..Self::default()
        }
    }

    /// Identity used to match columns contributed by different config blocks
    pub fn key(&self) -> Option<&str> {
        self.property_name
            .as_deref()
            .or(self.header_label.as_deref())
            .or(self.script_block.as_deref())
    }

    /// Overlay `other` onto this column.
    ///
    /// Every field that `other` sets wins; fields it leaves at their default
    /// keep the current value. `sensitive` is sticky once set.
    pub fn merge(&mut self, other: &ColumnConfig) {
        if other.header_label.is_some() {
            self.header_label.clone_from(&other.header_label);
        }
        if other.header_width != 0 {
            self.header_width = other.header_width;
        }
        if other.header_alignment.is_set() {
            self.header_alignment = other.header_alignment;
        }
        if other.header_order != 0 {
            self.header_order = other.header_order;
        }
        self.sensitive |= other.sensitive;
        if other.script_block.is_some() {
            self.script_block.clone_from(&other.script_block);
        }
        if other.property_name.is_some() {
            self.property_name.clone_from(&other.property_name);
        }
    }

    /// Header text, falling back to the property name
    pub fn header(&self) -> &str {
        self.header_label
            .as_deref()
            .or(self.property_name.as_deref())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_column() -> ColumnConfig {
        ColumnConfig {
            header_label: Some("Name".to_string()),
            header_width: 30,
            header_alignment: HeaderAlignment::Left,
            header_order: 2,
            sensitive: false,
            script_block: None,
            property_name: Some("BucketName".to_string()),
        }
    }

    #[test]
    fn test_merge_with_default_is_noop() {
        let mut column = full_column();
        column.merge(&ColumnConfig::default());
        assert_eq!(column, full_column());
    }

    #[test]
    fn test_merge_overrides_set_fields_only() {
        let mut column = full_column();
        let other = ColumnConfig {
            header_width: 12,
            header_alignment: HeaderAlignment::Right,
            script_block: Some("$_.Name.ToUpper()".to_string()),
            ..ColumnConfig::default()
        };

        column.merge(&other);

        assert_eq!(column.header_label.as_deref(), Some("Name"));
        assert_eq!(column.header_width, 12);
        assert_eq!(column.header_alignment, HeaderAlignment::Right);
        assert_eq!(column.header_order, 2);
        assert_eq!(column.script_block.as_deref(), Some("$_.Name.ToUpper()"));
        assert_eq!(column.property_name.as_deref(), Some("BucketName"));
    }

    #[test]
    fn test_merge_is_order_dependent() {
        let a = ColumnConfig {
            header_width: 10,
            ..ColumnConfig::default()
        };
        let b = ColumnConfig {
            header_width: 20,
            ..ColumnConfig::default()
        };

        let mut a_then_b = ColumnConfig::default();
        a_then_b.merge(&a);
        a_then_b.merge(&b);

        let mut b_then_a = ColumnConfig::default();
        b_then_a.merge(&b);
        b_then_a.merge(&a);

        assert_eq!(a_then_b.header_width, 20);
        assert_eq!(b_then_a.header_width, 10);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let other = full_column();
        let mut once = ColumnConfig::default();
        once.merge(&other);
        let mut twice = once.clone();
        twice.merge(&other);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_sensitive_flag_sticks() {
        let mut column = ColumnConfig {
            sensitive: true,
            ..ColumnConfig::default()
        };
        column.merge(&ColumnConfig::for_property("SecretKey"));
        assert!(column.sensitive);
    }

    #[test]
    fn test_key_and_header_fallbacks() {
        let column = ColumnConfig::for_property("Owner");
        assert_eq!(column.key(), Some("Owner"));
        assert_eq!(column.header(), "Owner");

        let scripted = ColumnConfig {
            script_block: Some("$_.Size / 1KB".to_string()),
            ..ColumnConfig::default()
        };
        assert_eq!(scripted.key(), Some("$_.Size / 1KB"));
        assert_eq!(scripted.header(), "");
    }
}
