//! Declaration of an ordered relationship.
//!
//! A [`RelationshipConfig`] names the pieces of one ordered relationship: the
//! owner type, the item type, the generated link type, the array field exposed
//! on the owner, the inverse field on the item, and what happens to an item
//! whose link is destroyed.
//!
//! Names can be given explicitly or inferred from the conventional raw field
//! and link type names:
//!
//! ```
//! use reorder::collection::{DeleteRule, RelationshipConfig};
//!
//! let config = RelationshipConfig::infer("Item", "rawSubItems", "OrderedSubItem").unwrap();
//! assert_eq!(config.array_name(), "subItems");
//! assert_eq!(config.item_type(), "SubItem");
//! assert_eq!(config.inverse_name(), "superitem");
//! assert_eq!(config.delete_rule(), DeleteRule::Cascade);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use crate::constants::{DEFAULT_INVERSE_NAME, LINK_TYPE_PREFIX};

/// What happens to an item when its link is destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteRule {
    /// Delete the item together with its link
    #[default]
    Cascade,
    /// Keep the item; its inverse reference is cleared by the store
    Nullify,
    /// Keep the item untouched
    NoAction,
}

impl DeleteRule {
    /// Whether destroying a link also deletes its item.
    pub fn cascades(self) -> bool {
        matches!(self, DeleteRule::Cascade)
    }
}

impl fmt::Display for DeleteRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeleteRule::Cascade => "cascade",
            DeleteRule::Nullify => "nullify",
            DeleteRule::NoAction => "no_action",
        };
        f.write_str(name)
    }
}

/// Names and rules of one ordered relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipConfig {
    owner_type: String,
    item_type: String,
    link_type: String,
    array_name: String,
    inverse_name: String,
    #[serde(default)]
    delete_rule: DeleteRule,
}

impl RelationshipConfig {
    /// Creates a configuration from explicit names.
    ///
    /// The link type becomes `Ordered{item_type}`, the inverse field name
    /// defaults to `superitem` and the delete rule to [`DeleteRule::Cascade`].
    pub fn new(
        owner_type: impl Into<String>,
        item_type: impl Into<String>,
        array_name: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let owner_type = non_empty(owner_type.into(), "owner type")?;
        let item_type = non_empty(item_type.into(), "item type")?;
        let array_name = non_empty(array_name.into(), "array field")?;
        Ok(Self {
            link_type: format!("{LINK_TYPE_PREFIX}{item_type}"),
            owner_type,
            item_type,
            array_name,
            inverse_name: DEFAULT_INVERSE_NAME.to_string(),
            delete_rule: DeleteRule::default(),
        })
    }

    /// Infers the array field name and the item type from conventional names.
    ///
    /// `rawSubItems` yields the array field `subItems`; `OrderedSubItem` yields
    /// the item type `SubItem`.
    pub fn infer(
        owner_type: impl Into<String>,
        raw_field: &str,
        link_type: &str,
    ) -> Result<Self, ConfigError> {
        let array_name =
            infer_array_name(raw_field).ok_or_else(|| ConfigError::CannotInferArrayName {
                field: raw_field.to_string(),
            })?;
        let item_type =
            infer_item_type(link_type).ok_or_else(|| ConfigError::CannotInferItemType {
                link_type: link_type.to_string(),
            })?;

        let mut config = Self::new(owner_type, item_type, array_name)?;
        config.link_type = link_type.to_string();
        Ok(config)
    }

    pub fn with_item_type(mut self, item_type: impl Into<String>) -> Result<Self, ConfigError> {
        self.item_type = non_empty(item_type.into(), "item type")?;
        Ok(self)
    }

    pub fn with_array_name(mut self, array_name: impl Into<String>) -> Result<Self, ConfigError> {
        self.array_name = non_empty(array_name.into(), "array field")?;
        Ok(self)
    }

    pub fn with_inverse_name(
        mut self,
        inverse_name: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        self.inverse_name = non_empty(inverse_name.into(), "inverse field")?;
        Ok(self)
    }

    pub fn with_delete_rule(mut self, delete_rule: DeleteRule) -> Self {
        self.delete_rule = delete_rule;
        self
    }

    pub fn owner_type(&self) -> &str {
        &self.owner_type
    }

    pub fn item_type(&self) -> &str {
        &self.item_type
    }

    pub fn link_type(&self) -> &str {
        &self.link_type
    }

    pub fn array_name(&self) -> &str {
        &self.array_name
    }

    pub fn inverse_name(&self) -> &str {
        &self.inverse_name
    }

    pub fn delete_rule(&self) -> DeleteRule {
        self.delete_rule
    }
}

fn non_empty(name: String, what: &'static str) -> Result<String, ConfigError> {
    if name.is_empty() {
        Err(ConfigError::EmptyName { what })
    } else {
        Ok(name)
    }
}

/// `rawSubItems` -> `subItems`: drop the leading lowercase word.
fn infer_array_name(raw_field: &str) -> Option<String> {
    let split = raw_field.find(|c: char| !c.is_ascii_lowercase())?;
    if split == 0 {
        return None;
    }
    let mut rest = raw_field[split..].chars();
    let first = rest.next().filter(char::is_ascii_uppercase)?;
    Some(format!("{}{}", first.to_ascii_lowercase(), rest.as_str()))
}

/// `OrderedSubItem` -> `SubItem`: drop the leading capitalised word.
///
/// A name that is one capitalised word and nothing else, such as `Ordered`, is
/// rejected. It is never split inside the word, so it cannot yield `d`.
fn infer_item_type(link_type: &str) -> Option<String> {
    let mut chars = link_type.chars();
    chars.next().filter(char::is_ascii_uppercase)?;
    let rest = chars.as_str().trim_start_matches(|c: char| c.is_ascii_lowercase());
    (!rest.is_empty()).then(|| rest.to_string())
}
