//! Record nodes and their fields.

use super::{Common, Elem};
use crate::naming::{NamingContext, NamingError};

/// One field of a [`Struct`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct StructField {
    /// Wire name: the tag value up to the first comma.
    pub tag: String,
    /// Options after the first comma, e.g. `omitempty`.
    pub tag_options: Vec<String>,
    /// The complete annotation text as written in source.
    pub raw_tag: String,
    /// Source-level field name.
    pub field_name: String,
    pub elem: Elem,
}

impl StructField {
    /// Build a field from its tag value (`"name,opt1,opt2"`).
    ///
    /// Empty options are dropped; an empty tag value leaves `tag` empty.
    pub fn new(
        field_name: impl Into<String>,
        tag_value: &str,
        raw_tag: impl Into<String>,
        elem: impl Into<Elem>,
    ) -> Self {
        let mut parts = tag_value.split(',');
        let tag = parts.next().unwrap_or_default().to_string();
        let tag_options = parts
            .filter(|option| !option.is_empty())
            .map(str::to_string)
            .collect();
        Self {
            tag,
            tag_options,
            raw_tag: raw_tag.into(),
            field_name: field_name.into(),
            elem: elem.into(),
        }
    }

    pub fn has_tag_option(&self, option: &str) -> bool {
        self.tag_options.iter().any(|o| o == option)
    }
}

/// A record: ordered, named fields.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Struct {
    pub(super) common: Common,
    fields: Vec<StructField>,
    /// Encode as a positional array instead of a keyed map.
    as_tuple: bool,
}

impl Struct {
    pub fn new(fields: Vec<StructField>) -> Self {
        Self {
            common: Common::default(),
            fields,
            as_tuple: false,
        }
    }

    pub fn fields(&self) -> &[StructField] {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut [StructField] {
        &mut self.fields
    }

    pub fn as_tuple(&self) -> bool {
        self.as_tuple
    }

    pub fn set_as_tuple(&mut self, as_tuple: bool) {
        self.as_tuple = as_tuple;
    }

    pub(super) fn bind_name(
        &mut self,
        path: &str,
        names: &mut NamingContext,
    ) -> Result<(), NamingError> {
        self.common.set_varname(path);
        for field in &mut self.fields {
            let field_path = format!("{path}.{}", field.field_name);
            field.elem.bind_name(&field_path, names)?;
        }
        Ok(())
    }

    /// Declared name, or an anonymous `struct{...}` literal type.
    pub fn type_name(&self) -> &str {
        self.common.name_with(|| {
            let mut name = String::from("struct{\n");
            for field in &self.fields {
                name.push_str(&field.field_name);
                name.push(' ');
                name.push_str(field.elem.type_name());
                name.push(' ');
                name.push_str(&field.raw_tag);
                name.push_str(";\n");
            }
            name.push('}');
            name
        })
    }

    pub fn complexity(&self) -> usize {
        1 + self
            .fields
            .iter()
            .map(|field| field.elem.complexity())
            .sum::<usize>()
    }

    /// Only named records have an empty literal; anonymous ones are
    /// unsupported.
    pub fn zero_expr(&self) -> Option<String> {
        self.common.declared().map(|name| format!("({name}{{}})"))
    }

    /// Any field carries `option`.
    pub fn has_tag_option(&self, option: &str) -> bool {
        self.fields.iter().any(|field| field.has_tag_option(option))
    }

    /// Number of fields carrying `option`.
    pub fn count_fields_with_tag_option(&self, option: &str) -> usize {
        self.fields
            .iter()
            .filter(|field| field.has_tag_option(option))
            .count()
    }
}
