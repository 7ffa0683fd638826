//! Change records produced by a comparison run.
//!
//! Every detected difference is a [`ChangeRecord`]: a locator into the OpenAPI
//! tree, a breaking flag, and a [`Change`] payload. `Change` is a closed union
//! with one variant per record type; the human-readable type label and the
//! added/removed/modified category are both derived from the variant, so a
//! record can never carry a label that disagrees with its payload.

use crate::tree::Node;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;

/// Whether a change added, removed, or modified an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Added,
    Removed,
    Modified,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Added, Category::Removed, Category::Modified];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Added => "added",
            Category::Removed => "removed",
            Category::Modified => "modified",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Category::Added => "Added",
            Category::Removed => "Removed",
            Category::Modified => "Modified",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric and pattern constraints checked on parameter and property schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Constraint {
    Minimum,
    Maximum,
    MinLength,
    MaxLength,
    MinItems,
    MaxItems,
    Pattern,
}

impl Constraint {
    /// Constraints in the order they are compared and reported.
    pub const ALL: [Constraint; 7] = [
        Constraint::Minimum,
        Constraint::Maximum,
        Constraint::MinLength,
        Constraint::MaxLength,
        Constraint::MinItems,
        Constraint::MaxItems,
        Constraint::Pattern,
    ];

    /// The schema keyword for this constraint.
    pub fn key(&self) -> &'static str {
        match self {
            Constraint::Minimum => "minimum",
            Constraint::Maximum => "maximum",
            Constraint::MinLength => "minLength",
            Constraint::MaxLength => "maxLength",
            Constraint::MinItems => "minItems",
            Constraint::MaxItems => "maxItems",
            Constraint::Pattern => "pattern",
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The payload of a change record, one variant per record type.
///
/// Serializes to the variant's fields only (the type label is emitted by
/// [`ChangeRecord`]). Raw document values are kept as `Option<Node>` so that a
/// missing value stays distinguishable from an explicit `null`: a missing value
/// is left out of the serialized details, an explicit one serializes as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged, rename_all_fields = "camelCase")]
pub enum Change {
    // info
    VersionChanged {
        #[serde(skip_serializing_if = "Option::is_none")]
        old: Option<Node>,
        #[serde(skip_serializing_if = "Option::is_none")]
        new: Option<Node>,
    },
    TitleChanged {
        #[serde(skip_serializing_if = "Option::is_none")]
        old: Option<Node>,
        #[serde(skip_serializing_if = "Option::is_none")]
        new: Option<Node>,
    },

    // paths and methods
    PathRemoved {
        methods: Vec<String>,
    },
    PathAdded {
        methods: Vec<String>,
    },
    MethodRemoved {
        method: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        summary: Option<Node>,
    },
    MethodAdded {
        method: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        summary: Option<Node>,
    },

    // operation
    ResponseRemoved {
        status_code: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<Node>,
    },
    ResponseAdded {
        status_code: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<Node>,
    },
    RequestBodyRemoved {
        #[serde(skip_serializing_if = "Option::is_none")]
        required: Option<Node>,
    },
    RequestBodyAdded {
        #[serde(skip_serializing_if = "Option::is_none")]
        required: Option<Node>,
    },
    ParameterRemoved {
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(rename = "in")]
        #[serde(skip_serializing_if = "Option::is_none")]
        location: Option<String>,
        required: bool,
        #[serde(rename = "type")]
        #[serde(skip_serializing_if = "Option::is_none")]
        schema_type: Option<Node>,
    },
    ParameterAdded {
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(rename = "in")]
        #[serde(skip_serializing_if = "Option::is_none")]
        location: Option<String>,
        required: bool,
        #[serde(rename = "type")]
        #[serde(skip_serializing_if = "Option::is_none")]
        schema_type: Option<Node>,
    },

    // parameter detail
    ParameterRequiredStatusChanged {
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        old: Option<Node>,
        #[serde(skip_serializing_if = "Option::is_none")]
        new: Option<Node>,
    },
    ParameterTypeChanged {
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        old: Option<Node>,
        #[serde(skip_serializing_if = "Option::is_none")]
        new: Option<Node>,
    },
    ParameterFormatChanged {
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        old: String,
        new: String,
    },
    ParameterEnumValuesChanged {
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        removed_values: Vec<Node>,
        added_values: Vec<Node>,
        #[serde(skip_serializing_if = "Option::is_none")]
        old_enum: Option<Node>,
        #[serde(skip_serializing_if = "Option::is_none")]
        new_enum: Option<Node>,
    },
    ParameterDefaultValueChanged {
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        old: Option<Node>,
        #[serde(skip_serializing_if = "Option::is_none")]
        new: Option<Node>,
    },
    ParameterConstraintChanged {
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(rename = "change")]
        constraint: Constraint,
        #[serde(skip_serializing_if = "Option::is_none")]
        old: Option<Node>,
        #[serde(skip_serializing_if = "Option::is_none")]
        new: Option<Node>,
    },
    ParameterDescriptionChanged {
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        old: String,
        new: String,
    },

    // response detail
    ResponseDescriptionChanged {
        status_code: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        old: Option<Node>,
        #[serde(skip_serializing_if = "Option::is_none")]
        new: Option<Node>,
    },
    ResponseMediaTypeRemoved {
        status_code: String,
        media_type: String,
    },
    ResponseMediaTypeAdded {
        status_code: String,
        media_type: String,
    },
    ResponseHeaderRemoved {
        status_code: String,
        header_name: String,
    },
    ResponseHeaderAdded {
        status_code: String,
        header_name: String,
    },
    ResponseSchemaRemoved {
        status_code: String,
        media_type: String,
    },
    ResponseSchemaAdded {
        status_code: String,
        media_type: String,
    },
    ResponseSchemaTypeChanged {
        status_code: String,
        media_type: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        old: Option<Node>,
        #[serde(skip_serializing_if = "Option::is_none")]
        new: Option<Node>,
    },
    ResponseSchemaFormatChanged {
        status_code: String,
        media_type: String,
        old: String,
        new: String,
    },
    ResponsePropertyRemoved {
        status_code: String,
        media_type: String,
        property: String,
        #[serde(rename = "type")]
        #[serde(skip_serializing_if = "Option::is_none")]
        property_type: Option<Node>,
        was_required: bool,
    },
    ResponsePropertyAdded {
        status_code: String,
        media_type: String,
        property: String,
        #[serde(rename = "type")]
        #[serde(skip_serializing_if = "Option::is_none")]
        property_type: Option<Node>,
        is_required: bool,
    },
    ResponsePropertyTypeChanged {
        status_code: String,
        media_type: String,
        property: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        old: Option<Node>,
        #[serde(skip_serializing_if = "Option::is_none")]
        new: Option<Node>,
    },
    ResponsePropertyNoLongerRequired {
        status_code: String,
        media_type: String,
        property: String,
    },
    ResponsePropertyNowRequired {
        status_code: String,
        media_type: String,
        property: String,
    },

    // components.schemas
    SchemaRemoved {
        schema_name: String,
    },
    SchemaAdded {
        schema_name: String,
    },
    SchemaPropertyRemoved {
        schema_name: String,
        property: String,
        #[serde(rename = "type")]
        #[serde(skip_serializing_if = "Option::is_none")]
        property_type: Option<Node>,
        was_required: bool,
    },
    SchemaPropertyAdded {
        schema_name: String,
        property: String,
        #[serde(rename = "type")]
        #[serde(skip_serializing_if = "Option::is_none")]
        property_type: Option<Node>,
        is_required: bool,
    },
    PropertyNoLongerRequired {
        schema_name: String,
        property: String,
    },
    PropertyNowRequired {
        schema_name: String,
        property: String,
    },
    SchemaPropertyTypeChanged {
        schema_name: String,
        property: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        old: Option<Node>,
        #[serde(skip_serializing_if = "Option::is_none")]
        new: Option<Node>,
    },
    SchemaPropertyFormatChanged {
        schema_name: String,
        property: String,
        old: String,
        new: String,
    },
    SchemaPropertyEnumChanged {
        schema_name: String,
        property: String,
        removed_values: Vec<Node>,
        added_values: Vec<Node>,
        #[serde(skip_serializing_if = "Option::is_none")]
        old_enum: Option<Node>,
        #[serde(skip_serializing_if = "Option::is_none")]
        new_enum: Option<Node>,
    },
    SchemaPropertyDefaultChanged {
        schema_name: String,
        property: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        old: Option<Node>,
        #[serde(skip_serializing_if = "Option::is_none")]
        new: Option<Node>,
    },
    SchemaPropertyConstraintChanged {
        schema_name: String,
        property: String,
        #[serde(rename = "change")]
        constraint: Constraint,
        #[serde(skip_serializing_if = "Option::is_none")]
        old: Option<Node>,
        #[serde(skip_serializing_if = "Option::is_none")]
        new: Option<Node>,
    },
    SchemaPropertyDescriptionChanged {
        schema_name: String,
        property: String,
        old: String,
        new: String,
    },
    NestedPropertyRemoved {
        schema_name: String,
        property: String,
        #[serde(rename = "type")]
        #[serde(skip_serializing_if = "Option::is_none")]
        property_type: Option<Node>,
    },
    NestedPropertyAdded {
        schema_name: String,
        property: String,
        #[serde(rename = "type")]
        #[serde(skip_serializing_if = "Option::is_none")]
        property_type: Option<Node>,
    },
}

impl Change {
    /// The human-readable record type, e.g. `"Path Removed"` or `"GET Method Added"`.
    pub fn label(&self) -> String {
        let label = match self {
            Change::VersionChanged { .. } => "Version Change",
            Change::TitleChanged { .. } => "Title Change",
            Change::PathRemoved { .. } => "Path Removed",
            Change::PathAdded { .. } => "Path Added",
            Change::MethodRemoved { method, .. } => {
                return format!("{} Method Removed", method.to_uppercase())
            }
            Change::MethodAdded { method, .. } => {
                return format!("{} Method Added", method.to_uppercase())
            }
            Change::ResponseRemoved { .. } => "Response Removed",
            Change::ResponseAdded { .. } => "Response Added",
            Change::RequestBodyRemoved { .. } => "Request Body Removed",
            Change::RequestBodyAdded { .. } => "Request Body Added",
            Change::ParameterRemoved { .. } => "Parameter Removed",
            Change::ParameterAdded { .. } => "Parameter Added",
            Change::ParameterRequiredStatusChanged { .. } => "Parameter Required Status Changed",
            Change::ParameterTypeChanged { .. } => "Parameter Type Changed",
            Change::ParameterFormatChanged { .. } => "Parameter Format Changed",
            Change::ParameterEnumValuesChanged { .. } => "Parameter Enum Values Changed",
            Change::ParameterDefaultValueChanged { .. } => "Parameter Default Value Changed",
            Change::ParameterConstraintChanged { .. } => "Parameter Constraint Changed",
            Change::ParameterDescriptionChanged { .. } => "Parameter Description Changed",
            Change::ResponseDescriptionChanged { .. } => "Response Description Changed",
            Change::ResponseMediaTypeRemoved { .. } => "Response Media Type Removed",
            Change::ResponseMediaTypeAdded { .. } => "Response Media Type Added",
            Change::ResponseHeaderRemoved { .. } => "Response Header Removed",
            Change::ResponseHeaderAdded { .. } => "Response Header Added",
            Change::ResponseSchemaRemoved { .. } => "Response Schema Removed",
            Change::ResponseSchemaAdded { .. } => "Response Schema Added",
            Change::ResponseSchemaTypeChanged { .. } => "Response Schema Type Changed",
            Change::ResponseSchemaFormatChanged { .. } => "Response Schema Format Changed",
            Change::ResponsePropertyRemoved { .. } => "Response Property Removed",
            Change::ResponsePropertyAdded { .. } => "Response Property Added",
            Change::ResponsePropertyTypeChanged { .. } => "Response Property Type Changed",
            Change::ResponsePropertyNoLongerRequired { .. } => {
                "Response Property No Longer Required"
            }
            Change::ResponsePropertyNowRequired { .. } => "Response Property Now Required",
            Change::SchemaRemoved { .. } => "Schema Removed",
            Change::SchemaAdded { .. } => "Schema Added",
            Change::SchemaPropertyRemoved { .. } => "Schema Property Removed",
            Change::SchemaPropertyAdded { .. } => "Schema Property Added",
            Change::PropertyNoLongerRequired { .. } => "Property No Longer Required",
            Change::PropertyNowRequired { .. } => "Property Now Required",
            Change::SchemaPropertyTypeChanged { .. } => "Schema Property Type Changed",
            Change::SchemaPropertyFormatChanged { .. } => "Schema Property Format Changed",
            Change::SchemaPropertyEnumChanged { .. } => "Schema Property Enum Changed",
            Change::SchemaPropertyDefaultChanged { .. } => "Schema Property Default Changed",
            Change::SchemaPropertyConstraintChanged { .. } => "Schema Property Constraint Changed",
            Change::SchemaPropertyDescriptionChanged { .. } => {
                "Schema Property Description Changed"
            }
            Change::NestedPropertyRemoved { .. } => "Nested Property Removed",
            Change::NestedPropertyAdded { .. } => "Nested Property Added",
        };
        label.to_string()
    }

    pub fn category(&self) -> Category {
        match self {
            Change::PathAdded { .. }
            | Change::MethodAdded { .. }
            | Change::ResponseAdded { .. }
            | Change::RequestBodyAdded { .. }
            | Change::ParameterAdded { .. }
            | Change::ResponseMediaTypeAdded { .. }
            | Change::ResponseHeaderAdded { .. }
            | Change::ResponseSchemaAdded { .. }
            | Change::ResponsePropertyAdded { .. }
            | Change::SchemaAdded { .. }
            | Change::SchemaPropertyAdded { .. }
            | Change::NestedPropertyAdded { .. } => Category::Added,

            Change::PathRemoved { .. }
            | Change::MethodRemoved { .. }
            | Change::ResponseRemoved { .. }
            | Change::RequestBodyRemoved { .. }
            | Change::ParameterRemoved { .. }
            | Change::ResponseMediaTypeRemoved { .. }
            | Change::ResponseHeaderRemoved { .. }
            | Change::ResponseSchemaRemoved { .. }
            | Change::ResponsePropertyRemoved { .. }
            | Change::SchemaRemoved { .. }
            | Change::SchemaPropertyRemoved { .. }
            | Change::NestedPropertyRemoved { .. } => Category::Removed,

            _ => Category::Modified,
        }
    }

    /// Additions that grow the API surface; these drive a minor version bump.
    pub fn is_feature_addition(&self) -> bool {
        self.category() == Category::Added
    }

    /// Documentation, defaults, formats, metadata, and relaxed requirements.
    pub fn is_patch_level(&self) -> bool {
        matches!(
            self,
            Change::VersionChanged { .. }
                | Change::TitleChanged { .. }
                | Change::ParameterDescriptionChanged { .. }
                | Change::ResponseDescriptionChanged { .. }
                | Change::SchemaPropertyDescriptionChanged { .. }
                | Change::ParameterDefaultValueChanged { .. }
                | Change::SchemaPropertyDefaultChanged { .. }
                | Change::ParameterFormatChanged { .. }
                | Change::ResponseSchemaFormatChanged { .. }
                | Change::SchemaPropertyFormatChanged { .. }
                | Change::PropertyNoLongerRequired { .. }
                | Change::ResponsePropertyNoLongerRequired { .. }
        )
    }
}

/// One detected difference between two documents.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeRecord {
    /// Unique within a comparison run, derived from `sequence`.
    pub id: String,
    /// Emission order, starting at 1.
    pub sequence: u64,
    /// Locator in the OpenAPI tree, e.g. `/pets.get.responses.200`.
    pub path: String,
    pub is_breaking: bool,
    pub change: Change,
}

impl ChangeRecord {
    pub fn label(&self) -> String {
        self.change.label()
    }

    pub fn category(&self) -> Category {
        self.change.category()
    }

    /// Every serialized detail field in declaration order. Missing values are
    /// absent; explicit `null`s are kept.
    pub fn details(&self) -> Vec<(String, serde_json::Value)> {
        match serde_json::to_value(&self.change) {
            Ok(serde_json::Value::Object(map)) => map.into_iter().collect(),
            _ => Vec::new(),
        }
    }

    /// Detail fields in declaration order, with `null`s dropped.
    pub fn detail_fields(&self) -> Vec<(String, serde_json::Value)> {
        self.details()
            .into_iter()
            .filter(|(_, v)| !v.is_null())
            .collect()
    }
}

impl Serialize for ChangeRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ChangeRecord", 7)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("sequence", &self.sequence)?;
        state.serialize_field("type", &self.label())?;
        state.serialize_field("path", &self.path)?;
        state.serialize_field("category", &self.category())?;
        state.serialize_field("isBreaking", &self.is_breaking)?;
        state.serialize_field("details", &self.change)?;
        state.end()
    }
}

impl fmt::Display for ChangeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.path, self.label())?;
        if self.is_breaking {
            write!(f, " (breaking)")?;
        }
        Ok(())
    }
}
