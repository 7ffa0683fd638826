//! Structural comparison of two OpenAPI documents.
//!
//! The comparator walks both documents construct by construct (info, paths,
//! methods, operations, parameters, request bodies, responses, media types,
//! headers, schemas, properties) and emits one [`ChangeRecord`] per detected
//! difference into a [`ChangeSink`]. Every record is classified as breaking or
//! not at emission time by the rules in [`crate::policy`].
//!
//! Missing sections (`paths`, `components`, `parameters`, ...) are treated as
//! empty, so a partial document diffs cleanly against a complete one. Only the
//! document roots must be objects.
//!
//! # Examples
//!
//! ```
//! use oapi_diff::{compare, parse_json};
//!
//! let old = parse_json(r#"{"openapi": "3.0.0", "paths": {"/pets": {"get": {}}}}"#).unwrap();
//! let new = parse_json(r#"{"openapi": "3.0.0", "paths": {}}"#).unwrap();
//!
//! let comparison = compare(&old, &new).unwrap();
//! assert_eq!(comparison.records.len(), 1);
//! assert_eq!(comparison.records[0].label(), "Path Removed");
//! assert!(comparison.has_breaking());
//! ```

use crate::change::{Change, ChangeRecord, Constraint};
use crate::classify::ChangeStats;
use crate::error::CompareError;
use crate::index::index_parameters;
use crate::policy::{self, RequiredContext};
use crate::sink::ChangeSink;
use crate::tree::Node;
use indexmap::IndexMap;

/// Path-item key that holds shared parameters rather than an operation.
const PATH_PARAMETERS_KEY: &str = "parameters";

/// The result of one comparison run.
#[derive(Debug, Clone)]
pub struct Comparison {
    /// Records in emission order.
    pub records: Vec<ChangeRecord>,
    /// Counts over `records`.
    pub stats: ChangeStats,
}

impl Comparison {
    /// True when the two documents showed no difference.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True when at least one record could break an existing client.
    pub fn has_breaking(&self) -> bool {
        self.records.iter().any(|r| r.is_breaking)
    }

    /// The breaking records, in emission order.
    ///
    /// # Examples
    ///
    /// ```
    /// use oapi_diff::{compare, parse_yaml};
    ///
    /// let old = parse_yaml("openapi: 3.0.0\ninfo:\n  version: 1.0.0\npaths:\n  /pets:\n    get: {}\n").unwrap();
    /// let new = parse_yaml("openapi: 3.0.0\ninfo:\n  version: 2.0.0\npaths: {}\n").unwrap();
    ///
    /// let comparison = compare(&old, &new).unwrap();
    /// assert_eq!(comparison.records.len(), 2);
    ///
    /// let breaking = comparison.breaking();
    /// assert_eq!(breaking.len(), 1);
    /// assert_eq!(breaking[0].path, "/pets");
    /// ```
    pub fn breaking(&self) -> Vec<&ChangeRecord> {
        self.records.iter().filter(|r| r.is_breaking).collect()
    }
}

/// Compares two parsed documents and returns every detected change.
///
/// Neither document is modified. The output order is the traversal order and
/// is deterministic for a given pair of inputs.
///
/// # Arguments
///
/// * `old` - The base document
/// * `new` - The revised document
///
/// # Returns
///
/// A [`Comparison`] with the records in emission order and their counts.
///
/// # Errors
///
/// Returns [`CompareError::NotAnObject`] if either root is not an object.
pub fn compare(old: &Node, new: &Node) -> Result<Comparison, CompareError> {
    if old.as_object().is_none() {
        return Err(CompareError::not_an_object("old", old.type_name()));
    }
    if new.as_object().is_none() {
        return Err(CompareError::not_an_object("new", new.type_name()));
    }

    let mut differ = TreeDiffer::new();
    differ.compare_info(old.get("info"), new.get("info"));
    differ.compare_paths(old.get_present("paths"), new.get_present("paths"));
    differ.compare_components(old.get_present("components"), new.get_present("components"));

    let records = differ.finish();
    let stats = ChangeStats::from_records(&records);
    tracing::info!(
        total = stats.total,
        breaking = stats.breaking,
        added = stats.added,
        removed = stats.removed,
        modified = stats.modified,
        "comparison complete"
    );

    Ok(Comparison { records, stats })
}

/// Recursive comparator. One method per OpenAPI construct, all writing into
/// the same sink.
struct TreeDiffer {
    sink: ChangeSink,
}

impl TreeDiffer {
    fn new() -> Self {
        Self {
            sink: ChangeSink::new(),
        }
    }

    fn finish(self) -> Vec<ChangeRecord> {
        self.sink.into_records()
    }

    fn emit(&mut self, path: impl Into<String>, change: Change, is_breaking: bool) {
        self.sink.record(path, change, is_breaking);
    }

    fn compare_info(&mut self, old: Option<&Node>, new: Option<&Node>) {
        let old_version = field(old, "version");
        let new_version = field(new, "version");
        if old_version != new_version {
            self.emit(
                "info.version",
                Change::VersionChanged {
                    old: old_version.cloned(),
                    new: new_version.cloned(),
                },
                false,
            );
        }

        let old_title = field(old, "title");
        let new_title = field(new, "title");
        if old_title != new_title {
            self.emit(
                "info.title",
                Change::TitleChanged {
                    old: old_title.cloned(),
                    new: new_title.cloned(),
                },
                false,
            );
        }
    }

    fn compare_paths(&mut self, old: Option<&Node>, new: Option<&Node>) {
        let old_paths = as_section(old, "paths");
        let new_paths = as_section(new, "paths");
        tracing::debug!(
            old = old_paths.map_or(0, IndexMap::len),
            new = new_paths.map_or(0, IndexMap::len),
            "comparing paths"
        );

        for path in union_keys(old_paths, new_paths) {
            match (present(old_paths, path), present(new_paths, path)) {
                (Some(item), None) => self.emit(
                    path,
                    Change::PathRemoved {
                        methods: operation_keys(item),
                    },
                    policy::is_removal_breaking(),
                ),
                (None, Some(item)) => self.emit(
                    path,
                    Change::PathAdded {
                        methods: operation_keys(item),
                    },
                    false,
                ),
                (Some(old_item), Some(new_item)) => self.compare_methods(path, old_item, new_item),
                (None, None) => {}
            }
        }
    }

    fn compare_methods(&mut self, path: &str, old_item: &Node, new_item: &Node) {
        let old_ops = old_item.as_object();
        let new_ops = new_item.as_object();

        for method in union_keys(old_ops, new_ops) {
            // Path-level shared parameters are not an operation.
            if method == PATH_PARAMETERS_KEY {
                continue;
            }

            match (present(old_ops, method), present(new_ops, method)) {
                (Some(op), None) => self.emit(
                    path,
                    Change::MethodRemoved {
                        method: method.to_string(),
                        summary: op.get("summary").cloned(),
                    },
                    policy::is_removal_breaking(),
                ),
                (None, Some(op)) => self.emit(
                    path,
                    Change::MethodAdded {
                        method: method.to_string(),
                        summary: op.get("summary").cloned(),
                    },
                    false,
                ),
                (Some(old_op), Some(new_op)) => {
                    self.compare_operation(path, method, old_op, new_op)
                }
                (None, None) => {}
            }
        }
    }

    fn compare_operation(&mut self, path: &str, method: &str, old_op: &Node, new_op: &Node) {
        let op_path = format!("{}.{}", path, method);

        let old_responses = entries(Some(old_op), "responses");
        let new_responses = entries(Some(new_op), "responses");
        for code in union_keys(old_responses, new_responses) {
            let response_path = format!("{}.responses.{}", op_path, code);
            match (present(old_responses, code), present(new_responses, code)) {
                (Some(response), None) => self.emit(
                    response_path,
                    Change::ResponseRemoved {
                        status_code: code.to_string(),
                        description: response.get("description").cloned(),
                    },
                    policy::is_removal_breaking(),
                ),
                (None, Some(response)) => self.emit(
                    response_path,
                    Change::ResponseAdded {
                        status_code: code.to_string(),
                        description: response.get("description").cloned(),
                    },
                    false,
                ),
                (Some(old_response), Some(new_response)) => {
                    self.compare_response(&response_path, code, old_response, new_response)
                }
                (None, None) => {}
            }
        }

        self.compare_parameters(
            &op_path,
            list(Some(old_op), "parameters"),
            list(Some(new_op), "parameters"),
        );

        // Only presence and the `required` flag of the body are compared.
        let body_path = format!("{}.requestBody", op_path);
        match (
            old_op.get_present("requestBody"),
            new_op.get_present("requestBody"),
        ) {
            (Some(body), None) => self.emit(
                body_path,
                Change::RequestBodyRemoved {
                    required: body.get("required").cloned(),
                },
                policy::is_removal_breaking(),
            ),
            (None, Some(body)) => {
                let required = body.get("required");
                self.emit(
                    body_path,
                    Change::RequestBodyAdded {
                        required: required.cloned(),
                    },
                    policy::is_addition_breaking(required),
                )
            }
            _ => {}
        }
    }

    fn compare_parameters(&mut self, op_path: &str, old: &[Node], new: &[Node]) {
        let old_index = index_parameters(old);
        let new_index = index_parameters(new);

        for (key, param) in &old_index {
            if !new_index.contains_key(key) {
                let required = param.get("required");
                self.emit(
                    format!("{}.parameters.{}", op_path, key.display_name()),
                    parameter_summary(param, false),
                    policy::is_parameter_removal_breaking(required),
                );
            }
        }

        for (key, param) in &new_index {
            match old_index.get(key) {
                None => {
                    let required = param.get("required");
                    self.emit(
                        format!("{}.parameters.{}", op_path, key.display_name()),
                        parameter_summary(param, true),
                        policy::is_addition_breaking(required),
                    );
                }
                Some(old_param) => {
                    let param_path = format!("{}.parameters.{}", op_path, key.display_name());
                    self.compare_parameter(&param_path, old_param, param);
                }
            }
        }
    }

    fn compare_parameter(&mut self, param_path: &str, old: &Node, new: &Node) {
        let name = old.get("name").and_then(Node::as_str).map(str::to_string);

        let (old_required, new_required) = (old.get("required"), new.get("required"));
        if old_required != new_required {
            self.emit(
                param_path,
                Change::ParameterRequiredStatusChanged {
                    name: name.clone(),
                    old: old_required.cloned(),
                    new: new_required.cloned(),
                },
                policy::is_required_flip_breaking(old_required, new_required),
            );
        }

        let old_schema = old.get_present("schema");
        let new_schema = new.get_present("schema");

        let (old_type, new_type) = (field(old_schema, "type"), field(new_schema, "type"));
        if old_type != new_type {
            self.emit(
                param_path,
                Change::ParameterTypeChanged {
                    name: name.clone(),
                    old: old_type.cloned(),
                    new: new_type.cloned(),
                },
                policy::is_type_change_breaking(),
            );
        }

        let (old_format, new_format) = (field(old_schema, "format"), field(new_schema, "format"));
        if old_format != new_format {
            self.emit(
                param_path,
                Change::ParameterFormatChanged {
                    name: name.clone(),
                    old: format_label(old_format),
                    new: format_label(new_format),
                },
                format_breaking(old_format, new_format),
            );
        }

        let (old_enum, new_enum) = (field(old_schema, "enum"), field(new_schema, "enum"));
        if let Some(delta) = policy::enum_delta(old_enum, new_enum) {
            let is_breaking = policy::is_enum_change_breaking(&delta.removed);
            self.emit(
                param_path,
                Change::ParameterEnumValuesChanged {
                    name: name.clone(),
                    removed_values: delta.removed,
                    added_values: delta.added,
                    old_enum: old_enum.cloned(),
                    new_enum: new_enum.cloned(),
                },
                is_breaking,
            );
        }

        let (old_default, new_default) =
            (field(old_schema, "default"), field(new_schema, "default"));
        if old_default != new_default {
            self.emit(
                param_path,
                Change::ParameterDefaultValueChanged {
                    name: name.clone(),
                    old: old_default.cloned(),
                    new: new_default.cloned(),
                },
                false,
            );
        }

        for constraint in Constraint::ALL {
            let old_value = field(old_schema, constraint.key());
            let new_value = field(new_schema, constraint.key());
            if old_value != new_value {
                self.emit(
                    param_path,
                    Change::ParameterConstraintChanged {
                        name: name.clone(),
                        constraint,
                        old: old_value.cloned(),
                        new: new_value.cloned(),
                    },
                    policy::is_constraint_change_breaking(constraint, old_value, new_value),
                );
            }
        }

        let (old_desc, new_desc) = (old.get("description"), new.get("description"));
        if old_desc != new_desc {
            self.emit(
                param_path,
                Change::ParameterDescriptionChanged {
                    name,
                    old: text_or_empty(old_desc),
                    new: text_or_empty(new_desc),
                },
                false,
            );
        }
    }

    fn compare_response(&mut self, response_path: &str, code: &str, old: &Node, new: &Node) {
        let (old_desc, new_desc) = (old.get("description"), new.get("description"));
        if old_desc != new_desc {
            self.emit(
                response_path,
                Change::ResponseDescriptionChanged {
                    status_code: code.to_string(),
                    old: old_desc.cloned(),
                    new: new_desc.cloned(),
                },
                false,
            );
        }

        let old_content = entries(Some(old), "content");
        let new_content = entries(Some(new), "content");
        for media_type in union_keys(old_content, new_content) {
            let media_path = format!("{}.content.{}", response_path, media_type);
            match (
                present(old_content, media_type),
                present(new_content, media_type),
            ) {
                (Some(_), None) => self.emit(
                    media_path,
                    Change::ResponseMediaTypeRemoved {
                        status_code: code.to_string(),
                        media_type: media_type.to_string(),
                    },
                    policy::is_removal_breaking(),
                ),
                (None, Some(_)) => self.emit(
                    media_path,
                    Change::ResponseMediaTypeAdded {
                        status_code: code.to_string(),
                        media_type: media_type.to_string(),
                    },
                    false,
                ),
                (Some(old_media), Some(new_media)) => {
                    let scope = ResponseScope {
                        status_code: code,
                        media_type,
                    };
                    self.compare_response_schema(
                        &format!("{}.schema", media_path),
                        &scope,
                        old_media.get_present("schema"),
                        new_media.get_present("schema"),
                    );
                }
                (None, None) => {}
            }
        }

        // Header schemas are not compared.
        let old_headers = entries(Some(old), "headers");
        let new_headers = entries(Some(new), "headers");
        for header in union_keys(old_headers, new_headers) {
            let header_path = format!("{}.headers.{}", response_path, header);
            match (present(old_headers, header), present(new_headers, header)) {
                (Some(_), None) => self.emit(
                    header_path,
                    Change::ResponseHeaderRemoved {
                        status_code: code.to_string(),
                        header_name: header.to_string(),
                    },
                    policy::is_removal_breaking(),
                ),
                (None, Some(_)) => self.emit(
                    header_path,
                    Change::ResponseHeaderAdded {
                        status_code: code.to_string(),
                        header_name: header.to_string(),
                    },
                    false,
                ),
                _ => {}
            }
        }
    }

    /// Compares a response body schema, recursing into object properties and
    /// array items. Either side missing short-circuits after one record.
    fn compare_response_schema(
        &mut self,
        schema_path: &str,
        scope: &ResponseScope<'_>,
        old: Option<&Node>,
        new: Option<&Node>,
    ) {
        let (old, new) = match (old, new) {
            (None, None) => return,
            (Some(_), None) => {
                self.emit(
                    schema_path,
                    Change::ResponseSchemaRemoved {
                        status_code: scope.status_code.to_string(),
                        media_type: scope.media_type.to_string(),
                    },
                    policy::is_removal_breaking(),
                );
                return;
            }
            (None, Some(_)) => {
                self.emit(
                    schema_path,
                    Change::ResponseSchemaAdded {
                        status_code: scope.status_code.to_string(),
                        media_type: scope.media_type.to_string(),
                    },
                    false,
                );
                return;
            }
            (Some(old), Some(new)) => (old, new),
        };

        let (old_type, new_type) = (old.get("type"), new.get("type"));
        if old_type != new_type {
            self.emit(
                schema_path,
                Change::ResponseSchemaTypeChanged {
                    status_code: scope.status_code.to_string(),
                    media_type: scope.media_type.to_string(),
                    old: old_type.cloned(),
                    new: new_type.cloned(),
                },
                policy::is_type_change_breaking(),
            );
        }

        if is_type(old, "object") && is_type(new, "object") {
            self.compare_response_properties(schema_path, scope, old, new);
        }

        if is_type(old, "array") && is_type(new, "array") {
            self.compare_response_schema(
                &format!("{}.items", schema_path),
                scope,
                old.get_present("items"),
                new.get_present("items"),
            );
        }

        let (old_format, new_format) = (old.get("format"), new.get("format"));
        if old_format != new_format {
            self.emit(
                schema_path,
                Change::ResponseSchemaFormatChanged {
                    status_code: scope.status_code.to_string(),
                    media_type: scope.media_type.to_string(),
                    old: format_label(old_format),
                    new: format_label(new_format),
                },
                format_breaking(old_format, new_format),
            );
        }
    }

    fn compare_response_properties(
        &mut self,
        schema_path: &str,
        scope: &ResponseScope<'_>,
        old: &Node,
        new: &Node,
    ) {
        let old_props = entries(Some(old), "properties");
        let new_props = entries(Some(new), "properties");
        let old_required = required_names(old);
        let new_required = required_names(new);

        for prop in union_keys(old_props, new_props) {
            let prop_path = format!("{}.properties.{}", schema_path, prop);
            match (present(old_props, prop), present(new_props, prop)) {
                (Some(old_prop), None) => {
                    let was_required = old_required.contains(&prop);
                    self.emit(
                        prop_path,
                        Change::ResponsePropertyRemoved {
                            status_code: scope.status_code.to_string(),
                            media_type: scope.media_type.to_string(),
                            property: prop.to_string(),
                            property_type: old_prop.get("type").cloned(),
                            was_required,
                        },
                        policy::is_property_removal_breaking(was_required),
                    );
                }
                (None, Some(new_prop)) => self.emit(
                    prop_path,
                    Change::ResponsePropertyAdded {
                        status_code: scope.status_code.to_string(),
                        media_type: scope.media_type.to_string(),
                        property: prop.to_string(),
                        property_type: new_prop.get("type").cloned(),
                        is_required: new_required.contains(&prop),
                    },
                    false,
                ),
                (Some(old_prop), Some(new_prop)) => {
                    let (old_type, new_type) = (old_prop.get("type"), new_prop.get("type"));
                    if old_type != new_type {
                        self.emit(
                            prop_path.as_str(),
                            Change::ResponsePropertyTypeChanged {
                                status_code: scope.status_code.to_string(),
                                media_type: scope.media_type.to_string(),
                                property: prop.to_string(),
                                old: old_type.cloned(),
                                new: new_type.cloned(),
                            },
                            policy::is_type_change_breaking(),
                        );
                    }

                    if is_type(old_prop, "object") && is_type(new_prop, "object") {
                        self.compare_response_properties(&prop_path, scope, old_prop, new_prop);
                    }
                }
                (None, None) => {}
            }
        }

        let required_path = format!("{}.required", schema_path);
        for prop in old_required.iter().filter(|p| !new_required.contains(p)) {
            if present(new_props, prop).is_some() {
                self.emit(
                    required_path.as_str(),
                    Change::ResponsePropertyNoLongerRequired {
                        status_code: scope.status_code.to_string(),
                        media_type: scope.media_type.to_string(),
                        property: prop.to_string(),
                    },
                    policy::is_no_longer_required_breaking(),
                );
            }
        }
        for prop in new_required.iter().filter(|p| !old_required.contains(p)) {
            if present(old_props, prop).is_some() {
                self.emit(
                    required_path.as_str(),
                    Change::ResponsePropertyNowRequired {
                        status_code: scope.status_code.to_string(),
                        media_type: scope.media_type.to_string(),
                        property: prop.to_string(),
                    },
                    policy::is_now_required_breaking(RequiredContext::Response),
                );
            }
        }
    }

    fn compare_components(&mut self, old: Option<&Node>, new: Option<&Node>) {
        let old_schemas = entries(old, "schemas");
        let new_schemas = entries(new, "schemas");
        tracing::debug!(
            old = old_schemas.map_or(0, IndexMap::len),
            new = new_schemas.map_or(0, IndexMap::len),
            "comparing component schemas"
        );

        for name in union_keys(old_schemas, new_schemas) {
            let schema_path = format!("components.schemas.{}", name);
            match (present(old_schemas, name), present(new_schemas, name)) {
                (Some(_), None) => self.emit(
                    schema_path,
                    Change::SchemaRemoved {
                        schema_name: name.to_string(),
                    },
                    policy::is_removal_breaking(),
                ),
                (None, Some(_)) => self.emit(
                    schema_path,
                    Change::SchemaAdded {
                        schema_name: name.to_string(),
                    },
                    false,
                ),
                (Some(old_schema), Some(new_schema)) => {
                    self.compare_schema_properties(name, old_schema, new_schema)
                }
                (None, None) => {}
            }
        }
    }

    fn compare_schema_properties(&mut self, schema_name: &str, old: &Node, new: &Node) {
        let old_props = entries(Some(old), "properties");
        let new_props = entries(Some(new), "properties");
        let old_required = required_names(old);
        let new_required = required_names(new);

        for prop in union_keys(old_props, new_props) {
            let prop_path = format!("components.schemas.{}.properties.{}", schema_name, prop);
            match (present(old_props, prop), present(new_props, prop)) {
                (Some(old_prop), None) => {
                    let was_required = old_required.contains(&prop);
                    self.emit(
                        prop_path,
                        Change::SchemaPropertyRemoved {
                            schema_name: schema_name.to_string(),
                            property: prop.to_string(),
                            property_type: old_prop.get("type").cloned(),
                            was_required,
                        },
                        policy::is_property_removal_breaking(was_required),
                    );
                }
                (None, Some(new_prop)) => self.emit(
                    prop_path,
                    Change::SchemaPropertyAdded {
                        schema_name: schema_name.to_string(),
                        property: prop.to_string(),
                        property_type: new_prop.get("type").cloned(),
                        is_required: new_required.contains(&prop),
                    },
                    false,
                ),
                (Some(old_prop), Some(new_prop)) => {
                    self.compare_property(schema_name, prop, old_prop, new_prop)
                }
                (None, None) => {}
            }
        }

        let required_path = format!("components.schemas.{}.required", schema_name);
        for prop in old_required.iter().filter(|p| !new_required.contains(p)) {
            if present(new_props, prop).is_some() {
                self.emit(
                    required_path.as_str(),
                    Change::PropertyNoLongerRequired {
                        schema_name: schema_name.to_string(),
                        property: prop.to_string(),
                    },
                    policy::is_no_longer_required_breaking(),
                );
            }
        }
        for prop in new_required.iter().filter(|p| !old_required.contains(p)) {
            if present(old_props, prop).is_some() {
                self.emit(
                    required_path.as_str(),
                    Change::PropertyNowRequired {
                        schema_name: schema_name.to_string(),
                        property: prop.to_string(),
                    },
                    policy::is_now_required_breaking(RequiredContext::Component),
                );
            }
        }
    }

    /// Compares one property present on both sides, field by field, then
    /// recurses into nested object properties and array items.
    ///
    /// Nested levels are addressed by extending `schema_name` with the parent
    /// property (`Pet.owner`), so the same routine serves every depth.
    fn compare_property(&mut self, schema_name: &str, prop: &str, old: &Node, new: &Node) {
        let prop_path = format!("components.schemas.{}.properties.{}", schema_name, prop);
        let scope = PropertyScope {
            schema_name,
            property: prop,
        };

        let (old_type, new_type) = (old.get("type"), new.get("type"));
        if old_type != new_type {
            self.emit(
                prop_path.as_str(),
                Change::SchemaPropertyTypeChanged {
                    schema_name: scope.schema(),
                    property: scope.property(),
                    old: old_type.cloned(),
                    new: new_type.cloned(),
                },
                policy::is_type_change_breaking(),
            );
        }

        let (old_format, new_format) = (old.get("format"), new.get("format"));
        if old_format != new_format {
            self.emit(
                prop_path.as_str(),
                Change::SchemaPropertyFormatChanged {
                    schema_name: scope.schema(),
                    property: scope.property(),
                    old: format_label(old_format),
                    new: format_label(new_format),
                },
                format_breaking(old_format, new_format),
            );
        }

        let (old_enum, new_enum) = (old.get("enum"), new.get("enum"));
        if let Some(delta) = policy::enum_delta(old_enum, new_enum) {
            let is_breaking = policy::is_enum_change_breaking(&delta.removed);
            self.emit(
                prop_path.as_str(),
                Change::SchemaPropertyEnumChanged {
                    schema_name: scope.schema(),
                    property: scope.property(),
                    removed_values: delta.removed,
                    added_values: delta.added,
                    old_enum: old_enum.cloned(),
                    new_enum: new_enum.cloned(),
                },
                is_breaking,
            );
        }

        let (old_default, new_default) = (old.get("default"), new.get("default"));
        if old_default != new_default {
            self.emit(
                prop_path.as_str(),
                Change::SchemaPropertyDefaultChanged {
                    schema_name: scope.schema(),
                    property: scope.property(),
                    old: old_default.cloned(),
                    new: new_default.cloned(),
                },
                false,
            );
        }

        for constraint in Constraint::ALL {
            let old_value = old.get(constraint.key());
            let new_value = new.get(constraint.key());
            if old_value != new_value {
                self.emit(
                    prop_path.as_str(),
                    Change::SchemaPropertyConstraintChanged {
                        schema_name: scope.schema(),
                        property: scope.property(),
                        constraint,
                        old: old_value.cloned(),
                        new: new_value.cloned(),
                    },
                    policy::is_constraint_change_breaking(constraint, old_value, new_value),
                );
            }
        }

        let (old_desc, new_desc) = (old.get("description"), new.get("description"));
        if old_desc != new_desc {
            self.emit(
                prop_path.as_str(),
                Change::SchemaPropertyDescriptionChanged {
                    schema_name: scope.schema(),
                    property: scope.property(),
                    old: text_or_empty(old_desc),
                    new: text_or_empty(new_desc),
                },
                false,
            );
        }

        let nested_schema = format!("{}.{}", schema_name, prop);

        if is_type(old, "object") && is_type(new, "object") {
            let old_nested = entries(Some(old), "properties");
            let new_nested = entries(Some(new), "properties");

            for nested in union_keys(old_nested, new_nested) {
                let nested_path = format!("{}.properties.{}", prop_path, nested);
                match (present(old_nested, nested), present(new_nested, nested)) {
                    (Some(old_prop), Some(new_prop)) => {
                        self.compare_property(&nested_schema, nested, old_prop, new_prop)
                    }
                    (Some(old_prop), None) => self.emit(
                        nested_path,
                        Change::NestedPropertyRemoved {
                            schema_name: nested_schema.clone(),
                            property: nested.to_string(),
                            property_type: old_prop.get("type").cloned(),
                        },
                        policy::is_removal_breaking(),
                    ),
                    (None, Some(new_prop)) => self.emit(
                        nested_path,
                        Change::NestedPropertyAdded {
                            schema_name: nested_schema.clone(),
                            property: nested.to_string(),
                            property_type: new_prop.get("type").cloned(),
                        },
                        false,
                    ),
                    (None, None) => {}
                }
            }
        }

        if is_type(old, "array") && is_type(new, "array") {
            if let (Some(old_items), Some(new_items)) =
                (old.get_present("items"), new.get_present("items"))
            {
                self.compare_property(&nested_schema, "items", old_items, new_items);
            }
        }
    }
}

struct ResponseScope<'a> {
    status_code: &'a str,
    media_type: &'a str,
}

struct PropertyScope<'a> {
    schema_name: &'a str,
    property: &'a str,
}

impl PropertyScope<'_> {
    fn schema(&self) -> String {
        self.schema_name.to_string()
    }

    fn property(&self) -> String {
        self.property.to_string()
    }
}

fn field<'a>(node: Option<&'a Node>, key: &str) -> Option<&'a Node> {
    node.and_then(|n| n.get(key))
}

/// The object under `key`, or `None` when it is missing, `null`, or not an
/// object. Non-object sections are logged and otherwise treated as empty.
fn entries<'a>(node: Option<&'a Node>, key: &str) -> Option<&'a IndexMap<String, Node>> {
    as_section(node?.get_present(key), key)
}

/// `section` as an object map; `label` names it in the debug log.
fn as_section<'a>(section: Option<&'a Node>, label: &str) -> Option<&'a IndexMap<String, Node>> {
    let section = section?;
    match section.as_object() {
        Some(map) => Some(map),
        None => {
            tracing::debug!(
                section = label,
                found = section.type_name(),
                "expected an object, treating as empty"
            );
            None
        }
    }
}

/// The array under `key`, or an empty slice.
fn list<'a>(node: Option<&'a Node>, key: &str) -> &'a [Node] {
    let Some(section) = node.and_then(|n| n.get_present(key)) else {
        return &[];
    };
    match section.as_array() {
        Some(items) => items,
        None => {
            tracing::debug!(
                section = key,
                found = section.type_name(),
                "expected an array, treating as empty"
            );
            &[]
        }
    }
}

fn present<'a>(map: Option<&'a IndexMap<String, Node>>, key: &str) -> Option<&'a Node> {
    map.and_then(|m| m.get(key)).filter(|n| !n.is_null())
}

/// Keys of `old` in order, followed by keys only found in `new`.
fn union_keys<'a>(
    old: Option<&'a IndexMap<String, Node>>,
    new: Option<&'a IndexMap<String, Node>>,
) -> Vec<&'a str> {
    let mut keys: Vec<&str> = old
        .map(|m| m.keys().map(String::as_str).collect())
        .unwrap_or_default();
    if let Some(new) = new {
        for key in new.keys() {
            if old.map_or(true, |m| !m.contains_key(key)) {
                keys.push(key);
            }
        }
    }
    keys
}

fn operation_keys(item: &Node) -> Vec<String> {
    item.as_object()
        .map(|ops| {
            ops.keys()
                .filter(|k| k.as_str() != PATH_PARAMETERS_KEY)
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}

fn required_names(schema: &Node) -> Vec<&str> {
    schema
        .get("required")
        .and_then(Node::as_array)
        .map(|names| names.iter().filter_map(Node::as_str).collect())
        .unwrap_or_default()
}

fn is_type(schema: &Node, expected: &str) -> bool {
    schema.get("type").and_then(Node::as_str) == Some(expected)
}

fn format_breaking(old: Option<&Node>, new: Option<&Node>) -> bool {
    policy::is_format_change_breaking(old.and_then(Node::as_str), new.and_then(Node::as_str))
}

/// Formats are reported as text, with `"none"` for an absent or empty format.
fn format_label(format: Option<&Node>) -> String {
    match format {
        Some(node) if node.is_truthy() => node.inline(),
        _ => "none".to_string(),
    }
}

fn text_or_empty(node: Option<&Node>) -> String {
    match node {
        Some(node) if node.is_truthy() => node.inline(),
        _ => String::new(),
    }
}

fn parameter_summary(param: &Node, added: bool) -> Change {
    let name = param.get("name").and_then(Node::as_str).map(str::to_string);
    let location = param.get("in").and_then(Node::as_str).map(str::to_string);
    let required = param.get("required").is_some_and(Node::is_truthy);
    let schema_type = field(param.get_present("schema"), "type").cloned();

    if added {
        Change::ParameterAdded {
            name,
            location,
            required,
            schema_type,
        }
    } else {
        Change::ParameterRemoved {
            name,
            location,
            required,
            schema_type,
        }
    }
}
