use oapi_diff::{compare, parse_yaml, Category, Change, ChangeRecord, Constraint, Node};

fn yaml(content: &str) -> Node {
    parse_yaml(content).unwrap()
}

fn diff(old: &str, new: &str) -> Vec<ChangeRecord> {
    compare(&yaml(old), &yaml(new)).unwrap().records
}

const PETSTORE: &str = r#"
openapi: 3.0.0
info:
  title: Petstore
  version: 1.0.0
paths:
  /pets:
    parameters:
      - name: trace
        in: header
    get:
      summary: List pets
      parameters:
        - name: limit
          in: query
          required: false
          schema:
            type: integer
            format: int32
            minimum: 1
            maximum: 100
        - name: status
          in: query
          schema:
            type: string
            enum: [available, pending, sold]
      responses:
        "200":
          description: OK
          headers:
            X-Rate-Limit:
              schema:
                type: integer
          content:
            application/json:
              schema:
                type: array
                items:
                  type: object
                  required: [id]
                  properties:
                    id:
                      type: integer
                    name:
                      type: string
    post:
      requestBody:
        required: true
        content:
          application/json:
            schema:
              $ref: '#/components/schemas/Pet'
      responses:
        "201":
          description: Created
components:
  schemas:
    Pet:
      type: object
      required: [id, name]
      properties:
        id:
          type: integer
          format: int64
        name:
          type: string
          minLength: 1
          maxLength: 64
        tag:
          type: string
        owner:
          type: object
          properties:
            email:
              type: string
              format: email
        photos:
          type: array
          items:
            type: object
            properties:
              url:
                type: string
"#;

#[test]
fn test_identical_documents_have_no_changes() {
    let doc = yaml(PETSTORE);
    let comparison = compare(&doc, &doc.clone()).unwrap();
    assert!(comparison.is_empty());
    assert_eq!(comparison.stats.total, 0);
    assert!(!comparison.has_breaking());
}

#[test]
fn test_json_and_yaml_of_same_document_are_identical() {
    let from_yaml = yaml(PETSTORE);
    let json = serde_json::to_string(&from_yaml).unwrap();
    let from_json = oapi_diff::parse_json(&json).unwrap();
    assert!(compare(&from_yaml, &from_json).unwrap().is_empty());
}

#[test]
fn test_path_removed() {
    let records = diff(
        "openapi: 3.0.0\npaths:\n  /pets:\n    get:\n      summary: List\n",
        "openapi: 3.0.0\npaths: {}\n",
    );

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.label(), "Path Removed");
    assert_eq!(record.path, "/pets");
    assert_eq!(record.category(), Category::Removed);
    assert!(record.is_breaking);
    assert_eq!(
        record.change,
        Change::PathRemoved {
            methods: vec!["get".to_string()]
        }
    );

    let value = serde_json::to_value(record).unwrap();
    assert_eq!(value["details"]["methods"], serde_json::json!(["get"]));
}

#[test]
fn test_path_direction_is_antisymmetric() {
    let a = "openapi: 3.0.0\npaths:\n  /pets:\n    get: {}\n  /owners:\n    get: {}\n";
    let b = "openapi: 3.0.0\npaths:\n  /owners:\n    get: {}\n";

    let forward = diff(a, b);
    let backward = diff(b, a);

    assert_eq!(forward.len(), 1);
    assert_eq!(backward.len(), 1);
    assert_eq!(forward[0].label(), "Path Removed");
    assert_eq!(backward[0].label(), "Path Added");
    assert_eq!(forward[0].path, backward[0].path);
    assert!(forward[0].is_breaking);
    assert!(!backward[0].is_breaking);
}

#[test]
fn test_parameter_becomes_required() {
    let old = r#"
openapi: 3.0.0
paths:
  /pets:
    get:
      parameters:
        - name: limit
          in: query
          required: false
"#;
    let new = old.replace("required: false", "required: true");

    let records = diff(old, &new);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].label(), "Parameter Required Status Changed");
    assert_eq!(records[0].path, "/pets.get.parameters.limit");
    assert_eq!(records[0].category(), Category::Modified);
    assert!(records[0].is_breaking);

    let relaxed = diff(&new, old);
    assert_eq!(relaxed.len(), 1);
    assert!(!relaxed[0].is_breaking);
}

#[test]
fn test_schema_property_maximum_tightened() {
    let old = r#"
openapi: 3.0.0
components:
  schemas:
    Pet:
      type: object
      properties:
        age:
          type: integer
          maximum: 150
"#;
    let new = old.replace("maximum: 150", "maximum: 100");

    let records = diff(old, &new);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].path, "components.schemas.Pet.properties.age");
    assert!(records[0].is_breaking);
    match &records[0].change {
        Change::SchemaPropertyConstraintChanged {
            constraint, old, new, ..
        } => {
            assert_eq!(*constraint, Constraint::Maximum);
            assert_eq!(old.as_ref().and_then(Node::as_f64), Some(150.0));
            assert_eq!(new.as_ref().and_then(Node::as_f64), Some(100.0));
        }
        other => panic!("unexpected change: {:?}", other),
    }

    let loosened = diff(&new, old);
    assert_eq!(loosened.len(), 1);
    assert!(!loosened[0].is_breaking);
}

#[test]
fn test_schema_added() {
    let records = diff(
        "openapi: 3.0.0\ncomponents:\n  schemas: {}\n",
        "openapi: 3.0.0\ncomponents:\n  schemas:\n    Pet:\n      type: object\n",
    );

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].label(), "Schema Added");
    assert_eq!(records[0].path, "components.schemas.Pet");
    assert_eq!(records[0].category(), Category::Added);
    assert!(!records[0].is_breaking);
}

#[test]
fn test_response_description_changed() {
    let old = r#"
openapi: 3.0.0
paths:
  /pets:
    get:
      responses:
        "200":
          description: OK
"#;
    let new = old.replace("description: OK", "description: Success");

    let records = diff(old, &new);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].label(), "Response Description Changed");
    assert_eq!(records[0].path, "/pets.get.responses.200");
    assert!(!records[0].is_breaking);
}

#[test]
fn test_min_length_monotonicity() {
    let doc = |min: u32| {
        format!(
            "openapi: 3.0.0\ncomponents:\n  schemas:\n    User:\n      properties:\n        name:\n          type: string\n          minLength: {}\n",
            min
        )
    };

    let tightened = diff(&doc(1), &doc(5));
    assert_eq!(tightened.len(), 1);
    assert!(tightened[0].is_breaking);

    let loosened = diff(&doc(5), &doc(1));
    assert_eq!(loosened.len(), 1);
    assert!(!loosened[0].is_breaking);

    assert!(diff(&doc(3), &doc(3)).is_empty());
}

#[test]
fn test_path_level_parameters_are_not_methods() {
    let old = r#"
openapi: 3.0.0
paths:
  /pets:
    parameters:
      - name: trace
        in: header
    get: {}
"#;
    let new = r#"
openapi: 3.0.0
paths:
  /pets:
    get: {}
"#;

    assert!(diff(old, new).is_empty());
    assert!(diff(new, old).is_empty());

    let records = diff(old, "openapi: 3.0.0\npaths: {}\n");
    assert_eq!(
        records[0].change,
        Change::PathRemoved {
            methods: vec!["get".to_string()]
        }
    );
}

#[test]
fn test_method_added_and_removed() {
    let old = "openapi: 3.0.0\npaths:\n  /pets:\n    get:\n      summary: List\n";
    let new = "openapi: 3.0.0\npaths:\n  /pets:\n    post:\n      summary: Create\n";

    let records = diff(old, new);
    let labels: Vec<String> = records.iter().map(|r| r.label()).collect();
    assert_eq!(labels, vec!["GET Method Removed", "POST Method Added"]);
    assert!(records[0].is_breaking);
    assert!(!records[1].is_breaking);
    assert_eq!(records[0].path, "/pets");
}

#[test]
fn test_parameter_location_change_is_remove_plus_add() {
    let old = r#"
openapi: 3.0.0
paths:
  /pets/{id}:
    get:
      parameters:
        - name: id
          in: query
"#;
    let new = old.replace("in: query", "in: path");

    let records = diff(old, &new);
    let labels: Vec<String> = records.iter().map(|r| r.label()).collect();
    assert_eq!(labels, vec!["Parameter Removed", "Parameter Added"]);
    assert!(records.iter().all(|r| r.path == "/pets/{id}.get.parameters.id"));
}

#[test]
fn test_parameter_addition_breaking_only_when_required() {
    let old = "openapi: 3.0.0\npaths:\n  /pets:\n    get: {}\n";
    let optional = r#"
openapi: 3.0.0
paths:
  /pets:
    get:
      parameters:
        - name: offset
          in: query
          schema:
            type: integer
"#;
    let required = optional.replace("in: query", "in: query\n          required: true");

    let records = diff(old, optional);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].label(), "Parameter Added");
    assert!(!records[0].is_breaking);
    let value = serde_json::to_value(&records[0]).unwrap();
    assert_eq!(value["details"]["in"], "query");
    assert_eq!(value["details"]["type"], "integer");

    let records = diff(old, &required);
    assert!(records[0].is_breaking);

    let removed = diff(&required, old);
    assert_eq!(removed[0].label(), "Parameter Removed");
    assert!(removed[0].is_breaking);
    let removed = diff(optional, old);
    assert!(!removed[0].is_breaking);
}

#[test]
fn test_parameter_detail_changes() {
    let old = yaml(PETSTORE);
    let new_text = PETSTORE
        .replace("format: int32", "format: int64")
        .replace("maximum: 100", "maximum: 50")
        .replace("enum: [available, pending, sold]", "enum: [available, sold]");
    let records = compare(&old, &yaml(&new_text)).unwrap().records;

    let labels: Vec<String> = records.iter().map(|r| r.label()).collect();
    assert_eq!(
        labels,
        vec![
            "Parameter Format Changed",
            "Parameter Constraint Changed",
            "Parameter Enum Values Changed",
        ]
    );
    assert!(!records[0].is_breaking);
    assert!(records[1].is_breaking);
    assert!(records[2].is_breaking);
    match &records[2].change {
        Change::ParameterEnumValuesChanged {
            removed_values,
            added_values,
            ..
        } => {
            assert_eq!(removed_values, &vec![Node::from("pending")]);
            assert!(added_values.is_empty());
        }
        other => panic!("unexpected change: {:?}", other),
    }
}

#[test]
fn test_enum_widening_is_not_breaking() {
    let new_text = PETSTORE.replace(
        "enum: [available, pending, sold]",
        "enum: [available, pending, sold, adopted]",
    );
    let records = diff(PETSTORE, &new_text);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].label(), "Parameter Enum Values Changed");
    assert!(!records[0].is_breaking);
}

#[test]
fn test_request_body_presence() {
    let without = "openapi: 3.0.0\npaths:\n  /pets:\n    post: {}\n";
    let required = "openapi: 3.0.0\npaths:\n  /pets:\n    post:\n      requestBody:\n        required: true\n";
    let optional = "openapi: 3.0.0\npaths:\n  /pets:\n    post:\n      requestBody:\n        required: false\n";

    let records = diff(without, required);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].label(), "Request Body Added");
    assert_eq!(records[0].path, "/pets.post.requestBody");
    assert!(records[0].is_breaking);

    assert!(!diff(without, optional)[0].is_breaking);

    let removed = diff(optional, without);
    assert_eq!(removed[0].label(), "Request Body Removed");
    assert!(removed[0].is_breaking);

    // Only presence and the flag are compared.
    assert!(diff(required, optional).is_empty());
}

#[test]
fn test_response_media_type_and_header_changes() {
    let new_text = PETSTORE
        .replace("            X-Rate-Limit:", "            X-Request-Id:")
        .replace("            application/json:\n              schema:\n                type: array", "            application/xml:\n              schema:\n                type: array");
    let records = diff(PETSTORE, &new_text);

    let summary: Vec<(String, String, bool)> = records
        .iter()
        .map(|r| (r.label(), r.path.clone(), r.is_breaking))
        .collect();
    assert_eq!(
        summary,
        vec![
            (
                "Response Media Type Removed".to_string(),
                "/pets.get.responses.200.content.application/json".to_string(),
                true
            ),
            (
                "Response Media Type Added".to_string(),
                "/pets.get.responses.200.content.application/xml".to_string(),
                false
            ),
            (
                "Response Header Removed".to_string(),
                "/pets.get.responses.200.headers.X-Rate-Limit".to_string(),
                true
            ),
            (
                "Response Header Added".to_string(),
                "/pets.get.responses.200.headers.X-Request-Id".to_string(),
                false
            ),
        ]
    );
}

#[test]
fn test_response_array_items_are_compared() {
    let new_text = PETSTORE.replace(
        "                    name:\n                      type: string\n",
        "                    name:\n                      type: integer\n",
    );
    let records = diff(PETSTORE, &new_text);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].label(), "Response Property Type Changed");
    assert_eq!(
        records[0].path,
        "/pets.get.responses.200.content.application/json.schema.items.properties.name"
    );
    assert!(records[0].is_breaking);
}

#[test]
fn test_required_list_asymmetry_between_contexts() {
    let response = |required: &str| {
        format!(
            r#"
openapi: 3.0.0
paths:
  /pets:
    get:
      responses:
        "200":
          content:
            application/json:
              schema:
                type: object
                required: {}
                properties:
                  id:
                    type: integer
                  name:
                    type: string
"#,
            required
        )
    };
    let records = diff(&response("[id]"), &response("[id, name]"));
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].label(), "Response Property Now Required");
    assert_eq!(
        records[0].path,
        "/pets.get.responses.200.content.application/json.schema.required"
    );
    assert!(!records[0].is_breaking);

    let component = |required: &str| {
        format!(
            "openapi: 3.0.0\ncomponents:\n  schemas:\n    Pet:\n      type: object\n      required: {}\n      properties:\n        id:\n          type: integer\n        name:\n          type: string\n",
            required
        )
    };
    let records = diff(&component("[id]"), &component("[id, name]"));
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].label(), "Property Now Required");
    assert_eq!(records[0].path, "components.schemas.Pet.required");
    assert!(records[0].is_breaking);

    let records = diff(&component("[id, name]"), &component("[id]"));
    assert_eq!(records[0].label(), "Property No Longer Required");
    assert!(!records[0].is_breaking);
}

#[test]
fn test_required_property_removal_is_breaking() {
    let new_text = PETSTORE.replace(
        "        name:\n          type: string\n          minLength: 1\n          maxLength: 64\n",
        "",
    );
    let records = diff(PETSTORE, &new_text);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].label(), "Schema Property Removed");
    assert_eq!(records[0].path, "components.schemas.Pet.properties.name");
    assert!(records[0].is_breaking);

    let new_text = PETSTORE.replace("        tag:\n          type: string\n", "");
    let records = diff(PETSTORE, &new_text);
    assert_eq!(records.len(), 1);
    assert!(!records[0].is_breaking);
}

#[test]
fn test_nested_and_array_item_properties() {
    let new_text = PETSTORE
        .replace("              format: email\n", "              format: uri\n")
        .replace("              url:\n                type: string\n", "");
    let records = diff(PETSTORE, &new_text);

    assert_eq!(records.len(), 2);

    assert_eq!(records[0].label(), "Schema Property Format Changed");
    assert_eq!(
        records[0].path,
        "components.schemas.Pet.owner.properties.email"
    );
    assert!(records[0].is_breaking);

    assert_eq!(records[1].label(), "Nested Property Removed");
    assert_eq!(
        records[1].path,
        "components.schemas.Pet.photos.properties.items.properties.url"
    );
    assert!(records[1].is_breaking);
}

#[test]
fn test_nested_property_added() {
    let new_text = PETSTORE.replace(
        "              format: email\n",
        "              format: email\n            phone:\n              type: string\n",
    );
    let records = diff(PETSTORE, &new_text);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].label(), "Nested Property Added");
    assert_eq!(records[0].path, "components.schemas.Pet.properties.owner.properties.phone");
    assert!(!records[0].is_breaking);
    match &records[0].change {
        Change::NestedPropertyAdded { schema_name, .. } => assert_eq!(schema_name, "Pet.owner"),
        other => panic!("unexpected change: {:?}", other),
    }
}

#[test]
fn test_info_changes_are_not_breaking() {
    let new_text = PETSTORE
        .replace("version: 1.0.0", "version: 2.0.0")
        .replace("title: Petstore", "title: Pet Store");
    let records = diff(PETSTORE, &new_text);

    let labels: Vec<String> = records.iter().map(|r| r.label()).collect();
    assert_eq!(labels, vec!["Version Change", "Title Change"]);
    assert!(records.iter().all(|r| !r.is_breaking));
    assert_eq!(records[0].path, "info.version");
}

#[test]
fn test_missing_sections_are_empty() {
    let records = diff("openapi: 3.0.0\n", PETSTORE);
    assert!(!records.is_empty());
    assert!(records.iter().all(|r| !r.is_breaking));

    let records = diff(PETSTORE, "openapi: 3.0.0\npaths: not-a-map\n");
    assert!(records.iter().any(|r| r.label() == "Path Removed"));
}

#[test]
fn test_sequence_and_ids_follow_emission_order() {
    let records = diff("openapi: 3.0.0\n", PETSTORE);
    for (index, record) in records.iter().enumerate() {
        assert_eq!(record.sequence, index as u64 + 1);
        assert_eq!(record.id, format!("chg-{:05}", index + 1));
    }
}

#[test]
fn test_comparison_stats_match_records() {
    let new_text = PETSTORE
        .replace("version: 1.0.0", "version: 1.1.0")
        .replace("        tag:\n          type: string\n", "");
    let comparison = compare(&yaml(PETSTORE), &yaml(&new_text)).unwrap();

    assert_eq!(comparison.stats.total, 2);
    assert_eq!(comparison.stats.modified, 1);
    assert_eq!(comparison.stats.removed, 1);
    assert_eq!(comparison.stats.breaking, 0);
    assert!(comparison.breaking().is_empty());
}

#[test]
fn test_non_object_root_is_rejected() {
    let err = compare(&Node::from("openapi"), &yaml(PETSTORE)).unwrap_err();
    assert!(err.to_string().contains("old"));
}

fn response_doc(schema: &str) -> String {
    format!(
        r#"
openapi: 3.0.0
paths:
  /pets:
    get:
      responses:
        "200":
          description: OK
          content:
            application/json:
{}
"#,
        schema
    )
}

const RESPONSE_SCHEMA_PATH: &str = "/pets.get.responses.200.content.application/json.schema";

#[test]
fn test_response_schema_removed_and_added_short_circuit() {
    let with_schema = response_doc(
        r#"              schema:
                type: object
                properties:
                  id:
                    type: integer"#,
    );
    let without_schema = response_doc("              example: {}");

    let removed = diff(&with_schema, &without_schema);
    assert_eq!(removed.len(), 1);
    assert_eq!(removed[0].label(), "Response Schema Removed");
    assert_eq!(removed[0].path, RESPONSE_SCHEMA_PATH);
    assert!(removed[0].is_breaking);

    let added = diff(&without_schema, &with_schema);
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].label(), "Response Schema Added");
    assert_eq!(added[0].path, RESPONSE_SCHEMA_PATH);
    assert!(!added[0].is_breaking);
    assert_eq!(added[0].category(), Category::Added);
}

#[test]
fn test_response_schema_type_and_format_changes() {
    let old = response_doc(
        r#"              schema:
                type: string
                format: date-time"#,
    );
    let new = response_doc(
        r#"              schema:
                type: integer
                format: date"#,
    );

    let records = diff(&old, &new);
    let labels: Vec<String> = records.iter().map(|r| r.label()).collect();
    assert_eq!(
        labels,
        vec!["Response Schema Type Changed", "Response Schema Format Changed"]
    );
    assert!(records.iter().all(|r| r.path == RESPONSE_SCHEMA_PATH));
    assert!(records.iter().all(|r| r.is_breaking));

    match &records[0].change {
        Change::ResponseSchemaTypeChanged { old, new, .. } => {
            assert_eq!(old, &Some(Node::from("string")));
            assert_eq!(new, &Some(Node::from("integer")));
        }
        other => panic!("unexpected change: {:?}", other),
    }
    match &records[1].change {
        Change::ResponseSchemaFormatChanged { old, new, .. } => {
            assert_eq!(old, "date-time");
            assert_eq!(new, "date");
        }
        other => panic!("unexpected change: {:?}", other),
    }
}

#[test]
fn test_response_schema_format_outside_table_is_not_breaking() {
    let old = response_doc(
        r#"              schema:
                type: integer
                format: int32"#,
    );
    let new = response_doc(
        r#"              schema:
                type: integer
                format: int64"#,
    );

    let records = diff(&old, &new);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].label(), "Response Schema Format Changed");
    assert!(!records[0].is_breaking);
}

#[test]
fn test_response_property_removed_breaking_only_when_required() {
    let old = response_doc(
        r#"              schema:
                type: object
                required: [id]
                properties:
                  id:
                    type: integer
                  name:
                    type: string"#,
    );
    let new = response_doc(
        r#"              schema:
                type: object
                properties: {}"#,
    );

    let records = diff(&old, &new);
    assert_eq!(records.len(), 2);

    assert_eq!(records[0].label(), "Response Property Removed");
    assert_eq!(records[0].path, format!("{}.properties.id", RESPONSE_SCHEMA_PATH));
    assert!(records[0].is_breaking);
    assert!(matches!(
        records[0].change,
        Change::ResponsePropertyRemoved { was_required: true, .. }
    ));

    assert_eq!(records[1].label(), "Response Property Removed");
    assert_eq!(records[1].path, format!("{}.properties.name", RESPONSE_SCHEMA_PATH));
    assert!(!records[1].is_breaking);
    assert!(matches!(
        records[1].change,
        Change::ResponsePropertyRemoved { was_required: false, .. }
    ));
}

#[test]
fn test_response_property_no_longer_required() {
    let old = response_doc(
        r#"              schema:
                type: object
                required: [id]
                properties:
                  id:
                    type: integer"#,
    );
    let new = response_doc(
        r#"              schema:
                type: object
                properties:
                  id:
                    type: integer"#,
    );

    let records = diff(&old, &new);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].label(), "Response Property No Longer Required");
    assert_eq!(records[0].path, format!("{}.required", RESPONSE_SCHEMA_PATH));
    assert_eq!(records[0].category(), Category::Modified);
    assert!(!records[0].is_breaking);
}

fn component_doc(pet: &str) -> String {
    format!(
        r#"
openapi: 3.0.0
components:
  schemas:
    Pet:
{}
"#,
        pet
    )
}

#[test]
fn test_schema_removed_is_breaking() {
    let old = component_doc("      type: object");
    let new = "openapi: 3.0.0\ncomponents:\n  schemas: {}\n";

    let records = diff(&old, new);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].label(), "Schema Removed");
    assert_eq!(records[0].path, "components.schemas.Pet");
    assert_eq!(records[0].category(), Category::Removed);
    assert!(records[0].is_breaking);
}

#[test]
fn test_schema_property_enum_changed() {
    let old = component_doc(
        r#"      properties:
        status:
          type: string
          enum: [available, pending]"#,
    );
    let narrowed = component_doc(
        r#"      properties:
        status:
          type: string
          enum: [available, sold]"#,
    );
    let widened = component_doc(
        r#"      properties:
        status:
          type: string
          enum: [available, pending, sold]"#,
    );

    let records = diff(&old, &narrowed);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].label(), "Schema Property Enum Changed");
    assert_eq!(records[0].path, "components.schemas.Pet.properties.status");
    assert!(records[0].is_breaking);
    match &records[0].change {
        Change::SchemaPropertyEnumChanged {
            removed_values,
            added_values,
            ..
        } => {
            assert_eq!(removed_values, &vec![Node::from("pending")]);
            assert_eq!(added_values, &vec![Node::from("sold")]);
        }
        other => panic!("unexpected change: {:?}", other),
    }

    let records = diff(&old, &widened);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].label(), "Schema Property Enum Changed");
    assert!(!records[0].is_breaking);
}

#[test]
fn test_schema_property_default_changed() {
    let old = component_doc(
        r#"      properties:
        limit:
          type: integer
          default: 10"#,
    );
    let new = component_doc(
        r#"      properties:
        limit:
          type: integer
          default: 20"#,
    );

    let records = diff(&old, &new);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].label(), "Schema Property Default Changed");
    assert_eq!(records[0].path, "components.schemas.Pet.properties.limit");
    assert!(!records[0].is_breaking);
    match &records[0].change {
        Change::SchemaPropertyDefaultChanged { old, new, .. } => {
            assert_eq!(old, &Some(Node::Number(10.0)));
            assert_eq!(new, &Some(Node::Number(20.0)));
        }
        other => panic!("unexpected change: {:?}", other),
    }
}
