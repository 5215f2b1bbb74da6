use oasdoc_core::{repair, run_generation, FileSource, GenerationConfig, RepairConfig};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

fn write_json(path: &Path, value: &Value) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

fn payload(chat_tag: &str) -> Value {
    json!({
        "success": true,
        "data": [
            {
                "id": 101,
                "name": "Chat completions",
                "operationId": "createChat",
                "method": "POST",
                "path": "/v1/chat/completions",
                "tags": [chat_tag],
                "moduleId": 6656265,
                "requestBody": {
                    "type": "application/json",
                    "required": true,
                    "jsonSchema": {"$ref": "#/definitions/1"}
                },
                "responses": [
                    {"code": 200, "name": "OK", "contentType": "json", "jsonSchema": {"$ref": "#/definitions/2"}}
                ],
                "auth": {"type": "bearer"}
            },
            {
                "id": 102,
                "name": "Chat completions (legacy)",
                "operationId": "createChat",
                "method": "post",
                "path": "/chat/completions",
                "tags": [chat_tag]
            },
            {
                "id": 7,
                "method": "GET",
                "path": "/users/{id}",
                "parameters": {"path": [{"name": "id", "required": false}]},
                "responses": [],
                "moduleId": 6660656,
                "tags": ["Users"]
            }
        ]
    })
}

fn definitions() -> Value {
    json!({
        "schemaCollection": [{
            "name": "root",
            "items": [
                {
                    "id": "#/definitions/1",
                    "schema": {"jsonSchema": {
                        "type": "object",
                        "properties": {"messages": {"type": "array", "items": {"$ref": "#/definitions/3"}}}
                    }}
                },
                {"id": "#/definitions/2", "schema": {"jsonSchema": {"type": "object", "properties": {"id": {"type": "string"}}}}},
                {
                    "id": "#/definitions/3",
                    "schema": {"jsonSchema": {
                        "type": "object",
                        "properties": {"reply": {"$ref": "#/definitions/3"}}
                    }}
                }
            ]
        }]
    })
}

fn load(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn generates_one_document_per_endpoint() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_json(&root.join("source.json"), &payload("Chat"));
    write_json(&root.join("openapi/NewAPI.apifox.json"), &definitions());

    let config = GenerationConfig {
        out_dir: root.join("openapi/generated"),
        definitions_file: root.join("openapi/NewAPI.apifox.json"),
    };
    let summary = run_generation(&config, &FileSource::new(root.join("source.json"))).unwrap();

    assert_eq!(summary.written, 3);
    assert_eq!(summary.definitions, 3);
    // definitions/3 refers to itself once per expansion
    assert_eq!(summary.resolution_gaps, 1);

    let mut operation_ids = HashSet::new();
    for rel in &summary.files {
        let doc = load(&config.out_dir.join(rel));
        let paths = doc["paths"].as_object().unwrap();
        assert_eq!(paths.len(), 1);
        let (_, item) = paths.iter().next().unwrap();
        let ops = item.as_object().unwrap();
        assert_eq!(ops.len(), 1);
        let (_, op) = ops.iter().next().unwrap();
        assert!(!op["responses"].as_object().unwrap().is_empty());
        assert!(operation_ids.insert(op["operationId"].as_str().unwrap().to_string()));
    }

    let chat = load(&config.out_dir.join(
        "ai-model/Chat/post-v1-chat-completions-createchat-101.json",
    ));
    let op = &chat["paths"]["/v1/chat/completions"]["post"];
    assert_eq!(op["operationId"], json!("createchat"));
    assert_eq!(
        op["requestBody"]["content"]["application/json"]["schema"]["properties"]["messages"]["items"]["properties"]["reply"],
        json!({"type": "object", "description": "cyclic reference to #/definitions/3"})
    );
    assert_eq!(op["security"], json!([{"bearerAuth": []}]));

    let legacy = load(&config.out_dir.join(
        "ai-model/Chat/post-chat-completions-createchat-102-102.json",
    ));
    assert_eq!(
        legacy["paths"]["/chat/completions"]["post"]["operationId"],
        json!("createchat-102")
    );

    let user = load(&config.out_dir.join("management/Users/get-users-id-get-users-id-7.json"));
    assert_eq!(
        user["paths"]["/users/{id}"]["get"],
        json!({
            "tags": ["Users"],
            "operationId": "get-users-id",
            "parameters": [
                {"name": "id", "in": "path", "required": true, "schema": {"type": "string"}}
            ],
            "responses": {"200": {"description": "OK"}}
        })
    );
}

#[test]
fn repair_follows_regenerated_documents() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let config = GenerationConfig {
        out_dir: root.join("openapi/generated"),
        definitions_file: root.join("openapi/absent.json"),
    };
    let source = FileSource::new(root.join("source.json"));

    write_json(&root.join("source.json"), &payload("Chat"));
    run_generation(&config, &source).unwrap();

    let old_ref = "openapi/generated/ai-model/Chat/post-v1-chat-completions-createchat-101.json";
    let page = format!("<APIPage document={{\"{}\"}} />\n", old_ref);
    for locale in ["en", "ja"] {
        let page_path = root.join(format!("content/docs/{}/api/chat/create.mdx", locale));
        fs::create_dir_all(page_path.parent().unwrap()).unwrap();
        fs::write(&page_path, &page).unwrap();
    }

    // The tag is renamed upstream: every document moves to a new folder.
    write_json(&root.join("source.json"), &payload("Chat Completions"));
    run_generation(&config, &source).unwrap();
    assert!(!root.join(old_ref).exists());

    let repair_config = RepairConfig {
        project_root: root.to_path_buf(),
        ..RepairConfig::default()
    };
    let first = repair(&repair_config).unwrap();
    assert_eq!(first.len(), 2);
    for report in &first {
        assert_eq!(report.scanned, 1);
        assert_eq!(report.changed, 1);
        assert_eq!(report.fixed_refs, 1);
        assert_eq!(report.unresolved_refs, 0);
    }

    let fixed = fs::read_to_string(root.join("content/docs/ja/api/chat/create.mdx")).unwrap();
    assert_eq!(
        fixed,
        "<APIPage document={\"openapi/generated/ai-model/Chat Completions/post-v1-chat-completions-createchat-101.json\"} />\n"
    );

    let second = repair(&repair_config).unwrap();
    assert!(second.iter().all(|r| r.changed == 0 && r.fixed_refs == 0));
}
