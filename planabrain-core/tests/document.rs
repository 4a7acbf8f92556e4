use planabrain_core::{Document, LlmRequest, Message, Role, Tool, Value};

#[test]
fn document_source_reads_metadata() {
    let doc = Document::new("hello").with_source("notes/a.txt");
    assert_eq!(doc.source(), "notes/a.txt");
}

#[test]
fn document_source_is_empty_when_missing() {
    assert_eq!(Document::new("hello").source(), "");
}

#[test]
fn document_source_renders_non_string_values() {
    let mut doc = Document::new("hello");
    doc.metadata.insert("source".to_string(), Value::from(42));
    assert_eq!(doc.source(), "42");
}

#[test]
fn llm_request_serializes_without_empty_fields() {
    let request = LlmRequest::new(vec![Message::user("hi")]);
    let json = serde_json::to_value(&request).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "model": "",
            "messages": [{ "role": "user", "content": "hi" }]
        })
    );
}

#[test]
fn llm_request_builders_set_tools_and_temperature() {
    let request = LlmRequest::new(vec![Message::system("be brief")])
        .with_tool(Tool::GoogleSearch)
        .with_temperature(1.0);

    assert_eq!(request.tools, vec![Tool::GoogleSearch]);
    assert_eq!(request.temperature, Some(1.0));
    assert_eq!(request.messages[0].role, Role::System);
}
