//! Pure request builders, one per backend operation.
//!
//! This is the single source of request shape for both facades. Bodies use
//! the backend's camelCase field names; fields left unset are omitted so the
//! backend applies its own defaults.

use super::ApiRequest;
use crate::types::{
    AddOptions, ListOptions, MemoryStoreOptions, MemoryStoreUpdate, MemoryUpdate, Message,
    ScopeFilter, SearchOptions,
};
use reqwest::Method;
use serde_json::{json, Value};

fn store_path(project: &str, store: &str) -> String {
    format!("/projects/{}/memorystores/{}", project, store)
}

fn memories_path(project: &str, store: &str) -> String {
    format!("{}/memories", store_path(project, store))
}

fn scope_query(scope: &ScopeFilter) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    if let Some(value) = &scope.user_id {
        query.push(("userId", value.clone()));
    }
    if let Some(value) = &scope.agent_id {
        query.push(("agentId", value.clone()));
    }
    if let Some(value) = &scope.app_id {
        query.push(("appId", value.clone()));
    }
    if let Some(value) = &scope.run_id {
        query.push(("runId", value.clone()));
    }
    query
}

fn merge_scope(body: &mut Value, scope: &ScopeFilter) {
    if let Some(value) = &scope.user_id {
        body["userId"] = Value::String(value.clone());
    }
    if let Some(value) = &scope.agent_id {
        body["agentId"] = Value::String(value.clone());
    }
    if let Some(value) = &scope.app_id {
        body["appId"] = Value::String(value.clone());
    }
    if let Some(value) = &scope.run_id {
        body["runId"] = Value::String(value.clone());
    }
}

pub(crate) fn add_memories(
    project: &str,
    store: &str,
    messages: &[Message],
    options: &AddOptions,
) -> ApiRequest {
    let mut body = json!({
        "messages": messages,
        "infer": options.infer,
        "asyncMode": options.async_mode,
    });
    merge_scope(&mut body, &options.scope);
    if let Some(metadata) = &options.metadata {
        body["metadata"] = Value::Object(metadata.clone());
    }
    if let Some(instructions) = &options.custom_instructions {
        body["customInstructions"] = Value::String(instructions.clone());
    }
    let mut request = ApiRequest::new(Method::POST, memories_path(project, store));
    request.body = Some(body);
    request
}

pub(crate) fn get_memory(project: &str, store: &str, memory_id: &str) -> ApiRequest {
    ApiRequest::new(
        Method::GET,
        format!("{}/{}", memories_path(project, store), memory_id),
    )
}

pub(crate) fn get_memories(project: &str, store: &str, options: &ListOptions) -> ApiRequest {
    let mut request = ApiRequest::new(Method::GET, memories_path(project, store));
    request.query = scope_query(&options.scope);
    if let Some(limit) = options.limit {
        request.query.push(("limit", limit.to_string()));
    }
    request
}

pub(crate) fn search_memories(
    project: &str,
    store: &str,
    query: &str,
    options: &SearchOptions,
) -> ApiRequest {
    let mut body = json!({
        "query": query,
        "rerank": options.rerank,
    });
    merge_scope(&mut body, &options.scope);
    if let Some(top_k) = options.top_k {
        body["topK"] = json!(top_k);
    }
    let mut request = ApiRequest::new(
        Method::POST,
        format!("{}/search", memories_path(project, store)),
    );
    request.body = Some(body);
    request
}

pub(crate) fn update_memory(
    project: &str,
    store: &str,
    memory_id: &str,
    update: &MemoryUpdate,
) -> ApiRequest {
    let mut body = json!({});
    if let Some(text) = &update.text {
        body["text"] = Value::String(text.clone());
    }
    if let Some(metadata) = &update.metadata {
        body["metadata"] = Value::Object(metadata.clone());
    }
    let mut request = ApiRequest::new(
        Method::PUT,
        format!("{}/{}", memories_path(project, store), memory_id),
    );
    request.body = Some(body);
    request
}

pub(crate) fn delete_memory(project: &str, store: &str, memory_id: &str) -> ApiRequest {
    ApiRequest::new(
        Method::DELETE,
        format!("{}/{}", memories_path(project, store), memory_id),
    )
}

pub(crate) fn delete_memories(project: &str, store: &str, scope: &ScopeFilter) -> ApiRequest {
    let mut request = ApiRequest::new(Method::DELETE, memories_path(project, store));
    request.query = scope_query(scope);
    request
}

pub(crate) fn get_memory_history(project: &str, store: &str, memory_id: &str) -> ApiRequest {
    ApiRequest::new(
        Method::GET,
        format!("{}/{}/history", memories_path(project, store), memory_id),
    )
}

pub(crate) fn create_project(project: &str, description: &str) -> ApiRequest {
    let mut request = ApiRequest::new(Method::POST, "/projects".to_string());
    request.body = Some(json!({
        "projectName": project,
        "description": description,
    }));
    request
}

pub(crate) fn create_memory_store(
    project: &str,
    store: &str,
    options: &MemoryStoreOptions,
) -> ApiRequest {
    let mut body = json!({
        "name": store,
        "enableGraph": options.enable_graph,
        "strategy": options.strategy,
        "shortTermTtl": options.short_term_ttl,
    });
    if let Some(description) = &options.description {
        body["description"] = Value::String(description.clone());
    }
    if let Some(instructions) = &options.custom_instructions {
        body["customInstructions"] = Value::String(instructions.clone());
    }
    let mut request = ApiRequest::new(
        Method::POST,
        format!("/projects/{}/memorystores", project),
    );
    request.body = Some(body);
    request
}

pub(crate) fn get_memory_store(project: &str, store: &str) -> ApiRequest {
    ApiRequest::new(Method::GET, store_path(project, store))
}

pub(crate) fn update_memory_store(
    project: &str,
    store: &str,
    update: &MemoryStoreUpdate,
) -> ApiRequest {
    let mut body = json!({});
    if let Some(description) = &update.description {
        body["description"] = Value::String(description.clone());
    }
    if let Some(instructions) = &update.custom_instructions {
        body["customInstructions"] = Value::String(instructions.clone());
    }
    if let Some(enable_graph) = update.enable_graph {
        body["enableGraph"] = Value::Bool(enable_graph);
    }
    if let Some(strategy) = &update.strategy {
        body["strategy"] = Value::String(strategy.clone());
    }
    if let Some(ttl) = update.short_term_ttl {
        body["shortTermTtl"] = json!(ttl);
    }
    let mut request = ApiRequest::new(Method::PUT, store_path(project, store));
    request.body = Some(body);
    request
}

pub(crate) fn delete_memory_store(project: &str, store: &str) -> ApiRequest {
    ApiRequest::new(Method::DELETE, store_path(project, store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::JsonMap;

    #[test]
    fn add_serializes_messages_and_defaults() {
        let messages = vec![Message::user("hello")];
        let request = add_memories("p", "s", &messages, &AddOptions::default());
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path, "/projects/p/memorystores/s/memories");
        let body = request.body.unwrap();
        assert_eq!(body["messages"], json!([{"role": "user", "content": "hello"}]));
        assert_eq!(body["infer"], json!(true));
        assert_eq!(body["asyncMode"], json!(true));
        assert!(body.get("metadata").is_none());
        assert!(body.get("userId").is_none());
    }

    #[test]
    fn add_carries_scope_and_metadata() {
        let mut metadata = JsonMap::new();
        metadata.insert("source".to_string(), json!("chat"));
        let options = AddOptions {
            scope: ScopeFilter::user("u1").with_run_id("r1"),
            metadata: Some(metadata),
            ..AddOptions::default()
        };
        let body = add_memories("p", "s", &[Message::user("x")], &options)
            .body
            .unwrap();
        assert_eq!(body["userId"], json!("u1"));
        assert_eq!(body["runId"], json!("r1"));
        assert!(body.get("agentId").is_none());
        assert_eq!(body["metadata"]["source"], json!("chat"));
    }

    #[test]
    fn list_scope_goes_into_the_query_string() {
        let options = ListOptions {
            scope: ScopeFilter::user("u1").with_agent_id("a1"),
            limit: Some(10),
        };
        let request = get_memories("p", "s", &options);
        assert_eq!(request.method, Method::GET);
        assert_eq!(
            request.query,
            vec![
                ("userId", "u1".to_string()),
                ("agentId", "a1".to_string()),
                ("limit", "10".to_string()),
            ]
        );
    }

    #[test]
    fn search_omits_unset_top_k() {
        let request = search_memories("p", "s", "tennis", &SearchOptions::default());
        assert_eq!(request.path, "/projects/p/memorystores/s/memories/search");
        let body = request.body.unwrap();
        assert_eq!(body["query"], json!("tennis"));
        assert_eq!(body["rerank"], json!(false));
        assert!(body.get("topK").is_none());
    }

    #[test]
    fn store_creation_targets_the_project_collection() {
        let request = create_memory_store("p", "s", &MemoryStoreOptions::default());
        assert_eq!(request.path, "/projects/p/memorystores");
        let body = request.body.unwrap();
        assert_eq!(body["name"], json!("s"));
        assert_eq!(body["strategy"], json!("default"));
        assert_eq!(body["shortTermTtl"], json!(7));
        assert!(body.get("description").is_none());
    }
}
