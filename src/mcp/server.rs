use std::path::Path;
use std::sync::Arc;

use rmcp::handler::server::ServerHandler;
use rmcp::model::{
    CallToolRequestParams, CallToolResult, Content, Implementation, ListToolsResult,
    PaginatedRequestParams, ServerCapabilities, ServerInfo, Tool, ToolsCapability,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use code_editor::error::{EditorError, Result};
use code_editor::ops::{self, PartKind};
use code_editor::{
    PathAuthorizer, Paginator, ProjectDetector, RequestAdmission, SessionStore,
};

#[derive(Clone)]
pub struct EditorServer {
    admission: RequestAdmission,
    detector: Arc<ProjectDetector>,
    paginator: Paginator,
}

impl EditorServer {
    pub fn new(
        authorizer: Arc<PathAuthorizer>,
        ignore_vcs: bool,
        max_projects: usize,
        budget: usize,
    ) -> Result<Self> {
        let sessions = SessionStore::new();
        let admission = RequestAdmission::new(sessions, authorizer.clone());
        let detector = Arc::new(
            ProjectDetector::new(authorizer)
                .with_require_vcs(!ignore_vcs)
                .with_max_projects(max_projects),
        );
        let paginator = Paginator::new(budget)?;

        Ok(Self {
            admission,
            detector,
            paginator,
        })
    }

    // === Tool implementations ===

    fn start_session_impl(&self) -> Result<String> {
        // Natural hook for the lazy sweep: expired tokens go away
        // whenever a new session is issued.
        self.admission.sessions().clear_expired_sessions();

        let session = self.admission.sessions().new_session()?;
        tracing::info!(expires_at = session.expires_at, "session created");

        Ok(serde_json::to_string_pretty(&session).unwrap_or_default())
    }

    fn get_project_context_impl(&self) -> Result<String> {
        let detection = self.detector.detect()?;
        Ok(serde_json::to_string_pretty(&detection).unwrap_or_default())
    }

    fn write_file_impl(&self, path: &str, content: &str) -> Result<String> {
        ops::write_file(Path::new(path), content)?;

        let output = serde_json::json!({
            "path": path,
            "bytes_written": content.len(),
        });
        Ok(serde_json::to_string_pretty(&output).unwrap_or_default())
    }

    fn delete_file_impl(&self, path: &str) -> Result<String> {
        ops::delete_file(Path::new(path))?;

        let output = serde_json::json!({ "deleted": path });
        Ok(serde_json::to_string_pretty(&output).unwrap_or_default())
    }

    fn replace_pattern_impl(
        &self,
        path: &str,
        pattern: &str,
        replacement: &str,
        all: bool,
    ) -> Result<String> {
        let outcome = ops::replace_pattern(Path::new(path), pattern, replacement, all)?;
        Ok(serde_json::to_string_pretty(&outcome).unwrap_or_default())
    }

    fn replace_part_impl(
        &self,
        path: &str,
        language: Option<&str>,
        kind: PartKind,
        name: &str,
        replacement: &str,
    ) -> Result<String> {
        let outcome = ops::replace_part(Path::new(path), language, kind, name, replacement)?;
        Ok(serde_json::to_string_pretty(&outcome).unwrap_or_default())
    }

    fn validate_syntax_impl(&self, path: &str, language: Option<&str>) -> Result<String> {
        let report = ops::validate_syntax(Path::new(path), language)?;
        Ok(serde_json::to_string_pretty(&report).unwrap_or_default())
    }

    fn check_documentation_impl(&self, path: &str, offset: usize) -> Result<String> {
        let scan = ops::check_documentation(Path::new(path))?;
        let page = self.paginator.paginate(&scan.issues, offset)?;

        let mut output =
            serde_json::to_value(&page).map_err(|e| EditorError::Parse(e.to_string()))?;
        if !scan.warnings.is_empty() {
            output["warnings"] = serde_json::json!(scan.warnings);
        }
        Ok(serde_json::to_string_pretty(&output).unwrap_or_default())
    }
}

fn schema_for<T: JsonSchema>() -> Arc<serde_json::Map<String, serde_json::Value>> {
    let schema = schemars::schema_for!(T);
    let value = serde_json::to_value(&schema).expect("Failed to serialize schema");
    match value {
        serde_json::Value::Object(map) => Arc::new(map),
        _ => Arc::new(serde_json::Map::new()),
    }
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct StartSessionParams {}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetProjectContextParams {
    /// Session token
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ReadFileParams {
    /// Session token
    pub token: String,
    /// File path
    pub path: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct WriteFileParams {
    /// Session token
    pub token: String,
    /// File path
    pub path: String,
    /// Full file content
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DeleteFileParams {
    /// Session token
    pub token: String,
    /// File path
    pub path: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ReplacePatternParams {
    /// Session token
    pub token: String,
    /// File path
    pub path: String,
    /// Regex pattern to find
    pub pattern: String,
    /// Replacement text
    pub replacement: String,
    /// Replace every match instead of the first (default: true)
    #[serde(default)]
    pub all: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ReplacePartParams {
    /// Session token
    pub token: String,
    /// File path
    pub path: String,
    /// Declaration name to replace
    pub name: String,
    /// Replacement declaration text
    pub replacement: String,
    /// Language name; inferred from the file extension when omitted
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ValidateSyntaxParams {
    /// Session token
    pub token: String,
    /// File path
    pub path: String,
    /// Language name; inferred from the file extension when omitted
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CheckDocumentationParams {
    /// Session token
    pub token: String,
    /// Directory or file to scan
    pub path: String,
    /// Number of priority-ranked issues already delivered (default: 0)
    #[serde(default)]
    pub offset: Option<i64>,
}

impl ServerHandler for EditorServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(true),
                }),
                ..Default::default()
            },
            server_info: Implementation {
                name: "code-editor".to_string(),
                title: Some("Code Editor".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Session-scoped code editing within allowed directories. \
                 Call start_session first; pass the returned token to every other tool."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        let tools = vec![
            Tool {
                name: "start_session".into(),
                title: Some("Start Session".to_string()),
                description: Some("Create a session token".into()),
                input_schema: schema_for::<StartSessionParams>(),
                output_schema: None,
                annotations: None,
                icons: None,
                meta: None,
            },
            Tool {
                name: "get_project_context".into(),
                title: Some("Get Project Context".to_string()),
                description: Some("Detect current and recent projects".into()),
                input_schema: schema_for::<GetProjectContextParams>(),
                output_schema: None,
                annotations: None,
                icons: None,
                meta: None,
            },
            Tool {
                name: "read_file".into(),
                title: Some("Read File".to_string()),
                description: Some("Read a file".into()),
                input_schema: schema_for::<ReadFileParams>(),
                output_schema: None,
                annotations: None,
                icons: None,
                meta: None,
            },
            Tool {
                name: "write_file".into(),
                title: Some("Write File".to_string()),
                description: Some("Write a file".into()),
                input_schema: schema_for::<WriteFileParams>(),
                output_schema: None,
                annotations: None,
                icons: None,
                meta: None,
            },
            Tool {
                name: "delete_file".into(),
                title: Some("Delete File".to_string()),
                description: Some("Delete a file".into()),
                input_schema: schema_for::<DeleteFileParams>(),
                output_schema: None,
                annotations: None,
                icons: None,
                meta: None,
            },
            Tool {
                name: "replace_pattern".into(),
                title: Some("Replace Pattern".to_string()),
                description: Some("Regex replace in a file".into()),
                input_schema: schema_for::<ReplacePatternParams>(),
                output_schema: None,
                annotations: None,
                icons: None,
                meta: None,
            },
            Tool {
                name: "replace_function".into(),
                title: Some("Replace Function".to_string()),
                description: Some("Replace a named function declaration".into()),
                input_schema: schema_for::<ReplacePartParams>(),
                output_schema: None,
                annotations: None,
                icons: None,
                meta: None,
            },
            Tool {
                name: "replace_type".into(),
                title: Some("Replace Type".to_string()),
                description: Some("Replace a named type declaration".into()),
                input_schema: schema_for::<ReplacePartParams>(),
                output_schema: None,
                annotations: None,
                icons: None,
                meta: None,
            },
            Tool {
                name: "validate_syntax".into(),
                title: Some("Validate Syntax".to_string()),
                description: Some("Check a file for syntax errors".into()),
                input_schema: schema_for::<ValidateSyntaxParams>(),
                output_schema: None,
                annotations: None,
                icons: None,
                meta: None,
            },
            Tool {
                name: "check_documentation".into(),
                title: Some("Check Documentation".to_string()),
                description: Some("Scan for documentation issues (paginated)".into()),
                input_schema: schema_for::<CheckDocumentationParams>(),
                output_schema: None,
                annotations: None,
                icons: None,
                meta: None,
            },
        ];

        Ok(ListToolsResult {
            next_cursor: None,
            tools,
            meta: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        let result = match request.name.as_ref() {
            "start_session" => match self.start_session_impl() {
                Ok(json) => CallToolResult::success(vec![Content::text(json)]),
                Err(e) => CallToolResult::error(vec![Content::text(e.to_string())]),
            },
            "get_project_context" => {
                let params: GetProjectContextParams = serde_json::from_value(
                    serde_json::Value::Object(request.arguments.unwrap_or_default()),
                )
                .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

                match self
                    .admission
                    .admit_with_cancel(&params.token, &[], &context.ct)
                    .and_then(|_| self.get_project_context_impl())
                {
                    Ok(json) => CallToolResult::success(vec![Content::text(json)]),
                    Err(e) => CallToolResult::error(vec![Content::text(e.to_string())]),
                }
            }
            "read_file" => {
                let params: ReadFileParams = serde_json::from_value(serde_json::Value::Object(
                    request.arguments.unwrap_or_default(),
                ))
                .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

                match self
                    .admission
                    .admit_with_cancel(&params.token, &[Path::new(&params.path)], &context.ct)
                    .and_then(|_| ops::read_file(Path::new(&params.path)))
                {
                    Ok(content) => CallToolResult::success(vec![Content::text(content)]),
                    Err(e) => CallToolResult::error(vec![Content::text(e.to_string())]),
                }
            }
            "write_file" => {
                let params: WriteFileParams = serde_json::from_value(serde_json::Value::Object(
                    request.arguments.unwrap_or_default(),
                ))
                .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

                match self
                    .admission
                    .admit_with_cancel(&params.token, &[Path::new(&params.path)], &context.ct)
                    .and_then(|_| self.write_file_impl(&params.path, &params.content))
                {
                    Ok(json) => CallToolResult::success(vec![Content::text(json)]),
                    Err(e) => CallToolResult::error(vec![Content::text(e.to_string())]),
                }
            }
            "delete_file" => {
                let params: DeleteFileParams = serde_json::from_value(serde_json::Value::Object(
                    request.arguments.unwrap_or_default(),
                ))
                .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

                match self
                    .admission
                    .admit_with_cancel(&params.token, &[Path::new(&params.path)], &context.ct)
                    .and_then(|_| self.delete_file_impl(&params.path))
                {
                    Ok(json) => CallToolResult::success(vec![Content::text(json)]),
                    Err(e) => CallToolResult::error(vec![Content::text(e.to_string())]),
                }
            }
            "replace_pattern" => {
                let params: ReplacePatternParams = serde_json::from_value(
                    serde_json::Value::Object(request.arguments.unwrap_or_default()),
                )
                .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

                let all = params.all.unwrap_or(true);
                match self
                    .admission
                    .admit_with_cancel(&params.token, &[Path::new(&params.path)], &context.ct)
                    .and_then(|_| {
                        self.replace_pattern_impl(
                            &params.path,
                            &params.pattern,
                            &params.replacement,
                            all,
                        )
                    }) {
                    Ok(json) => CallToolResult::success(vec![Content::text(json)]),
                    Err(e) => CallToolResult::error(vec![Content::text(e.to_string())]),
                }
            }
            "replace_function" | "replace_type" => {
                let params: ReplacePartParams = serde_json::from_value(serde_json::Value::Object(
                    request.arguments.unwrap_or_default(),
                ))
                .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

                let kind = if request.name.as_ref() == "replace_function" {
                    PartKind::Function
                } else {
                    PartKind::Type
                };

                match self
                    .admission
                    .admit_with_cancel(&params.token, &[Path::new(&params.path)], &context.ct)
                    .and_then(|_| {
                        self.replace_part_impl(
                            &params.path,
                            params.language.as_deref(),
                            kind,
                            &params.name,
                            &params.replacement,
                        )
                    }) {
                    Ok(json) => CallToolResult::success(vec![Content::text(json)]),
                    Err(e) => CallToolResult::error(vec![Content::text(e.to_string())]),
                }
            }
            "validate_syntax" => {
                let params: ValidateSyntaxParams = serde_json::from_value(
                    serde_json::Value::Object(request.arguments.unwrap_or_default()),
                )
                .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

                match self
                    .admission
                    .admit_with_cancel(&params.token, &[Path::new(&params.path)], &context.ct)
                    .and_then(|_| self.validate_syntax_impl(&params.path, params.language.as_deref()))
                {
                    Ok(json) => CallToolResult::success(vec![Content::text(json)]),
                    Err(e) => CallToolResult::error(vec![Content::text(e.to_string())]),
                }
            }
            "check_documentation" => {
                let params: CheckDocumentationParams = serde_json::from_value(
                    serde_json::Value::Object(request.arguments.unwrap_or_default()),
                )
                .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

                // Negative offsets are treated as zero
                let offset = params.offset.unwrap_or(0).max(0) as usize;

                match self
                    .admission
                    .admit_with_cancel(&params.token, &[Path::new(&params.path)], &context.ct)
                    .and_then(|_| self.check_documentation_impl(&params.path, offset))
                {
                    Ok(json) => CallToolResult::success(vec![Content::text(json)]),
                    Err(e) => CallToolResult::error(vec![Content::text(e.to_string())]),
                }
            }
            _ => {
                return Err(McpError::invalid_params(
                    format!("Unknown tool: {}", request.name),
                    None,
                ));
            }
        };

        Ok(result)
    }
}
