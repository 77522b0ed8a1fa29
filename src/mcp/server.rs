//! MCP server exposing Cursor databases as resources, tools and prompts.

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    service::RequestContext,
    tool, tool_handler, tool_router,
    transport::stdio,
    ErrorData as McpError, RoleServer, ServerHandler, ServiceExt,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use tracing::{info, warn};

use super::prompts::{self, PROMPTS};
use super::resources::CursorResource;
use crate::accessors::CursorDb;
use crate::error::{CursorDbError, ErrorKind};

/// Request parameters for querying a project table
#[derive(Debug, Deserialize, JsonSchema)]
pub struct QueryTableRequest {
    #[schemars(description = "Name of the project (see cursor://projects)")]
    pub project_name: String,

    #[schemars(description = "Table to query: 'ItemTable' or 'cursorDiskKV'")]
    pub table_name: String,

    #[schemars(description = "Query type: 'get_all' (default), 'get_by_key' or 'search_keys'")]
    #[serde(default = "default_query_type")]
    pub query_type: String,

    #[schemars(description = "Exact key for 'get_by_key', or substring for 'search_keys'")]
    pub key: Option<String>,

    #[schemars(description = "Maximum number of rows to return (default: 100)")]
    pub limit: Option<usize>,
}

fn default_query_type() -> String {
    "get_all".to_string()
}

/// Request parameters for registering a project directory
#[derive(Debug, Deserialize, JsonSchema)]
pub struct AddProjectDirectoryRequest {
    #[schemars(description = "Directory containing a Cursor state.vscdb file")]
    pub directory: String,
}

fn to_mcp_error(err: CursorDbError) -> McpError {
    let message = err.to_string();
    match err.kind() {
        ErrorKind::NotFound => McpError::resource_not_found(message, None),
        ErrorKind::InvalidRequest | ErrorKind::NotConfigured => {
            McpError::invalid_params(message, None)
        }
        ErrorKind::StorageFailure | ErrorKind::Internal => McpError::internal_error(message, None),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, CursorDbError> {
    serde_json::to_value(value).map_err(|e| CursorDbError::Internal(e.to_string()))
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// MCP server over the Cursor databases
///
/// Usable with both stdio and HTTP/SSE transports; every clone shares the
/// same registry.
#[derive(Clone)]
pub struct CursorDbServer {
    db: CursorDb,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl CursorDbServer {
    pub fn new(db: CursorDb) -> Self {
        Self {
            db,
            tool_router: Self::tool_router(),
        }
    }

    /// Query a key-value table of a project's database
    #[tool(
        name = "query_table",
        description = "Query a table in a Cursor project's state database. Tables: 'ItemTable' (workbench state, chat and composer indexes) and 'cursorDiskKV'. Query types: 'get_all' (up to limit rows), 'get_by_key' (exact key) and 'search_keys' (keys containing the given substring). Values are returned as JSON when they parse, else as raw strings."
    )]
    pub async fn query_table(
        &self,
        Parameters(req): Parameters<QueryTableRequest>,
    ) -> Result<CallToolResult, McpError> {
        let result = self
            .db
            .blocking(move |db| {
                db.query_named(
                    &req.project_name,
                    &req.table_name,
                    &req.query_type,
                    req.key.as_deref(),
                    req.limit,
                )
            })
            .await;

        match result {
            Ok(rows) => {
                let json = to_json(&rows).map_err(to_mcp_error)?;
                Ok(CallToolResult::success(vec![Content::text(pretty(&json))]))
            }
            Err(e) if e.is_client_error() => {
                Ok(CallToolResult::error(vec![Content::text(e.to_string())]))
            }
            Err(e) => Err(to_mcp_error(e)),
        }
    }

    /// Rescan Cursor's storage directories
    #[tool(
        name = "refresh_databases",
        description = "Rescan the Cursor storage directories and rebuild the project list."
    )]
    pub async fn refresh_databases(&self) -> Result<CallToolResult, McpError> {
        let summary = self
            .db
            .blocking(|db| Ok(db.refresh()))
            .await
            .map_err(to_mcp_error)?;
        let json = to_json(&summary).map_err(to_mcp_error)?;
        Ok(CallToolResult::success(vec![Content::text(pretty(&json))]))
    }

    /// Register an extra project directory
    #[tool(
        name = "add_project_directory",
        description = "Register a directory containing a Cursor state.vscdb file as a project. The project is named after the directory."
    )]
    pub async fn add_project_directory(
        &self,
        Parameters(req): Parameters<AddProjectDirectoryRequest>,
    ) -> Result<CallToolResult, McpError> {
        let directory = PathBuf::from(&req.directory);
        let count = self
            .db
            .blocking(move |db| Ok(db.add_project_dir(&directory)))
            .await
            .map_err(to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(format!(
            "Added project directory: {}\nTotal projects: {}",
            req.directory, count
        ))]))
    }

    /// Resources currently available: the project listings plus chat and
    /// composer resources for every registered project.
    pub fn resource_list(&self) -> Vec<Resource> {
        let mut entries = vec![CursorResource::Projects, CursorResource::ProjectsDetailed];
        for name in self.db.snapshot().project_names() {
            entries.push(CursorResource::Chat(name.clone()));
            entries.push(CursorResource::Composers(name));
        }

        entries
            .into_iter()
            .map(|resource| {
                let mut raw = RawResource::new(resource.uri(), resource.display_name());
                raw.description = Some(resource.description().to_string());
                raw.mime_type = Some("application/json".to_string());
                raw.no_annotation()
            })
            .collect()
    }

    /// Read one resource as JSON.
    pub async fn read_uri(&self, uri: &str) -> Result<Value, McpError> {
        let resource = CursorResource::parse(uri).ok_or_else(|| {
            McpError::resource_not_found(format!("Unknown resource: {}", uri), None)
        })?;

        self.db
            .blocking(move |db| match resource {
                CursorResource::Projects => to_json(&db.list_projects(false)),
                CursorResource::ProjectsDetailed => to_json(&db.list_projects(true)),
                CursorResource::Chat(name) => to_json(&db.chat_data(&name)?),
                CursorResource::Composers(name) => to_json(&db.composer_index(&name)?),
                CursorResource::Composer(id) => to_json(&db.composer_session(&id)?),
            })
            .await
            .map_err(to_mcp_error)
    }

    pub fn prompt_list(&self) -> Vec<Prompt> {
        PROMPTS
            .iter()
            .map(|p| Prompt::new(p.name, Some(p.description), None))
            .collect()
    }

    pub fn prompt(&self, name: &str) -> Result<GetPromptResult, McpError> {
        let template = prompts::find(name).ok_or_else(|| {
            McpError::invalid_params(format!("Unknown prompt: {}", name), None)
        })?;

        Ok(GetPromptResult {
            description: Some(template.description.to_string()),
            messages: vec![PromptMessage::new_text(
                PromptMessageRole::User,
                template.text,
            )],
        })
    }

    /// Run the MCP server using stdio transport
    pub async fn run(self) -> anyhow::Result<()> {
        info!("Starting MCP server with stdio transport");
        let service = self.serve(stdio()).await?;
        service.waiting().await?;
        Ok(())
    }

    pub fn db(&self) -> &CursorDb {
        &self.db
    }
}

#[tool_handler]
impl ServerHandler for CursorDbServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .enable_prompts()
                .build(),
            server_info: Implementation {
                name: "cursor-db".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: Some("Cursor DB".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Cursor DB MCP Server - read access to Cursor IDE chat and workspace databases.\n\n\
                 Resources:\n\
                 - cursor://projects and cursor://projects/detailed: registered projects\n\
                 - cursor://projects/{name}/chat: AI chat data of a project\n\
                 - cursor://projects/{name}/composers: composer sessions of a project\n\
                 - cursor://composers/{id}: one composer session from global storage\n\n\
                 Tools:\n\
                 - query_table: run get_all, get_by_key or search_keys against ItemTable or cursorDiskKV\n\
                 - refresh_databases: rescan Cursor's storage directories\n\
                 - add_project_directory: register an extra project directory"
                    .into(),
            ),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult::with_all_items(self.resource_list()))
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        let body = self.read_uri(&request.uri).await.inspect_err(|e| {
            warn!(uri = %request.uri, error = %e.message, "Resource read failed");
        })?;

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(pretty(&body), request.uri)],
        })
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        Ok(ListPromptsResult::with_all_items(self.prompt_list()))
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        self.prompt(&request.name)
    }
}
