use std::path::PathBuf;

use async_trait::async_trait;
use rust_mcp_sdk::macros::{mcp_tool, JsonSchema};
use rust_mcp_sdk::schema::{
    schema_utils::CallToolError, CallToolRequestParams, CallToolResult, ListToolsResult,
    PaginatedRequestParams, RpcError, TextContent,
};
use rust_mcp_sdk::tool_box;
use rust_mcp_sdk::{mcp_server::ServerHandler, McpServer};
use serde::{Deserialize, Serialize};

use crate::version;

use tasklane_core::views;
use tasklane_core::workspace::Workspace;

#[derive(Clone)]
pub struct McpContext {
    pub default_root: Option<PathBuf>,
}

fn resolve_root(context: &McpContext, root: Option<&str>) -> PathBuf {
    let root_value = root.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    });
    if let Some(root_value) = root_value {
        return PathBuf::from(root_value);
    }
    if let Some(default_root) = &context.default_root {
        return default_root.clone();
    }
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

fn open_workspace(context: &McpContext, root: Option<&str>) -> Workspace {
    Workspace::open(&resolve_root(context, root))
}

fn ok_text(content: String) -> Result<CallToolResult, CallToolError> {
    Ok(CallToolResult::text_content(vec![TextContent::from(
        content,
    )]))
}

#[mcp_tool(name = "version", description = "Return tasklane version information.")]
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct VersionTool {}

#[mcp_tool(
    name = "list_tasks",
    description = "Show the task list as a compact table with completion status."
)]
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct ListTasksTool {
    pub root: Option<String>,
}

#[mcp_tool(
    name = "explain_tasks",
    description = "Show every task in full with a status summary."
)]
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct ExplainTasksTool {
    pub root: Option<String>,
}

#[mcp_tool(
    name = "peek_task",
    description = "Show the current task without advancing the pointer."
)]
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct PeekTaskTool {
    pub root: Option<String>,
    /// Include the rule text in the shown task content.
    #[serde(default)]
    pub with_rules: bool,
}

#[mcp_tool(
    name = "next_task",
    description = "Serve the current task, mark it complete, and advance the pointer."
)]
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct NextTaskTool {
    pub root: Option<String>,
    /// Include the rule text in the served task content.
    #[serde(default)]
    pub with_rules: bool,
}

#[mcp_tool(
    name = "reset_pointer",
    description = "Move the pointer back to the first task. Completion marks are kept."
)]
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct ResetPointerTool {
    pub root: Option<String>,
}

#[mcp_tool(
    name = "reset_status",
    description = "Clear all completion marks. Fingerprint history is kept."
)]
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct ResetStatusTool {
    pub root: Option<String>,
}

#[mcp_tool(
    name = "goto_task",
    description = "Jump the pointer to a 0-based index. Out-of-range input is clamped."
)]
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GotoTaskTool {
    pub index: i64,
    pub root: Option<String>,
}

#[mcp_tool(
    name = "start_task",
    description = "Deprecated: show task info without changing state. Use complete_task to mark tasks done."
)]
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct StartTaskTool {
    pub index: i64,
    pub root: Option<String>,
}

#[mcp_tool(name = "complete_task", description = "Mark a task complete by index.")]
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct CompleteTaskTool {
    pub index: i64,
    pub root: Option<String>,
}

#[mcp_tool(
    name = "uncomplete_task",
    description = "Mark a task pending again by index."
)]
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct UncompleteTaskTool {
    pub index: i64,
    pub root: Option<String>,
}

#[mcp_tool(
    name = "auto_advance",
    description = "Mark the next tasks complete in bulk and return their full rule-annotated content."
)]
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct AutoAdvanceTool {
    /// Number of tasks to advance; all remaining tasks when omitted.
    pub count: Option<i64>,
    pub root: Option<String>,
}

#[mcp_tool(
    name = "sync_tasks",
    description = "Reconcile completion state against the current task file."
)]
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct SyncTasksTool {
    pub root: Option<String>,
}

#[mcp_tool(
    name = "show_rules",
    description = "Show the rule text prepended to annotated tasks, including the safety preamble."
)]
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct ShowRulesTool {
    pub root: Option<String>,
}

// Generates enum TasklaneTools with variants for each tool
tool_box!(
    TasklaneTools,
    [
        VersionTool,
        ListTasksTool,
        ExplainTasksTool,
        PeekTaskTool,
        NextTaskTool,
        ResetPointerTool,
        ResetStatusTool,
        GotoTaskTool,
        StartTaskTool,
        CompleteTaskTool,
        UncompleteTaskTool,
        AutoAdvanceTool,
        SyncTasksTool,
        ShowRulesTool
    ]
);

pub struct TasklaneServerHandler {
    pub context: McpContext,
}

#[async_trait]
impl ServerHandler for TasklaneServerHandler {
    async fn handle_list_tools_request(
        &self,
        _params: Option<PaginatedRequestParams>,
        _runtime: std::sync::Arc<dyn McpServer>,
    ) -> Result<ListToolsResult, RpcError> {
        Ok(ListToolsResult {
            meta: None,
            next_cursor: None,
            tools: TasklaneTools::tools(),
        })
    }

    async fn handle_call_tool_request(
        &self,
        params: CallToolRequestParams,
        _runtime: std::sync::Arc<dyn McpServer>,
    ) -> Result<CallToolResult, CallToolError> {
        let tool = TasklaneTools::try_from(params).map_err(CallToolError::new)?;
        match tool {
            TasklaneTools::VersionTool(tool) => tool.call(&self.context),
            TasklaneTools::ListTasksTool(tool) => tool.call(&self.context),
            TasklaneTools::ExplainTasksTool(tool) => tool.call(&self.context),
            TasklaneTools::PeekTaskTool(tool) => tool.call(&self.context),
            TasklaneTools::NextTaskTool(tool) => tool.call(&self.context),
            TasklaneTools::ResetPointerTool(tool) => tool.call(&self.context),
            TasklaneTools::ResetStatusTool(tool) => tool.call(&self.context),
            TasklaneTools::GotoTaskTool(tool) => tool.call(&self.context),
            TasklaneTools::StartTaskTool(tool) => tool.call(&self.context),
            TasklaneTools::CompleteTaskTool(tool) => tool.call(&self.context),
            TasklaneTools::UncompleteTaskTool(tool) => tool.call(&self.context),
            TasklaneTools::AutoAdvanceTool(tool) => tool.call(&self.context),
            TasklaneTools::SyncTasksTool(tool) => tool.call(&self.context),
            TasklaneTools::ShowRulesTool(tool) => tool.call(&self.context),
        }
    }
}

impl VersionTool {
    fn call(&self, _context: &McpContext) -> Result<CallToolResult, CallToolError> {
        ok_text(format!(
            "tasklane {} ({})",
            env!("CARGO_PKG_VERSION"),
            version::FULL
        ))
    }
}

impl ListTasksTool {
    fn call(&self, context: &McpContext) -> Result<CallToolResult, CallToolError> {
        let ws = open_workspace(context, self.root.as_deref());
        let records = ws.tasks().map_err(CallToolError::new)?;
        ok_text(views::task_table(&records, ws.state()))
    }
}

impl ExplainTasksTool {
    fn call(&self, context: &McpContext) -> Result<CallToolResult, CallToolError> {
        let ws = open_workspace(context, self.root.as_deref());
        let records = ws.tasks().map_err(CallToolError::new)?;
        ok_text(views::task_details(&records, ws.state()))
    }
}

impl PeekTaskTool {
    fn call(&self, context: &McpContext) -> Result<CallToolResult, CallToolError> {
        let mut ws = open_workspace(context, self.root.as_deref());
        let step = ws.peek(self.with_rules).map_err(CallToolError::new)?;
        ok_text(views::peek_text(&step))
    }
}

impl NextTaskTool {
    fn call(&self, context: &McpContext) -> Result<CallToolResult, CallToolError> {
        let mut ws = open_workspace(context, self.root.as_deref());
        let step = ws.advance(self.with_rules).map_err(CallToolError::new)?;
        ok_text(views::advance_text(&step))
    }
}

impl ResetPointerTool {
    fn call(&self, context: &McpContext) -> Result<CallToolResult, CallToolError> {
        let mut ws = open_workspace(context, self.root.as_deref());
        ws.reset().map_err(CallToolError::new)?;
        ok_text("Pointer reset to 0.".to_string())
    }
}

impl ResetStatusTool {
    fn call(&self, context: &McpContext) -> Result<CallToolResult, CallToolError> {
        let mut ws = open_workspace(context, self.root.as_deref());
        let cleared = ws.reset_status().map_err(CallToolError::new)?;
        if cleared {
            ok_text("All completion marks cleared.".to_string())
        } else {
            ok_text("No completion marks to clear.".to_string())
        }
    }
}

impl GotoTaskTool {
    fn call(&self, context: &McpContext) -> Result<CallToolResult, CallToolError> {
        let mut ws = open_workspace(context, self.root.as_deref());
        let landed = ws.goto(self.index).map_err(CallToolError::new)?;
        ok_text(format!("Pointer moved to {landed}."))
    }
}

impl StartTaskTool {
    fn call(&self, context: &McpContext) -> Result<CallToolResult, CallToolError> {
        let mut ws = open_workspace(context, self.root.as_deref());
        let info = ws.start_info(self.index).map_err(CallToolError::new)?;
        ok_text(views::start_text(info.as_ref()))
    }
}

impl CompleteTaskTool {
    fn call(&self, context: &McpContext) -> Result<CallToolResult, CallToolError> {
        let mut ws = open_workspace(context, self.root.as_deref());
        let outcome = ws.complete(self.index).map_err(CallToolError::new)?;
        ok_text(views::complete_text(&outcome))
    }
}

impl UncompleteTaskTool {
    fn call(&self, context: &McpContext) -> Result<CallToolResult, CallToolError> {
        let mut ws = open_workspace(context, self.root.as_deref());
        let outcome = ws.uncomplete(self.index).map_err(CallToolError::new)?;
        ok_text(views::uncomplete_text(&outcome))
    }
}

impl AutoAdvanceTool {
    fn call(&self, context: &McpContext) -> Result<CallToolResult, CallToolError> {
        let mut ws = open_workspace(context, self.root.as_deref());
        let batch = ws.batch_advance(self.count).map_err(CallToolError::new)?;
        ok_text(views::batch_text(&batch))
    }
}

impl SyncTasksTool {
    fn call(&self, context: &McpContext) -> Result<CallToolResult, CallToolError> {
        let mut ws = open_workspace(context, self.root.as_deref());
        let records = ws.reconcile().map_err(CallToolError::new)?;
        ok_text(views::sync_summary(&records, ws.state()))
    }
}

impl ShowRulesTool {
    fn call(&self, context: &McpContext) -> Result<CallToolResult, CallToolError> {
        let ws = open_workspace(context, self.root.as_deref());
        ok_text(ws.rules())
    }
}
