//! The `#[tool_router]` dispatch table: one `#[tool]` method per operation,
//! each a thin wrapper delegating to `handlers`.
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError};

use crate::handlers::{self, Context};
use crate::params::*;

#[derive(Clone)]
pub struct DeviceBridgeServer {
    ctx: Arc<Context>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl DeviceBridgeServer {
    pub fn new(ctx: Context) -> Self {
        Self {
            ctx: Arc::new(ctx),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "List connected Android devices visible to ADB")]
    async fn devices(&self, Parameters(params): Parameters<DevicesParams>) -> Result<CallToolResult, McpError> {
        handlers::devices(&self.ctx, params).await
    }

    #[tool(description = "Start (or reuse) a scrcpy control session for a device")]
    async fn start_session(&self, Parameters(params): Parameters<SessionParams>) -> Result<CallToolResult, McpError> {
        handlers::start_session(&self.ctx, params).await
    }

    #[tool(description = "Stop the scrcpy control session for a device, if any")]
    async fn stop_session(&self, Parameters(params): Parameters<SessionParams>) -> Result<CallToolResult, McpError> {
        handlers::stop_session(&self.ctx, params).await
    }

    #[tool(description = "Tap at x,y on the device screen")]
    async fn tap(&self, Parameters(params): Parameters<TapParams>) -> Result<CallToolResult, McpError> {
        handlers::tap(&self.ctx, params).await
    }

    #[tool(description = "Swipe from (x1,y1) to (x2,y2) over duration_ms")]
    async fn swipe(&self, Parameters(params): Parameters<SwipeParams>) -> Result<CallToolResult, McpError> {
        handlers::swipe(&self.ctx, params).await
    }

    #[tool(description = "Press and hold at x,y for duration_ms")]
    async fn long_press(&self, Parameters(params): Parameters<LongPressParams>) -> Result<CallToolResult, McpError> {
        handlers::long_press(&self.ctx, params).await
    }

    #[tool(description = "Drag from (x1,y1) and drop at (x2,y2); requires SDK 26+")]
    async fn drag_drop(&self, Parameters(params): Parameters<DragDropParams>) -> Result<CallToolResult, McpError> {
        handlers::drag_drop(&self.ctx, params).await
    }

    #[tool(description = "Scroll at x,y by the given horizontal/vertical deltas, in scroll-wheel clicks")]
    async fn scroll(&self, Parameters(params): Parameters<ScrollParams>) -> Result<CallToolResult, McpError> {
        handlers::scroll(&self.ctx, params).await
    }

    #[tool(description = "Type text into the currently focused field")]
    async fn input_text(&self, Parameters(params): Parameters<InputTextParams>) -> Result<CallToolResult, McpError> {
        handlers::input_text(&self.ctx, params).await
    }

    #[tool(description = "Send a named key event, e.g. HOME, BACK, ENTER")]
    async fn key_event(&self, Parameters(params): Parameters<KeyEventParams>) -> Result<CallToolResult, McpError> {
        handlers::key_event(&self.ctx, params).await
    }

    #[tool(description = "Read the device clipboard; requires an active session and SDK 31+")]
    async fn clipboard_get(&self, Parameters(params): Parameters<ClipboardGetParams>) -> Result<CallToolResult, McpError> {
        handlers::clipboard_get(&self.ctx, params).await
    }

    #[tool(description = "Set the device clipboard, optionally pasting immediately; requires an active session and SDK 29+")]
    async fn clipboard_set(&self, Parameters(params): Parameters<ClipboardSetParams>) -> Result<CallToolResult, McpError> {
        handlers::clipboard_set(&self.ctx, params).await
    }

    #[tool(description = "Push a local file to the device")]
    async fn push_file(&self, Parameters(params): Parameters<PushFileParams>) -> Result<CallToolResult, McpError> {
        handlers::push_file(&self.ctx, params).await
    }

    #[tool(description = "Pull a file from the device to the host")]
    async fn pull_file(&self, Parameters(params): Parameters<PullFileParams>) -> Result<CallToolResult, McpError> {
        handlers::pull_file(&self.ctx, params).await
    }

    #[tool(description = "List a remote directory's contents, parsed into structured entries")]
    async fn list_dir(&self, Parameters(params): Parameters<ListDirParams>) -> Result<CallToolResult, McpError> {
        handlers::list_dir(&self.ctx, params).await
    }

    #[tool(description = "Install an APK from a local path")]
    async fn install_apk(&self, Parameters(params): Parameters<InstallApkParams>) -> Result<CallToolResult, McpError> {
        handlers::install_apk(&self.ctx, params).await
    }

    #[tool(description = "Uninstall an app by package name")]
    async fn uninstall_apk(&self, Parameters(params): Parameters<UninstallApkParams>) -> Result<CallToolResult, McpError> {
        handlers::uninstall_apk(&self.ctx, params).await
    }

    #[tool(description = "Launch an app by package name")]
    async fn launch_app(&self, Parameters(params): Parameters<LaunchAppParams>) -> Result<CallToolResult, McpError> {
        handlers::launch_app(&self.ctx, params).await
    }

    #[tool(description = "Get the currently focused activity")]
    async fn get_current_activity(&self, Parameters(params): Parameters<GetActivityParams>) -> Result<CallToolResult, McpError> {
        handlers::get_current_activity(&self.ctx, params).await
    }

    #[tool(description = "Dump the current UI hierarchy")]
    async fn dump_ui(&self, Parameters(params): Parameters<DumpUiParams>) -> Result<CallToolResult, McpError> {
        handlers::dump_ui(&self.ctx, params).await
    }

    #[tool(description = "Find UI elements by text, resource ID, and/or class name (criteria AND together)")]
    async fn find_element(&self, Parameters(params): Parameters<FindElementParams>) -> Result<CallToolResult, McpError> {
        handlers::find_element(&self.ctx, params).await
    }

    #[tool(description = "Find a UI element and tap its center")]
    async fn tap_element(&self, Parameters(params): Parameters<TapElementParams>) -> Result<CallToolResult, McpError> {
        handlers::tap_element(&self.ctx, params).await
    }
}

#[tool_handler]
impl rmcp::ServerHandler for DeviceBridgeServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Device-automation bridge over ADB and the scrcpy control protocol. \
                 Prefers an active scrcpy session for input and clipboard operations, \
                 falling back to ADB shell commands when no session is running."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
