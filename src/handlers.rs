//! Tool bodies: translate MCP parameters into router/ADB calls and render
//! the result as MCP content. Kept separate from the `#[tool_router]` impl
//! so the dispatch table in `tools.rs` stays a thin wrapper.
use std::sync::Arc;

use rmcp::model::{CallToolResult, Content};
use rmcp::ErrorData as McpError;

use dab_adb::{file_transfer, resolve_serial, AdbError};
use dab_config::BridgeConfig;
use dab_parse::FindCriteria;
use dab_router::RouterError;
use dab_session::SessionManager;

use crate::params::*;

pub struct Context {
    pub config: BridgeConfig,
    pub router: dab_router::Router,
    pub sessions: Arc<SessionManager>,
}

fn ok_text(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

fn router_err(err: RouterError) -> McpError {
    McpError::internal_error(err.to_string(), None)
}

fn adb_err(err: AdbError) -> McpError {
    McpError::internal_error(err.to_string(), None)
}

pub async fn devices(ctx: &Context, _params: DevicesParams) -> Result<CallToolResult, McpError> {
    let config = ctx.config.clone();
    let output = tokio::task::spawn_blocking(move || {
        dab_adb::exec_adb(&config, &["devices", "-l"], config.adb_timeout)
    })
    .await
    .expect("blocking task panicked")
    .map_err(adb_err)?;
    Ok(ok_text(output.stdout))
}

pub async fn start_session(ctx: &Context, params: SessionParams) -> Result<CallToolResult, McpError> {
    let config = ctx.config.clone();
    let sessions = ctx.sessions.clone();
    let serial = resolve_serial(&config, params.serial.as_deref()).map_err(adb_err)?;
    let session = tokio::task::spawn_blocking(move || sessions.start_session(&serial))
        .await
        .expect("blocking task panicked")
        .map_err(RouterError::from)
        .map_err(router_err)?;
    Ok(ok_text(format!(
        "session ready: serial={} scid={:08x} device={} ({}x{})",
        session.serial, session.scid, session.metadata.device_name, session.metadata.width, session.metadata.height
    )))
}

pub async fn stop_session(ctx: &Context, params: SessionParams) -> Result<CallToolResult, McpError> {
    let config = ctx.config.clone();
    let sessions = ctx.sessions.clone();
    let serial = resolve_serial(&config, params.serial.as_deref()).map_err(adb_err)?;
    tokio::task::spawn_blocking(move || sessions.stop_session(&serial))
        .await
        .expect("blocking task panicked")
        .map_err(adb_err)?;
    Ok(ok_text("session stopped"))
}

pub async fn tap(ctx: &Context, params: TapParams) -> Result<CallToolResult, McpError> {
    let router = ctx.router.clone();
    tokio::task::spawn_blocking(move || router.tap(params.serial.as_deref(), params.x, params.y))
        .await
        .expect("blocking task panicked")
        .map_err(router_err)?;
    Ok(ok_text("ok"))
}

pub async fn swipe(ctx: &Context, params: SwipeParams) -> Result<CallToolResult, McpError> {
    let router = ctx.router.clone();
    tokio::task::spawn_blocking(move || {
        router.swipe(
            params.serial.as_deref(),
            params.x1,
            params.y1,
            params.x2,
            params.y2,
            params.duration_ms,
        )
    })
    .await
    .expect("blocking task panicked")
    .map_err(router_err)?;
    Ok(ok_text("ok"))
}

pub async fn long_press(ctx: &Context, params: LongPressParams) -> Result<CallToolResult, McpError> {
    let router = ctx.router.clone();
    tokio::task::spawn_blocking(move || {
        router.long_press(params.serial.as_deref(), params.x, params.y, params.duration_ms)
    })
    .await
    .expect("blocking task panicked")
    .map_err(router_err)?;
    Ok(ok_text("ok"))
}

pub async fn drag_drop(ctx: &Context, params: DragDropParams) -> Result<CallToolResult, McpError> {
    let router = ctx.router.clone();
    tokio::task::spawn_blocking(move || {
        router.drag_drop(
            params.serial.as_deref(),
            params.x1,
            params.y1,
            params.x2,
            params.y2,
            params.duration_ms,
        )
    })
    .await
    .expect("blocking task panicked")
    .map_err(router_err)?;
    Ok(ok_text("ok"))
}

pub async fn scroll(ctx: &Context, params: ScrollParams) -> Result<CallToolResult, McpError> {
    let router = ctx.router.clone();
    tokio::task::spawn_blocking(move || {
        router.scroll(
            params.serial.as_deref(),
            params.x,
            params.y,
            params.dx,
            params.dy,
        )
    })
    .await
    .expect("blocking task panicked")
    .map_err(router_err)?;
    Ok(ok_text("ok"))
}

pub async fn input_text(ctx: &Context, params: InputTextParams) -> Result<CallToolResult, McpError> {
    let router = ctx.router.clone();
    tokio::task::spawn_blocking(move || router.input_text(params.serial.as_deref(), &params.text))
        .await
        .expect("blocking task panicked")
        .map_err(router_err)?;
    Ok(ok_text("ok"))
}

pub async fn key_event(ctx: &Context, params: KeyEventParams) -> Result<CallToolResult, McpError> {
    let router = ctx.router.clone();
    tokio::task::spawn_blocking(move || router.key_event(params.serial.as_deref(), &params.key))
        .await
        .expect("blocking task panicked")
        .map_err(router_err)?;
    Ok(ok_text("ok"))
}

pub async fn clipboard_get(ctx: &Context, params: ClipboardGetParams) -> Result<CallToolResult, McpError> {
    let router = ctx.router.clone();
    let text = tokio::task::spawn_blocking(move || router.clipboard_get(params.serial.as_deref()))
        .await
        .expect("blocking task panicked")
        .map_err(router_err)?;
    Ok(ok_text(text))
}

pub async fn clipboard_set(ctx: &Context, params: ClipboardSetParams) -> Result<CallToolResult, McpError> {
    let router = ctx.router.clone();
    tokio::task::spawn_blocking(move || {
        router.clipboard_set(params.serial.as_deref(), &params.text, params.paste)
    })
    .await
    .expect("blocking task panicked")
    .map_err(router_err)?;
    Ok(ok_text("ok"))
}

pub async fn push_file(ctx: &Context, params: PushFileParams) -> Result<CallToolResult, McpError> {
    let config = ctx.config.clone();
    let serial = resolve_serial(&config, params.serial.as_deref()).map_err(adb_err)?;
    let output = tokio::task::spawn_blocking(move || {
        file_transfer::push_file(&config, &serial, &params.local_path, &params.remote_path)
    })
    .await
    .expect("blocking task panicked")
    .map_err(adb_err)?;
    Ok(ok_text(output))
}

pub async fn pull_file(ctx: &Context, params: PullFileParams) -> Result<CallToolResult, McpError> {
    let config = ctx.config.clone();
    let serial = resolve_serial(&config, params.serial.as_deref()).map_err(adb_err)?;
    let output = tokio::task::spawn_blocking(move || {
        file_transfer::pull_file(&config, &serial, &params.remote_path, &params.local_path)
    })
    .await
    .expect("blocking task panicked")
    .map_err(adb_err)?;
    Ok(ok_text(output))
}

pub async fn list_dir(ctx: &Context, params: ListDirParams) -> Result<CallToolResult, McpError> {
    let config = ctx.config.clone();
    let serial = resolve_serial(&config, params.serial.as_deref()).map_err(adb_err)?;
    let entries = tokio::task::spawn_blocking(move || dab_router::list_dir(&config, &serial, &params.path))
        .await
        .expect("blocking task panicked")
        .map_err(router_err)?;
    let rendered = serde_json::to_string_pretty(&entries.iter().map(render_entry).collect::<Vec<_>>())
        .unwrap_or_default();
    Ok(ok_text(rendered))
}

pub async fn install_apk(ctx: &Context, params: InstallApkParams) -> Result<CallToolResult, McpError> {
    let config = ctx.config.clone();
    let serial = resolve_serial(&config, params.serial.as_deref()).map_err(adb_err)?;
    let (success, output) = tokio::task::spawn_blocking(move || {
        file_transfer::install_apk(&config, &serial, &params.local_path)
    })
    .await
    .expect("blocking task panicked")
    .map_err(adb_err)?;
    Ok(ok_text(format!("success={success}\n{output}")))
}

pub async fn uninstall_apk(ctx: &Context, params: UninstallApkParams) -> Result<CallToolResult, McpError> {
    let config = ctx.config.clone();
    let serial = resolve_serial(&config, params.serial.as_deref()).map_err(adb_err)?;
    let (success, output) = tokio::task::spawn_blocking(move || {
        file_transfer::uninstall_apk(&config, &serial, &params.package_name)
    })
    .await
    .expect("blocking task panicked")
    .map_err(adb_err)?;
    Ok(ok_text(format!("success={success}\n{output}")))
}

pub async fn launch_app(ctx: &Context, params: LaunchAppParams) -> Result<CallToolResult, McpError> {
    let config = ctx.config.clone();
    let serial = resolve_serial(&config, params.serial.as_deref()).map_err(adb_err)?;
    let output = tokio::task::spawn_blocking(move || {
        file_transfer::launch_app(&config, &serial, &params.package_name)
    })
    .await
    .expect("blocking task panicked")
    .map_err(adb_err)?;
    Ok(ok_text(output))
}

pub async fn get_current_activity(ctx: &Context, params: GetActivityParams) -> Result<CallToolResult, McpError> {
    let config = ctx.config.clone();
    let serial = resolve_serial(&config, params.serial.as_deref()).map_err(adb_err)?;
    let output = tokio::task::spawn_blocking(move || file_transfer::get_current_activity(&config, &serial))
        .await
        .expect("blocking task panicked")
        .map_err(adb_err)?;
    Ok(ok_text(output))
}

pub async fn dump_ui(ctx: &Context, params: DumpUiParams) -> Result<CallToolResult, McpError> {
    let config = ctx.config.clone();
    let serial = resolve_serial(&config, params.serial.as_deref()).map_err(adb_err)?;
    let nodes = tokio::task::spawn_blocking(move || dab_router::dump_ui(&config, &serial))
        .await
        .expect("blocking task panicked")
        .map_err(router_err)?;
    let rendered = serde_json::to_string_pretty(&nodes).unwrap_or_default();
    Ok(ok_text(rendered))
}

pub async fn find_element(ctx: &Context, params: FindElementParams) -> Result<CallToolResult, McpError> {
    let config = ctx.config.clone();
    let serial = resolve_serial(&config, params.serial.as_deref()).map_err(adb_err)?;
    let criteria = FindCriteria {
        text: params.text,
        resource_id: params.resource_id,
        class_name: params.class_name,
    };
    let nodes = tokio::task::spawn_blocking(move || dab_router::find_element(&config, &serial, &criteria))
        .await
        .expect("blocking task panicked")
        .map_err(router_err)?;
    let rendered = nodes
        .iter()
        .map(|n| format!("{} [{}] \"{}\" @ {:?}", n.class_name, n.resource_id, n.text, n.tap_center))
        .collect::<Vec<_>>()
        .join("\n");
    Ok(ok_text(if rendered.is_empty() { "no matches".to_string() } else { rendered }))
}

pub async fn tap_element(ctx: &Context, params: TapElementParams) -> Result<CallToolResult, McpError> {
    let config = ctx.config.clone();
    let router = ctx.router.clone();
    let serial = resolve_serial(&config, params.serial.as_deref()).map_err(adb_err)?;
    let criteria = FindCriteria {
        text: params.text,
        resource_id: params.resource_id,
        class_name: params.class_name,
    };
    tokio::task::spawn_blocking(move || dab_router::tap_element(&router, &config, &serial, &criteria))
        .await
        .expect("blocking task panicked")
        .map_err(router_err)?;
    Ok(ok_text("ok"))
}

fn render_entry(entry: &dab_parse::FileEntry) -> serde_json::Value {
    serde_json::json!({
        "name": entry.name,
        "permissions": entry.permissions,
        "owner": entry.owner,
        "group": entry.group,
        "size": entry.size,
        "date": entry.date,
        "is_directory": entry.is_directory,
    })
}
