//! One parameter struct per tool, deserialized from the MCP call arguments.
use schemars::JsonSchema;
use serde::Deserialize;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct DevicesParams {}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SessionParams {
    /// Device serial; omit to auto-select when exactly one device is attached.
    pub serial: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct TapParams {
    pub serial: Option<String>,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SwipeParams {
    pub serial: Option<String>,
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
    #[serde(default = "default_gesture_duration_ms")]
    pub duration_ms: u32,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct LongPressParams {
    pub serial: Option<String>,
    pub x: i32,
    pub y: i32,
    #[serde(default = "default_long_press_duration_ms")]
    pub duration_ms: u32,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct DragDropParams {
    pub serial: Option<String>,
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
    #[serde(default = "default_gesture_duration_ms")]
    pub duration_ms: u32,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ScrollParams {
    pub serial: Option<String>,
    pub x: i32,
    pub y: i32,
    /// Horizontal scroll delta, in scroll-wheel clicks.
    #[serde(default)]
    pub dx: i32,
    /// Vertical scroll delta, in scroll-wheel clicks.
    #[serde(default)]
    pub dy: i32,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct InputTextParams {
    pub serial: Option<String>,
    pub text: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct KeyEventParams {
    pub serial: Option<String>,
    /// A key name such as `HOME`, `BACK`, `ENTER`.
    pub key: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ClipboardGetParams {
    pub serial: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ClipboardSetParams {
    pub serial: Option<String>,
    pub text: String,
    #[serde(default)]
    pub paste: bool,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct PushFileParams {
    pub serial: Option<String>,
    pub local_path: String,
    pub remote_path: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct PullFileParams {
    pub serial: Option<String>,
    pub remote_path: String,
    pub local_path: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListDirParams {
    pub serial: Option<String>,
    pub path: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct InstallApkParams {
    pub serial: Option<String>,
    pub local_path: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UninstallApkParams {
    pub serial: Option<String>,
    pub package_name: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct LaunchAppParams {
    pub serial: Option<String>,
    pub package_name: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetActivityParams {
    pub serial: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct DumpUiParams {
    pub serial: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct FindElementParams {
    pub serial: Option<String>,
    pub text: Option<String>,
    pub resource_id: Option<String>,
    pub class_name: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct TapElementParams {
    pub serial: Option<String>,
    pub text: Option<String>,
    pub resource_id: Option<String>,
    pub class_name: Option<String>,
}

fn default_gesture_duration_ms() -> u32 {
    300
}

fn default_long_press_duration_ms() -> u32 {
    600
}
