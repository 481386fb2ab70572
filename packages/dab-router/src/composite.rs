//! Operations that compose an ADB shell command with a parser, rather than
//! routing between scrcpy and ADB.
use dab_adb::exec_adb_shell;
use dab_config::BridgeConfig;
use dab_parse::{find_elements, parse_long_listing, parse_ui_dump, FileEntry, FindCriteria, UiNode};

use crate::error::RouterResult;
use crate::router::Router;

/// `ls -la` against a remote path, parsed into structured entries.
pub fn list_dir(config: &BridgeConfig, serial: &str, path: &str) -> RouterResult<Vec<FileEntry>> {
    let output = exec_adb_shell(config, serial, &format!("ls -la {path}"), config.adb_timeout)?;
    Ok(parse_long_listing(&output))
}

/// `uiautomator dump` to a file on the device, then `cat` it back, parsed
/// into structured nodes.
pub fn dump_ui(config: &BridgeConfig, serial: &str) -> RouterResult<Vec<UiNode>> {
    exec_adb_shell(
        config,
        serial,
        "uiautomator dump /sdcard/window_dump.xml",
        config.adb_timeout,
    )?;
    let output = exec_adb_shell(config, serial, "cat /sdcard/window_dump.xml", config.adb_timeout)?;
    Ok(parse_ui_dump(&output))
}

/// Dump the UI tree and return every node matching `criteria`.
pub fn find_element(
    config: &BridgeConfig,
    serial: &str,
    criteria: &FindCriteria,
) -> RouterResult<Vec<UiNode>> {
    let nodes = dump_ui(config, serial)?;
    Ok(find_elements(&nodes, criteria)
        .into_iter()
        .cloned()
        .collect())
}

/// Dump the UI tree, find the first node matching `criteria`, and tap its
/// center.
pub fn tap_element(
    router: &Router,
    config: &BridgeConfig,
    serial: &str,
    criteria: &FindCriteria,
) -> RouterResult<()> {
    let nodes = dump_ui(config, serial)?;
    let matches = find_elements(&nodes, criteria);
    let target = match matches.as_slice() {
        [single] => single,
        [] => return Err(crate::error::RouterError::ElementNotFound),
        many => return Err(crate::error::RouterError::AmbiguousMatch(many.len())),
    };
    let (x, y) = target.tap_center;
    router.tap(Some(serial), x, y)
}
