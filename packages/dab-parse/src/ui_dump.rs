//! Parser for `uiautomator dump` XML output.
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UiNode {
    pub text: String,
    pub resource_id: String,
    pub class_name: String,
    pub content_desc: String,
    pub clickable: bool,
    pub bounds: (i32, i32, i32, i32),
    pub tap_center: (i32, i32),
}

/// Criteria for [`find_elements`]; `None` fields are not checked. Multiple
/// present criteria AND together.
#[derive(Debug, Clone, Default)]
pub struct FindCriteria {
    pub text: Option<String>,
    pub resource_id: Option<String>,
    pub class_name: Option<String>,
}

static NODE_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<node\b([^>]*?)/?>").unwrap());
static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"([\w-]+)="([^"]*)"#).unwrap());
static BOUNDS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(\d+),(\d+)\]\[(\d+),(\d+)\]$").unwrap());

/// Parse every `<node .../>` element in document order. Nodes whose
/// `bounds` attribute does not match `[x1,y1][x2,y2]` are dropped; the
/// output is flat, hierarchy is not preserved.
pub fn parse_ui_dump(xml: &str) -> Vec<UiNode> {
    NODE_TAG_RE
        .captures_iter(xml)
        .filter_map(|caps| parse_node(&caps[1]))
        .collect()
}

fn parse_node(attrs: &str) -> Option<UiNode> {
    let mut text = String::new();
    let mut resource_id = String::new();
    let mut class_name = String::new();
    let mut content_desc = String::new();
    let mut clickable = false;
    let mut bounds_raw = String::new();

    for caps in ATTR_RE.captures_iter(attrs) {
        let key = &caps[1];
        let value = &caps[2];
        match key {
            "text" => text = unescape(value),
            "resource-id" => resource_id = unescape(value),
            "class" => class_name = unescape(value),
            "content-desc" => content_desc = unescape(value),
            "clickable" => clickable = value == "true",
            "bounds" => bounds_raw = value.to_string(),
            _ => {}
        }
    }

    let caps = BOUNDS_RE.captures(&bounds_raw)?;
    let x1: i32 = caps[1].parse().ok()?;
    let y1: i32 = caps[2].parse().ok()?;
    let x2: i32 = caps[3].parse().ok()?;
    let y2: i32 = caps[4].parse().ok()?;
    let tap_center = ((x1 + x2) / 2, (y1 + y2) / 2);

    trace!(%resource_id, ?tap_center, "parsed ui node");
    Some(UiNode {
        text,
        resource_id,
        class_name,
        content_desc,
        clickable,
        bounds: (x1, y1, x2, y2),
        tap_center,
    })
}

fn unescape(value: &str) -> String {
    value
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Filter nodes against [`FindCriteria`]: text/content-desc are
/// case-insensitive substring matches, resource-id/class are exact
/// equality, and present criteria AND together.
pub fn find_elements<'a>(nodes: &'a [UiNode], criteria: &FindCriteria) -> Vec<&'a UiNode> {
    nodes
        .iter()
        .filter(|node| matches(node, criteria))
        .collect()
}

fn matches(node: &UiNode, criteria: &FindCriteria) -> bool {
    if let Some(text) = &criteria.text {
        let haystack_text = node.text.to_lowercase();
        let haystack_desc = node.content_desc.to_lowercase();
        let needle = text.to_lowercase();
        if !haystack_text.contains(&needle) && !haystack_desc.contains(&needle) {
            return false;
        }
    }
    if let Some(resource_id) = &criteria.resource_id {
        if node.resource_id != *resource_id {
            return false;
        }
    }
    if let Some(class_name) = &criteria.class_name {
        if node.class_name != *class_name {
            return false;
        }
    }
    true
}
