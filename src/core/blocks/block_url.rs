use std::sync::OnceLock;

use regex::Regex;

use super::block_models::BlockId;

/// Public web address of a block page.
pub const ARENA_WEB_URL: &str = "https://are.na";

fn block_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"block/([0-9]+)").expect("static block pattern is valid"))
}

/// Extract the block id from a pasted URL such as `https://www.are.na/block/123`.
///
/// Only the first `block/<digits>` occurrence counts, with ASCII digits only.
/// Nothing checks that the block exists; that shows up when it is fetched.
pub fn parse_block_url(text: &str) -> Option<BlockId> {
    block_pattern()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|digits| BlockId::new(digits.as_str()))
}

pub fn block_page_url(id: &BlockId) -> String {
    format!("{}/block/{}", ARENA_WEB_URL, id)
}

/// Imported files are named `<blockId>.<ext>`, so the id is everything before the first dot.
pub fn block_id_from_file_name(name: &str) -> Option<BlockId> {
    name.split('.').next().and_then(|stem| stem.parse().ok())
}
