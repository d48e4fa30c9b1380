//! # Image Renderer
//!
//! 1200x628 SVG card for one bounty, or a placeholder when the list is empty.
//! Upstream text is truncated by characters and escaped before it is placed.
use crate::{
    bounties::Bounty,
    utils::{char_slice, escape, format_reward},
};

pub const WIDTH: u32 = 1200;
pub const HEIGHT: u32 = 628;
pub const BOARD_TITLE: &str = "AI Bounty Board";
pub const SOURCE_LABEL: &str = "bounty.owockibot.xyz";

const TITLE_CHARS: usize = 40;
const LINE_CHARS: usize = 60;
const MAX_TAGS: usize = 4;
const TAG_SEPARATOR: &str = " · ";

pub fn render_bounty_image(bounty: Option<&Bounty>, index: usize, total: usize) -> String {
    let Some(bounty) = bounty else {
        return render_empty();
    };

    let reward = escape(&format_reward(&bounty.reward));
    let title = escape(char_slice(&bounty.title, 0, TITLE_CHARS));
    let (first_line, second_line) = description_lines(&bounty.description);
    let tags = bounty
        .tags
        .iter()
        .take(MAX_TAGS)
        .map(|t| escape(t))
        .collect::<Vec<_>>()
        .join(TAG_SEPARATOR);
    let status = escape(&bounty.status.to_uppercase());
    let position = index + 1;

    format!(
        r##"<svg width="{WIDTH}" height="{HEIGHT}" xmlns="http://www.w3.org/2000/svg">
  <defs>
    <linearGradient id="grad" x1="0%" y1="0%" x2="100%" y2="100%">
      <stop offset="0%" style="stop-color:#667eea;stop-opacity:1" />
      <stop offset="100%" style="stop-color:#764ba2;stop-opacity:1" />
    </linearGradient>
  </defs>
  <rect width="{WIDTH}" height="{HEIGHT}" fill="url(#grad)"/>
  <text x="50" y="70" font-family="Arial" font-size="32" fill="#fff" font-weight="bold">{BOARD_TITLE}</text>
  <text x="1150" y="70" font-family="Arial" font-size="24" fill="#fff" text-anchor="end">{position} / {total}</text>
  <rect x="50" y="100" width="250" height="80" fill="#fff" rx="10"/>
  <text x="175" y="150" font-family="Arial" font-size="36" fill="#667eea" text-anchor="middle" font-weight="bold">{reward} USDC</text>
  <text x="50" y="240" font-family="Arial" font-size="42" fill="#fff" font-weight="bold">{title}</text>
  <text x="50" y="300" font-family="Arial" font-size="24" fill="#eee">{first_line}</text>
  <text x="50" y="340" font-family="Arial" font-size="24" fill="#eee">{second_line}</text>
  <text x="50" y="420" font-family="Arial" font-size="20" fill="#ddd">Tags: {tags}</text>
  <text x="50" y="580" font-family="Arial" font-size="18" fill="#ccc">Status: {status}</text>
  <text x="1150" y="580" font-family="Arial" font-size="18" fill="#ccc" text-anchor="end">{SOURCE_LABEL}</text>
</svg>
"##
    )
}

fn render_empty() -> String {
    format!(
        r##"<svg width="{WIDTH}" height="{HEIGHT}" xmlns="http://www.w3.org/2000/svg">
  <rect width="{WIDTH}" height="{HEIGHT}" fill="#1a1a2e"/>
  <text x="600" y="280" font-family="Arial" font-size="48" fill="#fff" text-anchor="middle" font-weight="bold">{BOARD_TITLE}</text>
  <text x="600" y="350" font-family="Arial" font-size="32" fill="#aaa" text-anchor="middle">No open bounties</text>
</svg>
"##
    )
}

/// Characters `[0, 60)` and `[60, 120)`, anything past that is dropped.
fn description_lines(description: &str) -> (String, String) {
    let first = char_slice(description, 0, LINE_CHARS);
    let second = char_slice(description, LINE_CHARS, LINE_CHARS * 2);

    (escape(first), escape(second))
}
