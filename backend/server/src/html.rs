//! # Frame Renderer
//!
//! HTML document carrying frame metadata for frame-aware clients, plus a plain
//! preview for browsers.
//!
//! ## Metadata
//! - `fc:frame` fixed at `vNext`, image tag, aspect ratio fixed at `1.91:1`
//! - `fc:frame:post_url` only when a callback URL is given
//! - `fc:frame:state` only when state is given, echoed back by the client on the next callback
//! - One `fc:frame:button:N` group per button, numbered from 1, at most [`MAX_BUTTONS`]
use std::fmt::Write;

use crate::{error::AppError, utils::escape};

pub const MAX_BUTTONS: usize = 4;
pub const FRAME_VERSION: &str = "vNext";
pub const ASPECT_RATIO: &str = "1.91:1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    Post,
    Link,
}

impl ButtonAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonAction::Post => "post",
            ButtonAction::Link => "link",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Button {
    pub label: String,
    pub action: Option<(ButtonAction, String)>,
}

impl Button {
    pub fn post(label: &str, target: String) -> Self {
        Self {
            label: label.to_string(),
            action: Some((ButtonAction::Post, target)),
        }
    }

    pub fn link(label: &str, target: String) -> Self {
        Self {
            label: label.to_string(),
            action: Some((ButtonAction::Link, target)),
        }
    }

    /// Plain browsers cannot submit a frame callback, so only link buttons get a real href.
    fn fallback_href(&self) -> &str {
        match &self.action {
            Some((ButtonAction::Link, target)) => target,
            _ => "#",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FrameParams {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub buttons: Vec<Button>,
    pub post_url: Option<String>,
    pub state: Option<String>,
}

pub fn render_frame(params: &FrameParams) -> Result<String, AppError> {
    if params.buttons.len() > MAX_BUTTONS {
        return Err(AppError::TooManyButtons(params.buttons.len()));
    }

    let title = escape(&params.title);
    let description = escape(&params.description);
    let image_url = escape(&params.image_url);

    let mut meta = String::new();
    meta_tag(&mut meta, "fc:frame", FRAME_VERSION);
    meta_tag(&mut meta, "fc:frame:image", &params.image_url);
    meta_tag(&mut meta, "fc:frame:image:aspect_ratio", ASPECT_RATIO);

    if let Some(post_url) = &params.post_url {
        meta_tag(&mut meta, "fc:frame:post_url", post_url);
    }

    if let Some(state) = &params.state {
        meta_tag(&mut meta, "fc:frame:state", state);
    }

    for (i, button) in params.buttons.iter().enumerate() {
        let num = i + 1;
        meta_tag(&mut meta, &format!("fc:frame:button:{num}"), &button.label);

        if let Some((action, target)) = &button.action {
            meta_tag(&mut meta, &format!("fc:frame:button:{num}:action"), action.as_str());
            meta_tag(&mut meta, &format!("fc:frame:button:{num}:target"), target);
        }
    }

    let links: String = params
        .buttons
        .iter()
        .map(|b| {
            format!(
                r#"<a href="{}" class="btn">{}</a>"#,
                escape(b.fallback_href()),
                escape(&b.label)
            )
        })
        .collect();

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <meta property="og:title" content="{title}" />
    <meta property="og:description" content="{description}" />
    <meta property="og:image" content="{image_url}" />
{meta}    <style>
      body {{ margin: 0; padding: 20px; font-family: system-ui, sans-serif; background: #0f0f0f; color: #fff; display: flex; flex-direction: column; align-items: center; }}
      .container {{ max-width: 1200px; width: 100%; }}
      .preview img {{ width: 100%; height: auto; display: block; border-radius: 10px; }}
      .info {{ background: #1a1a1a; padding: 20px; border-radius: 10px; margin-top: 20px; }}
      .buttons {{ display: flex; gap: 10px; margin-top: 20px; flex-wrap: wrap; }}
      .btn {{ padding: 12px 24px; background: #667eea; color: #fff; text-decoration: none; border-radius: 6px; font-weight: 600; }}
    </style>
  </head>
  <body>
    <div class="container">
      <h1>{title}</h1>
      <p>{description}</p>
      <div class="preview">
        <img src="{image_url}" alt="Bounty preview">
      </div>
      <div class="info">
        <h3>This page is a Farcaster Frame</h3>
        <p>Open it in a frame-aware client to page through bounties.</p>
        <div class="buttons">{links}</div>
      </div>
    </div>
  </body>
</html>
"#
    ))
}

fn meta_tag(out: &mut String, property: &str, content: &str) {
    let _ = writeln!(
        out,
        r#"    <meta property="{property}" content="{}" />"#,
        escape(content)
    );
}
