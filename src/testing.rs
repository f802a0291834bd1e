//! Test doubles shared by the fetch and aggregation tests

use std::collections::{HashMap, VecDeque};
use std::fmt::Write as _;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::RenderError;
use crate::traits::{PageRenderer, RenderRequest};

enum Scripted {
    Page(String),
    Timeout,
}

/// Renderer that replays canned responses per URL.
///
/// Once a URL's script runs out every further load returns an empty page.
#[derive(Default)]
pub struct ScriptedRenderer {
    scripts: Mutex<HashMap<String, VecDeque<Scripted>>>,
    requests: Mutex<Vec<RenderRequest>>,
}

impl ScriptedRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(self, url: &str, html: String) -> Self {
        self.push(url, Scripted::Page(html))
    }

    pub fn timeout(self, url: &str) -> Self {
        self.push(url, Scripted::Timeout)
    }

    fn push(mut self, url: &str, scripted: Scripted) -> Self {
        self.scripts
            .get_mut()
            .unwrap()
            .entry(url.to_string())
            .or_default()
            .push_back(scripted);
        self
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<RenderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageRenderer for ScriptedRenderer {
    async fn render(&self, request: &RenderRequest) -> Result<String, RenderError> {
        self.requests.lock().unwrap().push(request.clone());

        let next = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(&request.url)
            .and_then(VecDeque::pop_front);

        match next {
            Some(Scripted::Page(html)) => Ok(html),
            Some(Scripted::Timeout) => Err(RenderError::NotReady {
                selector: request.ready_selector.clone(),
                timeout: request.timeouts.readiness,
            }),
            None => Ok("<html><body></body></html>".to_string()),
        }
    }
}

/// Amazon-shaped results page from `(title, price, list price)` rows
pub fn amazon_page(items: &[(&str, &str, Option<&str>)]) -> String {
    let mut html = String::from(r#"<html><body><div class="s-main-slot">"#);
    for (i, (title, price, list_price)) in items.iter().enumerate() {
        let _ = write!(
            html,
            r#"<div data-asin="B{i}"><h2><a href="/dp/B{i}"><span>{title}</span></a></h2><span class="a-price-whole">{price}</span>"#
        );
        if let Some(list_price) = list_price {
            let _ = write!(
                html,
                r#"<span class="a-price a-text-price"><span class="a-offscreen">{list_price}</span></span>"#
            );
        }
        html.push_str("</div>");
    }
    html.push_str("</div></body></html>");
    html
}

/// Flipkart-shaped results page from `(title, price, list price)` rows
pub fn flipkart_page(items: &[(&str, &str, Option<&str>)]) -> String {
    let mut html = String::from(r#"<html><body><div class="_1YokD2">"#);
    for (i, (title, price, list_price)) in items.iter().enumerate() {
        let _ = write!(
            html,
            r#"<div class="_1AtVbE"><a class="_1fQZEK" href="/item/p/itm{i}"><div class="_4rR01T">{title}</div><div class="_30jeq3">{price}</div>"#
        );
        if let Some(list_price) = list_price {
            let _ = write!(html, r#"<div class="_3I9_wc">{list_price}</div>"#);
        }
        html.push_str("</a></div>");
    }
    html.push_str("</div></body></html>");
    html
}
