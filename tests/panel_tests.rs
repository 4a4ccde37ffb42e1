// Host-side tests for info panel markup.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod panel {
    include!("../src/panel.rs");
}

use panel::*;
use viewer_core::{PickReport, Scene};

fn report(name: &str, attributes: &[(&str, &str)]) -> PickReport {
    PickReport {
        node: Scene::default().root(),
        name: name.to_string(),
        attributes: attributes
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    }
}

#[test]
fn escapes_markup_characters() {
    assert_eq!(
        escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
        "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
    );
    assert_eq!(escape_html("plain"), "plain");
}

#[test]
fn title_falls_back_for_unnamed_objects() {
    assert_eq!(title_text(&report("Tower", &[])), "Tower");
    assert_eq!(title_text(&report("   ", &[])), "Unnamed object");
}

#[test]
fn no_attributes_shows_placeholder() {
    let html = attributes_html(&report("Tower", &[]));
    assert_eq!(html, "<li class=\"empty\">No attributes</li>");
}

#[test]
fn attributes_render_in_order_and_escaped() {
    let html = attributes_html(&report("Tower", &[("height", "30 m"), ("use", "<office>")]));
    assert_eq!(
        html,
        "<li><span class=\"key\">height</span><span class=\"value\">30 m</span></li>\
         <li><span class=\"key\">use</span><span class=\"value\">&lt;office&gt;</span></li>"
    );
}
