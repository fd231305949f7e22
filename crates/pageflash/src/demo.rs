//! Built-in demo page.
//!
//! A small tourism dashboard with every element the helpers look for: a
//! background host, a mobile menu, a hero heading, one server-rendered flash
//! message, feature and stat cards with layout boxes, and an upload form.

use crate::dom::{Document, NodeId, Rect};

/// Handles to the interesting nodes of the demo page.
#[derive(Debug, Clone)]
pub struct DemoNodes {
    pub menu_button: NodeId,
    pub menu: NodeId,
    pub container: NodeId,
    pub hero_title: NodeId,
    pub prerendered_flash: NodeId,
    pub features: NodeId,
    pub feature_cards: Vec<NodeId>,
    pub stat_cards: Vec<NodeId>,
    pub chart: NodeId,
    pub form: NodeId,
    pub destination: NodeId,
    pub year: NodeId,
    pub file_wrapper: NodeId,
    pub file_input: NodeId,
    pub file_label: NodeId,
    pub submit: NodeId,
}

pub const HERO_TEXT: &str = "Jelajahi Data Pariwisata";
pub const PRERENDERED_MESSAGE: &str = "Data berhasil dimuat";

/// Build the demo page.
pub fn demo_document() -> (Document, DemoNodes) {
    let mut doc = Document::new();
    let body = doc.body();

    doc.create_child(body, "div", &["animated-bg"]);

    let nav = doc.create_child(body, "nav", &[]);
    let menu_button = doc.create_child(nav, "button", &["mobile-menu-btn"]);
    doc.set_text(menu_button, "☰");
    let menu = doc.create_child(nav, "ul", &[]);
    for label in ["Beranda", "Upload", "Dashboard", "Prediksi"] {
        let item = doc.create_child(menu, "li", &[]);
        let link = doc.create_child(item, "a", &[]);
        doc.set_attr(link, "href", "#");
        doc.set_text(link, label);
    }

    let container = doc.create_child(body, "main", &["container"]);

    let flashes = doc.create_child(container, "div", &["flash-messages"]);
    let prerendered_flash =
        doc.create_child(flashes, "div", &["flash-message", "flash-success"]);
    doc.set_text(prerendered_flash, PRERENDERED_MESSAGE);

    let hero = doc.create_child(container, "section", &["hero"]);
    let hero_title = doc.create_child(hero, "h1", &[]);
    doc.set_text(hero_title, HERO_TEXT);

    let features = doc.create_child(container, "section", &["features"]);
    let mut feature_cards = Vec::new();
    for (index, title) in ["Upload CSV", "Analisis Tren", "Prediksi"].iter().enumerate() {
        let card = doc.create_child(features, "div", &["feature-card"]);
        doc.set_text(card, title);
        doc.set_rect(card, Rect::new(700.0 + index as f64 * 40.0, 260.0));
        feature_cards.push(card);
    }

    let stats = doc.create_child(container, "section", &["stats"]);
    let mut stat_cards = Vec::new();
    for (index, title) in ["Wisatawan", "Destinasi"].iter().enumerate() {
        let card = doc.create_child(stats, "div", &["stat-card"]);
        doc.set_text(card, title);
        doc.set_rect(card, Rect::new(1100.0 + index as f64 * 20.0, 180.0));
        stat_cards.push(card);
    }

    let chart = doc.create_child(container, "div", &["chart-container"]);
    doc.set_rect(chart, Rect::new(1500.0, 400.0));

    let form = doc.create_child(container, "form", &[]);
    doc.set_attr(form, "id", "upload-form");

    let group = doc.create_child(form, "div", &["form-group"]);
    let destination = doc.create_child(group, "input", &[]);
    doc.set_attr(destination, "type", "text");
    doc.set_attr(destination, "name", "destination");
    doc.set_attr(destination, "required", "");

    let group = doc.create_child(form, "div", &["form-group"]);
    let year = doc.create_child(group, "input", &[]);
    doc.set_attr(year, "type", "number");
    doc.set_attr(year, "name", "year");
    doc.set_attr(year, "required", "");

    let group = doc.create_child(form, "div", &["form-group"]);
    let file_wrapper = doc.create_child(group, "div", &["file-input"]);
    let file_input = doc.create_child(file_wrapper, "input", &[]);
    doc.set_attr(file_input, "type", "file");
    doc.set_attr(file_input, "name", "dataset");
    doc.set_attr(file_input, "accept", ".csv");
    doc.set_attr(file_input, "required", "");
    let file_label = doc.create_child(file_wrapper, "span", &["file-label"]);
    doc.set_text(file_label, "📁 Pilih file");

    let submit = doc.create_child(form, "button", &[]);
    doc.set_attr(submit, "type", "submit");
    doc.set_text(submit, "Analisis");

    let nodes = DemoNodes {
        menu_button,
        menu,
        container,
        hero_title,
        prerendered_flash,
        features,
        feature_cards,
        stat_cards,
        chart,
        form,
        destination,
        year,
        file_wrapper,
        file_input,
        file_label,
        submit,
    };
    (doc, nodes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_has_expected_markup() {
        let (doc, nodes) = demo_document();
        assert_eq!(doc.query_selector(".mobile-menu-btn"), Some(nodes.menu_button));
        assert_eq!(doc.query_selector("nav ul"), Some(nodes.menu));
        assert_eq!(doc.query_selector(".hero h1"), Some(nodes.hero_title));
        assert_eq!(doc.query_selector_all(".flash-message"), vec![nodes.prerendered_flash]);
        assert_eq!(doc.query_selector_all("[required]").len(), 3);
        assert_eq!(
            doc.query_selector(r#"input[type="file"]"#),
            Some(nodes.file_input)
        );
        assert_eq!(doc.text_content(nodes.hero_title), HERO_TEXT);
    }
}
