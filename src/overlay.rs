use crate::constants::{
    BASEMAP_ERROR_TEXT, BASEMAP_STATUS_ID, INFO_ATTRIBUTES_ID, INFO_PANEL_ID, INFO_TITLE_ID,
    LOADING_ID, MODEL_ERROR_TEXT,
};
use crate::dom;
use crate::panel;
use viewer_core::{BasemapKind, PickReport};
use web_sys as web;

#[inline]
pub fn hide_loading(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(LOADING_ID) {
        dom::set_shown(&el, false);
    }
}

/// Replace the loading spinner with a permanent error message.
pub fn show_load_error(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(LOADING_ID) {
        el.set_inner_html(&format!(
            "<span class=\"icon\" aria-hidden=\"true\">&#9888;</span><span>{}</span>",
            panel::escape_html(MODEL_ERROR_TEXT)
        ));
        _ = el.class_list().add_1("error");
        dom::set_shown(&el, true);
    }
}

pub fn show_info_panel(document: &web::Document, report: &PickReport) {
    if let Some(title) = document.get_element_by_id(INFO_TITLE_ID) {
        title.set_text_content(Some(panel::title_text(report)));
    }
    if let Some(list) = document.get_element_by_id(INFO_ATTRIBUTES_ID) {
        list.set_inner_html(&panel::attributes_html(report));
    }
    if let Some(el) = document.get_element_by_id(INFO_PANEL_ID) {
        dom::set_shown(&el, true);
    }
}

#[inline]
pub fn hide_info_panel(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(INFO_PANEL_ID) {
        dom::set_shown(&el, false);
    }
}

pub fn show_basemap_error(document: &web::Document, kind: BasemapKind) {
    if let Some(el) = document.get_element_by_id(BASEMAP_STATUS_ID) {
        el.set_text_content(Some(&format!("{} ({})", BASEMAP_ERROR_TEXT, kind)));
        dom::set_shown(&el, true);
    }
}

#[inline]
pub fn clear_basemap_status(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(BASEMAP_STATUS_ID) {
        el.set_text_content(None);
        dom::set_shown(&el, false);
    }
}
