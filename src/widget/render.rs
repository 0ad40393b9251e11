// DOM layout of the widget and the canvas pie chart.

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement};

use super::anim::FadeFrame;
use crate::chart::{ChartSlice, pie_arcs, slice_at};
use crate::error::{Error, Result};
use crate::roaster::{Action, View};

const CARD_BG: &str = "#111827";

const ROOT_STYLE: &str = "display:flex; flex-direction:column; align-items:center; justify-content:center; min-height:100vh; padding:16px; box-sizing:border-box; color:#fff; font-family:system-ui, sans-serif; background:linear-gradient(to bottom right, #111827, #000, #1f2937);";
const PANEL_STYLE: &str = "max-width:672px; width:100%; background:#1f2937; box-shadow:0 25px 50px -12px rgba(0,0,0,0.6); border-radius:16px; padding:24px; box-sizing:border-box;";
const TITLE_STYLE: &str = "font-size:30px; font-weight:800; text-align:center; color:#facc15; margin:0 0 24px 0;";
const ROAST_STYLE: &str = "font-size:20px; text-align:center; margin:0 0 16px 0;";
const LIST_STYLE: &str = "display:grid; gap:8px; background:#374151; padding:16px; border-radius:12px; list-style:none; margin:0 0 16px 0;";
const ITEM_STYLE: &str = "text-align:center;";
const BUTTON_ROW_STYLE: &str = "display:flex; flex-wrap:wrap; justify-content:center; gap:16px; margin-bottom:24px;";
const GRID_STYLE: &str = "display:grid; grid-template-columns:repeat(auto-fit, minmax(240px, 1fr)); gap:24px; margin-bottom:24px;";
const CARD_STYLE: &str = "background:#111827; padding:16px; border-radius:12px;";
const STAT_STYLE: &str = "margin:4px 0;";
const RESET_STYLE: &str = "margin-top:8px; background:#374151; color:#fff; border:none; padding:4px 16px; border-radius:8px; font-size:14px; cursor:pointer;";
const CANVAS_STYLE: &str = "display:block; margin:0 auto;";
const HIDDEN: &str = "display:none;";

/// (action, label, background, text color) per main button.
const MAIN_BUTTONS: [(Action, &str, &str, &str); 3] = [
    (Action::Generate, "↻ Generate", "#eab308", "#000"),
    (Action::RapidFire, "☰ Rapid-Fire (10)", "#ef4444", "#fff"),
    (Action::SaveFavorite, "★ Save", "#22c55e", "#fff"),
];

#[derive(Clone)]
pub(super) struct Ui {
    roast: Element,
    batch_list: Element,
    generated: Element,
    saved: Element,
    streak: Element,
    best_streak: Element,
    favorites_section: Element,
    favorites_list: Element,
    buttons: Vec<(Action, Element)>,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Ui {
    /// Builds the whole widget under `root`.
    pub(super) fn build(doc: &Document, root: &Element, chart_size: u32) -> Result<Self> {
        root.set_attribute("style", ROOT_STYLE)?;
        let panel = element(doc, root, "div", PANEL_STYLE, None)?;
        element(doc, &panel, "h1", TITLE_STYLE, Some("🤖 Droid Insult Generator"))?;

        let roast = element(doc, &panel, "p", ROAST_STYLE, None)?;
        let batch_list = element(doc, &panel, "ul", HIDDEN, None)?;

        let row = element(doc, &panel, "div", BUTTON_ROW_STYLE, None)?;
        let mut buttons = Vec::with_capacity(Action::ALL.len());
        for (action, label, bg, fg) in MAIN_BUTTONS {
            let style = format!(
                "background:{bg}; color:{fg}; font-weight:700; border:none; padding:8px 24px; border-radius:12px; cursor:pointer; font-size:16px;"
            );
            buttons.push((action, element(doc, &row, "button", &style, Some(label))?));
        }

        let grid = element(doc, &panel, "div", GRID_STYLE, None)?;
        let stats_card = element(doc, &grid, "div", CARD_STYLE, None)?;
        element(
            doc,
            &stats_card,
            "h2",
            "font-size:18px; margin:0 0 8px 0; color:#60a5fa;",
            Some("▤ Personal Stats"),
        )?;
        let generated = element(doc, &stats_card, "p", STAT_STYLE, None)?;
        let saved = element(doc, &stats_card, "p", STAT_STYLE, None)?;
        let streak = element(doc, &stats_card, "p", STAT_STYLE, None)?;
        let best_streak = element(doc, &stats_card, "p", STAT_STYLE, None)?;
        let reset = element(doc, &stats_card, "button", RESET_STYLE, Some("Reset Streak"))?;
        buttons.push((Action::ResetStreak, reset));

        let chart_card = element(doc, &grid, "div", CARD_STYLE, None)?;
        element(
            doc,
            &chart_card,
            "h2",
            "font-size:18px; margin:0 0 8px 0; color:#c084fc;",
            Some("📊 Visual Breakdown"),
        )?;
        let canvas: HtmlCanvasElement = element(doc, &chart_card, "canvas", CANVAS_STYLE, None)?
            .dyn_into()
            .map_err(JsValue::from)?;
        canvas.set_width(chart_size);
        canvas.set_height(chart_size);
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or(Error::NoCanvasContext)?
            .dyn_into()
            .map_err(JsValue::from)?;
        ctx.set_text_align("center");

        let favorites_section = element(doc, &panel, "div", HIDDEN, None)?;
        element(
            doc,
            &favorites_section,
            "h2",
            "font-size:20px; font-weight:700; color:#fde047; margin:0 0 8px 0;",
            Some("⭐ Favorite Roasts"),
        )?;
        let favorites_list = element(
            doc,
            &favorites_section,
            "ul",
            &format!("{LIST_STYLE} max-height:192px; overflow-y:auto;"),
            None,
        )?;

        Ok(Self {
            roast,
            batch_list,
            generated,
            saved,
            streak,
            best_streak,
            favorites_section,
            favorites_list,
            buttons,
            canvas,
            ctx,
        })
    }

    pub(super) fn buttons(&self) -> &[(Action, Element)] {
        &self.buttons
    }

    pub(super) fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Re-renders everything derived from roaster state. The chart is drawn
    /// by the frame loop instead.
    pub(super) fn render(&self, view: &View<'_>) -> Result<()> {
        self.roast.set_text_content(Some(view.display_text));

        fill_list(&self.batch_list, view.batch.iter().map(|p| p.as_str()))?;
        let batch_style = if view.batch.is_empty() { HIDDEN } else { LIST_STYLE };
        self.batch_list.set_attribute("style", batch_style)?;

        let stats = view.stats;
        self.generated
            .set_text_content(Some(&format!("🔥 Generated: {}", stats.generated)));
        self.saved
            .set_text_content(Some(&format!("⭐ Saved: {}", stats.saved)));
        self.streak
            .set_text_content(Some(&format!("⚡ Current Streak: {}", stats.streak)));
        self.best_streak
            .set_text_content(Some(&format!("🏆 Best Streak: {}", stats.best_streak)));

        fill_list(&self.favorites_list, view.favorites.iter().map(String::as_str))?;
        let favorites_style = if view.favorites.is_empty() { HIDDEN } else { "width:100%;" };
        self.favorites_section.set_attribute("style", favorites_style)?;
        Ok(())
    }

    pub(super) fn apply_fade(&self, frame: &FadeFrame) -> Result<()> {
        self.roast.set_attribute("style", &frame.style(ROAST_STYLE))?;
        Ok(())
    }

    pub(super) fn draw_chart(&self, slices: &[ChartSlice], hover: Option<(f64, f64)>) -> Result<()> {
        let ctx = &self.ctx;
        let size = self.canvas.width() as f64;
        let center = (size / 2.0, size / 2.0);
        let radius = size * 0.35;
        ctx.clear_rect(0.0, 0.0, size, self.canvas.height() as f64);

        let arcs = pie_arcs(slices);
        if arcs.is_empty() {
            ctx.set_stroke_style(&JsValue::from_str("#4b5563"));
            ctx.set_line_width(2.0);
            ctx.begin_path();
            ctx.arc(center.0, center.1, radius, 0.0, TAU)?;
            ctx.stroke();
            ctx.set_font("13px system-ui, sans-serif");
            ctx.set_fill_style(&JsValue::from_str("#9ca3af"));
            ctx.fill_text("No roasts yet", center.0, center.1 + 4.0)?;
            return Ok(());
        }

        for arc in &arcs {
            ctx.begin_path();
            ctx.move_to(center.0, center.1);
            ctx.arc(center.0, center.1, radius, arc.start, arc.end)?;
            ctx.close_path();
            ctx.set_fill_style(&JsValue::from_str(slices[arc.index].color));
            ctx.fill();
            if arcs.len() > 1 {
                ctx.set_stroke_style(&JsValue::from_str(CARD_BG));
                ctx.set_line_width(2.0);
                ctx.stroke();
            }
        }

        if let Some(point) = hover {
            if let Some(index) = slice_at(&arcs, center, radius, point) {
                self.draw_tooltip(&slices[index].tooltip(), point, size)?;
            }
        }
        Ok(())
    }

    fn draw_tooltip(&self, text: &str, (x, y): (f64, f64), size: f64) -> Result<()> {
        let ctx = &self.ctx;
        ctx.set_font("12px system-ui, sans-serif");
        let width = ctx.measure_text(text)?.width() + 16.0;
        let height = 24.0;
        let left = (x + 12.0).min(size - width).max(0.0);
        let top = (y - height - 8.0).max(0.0);

        ctx.set_fill_style(&JsValue::from_str("#fff"));
        ctx.fill_rect(left, top, width, height);
        ctx.set_stroke_style(&JsValue::from_str("#ccc"));
        ctx.set_line_width(1.0);
        ctx.stroke_rect(left, top, width, height);
        ctx.set_fill_style(&JsValue::from_str("#000"));
        ctx.fill_text(text, left + width / 2.0, top + 16.0)?;
        Ok(())
    }
}

fn element(
    doc: &Document,
    parent: &Element,
    tag: &str,
    style: &str,
    text: Option<&str>,
) -> Result<Element> {
    let el = doc.create_element(tag)?;
    el.set_attribute("style", style)?;
    if text.is_some() {
        el.set_text_content(text);
    }
    parent.append_child(&el)?;
    Ok(el)
}

fn fill_list<'a>(list: &Element, items: impl Iterator<Item = &'a str>) -> Result<()> {
    let doc = list.owner_document().ok_or(Error::NoDocument)?;
    list.set_text_content(None);
    for item in items {
        element(&doc, list, "li", ITEM_STYLE, Some(item))?;
    }
    Ok(())
}
