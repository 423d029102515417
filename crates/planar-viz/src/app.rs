//! Interactive before/after figure.
//!
//! The application shows the same scene as the static backend on a
//! pannable, zoomable canvas and adds the freehand and polygon drawing
//! tools. Geometry handling lives in [`ViewState`] and
//! [`crate::tools`]; this module only wires them to egui input and
//! painting.

use eframe::egui;
use glam::{DMat3, DVec2, DVec3};

use crate::figure::{demo_triangle, vertex_label};
use crate::tools::{Freehand, PolyDraw, ToolKind};
use planar_transforms::points::transform_points;

const BEFORE_STROKE: egui::Color32 = egui::Color32::from_rgb(169, 169, 169);
const AFTER_STROKE: egui::Color32 = egui::Color32::from_rgb(255, 0, 0);
const FREEHAND_STROKE: egui::Color32 = egui::Color32::from_rgb(31, 119, 180);
const POLYGON_STROKE: egui::Color32 = egui::Color32::from_rgb(44, 160, 44);

/// World window of the interactive canvas.
///
/// Pure coordinate bookkeeping, kept separate from egui so it can be tested
/// headless. The visible half-extent applies to the shorter screen axis;
/// the world y axis points up.
#[derive(Debug, Clone, Copy)]
pub struct ViewState {
    /// World point at the center of the canvas.
    pub center: DVec2,
    /// Half of the visible world extent along the shorter screen axis.
    pub half_extent: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            center: DVec2::ZERO,
            half_extent: 2.0,
        }
    }
}

impl ViewState {
    fn px_per_unit(&self, rect: egui::Rect) -> f64 {
        0.5 * rect.width().min(rect.height()) as f64 / self.half_extent
    }

    /// Map a world point into screen coordinates within `rect`.
    pub fn to_screen(&self, rect: egui::Rect, p: DVec2) -> egui::Pos2 {
        let scale = self.px_per_unit(rect);
        egui::pos2(
            rect.center().x + ((p.x - self.center.x) * scale) as f32,
            rect.center().y - ((p.y - self.center.y) * scale) as f32,
        )
    }

    /// Map a screen position within `rect` back into world coordinates.
    pub fn to_world(&self, rect: egui::Rect, pos: egui::Pos2) -> DVec2 {
        let scale = self.px_per_unit(rect);
        DVec2::new(
            self.center.x + (pos.x - rect.center().x) as f64 / scale,
            self.center.y - (pos.y - rect.center().y) as f64 / scale,
        )
    }

    /// Shift the view by a drag delta given in screen pixels.
    pub fn pan_px(&mut self, rect: egui::Rect, delta: egui::Vec2) {
        let scale = self.px_per_unit(rect);
        self.center.x -= delta.x as f64 / scale;
        self.center.y += delta.y as f64 / scale;
    }

    /// Scale the visible extent, clamped to a sane range.
    pub fn zoom(&mut self, factor: f64) {
        self.half_extent = (self.half_extent * factor).clamp(1e-3, 1e3);
    }
}

/// The interactive figure application.
pub struct FigureApp {
    before: Vec<DVec3>,
    after: Vec<DVec3>,
    view: ViewState,
    tool: ToolKind,
    freehand: Freehand,
    poly: PolyDraw,
}

impl FigureApp {
    /// Build the app for a transformation `h` and an optional point set
    /// (defaults to the demo triangle).
    pub fn new(h: DMat3, points: Option<Vec<DVec3>>) -> Self {
        let before = points.unwrap_or_else(demo_triangle);
        let after = transform_points(&h, &before);
        Self {
            before,
            after,
            view: ViewState::default(),
            tool: ToolKind::default(),
            freehand: Freehand::default(),
            poly: PolyDraw::default(),
        }
    }

    fn set_tool(&mut self, tool: ToolKind) {
        if self.tool != tool {
            log::info!("tool switched to {}", tool.label());
            self.tool = tool;
        }
    }

    fn clear_drawings(&mut self) {
        self.freehand.clear();
        self.poly.clear();
        log::info!("drawings cleared");
    }

    fn handle_hotkeys(&mut self, ctx: &egui::Context) {
        if ctx.input(|i| i.key_pressed(egui::Key::Num1)) {
            self.set_tool(ToolKind::Pan);
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Num2)) {
            self.set_tool(ToolKind::Freehand);
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Num3)) {
            self.set_tool(ToolKind::PolyDraw);
        }
        if ctx.input(|i| i.key_pressed(egui::Key::C)) {
            self.clear_drawings();
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Enter)) {
            self.poly.close();
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.poly.abandon();
        }
    }

    fn handle_pointer(&mut self, rect: egui::Rect, response: &egui::Response) {
        match self.tool {
            ToolKind::Pan => {
                if response.dragged() {
                    self.view.pan_px(rect, response.drag_delta());
                }
            }
            ToolKind::Freehand => {
                if response.drag_started() {
                    if let Some(pos) = response.interact_pointer_pos() {
                        self.freehand.begin(self.view.to_world(rect, pos));
                    }
                } else if response.dragged() {
                    if let Some(pos) = response.interact_pointer_pos() {
                        self.freehand.extend(self.view.to_world(rect, pos));
                    }
                }
                if response.drag_stopped() {
                    self.freehand.finish();
                }
            }
            ToolKind::PolyDraw => {
                if response.double_clicked() {
                    self.poly.close();
                } else if response.clicked() {
                    if let Some(pos) = response.interact_pointer_pos() {
                        self.poly.add_vertex(self.view.to_world(rect, pos));
                    }
                }
            }
        }
    }

    fn screen_strip(&self, rect: egui::Rect, points: &[DVec2]) -> Vec<egui::Pos2> {
        points
            .iter()
            .filter(|p| p.is_finite())
            .map(|&p| self.view.to_screen(rect, p))
            .collect()
    }

    fn paint_shape(
        &self,
        painter: &egui::Painter,
        rect: egui::Rect,
        points: &[DVec3],
        color: egui::Color32,
        primed: bool,
    ) {
        let mut vertices: Vec<DVec2> = points.iter().map(|p| p.truncate()).collect();
        if let Some(&first) = vertices.first() {
            vertices.push(first);
        }
        let strip = self.screen_strip(rect, &vertices);
        painter.add(egui::Shape::line(strip, egui::Stroke::new(2.5, color)));

        for (i, v) in points.iter().enumerate() {
            let v = v.truncate();
            if !v.is_finite() {
                continue;
            }
            let pos = self.view.to_screen(rect, v);
            painter.circle_filled(pos, 5.0, color);
            if let Some(label) = vertex_label(i) {
                let mut text = label.to_string();
                if primed {
                    text.push('\'');
                }
                painter.text(
                    pos + egui::vec2(10.0, -10.0),
                    egui::Align2::LEFT_BOTTOM,
                    text,
                    egui::FontId::proportional(18.0),
                    color,
                );
            }
        }
    }

    fn paint_scene(&self, painter: &egui::Painter, rect: egui::Rect) {
        painter.rect_filled(rect, 0.0, egui::Color32::WHITE);

        // Axes through the world origin and the origin marker.
        let axis = egui::Stroke::new(1.0, egui::Color32::from_gray(225));
        let x0 = self.view.to_screen(rect, DVec2::ZERO);
        painter.line_segment(
            [egui::pos2(rect.left(), x0.y), egui::pos2(rect.right(), x0.y)],
            axis,
        );
        painter.line_segment(
            [egui::pos2(x0.x, rect.top()), egui::pos2(x0.x, rect.bottom())],
            axis,
        );
        let origin = egui::Stroke::new(2.5, egui::Color32::BLACK);
        painter.line_segment([x0 - egui::vec2(10.0, 0.0), x0 + egui::vec2(10.0, 0.0)], origin);
        painter.line_segment([x0 - egui::vec2(0.0, 10.0), x0 + egui::vec2(0.0, 10.0)], origin);

        self.paint_shape(painter, rect, &self.before, BEFORE_STROKE, false);
        self.paint_shape(painter, rect, &self.after, AFTER_STROKE, true);

        // Finished drawings.
        let stroke = egui::Stroke::new(2.0, FREEHAND_STROKE);
        for line in self.freehand.strokes() {
            painter.add(egui::Shape::line(self.screen_strip(rect, line), stroke));
        }
        if let Some(active) = self.freehand.active() {
            painter.add(egui::Shape::line(self.screen_strip(rect, active), stroke));
        }

        let poly_stroke = egui::Stroke::new(2.0, POLYGON_STROKE);
        for polygon in self.poly.polygons() {
            let mut closed = polygon.clone();
            if let Some(&first) = closed.first() {
                closed.push(first);
            }
            painter.add(egui::Shape::line(self.screen_strip(rect, &closed), poly_stroke));
        }

        // Working polygon: open outline plus vertex dots.
        let working = self.poly.working();
        if !working.is_empty() {
            painter.add(egui::Shape::line(self.screen_strip(rect, working), poly_stroke));
            for v in working {
                painter.circle_filled(self.view.to_screen(rect, *v), 3.0, POLYGON_STROKE);
            }
        }
    }
}

impl eframe::App for FigureApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_hotkeys(ctx);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                for kind in [ToolKind::Pan, ToolKind::Freehand, ToolKind::PolyDraw] {
                    if ui.selectable_label(self.tool == kind, kind.label()).clicked() {
                        self.set_tool(kind);
                    }
                }
                ui.separator();
                if ui.button("Clear").clicked() {
                    self.clear_drawings();
                }
                ui.separator();
                ui.label("1/2/3 select tool, Enter closes a polygon, C clears");
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
            let rect = response.rect;

            let scroll = ctx.input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                self.view.zoom(1.0 - scroll as f64 * 1e-3);
            }

            self.handle_pointer(rect, &response);
            self.paint_scene(&painter, rect);
        });
    }
}
