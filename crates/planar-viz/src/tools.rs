//! State machines for the interactive drawing tools.
//!
//! The tools hold their geometry in world coordinates so finished drawings
//! survive panning and zooming. They know nothing about egui; the app layer
//! feeds them pointer positions and paints whatever they hold.

use glam::DVec2;

/// Maximum number of finished objects a tool keeps; adding more drops the
/// oldest first.
pub const MAX_OBJECTS: usize = 10;

/// Which tool currently owns pointer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolKind {
    /// Drag to pan, scroll to zoom.
    #[default]
    Pan,
    /// Drag to draw a freehand stroke.
    Freehand,
    /// Click to add polygon vertices, double-click or Enter to close.
    PolyDraw,
}

impl ToolKind {
    /// Short name shown in the toolbar.
    pub fn label(&self) -> &'static str {
        match self {
            ToolKind::Pan => "Pan",
            ToolKind::Freehand => "Freehand",
            ToolKind::PolyDraw => "Polygon",
        }
    }
}

fn push_capped(objects: &mut Vec<Vec<DVec2>>, object: Vec<DVec2>) {
    if objects.len() == MAX_OBJECTS {
        objects.remove(0);
    }
    objects.push(object);
}

/// Freehand stroke tool: a drag appends points to the active stroke,
/// releasing the pointer finishes it.
#[derive(Debug, Default)]
pub struct Freehand {
    strokes: Vec<Vec<DVec2>>,
    active: Option<Vec<DVec2>>,
}

impl Freehand {
    /// Start a new stroke at `p`.
    pub fn begin(&mut self, p: DVec2) {
        self.active = Some(vec![p]);
    }

    /// Append a point to the active stroke; no-op when not drawing.
    pub fn extend(&mut self, p: DVec2) {
        if let Some(stroke) = self.active.as_mut() {
            if stroke.last() != Some(&p) {
                stroke.push(p);
            }
        }
    }

    /// Finish the active stroke. Strokes with fewer than two points are
    /// discarded.
    pub fn finish(&mut self) {
        if let Some(stroke) = self.active.take() {
            if stroke.len() >= 2 {
                push_capped(&mut self.strokes, stroke);
            }
        }
    }

    /// Whether a stroke is currently being drawn.
    pub fn is_drawing(&self) -> bool {
        self.active.is_some()
    }

    /// The stroke being drawn, if any.
    pub fn active(&self) -> Option<&[DVec2]> {
        self.active.as_deref()
    }

    /// Finished strokes, oldest first.
    pub fn strokes(&self) -> &[Vec<DVec2>] {
        &self.strokes
    }

    /// Drop all strokes, including the active one.
    pub fn clear(&mut self) {
        self.strokes.clear();
        self.active = None;
    }
}

/// Polygon tool: clicks accumulate vertices, [`PolyDraw::close`] turns them
/// into a finished polygon.
#[derive(Debug, Default)]
pub struct PolyDraw {
    polygons: Vec<Vec<DVec2>>,
    working: Vec<DVec2>,
}

impl PolyDraw {
    /// Add a vertex to the working polygon.
    pub fn add_vertex(&mut self, p: DVec2) {
        self.working.push(p);
    }

    /// Close the working polygon. Returns `false` (leaving the vertices in
    /// place) when fewer than three vertices have been placed.
    pub fn close(&mut self) -> bool {
        if self.working.len() < 3 {
            return false;
        }
        push_capped(&mut self.polygons, std::mem::take(&mut self.working));
        true
    }

    /// Discard the working polygon.
    pub fn abandon(&mut self) {
        self.working.clear();
    }

    /// Vertices of the polygon under construction.
    pub fn working(&self) -> &[DVec2] {
        &self.working
    }

    /// Finished polygons, oldest first.
    pub fn polygons(&self) -> &[Vec<DVec2>] {
        &self.polygons
    }

    /// Drop all polygons and the working vertices.
    pub fn clear(&mut self) {
        self.polygons.clear();
        self.working.clear();
    }
}
