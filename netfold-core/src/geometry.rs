/// Rigid panels and auxiliary net geometry for unfoldable solids
use nalgebra::Point3;

use crate::ease::staggered;
use crate::hinge::Pose;

/// One rigid flat piece of a solid's surface, animated independently.
///
/// Vertices are stored relative to the panel's pivot; the folded pose is the
/// identity by construction, so the world-space folded vertices reconstruct
/// the analytic solid exactly.
#[derive(Debug, Clone)]
pub struct Panel {
    /// Vertex positions relative to `pivot`.
    pub local_vertices: Vec<Point3<f32>>,
    /// Triangles as index triples into `local_vertices`.
    pub indices: Vec<[u16; 3]>,
    /// World-space hinge pivot this panel rotates about.
    pub pivot: Point3<f32>,
    /// Target pose at progress 1, fixed at build time.
    pub unfolded: Pose,
    /// Stagger index, or `None` for panels that track the global progress.
    pub phase: Option<usize>,
    /// Current interpolated pose.
    pub current: Pose,
    pub opacity: f32,
}

impl Panel {
    pub fn new(
        local_vertices: Vec<Point3<f32>>,
        indices: Vec<[u16; 3]>,
        pivot: Point3<f32>,
        unfolded: Pose,
        phase: Option<usize>,
    ) -> Self {
        Self {
            local_vertices,
            indices,
            pivot,
            unfolded,
            phase,
            current: Pose::identity(),
            opacity: 1.0,
        }
    }

    /// A piece that never moves (pyramid base, cube back face).
    pub fn fixed(local_vertices: Vec<Point3<f32>>, indices: Vec<[u16; 3]>) -> Self {
        Self::new(
            local_vertices,
            indices,
            Point3::origin(),
            Pose::identity(),
            None,
        )
    }

    /// This panel's share of the globally eased progress: staggered panels
    /// lag behind the peeling wave, the rest track it directly.
    pub fn local_progress(&self, eased: f32) -> f32 {
        match self.phase {
            Some(i) => staggered(eased, i),
            None => eased,
        }
    }

    /// World-space position of vertex `i` under the current pose.
    pub fn world_vertex(&self, i: usize) -> Point3<f32> {
        self.pivot + self.current.transform_point(&self.local_vertices[i]).coords
    }

    /// World-space triangles under the current pose.
    pub fn world_triangles(&self) -> impl Iterator<Item = [Point3<f32>; 3]> + '_ {
        self.indices.iter().map(|tri| {
            [
                self.world_vertex(tri[0] as usize),
                self.world_vertex(tri[1] as usize),
                self.world_vertex(tri[2] as usize),
            ]
        })
    }
}

/// A fixed world-space piece of the flattened net (sector, rectangle, cap
/// circle) that crossfades in as the solid unfolds.
#[derive(Debug, Clone)]
pub struct NetPiece {
    pub vertices: Vec<Point3<f32>>,
    pub indices: Vec<[u16; 3]>,
    pub opacity: f32,
}

impl NetPiece {
    pub fn new(vertices: Vec<Point3<f32>>, indices: Vec<[u16; 3]>) -> Self {
        Self {
            vertices,
            indices,
            opacity: 0.0,
        }
    }

    pub fn triangles(&self) -> impl Iterator<Item = [Point3<f32>; 3]> + '_ {
        self.indices.iter().map(|tri| {
            [
                self.vertices[tri[0] as usize],
                self.vertices[tri[1] as usize],
                self.vertices[tri[2] as usize],
            ]
        })
    }
}

/// All geometry for one shape instance: the hinged panels of the folded
/// solid plus the auxiliary flattened-net pieces.
///
/// Fully determined by the shape parameters; rebuilt wholesale whenever they
/// change.
#[derive(Debug, Clone)]
pub struct ShapeGeometry {
    pub panels: Vec<Panel>,
    pub net: Vec<NetPiece>,
    /// Whether the folded (panel) representation is rendered.
    pub solid_visible: bool,
    /// Whether the auxiliary net representation is rendered.
    pub net_visible: bool,
}

impl ShapeGeometry {
    pub fn new(panels: Vec<Panel>, net: Vec<NetPiece>) -> Self {
        Self {
            panels,
            net,
            solid_visible: true,
            net_visible: false,
        }
    }

    /// Crossfade between the folded panels and the net representation.
    /// Only meaningful for shapes that carry a net (cone, cylinder).
    pub fn crossfade(&mut self, eased: f32) {
        for panel in &mut self.panels {
            panel.opacity = 1.0 - eased;
        }
        for piece in &mut self.net {
            piece.opacity = eased;
        }
    }

    /// Both representations render while an animation is in flight.
    pub fn begin_animation(&mut self) {
        self.solid_visible = true;
        self.net_visible = !self.net.is_empty();
    }

    /// Exit action for reaching progress 1: snap poses and opacities to
    /// their exact terminal values and show only the net representation.
    pub fn snap_unfolded(&mut self) {
        let has_net = !self.net.is_empty();
        for panel in &mut self.panels {
            panel.current = panel.unfolded.clone();
            panel.opacity = if has_net { 0.0 } else { 1.0 };
        }
        for piece in &mut self.net {
            piece.opacity = 1.0;
        }
        self.solid_visible = !has_net;
        self.net_visible = has_net;
    }

    /// Exit action for reaching progress 0: restore the folded solid.
    pub fn snap_folded(&mut self) {
        for panel in &mut self.panels {
            panel.current = Pose::identity();
            panel.opacity = 1.0;
        }
        for piece in &mut self.net {
            piece.opacity = 0.0;
        }
        self.solid_visible = true;
        self.net_visible = false;
    }
}
