//! Registry of graphs plus the shared camera and light.

use std::collections::vec_deque::Drain;
use std::collections::VecDeque;
use std::io::Write;

use log::{debug, info};
use serde::Serialize;
use slotmap::{new_key_type, SlotMap};
use surfplot_core::{PlotError, Result};
use surfplot_geometry::{Cursor, CursorMoved, Direction, Lattice, Sampler};
use surfplot_math::Aabb3;
use surfplot_mesh::{line_strip_segments, SurfaceMesh};

use crate::camera::{InputSnapshot, OrbitCamera};
use crate::lighting::Lighting;
use crate::settings::{Fill, GraphSettings};

new_key_type! {
    /// Handle of a graph in a [`Scene`].
    pub struct GraphId;
}

/// One plotted surface: its settings and everything built from them.
///
/// A graph is immutable apart from its cursor; new settings build a new
/// graph.
#[derive(Debug)]
pub struct Graph {
    settings: GraphSettings,
    sampler: Sampler,
    lattice: Lattice,
    mesh: SurfaceMesh,
    cursor: Cursor,
}

impl Graph {
    /// Sample, mesh and place the cursor. Fails on bad bounds or equations.
    pub fn build(settings: GraphSettings) -> Result<Self> {
        let sampler = Sampler::new(&settings.formula, &settings.bounds, settings.resolution)?;
        let lattice = sampler.sample();
        let mesh = SurfaceMesh::build(&lattice);
        let cursor = Cursor::new(&sampler);
        Ok(Self {
            settings,
            sampler,
            lattice,
            mesh,
            cursor,
        })
    }

    pub fn settings(&self) -> &GraphSettings {
        &self.settings
    }

    pub fn sampler(&self) -> &Sampler {
        &self.sampler
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn mesh(&self) -> &SurfaceMesh {
        &self.mesh
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// The equation as shown to the user.
    pub fn label(&self) -> String {
        self.settings.formula.to_string()
    }

    pub fn cursor_text(&self) -> String {
        self.cursor.describe(&self.sampler)
    }

    pub fn bounding_box(&self) -> Option<Aabb3> {
        self.lattice.bounding_box()
    }

    fn move_cursor(&mut self, direction: Direction) -> CursorMoved {
        self.cursor.step(&self.sampler, direction)
    }
}

/// Notifications for the UI, drained with [`Scene::drain_events`].
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    CursorMoved { graph: GraphId, moved: CursorMoved },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// Triangle strip with primitive restart.
    TriangleStrip,
    /// Line strip with primitive restart.
    LineStrip,
    /// Independent line segments, two vertices each.
    Lines,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material<'a> {
    Surface(&'a Fill),
    Grid,
    Normals,
}

/// One draw the renderer issues for a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall<'a> {
    pub graph: GraphId,
    pub primitive: Primitive,
    pub material: Material<'a>,
    pub transparent: bool,
    /// Index count for strips, vertex count for lines.
    pub count: usize,
}

impl DrawCall<'_> {
    pub fn primitive_restart(&self) -> bool {
        self.primitive != Primitive::Lines
    }
}

/// All open graphs, the active one, and the shared view state.
#[derive(Debug, Default)]
pub struct Scene {
    graphs: SlotMap<GraphId, Graph>,
    active: Option<GraphId>,
    lighting: Lighting,
    camera: OrbitCamera,
    events: VecDeque<SceneEvent>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph and register it. Nothing is registered on failure.
    pub fn add_graph(&mut self, settings: GraphSettings) -> Result<GraphId> {
        let graph = Graph::build(settings)?;
        let id = self.graphs.insert(graph);
        info!("added graph {:?}: {}", id, self.graphs[id].label());
        Ok(id)
    }

    /// Rebuild a graph from new settings.
    ///
    /// The replacement is built first; on failure the old graph stays as it
    /// was.
    pub fn update_graph(&mut self, id: GraphId, settings: GraphSettings) -> Result<()> {
        let slot = self
            .graphs
            .get_mut(id)
            .ok_or_else(|| PlotError::NotFound(format!("graph {id:?}")))?;
        *slot = Graph::build(settings)?;
        debug!("rebuilt graph {:?}", id);
        Ok(())
    }

    /// Remove a graph; clears the active handle if it pointed there.
    pub fn remove_graph(&mut self, id: GraphId) -> Option<Graph> {
        let graph = self.graphs.remove(id)?;
        if self.active == Some(id) {
            self.active = None;
        }
        info!("removed graph {:?}: {}", id, graph.label());
        Some(graph)
    }

    pub fn graph(&self, id: GraphId) -> Option<&Graph> {
        self.graphs.get(id)
    }

    pub fn graphs(&self) -> impl Iterator<Item = (GraphId, &Graph)> {
        self.graphs.iter()
    }

    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }

    pub fn active(&self) -> Option<GraphId> {
        self.active
    }

    pub fn set_active(&mut self, id: GraphId) -> Result<()> {
        if !self.graphs.contains_key(id) {
            return Err(PlotError::NotFound(format!("graph {id:?}")));
        }
        self.active = Some(id);
        Ok(())
    }

    pub fn clear_active(&mut self) {
        self.active = None;
    }

    /// Step the active graph's cursor and queue a [`SceneEvent::CursorMoved`].
    pub fn move_cursor(&mut self, direction: Direction) -> Result<()> {
        let id = self
            .active
            .ok_or_else(|| PlotError::InvalidOperation("no active graph".into()))?;
        let graph = self
            .graphs
            .get_mut(id)
            .ok_or_else(|| PlotError::NotFound(format!("graph {id:?}")))?;
        let moved = graph.move_cursor(direction);
        self.events.push_back(SceneEvent::CursorMoved { graph: id, moved });
        Ok(())
    }

    pub fn drain_events(&mut self) -> Drain<'_, SceneEvent> {
        self.events.drain(..)
    }

    pub fn lighting(&self) -> &Lighting {
        &self.lighting
    }

    pub fn set_lighting(&mut self, lighting: Lighting) {
        self.lighting = lighting;
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn set_camera(&mut self, camera: OrbitCamera) {
        self.camera = camera;
    }

    pub fn apply_input(&mut self, input: &InputSnapshot) {
        self.camera.apply_input(input);
    }

    /// Bounding box of every defined sample of every graph.
    pub fn bounding_box(&self) -> Option<Aabb3> {
        self.graphs
            .values()
            .filter_map(Graph::bounding_box)
            .reduce(|a, b| a.merge(&b))
    }

    /// Point the camera at everything plotted. Returns `false` if there is
    /// nothing to look at.
    pub fn fit_camera(&mut self) -> bool {
        match self.bounding_box() {
            Some(bounds) => {
                self.camera.fit_to_aabb(&bounds);
                true
            }
            None => false,
        }
    }

    /// Draw calls for one frame; transparent graphs come after opaque ones.
    pub fn draw_list(&self) -> Vec<DrawCall<'_>> {
        let mut calls = Vec::new();
        for (id, graph) in &self.graphs {
            let display = graph.settings.display;
            if !display.draw {
                continue;
            }
            let call = |primitive, material, count| DrawCall {
                graph: id,
                primitive,
                material,
                transparent: display.transparent,
                count,
            };

            let mesh = &graph.mesh;
            if !mesh.strip.is_empty() {
                calls.push(call(
                    Primitive::TriangleStrip,
                    Material::Surface(&graph.settings.fill),
                    mesh.strip.len(),
                ));
            }
            if display.draw_grid && !mesh.grid.is_empty() {
                calls.push(call(Primitive::LineStrip, Material::Grid, mesh.grid.len()));
            }
            if display.draw_normals && !mesh.normal_lines.is_empty() {
                calls.push(call(
                    Primitive::Lines,
                    Material::Normals,
                    mesh.normal_lines.len(),
                ));
            }
        }
        calls.sort_by_key(|c| c.transparent);
        calls
    }

    /// Total triangles across all drawn graphs.
    pub fn total_triangles(&self) -> usize {
        self.graphs
            .values()
            .filter(|g| g.settings.display.draw)
            .map(|g| g.mesh.triangle_count())
            .sum()
    }

    /// Write a standalone HTML page with a Three.js viewer of the scene.
    pub fn export_html<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let graphs: Vec<HtmlGraph> = self
            .graphs
            .values()
            .filter(|g| g.settings.display.draw)
            .map(HtmlGraph::new)
            .collect();
        let view = HtmlView::new(&self.camera, &self.lighting);
        let graph_json = script_safe(serde_json::to_string(&graphs)?);
        let view_json = script_safe(serde_json::to_string(&view)?);

        write!(writer, "{}", HTML_HEAD)?;
        writeln!(writer, "        <div>Graphs: {}</div>", graphs.len())?;
        writeln!(writer, "        <div>Triangles: {}</div>", self.total_triangles())?;
        writeln!(writer, r#"        <hr style="border: 1px solid #666; margin: 10px 0;">"#)?;
        for (id, graph) in &self.graphs {
            if !graph.settings.display.draw {
                continue;
            }
            let marker = if self.active == Some(id) { " (active)" } else { "" };
            writeln!(writer, r#"        <div class="graph-item">"#)?;
            writeln!(
                writer,
                r#"            <div class="graph-name">{}{}</div>"#,
                escape_html(&graph.label()),
                marker
            )?;
            writeln!(
                writer,
                r#"            <div class="graph-stats">{} triangles, {}/{} points defined</div>"#,
                graph.mesh.triangle_count(),
                graph.lattice.defined_count(),
                graph.lattice.len()
            )?;
            if self.active == Some(id) {
                writeln!(
                    writer,
                    r#"            <pre class="cursor">{}</pre>"#,
                    escape_html(&graph.cursor_text())
                )?;
            }
            writeln!(writer, "        </div>")?;
        }
        writeln!(writer, "    </div>")?;
        writeln!(writer, "    <script>")?;
        writeln!(writer, "        const graphData = {graph_json};")?;
        writeln!(writer, "        const view = {view_json};")?;
        write!(writer, "{}", HTML_SCRIPT)?;
        Ok(())
    }
}

/// Keep embedded JSON from closing the surrounding `<script>` element.
fn script_safe(json: String) -> String {
    json.replace("</", "<\\/")
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Per-graph payload of the HTML viewer. Strips are expanded to plain
/// triangles and segments, so the page needs no primitive restart.
#[derive(Serialize)]
struct HtmlGraph {
    label: String,
    color: [f32; 3],
    texture: Option<String>,
    opacity: f32,
    positions: Vec<f32>,
    normals: Vec<f32>,
    uvs: Vec<f32>,
    indices: Vec<u32>,
    grid: Vec<u32>,
    normal_lines: Vec<f32>,
}

impl HtmlGraph {
    fn new(graph: &Graph) -> Self {
        let samples = graph.lattice.samples();
        let display = graph.settings.display;
        let (color, texture) = match &graph.settings.fill {
            Fill::Color(rgb) => (*rgb, None),
            Fill::Texture(name) => ([1.0; 3], Some(name.clone())),
        };
        let grid = if display.draw_grid {
            line_strip_segments(&graph.mesh.grid).concat()
        } else {
            Vec::new()
        };
        let normal_lines = if display.draw_normals {
            graph
                .mesh
                .normal_lines
                .iter()
                .flat_map(|p| p.as_vec3().to_array())
                .collect()
        } else {
            Vec::new()
        };

        Self {
            label: graph.label(),
            color,
            texture,
            opacity: if display.transparent { 0.5 } else { 1.0 },
            positions: samples
                .iter()
                .flat_map(|s| s.position.as_vec3().to_array())
                .collect(),
            normals: samples
                .iter()
                .flat_map(|s| s.normal.as_vec3().to_array())
                .collect(),
            uvs: samples
                .iter()
                .flat_map(|s| s.texcoord.as_vec2().to_array())
                .collect(),
            indices: graph.mesh.triangles().concat(),
            grid,
            normal_lines,
        }
    }
}

#[derive(Serialize)]
struct HtmlView {
    target: [f64; 3],
    distance: f64,
    azimuth: f64,
    elevation: f64,
    fov_deg: f64,
    near: f64,
    far: f64,
    light: [f64; 3],
    ambient: f32,
    diffuse: f32,
    specular: f32,
    shininess: f32,
}

impl HtmlView {
    fn new(camera: &OrbitCamera, lighting: &Lighting) -> Self {
        Self {
            target: camera.target.to_array(),
            distance: camera.distance,
            azimuth: camera.azimuth,
            elevation: camera.elevation,
            fov_deg: camera.fov_y.to_degrees(),
            near: camera.near,
            far: camera.far,
            light: lighting.direction.to_array(),
            ambient: lighting.ambient,
            diffuse: lighting.diffuse,
            specular: lighting.specular,
            shininess: lighting.shininess,
        }
    }
}

const HTML_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>surfplot</title>
    <style>
        body {
            margin: 0;
            overflow: hidden;
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            background: #1a1a1a;
        }
        #container {
            width: 100vw;
            height: 100vh;
        }
        #info {
            position: absolute;
            top: 10px;
            left: 10px;
            background: rgba(0, 0, 0, 0.7);
            color: white;
            padding: 15px;
            border-radius: 5px;
            font-size: 14px;
            max-width: 340px;
            max-height: calc(100vh - 40px);
            overflow-y: auto;
        }
        #info h3 {
            margin: 0 0 10px 0;
            font-size: 16px;
            border-bottom: 1px solid #666;
            padding-bottom: 5px;
        }
        #info .graph-item {
            margin: 5px 0;
            padding: 5px;
            background: rgba(255, 255, 255, 0.1);
            border-radius: 3px;
        }
        #info .graph-name {
            font-weight: bold;
            color: #4fc3f7;
            word-break: break-all;
        }
        #info .graph-stats {
            font-size: 12px;
            color: #aaa;
        }
        #info .cursor {
            font-size: 12px;
            margin: 5px 0 0 0;
            white-space: pre-wrap;
        }
        #error {
            position: absolute;
            top: 50%;
            left: 50%;
            transform: translate(-50%, -50%);
            background: rgba(200, 0, 0, 0.9);
            color: white;
            padding: 20px;
            border-radius: 5px;
            display: none;
        }
    </style>
</head>
<body>
    <div id="container"></div>
    <div id="error">Failed to load Three.js from CDN. Please check your internet connection.</div>
    <div id="info">
        <h3>surfplot</h3>
"#;

const HTML_SCRIPT: &str = r#"    </script>
    <script src="https://cdnjs.cloudflare.com/ajax/libs/three.js/r128/three.min.js"></script>
    <script>
        function initScene() {
            const scene = new THREE.Scene();
            scene.background = new THREE.Color(0x1a1a1a);

            const camera = new THREE.PerspectiveCamera(
                view.fov_deg, window.innerWidth / window.innerHeight, view.near, view.far);
            camera.up.set(0, 0, 1);

            const renderer = new THREE.WebGLRenderer({ antialias: true });
            renderer.setSize(window.innerWidth, window.innerHeight);
            document.getElementById('container').appendChild(renderer.domElement);

            scene.add(new THREE.AmbientLight(0xffffff, view.ambient));
            const light = new THREE.DirectionalLight(0xffffff, view.diffuse);
            light.position.set(view.light[0], view.light[1], view.light[2]);
            scene.add(light);

            const loader = new THREE.TextureLoader();
            graphData.forEach(data => {
                const geometry = new THREE.BufferGeometry();
                geometry.setAttribute('position', new THREE.Float32BufferAttribute(data.positions, 3));
                geometry.setAttribute('normal', new THREE.Float32BufferAttribute(data.normals, 3));
                geometry.setAttribute('uv', new THREE.Float32BufferAttribute(data.uvs, 2));
                geometry.setIndex(data.indices);

                const material = new THREE.MeshPhongMaterial({
                    color: new THREE.Color(data.color[0], data.color[1], data.color[2]),
                    specular: new THREE.Color(view.specular, view.specular, view.specular),
                    shininess: view.shininess,
                    side: THREE.DoubleSide,
                    transparent: data.opacity < 1.0,
                    opacity: data.opacity,
                    depthWrite: data.opacity >= 1.0
                });
                if (data.texture) material.map = loader.load(data.texture);
                const mesh = new THREE.Mesh(geometry, material);
                mesh.renderOrder = data.opacity < 1.0 ? 1 : 0;
                scene.add(mesh);

                if (data.grid.length > 0) {
                    const gridGeometry = new THREE.BufferGeometry();
                    gridGeometry.setAttribute('position', geometry.getAttribute('position'));
                    gridGeometry.setIndex(data.grid);
                    scene.add(new THREE.LineSegments(gridGeometry,
                        new THREE.LineBasicMaterial({ color: 0x000000 })));
                }
                if (data.normal_lines.length > 0) {
                    const normalGeometry = new THREE.BufferGeometry();
                    normalGeometry.setAttribute('position',
                        new THREE.Float32BufferAttribute(data.normal_lines, 3));
                    scene.add(new THREE.LineSegments(normalGeometry,
                        new THREE.LineBasicMaterial({ color: 0xffff00 })));
                }
            });

            scene.add(new THREE.AxesHelper(Math.max(1, view.distance * 0.25)));

            const center = new THREE.Vector3(view.target[0], view.target[1], view.target[2]);
            let azimuth = view.azimuth;
            let elevation = view.elevation;
            let radius = view.distance;
            const limit = Math.PI / 2 - 0.01;

            function updateCameraPosition() {
                camera.position.set(
                    center.x + radius * Math.cos(elevation) * Math.cos(azimuth),
                    center.y + radius * Math.cos(elevation) * Math.sin(azimuth),
                    center.z + radius * Math.sin(elevation));
                camera.lookAt(center);
            }
            updateCameraPosition();

            let isDragging = false;
            let previousMousePosition = { x: 0, y: 0 };

            renderer.domElement.addEventListener('mousedown', (e) => {
                isDragging = true;
                previousMousePosition = { x: e.clientX, y: e.clientY };
            });

            renderer.domElement.addEventListener('mousemove', (e) => {
                if (isDragging) {
                    azimuth -= (e.clientX - previousMousePosition.x) * 0.01;
                    elevation = Math.max(-limit, Math.min(limit,
                        elevation + (e.clientY - previousMousePosition.y) * 0.01));
                    previousMousePosition = { x: e.clientX, y: e.clientY };
                    updateCameraPosition();
                }
            });

            renderer.domElement.addEventListener('mouseup', () => {
                isDragging = false;
            });

            renderer.domElement.addEventListener('wheel', (e) => {
                e.preventDefault();
                radius = Math.max(0.1, radius * (1 + e.deltaY * 0.001));
                updateCameraPosition();
            });

            window.addEventListener('resize', () => {
                camera.aspect = window.innerWidth / window.innerHeight;
                camera.updateProjectionMatrix();
                renderer.setSize(window.innerWidth, window.innerHeight);
            });

            function animate() {
                requestAnimationFrame(animate);
                renderer.render(scene, camera);
            }
            animate();
        }

        if (typeof THREE === 'undefined') {
            document.getElementById('error').style.display = 'block';
        } else {
            initScene();
        }
    </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use surfplot_geometry::{BoundExprs, Formula, Resolution};
    use surfplot_mesh::RESTART_INDEX;

    use crate::settings::DisplayFlags;

    fn saddle() -> GraphSettings {
        GraphSettings::new(
            Formula::Cartesian {
                z: "x*x - y*y".into(),
            },
            BoundExprs::new("-1", "1", "-1", "1"),
            Resolution::new(10, 10),
        )
    }

    fn with_display(settings: GraphSettings, f: impl FnOnce(&mut DisplayFlags)) -> GraphSettings {
        let mut display = settings.display;
        f(&mut display);
        settings.with_display(display)
    }

    #[test]
    fn test_empty_scene() {
        let scene = Scene::new();
        assert!(scene.is_empty());
        assert_eq!(scene.total_triangles(), 0);
        assert!(scene.bounding_box().is_none());
        assert!(scene.draw_list().is_empty());
    }

    #[test]
    fn test_add_graph_and_bounds() {
        let mut scene = Scene::new();
        let id = scene.add_graph(saddle()).unwrap();
        assert_eq!(scene.len(), 1);
        let graph = scene.graph(id).unwrap();
        assert_eq!(graph.lattice().defined_count(), 100);
        assert_eq!(graph.label(), "z = x*x - y*y");

        let bounds = scene.bounding_box().unwrap();
        assert_eq!(bounds.min.x, -1.0);
        assert_eq!(bounds.max.y, 1.0);
        assert_eq!(scene.total_triangles(), 162);
    }

    #[test]
    fn test_failed_add_registers_nothing() {
        let mut scene = Scene::new();
        let mut settings = saddle();
        settings.bounds.row_max = "1/0".into();
        let err = scene.add_graph(settings).unwrap_err();
        assert_eq!(err.field(), Some(surfplot_core::ErrorField::RowMax));
        assert!(scene.is_empty());
    }

    #[test]
    fn test_failed_update_keeps_old_graph() {
        let mut scene = Scene::new();
        let id = scene.add_graph(saddle()).unwrap();
        let mut bad = saddle();
        bad.formula = Formula::Cartesian { z: "x +".into() };
        assert!(scene.update_graph(id, bad).is_err());
        assert_eq!(scene.graph(id).unwrap().label(), "z = x*x - y*y");

        let mut good = saddle();
        good.formula = Formula::Cartesian { z: "x + y".into() };
        scene.update_graph(id, good).unwrap();
        assert_eq!(scene.graph(id).unwrap().label(), "z = x + y");
    }

    #[test]
    fn test_update_unknown_graph() {
        let mut scene = Scene::new();
        let id = scene.add_graph(saddle()).unwrap();
        scene.remove_graph(id);
        let err = scene.update_graph(id, saddle()).unwrap_err();
        assert!(matches!(err, PlotError::NotFound(_)));
    }

    #[test]
    fn test_active_cleared_on_remove() {
        let mut scene = Scene::new();
        let a = scene.add_graph(saddle()).unwrap();
        let b = scene.add_graph(saddle()).unwrap();
        scene.set_active(a).unwrap();
        scene.remove_graph(b);
        assert_eq!(scene.active(), Some(a));
        scene.remove_graph(a);
        assert_eq!(scene.active(), None);
        assert!(scene.set_active(a).is_err());
    }

    #[test]
    fn test_cursor_moves_queue_events() {
        let mut scene = Scene::new();
        let id = scene.add_graph(saddle()).unwrap();
        let err = scene.move_cursor(Direction::Up).unwrap_err();
        assert!(matches!(err, PlotError::InvalidOperation(_)));

        scene.set_active(id).unwrap();
        scene.move_cursor(Direction::Up).unwrap();
        scene.move_cursor(Direction::Right).unwrap();
        let events: Vec<SceneEvent> = scene.drain_events().collect();
        assert_eq!(events.len(), 2);
        let SceneEvent::CursorMoved { graph, moved } = &events[1];
        assert_eq!(*graph, id);
        assert!(moved.text.contains("x = 0.2000"));
        assert!(scene.drain_events().next().is_none());
    }

    #[test]
    fn test_draw_list_honors_flags() {
        let mut scene = Scene::new();
        let hidden = with_display(saddle(), |d| d.draw = false);
        let glass = with_display(saddle(), |d| {
            d.transparent = true;
            d.draw_normals = true;
        });
        let plain = with_display(saddle(), |d| d.draw_grid = false);
        scene.add_graph(hidden).unwrap();
        let glass_id = scene.add_graph(glass).unwrap();
        let plain_id = scene.add_graph(plain).unwrap();

        let calls = scene.draw_list();
        assert_eq!(calls.len(), 1 + 3);
        assert_eq!(calls[0].graph, plain_id);
        assert_eq!(calls[0].primitive, Primitive::TriangleStrip);
        assert!(!calls[0].transparent);
        assert!(calls[1..].iter().all(|c| c.graph == glass_id && c.transparent));

        let lines = calls.iter().find(|c| c.primitive == Primitive::Lines).unwrap();
        assert_eq!(lines.count, 200);
        assert!(!lines.primitive_restart());
        assert!(calls[0].primitive_restart());
    }

    #[test]
    fn test_fit_camera() {
        let mut scene = Scene::new();
        assert!(!scene.fit_camera());
        scene.add_graph(saddle()).unwrap();
        assert!(scene.fit_camera());
        let bounds = scene.bounding_box().unwrap();
        assert_eq!(scene.camera().target, bounds.center());
    }

    #[test]
    fn test_html_export() {
        let mut scene = Scene::new();
        let id = scene.add_graph(saddle()).unwrap();
        scene.set_active(id).unwrap();

        let mut out = Vec::new();
        scene.export_html(&mut out).unwrap();
        let content = String::from_utf8(out).unwrap();
        assert!(content.contains("<!DOCTYPE html>"));
        assert!(content.contains("three.min.js"));
        assert!(content.contains("z = x*x - y*y (active)"));
        assert!(content.contains("const graphData = ["));
        assert!(!content.contains(&RESTART_INDEX.to_string()));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a < b & c"), "a &lt; b &amp; c");
        assert_eq!(script_safe("\"</script>\"".into()), "\"<\\/script>\"");
    }
}
