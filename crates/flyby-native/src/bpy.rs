//! Scene host that writes a Blender Python script.
//!
//! Running the generated script inside Blender (`blender --python out.py`)
//! builds the scene and the camera animation natively.

use anyhow::Context;
use flyby_core::{
    BackgroundRequest, CameraRequest, Interpolation, LabelRequest, LightKind, LightRequest,
    SceneHost, SphereRequest, Timeline,
};
use glam::Vec3;
use std::fmt::Write as _;
use std::path::Path;

pub struct BpyScriptHost {
    script: String,
    materials: usize,
}

impl Default for BpyScriptHost {
    fn default() -> Self {
        Self::new()
    }
}

impl BpyScriptHost {
    pub fn new() -> Self {
        let mut script = String::new();
        script.push_str("import bpy\n\n");
        script.push_str(PRELUDE);
        Self {
            script,
            materials: 0,
        }
    }

    pub fn into_script(self) -> String {
        self.script
    }

    fn line(&mut self, args: std::fmt::Arguments<'_>) {
        // Writing into a String cannot fail.
        _ = self.script.write_fmt(args);
        self.script.push('\n');
    }

    fn next_material(&mut self, base: &str) -> String {
        self.materials += 1;
        format!("{base}.{:03}", self.materials)
    }
}

// Helpers emitted once at the top of every script.
const PRELUDE: &str = r#"def link(mat, a, a_out, b, b_in):
    mat.node_tree.links.new(a.outputs[a_out], b.inputs[b_in])


def node_material(name):
    mat = bpy.data.materials.new(name=name)
    mat.use_nodes = True
    mat.node_tree.nodes.clear()
    return mat


def emission_material(name):
    mat = node_material(name)
    emission = mat.node_tree.nodes.new("ShaderNodeEmission")
    output = mat.node_tree.nodes.new("ShaderNodeOutputMaterial")
    link(mat, emission, "Emission", output, "Surface")
    emission.inputs["Color"].default_value = (1.0, 1.0, 1.0, 1.0)
    emission.inputs["Strength"].default_value = 1.0
    return mat

"#;

fn py_float(v: f32) -> String {
    if v.is_nan() {
        "float('nan')".to_string()
    } else if v.is_infinite() {
        let sign = if v < 0.0 { "-" } else { "" };
        format!("float('{sign}inf')")
    } else {
        format!("{v:.6}")
    }
}

fn py_vec(v: Vec3) -> String {
    format!("({}, {}, {})", py_float(v.x), py_float(v.y), py_float(v.z))
}

fn py_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                _ = write!(out, "\\u{:04x}", c as u32);
            }
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

fn py_interpolation(mode: Interpolation) -> &'static str {
    match mode {
        Interpolation::Constant => "CONSTANT",
        Interpolation::Linear => "LINEAR",
        Interpolation::Bezier => "BEZIER",
    }
}

impl SceneHost for BpyScriptHost {
    fn clear(&mut self) -> anyhow::Result<()> {
        self.line(format_args!("bpy.ops.object.select_all(action='SELECT')"));
        self.line(format_args!("bpy.ops.object.delete(use_global=False)\n"));
        Ok(())
    }

    fn add_sphere(&mut self, req: &SphereRequest) -> anyhow::Result<()> {
        let a = &req.appearance;
        let mat = self.next_material("DynamicNoise");
        self.line(format_args!(
            "bpy.ops.mesh.primitive_uv_sphere_add(location={}, segments={}, ring_count={})",
            py_vec(req.position),
            req.segments,
            req.rings
        ));
        self.line(format_args!("obj = bpy.context.object"));
        self.line(format_args!("obj.name = {}", py_str(&req.name)));
        self.line(format_args!("obj.scale = {}", py_vec(Vec3::splat(req.scale))));
        self.line(format_args!("bpy.ops.object.shade_smooth()"));
        self.line(format_args!("mat = node_material({})", py_str(&mat)));
        self.line(format_args!("nodes = mat.node_tree.nodes"));
        self.line(format_args!("noise = nodes.new(\"ShaderNodeTexNoise\")"));
        self.line(format_args!("ramp = nodes.new(\"ShaderNodeValToRGB\")"));
        self.line(format_args!("bsdf = nodes.new(\"ShaderNodeBsdfPrincipled\")"));
        self.line(format_args!("out = nodes.new(\"ShaderNodeOutputMaterial\")"));
        self.line(format_args!("link(mat, noise, \"Fac\", ramp, \"Fac\")"));
        self.line(format_args!("link(mat, ramp, \"Color\", bsdf, \"Base Color\")"));
        self.line(format_args!("link(mat, bsdf, \"BSDF\", out, \"Surface\")"));
        self.line(format_args!(
            "noise.inputs[\"Scale\"].default_value = {}",
            py_float(a.noise_scale)
        ));
        self.line(format_args!(
            "noise.inputs[\"Detail\"].default_value = {}",
            py_float(a.detail)
        ));
        self.line(format_args!(
            "noise.inputs[\"Roughness\"].default_value = {}",
            py_float(a.roughness)
        ));
        for (i, stop) in a.ramp.iter().enumerate() {
            self.line(format_args!(
                "ramp.color_ramp.elements[{i}].color = ({}, {}, {}, {})",
                py_float(stop.x),
                py_float(stop.y),
                py_float(stop.z),
                py_float(stop.w)
            ));
        }
        self.line(format_args!("ramp.color_ramp.interpolation = 'EASE'"));
        self.line(format_args!("obj.data.materials.append(mat)\n"));
        Ok(())
    }

    fn add_label(&mut self, req: &LabelRequest) -> anyhow::Result<()> {
        self.line(format_args!(
            "bpy.ops.object.text_add(location={})",
            py_vec(req.position)
        ));
        self.line(format_args!("obj = bpy.context.object"));
        self.line(format_args!("obj.data.body = {}", py_str(&req.text)));
        self.line(format_args!("obj.data.size = {}", py_float(req.size)));
        self.line(format_args!("obj.data.align_x = 'CENTER'"));
        self.line(format_args!("obj.rotation_euler = {}", py_vec(req.rotation)));
        if req.emissive {
            let mat = self.next_material("Emission");
            self.line(format_args!(
                "obj.data.materials.append(emission_material({}))",
                py_str(&mat)
            ));
        }
        self.script.push('\n');
        Ok(())
    }

    fn add_camera(&mut self, req: &CameraRequest) -> anyhow::Result<()> {
        self.line(format_args!(
            "bpy.ops.object.camera_add(location={})",
            py_vec(req.position)
        ));
        self.line(format_args!("camera = bpy.context.object"));
        self.line(format_args!("camera.rotation_euler = {}", py_vec(req.rotation)));
        if req.active {
            self.line(format_args!("bpy.context.scene.camera = camera"));
        }
        self.script.push('\n');
        Ok(())
    }

    fn add_light(&mut self, req: &LightRequest) -> anyhow::Result<()> {
        let kind = match req.kind {
            LightKind::Sun => "SUN",
        };
        self.line(format_args!(
            "bpy.ops.object.light_add(type='{kind}', location={})",
            py_vec(req.position)
        ));
        self.line(format_args!("obj = bpy.context.object"));
        self.line(format_args!("obj.rotation_euler = {}", py_vec(req.rotation)));
        self.line(format_args!("obj.data.energy = {}", py_float(req.energy)));
        let shadow = if req.cast_shadows { "True" } else { "False" };
        self.line(format_args!("obj.data.use_shadow = {shadow}\n"));
        Ok(())
    }

    fn image_size(&mut self, path: &Path) -> anyhow::Result<(u32, u32)> {
        image::image_dimensions(path)
            .with_context(|| format!("reading background image {}", path.display()))
    }

    fn add_background(&mut self, req: &BackgroundRequest) -> anyhow::Result<()> {
        let image = req
            .image
            .canonicalize()
            .with_context(|| format!("resolving {}", req.image.display()))?;
        let mat = self.next_material("BackgroundImage");
        self.line(format_args!(
            "image = bpy.data.images.load({})",
            py_str(&image.to_string_lossy())
        ));
        self.line(format_args!(
            "bpy.ops.mesh.primitive_plane_add(location={})",
            py_vec(req.position)
        ));
        self.line(format_args!("obj = bpy.context.object"));
        self.line(format_args!("obj.rotation_euler = {}", py_vec(req.rotation)));
        self.line(format_args!("obj.scale = {}", py_vec(req.scale)));
        self.line(format_args!("mat = node_material({})", py_str(&mat)));
        self.line(format_args!("nodes = mat.node_tree.nodes"));
        self.line(format_args!("tex = nodes.new(type=\"ShaderNodeTexImage\")"));
        self.line(format_args!("out = nodes.new(type=\"ShaderNodeOutputMaterial\")"));
        self.line(format_args!("bsdf = nodes.new(type=\"ShaderNodeBsdfPrincipled\")"));
        self.line(format_args!("tex.image = image"));
        self.line(format_args!("link(mat, tex, \"Color\", bsdf, \"Base Color\")"));
        self.line(format_args!("link(mat, bsdf, \"BSDF\", out, \"Surface\")"));
        self.line(format_args!("obj.data.materials.append(mat)\n"));
        Ok(())
    }

    fn animate_camera(&mut self, timeline: &Timeline) -> anyhow::Result<()> {
        for key in &timeline.keyframes {
            self.line(format_args!("camera.location = {}", py_vec(key.position)));
            self.line(format_args!(
                "camera.keyframe_insert(data_path=\"location\", frame={})",
                key.frame
            ));
        }
        self.line(format_args!(
            "for curve in camera.animation_data.action.fcurves:"
        ));
        self.line(format_args!("    for key in curve.keyframe_points:"));
        self.line(format_args!(
            "        key.interpolation = '{}'\n",
            py_interpolation(timeline.interpolation)
        ));
        Ok(())
    }

    fn set_frame_range(&mut self, start: i32, end: i32) -> anyhow::Result<()> {
        self.line(format_args!("bpy.context.scene.frame_start = {start}"));
        self.line(format_args!("bpy.context.scene.frame_end = {end}"));
        Ok(())
    }
}
