//! Capability interface to the 3D scene host, plus an in-memory recorder.
//!
//! The host is a pure sink: the assembler issues creation requests in order
//! and never reads scene state back, apart from the size of a background
//! image.

use crate::appearance::NoiseAppearance;
use crate::timeline::Timeline;
use glam::Vec3;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// UV sphere primitive with a noise material.
#[derive(Clone, Debug, PartialEq)]
pub struct SphereRequest {
    pub name: String,
    pub position: Vec3,
    pub scale: f32,
    pub segments: u32,
    pub rings: u32,
    pub appearance: NoiseAppearance,
}

/// Centered text object. `rotation` is XYZ Euler in radians.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelRequest {
    pub text: String,
    pub position: Vec3,
    pub size: f32,
    pub rotation: Vec3,
    pub emissive: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CameraRequest {
    pub position: Vec3,
    pub rotation: Vec3,
    /// Make this the scene's render camera.
    pub active: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightKind {
    Sun,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LightRequest {
    pub kind: LightKind,
    pub position: Vec3,
    pub rotation: Vec3,
    pub energy: f32,
    pub cast_shadows: bool,
}

/// Image-textured plane behind the spheres. `scale` is the plane's
/// (width, height, 1) scale.
#[derive(Clone, Debug, PartialEq)]
pub struct BackgroundRequest {
    pub image: PathBuf,
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

/// Scene creation operations provided by a 3D host.
///
/// Calls are made sequentially by a single writer. Any error aborts the run.
pub trait SceneHost {
    /// Remove every object from the active scene.
    fn clear(&mut self) -> anyhow::Result<()>;
    fn add_sphere(&mut self, req: &SphereRequest) -> anyhow::Result<()>;
    fn add_label(&mut self, req: &LabelRequest) -> anyhow::Result<()>;
    fn add_camera(&mut self, req: &CameraRequest) -> anyhow::Result<()>;
    fn add_light(&mut self, req: &LightRequest) -> anyhow::Result<()>;
    /// Load `path` and return its pixel `(width, height)`.
    fn image_size(&mut self, path: &Path) -> anyhow::Result<(u32, u32)>;
    fn add_background(&mut self, req: &BackgroundRequest) -> anyhow::Result<()>;
    /// Attach the timeline's keyframes to the camera created by `add_camera`.
    fn animate_camera(&mut self, timeline: &Timeline) -> anyhow::Result<()>;
    fn set_frame_range(&mut self, start: i32, end: i32) -> anyhow::Result<()>;
}

/// One request as seen by [`RecordingHost`].
#[derive(Clone, Debug, PartialEq)]
pub enum SceneCommand {
    Clear,
    Sphere(SphereRequest),
    Label(LabelRequest),
    Camera(CameraRequest),
    Light(LightRequest),
    Background(BackgroundRequest),
    AnimateCamera(Timeline),
    FrameRange(i32, i32),
}

/// Host that records requests in order instead of building a scene.
///
/// Image sizes must be registered with [`RecordingHost::with_image`]; any
/// other path fails like a missing file would.
#[derive(Clone, Debug, Default)]
pub struct RecordingHost {
    pub commands: Vec<SceneCommand>,
    images: HashMap<PathBuf, (u32, u32)>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(mut self, path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        self.images.insert(path.into(), (width, height));
        self
    }

    pub fn spheres(&self) -> impl Iterator<Item = &SphereRequest> {
        self.commands.iter().filter_map(|c| match c {
            SceneCommand::Sphere(s) => Some(s),
            _ => None,
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = &LabelRequest> {
        self.commands.iter().filter_map(|c| match c {
            SceneCommand::Label(l) => Some(l),
            _ => None,
        })
    }

    pub fn lights(&self) -> impl Iterator<Item = &LightRequest> {
        self.commands.iter().filter_map(|c| match c {
            SceneCommand::Light(l) => Some(l),
            _ => None,
        })
    }

    pub fn camera(&self) -> Option<&CameraRequest> {
        self.commands.iter().find_map(|c| match c {
            SceneCommand::Camera(cam) => Some(cam),
            _ => None,
        })
    }

    pub fn background(&self) -> Option<&BackgroundRequest> {
        self.commands.iter().find_map(|c| match c {
            SceneCommand::Background(bg) => Some(bg),
            _ => None,
        })
    }

    pub fn timeline(&self) -> Option<&Timeline> {
        self.commands.iter().find_map(|c| match c {
            SceneCommand::AnimateCamera(tl) => Some(tl),
            _ => None,
        })
    }
}

impl SceneHost for RecordingHost {
    fn clear(&mut self) -> anyhow::Result<()> {
        self.commands.clear();
        self.commands.push(SceneCommand::Clear);
        Ok(())
    }

    fn add_sphere(&mut self, req: &SphereRequest) -> anyhow::Result<()> {
        self.commands.push(SceneCommand::Sphere(req.clone()));
        Ok(())
    }

    fn add_label(&mut self, req: &LabelRequest) -> anyhow::Result<()> {
        self.commands.push(SceneCommand::Label(req.clone()));
        Ok(())
    }

    fn add_camera(&mut self, req: &CameraRequest) -> anyhow::Result<()> {
        self.commands.push(SceneCommand::Camera(req.clone()));
        Ok(())
    }

    fn add_light(&mut self, req: &LightRequest) -> anyhow::Result<()> {
        self.commands.push(SceneCommand::Light(req.clone()));
        Ok(())
    }

    fn image_size(&mut self, path: &Path) -> anyhow::Result<(u32, u32)> {
        self.images
            .get(path)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("image not found: {}", path.display()))
    }

    fn add_background(&mut self, req: &BackgroundRequest) -> anyhow::Result<()> {
        self.commands.push(SceneCommand::Background(req.clone()));
        Ok(())
    }

    fn animate_camera(&mut self, timeline: &Timeline) -> anyhow::Result<()> {
        self.commands.push(SceneCommand::AnimateCamera(timeline.clone()));
        Ok(())
    }

    fn set_frame_range(&mut self, start: i32, end: i32) -> anyhow::Result<()> {
        self.commands.push(SceneCommand::FrameRange(start, end));
        Ok(())
    }
}
