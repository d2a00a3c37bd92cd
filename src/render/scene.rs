//! Scene composition: studio lights, camera rig, post-processing and the
//! mount/frame/unmount lifecycle of the vessel batches.

use serde::Serialize;

use crate::anatomy::AnatomyModel;
use crate::geom::{BBox, Point3, Transform, Vec3};

use super::batch::{BuildError, MeshBuildOptions, MeshBuilder, VesselBatches};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Light {
    Ambient {
        color: [f64; 3],
        intensity: f64,
    },
    #[serde(rename_all = "camelCase")]
    Directional {
        name: &'static str,
        color: [f64; 3],
        intensity: f64,
        position: [f64; 3],
    },
    #[serde(rename_all = "camelCase")]
    Point {
        name: &'static str,
        color: [f64; 3],
        intensity: f64,
        position: [f64; 3],
        distance: f64,
        decay: f64,
    },
    #[serde(rename_all = "camelCase")]
    Spot {
        name: &'static str,
        color: [f64; 3],
        intensity: f64,
        position: [f64; 3],
        target: [f64; 3],
        angle: f64,
        penumbra: f64,
    },
}

impl Light {
    #[must_use]
    pub fn intensity(&self) -> f64 {
        match self {
            Self::Ambient { intensity, .. }
            | Self::Directional { intensity, .. }
            | Self::Point { intensity, .. }
            | Self::Spot { intensity, .. } => *intensity,
        }
    }
}

/// Fixed studio rig in body coordinates.
///
/// A cool key light from the front right, a warm fill from the left, a rim
/// light from behind, regional point lights for head, torso and legs, and a
/// soft overhead spot.
#[must_use]
pub fn studio_lights() -> Vec<Light> {
    vec![
        Light::Ambient {
            color: [0.62, 0.68, 0.80],
            intensity: 0.35,
        },
        Light::Directional {
            name: "key",
            color: [1.0, 0.97, 0.94],
            intensity: 1.2,
            position: [6.0, 14.0, 10.0],
        },
        Light::Directional {
            name: "fill",
            color: [0.75, 0.82, 1.0],
            intensity: 0.5,
            position: [-8.0, 9.0, 6.0],
        },
        Light::Directional {
            name: "rim",
            color: [0.90, 0.60, 0.65],
            intensity: 0.7,
            position: [0.0, 10.0, -10.0],
        },
        Light::Point {
            name: "head",
            color: [1.0, 0.85, 0.85],
            intensity: 0.6,
            position: [0.0, 15.0, 2.5],
            distance: 8.0,
            decay: 2.0,
        },
        Light::Point {
            name: "torso",
            color: [1.0, 0.78, 0.78],
            intensity: 0.8,
            position: [0.0, 10.5, 3.0],
            distance: 10.0,
            decay: 2.0,
        },
        Light::Point {
            name: "legs",
            color: [0.80, 0.85, 1.0],
            intensity: 0.5,
            position: [0.0, 4.0, 3.0],
            distance: 10.0,
            decay: 2.0,
        },
        Light::Spot {
            name: "overhead",
            color: [1.0, 1.0, 1.0],
            intensity: 0.6,
            position: [0.0, 24.0, 4.0],
            target: [0.0, 8.0, 0.0],
            angle: 0.5,
            penumbra: 0.6,
        },
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrbitControls {
    pub enable_damping: bool,
    pub damping_factor: f64,
    pub enable_pan: bool,
    pub enable_zoom: bool,
    pub min_distance: f64,
    pub max_distance: f64,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraRig {
    pub fov_degrees: f64,
    pub near: f64,
    pub far: f64,
    pub position: [f64; 3],
    pub target: [f64; 3],
    pub controls: OrbitControls,
}

impl CameraRig {
    pub const FOV_DEGREES: f64 = 45.0;
    pub const NEAR: f64 = 0.1;
    pub const FAR: f64 = 200.0;

    /// Frames `bounds` from the front so the whole box fits the vertical field of view.
    #[must_use]
    pub fn framing(bounds: Option<BBox>) -> Self {
        let (target, radius) = match bounds {
            Some(bbox) => (bbox.center(), (bbox.diagonal() * 0.5).max(1.0)),
            None => (Point3::new(0.0, 8.0, 0.0), 8.0),
        };
        let half_fov = (Self::FOV_DEGREES * 0.5).to_radians();
        let distance = (radius / half_fov.tan() * 1.1).min(Self::FAR * 0.5);
        let position = target.add_vec(Vec3::new(0.0, radius * 0.1, distance));

        Self {
            fov_degrees: Self::FOV_DEGREES,
            near: Self::NEAR,
            far: Self::FAR,
            position: position.to_array(),
            target: target.to_array(),
            controls: OrbitControls {
                enable_damping: true,
                damping_factor: 0.08,
                enable_pan: true,
                enable_zoom: true,
                min_distance: radius * 0.25,
                max_distance: (distance * 2.5).min(Self::FAR * 0.9),
                auto_rotate: true,
                auto_rotate_speed: 0.4,
            },
        }
    }

    #[must_use]
    pub fn distance(&self) -> f64 {
        Point3::from_array(self.position).distance_to(Point3::from_array(self.target))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bloom {
    pub intensity: f64,
    pub luminance_threshold: f64,
    pub luminance_smoothing: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vignette {
    pub offset: f64,
    pub darkness: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostProcessing {
    pub bloom: Bloom,
    pub vignette: Vignette,
}

impl Default for PostProcessing {
    fn default() -> Self {
        Self {
            bloom: Bloom {
                intensity: 0.6,
                luminance_threshold: 0.35,
                luminance_smoothing: 0.9,
            },
            vignette: Vignette {
                offset: 0.3,
                darkness: 0.55,
            },
        }
    }
}

/// Slow rotation of the vessel group about the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdleSway {
    /// Radians.
    pub amplitude: f64,
    /// Radians per second.
    pub angular_frequency: f64,
}

impl Default for IdleSway {
    fn default() -> Self {
        Self {
            amplitude: 0.03,
            angular_frequency: 0.1,
        }
    }
}

impl IdleSway {
    /// Rotation angle at `elapsed` seconds.
    #[must_use]
    pub fn angle(&self, elapsed: f64) -> f64 {
        self.amplitude * (self.angular_frequency * elapsed).sin()
    }

    #[must_use]
    pub fn period(&self) -> f64 {
        std::f64::consts::TAU / self.angular_frequency
    }

    /// Rotation by [`angle`](Self::angle) about the vertical line through `pivot`.
    #[must_use]
    pub fn transform(&self, elapsed: f64, pivot: Point3) -> Transform {
        let offset = pivot.to_vec3();
        Transform::translate(offset) * Transform::rotate_y(self.angle(elapsed)) * Transform::translate(-offset)
    }
}

/// Serializable description of everything in the scene except the meshes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneDescription {
    pub background: &'static str,
    pub lights: Vec<Light>,
    pub camera: CameraRig,
    pub post_processing: PostProcessing,
    pub sway: IdleSway,
    pub pivot: [f64; 3],
}

impl SceneDescription {
    #[must_use]
    pub fn for_model(model: &AnatomyModel) -> Self {
        let camera = CameraRig::framing(model.bounds());
        Self {
            background: "#05070d",
            lights: studio_lights(),
            camera,
            post_processing: PostProcessing::default(),
            sway: IdleSway::default(),
            pivot: camera.target,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewerState {
    Constructing,
    Mounted,
    Unmounted,
}

/// Owns the dataset, the scene description and, while mounted, the batches.
#[derive(Debug, Clone)]
pub struct VascularScene {
    model: AnatomyModel,
    builder: MeshBuilder,
    description: SceneDescription,
    batches: Option<VesselBatches>,
    state: ViewerState,
    build_count: usize,
}

impl VascularScene {
    #[must_use]
    pub fn new(model: AnatomyModel, options: MeshBuildOptions) -> Self {
        let description = SceneDescription::for_model(&model);
        Self {
            model,
            builder: MeshBuilder::new(options),
            description,
            batches: None,
            state: ViewerState::Constructing,
            build_count: 0,
        }
    }

    /// Builds the batches unless they are already alive.
    ///
    /// Mounting again after [`unmount`](Self::unmount) rebuilds them.
    pub fn mount(&mut self) -> Result<&VesselBatches, BuildError> {
        let batches = match self.batches.take() {
            Some(batches) => batches,
            None => {
                let built = self.builder.build(&self.model)?;
                self.build_count += 1;
                log::debug!(
                    "mounted {} batches ({})",
                    built.len(),
                    built.diagnostics().summary()
                );
                built
            }
        };
        self.state = ViewerState::Mounted;
        Ok(self.batches.insert(batches))
    }

    /// Sway angle for this frame; zero unless mounted.
    #[must_use]
    pub fn frame(&self, elapsed: f64) -> f64 {
        match self.state {
            ViewerState::Mounted => self.description.sway.angle(elapsed),
            ViewerState::Constructing | ViewerState::Unmounted => 0.0,
        }
    }

    #[must_use]
    pub fn group_transform(&self, elapsed: f64) -> Transform {
        match self.state {
            ViewerState::Mounted => self
                .description
                .sway
                .transform(elapsed, Point3::from_array(self.description.pivot)),
            ViewerState::Constructing | ViewerState::Unmounted => Transform::identity(),
        }
    }

    /// Drops the batches. The JS side releases its GPU buffers alongside.
    pub fn unmount(&mut self) {
        if self.batches.take().is_some() {
            log::debug!("unmounted vessel batches");
        }
        self.state = ViewerState::Unmounted;
    }

    #[must_use]
    pub fn state(&self) -> ViewerState {
        self.state
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.state == ViewerState::Mounted
    }

    #[must_use]
    pub fn batches(&self) -> Option<&VesselBatches> {
        self.batches.as_ref()
    }

    #[must_use]
    pub fn description(&self) -> &SceneDescription {
        &self.description
    }

    #[must_use]
    pub fn model(&self) -> &AnatomyModel {
        &self.model
    }

    /// How many times batches were built over this scene's life.
    #[must_use]
    pub fn build_count(&self) -> usize {
        self.build_count
    }
}

impl Default for VascularScene {
    fn default() -> Self {
        Self::new(AnatomyModel::standard(), MeshBuildOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anatomy::{VesselKind, VesselSegment};

    fn small_model() -> AnatomyModel {
        let segment = VesselSegment::new(
            vec![Point3::new(0.0, 9.0, 0.0), Point3::new(0.1, 10.0, 0.1), Point3::new(0.0, 11.0, 0.0)],
            0.2,
            VesselKind::Artery,
            0,
            "trunk",
        )
        .unwrap();
        AnatomyModel::from_segments(vec![segment])
    }

    #[test]
    fn test_sway_angle() {
        let sway = IdleSway::default();
        assert_eq!(sway.angle(0.0), 0.0);
        assert!((sway.angle(5.0 * std::f64::consts::PI) - 0.03).abs() < 1e-12);
        assert!((sway.period() - 62.831_853).abs() < 1e-5);
        for i in 0..1000 {
            assert!(sway.angle(f64::from(i) * 0.37).abs() <= 0.03);
        }
    }

    #[test]
    fn test_sway_transform_keeps_pivot() {
        let sway = IdleSway::default();
        let pivot = Point3::new(0.0, 8.0, 0.0);
        let moved = sway.transform(15.7, pivot).apply_point(pivot);
        assert!(moved.distance_to(pivot) < 1e-12);
    }

    #[test]
    fn test_lights_and_post_processing() {
        let lights = studio_lights();
        assert_eq!(lights.len(), 8);
        assert!(matches!(lights[0], Light::Ambient { .. }));
        assert_eq!(lights.iter().filter(|l| matches!(l, Light::Directional { .. })).count(), 3);
        assert_eq!(lights.iter().filter(|l| matches!(l, Light::Point { .. })).count(), 3);
        assert_eq!(lights.iter().filter(|l| matches!(l, Light::Spot { .. })).count(), 1);
        assert!(lights.iter().all(|l| l.intensity() > 0.0));

        let post = PostProcessing::default();
        assert_eq!(post.bloom.intensity, 0.6);
        assert_eq!(post.vignette.darkness, 0.55);
    }

    #[test]
    fn test_camera_frames_bounds() {
        let bbox = BBox::new(Point3::new(-3.0, 0.0, -1.0), Point3::new(3.0, 16.0, 1.0));
        let camera = CameraRig::framing(Some(bbox));
        assert_eq!(camera.target, [0.0, 8.0, 0.0]);
        assert_eq!(camera.fov_degrees, 45.0);
        assert!(camera.distance() > bbox.diagonal() * 0.5);
        assert!(camera.distance() < camera.far);
        assert!(camera.controls.min_distance < camera.distance());
        assert!(camera.controls.max_distance > camera.distance());
        assert_eq!(camera.controls.damping_factor, 0.08);
        assert_eq!(camera.controls.auto_rotate_speed, 0.4);
    }

    #[test]
    fn test_lifecycle_memoises_batches() {
        let mut scene = VascularScene::new(small_model(), MeshBuildOptions::default());
        assert_eq!(scene.state(), ViewerState::Constructing);
        assert_eq!(scene.frame(10.0), 0.0);

        let first = scene.mount().unwrap().clone();
        scene.mount().unwrap();
        assert_eq!(scene.build_count(), 1);
        assert!(scene.is_mounted());
        assert_eq!(scene.frame(10.0), IdleSway::default().angle(10.0));

        scene.unmount();
        assert_eq!(scene.state(), ViewerState::Unmounted);
        assert!(scene.batches().is_none());
        assert_eq!(scene.group_transform(3.0), Transform::identity());

        let second = scene.mount().unwrap().clone();
        assert_eq!(scene.build_count(), 2);
        assert_eq!(first.batches(), second.batches());
    }
}
