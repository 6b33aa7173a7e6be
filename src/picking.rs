//! Boundary with the pick collaborator: hit records, planes, and the pick-view
//! frame used to turn slider geometry into world space.

use std::collections::HashMap;

use cgmath::{InnerSpace, Matrix3, Point3, Rad, Vector3};

use crate::config::PuzzleConfig;
use crate::interaction::ViewKind;
use crate::voxel::Axis;

/// What a pointer ray struck.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PickTarget {
    /// A cell of the 3D volume (flat volume index).
    VolumeCell(usize),
    /// The handle of the slider with this normal axis.
    Slider(Axis),
    /// A cell of the 2D layer (row-major layer index).
    LayerCell(usize),
    /// The Mark/Cross paint action toggle.
    ActionSwitch,
}

/// Nearest ray hit reported by the pick collaborator.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PickHit {
    pub target: PickTarget,
    pub point: Point3<f32>,
    /// Face normal in the struck object's local (volume) frame.
    pub face_normal: Vector3<f32>,
}

/// Plane `normal . p + constant = 0`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Plane {
    pub normal: Vector3<f32>,
    pub constant: f32,
}

impl Plane {
    pub fn from_normal_and_coplanar_point(normal: Vector3<f32>, point: Point3<f32>) -> Self {
        Self {
            normal,
            constant: -normal.dot(point - Point3::new(0.0, 0.0, 0.0)),
        }
    }

    pub fn distance_to_point(&self, point: Point3<f32>) -> f32 {
        self.normal.dot(point - Point3::new(0.0, 0.0, 0.0)) + self.constant
    }

    /// Intersection of the ray `origin + t * direction`, `t >= 0`.
    pub fn intersect_ray(
        &self,
        origin: Point3<f32>,
        direction: Vector3<f32>,
    ) -> Option<Point3<f32>> {
        let denominator = self.normal.dot(direction);
        if denominator.abs() <= f32::EPSILON {
            if self.distance_to_point(origin).abs() <= f32::EPSILON {
                return Some(origin);
            }
            return None;
        }
        let t = -self.distance_to_point(origin) / denominator;
        if t < 0.0 {
            return None;
        }
        Some(origin + direction * t)
    }
}

/// The ray-casting side of the host renderer.
pub trait Picker {
    /// Nearest visible object under the screen position in `view`.
    fn pick(&self, view: ViewKind, screen: [f32; 2]) -> Option<PickHit>;

    /// Where the ray under the screen position crosses `plane`.
    fn intersect_plane(
        &self,
        view: ViewKind,
        screen: [f32; 2],
        plane: &Plane,
    ) -> Option<Point3<f32>>;
}

/// World placement of the pick view: the volume group rotation and the
/// camera eye.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PickFrame {
    pub rotation: Matrix3<f32>,
    pub eye: Point3<f32>,
}

impl PickFrame {
    pub fn from_config(config: &PuzzleConfig) -> Self {
        let [rx, ry] = config.pick_view_rotation;
        Self {
            rotation: Matrix3::from_angle_x(Rad(rx)) * Matrix3::from_angle_y(Rad(ry)),
            eye: Point3::new(0.0, 0.0, config.camera_distance),
        }
    }

    pub fn direction_to_world(&self, v: Vector3<f32>) -> Vector3<f32> {
        (self.rotation * v).normalize()
    }

    pub fn point_to_world(&self, p: Point3<f32>) -> Point3<f32> {
        let origin = Point3::new(0.0, 0.0, 0.0);
        origin + self.rotation * (p - origin)
    }
}

fn screen_key(screen: [f32; 2]) -> (i32, i32) {
    (screen[0].round() as i32, screen[1].round() as i32)
}

type ScreenKey = (ViewKind, (i32, i32));

/// A picker that replays canned answers per view and screen position.
///
/// Plane queries return a fixed point when one is registered, otherwise they
/// intersect the registered ray. Used by the demo binary and tests in place
/// of a real renderer.
#[derive(Clone, Debug, Default)]
pub struct ScriptedPicker {
    hits: HashMap<ScreenKey, PickHit>,
    plane_points: HashMap<ScreenKey, Point3<f32>>,
    rays: HashMap<ScreenKey, (Point3<f32>, Vector3<f32>)>,
}

impl ScriptedPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_hit(&mut self, view: ViewKind, screen: [f32; 2], hit: PickHit) -> &mut Self {
        self.hits.insert((view, screen_key(screen)), hit);
        self
    }

    /// Register a hit with the given target, at the origin, facing +Z.
    pub fn set_target(
        &mut self,
        view: ViewKind,
        screen: [f32; 2],
        target: PickTarget,
    ) -> &mut Self {
        self.set_hit(
            view,
            screen,
            PickHit {
                target,
                point: Point3::new(0.0, 0.0, 0.0),
                face_normal: Vector3::unit_z(),
            },
        )
    }

    pub fn clear_hit(&mut self, view: ViewKind, screen: [f32; 2]) -> &mut Self {
        self.hits.remove(&(view, screen_key(screen)));
        self
    }

    pub fn set_plane_point(
        &mut self,
        view: ViewKind,
        screen: [f32; 2],
        point: Point3<f32>,
    ) -> &mut Self {
        self.plane_points.insert((view, screen_key(screen)), point);
        self
    }

    /// Register the camera ray under a screen position.
    pub fn set_ray(
        &mut self,
        view: ViewKind,
        screen: [f32; 2],
        origin: Point3<f32>,
        direction: Vector3<f32>,
    ) -> &mut Self {
        self.rays.insert((view, screen_key(screen)), (origin, direction));
        self
    }
}

impl Picker for ScriptedPicker {
    fn pick(&self, view: ViewKind, screen: [f32; 2]) -> Option<PickHit> {
        self.hits.get(&(view, screen_key(screen))).copied()
    }

    fn intersect_plane(
        &self,
        view: ViewKind,
        screen: [f32; 2],
        plane: &Plane,
    ) -> Option<Point3<f32>> {
        let key = (view, screen_key(screen));
        if let Some(point) = self.plane_points.get(&key) {
            return Some(*point);
        }
        let (origin, direction) = self.rays.get(&key)?;
        plane.intersect_ray(*origin, *direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point3<f32>, b: Point3<f32>) -> bool {
        (a - b).magnitude() < 1e-5
    }

    #[test]
    fn plane_ray_intersection() {
        let plane =
            Plane::from_normal_and_coplanar_point(Vector3::unit_y(), Point3::new(0.0, 2.0, 0.0));
        assert!((plane.distance_to_point(Point3::new(5.0, 3.0, 1.0)) - 1.0).abs() < 1e-6);

        let hit = plane
            .intersect_ray(Point3::new(1.0, 5.0, 1.0), Vector3::new(0.0, -1.0, 0.0))
            .unwrap();
        assert!(close(hit, Point3::new(1.0, 2.0, 1.0)));

        // pointing away
        assert!(plane
            .intersect_ray(Point3::new(1.0, 5.0, 1.0), Vector3::new(0.0, 1.0, 0.0))
            .is_none());
        // parallel
        assert!(plane
            .intersect_ray(Point3::new(1.0, 5.0, 1.0), Vector3::new(1.0, 0.0, 0.0))
            .is_none());
    }

    #[test]
    fn pick_frame_rotates_x_then_y() {
        let frame = PickFrame::from_config(&PuzzleConfig::default());
        // Y rotation by -pi/4 takes +Z towards -X, then X rotation tilts it.
        let v = frame.direction_to_world(Vector3::unit_y());
        let h = std::f32::consts::FRAC_1_SQRT_2;
        assert!((v - Vector3::new(0.0, h, h)).magnitude() < 1e-5);
        assert_eq!(frame.eye, Point3::new(0.0, 0.0, 50.0));

        let p = frame.point_to_world(Point3::new(0.0, 2.0, 0.0));
        assert!(close(p, Point3::new(0.0, 2.0 * h, 2.0 * h)));
    }

    #[test]
    fn scripted_picker_casts_registered_rays() {
        let plane =
            Plane::from_normal_and_coplanar_point(Vector3::unit_z(), Point3::new(0.0, 0.0, 0.0));
        let mut picker = ScriptedPicker::new();
        picker.set_ray(
            ViewKind::Selecting,
            [1.0, 1.0],
            Point3::new(3.0, 4.0, 10.0),
            Vector3::new(0.0, 0.0, -1.0),
        );
        let hit = picker
            .intersect_plane(ViewKind::Selecting, [1.0, 1.0], &plane)
            .unwrap();
        assert!(close(hit, Point3::new(3.0, 4.0, 0.0)));
        assert!(picker
            .intersect_plane(ViewKind::Solving, [1.0, 1.0], &plane)
            .is_none());

        // a fixed point wins over the ray
        picker.set_plane_point(ViewKind::Selecting, [1.0, 1.0], Point3::new(9.0, 9.0, 9.0));
        let fixed = picker
            .intersect_plane(ViewKind::Selecting, [1.0, 1.0], &plane)
            .unwrap();
        assert_eq!(fixed, Point3::new(9.0, 9.0, 9.0));
    }

    #[test]
    fn scripted_picker_replays_by_view_and_position() {
        let mut picker = ScriptedPicker::new();
        picker.set_target(ViewKind::Selecting, [10.2, 20.0], PickTarget::VolumeCell(3));
        let hit = picker.pick(ViewKind::Selecting, [10.0, 19.8]).unwrap();
        assert_eq!(hit.target, PickTarget::VolumeCell(3));
        assert!(picker.pick(ViewKind::Solving, [10.0, 20.0]).is_none());

        picker.clear_hit(ViewKind::Selecting, [10.0, 20.0]);
        assert!(picker.pick(ViewKind::Selecting, [10.0, 20.0]).is_none());
    }
}
