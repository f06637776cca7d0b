//! Cameras: a free camera and the third-person variant that follows the
//! player.

use cgmath::Vector3;

use super::entity::Entity;

/// Height of the camera's focus point above the player's feet.
const EYE_HEIGHT: f32 = 10.0;

/// A camera described by position and Euler angles.
///
/// Pitch rotates around the X-axis (looking up/down), yaw around the
/// Y-axis (turning left/right), roll around the Z-axis. Angles are in
/// degrees.
#[derive(Clone, Debug)]
pub struct Camera {
    pub position: Vector3<f32>,
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            position: Vector3::new(0.0, 1.0, 0.0),
            pitch: 0.0,
            yaw: 0.0,
            roll: 0.0,
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// A camera that orbits a followed entity.
///
/// Each frame [`update`](Self::update) recomputes position and yaw from
/// the player's position and Y-rotation. `distance_from_player`,
/// `angle_around_player` and the base camera's pitch are driven by input
/// handling outside this crate.
#[derive(Clone, Debug)]
pub struct ThirdPersonCamera {
    pub camera: Camera,
    pub distance_from_player: f32,
    pub angle_around_player: f32,
}

impl ThirdPersonCamera {
    pub fn new() -> Self {
        Self {
            camera: Camera::new(),
            distance_from_player: 25.0,
            angle_around_player: 0.0,
        }
    }

    /// Repositions the camera behind the followed player.
    ///
    /// The camera sits on a circle of radius `distance_from_player`
    /// (projected by the pitch) around the player, at the angle given by
    /// the player's facing plus `angle_around_player`, and yaws back
    /// toward the player.
    pub fn update(&mut self, player: &Entity) {
        let horizontal = self.distance_from_player * self.camera.pitch.to_radians().cos();
        let vertical = self.distance_from_player * self.camera.pitch.to_radians().sin();

        let theta = (player.rotation.y + self.angle_around_player).to_radians();
        let offset_x = horizontal * theta.sin();
        let offset_z = horizontal * theta.cos();

        self.camera.position.x = player.position.x + offset_x;
        self.camera.position.z = player.position.z - offset_z;
        self.camera.position.y = player.position.y + EYE_HEIGHT + vertical;
        self.camera.yaw = 180.0 - player.rotation.y + self.angle_around_player;
    }
}

impl Default for ThirdPersonCamera {
    fn default() -> Self {
        Self::new()
    }
}
