use glam::{Mat4, Vec3, Vec4};

use super::picking::Ray;

/// Orientation + framing of the arc-ball camera, the part that view presets
/// and animations interpolate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub target: Vec3,
}

impl CameraPose {
    /// Linear blend; `t` is clamped to 0..=1.
    pub fn lerp(&self, to: &CameraPose, t: f32) -> CameraPose {
        let t = t.clamp(0.0, 1.0);
        CameraPose {
            yaw: self.yaw + (to.yaw - self.yaw) * t,
            pitch: self.pitch + (to.pitch - self.pitch) * t,
            distance: self.distance + (to.distance - self.distance) * t,
            target: self.target.lerp(to.target, t),
        }
    }
}

/// Preset viewpoints reachable through the reset shortcuts
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewPreset {
    Front,
    Back,
}

impl ViewPreset {
    /// Pose looking at a body of the given height standing on the origin.
    pub fn pose(self, target: Vec3, distance: f32) -> CameraPose {
        let yaw = match self {
            ViewPreset::Front => 0.0,
            ViewPreset::Back => std::f32::consts::PI,
        };
        CameraPose {
            yaw,
            pitch: 0.1,
            distance,
            target,
        }
    }
}

/// Arc-ball camera for 3D viewport
#[derive(Clone, Debug)]
pub struct ArcBallCamera {
    /// Horizontal rotation angle (radians)
    pub yaw: f32,
    /// Vertical rotation angle (radians)
    pub pitch: f32,
    /// Distance from target
    pub distance: f32,
    /// Camera target point
    pub target: Vec3,
    /// Vertical field of view (radians)
    pub fov: f32,
}

impl Default for ArcBallCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl ArcBallCamera {
    pub fn new() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.1,
            distance: 4.0,
            target: Vec3::new(0.0, 0.9, 0.0),
            fov: 45.0_f32.to_radians(),
        }
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose {
            yaw: self.yaw,
            pitch: self.pitch,
            distance: self.distance,
            target: self.target,
        }
    }

    pub fn set_pose(&mut self, pose: CameraPose) {
        self.yaw = pose.yaw;
        self.pitch = pose.pitch.clamp(-1.5, 1.5);
        self.distance = pose.distance;
        self.target = pose.target;
    }

    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw += dx.to_radians();
        self.pitch = (self.pitch + dy.to_radians()).clamp(-1.5, 1.5);
    }

    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance * (1.0 - delta)).clamp(0.5, 50.0);
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        let right = self.right_vector();
        let up = self.up_vector();
        self.target += right * dx + up * dy;
    }

    /// Camera position in world space
    pub fn eye_position(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();

        self.target
            + Vec3::new(
                self.distance * cp * sy,
                self.distance * sp,
                self.distance * cp * cy,
            )
    }

    /// View matrix (world -> camera)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye_position(), self.target, Vec3::Y)
    }

    /// Projection matrix (camera -> clip)
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov, aspect, 0.05, 100.0)
    }

    /// Combined view-projection matrix
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    fn right_vector(&self) -> Vec3 {
        let fwd = (self.target - self.eye_position()).normalize_or_zero();
        fwd.cross(Vec3::Y).normalize_or_zero()
    }

    fn up_vector(&self) -> Vec3 {
        let fwd = (self.target - self.eye_position()).normalize_or_zero();
        let right = self.right_vector();
        right.cross(fwd).normalize_or_zero()
    }

    /// Project a 3D point to 2D screen coords (for overlay text)
    pub fn project(&self, point: Vec3, rect: egui::Rect) -> Option<egui::Pos2> {
        let aspect = rect.width() / rect.height();
        let p = self.view_projection(aspect) * point.extend(1.0);
        if p.w <= 0.0 {
            return None;
        }
        let ndc = p.truncate() / p.w;
        let screen_x = rect.center().x + ndc.x * rect.width() * 0.5;
        let screen_y = rect.center().y - ndc.y * rect.height() * 0.5;
        Some(egui::pos2(screen_x, screen_y))
    }

    /// Cast a ray from a screen position into the 3D scene
    pub fn screen_ray(&self, screen_pos: egui::Pos2, rect: egui::Rect) -> Ray {
        let aspect = rect.width() / rect.height();

        // Screen → NDC
        let ndc_x = (screen_pos.x - rect.center().x) / (rect.width() * 0.5);
        let ndc_y = -(screen_pos.y - rect.center().y) / (rect.height() * 0.5);

        let vp_inv = self.view_projection(aspect).inverse();

        let near_world = vp_inv * Vec4::new(ndc_x, ndc_y, -1.0, 1.0);
        let far_world = vp_inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);

        let near = near_world.truncate() / near_world.w;
        let far = far_world.truncate() / far_world.w;

        Ray {
            origin: self.eye_position(),
            direction: (far - near).normalize_or_zero(),
        }
    }
}

// ── Reset animation ──────────────────────────────────────────

/// Identifies one started animation; a newer start invalidates older tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationToken(u64);

/// Time-sliced interpolation between two poses, advanced by the frame tick.
#[derive(Clone, Debug)]
pub struct CameraAnimation {
    pub from: CameraPose,
    pub to: CameraPose,
    /// Start time in seconds (host clock)
    pub start: f64,
    /// Duration in seconds
    pub duration: f64,
    pub token: AnimationToken,
}

impl CameraAnimation {
    /// Eased progress in 0..=1 at `now`.
    pub fn progress(&self, now: f64) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        let t = ((now - self.start) / self.duration).clamp(0.0, 1.0) as f32;
        // Ease-out cubic
        1.0 - (1.0 - t).powi(3)
    }

    pub fn pose_at(&self, now: f64) -> CameraPose {
        self.from.lerp(&self.to, self.progress(now))
    }

    pub fn is_finished(&self, now: f64) -> bool {
        now - self.start >= self.duration
    }
}

/// Owns at most one running camera animation.
#[derive(Debug, Default)]
pub struct CameraAnimator {
    active: Option<CameraAnimation>,
    next_token: u64,
}

impl CameraAnimator {
    /// Start animating towards `to`, cancelling whatever was running.
    pub fn start(&mut self, from: CameraPose, to: CameraPose, now: f64, duration: f64) -> AnimationToken {
        self.next_token += 1;
        let token = AnimationToken(self.next_token);
        if self.active.is_some() {
            tracing::debug!("Camera animation superseded");
        }
        self.active = Some(CameraAnimation {
            from,
            to,
            start: now,
            duration,
            token,
        });
        token
    }

    /// Stop the running animation, if any.
    pub fn cancel(&mut self) {
        self.active = None;
    }

    /// Stop the animation only if it is still the one identified by `token`.
    pub fn cancel_token(&mut self, token: AnimationToken) -> bool {
        if self.active.as_ref().is_some_and(|a| a.token == token) {
            self.active = None;
            true
        } else {
            false
        }
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn current_token(&self) -> Option<AnimationToken> {
        self.active.as_ref().map(|a| a.token)
    }

    /// Advance one frame. Returns true while the camera is still moving.
    pub fn tick(&mut self, now: f64, camera: &mut ArcBallCamera) -> bool {
        let Some(anim) = &self.active else {
            return false;
        };
        if anim.is_finished(now) {
            camera.set_pose(anim.to);
            self.active = None;
            false
        } else {
            camera.set_pose(anim.pose_at(now));
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> egui::Rect {
        egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(800.0, 600.0))
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let cam = ArcBallCamera::new();
        let ray = cam.screen_ray(rect().center(), rect());
        let to_target = (cam.target - ray.origin).normalize();
        assert!(ray.direction.dot(to_target) > 0.9999);
    }

    #[test]
    fn test_project_target_lands_in_center() {
        let cam = ArcBallCamera::new();
        let p = cam.project(cam.target, rect()).unwrap();
        assert!((p - rect().center()).length() < 0.5);
    }

    #[test]
    fn test_animation_reaches_target_and_stops() {
        let mut cam = ArcBallCamera::new();
        let mut animator = CameraAnimator::default();
        let to = ViewPreset::Back.pose(cam.target, 5.0);
        animator.start(cam.pose(), to, 10.0, 1.0);

        assert!(animator.tick(10.5, &mut cam));
        assert!(cam.yaw > 0.0 && cam.yaw < std::f32::consts::PI);
        assert!(!animator.tick(11.0, &mut cam));
        assert_eq!(cam.pose(), to);
        assert!(!animator.is_running());
    }

    #[test]
    fn test_second_start_cancels_first() {
        let mut cam = ArcBallCamera::new();
        let mut animator = CameraAnimator::default();
        let first = animator.start(cam.pose(), ViewPreset::Back.pose(cam.target, 4.0), 0.0, 1.0);
        animator.tick(0.5, &mut cam);
        let second = animator.start(cam.pose(), ViewPreset::Front.pose(cam.target, 4.0), 0.5, 1.0);

        assert_ne!(first, second);
        assert!(!animator.cancel_token(first));
        assert_eq!(animator.current_token(), Some(second));

        animator.tick(1.5, &mut cam);
        assert_eq!(cam.yaw, 0.0);
    }

    #[test]
    fn test_zero_duration_jumps() {
        let mut cam = ArcBallCamera::new();
        let mut animator = CameraAnimator::default();
        let to = ViewPreset::Back.pose(Vec3::ZERO, 3.0);
        animator.start(cam.pose(), to, 0.0, 0.0);
        assert!(!animator.tick(0.0, &mut cam));
        assert_eq!(cam.pose(), to);
    }
}
