use crate::camera::Camera;
use crate::scene::Scene;

/// The drawing side of the stage.
///
/// The animation loop never draws anything itself: each frame it sets the surface opacity and
/// then hands the current scene and camera over for presentation.
pub trait RenderSurface {
    /// Opacity of the whole surface for the coming frame, in [0, 1].
    fn set_opacity(&mut self, opacity: f32);

    /// Draw `scene` as seen by `camera`.
    fn present(&mut self, scene: &Scene, camera: &Camera);
}

impl<R: RenderSurface + ?Sized> RenderSurface for &mut R {
    fn set_opacity(&mut self, opacity: f32) {
        (**self).set_opacity(opacity);
    }

    fn present(&mut self, scene: &Scene, camera: &Camera) {
        (**self).present(scene, camera);
    }
}
