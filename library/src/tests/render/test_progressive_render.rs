#[cfg(test)]
mod tests {
    use crate::geometry::alias::{Point, Vector};
    use crate::gpu::frame_buffer_size::FrameBufferSize;
    use crate::gpu::headless_device::tests::create_headless_wgpu_vulkan_context;
    use crate::gpu::wgpu_backend::WgpuBackend;
    use crate::objects::material::Material;
    use crate::objects::sphere::Sphere;
    use crate::scene::camera::Camera;
    use crate::scene::scene_description::SceneDescription;
    use crate::RayTracer;
    use more_asserts::{assert_gt, assert_lt};

    const FRAME_WIDTH: u32 = 64;
    const FRAME_HEIGHT: u32 = 48;
    const FRAMES_TO_ACCUMULATE: u32 = 4;

    #[must_use]
    fn make_glowing_sphere_scene() -> SceneDescription {
        let camera = Camera::from_degrees(Point::new(0.0, 0.0, 4.0), Point::new(0.0, 0.0, 0.0), Vector::new(0.0, 1.0, 0.0), 40.0, 4.0, 0.0);
        let mut description = SceneDescription::new(camera);
        let light = description.add_material(&Material::new().with_emission(1.0, 1.0, 1.0).with_emission_strength(4.0));
        description.add_sphere(Sphere::new(Point::new(0.0, 0.0, 0.0), 0.75, light));
        description
    }

    #[must_use]
    fn make_system_under_test() -> RayTracer<WgpuBackend> {
        let backend = WgpuBackend::new(create_headless_wgpu_vulkan_context()).unwrap();
        let mut system_under_test = RayTracer::with_backend(backend, make_glowing_sphere_scene(), FrameBufferSize::new(FRAME_WIDTH, FRAME_HEIGHT), 4).unwrap();
        system_under_test.reseed(42);
        system_under_test
    }

    #[test]
    #[ignore = "requires a Vulkan adapter"]
    fn test_emitter_is_brighter_than_background() {
        let mut system_under_test = make_system_under_test();
        for _ in 0..FRAMES_TO_ACCUMULATE {
            system_under_test.render_frame().unwrap();
        }

        let pixels = system_under_test.read_pixels().unwrap();

        assert_eq!(pixels.len(), (FRAME_WIDTH * FRAME_HEIGHT) as usize);
        assert!(pixels.iter().all(|pixel| pixel.x.is_finite() && pixel.y.is_finite() && pixel.z.is_finite()));
        let center = pixels[((FRAME_HEIGHT / 2) * FRAME_WIDTH + FRAME_WIDTH / 2) as usize];
        let corner = pixels[0];
        assert_gt!(center.x, 1.0);
        assert_lt!(corner.x, 0.2);
        system_under_test.dispose();
    }

    #[test]
    #[ignore = "requires a Vulkan adapter"]
    fn test_screenshot_of_accumulated_frames() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("glowing_sphere.png");
        let mut system_under_test = make_system_under_test();
        system_under_test.render_frame().unwrap();

        system_under_test.save_screenshot(&path).unwrap();

        let written = image::open(&path).unwrap().to_rgb8();
        assert_eq!(written.dimensions(), (FRAME_WIDTH, FRAME_HEIGHT));
        assert_eq!(written.get_pixel(FRAME_WIDTH / 2, FRAME_HEIGHT / 2)[0], 255);
        system_under_test.dispose();
    }
}
