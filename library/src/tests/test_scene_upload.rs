#[cfg(test)]
mod tests {
    use crate::geometry::alias::{Point, Vector};
    use crate::gpu::binding_slots::ResourceKind;
    use crate::geometry::alias::TextureCoordinate;
    use crate::objects::material::{Material, MaterialClass, TextureIndex};
    use crate::objects::mesh::Mesh;
    use crate::objects::sphere::Sphere;
    use crate::objects::texture::{SurfaceTexture, Texture};
    use crate::scene::camera::Camera;
    use crate::scene::mesh_warehouse::parse_mesh;
    use crate::scene::scene_description::SceneDescription;
    use crate::serialization::canonical_layouts::{material_layout, mesh_object_layout, sphere_layout, FIELD_BOUNDS_MAX, FIELD_INDEX_COUNT, FIELD_MATERIAL_INDEX, FIELD_RADIUS, FIELD_TEXTURE_COORDINATES, FIELD_TEXTURE_INDEX, FIELD_VERTEX_COUNT, MAX_MATERIALS, MAX_OBJECTS, MAX_SPHERES};
    use crate::tests::scaffolding::recording_backend::tests::RecordingBackend;

    const PYRAMID_OBJ_FILE: &str = r#"
        v  0.0  1.0  0.0
        v -1.0  0.0 -1.0
        v  1.0  0.0 -1.0
        v  0.0  0.0  1.0
        f 1 2 3
        f 1 3 4
        f 1 4 2
        f 2 4 3
        "#;

    #[must_use]
    fn read_u32(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
    }

    #[must_use]
    fn read_f32(bytes: &[u8], offset: usize) -> f32 {
        f32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
    }

    #[must_use]
    fn make_mixed_scene() -> SceneDescription {
        let camera = Camera::from_degrees(Point::new(0.0, 1.0, 6.0), Point::new(0.0, 0.0, 0.0), Vector::new(0.0, 1.0, 0.0), 45.0, 6.0, 0.5);
        let mut system_under_test = SceneDescription::new(camera);

        let diffuse = system_under_test.add_material(&Material::new().with_albedo(0.7, 0.7, 0.7));
        let mirror = system_under_test.add_material(&Material::new().with_class(MaterialClass::Metal).with_fuzz(0.1));
        let light = system_under_test.add_material(&Material::new().with_emission(1.0, 0.9, 0.8).with_emission_strength(4.0));

        let pyramid = parse_mesh(PYRAMID_OBJ_FILE.as_bytes()).unwrap();
        system_under_test
            .add_mesh(pyramid.translated(Vector::new(-2.0, 0.0, 0.0)).with_material(mirror))
            .add_mesh(pyramid.with_material(diffuse))
            .add_spheres([
                Sphere::new(Point::new(2.0, 0.5, 0.0), 0.5, diffuse),
                Sphere::new(Point::new(0.0, 4.0, 0.0), 0.25, light),
            ]);
        system_under_test
    }

    #[test]
    fn test_mixed_scene_buffers_have_capacity_sizes() {
        let mut backend = RecordingBackend::new();

        let scene = make_mixed_scene().build(&mut backend).unwrap();

        assert_eq!(scene.object_count(), 2);
        assert_eq!(scene.sphere_count(), 2);
        assert_eq!(scene.material_count(), 3);
        assert_eq!(backend.uploaded(ResourceKind::Materials).unwrap().len(), MAX_MATERIALS * 48);
        assert_eq!(backend.uploaded(ResourceKind::Spheres).unwrap().len(), MAX_SPHERES * 32);
        assert_eq!(backend.uploaded(ResourceKind::Camera).unwrap().len(), 64);
        assert_eq!(backend.uploaded(ResourceKind::Objects).unwrap().len(), MAX_OBJECTS * 128048);
    }

    #[test]
    fn test_mixed_scene_mesh_records() {
        let mut backend = RecordingBackend::new();
        let _scene = make_mixed_scene().build(&mut backend).unwrap();
        let plan = mesh_object_layout();
        let objects = backend.uploaded(ResourceKind::Objects).unwrap();

        let first = &objects[0..plan.stride()];
        assert_eq!(read_u32(first, plan.offset_of(FIELD_VERTEX_COUNT)), 4);
        assert_eq!(read_u32(first, plan.offset_of(FIELD_INDEX_COUNT)), 4);
        assert_eq!(read_u32(first, plan.offset_of(FIELD_MATERIAL_INDEX)), 1);
        assert_eq!(read_f32(first, plan.offset_of(FIELD_BOUNDS_MAX)), -1.0);

        let second = &objects[plan.stride()..2 * plan.stride()];
        assert_eq!(read_u32(second, plan.offset_of(FIELD_MATERIAL_INDEX)), 0);
        assert_eq!(read_f32(second, plan.offset_of(FIELD_BOUNDS_MAX)), 1.0);

        let third = &objects[2 * plan.stride()..3 * plan.stride()];
        assert!(third.iter().all(|byte| *byte == 0));
    }

    #[test]
    fn test_mixed_scene_sphere_records() {
        let mut backend = RecordingBackend::new();
        let _scene = make_mixed_scene().build(&mut backend).unwrap();
        let plan = sphere_layout();
        let spheres = backend.uploaded(ResourceKind::Spheres).unwrap();

        assert_eq!(read_f32(spheres, plan.offset_of(FIELD_RADIUS)), 0.5);
        assert_eq!(read_u32(spheres, plan.stride() + plan.offset_of(FIELD_MATERIAL_INDEX)), 2);
        assert!(spheres[2 * plan.stride()..].iter().all(|byte| *byte == 0));
    }

    #[test]
    fn test_upload_is_deterministic() {
        let mut first_backend = RecordingBackend::new();
        let mut second_backend = RecordingBackend::new();

        let _first = make_mixed_scene().build(&mut first_backend).unwrap();
        let _second = make_mixed_scene().build(&mut second_backend).unwrap();

        for kind in [ResourceKind::Materials, ResourceKind::Objects, ResourceKind::Spheres, ResourceKind::Camera] {
            assert_eq!(first_backend.uploaded(kind), second_backend.uploaded(kind), "{kind} differs");
        }
    }

    #[test]
    fn test_textured_scene() {
        let mut backend = RecordingBackend::new();
        let camera = Camera::from_degrees(Point::new(0.0, 2.0, 0.0), Point::new(0.0, 0.0, 0.0), Vector::new(0.0, 0.0, -1.0), 60.0, 2.0, 0.0);
        let mut description = SceneDescription::new(camera);
        let plain = description.add_material(&Material::new());
        let stone = description.add_texture(SurfaceTexture::plain(Texture::filled(2, 2, [90, 90, 90, 255])));
        let bricks = description.add_texture(SurfaceTexture::new(
            Texture::filled(2, 2, [160, 72, 50, 255]),
            Texture::filled(2, 2, [140, 128, 230, 255]),
            Texture::filled(2, 2, [255, 255, 255, 255]),
        ));
        let floor = description.add_material(&Material::new().with_texture(bricks));
        let quad = Mesh::new(
            vec![Point::new(-1.0, 0.0, 1.0), Point::new(1.0, 0.0, 1.0), Point::new(1.0, 0.0, -1.0), Point::new(-1.0, 0.0, -1.0)],
            vec![[0, 1, 2], [0, 2, 3]],
            floor,
        )
        .unwrap()
        .with_texture_mapping(
            vec![TextureCoordinate::new(0.0, 0.0), TextureCoordinate::new(1.0, 0.0), TextureCoordinate::new(1.0, 1.0), TextureCoordinate::new(0.0, 1.0)],
            vec![[0, 1, 2], [0, 2, 3]],
        )
        .unwrap();
        description.add_mesh(quad).add_sphere(Sphere::new(Point::new(0.0, 0.5, 0.0), 0.5, plain));
        assert_eq!(stone, TextureIndex(0));

        let scene = description.build(&mut backend).unwrap();

        assert_eq!(scene.texture_layer_count(), 2);
        let materials = backend.uploaded(ResourceKind::Materials).unwrap();
        let material_plan = material_layout();
        assert_eq!(read_u32(materials, material_plan.offset_of(FIELD_TEXTURE_INDEX)) as i32, -1);
        assert_eq!(read_u32(materials, material_plan.stride() + material_plan.offset_of(FIELD_TEXTURE_INDEX)), 1);

        let objects = backend.uploaded(ResourceKind::Objects).unwrap();
        let object_plan = mesh_object_layout();
        let coordinates = object_plan.field(FIELD_TEXTURE_COORDINATES);
        assert_eq!(read_f32(objects, coordinates.offset_of_element(2)), 1.0);
        assert_eq!(read_f32(objects, coordinates.offset_of_element(2) + 4), 1.0);

        let normals = backend.uploaded_textures(ResourceKind::NormalTextures).unwrap();
        assert_eq!(&normals.texels()[0..4], &[128, 128, 255, 255]);
        assert_eq!(&normals.texels()[16..20], &[140, 128, 230, 255]);
        assert_eq!(backend.uploaded_textures(ResourceKind::ParallaxTextures).unwrap().texels().len(), 2 * 2 * 2 * 4);
    }

    #[test]
    fn test_too_many_objects_touch_no_device() {
        let mut backend = RecordingBackend::new();
        let camera = Camera::from_degrees(Point::new(0.0, 0.0, 5.0), Point::new(0.0, 0.0, 0.0), Vector::new(0.0, 1.0, 0.0), 36.0, 5.0, 0.0);
        let mut description = SceneDescription::new(camera);
        let material = description.add_material(&Material::new());
        let triangle = Mesh::new(vec![Point::new(0.0, 0.0, 0.0), Point::new(1.0, 0.0, 0.0), Point::new(0.0, 1.0, 0.0)], vec![[0, 1, 2]], material).unwrap();
        for _ in 0..=MAX_OBJECTS {
            description.add_mesh(triangle.clone());
        }

        let actual = description.build(&mut backend);

        assert!(matches!(actual, Err(crate::error::TracerError::CapacityExceeded { requested: 51, capacity: 50, .. })));
        assert!(backend.calls().is_empty());
    }
}
