use log::{error, info};
use raytracer::error::TracerError;
use raytracer::geometry::alias::{Point, TextureCoordinate, Vector};
use raytracer::geometry::transform::Transformation;
use raytracer::objects::material::{Material, MaterialClass, TextureIndex};
use raytracer::objects::material_index::MaterialIndex;
use raytracer::objects::mesh::Mesh;
use raytracer::objects::sphere::Sphere;
use raytracer::objects::texture::SurfaceTexture;
use raytracer::scene::camera::Camera;
use raytracer::scene::mesh_warehouse::MeshWarehouse;
use raytracer::scene::scene_description::SceneDescription;
use std::path::Path;

const WALL_OFFSET: f32 = 0.999;

struct Palette {
    bark: MaterialIndex,
    foliage: MaterialIndex,
    white_wall: MaterialIndex,
    brick_floor: MaterialIndex,
    green_wall: MaterialIndex,
    lamp: MaterialIndex,
    gold: MaterialIndex,
    frosted_silver: MaterialIndex,
}

impl Palette {
    #[must_use]
    fn new(scene: &mut SceneDescription, bricks: TextureIndex) -> Self {
        let bark = scene.add_material(&Material::new().with_albedo(105.0 / 255.0, 75.0 / 255.0, 55.0 / 255.0));
        let foliage = scene.add_material(&Material::new().with_albedo(95.0 / 255.0, 99.0 / 255.0, 68.0 / 255.0));

        let white_wall = scene.add_material(&Material::new()
            .with_class(MaterialClass::Metal)
            .with_albedo(0.95, 0.95, 0.95)
            .with_fuzz(0.005));

        let brick_floor = scene.add_material(&Material::new()
            .with_albedo(1.0, 1.0, 1.0)
            .with_texture(bricks));

        let green_wall = scene.add_material(&Material::new()
            .with_class(MaterialClass::Metal)
            .with_albedo(0.7, 0.95, 0.7)
            .with_fuzz(0.01));

        let lamp = scene.add_material(&Material::new()
            .with_albedo(1.0, 1.0, 1.0)
            .with_emission(1.0, 1.0, 1.0)
            .with_emission_strength(1.0));

        let gold = scene.add_material(&Material::new()
            .with_class(MaterialClass::Metal)
            .with_albedo(233.0 / 255.0, 191.0 / 255.0, 4.0 / 255.0)
            .with_emission(233.0 / 255.0, 191.0 / 255.0, 4.0 / 255.0)
            .with_emission_strength(0.1)
            .with_fuzz(0.9));

        let frosted_silver = scene.add_material(&Material::new()
            .with_class(MaterialClass::Metal)
            .with_albedo(1.0, 1.0, 1.0)
            .with_fuzz(0.8));

        Self { bark, foliage, white_wall, brick_floor, green_wall, lamp, gold, frosted_silver }
    }
}

fn quad(corners: [Point; 4], material: MaterialIndex) -> Result<Mesh, TracerError> {
    Mesh::new(corners.to_vec(), vec![[0, 1, 2], [0, 2, 3]], material)
}

fn add_walls(scene: &mut SceneDescription, palette: &Palette) -> Result<(), TracerError> {
    let floor = quad([
        Point::new(-2.0, -0.99, 0.0),
        Point::new(2.0, -0.99, 0.0),
        Point::new(2.0, -0.99, -4.0),
        Point::new(-2.0, -0.99, -4.0),
    ], palette.brick_floor)?
    .with_texture_mapping(vec![
        TextureCoordinate::new(0.0, 0.0),
        TextureCoordinate::new(1.0, 0.0),
        TextureCoordinate::new(1.0, 1.0),
        TextureCoordinate::new(0.0, 1.0),
    ], vec![[0, 1, 2], [0, 2, 3]])?;

    let ceiling = quad([
        Point::new(-1.0, 0.99, -1.0),
        Point::new(1.0, 0.99, -1.0),
        Point::new(1.0, 0.99, -3.0),
        Point::new(-1.0, 0.99, -3.0),
    ], palette.white_wall)?;

    let back = quad([
        Point::new(-1.0, -1.0, -3.0 + 0.001),
        Point::new(1.0, -1.0, -3.0 + 0.001),
        Point::new(1.0, 1.0, -3.0 + 0.001),
        Point::new(-1.0, 1.0, -3.0 + 0.001),
    ], palette.white_wall)?;

    let front = quad([
        Point::new(-1.0, -1.0, -1.001),
        Point::new(1.0, -1.0, -1.001),
        Point::new(1.0, 1.0, -1.001),
        Point::new(-1.0, 1.0, -1.001),
    ], palette.white_wall)?;

    let left = quad([
        Point::new(-WALL_OFFSET, -2.0, -1.0),
        Point::new(-WALL_OFFSET, -2.0, -3.0),
        Point::new(-WALL_OFFSET, 2.0, -3.0),
        Point::new(-WALL_OFFSET, 2.0, -1.0),
    ], palette.green_wall)?;

    let right = quad([
        Point::new(WALL_OFFSET, -1.0, -1.0),
        Point::new(WALL_OFFSET, -1.0, -3.0),
        Point::new(WALL_OFFSET, 1.0, -3.0),
        Point::new(WALL_OFFSET, 1.0, -1.0),
    ], palette.green_wall)?;

    let lamp = quad([
        Point::new(-0.2, 0.989, -1.5),
        Point::new(0.2, 0.989, -1.5),
        Point::new(0.2, 0.989, -2.5),
        Point::new(-0.2, 0.989, -2.5),
    ], palette.lamp)?;

    for wall in [back, floor, ceiling, front, left, right, lamp] {
        scene.add_mesh(wall);
    }
    Ok(())
}

fn add_ornaments(scene: &mut SceneDescription, palette: &Palette) {
    let ornaments = [
        (Point::new(-0.414, -0.1279, -1.656), 0.047, palette.frosted_silver),
        (Point::new(-0.122, -0.22, -1.63), 0.056, palette.gold),
        (Point::new(-0.122, 0.417, -1.76), 0.051, palette.frosted_silver),
        (Point::new(0.28, 0.058, -1.832), 0.05, palette.gold),
        (Point::new(0.28, 0.336, -2.015), 0.062, palette.gold),
        (Point::new(0.373, -0.444, -1.74), 0.043, palette.frosted_silver),
        (Point::new(-0.43, -0.72, -1.70), 0.053, palette.gold),
        (Point::new(0.0, -0.53, -2.44), 0.051, palette.frosted_silver),
        (Point::new(-0.34, -0.02, -2.2), 0.058, palette.gold),
    ];
    scene.add_spheres(ornaments.into_iter().map(|(center, radius, material)| Sphere::new(center, radius, material)));
}

/// Stacks a thin trunk and two crowns from one pyramid model.
fn add_tree(scene: &mut SceneDescription, palette: &Palette, assets: &Path) -> Result<(), TracerError> {
    let mut meshes = MeshWarehouse::new();
    let model_path = assets.join("pyramid.obj");
    let pyramid = meshes.load(&model_path).inspect_err(|loading_error| {
        error!("failed to load the tree model {}: {loading_error}", model_path.display());
    })?;

    let trunk = Transformation::identity()
        .with_translation(Vector::new(0.0, -0.99, -2.0))
        .with_scale(Vector::new(0.12, 0.9, 0.12));
    let lower_crown = Transformation::identity()
        .with_translation(Vector::new(0.0, -0.75, -2.0))
        .with_scale(Vector::new(1.1, 0.8, 1.1));
    let upper_crown = Transformation::identity()
        .with_translation(Vector::new(0.0, -0.2, -2.0))
        .with_uniform_scale(0.75);

    scene
        .add_mesh(meshes.instantiate(pyramid, &trunk, palette.bark))
        .add_mesh(meshes.instantiate(pyramid, &lower_crown, palette.foliage))
        .add_mesh(meshes.instantiate(pyramid, &upper_crown, palette.foliage));
    Ok(())
}

/// Mirrored box on a brick floor, lit by a ceiling lamp, with a tree decorated by glowing ornaments.
pub(super) fn make_festive_box(camera: Camera, assets: &Path) -> Result<SceneDescription, TracerError> {
    let mut scene = SceneDescription::new(camera);
    let bricks_folder = assets.join("textures").join("bricks");
    let bricks = SurfaceTexture::load(&bricks_folder).inspect_err(|loading_error| {
        error!("failed to load textures from {}: {loading_error}", bricks_folder.display());
    })?;
    let bricks = scene.add_texture(bricks);
    let palette = Palette::new(&mut scene, bricks);

    add_walls(&mut scene, &palette)?;
    add_ornaments(&mut scene, &palette);
    add_tree(&mut scene, &palette, assets)?;

    info!("festive box: {} meshes, {} spheres", scene.meshes().len(), scene.spheres().len());
    Ok(scene)
}
