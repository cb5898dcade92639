use std::sync::Arc;

use bevy_ecs::world::World;
use worldgen_core::{generate_world, GeneratedWorld, WorldGenConfig, WorldGenConfigHandle};

#[test]
fn generated_world_is_an_ecs_resource() {
    let config = Arc::new(
        WorldGenConfig::default()
            .with_dimensions(12, 12)
            .with_seed(77)
            .with_regions(3),
    );
    let mut ecs = World::new();
    ecs.insert_resource(WorldGenConfigHandle::new(config.clone()));

    let handle = ecs.resource::<WorldGenConfigHandle>().get();
    let generated = generate_world(&handle).expect("valid config");
    let fingerprint = generated.fingerprint();
    ecs.insert_resource(generated);

    let stored = ecs.resource::<GeneratedWorld>();
    assert_eq!(stored.seed, 77);
    assert_eq!(stored.fingerprint(), fingerprint);
    assert!(stored.regions.region_at(0, 0).is_some());
}
