//! Activation and configuration behaviour of the loading plugin.

use minecart_loading::{
    init_logging, Coord, FallLoadingPlugin, LoaderConfig, WorldAccess, WorldEvent,
};
use rstest::rstest;
use test_utils::cargo_of;
use test_utils::fixtures::CartWorldBuilder;

#[rstest]
fn logging_can_be_initialised_repeatedly() {
    init_logging(true);
    init_logging(false);
}

#[rstest]
fn nothing_is_tracked_until_a_world_loads() {
    let (builder, _) = CartWorldBuilder::new().cart((0, 0, 0), 10);
    let mut world = builder.build();
    let mut plugin = FallLoadingPlugin::default();

    for _ in 0..3 {
        assert!(plugin
            .on_update(&mut world)
            .expect("update should succeed")
            .is_none());
    }
    assert!(plugin.pipeline().table().is_empty());

    plugin.on_world_event(WorldEvent::Loaded);
    let report = plugin
        .on_update(&mut world)
        .expect("update should succeed")
        .expect("active plugin should run");

    assert_eq!(report.reconcile.inserted, 1);
}

#[rstest]
fn reloading_a_world_starts_from_scratch() {
    let (builder, cart) = CartWorldBuilder::new().cart((0, 0, 0), 10);
    let (builder, agent) = builder.agent((0, 0, 1));
    let mut world = builder.build();
    let mut plugin = FallLoadingPlugin::default();
    plugin.on_world_event(WorldEvent::Loaded);
    plugin.on_update(&mut world).expect("update should succeed");

    plugin.on_world_event(WorldEvent::Unloaded);
    world.set_agent_position(agent, Coord::new(0, 0, 0));
    plugin.on_world_event(WorldEvent::Loaded);
    let report = plugin
        .on_update(&mut world)
        .expect("update should succeed")
        .expect("active plugin should run");

    // The old snapshot was dropped with the unload, so the landed agent is
    // not mounted on the first tick after reloading.
    assert_eq!(report.reconcile.inserted, 1);
    assert!(report.load.loaded.is_empty());
    assert!(!world.has_rider(cargo_of(&world, cart)));
}

#[rstest]
#[case(false)]
#[case(true)]
fn configured_exit_flag_reaches_mounted_agents(#[case] flag: bool) {
    let json = format!(r#"{{ "flag_exit_vehicle": {flag} }}"#);
    let config = LoaderConfig::from_json_str(&json).expect("config should parse");
    let (builder, cart) = CartWorldBuilder::new().cart((0, 0, 0), 0);
    let (builder, agent) = builder.agent((0, 0, 1));
    let mut world = builder.build();
    let mut plugin = FallLoadingPlugin::new(config);
    plugin.on_world_event(WorldEvent::Loaded);
    plugin.on_update(&mut world).expect("update should succeed");

    world.set_agent_position(agent, Coord::new(0, 0, 0));
    plugin.on_update(&mut world).expect("update should succeed");

    let record = world.agent(agent).expect("agent should exist");
    assert_eq!(record.riding_item, Some(cargo_of(&world, cart)));
    assert!(record.rider);
    assert_eq!(record.exit_vehicle, flag);
}
