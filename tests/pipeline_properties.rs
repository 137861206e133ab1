//! Properties of the three-phase loading pipeline on an in-memory world.

mod common;

use anyhow::Result;
use common::LoadingAssertions;
use minecart_loading::world_handle::ItemRecord;
use minecart_loading::{
    BuildingId, Coord, Link, Loadable, TickPipeline, TrackedVehicle, WorldAccess,
};
use rstest::rstest;
use test_utils::fixtures::{rolling_east, CartWorldBuilder};
use test_utils::{cargo_of, link_count};

#[rstest]
fn reconciling_twice_matches_reconciling_once() {
    let (builder, _) = CartWorldBuilder::new().cart((0, 0, 0), 10);
    let (builder, _) = builder.cart((4, 0, 0), 10);
    let world = builder.build();
    let mut pipeline = TickPipeline::default();

    pipeline.reconcile(&world);
    let once = pipeline.table().clone();
    pipeline.reconcile(&world);

    assert_eq!(pipeline.table(), &once);
}

#[rstest]
fn new_vehicle_loads_nothing_on_its_first_tick() -> Result<()> {
    let (builder, cart) = CartWorldBuilder::new().cart((0, 0, 0), 100);
    let (builder, rock) = builder.item((0, 0, 0), 1);
    let mut world = builder.build();
    let mut pipeline = TickPipeline::default();

    pipeline.reconcile(&world);
    let entry = LoadingAssertions::entry(&pipeline, cart)?;
    assert!(entry.candidates_at_current.is_empty());
    assert!(entry.candidates_at_next.is_empty());

    let summary = pipeline.perform_loading(&mut world)?;

    assert!(summary.loaded.is_empty());
    LoadingAssertions::assert_loaded(&world, cart, rock, false)
}

#[rstest]
fn moved_vehicle_consults_the_next_tile_snapshot() -> Result<()> {
    let (builder, cart) = CartWorldBuilder::new().moving_cart((6, 5, 5), 100, rolling_east());
    let (builder, expected) = builder.item((6, 5, 5), 5);
    let (builder, decoy) = builder.item((6, 5, 5), 5);
    let mut world = builder.build();
    let mut pipeline = TickPipeline::default();
    let mut entry = TrackedVehicle::new(cart);
    entry.current_pos = Coord::new(5, 5, 5);
    entry.predicted_next_pos = Coord::new(6, 5, 5);
    entry.candidates_at_current.insert(Loadable::Item(decoy));
    entry.candidates_at_next.insert(Loadable::Item(expected));
    pipeline.table_mut().insert(entry);

    let summary = pipeline.perform_loading(&mut world)?;

    assert_eq!(summary.loaded, vec![(cart, Loadable::Item(expected))]);
    LoadingAssertions::assert_loaded(&world, cart, expected, true)?;
    LoadingAssertions::assert_loaded(&world, cart, decoy, false)
}

#[rstest]
fn stationary_vehicle_consults_its_own_tile_snapshot() -> Result<()> {
    let (builder, cart) = CartWorldBuilder::new().cart((5, 5, 5), 100);
    let (builder, expected) = builder.item((5, 5, 5), 5);
    let (builder, decoy) = builder.item((5, 5, 5), 5);
    let mut world = builder.build();
    let mut pipeline = TickPipeline::default();
    let mut entry = TrackedVehicle::new(cart);
    entry.current_pos = Coord::new(5, 5, 5);
    entry.predicted_next_pos = Coord::new(6, 5, 5);
    entry.candidates_at_current.insert(Loadable::Item(expected));
    entry.candidates_at_next.insert(Loadable::Item(decoy));
    pipeline.table_mut().insert(entry);

    pipeline.perform_loading(&mut world)?;

    LoadingAssertions::assert_loaded(&world, cart, expected, true)?;
    LoadingAssertions::assert_loaded(&world, cart, decoy, false)
}

#[rstest]
#[case(10, true)]
#[case(11, false)]
fn falling_item_respects_remaining_capacity(
    #[case] volume: i32,
    #[case] expected: bool,
) -> Result<()> {
    let (builder, cart) = CartWorldBuilder::new().cart((0, 0, 0), 100);
    let (builder, ballast) = builder.item((0, 0, 0), 90);
    let (builder, rock, _) = builder.falling_item((0, 0, 1), volume);
    let mut world = builder.build();
    assert!(world.move_into_container(ballast, cargo_of(&world, cart)));
    let mut pipeline = TickPipeline::default();
    pipeline.run_tick(&mut world)?;

    world.set_item_position(rock, Coord::new(0, 0, 0));
    let report = pipeline.run_tick(&mut world)?;

    assert_eq!(report.load.rejected, usize::from(!expected));
    LoadingAssertions::assert_loaded(&world, cart, rock, expected)
}

#[rstest]
fn falling_item_keeps_its_building_link() -> Result<()> {
    let holder = Link::BuildingHolder(BuildingId(12));
    let (builder, cart) = CartWorldBuilder::new().cart((2, 2, 2), 100);
    let (builder, rock, projectile) = builder.falling_item((2, 2, 3), 1);
    let mut world = builder.build();
    world.append_link(rock, holder);
    let mut pipeline = TickPipeline::default();
    pipeline.run_tick(&mut world)?;

    world.set_item_position(rock, Coord::new(2, 2, 2));
    pipeline.run_tick(&mut world)?;

    assert_eq!(link_count(&world, rock, holder), 1);
    assert_eq!(link_count(&world, rock, Link::Projectile(projectile)), 0);
    assert!(world.projectiles().is_empty());
    LoadingAssertions::assert_loaded(&world, cart, rock, true)
}

#[rstest]
fn only_one_of_two_landing_agents_rides() -> Result<()> {
    let (builder, cart) = CartWorldBuilder::new().cart((0, 0, 0), 0);
    let (builder, first) = builder.agent((0, 0, 1));
    let (builder, second) = builder.agent((0, 0, 1));
    let mut world = builder.build();
    let mut pipeline = TickPipeline::default();
    pipeline.run_tick(&mut world)?;

    world.set_agent_position(first, Coord::new(0, 0, 0));
    world.set_agent_position(second, Coord::new(0, 0, 0));
    let report = pipeline.run_tick(&mut world)?;

    let cargo = cargo_of(&world, cart);
    assert_eq!(report.load.loaded, vec![(cart, Loadable::Agent(first))]);
    assert_eq!(report.load.rejected, 1);
    assert!(world.has_rider(cargo));
    assert_eq!(
        world.agent(first).and_then(|agent| agent.riding_item),
        Some(cargo)
    );
    assert_eq!(world.agent(second).and_then(|agent| agent.riding_item), None);
    Ok(())
}

#[rstest]
fn candidate_that_moved_away_is_ignored() -> Result<()> {
    let (builder, cart) = CartWorldBuilder::new().cart((0, 0, 0), 100);
    let (builder, rock) = builder.item((0, 0, 1), 1);
    let mut world = builder.build();
    let mut pipeline = TickPipeline::default();
    pipeline.run_tick(&mut world)?;

    world.set_item_position(rock, Coord::new(1, 0, 0));
    let report = pipeline.run_tick(&mut world)?;

    assert_eq!(report.load.arrived, 0);
    LoadingAssertions::assert_loaded(&world, cart, rock, false)
}

#[rstest]
fn removed_vehicle_is_dropped_before_loading() -> Result<()> {
    let (builder, cart) = CartWorldBuilder::new().cart((0, 0, 0), 100);
    let (builder, _) = builder.item((0, 0, 1), 1);
    let mut world = builder.build();
    let mut pipeline = TickPipeline::default();
    pipeline.run_tick(&mut world)?;

    world.remove_vehicle(cart);
    let report = pipeline.run_tick(&mut world)?;

    assert_eq!(report.reconcile.removed, 1);
    assert!(pipeline.table().is_empty());
    Ok(())
}

#[rstest]
fn resting_items_in_the_cart_tile_are_not_snapshotted() -> Result<()> {
    let (builder, cart) = CartWorldBuilder::new().cart((0, 0, 0), 100);
    let mut world = builder.build();
    world.spawn_item(ItemRecord::resting(Coord::new(0, 0, 0), 1));
    let mut pipeline = TickPipeline::default();

    pipeline.run_tick(&mut world)?;

    let entry = LoadingAssertions::entry(&pipeline, cart)?;
    assert!(entry.candidates_at_current.is_empty());
    Ok(())
}

#[rstest]
fn rolling_cart_snapshots_the_tile_ahead() -> Result<()> {
    let (builder, cart) = CartWorldBuilder::new().moving_cart((0, 0, 0), 100, rolling_east());
    let (builder, agent) = builder.agent((1, 0, 1));
    let mut world = builder.build();
    let mut pipeline = TickPipeline::default();

    pipeline.run_tick(&mut world)?;

    let entry = LoadingAssertions::entry(&pipeline, cart)?;
    assert_eq!(entry.predicted_next_pos, Coord::new(1, 0, 0));
    LoadingAssertions::assert_in_next_snapshot(&pipeline, cart, Loadable::Agent(agent))
}
