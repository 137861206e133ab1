//! Moving a candidate into a vehicle once it has landed there.
//!
//! Items go through the host's container insertion, which refuses airborne
//! items and items still attached to buildings. [`load_item`] grounds the item
//! first and shelves the offending links around the move so the item keeps
//! them whether or not the move succeeds. Creatures are mounted directly by
//! [`mount_agent`].

use log::debug;

use crate::error::LoadingError;
use crate::link::Link;
use crate::world::{AgentId, ItemId, RideFlags, WorldAccess};

/// Result of a transfer that did not hit a host inconsistency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOutcome {
    /// The candidate now belongs to the vehicle.
    Loaded,
    /// The host refused; the candidate is left where it was.
    Refused,
}

/// Loads `item` into `cargo_item`.
///
/// # Errors
/// Returns [`LoadingError::MissingInFlightRecord`] when the item is airborne
/// but its projectile record cannot be found.
pub fn load_item<W: WorldAccess + ?Sized>(
    world: &mut W,
    item: ItemId,
    cargo_item: ItemId,
) -> Result<TransferOutcome, LoadingError> {
    let in_flight = world
        .links_of(item)
        .iter()
        .find_map(Link::in_flight);
    if let Some(projectile) = in_flight {
        debug!("grounding {item} before loading; it was carried by {projectile}");
        world.detach_from_flight(item, projectile)?;
    }

    let shelved = shelve_links(world, item);
    let moved = world.move_into_container(item, cargo_item);
    restore_links(world, item, &shelved);

    debug!(
        "moving {item} into {cargo_item} {} with {} shelved link(s)",
        if moved { "succeeded" } else { "was refused" },
        shelved.len()
    );
    Ok(if moved {
        TransferOutcome::Loaded
    } else {
        TransferOutcome::Refused
    })
}

/// Removes every shelvable link from `item`, returned in their original
/// list order.
fn shelve_links<W: WorldAccess + ?Sized>(world: &mut W, item: ItemId) -> Vec<Link> {
    let indices: Vec<usize> = world
        .links_of(item)
        .iter()
        .enumerate()
        .filter(|(_, link)| link.is_shelvable())
        .map(|(index, _)| index)
        .collect();

    // Highest index first so the remaining indices stay valid.
    let mut shelved: Vec<Link> = indices
        .into_iter()
        .rev()
        .filter_map(|index| world.remove_link(item, index))
        .collect();
    shelved.reverse();
    shelved
}

/// Appends the shelved links back onto `item`; they end up after whatever
/// links the move added.
fn restore_links<W: WorldAccess + ?Sized>(world: &mut W, item: ItemId, shelved: &[Link]) {
    for &link in shelved {
        world.append_link(item, link);
    }
}

/// Mounts `agent` on the vehicle whose cargo item is `cargo_item`.
pub fn mount_agent<W: WorldAccess + ?Sized>(
    world: &mut W,
    agent: AgentId,
    cargo_item: ItemId,
    flags: RideFlags,
) -> TransferOutcome {
    world.set_agent_riding(agent, cargo_item, flags);
    world.set_item_rider(cargo_item, agent);
    debug!("{agent} now rides {cargo_item}");
    TransferOutcome::Loaded
}
