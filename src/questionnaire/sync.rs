//! Persistence-coupled mutations and the per-node sync state machine.
//!
//! Deletion is two-phase: a node transitions Synced -> PendingDelete when
//! the gateway call is issued and is spliced out of its parent only on the
//! transition into Deleted. A failed gateway call moves the node back to
//! Synced, leaving the local tree exactly as it was. Creates and updates
//! may proceed optimistically because an unsaved node is recognizable by
//! its empty id until the backend confirms.

use anyhow::{Result, bail};
use log::{debug, warn};

use crate::api::gateway::FieldGateway;
use super::field::Field;
use super::ordering::{MoveDirection, assign_unique_order, reorder_adjacent};

/// Local persistence state of a tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncState {
    /// Matches what the backend holds (or is unsaved, shown by an empty id)
    #[default]
    Synced,
    /// A delete has been handed to the gateway and not yet confirmed
    PendingDelete,
    /// The gateway confirmed deletion; the node may be spliced out
    Deleted,
}

/// Remove `field_id` from `children` by id. Silent no-op (returns `None`)
/// when no such child exists. Purely local; callers must have obtained
/// gateway confirmation first (see [`delete_field`]).
pub fn remove_field(children: &mut Vec<Field>, field_id: &str) -> Option<Field> {
    let index = children.iter().position(|f| f.id == field_id)?;
    Some(children.remove(index))
}

/// Two-phase delete of a persisted child: gateway first, splice second.
///
/// On gateway failure the node is restored to `Synced` and stays in
/// `children`; the operation is safe to retry.
pub async fn delete_field(
    gateway: &dyn FieldGateway,
    children: &mut Vec<Field>,
    field_id: &str,
) -> Result<Field> {
    if field_id.is_empty() {
        bail!("cannot delete an unsaved field through the gateway");
    }
    let Some(index) = children.iter().position(|f| f.id == field_id) else {
        bail!("field '{field_id}' is not a child of this node");
    };

    let instance = children[index].instance;
    children[index].sync = SyncState::PendingDelete;
    debug!("deleting field {field_id}");

    match gateway.delete(field_id, instance).await {
        Ok(()) => {
            children[index].sync = SyncState::Deleted;
            Ok(children.remove(index))
        }
        Err(err) => {
            children[index].sync = SyncState::Synced;
            warn!("delete of field {field_id} failed: {err:#}");
            Err(err)
        }
    }
}

/// Persist a field: create when unsaved, update otherwise. Option lists
/// are renumbered densely before the write. On a successful create the
/// server-assigned id is adopted, clearing the unsaved marker; on failure
/// the field keeps its empty id.
pub async fn save_field(gateway: &dyn FieldGateway, field: &mut Field) -> Result<()> {
    assign_unique_order(&mut field.options);

    if field.is_saved() {
        debug!("updating field {}", field.id);
        gateway.update(field).await
    } else {
        debug!("creating field '{}'", field.label);
        let saved = gateway.create(field).await?;
        field.id = saved.id;
        Ok(())
    }
}

/// Swap a field with its neighbor and persist both affected siblings.
///
/// Returns `false` for a boundary no-op. Both sides of the swap must land
/// on the backend; if the second write fails the persisted keys are left
/// duplicated, which the integrity pass flags on reload, and retrying the
/// move is safe.
pub async fn reorder_and_save(
    gateway: &dyn FieldGateway,
    siblings: &mut [Field],
    index: usize,
    direction: MoveDirection,
) -> Result<bool> {
    let Some(neighbor) = reorder_adjacent(siblings, index, direction) else {
        return Ok(false);
    };

    // the moved item now sits at `neighbor`, the displaced one at `index`
    save_field(gateway, &mut siblings[neighbor]).await?;
    save_field(gateway, &mut siblings[index]).await?;
    Ok(true)
}

/// Delete every child through the gateway, stopping at the first failure.
/// Children already confirmed deleted are gone; the rest remain intact.
pub async fn delete_all_fields(
    gateway: &dyn FieldGateway,
    children: &mut Vec<Field>,
) -> Result<usize> {
    let ids: Vec<String> = children.iter().map(|f| f.id.clone()).collect();
    let mut deleted = 0;
    for id in ids {
        delete_field(gateway, children, &id).await?;
        deleted += 1;
    }
    Ok(deleted)
}
