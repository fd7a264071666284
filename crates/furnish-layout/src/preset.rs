//! Fixed catalog presets

use furnish_constraint::Solver;
use furnish_core::{Catalog, Placement, Preset, RoomSpec, Vec2};

/// Fit a preset into `room`.
///
/// Each entry is first pulled inside `±(half - inset)` and then run through
/// the solver's containment, so presets never fail. Entries whose type is
/// missing from the catalog are dropped.
pub fn expand_preset(
    preset: &Preset,
    catalog: &Catalog,
    room: &RoomSpec,
    solver: &Solver,
    inset: f32,
) -> Vec<Placement> {
    let lx = (room.half_x - inset).max(0.0);
    let lz = (room.half_z - inset).max(0.0);

    preset
        .entries
        .iter()
        .filter_map(|entry| {
            let kind = match catalog.furniture(entry.type_id) {
                Ok(kind) => kind,
                Err(e) => {
                    tracing::warn!("preset '{}': {}", preset.name, e);
                    return None;
                }
            };
            let pulled = Vec2::new(entry.x.clamp(-lx, lx), entry.z.clamp(-lz, lz));
            let fitted = solver.constrain(kind, room, pulled, entry.rotation, &[], false);
            Some(Placement {
                type_id: entry.type_id,
                x: fitted.position.x,
                z: fitted.position.z,
                rotation: fitted.rotation,
                annotation: entry.annotation.clone(),
            })
        })
        .collect()
}
