//! Catalog listing command

use super::Context;
use anyhow::Result;

pub fn run(ctx: &Context, format: &str) -> Result<()> {
    let catalog = &ctx.catalog;

    if format == "json" {
        let rooms: Vec<serde_json::Value> = catalog
            .rooms()
            .map(|room| {
                serde_json::json!({
                    "id": room.id,
                    "name": room.name,
                    "half_extents": [room.half_x, room.half_z],
                    "floor_area": room.floor_area,
                })
            })
            .collect();
        let furniture: Vec<serde_json::Value> = catalog
            .furniture_types()
            .map(|kind| {
                serde_json::json!({
                    "id": kind.id,
                    "name": kind.name,
                    "radius": kind.radius,
                    "seats": kind.seats,
                    "wall_item": kind.wall_item,
                    "acoustic": kind.acoustic,
                })
            })
            .collect();
        let presets: Vec<&str> = catalog.preset_names().collect();

        let output = serde_json::json!({
            "default_room": catalog.default_room(),
            "rooms": rooms,
            "furniture": furniture,
            "presets": presets,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Rooms:");
    for room in catalog.rooms() {
        let marker = if &room.id == catalog.default_room() {
            " (default)"
        } else {
            ""
        };
        println!(
            "  {:<10} {:.1} x {:.1} m, {:.1} m²  {}{}",
            room.id.as_str(),
            2.0 * room.half_x,
            2.0 * room.half_z,
            room.floor_area,
            room.name,
            marker
        );
    }

    println!("\nFurniture:");
    for kind in catalog.furniture_types() {
        let placement = if kind.wall_item { "wall" } else { "floor" };
        println!(
            "  {:>3}  {:<22} {:<5} r={:.2}  seats={}",
            kind.id, kind.name, placement, kind.radius, kind.seats
        );
    }

    let presets: Vec<&str> = catalog.preset_names().collect();
    if !presets.is_empty() {
        println!("\nPresets: {}", presets.join(", "));
    }

    Ok(())
}
